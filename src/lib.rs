// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `xs1_lib` - A Rust client for EZcontrol XS1 home automation gateways.
//!
//! The XS1 drives radio actuators (switches, dimmers, blinds, heating
//! valves) and reads radio sensors. This library speaks its HTTP API and
//! exposes gateways, actuators and sensors as async Rust types.
//!
//! # Supported Features
//!
//! - **Gateway information**: device name, firmware, uptime, supported systems
//! - **Actuators**: list, read, set values, execute function slots, rename
//! - **Sensors**: list, read, set values on virtual sensors, rename
//! - **Configuration**: read and write raw actuator and sensor configuration
//!
//! # Quick Start
//!
//! ```no_run
//! use xs1_lib::{AnyActuator, Device, DeviceFilter, Gateway};
//!
//! #[tokio::main]
//! async fn main() -> xs1_lib::Result<()> {
//!     let gateway = Gateway::http("192.168.1.10")
//!         .with_credentials("admin", "secret")
//!         .build()
//!         .await?;
//!
//!     println!("{} (firmware {})", gateway.gateway_name(), gateway.firmware_version());
//!
//!     for actuator in gateway.list_actuators(DeviceFilter::Enabled).await? {
//!         match actuator {
//!             AnyActuator::Switch(mut switch) => switch.turn_on().await?,
//!             AnyActuator::Thermostat(mut thermostat) => thermostat.set_temperature(21.0).await?,
//!             AnyActuator::Generic(actuator) => println!("{actuator}"),
//!         }
//!     }
//!
//!     for sensor in gateway.list_sensors(DeviceFilter::Enabled).await? {
//!         println!("{}: {:?} {}", sensor.name().unwrap_or("?"), sensor.value(), sensor.unit().unwrap_or(""));
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Custom Transports
//!
//! Everything but the HTTP delivery is transport independent. Implement
//! [`protocol::Transport`] and hand it to [`Gateway::with_transport`] to
//! route requests elsewhere, e.g. through a proxy or a test double. The
//! `reqwest` transport lives behind the default `http` feature.

pub mod command;
pub mod device;
pub mod error;
pub mod gateway;
pub mod protocol;
pub mod types;

#[cfg(test)]
mod testing;

pub use command::Command;
pub use device::{
    Actuator, AnyActuator, Device, DeviceFilter, DeviceState, Function, Sensor, Switch, Thermostat,
};
pub use error::{Error, GatewayError, ParseError, ProtocolError, Result, ValueError};
#[cfg(feature = "http")]
pub use gateway::{GatewayBuilder, HttpGateway};
pub use gateway::{Gateway, GatewayInfo};
#[cfg(feature = "http")]
pub use protocol::{HttpConfig, HttpTransport};
pub use protocol::{Connection, Parameters, Transport};
pub use types::{
    ActuatorType, ApiConstant, DeviceType, ErrorCode, FunctionType, Node, RfSystem, SensorType,
    SystemType, UrlParam,
};
