// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Actuators and sensors attached to a gateway.
//!
//! Devices are snapshots: every list call on the [`Gateway`] builds fresh
//! objects from the gateway's answer, each holding its own [`DeviceState`].
//! Mutators send one request and merge the returned fragment into that state.
//!
//! ```no_run
//! use xs1_lib::{AnyActuator, Device, DeviceFilter, Gateway};
//!
//! # async fn example() -> xs1_lib::Result<()> {
//! let gateway = Gateway::http("192.168.1.10").build().await?;
//!
//! for actuator in gateway.list_actuators(DeviceFilter::Enabled).await? {
//!     if let AnyActuator::Switch(mut switch) = actuator {
//!         switch.turn_on().await?;
//!         println!("{} is now at {:?}", switch.name().unwrap_or("?"), switch.value());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod actuator;
mod function;
mod sensor;
mod state;
mod variant;

pub use actuator::Actuator;
pub use function::Function;
pub use sensor::Sensor;
pub use state::DeviceState;
pub use variant::{AnyActuator, Switch, Thermostat};

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::error::{Error, ParseError, ValueError};
use crate::gateway::Gateway;
use crate::protocol::Transport;
use crate::types::{DeviceType, Node};

/// Read access shared by every device kind.
///
/// All accessors read the cached state; none of them touch the network.
pub trait Device {
    /// Returns the cached state record.
    fn state(&self) -> &DeviceState;

    /// Returns the `id` field.
    fn id(&self) -> Option<u64> {
        self.state().id()
    }

    /// Returns the `number` field.
    fn number(&self) -> Option<u64> {
        self.state().number()
    }

    /// Returns the number used to address this device in requests.
    fn identifier(&self) -> Option<u64> {
        self.state().identifier()
    }

    /// Returns the device type.
    fn device_type(&self) -> Option<DeviceType> {
        self.state().device_type()
    }

    /// Returns `true` unless the device type is `disabled`.
    fn is_enabled(&self) -> bool {
        self.state().is_enabled()
    }

    /// Returns the name.
    fn name(&self) -> Option<&str> {
        self.state().name()
    }

    /// Returns the current value.
    fn value(&self) -> Option<f64> {
        self.state().value()
    }

    /// Returns the pending value.
    fn new_value(&self) -> Option<f64> {
        self.state().new_value()
    }

    /// Returns the unit.
    fn unit(&self) -> Option<&str> {
        self.state().unit()
    }

    /// Returns the last update as a Unix timestamp.
    fn last_update(&self) -> Option<i64> {
        self.state().last_update()
    }

    /// Returns the last update as a UTC time.
    fn last_update_time(&self) -> Option<DateTime<Utc>> {
        self.state().last_update_time()
    }
}

/// Selects devices by enabled status when listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DeviceFilter {
    /// Every device.
    #[default]
    All,
    /// Devices whose type is not `disabled`.
    Enabled,
    /// Devices whose type is `disabled`.
    Disabled,
}

impl DeviceFilter {
    /// Returns `true` if a device with `state` passes this filter.
    #[must_use]
    pub fn accepts(self, state: &DeviceState) -> bool {
        match self {
            Self::All => true,
            Self::Enabled => state.is_enabled(),
            Self::Disabled => !state.is_enabled(),
        }
    }
}

/// Returns `true` if `name` only holds ASCII letters, digits and underscores.
///
/// ```
/// use xs1_lib::device::is_valid_name;
///
/// assert!(is_valid_name("Kitchen_Light2"));
/// assert!(!is_valid_name("bad name!"));
/// assert!(!is_valid_name(""));
/// ```
#[must_use]
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Category {
    Actuator,
    Sensor,
}

/// Gateway handle plus state, shared by actuators and sensors.
#[derive(Debug, Clone)]
struct DeviceCore<T: Transport> {
    gateway: Gateway<T>,
    state: DeviceState,
    category: Category,
}

impl<T: Transport> DeviceCore<T> {
    fn new(gateway: Gateway<T>, state: DeviceState, category: Category) -> Self {
        Self {
            gateway,
            state,
            category,
        }
    }

    fn number(&self) -> Result<u64, Error> {
        self.state
            .identifier()
            .ok_or_else(|| ParseError::MissingField(Node::Number.to_string()).into())
    }

    async fn update(&mut self) -> Result<(), Error> {
        let number = self.number()?;
        let fragment = match self.category {
            Category::Actuator => self.gateway.actuator_state(number).await?,
            Category::Sensor => self.gateway.sensor_state(number).await?,
        };
        self.state.merge(fragment);
        Ok(())
    }

    async fn set_value(&mut self, value: f64) -> Result<(), Error> {
        let number = self.number()?;
        let fragment = match self.category {
            Category::Actuator => self.gateway.set_actuator_value(number, value).await?,
            Category::Sensor => self.gateway.set_sensor_value(number, value).await?,
        };
        self.state.merge(fragment);
        Ok(())
    }

    async fn set_name(&mut self, name: &str) -> Result<String, Error> {
        if !is_valid_name(name) {
            return Err(ValueError::InvalidName(name.to_string()).into());
        }
        let number = self.number()?;

        let mut config = match self.category {
            Category::Actuator => self.gateway.get_config_actuator(number).await?,
            Category::Sensor => self.gateway.get_config_sensor(number).await?,
        };

        let key = Node::Name.as_str();
        if config.get(key).and_then(Value::as_str) == Some(name) {
            tracing::debug!(device = number, name, "Name unchanged, skipping write");
            return Ok(name.to_string());
        }

        config.insert(key.to_string(), Value::from(name));
        let written = match self.category {
            Category::Actuator => self.gateway.set_config_actuator(number, config).await?,
            Category::Sensor => self.gateway.set_config_sensor(number, config).await?,
        };

        let new_name = written
            .get(key)
            .and_then(Value::as_str)
            .ok_or_else(|| ParseError::MissingField(Node::Name.to_string()))?
            .to_string();

        let mut fragment = serde_json::Map::new();
        fragment.insert(key.to_string(), Value::from(new_name.as_str()));
        self.state.merge(fragment);
        Ok(new_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn filter_by_enabled_status() {
        let enabled = DeviceState::from_value(json!({"type": "switch"}));
        let disabled = DeviceState::from_value(json!({"type": "disabled"}));

        assert!(DeviceFilter::All.accepts(&enabled));
        assert!(DeviceFilter::All.accepts(&disabled));
        assert!(DeviceFilter::Enabled.accepts(&enabled));
        assert!(!DeviceFilter::Enabled.accepts(&disabled));
        assert!(DeviceFilter::Disabled.accepts(&disabled));
        assert!(!DeviceFilter::Disabled.accepts(&enabled));
    }

    #[test]
    fn name_policy() {
        assert!(is_valid_name("Heizung_Bad"));
        assert!(is_valid_name("A1"));
        assert!(!is_valid_name("bad name!"));
        assert!(!is_valid_name("with-dash"));
        assert!(!is_valid_name("Küche"));
        assert!(!is_valid_name(""));
    }
}
