// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Protocol vocabulary of the XS1 gateway.
//!
//! Every name the gateway protocol uses is a closed constant type here.
//! Constants compare equal to plain strings carrying their canonical value,
//! which keeps comparisons against raw JSON strings in one place.
//!
//! # Types
//!
//! - [`UrlParam`] - Query parameter names
//! - [`Node`] - JSON node names
//! - [`ErrorCode`] - Gateway error codes and their messages
//! - [`ActuatorType`] / [`SensorType`] - Device taxonomies
//! - [`DeviceType`] - A resolved device type with pass-through fallback
//! - [`FunctionType`] - Actuator function actions
//! - [`SystemType`] / [`RfSystem`] - RF systems, with pass-through fallback

mod constant;
mod device_type;
mod function_type;
mod vocabulary;

pub use constant::ApiConstant;
pub(crate) use constant::api_constant;
pub use device_type::{ActuatorType, DeviceType, SensorType};
pub use function_type::{FunctionType, RfSystem, SystemType};
pub use vocabulary::{ErrorCode, Node, UrlParam};
