// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Actuators.

use std::fmt;

use serde_json::Value;

use crate::device::{Category, Device, DeviceCore, DeviceState, Function};
use crate::error::{Error, ValueError};
use crate::gateway::Gateway;
use crate::protocol::Transport;
use crate::types::{FunctionType, Node};

/// A device the gateway can drive: a switch, dimmer, blind, heating valve...
///
/// See [`Switch`](crate::device::Switch) and
/// [`Thermostat`](crate::device::Thermostat) for the typed conveniences.
#[derive(Debug, Clone)]
pub struct Actuator<T: Transport> {
    core: DeviceCore<T>,
}

impl<T: Transport> Actuator<T> {
    /// Creates an actuator from a state record.
    #[must_use]
    pub fn new(gateway: Gateway<T>, state: DeviceState) -> Self {
        Self {
            core: DeviceCore::new(gateway, state, Category::Actuator),
        }
    }

    /// Returns the gateway this actuator belongs to.
    #[must_use]
    pub fn gateway(&self) -> &Gateway<T> {
        &self.core.gateway
    }

    /// Re-reads the state from the gateway.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn update(&mut self) -> Result<(), Error> {
        self.core.update().await
    }

    /// Sets a new value.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn set_value(&mut self, value: f64) -> Result<(), Error> {
        self.core.set_value(value).await
    }

    /// Renames the actuator and returns the name the gateway stored.
    ///
    /// Nothing is written if the gateway already has that name.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::InvalidName`] without any request if `name`
    /// holds anything but ASCII letters, digits and underscores.
    pub async fn set_name(&mut self, name: &str) -> Result<String, Error> {
        self.core.set_name(name).await
    }

    /// Returns the functions of this actuator, without disabled slots.
    ///
    /// Ids are the 1-based slot positions, so they stay stable even when
    /// earlier slots are disabled.
    #[must_use]
    pub fn functions(&self) -> Vec<Function> {
        let Some(Value::Array(slots)) = self.core.state.get(Node::Function.as_str()) else {
            return Vec::new();
        };

        let actuator = self.core.state.identifier();
        slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| {
                let function_type = slot
                    .get(Node::Type.as_str())
                    .and_then(Value::as_str)
                    .map_or(FunctionType::Unknown, FunctionType::parse_lossy);
                if function_type == FunctionType::Disabled {
                    return None;
                }
                let description = slot
                    .get(Node::Description.as_str())
                    .and_then(Value::as_str)
                    .unwrap_or_default();
                Some(Function::new(actuator, index + 1, function_type, description))
            })
            .collect()
    }

    /// Finds a function by its 1-based id.
    #[must_use]
    pub fn function_by_id(&self, id: usize) -> Option<Function> {
        self.functions().into_iter().find(|f| f.id() == id)
    }

    /// Finds the first function of the given type.
    #[must_use]
    pub fn function_by_type(&self, function_type: FunctionType) -> Option<Function> {
        self.functions()
            .into_iter()
            .find(|f| f.function_type() == function_type)
    }

    /// Executes one of this actuator's functions.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::InvalidArgument`] without any request if
    /// `function` was taken from another actuator, or error if the request
    /// fails.
    pub async fn call_function(&mut self, function: &Function) -> Result<(), Error> {
        let number = self.core.number()?;
        if function.actuator() != Some(number) {
            return Err(ValueError::InvalidArgument(format!(
                "function {} belongs to actuator {:?}, not {number}",
                function.id(),
                function.actuator()
            ))
            .into());
        }

        let fragment = self
            .core
            .gateway
            .call_actuator_function(number, function.id())
            .await?;
        self.core.state.merge(fragment);
        Ok(())
    }
}

impl<T: Transport> Device for Actuator<T> {
    fn state(&self) -> &DeviceState {
        &self.core.state
    }
}

impl<T: Transport> fmt::Display for Actuator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Actuator {}", self.core.state)
    }
}
