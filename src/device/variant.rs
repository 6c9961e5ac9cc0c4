// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed actuator variants.

use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::device::{Actuator, Device, DeviceState};
use crate::error::Error;
use crate::gateway::Gateway;
use crate::protocol::Transport;
use crate::types::ActuatorType;

/// An on/off or dimmable actuator.
#[derive(Debug, Clone)]
pub struct Switch<T: Transport>(Actuator<T>);

impl<T: Transport> Switch<T> {
    /// Value sent by [`turn_on`](Self::turn_on).
    pub const ON: f64 = 100.0;
    /// Value sent by [`turn_off`](Self::turn_off).
    pub const OFF: f64 = 0.0;

    /// Wraps an actuator.
    #[must_use]
    pub fn new(actuator: Actuator<T>) -> Self {
        Self(actuator)
    }

    /// Sets the value to 100.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn turn_on(&mut self) -> Result<(), Error> {
        self.0.set_value(Self::ON).await
    }

    /// Sets the value to 0.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn turn_off(&mut self) -> Result<(), Error> {
        self.0.set_value(Self::OFF).await
    }

    /// Returns the plain actuator.
    #[must_use]
    pub fn into_inner(self) -> Actuator<T> {
        self.0
    }
}

/// A heating valve or thermostat.
#[derive(Debug, Clone)]
pub struct Thermostat<T: Transport>(Actuator<T>);

impl<T: Transport> Thermostat<T> {
    /// Wraps an actuator.
    #[must_use]
    pub fn new(actuator: Actuator<T>) -> Self {
        Self(actuator)
    }

    /// Sets the target temperature.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn set_temperature(&mut self, temperature: f64) -> Result<(), Error> {
        self.0.set_value(temperature).await
    }

    /// Returns the plain actuator.
    #[must_use]
    pub fn into_inner(self) -> Actuator<T> {
        self.0
    }
}

macro_rules! actuator_wrapper {
    ($name:ident) => {
        impl<T: Transport> Deref for $name<T> {
            type Target = Actuator<T>;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl<T: Transport> DerefMut for $name<T> {
            fn deref_mut(&mut self) -> &mut Self::Target {
                &mut self.0
            }
        }

        impl<T: Transport> Device for $name<T> {
            fn state(&self) -> &DeviceState {
                self.0.state()
            }
        }

        impl<T: Transport> fmt::Display for $name<T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{} {}", stringify!($name), self.0.state())
            }
        }
    };
}

actuator_wrapper!(Switch);
actuator_wrapper!(Thermostat);

/// An actuator as returned by the list calls, built by its `type` field.
///
/// Switches and dimmers become [`Switch`], heating devices become
/// [`Thermostat`]; everything else, including types this library does not
/// know, stays a plain [`Actuator`].
#[derive(Debug, Clone)]
pub enum AnyActuator<T: Transport> {
    /// Switch or dimmer.
    Switch(Switch<T>),
    /// Heating valve or thermostat.
    Thermostat(Thermostat<T>),
    /// Any other actuator.
    Generic(Actuator<T>),
}

impl<T: Transport> AnyActuator<T> {
    /// Builds the matching variant for a state record.
    #[must_use]
    pub fn from_state(gateway: Gateway<T>, state: DeviceState) -> Self {
        let kind = state.device_type().and_then(|t| t.as_actuator());
        let actuator = Actuator::new(gateway, state);
        match kind {
            Some(t) if t.is_switch_like() => Self::Switch(Switch::new(actuator)),
            Some(ActuatorType::Thermostat) => Self::Thermostat(Thermostat::new(actuator)),
            _ => Self::Generic(actuator),
        }
    }

    /// Returns the switch, if this is one.
    #[must_use]
    pub fn into_switch(self) -> Option<Switch<T>> {
        match self {
            Self::Switch(switch) => Some(switch),
            _ => None,
        }
    }

    /// Returns the thermostat, if this is one.
    #[must_use]
    pub fn into_thermostat(self) -> Option<Thermostat<T>> {
        match self {
            Self::Thermostat(thermostat) => Some(thermostat),
            _ => None,
        }
    }

    /// Returns the plain actuator.
    #[must_use]
    pub fn into_actuator(self) -> Actuator<T> {
        match self {
            Self::Switch(switch) => switch.into_inner(),
            Self::Thermostat(thermostat) => thermostat.into_inner(),
            Self::Generic(actuator) => actuator,
        }
    }
}

impl<T: Transport> Deref for AnyActuator<T> {
    type Target = Actuator<T>;

    fn deref(&self) -> &Self::Target {
        match self {
            Self::Switch(switch) => &switch.0,
            Self::Thermostat(thermostat) => &thermostat.0,
            Self::Generic(actuator) => actuator,
        }
    }
}

impl<T: Transport> DerefMut for AnyActuator<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        match self {
            Self::Switch(switch) => &mut switch.0,
            Self::Thermostat(thermostat) => &mut thermostat.0,
            Self::Generic(actuator) => actuator,
        }
    }
}

impl<T: Transport> Device for AnyActuator<T> {
    fn state(&self) -> &DeviceState {
        (**self).state()
    }
}

impl<T: Transport> fmt::Display for AnyActuator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Switch(switch) => fmt::Display::fmt(switch, f),
            Self::Thermostat(thermostat) => fmt::Display::fmt(thermostat, f),
            Self::Generic(actuator) => fmt::Display::fmt(actuator, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Command;
    use crate::testing::{MockTransport, config_info, connection};
    use serde_json::json;

    async fn gateway(mock: &MockTransport) -> Gateway<MockTransport> {
        mock.respond(Command::GetConfigInfo, config_info());
        Gateway::with_transport(mock.clone(), connection()).await.unwrap()
    }

    #[tokio::test]
    async fn factory_picks_variant_by_type() {
        let mock = MockTransport::new();
        let gateway = gateway(&mock).await;
        let build = |kind: &str| {
            AnyActuator::from_state(
                gateway.clone(),
                DeviceState::from_value(json!({"number": 1, "type": kind})),
            )
        };

        assert!(matches!(build("switch"), AnyActuator::Switch(_)));
        assert!(matches!(build("dimmer"), AnyActuator::Switch(_)));
        assert!(matches!(build("temperature"), AnyActuator::Thermostat(_)));
        assert!(matches!(build("shutter"), AnyActuator::Generic(_)));
        assert!(matches!(build("disabled"), AnyActuator::Generic(_)));
        assert!(matches!(build("teleporter"), AnyActuator::Generic(_)));
    }

    #[tokio::test]
    async fn switch_turns_on_and_off() {
        let mock = MockTransport::new();
        let gateway = gateway(&mock).await;
        let state = DeviceState::from_value(json!({
            "id": 5, "number": 5, "name": "Lamp", "type": "switch", "value": 0.0
        }));
        let mut switch = AnyActuator::from_state(gateway, state).into_switch().unwrap();

        mock.respond(
            Command::SetStateActuator,
            json!({"actuator": {"number": 5, "value": 100.0, "newvalue": 100.0, "utime": 1}}),
        );
        switch.turn_on().await.unwrap();
        assert_eq!(switch.value(), Some(100.0));
        assert_eq!(switch.name(), Some("Lamp"));

        mock.respond(
            Command::SetStateActuator,
            json!({"actuator": {"number": 5, "value": 0.0, "newvalue": 0.0, "utime": 2}}),
        );
        switch.turn_off().await.unwrap();
        assert_eq!(switch.value(), Some(0.0));

        let urls = mock.requests_for(Command::SetStateActuator);
        assert!(urls[0].ends_with("number=5&value=100"));
        assert!(urls[1].ends_with("number=5&value=0"));
    }

    #[tokio::test]
    async fn thermostat_sets_temperature() {
        let mock = MockTransport::new();
        let gateway = gateway(&mock).await;
        let state = DeviceState::from_value(json!({"number": 3, "type": "temperature"}));
        let mut thermostat = AnyActuator::from_state(gateway, state)
            .into_thermostat()
            .unwrap();

        mock.respond(
            Command::SetStateActuator,
            json!({"actuator": {"number": 3, "value": 21.5}}),
        );
        thermostat.set_temperature(21.5).await.unwrap();
        assert_eq!(thermostat.value(), Some(21.5));
        assert!(
            mock.requests_for(Command::SetStateActuator)[0].ends_with("number=3&value=21.5")
        );
    }

    #[tokio::test]
    async fn display_uses_variant_name() {
        let mock = MockTransport::new();
        let gateway = gateway(&mock).await;
        let state = DeviceState::from_value(json!({"number": 3, "name": "Bad", "type": "temperature"}));
        let actuator = AnyActuator::from_state(gateway, state);
        assert!(actuator.to_string().starts_with("Thermostat Bad (ID: -, Number: 3"));
        assert!(actuator.into_actuator().to_string().starts_with("Actuator Bad"));
    }
}
