// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sensors.

use std::fmt;

use crate::device::{Category, Device, DeviceCore, DeviceState};
use crate::error::Error;
use crate::gateway::Gateway;
use crate::protocol::Transport;
use crate::types::DeviceType;

/// A measuring device: thermometer, hygrometer, window contact, meter...
#[derive(Debug, Clone)]
pub struct Sensor<T: Transport> {
    core: DeviceCore<T>,
}

impl<T: Transport> Sensor<T> {
    /// Creates a sensor from a state record.
    #[must_use]
    pub fn new(gateway: Gateway<T>, state: DeviceState) -> Self {
        Self {
            core: DeviceCore::new(gateway, state, Category::Sensor),
        }
    }

    /// Returns the gateway this sensor belongs to.
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

    /// Overrides the measured value.
    ///
    /// Physical sensors ignore this; it is meant for virtual sensors and
    /// debugging.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn set_value(&mut self, value: f64) -> Result<(), Error> {
        self.core.set_value(value).await
    }

    /// Renames the sensor and returns the name the gateway stored.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::InvalidName`](crate::error::ValueError::InvalidName)
    /// without any request for names with characters other than ASCII
    /// letters, digits and underscores.
    pub async fn set_name(&mut self, name: &str) -> Result<String, Error> {
        self.core.set_name(name).await
    }
}

impl<T: Transport> Device for Sensor<T> {
    fn state(&self) -> &DeviceState {
        &self.core.state
    }

    fn device_type(&self) -> Option<DeviceType> {
        self.core.state.sensor_device_type()
    }
}

impl<T: Transport> fmt::Display for Sensor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sensor {}", self.core.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Command;
    use crate::error::ValueError;
    use crate::testing::{MockTransport, config_info, connection};
    use crate::types::SensorType;
    use serde_json::{Value, json};

    async fn sensor(mock: &MockTransport, state: Value) -> Sensor<MockTransport> {
        mock.respond(Command::GetConfigInfo, config_info());
        let gateway = Gateway::with_transport(mock.clone(), connection()).await.unwrap();
        Sensor::new(gateway, DeviceState::from_value(state))
    }

    fn thermometer() -> Value {
        json!({
            "id": 1, "number": 1, "name": "Aussen", "type": "temperature",
            "value": 4.2, "utime": 1_450_000_000, "unit": "°C"
        })
    }

    #[tokio::test]
    async fn accessors() {
        let mock = MockTransport::new();
        let sensor = sensor(&mock, thermometer()).await;
        assert_eq!(
            sensor.device_type(),
            Some(DeviceType::Sensor(SensorType::Temperature))
        );
        assert_eq!(
            sensor.device_type().and_then(|t| t.as_sensor()),
            Some(SensorType::Temperature)
        );
        assert!(sensor.is_enabled());
        assert_eq!(sensor.unit(), Some("°C"));
        assert_eq!(sensor.value(), Some(4.2));
        assert!(sensor.to_string().starts_with("Sensor Aussen"));
    }

    #[tokio::test]
    async fn update_uses_sensor_state() {
        let mock = MockTransport::new();
        let mut sensor = sensor(&mock, thermometer()).await;
        mock.respond(
            Command::GetStateSensor,
            json!({"sensor": {"number": 1, "value": 3.9, "utime": 1_450_000_600}}),
        );

        sensor.update().await.unwrap();
        assert_eq!(sensor.value(), Some(3.9));
        assert_eq!(sensor.name(), Some("Aussen"));
        assert_eq!(sensor.last_update(), Some(1_450_000_600));
    }

    #[tokio::test]
    async fn set_value_on_virtual_sensor() {
        let mock = MockTransport::new();
        let mut sensor = sensor(&mock, thermometer()).await;
        mock.respond(
            Command::SetStateSensor,
            json!({"sensor": {"number": 1, "value": 22.0}}),
        );

        sensor.set_value(22.0).await.unwrap();
        assert_eq!(sensor.value(), Some(22.0));
        let url = mock.requests_for(Command::SetStateSensor).pop().unwrap();
        assert!(url.ends_with("cmd=set_state_sensor&number=1&value=22"));
    }

    #[tokio::test]
    async fn set_name_round_trip() {
        let mock = MockTransport::new();
        let mut sensor = sensor(&mock, thermometer()).await;
        mock.respond(
            Command::GetConfigSensor,
            json!({"sensor": {"number": 1, "name": "Aussen", "type": "temperature"}}),
        );
        mock.respond(
            Command::SetConfigSensor,
            json!({"sensor": {"number": 1, "name": "Garten"}}),
        );

        assert_eq!(sensor.set_name("Garten").await.unwrap(), "Garten");
        assert_eq!(sensor.name(), Some("Garten"));
        assert_eq!(mock.requests_for(Command::SetConfigSensor).len(), 1);
    }

    #[tokio::test]
    async fn set_name_requires_name_in_answer() {
        let mock = MockTransport::new();
        let mut sensor = sensor(&mock, thermometer()).await;
        mock.respond(
            Command::GetConfigSensor,
            json!({"sensor": {"number": 1, "name": "Aussen"}}),
        );
        mock.respond(Command::SetConfigSensor, json!({"sensor": {"number": 1}}));

        let result = sensor.set_name("Garten").await;
        assert!(matches!(result, Err(Error::Parse(_))));
        assert_eq!(sensor.name(), Some("Aussen"));
    }

    #[tokio::test]
    async fn invalid_name_is_rejected() {
        let mock = MockTransport::new();
        let mut sensor = sensor(&mock, thermometer()).await;
        let result = sensor.set_name("Außen Temp").await;
        assert!(matches!(result, Err(Error::Value(ValueError::InvalidName(_)))));
        assert_eq!(mock.request_count(), 1);
    }
}
