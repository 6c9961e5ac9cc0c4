// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The gateway client.
//!
//! [`Gateway`] is the single funnel every request goes through: it builds the
//! URL, hands it to its [`Transport`], decodes the answer and turns gateway
//! errors into [`Error::Gateway`].
//!
//! ```no_run
//! use xs1_lib::{DeviceFilter, Gateway};
//!
//! # async fn example() -> xs1_lib::Result<()> {
//! let gateway = Gateway::http("192.168.1.10")
//!     .with_credentials("admin", "secret")
//!     .build()
//!     .await?;
//!
//! println!("{} runs firmware {}", gateway.gateway_name(), gateway.firmware_version());
//!
//! for actuator in gateway.list_actuators(DeviceFilter::Enabled).await? {
//!     println!("{actuator}");
//! }
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "http")]
mod builder;
mod info;

#[cfg(feature = "http")]
pub use builder::{GatewayBuilder, HttpGateway};
pub use info::GatewayInfo;

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;

use crate::command::Command;
use crate::device::{AnyActuator, Device, DeviceFilter, DeviceState, Sensor};
use crate::error::{Error, ParseError};
use crate::protocol::{
    CommandResponse, Connection, ParamValue, Parameters, Payload, RequestBuilder, Transport,
};
use crate::types::{Node, UrlParam};

/// Client for one XS1 gateway.
///
/// Cloning is cheap and clones share the connection identity and metadata
/// cache. Devices returned by the list operations hold such a clone.
pub struct Gateway<T: Transport> {
    inner: Arc<Inner<T>>,
}

struct Inner<T> {
    transport: T,
    session: RwLock<Session>,
}

#[derive(Debug, Clone)]
struct Session {
    connection: Connection,
    info: GatewayInfo,
}

impl<T: Transport> Clone for Gateway<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Transport> fmt::Debug for Gateway<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let session = self.inner.session.read();
        f.debug_struct("Gateway")
            .field("host", &session.connection.host())
            .field("device_name", &session.info.device_name())
            .finish_non_exhaustive()
    }
}

impl<T: Transport> Gateway<T> {
    /// Creates a client on top of `transport` and fetches the gateway metadata.
    ///
    /// # Errors
    ///
    /// Returns error if the metadata request fails.
    pub async fn with_transport(transport: T, connection: Connection) -> Result<Self, Error> {
        let info = fetch_info(&transport, &connection).await?;
        tracing::info!(
            host = %connection.host(),
            device = %info.device_name(),
            firmware = %info.firmware_version(),
            "Connected to gateway"
        );

        Ok(Self {
            inner: Arc::new(Inner {
                transport,
                session: RwLock::new(Session { connection, info }),
            }),
        })
    }

    /// Switches this client (and every clone of it) to another connection.
    ///
    /// The metadata is refreshed against the new connection first; the switch
    /// only happens if that succeeds.
    ///
    /// # Errors
    ///
    /// Returns error if the metadata request fails. The previous connection
    /// stays active in that case.
    pub async fn configure(&self, connection: Connection) -> Result<(), Error> {
        let info = fetch_info(&self.inner.transport, &connection).await?;
        tracing::info!(
            host = %connection.host(),
            device = %info.device_name(),
            firmware = %info.firmware_version(),
            "Gateway reconfigured"
        );
        *self.inner.session.write() = Session { connection, info };
        Ok(())
    }

    /// Re-fetches the metadata for the current connection.
    ///
    /// # Errors
    ///
    /// Returns error if the metadata request fails.
    pub async fn refresh_info(&self) -> Result<(), Error> {
        let connection = self.connection();
        let info = fetch_info(&self.inner.transport, &connection).await?;
        self.inner.session.write().info = info;
        Ok(())
    }

    /// Returns the current connection identity.
    #[must_use]
    pub fn connection(&self) -> Connection {
        self.inner.session.read().connection.clone()
    }

    /// Returns the cached gateway metadata.
    #[must_use]
    pub fn info(&self) -> GatewayInfo {
        self.inner.session.read().info.clone()
    }

    /// Returns the gateway's host name.
    #[must_use]
    pub fn gateway_name(&self) -> String {
        self.inner.session.read().info.device_name().to_string()
    }

    /// Returns the hardware revision.
    #[must_use]
    pub fn hardware_version(&self) -> String {
        self.inner.session.read().info.hardware_version().to_string()
    }

    /// Returns the bootloader version.
    #[must_use]
    pub fn bootloader_version(&self) -> String {
        self.inner.session.read().info.bootloader_version().to_string()
    }

    /// Returns the firmware version.
    #[must_use]
    pub fn firmware_version(&self) -> String {
        self.inner.session.read().info.firmware_version().to_string()
    }

    /// Returns the uptime in seconds, as of the last metadata refresh.
    #[must_use]
    pub fn uptime(&self) -> u64 {
        self.inner.session.read().info.uptime()
    }

    /// Returns the MAC address.
    #[must_use]
    pub fn mac(&self) -> String {
        self.inner.session.read().info.mac().to_string()
    }

    // ========== Raw Access ==========

    /// Sends `command` with `parameters` and returns the decoded payload.
    ///
    /// # Errors
    ///
    /// Returns error if delivery fails, the body has no JSON payload or the
    /// gateway reports an error.
    pub async fn call(&self, command: Command, parameters: &Parameters) -> Result<Payload, Error> {
        let connection = self.connection();
        send(&self.inner.transport, &connection, command, parameters).await
    }

    /// Like [`call`](Self::call), for a command given as a string.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::InvalidCommand`](crate::error::ValueError::InvalidCommand)
    /// without sending anything if `command` is not a known command.
    pub async fn call_raw(&self, command: &str, parameters: &Parameters) -> Result<Payload, Error> {
        let command = Command::parse_raw(command)?;
        self.call(command, parameters).await
    }

    // ========== Gateway Information ==========

    /// Returns the protocol information.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn protocol_info(&self) -> Result<Payload, Error> {
        self.call(Command::GetProtocolInfo, &Parameters::new()).await
    }

    /// Fetches the configuration info afresh, bypassing the metadata cache.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn config_info(&self) -> Result<Payload, Error> {
        self.call(Command::GetConfigInfo, &Parameters::new()).await
    }

    /// Returns the main configuration of the gateway.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn config_main(&self) -> Result<Payload, Error> {
        self.call(Command::GetConfigMain, &Parameters::new()).await
    }

    /// Returns the RF systems the gateway supports.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn list_systems(&self) -> Result<Vec<Value>, Error> {
        self.list_node(Command::GetListSystems).await
    }

    /// Returns the function types the gateway supports.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn list_functions(&self) -> Result<Vec<Value>, Error> {
        self.list_node(Command::GetListFunctions).await
    }

    /// Returns the actuator types the gateway supports.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn actuator_types(&self) -> Result<Vec<Value>, Error> {
        self.list_node(Command::GetTypesActuators).await
    }

    /// Returns the sensor types the gateway supports.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn sensor_types(&self) -> Result<Vec<Value>, Error> {
        self.list_node(Command::GetTypesSensors).await
    }

    /// Returns the RF modes of the gateway.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn list_rf_modes(&self) -> Result<Vec<Value>, Error> {
        self.list_node(Command::GetListRfModes).await
    }

    // ========== Devices ==========

    /// Lists the actuators, each built as its matching variant.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or an entry is not a JSON object.
    pub async fn list_actuators(&self, filter: DeviceFilter) -> Result<Vec<AnyActuator<T>>, Error> {
        let states = self.list_states(Command::GetListActuators).await?;
        Ok(states
            .into_iter()
            .map(|state| AnyActuator::from_state(self.clone(), state))
            .filter(|actuator| filter.accepts(actuator.state()))
            .collect())
    }

    /// Lists the sensors.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or an entry is not a JSON object.
    pub async fn list_sensors(&self, filter: DeviceFilter) -> Result<Vec<Sensor<T>>, Error> {
        let states = self.list_states(Command::GetListSensors).await?;
        Ok(states
            .into_iter()
            .map(|state| Sensor::new(self.clone(), state))
            .filter(|sensor| filter.accepts(sensor.state()))
            .collect())
    }

    /// Finds an actuator by number.
    ///
    /// Returns `Ok(None)` if the gateway does not list such an actuator.
    ///
    /// # Errors
    ///
    /// Returns error if the list request fails.
    pub async fn get_actuator(&self, number: u64) -> Result<Option<AnyActuator<T>>, Error> {
        let actuators = self.list_actuators(DeviceFilter::All).await?;
        Ok(actuators
            .into_iter()
            .find(|actuator| actuator.state().identifier() == Some(number)))
    }

    /// Finds a sensor by number.
    ///
    /// Returns `Ok(None)` if the gateway does not list such a sensor.
    ///
    /// # Errors
    ///
    /// Returns error if the list request fails.
    pub async fn get_sensor(&self, number: u64) -> Result<Option<Sensor<T>>, Error> {
        let sensors = self.list_sensors(DeviceFilter::All).await?;
        Ok(sensors
            .into_iter()
            .find(|sensor| sensor.state().identifier() == Some(number)))
    }

    /// Returns the current state record of an actuator.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn actuator_state(&self, number: u64) -> Result<Payload, Error> {
        self.device_node(
            Command::GetStateActuator,
            Parameters::new().with(UrlParam::Number, number),
        )
        .await
    }

    /// Returns the current state record of a sensor.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn sensor_state(&self, number: u64) -> Result<Payload, Error> {
        self.device_node(
            Command::GetStateSensor,
            Parameters::new().with(UrlParam::Number, number),
        )
        .await
    }

    /// Sets a new value on an actuator and returns its updated state record.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn set_actuator_value(
        &self,
        number: u64,
        value: impl Into<ParamValue>,
    ) -> Result<Payload, Error> {
        self.device_node(
            Command::SetStateActuator,
            Parameters::new()
                .with(UrlParam::Number, number)
                .with(UrlParam::Value, value),
        )
        .await
    }

    /// Sets a new value on a sensor and returns its updated state record.
    ///
    /// Only virtual sensors accept values; use this for testing setups.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn set_sensor_value(
        &self,
        number: u64,
        value: impl Into<ParamValue>,
    ) -> Result<Payload, Error> {
        self.device_node(
            Command::SetStateSensor,
            Parameters::new()
                .with(UrlParam::Number, number)
                .with(UrlParam::Value, value),
        )
        .await
    }

    /// Executes function slot `function_id` (1-based) of an actuator.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn call_actuator_function(
        &self,
        number: u64,
        function_id: usize,
    ) -> Result<Payload, Error> {
        self.device_node(
            Command::SetStateActuator,
            Parameters::new()
                .with(UrlParam::Number, number)
                .with(UrlParam::Function, function_id),
        )
        .await
    }

    // ========== Configuration ==========

    /// Returns the configuration record of an actuator.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn get_config_actuator(&self, number: u64) -> Result<Payload, Error> {
        self.device_node(
            Command::GetConfigActuator,
            Parameters::new().with(UrlParam::Number, number),
        )
        .await
    }

    /// Writes the configuration record of an actuator.
    ///
    /// `number` always wins over a `number` entry inside `config`.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn set_config_actuator(
        &self,
        number: u64,
        config: impl Into<Parameters>,
    ) -> Result<Payload, Error> {
        let mut config = config.into();
        config.set(UrlParam::Number, number);
        self.device_node(Command::SetConfigActuator, config).await
    }

    /// Returns the configuration record of a sensor.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn get_config_sensor(&self, number: u64) -> Result<Payload, Error> {
        self.device_node(
            Command::GetConfigSensor,
            Parameters::new().with(UrlParam::Number, number),
        )
        .await
    }

    /// Writes the configuration record of a sensor.
    ///
    /// `number` always wins over a `number` entry inside `config`.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn set_config_sensor(
        &self,
        number: u64,
        config: impl Into<Parameters>,
    ) -> Result<Payload, Error> {
        let mut config = config.into();
        config.set(UrlParam::Number, number);
        self.device_node(Command::SetConfigSensor, config).await
    }

    // ========== Helpers ==========

    async fn device_node(&self, command: Command, parameters: Parameters) -> Result<Payload, Error> {
        let mut payload = self.call(command, &parameters).await?;
        let node = command
            .payload_node()
            .ok_or_else(|| ParseError::UnexpectedFormat(format!("{command} has no device node")))?;
        take_object(&mut payload, node)
    }

    async fn list_node(&self, command: Command) -> Result<Vec<Value>, Error> {
        let mut payload = self.call(command, &Parameters::new()).await?;
        match command.payload_node() {
            Some(node) => take_list(&mut payload, node),
            None => Ok(Vec::new()),
        }
    }

    async fn list_states(&self, command: Command) -> Result<Vec<DeviceState>, Error> {
        self.list_node(command)
            .await?
            .into_iter()
            .map(|entry| match entry {
                Value::Object(fields) => Ok(DeviceState::new(fields)),
                other => Err(Error::from(ParseError::UnexpectedFormat(format!(
                    "device entry is not an object: {other}"
                )))),
            })
            .collect()
    }
}

async fn send<T: Transport>(
    transport: &T,
    connection: &Connection,
    command: Command,
    parameters: &Parameters,
) -> Result<Payload, Error> {
    let request = RequestBuilder::new(connection).build(command, parameters);

    tracing::debug!(
        url = %request.redacted_url(),
        write = command.is_write(),
        "Sending gateway request"
    );

    let body = transport
        .get(request.url(), connection.credentials())
        .await
        .map_err(Error::Protocol)?;

    tracing::debug!(body = %body, "Received gateway response");

    CommandResponse::new(body).into_result(&request)
}

async fn fetch_info<T: Transport>(transport: &T, connection: &Connection) -> Result<GatewayInfo, Error> {
    let payload = send(transport, connection, Command::GetConfigInfo, &Parameters::new()).await?;
    Ok(GatewayInfo::from_payload(&payload)?)
}

fn take_object(payload: &mut Payload, node: Node) -> Result<Payload, Error> {
    match payload.remove(node.as_str()) {
        Some(Value::Object(fields)) => Ok(fields),
        Some(other) => Err(ParseError::UnexpectedFormat(format!(
            "{node} is not an object: {other}"
        ))
        .into()),
        None => Err(ParseError::MissingField(node.to_string()).into()),
    }
}

fn take_list(payload: &mut Payload, node: Node) -> Result<Vec<Value>, Error> {
    match payload.remove(node.as_str()) {
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(ParseError::UnexpectedFormat(format!(
            "{node} is not a list: {other}"
        ))
        .into()),
        None => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::Device;
    use crate::error::ValueError;
    use crate::testing::{MockTransport, actuator_list, config_info, connection};

    async fn gateway(mock: &MockTransport) -> Gateway<MockTransport> {
        mock.respond(Command::GetConfigInfo, config_info());
        Gateway::with_transport(mock.clone(), connection()).await.unwrap()
    }

    #[tokio::test]
    async fn metadata_is_cached() {
        let mock = MockTransport::new();
        let gateway = gateway(&mock).await;
        assert_eq!(mock.request_count(), 1);

        assert_eq!(gateway.gateway_name(), "xs1");
        assert_eq!(gateway.hardware_version(), "1.3.0.1BB");
        assert_eq!(gateway.bootloader_version(), "1.0.0.6");
        assert_eq!(gateway.firmware_version(), "4.0.0.5326");
        assert_eq!(gateway.mac(), "00:1B:C5:01:D9:B3");
        assert_eq!(gateway.uptime(), 963_766);
        assert_eq!(mock.request_count(), 1);
    }

    #[tokio::test]
    async fn connection_accessors() {
        let mock = MockTransport::new();
        let gateway = gateway(&mock).await;
        let connection = gateway.connection();
        assert_eq!(connection.host(), "192.168.2.1");
        assert_eq!(connection.user(), Some("User"));
        assert_eq!(connection.password(), Some("Password"));
    }

    #[tokio::test]
    async fn configure_switches_target() {
        let mock = MockTransport::new();
        let gateway = gateway(&mock).await;

        let mut info = config_info();
        info["info"]["devicename"] = "xs1-garage".into();
        mock.respond(Command::GetConfigInfo, info);

        gateway
            .configure(Connection::new("192.168.2.2"))
            .await
            .unwrap();
        assert_eq!(gateway.connection().host(), "192.168.2.2");
        assert_eq!(gateway.gateway_name(), "xs1-garage");
        assert!(mock.requests().last().unwrap().starts_with("http://192.168.2.2/"));
    }

    #[tokio::test]
    async fn failed_configure_keeps_previous_connection() {
        let mock = MockTransport::new();
        let gateway = gateway(&mock).await;

        mock.respond_raw(Command::GetConfigInfo, "<html>busy</html>");
        let result = gateway.configure(Connection::new("10.0.0.9")).await;
        assert!(matches!(result, Err(Error::Parse(ParseError::MalformedResponse(_)))));
        assert_eq!(gateway.connection().host(), "192.168.2.1");
        assert_eq!(gateway.gateway_name(), "xs1");
    }

    #[tokio::test]
    async fn call_raw_rejects_unknown_command_before_io() {
        let mock = MockTransport::new();
        let gateway = gateway(&mock).await;

        let result = gateway.call_raw("reboot", &Parameters::new()).await;
        assert!(matches!(
            result,
            Err(Error::Value(ValueError::InvalidCommand(cmd))) if cmd == "reboot"
        ));
        assert_eq!(mock.request_count(), 1);
    }

    #[tokio::test]
    async fn call_surfaces_gateway_error() {
        let mock = MockTransport::new();
        let gateway = gateway(&mock).await;
        mock.respond(
            Command::GetStateActuator,
            serde_json::json!({"version": 15, "type": "void", "error": "03"}),
        );

        let err = gateway.actuator_state(65).await.unwrap_err();
        let Error::Gateway(err) = err else {
            panic!("expected gateway error, got {err:?}");
        };
        assert_eq!(err.message(), "number/name not found");
        assert_eq!(err.parameters(), &[("number".to_string(), "65".to_string())]);
    }

    #[tokio::test]
    async fn list_actuators_builds_variants() {
        let mock = MockTransport::new();
        let gateway = gateway(&mock).await;
        mock.respond(Command::GetListActuators, actuator_list());

        let actuators = gateway.list_actuators(DeviceFilter::All).await.unwrap();
        assert_eq!(actuators.len(), 4);
        assert!(matches!(actuators[0], AnyActuator::Switch(_)));
        assert!(matches!(actuators[1], AnyActuator::Switch(_)));
        assert!(matches!(actuators[2], AnyActuator::Thermostat(_)));
        assert!(matches!(actuators[3], AnyActuator::Generic(_)));

        let enabled = gateway.list_actuators(DeviceFilter::Enabled).await.unwrap();
        assert_eq!(enabled.len(), 3);
        assert!(enabled.iter().all(|a| a.is_enabled()));

        let disabled = gateway.list_actuators(DeviceFilter::Disabled).await.unwrap();
        assert_eq!(disabled.len(), 1);
        assert_eq!(disabled[0].number(), Some(64));
    }

    #[tokio::test]
    async fn list_without_node_is_empty() {
        let mock = MockTransport::new();
        let gateway = gateway(&mock).await;
        mock.respond(Command::GetListSensors, serde_json::json!({"version": 15}));

        let sensors = gateway.list_sensors(DeviceFilter::All).await.unwrap();
        assert!(sensors.is_empty());
    }

    #[tokio::test]
    async fn get_actuator_by_number() {
        let mock = MockTransport::new();
        let gateway = gateway(&mock).await;
        mock.respond(Command::GetListActuators, actuator_list());

        let actuator = gateway.get_actuator(3).await.unwrap().unwrap();
        assert_eq!(actuator.name(), Some("Heizung_Bad"));
        assert!(gateway.get_actuator(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn set_config_overrides_number() {
        let mock = MockTransport::new();
        let gateway = gateway(&mock).await;
        mock.respond(
            Command::SetConfigActuator,
            serde_json::json!({"version": 15, "actuator": {"number": 31, "name": "Copy"}}),
        );

        let config = serde_json::json!({"number": 30, "name": "Copy", "system": "ab400"});
        let result = gateway
            .set_config_actuator(31, config.as_object().unwrap().clone())
            .await
            .unwrap();
        assert_eq!(result["number"], 31);

        let url = mock.requests_for(Command::SetConfigActuator).pop().unwrap();
        assert!(url.contains("number=31"));
        assert!(!url.contains("number=30"));
        assert_eq!(url.matches("number=").count(), 1);
    }

    #[tokio::test]
    async fn set_config_sensor_overrides_number() {
        let mock = MockTransport::new();
        let gateway = gateway(&mock).await;
        mock.respond(
            Command::SetConfigSensor,
            serde_json::json!({"version": 15, "sensor": {"number": 7, "name": "Keller"}}),
        );

        let config = serde_json::json!({"number": 2, "name": "Keller", "type": "hygrometer"});
        let result = gateway
            .set_config_sensor(7, config.as_object().unwrap().clone())
            .await
            .unwrap();
        assert_eq!(result["number"], 7);
        assert_eq!(result["name"], "Keller");

        let url = mock.requests_for(Command::SetConfigSensor).pop().unwrap();
        assert!(url.contains("cmd=set_config_sensor"));
        assert!(url.contains("number=7"));
        assert!(!url.contains("number=2"));
        assert_eq!(url.matches("number=").count(), 1);
        assert!(url.contains("type=hygrometer"));
    }

    #[tokio::test]
    async fn transport_failure_propagates() {
        let mock = MockTransport::new();
        let gateway = gateway(&mock).await;

        let result = gateway.config_main().await;
        assert!(matches!(result, Err(Error::Protocol(_))));
    }

    #[tokio::test]
    async fn type_lists_come_from_their_node() {
        let mock = MockTransport::new();
        let gateway = gateway(&mock).await;
        mock.respond(
            Command::GetListFunctions,
            serde_json::json!({"function": [{"name": "on"}, {"name": "dim_up"}]}),
        );

        let functions = gateway.list_functions().await.unwrap();
        assert_eq!(functions.len(), 2);
        assert_eq!(functions[1]["name"], "dim_up");
    }
}
