// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! XS1 gateway command definitions.
//!
//! The gateway exposes a fixed set of commands, each selected by the `cmd`
//! query parameter of a `/control` request.
//!
//! # Available Commands
//!
//! | Command | Purpose | Payload node |
//! |---------|---------|--------------|
//! | [`Command::GetProtocolInfo`] | Protocol version | `version` |
//! | [`Command::GetConfigInfo`] | Gateway metadata | `info` |
//! | [`Command::GetConfigMain`] | Main configuration | - |
//! | [`Command::GetListSystems`] | Supported RF systems | `system` |
//! | [`Command::GetListFunctions`] | Supported function types | `function` |
//! | [`Command::GetTypesActuators`] | Supported actuator types | `actuator` |
//! | [`Command::GetTypesSensors`] | Supported sensor types | `sensor` |
//! | [`Command::GetListRfModes`] | RF modes | `rfmode` |
//! | [`Command::GetListActuators`] | All actuators | `actuator` |
//! | [`Command::GetListSensors`] | All sensors | `sensor` |
//! | [`Command::GetStateActuator`] | One actuator's state | `actuator` |
//! | [`Command::SetStateActuator`] | Set value / call function | `actuator` |
//!
//! # Examples
//!
//! ```
//! use xs1_lib::command::Command;
//!
//! let cmd: Command = "get_list_actuators".parse().unwrap();
//! assert_eq!(cmd, Command::GetListActuators);
//! assert!("reboot".parse::<Command>().is_err());
//! ```

use crate::error::ValueError;
use crate::types::{Node, api_constant};

api_constant! {
    /// A command of the gateway's HTTP API.
    pub enum Command("command") {
        GetProtocolInfo => "get_protocol_info",
        GetConfigInfo => "get_config_info",
        GetConfigMain => "get_config_main",
        GetListSystems => "get_list_systems",
        GetListFunctions => "get_list_functions",
        GetTypesActuators => "get_types_actuators",
        GetTypesSensors => "get_types_sensors",
        GetListRfModes => "get_list_rfmodes",
        GetConfigActuator => "get_config_actuator",
        SetConfigActuator => "set_config_actuator",
        GetConfigSensor => "get_config_sensor",
        SetConfigSensor => "set_config_sensor",
        GetListActuators => "get_list_actuators",
        GetListSensors => "get_list_sensors",
        GetStateActuator => "get_state_actuator",
        GetStateSensor => "get_state_sensor",
        SetStateActuator => "set_state_actuator",
        SetStateSensor => "set_state_sensor",
    }
}

impl Command {
    /// Validates a raw command string.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::InvalidCommand`] if `raw` is not a known command.
    pub fn parse_raw(raw: &str) -> Result<Self, ValueError> {
        Self::from_value(raw).ok_or_else(|| ValueError::InvalidCommand(raw.to_string()))
    }

    /// Returns `true` if the command changes state on the gateway.
    #[must_use]
    pub const fn is_write(&self) -> bool {
        matches!(
            self,
            Self::SetConfigActuator
                | Self::SetConfigSensor
                | Self::SetStateActuator
                | Self::SetStateSensor
        )
    }

    /// Returns the node the interesting part of the answer lives under, if any.
    #[must_use]
    pub const fn payload_node(&self) -> Option<Node> {
        match self {
            Self::GetProtocolInfo => Some(Node::Version),
            Self::GetConfigInfo => Some(Node::Info),
            Self::GetListSystems => Some(Node::System),
            Self::GetListFunctions => Some(Node::Function),
            Self::GetListRfModes => Some(Node::RfMode),
            Self::GetTypesActuators
            | Self::GetConfigActuator
            | Self::SetConfigActuator
            | Self::GetListActuators
            | Self::GetStateActuator
            | Self::SetStateActuator => Some(Node::Actuator),
            Self::GetTypesSensors
            | Self::GetConfigSensor
            | Self::SetConfigSensor
            | Self::GetListSensors
            | Self::GetStateSensor
            | Self::SetStateSensor => Some(Node::Sensor),
            Self::GetConfigMain => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ApiConstant;

    #[test]
    fn command_set_is_closed() {
        assert_eq!(Command::ALL.len(), 18);
    }

    #[test]
    fn parse_raw_accepts_known_command() {
        assert_eq!(
            Command::parse_raw("set_state_actuator").unwrap(),
            Command::SetStateActuator
        );
    }

    #[test]
    fn parse_raw_rejects_unknown_command() {
        let err = Command::parse_raw("format_flash").unwrap_err();
        assert_eq!(err, ValueError::InvalidCommand("format_flash".to_string()));
    }

    #[test]
    fn write_commands() {
        assert!(Command::SetConfigSensor.is_write());
        assert!(!Command::GetConfigSensor.is_write());
    }

    #[test]
    fn payload_nodes() {
        assert_eq!(Command::GetConfigInfo.payload_node(), Some(Node::Info));
        assert_eq!(
            Command::SetStateSensor.payload_node(),
            Some(Node::Sensor)
        );
        assert_eq!(Command::GetConfigMain.payload_node(), None);
    }
}
