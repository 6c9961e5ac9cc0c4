// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Gateway metadata from `get_config_info`.

use std::time::Duration;

use serde::Deserialize;

use crate::error::ParseError;
use crate::protocol::Payload;
use crate::types::Node;

/// Read-only facts about the gateway hardware.
///
/// Fetched once per connection and served from cache afterwards.
///
/// # Examples
///
/// ```
/// use xs1_lib::GatewayInfo;
///
/// let payload = serde_json::json!({
///     "version": 15,
///     "info": {
///         "devicename": "xs1",
///         "hardware": "1.3.0.1BB",
///         "bootloader": "1.0.0.6",
///         "firmware": "4.0.0.5326",
///         "uptime": 963766,
///         "mac": "00:1B:C5:01:D9:B3"
///     }
/// });
/// let info = GatewayInfo::from_payload(payload.as_object().unwrap()).unwrap();
/// assert_eq!(info.device_name(), "xs1");
/// assert_eq!(info.uptime(), 963766);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GatewayInfo {
    #[serde(rename = "devicename", default)]
    device_name: String,
    #[serde(rename = "hardware", default)]
    hardware_version: String,
    #[serde(rename = "bootloader", default)]
    bootloader_version: String,
    #[serde(rename = "firmware", default)]
    firmware_version: String,
    #[serde(default)]
    uptime: u64,
    #[serde(default)]
    mac: String,
}

impl GatewayInfo {
    /// Extracts the metadata from a `get_config_info` payload.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the `info` node is missing or malformed.
    pub fn from_payload(payload: &Payload) -> Result<Self, ParseError> {
        let info = payload
            .get(Node::Info.as_str())
            .ok_or_else(|| ParseError::MissingField(Node::Info.to_string()))?;
        serde_json::from_value(info.clone()).map_err(ParseError::Json)
    }

    /// Returns the gateway's host name.
    #[must_use]
    pub fn device_name(&self) -> &str {
        &self.device_name
    }

    /// Returns the hardware revision.
    #[must_use]
    pub fn hardware_version(&self) -> &str {
        &self.hardware_version
    }

    /// Returns the bootloader version.
    #[must_use]
    pub fn bootloader_version(&self) -> &str {
        &self.bootloader_version
    }

    /// Returns the firmware version.
    #[must_use]
    pub fn firmware_version(&self) -> &str {
        &self.firmware_version
    }

    /// Returns the uptime in seconds at the time the metadata was fetched.
    #[must_use]
    pub fn uptime(&self) -> u64 {
        self.uptime
    }

    /// Returns the uptime as a duration.
    #[must_use]
    pub fn uptime_duration(&self) -> Duration {
        Duration::from_secs(self.uptime)
    }

    /// Returns the MAC address.
    #[must_use]
    pub fn mac(&self) -> &str {
        &self.mac
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_info_node() {
        let payload = serde_json::json!({"version": 15});
        let err = GatewayInfo::from_payload(payload.as_object().unwrap()).unwrap_err();
        assert!(matches!(err, ParseError::MissingField(field) if field == "info"));
    }

    #[test]
    fn partial_info_uses_defaults() {
        let payload = serde_json::json!({"info": {"devicename": "xs1", "uptime": 12}});
        let info = GatewayInfo::from_payload(payload.as_object().unwrap()).unwrap();
        assert_eq!(info.device_name(), "xs1");
        assert_eq!(info.uptime_duration(), Duration::from_secs(12));
        assert_eq!(info.firmware_version(), "");
    }

    #[test]
    fn wrong_field_type_is_an_error() {
        let payload = serde_json::json!({"info": {"uptime": "forever"}});
        let err = GatewayInfo::from_payload(payload.as_object().unwrap()).unwrap_err();
        assert!(matches!(err, ParseError::Json(_)));
    }
}
