// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Canned gateway for unit tests.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::{Value, json};

use crate::command::Command;
use crate::error::ProtocolError;
use crate::protocol::{Connection, Transport};

/// Transport answering from canned bodies and recording every URL.
#[derive(Debug, Clone, Default)]
pub(crate) struct MockTransport {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Debug, Default)]
struct MockState {
    responses: HashMap<Command, String>,
    requests: Vec<(Command, String)>,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Answers `command` with `payload` wrapped in a callback from now on.
    pub(crate) fn respond(&self, command: Command, payload: Value) {
        self.respond_raw(command, &format!("callback({payload})"));
    }

    pub(crate) fn respond_raw(&self, command: Command, body: &str) {
        self.inner.lock().responses.insert(command, body.to_string());
    }

    pub(crate) fn requests(&self) -> Vec<String> {
        self.inner
            .lock()
            .requests
            .iter()
            .map(|(_, url)| url.clone())
            .collect()
    }

    pub(crate) fn requests_for(&self, command: Command) -> Vec<String> {
        self.inner
            .lock()
            .requests
            .iter()
            .filter(|(c, _)| *c == command)
            .map(|(_, url)| url.clone())
            .collect()
    }

    pub(crate) fn request_count(&self) -> usize {
        self.inner.lock().requests.len()
    }
}

impl Transport for MockTransport {
    async fn get(
        &self,
        url: &str,
        _credentials: Option<(&str, &str)>,
    ) -> Result<String, ProtocolError> {
        let command = url
            .split(['?', '&'])
            .find_map(|pair| pair.strip_prefix("cmd="))
            .and_then(Command::from_value)
            .ok_or_else(|| ProtocolError::InvalidAddress(url.to_string()))?;

        let mut state = self.inner.lock();
        state.requests.push((command, url.to_string()));
        state
            .responses
            .get(&command)
            .cloned()
            .ok_or_else(|| ProtocolError::ConnectionFailed(format!("no canned answer for {command}")))
    }
}

pub(crate) fn connection() -> Connection {
    Connection::new("192.168.2.1").with_credentials("User", "Password")
}

pub(crate) fn config_info() -> Value {
    json!({
        "version": 15,
        "type": "get_config_info",
        "info": {
            "devicename": "xs1",
            "hardware": "1.3.0.1BB",
            "bootloader": "1.0.0.6",
            "firmware": "4.0.0.5326",
            "systems": 1,
            "maxactuators": 64,
            "maxsensors": 64,
            "maxtimers": 128,
            "maxscripts": 16,
            "uptime": 963_766,
            "mac": "00:1B:C5:01:D9:B3",
            "autoip": "169.254.90.120"
        }
    })
}

pub(crate) fn actuator_list() -> Value {
    json!({
        "version": 15,
        "type": "get_list_actuators",
        "utc_offset": 3600,
        "actuator": [
            {
                "id": 1, "number": 1, "name": "Lampe", "type": "switch",
                "value": 0.0, "newvalue": 0.0, "utime": 1_450_000_000, "unit": "%",
                "function": [
                    {"type": "on", "dsc": "An"},
                    {"type": "off", "dsc": "Aus"},
                    {"type": "disabled", "dsc": ""},
                    {"type": "disabled", "dsc": ""}
                ]
            },
            {
                "id": 2, "number": 2, "name": "Dimmer", "type": "dimmer",
                "value": 50.0, "newvalue": 50.0, "utime": 1_450_000_000, "unit": "%"
            },
            {
                "id": 3, "number": 3, "name": "Heizung_Bad", "type": "temperature",
                "value": 20.0, "newvalue": 21.5, "utime": 1_450_000_000, "unit": "°C"
            },
            {
                "id": 64, "number": 64, "name": "Frei", "type": "disabled",
                "value": 0.0, "newvalue": 0.0, "utime": 0, "unit": ""
            }
        ]
    })
}
