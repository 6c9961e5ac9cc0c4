// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cached device state.

use std::fmt;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::protocol::Payload;
use crate::types::{DeviceType, Node, RfSystem};

/// The last known state record of a device.
///
/// The record is kept as the gateway sent it. Partial fragments returned by
/// write calls are merged key by key so fields the fragment does not carry
/// (name, type, unit, ...) survive.
///
/// # Examples
///
/// ```
/// use xs1_lib::device::DeviceState;
///
/// let mut state = DeviceState::from_value(serde_json::json!({
///     "number": 3, "name": "Lamp", "type": "switch", "value": 0.0, "unit": "%"
/// }));
/// state.merge(serde_json::json!({"value": 100.0, "utime": 1_450_000_000})
///     .as_object().unwrap().clone());
///
/// assert_eq!(state.name(), Some("Lamp"));
/// assert_eq!(state.value(), Some(100.0));
/// assert_eq!(state.unit(), Some("%"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceState {
    fields: Payload,
}

impl DeviceState {
    /// Wraps a state record.
    #[must_use]
    pub fn new(fields: Payload) -> Self {
        Self { fields }
    }

    /// Wraps a JSON value; anything but an object yields an empty state.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self::new(fields),
            _ => Self::default(),
        }
    }

    /// Merges a state fragment into this record.
    ///
    /// Without prior state the fragment becomes the whole record. Otherwise
    /// only the keys present in the fragment are replaced, except the
    /// identity keys (`id`, `number`), which never change once known.
    pub fn merge(&mut self, fragment: Payload) {
        if self.fields.is_empty() {
            self.fields = fragment;
            return;
        }

        tracing::debug!(
            device = ?self.identifier(),
            keys = ?fragment.keys().collect::<Vec<_>>(),
            "Merging device state"
        );

        for (key, value) in fragment {
            let is_identity = key == Node::Id.as_str() || key == Node::Number.as_str();
            if is_identity
                && let Some(current) = self.fields.get(&key)
                && *current != value
            {
                tracing::warn!(
                    key = %key,
                    current = %current,
                    incoming = %value,
                    "Ignoring identity change in state fragment"
                );
                continue;
            }
            self.fields.insert(key, value);
        }
    }

    /// Returns the raw record.
    #[must_use]
    pub fn fields(&self) -> &Payload {
        &self.fields
    }

    /// Returns a raw field.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Returns `true` if nothing is known yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the `id` field.
    #[must_use]
    pub fn id(&self) -> Option<u64> {
        self.fields.get(Node::Id.as_str()).and_then(as_u64)
    }

    /// Returns the `number` field.
    #[must_use]
    pub fn number(&self) -> Option<u64> {
        self.fields.get(Node::Number.as_str()).and_then(as_u64)
    }

    /// Returns the identifier used in requests: `number`, falling back to `id`.
    #[must_use]
    pub fn identifier(&self) -> Option<u64> {
        self.number().or_else(|| self.id())
    }

    /// Returns the decoded `type` field.
    #[must_use]
    pub fn device_type(&self) -> Option<DeviceType> {
        self.str_field(Node::Type).map(DeviceType::resolve)
    }

    /// Returns the decoded `type` field of a sensor record.
    #[must_use]
    pub fn sensor_device_type(&self) -> Option<DeviceType> {
        self.str_field(Node::Type).map(DeviceType::resolve_sensor)
    }

    /// Returns `true` unless the type resolves to a disabled device.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.device_type().is_some_and(|t| !t.is_disabled())
    }

    /// Returns the name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.str_field(Node::Name)
    }

    /// Returns the current value.
    #[must_use]
    pub fn value(&self) -> Option<f64> {
        self.fields.get(Node::Value.as_str()).and_then(as_f64)
    }

    /// Returns the pending value the device is moving to.
    #[must_use]
    pub fn new_value(&self) -> Option<f64> {
        self.fields.get(Node::NewValue.as_str()).and_then(as_f64)
    }

    /// Returns the unit of the value.
    #[must_use]
    pub fn unit(&self) -> Option<&str> {
        self.str_field(Node::Unit)
    }

    /// Returns the RF system the device is driven through.
    #[must_use]
    pub fn system(&self) -> Option<RfSystem> {
        self.str_field(Node::System).map(RfSystem::resolve)
    }

    /// Returns the last update as a Unix timestamp.
    #[must_use]
    pub fn last_update(&self) -> Option<i64> {
        self.fields
            .get(Node::UpdateTime.as_str())
            .and_then(|v| v.as_i64().or_else(|| v.as_f64().map(truncate)))
    }

    /// Returns the last update as a UTC time.
    #[must_use]
    pub fn last_update_time(&self) -> Option<DateTime<Utc>> {
        self.last_update()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
    }

    fn str_field(&self, node: Node) -> Option<&str> {
        self.fields.get(node.as_str()).and_then(Value::as_str)
    }
}

impl From<Payload> for DeviceState {
    fn from(fields: Payload) -> Self {
        Self::new(fields)
    }
}

impl fmt::Display for DeviceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (ID: {}, Number: {}, Enabled: {}, Type: {}, Value: {}, New Value: {}, Unit: {})",
            self.name().unwrap_or("<unnamed>"),
            display_opt(self.id()),
            display_opt(self.number()),
            self.is_enabled(),
            display_opt(self.device_type()),
            display_opt(self.value()),
            display_opt(self.new_value()),
            self.unit().unwrap_or("-"),
        )
    }
}

fn display_opt<T: fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

fn as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[allow(clippy::cast_possible_truncation)]
fn truncate(secs: f64) -> i64 {
    secs as i64
}
