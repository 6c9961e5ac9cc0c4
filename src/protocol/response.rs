// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Extracting payloads from gateway responses.

use serde_json::{Map, Value};

use crate::error::{Error, GatewayError, ParseError};
use crate::protocol::PreparedRequest;
use crate::types::Node;

/// A decoded gateway payload.
pub type Payload = Map<String, Value>;

/// Raw response of a gateway request.
///
/// The gateway wraps its JSON answer in a callback, e.g.
/// `callback({"version":15,...})`. Only the text between the first `{` and
/// the last `}` is decoded.
///
/// # Examples
///
/// ```
/// use xs1_lib::protocol::CommandResponse;
///
/// let response = CommandResponse::new("callback({\"version\": 15})".to_string());
/// let payload = response.payload().unwrap();
/// assert_eq!(payload["version"], 15);
/// ```
#[derive(Debug, Clone)]
pub struct CommandResponse {
    body: String,
}

impl CommandResponse {
    /// Creates a new command response with the given body.
    #[must_use]
    pub fn new(body: String) -> Self {
        Self { body }
    }

    /// Returns the raw response body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Decodes the embedded JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MalformedResponse`] if there is no `{...}` pair
    /// or its content is not a JSON object.
    pub fn payload(&self) -> Result<Payload, ParseError> {
        let start = self.body.find('{');
        let end = self.body.rfind('}');
        let json = match (start, end) {
            (Some(start), Some(end)) if start < end => &self.body[start..=end],
            _ => {
                return Err(ParseError::MalformedResponse(
                    "no embedded JSON object found".to_string(),
                ));
            }
        };

        match serde_json::from_str::<Value>(json) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(ParseError::MalformedResponse(format!(
                "expected a JSON object, got {other}"
            ))),
            Err(e) => Err(ParseError::MalformedResponse(e.to_string())),
        }
    }

    /// Decodes the payload and turns an `error` node into a [`GatewayError`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] for malformed bodies and [`Error::Gateway`]
    /// when the gateway reported an error for `request`.
    pub fn into_result(self, request: &PreparedRequest) -> Result<Payload, Error> {
        let payload = self.payload()?;
        check_error(payload, request).map_err(Error::Gateway)
    }
}

/// Classifies a decoded payload as success or gateway error.
///
/// # Errors
///
/// Returns a [`GatewayError`] carrying the request's command and parameters
/// if the payload contains an `error` node.
pub fn check_error(payload: Payload, request: &PreparedRequest) -> Result<Payload, GatewayError> {
    match payload.get(Node::Error.as_str()) {
        None => Ok(payload),
        Some(code) => Err(GatewayError::new(
            normalize_code(code),
            request.command(),
            request.query().to_vec(),
        )),
    }
}

fn normalize_code(code: &Value) -> String {
    match code {
        Value::String(s) => s.clone(),
        Value::Number(n) => n
            .as_u64()
            .map_or_else(|| n.to_string(), |n| format!("{n:02}")),
        other => other.to_string(),
    }
}
