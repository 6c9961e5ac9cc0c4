// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `xs1_lib` library.
//!
//! This module provides the error hierarchy for failures across the library:
//! caller-side validation, transport communication, response parsing and
//! errors reported by the gateway itself.

use thiserror::Error;

use crate::command::Command;
use crate::types::ErrorCode;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// A caller-side contract violation, detected before any request is sent.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// The request could not be delivered to the gateway.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// The gateway answered with something that is not a usable payload.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The gateway answered with an `error` node.
    #[error("gateway error: {0}")]
    Gateway(#[from] GatewayError),
}

/// Errors raised when arguments fail validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// The command is not part of the protocol's command set.
    #[error("invalid command: {0}")]
    InvalidCommand(String),

    /// An argument does not belong to the object it was passed to.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A device name contains characters the gateway does not accept.
    #[error("invalid name {0:?}: only alphanumeric characters and underscores are allowed")]
    InvalidName(String),

    /// A string does not match any known constant of a taxonomy.
    #[error("unknown {kind}: {value}")]
    UnknownConstant {
        /// The taxonomy that was searched.
        kind: &'static str,
        /// The value that was not recognized.
        value: String,
    },
}

/// Errors related to delivering requests to the gateway.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Connection to the gateway failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timed out.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// Invalid URL or address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// The gateway kept answering with a server error.
    #[error("server error HTTP {status} after {attempts} attempt(s)")]
    ServerError {
        /// Last HTTP status code received.
        status: u16,
        /// Number of attempts made.
        attempts: u32,
    },
}

/// Errors related to extracting the payload from a gateway response.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The body does not contain an embedded JSON object.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Expected field is missing from the response.
    #[error("missing field in response: {0}")]
    MissingField(String),

    /// Unexpected response format.
    #[error("unexpected response format: {0}")]
    UnexpectedFormat(String),
}

/// An error reported by the gateway through the `error` node.
///
/// Carries the command and the parameters of the failing request so the
/// call can be reproduced.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message} (code {code}, command {command}, parameters [{}])", format_parameters(.parameters))]
pub struct GatewayError {
    code: String,
    message: String,
    command: Command,
    parameters: Vec<(String, String)>,
}

impl GatewayError {
    /// Creates a gateway error, resolving the message from the error code table.
    #[must_use]
    pub fn new(code: impl Into<String>, command: Command, parameters: Vec<(String, String)>) -> Self {
        let code = code.into();
        let message = ErrorCode::message_for(&code).to_string();
        Self {
            code,
            message,
            command,
            parameters,
        }
    }

    /// Returns the raw two digit error code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns the error code constant, if the code is known.
    #[must_use]
    pub fn error_code(&self) -> Option<ErrorCode> {
        ErrorCode::from_value(&self.code)
    }

    /// Returns the human readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the command that failed.
    #[must_use]
    pub fn command(&self) -> Command {
        self.command
    }

    /// Returns the parameters the failing request was sent with.
    #[must_use]
    pub fn parameters(&self) -> &[(String, String)] {
        &self.parameters
    }
}

fn format_parameters(parameters: &[(String, String)]) -> String {
    parameters
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
