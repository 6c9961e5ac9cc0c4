// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Request/response plumbing for the XS1 HTTP API.
//!
//! Every gateway call is a GET on `/control` whose answer is a JSON object
//! wrapped in a callback:
//!
//! ```text
//! GET http://<host>/control?callback=callback&user=<u>&pwd=<p>&cmd=<command>&number=3
//! callback({"version":15,"type":"get_state_actuator","actuator":{...}})
//! ```
//!
//! # Components
//!
//! - [`RequestBuilder`]: turns a [`Command`](crate::command::Command) and
//!   [`Parameters`] into a URL
//! - [`Transport`]: delivers the GET and returns the raw body
//! - [`CommandResponse`]: extracts the JSON payload and classifies errors
//! - [`HttpTransport`]: the `reqwest` based transport with retries

mod connection;
#[cfg(feature = "http")]
mod http;
mod request;
mod response;

pub use connection::Connection;
#[cfg(feature = "http")]
pub use http::{HttpConfig, HttpTransport};
pub use request::{
    FunctionDescriptor, ParamKey, ParamValue, Parameters, PreparedRequest, RequestBuilder,
};
pub use response::{CommandResponse, Payload, check_error};

use crate::error::ProtocolError;

/// Delivers GET requests to the gateway.
///
/// Implementations own delivery concerns such as timeouts and retries; the
/// client only ever sees the final body or the final failure.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Performs a GET on `url` and returns the raw response body.
    ///
    /// # Arguments
    ///
    /// * `url` - The full request URL
    /// * `credentials` - Basic auth user and password, if configured
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the request cannot be delivered.
    async fn get(&self, url: &str, credentials: Option<(&str, &str)>)
    -> Result<String, ProtocolError>;
}
