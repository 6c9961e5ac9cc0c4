// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP gateway builder.

use std::time::Duration;

use crate::error::Error;
use crate::gateway::Gateway;
use crate::protocol::{Connection, HttpConfig, HttpTransport};

/// A gateway client over HTTP.
pub type HttpGateway = Gateway<HttpTransport>;

impl Gateway<HttpTransport> {
    /// Starts building an HTTP client for the gateway at `host`.
    ///
    /// `host` is a host name or IP address, or a full URL such as
    /// `http://192.168.1.10`.
    #[must_use]
    pub fn http(host: impl Into<String>) -> GatewayBuilder {
        GatewayBuilder::new(Connection::new(host))
    }

    /// Starts building an HTTP client for an existing connection.
    #[must_use]
    pub fn http_connection(connection: Connection) -> GatewayBuilder {
        GatewayBuilder::new(connection)
    }
}

/// Builder for HTTP gateway clients.
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use xs1_lib::Gateway;
///
/// # async fn example() -> xs1_lib::Result<()> {
/// let gateway = Gateway::http("192.168.1.10")
///     .with_credentials("admin", "secret")
///     .with_timeout(Duration::from_secs(5))
///     .with_max_retries(2)
///     .build()
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GatewayBuilder {
    connection: Connection,
    http: HttpConfig,
}

impl GatewayBuilder {
    fn new(connection: Connection) -> Self {
        Self {
            connection,
            http: HttpConfig::new(),
        }
    }

    /// Sets the basic auth credentials.
    #[must_use]
    pub fn with_credentials(
        mut self,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.connection = self.connection.with_credentials(user, password);
        self
    }

    /// Sets the port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.connection = self.connection.with_port(port);
        self
    }

    /// Uses HTTPS instead of HTTP.
    #[must_use]
    pub fn with_https(mut self) -> Self {
        self.connection = self.connection.with_https();
        self
    }

    /// Sets the per-attempt request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.http = self.http.with_timeout(timeout);
        self
    }

    /// Sets how many times a failed request is retried.
    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.http = self.http.with_max_retries(max_retries);
        self
    }

    /// Sets the retry backoff factor.
    #[must_use]
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.http = self.http.with_backoff(backoff);
        self
    }

    /// Returns the connection that will be used.
    #[must_use]
    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Returns the transport configuration.
    #[must_use]
    pub fn http_config(&self) -> &HttpConfig {
        &self.http
    }

    /// Connects and fetches the gateway metadata.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The HTTP client cannot be created
    /// - The gateway cannot be reached
    /// - The metadata response is malformed
    pub async fn build(self) -> Result<HttpGateway, Error> {
        let transport = self.http.into_transport().map_err(Error::Protocol)?;
        Gateway::with_transport(transport, self.connection).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let builder = Gateway::http("192.168.1.10");
        assert_eq!(builder.connection().host(), "192.168.1.10");
        assert_eq!(builder.connection().credentials(), None);
        assert_eq!(builder.http_config().max_retries(), HttpConfig::DEFAULT_MAX_RETRIES);
    }

    #[test]
    fn builder_chain() {
        let builder = Gateway::http("xs1.local")
            .with_credentials("admin", "secret")
            .with_port(8080)
            .with_https()
            .with_timeout(Duration::from_secs(2))
            .with_max_retries(1)
            .with_backoff(Duration::from_millis(5));

        let connection = builder.connection();
        assert_eq!(connection.credentials(), Some(("admin", "secret")));
        assert_eq!(connection.base_url(), "https://xs1.local:8080");
        assert_eq!(builder.http_config().timeout(), Duration::from_secs(2));
        assert_eq!(builder.http_config().max_retries(), 1);
        assert_eq!(builder.http_config().backoff(), Duration::from_millis(5));
    }

    #[test]
    fn builder_from_connection() {
        let connection = Connection::new("10.0.0.2").with_credentials("u", "p");
        let builder = Gateway::http_connection(connection);
        assert_eq!(builder.connection().user(), Some("u"));
    }
}
