// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP transport for the XS1 gateway.

use std::time::Duration;

use reqwest::{Client, StatusCode};

use crate::error::ProtocolError;
use crate::protocol::Transport;

/// Status codes that are retried.
const RETRY_STATUSES: [u16; 4] = [500, 502, 503, 504];

/// Configuration of the HTTP transport.
///
/// The gateway's web server is slow and drops requests under load, so GET
/// requests are retried on server errors and connection failures with an
/// exponential backoff of `backoff * 2^(attempt - 1)`.
///
/// # Examples
///
/// ```
/// use xs1_lib::protocol::HttpConfig;
/// use std::time::Duration;
///
/// let config = HttpConfig::new()
///     .with_timeout(Duration::from_secs(5))
///     .with_max_retries(3)
///     .with_backoff(Duration::from_millis(50));
/// assert_eq!(config.max_retries(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct HttpConfig {
    timeout: Duration,
    max_retries: u32,
    backoff: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpConfig {
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
    /// Default number of retries after the first attempt.
    pub const DEFAULT_MAX_RETRIES: u32 = 5;
    /// Default backoff factor.
    pub const DEFAULT_BACKOFF: Duration = Duration::from_millis(100);

    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            timeout: Self::DEFAULT_TIMEOUT,
            max_retries: Self::DEFAULT_MAX_RETRIES,
            backoff: Self::DEFAULT_BACKOFF,
        }
    }

    /// Sets the per-attempt request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets how many times a failed request is retried.
    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets the backoff factor.
    #[must_use]
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the maximum number of retries.
    #[must_use]
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Returns the backoff factor.
    #[must_use]
    pub fn backoff(&self) -> Duration {
        self.backoff
    }

    /// Creates an `HttpTransport` from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn into_transport(self) -> Result<HttpTransport, ProtocolError> {
        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(HttpTransport {
            client,
            config: self,
        })
    }
}

/// `reqwest` based [`Transport`] with retry and backoff.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: HttpConfig,
}

impl HttpTransport {
    /// Creates a transport with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new() -> Result<Self, ProtocolError> {
        HttpConfig::new().into_transport()
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    /// Delay before retry number `attempt` (1-based).
    fn backoff_delay(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.config.backoff.saturating_mul(factor)
    }

    fn timeout_ms(&self) -> u64 {
        u64::try_from(self.config.timeout.as_millis()).unwrap_or(u64::MAX)
    }
}

impl Transport for HttpTransport {
    async fn get(
        &self,
        url: &str,
        credentials: Option<(&str, &str)>,
    ) -> Result<String, ProtocolError> {
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;

            let mut request = self.client.get(url);
            if let Some((user, password)) = credentials {
                request = request.basic_auth(user, Some(password));
            }

            let retry_allowed = attempt <= self.config.max_retries;

            // reqwest errors carry the URL, credentials included
            let response = match request.send().await.map_err(reqwest::Error::without_url) {
                Ok(response) => response,
                Err(e) if retry_allowed && (e.is_connect() || e.is_timeout()) => {
                    let delay = self.backoff_delay(attempt);
                    tracing::warn!(attempt, error = %e, delay = ?delay, "Request failed, retrying");
                    tokio::time::sleep(delay).await;
                    continue;
                }
                Err(e) if e.is_timeout() => return Err(ProtocolError::Timeout(self.timeout_ms())),
                Err(e) if e.is_connect() => {
                    return Err(ProtocolError::ConnectionFailed(e.to_string()));
                }
                Err(e) => return Err(ProtocolError::Http(e)),
            };

            let status = response.status();

            if RETRY_STATUSES.contains(&status.as_u16()) && retry_allowed {
                let delay = self.backoff_delay(attempt);
                tracing::warn!(attempt, status = status.as_u16(), delay = ?delay, "Server error, retrying");
                tokio::time::sleep(delay).await;
                continue;
            }

            if status == StatusCode::UNAUTHORIZED {
                return Err(ProtocolError::AuthenticationFailed);
            }

            if status.is_server_error() {
                return Err(ProtocolError::ServerError {
                    status: status.as_u16(),
                    attempts: attempt,
                });
            }

            if !status.is_success() {
                return Err(ProtocolError::ConnectionFailed(format!(
                    "HTTP {} - {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown")
                )));
            }

            return response
                .text()
                .await
                .map_err(|e| ProtocolError::Http(e.without_url()));
        }
    }
}
