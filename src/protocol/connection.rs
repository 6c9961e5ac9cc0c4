// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Connection identity of a gateway.

/// Where a gateway lives and how to authenticate against it.
///
/// Each [`Gateway`](crate::Gateway) owns its own connection; there is no
/// process-wide default.
///
/// # Examples
///
/// ```
/// use xs1_lib::protocol::Connection;
///
/// let connection = Connection::new("192.168.1.10");
/// assert_eq!(connection.base_url(), "http://192.168.1.10");
///
/// let connection = Connection::new("xs1.local")
///     .with_port(8080)
///     .with_credentials("admin", "secret");
/// assert_eq!(connection.base_url(), "http://xs1.local:8080");
/// assert_eq!(connection.credentials(), Some(("admin", "secret")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    host: String,
    port: u16,
    use_https: bool,
    user: Option<String>,
    password: Option<String>,
}

impl Connection {
    /// Default HTTP port.
    pub const DEFAULT_PORT: u16 = 80;
    /// Default HTTPS port.
    pub const DEFAULT_HTTPS_PORT: u16 = 443;

    /// Creates a connection to `host` without credentials.
    ///
    /// `host` may also be a full base URL such as `http://10.0.0.2:8080`,
    /// in which case port and scheme settings are ignored.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: Self::DEFAULT_PORT,
            use_https: false,
            user: None,
            password: None,
        }
    }

    /// Sets a custom port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Enables HTTPS.
    ///
    /// If port hasn't been explicitly set, it will be changed to 443.
    #[must_use]
    pub fn with_https(mut self) -> Self {
        self.use_https = true;
        if self.port == Self::DEFAULT_PORT {
            self.port = Self::DEFAULT_HTTPS_PORT;
        }
        self
    }

    /// Sets authentication credentials.
    #[must_use]
    pub fn with_credentials(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self.password = Some(password.into());
        self
    }

    /// Sets optional credentials, as read from a configuration source.
    #[must_use]
    pub fn with_optional_credentials(mut self, user: Option<String>, password: Option<String>) -> Self {
        self.user = user;
        self.password = password;
        self
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns whether HTTPS is enabled.
    #[must_use]
    pub fn use_https(&self) -> bool {
        self.use_https
    }

    /// Returns the user name, if set.
    #[must_use]
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    /// Returns the password, if set.
    #[must_use]
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// Returns the credentials when both user and password are non-empty.
    #[must_use]
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.user(), self.password()) {
            (Some(user), Some(password)) if !user.is_empty() && !password.is_empty() => {
                Some((user, password))
            }
            _ => None,
        }
    }

    /// Builds the base URL from this connection.
    #[must_use]
    pub fn base_url(&self) -> String {
        if self.host.starts_with("http://") || self.host.starts_with("https://") {
            return self.host.trim_end_matches('/').to_string();
        }

        let scheme = if self.use_https { "https" } else { "http" };
        let port_suffix =
            if (self.use_https && self.port == 443) || (!self.use_https && self.port == 80) {
                String::new()
            } else {
                format!(":{}", self.port)
            };
        format!("{scheme}://{}{port_suffix}", self.host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let connection = Connection::new("192.168.1.100");
        assert_eq!(connection.host(), "192.168.1.100");
        assert_eq!(connection.port(), 80);
        assert!(!connection.use_https());
        assert!(connection.credentials().is_none());
    }

    #[test]
    fn https_switches_default_port() {
        let connection = Connection::new("192.168.1.100").with_https();
        assert_eq!(connection.port(), 443);
        assert_eq!(connection.base_url(), "https://192.168.1.100");
    }

    #[test]
    fn https_keeps_custom_port() {
        let connection = Connection::new("192.168.1.100").with_port(8443).with_https();
        assert_eq!(connection.base_url(), "https://192.168.1.100:8443");
    }

    #[test]
    fn full_url_host_is_used_verbatim() {
        let connection = Connection::new("http://127.0.0.1:4567/");
        assert_eq!(connection.base_url(), "http://127.0.0.1:4567");
    }

    #[test]
    fn credentials_require_both_parts() {
        let connection = Connection::new("h").with_optional_credentials(Some("admin".into()), None);
        assert_eq!(connection.user(), Some("admin"));
        assert!(connection.credentials().is_none());

        let connection = Connection::new("h").with_credentials("", "secret");
        assert!(connection.credentials().is_none());
    }
}
