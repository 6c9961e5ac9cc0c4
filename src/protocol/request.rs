// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Building `/control` request URLs.

use std::fmt;

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::command::Command;
use crate::protocol::Connection;
use crate::types::{
    ActuatorType, FunctionType, Node, RfSystem, SensorType, SystemType, UrlParam,
};

/// Key of a request parameter.
///
/// Constant keys take precedence over raw keys resolving to the same name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParamKey {
    /// A known protocol parameter.
    Param(UrlParam),
    /// Any other key, sent verbatim.
    Raw(String),
}

impl ParamKey {
    /// Returns the name sent on the wire.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Param(param) => param.as_str(),
            Self::Raw(raw) => raw,
        }
    }

    /// Returns `true` for constant keys.
    #[must_use]
    pub const fn is_constant(&self) -> bool {
        matches!(self, Self::Param(_))
    }
}

impl From<UrlParam> for ParamKey {
    fn from(param: UrlParam) -> Self {
        Self::Param(param)
    }
}

impl From<&str> for ParamKey {
    fn from(raw: &str) -> Self {
        Self::Raw(raw.to_string())
    }
}

impl From<String> for ParamKey {
    fn from(raw: String) -> Self {
        Self::Raw(raw)
    }
}

/// One entry of an actuator's function list inside a configuration.
///
/// # Examples
///
/// ```
/// use xs1_lib::protocol::FunctionDescriptor;
/// use xs1_lib::types::FunctionType;
///
/// let on = FunctionDescriptor::new(FunctionType::On, "ON");
/// assert_eq!(on.function_type(), "on");
/// assert_eq!(on.description(), "ON");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDescriptor {
    function_type: String,
    description: String,
}

impl FunctionDescriptor {
    /// Creates a descriptor from a known function type.
    #[must_use]
    pub fn new(function_type: FunctionType, description: impl Into<String>) -> Self {
        Self::raw(function_type.as_str(), description)
    }

    /// Creates a descriptor from a raw type code.
    ///
    /// Used when copying configurations that contain codes this release
    /// does not recognize.
    #[must_use]
    pub fn raw(function_type: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            function_type: function_type.into(),
            description: description.into(),
        }
    }

    /// Returns the raw type code.
    #[must_use]
    pub fn function_type(&self) -> &str {
        &self.function_type
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    fn from_json(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let function_type = object.get(Node::Type.as_str())?.as_str()?;
        let description = object
            .get(Node::Description.as_str())
            .and_then(Value::as_str)
            .unwrap_or_default();
        Some(Self::raw(function_type, description))
    }
}

/// Value of a request parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Text, sent URL-encoded.
    Text(String),
    /// Whole number.
    Integer(i64),
    /// Floating point number.
    Float(f64),
    /// A function list, expanded into `function{n}.type` / `function{n}.dsc`.
    Functions(Vec<FunctionDescriptor>),
}

impl ParamValue {
    /// Converts a JSON value as found in a configuration record.
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::String(s) => Self::Text(s.clone()),
            Value::Number(n) => n
                .as_i64()
                .map(Self::Integer)
                .unwrap_or_else(|| Self::Float(n.as_f64().unwrap_or_default())),
            Value::Bool(b) => Self::Text(b.to_string()),
            Value::Null => Self::Text(String::new()),
            Value::Array(items) => {
                let functions: Option<Vec<_>> =
                    items.iter().map(FunctionDescriptor::from_json).collect();
                match functions {
                    Some(functions) if !functions.is_empty() => Self::Functions(functions),
                    _ => Self::Text(value.to_string()),
                }
            }
            Value::Object(_) => Self::Text(value.to_string()),
        }
    }

    /// Renders the value as sent on the wire, before URL encoding.
    ///
    /// Whole floats render without a fractional part.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Integer(n) => n.to_string(),
            Self::Float(f) => render_float(*f),
            Self::Functions(functions) => functions
                .iter()
                .map(|f| format!("{}:{}", f.function_type, f.description))
                .collect::<Vec<_>>()
                .join(","),
        }
    }
}

#[allow(clippy::float_cmp)]
fn render_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<Vec<FunctionDescriptor>> for ParamValue {
    fn from(value: Vec<FunctionDescriptor>) -> Self {
        Self::Functions(value)
    }
}

macro_rules! integer_param_value {
    ($($ty:ty),+) => {
        $(
            impl From<$ty> for ParamValue {
                fn from(value: $ty) -> Self {
                    Self::Integer(i64::from(value))
                }
            }
        )+
    };
}

integer_param_value!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for ParamValue {
    fn from(value: u64) -> Self {
        i64::try_from(value).map_or_else(|_| Self::Text(value.to_string()), Self::Integer)
    }
}

impl From<usize> for ParamValue {
    fn from(value: usize) -> Self {
        i64::try_from(value).map_or_else(|_| Self::Text(value.to_string()), Self::Integer)
    }
}

macro_rules! constant_param_value {
    ($($ty:ty),+) => {
        $(
            impl From<$ty> for ParamValue {
                fn from(value: $ty) -> Self {
                    Self::Text(value.as_str().to_string())
                }
            }
        )+
    };
}

constant_param_value!(ActuatorType, SensorType, FunctionType, SystemType, RfSystem, UrlParam);

/// An ordered list of request parameters.
///
/// Entries are kept as given; duplicate names are resolved when the request
/// is built.
///
/// # Examples
///
/// ```
/// use xs1_lib::protocol::Parameters;
/// use xs1_lib::types::UrlParam;
///
/// let params = Parameters::new()
///     .with(UrlParam::Number, 3)
///     .with(UrlParam::Value, 100);
/// assert_eq!(params.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameters {
    entries: Vec<(ParamKey, ParamValue)>,
}

impl Parameters {
    /// Creates an empty parameter list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter and returns the list.
    #[must_use]
    pub fn with(mut self, key: impl Into<ParamKey>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Adds a parameter.
    pub fn insert(&mut self, key: impl Into<ParamKey>, value: impl Into<ParamValue>) {
        self.entries.push((key.into(), value.into()));
    }

    /// Replaces every entry resolving to `key`'s name with a single constant entry.
    pub fn set(&mut self, key: UrlParam, value: impl Into<ParamValue>) {
        self.entries.retain(|(k, _)| k.name() != key.as_str());
        self.entries.push((ParamKey::Param(key), value.into()));
    }

    /// Returns the value of the winning entry for `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        let mut winner: Option<&(ParamKey, ParamValue)> = None;
        for entry in self.entries.iter().filter(|(k, _)| k.name() == name) {
            match winner {
                Some((k, _)) if k.is_constant() && !entry.0.is_constant() => {}
                _ => winner = Some(entry),
            }
        }
        winner.map(|(_, v)| v)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &(ParamKey, ParamValue)> {
        self.entries.iter()
    }

    /// Converts a JSON record, such as a configuration read from the gateway.
    #[must_use]
    pub fn from_json_map(map: &Map<String, Value>) -> Self {
        map.iter()
            .map(|(key, value)| (ParamKey::Raw(key.clone()), ParamValue::from_json(value)))
            .collect()
    }
}

impl FromIterator<(ParamKey, ParamValue)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (ParamKey, ParamValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl From<Map<String, Value>> for Parameters {
    fn from(map: Map<String, Value>) -> Self {
        Self::from_json_map(&map)
    }
}

impl From<&Map<String, Value>> for Parameters {
    fn from(map: &Map<String, Value>) -> Self {
        Self::from_json_map(map)
    }
}

/// A fully built request, ready to be handed to a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    url: String,
    command: Command,
    query: Vec<(String, String)>,
}

impl PreparedRequest {
    /// Returns the full URL, credentials included.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the command.
    #[must_use]
    pub fn command(&self) -> Command {
        self.command
    }

    /// Returns the resolved command parameters, without credentials.
    #[must_use]
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// Returns the URL with the password masked, for logging.
    #[must_use]
    pub fn redacted_url(&self) -> String {
        match self.url.find("&pwd=") {
            Some(start) => {
                let value_start = start + "&pwd=".len();
                let value_end = self.url[value_start..]
                    .find('&')
                    .map_or(self.url.len(), |i| value_start + i);
                format!("{}***{}", &self.url[..value_start], &self.url[value_end..])
            }
            None => self.url.clone(),
        }
    }
}

/// Turns a command and its parameters into a `/control` URL.
///
/// The URL always starts with the `callback` marker the gateway needs to
/// answer, followed by credentials (only when both are non-empty), the
/// command and the resolved parameters.
///
/// # Examples
///
/// ```
/// use xs1_lib::command::Command;
/// use xs1_lib::protocol::{Connection, Parameters, RequestBuilder};
/// use xs1_lib::types::UrlParam;
///
/// let connection = Connection::new("192.168.1.10");
/// let request = RequestBuilder::new(&connection).build(
///     Command::SetStateActuator,
///     &Parameters::new().with(UrlParam::Number, 3).with(UrlParam::Value, 100),
/// );
/// assert_eq!(
///     request.url(),
///     "http://192.168.1.10/control?callback=callback&cmd=set_state_actuator&number=3&value=100"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct RequestBuilder<'a> {
    endpoint: String,
    credentials: Option<(&'a str, &'a str)>,
}

impl<'a> RequestBuilder<'a> {
    /// Path of the gateway's control endpoint.
    pub const CONTROL_PATH: &'static str = "/control";

    /// Creates a builder targeting `connection`.
    #[must_use]
    pub fn new(connection: &'a Connection) -> Self {
        Self {
            endpoint: format!("{}{}", connection.base_url(), Self::CONTROL_PATH),
            credentials: connection.credentials(),
        }
    }

    /// Builds the request for `command`.
    #[must_use]
    pub fn build(&self, command: Command, parameters: &Parameters) -> PreparedRequest {
        let mut url = format!(
            "{}?{}={}",
            self.endpoint,
            UrlParam::Callback.as_str(),
            UrlParam::Callback.as_str()
        );

        if let Some((user, password)) = self.credentials {
            url.push_str(&format!(
                "&{}={}&{}={}",
                UrlParam::User.as_str(),
                urlencoding::encode(user),
                UrlParam::Password.as_str(),
                urlencoding::encode(password)
            ));
        }

        url.push_str(&format!("&{}={}", UrlParam::Command.as_str(), command.as_str()));

        let query = resolve_parameters(parameters);
        for (name, value) in &query {
            url.push_str(&format!(
                "&{}={}",
                urlencoding::encode(name),
                urlencoding::encode(value)
            ));
        }

        PreparedRequest {
            url,
            command,
            query,
        }
    }
}

/// Resolves duplicates and expands function lists into flat query pairs.
fn resolve_parameters(parameters: &Parameters) -> Vec<(String, String)> {
    // name -> (set by a constant key, rendered value)
    let mut resolved: IndexMap<String, (bool, String)> = IndexMap::new();
    let mut functions: Option<&[FunctionDescriptor]> = None;

    for (key, value) in parameters.iter() {
        let name = key.name();

        if UrlParam::from_value(name).is_some_and(|p| p.is_reserved()) {
            tracing::warn!(parameter = %name, "Dropping reserved request parameter");
            continue;
        }

        if let ParamValue::Functions(list) = value
            && name == UrlParam::Function.as_str()
        {
            functions = Some(list.as_slice());
            continue;
        }

        let constant = key.is_constant();
        match resolved.get_mut(name) {
            Some((existing_constant, _)) if *existing_constant && !constant => {}
            Some(slot) => *slot = (constant, value.render()),
            None => {
                resolved.insert(name.to_string(), (constant, value.render()));
            }
        }
    }

    if let Some(list) = functions {
        if list.len() > UrlParam::MAX_FUNCTIONS {
            tracing::warn!(
                count = list.len(),
                max = UrlParam::MAX_FUNCTIONS,
                "Function list longer than the available slots, extra entries ignored"
            );
        }
        for (idx, function) in list.iter().take(UrlParam::MAX_FUNCTIONS).enumerate() {
            let slot = idx + 1;
            if let (Some(type_param), Some(dsc_param)) = (
                UrlParam::function_type(slot),
                UrlParam::function_description(slot),
            ) {
                resolved.insert(
                    type_param.as_str().to_string(),
                    (true, function.function_type.clone()),
                );
                resolved.insert(
                    dsc_param.as_str().to_string(),
                    (true, function.description.clone()),
                );
            }
        }
    }

    resolved
        .into_iter()
        .map(|(name, (_, value))| (name, value))
        .collect()
}
