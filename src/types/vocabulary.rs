// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! URL parameter names, JSON node names and gateway error codes.

use crate::types::api_constant;

api_constant! {
    /// Query parameter names understood by the gateway.
    ///
    /// Besides the request plumbing (`cmd`, `user`, ...) this covers the
    /// keys of a device configuration record.
    pub enum UrlParam("URL parameter") {
        Callback => "callback",
        User => "user",
        Password => "pwd",
        Command => "cmd",
        Number => "number",
        Value => "value",
        /// Function to execute, or the whole function list of a configuration.
        Function => "function",
        Name => "name",
        System => "system",
        Type => "type",
        Hc1 => "hc1",
        Hc2 => "hc2",
        Address => "address",
        Room => "room",
        X => "x",
        Y => "y",
        Z => "z",
        Log => "log",
        Factor => "factor",
        Offset => "offset",
        Function1Type => "function1.type",
        Function1Description => "function1.dsc",
        Function2Type => "function2.type",
        Function2Description => "function2.dsc",
        Function3Type => "function3.type",
        Function3Description => "function3.dsc",
        Function4Type => "function4.type",
        Function4Description => "function4.dsc",
    }
}

impl UrlParam {
    /// Maximum number of function slots an actuator has.
    pub const MAX_FUNCTIONS: usize = 4;

    /// Returns the `function{n}.type` parameter for a 1-based slot.
    #[must_use]
    pub const fn function_type(slot: usize) -> Option<Self> {
        match slot {
            1 => Some(Self::Function1Type),
            2 => Some(Self::Function2Type),
            3 => Some(Self::Function3Type),
            4 => Some(Self::Function4Type),
            _ => None,
        }
    }

    /// Returns the `function{n}.dsc` parameter for a 1-based slot.
    #[must_use]
    pub const fn function_description(slot: usize) -> Option<Self> {
        match slot {
            1 => Some(Self::Function1Description),
            2 => Some(Self::Function2Description),
            3 => Some(Self::Function3Description),
            4 => Some(Self::Function4Description),
            _ => None,
        }
    }

    /// Returns `true` for keys the request builder writes itself.
    #[must_use]
    pub const fn is_reserved(&self) -> bool {
        matches!(
            self,
            Self::Callback | Self::User | Self::Password | Self::Command
        )
    }
}

api_constant! {
    /// JSON node names found in gateway payloads.
    pub enum Node("JSON node") {
        Version => "version",
        Info => "info",
        System => "system",
        Actuator => "actuator",
        Sensor => "sensor",
        Function => "function",
        RfMode => "rfmode",
        Error => "error",
        DeviceName => "devicename",
        Hardware => "hardware",
        Bootloader => "bootloader",
        Firmware => "firmware",
        Uptime => "uptime",
        Mac => "mac",
        Id => "id",
        Number => "number",
        Name => "name",
        Type => "type",
        Value => "value",
        NewValue => "newvalue",
        UpdateTime => "utime",
        Unit => "unit",
        Description => "dsc",
    }
}

api_constant! {
    /// Error codes the gateway reports in the `error` node.
    pub enum ErrorCode("error code") {
        InvalidCommand => "01",
        CommandTypeMissing => "02",
        NotFound => "03",
        DuplicateName => "04",
        InvalidSystem => "05",
        InvalidFunction => "06",
        InvalidDateTime => "07",
        ObjectNotFound => "08",
        TypeNotVirtual => "09",
        SyntaxError => "10",
        TimeRange => "11",
        ProtocolVersionMismatch => "12",
    }
}

impl ErrorCode {
    /// Message used for codes missing from the table.
    pub const UNKNOWN_MESSAGE: &'static str = "unknown error code";

    /// Returns the human readable message for this code.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::InvalidCommand => "invalid command",
            Self::CommandTypeMissing => "cmd type missing",
            Self::NotFound => "number/name not found",
            Self::DuplicateName => "duplicate name",
            Self::InvalidSystem => "invalid system",
            Self::InvalidFunction => "invalid function",
            Self::InvalidDateTime => "invalid date/time",
            Self::ObjectNotFound => "object not found",
            Self::TypeNotVirtual => "type not virtual",
            Self::SyntaxError => "syntax error",
            Self::TimeRange => "error time range",
            Self::ProtocolVersionMismatch => "protocol version mismatch",
        }
    }

    /// Resolves the message for a raw code, falling back to a generic one.
    #[must_use]
    pub fn message_for(code: &str) -> &'static str {
        Self::from_value(code).map_or(Self::UNKNOWN_MESSAGE, |c| c.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn function_slot_params() {
        assert_eq!(UrlParam::function_type(1), Some(UrlParam::Function1Type));
        assert_eq!(
            UrlParam::function_description(4).map(|p| p.as_str()),
            Some("function4.dsc")
        );
        assert_eq!(UrlParam::function_type(0), None);
        assert_eq!(UrlParam::function_type(5), None);
    }

    #[test]
    fn reserved_params() {
        assert!(UrlParam::Command.is_reserved());
        assert!(UrlParam::Password.is_reserved());
        assert!(!UrlParam::Number.is_reserved());
    }

    #[test]
    fn error_code_messages() {
        assert_eq!(ErrorCode::message_for("01"), "invalid command");
        assert_eq!(ErrorCode::message_for("03"), "number/name not found");
        assert_eq!(ErrorCode::message_for("12"), "protocol version mismatch");
        assert_eq!(ErrorCode::message_for("99"), "unknown error code");
    }

    #[test]
    fn node_names() {
        assert_eq!(Node::NewValue, "newvalue");
        assert_eq!(Node::UpdateTime, "utime");
        assert_eq!(Node::Description.to_string(), "dsc");
    }
}
