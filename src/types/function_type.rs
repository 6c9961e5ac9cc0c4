// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Function and RF system taxonomies.

use std::fmt;

use crate::types::api_constant;

api_constant! {
    /// Action performed by an actuator function slot.
    ///
    /// Codes the gateway reports that are not listed here decode to
    /// [`FunctionType::Unknown`] through [`FunctionType::parse_lossy`].
    ///
    /// # Examples
    ///
    /// ```
    /// use xs1_lib::types::FunctionType;
    ///
    /// assert_eq!(FunctionType::parse_lossy("dim_up"), FunctionType::DimUp);
    /// assert_eq!(FunctionType::parse_lossy("xyz"), FunctionType::Unknown);
    /// ```
    pub enum FunctionType("function type") {
        On => "on",
        Off => "off",
        DimAbsolute => "dim_absolut",
        Relative => "relative",
        Toggle => "toggle",
        OnWaitOff => "on_wait_off",
        DimUp => "dim_up",
        DimDown => "dim_down",
        Auto => "auto",
        Manual => "manual",
        Learn => "learn",
        Absolute => "absolut",
        BlindAbsolute => "blind_abs",
        Special => "special",
        Wait => "wait",
        LongOn => "long_on",
        LongOff => "long_off",
        Stop => "stop",
        OffWaitOn => "off_wait_on",
        OnWaitOn => "on_wait_on",
        OffWaitOff => "off_wait_off",
        Impulse => "impuls",
        ButtonShort => "button_short",
        ButtonLong => "button_long",
        /// Slot is not in use.
        Disabled => "disabled",
        /// Fallback for codes this release does not recognize.
        Unknown => "unknown",
    }
}

impl FunctionType {
    /// Decodes a function code, mapping unrecognized codes to [`FunctionType::Unknown`].
    #[must_use]
    pub fn parse_lossy(value: &str) -> Self {
        Self::from_value(value).unwrap_or(Self::Unknown)
    }
}

api_constant! {
    /// RF system (protocol family) a device is driven through.
    pub enum SystemType("system type") {
        Virtual => "virtual",
        Ab400 => "ab400",
        Ab601 => "ab601",
        Intertechno => "it",
        Rev => "rev",
        BsQu => "bs_qu",
        Marmi => "marmi",
        OaseFm => "oasefm",
        RevOld => "rev_old",
        Rs200 => "rs200",
        Fs20 => "fs20",
        Fht => "fht",
        Hms => "hms",
        Em => "em",
        Ws300 => "ws300",
        Ws2000 => "ws2000",
        S300th => "s300th",
        Ks300 => "ks300",
        Ash2200 => "ash2200",
        Pcr800 => "pcr800",
        Rm100 => "rm100",
        Uni => "uni",
    }
}

/// The RF system of a device as reported by the gateway.
///
/// Firmware releases add systems over time, so codes outside
/// [`SystemType`] are kept verbatim and sent back unchanged.
///
/// # Examples
///
/// ```
/// use xs1_lib::types::{RfSystem, SystemType};
///
/// assert_eq!(RfSystem::resolve("fs20"), RfSystem::Known(SystemType::Fs20));
/// assert_eq!(RfSystem::resolve("zwave").as_str(), "zwave");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RfSystem {
    /// A system listed in [`SystemType`].
    Known(SystemType),
    /// Any other system code.
    Other(String),
}

impl RfSystem {
    /// Resolves a raw system code.
    #[must_use]
    pub fn resolve(value: &str) -> Self {
        SystemType::from_value(value).map_or_else(|| Self::Other(value.to_string()), Self::Known)
    }

    /// Returns the raw string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(t) => t.as_str(),
            Self::Other(raw) => raw,
        }
    }

    /// Returns the known system, if this resolved to one.
    #[must_use]
    pub fn known(&self) -> Option<SystemType> {
        match self {
            Self::Known(t) => Some(*t),
            Self::Other(_) => None,
        }
    }
}

impl From<SystemType> for RfSystem {
    fn from(value: SystemType) -> Self {
        Self::Known(value)
    }
}

impl fmt::Display for RfSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialEq<str> for RfSystem {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for RfSystem {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl PartialEq<SystemType> for RfSystem {
    fn eq(&self, other: &SystemType) -> bool {
        self.known() == Some(*other)
    }
}
