// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The shared machinery behind every protocol constant.
//!
//! Each constant type is a closed enum whose variants map to one canonical
//! string. Constants compare equal to plain strings carrying that canonical
//! value, so `ActuatorType::Dimmer == "dimmer"` holds in both directions.
//! All such comparisons funnel through [`ApiConstant::matches`].

/// A protocol constant with a canonical string representation.
pub trait ApiConstant: Copy + 'static {
    /// Human readable name of the taxonomy, used in error messages.
    const KIND: &'static str;

    /// Every constant of this taxonomy, in declaration order.
    const ALL: &'static [Self];

    /// Returns the canonical string value sent to or received from the gateway.
    fn as_str(&self) -> &'static str;

    /// Returns `true` if `other` is the canonical value of this constant.
    fn matches(&self, other: &str) -> bool {
        self.as_str() == other
    }

    /// Looks up the constant whose canonical value is `value`.
    fn from_value(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|constant| constant.matches(value))
    }
}

/// Declares a closed set of protocol constants.
///
/// Generates the enum together with `as_str`, `Display`, strict `FromStr`,
/// serde support and the cross-type equality impls against `str`, `&str`
/// and `String`.
macro_rules! api_constant {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident ($kind:literal) {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $value:literal,
            )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $name {
            /// Returns the canonical string value.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $value,)+
                }
            }

            /// Looks up a constant by its canonical string value.
            #[must_use]
            pub fn from_value(value: &str) -> Option<Self> {
                <Self as $crate::types::ApiConstant>::from_value(value)
            }
        }

        impl $crate::types::ApiConstant for $name {
            const KIND: &'static str = $kind;
            const ALL: &'static [Self] = &[$(Self::$variant,)+];

            fn as_str(&self) -> &'static str {
                $name::as_str(self)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::ValueError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_value(s).ok_or_else(|| $crate::error::ValueError::UnknownConstant {
                    kind: $kind,
                    value: s.to_string(),
                })
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                $crate::types::ApiConstant::matches(self, other)
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                $crate::types::ApiConstant::matches(self, other)
            }
        }

        impl PartialEq<String> for $name {
            fn eq(&self, other: &String) -> bool {
                $crate::types::ApiConstant::matches(self, other)
            }
        }

        impl PartialEq<$name> for str {
            fn eq(&self, other: &$name) -> bool {
                $crate::types::ApiConstant::matches(other, self)
            }
        }

        impl PartialEq<$name> for &str {
            fn eq(&self, other: &$name) -> bool {
                $crate::types::ApiConstant::matches(other, self)
            }
        }

        impl PartialEq<$name> for String {
            fn eq(&self, other: &$name) -> bool {
                $crate::types::ApiConstant::matches(other, self)
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let value = String::deserialize(deserializer)?;
                value.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

pub(crate) use api_constant;
