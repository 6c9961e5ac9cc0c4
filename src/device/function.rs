// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Actuator function slots.

use std::fmt;

use crate::device::Actuator;
use crate::error::Error;
use crate::protocol::Transport;
use crate::types::FunctionType;

/// One function slot of an actuator.
///
/// Obtained from [`Actuator::functions`]; remembers which actuator it came
/// from so it cannot be executed on another one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    actuator: Option<u64>,
    id: usize,
    function_type: FunctionType,
    description: String,
}

impl Function {
    pub(crate) fn new(
        actuator: Option<u64>,
        id: usize,
        function_type: FunctionType,
        description: impl Into<String>,
    ) -> Self {
        Self {
            actuator,
            id,
            function_type,
            description: description.into(),
        }
    }

    /// Returns the number of the actuator this function belongs to.
    #[must_use]
    pub fn actuator(&self) -> Option<u64> {
        self.actuator
    }

    /// Returns the 1-based slot id.
    #[must_use]
    pub fn id(&self) -> usize {
        self.id
    }

    /// Returns the function type.
    #[must_use]
    pub fn function_type(&self) -> FunctionType {
        self.function_type
    }

    /// Returns the free-text description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Executes this function on `actuator`.
    ///
    /// # Errors
    ///
    /// See [`Actuator::call_function`].
    pub async fn execute<T: Transport>(&self, actuator: &mut Actuator<T>) -> Result<(), Error> {
        actuator.call_function(self).await
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Function {} ({}): {}",
            self.id, self.function_type, self.description
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let function = Function::new(Some(4), 2, FunctionType::OnWaitOff, "Treppenlicht");
        assert_eq!(function.to_string(), "Function 2 (on_wait_off): Treppenlicht");
    }
}
