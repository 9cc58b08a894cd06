//! Core domain types for Switchboard.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies:
//! the named boolean state, the data it is created from, soft-rejection outcomes, and
//! the resolved controller settings.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory

mod outcome;
mod settings;
mod state;

pub use outcome::{Outcome, Rejection};
pub use settings::{ControllerOptions, ControllerPolicy, InitialBulk, Multiplicity, OptionsConflict};
pub use state::{ElementState, StateError, StateInput, StateSpec};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;
use thiserror::Error;

// ============================================================================
// State names
// ============================================================================

/// A state name guaranteed to be non-empty (after trimming).
///
/// The original spelling is kept; only the emptiness check trims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StateName(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("state name must not be empty")]
pub struct EmptyNameError;

impl StateName {
    pub fn new(value: impl Into<String>) -> Result<Self, EmptyNameError> {
        let value = value.into();
        if value.trim().is_empty() {
            Err(EmptyNameError)
        } else {
            Ok(Self(value))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for StateName {
    type Error = EmptyNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<StateName> for String {
    fn from(value: StateName) -> Self {
        value.0
    }
}

impl Deref for StateName {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl fmt::Display for StateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
