//! Errors returned by the state controller.
//!
//! These are hard failures: the call was invalid and nothing changed. Refused
//! mutations that are merely against policy come back as `Outcome` instead.

use switchboard_types::{OptionsConflict, StateError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControllerError {
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] StateError),
    #[error("state `{name}` is not defined")]
    NotFound { name: String },
    #[error(transparent)]
    ConfigConflict(#[from] OptionsConflict),
    #[error("activating `{name}` would leave more than one state active")]
    MultiplicityViolation { name: String },
}

/// Error category, for callers that only branch on the kind of failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidArgument,
    NotFound,
    ConfigConflict,
    MultiplicityViolation,
}

impl ControllerError {
    pub(crate) fn not_found(name: &str) -> Self {
        Self::NotFound {
            name: name.to_owned(),
        }
    }

    pub(crate) fn multiplicity(name: &str) -> Self {
        Self::MultiplicityViolation {
            name: name.to_owned(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::ConfigConflict(_) => ErrorKind::ConfigConflict,
            Self::MultiplicityViolation { .. } => ErrorKind::MultiplicityViolation,
        }
    }
}
