//! Soft rejections.
//!
//! Refusing to unpin-by-deactivation, toggle a pinned state, or bulk-activate a
//! single-active collection is policy, not a caller bug. Those paths return an
//! [`Outcome`] instead of an error, and log the rejection at `warn` level.

use std::fmt;

/// Why a mutation was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Deactivation of an always-on state.
    PinnedDeactivate { name: String },
    /// Toggle of an always-on state.
    PinnedToggle { name: String },
    /// Bulk activation while only one state may be active.
    BulkActivateSingle,
}

impl Rejection {
    /// The state the rejection refers to, if it refers to one.
    #[must_use]
    pub fn state_name(&self) -> Option<&str> {
        match self {
            Self::PinnedDeactivate { name } | Self::PinnedToggle { name } => Some(name),
            Self::BulkActivateSingle => None,
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PinnedDeactivate { name } => {
                write!(f, "cannot turn off the always active state `{name}`")
            }
            Self::PinnedToggle { name } => {
                write!(f, "cannot toggle the always active state `{name}`")
            }
            Self::BulkActivateSingle => {
                f.write_str("cannot activate all states while only one may be active")
            }
        }
    }
}

/// Result of a mutation that may be refused without being an error.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Rejected(Rejection),
}

impl Outcome {
    /// Build a rejected outcome and report it.
    pub fn rejected(rejection: Rejection) -> Self {
        match rejection.state_name() {
            Some(state) => tracing::warn!(state, "{rejection}"),
            None => tracing::warn!("{rejection}"),
        }
        Self::Rejected(rejection)
    }

    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }

    #[must_use]
    pub fn warning(&self) -> Option<&Rejection> {
        match self {
            Self::Applied => None,
            Self::Rejected(rejection) => Some(rejection),
        }
    }

    #[must_use]
    pub fn into_warning(self) -> Option<Rejection> {
        match self {
            Self::Applied => None,
            Self::Rejected(rejection) => Some(rejection),
        }
    }
}
