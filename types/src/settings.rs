//! Controller settings shared across crates.
//!
//! `ControllerOptions` is the flag surface callers and config files hand in.
//! `ControllerPolicy` is its resolved form: the contradictory combination of
//! flags cannot be represented there, so the check happens exactly once, at
//! resolution.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("activate_all and deactivate_all cannot be requested at the same time")]
pub struct OptionsConflict;

/// Raw construction options. All flags default to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ControllerOptions {
    pub allow_multiple: bool,
    pub activate_all: bool,
    pub deactivate_all: bool,
}

impl ControllerOptions {
    pub fn resolve(self) -> Result<ControllerPolicy, OptionsConflict> {
        ControllerPolicy::try_from(self)
    }
}

/// How many states may be active at once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Multiplicity {
    #[default]
    Single,
    Multiple,
}

impl Multiplicity {
    #[must_use]
    pub const fn from_allow_multiple(allow_multiple: bool) -> Self {
        if allow_multiple {
            Self::Multiple
        } else {
            Self::Single
        }
    }

    #[must_use]
    pub const fn allows_multiple(self) -> bool {
        matches!(self, Self::Multiple)
    }
}

/// Bulk operation applied once every initial state is in place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum InitialBulk {
    #[default]
    Keep,
    ActivateAll,
    DeactivateAll,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ControllerPolicy {
    multiplicity: Multiplicity,
    initial: InitialBulk,
}

impl ControllerPolicy {
    #[must_use]
    pub const fn new(multiplicity: Multiplicity, initial: InitialBulk) -> Self {
        Self {
            multiplicity,
            initial,
        }
    }

    #[must_use]
    pub const fn multiplicity(self) -> Multiplicity {
        self.multiplicity
    }

    #[must_use]
    pub const fn initial(self) -> InitialBulk {
        self.initial
    }
}

impl TryFrom<ControllerOptions> for ControllerPolicy {
    type Error = OptionsConflict;

    fn try_from(options: ControllerOptions) -> Result<Self, Self::Error> {
        let initial = match (options.activate_all, options.deactivate_all) {
            (true, true) => return Err(OptionsConflict),
            (true, false) => InitialBulk::ActivateAll,
            (false, true) => InitialBulk::DeactivateAll,
            (false, false) => InitialBulk::Keep,
        };
        Ok(Self::new(
            Multiplicity::from_allow_multiple(options.allow_multiple),
            initial,
        ))
    }
}

impl From<ControllerPolicy> for ControllerOptions {
    fn from(policy: ControllerPolicy) -> Self {
        Self {
            allow_multiple: policy.multiplicity.allows_multiple(),
            activate_all: policy.initial == InitialBulk::ActivateAll,
            deactivate_all: policy.initial == InitialBulk::DeactivateAll,
        }
    }
}
