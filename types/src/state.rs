//! A named boolean state with an optional always-on pin.
//!
//! Invariant: a pinned state is always active. Construction forces the value on,
//! deserialization goes through the same constructor, and every mutator that could
//! clear the value refuses to do so while the pin is set.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Outcome, Rejection, StateName};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("a state must have a non-empty name")]
    EmptyName,
    #[error("cannot create a state from an empty spec")]
    EmptySpec,
    #[error("state `{name}` cannot be registered as `{key}`")]
    NameMismatch { key: String, name: String },
}

// ── Init data ────────────────────────────────────────────────

/// Data a state is created from.
///
/// Every field is optional so that partially specified states can come from
/// config files. A spec with no fields at all is rejected rather than defaulted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StateSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub always_on: Option<bool>,
}

impl StateSpec {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_value(mut self, value: bool) -> Self {
        self.value = Some(value);
        self
    }

    #[must_use]
    pub fn with_always_on(mut self, always_on: bool) -> Self {
        self.always_on = Some(always_on);
        self
    }

    /// True when no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.value.is_none() && self.always_on.is_none()
    }
}

impl TryFrom<StateSpec> for ElementState {
    type Error = StateError;

    fn try_from(spec: StateSpec) -> Result<Self, Self::Error> {
        if spec.is_empty() {
            return Err(StateError::EmptySpec);
        }
        let name = spec.name.ok_or(StateError::EmptyName)?;
        Self::new(
            name,
            spec.value.unwrap_or(false),
            spec.always_on.unwrap_or(false),
        )
    }
}

impl From<ElementState> for StateSpec {
    fn from(state: ElementState) -> Self {
        Self {
            name: Some(state.name.into_inner()),
            value: Some(state.value),
            always_on: Some(state.always_on),
        }
    }
}

// ── Input ────────────────────────────────────────────────────

/// Either an already-built state or the data to build one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateInput {
    Existing(ElementState),
    Spec(StateSpec),
}

impl StateInput {
    /// Resolve into an owned state.
    ///
    /// `key` is the name the state is being registered under. A spec without a
    /// name takes it; a state or spec that names itself must agree with it.
    pub fn resolve(self, key: Option<&str>) -> Result<ElementState, StateError> {
        let state = match self {
            Self::Existing(state) => state,
            Self::Spec(spec) => {
                if spec.is_empty() {
                    return Err(StateError::EmptySpec);
                }
                let spec = match (spec.name.is_none(), key) {
                    (true, Some(key)) => StateSpec {
                        name: Some(key.to_owned()),
                        ..spec
                    },
                    _ => spec,
                };
                ElementState::try_from(spec)?
            }
        };

        match key {
            Some(key) if key != state.name() => Err(StateError::NameMismatch {
                key: key.to_owned(),
                name: state.name().to_owned(),
            }),
            _ => Ok(state),
        }
    }
}

impl From<ElementState> for StateInput {
    fn from(state: ElementState) -> Self {
        Self::Existing(state)
    }
}

impl From<StateSpec> for StateInput {
    fn from(spec: StateSpec) -> Self {
        Self::Spec(spec)
    }
}

// ── ElementState ─────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StateSpec", into = "StateSpec")]
pub struct ElementState {
    name: StateName,
    value: bool,
    always_on: bool,
}

impl ElementState {
    pub fn new(name: impl Into<String>, value: bool, always_on: bool) -> Result<Self, StateError> {
        let name = StateName::new(name).map_err(|_err| StateError::EmptyName)?;
        Ok(Self {
            name,
            value: value || always_on,
            always_on,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.value
    }

    #[must_use]
    pub fn is_always_on(&self) -> bool {
        self.always_on
    }

    pub fn set_active(&mut self) {
        self.value = true;
    }

    pub fn set_inactive(&mut self) -> Outcome {
        if self.always_on {
            return Outcome::rejected(Rejection::PinnedDeactivate {
                name: self.name.to_string(),
            });
        }
        self.value = false;
        Outcome::Applied
    }

    pub fn toggle(&mut self) -> Outcome {
        if self.always_on {
            return Outcome::rejected(Rejection::PinnedToggle {
                name: self.name.to_string(),
            });
        }
        self.value = !self.value;
        Outcome::Applied
    }

    /// Pin or unpin the state.
    ///
    /// Pinning activates. Unpinning deactivates, which cannot be refused because
    /// the pin is already cleared.
    pub fn set_always_on(&mut self, always_on: bool) {
        self.always_on = always_on;
        if always_on {
            self.set_active();
        } else {
            let outcome = self.set_inactive();
            debug_assert!(outcome.is_applied());
        }
    }
}
