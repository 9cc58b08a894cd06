//! The state controller.
//!
//! Owns every state by name and keeps `any_active` as a cached OR over them.
//! Under [`Multiplicity::Single`] no operation may leave two states active: any
//! step that could activate a state consults the multiplicity guard first and
//! fails without mutating when it would trip.

use std::collections::BTreeMap;

use switchboard_config::SwitchboardConfig;
use switchboard_types::{
    ControllerOptions, ControllerPolicy, ElementState, InitialBulk, Multiplicity, Outcome,
    Rejection, StateInput,
};

use crate::ControllerError;

/// Guard over an arbitrary cache value, so prospective collections can be checked too.
fn violates(multiplicity: Multiplicity, any_active: bool, would_be_active: bool) -> bool {
    would_be_active && any_active && !multiplicity.allows_multiple()
}

#[derive(Debug, Clone)]
pub struct StateController {
    states: BTreeMap<String, ElementState>,
    policy: ControllerPolicy,
    any_active: bool,
    construction_warnings: Vec<Rejection>,
}

impl StateController {
    /// Build a controller from keyed inputs.
    ///
    /// Options are resolved before any input is looked at. A spec without a name
    /// takes its key as the name; a named state or spec must match its key.
    pub fn new<I, K, S>(states: I, options: ControllerOptions) -> Result<Self, ControllerError>
    where
        I: IntoIterator<Item = (K, S)>,
        K: AsRef<str>,
        S: Into<StateInput>,
    {
        let policy = options.resolve()?;
        Self::with_policy(states, policy)
    }

    pub fn with_policy<I, K, S>(states: I, policy: ControllerPolicy) -> Result<Self, ControllerError>
    where
        I: IntoIterator<Item = (K, S)>,
        K: AsRef<str>,
        S: Into<StateInput>,
    {
        let mut controller = Self::empty(policy);
        for (key, input) in states {
            let state = input.into().resolve(Some(key.as_ref()))?;
            controller.insert(state)?;
        }

        controller.construction_warnings = match policy.initial() {
            InitialBulk::Keep => Vec::new(),
            InitialBulk::ActivateAll => {
                controller.activate_all().into_warning().into_iter().collect()
            }
            InitialBulk::DeactivateAll => controller.deactivate_all(),
        };
        Ok(controller)
    }

    #[must_use]
    pub fn empty(policy: ControllerPolicy) -> Self {
        Self {
            states: BTreeMap::new(),
            policy,
            any_active: false,
            construction_warnings: Vec::new(),
        }
    }

    pub fn from_config(config: SwitchboardConfig) -> Result<Self, ControllerError> {
        let (policy, states) = config.into_parts();
        Self::with_policy(states, policy)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub fn policy(&self) -> ControllerPolicy {
        self.policy
    }

    #[must_use]
    pub fn multiplicity(&self) -> Multiplicity {
        self.policy.multiplicity()
    }

    #[must_use]
    pub fn allows_multiple(&self) -> bool {
        self.multiplicity().allows_multiple()
    }

    /// Rejections raised by the initial bulk operation requested at construction.
    #[must_use]
    pub fn construction_warnings(&self) -> &[Rejection] {
        &self.construction_warnings
    }

    /// Cached: true iff at least one state is active.
    #[must_use]
    pub fn any_active(&self) -> bool {
        self.any_active
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.states.contains_key(name)
    }

    /// States in name order.
    pub fn iter(&self) -> impl Iterator<Item = &ElementState> {
        self.states.values()
    }

    #[must_use]
    pub fn active_names(&self) -> Vec<&str> {
        self.states
            .values()
            .filter(|state| state.is_active())
            .map(ElementState::name)
            .collect()
    }

    pub fn get(&self, name: &str) -> Result<&ElementState, ControllerError> {
        self.states
            .get(name)
            .ok_or_else(|| ControllerError::not_found(name))
    }

    fn get_mut(&mut self, name: &str) -> Result<&mut ElementState, ControllerError> {
        self.states
            .get_mut(name)
            .ok_or_else(|| ControllerError::not_found(name))
    }

    // =========================================================================
    // Multiplicity guard
    // =========================================================================

    /// Whether one more state may become active right now.
    #[must_use]
    pub fn allows_activation_now(&self) -> bool {
        !violates(self.multiplicity(), self.any_active, true)
    }

    #[must_use]
    pub fn violates_multiplicity(&self, would_be_active: bool) -> bool {
        violates(self.multiplicity(), self.any_active, would_be_active)
    }

    fn refresh_any_active(&mut self) {
        self.any_active = self.states.values().any(ElementState::is_active);
    }

    // =========================================================================
    // Insertion
    // =========================================================================

    /// The single insertion path. A state with the same name is replaced, and is
    /// put back if the newcomer trips the guard.
    fn insert(&mut self, state: ElementState) -> Result<(), ControllerError> {
        let replaced = self.states.remove(state.name());
        if replaced.is_some() {
            self.refresh_any_active();
        }

        let incoming_active = state.is_active();
        if self.violates_multiplicity(incoming_active) {
            if let Some(previous) = replaced {
                self.states.insert(previous.name().to_owned(), previous);
                self.refresh_any_active();
            }
            return Err(ControllerError::multiplicity(state.name()));
        }

        tracing::debug!(
            state = state.name(),
            active = incoming_active,
            replaced = replaced.is_some(),
            "state registered"
        );
        self.states.insert(state.name().to_owned(), state);
        self.any_active |= incoming_active;
        Ok(())
    }

    /// Add an existing state or build one from a spec. The spec must carry its name.
    pub fn add(&mut self, input: impl Into<StateInput>) -> Result<(), ControllerError> {
        let state = input.into().resolve(None)?;
        self.insert(state)
    }

    /// Like [`Self::add`], but registered as `name`: a spec without a name takes it,
    /// and a state or spec naming itself differently is rejected.
    pub fn add_named(
        &mut self,
        name: &str,
        input: impl Into<StateInput>,
    ) -> Result<(), ControllerError> {
        let state = input.into().resolve(Some(name))?;
        self.insert(state)
    }

    // =========================================================================
    // Per-name operations
    // =========================================================================

    /// Activating an already active state is a no-op and never trips the guard.
    pub fn activate(&mut self, name: &str) -> Result<(), ControllerError> {
        if self.get(name)?.is_active() {
            return Ok(());
        }
        if self.violates_multiplicity(true) {
            return Err(ControllerError::multiplicity(name));
        }
        self.get_mut(name)?.set_active();
        self.any_active = true;
        Ok(())
    }

    pub fn deactivate(&mut self, name: &str) -> Result<Outcome, ControllerError> {
        let outcome = self.get_mut(name)?.set_inactive();
        if outcome.is_applied() {
            self.refresh_any_active();
        }
        Ok(outcome)
    }

    /// Flip every unpinned state.
    ///
    /// All or nothing: the prospective collection is checked against the guard,
    /// in name order, before any state changes. Pinned states count as active.
    pub fn toggle(&mut self, name: &str) -> Result<Outcome, ControllerError> {
        if self.get(name)?.is_always_on() {
            return Ok(Outcome::rejected(Rejection::PinnedToggle {
                name: name.to_owned(),
            }));
        }

        let multiplicity = self.multiplicity();
        let mut prospective = self.states.values().any(ElementState::is_always_on);
        for state in self.states.values().filter(|state| !state.is_always_on()) {
            let flipped = !state.is_active();
            if violates(multiplicity, prospective, flipped) {
                return Err(ControllerError::multiplicity(state.name()));
            }
            prospective |= flipped;
        }

        for state in self.states.values_mut().filter(|state| !state.is_always_on()) {
            let outcome = state.toggle();
            debug_assert!(outcome.is_applied());
        }
        self.any_active = prospective;
        Ok(Outcome::Applied)
    }

    /// Pin or unpin a state.
    ///
    /// Pinning activates the state, so it is guarded like [`Self::activate`].
    /// Unpinning deactivates it.
    pub fn set_always_on(&mut self, name: &str, always_on: bool) -> Result<(), ControllerError> {
        let already_active = self.get(name)?.is_active();
        if always_on && !already_active && self.violates_multiplicity(true) {
            return Err(ControllerError::multiplicity(name));
        }

        self.get_mut(name)?.set_always_on(always_on);
        if always_on {
            self.any_active = true;
        } else {
            self.refresh_any_active();
        }
        Ok(())
    }

    // =========================================================================
    // Bulk operations
    // =========================================================================

    /// Refused outright under [`Multiplicity::Single`], whatever the state count.
    pub fn activate_all(&mut self) -> Outcome {
        if !self.allows_multiple() {
            return Outcome::rejected(Rejection::BulkActivateSingle);
        }
        for state in self.states.values_mut() {
            state.set_active();
        }
        self.any_active = !self.states.is_empty();
        tracing::debug!(count = self.states.len(), "activated all states");
        Outcome::Applied
    }

    /// Deactivate every state. Pinned states stay on; their rejections are returned.
    pub fn deactivate_all(&mut self) -> Vec<Rejection> {
        let rejections: Vec<Rejection> = self
            .states
            .values_mut()
            .filter_map(|state| state.set_inactive().into_warning())
            .collect();
        self.refresh_any_active();
        tracing::debug!(
            count = self.states.len(),
            pinned = rejections.len(),
            "deactivated all states"
        );
        rejections
    }
}
