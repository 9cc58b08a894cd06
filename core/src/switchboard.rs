//! On/off vocabulary over [`StateController`].
//!
//! Same rules, switch-flavoured names: `on`/`off` for activate/deactivate and
//! `on_all`/`off_all` for the bulk operations.

use switchboard_types::{ControllerOptions, ElementState, Outcome, Rejection, StateInput};

use crate::{ControllerError, StateController};

#[derive(Debug, Clone)]
pub struct Switchboard {
    controller: StateController,
}

impl Switchboard {
    pub fn new<I, K, S>(switches: I, options: ControllerOptions) -> Result<Self, ControllerError>
    where
        I: IntoIterator<Item = (K, S)>,
        K: AsRef<str>,
        S: Into<StateInput>,
    {
        StateController::new(switches, options).map(Self::from)
    }

    #[must_use]
    pub fn controller(&self) -> &StateController {
        &self.controller
    }

    pub fn switch(&self, name: &str) -> Result<&ElementState, ControllerError> {
        self.controller.get(name)
    }

    pub fn is_on(&self, name: &str) -> Result<bool, ControllerError> {
        self.controller.get(name).map(ElementState::is_active)
    }

    pub fn is_always_on(&self, name: &str) -> Result<bool, ControllerError> {
        self.controller.get(name).map(ElementState::is_always_on)
    }

    pub fn add_switch(
        &mut self,
        name: &str,
        switch: impl Into<StateInput>,
    ) -> Result<(), ControllerError> {
        self.controller.add_named(name, switch)
    }

    pub fn on(&mut self, name: &str) -> Result<(), ControllerError> {
        self.controller.activate(name)
    }

    pub fn off(&mut self, name: &str) -> Result<Outcome, ControllerError> {
        self.controller.deactivate(name)
    }

    pub fn toggle(&mut self, name: &str) -> Result<Outcome, ControllerError> {
        self.controller.toggle(name)
    }

    pub fn on_all(&mut self) -> Outcome {
        self.controller.activate_all()
    }

    pub fn off_all(&mut self) -> Vec<Rejection> {
        self.controller.deactivate_all()
    }
}

impl From<StateController> for Switchboard {
    fn from(controller: StateController) -> Self {
        Self { controller }
    }
}
