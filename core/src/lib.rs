//! Core domain logic for Switchboard.
//!
//! [`StateController`] owns a set of named boolean states and enforces the
//! single-active rule across them. [`Switchboard`] is the same controller behind
//! on/off names.

mod controller;
pub mod errors;
mod switchboard;

pub use controller::StateController;
pub use errors::{ControllerError, ErrorKind};
pub use switchboard::Switchboard;

pub use switchboard_types::{
    ControllerOptions, ControllerPolicy, ElementState, InitialBulk, Multiplicity, Outcome,
    Rejection, StateError, StateInput, StateSpec,
};
