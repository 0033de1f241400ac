//! Application layer managing state and business workflows.
//!
//! This module coordinates between the domain layer and presentation layer,
//! managing the calculator state, the tape and user interactions.

pub mod keypad;
pub mod state;

pub use keypad::*;
pub use state::*;
