//! Application layer managing state and user workflows.
//!
//! This module coordinates between the domain layer and presentation layer:
//! the catalog manager, the registration state machine and the overall
//! interaction state of the terminal interface.

pub mod catalog;
pub mod registration;
pub mod state;

pub use catalog::*;
pub use registration::*;
pub use state::*;
