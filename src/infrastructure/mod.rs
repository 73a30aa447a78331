//! Infrastructure layer providing external service integrations.
//!
//! This module contains the course data sources, the background loader,
//! command-line configuration and log setup.

pub mod source;
pub mod config;
pub mod logging;

pub use source::*;
pub use config::*;
pub use logging::*;
