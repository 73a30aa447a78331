//! coursedeck - Terminal Course Catalog Library
//!
//! Browse a course catalog with category filtering, sorting and pagination,
//! and register for a course through a validated form, all from the terminal.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
