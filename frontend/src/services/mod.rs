//! Backend services.
//!
//! # Services
//!
//! - [`map`] - Filter options and filtered map from the evidence map backend

pub mod map;

pub use map::*;
