//! Core business logic for laurel.

pub mod services;

pub use services::*;
