//! Error handling for the engine.

pub mod domain;

pub use domain::DomainError;
