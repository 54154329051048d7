#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod infra;
pub mod services;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use domain::dice::{DieRoller, Face, OsDieRoller, SequenceRoller};
pub use domain::roster::Roster;
pub use error::AppError;
pub use errors::domain::DomainError;
pub use infra::memory::InMemorySessionStore;
pub use infra::redis::RedisSessionStore;
pub use infra::store::SessionStore;
pub use services::session::{GameSession, RollRecord};
pub use services::turn_flow::{start_game, RoundEnd, RoundOutcome, TurnEngine};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
