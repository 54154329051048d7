//! Domain layer: pure game logic types and helpers.

pub mod board;
pub mod dice;
pub mod roster;
pub mod rules;

// Re-exports for ergonomics
pub use board::{advance, is_winning, Position, START};
pub use dice::{DieRoller, Face, OsDieRoller, SequenceRoller};
pub use roster::Roster;
pub use rules::{BOARD_SIZE, ENTRY_SQUARE, MAX_FACE, PLAYER_NAME_SEPARATOR};
