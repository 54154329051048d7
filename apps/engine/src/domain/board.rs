//! Pure board-advance rules.
//!
//! These live in `domain` so the session service, the turn engine, and the
//! tests all share a single source of truth for how a roll moves a player.

use crate::domain::dice::Face;
use crate::domain::rules::{BOARD_SIZE, ENTRY_SQUARE};

/// A player's square, always within `0..=BOARD_SIZE`.
pub type Position = u16;

/// Starting square; players here may only enter the board on a maximum roll.
pub const START: Position = 0;

/// Where a player ends up after rolling `face` from `current`.
///
/// - From the start, only the maximum face moves the player (to the entry
///   square); any other face is a no-op.
/// - Otherwise the face is added; a sum past [`BOARD_SIZE`] forfeits the
///   move (overshoot is not capped).
///
/// The result never decreases and never leaves `0..=BOARD_SIZE`.
#[inline]
pub fn advance(current: Position, face: Face) -> Position {
    if current == START {
        if face.is_max() {
            return ENTRY_SQUARE;
        }
        return START;
    }

    let next = current + Position::from(face.value());
    if next > BOARD_SIZE {
        current
    } else {
        next
    }
}

/// Whether `position` is the winning square.
#[inline]
pub fn is_winning(position: Position) -> bool {
    position == BOARD_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn face(value: u8) -> Face {
        Face::new(value).unwrap()
    }

    #[test]
    fn start_requires_maximum_face() {
        for value in 1..=5 {
            assert_eq!(advance(START, face(value)), START);
        }
        assert_eq!(advance(START, face(6)), ENTRY_SQUARE);
    }

    #[test]
    fn normal_moves_add_the_face() {
        assert_eq!(advance(1, face(6)), 7);
        assert_eq!(advance(40, face(3)), 43);
        assert_eq!(advance(94, face(6)), 100);
    }

    #[test]
    fn overshoot_is_forfeited_not_capped() {
        // 98 + 5 = 103 > 100, so the move is lost entirely
        assert_eq!(advance(98, face(5)), 98);
        assert_eq!(advance(100, face(1)), 100);
        assert_eq!(advance(99, face(2)), 99);
    }

    #[test]
    fn exact_landing_wins() {
        assert_eq!(advance(95, face(5)), 100);
        assert!(is_winning(advance(95, face(5))));
        assert!(!is_winning(98));
    }

    #[test]
    fn advance_never_decreases() {
        for current in 0..=BOARD_SIZE {
            for value in 1..=6 {
                let next = advance(current, face(value));
                assert!(next >= current);
                assert!(next <= BOARD_SIZE);
            }
        }
    }
}
