//! Fixed board and die parameters.

/// Highest square on the board; reaching it exactly wins.
pub const BOARD_SIZE: u16 = 100;

/// Square a player lands on when leaving the start with a maximum roll.
pub const ENTRY_SQUARE: u16 = 1;

/// Lowest die face.
pub const MIN_FACE: u8 = 1;

/// Highest die face; rolling it grants an immediate extra roll.
pub const MAX_FACE: u8 = 6;

/// Separator used in the canonical roster encoding. Player names must
/// never contain it.
pub const PLAYER_NAME_SEPARATOR: char = ':';

// The entry rule only makes sense on a board larger than the entry square.
const _: () = assert!(BOARD_SIZE > ENTRY_SQUARE);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_range_is_a_standard_die() {
        assert_eq!(MIN_FACE, 1);
        assert_eq!(MAX_FACE, 6);
    }
}
