//! Store key layout, namespaced by session identity.

/// Fixed global registry key: canonical roster encoding -> session identity.
pub const ACTIVE_GAMES: &str = "ACTIVE_GAMES";

/// Append-only roll log for one session.
pub fn die_casts(session_id: &str) -> String {
    format!("{session_id}:DIE_CASTS")
}

/// Player position mapping for one session.
pub fn player_positions(session_id: &str) -> String {
    format!("{session_id}:PLAYER_POSITIONS")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_namespaced_by_session() {
        assert_eq!(die_casts("game_01J"), "game_01J:DIE_CASTS");
        assert_eq!(player_positions("game_01J"), "game_01J:PLAYER_POSITIONS");
    }
}
