//! Game session lifecycle: identity, registry deduplication, rolls, and
//! position state.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use ulid::Ulid;

use crate::domain::board::{advance, Position, START};
use crate::domain::dice::{DieRoller, Face};
use crate::domain::roster::Roster;
use crate::errors::domain::DomainError;
use crate::infra::keys;
use crate::infra::store::SessionStore;

/// One die cast, as appended to the session's roll log.
///
/// Observational only: gameplay never reads the log back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollRecord {
    pub player: String,
    pub face: Face,
}

/// One game's identity, roster, and position state over the shared store.
pub struct GameSession {
    session_id: String,
    roster: Roster,
    store: Arc<dyn SessionStore>,
    roller: Arc<dyn DieRoller>,
}

impl GameSession {
    /// Create a session for `roster`, or reattach to the existing one.
    ///
    /// The registry claim is a single atomic conditional write, so two
    /// processes constructing concurrently for the same roster converge on
    /// exactly one identity. Positions are initialized to 0 only when the
    /// claim wins; the resume path never touches them.
    pub async fn create_or_resume(
        store: Arc<dyn SessionStore>,
        roller: Arc<dyn DieRoller>,
        roster: Roster,
    ) -> Result<Self, DomainError> {
        let roster_key = roster.canonical_key();
        let candidate = format!("game_{}", Ulid::new());

        let claimed = store
            .set_field_if_absent(keys::ACTIVE_GAMES, &roster_key, &candidate)
            .await?;

        let session_id = if claimed {
            for player in roster.names() {
                store
                    .set_field(&keys::player_positions(&candidate), player, &START.to_string())
                    .await?;
            }
            info!(session_id = %candidate, players = %roster_key, "Game session created");
            candidate
        } else {
            let existing = store
                .get_field(keys::ACTIVE_GAMES, &roster_key)
                .await?
                .ok_or_else(|| {
                    DomainError::corrupt_state(format!(
                        "registry entry for '{roster_key}' absent after losing the creation race"
                    ))
                })?;

            if !store.exists(&keys::player_positions(&existing)).await? {
                // Valid state (all players still at 0), but worth surfacing.
                warn!(session_id = %existing, "Resumed session has no recorded positions");
            }
            info!(session_id = %existing, players = %roster_key, "Resuming existing game session");
            existing
        };

        Ok(Self {
            session_id,
            roster,
            store,
            roller,
        })
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Cast the die for `player` and append the roll to the session log.
    ///
    /// Does not move the player; see [`Self::update_position`].
    pub async fn roll_dice(&self, player: &str) -> Result<Face, DomainError> {
        if !self.roster.contains(player) {
            warn!(player, session_id = %self.session_id, "Player not allowed in this game");
            return Err(DomainError::unauthorized_player(player));
        }

        let face = self.roller.roll();
        let record = RollRecord {
            player: player.to_owned(),
            face,
        };
        let encoded = serde_json::to_string(&record).map_err(|err| {
            DomainError::Infra(
                crate::errors::domain::InfraErrorKind::Other("encode".to_string()),
                format!("failed to encode roll record: {err}"),
            )
        })?;

        self.store
            .append_to_list(&keys::die_casts(&self.session_id), &encoded)
            .await?;
        debug!(player, face = face.value(), session_id = %self.session_id, "Die cast");
        Ok(face)
    }

    /// The player's stored position, or 0 if none has been recorded.
    pub async fn current_position(&self, player: &str) -> Result<Position, DomainError> {
        let raw = self
            .store
            .get_field(&keys::player_positions(&self.session_id), player)
            .await?;

        match raw {
            None => Ok(START),
            Some(raw) => raw.parse::<Position>().map_err(|_| {
                DomainError::corrupt_state(format!(
                    "stored position for '{player}' is not an integer: '{raw}'"
                ))
            }),
        }
    }

    /// Apply one roll to the player's position under the board rules.
    ///
    /// Returns the resulting position. The write is skipped when the roll
    /// is a no-op (start without a maximum, or forfeited overshoot).
    pub async fn update_position(&self, player: &str, face: Face) -> Result<Position, DomainError> {
        let current = self.current_position(player).await?;
        let next = advance(current, face);

        if next != current {
            self.store
                .set_field(
                    &keys::player_positions(&self.session_id),
                    player,
                    &next.to_string(),
                )
                .await?;
        }
        debug!(
            player,
            face = face.value(),
            from = current,
            to = next,
            session_id = %self.session_id,
            "Position updated"
        );
        Ok(next)
    }
}
