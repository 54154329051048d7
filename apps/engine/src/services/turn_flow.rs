//! Turn orchestration: rotation over active players, the maximum-face
//! bonus chain, win detection, and round termination.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::domain::board::{is_winning, Position};
use crate::domain::dice::DieRoller;
use crate::domain::roster::Roster;
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::infra::store::SessionStore;
use crate::services::session::GameSession;

/// How a round ended.
#[derive(Debug, Clone, PartialEq)]
pub enum RoundEnd {
    /// The active set shrank to one player. They are the remaining
    /// competitor and are not appended to the podium.
    Decided { remaining: String },
    /// External cancellation; state reflects the turns completed so far.
    Cancelled,
    /// A non-recoverable error halted the round cleanly.
    Faulted { error: DomainError },
}

/// The reportable result of driving one round.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundOutcome {
    /// Finishers in finishing order, earliest first.
    pub podium: Vec<String>,
    /// Player turns completed (a bonus chain counts as one turn).
    pub cycles_played: u64,
    pub end: RoundEnd,
}

/// Drives one session until a termination condition.
pub struct TurnEngine {
    session: GameSession,
    /// Active players in canonical order; doubles as the rotation.
    active: Vec<String>,
    cursor: usize,
    podium: Vec<String>,
    cycles_played: u64,
}

impl TurnEngine {
    pub fn new(session: GameSession) -> Self {
        let active = session.roster().names().to_vec();
        Self {
            session,
            active,
            cursor: 0,
            podium: Vec::new(),
            cycles_played: 0,
        }
    }

    /// Run turns until one active player remains, cancellation fires, or a
    /// non-recoverable error halts the round.
    pub async fn run(mut self, cancel: CancellationToken) -> RoundOutcome {
        loop {
            if self.active.len() <= 1 {
                let remaining = self.active.first().cloned().unwrap_or_default();
                info!(
                    session_id = %self.session.session_id(),
                    remaining = %remaining,
                    cycles = self.cycles_played,
                    "Round decided"
                );
                return self.into_outcome(RoundEnd::Decided { remaining });
            }

            if cancel.is_cancelled() {
                info!(
                    session_id = %self.session.session_id(),
                    cycles = self.cycles_played,
                    "Round cancelled"
                );
                return self.into_outcome(RoundEnd::Cancelled);
            }

            let player = self.active[self.cursor].clone();
            match self.play_turn(&player).await {
                Ok(position) => {
                    self.cycles_played += 1;
                    if is_winning(position) {
                        self.record_winner(&player);
                    } else {
                        self.cursor = (self.cursor + 1) % self.active.len();
                    }
                }
                Err(err) if err.is_unauthorized() => {
                    // Recoverable: report and move on to the next player.
                    warn!(player = %player, error = %err, "Skipping turn");
                    self.cursor = (self.cursor + 1) % self.active.len();
                }
                Err(err) => {
                    error!(
                        session_id = %self.session.session_id(),
                        player = %player,
                        error = %err,
                        cycles = self.cycles_played,
                        "Halting round"
                    );
                    return self.into_outcome(RoundEnd::Faulted { error: err });
                }
            }
        }
    }

    /// One player's full turn: roll and apply, repeating for as long as
    /// maximum faces keep coming. Returns the position after the chain.
    async fn play_turn(&self, player: &str) -> Result<Position, DomainError> {
        let mut distance = 0u32;
        loop {
            let face = self.session.roll_dice(player).await?;
            let position = self.session.update_position(player, face).await?;
            distance += u32::from(face.value());

            if !face.is_max() {
                debug!(player, position, distance_rolled = distance, "Turn complete");
                return Ok(position);
            }
            debug!(player, position, "Maximum face rolled, extra roll");
        }
    }

    /// Append the winner to the podium and re-derive the rotation from the
    /// reduced active set.
    fn record_winner(&mut self, player: &str) {
        info!(
            session_id = %self.session.session_id(),
            player,
            place = self.podium.len() + 1,
            "Player finished"
        );
        self.podium.push(player.to_owned());

        let index = self
            .active
            .iter()
            .position(|name| name == player)
            .unwrap_or(self.cursor);
        self.active.remove(index);
        self.cursor = if self.active.is_empty() {
            0
        } else {
            index % self.active.len()
        };
    }

    fn into_outcome(self, end: RoundEnd) -> RoundOutcome {
        RoundOutcome {
            podium: self.podium,
            cycles_played: self.cycles_played,
            end,
        }
    }
}

/// Construct-or-resume the session for `roster` and drive it to
/// termination. This is the entry point consumed by drivers.
pub async fn start_game(
    store: Arc<dyn SessionStore>,
    roller: Arc<dyn DieRoller>,
    roster: Roster,
    cancel: CancellationToken,
) -> Result<RoundOutcome, AppError> {
    let session = GameSession::create_or_resume(store, roller, roster).await?;
    Ok(TurnEngine::new(session).run(cancel).await)
}
