//! Domain-level error type used across services and infra.
//!
//! This error type is store- and transport-agnostic. The turn engine halts
//! the round on any variant except `UnauthorizedPlayer`, which is reported
//! and skipped.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Infra error kinds to distinguish operational failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    /// Store unreachable or command failed after retries.
    StoreUnavailable,
    /// A stored value could not be parsed; never coerced to a default.
    CorruptState,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input validation or game-rule violation
    Validation(String),
    /// Roll requested for a player outside the session roster
    UnauthorizedPlayer(String),
    /// Infrastructure/operational failures
    Infra(InfraErrorKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(d) => write!(f, "validation error: {d}"),
            DomainError::UnauthorizedPlayer(p) => {
                write!(f, "player '{p}' is not part of this game session")
            }
            DomainError::Infra(kind, d) => write!(f, "infra {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(detail: impl Into<String>) -> Self {
        Self::Validation(detail.into())
    }

    pub fn unauthorized_player(player: impl Into<String>) -> Self {
        Self::UnauthorizedPlayer(player.into())
    }

    pub fn store_unavailable(detail: impl Into<String>) -> Self {
        Self::Infra(InfraErrorKind::StoreUnavailable, detail.into())
    }

    pub fn corrupt_state(detail: impl Into<String>) -> Self {
        Self::Infra(InfraErrorKind::CorruptState, detail.into())
    }

    /// Whether this error should skip the current turn instead of halting
    /// the round.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::UnauthorizedPlayer(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_is_skippable() {
        assert!(DomainError::unauthorized_player("eve").is_unauthorized());
        assert!(!DomainError::store_unavailable("down").is_unauthorized());
        assert!(!DomainError::corrupt_state("bad int").is_unauthorized());
    }

    #[test]
    fn display_includes_detail() {
        let err = DomainError::corrupt_state("stored position is not an integer");
        assert!(err.to_string().contains("not an integer"));
    }
}
