//! Die rolling against the operating-system entropy source.
//!
//! Fairness of roll outcomes is a player-facing guarantee, so the
//! production roller draws from the OS CSPRNG rather than a seeded
//! statistical generator.

use std::collections::VecDeque;
use std::fmt;

use parking_lot::Mutex;
use rand::rngs::OsRng;
use rand::TryRngCore;
use serde::{Deserialize, Serialize};

use crate::domain::rules::{MAX_FACE, MIN_FACE};
use crate::errors::domain::DomainError;

/// One face of the die, always within `MIN_FACE..=MAX_FACE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Face(u8);

impl Face {
    pub fn new(value: u8) -> Result<Self, DomainError> {
        if !(MIN_FACE..=MAX_FACE).contains(&value) {
            return Err(DomainError::validation(format!(
                "die face must be within {MIN_FACE}..={MAX_FACE}, got {value}"
            )));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Whether this is the maximum face, which grants an extra roll.
    pub fn is_max(self) -> bool {
        self.0 == MAX_FACE
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Produces one face per call. Stateless beyond consuming entropy.
pub trait DieRoller: Send + Sync {
    fn roll(&self) -> Face;
}

/// Rolls uniformly from the OS entropy source.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsDieRoller;

impl OsDieRoller {
    pub fn new() -> Self {
        Self
    }
}

impl DieRoller for OsDieRoller {
    fn roll(&self) -> Face {
        let faces = u32::from(MAX_FACE - MIN_FACE + 1);
        // Largest multiple of `faces` that fits in u32; draws at or above it
        // are discarded by rejection sampling to avoid modulo bias.
        let limit = u32::MAX - (u32::MAX % faces);

        loop {
            // An entropy-source failure is fatal to the process, not
            // recoverable locally.
            let x = OsRng
                .try_next_u32()
                .unwrap_or_else(|err| panic!("OS entropy source failed: {err}"));
            if x < limit {
                return Face(MIN_FACE + (x % faces) as u8);
            }
        }
    }
}

/// Replays a fixed script of faces, then panics when exhausted.
///
/// Used by tests and simulations that need fully determined rolls.
pub struct SequenceRoller {
    faces: Mutex<VecDeque<Face>>,
}

impl SequenceRoller {
    pub fn new(faces: impl IntoIterator<Item = Face>) -> Self {
        Self {
            faces: Mutex::new(faces.into_iter().collect()),
        }
    }

    /// Build a roller from raw face values; panics on an out-of-range value.
    pub fn of(values: &[u8]) -> Self {
        Self::new(values.iter().map(|&v| {
            Face::new(v).unwrap_or_else(|err| panic!("invalid scripted face: {err}"))
        }))
    }

    pub fn remaining(&self) -> usize {
        self.faces.lock().len()
    }
}

impl DieRoller for SequenceRoller {
    fn roll(&self) -> Face {
        self.faces
            .lock()
            .pop_front()
            .unwrap_or_else(|| panic!("scripted die roller exhausted"))
    }
}
