//! Error types for the match layer. None of these are fatal: callers log and
//! carry on.

use thiserror::Error;

use crate::rules::{Deferred, Phase};

/// A rule command that does not apply in the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("cannot {command} during {phase:?}")]
    InvalidTransition { command: &'static str, phase: Phase },

    #[error("ball {0} is not on the table")]
    UnknownBallId(u8),

    #[error("stale {0:?} callback ignored")]
    StaleTimer(Deferred),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("no ball with id {0}")]
    NotFound(u8),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid match config: {0}")]
    Parse(#[from] serde_json::Error),
}
