//! Error types for the slot core

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a spin was refused
///
/// Refusals never mutate state; they are surfaced to the player as a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpinRejection {
    /// A spin is already in flight
    AlreadySpinning,
    /// Auto-spin owns the reels, waiting between its spins
    AutoSpinActive,
    /// Balance does not cover the current bet
    InsufficientBalance { balance: u64, bet: u64 },
}

impl SpinRejection {
    /// Player-facing message
    pub fn message(&self) -> &'static str {
        match self {
            SpinRejection::AlreadySpinning => "Spin already in progress!",
            SpinRejection::AutoSpinActive => "Auto spin is running!",
            SpinRejection::InsufficientBalance { .. } => "Insufficient balance!",
        }
    }
}

impl fmt::Display for SpinRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpinRejection::AlreadySpinning => write!(f, "spin already in progress"),
            SpinRejection::AutoSpinActive => write!(f, "auto spin is running"),
            SpinRejection::InsufficientBalance { balance, bet } => {
                write!(f, "balance {} does not cover bet {}", balance, bet)
            }
        }
    }
}

/// Slot core error types
#[derive(Error, Debug)]
pub enum SlotError {
    /// Spin refused by a precondition check
    #[error("Spin rejected: {0}")]
    Rejected(SpinRejection),

    /// Weight table unusable for drawing
    #[error("Invalid weight table: {reason}")]
    InvalidWeights { reason: String },

    /// Config file extension not understood
    #[error("Unsupported config format: {extension}")]
    UnsupportedConfigFormat { extension: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parse error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parse error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yml::Error),
}

/// Result type for slot operations
pub type SlotResult<T> = Result<T, SlotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_display() {
        let err = SlotError::Rejected(SpinRejection::InsufficientBalance { balance: 5, bet: 10 });
        assert_eq!(
            err.to_string(),
            "Spin rejected: balance 5 does not cover bet 10"
        );
        assert!(matches!(
            err,
            SlotError::Rejected(rejection) if rejection.message() == "Insufficient balance!"
        ));
    }
}
