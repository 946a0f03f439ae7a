//! Game state and the bet ladder

use serde::{Deserialize, Serialize};

use crate::config::rules::{
    BET_INCREMENT, BET_STEP_THRESHOLD, COARSE_BET_INCREMENT, MAX_BET, MIN_BET, REEL_COUNT,
    STARTING_BALANCE, STARTING_BET,
};
use crate::error::SpinRejection;

/// Stepped bet limits
///
/// Below the threshold the bet moves in fine steps, at or above it in coarse
/// steps. Decrease uses the fine step down to and including the threshold so
/// that it exactly undoes an increase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BetLadder {
    pub min: u64,
    pub max: u64,
    pub fine_step: u64,
    pub coarse_step: u64,
    pub threshold: u64,
}

impl BetLadder {
    /// The game's ladder: 5..=100 by 5, then 200..=500 by 100
    pub const fn standard() -> Self {
        Self {
            min: MIN_BET,
            max: MAX_BET,
            fine_step: BET_INCREMENT,
            coarse_step: COARSE_BET_INCREMENT,
            threshold: BET_STEP_THRESHOLD,
        }
    }

    /// Next bet up, or None if it would pass the maximum or the balance
    pub fn increase(&self, bet: u64, balance: u64) -> Option<u64> {
        let step = if bet < self.threshold {
            self.fine_step
        } else {
            self.coarse_step
        };
        bet.checked_add(step)
            .filter(|&next| next <= self.max && next <= balance)
    }

    /// Next bet down, or None if it would pass the minimum
    pub fn decrease(&self, bet: u64) -> Option<u64> {
        let step = if bet <= self.threshold {
            self.fine_step
        } else {
            self.coarse_step
        };
        bet.checked_sub(step).filter(|&next| next >= self.min)
    }
}

impl Default for BetLadder {
    fn default() -> Self {
        Self::standard()
    }
}

/// Mutable game state, owned by the controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub balance: u64,
    pub bet: u64,
    pub spinning: bool,
    /// Stop index of each reel from the last spin
    pub reel_positions: Vec<usize>,
}

impl GameState {
    pub fn new(balance: u64, bet: u64) -> Self {
        Self {
            balance,
            bet,
            spinning: false,
            reel_positions: vec![0; REEL_COUNT],
        }
    }

    /// Precondition check for a spin
    pub fn can_spin(&self) -> Result<(), SpinRejection> {
        if self.spinning {
            return Err(SpinRejection::AlreadySpinning);
        }
        if self.balance < self.bet {
            return Err(SpinRejection::InsufficientBalance {
                balance: self.balance,
                bet: self.bet,
            });
        }
        Ok(())
    }

    /// Check if the current bet is affordable
    pub fn can_afford_bet(&self) -> bool {
        self.balance >= self.bet
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(STARTING_BALANCE, STARTING_BET)
    }
}
