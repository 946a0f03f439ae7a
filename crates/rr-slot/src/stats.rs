//! Session statistics

use serde::{Deserialize, Serialize};

use crate::paytable::WinResult;
use crate::symbols::Symbol;

/// Running totals for one session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub total_spins: u64,
    pub rejected_spins: u64,
    pub total_bet: u64,
    pub total_win: u64,
    pub wins: u64,
    pub losses: u64,
    pub skipped_spins: u64,
    pub biggest_win: u64,
    /// Win count per symbol, in `Symbol::ALL` order
    pub wins_by_symbol: [u64; Symbol::COUNT],
}

impl SessionStats {
    /// Record a resolved spin
    pub fn record_spin(&mut self, bet: u64, win: Option<&WinResult>, skipped: bool) {
        self.total_spins += 1;
        self.total_bet += bet;
        if skipped {
            self.skipped_spins += 1;
        }

        match win {
            Some(win) => {
                self.wins += 1;
                self.total_win += win.amount;
                self.biggest_win = self.biggest_win.max(win.amount);
                self.wins_by_symbol[win.symbol.index()] += 1;
            }
            None => self.losses += 1,
        }
    }

    pub fn record_rejection(&mut self) {
        self.rejected_spins += 1;
    }

    /// Return to player as a ratio of won to wagered
    pub fn rtp(&self) -> f64 {
        if self.total_bet > 0 {
            self.total_win as f64 / self.total_bet as f64
        } else {
            0.0
        }
    }

    /// Fraction of spins that paid
    pub fn hit_rate(&self) -> f64 {
        if self.total_spins > 0 {
            self.wins as f64 / self.total_spins as f64
        } else {
            0.0
        }
    }

    /// Net change to the balance over the session
    pub fn net(&self) -> i128 {
        self.total_win as i128 - self.total_bet as i128
    }

    pub fn wins_for(&self, symbol: Symbol) -> u64 {
        self.wins_by_symbol[symbol.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn win(symbol: Symbol, amount: u64) -> WinResult {
        WinResult {
            symbol,
            match_count: 3,
            symbol_payout: 1,
            multiplier: 1,
            amount,
            winning_reels: vec![0, 1, 2],
        }
    }

    #[test]
    fn test_empty_stats() {
        let stats = SessionStats::default();
        assert_eq!(stats.rtp(), 0.0);
        assert_eq!(stats.hit_rate(), 0.0);
        assert_eq!(stats.net(), 0);
    }

    #[test]
    fn test_record_spins() {
        let mut stats = SessionStats::default();
        stats.record_spin(10, Some(&win(Symbol::Coin, 10)), false);
        stats.record_spin(10, None, true);
        stats.record_spin(10, Some(&win(Symbol::Axe, 300)), false);
        stats.record_spin(10, None, false);
        stats.record_rejection();

        assert_eq!(stats.total_spins, 4);
        assert_eq!(stats.rejected_spins, 1);
        assert_eq!(stats.skipped_spins, 1);
        assert_eq!(stats.wins, 2);
        assert_eq!(stats.losses, 2);
        assert_eq!(stats.biggest_win, 300);
        assert_eq!(stats.wins_for(Symbol::Axe), 1);
        assert_eq!(stats.wins_for(Symbol::Book), 0);
        assert_eq!(stats.net(), 310 - 40);
        assert_relative_eq!(stats.rtp(), 310.0 / 40.0);
        assert_relative_eq!(stats.hit_rate(), 0.5);
    }
}
