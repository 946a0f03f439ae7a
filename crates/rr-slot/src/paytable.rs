//! Middle-row win evaluation

use serde::{Deserialize, Serialize};

use crate::config::rules::MIN_MATCH;
use crate::symbols::{PayoutTable, Symbol};

/// Bet multiplier for a match count: 3 → 1, 4 → 3, 5+ → 8, otherwise 0
pub fn match_multiplier(match_count: u8) -> u64 {
    match match_count {
        0..=2 => 0,
        3 => 1,
        4 => 3,
        _ => 8,
    }
}

/// A paying result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinResult {
    /// Winning symbol
    pub symbol: Symbol,
    /// Number of reels showing it on the middle row
    pub match_count: u8,
    /// Payout table entry for the symbol
    pub symbol_payout: u64,
    /// Match-count multiplier
    pub multiplier: u64,
    /// bet × symbol_payout × multiplier
    pub amount: u64,
    /// Reels whose middle symbol is the winner
    pub winning_reels: Vec<u8>,
}

/// Outcome of evaluating a middle row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Most frequent symbol (first to reach the top count wins ties)
    pub best_symbol: Option<Symbol>,
    /// Its count
    pub best_count: u8,
    /// Paying result, if the count reached the minimum
    pub win: Option<WinResult>,
}

impl Evaluation {
    /// Check if this is a winning spin
    pub fn is_win(&self) -> bool {
        self.win.is_some()
    }

    /// Credited amount (0 on a loss)
    pub fn win_amount(&self) -> u64 {
        self.win.as_ref().map_or(0, |w| w.amount)
    }
}

/// Tally a middle row
///
/// Counts are kept in order of first appearance, and only a strictly higher
/// count displaces the current best.
pub fn tally(middle_row: &[Symbol]) -> (Option<Symbol>, u8) {
    let mut counts: Vec<(Symbol, u8)> = Vec::with_capacity(Symbol::COUNT);
    for &symbol in middle_row {
        match counts.iter_mut().find(|(s, _)| *s == symbol) {
            Some((_, count)) => *count += 1,
            None => counts.push((symbol, 1)),
        }
    }

    let mut best: Option<Symbol> = None;
    let mut best_count = 0u8;
    for (symbol, count) in counts {
        if count > best_count {
            best = Some(symbol);
            best_count = count;
        }
    }

    (best, best_count)
}

/// Evaluate a middle row against the payout table
pub fn evaluate_middle_row(middle_row: &[Symbol], bet: u64, payouts: &PayoutTable) -> Evaluation {
    let (best_symbol, best_count) = tally(middle_row);

    let win = best_symbol
        .filter(|_| best_count >= MIN_MATCH)
        .map(|symbol| {
            let symbol_payout = payouts.payout(symbol);
            let multiplier = match_multiplier(best_count);
            let winning_reels = middle_row
                .iter()
                .enumerate()
                .filter(|(_, s)| **s == symbol)
                .map(|(reel, _)| reel as u8)
                .collect();

            WinResult {
                symbol,
                match_count: best_count,
                symbol_payout,
                multiplier,
                amount: bet.saturating_mul(symbol_payout).saturating_mul(multiplier),
                winning_reels,
            }
        });

    Evaluation {
        best_symbol,
        best_count,
        win,
    }
}
