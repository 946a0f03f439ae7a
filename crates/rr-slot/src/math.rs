//! Math — exact return of the weight and payout tables
//!
//! Every middle row is an independent weighted draw per reel, so the return
//! can be computed exactly by walking all `5^reels` rows. The "97% RTP" quoted
//! for this game is marketing; the standard tables actually return ~136%.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::paytable::evaluate_middle_row;
use crate::stats::SessionStats;
use crate::symbols::{PayoutTable, Symbol, WeightTable};

/// Contribution of one symbol to the return
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolReturn {
    pub symbol: Symbol,
    /// Probability this symbol is the paying winner
    pub hit_probability: f64,
    /// Expected payout per unit bet from this symbol
    pub rtp_contribution: f64,
}

/// Exact return profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnProfile {
    pub reel_count: usize,
    /// Middle rows enumerated
    pub combinations: u64,
    /// Expected payout per unit bet (stake not subtracted)
    pub rtp: f64,
    /// Probability a spin pays anything
    pub hit_rate: f64,
    /// Largest payout per unit bet
    pub max_multiplier: u64,
    pub by_symbol: Vec<SymbolReturn>,
}

impl ReturnProfile {
    /// Expected net change per unit bet
    pub fn house_edge(&self) -> f64 {
        1.0 - self.rtp
    }
}

/// Walk every middle row and sum probability-weighted payouts
pub fn theoretical_return(
    weights: &WeightTable,
    payouts: &PayoutTable,
    reel_count: usize,
) -> ReturnProfile {
    let mut by_symbol: Vec<SymbolReturn> = Symbol::ALL
        .iter()
        .map(|&symbol| SymbolReturn {
            symbol,
            hit_probability: 0.0,
            rtp_contribution: 0.0,
        })
        .collect();

    let mut rtp = 0.0;
    let mut hit_rate = 0.0;
    let mut max_multiplier = 0;
    let mut combinations = 0u64;

    // Odometer over symbol indices
    let mut digits = vec![0usize; reel_count];
    let mut row = vec![Symbol::ALL[0]; reel_count];
    loop {
        let mut probability = 1.0;
        for (slot, &digit) in row.iter_mut().zip(&digits) {
            *slot = Symbol::ALL[digit];
            probability *= weights.probability(*slot);
        }
        combinations += 1;

        if let Some(win) = evaluate_middle_row(&row, 1, payouts).win {
            let contribution = probability * win.amount as f64;
            rtp += contribution;
            hit_rate += probability;
            max_multiplier = max_multiplier.max(win.amount);

            let entry = &mut by_symbol[win.symbol.index()];
            entry.hit_probability += probability;
            entry.rtp_contribution += contribution;
        }

        let mut reel = 0;
        while reel < reel_count {
            digits[reel] += 1;
            if digits[reel] < Symbol::COUNT {
                break;
            }
            digits[reel] = 0;
            reel += 1;
        }
        if reel == reel_count {
            break;
        }
    }

    ReturnProfile {
        reel_count,
        combinations,
        rtp,
        hit_rate,
        max_multiplier,
        by_symbol,
    }
}

/// Play `spins` instant rounds (no timing, no balance limit)
pub fn simulate<R: Rng>(
    weights: &WeightTable,
    payouts: &PayoutTable,
    reel_count: usize,
    spins: u64,
    bet: u64,
    rng: &mut R,
) -> SessionStats {
    let mut stats = SessionStats::default();
    let mut row = Vec::with_capacity(reel_count);

    for _ in 0..spins {
        row.clear();
        row.extend((0..reel_count).map(|_| weights.draw(rng)));
        let evaluation = evaluate_middle_row(&row, bet, payouts);
        stats.record_spin(bet, evaluation.win.as_ref(), false);
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::config::rules::REEL_COUNT;

    #[test]
    fn test_standard_tables_return() {
        let profile = theoretical_return(&WeightTable::standard(), &PayoutTable::standard(), REEL_COUNT);

        assert_eq!(profile.combinations, 3125);
        assert_relative_eq!(profile.rtp, 1.361350784, epsilon = 1e-9);
        assert_relative_eq!(profile.hit_rate, 0.54304288, epsilon = 1e-9);
        assert_eq!(profile.max_multiplier, 400);
        assert!(profile.house_edge() < 0.0);

        let total: f64 = profile.by_symbol.iter().map(|s| s.rtp_contribution).sum();
        assert_relative_eq!(total, profile.rtp, epsilon = 1e-12);
    }

    #[test]
    fn test_three_reels_need_all_matching() {
        // With 3 reels only three of a kind pays: Σ p^3 × payout
        let weights = WeightTable::standard();
        let payouts = PayoutTable::standard();
        let profile = theoretical_return(&weights, &payouts, 3);

        let expected: f64 = Symbol::ALL
            .iter()
            .map(|&s| weights.probability(s).powi(3) * payouts.payout(s) as f64)
            .sum();
        assert_eq!(profile.combinations, 125);
        assert_relative_eq!(profile.rtp, expected, epsilon = 1e-12);
    }

    #[test]
    fn test_simulation_converges() {
        let weights = WeightTable::standard();
        let payouts = PayoutTable::standard();
        let mut rng = StdRng::seed_from_u64(2024);

        let stats = simulate(&weights, &payouts, REEL_COUNT, 200_000, 1, &mut rng);
        assert_eq!(stats.total_spins, 200_000);
        assert!((stats.rtp() - 1.3614).abs() < 0.05, "rtp {}", stats.rtp());
        assert!((stats.hit_rate() - 0.5430).abs() < 0.01, "hit {}", stats.hit_rate());
    }
}
