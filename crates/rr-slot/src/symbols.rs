//! Symbol definitions, weight and payout tables

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{SlotError, SlotResult};

/// A reel symbol
///
/// Declaration order is the enumeration order used by the weighted draw and
/// by every per-symbol table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Symbol {
    Coin = 0,
    Sword = 1,
    Shield = 2,
    Axe = 3,
    Book = 4,
}

impl Symbol {
    /// Number of distinct symbols
    pub const COUNT: usize = 5;

    /// All symbols in enumeration order
    pub const ALL: [Symbol; Symbol::COUNT] = [
        Symbol::Coin,
        Symbol::Sword,
        Symbol::Shield,
        Symbol::Axe,
        Symbol::Book,
    ];

    /// Lowercase symbol name, also the image file stem
    pub fn name(&self) -> &'static str {
        match self {
            Symbol::Coin => "coin",
            Symbol::Sword => "sword",
            Symbol::Shield => "shield",
            Symbol::Axe => "axe",
            Symbol::Book => "book",
        }
    }

    /// Parse a symbol name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.name() == name)
    }

    /// Position in enumeration order
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Image path by convention: `<dir>/<name>.<ext>`
    pub fn image_path(&self, dir: &str, ext: &str) -> String {
        if dir.is_empty() {
            format!("{}.{}", self.name(), ext)
        } else {
            format!("{}/{}.{}", dir.trim_end_matches('/'), self.name(), ext)
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-symbol draw weights
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightTable {
    weights: [u32; Symbol::COUNT],
}

impl WeightTable {
    /// Build a table; every weight must be positive
    pub fn new(weights: [u32; Symbol::COUNT]) -> SlotResult<Self> {
        if let Some(symbol) = Symbol::ALL.into_iter().find(|s| weights[s.index()] == 0) {
            return Err(SlotError::InvalidWeights {
                reason: format!("weight for '{}' must be positive", symbol),
            });
        }
        if weights.iter().try_fold(0u32, |acc, &w| acc.checked_add(w)).is_none() {
            return Err(SlotError::InvalidWeights {
                reason: "total weight overflows".into(),
            });
        }
        Ok(Self { weights })
    }

    /// Standard weights: coin 40, sword 30, shield 20, axe 8, book 2
    pub fn standard() -> Self {
        Self {
            weights: [40, 30, 20, 8, 2],
        }
    }

    /// Weight of a symbol
    pub fn weight(&self, symbol: Symbol) -> u32 {
        self.weights[symbol.index()]
    }

    /// Sum of all weights
    pub fn total(&self) -> u32 {
        self.weights.iter().sum()
    }

    /// Draw probability of a symbol
    pub fn probability(&self, symbol: Symbol) -> f64 {
        self.weight(symbol) as f64 / self.total() as f64
    }

    /// Draw one symbol
    ///
    /// Subtracts weights in enumeration order from a uniform draw over the
    /// total until the remainder reaches zero.
    pub fn draw<R: Rng>(&self, rng: &mut R) -> Symbol {
        let total = self.total();
        if total == 0 {
            return Symbol::ALL[0];
        }
        let mut remaining = rng.random_range(1..=total) as i64;

        for symbol in Symbol::ALL {
            remaining -= self.weight(symbol) as i64;
            if remaining <= 0 {
                return symbol;
            }
        }

        Symbol::ALL[0]
    }

    /// Draw `N` independent symbols
    pub fn draw_many<const N: usize, R: Rng>(&self, rng: &mut R) -> [Symbol; N] {
        std::array::from_fn(|_| self.draw(rng))
    }
}

impl Default for WeightTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Per-symbol bet multipliers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutTable {
    payouts: [u64; Symbol::COUNT],
}

impl PayoutTable {
    /// Standard payouts: coin 1, sword 2, shield 4, axe 10, book 50
    pub fn standard() -> Self {
        Self {
            payouts: [1, 2, 4, 10, 50],
        }
    }

    /// Build a custom payout table
    pub fn new(payouts: [u64; Symbol::COUNT]) -> Self {
        Self { payouts }
    }

    /// Bet multiplier for a symbol
    pub fn payout(&self, symbol: Symbol) -> u64 {
        self.payouts[symbol.index()]
    }
}

impl Default for PayoutTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_symbol_names_round_trip() {
        for symbol in Symbol::ALL {
            assert_eq!(Symbol::from_name(symbol.name()), Some(symbol));
        }
        assert_eq!(Symbol::from_name("cherry"), None);
    }

    #[test]
    fn test_image_path_convention() {
        assert_eq!(Symbol::Axe.image_path("./img", "png"), "./img/axe.png");
        assert_eq!(Symbol::Book.image_path("img/", "webp"), "img/book.webp");
        assert_eq!(Symbol::Coin.image_path("", "png"), "coin.png");
    }

    #[test]
    fn test_standard_tables() {
        let weights = WeightTable::standard();
        assert_eq!(weights.total(), 100);
        assert_eq!(weights.weight(Symbol::Book), 2);

        let payouts = PayoutTable::standard();
        assert_eq!(payouts.payout(Symbol::Coin), 1);
        assert_eq!(payouts.payout(Symbol::Axe), 10);
        assert_eq!(payouts.payout(Symbol::Book), 50);
    }

    #[test]
    fn test_zero_weight_rejected() {
        let err = WeightTable::new([10, 0, 5, 5, 5]).unwrap_err();
        assert!(err.to_string().contains("sword"));
    }

    #[test]
    fn test_single_heavy_symbol_always_drawn_first() {
        // Coin carries nearly all of the weight
        let table = WeightTable::new([u32::MAX - 4, 1, 1, 1, 1]).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let coins = (0..1000)
            .filter(|_| table.draw(&mut rng) == Symbol::Coin)
            .count();
        assert!(coins >= 999);
    }

    #[test]
    fn test_draw_converges_to_weights() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let draws = 50_000;

        for table in [
            WeightTable::standard(),
            WeightTable::new([1, 1, 1, 1, 1]).unwrap(),
            WeightTable::new([3, 7, 11, 13, 66]).unwrap(),
        ] {
            let mut counts = [0usize; Symbol::COUNT];
            for _ in 0..draws {
                counts[table.draw(&mut rng).index()] += 1;
            }
            for symbol in Symbol::ALL {
                let observed = counts[symbol.index()] as f64 / draws as f64;
                let expected = table.probability(symbol);
                assert!(
                    (observed - expected).abs() < 0.01,
                    "{}: observed {:.4}, expected {:.4}",
                    symbol,
                    observed,
                    expected
                );
            }
        }
    }
}
