//! Reel — strip, spin status and the stopped window

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::rules::{MIDDLE_ROW, STRIP_LENGTH, VISIBLE_ROWS};
use crate::symbols::{Symbol, WeightTable};

/// Reel status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReelStatus {
    /// Never spun
    Idle,
    /// Animating
    Spinning,
    /// Stopped on a drawn window
    Settled,
}

/// Record of a single reel stop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReelStop {
    pub reel_index: u8,
    /// Strip index the middle row lands on
    pub stop_index: usize,
    /// Drawn window, top to bottom
    pub symbols: [Symbol; VISIBLE_ROWS],
    /// Strip slots showing top/middle/bottom; None where the strip ends
    pub slots: [Option<usize>; VISIBLE_ROWS],
}

/// One reel
///
/// The strip is decorative: it is rolled once and only feeds the spinning
/// animation. Every stop draws a fresh window, and that window is the only
/// thing win evaluation ever reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reel {
    index: u8,
    strip: Vec<Symbol>,
    stopped: Option<[Symbol; VISIBLE_ROWS]>,
    stop_index: Option<usize>,
    status: ReelStatus,
    highlighted: bool,
}

impl Reel {
    /// Create a reel with a freshly rolled strip
    pub fn new<R: Rng>(index: u8, weights: &WeightTable, rng: &mut R) -> Self {
        let strip = (0..STRIP_LENGTH).map(|_| weights.draw(rng)).collect();
        Self::with_strip(index, strip)
    }

    /// Create a reel from an explicit strip
    pub fn with_strip(index: u8, strip: Vec<Symbol>) -> Self {
        Self {
            index,
            strip,
            stopped: None,
            stop_index: None,
            status: ReelStatus::Idle,
            highlighted: false,
        }
    }

    pub fn index(&self) -> u8 {
        self.index
    }

    pub fn strip(&self) -> &[Symbol] {
        &self.strip
    }

    pub fn status(&self) -> ReelStatus {
        self.status
    }

    pub fn stop_index(&self) -> Option<usize> {
        self.stop_index
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    /// Start animating; symbols are untouched
    pub fn spin(&mut self) {
        self.status = ReelStatus::Spinning;
    }

    /// Stop on `target_index`, drawing a fresh window
    pub fn stop<R: Rng>(&mut self, target_index: usize, weights: &WeightTable, rng: &mut R) -> ReelStop {
        let symbols = weights.draw_many::<VISIBLE_ROWS, _>(rng);
        self.settle(target_index, symbols)
    }

    /// Stop with a fixed middle symbol; top and bottom are still drawn
    pub fn stop_forced<R: Rng>(
        &mut self,
        target_index: usize,
        middle: Symbol,
        weights: &WeightTable,
        rng: &mut R,
    ) -> ReelStop {
        let mut symbols = weights.draw_many::<VISIBLE_ROWS, _>(rng);
        symbols[MIDDLE_ROW] = middle;
        self.settle(target_index, symbols)
    }

    fn settle(&mut self, target_index: usize, symbols: [Symbol; VISIBLE_ROWS]) -> ReelStop {
        self.stopped = Some(symbols);
        self.stop_index = Some(target_index);
        self.status = ReelStatus::Settled;

        ReelStop {
            reel_index: self.index,
            stop_index: target_index,
            symbols,
            slots: self.window_slots(target_index),
        }
    }

    /// Strip slots around `target_index`; slots past either end are None
    pub fn window_slots(&self, target_index: usize) -> [Option<usize>; VISIBLE_ROWS] {
        let len = self.strip.len();
        let slot = |index: Option<usize>| index.filter(|&i| i < len);
        [
            slot(target_index.checked_sub(1)),
            slot(Some(target_index)),
            slot(target_index.checked_add(1)),
        ]
    }

    /// Visible window, top to bottom
    ///
    /// Before the first stop this falls back to the head of the strip.
    pub fn visible_symbols(&self) -> [Symbol; VISIBLE_ROWS] {
        if let Some(stopped) = self.stopped {
            return stopped;
        }
        std::array::from_fn(|row| self.strip.get(row).copied().unwrap_or(Symbol::ALL[0]))
    }

    /// Symbol on the win row
    pub fn middle_symbol(&self) -> Symbol {
        self.visible_symbols()[MIDDLE_ROW]
    }

    pub fn highlight_win(&mut self) {
        self.highlighted = true;
    }

    pub fn clear_highlight(&mut self) {
        self.highlighted = false;
    }
}
