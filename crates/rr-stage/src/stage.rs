//! Stage — The enum defining every moment a presenter can react to
//!
//! A Stage is NOT a rendering instruction and NOT an engine call.
//! A Stage is the SEMANTIC MEANING of a moment in the game flow.

use serde::{Deserialize, Serialize};

/// Canonical game stage
///
/// Symbols travel as their lowercase names (`"coin"`, `"book"`, ...) so the
/// vocabulary stays independent of the engine's types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Stage {
    // ═══════════════════════════════════════════════════════════════════════
    // SPIN LIFECYCLE
    // ═══════════════════════════════════════════════════════════════════════
    /// Spin accepted and paid for
    SpinStart {
        /// Spin identifier within the session
        spin_id: String,
        /// Wager deducted for this spin
        bet: u64,
        /// Balance after the deduction
        balance: u64,
    },

    /// Reel started animating
    ReelSpinning {
        /// Which reel (0-indexed)
        reel_index: u8,
    },

    /// Reel settled on freshly drawn symbols
    ReelStop {
        /// Which reel stopped (0-indexed)
        reel_index: u8,
        /// Strip index the middle row lands on
        stop_index: usize,
        /// Visible symbols, top to bottom
        #[serde(default)]
        symbols: Vec<String>,
        /// Strip slots updated for top/middle/bottom (None = slot missing)
        #[serde(default)]
        slots: Vec<Option<usize>>,
    },

    /// All reels stopped, wins being evaluated
    EvaluateWins {
        /// Middle symbol of each reel, left to right
        #[serde(default)]
        middle_row: Vec<String>,
    },

    /// Spin complete, ready for next spin
    SpinEnd {
        /// Balance after resolution
        balance: u64,
    },

    /// Spin refused before anything changed
    SpinRejected {
        /// Human-readable reason
        reason: String,
    },

    // ═══════════════════════════════════════════════════════════════════════
    // WIN LIFECYCLE
    // ═══════════════════════════════════════════════════════════════════════
    /// Win celebration starting
    WinPresent {
        /// Winning symbol
        symbol: String,
        /// How many middle symbols matched
        match_count: u8,
        /// Amount credited
        win_amount: u64,
    },

    /// Reel highlight toggled
    ReelHighlight {
        /// Which reel
        reel_index: u8,
        /// Highlight on or off
        on: bool,
    },

    /// Win presentation expired (highlights and win styling removed)
    WinClear,

    /// Spin resolved without a win
    NoWin,

    // ═══════════════════════════════════════════════════════════════════════
    // UI
    // ═══════════════════════════════════════════════════════════════════════
    /// Balance / bet readouts changed
    Display {
        balance: u64,
        bet: u64,
    },

    /// Message readout changed (empty text clears it)
    Message {
        text: String,
    },

    /// Spin / skip affordances swapped
    SpinControls {
        /// True while the skip action replaces the spin action
        skip_enabled: bool,
    },

    /// Auto-spin switched on or off
    AutoSpinChanged {
        enabled: bool,
    },

    /// User asked to collapse the remaining reel cascade
    SkipRequested,
}

impl Stage {
    /// Get stage category
    pub fn category(&self) -> StageCategory {
        match self {
            Stage::SpinStart { .. }
            | Stage::ReelSpinning { .. }
            | Stage::ReelStop { .. }
            | Stage::EvaluateWins { .. }
            | Stage::SpinEnd { .. }
            | Stage::SpinRejected { .. } => StageCategory::SpinLifecycle,

            Stage::WinPresent { .. }
            | Stage::ReelHighlight { .. }
            | Stage::WinClear
            | Stage::NoWin => StageCategory::WinLifecycle,

            Stage::Display { .. }
            | Stage::Message { .. }
            | Stage::SpinControls { .. }
            | Stage::AutoSpinChanged { .. }
            | Stage::SkipRequested => StageCategory::UI,
        }
    }

    /// Get stage type name (matches the serialized tag)
    pub fn type_name(&self) -> &'static str {
        match self {
            Stage::SpinStart { .. } => "spin_start",
            Stage::ReelSpinning { .. } => "reel_spinning",
            Stage::ReelStop { .. } => "reel_stop",
            Stage::EvaluateWins { .. } => "evaluate_wins",
            Stage::SpinEnd { .. } => "spin_end",
            Stage::SpinRejected { .. } => "spin_rejected",
            Stage::WinPresent { .. } => "win_present",
            Stage::ReelHighlight { .. } => "reel_highlight",
            Stage::WinClear => "win_clear",
            Stage::NoWin => "no_win",
            Stage::Display { .. } => "display",
            Stage::Message { .. } => "message",
            Stage::SpinControls { .. } => "spin_controls",
            Stage::AutoSpinChanged { .. } => "auto_spin_changed",
            Stage::SkipRequested => "skip_requested",
        }
    }
}

/// Stage category for grouping and filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StageCategory {
    SpinLifecycle,
    WinLifecycle,
    UI,
}

impl StageCategory {
    pub const ALL: [StageCategory; 3] = [Self::SpinLifecycle, Self::WinLifecycle, Self::UI];

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::SpinLifecycle => "Spin Lifecycle",
            Self::WinLifecycle => "Win Lifecycle",
            Self::UI => "UI",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_name_matches_serde_tag() {
        let stages = vec![
            Stage::ReelStop {
                reel_index: 2,
                stop_index: 7,
                symbols: vec!["coin".into(), "axe".into(), "book".into()],
                slots: vec![Some(6), Some(7), Some(8)],
            },
            Stage::WinClear,
            Stage::Display { balance: 990, bet: 10 },
            Stage::AutoSpinChanged { enabled: true },
        ];

        for stage in stages {
            let json = serde_json::to_value(&stage).unwrap();
            assert_eq!(json["type"], stage.type_name());
        }
    }

    #[test]
    fn test_categories() {
        assert_eq!(Stage::NoWin.category(), StageCategory::WinLifecycle);
        assert_eq!(Stage::SkipRequested.category(), StageCategory::UI);
        assert_eq!(
            Stage::SpinEnd { balance: 0 }.category(),
            StageCategory::SpinLifecycle
        );
    }
}
