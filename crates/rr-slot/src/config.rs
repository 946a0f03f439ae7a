//! Game rules and session configuration
//!
//! The rules of the game are compile-time constants. Only presentation-side
//! session options (timing, seed, asset naming) are loadable from a file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{SlotError, SlotResult};
use crate::timing::{TimingConfig, TimingProfile};

/// Fixed game rules
pub mod rules {
    use std::ops::RangeInclusive;

    /// Number of reels
    pub const REEL_COUNT: usize = 5;
    /// Decorative symbols pre-rolled onto each reel strip
    pub const STRIP_LENGTH: usize = 20;
    /// Visible rows per reel (top, middle, bottom)
    pub const VISIBLE_ROWS: usize = 3;
    /// Row evaluated for wins
    pub const MIDDLE_ROW: usize = 1;

    pub const STARTING_BALANCE: u64 = 1000;
    pub const STARTING_BET: u64 = 10;
    pub const MIN_BET: u64 = 5;
    pub const MAX_BET: u64 = 500;
    /// Bet step below the threshold
    pub const BET_INCREMENT: u64 = 5;
    /// Bet step at or above the threshold
    pub const COARSE_BET_INCREMENT: u64 = 100;
    pub const BET_STEP_THRESHOLD: u64 = 100;

    /// Matches needed for any payout
    pub const MIN_MATCH: u8 = 3;

    /// Strip index the middle row lands on; animation only
    pub const STOP_OFFSET_RANGE: RangeInclusive<usize> = 5..=14;
}

/// Per-field timing overrides applied on top of a profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingOverrides {
    pub reel_settle_ms: Option<u64>,
    pub reel_stop_interval_ms: Option<u64>,
    pub win_display_ms: Option<u64>,
    pub auto_spin_pacing_ms: Option<u64>,
}

/// Session options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Timing profile
    pub timing_profile: TimingProfile,
    /// Individual timing overrides
    pub timing: TimingOverrides,
    /// Fixed RNG seed (None = OS entropy)
    pub seed: Option<u64>,
    /// Directory holding symbol images
    pub image_dir: String,
    /// Symbol image extension
    pub image_ext: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            timing_profile: TimingProfile::Normal,
            timing: TimingOverrides::default(),
            seed: None,
            image_dir: "img".into(),
            image_ext: "png".into(),
        }
    }
}

impl SessionConfig {
    /// Load from a `.json`, `.yaml` or `.yml` file
    pub fn load(path: &Path) -> SlotResult<Self> {
        let content = fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let config = match extension.as_str() {
            "json" => serde_json::from_str(&content)?,
            "yaml" | "yml" => serde_yml::from_str(&content)?,
            _ => return Err(SlotError::UnsupportedConfigFormat { extension }),
        };

        log::debug!("Loaded session config from {}", path.display());
        Ok(config)
    }

    /// Resolve the effective timing
    pub fn timing_config(&self) -> TimingConfig {
        let mut timing = TimingConfig::from_profile(self.timing_profile);
        let overrides = &self.timing;

        if let Some(ms) = overrides.reel_settle_ms {
            timing.reel_settle_ms = ms;
        }
        if let Some(ms) = overrides.reel_stop_interval_ms {
            timing.reel_stop_interval_ms = ms;
        }
        if let Some(ms) = overrides.win_display_ms {
            timing.win_display_ms = ms;
        }
        if let Some(ms) = overrides.auto_spin_pacing_ms {
            timing.auto_spin_pacing_ms = ms;
        }
        if *overrides != TimingOverrides::default() {
            timing.profile = TimingProfile::Custom;
        }

        timing
    }
}
