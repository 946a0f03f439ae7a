//! Timing profiles for the spin sequence

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Timing profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimingProfile {
    /// Normal gameplay timing
    Normal,
    /// Fast mode, every delay halved
    Turbo,
    /// No delays at all (headless runs, simulations)
    Instant,
    /// Scaled or overridden timing
    Custom,
}

impl Default for TimingProfile {
    fn default() -> Self {
        Self::Normal
    }
}

/// Delays at each suspension point of the controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Profile type
    pub profile: TimingProfile,

    /// Time a reel takes to settle after its stop (ms)
    pub reel_settle_ms: u64,

    /// Wait before each reel stop in the cascade (ms)
    pub reel_stop_interval_ms: u64,

    /// How long a win stays presented (ms)
    pub win_display_ms: u64,

    /// Pause between auto-spins (ms)
    pub auto_spin_pacing_ms: u64,
}

impl TimingConfig {
    /// Normal gameplay timing
    pub fn normal() -> Self {
        Self {
            profile: TimingProfile::Normal,
            reel_settle_ms: 300,
            reel_stop_interval_ms: 500,
            win_display_ms: 3000,
            auto_spin_pacing_ms: 1000,
        }
    }

    /// Turbo mode
    pub fn turbo() -> Self {
        Self {
            profile: TimingProfile::Turbo,
            reel_settle_ms: 150,
            reel_stop_interval_ms: 250,
            win_display_ms: 1500,
            auto_spin_pacing_ms: 500,
        }
    }

    /// No waiting anywhere
    pub fn instant() -> Self {
        Self {
            profile: TimingProfile::Instant,
            reel_settle_ms: 0,
            reel_stop_interval_ms: 0,
            win_display_ms: 0,
            auto_spin_pacing_ms: 0,
        }
    }

    /// Get config for profile
    pub fn from_profile(profile: TimingProfile) -> Self {
        match profile {
            TimingProfile::Normal => Self::normal(),
            TimingProfile::Turbo => Self::turbo(),
            TimingProfile::Instant => Self::instant(),
            TimingProfile::Custom => Self::normal(),
        }
    }

    /// Scale timing by factor (< 1.0 = faster)
    pub fn scaled(&self, factor: f64) -> Self {
        let scale = |ms: u64| (ms as f64 * factor.max(0.0)).round() as u64;
        Self {
            profile: TimingProfile::Custom,
            reel_settle_ms: scale(self.reel_settle_ms),
            reel_stop_interval_ms: scale(self.reel_stop_interval_ms),
            win_display_ms: scale(self.win_display_ms),
            auto_spin_pacing_ms: scale(self.auto_spin_pacing_ms),
        }
    }

    pub fn reel_settle(&self) -> Duration {
        Duration::from_millis(self.reel_settle_ms)
    }

    pub fn reel_stop_interval(&self) -> Duration {
        Duration::from_millis(self.reel_stop_interval_ms)
    }

    pub fn win_display(&self) -> Duration {
        Duration::from_millis(self.win_display_ms)
    }

    pub fn auto_spin_pacing(&self) -> Duration {
        Duration::from_millis(self.auto_spin_pacing_ms)
    }

    /// Full cascade duration when nobody skips
    pub fn total_spin_duration(&self, reel_count: usize) -> Duration {
        (self.reel_stop_interval() + self.reel_settle()) * reel_count as u32
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self::normal()
    }
}
