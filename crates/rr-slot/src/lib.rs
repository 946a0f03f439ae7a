//! # rr-slot — RuneReels slot core
//!
//! A five-reel mini slot: weighted symbol draws, middle-row win evaluation and
//! an async spin controller with cascading reel stops, skip and auto-spin.
//!
//! ## Architecture
//!
//! ```text
//! SlotSession (commands from a UI)
//!     │
//!     └── SlotMachine (owns GameState)
//!           ├── Reel × 5 (strip + stopped triple)
//!           ├── WeightTable / PayoutTable
//!           ├── TimingConfig (settle, cascade, win, pacing delays)
//!           └── SlotHandle (skip flag, auto-spin flag, snapshot)
//!                 │
//!                 v
//!           StageEvent broadcast → presenter
//! ```

pub mod config;
pub mod error;
pub mod machine;
pub mod math;
pub mod paytable;
pub mod reel;
pub mod session;
pub mod state;
pub mod stats;
pub mod symbols;
pub mod timing;

pub use config::*;
pub use error::*;
pub use machine::*;
pub use math::*;
pub use paytable::*;
pub use reel::*;
pub use session::*;
pub use state::*;
pub use stats::*;
pub use symbols::*;
pub use timing::*;
