//! # rr-stage — RuneReels Stage System
//!
//! Defines the stages a slot round passes through, as seen by a presenter.
//! The game controller never draws anything; it emits stages, and whatever
//! front end is attached (terminal, browser, test recorder) renders them.
//!
//! ## Flow
//!
//! ```text
//! SpinStart → ReelSpinning × N → ReelStop × N → EvaluateWins
//!     → WinPresent / NoWin → SpinEnd
//! ```

pub mod event;
pub mod stage;
pub mod trace;

pub use event::*;
pub use stage::*;
pub use trace::*;
