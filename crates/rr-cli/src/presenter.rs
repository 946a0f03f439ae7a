//! Text presenter — renders stage events as terminal lines

use rr_stage::{Stage, StageCategory, StageEvent, StageTrace};
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;

/// How much to print
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Every visible change
    Full,
    /// One line per resolved spin plus messages
    Outcomes,
    Silent,
}

/// Render one stage, or None if it has nothing to show at this verbosity
pub fn render(stage: &Stage, verbosity: Verbosity) -> Option<String> {
    if verbosity == Verbosity::Silent {
        return None;
    }
    let full = verbosity == Verbosity::Full;

    match stage {
        Stage::SpinStart { spin_id, bet, .. } if full => {
            Some(format!("── {} ── bet {}", spin_id, bet))
        }
        Stage::ReelStop { reel_index, symbols, .. } if full => {
            Some(format!("  reel {}: [{}]", reel_index + 1, symbols.join(" | ")))
        }
        Stage::EvaluateWins { middle_row } if full => {
            Some(format!("  middle: {}", middle_row.join(" ")))
        }
        Stage::SpinControls { skip_enabled: true } if full => {
            Some("  (press k to skip)".to_string())
        }
        Stage::Display { balance, bet } if full => {
            Some(format!("Balance: {}  Bet: {}", balance, bet))
        }
        Stage::WinClear if full => Some("  ~".to_string()),
        Stage::SpinEnd { balance } if !full => Some(format!("balance {}", balance)),
        Stage::Message { text } if !text.is_empty() => Some(format!("» {}", text)),
        Stage::AutoSpinChanged { enabled } => Some(format!(
            "Auto spin: {}",
            if *enabled { "ON" } else { "OFF" }
        )),
        _ => None,
    }
}

/// Short overview of a recorded trace, one line per fact
pub fn describe_trace(trace: &StageTrace) -> Vec<String> {
    let summary = trace.summary();
    let mut lines = vec![format!(
        "Trace {}: {} events, {} spins, {} wins paying {} over {:.0}ms",
        summary.trace_id,
        summary.event_count,
        summary.spin_count,
        summary.win_count,
        summary.total_win,
        summary.duration_ms
    )];
    for category in StageCategory::ALL {
        lines.push(format!(
            "  {:<15} {}",
            category.display_name(),
            trace.events_by_category(category).len()
        ));
    }
    lines
}

/// Print events until the machine goes away
///
/// Returns the trace with every received event appended, if one was given.
pub async fn run(
    mut rx: broadcast::Receiver<StageEvent>,
    verbosity: Verbosity,
    mut trace: Option<StageTrace>,
) -> Option<StageTrace> {
    loop {
        match rx.recv().await {
            Ok(event) => {
                if let Some(line) = render(&event.stage, verbosity) {
                    println!("{}", line);
                }
                if let Some(trace) = trace.as_mut() {
                    trace.push(event);
                }
            }
            Err(RecvError::Lagged(missed)) => {
                log::warn!("[Presenter] Fell behind, {} events dropped", missed);
            }
            Err(RecvError::Closed) => break,
        }
    }
    trace
}
