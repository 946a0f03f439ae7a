//! StageTrace — An ordered record of stage events for one spin or session

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::event::StageEvent;
use crate::stage::{Stage, StageCategory};

/// A complete trace of stage events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageTrace {
    /// Unique identifier for this trace
    pub trace_id: String,

    /// Game identifier
    pub game_id: String,

    /// All events in chronological order
    pub events: Vec<StageEvent>,

    /// When this trace was recorded
    pub recorded_at: DateTime<Utc>,

    /// Custom metadata
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl StageTrace {
    /// Create a new empty trace
    pub fn new(trace_id: impl Into<String>, game_id: impl Into<String>) -> Self {
        Self {
            trace_id: trace_id.into(),
            game_id: game_id.into(),
            events: Vec::new(),
            recorded_at: Utc::now(),
            metadata: serde_json::Map::new(),
        }
    }

    /// Add an event to the trace
    pub fn push(&mut self, event: StageEvent) {
        self.events.push(event);
    }

    /// Add metadata
    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Get total duration in milliseconds
    pub fn duration_ms(&self) -> f64 {
        match (self.events.first(), self.events.last()) {
            (Some(first), Some(last)) => last.timestamp_ms - first.timestamp_ms,
            _ => 0.0,
        }
    }

    /// Get events by category
    pub fn events_by_category(&self, category: StageCategory) -> Vec<&StageEvent> {
        self.events
            .iter()
            .filter(|e| e.stage.category() == category)
            .collect()
    }

    /// Get events by stage type name
    pub fn events_by_type(&self, type_name: &str) -> Vec<&StageEvent> {
        self.events
            .iter()
            .filter(|e| e.stage.type_name() == type_name)
            .collect()
    }

    /// Events belonging to one spin
    pub fn events_for_spin(&self, spin_id: &str) -> Vec<&StageEvent> {
        self.events
            .iter()
            .filter(|e| e.spin_id.as_deref() == Some(spin_id))
            .collect()
    }

    /// Check if trace contains a specific stage type
    pub fn has_stage(&self, type_name: &str) -> bool {
        self.events.iter().any(|e| e.stage.type_name() == type_name)
    }

    /// Get all reel stop events
    pub fn reel_stops(&self) -> Vec<&StageEvent> {
        self.events_by_type("reel_stop")
    }

    /// Number of accepted spins
    pub fn spin_count(&self) -> usize {
        self.events_by_type("spin_start").len()
    }

    /// Sum of all presented wins
    pub fn total_win(&self) -> u64 {
        self.events
            .iter()
            .filter_map(|e| match &e.stage {
                Stage::WinPresent { win_amount, .. } => Some(*win_amount),
                _ => None,
            })
            .sum()
    }

    /// Validate that every started spin was stopped and ended
    pub fn validate(&self, reel_count: u8) -> TraceValidation {
        let spin_starts = self.spin_count();
        let spin_ends = self.events_by_type("spin_end").len();
        let reel_stops = self.reel_stops().len();

        TraceValidation {
            spin_starts,
            spin_ends,
            reel_stop_count: reel_stops,
            has_all_reels: reel_stops == spin_starts * reel_count as usize,
            rejected: self.events_by_type("spin_rejected").len(),
        }
    }

    /// Get summary of trace
    pub fn summary(&self) -> TraceSummary {
        TraceSummary {
            trace_id: self.trace_id.clone(),
            game_id: self.game_id.clone(),
            event_count: self.events.len(),
            spin_count: self.spin_count(),
            duration_ms: self.duration_ms(),
            total_win: self.total_win(),
            win_count: self.events_by_type("win_present").len(),
        }
    }
}

/// Validation result for a trace
#[derive(Debug, Clone, Default)]
pub struct TraceValidation {
    pub spin_starts: usize,
    pub spin_ends: usize,
    pub reel_stop_count: usize,
    pub has_all_reels: bool,
    pub rejected: usize,
}

impl TraceValidation {
    /// Check if trace is valid (every spin completed with all reels)
    pub fn is_valid(&self) -> bool {
        self.spin_starts == self.spin_ends && self.has_all_reels
    }

    /// Get list of warnings
    pub fn warnings(&self) -> Vec<&'static str> {
        let mut warnings = Vec::new();

        if self.spin_starts > self.spin_ends {
            warnings.push("Spin started but never ended");
        }
        if self.spin_ends > self.spin_starts {
            warnings.push("Spin ended without a start");
        }
        if !self.has_all_reels {
            warnings.push("Not all reels have stop events");
        }

        warnings
    }
}

/// Summary of a trace for quick overview
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceSummary {
    pub trace_id: String,
    pub game_id: String,
    pub event_count: usize,
    pub spin_count: usize,
    pub duration_ms: f64,
    pub total_win: u64,
    pub win_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_basic_trace() -> StageTrace {
        let mut trace = StageTrace::new("test-001", "runereels");

        trace.push(
            StageEvent::new(
                Stage::SpinStart {
                    spin_id: "spin-000001".into(),
                    bet: 10,
                    balance: 990,
                },
                0.0,
            )
            .with_spin("spin-000001"),
        );
        for i in 0..5u8 {
            trace.push(
                StageEvent::new(
                    Stage::ReelStop {
                        reel_index: i,
                        stop_index: 7,
                        symbols: vec!["coin".into(), "coin".into(), "sword".into()],
                        slots: vec![Some(6), Some(7), Some(8)],
                    },
                    800.0 * (i as f64 + 1.0),
                )
                .with_spin("spin-000001"),
            );
        }
        trace.push(StageEvent::new(
            Stage::WinPresent {
                symbol: "coin".into(),
                match_count: 5,
                win_amount: 80,
            },
            4000.0,
        ));
        trace.push(StageEvent::new(Stage::SpinEnd { balance: 1070 }, 4000.0));

        trace
    }

    #[test]
    fn test_trace_creation() {
        let trace = create_basic_trace();

        assert_eq!(trace.game_id, "runereels");
        assert_eq!(trace.events.len(), 8); // 1 start + 5 reels + 1 win + 1 end
    }

    #[test]
    fn test_trace_duration() {
        let trace = create_basic_trace();
        assert_eq!(trace.duration_ms(), 4000.0);
        assert_eq!(StageTrace::new("empty", "g").duration_ms(), 0.0);
    }

    #[test]
    fn test_trace_total_win() {
        let trace = create_basic_trace();
        assert_eq!(trace.total_win(), 80);
    }

    #[test]
    fn test_events_for_spin() {
        let trace = create_basic_trace();
        assert_eq!(trace.events_for_spin("spin-000001").len(), 6);
        assert!(trace.events_for_spin("spin-000002").is_empty());
    }

    #[test]
    fn test_trace_validation() {
        let trace = create_basic_trace();
        let validation = trace.validate(5);

        assert_eq!(validation.spin_starts, 1);
        assert_eq!(validation.reel_stop_count, 5);
        assert!(validation.is_valid());
        assert!(validation.warnings().is_empty());

        let mut broken = create_basic_trace();
        broken.events.pop();
        let validation = broken.validate(5);
        assert!(!validation.is_valid());
        assert_eq!(validation.warnings(), vec!["Spin started but never ended"]);
    }

    #[test]
    fn test_trace_serialization() {
        let trace = create_basic_trace().with_metadata("seed", serde_json::json!(42));
        let json = serde_json::to_string_pretty(&trace).unwrap();

        assert!(json.contains("runereels"));
        assert!(json.contains("spin_start"));

        let deserialized: StageTrace = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.summary().spin_count, 1);
        assert_eq!(deserialized.metadata["seed"], 42);
    }
}
