//! StageEvent — A stage occurrence with a timestamp

use serde::{Deserialize, Serialize};

use crate::stage::Stage;

/// A stage event with metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageEvent {
    /// The canonical stage
    pub stage: Stage,

    /// Milliseconds since the emitting machine was created
    pub timestamp_ms: f64,

    /// Spin this event belongs to (None for idle-time UI events)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spin_id: Option<String>,
}

impl StageEvent {
    /// Create a new stage event
    pub fn new(stage: Stage, timestamp_ms: f64) -> Self {
        Self {
            stage,
            timestamp_ms,
            spin_id: None,
        }
    }

    /// Attach the spin identifier
    pub fn with_spin(mut self, spin_id: impl Into<String>) -> Self {
        self.spin_id = Some(spin_id.into());
        self
    }

    /// Get stage type name
    pub fn type_name(&self) -> &'static str {
        self.stage.type_name()
    }
}
