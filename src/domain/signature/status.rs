//! Capture session status.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Lifecycle of the capture surface.
///
/// `Closed → Idle → Drawing → Idle → … → Closed`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureStatus {
    #[default]
    Closed,
    /// Open, no stroke in progress.
    Idle,
    /// Open, a pointer is captured and extending a stroke.
    Drawing,
}

impl CaptureStatus {
    pub fn is_open(&self) -> bool {
        !matches!(self, CaptureStatus::Closed)
    }
}

impl StateMachine for CaptureStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use CaptureStatus::*;
        matches!(
            (self, target),
            (Closed, Idle) | (Idle, Drawing) | (Idle, Closed) | (Drawing, Idle) | (Drawing, Closed)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use CaptureStatus::*;
        match self {
            Closed => vec![Idle],
            Idle => vec![Drawing, Closed],
            Drawing => vec![Idle, Closed],
        }
    }
}
