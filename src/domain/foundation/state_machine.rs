//! State machine trait for status enums.
//!
//! Gives lifecycle enums (such as the capture session status) one way to
//! declare and check their legal transitions.

use super::ValidationError;

/// Trait for status enums that represent state machines.
///
/// # Example
///
/// ```ignore
/// impl StateMachine for CaptureStatus {
///     fn can_transition_to(&self, target: &Self) -> bool {
///         matches!((self, target), (Closed, Idle) | (Idle, Drawing) | ...)
///     }
///
///     fn valid_transitions(&self) -> Vec<Self> { ... }
/// }
///
/// let next = status.transition_to(CaptureStatus::Drawing)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Door {
        Shut,
        Ajar,
        Removed,
    }

    impl StateMachine for Door {
        fn can_transition_to(&self, target: &Self) -> bool {
            self.valid_transitions().contains(target)
        }

        fn valid_transitions(&self) -> Vec<Self> {
            match self {
                Door::Shut => vec![Door::Ajar, Door::Removed],
                Door::Ajar => vec![Door::Shut],
                Door::Removed => vec![],
            }
        }
    }

    #[test]
    fn transition_to_succeeds_for_valid_transition() {
        assert_eq!(Door::Shut.transition_to(Door::Ajar), Ok(Door::Ajar));
    }

    #[test]
    fn transition_to_reports_both_states_on_failure() {
        let err = Door::Ajar.transition_to(Door::Removed).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Ajar"));
        assert!(message.contains("Removed"));
    }

    #[test]
    fn terminal_states_have_no_outgoing_transitions() {
        assert!(Door::Removed.is_terminal());
        assert!(!Door::Shut.is_terminal());
    }
}
