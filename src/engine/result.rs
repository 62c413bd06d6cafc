//! Outcome of processing one event.

use crate::core::{Event, HookError, State};
use crate::engine::transition::{Transition, TransitionRef};
use std::sync::Arc;

/// Result of a single `send_event` call.
///
/// Exactly one variant is produced per call. `Rejected` covers business
/// vetoes and missing transitions; `Failed` carries the error a hook raised,
/// unmodified.
#[derive(Debug)]
pub enum TransitionResult<S: State, E: Event> {
    /// The machine moved to the transition's target state.
    Success { transition: Arc<Transition<S, E>> },

    /// No transition exists, or a guard declined it. State is unchanged.
    Rejected {
        transition: TransitionRef<S, E>,
        reason: String,
    },

    /// A guard or action raised an error.
    Failed {
        transition: Arc<Transition<S, E>>,
        error: HookError,
    },
}

impl<S: State, E: Event> TransitionResult<S, E> {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Rejected because no transition matched the state and event.
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Rejected { transition, .. } if transition.is_undefined())
    }

    /// The configured transition this outcome refers to, if any.
    pub fn transition(&self) -> Option<&Transition<S, E>> {
        match self {
            Self::Success { transition } | Self::Failed { transition, .. } => Some(&**transition),
            Self::Rejected { transition, .. } => transition.defined(),
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Rejected { reason, .. } => Some(reason.as_str()),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            Self::Failed { error, .. } => Some(error.as_ref()),
            _ => None,
        }
    }

    pub fn if_success<F>(&self, action: F)
    where
        F: FnOnce(&Transition<S, E>),
    {
        if let Self::Success { transition } = self {
            action(&**transition);
        }
    }

    pub fn if_rejected<F>(&self, action: F)
    where
        F: FnOnce(&TransitionRef<S, E>, &str),
    {
        if let Self::Rejected { transition, reason } = self {
            action(transition, reason.as_str());
        }
    }

    pub fn if_failed<F>(&self, action: F)
    where
        F: FnOnce(&Transition<S, E>, &HookError),
    {
        if let Self::Failed { transition, error } = self {
            action(&**transition, error);
        }
    }

    /// Run `action` for any outcome other than `Success`.
    pub fn if_failed_or_rejected<F>(&self, action: F)
    where
        F: FnOnce(&Self),
    {
        if !self.is_success() {
            action(self);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::transition::Trigger;

    type Outcome = TransitionResult<&'static str, &'static str>;

    fn transition() -> Arc<Transition<&'static str, &'static str>> {
        Arc::new(Transition::new("S0", "S1", Trigger::Event("E1")))
    }

    #[test]
    fn success_dispatches_only_success() {
        let result: Outcome = TransitionResult::Success {
            transition: transition(),
        };
        let mut seen = Vec::new();

        result.if_success(|t| seen.push(format!("success {}", t.target())));
        result.if_rejected(|_, _| seen.push("rejected".to_string()));
        result.if_failed(|_, _| seen.push("failed".to_string()));
        result.if_failed_or_rejected(|_| seen.push("not success".to_string()));

        assert_eq!(seen, vec!["success S1"]);
        assert!(result.reason().is_none());
        assert!(result.error().is_none());
    }

    #[test]
    fn rejected_exposes_reason_and_marker() {
        let result: Outcome = TransitionResult::Rejected {
            transition: TransitionRef::Undefined {
                source: "S0",
                event: "UNKNOWN",
            },
            reason: "No transition from \"S0\" with \"UNKNOWN\" exists.".to_string(),
        };
        let mut reasons = Vec::new();

        result.if_rejected(|_, reason| reasons.push(reason.to_string()));

        assert!(result.is_rejected());
        assert!(result.is_undefined());
        assert!(result.transition().is_none());
        assert_eq!(reasons.len(), 1);
        assert_eq!(result.reason(), Some(reasons[0].as_str()));
    }

    #[test]
    fn failed_carries_original_error() {
        let result: Outcome = TransitionResult::Failed {
            transition: transition(),
            error: "payment gateway timeout".into(),
        };
        let mut not_success = 0;

        result.if_failed_or_rejected(|_| not_success += 1);

        assert!(result.is_failed());
        assert!(!result.is_undefined());
        assert_eq!(not_success, 1);
        assert_eq!(
            result.error().map(|e| e.to_string()).as_deref(),
            Some("payment gateway timeout")
        );
        assert_eq!(result.transition().map(|t| *t.source()), Some("S0"));
    }
}
