//! Build errors for state machine and transition builders.

use crate::engine::EngineError;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// A single problem with a machine or transition definition.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigViolation {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("No final states defined. Call .final_state(state) at least once")]
    NoFinalStates,

    #[error("Transition source state not specified. Call .from(state)")]
    MissingSourceState,

    #[error("Transition target state not specified. Call .to(state)")]
    MissingTargetState,

    #[error("Transition trigger not specified. Call .on(event), .on_key(key) or .on_variant(&event)")]
    MissingTrigger,

    #[error("Start state set with lazy startup. Pass it to .start(state) instead of .start_in(state)")]
    StartStateWithLazyStartup,

    #[error("Transition #{index}: {violation}")]
    InTransition {
        index: usize,
        violation: Box<ConfigViolation>,
    },
}

/// Errors that can occur when building state machines and transitions.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The definition is incomplete. Lists every problem, not just the first.
    #[error("Invalid state machine definition ({} violations)", .violations.len())]
    Invalid { violations: Vec<ConfigViolation> },

    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl BuildError {
    /// Violations behind an `Invalid` error; empty otherwise.
    pub fn violations(&self) -> &[ConfigViolation] {
        match self {
            Self::Invalid { violations } => violations,
            Self::Engine(_) => &[],
        }
    }
}

pub(crate) type Check = Validation<(), NonEmptyVec<ConfigViolation>>;

pub(crate) fn require(satisfied: bool, violation: ConfigViolation) -> Check {
    if satisfied {
        Validation::success(())
    } else {
        Validation::fail(violation)
    }
}

/// Run every check and gather all failures in order.
pub(crate) fn collect_violations(checks: Vec<Check>) -> Vec<ConfigViolation> {
    match Validation::all_vec(checks).map(|_| ()) {
        Validation::Success(_) => Vec::new(),
        Validation::Failure(errors) => errors.iter().cloned().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_failures_are_collected() {
        let violations = collect_violations(vec![
            require(false, ConfigViolation::MissingInitialState),
            require(true, ConfigViolation::NoFinalStates),
            require(false, ConfigViolation::MissingTrigger),
        ]);

        assert_eq!(
            violations,
            vec![
                ConfigViolation::MissingInitialState,
                ConfigViolation::MissingTrigger
            ]
        );
    }

    #[test]
    fn nested_violation_names_transition() {
        let violation = ConfigViolation::InTransition {
            index: 2,
            violation: Box::new(ConfigViolation::MissingTargetState),
        };

        assert_eq!(
            violation.to_string(),
            "Transition #2: Transition target state not specified. Call .to(state)"
        );
    }

    #[test]
    fn invalid_error_reports_count() {
        let error = BuildError::Invalid {
            violations: vec![
                ConfigViolation::MissingInitialState,
                ConfigViolation::NoFinalStates,
            ],
        };

        assert_eq!(error.to_string(), "Invalid state machine definition (2 violations)");
        assert_eq!(error.violations().len(), 2);
    }
}
