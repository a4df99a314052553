//! Errors surfaced by the machine driver.

use crate::registry::ConfigError;
use thiserror::Error;

/// Errors that can occur while building or stepping a machine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A configuration defect found while stepping, such as an unmapped
    /// transition
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Eager validation found one or more defects
    #[error("Invalid machine definition: {} configuration defect(s), first: {}", .0.len(), first_defect(.0))]
    InvalidDefinition(Vec<ConfigError>),

    #[error("Unknown entry state '{name}'")]
    UnknownEntry { name: String },

    #[error("Step limit ({limit}) reached before a terminal state (current state: '{state}')")]
    StepLimitExceeded { limit: usize, state: String },

    #[error("Machine faulted in state '{state}' and cannot step")]
    Faulted { state: String },

    #[error("Invalid driver configuration: {0}")]
    InvalidConfig(String),
}

fn first_defect(defects: &[ConfigError]) -> String {
    defects
        .first()
        .map(ToString::to_string)
        .unwrap_or_else(|| "none".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Outcome;

    #[test]
    fn invalid_definition_summarizes_defects() {
        let err = EngineError::InvalidDefinition(vec![
            ConfigError::UnmappedTransition {
                state: "foo".to_string(),
                outcome: Outcome::Fail,
            },
            ConfigError::EmptyRegistry,
        ]);

        assert_eq!(
            err.to_string(),
            "Invalid machine definition: 2 configuration defect(s), first: \
             No transition from state 'foo' on outcome 'fail'"
        );
    }

    #[test]
    fn config_errors_pass_through() {
        let err: EngineError = ConfigError::UnknownState {
            name: "bar".to_string(),
        }
        .into();

        assert_eq!(err.to_string(), "Unknown state 'bar'");
    }
}
