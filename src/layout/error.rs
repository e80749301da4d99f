//! Error types for the layout engine

use thiserror::Error;

use crate::parser::EvalError;

use super::types::Orientation;

/// Errors that can occur while resolving constraints against a layout
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// Reference to a rectangle that is not in the configuration
    #[error("undefined identifier '{name}' in constraint '{constraint}'")]
    UndefinedIdentifier {
        name: String,
        constraint: String,
        suggestions: Vec<String>,
    },

    /// Constraints that cannot all be satisfied
    #[error("conflicting constraints: {reason}")]
    ConflictingConstraints {
        constraints: Vec<String>,
        reason: String,
    },

    /// Circular dependency between constraints
    #[error("circular constraint dependency: {}", cycle.join(" -> "))]
    CircularConstraint { cycle: Vec<String> },

    /// A constraint evaluated to a value no rectangle can take
    #[error("constraint '{constraint}' evaluates to invalid measurement {value}")]
    InvalidMeasurement { constraint: String, value: f64 },

    /// The postfix stream could not be reduced to a single value
    #[error("failed to evaluate constraint '{constraint}': {source}")]
    Evaluation {
        constraint: String,
        #[source]
        source: EvalError,
    },

    /// No configuration exists along the requested orientation
    #[error("layout has no {orientation} configuration")]
    NoConfiguration { orientation: Orientation },
}

impl LayoutError {
    /// Create an undefined identifier error with suggestions
    pub fn undefined(
        name: impl Into<String>,
        constraint: impl Into<String>,
        suggestions: Vec<String>,
    ) -> Self {
        Self::UndefinedIdentifier {
            name: name.into(),
            constraint: constraint.into(),
            suggestions,
        }
    }

    /// Create a conflicting constraints error
    pub fn conflicting(constraints: Vec<String>, reason: impl Into<String>) -> Self {
        Self::ConflictingConstraints {
            constraints,
            reason: reason.into(),
        }
    }

    /// Create a circular constraint error
    pub fn circular(cycle: Vec<String>) -> Self {
        Self::CircularConstraint { cycle }
    }

    pub fn invalid_measurement(constraint: impl Into<String>, value: f64) -> Self {
        Self::InvalidMeasurement {
            constraint: constraint.into(),
            value,
        }
    }

    /// Get suggestions if this is an undefined identifier error
    pub fn suggestions(&self) -> &[String] {
        match self {
            Self::UndefinedIdentifier { suggestions, .. } => suggestions,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undefined_message() {
        let err = LayoutError::undefined("bx", "a.width=bx.width", vec!["b".to_string()]);
        assert_eq!(
            err.to_string(),
            "undefined identifier 'bx' in constraint 'a.width=bx.width'"
        );
        assert_eq!(err.suggestions(), ["b".to_string()]);
    }

    #[test]
    fn test_circular_message_joins_path() {
        let err = LayoutError::circular(vec![
            "a.width".to_string(),
            "b.width".to_string(),
            "a.width".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "circular constraint dependency: a.width -> b.width -> a.width"
        );
        assert!(err.suggestions().is_empty());
    }

    #[test]
    fn test_no_configuration_message() {
        let err = LayoutError::NoConfiguration {
            orientation: Orientation::Column,
        };
        assert_eq!(err.to_string(), "layout has no column configuration");
    }
}
