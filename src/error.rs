//! Error types for parsing constraint expressions

use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Byte range in the whitespace-stripped constraint text
pub type Span = std::ops::Range<usize>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Parse error at {span:?}: {message}")]
    Syntax {
        span: Span,
        message: String,
        expected: Vec<String>,
    },

    #[error("Unbalanced parenthesis")]
    UnbalancedParenthesis { span: Span },

    #[error("Operator '{operator}' is missing an operand")]
    MissingOperand { operator: char, span: Span },

    #[error("Missing operator between operands")]
    MissingOperator { span: Span },

    #[error("Empty expression")]
    Empty { span: Span },
}

impl ParseError {
    pub fn syntax(span: Span, message: impl Into<String>, expected: &[&str]) -> Self {
        Self::Syntax {
            span,
            message: message.into(),
            expected: expected.iter().map(|e| e.to_string()).collect(),
        }
    }

    pub fn span(&self) -> &Span {
        match self {
            Self::Syntax { span, .. }
            | Self::UnbalancedParenthesis { span }
            | Self::MissingOperand { span, .. }
            | Self::MissingOperator { span }
            | Self::Empty { span } => span,
        }
    }

    /// Format the error with source context using ariadne
    ///
    /// `source` must be the stripped constraint text the spans refer to
    /// (see [`crate::parser::EqualityConstraint::text`]).
    pub fn format(&self, source: &str, filename: &str) -> String {
        let (message, expected_str) = match self {
            ParseError::Syntax {
                message, expected, ..
            } => {
                let expected_str = if expected.is_empty() {
                    String::new()
                } else {
                    format!("\nExpected: {}", expected.join(", "))
                };
                (message.clone(), expected_str)
            }
            other => (other.to_string(), String::new()),
        };

        // Zero-width spans at end of input still need a visible label
        let span = self.span().clone();
        let span = if span.is_empty() {
            span.start..(span.start + 1).min(source.len().max(1))
        } else {
            span
        };

        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, filename, span.start)
            .with_config(Config::default().with_color(false))
            .with_message(&message)
            .with_label(
                Label::new((filename, span))
                    .with_message(format!("{}{}", message, expected_str))
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        match written {
            Ok(()) => String::from_utf8(buf).unwrap_or_else(|_| self.to_string()),
            Err(_) => self.to_string(),
        }
    }
}
