//! Parser for equality constraints such as `a.width = b.width + c.width`

pub mod ast;
pub mod lexer;
pub mod postfix;

pub use ast::*;
pub use postfix::{evaluate, to_postfix, EvalError};

use crate::error::ParseError;
use lexer::Token;

/// A parsed `<target>.<attr> = <expression>` constraint
#[derive(Debug, Clone, PartialEq)]
pub struct EqualityConstraint {
    text: String,
    target: PropertyRef,
    postfix: Vec<PostfixToken>,
    operands: Vec<OperandRef>,
}

impl EqualityConstraint {
    /// Parse a constraint; all whitespace is removed before tokenizing
    pub fn parse(constraint: &str) -> Result<Self, ParseError> {
        let text: String = constraint.chars().filter(|c| !c.is_whitespace()).collect();

        let Some(eq) = text.find('=') else {
            let end = text.len();
            return Err(ParseError::syntax(
                end..end,
                "Missing '=' in constraint",
                &["'='"],
            ));
        };

        let target = parse_target(&text[..eq])?;
        let postfix = postfix::translate(&text[eq + 1..], eq + 1)?;
        let operands = postfix
            .iter()
            .enumerate()
            .filter_map(|(position, token)| match token {
                PostfixToken::Property(property) => Some(OperandRef {
                    property: property.clone(),
                    position,
                }),
                _ => None,
            })
            .collect();

        log::debug!(
            "parsed constraint '{}': postfix [{}]",
            text,
            postfix
                .iter()
                .map(|t| t.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );

        Ok(Self {
            text,
            target,
            postfix,
            operands,
        })
    }

    /// The whitespace-stripped constraint text; error spans index into it
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn target(&self) -> &PropertyRef {
        &self.target
    }

    pub fn postfix(&self) -> &[PostfixToken] {
        &self.postfix
    }

    /// Property references of the right-hand side in postfix order
    pub fn operands(&self) -> &[OperandRef] {
        &self.operands
    }

    /// Every referenced property, target first
    pub fn references(&self) -> impl Iterator<Item = &PropertyRef> + '_ {
        std::iter::once(&self.target).chain(self.operands.iter().map(|op| &op.property))
    }

    /// Names of every rectangle the constraint touches, target first
    pub fn affected_names(&self) -> Vec<&str> {
        self.references().map(|p| p.name.as_str()).collect()
    }
}

fn parse_target(text: &str) -> Result<PropertyRef, ParseError> {
    let expected = &["name.width", "name.height"];
    let mut tokens = lexer::lex(text);
    match (tokens.next(), tokens.next()) {
        (Some((Ok(Token::Property(property)), span)), None) if span == (0..text.len()) => {
            Ok(property)
        }
        (None, _) => Err(ParseError::syntax(0..0, "Missing constraint target", expected)),
        _ => Err(ParseError::syntax(
            0..text.len(),
            format!("Invalid constraint target '{}'", text),
            expected,
        )),
    }
}

/// Parse a list of constraint strings, stopping at the first malformed one
pub fn parse_all<S: AsRef<str>>(
    constraints: &[S],
) -> Result<Vec<EqualityConstraint>, (usize, ParseError)> {
    constraints
        .iter()
        .enumerate()
        .map(|(index, text)| EqualityConstraint::parse(text.as_ref()).map_err(|e| (index, e)))
        .collect()
}
