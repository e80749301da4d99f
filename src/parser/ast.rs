//! Token and constraint types for equality expressions

use std::fmt;

pub use crate::error::Span;

/// Measurement a property reference reads or writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Attribute {
    Width,
    Height,
}

impl Attribute {
    /// Parse `w`, `width`, `h` or `height` in any letter case
    pub fn parse(text: &str) -> Option<Self> {
        match text.to_ascii_lowercase().as_str() {
            "w" | "width" => Some(Attribute::Width),
            "h" | "height" => Some(Attribute::Height),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Attribute::Width => "width",
            Attribute::Height => "height",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `name.attribute` reference to a rectangle measurement
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropertyRef {
    pub name: String,
    pub attribute: Attribute,
}

impl PropertyRef {
    pub fn new(name: impl Into<String>, attribute: Attribute) -> Self {
        Self {
            name: name.into(),
            attribute,
        }
    }

    pub fn width(name: impl Into<String>) -> Self {
        Self::new(name, Attribute::Width)
    }

    pub fn height(name: impl Into<String>) -> Self {
        Self::new(name, Attribute::Height)
    }

    /// Split `name.attr` at its dot; `None` if either half is unusable
    pub fn parse(text: &str) -> Option<Self> {
        let (name, attribute) = text.split_once('.')?;
        if name.is_empty() {
            return None;
        }
        Some(Self::new(name, Attribute::parse(attribute)?))
    }
}

impl fmt::Display for PropertyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.name, self.attribute)
    }
}

/// Binary arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

impl Operator {
    pub fn precedence(&self) -> u8 {
        match self {
            Operator::Power => 4,
            Operator::Multiply | Operator::Divide => 3,
            Operator::Add | Operator::Subtract => 2,
        }
    }

    pub fn is_right_associative(&self) -> bool {
        matches!(self, Operator::Power)
    }

    pub fn symbol(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
            Operator::Power => '^',
        }
    }

    /// Apply to two operands; IEEE semantics for division by zero
    pub fn apply(&self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Operator::Add => lhs + rhs,
            Operator::Subtract => lhs - rhs,
            Operator::Multiply => lhs * rhs,
            Operator::Divide => lhs / rhs,
            Operator::Power => lhs.powf(rhs),
        }
    }
}

/// One element of a postfix token stream
#[derive(Debug, Clone, PartialEq)]
pub enum PostfixToken {
    Number(f64),
    Property(PropertyRef),
    /// Bare `width`/`height`: the enclosing layout's extent
    Container(Attribute),
    Operator(Operator),
}

impl PostfixToken {
    pub fn is_operand(&self) -> bool {
        !matches!(self, PostfixToken::Operator(_))
    }
}

impl fmt::Display for PostfixToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostfixToken::Number(n) => write!(f, "{}", n),
            PostfixToken::Property(p) => write!(f, "{}", p),
            PostfixToken::Container(a) => write!(f, "{}", a),
            PostfixToken::Operator(op) => write!(f, "{}", op.symbol()),
        }
    }
}

/// A property reference appearing in an expression, with its postfix index
#[derive(Debug, Clone, PartialEq)]
pub struct OperandRef {
    pub property: PropertyRef,
    pub position: usize,
}
