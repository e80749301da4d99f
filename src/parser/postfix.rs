//! Infix to postfix translation (shunting-yard) and postfix evaluation

use thiserror::Error;

use super::ast::{Operator, PostfixToken, Span};
use super::lexer::{describe, lex, Token};
use crate::error::ParseError;

/// Errors from evaluating a postfix token stream
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("unresolved reference '{0}'")]
    Unresolved(String),

    #[error("operator '{0}' is missing an operand")]
    MissingOperand(char),

    #[error("expression leaves {0} values instead of one")]
    Leftover(usize),
}

/// Entries held on the operator stack
#[derive(Debug, Clone, Copy)]
enum Pending {
    Operator(Operator),
    Paren,
}

/// Convert an infix expression to postfix
///
/// Whitespace is stripped first, so spans in the returned error refer to
/// the stripped text.
pub fn to_postfix(infix: &str) -> Result<Vec<PostfixToken>, ParseError> {
    let stripped: String = infix.chars().filter(|c| !c.is_whitespace()).collect();
    translate(&stripped, 0)
}

/// Shunting-yard over `expr`, reporting spans shifted by `offset`
pub(crate) fn translate(expr: &str, offset: usize) -> Result<Vec<PostfixToken>, ParseError> {
    let shift = |span: Span| (span.start + offset)..(span.end + offset);

    let mut output = Output::default();
    let mut stack: Vec<(Pending, Span)> = Vec::new();

    for (token, span) in lex(expr) {
        let span = shift(span);
        let token = token.map_err(|_| {
            let found = expr
                .get(span.start - offset..span.end - offset)
                .unwrap_or_default();
            ParseError::syntax(
                span.clone(),
                format!("Unexpected input '{}'", found),
                &["number", "name.width", "name.height", "operator"],
            )
        })?;

        match token {
            Token::Number(n) => output.operand(PostfixToken::Number(n)),
            Token::Property(p) => output.operand(PostfixToken::Property(p)),
            Token::Container(a) => output.operand(PostfixToken::Container(a)),
            Token::Plus | Token::Minus | Token::Star | Token::Slash | Token::Caret => {
                let incoming = operator_for(&token);
                while let Some((Pending::Operator(top), top_span)) = stack.last().cloned() {
                    let yields = if incoming.is_right_associative() {
                        incoming.precedence() < top.precedence()
                    } else {
                        incoming.precedence() <= top.precedence()
                    };
                    if !yields {
                        break;
                    }
                    stack.pop();
                    output.operator(top, top_span)?;
                }
                stack.push((Pending::Operator(incoming), span));
            }
            Token::ParenOpen => stack.push((Pending::Paren, span)),
            Token::ParenClose => loop {
                match stack.pop() {
                    Some((Pending::Operator(op), op_span)) => output.operator(op, op_span)?,
                    Some((Pending::Paren, _)) => break,
                    None => return Err(ParseError::UnbalancedParenthesis { span }),
                }
            },
            Token::Equals => {
                return Err(ParseError::syntax(
                    span,
                    format!("Unexpected {} inside expression", describe(&Token::Equals)),
                    &["operator", "operand"],
                ));
            }
        }
    }

    while let Some((pending, span)) = stack.pop() {
        match pending {
            Pending::Operator(op) => output.operator(op, span)?,
            Pending::Paren => return Err(ParseError::UnbalancedParenthesis { span }),
        }
    }

    let end = offset + expr.len();
    match output.depth {
        1 => Ok(output.tokens),
        0 => Err(ParseError::Empty { span: end..end }),
        _ => Err(ParseError::MissingOperator {
            span: offset..end,
        }),
    }
}

fn operator_for(token: &Token) -> Operator {
    match token {
        Token::Plus => Operator::Add,
        Token::Minus => Operator::Subtract,
        Token::Star => Operator::Multiply,
        Token::Slash => Operator::Divide,
        _ => Operator::Power,
    }
}

/// Postfix output that tracks how many values evaluation would leave
#[derive(Default)]
struct Output {
    tokens: Vec<PostfixToken>,
    depth: usize,
}

impl Output {
    fn operand(&mut self, token: PostfixToken) {
        self.tokens.push(token);
        self.depth += 1;
    }

    fn operator(&mut self, op: Operator, span: Span) -> Result<(), ParseError> {
        if self.depth < 2 {
            return Err(ParseError::MissingOperand {
                operator: op.symbol(),
                span,
            });
        }
        self.depth -= 1;
        self.tokens.push(PostfixToken::Operator(op));
        Ok(())
    }
}

/// Evaluate a postfix stream whose references have already been substituted
pub fn evaluate(tokens: &[PostfixToken]) -> Result<f64, EvalError> {
    let mut values: Vec<f64> = Vec::with_capacity(tokens.len());
    for token in tokens {
        match token {
            PostfixToken::Number(n) => values.push(*n),
            PostfixToken::Operator(op) => {
                let rhs = values.pop().ok_or(EvalError::MissingOperand(op.symbol()))?;
                let lhs = values.pop().ok_or(EvalError::MissingOperand(op.symbol()))?;
                values.push(op.apply(lhs, rhs));
            }
            unresolved => return Err(EvalError::Unresolved(unresolved.to_string())),
        }
    }
    match values.as_slice() {
        [value] => Ok(*value),
        rest => Err(EvalError::Leftover(rest.len())),
    }
}
