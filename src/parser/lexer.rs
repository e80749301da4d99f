//! Lexer for equality-constraint expressions using logos

use logos::Logos;

use super::ast::{Attribute, PropertyRef, Span};

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r]+")]
pub enum Token {
    // Unsigned integer literals
    #[regex(r"[0-9]+", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),

    // `name.attribute`; the attribute may be abbreviated and is case-insensitive
    #[regex(
        r"[A-Za-z0-9_]+\.([wW]([iI][dD][tT][hH])?|[hH]([eE][iI][gG][hH][tT])?)",
        |lex| PropertyRef::parse(lex.slice())
    )]
    Property(PropertyRef),

    // Bare attribute: the container's extent
    #[regex(
        r"[wW]([iI][dD][tT][hH])?|[hH]([eE][iI][gG][hH][tT])?",
        |lex| Attribute::parse(lex.slice())
    )]
    Container(Attribute),

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("^")]
    Caret,

    #[token("(")]
    ParenOpen,
    #[token(")")]
    ParenClose,

    #[token("=")]
    Equals,
}

/// Lex input into tokens with spans; unrecognised input is kept as `Err(())`
pub fn lex(input: &str) -> impl Iterator<Item = (Result<Token, ()>, Span)> + '_ {
    Token::lexer(input).spanned()
}

/// Human-readable token description for error messages
pub fn describe(token: &Token) -> String {
    match token {
        Token::Number(n) => format!("number {}", n),
        Token::Property(p) => format!("property '{}'", p),
        Token::Container(a) => format!("container '{}'", a),
        Token::Plus => "'+'".to_string(),
        Token::Minus => "'-'".to_string(),
        Token::Star => "'*'".to_string(),
        Token::Slash => "'/'".to_string(),
        Token::Caret => "'^'".to_string(),
        Token::ParenOpen => "'('".to_string(),
        Token::ParenClose => "')'".to_string(),
        Token::Equals => "'='".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token> {
        lex(input).filter_map(|(t, _)| t.ok()).collect()
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            tokens("42 7"),
            vec![Token::Number(42.0), Token::Number(7.0)]
        );
    }

    #[test]
    fn test_property_references() {
        assert_eq!(
            tokens("a.width b.h Box_2.HEIGHT"),
            vec![
                Token::Property(PropertyRef::width("a")),
                Token::Property(PropertyRef::height("b")),
                Token::Property(PropertyRef::height("Box_2")),
            ]
        );
    }

    #[test]
    fn test_container_references() {
        assert_eq!(
            tokens("width h"),
            vec![
                Token::Container(Attribute::Width),
                Token::Container(Attribute::Height)
            ]
        );
    }

    #[test]
    fn test_operators_and_parens() {
        assert_eq!(
            tokens("+-*/^()="),
            vec![
                Token::Plus,
                Token::Minus,
                Token::Star,
                Token::Slash,
                Token::Caret,
                Token::ParenOpen,
                Token::ParenClose,
                Token::Equals
            ]
        );
    }

    #[test]
    fn test_expression_without_spaces() {
        assert_eq!(
            tokens("a.width+50"),
            vec![
                Token::Property(PropertyRef::width("a")),
                Token::Plus,
                Token::Number(50.0)
            ]
        );
    }

    #[test]
    fn test_unknown_input_is_an_error() {
        let results: Vec<_> = lex("a.left").collect();
        assert!(results.iter().any(|(t, _)| t.is_err()));
    }
}
