//! Layout engine for rectangle grids
//!
//! This module derives adjacency from rectangle coordinates, linearizes it
//! into row and column configurations, computes size limits and resolves
//! equality constraints against a configuration.

pub mod adjacency;
pub mod compress;
pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod limits;
pub mod order;
pub mod resolver;
pub mod sizing;
pub mod types;

pub use adjacency::Adjacency;
pub use config::{ConfigError, EngineConfig};
pub use engine::LayoutGraph;
pub use error::LayoutError;
pub use limits::compute_limits;
pub use resolver::{resolve, Resolution};
pub use sizing::{sizing_tokens, track_list, SizingToken};
pub use types::*;

use std::collections::HashSet;

use crate::parser::EqualityConstraint;

/// Validate that every rectangle a constraint touches is among `names`
pub fn validate_references<'a>(
    constraints: &[EqualityConstraint],
    names: impl IntoIterator<Item = &'a str>,
) -> Result<(), LayoutError> {
    let defined: HashSet<&str> = names.into_iter().collect();

    for constraint in constraints {
        for name in constraint.affected_names() {
            if !defined.contains(name) {
                return Err(LayoutError::undefined(
                    name,
                    constraint.text(),
                    find_similar(&defined, name, 2),
                ));
            }
        }
    }
    Ok(())
}

/// Compute Levenshtein edit distance between two strings
fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let n = b_chars.len();

    if a_chars.is_empty() {
        return n;
    }
    if n == 0 {
        return a_chars.len();
    }

    // Single rolling row of the edit-distance table
    let mut row: Vec<usize> = (0..=n).collect();
    for (i, a_char) in a_chars.iter().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for j in 1..=n {
            let cost = usize::from(*a_char != b_chars[j - 1]);
            let next = (row[j] + 1).min(row[j - 1] + 1).min(diagonal + cost);
            diagonal = row[j];
            row[j] = next;
        }
    }
    row[n]
}

/// Find defined names within `max_distance` edits of `target`, closest first
fn find_similar(defined: &HashSet<&str>, target: &str, max_distance: usize) -> Vec<String> {
    let mut candidates: Vec<(&str, usize)> = defined
        .iter()
        .filter_map(|&name| {
            let dist = levenshtein_distance(name, target);
            (dist <= max_distance && dist > 0).then_some((name, dist))
        })
        .collect();

    candidates.sort_by(|(a, da), (b, db)| da.cmp(db).then(a.cmp(b)));
    candidates
        .into_iter()
        .map(|(name, _)| name.to_string())
        .take(3)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_all;

    #[test]
    fn test_levenshtein_same() {
        assert_eq!(levenshtein_distance("header", "header"), 0);
    }

    #[test]
    fn test_levenshtein_edits() {
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("side", ""), 4);
        assert_eq!(levenshtein_distance("main", "mian"), 2);
    }

    #[test]
    fn test_find_similar_sorted_and_capped() {
        let defined: HashSet<&str> = ["hdr", "header", "headers", "footer", "heade"].into_iter().collect();
        assert_eq!(find_similar(&defined, "header", 2), vec!["heade", "headers"]);
    }

    #[test]
    fn test_validate_references() {
        let constraints = parse_all(&["main.width = side.width * 2"]).unwrap();
        assert!(validate_references(&constraints, ["main", "side"]).is_ok());

        let err = validate_references(&constraints, ["main", "sides"]).unwrap_err();
        assert_eq!(
            err,
            LayoutError::undefined("side", "main.width=side.width*2", vec!["sides".to_string()])
        );
    }
}
