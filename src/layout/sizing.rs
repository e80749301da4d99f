//! Proportional sizing tokens for a view layer
//!
//! Within a row (or column) fixed rectangles keep a literal pixel extent.
//! Flexible rectangles share what remains in proportion to their current
//! extents, written as a percentage of the container minus their share of
//! the fixed footprint.

use std::fmt;

use super::types::{GridConfiguration, Orientation};

/// Main-axis size of one cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SizingToken {
    /// Literal extent in pixels
    Pixels(f64),
    /// `percent`% of the container minus `offset` pixels
    Proportional { percent: f64, offset: i64 },
}

impl fmt::Display for SizingToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizingToken::Pixels(px) => write!(f, "{}px", px),
            SizingToken::Proportional { percent, offset: 0 } => write!(f, "{}%", percent),
            SizingToken::Proportional { percent, offset } => {
                write!(f, "calc({}% - {}px)", percent, offset)
            }
        }
    }
}

/// Decimals past this are below `f64` resolution for a percentage
const MAX_PRECISION: u32 = 15;

fn round_to(value: f64, precision: u32) -> f64 {
    let scale = 10f64.powi(precision.min(MAX_PRECISION) as i32);
    (value * scale).round() / scale
}

/// Tokens for every cell, one list per sequence
pub fn sizing_tokens(
    configuration: &GridConfiguration,
    orientation: Orientation,
    precision: u32,
) -> Vec<Vec<SizingToken>> {
    let main = orientation.main_axis();

    configuration
        .iter()
        .map(|sequence| {
            let (flexible, fixed): (Vec<_>, Vec<_>) = sequence
                .iter()
                .partition(|r| r.policy(main).is_flexible());
            let fixed_total: f64 = fixed.iter().map(|r| r.extent(main)).sum();
            let flexible_total: f64 = flexible.iter().map(|r| r.extent(main)).sum();

            sequence
                .iter()
                .map(|r| {
                    if !r.policy(main).is_flexible() {
                        return SizingToken::Pixels(r.extent(main));
                    }
                    // Zero-sized flexible cells split the space evenly
                    let share = if flexible_total > 0.0 {
                        r.extent(main) / flexible_total
                    } else {
                        1.0 / flexible.len() as f64
                    };
                    SizingToken::Proportional {
                        percent: round_to(share * 100.0, precision),
                        offset: (share * fixed_total).round() as i64,
                    }
                })
                .collect()
        })
        .collect()
}

/// Space-separated tokens of one sequence, as a track list
pub fn track_list(tokens: &[SizingToken]) -> String {
    tokens
        .iter()
        .map(SizingToken::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
