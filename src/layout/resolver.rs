//! Constraint resolution against a grid configuration
//!
//! Constraints are applied in dependency order, each one reading the values
//! written by the constraints before it. The input configuration is never
//! modified: resolution folds over a copy and then reflows it.

use std::collections::HashMap;

use crate::parser::{evaluate, EqualityConstraint, PostfixToken};

use super::config::EngineConfig;
use super::error::LayoutError;
use super::grid::restack;
use super::order::dependency_order;
use super::sizing::{sizing_tokens, SizingToken};
use super::types::{Axis, Boundary, GridConfiguration, Orientation, Rectangle, SizingPolicy};
use super::validate_references;

/// Where each rectangle sits in a configuration: (sequence, position)
type CellIndex<'a> = HashMap<&'a str, (usize, usize)>;

/// Result of applying a constraint set to a configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    orientation: Orientation,
    configuration: GridConfiguration,
    sizing: Vec<Vec<SizingToken>>,
}

impl Resolution {
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// The reflowed configuration
    pub fn configuration(&self) -> &GridConfiguration {
        &self.configuration
    }

    /// Sizing tokens, one list per sequence
    pub fn sizing(&self) -> &[Vec<SizingToken>] {
        &self.sizing
    }

    pub fn rectangles(&self) -> impl Iterator<Item = &Rectangle> + '_ {
        self.configuration.iter().flatten()
    }

    pub fn rectangle(&self, name: &str) -> Option<&Rectangle> {
        self.rectangles().find(|r| r.name == name)
    }

    /// `rectangles` with every resolved rectangle swapped in by name,
    /// keeping the input order
    pub fn apply_to(&self, rectangles: &[Rectangle]) -> Vec<Rectangle> {
        rectangles
            .iter()
            .map(|r| self.rectangle(&r.name).unwrap_or(r).clone())
            .collect()
    }
}

/// Apply `constraints` to `configuration` and reflow the result
pub fn resolve(
    configuration: &GridConfiguration,
    orientation: Orientation,
    constraints: &[EqualityConstraint],
    config: &EngineConfig,
) -> Result<Resolution, LayoutError> {
    if configuration.is_empty() {
        return Err(LayoutError::NoConfiguration { orientation });
    }

    let index: CellIndex = configuration
        .iter()
        .enumerate()
        .flat_map(|(s, sequence)| {
            sequence
                .iter()
                .enumerate()
                .map(move |(p, rect)| (rect.name.as_str(), (s, p)))
        })
        .collect();
    validate_references(constraints, index.keys().copied())?;

    let order = dependency_order(constraints)?;
    let boundary = Boundary::of(configuration.iter().flatten());

    let resolved = order
        .iter()
        .try_fold(configuration.clone(), |working, &i| {
            apply(working, &index, &constraints[i], boundary)
        })?;
    let resolved = restack(resolved, orientation);
    let sizing = sizing_tokens(&resolved, orientation, config.percent_precision);

    log::debug!(
        "resolved {} constraints against the {} configuration",
        constraints.len(),
        orientation
    );
    Ok(Resolution {
        orientation,
        configuration: resolved,
        sizing,
    })
}

/// Evaluate one constraint and write its target
fn apply(
    mut working: GridConfiguration,
    index: &CellIndex,
    constraint: &EqualityConstraint,
    boundary: Boundary,
) -> Result<GridConfiguration, LayoutError> {
    let cell = |name: &str| {
        index
            .get(name)
            .map(|&(s, p)| &working[s][p])
            .ok_or_else(|| LayoutError::undefined(name, constraint.text(), Vec::new()))
    };

    let mut substituted = Vec::with_capacity(constraint.postfix().len());
    let mut flexible = false;
    for token in constraint.postfix() {
        substituted.push(match token {
            PostfixToken::Property(property) => {
                let axis = Axis::from(property.attribute);
                let rect = cell(&property.name)?;
                flexible |= rect.policy(axis).is_flexible();
                PostfixToken::Number(rect.extent(axis))
            }
            PostfixToken::Container(attribute) => {
                PostfixToken::Number(boundary.extent(Axis::from(*attribute)))
            }
            other => other.clone(),
        });
    }

    let value = evaluate(&substituted).map_err(|source| LayoutError::Evaluation {
        constraint: constraint.text().to_string(),
        source,
    })?;
    if !value.is_finite() || value < 0.0 {
        return Err(LayoutError::invalid_measurement(constraint.text(), value));
    }

    let target = constraint.target();
    let axis = Axis::from(target.attribute);
    let policy = if flexible {
        SizingPolicy::FillSpace
    } else {
        SizingPolicy::Fixed
    };
    let &(s, p) = index
        .get(target.name.as_str())
        .ok_or_else(|| LayoutError::undefined(&target.name, constraint.text(), Vec::new()))?;

    log::debug!("{} := {} ({})", target, value, policy);
    let rect = &mut working[s][p];
    rect.set_extent(axis, value);
    rect.set_policy(axis, policy);
    Ok(working)
}
