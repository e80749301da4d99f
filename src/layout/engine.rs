//! Layout graph computation
//!
//! A [`LayoutGraph`] is a snapshot of one rectangle set. Everything it
//! reports is computed once in [`LayoutGraph::with_config`]:
//!
//! 1. **Adjacency**: shared seams between touching rectangles
//! 2. **Strict grids**: an aligned row and column configuration, if any
//! 3. **Compression**: for an axis without a strict grid, a greedy regrouping
//!    resized to uniform rows (or columns)
//! 4. **Limits**: per-axis size bounds, reconciled across both axes
//!
//! Constraint resolution runs on demand through [`LayoutGraph::resolve`].

use crate::parser::EqualityConstraint;

use super::adjacency::Adjacency;
use super::compress::{resize_configuration, unaligned_configuration};
use super::config::EngineConfig;
use super::error::LayoutError;
use super::grid::{materialize, name_matrix, strict_configuration};
use super::limits::compute_limits;
use super::resolver::{resolve, Resolution};
use super::types::*;

/// Derived structure of a rectangle set
#[derive(Debug, Clone)]
pub struct LayoutGraph {
    rectangles: Vec<Rectangle>,
    adjacency: Adjacency,
    boundary: Boundary,
    rows: GridConfiguration,
    columns: GridConfiguration,
    unaligned_rows: GridConfiguration,
    unaligned_columns: GridConfiguration,
    resized_rows: GridConfiguration,
    resized_columns: GridConfiguration,
    row_limits: Limits,
    column_limits: Limits,
    limits: Limits,
    config: EngineConfig,
}

/// Strict, unaligned and resized configuration along one orientation
struct Configurations {
    strict: GridConfiguration,
    unaligned: GridConfiguration,
    resized: GridConfiguration,
}

fn configurations(
    rectangles: &[Rectangle],
    adjacency: &Adjacency,
    orientation: Orientation,
    config: &EngineConfig,
) -> Configurations {
    let strict = materialize(
        rectangles,
        &strict_configuration(rectangles, adjacency, orientation),
    );
    if !strict.is_empty() || !config.compress_fallback {
        return Configurations {
            strict,
            unaligned: Vec::new(),
            resized: Vec::new(),
        };
    }

    log::warn!("no aligned {} grid, falling back to compression", orientation);
    let unaligned = materialize(
        rectangles,
        &unaligned_configuration(rectangles, adjacency, orientation),
    );
    let resized = resize_configuration(&unaligned, orientation);
    Configurations {
        strict,
        unaligned,
        resized,
    }
}

impl LayoutGraph {
    /// Build a graph with the default configuration
    pub fn new(rectangles: Vec<Rectangle>) -> Self {
        Self::with_config(rectangles, EngineConfig::default())
    }

    /// Build a graph, running the whole pipeline once
    pub fn with_config(rectangles: Vec<Rectangle>, config: EngineConfig) -> Self {
        let adjacency = Adjacency::build(&rectangles);
        let boundary = Boundary::of(&rectangles);

        let rows = configurations(&rectangles, &adjacency, Orientation::Row, &config);
        let columns = configurations(&rectangles, &adjacency, Orientation::Column, &config);

        let limits_for = |c: &Configurations, orientation| {
            let source = if c.strict.is_empty() {
                &c.resized
            } else {
                &c.strict
            };
            compute_limits(source, orientation, config.max_size)
        };
        let row_limits = limits_for(&rows, Orientation::Row);
        let column_limits = limits_for(&columns, Orientation::Column);
        let limits = Limits::reconcile(&row_limits, &column_limits);

        log::debug!(
            "layout graph: {} rectangles, rows {}, columns {}, limits {}",
            rectangles.len(),
            rows.strict.len(),
            columns.strict.len(),
            limits
        );

        Self {
            rectangles,
            adjacency,
            boundary,
            rows: rows.strict,
            columns: columns.strict,
            unaligned_rows: rows.unaligned,
            unaligned_columns: columns.unaligned,
            resized_rows: rows.resized,
            resized_columns: columns.resized,
            row_limits,
            column_limits,
            limits,
            config,
        }
    }

    pub fn rectangles(&self) -> &[Rectangle] {
        &self.rectangles
    }

    pub fn adjacency(&self) -> &Adjacency {
        &self.adjacency
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Far right and bottom extent of the rectangle set
    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    pub fn row_configuration(&self) -> &GridConfiguration {
        &self.rows
    }

    pub fn column_configuration(&self) -> &GridConfiguration {
        &self.columns
    }

    pub fn unaligned_rows(&self) -> &GridConfiguration {
        &self.unaligned_rows
    }

    pub fn unaligned_columns(&self) -> &GridConfiguration {
        &self.unaligned_columns
    }

    pub fn resized_rows(&self) -> &GridConfiguration {
        &self.resized_rows
    }

    pub fn resized_columns(&self) -> &GridConfiguration {
        &self.resized_columns
    }

    /// Best available configuration: the strict grid, else the resized one
    pub fn configuration(&self, orientation: Orientation) -> &GridConfiguration {
        let (strict, resized) = match orientation {
            Orientation::Row => (&self.rows, &self.resized_rows),
            Orientation::Column => (&self.columns, &self.resized_columns),
        };
        if strict.is_empty() {
            resized
        } else {
            strict
        }
    }

    /// Whether `orientation` offers any configuration at all
    pub fn has_configuration(&self, orientation: Orientation) -> bool {
        !self.configuration(orientation).is_empty()
    }

    /// Limits reconciled across rows and columns
    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// Limits of one orientation alone
    pub fn limits_for(&self, orientation: Orientation) -> Limits {
        match orientation {
            Orientation::Row => self.row_limits,
            Orientation::Column => self.column_limits,
        }
    }

    pub fn minimum_width(&self) -> f64 {
        self.limits.minimum_width
    }

    pub fn minimum_height(&self) -> f64 {
        self.limits.minimum_height
    }

    pub fn maximum_width(&self) -> f64 {
        self.limits.maximum_width
    }

    pub fn maximum_height(&self) -> f64 {
        self.limits.maximum_height
    }

    /// Names of `configuration`, sequence by sequence
    pub fn name_matrix(&self, configuration: &GridConfiguration) -> Vec<Vec<String>> {
        name_matrix(configuration)
    }

    /// Apply `constraints` against the best configuration along `orientation`
    pub fn resolve(
        &self,
        orientation: Orientation,
        constraints: &[EqualityConstraint],
    ) -> Result<Resolution, LayoutError> {
        resolve(
            self.configuration(orientation),
            orientation,
            constraints,
            &self.config,
        )
    }
}
