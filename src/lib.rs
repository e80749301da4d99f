//! Layout Graph - grid inference and constraint resolution for rectangle layouts
//!
//! This library derives adjacency between named rectangles, infers aligned
//! row and column grids (compressing the layout when none exists), computes
//! aggregate size limits and resolves equality constraints between
//! rectangle measurements.
//!
//! # Example
//!
//! ```rust
//! use layout_graph::{resolve_document, EngineConfig, LayoutDocument, Orientation};
//!
//! let doc = LayoutDocument::from_str(r#"{
//!     "layout": [
//!         {"name": "a", "width": 100, "height": 50, "left": 0, "top": 0,
//!          "horizontal": "FIXED", "vertical": "FIXED"},
//!         {"name": "b", "width": 100, "height": 50, "left": 100, "top": 0,
//!          "horizontal": "FIXED", "vertical": "FIXED"}
//!     ],
//!     "constraints": ["a.width = b.width * 2"]
//! }"#).unwrap();
//!
//! let resolved = resolve_document(&doc, Orientation::Row, &EngineConfig::default()).unwrap();
//! assert_eq!(resolved.layout[0].width, 200.0);
//! assert_eq!(resolved.layout[1].left, 200.0);
//! ```

pub mod document;
pub mod error;
pub mod layout;
pub mod parser;

pub use document::{DocumentError, LayoutDocument};
pub use error::ParseError;
pub use layout::{
    ConfigError, EngineConfig, GridConfiguration, LayoutError, LayoutGraph, Limits, Orientation,
    Rectangle, Resolution, SizingPolicy,
};
pub use parser::{parse_all, EqualityConstraint};

use thiserror::Error;

/// Errors that can occur anywhere in the load-resolve pipeline
#[derive(Debug, Error)]
pub enum Error {
    /// Error reading or decoding a layout document
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// A constraint string is malformed
    #[error("constraint {index}: {source}")]
    Parse {
        index: usize,
        #[source]
        source: ParseError,
    },

    /// Error during constraint resolution
    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),

    /// Error loading the engine configuration
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<(usize, ParseError)> for Error {
    fn from((index, source): (usize, ParseError)) -> Self {
        Error::Parse { index, source }
    }
}

/// Build the layout graph of a document
pub fn load(doc: &LayoutDocument, config: &EngineConfig) -> LayoutGraph {
    LayoutGraph::with_config(doc.layout.clone(), config.clone())
}

/// Apply a document's constraints along `orientation` and return the
/// resolved document, rectangles in their input order
pub fn resolve_document(
    doc: &LayoutDocument,
    orientation: Orientation,
    config: &EngineConfig,
) -> Result<LayoutDocument, Error> {
    let constraints = doc.parse_constraints()?;
    let graph = load(doc, config);
    let resolution = graph.resolve(orientation, &constraints)?;
    Ok(LayoutDocument::new(
        resolution.apply_to(&doc.layout),
        doc.constraints.clone(),
    ))
}
