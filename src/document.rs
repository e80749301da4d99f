//! Layout documents: the JSON form rectangles and constraints travel in
//!
//! ```json
//! {
//!   "layout": [
//!     {"name": "a", "width": 100, "height": 50, "left": 0, "top": 0,
//!      "horizontal": "FIXED", "vertical": "fill_space"}
//!   ],
//!   "constraints": ["a.width = 2 * a.height"]
//! }
//! ```
//!
//! Loading is lenient per record: a rectangle with a missing or malformed
//! field is dropped with a warning and the rest of the file still loads.

use std::collections::HashSet;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::error::ParseError;
use crate::layout::Rectangle;
use crate::parser::{parse_all, EqualityConstraint};

/// Errors that can occur when reading or writing a layout document
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Failed to read or write layout document: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse layout JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Layout document must be an object with a 'layout' array")]
    MissingLayout,
}

/// Rectangles plus the constraint strings that apply to them
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LayoutDocument {
    pub layout: Vec<Rectangle>,
    pub constraints: Vec<String>,
}

impl LayoutDocument {
    pub fn new(layout: Vec<Rectangle>, constraints: Vec<String>) -> Self {
        Self {
            layout,
            constraints,
        }
    }

    /// Load a document from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, DocumentError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parse a document, dropping records that do not describe a rectangle
    pub fn from_str(content: &str) -> Result<Self, DocumentError> {
        let root: Value = serde_json::from_str(content)?;
        let records = root
            .get("layout")
            .and_then(Value::as_array)
            .ok_or(DocumentError::MissingLayout)?;

        let mut names = HashSet::new();
        let mut layout = Vec::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            match read_rectangle(record) {
                Ok(rect) if !names.insert(rect.name.clone()) => {
                    log::warn!("layout record {}: duplicate name '{}', dropped", index, rect.name);
                }
                Ok(rect) => layout.push(rect),
                Err(reason) => log::warn!("layout record {}: {}, dropped", index, reason),
            }
        }

        let constraints = match root.get("constraints") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| {
                    let text = item.as_str();
                    if text.is_none() {
                        log::warn!("constraint {} is not a string, dropped", item);
                    }
                    text.map(str::to_string)
                })
                .collect(),
            Some(other) => {
                log::warn!("'constraints' is not an array, ignored: {}", other);
                Vec::new()
            }
        };

        log::debug!(
            "loaded {} of {} rectangles and {} constraints",
            layout.len(),
            records.len(),
            constraints.len()
        );
        Ok(Self {
            layout,
            constraints,
        })
    }

    /// Pretty-printed JSON with policies as symbolic names
    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the document as JSON
    pub fn save(&self, path: &Path) -> Result<(), DocumentError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// A copy of this document with the rectangle called `name` replaced
    ///
    /// Returns `None` when no rectangle has that name.
    pub fn replace(&self, name: &str, rectangle: Rectangle) -> Option<Self> {
        let position = self.layout.iter().position(|r| r.name == name)?;
        let mut layout = self.layout.clone();
        layout[position] = rectangle;
        Some(Self {
            layout,
            constraints: self.constraints.clone(),
        })
    }

    /// Parse every constraint string, reporting the first malformed one
    /// with its index
    pub fn parse_constraints(&self) -> Result<Vec<EqualityConstraint>, (usize, ParseError)> {
        parse_all(&self.constraints)
    }
}

fn read_rectangle(record: &Value) -> Result<Rectangle, String> {
    let rect: Rectangle = serde_json::from_value(record.clone()).map_err(|e| e.to_string())?;
    if rect.width < 0.0 || rect.height < 0.0 {
        return Err(format!("'{}' has a negative extent", rect.name));
    }
    if ![rect.width, rect.height, rect.left, rect.top]
        .iter()
        .all(|v| v.is_finite())
    {
        return Err(format!("'{}' has a non-finite measurement", rect.name));
    }
    Ok(rect)
}
