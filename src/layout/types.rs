//! Core types for the layout graph

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::parser::Attribute;

/// Extent used to represent "unbounded"
pub const MAX_SIZE: f64 = 16_777_216.0; // 2^24

/// Per-axis sizing rule of a rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", try_from = "String")]
pub enum SizingPolicy {
    Fixed,
    FillSpace,
    /// Sized like `Fixed` for limits and compression
    FitContent,
}

impl SizingPolicy {
    pub fn is_flexible(&self) -> bool {
        matches!(self, SizingPolicy::FillSpace)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SizingPolicy::Fixed => "FIXED",
            SizingPolicy::FillSpace => "FILL_SPACE",
            SizingPolicy::FitContent => "FIT_CONTENT",
        }
    }
}

impl fmt::Display for SizingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SizingPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "FIXED" => Ok(SizingPolicy::Fixed),
            "FILL_SPACE" => Ok(SizingPolicy::FillSpace),
            "FIT_CONTENT" => Ok(SizingPolicy::FitContent),
            _ => Err(format!("unknown sizing policy '{}'", s)),
        }
    }
}

impl TryFrom<String> for SizingPolicy {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Measurement axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub fn cross(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }
}

impl From<Attribute> for Axis {
    fn from(attribute: Attribute) -> Self {
        match attribute {
            Attribute::Width => Axis::Horizontal,
            Attribute::Height => Axis::Vertical,
        }
    }
}

/// Whether a grid configuration is row-major or column-major
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Row,
    Column,
}

impl Orientation {
    /// Axis along which the cells of one sequence are laid out
    pub fn main_axis(self) -> Axis {
        match self {
            Orientation::Row => Axis::Horizontal,
            Orientation::Column => Axis::Vertical,
        }
    }

    /// Axis along which successive sequences are stacked
    pub fn cross_axis(self) -> Axis {
        self.main_axis().cross()
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Row => write!(f, "row"),
            Orientation::Column => write!(f, "column"),
        }
    }
}

/// A named rectangle with per-axis sizing policies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub name: String,
    pub width: f64,
    pub height: f64,
    pub left: f64,
    pub top: f64,
    pub horizontal: SizingPolicy,
    pub vertical: SizingPolicy,
}

impl Rectangle {
    pub fn new(name: impl Into<String>, left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            left,
            top,
            horizontal: SizingPolicy::Fixed,
            vertical: SizingPolicy::Fixed,
        }
    }

    /// Set both sizing policies
    pub fn with_policies(mut self, horizontal: SizingPolicy, vertical: SizingPolicy) -> Self {
        self.horizontal = horizontal;
        self.vertical = vertical;
        self
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn extent(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    pub fn start(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.left,
            Axis::Vertical => self.top,
        }
    }

    pub fn end(&self, axis: Axis) -> f64 {
        self.start(axis) + self.extent(axis)
    }

    pub fn policy(&self, axis: Axis) -> SizingPolicy {
        match axis {
            Axis::Horizontal => self.horizontal,
            Axis::Vertical => self.vertical,
        }
    }

    pub fn set_extent(&mut self, axis: Axis, value: f64) {
        match axis {
            Axis::Horizontal => self.width = value,
            Axis::Vertical => self.height = value,
        }
    }

    pub fn set_start(&mut self, axis: Axis, value: f64) {
        match axis {
            Axis::Horizontal => self.left = value,
            Axis::Vertical => self.top = value,
        }
    }

    pub fn set_policy(&mut self, axis: Axis, policy: SizingPolicy) {
        match axis {
            Axis::Horizontal => self.horizontal = policy,
            Axis::Vertical => self.vertical = policy,
        }
    }

    /// Smallest extent the rectangle accepts along `axis`
    pub fn minimum(&self, axis: Axis) -> f64 {
        if self.policy(axis).is_flexible() {
            0.0
        } else {
            self.extent(axis)
        }
    }

    /// Largest extent the rectangle accepts along `axis`
    pub fn maximum(&self, axis: Axis, max_size: f64) -> f64 {
        if self.policy(axis).is_flexible() {
            max_size
        } else {
            self.extent(axis)
        }
    }

    /// Extent that may be given up when squeezing along `axis`
    pub fn compressable(&self, axis: Axis) -> f64 {
        if self.policy(axis).is_flexible() {
            self.extent(axis)
        } else {
            0.0
        }
    }

    /// Extent that may be gained when stretching along `axis`
    pub fn expandable(&self, axis: Axis, max_size: f64) -> f64 {
        if self.policy(axis).is_flexible() {
            max_size
        } else {
            0.0
        }
    }

    pub fn is_origin(&self) -> bool {
        self.left == 0.0 && self.top == 0.0
    }
}

/// Rows or columns of rectangles
pub type GridConfiguration = Vec<Vec<Rectangle>>;

/// Far right/bottom extent of a rectangle set
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Boundary {
    pub width: f64,
    pub height: f64,
}

impl Boundary {
    pub fn of<'a>(rectangles: impl IntoIterator<Item = &'a Rectangle>) -> Self {
        rectangles
            .into_iter()
            .fold(Boundary::default(), |acc, rect| Boundary {
                width: acc.width.max(rect.right()),
                height: acc.height.max(rect.bottom()),
            })
    }

    pub fn extent(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }
}

/// Aggregate size bounds of a layout
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Limits {
    pub minimum_width: f64,
    pub minimum_height: f64,
    pub maximum_width: f64,
    pub maximum_height: f64,
}

impl Limits {
    /// Bounds reported when an axis has no linear grid
    pub fn impossible(max_size: f64) -> Self {
        Self {
            minimum_width: max_size,
            minimum_height: max_size,
            maximum_width: 0.0,
            maximum_height: 0.0,
        }
    }

    pub fn is_impossible(&self, max_size: f64) -> bool {
        *self == Self::impossible(max_size)
    }

    /// Loosest bounds across the row and column interpretations
    pub fn reconcile(rows: &Limits, columns: &Limits) -> Limits {
        Limits {
            minimum_width: rows.minimum_width.min(columns.minimum_width),
            minimum_height: rows.minimum_height.min(columns.minimum_height),
            maximum_width: rows.maximum_width.max(columns.maximum_width),
            maximum_height: rows.maximum_height.max(columns.maximum_height),
        }
    }

    pub fn minimum(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.minimum_width,
            Axis::Vertical => self.minimum_height,
        }
    }

    pub fn maximum(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.maximum_width,
            Axis::Vertical => self.maximum_height,
        }
    }
}

impl fmt::Display for Limits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "width {}..{}, height {}..{}",
            self.minimum_width, self.maximum_width, self.minimum_height, self.maximum_height
        )
    }
}

/// Identity of a shared border segment: where the shared span starts
/// and the coordinate of the seam itself
#[derive(Debug, Clone, Copy)]
pub struct EdgeKey {
    pub span_start: f64,
    pub seam: f64,
}

impl EdgeKey {
    pub fn new(span_start: f64, seam: f64) -> Self {
        // +0.0 folds -0.0 into the same key
        Self {
            span_start: span_start + 0.0,
            seam: seam + 0.0,
        }
    }
}

impl PartialEq for EdgeKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for EdgeKey {}

impl PartialOrd for EdgeKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EdgeKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.span_start
            .total_cmp(&other.span_start)
            .then(self.seam.total_cmp(&other.seam))
    }
}

impl Hash for EdgeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.span_start.to_bits().hash(state);
        self.seam.to_bits().hash(state);
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.span_start, self.seam)
    }
}

/// A shared border segment between two touching rectangles
///
/// `before` is the upper (horizontal seam) or left (vertical seam)
/// rectangle, `after` the one below or to the right. Both are indices into
/// the rectangle slice the adjacency was built from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub before: usize,
    pub after: usize,
    pub span_start: f64,
    pub span_end: f64,
    pub seam: f64,
}

impl Edge {
    pub fn key(&self) -> EdgeKey {
        EdgeKey::new(self.span_start, self.seam)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_parse_case_insensitive() {
        assert_eq!("fixed".parse::<SizingPolicy>(), Ok(SizingPolicy::Fixed));
        assert_eq!("Fill_Space".parse::<SizingPolicy>(), Ok(SizingPolicy::FillSpace));
        assert_eq!("FIT_CONTENT".parse::<SizingPolicy>(), Ok(SizingPolicy::FitContent));
        assert!("stretch".parse::<SizingPolicy>().is_err());
    }

    #[test]
    fn test_policy_serializes_symbolic_name() {
        let json = serde_json::to_string(&SizingPolicy::FillSpace).unwrap();
        assert_eq!(json, "\"FILL_SPACE\"");
    }

    #[test]
    fn test_flexible_measures() {
        let r = Rectangle::new("a", 0.0, 0.0, 100.0, 40.0)
            .with_policies(SizingPolicy::FillSpace, SizingPolicy::FitContent);
        assert_eq!(r.minimum(Axis::Horizontal), 0.0);
        assert_eq!(r.maximum(Axis::Horizontal, MAX_SIZE), MAX_SIZE);
        assert_eq!(r.compressable(Axis::Horizontal), 100.0);
        assert_eq!(r.expandable(Axis::Horizontal, MAX_SIZE), MAX_SIZE);
        assert_eq!(r.minimum(Axis::Vertical), 40.0);
        assert_eq!(r.maximum(Axis::Vertical, MAX_SIZE), 40.0);
        assert_eq!(r.compressable(Axis::Vertical), 0.0);
        assert_eq!(r.expandable(Axis::Vertical, MAX_SIZE), 0.0);
    }

    #[test]
    fn test_axis_accessors() {
        let mut r = Rectangle::new("a", 10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.end(Axis::Horizontal), 40.0);
        assert_eq!(r.end(Axis::Vertical), 60.0);
        r.set_extent(Axis::Vertical, 5.0);
        r.set_start(Axis::Horizontal, 0.0);
        assert_eq!((r.left, r.height), (0.0, 5.0));
    }

    #[test]
    fn test_boundary() {
        let rects = [
            Rectangle::new("a", 0.0, 0.0, 100.0, 50.0),
            Rectangle::new("b", 100.0, 0.0, 80.0, 70.0),
        ];
        assert_eq!(
            Boundary::of(&rects),
            Boundary {
                width: 180.0,
                height: 70.0
            }
        );
    }

    #[test]
    fn test_limits_reconcile_takes_loosest() {
        let rows = Limits {
            minimum_width: 300.0,
            minimum_height: 50.0,
            maximum_width: 300.0,
            maximum_height: 50.0,
        };
        let merged = Limits::reconcile(&rows, &Limits::impossible(MAX_SIZE));
        assert_eq!(merged, rows);
    }

    #[test]
    fn test_edge_key_numeric_order() {
        // "9" > "10" as strings; numeric ordering must not repeat that
        let mut keys = vec![EdgeKey::new(10.0, 0.0), EdgeKey::new(9.0, 0.0)];
        keys.sort();
        assert_eq!(keys[0].span_start, 9.0);
        assert_eq!(EdgeKey::new(-0.0, 5.0), EdgeKey::new(0.0, 5.0));
    }
}
