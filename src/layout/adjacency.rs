//! Geometric adjacency between touching rectangles
//!
//! Two rectangles are adjacent when one's edge lies on the other's opposite
//! edge and the two overlap over a nonzero span along that edge. Each
//! shared seam becomes an [`Edge`], stored once under its [`EdgeKey`] no
//! matter which of the two rectangles discovers it first.

use indexmap::IndexMap;

use super::types::{Axis, Edge, EdgeKey, Rectangle};

/// Edge keys on each side of one rectangle, sorted by span start
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sides {
    pub top: Vec<EdgeKey>,
    pub right: Vec<EdgeKey>,
    pub bottom: Vec<EdgeKey>,
    pub left: Vec<EdgeKey>,
}

impl Sides {
    fn sort(&mut self) {
        self.top.sort();
        self.right.sort();
        self.bottom.sort();
        self.left.sort();
    }
}

/// Adjacency graph over a rectangle slice
#[derive(Debug, Clone, Default)]
pub struct Adjacency {
    /// Seams where a bottom edge meets a top edge
    horizontal: IndexMap<EdgeKey, Edge>,
    /// Seams where a right edge meets a left edge
    vertical: IndexMap<EdgeKey, Edge>,
    sides: Vec<Sides>,
}

/// Shared part of `[a_start, a_end)` and `[b_start, b_end)`, if nonempty
fn overlap(a_start: f64, a_end: f64, b_start: f64, b_end: f64) -> Option<(f64, f64)> {
    let start = a_start.max(b_start);
    let end = a_end.min(b_end);
    (start < end).then_some((start, end))
}

impl Adjacency {
    /// Build adjacency for every ordered pair of rectangles. O(n²).
    pub fn build(rectangles: &[Rectangle]) -> Self {
        let mut adjacency = Adjacency {
            horizontal: IndexMap::new(),
            vertical: IndexMap::new(),
            sides: vec![Sides::default(); rectangles.len()],
        };

        for (index, node) in rectangles.iter().enumerate() {
            for (other_index, other) in rectangles.iter().enumerate() {
                if index == other_index {
                    continue;
                }
                let across = overlap(node.left, node.right(), other.left, other.right());
                let along = overlap(node.top, node.bottom(), other.top, other.bottom());

                if let Some((start, end)) = across {
                    if node.top == other.bottom() {
                        let key = adjacency.insert_horizontal(other_index, index, start, end, node.top);
                        adjacency.sides[index].top.push(key);
                    }
                    if node.bottom() == other.top {
                        let key =
                            adjacency.insert_horizontal(index, other_index, start, end, node.bottom());
                        adjacency.sides[index].bottom.push(key);
                    }
                }
                if let Some((start, end)) = along {
                    if node.left == other.right() {
                        let key = adjacency.insert_vertical(other_index, index, start, end, node.left);
                        adjacency.sides[index].left.push(key);
                    }
                    if node.right() == other.left {
                        let key =
                            adjacency.insert_vertical(index, other_index, start, end, node.right());
                        adjacency.sides[index].right.push(key);
                    }
                }
            }
        }

        for sides in &mut adjacency.sides {
            sides.sort();
        }

        log::debug!(
            "adjacency: {} rectangles, {} horizontal and {} vertical edges",
            rectangles.len(),
            adjacency.horizontal.len(),
            adjacency.vertical.len()
        );
        adjacency
    }

    fn insert_horizontal(
        &mut self,
        upper: usize,
        lower: usize,
        start: f64,
        end: f64,
        seam: f64,
    ) -> EdgeKey {
        let key = EdgeKey::new(start, seam);
        self.horizontal.entry(key).or_insert(Edge {
            before: upper,
            after: lower,
            span_start: start,
            span_end: end,
            seam,
        });
        key
    }

    fn insert_vertical(&mut self, left: usize, right: usize, start: f64, end: f64, seam: f64) -> EdgeKey {
        let key = EdgeKey::new(start, seam);
        self.vertical.entry(key).or_insert(Edge {
            before: left,
            after: right,
            span_start: start,
            span_end: end,
            seam,
        });
        key
    }

    pub fn horizontal_edges(&self) -> &IndexMap<EdgeKey, Edge> {
        &self.horizontal
    }

    pub fn vertical_edges(&self) -> &IndexMap<EdgeKey, Edge> {
        &self.vertical
    }

    pub fn sides(&self, index: usize) -> &Sides {
        &self.sides[index]
    }

    pub fn len(&self) -> usize {
        self.sides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sides.is_empty()
    }

    /// Edges crossed when moving along `axis`
    pub fn crossed(&self, axis: Axis) -> &IndexMap<EdgeKey, Edge> {
        match axis {
            Axis::Horizontal => &self.vertical,
            Axis::Vertical => &self.horizontal,
        }
    }

    /// Keys on the far side of `index` along `axis` (right or bottom)
    pub fn after(&self, index: usize, axis: Axis) -> &[EdgeKey] {
        match axis {
            Axis::Horizontal => &self.sides[index].right,
            Axis::Vertical => &self.sides[index].bottom,
        }
    }

    /// Keys on the near side of `index` along `axis` (left or top)
    pub fn before(&self, index: usize, axis: Axis) -> &[EdgeKey] {
        match axis {
            Axis::Horizontal => &self.sides[index].left,
            Axis::Vertical => &self.sides[index].top,
        }
    }

    /// Rectangle across the edge `key` when moving forward along `axis`
    pub fn neighbour(&self, axis: Axis, key: &EdgeKey) -> Option<usize> {
        self.crossed(axis).get(key).map(|edge| edge.after)
    }

    /// Forward neighbours of `index` along `axis`, smallest span start first
    pub fn successors(&self, index: usize, axis: Axis) -> impl Iterator<Item = usize> + '_ {
        self.after(index, axis)
            .iter()
            .filter_map(move |key| self.neighbour(axis, key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(name: &str, left: f64, top: f64, width: f64, height: f64) -> Rectangle {
        Rectangle::new(name, left, top, width, height)
    }

    #[test]
    fn test_side_by_side() {
        let rects = [rect("a", 0.0, 0.0, 100.0, 50.0), rect("b", 100.0, 0.0, 100.0, 50.0)];
        let adj = Adjacency::build(&rects);

        assert_eq!(adj.vertical_edges().len(), 1);
        assert!(adj.horizontal_edges().is_empty());
        let key = EdgeKey::new(0.0, 100.0);
        assert_eq!(adj.sides(0).right, vec![key]);
        assert_eq!(adj.sides(1).left, vec![key]);

        let edge = adj.vertical_edges()[&key];
        assert_eq!((edge.before, edge.after), (0, 1));
        assert_eq!((edge.span_start, edge.span_end, edge.seam), (0.0, 50.0, 100.0));
    }

    #[test]
    fn test_stacked() {
        let rects = [rect("a", 0.0, 0.0, 100.0, 50.0), rect("b", 0.0, 50.0, 100.0, 50.0)];
        let adj = Adjacency::build(&rects);

        let key = EdgeKey::new(0.0, 50.0);
        assert_eq!(adj.sides(0).bottom, vec![key]);
        assert_eq!(adj.sides(1).top, vec![key]);
        assert_eq!(adj.successors(0, Axis::Vertical).collect::<Vec<_>>(), vec![1]);
        assert_eq!(adj.successors(1, Axis::Vertical).count(), 0);
    }

    #[test]
    fn test_corner_contact_is_not_adjacent() {
        let rects = [rect("a", 0.0, 0.0, 100.0, 50.0), rect("b", 100.0, 50.0, 100.0, 50.0)];
        let adj = Adjacency::build(&rects);
        assert!(adj.horizontal_edges().is_empty());
        assert!(adj.vertical_edges().is_empty());
    }

    #[test]
    fn test_contained_span_is_symmetric() {
        // b is narrower than a and sits fully under it
        let rects = [rect("a", 0.0, 0.0, 300.0, 50.0), rect("b", 100.0, 50.0, 100.0, 50.0)];
        let adj = Adjacency::build(&rects);
        let key = EdgeKey::new(100.0, 50.0);
        assert_eq!(adj.sides(0).bottom, vec![key]);
        assert_eq!(adj.sides(1).top, vec![key]);
    }

    #[test]
    fn test_side_lists_sorted_numerically() {
        let rects = [
            rect("a", 0.0, 0.0, 100.0, 30.0),
            rect("c", 100.0, 20.0, 50.0, 10.0),
            rect("b", 100.0, 0.0, 50.0, 20.0),
        ];
        let adj = Adjacency::build(&rects);
        let starts: Vec<f64> = adj.sides(0).right.iter().map(|k| k.span_start).collect();
        assert_eq!(starts, vec![0.0, 20.0]);
        assert_eq!(adj.successors(0, Axis::Horizontal).collect::<Vec<_>>(), vec![2, 1]);
    }
}
