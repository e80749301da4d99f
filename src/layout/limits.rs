//! Aggregate size limits of a grid configuration
//!
//! Along the main axis the cells of a sequence add up and the tightest
//! sequence decides; along the cross axis each sequence is as thick as its
//! thickest (for minimums) or thinnest (for maximums) member, and the
//! sequences add up.

use super::types::{GridConfiguration, Limits, Orientation};

/// Limits for `configuration` read as rows or columns
pub fn compute_limits(
    configuration: &GridConfiguration,
    orientation: Orientation,
    max_size: f64,
) -> Limits {
    if configuration.is_empty() {
        return Limits::impossible(max_size);
    }
    let main = orientation.main_axis();
    let cross = orientation.cross_axis();

    let mut minimum_main: f64 = 0.0;
    let mut maximum_main = max_size;
    let mut minimum_cross = 0.0;
    let mut maximum_cross = 0.0;

    for sequence in configuration {
        let sequence_minimum_main: f64 = sequence.iter().map(|r| r.minimum(main)).sum();
        let sequence_maximum_main: f64 = sequence.iter().map(|r| r.maximum(main, max_size)).sum();
        let sequence_minimum_cross = sequence
            .iter()
            .map(|r| r.minimum(cross))
            .fold(0.0, f64::max);
        let sequence_maximum_cross = sequence
            .iter()
            .map(|r| r.maximum(cross, max_size))
            .fold(max_size, f64::min);

        minimum_main = minimum_main.max(sequence_minimum_main);
        maximum_main = maximum_main.min(sequence_maximum_main);
        minimum_cross += sequence_minimum_cross;
        maximum_cross += sequence_maximum_cross;
    }
    let maximum_cross = f64::min(max_size, maximum_cross);

    match orientation {
        Orientation::Row => Limits {
            minimum_width: minimum_main,
            minimum_height: minimum_cross,
            maximum_width: maximum_main,
            maximum_height: maximum_cross,
        },
        Orientation::Column => Limits {
            minimum_width: minimum_cross,
            minimum_height: minimum_main,
            maximum_width: maximum_cross,
            maximum_height: maximum_main,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::types::{Rectangle, SizingPolicy::*, MAX_SIZE};

    fn rect(name: &str, width: f64, height: f64) -> Rectangle {
        Rectangle::new(name, 0.0, 0.0, width, height)
    }

    #[test]
    fn test_empty_is_impossible() {
        let limits = compute_limits(&Vec::new(), Orientation::Row, MAX_SIZE);
        assert!(limits.is_impossible(MAX_SIZE));
        assert_eq!(limits.minimum_width, MAX_SIZE);
        assert_eq!(limits.maximum_height, 0.0);
    }

    #[test]
    fn test_fixed_row() {
        let rows = vec![vec![rect("a", 100.0, 50.0), rect("b", 100.0, 50.0), rect("c", 100.0, 50.0)]];
        let limits = compute_limits(&rows, Orientation::Row, MAX_SIZE);
        assert_eq!(
            limits,
            Limits {
                minimum_width: 300.0,
                minimum_height: 50.0,
                maximum_width: 300.0,
                maximum_height: 50.0,
            }
        );
    }

    #[test]
    fn test_single_flexible_rectangle() {
        let rows = vec![vec![rect("a", 100.0, 100.0).with_policies(FillSpace, FillSpace)]];
        let limits = compute_limits(&rows, Orientation::Row, MAX_SIZE);
        assert_eq!(limits.minimum_width, 0.0);
        assert_eq!(limits.minimum_height, 0.0);
        assert_eq!(limits.maximum_width, MAX_SIZE);
        assert_eq!(limits.maximum_height, MAX_SIZE);
    }

    #[test]
    fn test_rows_mixed_policies() {
        // row 1: fixed 100 + flexible; row 2: fixed 150 + fixed 50
        let rows = vec![
            vec![
                rect("a", 100.0, 40.0),
                rect("b", 100.0, 40.0).with_policies(FillSpace, FillSpace),
            ],
            vec![rect("c", 150.0, 60.0), rect("d", 50.0, 30.0).with_policies(Fixed, FillSpace)],
        ];
        let limits = compute_limits(&rows, Orientation::Row, MAX_SIZE);
        assert_eq!(limits.minimum_width, 200.0);
        assert_eq!(limits.maximum_width, 200.0);
        // row 1 min height 40, row 2 min height 60
        assert_eq!(limits.minimum_height, 100.0);
        // row 1 max height min(40, MAX) = 40, row 2 min(60, MAX) = 60
        assert_eq!(limits.maximum_height, 100.0);
    }

    #[test]
    fn test_columns_are_transposed() {
        let columns = vec![
            vec![rect("a", 100.0, 50.0), rect("b", 100.0, 50.0)],
            vec![rect("c", 80.0, 100.0).with_policies(FillSpace, Fixed)],
        ];
        let limits = compute_limits(&columns, Orientation::Column, MAX_SIZE);
        assert_eq!(limits.minimum_height, 100.0);
        assert_eq!(limits.maximum_height, 100.0);
        assert_eq!(limits.minimum_width, 100.0);
        assert_eq!(limits.maximum_width, MAX_SIZE);
    }

    #[test]
    fn test_maximum_capped() {
        let rows = vec![
            vec![rect("a", 10.0, 10.0).with_policies(FillSpace, FillSpace)],
            vec![rect("b", 10.0, 10.0).with_policies(FillSpace, FillSpace)],
        ];
        let limits = compute_limits(&rows, Orientation::Row, MAX_SIZE);
        assert_eq!(limits.maximum_height, MAX_SIZE);
    }

    #[test]
    fn test_fit_content_sizes_like_fixed() {
        let rows = vec![vec![rect("a", 70.0, 20.0).with_policies(FitContent, FitContent)]];
        let limits = compute_limits(&rows, Orientation::Row, MAX_SIZE);
        assert_eq!((limits.minimum_width, limits.maximum_width), (70.0, 70.0));
    }
}
