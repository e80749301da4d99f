//! Strict row/column grid detection
//!
//! Starting from the rectangle anchored at the origin, the walk first moves
//! along the stacking axis to find where each sequence starts, then along
//! the main axis to collect each sequence. A row configuration walks down
//! for row starts and right along rows; a column configuration is the
//! transpose.

use super::adjacency::Adjacency;
use super::types::{GridConfiguration, Orientation, Rectangle};

/// Index of the first rectangle anchored at `(0, 0)`
pub fn find_origin(rectangles: &[Rectangle]) -> Option<usize> {
    rectangles.iter().position(Rectangle::is_origin)
}

/// A partition where every sequence holds one rectangle never crossed a
/// seam along the main axis, so it is no grid along that axis.
pub(crate) fn is_degenerate(sequences: &[Vec<usize>], total: usize) -> bool {
    total > 1 && sequences.iter().all(|s| s.len() == 1)
}

/// Index-based configuration where every rectangle appears exactly once
///
/// Returns an empty configuration when the rectangles do not form an
/// aligned grid along `orientation`.
pub fn strict_configuration(
    rectangles: &[Rectangle],
    adjacency: &Adjacency,
    orientation: Orientation,
) -> Vec<Vec<usize>> {
    let Some(origin) = find_origin(rectangles) else {
        log::debug!("{} grid: no rectangle at the origin", orientation);
        return Vec::new();
    };
    let main = orientation.main_axis();
    let cross = orientation.cross_axis();

    // Sequence starts, walking along the stacking axis
    let mut starts = vec![origin];
    let mut current = origin;
    loop {
        if adjacency.after(current, main).len() > 1 {
            log::debug!(
                "{} grid: '{}' has more than one neighbour along the {}",
                orientation,
                rectangles[current].name,
                orientation
            );
            return Vec::new();
        }
        let Some(next) = adjacency.successors(current, cross).next() else {
            break;
        };
        if starts.contains(&next) {
            return Vec::new();
        }
        starts.push(next);
        current = next;
    }

    let mut visited = vec![false; rectangles.len()];
    let mut configuration = Vec::with_capacity(starts.len());
    for start in starts {
        let mut sequence = Vec::new();
        let mut current = start;
        loop {
            if std::mem::replace(&mut visited[current], true) {
                log::debug!(
                    "{} grid: '{}' reached twice",
                    orientation,
                    rectangles[current].name
                );
                return Vec::new();
            }
            sequence.push(current);

            let next = match adjacency.after(current, main) {
                [] => break,
                [key] => match adjacency.neighbour(main, key) {
                    Some(next) => next,
                    None => return Vec::new(),
                },
                _ => return Vec::new(),
            };
            if adjacency.before(next, main).len() > 1 {
                return Vec::new();
            }
            current = next;
        }
        configuration.push(sequence);
    }

    if visited.contains(&false) {
        log::debug!(
            "{} grid: {} of {} rectangles unreachable",
            orientation,
            visited.iter().filter(|v| !**v).count(),
            rectangles.len()
        );
        return Vec::new();
    }
    if is_degenerate(&configuration, rectangles.len()) {
        return Vec::new();
    }
    configuration
}

/// Replace indices with the rectangles they point at
pub fn materialize(rectangles: &[Rectangle], indices: &[Vec<usize>]) -> GridConfiguration {
    indices
        .iter()
        .map(|sequence| sequence.iter().map(|&i| rectangles[i].clone()).collect())
        .collect()
}

/// Lay sequences out with no gaps: cells follow each other along the main
/// axis, and each sequence starts where the previous one's largest cross
/// extent ends.
pub(crate) fn restack(configuration: GridConfiguration, orientation: Orientation) -> GridConfiguration {
    let main = orientation.main_axis();
    let cross = orientation.cross_axis();
    let mut offset = 0.0;

    configuration
        .into_iter()
        .map(|sequence| {
            let mut cursor = 0.0;
            let mut depth: f64 = 0.0;
            let sequence = sequence
                .into_iter()
                .map(|mut rect| {
                    rect.set_start(main, cursor);
                    rect.set_start(cross, offset);
                    cursor += rect.extent(main);
                    depth = depth.max(rect.extent(cross));
                    rect
                })
                .collect::<Vec<_>>();
            offset += depth;
            sequence
        })
        .collect()
}

/// Names of a configuration, for display
pub fn name_matrix(configuration: &GridConfiguration) -> Vec<Vec<String>> {
    configuration
        .iter()
        .map(|sequence| sequence.iter().map(|r| r.name.clone()).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rect(name: &str, left: f64, top: f64, width: f64, height: f64) -> Rectangle {
        Rectangle::new(name, left, top, width, height)
    }

    fn detect(rects: &[Rectangle], orientation: Orientation) -> Vec<Vec<usize>> {
        let adj = Adjacency::build(rects);
        strict_configuration(rects, &adj, orientation)
    }

    fn two_by_two() -> Vec<Rectangle> {
        vec![
            rect("a", 0.0, 0.0, 100.0, 50.0),
            rect("b", 100.0, 0.0, 100.0, 50.0),
            rect("c", 0.0, 50.0, 100.0, 50.0),
            rect("d", 100.0, 50.0, 100.0, 50.0),
        ]
    }

    #[test]
    fn test_two_by_two_rows_and_columns() {
        let rects = two_by_two();
        assert_eq!(detect(&rects, Orientation::Row), vec![vec![0, 1], vec![2, 3]]);
        assert_eq!(detect(&rects, Orientation::Column), vec![vec![0, 2], vec![1, 3]]);
    }

    #[test]
    fn test_no_origin() {
        let rects = vec![rect("a", 10.0, 0.0, 100.0, 50.0)];
        assert!(detect(&rects, Orientation::Row).is_empty());
    }

    #[test]
    fn test_single_rectangle() {
        let rects = vec![rect("a", 0.0, 0.0, 100.0, 50.0)];
        assert_eq!(detect(&rects, Orientation::Row), vec![vec![0]]);
        assert_eq!(detect(&rects, Orientation::Column), vec![vec![0]]);
    }

    #[test]
    fn test_vertical_strip_is_not_a_row_grid() {
        let rects = vec![
            rect("a", 0.0, 0.0, 100.0, 50.0),
            rect("b", 0.0, 50.0, 100.0, 50.0),
        ];
        assert!(detect(&rects, Orientation::Row).is_empty());
        assert_eq!(detect(&rects, Orientation::Column), vec![vec![0, 1]]);
    }

    #[test]
    fn test_row_start_with_two_right_neighbours_aborts() {
        let rects = vec![
            rect("a", 0.0, 0.0, 100.0, 100.0),
            rect("b", 100.0, 0.0, 100.0, 50.0),
            rect("c", 100.0, 50.0, 100.0, 50.0),
        ];
        assert!(detect(&rects, Orientation::Row).is_empty());
    }

    #[test]
    fn test_spanning_rectangle_is_not_counted_twice() {
        let rects = vec![
            rect("a", 0.0, 0.0, 100.0, 50.0),
            rect("t", 100.0, 0.0, 100.0, 100.0),
            rect("c", 0.0, 50.0, 100.0, 50.0),
        ];
        assert!(detect(&rects, Orientation::Row).is_empty());
    }

    #[test]
    fn test_detached_rectangle_fails_completeness() {
        let mut rects = two_by_two();
        rects.push(rect("far", 500.0, 500.0, 10.0, 10.0));
        assert!(detect(&rects, Orientation::Row).is_empty());
    }

    #[test]
    fn test_restack_closes_gaps() {
        let config = vec![
            vec![rect("a", 5.0, 5.0, 100.0, 40.0), rect("b", 200.0, 5.0, 50.0, 60.0)],
            vec![rect("c", 0.0, 90.0, 30.0, 10.0)],
        ];
        let restacked = restack(config, Orientation::Row);
        let positions: Vec<(f64, f64)> = restacked
            .iter()
            .flatten()
            .map(|r| (r.left, r.top))
            .collect();
        assert_eq!(positions, vec![(0.0, 0.0), (100.0, 0.0), (0.0, 60.0)]);
    }

    #[test]
    fn test_name_matrix() {
        let rects = two_by_two();
        let config = materialize(&rects, &detect(&rects, Orientation::Column));
        assert_eq!(
            name_matrix(&config),
            vec![vec!["a".to_string(), "c".to_string()], vec!["b".to_string(), "d".to_string()]]
        );
    }
}
