//! Best-effort regrouping when no aligned grid exists
//!
//! The unaligned walk takes the first unvisited neighbour at every step
//! instead of requiring one-to-one seams. Resizing then gives each sequence
//! a uniform cross extent and lays the result out without gaps.

use super::adjacency::Adjacency;
use super::grid::{find_origin, is_degenerate, restack};
use super::types::{GridConfiguration, Orientation, Rectangle};

/// Greedy grouping into rows or columns
///
/// Empty when some rectangle cannot be reached; that axis then has no
/// linear structure at all.
pub fn unaligned_configuration(
    rectangles: &[Rectangle],
    adjacency: &Adjacency,
    orientation: Orientation,
) -> Vec<Vec<usize>> {
    let Some(origin) = find_origin(rectangles) else {
        return Vec::new();
    };
    let main = orientation.main_axis();
    let cross = orientation.cross_axis();
    let mut visited = vec![false; rectangles.len()];

    visited[origin] = true;
    let mut starts = vec![origin];
    let mut current = origin;
    while let Some(next) = adjacency.successors(current, cross).find(|&i| !visited[i]) {
        visited[next] = true;
        starts.push(next);
        current = next;
    }

    let mut configuration = Vec::with_capacity(starts.len());
    for start in starts {
        let mut sequence = vec![start];
        let mut current = start;
        while let Some(next) = adjacency.successors(current, main).find(|&i| !visited[i]) {
            visited[next] = true;
            sequence.push(next);
            current = next;
        }
        configuration.push(sequence);
    }

    if visited.contains(&false) || is_degenerate(&configuration, rectangles.len()) {
        log::debug!("unaligned {} grouping covers no linear structure", orientation);
        return Vec::new();
    }
    configuration
}

/// Give every sequence a single cross extent and close all gaps
///
/// Stops at the first sequence whose fixed members disagree on their cross
/// extent or which has nothing to compress along the main axis; sequences
/// before it are kept.
pub fn resize_configuration(
    configuration: &GridConfiguration,
    orientation: Orientation,
) -> GridConfiguration {
    let main = orientation.main_axis();
    let cross = orientation.cross_axis();
    let mut resized: GridConfiguration = Vec::with_capacity(configuration.len());

    for (index, sequence) in configuration.iter().enumerate() {
        let mut fixed = sequence
            .iter()
            .filter(|r| !r.policy(cross).is_flexible())
            .map(|r| r.extent(cross));
        let shared = match fixed.next() {
            Some(first) if fixed.all(|extent| extent == first) => Some(first),
            Some(_) => {
                log::warn!(
                    "{} {}: fixed members disagree on their extent, stopping compression",
                    orientation,
                    index
                );
                break;
            }
            None => None,
        };

        let compressable: f64 = sequence.iter().map(|r| r.compressable(main)).sum();
        if compressable <= 0.0 {
            log::warn!(
                "{} {}: nothing to compress along the {}, stopping compression",
                orientation,
                index,
                orientation
            );
            break;
        }

        let extent = shared.unwrap_or_else(|| {
            sequence
                .iter()
                .map(|r| r.extent(cross))
                .fold(f64::INFINITY, f64::min)
        });

        resized.push(
            sequence
                .iter()
                .map(|r| {
                    let mut r = r.clone();
                    r.set_extent(cross, extent);
                    r
                })
                .collect(),
        );
    }

    restack(resized, orientation)
}
