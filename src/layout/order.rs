//! Dependency ordering of equality constraints
//!
//! A constraint that reads `x.width` must run after the constraint that
//! writes `x.width`. Constraints with no ordering between them keep their
//! list order.

use std::collections::{BTreeSet, HashMap};

use crate::parser::{EqualityConstraint, PropertyRef};

use super::error::LayoutError;

/// Indices of `constraints` in an order that respects their dependencies
pub fn dependency_order(constraints: &[EqualityConstraint]) -> Result<Vec<usize>, LayoutError> {
    let mut writers: HashMap<&PropertyRef, usize> = HashMap::new();
    for (index, constraint) in constraints.iter().enumerate() {
        if let Some(&previous) = writers.get(constraint.target()) {
            return Err(LayoutError::conflicting(
                vec![
                    constraints[previous].text().to_string(),
                    constraint.text().to_string(),
                ],
                format!("'{}' is assigned more than once", constraint.target()),
            ));
        }
        writers.insert(constraint.target(), index);
    }

    let mut predecessors = vec![BTreeSet::new(); constraints.len()];
    let mut successors = vec![BTreeSet::new(); constraints.len()];
    for (index, constraint) in constraints.iter().enumerate() {
        for operand in constraint.operands() {
            match writers.get(&operand.property) {
                Some(&writer) if writer == index => {
                    let target = constraint.target().to_string();
                    return Err(LayoutError::circular(vec![target.clone(), target]));
                }
                Some(&writer) => {
                    predecessors[index].insert(writer);
                    successors[writer].insert(index);
                }
                None => {}
            }
        }
    }

    let mut in_degree: Vec<usize> = predecessors.iter().map(BTreeSet::len).collect();
    let mut ready: BTreeSet<usize> = (0..constraints.len()).filter(|&i| in_degree[i] == 0).collect();
    let mut order = Vec::with_capacity(constraints.len());

    while let Some(index) = ready.pop_first() {
        order.push(index);
        for &next in &successors[index] {
            in_degree[next] -= 1;
            if in_degree[next] == 0 {
                ready.insert(next);
            }
        }
    }

    if order.len() < constraints.len() {
        let mut remaining = vec![true; constraints.len()];
        for &index in &order {
            remaining[index] = false;
        }
        return Err(LayoutError::circular(find_cycle(
            constraints,
            &predecessors,
            &remaining,
        )));
    }

    log::debug!("constraint order: {:?}", order);
    Ok(order)
}

/// Walk backwards through unprocessed constraints until one repeats
fn find_cycle(
    constraints: &[EqualityConstraint],
    predecessors: &[BTreeSet<usize>],
    remaining: &[bool],
) -> Vec<String> {
    let mut path: Vec<usize> = Vec::new();
    let mut current = remaining.iter().position(|&r| r);

    while let Some(node) = current {
        if let Some(start) = path.iter().position(|&n| n == node) {
            let mut cycle: Vec<String> = path[start..]
                .iter()
                .rev()
                .map(|&i| constraints[i].target().to_string())
                .collect();
            if let Some(first) = cycle.first().cloned() {
                cycle.push(first);
            }
            return cycle;
        }
        path.push(node);
        current = predecessors[node].iter().copied().find(|&p| remaining[p]);
    }

    path.iter()
        .map(|&i| constraints[i].target().to_string())
        .collect()
}
