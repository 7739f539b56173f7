//! Package cycle detection.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use depgauge_core::graph::PackageId;

/// Efferent package edges: package → packages it depends on.
pub(crate) type PackageEdges = BTreeMap<PackageId, BTreeSet<PackageId>>;

/// Depth-first cycle search along efferent edges.
///
/// A revisit of a package still on the current path is a cycle; the result
/// runs from that package back to itself. Packages are popped from the path
/// on backtrack and fully explored packages are not searched again, so
/// convergent (diamond) shapes never count as cycles.
pub(crate) fn find_cycle(edges: &PackageEdges, start: PackageId) -> Option<Vec<PackageId>> {
    let mut path = Vec::new();
    let mut finished = HashSet::new();
    search(edges, start, &mut path, &mut finished)
}

fn search(
    edges: &PackageEdges,
    node: PackageId,
    path: &mut Vec<PackageId>,
    finished: &mut HashSet<PackageId>,
) -> Option<Vec<PackageId>> {
    if let Some(pos) = path.iter().position(|&p| p == node) {
        let mut cycle = path[pos..].to_vec();
        cycle.push(node);
        return Some(cycle);
    }
    if finished.contains(&node) {
        return None;
    }

    path.push(node);
    for &next in edges.get(&node).into_iter().flatten() {
        if let Some(cycle) = search(edges, next, path, finished) {
            return Some(cycle);
        }
    }
    path.pop();
    finished.insert(node);
    None
}
