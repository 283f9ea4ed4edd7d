//! Shortest path search over a [`Graph`] using Dijkstra's algorithm.
//!
//! All edge weights are non-negative, which the graph builder enforces.
//! When several routes share the minimum total weight, which one is returned
//! depends on the order nodes with equal tentative distance leave the heap.
//! That order is not specified, so callers must only rely on the total
//! weight and the endpoints of the returned path.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::debug;

use crate::Result;
use crate::error::RouteError;
use crate::graph::{Graph, NodeId, Weight};
use crate::models::PathResult;

/// Name reported to clients for the search method
pub const ALGORITHM_NAME: &str = "Dijkstra's Shortest Path";

/// Frontier entry: a node with its tentative distance from the source.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    node: NodeId,
    distance: Weight,
}

impl Candidate {
    fn new(node: NodeId, distance: Weight) -> Self {
        Self { node, distance }
    }
}

// Reversed so that `BinaryHeap` pops the smallest distance first.
impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .partial_cmp(&self.distance)
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.distance == other.distance
    }
}

impl Eq for Candidate {}

/// Find the minimum total weight route from `source` to `target`.
///
/// Both labels are checked for membership before any search work happens;
/// unknown labels are all reported together in [`RouteError::UnknownNode`].
/// The function is pure, so any number of calls may run concurrently on a
/// shared graph.
pub fn find_shortest_path(graph: &Graph, source: &str, target: &str) -> Result<PathResult> {
    let unknown: Vec<String> = [source, target]
        .into_iter()
        .filter(|label| !graph.contains(label))
        .map(str::to_string)
        .collect();
    if !unknown.is_empty() {
        return Err(RouteError::unknown_node(
            unknown,
            graph.nodes().map(str::to_string).collect(),
        ));
    }

    let (Some(src), Some(dst)) = (graph.node_id(source), graph.node_id(target)) else {
        return Err(RouteError::internal(format!(
            "'{source}' or '{target}' passed membership but has no id"
        )));
    };

    if src == dst {
        return build_result(graph, vec![src], 0.0);
    }

    let (distances, previous, settled) = search(graph, src, dst);
    let Some(distance) = distances[dst] else {
        debug!(from = source, to = target, settled, "No path found");
        return Err(RouteError::no_path(source, target));
    };

    let nodes = reconstruct_path(&previous, src, dst)?;
    debug!(
        from = source,
        to = target,
        distance,
        settled,
        hops = nodes.len() - 1,
        "Path found"
    );
    build_result(graph, nodes, distance)
}

type SearchState = (Vec<Option<Weight>>, Vec<Option<NodeId>>, usize);

/// Run the search from `src`, stopping once `dst` is settled.
///
/// Returns best known distances (`None` meaning unreached), predecessors,
/// and the number of nodes settled.
fn search(graph: &Graph, src: NodeId, dst: NodeId) -> SearchState {
    let mut distances: Vec<Option<Weight>> = vec![None; graph.len()];
    let mut previous: Vec<Option<NodeId>> = vec![None; graph.len()];
    let mut visited = vec![false; graph.len()];
    let mut settled = 0;

    let mut queue = BinaryHeap::new();
    distances[src] = Some(0.0);
    queue.push(Candidate::new(src, 0.0));

    while let Some(Candidate { node, distance }) = queue.pop() {
        if visited[node] {
            continue;
        }
        visited[node] = true;
        settled += 1;

        if node == dst {
            break;
        }

        for &(next, weight) in graph.neighbors_of(node) {
            if visited[next] {
                continue;
            }
            let new_distance = distance + weight;
            if distances[next].is_none_or(|best| new_distance < best) {
                distances[next] = Some(new_distance);
                previous[next] = Some(node);
                queue.push(Candidate::new(next, new_distance));
            }
        }
    }

    (distances, previous, settled)
}

fn reconstruct_path(previous: &[Option<NodeId>], src: NodeId, dst: NodeId) -> Result<Vec<NodeId>> {
    let mut path = vec![dst];
    let mut current = dst;
    while current != src {
        current = previous[current].ok_or_else(|| {
            RouteError::internal(format!("predecessor chain broken at node {current}"))
        })?;
        path.push(current);
        if path.len() > previous.len() {
            return Err(RouteError::internal("predecessor chain contains a cycle"));
        }
    }
    path.reverse();
    Ok(path)
}

/// Attach coordinates and verify the weight sum along the path matches the
/// distance the search settled on.
fn build_result(graph: &Graph, nodes: Vec<NodeId>, distance: Weight) -> Result<PathResult> {
    let mut total_weight = 0.0;
    for pair in nodes.windows(2) {
        let weight = graph.edge_weight_between(pair[0], pair[1]).ok_or_else(|| {
            RouteError::internal(format!(
                "no edge between consecutive path nodes '{}' and '{}'",
                graph.label(pair[0]),
                graph.label(pair[1])
            ))
        })?;
        total_weight += weight;
    }
    if total_weight != distance {
        return Err(RouteError::internal(format!(
            "path weight {total_weight} differs from settled distance {distance}"
        )));
    }

    let coordinates = nodes
        .iter()
        .map(|&id| {
            graph.coordinate(id).ok_or_else(|| {
                RouteError::internal(format!("node '{}' has no coordinate", graph.label(id)))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(PathResult {
        nodes: nodes.iter().map(|&id| graph.label(id).to_string()).collect(),
        total_weight,
        coordinates,
    })
}
