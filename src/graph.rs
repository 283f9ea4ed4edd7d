//! Graph store
//!
//! Holds the weighted undirected network of locations together with the
//! coordinate of each node. A [`Graph`] is assembled once through a
//! [`GraphBuilder`] and is read-only afterwards, so it can be shared between
//! request handlers without any locking.

use std::collections::HashMap;

use tracing::debug;

use crate::Result;
use crate::error::RouteError;
use crate::models::Coordinate;

/// Dense index of a node inside a [`Graph`]
pub type NodeId = usize;

/// Cost of traversing an edge, e.g. kilometers
pub type Weight = f64;

/// Default distance unit appended to formatted route lengths
pub const DEFAULT_UNIT: &str = "km";

/// Immutable weighted undirected graph with per-node coordinates
#[derive(Debug, Clone)]
pub struct Graph {
    labels: Vec<String>,
    index: HashMap<String, NodeId>,
    adjacency: Vec<Vec<(NodeId, Weight)>>,
    coordinates: Vec<Option<Coordinate>>,
    edge_count: usize,
    unit: String,
}

impl Graph {
    #[must_use]
    pub fn builder() -> GraphBuilder {
        GraphBuilder::new()
    }

    /// True iff `label` is a node of this graph
    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }

    #[must_use]
    pub fn node_id(&self, label: &str) -> Option<NodeId> {
        self.index.get(label).copied()
    }

    /// Label of a node id handed out by this graph.
    ///
    /// # Panics
    /// Panics if `id` does not belong to this graph.
    #[must_use]
    pub fn label(&self, id: NodeId) -> &str {
        &self.labels[id]
    }

    /// Coordinate of a known node. `None` means the node was built without
    /// one, which only a hand-assembled graph allows.
    #[must_use]
    pub fn coordinate_of(&self, label: &str) -> Option<Coordinate> {
        self.node_id(label).and_then(|id| self.coordinate(id))
    }

    #[must_use]
    pub fn coordinate(&self, id: NodeId) -> Option<Coordinate> {
        self.coordinates.get(id).copied().flatten()
    }

    /// Adjacent nodes of `label` with the connecting edge weight. Unknown
    /// labels have no neighbors. Enumeration order carries no meaning.
    pub fn neighbors<'a>(&'a self, label: &str) -> impl Iterator<Item = (&'a str, Weight)> + use<'a> {
        let edges: &'a [(NodeId, Weight)] = match self.node_id(label) {
            Some(id) => &self.adjacency[id],
            None => &[],
        };
        edges
            .iter()
            .map(move |&(to, weight)| (self.labels[to].as_str(), weight))
    }

    pub(crate) fn neighbors_of(&self, id: NodeId) -> &[(NodeId, Weight)] {
        &self.adjacency[id]
    }

    /// Weight of the edge between `a` and `b`, in either direction
    #[must_use]
    pub fn edge_weight(&self, a: &str, b: &str) -> Option<Weight> {
        let (a, b) = (self.node_id(a)?, self.node_id(b)?);
        self.edge_weight_between(a, b)
    }

    pub(crate) fn edge_weight_between(&self, a: NodeId, b: NodeId) -> Option<Weight> {
        self.adjacency
            .get(a)?
            .iter()
            .find(|(to, _)| *to == b)
            .map(|(_, weight)| *weight)
    }

    /// All node labels in declaration order
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Number of undirected edges
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Unit suffix for route lengths
    #[must_use]
    pub fn unit(&self) -> &str {
        &self.unit
    }
}

/// Incrementally assembles a [`Graph`], rejecting edges that would break
/// its invariants.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    labels: Vec<String>,
    index: HashMap<String, NodeId>,
    adjacency: Vec<Vec<(NodeId, Weight)>>,
    coordinates: Vec<Option<Coordinate>>,
    edge_count: usize,
    unit: Option<String>,
}

impl GraphBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the unit suffix used when formatting route lengths
    pub fn unit<S: Into<String>>(&mut self, unit: S) -> &mut Self {
        self.unit = Some(unit.into());
        self
    }

    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }

    /// Add a node, returning the id of the existing node if the label is
    /// already present.
    pub fn add_node<S: Into<String>>(&mut self, label: S) -> NodeId {
        let label = label.into();
        if let Some(&id) = self.index.get(&label) {
            return id;
        }
        let id = self.labels.len();
        self.index.insert(label.clone(), id);
        self.labels.push(label);
        self.adjacency.push(Vec::new());
        self.coordinates.push(None);
        id
    }

    /// Attach a coordinate to a node, adding the node if needed
    pub fn set_coordinate<S: Into<String>>(&mut self, label: S, coordinate: Coordinate) -> Result<NodeId> {
        let label = label.into();
        if !coordinate.is_valid() {
            return Err(RouteError::invalid_graph(format!(
                "coordinate ({}) of '{label}' is out of range",
                coordinate.format()
            )));
        }
        let id = self.add_node(label);
        self.coordinates[id] = Some(coordinate);
        Ok(id)
    }

    /// Add an undirected edge. Endpoints that are not yet nodes are added.
    pub fn add_edge(&mut self, a: &str, b: &str, weight: Weight) -> Result<()> {
        if a == b {
            return Err(RouteError::invalid_graph(format!(
                "edge '{a}' - '{b}' connects a node to itself"
            )));
        }
        if !weight.is_finite() || weight < 0.0 {
            return Err(RouteError::invalid_graph(format!(
                "edge '{a}' - '{b}' has invalid weight {weight}"
            )));
        }

        let from = self.add_node(a);
        let to = self.add_node(b);
        if self.adjacency[from].iter().any(|(n, _)| *n == to) {
            return Err(RouteError::invalid_graph(format!(
                "duplicate edge '{a}' - '{b}'"
            )));
        }

        self.adjacency[from].push((to, weight));
        self.adjacency[to].push((from, weight));
        self.edge_count += 1;
        Ok(())
    }

    #[must_use]
    pub fn build(self) -> Graph {
        debug!(
            nodes = self.labels.len(),
            edges = self.edge_count,
            "Graph built"
        );
        Graph {
            labels: self.labels,
            index: self.index,
            adjacency: self.adjacency,
            coordinates: self.coordinates,
            edge_count: self.edge_count,
            unit: self.unit.unwrap_or_else(|| DEFAULT_UNIT.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Graph {
        // A --1-- B
        //  \     /
        //   5   2
        //    \ /
        //     C
        let mut builder = Graph::builder();
        builder.add_edge("A", "B", 1.0).unwrap();
        builder.add_edge("B", "C", 2.0).unwrap();
        builder.add_edge("C", "A", 5.0).unwrap();
        builder.set_coordinate("A", Coordinate::new(1.0, 1.0)).unwrap();
        builder.build()
    }

    #[test]
    fn test_membership() {
        let g = triangle();
        assert!(g.contains("A"));
        assert!(g.contains("C"));
        assert!(!g.contains("D"));
        assert!(!g.contains("a"));
        assert_eq!(g.len(), 3);
        assert_eq!(g.edge_count(), 3);
    }

    #[test]
    fn test_edges_are_undirected() {
        let g = triangle();
        assert_eq!(g.edge_weight("A", "B"), Some(1.0));
        assert_eq!(g.edge_weight("B", "A"), Some(1.0));
        assert_eq!(g.edge_weight("A", "D"), None);

        let mut neighbors: Vec<_> = g.neighbors("C").collect();
        neighbors.sort_by(|a, b| a.0.cmp(b.0));
        assert_eq!(neighbors, vec![("A", 5.0), ("B", 2.0)]);
    }

    #[test]
    fn test_unknown_label_has_no_neighbors() {
        let g = triangle();
        assert_eq!(g.neighbors("Atlantis").count(), 0);
    }

    #[test]
    fn test_coordinates() {
        let g = triangle();
        assert_eq!(g.coordinate_of("A"), Some(Coordinate::new(1.0, 1.0)));
        assert_eq!(g.coordinate_of("B"), None);
        assert_eq!(g.coordinate_of("Atlantis"), None);
    }

    #[test]
    fn test_nodes_keep_declaration_order() {
        let mut builder = Graph::builder();
        builder.add_node("Mumbai");
        builder.add_node("Delhi");
        builder.add_edge("Kolkata", "Delhi", 1500.0).unwrap();
        let g = builder.build();
        assert_eq!(g.nodes().collect::<Vec<_>>(), vec!["Mumbai", "Delhi", "Kolkata"]);
    }

    #[test]
    fn test_add_node_is_idempotent() {
        let mut builder = GraphBuilder::new();
        let first = builder.add_node("Goa");
        let second = builder.add_node("Goa");
        assert_eq!(first, second);
        assert_eq!(builder.build().len(), 1);
    }

    #[test]
    fn test_rejects_invalid_edges() {
        let mut builder = GraphBuilder::new();
        assert!(builder.add_edge("A", "A", 1.0).is_err());
        assert!(builder.add_edge("A", "B", -1.0).is_err());
        assert!(builder.add_edge("A", "B", f64::NAN).is_err());
        assert!(builder.add_edge("A", "B", f64::INFINITY).is_err());

        builder.add_edge("A", "B", 1.0).unwrap();
        let err = builder.add_edge("B", "A", 3.0).unwrap_err();
        assert!(matches!(err, RouteError::InvalidGraph { .. }));
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_rejects_invalid_coordinate() {
        let mut builder = GraphBuilder::new();
        assert!(builder.set_coordinate("A", Coordinate::new(120.0, 0.0)).is_err());
        assert!(!builder.contains("A"));
    }

    #[test]
    fn test_unit() {
        assert_eq!(triangle().unit(), DEFAULT_UNIT);

        let mut builder = GraphBuilder::new();
        builder.unit("mi");
        assert_eq!(builder.build().unit(), "mi");
    }

    #[test]
    fn test_zero_weight_edge_is_allowed() {
        let mut builder = GraphBuilder::new();
        builder.add_edge("A", "B", 0.0).unwrap();
        assert_eq!(builder.build().edge_weight("A", "B"), Some(0.0));
    }
}
