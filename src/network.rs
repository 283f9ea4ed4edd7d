//! Network definitions
//!
//! The routable network is plain data: a JSON document listing nodes with
//! their coordinates and the weighted edges between them. The default network
//! ships inside the binary; operators may point the configuration at another
//! file.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::Result;
use crate::config::NetworkConfig;
use crate::error::RouteError;
use crate::graph::{DEFAULT_UNIT, Graph, Weight};
use crate::models::Coordinate;

const DEFAULT_NETWORK: &str = include_str!("../data/india_network.json");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkDefinition {
    /// Unit suffix for route lengths
    #[serde(default = "default_unit")]
    pub unit: String,
    pub nodes: Vec<NodeDefinition>,
    pub edges: Vec<EdgeDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeDefinition {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeDefinition {
    pub from: String,
    pub to: String,
    pub weight: Weight,
}

fn default_unit() -> String {
    DEFAULT_UNIT.to_string()
}

impl NetworkDefinition {
    /// The network compiled into the binary
    pub fn builtin() -> Result<Self> {
        Self::from_json(DEFAULT_NETWORK)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| RouteError::invalid_graph(format!("malformed network JSON: {e}")))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Reading network definition from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Validate the definition and build the immutable graph from it.
    ///
    /// Every edge endpoint must be a declared node, which guarantees each
    /// node of the resulting graph carries a coordinate.
    pub fn into_graph(self) -> Result<Graph> {
        let mut builder = Graph::builder();
        builder.unit(self.unit);

        let mut seen = HashSet::new();
        for node in &self.nodes {
            if node.name.trim().is_empty() {
                return Err(RouteError::invalid_graph("node with empty name"));
            }
            if !seen.insert(node.name.as_str()) {
                return Err(RouteError::invalid_graph(format!(
                    "node '{}' declared twice",
                    node.name
                )));
            }
            builder.set_coordinate(
                node.name.clone(),
                Coordinate::new(node.latitude, node.longitude),
            )?;
        }

        for edge in &self.edges {
            for endpoint in [&edge.from, &edge.to] {
                if !builder.contains(endpoint) {
                    return Err(RouteError::invalid_graph(format!(
                        "edge '{}' - '{}' references undeclared node '{endpoint}'",
                        edge.from, edge.to
                    )));
                }
            }
            builder.add_edge(&edge.from, &edge.to, edge.weight)?;
        }

        Ok(builder.build())
    }
}

/// Load the network selected by the configuration
pub fn load(config: &NetworkConfig) -> Result<Graph> {
    let definition = match &config.path {
        Some(path) => NetworkDefinition::from_file(Path::new(path))?,
        None => NetworkDefinition::builtin()?,
    };
    let graph = definition.into_graph()?;
    info!(
        nodes = graph.len(),
        edges = graph.edge_count(),
        source = config.path.as_deref().unwrap_or("builtin"),
        "Network loaded"
    );
    Ok(graph)
}
