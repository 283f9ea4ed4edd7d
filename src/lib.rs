//! `RouteFinder` - shortest routes through a fixed network of cities
//!
//! The library holds an immutable weighted graph of locations, answers
//! shortest path queries on it with Dijkstra's algorithm and exposes the
//! result over a small JSON API.

pub mod api;
pub mod config;
pub mod dijkstra;
pub mod error;
pub mod graph;
pub mod models;
pub mod network;
pub mod telemetry;
pub mod web;

// Re-export core types for public API
pub use config::RouterConfig;
pub use dijkstra::{ALGORITHM_NAME, find_shortest_path};
pub use error::RouteError;
pub use graph::{Graph, GraphBuilder};
pub use models::{Coordinate, PathResult};
pub use network::NetworkDefinition;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, RouteError>;
