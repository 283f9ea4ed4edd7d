//! Data models for the route finder
//!
//! This module contains the core domain models organized by concern:
//! - Coordinate: latitude/longitude attached to a network node
//! - Path: the result of a shortest path query

pub mod coordinate;
pub mod path;

// Re-export all public types for convenient access
pub use coordinate::Coordinate;
pub use path::{PathResult, format_distance};
