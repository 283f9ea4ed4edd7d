//! Shortest path result and its human readable distance

use serde::Serialize;

use super::Coordinate;

/// A route through the network, from source to target inclusive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathResult {
    /// Node labels in travel order
    pub nodes: Vec<String>,
    /// Sum of the edge weights between consecutive nodes
    pub total_weight: f64,
    /// Coordinates parallel to `nodes`
    pub coordinates: Vec<Coordinate>,
}

impl PathResult {
    #[must_use]
    pub fn source(&self) -> Option<&str> {
        self.nodes.first().map(String::as_str)
    }

    #[must_use]
    pub fn target(&self) -> Option<&str> {
        self.nodes.last().map(String::as_str)
    }

    /// Number of edges travelled
    #[must_use]
    pub fn hops(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }
}

/// Format a distance rounded to whole units with `,` thousands separators,
/// e.g. `1400.0` in `km` becomes `"1,400 km"`.
#[must_use]
pub fn format_distance(distance: f64, unit: &str) -> String {
    let rounded = distance.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if negative {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if unit.is_empty() {
        grouped
    } else {
        format!("{grouped} {unit}")
    }
}
