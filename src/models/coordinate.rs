//! Coordinate model for placing network nodes on a map

use serde::{Deserialize, Serialize};

/// Geographic position of a network node.
///
/// Only used to enrich responses for visualization, never for route cost.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Coordinate {
    /// Create a new coordinate
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether both components lie inside the valid degree ranges
    #[must_use]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }

    /// `[latitude, longitude]` pair as expected by map libraries
    #[must_use]
    pub fn as_pair(&self) -> [f64; 2] {
        [self.latitude, self.longitude]
    }

    /// Format coordinate as a display string
    #[must_use]
    pub fn format(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(coordinate: Coordinate) -> Self {
        coordinate.as_pair()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_pair() {
        let mumbai = Coordinate::new(19.0760, 72.8777);
        assert_eq!(mumbai.as_pair(), [19.0760, 72.8777]);
        assert_eq!(mumbai.format(), "19.0760, 72.8777");
    }

    #[test]
    fn test_coordinate_validity() {
        assert!(Coordinate::new(28.6139, 77.2090).is_valid());
        assert!(!Coordinate::new(91.0, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, -180.5).is_valid());
        assert!(!Coordinate::new(f64::NAN, 0.0).is_valid());
    }
}
