//! Error types and handling for the route finder

use thiserror::Error;

/// Main error type for route lookups and service startup
#[derive(Error, Debug)]
pub enum RouteError {
    /// Source or target was absent or empty
    #[error("Start and end locations are required")]
    MissingInput,

    /// One or both labels are not part of the network
    #[error("Unknown location(s): {}", .labels.join(", "))]
    UnknownNode {
        /// The labels that failed the membership check
        labels: Vec<String>,
        /// Every node of the network, in declaration order
        known: Vec<String>,
    },

    /// Both labels are valid but no edge sequence connects them
    #[error("No route between {origin} and {destination}")]
    NoPath { origin: String, destination: String },

    /// Graph data is inconsistent with an already validated request
    #[error("Internal error: {message}")]
    Internal { message: String },

    /// Network definition rejected at construction time
    #[error("Invalid network definition: {message}")]
    InvalidGraph { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl RouteError {
    /// Create a new unknown node error
    pub fn unknown_node(labels: Vec<String>, known: Vec<String>) -> Self {
        Self::UnknownNode { labels, known }
    }

    /// Create a new no-path error
    pub fn no_path<S: Into<String>, T: Into<String>>(origin: S, destination: T) -> Self {
        Self::NoPath {
            origin: origin.into(),
            destination: destination.into(),
        }
    }

    /// Create a new internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Create a new invalid graph error
    pub fn invalid_graph<S: Into<String>>(message: S) -> Self {
        Self::InvalidGraph {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether the caller caused this error (as opposed to the service itself)
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            RouteError::MissingInput | RouteError::UnknownNode { .. } | RouteError::NoPath { .. }
        )
    }

    /// Get a message that is safe to hand back to a client.
    ///
    /// Internal failures never expose their detail here; it is meant for
    /// server-side logs only.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            RouteError::MissingInput => "Start and end locations are required.".to_string(),
            RouteError::UnknownNode { known, .. } => format!(
                "One or both locations are not recognized on the network. Try: {}.",
                known.join(", ")
            ),
            RouteError::NoPath {
                origin,
                destination,
            } => format!("No direct route found between {origin} and {destination}."),
            RouteError::Internal { .. }
            | RouteError::InvalidGraph { .. }
            | RouteError::Config { .. }
            | RouteError::Io { .. } => "An internal server error occurred.".to_string(),
        }
    }
}
