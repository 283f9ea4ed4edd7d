//! JSON API handlers

use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use crate::{
    VERSION,
    dijkstra::{self, ALGORITHM_NAME},
    error::RouteError,
    graph::Graph,
    models::{PathResult, format_distance},
};

/// Shared, read-only state handed to every handler
pub type AppState = Arc<Graph>;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ShortestPathRequest {
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ShortestPathResponse {
    pub path_name: Vec<String>,
    /// Human readable length, e.g. `"2,600 km"`
    pub distance_km: String,
    pub path_coordinates: Vec<[f64; 2]>,
    pub algorithm: String,
}

impl ShortestPathResponse {
    fn new(path: PathResult, unit: &str) -> Self {
        Self {
            distance_km: format_distance(path.total_weight, unit),
            path_coordinates: path.coordinates.iter().map(|c| c.as_pair()).collect(),
            path_name: path.nodes,
            algorithm: ALGORITHM_NAME.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiLocation {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub nodes: usize,
    pub edges: usize,
}

/// Maps route errors onto HTTP responses. Internal details go to the log,
/// the client only sees the generic message.
pub struct ApiError(RouteError);

impl From<RouteError> for ApiError {
    fn from(err: RouteError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            RouteError::MissingInput => StatusCode::BAD_REQUEST,
            RouteError::UnknownNode { .. } | RouteError::NoPath { .. } => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
        } else {
            tracing::debug!(error = %self.0, "Request rejected");
        }

        let body = ErrorResponse {
            error: self.0.user_message(),
        };
        (status, Json(body)).into_response()
    }
}

pub fn router(graph: AppState) -> Router {
    Router::new()
        .route("/shortest_path", post(shortest_path))
        .route("/locations", get(locations))
        .route("/health", get(health))
        .with_state(graph)
}

#[tracing::instrument(skip_all, fields(start = %request.start, end = %request.end))]
async fn shortest_path(
    State(graph): State<AppState>,
    Json(request): Json<ShortestPathRequest>,
) -> Result<Json<ShortestPathResponse>, ApiError> {
    let start = request.start.trim();
    let end = request.end.trim();
    if start.is_empty() || end.is_empty() {
        return Err(RouteError::MissingInput.into());
    }

    let path = dijkstra::find_shortest_path(&graph, start, end)?;
    Ok(Json(ShortestPathResponse::new(path, graph.unit())))
}

async fn locations(State(graph): State<AppState>) -> Result<Json<Vec<ApiLocation>>, ApiError> {
    let locations = graph
        .nodes()
        .map(|name| {
            let coordinate = graph.coordinate_of(name).ok_or_else(|| {
                RouteError::internal(format!("node '{name}' has no coordinate"))
            })?;
            Ok(ApiLocation {
                name: name.to_string(),
                latitude: coordinate.latitude,
                longitude: coordinate.longitude,
            })
        })
        .collect::<Result<Vec<_>, RouteError>>()?;
    Ok(Json(locations))
}

async fn health(State(graph): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: VERSION.to_string(),
        nodes: graph.len(),
        edges: graph.edge_count(),
    })
}
