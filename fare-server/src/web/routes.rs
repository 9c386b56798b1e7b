//! HTTP route handlers.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::domain::QueryError;
use crate::fares::{find_routes, resolve_fares, resolve_highway_fares};
use crate::network::{NetworkIndex, NetworkStats, filter_containing, suggest};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/stats", get(stats))
        .route("/api/sections/search", get(search_sections))
        .route("/api/highway/sections/search", get(search_highway_sections))
        .route("/api/fares", get(fares))
        .route("/api/routes", get(routes))
        .route("/api/highway-fares", get(highway_fares))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

async fn stats(State(state): State<AppState>) -> Json<NetworkStats> {
    Json(state.index.stats())
}

/// Suggest section names for a search box.
async fn search_sections(
    State(state): State<AppState>,
    Query(req): Query<SectionSearchRequest>,
) -> Json<SectionSearchResponse> {
    let limit = state.config.suggestion_limit(req.limit);
    let sections = suggest(
        state.index.section_names(),
        &state.config.default_suggestions,
        &req.q,
        limit,
    )
    .into_iter()
    .map(str::to_string)
    .collect();

    Json(SectionSearchResponse { sections })
}

/// Suggest highway access point names.
async fn search_highway_sections(
    State(state): State<AppState>,
    Query(req): Query<SectionSearchRequest>,
) -> Json<SectionSearchResponse> {
    let limit = state.config.suggestion_limit(req.limit);
    let sections = filter_containing(state.index.highway().names(), &req.q, limit)
        .into_iter()
        .map(str::to_string)
        .collect();

    Json(SectionSearchResponse { sections })
}

/// Stage fares between two sections.
async fn fares(
    State(state): State<AppState>,
    Query(req): Query<JourneyRequest>,
) -> Result<Json<FaresResponse>, AppError> {
    let fares = run_query(&state, move |index| {
        resolve_fares(
            index,
            canonical(index, &req.origin),
            canonical(index, &req.destination),
        )
    })
    .await?;

    Ok(Json(FaresResponse { fares }))
}

/// Routes that serve two sections, with their published details.
async fn routes(
    State(state): State<AppState>,
    Query(req): Query<JourneyRequest>,
) -> Result<Json<RoutesResponse>, AppError> {
    let routes = run_query(&state, move |index| {
        find_routes(
            index,
            canonical(index, &req.origin),
            canonical(index, &req.destination),
        )
    })
    .await?;

    Ok(Json(RoutesResponse { routes }))
}

/// Highway fares between two access points.
async fn highway_fares(
    State(state): State<AppState>,
    Query(req): Query<JourneyRequest>,
) -> Result<Json<HighwayFaresResponse>, AppError> {
    let fares = run_query(&state, move |index| {
        resolve_highway_fares(index, req.origin.trim(), req.destination.trim())
    })
    .await?;

    Ok(Json(HighwayFaresResponse { fares }))
}

/// The stored spelling of a typed section name, or the name as typed.
fn canonical<'a>(index: &'a NetworkIndex, name: &'a str) -> &'a str {
    let name = name.trim();
    index.canonical_section_name(name).unwrap_or(name)
}

/// Run a query against the index on the blocking pool.
async fn run_query<T, F>(state: &AppState, query: F) -> Result<T, AppError>
where
    F: FnOnce(&NetworkIndex) -> Result<T, QueryError> + Send + 'static,
    T: Send + 'static,
{
    let index = Arc::clone(&state.index);
    tokio::task::spawn_blocking(move || query(&index))
        .await
        .map_err(|e| AppError::Internal {
            message: format!("query task failed: {e}"),
        })?
        .map_err(AppError::from)
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Internal { message: String },
}

impl From<QueryError> for AppError {
    fn from(e: QueryError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => {
                warn!(%message, "rejected query");
                (StatusCode::BAD_REQUEST, message)
            }
            AppError::Internal { message } => {
                error!(%message, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use crate::network::NetworkTables;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn app() -> Router {
        let index = NetworkIndex::build(NetworkTables {
            sections: vec![
                json!({"route_no": "007", "section_name": "Colombo", "section_id": 0, "service_type": "SL"}),
                json!({"route_no": "7", "section_name": "Kadawatha", "section_id": 4}),
                json!({"route_no": "7", "section_name": "Kandy", "section_id": 20, "service_type": "SL"}),
                json!({"route_no": "7", "section_name": 42}),
            ],
            routes: vec![json!({"Route_No": "7", "Origin": "Colombo", "Destination": "Kandy"})],
            fare_stages: vec![
                json!({"fare_stage": 4, "normal": 40}),
                json!({"fare_stage": 20, "normal": 150, "semi": 220}),
            ],
            normal: vec![json!({"route_no": "7", "distance": 116, "travel_time": "3:30"})],
            semi: vec![],
            ac: vec![],
            highway: vec![
                json!({"route_no": "EX1", "service_type": "SUPER", "section_name": "Kottawa", "fare": 100}),
                json!({"route_no": "EX1", "service_type": "SUPER", "section_name": "Galle", "fare": 250}),
            ],
        });
        let config = ServerConfig::default()
            .with_max_suggestions(3)
            .with_default_suggestions(["Colombo", "Kandy"]);
        create_router(AppState::new(index, config))
    }

    async fn get(uri: &str) -> (StatusCode, Value) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn health_check() {
        let response = app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"ok");
    }

    #[tokio::test]
    async fn stats_count_loaded_records() {
        let (status, body) = get("/api/stats").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"routes": 1, "sections": 3, "highway_sections": 2}));
    }

    #[tokio::test]
    async fn fares_between_sections() {
        let (status, body) = get("/api/fares?origin=Colombo&destination=Kandy").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"fares": [{
                "route_no": "7",
                "route_name": "Colombo - Kandy",
                "normal": 150,
                "semi": 220,
            }]})
        );
    }

    #[tokio::test]
    async fn fares_accept_any_case() {
        let (status, body) = get("/api/fares?origin=colombo&destination=KADAWATHA").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["fares"][0]["normal"], 40);
    }

    #[tokio::test]
    async fn invalid_queries_are_bad_requests() {
        let (status, body) = get("/api/fares?origin=Kandy&destination=Kandy").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "origin and destination cannot be the same");

        let (status, body) = get("/api/fares?destination=Kandy").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "origin is required");

        let (status, body) = get("/api/routes?origin=Kandy").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "destination is required");

        let (status, _) = get("/api/highway-fares?origin=galle&destination=Galle").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_sections_give_no_fares() {
        let (status, body) = get("/api/fares?origin=Colombo&destination=Jaffna").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"fares": []}));
    }

    #[tokio::test]
    async fn routes_between_sections() {
        let (status, body) = get("/api/routes?origin=Kandy&destination=Colombo").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"routes": [{
                "route_no": "7",
                "route_name": "Colombo - Kandy",
                "services": [{"type": "Normal", "distance": 116, "travel_time": "3:30"}],
            }]})
        );
    }

    #[tokio::test]
    async fn highway_fares_between_access_points() {
        let (status, body) = get("/api/highway-fares?origin=kottawa&destination=Galle").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"fares": [{
                "route_no": "EX 1",
                "route_name": "Unknown",
                "service_type": "SUPER LUXURY",
                "fare": "150.00",
            }]})
        );
    }

    #[tokio::test]
    async fn section_suggestions() {
        let (_, body) = get("/api/sections/search?q=").await;
        assert_eq!(body, json!({"sections": ["Colombo", "Kandy"]}));

        let (_, body) = get("/api/sections/search?q=ka").await;
        assert_eq!(body, json!({"sections": ["Kadawatha", "Kandy"]}));

        let (_, body) = get("/api/sections/search?q=a&limit=1").await;
        assert_eq!(body["sections"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn highway_suggestions() {
        let (_, body) = get("/api/highway/sections/search?q=ALL").await;
        assert_eq!(body, json!({"sections": ["Galle"]}));

        let (_, body) = get("/api/highway/sections/search").await;
        assert_eq!(body, json!({"sections": ["Galle", "Kottawa"]}));
    }
}
