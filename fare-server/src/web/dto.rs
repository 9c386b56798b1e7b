//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::fares::{FareQuote, HighwayQuote, RouteMatch};

/// Origin and destination of a fare or route query.
///
/// Missing parameters deserialize as empty strings so that they are
/// reported by query validation rather than by the extractor.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct JourneyRequest {
    pub origin: String,
    pub destination: String,
}

/// Request to search section names.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SectionSearchRequest {
    /// Partial name typed by the user
    pub q: String,

    /// Maximum results, capped by the server
    pub limit: Option<usize>,
}

/// Section name suggestions.
#[derive(Debug, Serialize)]
pub struct SectionSearchResponse {
    pub sections: Vec<String>,
}

/// Stage fares between two sections.
#[derive(Debug, Serialize)]
pub struct FaresResponse {
    pub fares: Vec<FareQuote>,
}

/// Routes serving two sections.
#[derive(Debug, Serialize)]
pub struct RoutesResponse {
    pub routes: Vec<RouteMatch>,
}

/// Highway fares between two access points.
#[derive(Debug, Serialize)]
pub struct HighwayFaresResponse {
    pub fares: Vec<HighwayQuote>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
