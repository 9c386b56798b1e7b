//! Stage fare resolution.

use serde::Serialize;
use tracing::debug;

use crate::domain::{
    Amount, Direction, Endpoints, QueryError, Role, RouteNo, Section, ServiceClass, Stage,
};
use crate::network::{NetworkIndex, RouteInfo, RouteSections};

use super::nearest::nearest_service_point;

/// Route name used when no metadata names the route.
pub const UNKNOWN_ROUTE: &str = "Unknown";

/// Fares for one route serving both endpoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FareQuote {
    pub route_no: RouteNo,
    pub route_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normal: Option<Amount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semi: Option<Amount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ac: Option<Amount>,
}

/// Resolve fares for every route that serves both `origin` and
/// `destination`.
///
/// Routes where no class resolved to a fare are left out. The result is
/// ordered by route number; no matching route gives an empty list.
pub fn resolve_fares(
    index: &NetworkIndex,
    origin: &str,
    destination: &str,
) -> Result<Vec<FareQuote>, QueryError> {
    let endpoints = Endpoints::new(origin, destination)?;

    let quotes: Vec<FareQuote> = index
        .routes()
        .filter_map(|route| quote_route(index, route, &endpoints))
        .collect();

    debug!(origin, destination, routes = quotes.len(), "resolved fares");
    Ok(quotes)
}

/// Price one route, or `None` if it lacks an endpoint or every fare.
fn quote_route(
    index: &NetworkIndex,
    route: &RouteSections,
    endpoints: &Endpoints<'_>,
) -> Option<FareQuote> {
    let from = route.get(endpoints.origin)?;
    let to = route.get(endpoints.destination)?;
    let direction = Direction::of_travel(from.id, to.id);

    let normal = index
        .fare_stage(Stage::between(from.id, to.id))
        .and_then(|f| f.normal);
    let [semi, ac] = ServiceClass::PREMIUM
        .map(|class| premium_fare(index, route, from, to, direction, class));

    if normal.is_none() && semi.is_none() && ac.is_none() {
        return None;
    }

    Some(FareQuote {
        route_no: route.route_no().clone(),
        route_name: route_name(index, route.route_no(), endpoints),
        normal,
        semi,
        ac,
    })
}

/// Fare at a premium class, measured between the stops that offer it.
fn premium_fare(
    index: &NetworkIndex,
    route: &RouteSections,
    from: &Section,
    to: &Section,
    direction: Direction,
    class: ServiceClass,
) -> Option<Amount> {
    if !route.services().contains(class) {
        return None;
    }
    let board = service_point(route, from, direction, Role::Origin, class)?;
    let alight = service_point(route, to, direction, Role::Destination, class)?;
    index.fare_stage(Stage::between(board.id, alight.id))?.fare(class)
}

/// The endpoint itself if it offers `class`, else its nearest stop that does.
fn service_point<'r>(
    route: &'r RouteSections,
    section: &'r Section,
    direction: Direction,
    role: Role,
    class: ServiceClass,
) -> Option<&'r Section> {
    if section.services.contains(class) {
        Some(section)
    } else {
        nearest_service_point(route, section.id, direction, role, class)
    }
}

/// Name a route from its metadata, falling back to a route whose
/// terminals are the journey's endpoints.
fn route_name(index: &NetworkIndex, route_no: &RouteNo, endpoints: &Endpoints<'_>) -> String {
    index
        .route_info(route_no)
        .or_else(|| index.route_by_terminals(endpoints.origin, endpoints.destination))
        .map(RouteInfo::name)
        .unwrap_or_else(|| UNKNOWN_ROUTE.to_string())
}
