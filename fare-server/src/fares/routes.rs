//! Route finder.

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::domain::{Endpoints, QueryError, RouteNo, ServiceClass};
use crate::network::{NetworkIndex, RouteInfo};

use super::resolve::UNKNOWN_ROUTE;

/// Published details of one service class on a route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceDetails {
    #[serde(rename = "type")]
    pub class: ServiceClass,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub travel_time: Option<Value>,
}

/// A route serving both endpoints, with the classes it publishes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteMatch {
    pub route_no: RouteNo,
    pub route_name: String,
    pub services: Vec<ServiceDetails>,
}

const CLASSES: [ServiceClass; 3] = [
    ServiceClass::Normal,
    ServiceClass::SemiLuxury,
    ServiceClass::AirConditioned,
];

/// List the routes that serve both `origin` and `destination`.
///
/// No fares are computed. Each match carries the published distance and
/// travel time of every class that has an entry for the route, in the
/// order normal, semi, AC. Matches are ordered by route number.
pub fn find_routes(
    index: &NetworkIndex,
    origin: &str,
    destination: &str,
) -> Result<Vec<RouteMatch>, QueryError> {
    let endpoints = Endpoints::new(origin, destination)?;

    let matches: Vec<RouteMatch> = index
        .routes()
        .filter(|route| {
            route.get(endpoints.origin).is_some() && route.get(endpoints.destination).is_some()
        })
        .map(|route| {
            let route_no = route.route_no();
            let services = CLASSES
                .iter()
                .filter_map(|&class| {
                    let published = index.published(class, route_no)?;
                    Some(ServiceDetails {
                        class,
                        distance: published.distance.clone(),
                        travel_time: published.travel_time.clone(),
                    })
                })
                .collect();

            RouteMatch {
                route_no: route_no.clone(),
                route_name: index
                    .route_info(route_no)
                    .map(RouteInfo::name)
                    .unwrap_or_else(|| UNKNOWN_ROUTE.to_string()),
                services,
            }
        })
        .collect();

    debug!(origin, destination, routes = matches.len(), "found routes");
    Ok(matches)
}
