//! Highway fares.
//!
//! Highway fares aren't staged. Every access point carries an anchor fare
//! on each (route, service type) table that lists it, and the fare between
//! two access points is the difference of their anchors.

use serde::Serialize;
use tracing::debug;

use crate::domain::{Endpoints, QueryError, RouteNo};
use crate::network::{HighwayTable, NetworkIndex, RouteInfo};

use super::resolve::UNKNOWN_ROUTE;

/// The fare between two access points on one highway fare table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighwayQuote {
    pub route_no: RouteNo,
    pub route_name: String,
    /// Display name of the service type.
    pub service_type: String,
    /// Fare with two decimals, e.g. `"150.00"`.
    pub fare: String,
}

/// Resolve highway fares between two access points.
///
/// Names match ignoring case. Only fare tables that list both access
/// points contribute; results are ordered by route number, then service
/// type code.
pub fn resolve_highway_fares(
    index: &NetworkIndex,
    origin: &str,
    destination: &str,
) -> Result<Vec<HighwayQuote>, QueryError> {
    let endpoints = Endpoints::new_ignore_case(origin, destination)?;
    let highway = index.highway();

    let to_tables = highway.tables_for(endpoints.destination);
    let mut shared: Vec<&HighwayTable> = highway
        .tables_for(endpoints.origin)
        .iter()
        .filter(|table| to_tables.contains(table))
        .collect();
    shared.sort();

    let quotes: Vec<HighwayQuote> = shared
        .into_iter()
        .filter_map(|table| {
            let from = highway.anchor_fare(table, endpoints.origin)?;
            let to = highway.anchor_fare(table, endpoints.destination)?;
            let (route_no, service) = table;
            Some(HighwayQuote {
                route_no: route_no.clone(),
                route_name: index
                    .highway_route_info(route_no)
                    .map(RouteInfo::highway_name)
                    .unwrap_or_else(|| UNKNOWN_ROUTE.to_string()),
                service_type: service.display_name().to_string(),
                fare: to.abs_diff(from).to_fixed_2(),
            })
        })
        .collect();

    debug!(origin, destination, tables = quotes.len(), "resolved highway fares");
    Ok(quotes)
}
