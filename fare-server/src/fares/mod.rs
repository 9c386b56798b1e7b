//! Fare and route queries.
//!
//! Every query is a pure function of an already-built
//! [`NetworkIndex`](crate::network::NetworkIndex) and the two endpoint
//! names. Input is validated before any lookup; a failed query never
//! touches the index.

mod highway;
mod nearest;
mod resolve;
mod routes;


pub use highway::{HighwayQuote, resolve_highway_fares};
pub use nearest::nearest_service_point;
pub use resolve::{FareQuote, UNKNOWN_ROUTE, resolve_fares};
pub use routes::{RouteMatch, ServiceDetails, find_routes};
