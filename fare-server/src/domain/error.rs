//! Query validation errors.
//!
//! These are the only failures a query can produce. Lookup misses (a route
//! without one endpoint, a stage missing from the fare table) are not errors;
//! they show up as absent fields or empty result lists.

/// Rejected query input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// No origin was given
    #[error("origin is required")]
    MissingOrigin,

    /// No destination was given
    #[error("destination is required")]
    MissingDestination,

    /// Origin and destination name the same stop
    #[error("origin and destination cannot be the same")]
    SameEndpoints,
}

/// A validated origin/destination pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoints<'a> {
    pub origin: &'a str,
    pub destination: &'a str,
}

impl<'a> Endpoints<'a> {
    /// Validate a pair of stop names, compared exactly.
    pub fn new(origin: &'a str, destination: &'a str) -> Result<Self, QueryError> {
        Self::check(origin, destination, origin == destination)
    }

    /// Validate a pair of stop names that are matched ignoring case.
    pub fn new_ignore_case(origin: &'a str, destination: &'a str) -> Result<Self, QueryError> {
        Self::check(
            origin,
            destination,
            origin.to_uppercase() == destination.to_uppercase(),
        )
    }

    fn check(origin: &'a str, destination: &'a str, same: bool) -> Result<Self, QueryError> {
        if origin.is_empty() {
            return Err(QueryError::MissingOrigin);
        }
        if destination.is_empty() {
            return Err(QueryError::MissingDestination);
        }
        if same {
            return Err(QueryError::SameEndpoints);
        }
        Ok(Endpoints {
            origin,
            destination,
        })
    }
}
