//! Sections (stops) and their position along a route.

use std::fmt;

use super::{RouteNo, ServiceSet};

/// Position of a section along its route.
///
/// Ids are unique within a route and increase in the order the bus passes
/// the stops, so they act as a one-dimensional coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionId(pub i64);

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Number of fare stages between two sections of the same route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Stage(pub u64);

impl Stage {
    /// The stage distance between two sections: the absolute id difference.
    pub fn between(a: SectionId, b: SectionId) -> Self {
        Stage(a.0.abs_diff(b.0))
    }
}

/// Direction of travel along a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards higher section ids.
    Up,
    /// Towards lower section ids.
    Down,
}

impl Direction {
    /// `Up` iff the origin comes before the destination.
    pub fn of_travel(origin: SectionId, destination: SectionId) -> Self {
        if origin < destination {
            Direction::Up
        } else {
            Direction::Down
        }
    }
}

/// Which end of the journey a section stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Origin,
    Destination,
}

/// A named stop on a specific route.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    /// Route number exactly as it appeared in the source table.
    pub raw_route_no: String,
    pub route_no: RouteNo,
    pub name: String,
    pub id: SectionId,
    /// Premium classes that stop here.
    pub services: ServiceSet,
}
