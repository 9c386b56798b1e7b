//! Domain types for the bus fare engine.
//!
//! This module contains the value types shared by the network index and
//! the query engines. Types that carry an invariant (normalized route
//! numbers, finite amounts, validated endpoints) enforce it at
//! construction time.

mod amount;
mod error;
mod highway;
mod route_no;
mod section;
mod service;

pub use amount::{Amount, InvalidAmount};
pub use error::{Endpoints, QueryError};
pub use highway::HighwayService;
pub use route_no::RouteNo;
pub use section::{Direction, Role, Section, SectionId, Stage};
pub use service::{ServiceClass, ServiceSet};
