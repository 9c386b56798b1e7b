//! The bus network: raw tables, validation, and the lookup index.
//!
//! Tables are read once at startup into a [`NetworkIndex`], which is then
//! immutable. Malformed records are skipped rather than failing the load,
//! since the tables come from several authorities and have gaps.

mod highway;
mod index;
mod loader;
mod raw;
mod records;
mod suggest;

pub use highway::{HighwayNetwork, HighwayTable};
pub use index::{BuildReport, NetworkIndex, NetworkStats, NetworkTables, RouteSections, TableReport};
pub use loader::{LoadError, load_network, load_tables};
pub use raw::{RecordError, Scalar};
pub use records::{FareStage, HighwaySection, PublishedService, RouteInfo};
pub use suggest::{filter_containing, suggest};
