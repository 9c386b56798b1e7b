//! Loading network tables from a data directory.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::info;

use super::index::{NetworkIndex, NetworkTables};

/// File names of the tables inside the data directory.
pub const SECTIONS_FILE: &str = "all_section.json";
pub const ROUTES_FILE: &str = "allroutes.json";
pub const FARE_STAGES_FILE: &str = "fare_stages.json";
pub const NORMAL_FILE: &str = "normal.json";
pub const SEMI_FILE: &str = "semi.json";
pub const AC_FILE: &str = "ac.json";
pub const HIGHWAY_FILE: &str = "highway_sections.json";

/// Errors that stop the network from loading at all.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// A table file couldn't be read
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A table file isn't a JSON array
    #[error("{} is not a JSON array: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Read one table file as a list of records.
fn read_table(dir: &Path, file: &str) -> Result<Vec<Value>, LoadError> {
    let path = dir.join(file);
    let contents = std::fs::read_to_string(&path).map_err(|source| LoadError::Io {
        path: path.clone(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| LoadError::Json { path, source })
}

/// Read every table from `dir`. All files must be present.
pub fn load_tables(dir: &Path) -> Result<NetworkTables, LoadError> {
    Ok(NetworkTables {
        sections: read_table(dir, SECTIONS_FILE)?,
        routes: read_table(dir, ROUTES_FILE)?,
        fare_stages: read_table(dir, FARE_STAGES_FILE)?,
        normal: read_table(dir, NORMAL_FILE)?,
        semi: read_table(dir, SEMI_FILE)?,
        ac: read_table(dir, AC_FILE)?,
        highway: read_table(dir, HIGHWAY_FILE)?,
    })
}

/// Read every table from `dir` and build the index.
pub fn load_network(dir: &Path) -> Result<NetworkIndex, LoadError> {
    info!(dir = %dir.display(), "loading network tables");
    let tables = load_tables(dir)?;
    let index = NetworkIndex::build(tables);
    for table in &index.report().tables {
        info!(
            table = table.table,
            accepted = table.accepted,
            skipped = table.skipped,
            "loaded table"
        );
    }
    Ok(index)
}
