//! Highway (expressway) service types.

use std::fmt;

use serde::Serialize;

/// Service type of a highway fare table, e.g. `SUPER` or `TEMP`.
///
/// The stored code is free-form; only presentation remaps a few known codes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct HighwayService(String);

impl HighwayService {
    /// Recorded when a highway section has no service type.
    pub const UNKNOWN: &'static str = "Unknown";

    /// Wrap a service type code, falling back to `"Unknown"` when blank.
    pub fn new(code: Option<&str>) -> Self {
        match code.map(str::trim) {
            Some(code) if !code.is_empty() => HighwayService(code.to_string()),
            _ => HighwayService(Self::UNKNOWN.to_string()),
        }
    }

    /// The code as stored.
    pub fn code(&self) -> &str {
        &self.0
    }

    /// Name shown to passengers.
    ///
    /// ```
    /// use fare_server::domain::HighwayService;
    ///
    /// assert_eq!(HighwayService::new(Some("SUPER")).display_name(), "SUPER LUXURY");
    /// assert_eq!(HighwayService::new(Some("TEMP")).display_name(), "NORMAL TEMP HIGHWAY");
    /// assert_eq!(HighwayService::new(Some("AC")).display_name(), "AC");
    /// ```
    pub fn display_name(&self) -> &str {
        match self.0.as_str() {
            "SUPER" => "SUPER LUXURY",
            "TEMP" => "NORMAL TEMP HIGHWAY",
            other => other,
        }
    }
}

impl fmt::Display for HighwayService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
