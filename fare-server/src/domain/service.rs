//! Service classes and the tag sets attached to sections.

use std::fmt;

use serde::Serialize;

/// A class of bus service, each priced from its own fare-table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ServiceClass {
    /// Ordinary buses. Every section is served at this class.
    Normal,
    /// Semi-luxury, tagged `SL` in the section table.
    #[serde(rename = "Semi")]
    SemiLuxury,
    /// Air-conditioned luxury, tagged `LX` (or `AC`) in the section table.
    #[serde(rename = "AC")]
    AirConditioned,
}

impl ServiceClass {
    /// The classes that only some sections offer.
    pub const PREMIUM: [ServiceClass; 2] = [ServiceClass::SemiLuxury, ServiceClass::AirConditioned];

    /// Parse a single service-type tag.
    ///
    /// Unknown tags return `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim() {
            "SL" => Some(ServiceClass::SemiLuxury),
            "LX" | "AC" => Some(ServiceClass::AirConditioned),
            _ => None,
        }
    }

    /// Label used when publishing per-class route details.
    pub fn label(self) -> &'static str {
        match self {
            ServiceClass::Normal => "Normal",
            ServiceClass::SemiLuxury => "Semi",
            ServiceClass::AirConditioned => "AC",
        }
    }

    fn bit(self) -> u8 {
        match self {
            ServiceClass::Normal => 0,
            ServiceClass::SemiLuxury => 1 << 0,
            ServiceClass::AirConditioned => 1 << 1,
        }
    }
}

impl fmt::Display for ServiceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The premium classes offered at a section (or anywhere on a route).
///
/// Normal service is implied everywhere, so [`ServiceSet::contains`] always
/// answers `true` for [`ServiceClass::Normal`].
///
/// # Examples
///
/// ```
/// use fare_server::domain::{ServiceClass, ServiceSet};
///
/// let tags = ServiceSet::parse(Some("SL, LX"));
/// assert!(tags.contains(ServiceClass::SemiLuxury));
/// assert!(tags.contains(ServiceClass::AirConditioned));
///
/// let untagged = ServiceSet::parse(None);
/// assert!(untagged.contains(ServiceClass::Normal));
/// assert!(!untagged.contains(ServiceClass::SemiLuxury));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ServiceSet(u8);

impl ServiceSet {
    /// An empty set (normal service only).
    pub fn empty() -> Self {
        ServiceSet(0)
    }

    /// Parse a comma-separated tag list such as `"SL,LX"`.
    ///
    /// Whitespace around tags is ignored, as are unknown tags.
    pub fn parse(tags: Option<&str>) -> Self {
        tags.into_iter()
            .flat_map(|s| s.split(','))
            .filter_map(ServiceClass::from_tag)
            .fold(ServiceSet::empty(), |set, class| set.with(class))
    }

    /// Returns a copy of this set with `class` added.
    pub fn with(self, class: ServiceClass) -> Self {
        ServiceSet(self.0 | class.bit())
    }

    /// Union of two sets.
    pub fn union(self, other: ServiceSet) -> Self {
        ServiceSet(self.0 | other.0)
    }

    /// Whether the set offers `class`.
    pub fn contains(self, class: ServiceClass) -> bool {
        self.0 & class.bit() == class.bit()
    }

    /// Whether no premium class is offered.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}
