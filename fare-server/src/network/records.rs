//! Validated network records, other than sections.

use serde_json::Value;

use crate::domain::{Amount, HighwayService, RouteNo, ServiceClass, Stage};

/// Display metadata for a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteInfo {
    pub route_no: RouteNo,
    pub origin: String,
    pub destination: String,
}

impl RouteInfo {
    /// Route name as shown with stage fares and route searches,
    /// e.g. `"Colombo - Kandy"`.
    pub fn name(&self) -> String {
        format!("{} - {}", self.origin, self.destination)
    }

    /// Route name as shown with highway fares, e.g. `"Colombo → Matara"`.
    pub fn highway_name(&self) -> String {
        format!("{} → {}", self.origin, self.destination)
    }
}

/// Fares for one stage distance. Any column may be missing.
#[derive(Debug, Clone, PartialEq)]
pub struct FareStage {
    pub stage: Stage,
    pub normal: Option<Amount>,
    pub semi: Option<Amount>,
    pub ac: Option<Amount>,
}

impl FareStage {
    /// The fare for a service class at this stage.
    pub fn fare(&self, class: ServiceClass) -> Option<Amount> {
        match class {
            ServiceClass::Normal => self.normal,
            ServiceClass::SemiLuxury => self.semi,
            ServiceClass::AirConditioned => self.ac,
        }
    }
}

/// Published distance and travel time of a route at one service class.
///
/// Both values are kept exactly as the source table wrote them.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishedService {
    pub route_no: RouteNo,
    pub distance: Option<Value>,
    pub travel_time: Option<Value>,
}

/// A highway access point on one (route, service type) fare table.
#[derive(Debug, Clone, PartialEq)]
pub struct HighwaySection {
    pub route_no: RouteNo,
    pub service: HighwayService,
    pub name: String,
    /// Fare anchored at this access point.
    pub fare: Amount,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_names() {
        let info = RouteInfo {
            route_no: RouteNo::normalize("1"),
            origin: "Colombo".into(),
            destination: "Kandy".into(),
        };
        assert_eq!(info.name(), "Colombo - Kandy");
        assert_eq!(info.highway_name(), "Colombo → Kandy");
    }

    #[test]
    fn fare_by_class() {
        let stage = FareStage {
            stage: Stage(4),
            normal: Some(Amount::new(30.0).unwrap()),
            semi: None,
            ac: Some(Amount::new(60.0).unwrap()),
        };
        assert_eq!(stage.fare(ServiceClass::Normal).unwrap().value(), 30.0);
        assert_eq!(stage.fare(ServiceClass::SemiLuxury), None);
        assert_eq!(stage.fare(ServiceClass::AirConditioned).unwrap().value(), 60.0);
    }
}
