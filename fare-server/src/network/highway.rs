//! Highway access-point index.

use std::collections::{BTreeSet, HashMap};

use crate::domain::{Amount, HighwayService, RouteNo};

use super::records::HighwaySection;

/// Key of one highway fare table.
pub type HighwayTable = (RouteNo, HighwayService);

/// Highway sections indexed by fare table and by access-point name.
///
/// Names are matched case-insensitively; both maps key on the upper-cased
/// name.
#[derive(Debug, Default)]
pub struct HighwayNetwork {
    /// (route, service) → upper-cased name → anchor fare.
    fares: HashMap<HighwayTable, HashMap<String, Amount>>,

    /// Upper-cased name → fare tables that list it, in first-seen order.
    tables_by_name: HashMap<String, Vec<HighwayTable>>,

    /// Distinct names as written in the source, sorted.
    names: Vec<String>,
}

impl HighwayNetwork {
    /// Build from validated sections. A later section for the same
    /// (route, service, name) replaces the earlier fare.
    pub fn from_sections(sections: impl IntoIterator<Item = HighwaySection>) -> Self {
        let mut fares: HashMap<HighwayTable, HashMap<String, Amount>> = HashMap::new();
        let mut tables_by_name: HashMap<String, Vec<HighwayTable>> = HashMap::new();
        let mut names = BTreeSet::new();

        for section in sections {
            let key = section.name.to_uppercase();
            let table = (section.route_no, section.service);

            let tables = tables_by_name.entry(key.clone()).or_default();
            if !tables.contains(&table) {
                tables.push(table.clone());
            }
            fares.entry(table).or_default().insert(key, section.fare);
            names.insert(section.name);
        }

        Self {
            fares,
            tables_by_name,
            names: names.into_iter().collect(),
        }
    }

    /// Fare tables that list the named access point.
    pub fn tables_for(&self, name: &str) -> &[HighwayTable] {
        self.tables_by_name
            .get(&name.to_uppercase())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Anchor fare of an access point on a fare table.
    pub fn anchor_fare(&self, table: &HighwayTable, name: &str) -> Option<Amount> {
        self.fares.get(table)?.get(&name.to_uppercase()).copied()
    }

    /// Distinct access-point names, sorted.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of (route, service) fare tables.
    pub fn table_count(&self) -> usize {
        self.fares.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hw(route: &str, service: &str, name: &str, fare: f64) -> HighwaySection {
        HighwaySection {
            route_no: RouteNo::normalize_highway(route),
            service: HighwayService::new(Some(service)),
            name: name.to_string(),
            fare: Amount::new(fare).unwrap(),
        }
    }

    #[test]
    fn lookups_ignore_case() {
        let net = HighwayNetwork::from_sections(vec![hw("EX1", "SUPER", "Kottawa", 100.0)]);
        let table = (RouteNo::normalize_highway("EX1"), HighwayService::new(Some("SUPER")));

        assert_eq!(net.tables_for("kottawa"), &[table.clone()]);
        assert_eq!(net.anchor_fare(&table, "KOTTAWA").unwrap().value(), 100.0);
        assert!(net.tables_for("Galle").is_empty());
    }

    #[test]
    fn later_fare_wins_and_tables_are_not_repeated() {
        let net = HighwayNetwork::from_sections(vec![
            hw("EX1", "SUPER", "Kottawa", 100.0),
            hw("EX 01", "SUPER", "KOTTAWA", 120.0),
        ]);
        let table = (RouteNo::normalize_highway("EX1"), HighwayService::new(Some("SUPER")));

        assert_eq!(net.tables_for("Kottawa").len(), 1);
        assert_eq!(net.anchor_fare(&table, "Kottawa").unwrap().value(), 120.0);
        assert_eq!(net.table_count(), 1);
    }

    #[test]
    fn names_keep_source_spelling() {
        let net = HighwayNetwork::from_sections(vec![
            hw("EX1", "SUPER", "Kottawa", 100.0),
            hw("EX1", "TEMP", "Kottawa", 80.0),
            hw("EX1", "SUPER", "Galle", 400.0),
        ]);
        assert_eq!(net.names(), &["Galle".to_string(), "Kottawa".to_string()]);
        assert_eq!(net.tables_for("KOTTAWA").len(), 2);
    }
}
