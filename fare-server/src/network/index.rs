//! The immutable network index.
//!
//! Built once from the raw tables, then shared read-only by every query.
//! Building never fails: records that can't be decoded or validated are
//! skipped, logged and counted in the [`BuildReport`].

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::domain::{RouteNo, Section, ServiceClass, ServiceSet, Stage};

use super::highway::HighwayNetwork;
use super::raw::{
    RawFareStage, RawHighwaySection, RawPublishedService, RawRoute, RawSection, RecordError,
    decode,
};
use super::records::{FareStage, HighwaySection, PublishedService, RouteInfo};

/// The raw source tables, one JSON value per record.
#[derive(Debug, Clone, Default)]
pub struct NetworkTables {
    pub sections: Vec<Value>,
    pub routes: Vec<Value>,
    pub fare_stages: Vec<Value>,
    pub normal: Vec<Value>,
    pub semi: Vec<Value>,
    pub ac: Vec<Value>,
    pub highway: Vec<Value>,
}

/// How many records of one table were kept and skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableReport {
    pub table: &'static str,
    pub accepted: usize,
    pub skipped: usize,
}

/// Per-table outcome of an index build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub tables: Vec<TableReport>,
}

impl BuildReport {
    /// Report for one table, by name.
    pub fn table(&self, name: &str) -> Option<&TableReport> {
        self.tables.iter().find(|t| t.table == name)
    }

    /// Total number of skipped records across all tables.
    pub fn skipped(&self) -> usize {
        self.tables.iter().map(|t| t.skipped).sum()
    }
}

/// Counts shown alongside the search forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NetworkStats {
    /// Route metadata records loaded.
    pub routes: usize,
    /// Distinct section names.
    pub sections: usize,
    /// Distinct highway access-point names.
    pub highway_sections: usize,
}

/// The sections of one route.
#[derive(Debug, Clone)]
pub struct RouteSections {
    route_no: RouteNo,

    /// Sorted by (id, name), so scans visit sections in a fixed order.
    sections: Vec<Section>,

    /// Section name → index into `sections`.
    by_name: HashMap<String, usize>,

    /// Union of the premium classes of every section.
    services: ServiceSet,
}

impl RouteSections {
    /// Build from sections keyed by name.
    fn new(route_no: RouteNo, by_name: HashMap<String, Section>) -> Self {
        let mut sections: Vec<Section> = by_name.into_values().collect();
        sections.sort_by(|a, b| a.id.cmp(&b.id).then_with(|| a.name.cmp(&b.name)));

        let by_name = sections
            .iter()
            .enumerate()
            .map(|(i, s)| (s.name.clone(), i))
            .collect();
        let services = sections
            .iter()
            .fold(ServiceSet::empty(), |set, s| set.union(s.services));

        Self {
            route_no,
            sections,
            by_name,
            services,
        }
    }

    pub fn route_no(&self) -> &RouteNo {
        &self.route_no
    }

    /// Look up a section by its exact name.
    pub fn get(&self, name: &str) -> Option<&Section> {
        self.by_name.get(name).map(|&i| &self.sections[i])
    }

    /// All sections, in ascending id order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Premium classes offered anywhere on the route.
    pub fn services(&self) -> ServiceSet {
        self.services
    }
}

/// Published per-class route details.
#[derive(Debug, Default)]
struct PublishedTables {
    normal: HashMap<RouteNo, PublishedService>,
    semi: HashMap<RouteNo, PublishedService>,
    ac: HashMap<RouteNo, PublishedService>,
}

impl PublishedTables {
    fn get(&self, class: ServiceClass, route_no: &RouteNo) -> Option<&PublishedService> {
        match class {
            ServiceClass::Normal => self.normal.get(route_no),
            ServiceClass::SemiLuxury => self.semi.get(route_no),
            ServiceClass::AirConditioned => self.ac.get(route_no),
        }
    }
}

/// Everything the query engines need, indexed for lookup.
#[derive(Debug)]
pub struct NetworkIndex {
    /// Normalized route number → sections. Ordered by route number.
    routes: BTreeMap<RouteNo, RouteSections>,

    /// Route metadata by normalized route number.
    route_info: HashMap<RouteNo, RouteInfo>,

    /// (origin name, destination name) → route metadata, for naming routes
    /// whose number has no metadata record.
    route_by_terminals: HashMap<(String, String), RouteNo>,

    /// Route metadata keyed by the highway normalization of its number.
    highway_route_info: HashMap<RouteNo, RouteInfo>,

    fare_stages: HashMap<Stage, FareStage>,

    published: PublishedTables,

    /// Distinct section names, sorted.
    section_names: Vec<String>,

    /// Lower-cased section name → spelling in `section_names`.
    names_by_lower: HashMap<String, usize>,

    highway: HighwayNetwork,

    report: BuildReport,
}

/// Decode and validate one table, logging and counting rejects.
fn accept<R, T>(
    table: &'static str,
    values: Vec<Value>,
    convert: impl Fn(R) -> Result<T, RecordError>,
    report: &mut BuildReport,
) -> Vec<T>
where
    R: for<'de> serde::Deserialize<'de>,
{
    let mut accepted = Vec::with_capacity(values.len());
    let mut skipped = 0;

    for (position, value) in values.into_iter().enumerate() {
        match decode::<R>(value).and_then(&convert) {
            Ok(record) => accepted.push(record),
            Err(e) => {
                warn!(table, position, error = %e, "skipping record");
                skipped += 1;
            }
        }
    }

    report.tables.push(TableReport {
        table,
        accepted: accepted.len(),
        skipped,
    });
    accepted
}

fn to_published(raw: RawPublishedService) -> Result<PublishedService, RecordError> {
    PublishedService::try_from(raw)
}

fn published_map(records: Vec<PublishedService>) -> HashMap<RouteNo, PublishedService> {
    records
        .into_iter()
        .map(|p| (p.route_no.clone(), p))
        .collect()
}

impl NetworkIndex {
    /// Build the index from raw tables.
    ///
    /// Each table is decoded once. Where two records share a key (route
    /// number, stage, or route+name for sections) the later record wins,
    /// except in the highway route metadata where the first record wins.
    pub fn build(tables: NetworkTables) -> Self {
        let mut report = BuildReport::default();

        let sections = accept(
            "sections",
            tables.sections,
            |r: RawSection| Section::try_from(r),
            &mut report,
        );
        // The highway engine names routes through its own normalization of
        // the same metadata, so each record yields both keys.
        let routes = accept(
            "routes",
            tables.routes,
            |r: RawRoute| {
                let highway = r.clone().into_route_info(RouteNo::normalize_highway).ok();
                Ok((r.into_route_info(RouteNo::normalize)?, highway))
            },
            &mut report,
        );
        let fare_stages = accept(
            "fare_stages",
            tables.fare_stages,
            |r: RawFareStage| FareStage::try_from(r),
            &mut report,
        );
        let published = PublishedTables {
            normal: published_map(accept("normal", tables.normal, to_published, &mut report)),
            semi: published_map(accept("semi", tables.semi, to_published, &mut report)),
            ac: published_map(accept("ac", tables.ac, to_published, &mut report)),
        };
        let highway = accept(
            "highway",
            tables.highway,
            |r: RawHighwaySection| HighwaySection::try_from(r),
            &mut report,
        );

        let mut highway_route_info = HashMap::new();
        let routes: Vec<RouteInfo> = routes
            .into_iter()
            .map(|(info, highway)| {
                if let Some(highway) = highway {
                    highway_route_info
                        .entry(highway.route_no.clone())
                        .or_insert(highway);
                }
                info
            })
            .collect();

        Self::assemble(
            sections,
            routes,
            highway_route_info,
            fare_stages,
            published,
            HighwayNetwork::from_sections(highway),
            report,
        )
    }

    fn assemble(
        sections: Vec<Section>,
        routes: Vec<RouteInfo>,
        highway_route_info: HashMap<RouteNo, RouteInfo>,
        fare_stages: Vec<FareStage>,
        published: PublishedTables,
        highway: HighwayNetwork,
        report: BuildReport,
    ) -> Self {
        let mut grouped: BTreeMap<RouteNo, HashMap<String, Section>> = BTreeMap::new();
        let mut names = BTreeSet::new();
        for section in sections {
            names.insert(section.name.clone());
            grouped
                .entry(section.route_no.clone())
                .or_default()
                .insert(section.name.clone(), section);
        }
        let routes_index: BTreeMap<RouteNo, RouteSections> = grouped
            .into_iter()
            .map(|(route_no, by_name)| (route_no.clone(), RouteSections::new(route_no, by_name)))
            .collect();

        let route_info: HashMap<RouteNo, RouteInfo> = routes
            .into_iter()
            .map(|r| (r.route_no.clone(), r))
            .collect();

        // First route (in route number order) wins for a terminal pair.
        let mut ordered: Vec<&RouteInfo> = route_info.values().collect();
        ordered.sort_by(|a, b| a.route_no.cmp(&b.route_no));
        let mut route_by_terminals = HashMap::new();
        for info in ordered {
            route_by_terminals
                .entry((info.origin.clone(), info.destination.clone()))
                .or_insert_with(|| info.route_no.clone());
        }

        let fare_stages: HashMap<Stage, FareStage> =
            fare_stages.into_iter().map(|f| (f.stage, f)).collect();

        let section_names: Vec<String> = names.into_iter().collect();
        let mut names_by_lower = HashMap::new();
        for (i, name) in section_names.iter().enumerate() {
            names_by_lower.entry(name.to_lowercase()).or_insert(i);
        }

        let index = Self {
            routes: routes_index,
            route_info,
            route_by_terminals,
            highway_route_info,
            fare_stages,
            published,
            section_names,
            names_by_lower,
            highway,
            report,
        };

        info!(
            routes = index.stats().routes,
            routes_with_sections = index.routes.len(),
            sections = index.section_names.len(),
            fare_stages = index.fare_stages.len(),
            highway_tables = index.highway.table_count(),
            skipped = index.report.skipped(),
            "network index built"
        );
        index
    }

    /// Routes with sections, in ascending route number order.
    pub fn routes(&self) -> impl Iterator<Item = &RouteSections> {
        self.routes.values()
    }

    /// Sections of one route.
    pub fn route(&self, route_no: &RouteNo) -> Option<&RouteSections> {
        self.routes.get(route_no)
    }

    /// Metadata for a route number.
    pub fn route_info(&self, route_no: &RouteNo) -> Option<&RouteInfo> {
        self.route_info.get(route_no)
    }

    /// Metadata for the route whose display terminals are exactly
    /// `origin` and `destination`.
    pub fn route_by_terminals(&self, origin: &str, destination: &str) -> Option<&RouteInfo> {
        let route_no = self
            .route_by_terminals
            .get(&(origin.to_string(), destination.to_string()))?;
        self.route_info.get(route_no)
    }

    /// Metadata for a highway route number.
    pub fn highway_route_info(&self, route_no: &RouteNo) -> Option<&RouteInfo> {
        self.highway_route_info.get(route_no)
    }

    /// Fare-table entry for a stage distance.
    pub fn fare_stage(&self, stage: Stage) -> Option<&FareStage> {
        self.fare_stages.get(&stage)
    }

    /// Published details of a route at a service class.
    pub fn published(&self, class: ServiceClass, route_no: &RouteNo) -> Option<&PublishedService> {
        self.published.get(class, route_no)
    }

    /// Distinct section names across all routes, sorted.
    pub fn section_names(&self) -> &[String] {
        &self.section_names
    }

    /// The stored spelling of a section name, matched exactly if possible
    /// and otherwise ignoring case.
    pub fn canonical_section_name(&self, name: &str) -> Option<&str> {
        if let Ok(i) = self.section_names.binary_search_by(|n| n.as_str().cmp(name)) {
            return Some(&self.section_names[i]);
        }
        self.names_by_lower
            .get(&name.to_lowercase())
            .map(|&i| self.section_names[i].as_str())
    }

    pub fn highway(&self) -> &HighwayNetwork {
        &self.highway
    }

    /// Outcome of the build that produced this index.
    pub fn report(&self) -> &BuildReport {
        &self.report
    }

    pub fn stats(&self) -> NetworkStats {
        NetworkStats {
            routes: self.route_info_count(),
            sections: self.section_names.len(),
            highway_sections: self.highway.names().len(),
        }
    }

    fn route_info_count(&self) -> usize {
        self.report.table("routes").map_or(0, |t| t.accepted)
    }
}
