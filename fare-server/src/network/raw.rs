//! Raw network table records.
//!
//! Each table is a JSON array. Elements are decoded one at a time into the
//! `Raw*` types below and then converted into validated records; an element
//! that fails either step is rejected with a [`RecordError`] and skipped by
//! the index builder.
//!
//! Identifier and numeric columns are accepted as JSON strings or numbers,
//! since the source tables are not consistent about it.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{Amount, HighwayService, RouteNo, Section, SectionId, ServiceSet, Stage};

use super::records::{FareStage, HighwaySection, PublishedService, RouteInfo};

/// Why a raw record was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    /// The element didn't have the expected shape
    #[error("malformed record: {0}")]
    Malformed(String),

    /// A required field was absent, null or blank
    #[error("missing field `{0}`")]
    MissingField(&'static str),

    /// A field that must be an integer wasn't
    #[error("field `{field}` is not an integer: {value}")]
    NotAnInteger { field: &'static str, value: String },

    /// A field that must be an amount wasn't
    #[error("field `{field}` is not an amount: {value}")]
    NotAnAmount { field: &'static str, value: String },

    /// The route number normalized to an empty string
    #[error("route number {0:?} is empty after normalization")]
    EmptyRouteNo(String),
}

/// A string-or-number cell.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(serde_json::Number),
    Text(String),
}

impl Scalar {
    /// The cell as text, numbers rendered the way JSON writes them.
    pub fn to_text(&self) -> String {
        match self {
            Scalar::Number(n) => n.to_string(),
            Scalar::Text(s) => s.clone(),
        }
    }

    /// The cell as an integer. Integral floats (`20.0`) and numeric
    /// strings (`" 20 "`) are accepted.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Scalar::Number(n) => n.as_i64().or_else(|| {
                let f = n.as_f64()?;
                (f.fract() == 0.0 && f.abs() < i64::MAX as f64).then_some(f as i64)
            }),
            Scalar::Text(s) => s.trim().parse().ok(),
        }
    }

    /// The cell as an amount.
    pub fn as_amount(&self) -> Option<Amount> {
        match self {
            Scalar::Number(n) => n.as_f64().and_then(|f| Amount::new(f).ok()),
            Scalar::Text(s) => Amount::parse(s).ok(),
        }
    }

    fn is_blank(&self) -> bool {
        matches!(self, Scalar::Text(s) if s.trim().is_empty())
    }
}

/// Decode one table element.
pub fn decode<T: for<'de> Deserialize<'de>>(value: Value) -> Result<T, RecordError> {
    serde_json::from_value(value).map_err(|e| RecordError::Malformed(e.to_string()))
}

fn required_text(value: Option<String>, field: &'static str) -> Result<String, RecordError> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or(RecordError::MissingField(field))
}

fn required_route_no(
    value: Option<Scalar>,
    field: &'static str,
    normalize: fn(&str) -> RouteNo,
) -> Result<(String, RouteNo), RecordError> {
    let raw = value
        .filter(|s| !s.is_blank())
        .ok_or(RecordError::MissingField(field))?
        .to_text();
    let route_no = normalize(&raw);
    if route_no.is_empty() {
        return Err(RecordError::EmptyRouteNo(raw));
    }
    Ok((raw, route_no))
}

fn required_integer(value: Option<Scalar>, field: &'static str) -> Result<i64, RecordError> {
    let cell = value
        .filter(|s| !s.is_blank())
        .ok_or(RecordError::MissingField(field))?;
    cell.as_i64().ok_or_else(|| RecordError::NotAnInteger {
        field,
        value: cell.to_text(),
    })
}

fn optional_amount(value: Option<Scalar>, field: &'static str) -> Result<Option<Amount>, RecordError> {
    match value.filter(|s| !s.is_blank()) {
        None => Ok(None),
        Some(cell) => cell
            .as_amount()
            .map(Some)
            .ok_or_else(|| RecordError::NotAnAmount {
                field,
                value: cell.to_text(),
            }),
    }
}

/// A row of the section table.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSection {
    pub route_no: Option<Scalar>,
    pub section_name: Option<String>,
    pub section_id: Option<Scalar>,
    pub service_type: Option<String>,
}

impl TryFrom<RawSection> for Section {
    type Error = RecordError;

    fn try_from(raw: RawSection) -> Result<Self, RecordError> {
        let (raw_route_no, route_no) =
            required_route_no(raw.route_no, "route_no", RouteNo::normalize)?;
        Ok(Section {
            raw_route_no,
            route_no,
            name: required_text(raw.section_name, "section_name")?,
            id: SectionId(required_integer(raw.section_id, "section_id")?),
            services: ServiceSet::parse(raw.service_type.as_deref()),
        })
    }
}

/// A row of the route metadata table.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRoute {
    #[serde(rename = "Route_No")]
    pub route_no: Option<Scalar>,
    #[serde(rename = "Origin")]
    pub origin: Option<String>,
    #[serde(rename = "Destination")]
    pub destination: Option<String>,
}

impl RawRoute {
    /// Convert using the given route number normalization.
    pub fn into_route_info(self, normalize: fn(&str) -> RouteNo) -> Result<RouteInfo, RecordError> {
        let (_, route_no) = required_route_no(self.route_no, "Route_No", normalize)?;
        Ok(RouteInfo {
            route_no,
            origin: required_text(self.origin, "Origin")?,
            destination: required_text(self.destination, "Destination")?,
        })
    }
}

/// A row of the fare-stage table.
#[derive(Debug, Clone, Deserialize)]
pub struct RawFareStage {
    pub fare_stage: Option<Scalar>,
    pub normal: Option<Scalar>,
    pub semi: Option<Scalar>,
    pub ac: Option<Scalar>,
}

impl TryFrom<RawFareStage> for FareStage {
    type Error = RecordError;

    fn try_from(raw: RawFareStage) -> Result<Self, RecordError> {
        let stage = required_integer(raw.fare_stage, "fare_stage")?;
        let stage = u64::try_from(stage).map_err(|_| RecordError::NotAnInteger {
            field: "fare_stage",
            value: stage.to_string(),
        })?;
        Ok(FareStage {
            stage: Stage(stage),
            normal: optional_amount(raw.normal, "normal")?,
            semi: optional_amount(raw.semi, "semi")?,
            ac: optional_amount(raw.ac, "ac")?,
        })
    }
}

/// A row of one of the per-class route tables (normal, semi, ac).
#[derive(Debug, Clone, Deserialize)]
pub struct RawPublishedService {
    pub route_no: Option<Scalar>,
    pub distance: Option<Value>,
    pub travel_time: Option<Value>,
}

impl TryFrom<RawPublishedService> for PublishedService {
    type Error = RecordError;

    fn try_from(raw: RawPublishedService) -> Result<Self, RecordError> {
        let (_, route_no) = required_route_no(raw.route_no, "route_no", RouteNo::normalize)?;
        Ok(PublishedService {
            route_no,
            distance: raw.distance,
            travel_time: raw.travel_time,
        })
    }
}

/// A row of the highway section table.
#[derive(Debug, Clone, Deserialize)]
pub struct RawHighwaySection {
    pub route_no: Option<Scalar>,
    pub service_type: Option<String>,
    pub section_name: Option<String>,
    pub fare: Option<Scalar>,
}

impl TryFrom<RawHighwaySection> for HighwaySection {
    type Error = RecordError;

    fn try_from(raw: RawHighwaySection) -> Result<Self, RecordError> {
        let (_, route_no) =
            required_route_no(raw.route_no, "route_no", RouteNo::normalize_highway)?;
        let fare = optional_amount(raw.fare, "fare")?.ok_or(RecordError::MissingField("fare"))?;
        Ok(HighwaySection {
            route_no,
            service: HighwayService::new(raw.service_type.as_deref()),
            name: required_text(raw.section_name, "section_name")?,
            fare,
        })
    }
}
