//! The vulnerability catalog adapter.
//! This module contains the adapter used to normalize a JSON catalog of
//! known exploited vulnerabilities into vulnerability records.

use chrono::NaiveDate;
use log::{debug, info, trace, warn};
use serde::Deserialize;

use super::FeedAdapter;
use crate::models::{FeedRecord, VulnerabilityRecord};

/// The strict format of the dateAdded field
const DATE_ADDED_FORMAT: &str = "%Y-%m-%d";

/// The shape of the remote document.
/// Field names follow the JSON schema of the catalog, hence the renames.
#[derive(Deserialize)]
struct VulnerabilityCatalog {
    vulnerabilities: Vec<RawVulnerability>,
}

/// One raw element of the catalog.
/// Every field is optional at this stage, the adapter decides which
/// absences skip the record and which ones degrade gracefully.
#[derive(Deserialize)]
struct RawVulnerability {
    #[serde(rename = "cveID")]
    cve_id: Option<String>,
    #[serde(rename = "vulnerabilityName")]
    vulnerability_name: Option<String>,
    #[serde(rename = "dateAdded")]
    date_added: Option<String>,
    #[serde(rename = "shortDescription")]
    short_description: Option<String>,
}

/// The adapter for JSON vulnerability catalogs.
pub struct VulnerabilityJsonAdapter;

impl VulnerabilityJsonAdapter {
    /// Creates the adapter
    pub fn new() -> Self {
        VulnerabilityJsonAdapter
    }

    /// Parses the dateAdded field of a record.
    /// A malformed value is treated like an absent one: the record stays
    /// in the list, always passes the date filter and renders an empty
    /// date. Dropping a whole advisory on one malformed field would hide
    /// it silently.
    fn parse_date_added(raw: Option<&str>) -> Option<NaiveDate> {
        let raw = raw?;
        match NaiveDate::parse_from_str(raw, DATE_ADDED_FORMAT) {
            Ok(date) => Some(date),
            Err(e) => {
                warn!("Ignoring malformed dateAdded {:?}: {}", raw, e);
                None
            }
        }
    }
}

impl FeedAdapter for VulnerabilityJsonAdapter {
    /// Normalizes the elements of a vulnerability catalog.
    fn normalize(&self, body: &str) -> Result<Vec<FeedRecord>, String> {
        trace!("Running VulnerabilityJsonAdapter::normalize()");
        let catalog: VulnerabilityCatalog = serde_json::from_str(body)
            .map_err(|e| format!("unable to parse the vulnerability catalog: {}", e))?;

        let mut records = Vec::new();
        for raw in catalog.vulnerabilities {
            // The three searchable fields are required, a record missing
            // one of them is skipped, not an error
            let (cve_id, name, description) = match (
                raw.cve_id,
                raw.vulnerability_name,
                raw.short_description,
            ) {
                (Some(cve_id), Some(name), Some(description)) => (cve_id, name, description),
                _ => {
                    debug!("Skipping a vulnerability without id, name or description");
                    continue;
                }
            };

            let date_added = Self::parse_date_added(raw.date_added.as_deref());
            records.push(FeedRecord::Vulnerability(VulnerabilityRecord {
                cve_id,
                name,
                date_added,
                description,
            }));
        }

        info!("Normalized {} vulnerability records", records.len());
        Ok(records)
    }
}
