//! Response bodies.
//!
//! # Design Decisions
//! - Bodies borrow from the store and are serialized before the handler
//!   returns, so nothing is cloned per request
//! - Field names match the published JSON contract exactly

use std::collections::BTreeMap;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::query::FinancialSummary;
use crate::store::{Category, CompanyInfo, DataStore, Profile, Record};

/// `GET /` metadata.
#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub message: &'static str,
    pub version: &'static str,
    pub endpoints: BTreeMap<&'static str, &'static str>,
}

impl ServiceInfo {
    pub fn new() -> Self {
        let endpoints = BTreeMap::from([
            ("companies", "/companies"),
            ("search_companies", "/companies/search"),
            ("company_detail", "/companies/{duns}"),
            ("financial_summary", "/companies/{duns}/financials/summary"),
            ("balance_sheet", "/companies/{duns}/balance-sheet"),
            ("income_statement", "/companies/{duns}/income-statement"),
            ("cash_flow", "/companies/{duns}/cash-flow"),
            ("industries", "/companies/{duns}/industries"),
            ("people", "/companies/{duns}/people"),
            ("operations", "/companies/{duns}/operations"),
            ("all_industries", "/industries"),
            ("health", "/health"),
        ]);
        Self {
            message: "Company Financial Data API",
            version: env!("CARGO_PKG_VERSION"),
            endpoints,
        }
    }
}

impl Default for ServiceInfo {
    fn default() -> Self {
        Self::new()
    }
}

/// `GET /health` body: load counts per category.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub companies_loaded: usize,
    pub data_sources: BTreeMap<&'static str, usize>,
}

impl HealthStatus {
    pub fn from_store(store: &DataStore) -> Self {
        Self {
            status: "healthy",
            companies_loaded: store.company_count(),
            data_sources: Category::ALL
                .iter()
                .map(|c| (c.health_key(), store.category_len(*c)))
                .collect(),
        }
    }
}

/// `GET /companies/{duns}` body.
#[derive(Debug, Serialize)]
pub struct CompanyDetail<'a> {
    pub duns: &'a str,
    pub data: &'a CompanyInfo,
}

/// Industries, people or operations of one company.
///
/// Serialized as `{"duns": ..., "<profile field>": [...]}`.
#[derive(Debug)]
pub struct ProfileRecords<'a> {
    pub duns: &'a str,
    pub profile: Profile,
    pub records: &'a [Record],
}

impl Serialize for ProfileRecords<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("duns", self.duns)?;
        map.serialize_entry(self.profile.field_name(), self.records)?;
        map.end()
    }
}

/// A single financial statement.
#[derive(Debug, Serialize)]
pub struct StatementRecords<'a> {
    pub duns: &'a str,
    pub statement_type: &'static str,
    pub data: Vec<&'a Record>,
}

/// All financial statements of a company.
#[derive(Debug, Serialize)]
pub struct FinancialSummaryBody<'a> {
    pub duns: &'a str,
    #[serde(flatten)]
    pub statements: FinancialSummary<'a>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_profile_records_uses_profile_field_name() {
        let records = vec![Record::new().with("person_name", "Jane Doe")];
        let body = ProfileRecords {
            duns: "1",
            profile: Profile::People,
            records: &records,
        };

        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({ "duns": "1", "people": [{ "person_name": "Jane Doe" }] })
        );
    }

    #[test]
    fn test_health_lists_every_category() {
        let store = DataStore::builder().company("1", CompanyInfo::new()).build();
        let health = HealthStatus::from_store(&store);

        assert_eq!(health.companies_loaded, 1);
        assert_eq!(health.data_sources.len(), 7);
        assert_eq!(health.data_sources["company_info"], 1);
        assert_eq!(health.data_sources["cash_flows"], 0);
    }
}
