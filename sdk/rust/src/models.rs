use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A table row as served by the API.
pub type Row = Map<String, Value>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
    pub companies_loaded: usize,
    pub data_sources: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanySummary {
    pub duns: String,
    pub address: Option<String>,
    pub telephone: Option<String>,
    pub company_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyList {
    pub total: usize,
    pub companies: Vec<CompanySummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyDetail {
    pub duns: String,
    pub data: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Industries {
    pub duns: String,
    pub industries: Vec<Row>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct People {
    pub duns: String,
    pub people: Vec<Row>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Operations {
    pub duns: String,
    pub operations: Vec<Row>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialStatement {
    pub duns: String,
    pub statement_type: String,
    pub data: Vec<Row>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialSummary {
    pub duns: String,
    pub balance_sheet: Vec<Row>,
    pub income_statement: Vec<Row>,
    pub cash_flow: Vec<Row>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryInfo {
    pub industry_code: String,
    pub industry_description: String,
    pub company_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndustryList {
    pub total_industries: usize,
    pub industries: Vec<IndustryInfo>,
}

/// Query options for `/companies/search`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}
