use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::models::*;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx answer; `detail` is the body's `detail` field when present.
    #[error("API returned {status}: {detail}")]
    Status { status: StatusCode, detail: Value },
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Http(e) => e.status(),
        }
    }
}

/// Financial statement endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    BalanceSheet,
    IncomeStatement,
    CashFlow,
}

impl StatementKind {
    fn path(self) -> &'static str {
        match self {
            StatementKind::BalanceSheet => "balance-sheet",
            StatementKind::IncomeStatement => "income-statement",
            StatementKind::CashFlow => "cash-flow",
        }
    }
}

#[derive(Serialize)]
struct PageQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    offset: Option<u32>,
}

#[derive(Serialize)]
struct YearQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    year: Option<i64>,
}

pub struct CompanyClient {
    client: Client,
    base_url: String,
}

impl CompanyClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn get<T, Q>(&self, path: &str, query: Option<&Q>) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let mut request = self.client.get(format!("{}{}", self.base_url, path));
        if let Some(query) = query {
            request = request.query(query);
        }
        let resp = request.send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body: Value = resp.json().await.unwrap_or(Value::Null);
            let detail = body.get("detail").cloned().unwrap_or(body);
            return Err(ClientError::Status { status, detail });
        }
        Ok(resp.json().await?)
    }

    pub async fn info(&self) -> Result<Value, ClientError> {
        self.get::<_, ()>("/", None).await
    }

    pub async fn health(&self) -> Result<Health, ClientError> {
        self.get::<_, ()>("/health", None).await
    }

    pub async fn list_companies(&self, limit: Option<u32>, offset: Option<u32>) -> Result<CompanyList, ClientError> {
        self.get("/companies", Some(&PageQuery { limit, offset })).await
    }

    pub async fn search_companies(&self, query: &SearchQuery) -> Result<CompanyList, ClientError> {
        self.get("/companies/search", Some(query)).await
    }

    pub async fn company(&self, duns: &str) -> Result<CompanyDetail, ClientError> {
        self.get::<_, ()>(&format!("/companies/{duns}"), None).await
    }

    pub async fn industries(&self, duns: &str) -> Result<Industries, ClientError> {
        self.get::<_, ()>(&format!("/companies/{duns}/industries"), None).await
    }

    pub async fn people(&self, duns: &str) -> Result<People, ClientError> {
        self.get::<_, ()>(&format!("/companies/{duns}/people"), None).await
    }

    pub async fn operations(&self, duns: &str) -> Result<Operations, ClientError> {
        self.get::<_, ()>(&format!("/companies/{duns}/operations"), None).await
    }

    pub async fn statement(
        &self,
        duns: &str,
        kind: StatementKind,
        year: Option<i64>,
    ) -> Result<FinancialStatement, ClientError> {
        self.get(&format!("/companies/{duns}/{}", kind.path()), Some(&YearQuery { year }))
            .await
    }

    pub async fn financial_summary(&self, duns: &str, year: Option<i64>) -> Result<FinancialSummary, ClientError> {
        self.get(&format!("/companies/{duns}/financials/summary"), Some(&YearQuery { year }))
            .await
    }

    pub async fn list_industries(&self, limit: Option<u32>, offset: Option<u32>) -> Result<IndustryList, ClientError> {
        self.get("/industries", Some(&PageQuery { limit, offset })).await
    }
}
