//! Query-string parameters and their validation.
//!
//! Parameters are first decoded as raw strings so that a malformed value can
//! be reported against its field name, then checked against declared ranges.
//! Every failing field is reported, not just the first. A repeated key keeps
//! its last value.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::config::PaginationConfig;
use crate::http::error::{ApiError, FieldError};
use crate::query::{Page, SearchFilter};

/// `Query` extractor whose rejections become 422 validation errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
            .map_err(|rejection| ApiError::validation("query_string", rejection.body_text()))?;

        let params: Map<String, Value> = pairs
            .into_iter()
            .map(|(key, value)| (key, Value::String(value)))
            .collect();
        let value = serde_json::from_value(Value::Object(params))
            .map_err(|e| ApiError::validation("query_string", e.to_string()))?;
        Ok(Self(value))
    }
}

/// `limit` / `offset` as sent by the client.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl PageParams {
    pub fn into_page(self, bounds: &PaginationConfig) -> Result<Page, ApiError> {
        let mut errors = Vec::new();
        let page = check_page(self.limit.as_deref(), self.offset.as_deref(), bounds, &mut errors);
        finish(page, errors)
    }
}

/// Search predicates plus pagination.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
    pub company_type: Option<String>,
    pub industry_code: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl SearchParams {
    pub fn into_search(self, bounds: &PaginationConfig) -> Result<(SearchFilter, Page), ApiError> {
        let mut errors = Vec::new();
        let page = check_page(self.limit.as_deref(), self.offset.as_deref(), bounds, &mut errors);
        let filter = SearchFilter {
            query: self.query,
            company_type: self.company_type,
            industry_code: self.industry_code,
        };
        finish((filter, page), errors)
    }
}

/// Optional `year` filter for financial statements.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct YearParams {
    pub year: Option<String>,
}

impl YearParams {
    pub fn into_year(self) -> Result<Option<i64>, ApiError> {
        let mut errors = Vec::new();
        let year = parse_int("year", self.year.as_deref(), &mut errors);
        finish(year, errors)
    }
}

fn finish<T>(value: T, errors: Vec<FieldError>) -> Result<T, ApiError> {
    if errors.is_empty() {
        Ok(value)
    } else {
        Err(ApiError::Validation(errors))
    }
}

fn parse_int(field: &'static str, raw: Option<&str>, errors: &mut Vec<FieldError>) -> Option<i64> {
    let raw = raw?;
    match raw.trim().parse::<i64>() {
        Ok(n) => Some(n),
        Err(_) => {
            errors.push(FieldError::new(field, format!("`{raw}` is not a valid integer")));
            None
        }
    }
}

fn check_page(
    limit: Option<&str>,
    offset: Option<&str>,
    bounds: &PaginationConfig,
    errors: &mut Vec<FieldError>,
) -> Page {
    let mut page = Page::new(bounds.default_limit, 0);

    if let Some(limit) = parse_int("limit", limit, errors) {
        if limit < 1 {
            errors.push(FieldError::new("limit", "must be greater than or equal to 1"));
        } else if limit > bounds.max_limit as i64 {
            errors.push(FieldError::new(
                "limit",
                format!("must be less than or equal to {}", bounds.max_limit),
            ));
        } else {
            page.limit = limit as usize;
        }
    }

    if let Some(offset) = parse_int("offset", offset, errors) {
        if offset < 0 {
            errors.push(FieldError::new("offset", "must be greater than or equal to 0"));
        } else {
            page.offset = offset as usize;
        }
    }

    page
}
