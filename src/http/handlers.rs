//! Endpoint handlers.
//!
//! Each handler validates its parameters, runs one query against the shared
//! store and serializes the borrowed result before returning.

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::http::error::ApiError;
use crate::http::params::{PageParams, SearchParams, ValidQuery, YearParams};
use crate::http::response::{
    CompanyDetail, FinancialSummaryBody, HealthStatus, ProfileRecords, ServiceInfo, StatementRecords,
};
use crate::http::server::AppState;
use crate::query;
use crate::store::{Profile, Statement};

pub type ApiResult = Result<Response, ApiError>;

pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo::new())
}

pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus::from_store(&state.store))
}

pub async fn list_companies(
    State(state): State<AppState>,
    ValidQuery(params): ValidQuery<PageParams>,
) -> ApiResult {
    let page = params.into_page(&state.pagination)?;
    Ok(Json(query::list_companies(&state.store, page)).into_response())
}

pub async fn search_companies(
    State(state): State<AppState>,
    ValidQuery(params): ValidQuery<SearchParams>,
) -> ApiResult {
    let (filter, page) = params.into_search(&state.pagination)?;
    Ok(Json(query::search_companies(&state.store, &filter, page)).into_response())
}

pub async fn get_company(State(state): State<AppState>, Path(duns): Path<String>) -> ApiResult {
    let data = query::company_info(&state.store, &duns)?;
    Ok(Json(CompanyDetail { duns: &duns, data }).into_response())
}

fn profile_response(state: &AppState, duns: &str, profile: Profile) -> ApiResult {
    let records = query::profile_records(&state.store, duns, profile)?;
    Ok(Json(ProfileRecords { duns, profile, records }).into_response())
}

pub async fn get_industries(State(state): State<AppState>, Path(duns): Path<String>) -> ApiResult {
    profile_response(&state, &duns, Profile::Industries)
}

pub async fn get_people(State(state): State<AppState>, Path(duns): Path<String>) -> ApiResult {
    profile_response(&state, &duns, Profile::People)
}

pub async fn get_operations(State(state): State<AppState>, Path(duns): Path<String>) -> ApiResult {
    profile_response(&state, &duns, Profile::Operations)
}

fn statement_response(state: &AppState, duns: &str, kind: Statement, params: YearParams) -> ApiResult {
    let year = params.into_year()?;
    let data = query::statement(&state.store, duns, kind, year)?;
    Ok(Json(StatementRecords {
        duns,
        statement_type: kind.statement_type(),
        data,
    })
    .into_response())
}

pub async fn get_balance_sheet(
    State(state): State<AppState>,
    Path(duns): Path<String>,
    ValidQuery(params): ValidQuery<YearParams>,
) -> ApiResult {
    statement_response(&state, &duns, Statement::BalanceSheet, params)
}

pub async fn get_income_statement(
    State(state): State<AppState>,
    Path(duns): Path<String>,
    ValidQuery(params): ValidQuery<YearParams>,
) -> ApiResult {
    statement_response(&state, &duns, Statement::IncomeStatement, params)
}

pub async fn get_cash_flow(
    State(state): State<AppState>,
    Path(duns): Path<String>,
    ValidQuery(params): ValidQuery<YearParams>,
) -> ApiResult {
    statement_response(&state, &duns, Statement::CashFlow, params)
}

pub async fn get_financial_summary(
    State(state): State<AppState>,
    Path(duns): Path<String>,
    ValidQuery(params): ValidQuery<YearParams>,
) -> ApiResult {
    let year = params.into_year()?;
    let statements = query::financial_summary(&state.store, &duns, year)?;
    Ok(Json(FinancialSummaryBody {
        duns: &duns,
        statements,
    })
    .into_response())
}

pub async fn list_industries(
    State(state): State<AppState>,
    ValidQuery(params): ValidQuery<PageParams>,
) -> ApiResult {
    let page = params.into_page(&state.pagination)?;
    Ok(Json(query::list_industries(&state.store, page)).into_response())
}

pub async fn not_found() -> ApiError {
    ApiError::RouteNotFound
}
