//! Query layer over the data store.
//!
//! # Data Flow
//! ```text
//! validated request parameters
//!     → companies.rs  (info lookup, listing, search)
//!     → financials.rs (statements, year filter, summary)
//!     → industries.rs (per-company classifications, aggregation)
//!     → pagination.rs (offset/limit slicing)
//!     → serializable response models
//! ```
//!
//! # Design Decisions
//! - Stateless functions taking `&DataStore`; nothing here mutates
//! - `CompanyNotFound` is the only failure; range checks happen at the boundary
//! - Responses borrow from the store where possible

pub mod companies;
pub mod financials;
pub mod industries;
pub mod pagination;

use thiserror::Error;

pub use companies::{company_info, list_companies, profile_records, search_companies, CompanyPage, CompanySummary, SearchFilter};
pub use financials::{financial_summary, statement, FinancialSummary};
pub use industries::{list_industries, IndustryPage, IndustrySummary};
pub use pagination::Page;

use crate::store::DataStore;

/// Domain failures of the query layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("Company with DUNS {0} not found")]
    CompanyNotFound(String),
}

pub type QueryResult<T> = Result<T, QueryError>;

/// Fail with `CompanyNotFound` unless `id` has company info.
pub(crate) fn ensure_exists(store: &DataStore, id: &str) -> QueryResult<()> {
    if store.exists(id) {
        Ok(())
    } else {
        Err(QueryError::CompanyNotFound(id.to_string()))
    }
}
