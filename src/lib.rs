//! Company Financial Data API Library
//!
//! Read-only REST service over per-company CSV data (company info,
//! financial statements, industries, people, operations) keyed by DUNS number.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod query;
pub mod store;

pub use config::ServiceConfig;
pub use http::ApiServer;
pub use lifecycle::Shutdown;
pub use store::DataStore;
