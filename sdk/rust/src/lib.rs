//! Typed client for the Company Financial Data API.

pub mod client;
pub mod models;

pub use client::{ClientError, CompanyClient, StatementKind};
pub use models::*;
