//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP/TLS connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID)
//!     → params.rs (decode and validate query parameters)
//!     → handlers.rs (run query against the store)
//!     → response.rs / error.rs (JSON bodies, status codes)
//!     → Send to client
//! ```

pub mod error;
pub mod handlers;
pub mod params;
pub mod request;
pub mod response;
pub mod server;

pub use error::{ApiError, FieldError};
pub use request::{RequestUuid, X_REQUEST_ID};
pub use server::{ApiServer, AppState};
