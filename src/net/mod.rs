//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! ListenerConfig
//!     → listener.rs (bind TCP socket)
//!     → tls.rs (optional certificate loading)
//!     → Hand off to HTTP layer
//! ```
//!
//! # Design Decisions
//! - Binding happens after the data store is loaded (traffic only when ready)
//! - TLS is optional and handled transparently

pub mod listener;
pub mod tls;

pub use listener::{bind, ListenerError};
pub use tls::load_tls_config;
