//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, timeout, request ID, metrics)
//! - Serve over plain TCP or TLS until shutdown is signalled

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::middleware;
use axum::routing::get;
use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::{PaginationConfig, ServiceConfig};
use crate::http::handlers;
use crate::http::request::{request_id, RequestUuid};
use crate::observability::metrics;
use crate::store::DataStore;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DataStore>,
    pub pagination: PaginationConfig,
}

/// HTTP server for the company data API.
pub struct ApiServer {
    router: Router,
    config: ServiceConfig,
}

impl ApiServer {
    /// Create a new HTTP server over an already loaded store.
    pub fn new(config: ServiceConfig, store: Arc<DataStore>) -> Self {
        let state = AppState {
            store,
            pagination: config.pagination.clone(),
        };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        Router::new()
            .route("/", get(handlers::root))
            .route("/health", get(handlers::health))
            .route("/companies", get(handlers::list_companies))
            .route("/companies/search", get(handlers::search_companies))
            .route("/companies/{duns}", get(handlers::get_company))
            .route("/companies/{duns}/industries", get(handlers::get_industries))
            .route("/companies/{duns}/people", get(handlers::get_people))
            .route("/companies/{duns}/operations", get(handlers::get_operations))
            .route("/companies/{duns}/balance-sheet", get(handlers::get_balance_sheet))
            .route("/companies/{duns}/income-statement", get(handlers::get_income_statement))
            .route("/companies/{duns}/cash-flow", get(handlers::get_cash_flow))
            .route(
                "/companies/{duns}/financials/summary",
                get(handlers::get_financial_summary),
            )
            .route("/industries", get(handlers::list_industries))
            .route_layer(middleware::from_fn(metrics::track_requests))
            .fallback(handlers::not_found)
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    path = %request.uri().path(),
                    request_id = %request_id(request.headers()),
                )
            }))
            .layer(SetRequestIdLayer::x_request_id(RequestUuid))
    }

    /// The fully layered router, for in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Serve plain HTTP until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("HTTP server draining");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Serve HTTPS on `addr` until `shutdown` fires.
    ///
    /// Open connections get `timeouts.shutdown_grace_secs` to finish.
    pub async fn run_tls(
        self,
        addr: SocketAddr,
        tls: RustlsConfig,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        tracing::info!(address = %addr, "HTTPS server starting");

        let handle = axum_server::Handle::new();
        let grace = Duration::from_secs(self.config.timeouts.shutdown_grace_secs);
        let shutdown_handle = handle.clone();
        tokio::spawn(async move {
            let _ = shutdown.recv().await;
            tracing::info!(grace_secs = grace.as_secs(), "HTTPS server draining");
            shutdown_handle.graceful_shutdown(Some(grace));
        });

        axum_server::bind_rustls(addr, tls)
            .handle(handle)
            .serve(self.router.into_make_service())
            .await?;

        tracing::info!("HTTPS server stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Category, CompanyInfo, Record};
    use axum::http::StatusCode;
    use serde_json::Value;
    use tower::ServiceExt;

    fn server() -> ApiServer {
        let store = DataStore::builder()
            .company("100", CompanyInfo::new().with("Company Type", "Private"))
            .records(
                Category::BalanceSheet,
                "100",
                vec![Record::new().with("line_item", "Total Assets").with("year", 2024)],
            )
            .build();
        ApiServer::new(ServiceConfig::default(), Arc::new(store))
    }

    async fn get(server: &ApiServer, uri: &str) -> (StatusCode, Value, Option<String>) {
        let response = server
            .router()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let request_id = response
            .headers()
            .get("x-request-id")
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body, request_id)
    }

    #[tokio::test]
    async fn test_company_detail() {
        let (status, body, _) = get(&server(), "/companies/100").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["duns"], "100");
        assert_eq!(body["data"]["Company Type"], "Private");
    }

    #[tokio::test]
    async fn test_unknown_company_is_404_with_detail() {
        let (status, body, _) = get(&server(), "/companies/999999999").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Company with DUNS 999999999 not found");
    }

    #[tokio::test]
    async fn test_search_route_is_not_a_duns() {
        let (status, body, _) = get(&server(), "/companies/search?company_type=Private").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 1);
    }

    #[tokio::test]
    async fn test_invalid_year_is_422() {
        let (status, body, _) = get(&server(), "/companies/100/balance-sheet?year=invalid").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["detail"][0]["field"], "year");
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let (status, body, _) = get(&server(), "/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Not Found");
    }

    #[tokio::test]
    async fn test_request_id_is_echoed() {
        let (_, _, request_id) = get(&server(), "/health").await;
        let request_id = request_id.expect("x-request-id header");
        assert!(uuid::Uuid::parse_str(&request_id).is_ok());
    }
}
