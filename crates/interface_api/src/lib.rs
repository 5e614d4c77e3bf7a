//! HTTP API Layer
//!
//! This crate exposes the claim validation engine to the claim form using
//! Axum.
//!
//! # Architecture
//!
//! - **Handlers**: live validation, attachment intake, and submission
//! - **Middleware**: request logging, tracing, CORS
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let state = AppState::new(config, Arc::new(InMemorySubmissionPort::new()))?;
//! let app = create_router(state);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use core_kernel::{CoreError, SystemClock};
use domain_claims::{AttachmentValidator, ClaimSubmissionPort, RuleEngine};

use crate::config::ApiConfig;
use crate::handlers::{claims, health};
use crate::middleware::request_logging_middleware;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub port: Arc<dyn ClaimSubmissionPort>,
    pub rules: RuleEngine,
    pub attachments: AttachmentValidator,
}

impl AppState {
    /// Builds state that evaluates dates against the system clock in the
    /// configured timezone
    ///
    /// # Errors
    ///
    /// Returns an error if the configured timezone is unknown
    pub fn new(config: ApiConfig, port: Arc<dyn ClaimSubmissionPort>) -> Result<Self, CoreError> {
        let rules = RuleEngine::with_clock(Arc::new(SystemClock), config.timezone()?);
        Ok(Self::with_rules(config, port, rules))
    }

    /// Builds state around an existing rule engine
    pub fn with_rules(
        config: ApiConfig,
        port: Arc<dyn ClaimSubmissionPort>,
        rules: RuleEngine,
    ) -> Self {
        Self {
            config,
            port,
            rules,
            attachments: AttachmentValidator::default(),
        }
    }
}

/// Creates the main API router
///
/// # Arguments
///
/// * `state` - Shared application state
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    // Public routes
    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Claims routes
    let claims_routes = Router::new()
        .route("/", post(claims::submit_claim))
        .route("/types", get(claims::list_claim_types))
        .route("/validate", post(claims::validate_claim))
        .route("/attachments/intake", post(claims::intake_attachments));

    let api_routes = Router::new().nest("/claims", claims_routes);

    // Combine all routes
    Router::new()
        .merge(health_routes)
        .nest("/api/v1", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(axum_middleware::from_fn(request_logging_middleware))
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}
