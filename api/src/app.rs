//! Application state and factory
//!
//! This module holds the shared application state and provides the factory
//! for creating the Actix-web application.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, HttpResponse};
use tracing_actix_web::TracingLogger;

use crate::middleware::cors::create_cors;
use crate::routes::verification::{issue_code::issue_code, resolve_code::resolve_code};

use re_core::services::association::AssociationStore;
use re_core::services::verification::VerificationService;

/// Application state that holds shared services
pub struct AppState<S: AssociationStore> {
    pub verification_service: Arc<VerificationService<S>>,
    /// Upper bound for JSON request bodies, in bytes
    pub max_payload_size: usize,
}

impl<S: AssociationStore> AppState<S> {
    pub fn new(verification_service: Arc<VerificationService<S>>) -> Self {
        Self {
            verification_service,
            max_payload_size: 64 * 1024,
        }
    }

    pub fn with_max_payload_size(mut self, bytes: usize) -> Self {
        self.max_payload_size = bytes;
        self
    }
}

/// Create and configure the application with all dependencies
pub fn create_app<S>(
    app_state: web::Data<AppState<S>>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    S: AssociationStore + 'static,
{
    let json_config = web::JsonConfig::default().limit(app_state.max_payload_size);

    App::new()
        // Add application state
        .app_data(app_state)
        .app_data(json_config)
        // Add middleware (CORS, then request tracing outermost)
        .wrap(create_cors())
        .wrap(TracingLogger::default())
        .configure(configure_routes::<S>)
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Registers the health check and the versioned API routes
pub fn configure_routes<S: AssociationStore + 'static>(cfg: &mut web::ServiceConfig) {
    cfg
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        // API v1 routes
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/verification")
                        .route("/codes", web::post().to(issue_code::<S>))
                        .route("/codes/{code}", web::get().to(resolve_code::<S>)),
                )
                // API documentation endpoint
                .route("/", web::get().to(api_documentation)),
        );
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "re-verification-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// API documentation endpoint
async fn api_documentation() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Verification Code API v1",
        "endpoints": {
            "health": "/health",
            "verification": {
                "issue_code": {
                    "path": "/api/v1/verification/codes",
                    "method": "POST",
                    "description": "Issue a 6-digit code for the identity in a signed token",
                    "authentication": "Authorization: Bearer <token>, or request body",
                    "request_body": {
                        "token": "string (compact JWS, optional when the header is set)"
                    },
                    "responses": {
                        "200": "Code issued, returns code and expiry",
                        "400": "Token payload lacks a usable identity",
                        "401": "No token supplied",
                        "403": "Token rejected by the trust policy"
                    }
                },
                "resolve_code": {
                    "path": "/api/v1/verification/codes/{code}",
                    "method": "GET",
                    "description": "Resolve a code back to its identity",
                    "responses": {
                        "200": "Code is active, returns identity",
                        "400": "Code is not 6 digits",
                        "404": "Code unknown or expired"
                    }
                }
            }
        }
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "not_found",
        "message": "The requested resource was not found"
    }))
}
