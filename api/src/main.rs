use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::info;

use re_api::app::{create_app, AppState};
use re_api::logging::init_tracing;
use re_core::services::association::{AssociationConfig, AssociationSweepService};
use re_core::services::code::CodeDeriver;
use re_core::services::token::{TokenVerifier, TokenVerifierConfig};
use re_core::services::verification::VerificationService;
use re_infra::cache::InMemoryAssociationStore;
use re_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration (.env is honoured)
    let config = AppConfig::from_env().context("failed to load configuration")?;

    init_tracing(&config.logging)?;

    info!(
        environment = ?config.environment,
        policy = %config.trust.policy,
        "Starting verification code API server"
    );

    // Token verification, fixed for the lifetime of the process
    let verifier_config = TokenVerifierConfig::try_from(&config.trust)
        .context("invalid trust configuration")?;
    let verifier = TokenVerifier::new(verifier_config).context("failed to build token verifier")?;
    let deriver = CodeDeriver::new(config.verification.normalization);

    // Association store and its sweep task
    let association = AssociationConfig::try_from(&config.verification)
        .context("invalid verification configuration")?;
    let store = Arc::new(InMemoryAssociationStore::with_system_clock(association.ttl));
    let sweeper = Arc::new(AssociationSweepService::new(
        store.clone(),
        association.sweep.clone(),
    ));
    let sweep_task = sweeper.start_background_task();

    let verification_service = Arc::new(VerificationService::new(verifier, deriver, store));
    let app_state = web::Data::new(
        AppState::new(verification_service).with_max_payload_size(config.server.max_payload_size),
    );

    let bind_address = config.server.bind_address();
    info!(
        bind_address = %bind_address,
        code_ttl_seconds = association.ttl.num_seconds(),
        "Server will bind to address"
    );

    let mut server = HttpServer::new(move || create_app(app_state.clone()))
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?;
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.run().await?;

    if let Some(task) = sweep_task {
        task.abort();
    }
    info!("Server stopped");
    Ok(())
}
