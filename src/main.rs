mod config;
mod domain;
mod middleware;
mod services;
mod state;
mod web;

use crate::config::AppConfig;
use crate::state::{AppState, SharedState};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    tracing::info!(
        "Simulated latency: {} ms, session TTL: {} min",
        config.simulated_latency.as_millis(),
        config.session_ttl.num_minutes()
    );

    let shared: SharedState = Arc::new(AppState::from_config(config));

    let scheduler = JobScheduler::new().await?;

    // Housekeeping - drop idle sessions and stale rate-limit entries every 5 minutes
    let shared_for_cleanup = shared.clone();
    scheduler
        .add(Job::new_async("0 */5 * * * *", move |_uuid, _l| {
            let state = shared_for_cleanup.clone();
            Box::pin(async move {
                let removed = state
                    .sessions
                    .prune_idle(state.config.session_ttl, chrono::Utc::now())
                    .await;
                if removed > 0 {
                    tracing::info!(
                        "Cleaned up {} idle coaching sessions, {} still active",
                        removed,
                        state.sessions.len().await
                    );
                }
                state.limiter.cleanup().await;
            })
        })?)
        .await?;

    scheduler.start().await?;
    tracing::info!("Scheduler started: session cleanup every 5 min");

    let app = web::routes(shared.clone())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = shared.config.bind_addr.clone();
    tracing::info!("Listening on {addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;
    Ok(())
}
