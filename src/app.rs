/*
 * Responsibility
 * - tracing / panic hook の初期化
 * - Config読み込み → gate 生成 → Router 組み立て
 * - Middleware の適用 (Bearer gate / HTTP / CORS / security headers)
 * - axum::serve() で起動
 */
use std::{panic, process};

use axum::{Router, routing::get};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::api::v1::handlers::health::health;
use crate::config::Config;
use crate::error::AppError;
use crate::middleware;
use crate::services::build_gate;
use crate::state::AppState;

fn init_tracing() {
    // RUST_LOG=info,token_gate=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // Development: crash the whole process so it gets noticed.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<(), AppError> {
    init_tracing();
    let config = Config::from_env()?;
    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting token gate in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let gate = build_gate(&config)?;
    tracing::info!(
        context_key = %gate.config().context_key,
        skip_paths = ?config.auth_skip_paths,
        "bearer gate ready"
    );

    let app = build_router(AppState::new(gate));
    let app = middleware::security_headers::apply(app);
    let app = middleware::cors::apply(app, &config);
    let app = middleware::http::apply(app, &config);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, addr = %config.addr, "failed to bind");
            AppError::Internal
        })?;
    axum::serve(listener, app).await.map_err(|e| {
        tracing::error!(error = %e, "server error");
        AppError::Internal
    })?;

    Ok(())
}

/// Routes plus the bearer gate, without the transport layers.
///
/// The gate wraps the whole router; requests matching the skip predicate
/// (e.g. `/health`) pass through untouched.
pub fn build_router(state: AppState) -> Router {
    let gate = state.gate.clone();

    let router = Router::new()
        .route("/health", get(health))
        .nest("/api/v1", api::v1::routes())
        .with_state(state);

    middleware::auth::bearer::apply(router, gate)
}
