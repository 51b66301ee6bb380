/*
 * Responsibility
 * - Config読み込み → 依存生成 (OAuthClient) → Router 組み立て
 * - Middleware の適用 (access / http)
 * - axum::serve() で起動
 */
use std::{panic, process, time::Duration};

use anyhow::Result;
use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::error::AppError;
use crate::middleware;
use crate::oauth::{OAuthClient, ReqwestTransport};
use crate::{api, state::AppState};

// identity service の timeout に上乗せする余裕
const REQUEST_TIMEOUT_HEADROOM: Duration = Duration::from_secs(5);

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,oauth_identity=debug,tower_http=debug cargo run
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

        // development: 即落として気づけるようにする
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        oauth_base_url = %config.oauth_base_url,
        "starting API in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config)?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .map_err(AppError::from)?;
    axum::serve(listener, app).await.map_err(AppError::from)?;

    Ok(())
}

pub fn build_state(config: &Config) -> Result<AppState, AppError> {
    let transport = ReqwestTransport::new(config.oauth_timeout)?;
    let oauth = OAuthClient::new(config.oauth_base_url.clone(), transport);

    Ok(AppState::new(oauth))
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    let protected =
        middleware::auth::access::apply(api::v1::protected_routes(), state.clone());

    let v1 = api::v1::public_routes().merge(protected);

    let router = Router::new().nest("/api/v1", v1).with_state(state);

    middleware::http::apply(router, config.oauth_timeout + REQUEST_TIMEOUT_HEADROOM)
}
