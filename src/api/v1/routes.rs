/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - /health は認証 middleware の外、/whoami は内側 (app.rs で access::apply)
 */
use axum::{Router, routing::get};

use crate::api::v1::handlers::{health::health, whoami::whoami};
use crate::state::AppState;

pub fn public_routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/whoami", get(whoami))
}
