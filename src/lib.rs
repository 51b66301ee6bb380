/*
 * Responsibility
 * - ライブラリとしての公開面 (oauth::*)
 * - バイナリ (main.rs) と結合テストから使う app / api / middleware の公開
 */
pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod oauth;
pub mod state;

pub use oauth::{
    AccessToken, OAuthClient, RestError, caller_id, client_id, is_public,
};
