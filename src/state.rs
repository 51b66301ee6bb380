/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - ex: oauth: OAuthClient (identity service への問い合わせ)
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use crate::oauth::{OAuthClient, ReqwestTransport};

#[derive(Clone, Debug)]
pub struct AppState {
    pub oauth: OAuthClient<ReqwestTransport>,
}

impl AppState {
    pub fn new(oauth: OAuthClient<ReqwestTransport>) -> Self {
        Self { oauth }
    }
}
