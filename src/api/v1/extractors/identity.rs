use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::oauth::headers::{HEADER_X_CALLER_ID, HEADER_X_CLIENT_ID, parse_id};

/// Handler で caller / client id を受け取るための extractor
/// access middleware が `X-User-Id` / `X-Client-Id` を設定済みである前提
/// 設定されていない (匿名) 場合は 0 になる。拒否はしない。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub caller_id: i64,
    pub client_id: i64,
}

impl Identity {
    pub fn is_anonymous(&self) -> bool {
        self.caller_id == 0
    }
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self {
            caller_id: parse_id(&parts.headers, HEADER_X_CALLER_ID),
            client_id: parse_id(&parts.headers, HEADER_X_CLIENT_ID),
        })
    }
}
