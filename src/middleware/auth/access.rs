//! access_token (query) → identity service → `X-User-Id` / `X-Client-Id`
//!
//! - `X-Public: true` のリクエストは identity service に問い合わせない
//! - token が無い / 空のリクエストは匿名のまま通す (判定は handler 側)
//! - 問い合わせ失敗時は RestError をそのままレスポンスにする
//!
//! クライアントが直接送ってきた `X-User-Id` / `X-Client-Id` は信用しないので、
//! 判定の前に必ず落とす。

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::oauth::{self, HEADER_X_CALLER_ID, HEADER_X_CLIENT_ID, RestError};
use crate::state::AppState;

/// 認証が必要な Router に access middleware を掛ける。
///
/// 例：
/// ```ignore
/// let v1 = api::v1::routes();
/// let v1 = middleware::auth::access::apply(v1, state.clone());
/// app = app.nest("/api/v1", v1);
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, RestError> {
    req.headers_mut().remove(HEADER_X_CALLER_ID);
    req.headers_mut().remove(HEADER_X_CLIENT_ID);

    if oauth::is_public(Some(&req)) {
        return Ok(next.run(req).await);
    }

    if let Err(err) = state.oauth.authenticate_request(Some(&mut req)).await {
        tracing::warn!(
            status = err.status(),
            error = %err,
            "access token resolution failed"
        );
        return Err(err);
    }

    Ok(next.run(req).await)
}
