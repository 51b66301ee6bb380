/*
 * Responsibility
 * - GET /whoami
 * - access middleware が載せた caller / client id をそのまま返す (匿名なら 0)
 */
use axum::Json;
use serde::Serialize;

use crate::api::v1::extractors::Identity;

#[derive(Debug, Serialize)]
pub struct WhoamiResponse {
    pub caller_id: i64,
    pub client_id: i64,
    pub anonymous: bool,
}

pub async fn whoami(identity: Identity) -> Json<WhoamiResponse> {
    Json(WhoamiResponse {
        caller_id: identity.caller_id,
        client_id: identity.client_id,
        anonymous: identity.is_anonymous(),
    })
}
