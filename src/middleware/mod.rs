/*
 * Responsibility
 * - middleware の公開インターフェース
 * - auth::access (access_token → X-User-Id / X-Client-Id), http (request id / trace / timeout)
 */
pub mod auth;
pub mod http;
