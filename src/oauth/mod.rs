/*
 * Responsibility
 * - Request-time authentication against the identity (OAuth) service
 * - Public surface: is_public / caller_id / client_id / OAuthClient
 */
pub mod access_token;
pub mod client;
pub mod error;
pub mod headers;
pub mod transport;

pub use access_token::AccessToken;
pub use client::OAuthClient;
pub use error::RestError;
pub use headers::{
    HEADER_X_CALLER_ID, HEADER_X_CLIENT_ID, HEADER_X_PUBLIC, PARAM_ACCESS_TOKEN, caller_id,
    client_id, is_public,
};
pub use transport::{IdentityTransport, ReqwestTransport, TransportError, TransportResponse};
