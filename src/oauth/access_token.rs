use serde::{Deserialize, Deserializer};

/// Identity recovered from the identity service for one access token.
///
/// - `id` is always the token that was queried
/// - `user_id` / `client_id`: 0 means unset
/// - `expires` is informational; expiry is enforced by the identity service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub id: String,
    pub user_id: i64,
    pub client_id: i64,
    pub expires: i64,
}

/// Success payload of `GET /oauth/access_token/{token}`.
///
/// The payload's own `access_token` string is not trusted as the id and is ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct AccessTokenResponse {
    #[serde(default, deserialize_with = "null_as_zero")]
    user_id: i64,
    #[serde(default, deserialize_with = "null_as_zero")]
    client_id: i64,
    #[serde(default, deserialize_with = "null_as_zero")]
    expires: i64,
}

// `null` means unset, same as an absent field. Non-integers still fail.
fn null_as_zero<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i64>::deserialize(deserializer)?.unwrap_or(0))
}

impl AccessTokenResponse {
    pub(crate) fn into_access_token(self, queried: &str) -> AccessToken {
        AccessToken {
            id: queried.to_string(),
            user_id: self.user_id,
            client_id: self.client_id,
            expires: self.expires,
        }
    }
}
