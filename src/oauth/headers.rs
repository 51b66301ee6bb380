/*
 * Responsibility
 * - Header / query parameter names shared with downstream handlers
 * - Request classifier (X-Public) and identity accessors (X-User-Id / X-Client-Id)
 *
 * Notes
 * - A missing request (`None`) is treated as public with anonymous identity.
 *   Callers may run these before the request is fully built.
 */
use axum::http::{HeaderMap, Request};

pub const HEADER_X_PUBLIC: &str = "X-Public";
pub const HEADER_X_CLIENT_ID: &str = "X-Client-Id";
pub const HEADER_X_CALLER_ID: &str = "X-User-Id";

pub const PARAM_ACCESS_TOKEN: &str = "access_token";

/// `X-Public: true` (exact, case-sensitive) marks a request that skips authentication.
pub fn is_public<B>(request: Option<&Request<B>>) -> bool {
    let Some(request) = request else {
        return true;
    };

    request
        .headers()
        .get(HEADER_X_PUBLIC)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == "true")
}

/// Caller (end user) id injected by `OAuthClient::authenticate_request`. 0 when unknown.
pub fn caller_id<B>(request: Option<&Request<B>>) -> i64 {
    request.map_or(0, |r| parse_id(r.headers(), HEADER_X_CALLER_ID))
}

/// Client application id injected by `OAuthClient::authenticate_request`. 0 when unknown.
pub fn client_id<B>(request: Option<&Request<B>>) -> i64 {
    request.map_or(0, |r| parse_id(r.headers(), HEADER_X_CLIENT_ID))
}

// Absent / empty / non-numeric all degrade to 0 (anonymous).
pub(crate) fn parse_id(headers: &HeaderMap, name: &str) -> i64 {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<i64>().ok())
        .unwrap_or(0)
}

/// Pull the `access_token` query parameter out of a request, trimmed.
/// Returns `None` when the parameter is missing or blank.
pub(crate) fn access_token_param<B>(request: &Request<B>) -> Option<String> {
    let query = request.uri().query()?;

    url::form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == PARAM_ACCESS_TOKEN)
        .map(|(_, v)| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request() -> Request<Body> {
        Request::builder()
            .uri("/resource")
            .body(Body::empty())
            .unwrap()
    }

    #[test]
    fn constants() {
        assert_eq!(HEADER_X_PUBLIC, "X-Public");
        assert_eq!(HEADER_X_CLIENT_ID, "X-Client-Id");
        assert_eq!(HEADER_X_CALLER_ID, "X-User-Id");
        assert_eq!(PARAM_ACCESS_TOKEN, "access_token");
    }

    #[test]
    fn missing_request_is_public() {
        assert!(is_public::<Body>(None));
    }

    #[test]
    fn x_public_must_be_exactly_true() {
        let mut req = request();
        assert!(!is_public(Some(&req)));

        req.headers_mut()
            .insert(HEADER_X_PUBLIC, "true".parse().unwrap());
        assert!(is_public(Some(&req)));

        for v in ["True", "TRUE", "1", "yes", "", " true"] {
            req.headers_mut().insert(HEADER_X_PUBLIC, v.parse().unwrap());
            assert!(!is_public(Some(&req)), "{v:?} should not be public");
        }
    }

    #[test]
    fn caller_id_defaults_to_zero() {
        assert_eq!(caller_id::<Body>(None), 0);

        let mut req = request();
        assert_eq!(caller_id(Some(&req)), 0);

        req.headers_mut()
            .insert(HEADER_X_CALLER_ID, "notInt".parse().unwrap());
        assert_eq!(caller_id(Some(&req)), 0);

        req.headers_mut()
            .insert(HEADER_X_CALLER_ID, "".parse().unwrap());
        assert_eq!(caller_id(Some(&req)), 0);

        req.headers_mut()
            .insert(HEADER_X_CALLER_ID, "1".parse().unwrap());
        assert_eq!(caller_id(Some(&req)), 1);
    }

    #[test]
    fn client_id_defaults_to_zero() {
        assert_eq!(client_id::<Body>(None), 0);

        let mut req = request();
        assert_eq!(client_id(Some(&req)), 0);

        req.headers_mut()
            .insert(HEADER_X_CLIENT_ID, "notInt".parse().unwrap());
        assert_eq!(client_id(Some(&req)), 0);

        req.headers_mut()
            .insert(HEADER_X_CLIENT_ID, "42".parse().unwrap());
        assert_eq!(client_id(Some(&req)), 42);
        // caller id is a separate header
        assert_eq!(caller_id(Some(&req)), 0);
    }

    #[test]
    fn access_token_param_is_trimmed() {
        let req = Request::builder()
            .uri("/resource?foo=bar&access_token=%20AbC123%20")
            .body(Body::empty())
            .unwrap();
        assert_eq!(access_token_param(&req).as_deref(), Some("AbC123"));

        let blank = Request::builder()
            .uri("/resource?access_token=++")
            .body(Body::empty())
            .unwrap();
        assert_eq!(access_token_param(&blank), None);

        assert_eq!(access_token_param(&request()), None);
    }
}
