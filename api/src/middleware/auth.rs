//! Bearer token extraction for the issue endpoint.
//!
//! Verification itself happens in the core `TokenVerifier`; this module only
//! pulls the raw token out of the `Authorization` header.

use actix_web::{dev::Payload, http::header::AUTHORIZATION, FromRequest, HttpRequest};
use std::convert::Infallible;
use std::future::{ready, Ready};

/// Raw bearer token from the `Authorization` header, if one was sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerToken(pub Option<String>);

impl BearerToken {
    pub fn into_inner(self) -> Option<String> {
        self.0
    }
}

/// Extracts the token from `Authorization: Bearer <token>`
///
/// The scheme is matched case-insensitively. A header with another scheme or
/// an empty token yields `None`.
pub fn extract_bearer_token(req: &HttpRequest) -> Option<String> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?.trim();
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

/// Extractor for an optional bearer token
impl FromRequest for BearerToken {
    type Error = Infallible;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Ok(BearerToken(extract_bearer_token(req))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test as actix_test;

    #[test]
    fn test_extract_bearer_token() {
        let req = actix_test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer test_token_123"))
            .to_http_request();
        assert_eq!(extract_bearer_token(&req), Some("test_token_123".to_string()));

        let req_lowercase = actix_test::TestRequest::default()
            .insert_header((AUTHORIZATION, "bearer test_token_123"))
            .to_http_request();
        assert_eq!(
            extract_bearer_token(&req_lowercase),
            Some("test_token_123".to_string())
        );

        let req_no_bearer = actix_test::TestRequest::default()
            .insert_header((AUTHORIZATION, "test_token_123"))
            .to_http_request();
        assert_eq!(extract_bearer_token(&req_no_bearer), None);

        let req_basic = actix_test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Basic dXNlcjpwYXNz"))
            .to_http_request();
        assert_eq!(extract_bearer_token(&req_basic), None);

        let req_empty = actix_test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer   "))
            .to_http_request();
        assert_eq!(extract_bearer_token(&req_empty), None);

        let req_no_header = actix_test::TestRequest::default().to_http_request();
        assert_eq!(extract_bearer_token(&req_no_header), None);
    }
}
