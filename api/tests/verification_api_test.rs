use actix_web::{http::header, http::StatusCode, test, web};
use chrono::{Duration, TimeZone, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::{json, Value};
use std::sync::Arc;

use re_api::app::{create_app, AppState};
use re_api::dto::{IssueCodeResponse, ResolveCodeResponse};
use re_core::services::clock::ManualClock;
use re_core::services::code::{CodeDeriver, IdentityNormalization};
use re_core::services::token::{TokenVerifier, TokenVerifierConfig};
use re_core::services::verification::VerificationService;
use re_infra::cache::InMemoryAssociationStore;

const SECRET: &str = "api-test-secret";
const IDENTITY: &str = "b696b260-03ec-46b7-855a-bb2ab3da1976";
const SIGNER_KEY: &str = include_str!("../../core/tests/fixtures/signer_key.pem");
const SIGNER_CERT: &str = include_str!("../../core/tests/fixtures/signer_cert.pem");

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper function to create test application state
    fn create_test_app_state(
        config: TokenVerifierConfig,
    ) -> (Arc<ManualClock>, web::Data<AppState<InMemoryAssociationStore>>) {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2026, 10, 16, 9, 0, 0).unwrap(),
        ));
        let store = Arc::new(InMemoryAssociationStore::new(
            Duration::minutes(10),
            clock.clone(),
        ));
        let verification_service = Arc::new(VerificationService::new(
            TokenVerifier::new(config).unwrap(),
            CodeDeriver::new(IdentityNormalization::StripSeparators),
            store,
        ));
        (clock, web::Data::new(AppState::new(verification_service)))
    }

    fn shared_secret_state() -> (Arc<ManualClock>, web::Data<AppState<InMemoryAssociationStore>>) {
        create_test_app_state(TokenVerifierConfig::shared_secret(SECRET))
    }

    fn hs256_token(claims: &Value) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    fn valid_claims() -> Value {
        json!({ "AbsClientID": IDENTITY, "exp": Utc::now().timestamp() + 3600 })
    }

    #[actix_web::test]
    async fn test_health_check() {
        let (_, state) = shared_secret_state();
        let app = test::init_service(create_app(state)).await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "healthy");
    }

    #[actix_web::test]
    async fn test_api_documentation_lists_endpoints() {
        let (_, state) = shared_secret_state();
        let app = test::init_service(create_app(state)).await;

        let req = test::TestRequest::get().uri("/api/v1/").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(
            body["endpoints"]["verification"]["issue_code"]["path"],
            "/api/v1/verification/codes"
        );
    }

    #[actix_web::test]
    async fn test_issue_with_bearer_header_then_resolve() {
        let (_, state) = shared_secret_state();
        let app = test::init_service(create_app(state)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/verification/codes")
            .insert_header((
                header::AUTHORIZATION,
                format!("Bearer {}", hs256_token(&valid_claims())),
            ))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let issued: IssueCodeResponse = test::read_body_json(resp).await;
        assert_eq!(issued.code, "176613");
        assert_eq!(issued.expires_in, 600);
        assert_eq!(
            issued.expires_at,
            Utc.with_ymd_and_hms(2026, 10, 16, 9, 10, 0).unwrap()
        );

        let req = test::TestRequest::get()
            .uri("/api/v1/verification/codes/176613")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let resolved: ResolveCodeResponse = test::read_body_json(resp).await;
        assert_eq!(resolved.code, "176613");
        assert_eq!(resolved.identity, IDENTITY);
    }

    #[actix_web::test]
    async fn test_issue_with_token_in_body() {
        let (_, state) = shared_secret_state();
        let app = test::init_service(create_app(state)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/verification/codes")
            .set_json(json!({ "token": hs256_token(&valid_claims()) }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_issue_without_token_is_unauthorized() {
        let (_, state) = shared_secret_state();
        let app = test::init_service(create_app(state)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/verification/codes")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "missing_credential");
    }

    #[actix_web::test]
    async fn test_issue_with_wrong_secret_is_forbidden() {
        let (_, state) = shared_secret_state();
        let app = test::init_service(create_app(state)).await;

        let forged = encode(
            &Header::new(Algorithm::HS256),
            &valid_claims(),
            &EncodingKey::from_secret(b"not-the-secret"),
        )
        .unwrap();
        let req = test::TestRequest::post()
            .uri("/api/v1/verification/codes")
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", forged)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "invalid_signature");
    }

    #[actix_web::test]
    async fn test_issue_with_garbage_token_is_forbidden() {
        let (_, state) = shared_secret_state();
        let app = test::init_service(create_app(state)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/verification/codes")
            .insert_header((header::AUTHORIZATION, "Bearer not-a-jwt"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn test_issue_with_empty_payload_is_bad_request() {
        let (_, state) = shared_secret_state();
        let app = test::init_service(create_app(state)).await;

        let token = hs256_token(&json!({ "exp": Utc::now().timestamp() + 3600 }));
        let req = test::TestRequest::post()
            .uri("/api/v1/verification/codes")
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "invalid_token_structure");
    }

    #[actix_web::test]
    async fn test_resolve_rejects_malformed_code() {
        let (_, state) = shared_secret_state();
        let app = test::init_service(create_app(state)).await;

        let req = test::TestRequest::get()
            .uri("/api/v1/verification/codes/12ab56")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "invalid_code_format");
    }

    #[actix_web::test]
    async fn test_resolve_unknown_and_expired_are_not_found() {
        let (clock, state) = shared_secret_state();
        let app = test::init_service(create_app(state)).await;

        let req = test::TestRequest::get()
            .uri("/api/v1/verification/codes/000000")
            .to_request();
        let unknown = test::call_service(&app, req).await;
        assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
        let unknown_body: Value = test::read_body_json(unknown).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/verification/codes")
            .insert_header((
                header::AUTHORIZATION,
                format!("Bearer {}", hs256_token(&valid_claims())),
            ))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        clock.advance(Duration::minutes(10));

        let req = test::TestRequest::get()
            .uri("/api/v1/verification/codes/176613")
            .to_request();
        let expired = test::call_service(&app, req).await;
        assert_eq!(expired.status(), StatusCode::NOT_FOUND);
        let expired_body: Value = test::read_body_json(expired).await;

        assert_eq!(expired_body["error"], unknown_body["error"]);
        assert_eq!(expired_body["message"], unknown_body["message"]);
    }

    #[actix_web::test]
    async fn test_embedded_certificate_policy() {
        let (_, state) =
            create_test_app_state(TokenVerifierConfig::embedded_certificate(Algorithm::RS256));
        let app = test::init_service(create_app(state)).await;

        let leaf: String = SIGNER_CERT
            .lines()
            .filter(|line| !line.starts_with("-----"))
            .map(str::trim)
            .collect();
        let mut header = Header::new(Algorithm::RS256);
        header.x5c = Some(vec![leaf]);
        let token = encode(
            &header,
            &valid_claims(),
            &EncodingKey::from_rsa_pem(SIGNER_KEY.as_bytes()).unwrap(),
        )
        .unwrap();

        let req = test::TestRequest::post()
            .uri("/api/v1/verification/codes")
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        // A shared-secret token carries no certificate
        let req = test::TestRequest::post()
            .uri("/api/v1/verification/codes")
            .insert_header((
                header::AUTHORIZATION,
                format!("Bearer {}", hs256_token(&valid_claims())),
            ))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "untrusted_certificate");
    }

    #[actix_web::test]
    async fn test_unknown_route_is_not_found() {
        let (_, state) = shared_secret_state();
        let app = test::init_service(create_app(state)).await;

        let req = test::TestRequest::get().uri("/nope").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
