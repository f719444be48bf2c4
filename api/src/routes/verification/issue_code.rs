use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::app::AppState;
use crate::dto::{IssueCodeRequest, IssueCodeResponse};
use crate::handlers::handle_domain_error;
use crate::middleware::auth::BearerToken;

use re_core::errors::{DomainError, TokenError};
use re_core::services::association::AssociationStore;

/// Handler for POST /api/v1/verification/codes
///
/// Issues the code for the identity carried by a signed token. The token is
/// taken from `Authorization: Bearer <token>`; without that header the JSON
/// body is used instead.
///
/// # Request Body (optional)
///
/// ```json
/// {
///     "token": "eyJhbGciOiJIUzI1NiJ9..."
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "code": "176613",
///     "expires_in": 600,
///     "expires_at": "2026-10-16T09:10:00Z"
/// }
/// ```
pub async fn issue_code<S>(
    state: web::Data<AppState<S>>,
    bearer: BearerToken,
    body: Option<web::Json<IssueCodeRequest>>,
) -> HttpResponse
where
    S: AssociationStore + 'static,
{
    let token = match (bearer.into_inner(), body) {
        (Some(token), _) => token,
        (None, Some(body)) => {
            let request = body.into_inner();
            if let Err(errors) = request.validate() {
                tracing::debug!("Rejected issue request body: {}", errors);
                return handle_domain_error(DomainError::Token(TokenError::MissingCredential));
            }
            request.token
        }
        (None, None) => {
            return handle_domain_error(DomainError::Token(TokenError::MissingCredential));
        }
    };

    match state.verification_service.issue_code(&token).await {
        Ok(issued) => HttpResponse::Ok().json(IssueCodeResponse::from(issued)),
        Err(error) => handle_domain_error(error),
    }
}
