use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::app::AppState;
use crate::dto::{ResolveCodePath, ResolveCodeResponse};
use crate::handlers::{handle_domain_error, handle_validation_errors};

use re_core::services::association::AssociationStore;

/// Handler for GET /api/v1/verification/codes/{code}
///
/// Resolves an active code to the identity it was issued for. Unknown and
/// expired codes both answer 404.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "code": "176613",
///     "identity": "b696b260-03ec-46b7-855a-bb2ab3da1976"
/// }
/// ```
pub async fn resolve_code<S>(
    state: web::Data<AppState<S>>,
    path: web::Path<ResolveCodePath>,
) -> HttpResponse
where
    S: AssociationStore + 'static,
{
    let path = path.into_inner();
    if let Err(errors) = path.validate() {
        return handle_validation_errors(errors);
    }

    match state.verification_service.resolve_code(&path.code).await {
        Ok(identity) => HttpResponse::Ok().json(ResolveCodeResponse {
            code: path.code,
            identity: identity.into_inner(),
        }),
        Err(error) => handle_domain_error(error),
    }
}
