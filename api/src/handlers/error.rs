use actix_web::http::{header, StatusCode};
use actix_web::HttpResponse;
use re_core::errors::{DomainError, TokenError, ValidationError};
use validator::ValidationErrors;

use crate::dto::ErrorResponse;

/// Handle domain errors and convert them to appropriate HTTP responses
///
/// Internal errors are logged with their detail and answered with a generic
/// message.
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    match error {
        DomainError::Token(token_error) => handle_token_error(token_error),
        DomainError::ValidationErr(validation_error) => match validation_error {
            ValidationError::InvalidIdentity { reason } => {
                ErrorResponse::new("invalid_identity", format!("Invalid identity: {}", reason))
                    .to_response(StatusCode::BAD_REQUEST)
            }
            ValidationError::InvalidCodeFormat => invalid_code_format(),
        },
        DomainError::NotFound { .. } => ErrorResponse::new(
            "code_not_found",
            "The verification code is unknown or has expired",
        )
        .to_response(StatusCode::NOT_FOUND),
        DomainError::Internal { message } => {
            tracing::error!(error = %message, "Internal error while handling request");
            internal_error()
        }
    }
}

fn handle_token_error(error: TokenError) -> HttpResponse {
    let (code, message) = match &error {
        TokenError::MissingCredential => {
            return HttpResponse::Unauthorized()
                .insert_header((header::WWW_AUTHENTICATE, "Bearer"))
                .json(ErrorResponse::new(
                    "missing_credential",
                    "A bearer token is required",
                ));
        }
        TokenError::StructureError { claim } => {
            return ErrorResponse::new(
                "invalid_token_structure",
                format!("Token is missing a usable '{}' claim", claim),
            )
            .to_response(StatusCode::BAD_REQUEST);
        }
        TokenError::KeyLoadError { .. } => {
            tracing::error!(error = %error, "Verification key could not be loaded");
            return internal_error();
        }
        TokenError::MalformedToken { .. } => ("malformed_token", "Token could not be decoded"),
        TokenError::InvalidSignature => ("invalid_signature", "Token signature is invalid"),
        TokenError::UntrustedCertificate { .. } => (
            "untrusted_certificate",
            "Token signing certificate is not trusted",
        ),
        TokenError::TokenExpired => ("token_expired", "Token has expired"),
        TokenError::TokenNotYetValid => ("token_not_yet_valid", "Token is not valid yet"),
        TokenError::InvalidClaims { .. } => ("invalid_claims", "Token claims were rejected"),
    };

    ErrorResponse::new(code, message).to_response(StatusCode::FORBIDDEN)
}

/// Response for request DTOs rejected by `validator`
///
/// A failure on the `code` field is reported as a code format error.
pub fn handle_validation_errors(errors: ValidationErrors) -> HttpResponse {
    let field_errors = errors.field_errors();
    if field_errors.contains_key("code") {
        return invalid_code_format();
    }

    let mut fields: Vec<String> = field_errors.keys().map(|field| field.to_string()).collect();
    fields.sort();
    ErrorResponse::new(
        "validation_error",
        format!("Invalid request fields: {}", fields.join(", ")),
    )
    .to_response(StatusCode::BAD_REQUEST)
}

fn invalid_code_format() -> HttpResponse {
    ErrorResponse::new(
        "invalid_code_format",
        "Verification code must be exactly 6 digits",
    )
    .to_response(StatusCode::BAD_REQUEST)
}

fn internal_error() -> HttpResponse {
    ErrorResponse::new("internal_error", "An internal error occurred")
        .to_response(StatusCode::INTERNAL_SERVER_ERROR)
}
