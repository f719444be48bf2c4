use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use re_core::services::verification::IssuedCode;
use re_shared::validation::VERIFICATION_CODE_REGEX;

/// Body form of the issue request, used when no `Authorization` header is sent
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct IssueCodeRequest {
    #[validate(length(min = 1))]
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueCodeResponse {
    pub code: String,
    pub expires_in: i64, // seconds until the code stops resolving
    pub expires_at: DateTime<Utc>,
}

impl From<IssuedCode> for IssueCodeResponse {
    fn from(issued: IssuedCode) -> Self {
        Self {
            code: issued.code.into(),
            expires_in: issued.ttl_seconds,
            expires_at: issued.expires_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ResolveCodePath {
    #[validate(regex(path = *VERIFICATION_CODE_REGEX))]
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveCodeResponse {
    pub code: String,
    pub identity: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_path_validation() {
        let valid = ResolveCodePath { code: "012345".to_string() };
        assert!(valid.validate().is_ok());

        for code in ["12ab56", "12345", "1234567", ""] {
            let invalid = ResolveCodePath { code: code.to_string() };
            assert!(invalid.validate().is_err(), "{} should be rejected", code);
        }
    }

    #[test]
    fn test_issue_request_requires_token() {
        let empty = IssueCodeRequest { token: String::new() };
        assert!(empty.validate().is_err());
    }
}
