pub mod error_dto;
pub mod verification_dto;

pub use error_dto::ErrorResponse;
pub use verification_dto::{IssueCodeRequest, IssueCodeResponse, ResolveCodePath, ResolveCodeResponse};
