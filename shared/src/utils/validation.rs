//! Common validation utilities

use once_cell::sync::Lazy;
use regex::Regex;

/// Number of digits in a verification code
pub const VERIFICATION_CODE_LENGTH: usize = 6;

/// Exactly six ASCII digits, nothing else
pub static VERIFICATION_CODE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{6}$").expect("verification code pattern is valid"));

/// Check whether a string has verification code syntax (`^\d{6}$`).
///
/// Only ASCII digits are accepted; full-width or other Unicode digits are rejected.
pub fn is_valid_verification_code(code: &str) -> bool {
    VERIFICATION_CODE_REGEX.is_match(code)
}

/// Check whether an identity claim carries any content after trimming
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
