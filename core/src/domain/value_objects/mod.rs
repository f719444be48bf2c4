//! Value objects: validated, immutable domain primitives.

pub mod identity;
pub mod verification_code;

pub use identity::Identity;
pub use verification_code::{VerificationCode, CODE_LENGTH, CODE_SPACE};
