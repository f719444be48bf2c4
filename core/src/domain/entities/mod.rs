//! Domain entities representing core business objects.

pub mod association;
pub mod claims;

// Re-export commonly used types
pub use association::{Association, DEFAULT_CODE_TTL_MINUTES};
pub use claims::Claims;
