//! Business services containing domain logic and use cases.

pub mod association;
pub mod clock;
pub mod code;
pub mod token;
pub mod verification;

// Re-export commonly used types
pub use association::{
    AssociationConfig, AssociationStore, AssociationSweepService, SweepConfig, SweepResult,
};
pub use clock::{Clock, ManualClock, SystemClock};
pub use code::{CodeDeriver, IdentityNormalization};
pub use token::{
    ClaimRules, EmbeddedCertificatePolicy, SharedSecretPolicy, TokenVerifier,
    TokenVerifierConfig, TrustPolicy, TrustPolicyConfig,
};
pub use verification::{IssuedCode, VerificationService};
