pub mod use_cases;

pub use use_cases::{
    link_external::{LinkExternalError, LinkExternalUseCase},
    sign_in::{SignInError, SignInUseCase, SignedIn},
    sign_up::{SignUpError, SignUpUseCase, SignedUp},
    sync_claims::ClaimSyncUseCase,
    verification::{
        RedeemCodeError, SendCodeError, VerificationUseCase, VERIFICATION_CODE_TTL,
    },
    UserSummary, DEFAULT_ROLE,
};
