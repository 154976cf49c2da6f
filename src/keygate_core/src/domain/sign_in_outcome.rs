/// Tagged result of a credential check, as classified by the identity store.
///
/// Exactly one tag per attempt. `InvalidCredentials` covers both unknown
/// accounts and wrong passwords so the caller cannot tell them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignInOutcome {
    Success,
    InvalidCredentials,
    LockedOut,
    NotAllowed,
    RequiresTwoFactor,
}
