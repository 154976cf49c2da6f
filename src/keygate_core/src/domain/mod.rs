pub mod claim;
pub mod email;
pub mod external_login;
pub mod identity;
pub mod password;
pub mod sign_in_outcome;
pub mod token_claims;
pub mod verification_code;
