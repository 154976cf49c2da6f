pub mod link_external;
pub mod redeem_verification;
pub mod send_verification;
pub mod sign_in;
pub mod sign_up;

pub use link_external::link_external;
pub use redeem_verification::redeem_verification;
pub use send_verification::send_verification;
pub use sign_in::sign_in;
pub use sign_up::sign_up;
