//! # Keygate - Credential & Verification Service Library
//!
//! This is a facade crate that re-exports all public APIs from the keygate
//! service components. Use this crate to get access to the full credential
//! and verification functionality in one place.
//!
//! ## Usage
//!
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! keygate = { path = "../keygate" }
//! ```
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Password`, `VerificationCode`, `Identity`, etc.
//! - **Port traits**: `IdentityStore`, `VerificationCodeCache`, `MailDispatcher`, `TokenIssuer`
//! - **Use cases**: `SignUpUseCase`, `SignInUseCase`, `LinkExternalUseCase`, `VerificationUseCase`
//! - **Adapters**: `HashMapIdentityStore`, `InMemoryCodeCache`, `PostmarkMailDispatcher`, `JwtTokenIssuer`
//! - **Service**: `CredentialService` - The main entry point for the HTTP service

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use keygate_core::*;
}

// Re-export most commonly used core types at the root level
pub use keygate_core::{
    ClaimKind, DerivedClaim, Email, EmailError, ExternalLoginInfo, Identity, Password,
    PasswordError, SignInOutcome, TokenClaims, VerificationCode, VerificationCodeError,
};

// ============================================================================
// Port Traits
// ============================================================================

/// Port trait definitions
pub mod ports {
    pub use keygate_core::{
        CodeRedemption, IdentityStore, IdentityStoreError, MailDispatchError, MailDispatcher,
        TokenIssueError, TokenIssuer, VerificationCodeCache,
    };
}

// Re-export port traits at root level
pub use keygate_core::{
    CodeRedemption, IdentityStore, IdentityStoreError, MailDispatchError, MailDispatcher,
    TokenIssueError, TokenIssuer, VerificationCodeCache,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use keygate_application::*;
}

// Re-export use cases at root level
pub use keygate_application::{
    ClaimSyncUseCase, LinkExternalUseCase, SignInUseCase, SignUpUseCase, VerificationUseCase,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// Persistence implementations
    pub mod persistence {
        pub use keygate_adapters::persistence::*;
    }

    /// Mail dispatcher implementations
    pub mod email {
        pub use keygate_adapters::email::*;
    }

    /// Token issuer implementations
    pub mod token {
        pub use keygate_adapters::token::*;
    }

    /// Configuration
    pub mod config {
        pub use keygate_adapters::config::*;
    }
}

// Re-export commonly used adapters at root level
pub use keygate_adapters::{
    email::{MockMailDispatcher, PostmarkMailDispatcher},
    persistence::{HashMapIdentityStore, InMemoryCodeCache},
    token::JwtTokenIssuer,
};

// ============================================================================
// Credential Service (Main Entry Point)
// ============================================================================

/// Main credential service
pub use keygate_service::{AppState, CredentialService};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing port traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

pub use http;
