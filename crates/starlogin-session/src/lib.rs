//! Pending verification management for StarLogin.
//!
//! This crate handles the lifecycle of a verification:
//!
//! 1. **Code generation** — a 6-digit code per join ([`CodeGenerator`],
//!    [`generate_code`])
//! 2. **Session tracking** — who still has to confirm ([`SessionStore`])
//! 3. **Validation and expiry** — code match within a TTL, batch removal
//!    of stale sessions ([`SessionStore::verify`], [`SessionStore::sweep`])
//!
//! # How it fits in the stack
//!
//! ```text
//! Service (above)  ← puts sessions on join, verifies on chat command
//!     ↕
//! Session Layer (this crate)  ← owns the pending verifications
//!     ↕
//! Protocol Layer (below)  ← provides ChatAccountId
//! ```

mod code;
mod error;
mod session;
mod store;

pub use code::{CODE_RANGE, CodeGenerator, RandomCodes, generate_code};
pub use error::SessionError;
pub use session::{SessionConfig, VerificationSession};
pub use store::{SessionStore, SharedStore};
