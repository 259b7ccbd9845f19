//! Verification code generation.
//!
//! A verification code is what the player reads in-game and types back on
//! the chat platform. It only has to be short-lived and hard to guess
//! within its TTL; it does NOT have to be unique across pending sessions,
//! because each session is looked up by chat account, never by code.

use std::ops::RangeInclusive;

use rand::Rng;

/// Smallest and largest code value. Every value in between is a 6-digit
/// number, so no zero-padding is ever needed.
pub const CODE_RANGE: RangeInclusive<u32> = 100_000..=999_999;

/// Produces verification codes.
///
/// The service is generic over this trait so tests can pin the codes they
/// expect. Production uses [`RandomCodes`].
pub trait CodeGenerator: Send + Sync + 'static {
    /// Returns a fresh 6-digit numeric code.
    fn generate(&self) -> String;
}

/// Draws codes uniformly from [`CODE_RANGE`] using the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCodes;

impl CodeGenerator for RandomCodes {
    fn generate(&self) -> String {
        generate_code()
    }
}

/// Generates a 6-digit numeric code, uniform over [`CODE_RANGE`].
pub fn generate_code() -> String {
    rand::rng().random_range(CODE_RANGE).to_string()
}
