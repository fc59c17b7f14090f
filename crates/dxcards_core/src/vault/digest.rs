//! Two-tier password token encoding.
//!
//! # Responsibility
//! - Encode passwords into prefix-tagged verification tokens.
//! - Check an input password against a stored token of either tier.
//!
//! # Invariants
//! - The stored prefix selects the comparison scheme, so tokens written
//!   under either tier keep verifying after the scheme default changes.
//! - Digests are unsalted. This is a known weakness kept on purpose:
//!   the gate deters casual access and guarantees nothing more.

use sha2::{Digest, Sha256};

/// Prefix for strong one-way tokens.
pub const SHA256_PREFIX: &str = "sha256:";

/// Prefix for the weak fallback tier.
///
/// The fallback is a reversible hex encoding of the password bytes, for
/// environments without a usable cryptographic primitive. It hides the
/// password from a shoulder glance at the stored value and nothing else.
pub const PLAIN_PREFIX: &str = "plain:";

/// Token encoding tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DigestScheme {
    /// SHA-256 one-way digest, hex encoded.
    #[default]
    Sha256,
    /// Reversible hex encoding of the raw password bytes.
    PlainFallback,
}

/// Encodes a password into a stored verification token.
pub fn encode_token(scheme: DigestScheme, password: &str) -> String {
    match scheme {
        DigestScheme::Sha256 => format!("{SHA256_PREFIX}{}", sha256_hex(password)),
        DigestScheme::PlainFallback => format!("{PLAIN_PREFIX}{}", hex_encode(password.as_bytes())),
    }
}

/// Checks a password against a stored token.
///
/// Tokens with an unrecognized prefix never verify.
pub fn verify_token(stored: &str, password: &str) -> bool {
    if let Some(expected) = stored.strip_prefix(SHA256_PREFIX) {
        return sha256_hex(password) == expected;
    }
    if let Some(expected) = stored.strip_prefix(PLAIN_PREFIX) {
        return hex_encode(password.as_bytes()) == expected;
    }
    false
}

fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|byte| format!("{byte:02x}")).collect()
}
