//! Password gate guarding all mutating operations.
//!
//! # Responsibility
//! - Own the set/verify/change password state machine.
//! - Encode and check stored verification tokens.
//!
//! # Invariants
//! - The gate is a local-access deterrent, never a confidentiality
//!   boundary: tokens are unsalted and the fallback tier is reversible.
//! - Gate state only advances on successful credential operations.

pub mod digest;
pub mod gate;
