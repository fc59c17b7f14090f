//! Read-side filtering over the in-memory collection.
//!
//! # Responsibility
//! - Provide the display ordering and title filter for card lists.
//!
//! # Invariants
//! - Pure functions over borrowed cards; no state, no mutation.

pub mod filter;
