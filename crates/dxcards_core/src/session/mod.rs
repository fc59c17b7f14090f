//! Session context owning all mutable core state.
//!
//! # Responsibility
//! - Wire catalog, repository, gate, collection and selection into one
//!   owner object with a direct command surface.
//! - Notify subscribed observers after every observable state change.
//!
//! # Invariants
//! - No ambient globals: every piece of mutable state lives here.
//! - Mutating commands persist the whole collection before returning.
//! - While the gate is not unlocked, mutating commands are silent
//!   no-ops with no persistence side effect.

pub mod card_session;
