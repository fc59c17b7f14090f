//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the durable-state access contract for the card store.
//! - Isolate SQLite details from session/business orchestration.
//!
//! # Invariants
//! - Writes are synchronous whole-value replacements under fixed keys.
//! - Repository constructors validate schema shape before first use.

pub mod card_repo;
