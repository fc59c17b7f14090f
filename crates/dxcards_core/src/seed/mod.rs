//! First-run seed catalog.
//!
//! # Responsibility
//! - Load the external symptom -> starter-entry catalog document.
//! - Degrade to a static fallback name list when the document is
//!   absent or malformed.
//!
//! # Invariants
//! - Catalog loading never blocks or fails startup.
//! - Iteration order is deterministic, so reseeding is reproducible.

pub mod catalog;
