//! Portable document codec for the card collection.
//!
//! # Responsibility
//! - Serialize the full collection to a self-describing JSON array.
//! - Validate and coerce arbitrary documents back into well-formed cards.
//!
//! # Invariants
//! - Export output is field-complete: all nine keys, string values.
//! - Import fails only on top-level shape; individual elements and
//!   fields are recovered by discard or coercion.

pub mod document;
