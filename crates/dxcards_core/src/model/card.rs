//! Diagnosis card domain model.
//!
//! # Responsibility
//! - Define the canonical nine-field card record shared by store, codec
//!   and search.
//! - Provide edit-patch application with the store's trimming rules.
//!
//! # Invariants
//! - `id` is assigned at creation and immutable afterwards.
//! - Every field is a concrete `String`; defaults are empty strings.
//! - `last_reviewed` is stored verbatim; all other patched fields are
//!   trimmed of leading/trailing whitespace.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a diagnosis card.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type CardId = Uuid;

/// One tracked symptom/topic with its free-text study fields.
///
/// Serialized with camelCase keys to match the portable export/import
/// document shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Stable unique ID, assigned at creation.
    pub id: CardId,
    /// Display name (a "symptom"). Empty is permitted but discouraged.
    pub title: String,
    /// Frequent causes worth listing first.
    pub common_causes: String,
    /// Can't-miss diagnoses.
    pub critical_causes: String,
    /// Findings that should trigger escalation.
    pub red_flags: String,
    /// First-pass investigations.
    pub initial_workup: String,
    /// Citations and reading list.
    pub references: String,
    /// Free-form notes.
    pub notes: String,
    /// Date string or empty; kept verbatim as entered.
    pub last_reviewed: String,
    /// Provenance, defaulted from the seed catalog at creation.
    pub source: String,
}

impl Card {
    /// Creates an empty card with a generated stable ID.
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), title)
    }

    /// Creates a card with a caller-provided stable ID.
    ///
    /// Used by import paths where identity already exists externally.
    pub fn with_id(id: CardId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            common_causes: String::new(),
            critical_causes: String::new(),
            red_flags: String::new(),
            initial_workup: String::new(),
            references: String::new(),
            notes: String::new(),
            last_reviewed: String::new(),
            source: String::new(),
        }
    }

    /// Applies an edit patch in place.
    ///
    /// # Contract
    /// - Absent patch fields leave the current value untouched.
    /// - Free-text fields are trimmed before storage.
    /// - `last_reviewed` is stored verbatim.
    pub fn apply(&mut self, patch: &CardPatch) {
        apply_trimmed(&mut self.title, &patch.title);
        apply_trimmed(&mut self.common_causes, &patch.common_causes);
        apply_trimmed(&mut self.critical_causes, &patch.critical_causes);
        apply_trimmed(&mut self.red_flags, &patch.red_flags);
        apply_trimmed(&mut self.initial_workup, &patch.initial_workup);
        apply_trimmed(&mut self.references, &patch.references);
        apply_trimmed(&mut self.notes, &patch.notes);
        if let Some(value) = &patch.last_reviewed {
            self.last_reviewed = value.clone();
        }
        apply_trimmed(&mut self.source, &patch.source);
    }
}

fn apply_trimmed(target: &mut String, patch_value: &Option<String>) {
    if let Some(value) = patch_value {
        *target = value.trim().to_string();
    }
}

/// Edit payload for [`Card::apply`]; one optional value per editable field.
///
/// `id` is intentionally absent: identity is immutable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardPatch {
    pub title: Option<String>,
    pub common_causes: Option<String>,
    pub critical_causes: Option<String>,
    pub red_flags: Option<String>,
    pub initial_workup: Option<String>,
    pub references: Option<String>,
    pub notes: Option<String>,
    pub last_reviewed: Option<String>,
    pub source: Option<String>,
}

impl CardPatch {
    /// Convenience patch touching only `notes`.
    pub fn notes(value: impl Into<String>) -> Self {
        Self {
            notes: Some(value.into()),
            ..Self::default()
        }
    }

    /// Convenience patch touching only `title`.
    pub fn title(value: impl Into<String>) -> Self {
        Self {
            title: Some(value.into()),
            ..Self::default()
        }
    }
}
