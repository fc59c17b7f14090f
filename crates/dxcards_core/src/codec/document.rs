//! Export/import document encoding and schema coercion.
//!
//! # Responsibility
//! - Emit the portable collection document in current in-memory order.
//! - Coerce imported elements field-by-field against a fixed table.
//!
//! # Invariants
//! - A structural error is raised only when the top-level value is not
//!   an array; everything below that is recovered.
//! - Imported ids are unique: missing, unparsable or duplicated ids are
//!   replaced with fresh ones.

use crate::model::card::{Card, CardId};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Document keys of one exported card, in output order.
pub const DOCUMENT_FIELDS: &[&str] = &[
    "id",
    "title",
    "commonCauses",
    "criticalCauses",
    "redFlags",
    "initialWorkup",
    "references",
    "notes",
    "lastReviewed",
    "source",
];

pub type CodecResult<T> = Result<T, CodecError>;

/// Structural codec failure; per-field problems never reach this type.
#[derive(Debug)]
pub enum CodecError {
    /// Input is not parseable JSON at all.
    Parse(serde_json::Error),
    /// Parsed fine, but the top-level value is not an array.
    NotASequence,
}

impl Display for CodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "document is not valid JSON: {err}"),
            Self::NotASequence => write!(f, "document top-level value must be an array"),
        }
    }
}

impl Error for CodecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::NotASequence => None,
        }
    }
}

impl From<serde_json::Error> for CodecError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Serializes the full collection, in its current order, to a portable
/// JSON document.
///
/// Output is field-complete: every card carries all keys listed in
/// [`DOCUMENT_FIELDS`] with string values.
pub fn export_document(cards: &[Card]) -> CodecResult<String> {
    Ok(serde_json::to_string_pretty(cards)?)
}

/// Parses and coerces a portable document into well-formed cards.
///
/// # Contract
/// - Non-array top level -> [`CodecError`].
/// - Non-object elements are discarded silently (partial acceptance).
/// - Accepted elements are coerced field-by-field: a missing or
///   wrong-typed field becomes its empty-string default; a missing,
///   unparsable or already-used `id` becomes a fresh one.
pub fn import_document(document: &str) -> CodecResult<Vec<Card>> {
    let parsed: Value = serde_json::from_str(document)?;
    let Value::Array(elements) = parsed else {
        return Err(CodecError::NotASequence);
    };

    let mut used_ids: HashSet<CardId> = HashSet::new();
    let mut cards = Vec::new();
    for element in &elements {
        let Value::Object(fields) = element else {
            continue;
        };
        cards.push(coerce_card(fields, &mut used_ids));
    }

    Ok(cards)
}

fn coerce_card(fields: &Map<String, Value>, used_ids: &mut HashSet<CardId>) -> Card {
    let id = coerce_id(fields.get("id"), used_ids);
    used_ids.insert(id);

    let mut card = Card::with_id(id, string_field(fields, "title"));
    card.common_causes = string_field(fields, "commonCauses");
    card.critical_causes = string_field(fields, "criticalCauses");
    card.red_flags = string_field(fields, "redFlags");
    card.initial_workup = string_field(fields, "initialWorkup");
    card.references = string_field(fields, "references");
    card.notes = string_field(fields, "notes");
    card.last_reviewed = string_field(fields, "lastReviewed");
    card.source = string_field(fields, "source");
    card
}

fn coerce_id(value: Option<&Value>, used_ids: &HashSet<CardId>) -> CardId {
    let parsed = value
        .and_then(Value::as_str)
        .and_then(|raw| Uuid::parse_str(raw.trim()).ok());
    match parsed {
        Some(id) if !used_ids.contains(&id) => id,
        _ => fresh_unique_id(used_ids),
    }
}

fn fresh_unique_id(used_ids: &HashSet<CardId>) -> CardId {
    loop {
        let candidate = Uuid::new_v4();
        if !used_ids.contains(&candidate) {
            return candidate;
        }
    }
}

/// Uniform per-field coercion: string value kept verbatim, anything else
/// replaced with the empty-string default.
fn string_field(fields: &Map<String, Value>, key: &str) -> String {
    fields
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::{export_document, import_document, CodecError, DOCUMENT_FIELDS};
    use crate::model::card::Card;
    use serde_json::Value;

    #[test]
    fn export_is_field_complete() {
        let document = export_document(&[Card::new("Chest Pain")]).expect("export");
        let parsed: Value = serde_json::from_str(&document).expect("valid JSON");
        let element = parsed
            .as_array()
            .and_then(|elements| elements.first())
            .and_then(Value::as_object)
            .expect("one object element");

        for key in DOCUMENT_FIELDS {
            assert!(
                element.get(*key).is_some_and(Value::is_string),
                "missing or non-string key `{key}`"
            );
        }
        assert_eq!(element.len(), DOCUMENT_FIELDS.len());
    }

    #[test]
    fn non_array_top_level_is_a_structural_error() {
        assert!(matches!(
            import_document("{\"not\": \"a list\"}"),
            Err(CodecError::NotASequence)
        ));
        assert!(matches!(import_document("not json"), Err(CodecError::Parse(_))));
    }

    #[test]
    fn non_object_elements_are_discarded_silently() {
        let cards = import_document(r#"[{"title": "Fever"}, 42, "noise", null]"#).expect("import");
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].title, "Fever");
    }

    #[test]
    fn missing_and_wrong_typed_fields_coerce_to_empty_strings() {
        let cards =
            import_document(r#"[{"title": 7, "notes": ["x"], "source": "UofT"}]"#).expect("import");
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].title, "");
        assert_eq!(cards[0].notes, "");
        assert_eq!(cards[0].source, "UofT");
    }

    #[test]
    fn missing_unparsable_and_duplicate_ids_are_regenerated() {
        let cards = import_document(
            r#"[
                {"id": "00000000-0000-4000-8000-000000000001", "title": "a"},
                {"id": "00000000-0000-4000-8000-000000000001", "title": "b"},
                {"id": "not-a-uuid", "title": "c"},
                {"title": "d"}
            ]"#,
        )
        .expect("import");

        assert_eq!(cards.len(), 4);
        assert_eq!(
            cards[0].id.to_string(),
            "00000000-0000-4000-8000-000000000001"
        );
        let mut ids: Vec<_> = cards.iter().map(|card| card.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 4, "imported ids must be unique");
    }

    #[test]
    fn round_trip_preserves_ids_values_count_and_order() {
        let mut first = Card::new("Chest Pain");
        first.common_causes = "GERD, MSK".to_string();
        first.last_reviewed = "2026-07-01".to_string();
        let mut second = Card::new("Headache");
        second.notes = "check vitals".to_string();
        let original = vec![first, second];

        let document = export_document(&original).expect("export");
        let reimported = import_document(&document).expect("import");
        assert_eq!(reimported, original);
    }
}
