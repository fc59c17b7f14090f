//! Seed catalog loading and starter-card construction.
//!
//! # Responsibility
//! - Parse the symptom -> `{common, cantMiss, source}` catalog document.
//! - Build pre-filled starter cards for seeding and creation.
//!
//! # Invariants
//! - Any read/parse/shape failure degrades to the fallback catalog;
//!   nothing here is fatal to startup.
//! - Entries iterate sorted by name.

use crate::model::card::Card;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

/// Static fallback symptom list used when the catalog document is
/// unavailable. Titles only; starter detail stays empty.
pub const FALLBACK_SYMPTOMS: &[&str] = &[
    "Abdominal Pain",
    "Altered Mental Status",
    "Back Pain",
    "Chest Pain",
    "Cough",
    "Diarrhea",
    "Dizziness",
    "Dyspnea",
    "Fatigue",
    "Fever",
    "Headache",
    "Joint Pain",
    "Palpitations",
    "Rash",
    "Sore Throat",
    "Syncope",
    "Weight Loss",
];

/// One catalog entry: starter causes and provenance for a symptom.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeedEntry {
    pub common: Vec<String>,
    pub cant_miss: Vec<String>,
    pub source: String,
}

/// Read-only mapping from symptom name to starter entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedCatalog {
    entries: BTreeMap<String, SeedEntry>,
}

impl SeedCatalog {
    /// Builds a catalog from explicit entries. Mainly for tests and
    /// embedded catalogs.
    pub fn from_entries(entries: impl IntoIterator<Item = (String, SeedEntry)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Parses a catalog document.
    ///
    /// The top level must be a JSON object; entries with wrong-typed
    /// detail fields degrade to name-only entries instead of failing the
    /// whole document. Returns `None` when the document itself is
    /// unusable.
    pub fn from_json_str(document: &str) -> Option<Self> {
        let parsed: Value = serde_json::from_str(document).ok()?;
        let Value::Object(raw_entries) = parsed else {
            return None;
        };

        let entries = raw_entries
            .into_iter()
            .map(|(name, value)| {
                let entry = serde_json::from_value(value).unwrap_or_default();
                (name, entry)
            })
            .collect();
        Some(Self { entries })
    }

    /// Loads the catalog from disk, degrading to [`SeedCatalog::fallback`]
    /// on any failure.
    pub fn load_or_fallback(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let loaded = std::fs::read_to_string(path)
            .ok()
            .and_then(|document| Self::from_json_str(&document));

        match loaded {
            Some(catalog) if !catalog.is_empty() => {
                info!(
                    "event=seed_catalog_load module=seed status=ok entries={}",
                    catalog.len()
                );
                catalog
            }
            _ => {
                warn!(
                    "event=seed_catalog_load module=seed status=fallback path={}",
                    path.display()
                );
                Self::fallback()
            }
        }
    }

    /// The static fallback catalog: names only, empty starter detail.
    pub fn fallback() -> Self {
        Self {
            entries: FALLBACK_SYMPTOMS
                .iter()
                .map(|name| ((*name).to_string(), SeedEntry::default()))
                .collect(),
        }
    }

    pub fn lookup(&self, title: &str) -> Option<&SeedEntry> {
        self.entries.get(title)
    }

    /// Symptom names in deterministic (sorted) order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Builds a new card pre-filled from the catalog entry for `title`,
    /// or an all-empty card when the title has no entry.
    ///
    /// List fields join with ", " into the card's free-text fields.
    pub fn starter_card(&self, title: &str) -> Card {
        let mut card = Card::new(title);
        if let Some(entry) = self.lookup(title) {
            card.common_causes = entry.common.join(", ");
            card.critical_causes = entry.cant_miss.join(", ");
            card.source = entry.source.clone();
        }
        card
    }
}
