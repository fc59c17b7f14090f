//! Case-insensitive title filter and display sort.
//!
//! # Responsibility
//! - Filter cards by case-insensitive substring match on `title`.
//! - Order results lexicographically by case-folded title.
//!
//! # Invariants
//! - Ordering is deterministic: title ties break on id.
//! - A blank query matches everything.

use crate::model::card::Card;

/// Filters and orders a borrowed card snapshot for display.
pub fn filter_and_sort<'a>(cards: &'a [Card], query: &str) -> Vec<&'a Card> {
    let needle = query.trim().to_lowercase();
    let mut hits: Vec<&Card> = cards
        .iter()
        .filter(|card| needle.is_empty() || card.title.to_lowercase().contains(&needle))
        .collect();

    hits.sort_by(|a, b| {
        a.title
            .to_lowercase()
            .cmp(&b.title.to_lowercase())
            .then_with(|| a.id.cmp(&b.id))
    });
    hits
}

#[cfg(test)]
mod tests {
    use super::filter_and_sort;
    use crate::model::card::Card;

    fn cards(titles: &[&str]) -> Vec<Card> {
        titles.iter().map(|title| Card::new(*title)).collect()
    }

    #[test]
    fn blank_query_matches_everything_sorted() {
        let collection = cards(&["Syncope", "chest pain", "Headache"]);
        let hits = filter_and_sort(&collection, "   ");
        let titles: Vec<_> = hits.iter().map(|card| card.title.as_str()).collect();
        assert_eq!(titles, ["chest pain", "Headache", "Syncope"]);
    }

    #[test]
    fn match_is_case_insensitive_substring() {
        let collection = cards(&["Chest Pain", "Abdominal Pain", "Fever"]);
        let hits = filter_and_sort(&collection, "PAIN");
        let titles: Vec<_> = hits.iter().map(|card| card.title.as_str()).collect();
        assert_eq!(titles, ["Abdominal Pain", "Chest Pain"]);
    }

    #[test]
    fn no_match_returns_empty() {
        let collection = cards(&["Fever"]);
        assert!(filter_and_sort(&collection, "rash").is_empty());
    }

    #[test]
    fn title_ties_order_by_id_for_determinism() {
        let collection = cards(&["Fever", "Fever"]);
        let hits = filter_and_sort(&collection, "fever");
        assert_eq!(hits.len(), 2);
        assert!(hits[0].id < hits[1].id);
    }
}
