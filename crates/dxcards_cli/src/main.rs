//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `dxcards_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use dxcards_core::db::open_db_in_memory;
use dxcards_core::{CardSession, SeedCatalog, SqliteCardRepository};
use std::error::Error;

fn main() {
    println!("dxcards_core version={}", dxcards_core::core_version());
    match seeded_card_count() {
        Ok(count) => println!("dxcards_core fallback_seed_cards={count}"),
        Err(err) => {
            eprintln!("smoke check failed: {err}");
            std::process::exit(1);
        }
    }
}

// In-memory end-to-end probe: open, migrate, reseed from the fallback
// catalog and count the resulting cards.
fn seeded_card_count() -> Result<usize, Box<dyn Error>> {
    let conn = open_db_in_memory()?;
    let repo = SqliteCardRepository::try_new(&conn)?;
    let session = CardSession::open(repo, SeedCatalog::fallback())?;
    Ok(session.all().len())
}
