//! Core domain logic for DxCards, an offline diagnosis-card manager.
//! This crate is the single source of truth for business invariants:
//! the card store, the password gate and the portable document codec.

pub mod codec;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod seed;
pub mod session;
pub mod vault;

pub use codec::document::{
    export_document, import_document, CodecError, CodecResult, DOCUMENT_FIELDS,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::card::{Card, CardId, CardPatch};
pub use repo::card_repo::{
    CardRepository, RepoError, RepoResult, SqliteCardRepository, COLLECTION_STATE_KEY,
    CREDENTIAL_STATE_KEY,
};
pub use search::filter::filter_and_sort;
pub use seed::catalog::{SeedCatalog, SeedEntry, FALLBACK_SYMPTOMS};
pub use session::card_session::{CardSession, SessionError, SessionEvent, SessionResult};
pub use vault::digest::DigestScheme;
pub use vault::gate::{GateState, VaultError, VaultGate, VaultResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
