//! Card session: command surface over store, gate and codec.
//!
//! # Responsibility
//! - Load (and self-heal) the persisted collection.
//! - Apply gate-checked create/update/delete/import commands.
//! - Own the current selection and observer notifications.
//!
//! # Invariants
//! - `load`/`reload` never surface a "no data" state: missing, corrupt
//!   or empty persisted collections are reseeded from the catalog.
//! - Every completed mutation is persisted synchronously as a whole
//!   collection document before the command returns.
//! - Denied (locked-gate) commands return without any observable side
//!   effect.

use crate::codec::document::{export_document, import_document, CodecError};
use crate::model::card::{Card, CardId, CardPatch};
use crate::repo::card_repo::{CardRepository, RepoError};
use crate::seed::catalog::SeedCatalog;
use crate::vault::gate::{GateState, VaultError, VaultGate};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type SessionResult<T> = Result<T, SessionError>;

/// Session-level error: infrastructure and credential failures.
///
/// Authorization (locked-gate) and structural recovery cases are not
/// errors; they resolve to no-op returns and self-healing respectively.
#[derive(Debug)]
pub enum SessionError {
    Repo(RepoError),
    Codec(CodecError),
    Vault(VaultError),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::Codec(err) => write!(f, "{err}"),
            Self::Vault(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Codec(err) => Some(err),
            Self::Vault(err) => Some(err),
        }
    }
}

impl From<RepoError> for SessionError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<CodecError> for SessionError {
    fn from(value: CodecError) -> Self {
        Self::Codec(value)
    }
}

impl From<VaultError> for SessionError {
    fn from(value: VaultError) -> Self {
        Self::Vault(value)
    }
}

/// Observable state change, delivered to subscribers after the change
/// is applied and persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The whole collection was replaced (load, reseed or import).
    CollectionReplaced { count: usize },
    CardCreated(CardId),
    CardUpdated(CardId),
    CardDeleted(CardId),
    SelectionChanged(Option<CardId>),
    GateChanged(GateState),
}

/// The single owner of collection, selection, gate and catalog.
///
/// The presentation layer calls command methods and subscribes to
/// [`SessionEvent`] notifications; it never reaches into core state.
pub struct CardSession<R: CardRepository> {
    repo: R,
    catalog: SeedCatalog,
    gate: VaultGate,
    cards: Vec<Card>,
    selected: Option<CardId>,
    subscribers: Vec<Box<dyn FnMut(&SessionEvent)>>,
}

impl<R: CardRepository> CardSession<R> {
    /// Opens a session: restores the gate from the persisted credential
    /// and loads (or reseeds) the collection.
    pub fn open(repo: R, catalog: SeedCatalog) -> SessionResult<Self> {
        let credential = repo.load_credential()?;
        let mut session = Self {
            repo,
            catalog,
            gate: VaultGate::new(credential),
            cards: Vec::new(),
            selected: None,
            subscribers: Vec::new(),
        };
        session.reload()?;
        Ok(session)
    }

    /// Reads the persisted collection, reseeding on missing, corrupt or
    /// empty data. Selection moves to the first card.
    ///
    /// Callers always observe a usable collection afterwards.
    pub fn reload(&mut self) -> SessionResult<()> {
        let restored = self
            .repo
            .load_collection()?
            .and_then(|document| import_document(&document).ok())
            .filter(|cards| !cards.is_empty());

        match restored {
            Some(cards) => {
                info!(
                    "event=store_load module=session status=ok count={}",
                    cards.len()
                );
                self.cards = cards;
            }
            None => self.reseed()?,
        }

        let count = self.cards.len();
        self.notify(SessionEvent::CollectionReplaced { count });
        self.set_selected(self.cards.first().map(|card| card.id));
        Ok(())
    }

    fn reseed(&mut self) -> SessionResult<()> {
        let catalog = &self.catalog;
        self.cards = catalog
            .names()
            .map(|name| catalog.starter_card(name))
            .collect();
        self.persist_collection()?;
        info!(
            "event=store_load module=session status=reseed count={}",
            self.cards.len()
        );
        Ok(())
    }

    /// Read-only snapshot of the current collection. Display ordering is
    /// the caller's concern (see the `search` module).
    pub fn all(&self) -> &[Card] {
        &self.cards
    }

    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|card| card.id == id)
    }

    pub fn selected(&self) -> Option<CardId> {
        self.selected
    }

    pub fn gate_state(&self) -> GateState {
        self.gate.state()
    }

    /// Whether startup must run the forced set-password flow.
    pub fn needs_password_setup(&self) -> bool {
        self.gate.needs_setup()
    }

    /// Registers an observer for [`SessionEvent`] notifications.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&SessionEvent) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Creates a card with starter fields from the catalog.
    ///
    /// Returns the new id (which also becomes the selection), or `None`
    /// as a silent no-op while the gate is not unlocked.
    pub fn create(&mut self, title: &str) -> SessionResult<Option<CardId>> {
        if !self.gate.is_unlocked() {
            warn!("event=card_create module=session status=denied reason=locked");
            return Ok(None);
        }

        let card = self.catalog.starter_card(title.trim());
        let id = card.id;
        self.cards.push(card);
        self.persist_collection()?;
        info!("event=card_create module=session status=ok");
        self.notify(SessionEvent::CardCreated(id));
        self.set_selected(Some(id));
        Ok(Some(id))
    }

    /// Applies an edit patch to one card and persists.
    ///
    /// Returns `false` as a silent no-op while locked or when `id` is
    /// unknown.
    pub fn update(&mut self, id: CardId, patch: &CardPatch) -> SessionResult<bool> {
        if !self.gate.is_unlocked() {
            warn!("event=card_update module=session status=denied reason=locked");
            return Ok(false);
        }

        let Some(card) = self.cards.iter_mut().find(|card| card.id == id) else {
            info!("event=card_update module=session status=missing");
            return Ok(false);
        };
        card.apply(patch);

        self.persist_collection()?;
        info!("event=card_update module=session status=ok");
        self.notify(SessionEvent::CardUpdated(id));
        Ok(true)
    }

    /// Deletes one card and persists. Selection falls back to the first
    /// remaining card, or none.
    ///
    /// Any confirmation prompt is the caller's responsibility.
    pub fn delete(&mut self, id: CardId) -> SessionResult<bool> {
        if !self.gate.is_unlocked() {
            warn!("event=card_delete module=session status=denied reason=locked");
            return Ok(false);
        }

        let before = self.cards.len();
        self.cards.retain(|card| card.id != id);
        if self.cards.len() == before {
            info!("event=card_delete module=session status=missing");
            return Ok(false);
        }

        self.persist_collection()?;
        info!("event=card_delete module=session status=ok");
        self.notify(SessionEvent::CardDeleted(id));
        if self.selected == Some(id) {
            let fallback = self.cards.first().map(|card| card.id);
            self.set_selected(fallback);
        }
        Ok(true)
    }

    /// Serializes the full collection, in current order, to the portable
    /// document. Read-only: allowed while locked.
    pub fn export_document(&self) -> SessionResult<String> {
        let document = export_document(&self.cards)?;
        info!(
            "event=export module=session status=ok count={}",
            self.cards.len()
        );
        Ok(document)
    }

    /// Parses a portable document and wholesale-replaces the collection.
    ///
    /// Returns the imported count, or `None` as a silent no-op while the
    /// gate is not unlocked. Structural errors surface before any state
    /// is touched; selection resets to the first imported card or none.
    pub fn import_document(&mut self, document: &str) -> SessionResult<Option<usize>> {
        if !self.gate.is_unlocked() {
            warn!("event=import module=session status=denied reason=locked");
            return Ok(None);
        }

        let cards = import_document(document).inspect_err(|err| {
            warn!("event=import module=session status=error error={err}");
        })?;
        let count = cards.len();
        self.cards = cards;
        self.persist_collection()?;
        info!("event=import module=session status=ok count={count}");
        self.notify(SessionEvent::CollectionReplaced { count });
        self.set_selected(self.cards.first().map(|card| card.id));
        Ok(Some(count))
    }

    /// First-run credential setup; unlocks on success.
    pub fn set_password(&mut self, password: &str) -> SessionResult<()> {
        let token = self.gate.set_password(password).inspect_err(|err| {
            warn!("event=vault_set module=session status=error error={err}");
        })?;
        self.repo.save_credential(&token)?;
        info!("event=vault_set module=session status=ok");
        self.notify(SessionEvent::GateChanged(self.gate.state()));
        Ok(())
    }

    /// Unlocks the session when the password matches the stored token.
    pub fn verify_password(&mut self, password: &str) -> SessionResult<()> {
        self.gate.verify(password).inspect_err(|err| {
            warn!("event=vault_verify module=session status=error error={err}");
        })?;
        info!("event=vault_verify module=session status=ok");
        self.notify(SessionEvent::GateChanged(self.gate.state()));
        Ok(())
    }

    /// Replaces the credential while unlocked; stays unlocked.
    pub fn change_password(&mut self, password: &str, confirm: &str) -> SessionResult<()> {
        let token = self.gate.change_password(password, confirm).inspect_err(|err| {
            warn!("event=vault_change module=session status=error error={err}");
        })?;
        self.repo.save_credential(&token)?;
        info!("event=vault_change module=session status=ok");
        Ok(())
    }

    /// Explicitly relocks the session.
    pub fn lock(&mut self) {
        self.gate.lock();
        info!("event=vault_lock module=session status=ok");
        self.notify(SessionEvent::GateChanged(self.gate.state()));
    }

    fn persist_collection(&self) -> SessionResult<()> {
        let document = export_document(&self.cards)?;
        self.repo.save_collection(&document)?;
        Ok(())
    }

    fn set_selected(&mut self, next: Option<CardId>) {
        if self.selected != next {
            self.selected = next;
            self.notify(SessionEvent::SelectionChanged(next));
        }
    }

    fn notify(&mut self, event: SessionEvent) {
        for subscriber in &mut self.subscribers {
            subscriber(&event);
        }
    }
}
