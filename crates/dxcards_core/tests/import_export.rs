use dxcards_core::db::open_db_in_memory;
use dxcards_core::{
    CardSession, CodecError, SeedCatalog, SessionError, SessionEvent, SqliteCardRepository,
};
use rusqlite::Connection;
use std::cell::RefCell;
use std::rc::Rc;

fn unlocked_session(conn: &Connection) -> CardSession<SqliteCardRepository<'_>> {
    let repo = SqliteCardRepository::try_new(conn).unwrap();
    let mut session = CardSession::open(repo, SeedCatalog::fallback()).unwrap();
    session.set_password("pw").unwrap();
    session
}

#[test]
fn import_of_export_restores_the_same_collection() {
    let conn = open_db_in_memory().unwrap();
    let mut session = unlocked_session(&conn);
    let original = session.all().to_vec();

    let document = session.export_document().unwrap();
    let count = session.import_document(&document).unwrap();

    assert_eq!(count, Some(original.len()));
    assert_eq!(session.all(), original.as_slice());
}

#[test]
fn import_wholesale_replaces_and_resets_selection() {
    let conn = open_db_in_memory().unwrap();
    let mut session = unlocked_session(&conn);
    assert!(!session.all().is_empty());

    let count = session
        .import_document(r#"[{"title": "Only Card"}]"#)
        .unwrap();
    assert_eq!(count, Some(1));
    assert_eq!(session.all().len(), 1);
    assert_eq!(session.all()[0].title, "Only Card");
    assert_eq!(session.selected(), Some(session.all()[0].id));
}

#[test]
fn import_accepts_well_formed_elements_and_discards_the_rest() {
    let conn = open_db_in_memory().unwrap();
    let mut session = unlocked_session(&conn);

    let count = session
        .import_document(r#"[{"title": "Kept"}, 17]"#)
        .unwrap();
    assert_eq!(count, Some(1));
    assert_eq!(session.all()[0].title, "Kept");
}

#[test]
fn import_of_empty_document_clears_the_collection() {
    let conn = open_db_in_memory().unwrap();
    let mut session = unlocked_session(&conn);

    assert_eq!(session.import_document("[]").unwrap(), Some(0));
    assert!(session.all().is_empty());
    assert_eq!(session.selected(), None);
}

#[test]
fn structural_import_error_leaves_state_untouched() {
    let conn = open_db_in_memory().unwrap();
    let mut session = unlocked_session(&conn);
    let before = session.all().to_vec();
    let selected = session.selected();

    let err = session.import_document(r#"{"cards": []}"#).unwrap_err();
    assert!(matches!(err, SessionError::Codec(CodecError::NotASequence)));
    assert_eq!(session.all(), before.as_slice());
    assert_eq!(session.selected(), selected);
}

#[test]
fn imported_collection_is_persisted_for_later_sessions() {
    let conn = open_db_in_memory().unwrap();
    {
        let mut session = unlocked_session(&conn);
        session
            .import_document(r#"[{"title": "Survivor", "notes": "kept"}]"#)
            .unwrap();
    }

    let repo = SqliteCardRepository::try_new(&conn).unwrap();
    let session = CardSession::open(repo, SeedCatalog::fallback()).unwrap();
    assert_eq!(session.all().len(), 1);
    assert_eq!(session.all()[0].title, "Survivor");
    assert_eq!(session.all()[0].notes, "kept");
}

#[test]
fn import_notifies_replacement_and_selection_subscribers() {
    let conn = open_db_in_memory().unwrap();
    let mut session = unlocked_session(&conn);

    let seen: Rc<RefCell<Vec<SessionEvent>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    session.subscribe(move |event| sink.borrow_mut().push(event.clone()));

    session
        .import_document(r#"[{"title": "Observed"}]"#)
        .unwrap();

    let events = seen.borrow();
    assert!(events
        .iter()
        .any(|event| matches!(event, SessionEvent::CollectionReplaced { count: 1 })));
    assert!(events
        .iter()
        .any(|event| matches!(event, SessionEvent::SelectionChanged(Some(_)))));
}
