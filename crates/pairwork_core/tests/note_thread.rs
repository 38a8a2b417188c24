use pairwork_core::db::open_db_in_memory;
use pairwork_core::{
    Note, NoteRepository, NoteService, NoteServiceError, NoteValidationError, RepoError,
    SqliteNoteRepository,
};
use rusqlite::params;
use uuid::Uuid;

#[test]
fn create_and_thread_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();
    let service = NoteService::new(repo);

    let owner = Uuid::new_v4();
    let contact = Uuid::new_v4();
    let created = service
        .add_note(owner, contact, "  paired on the parser refactor  ", None, None)
        .unwrap();
    assert_eq!(created.content, "paired on the parser refactor");
    assert_eq!(created.user_id, owner);
    assert_eq!(created.contact_id, contact);

    let thread = service.thread(owner, contact).unwrap();
    assert_eq!(thread, vec![created]);
}

#[test]
fn ownership_isolation_between_directions() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();
    let service = NoteService::new(repo);

    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    service.add_note(a, b, "a about b", None, None).unwrap();

    // The reverse direction is a different, empty thread.
    assert!(service.thread(b, a).unwrap().is_empty());
    assert_eq!(service.thread(a, b).unwrap().len(), 1);
}

#[test]
fn empty_content_is_rejected_on_create_and_update() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();
    let service = NoteService::new(repo);

    let owner = Uuid::new_v4();
    let contact = Uuid::new_v4();
    let err = service
        .add_note(owner, contact, "   \n  ", None, None)
        .unwrap_err();
    assert!(matches!(err, NoteServiceError::EmptyContent));

    let created = service
        .add_note(owner, contact, "real content", None, None)
        .unwrap();
    let err = service
        .edit_note(owner, created.id, "   ", None)
        .unwrap_err();
    assert!(matches!(err, NoteServiceError::EmptyContent));
}

#[test]
fn image_and_meeting_references_are_stored_verbatim() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();
    let service = NoteService::new(repo);

    let owner = Uuid::new_v4();
    let contact = Uuid::new_v4();
    let meeting_id = Uuid::new_v4();
    let created = service
        .add_note(
            owner,
            contact,
            "whiteboard photo",
            Some("https://storage.example/notes/abc.png?token=opaque".to_string()),
            Some(meeting_id),
        )
        .unwrap();

    assert_eq!(
        created.image_url.as_deref(),
        Some("https://storage.example/notes/abc.png?token=opaque")
    );
    assert_eq!(created.meeting_id, Some(meeting_id));

    // Blank image input normalizes to no image.
    let plain = service
        .add_note(owner, contact, "no image", Some("   ".to_string()), None)
        .unwrap();
    assert!(plain.image_url.is_none());
}

#[test]
fn edit_replaces_content_and_image() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();
    let service = NoteService::new(repo);

    let owner = Uuid::new_v4();
    let contact = Uuid::new_v4();
    let created = service
        .add_note(
            owner,
            contact,
            "draft",
            Some("https://storage.example/old.png".to_string()),
            None,
        )
        .unwrap();

    let updated = service
        .edit_note(owner, created.id, "final", None)
        .unwrap();
    assert_eq!(updated.content, "final");
    assert!(updated.image_url.is_none());
    assert_eq!(updated.created_at, created.created_at);
}

#[test]
fn foreign_note_behaves_as_missing_for_edit_and_delete() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();
    let service = NoteService::new(repo);

    let owner = Uuid::new_v4();
    let contact = Uuid::new_v4();
    let stranger = Uuid::new_v4();
    let created = service
        .add_note(owner, contact, "private", None, None)
        .unwrap();

    let edit_err = service
        .edit_note(stranger, created.id, "defaced", None)
        .unwrap_err();
    assert!(matches!(edit_err, NoteServiceError::NoteNotFound(id) if id == created.id));

    let delete_err = service.remove_note(stranger, created.id).unwrap_err();
    assert!(matches!(delete_err, NoteServiceError::NoteNotFound(_)));

    // The note is untouched.
    let thread = service.thread(owner, contact).unwrap();
    assert_eq!(thread[0].content, "private");
}

#[test]
fn delete_is_permanent_and_second_delete_reports_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();
    let service = NoteService::new(repo);

    let owner = Uuid::new_v4();
    let contact = Uuid::new_v4();
    let created = service
        .add_note(owner, contact, "to be removed", None, None)
        .unwrap();

    service.remove_note(owner, created.id).unwrap();
    assert!(service.thread(owner, contact).unwrap().is_empty());

    let err = service.remove_note(owner, created.id).unwrap_err();
    assert!(matches!(err, NoteServiceError::NoteNotFound(_)));
}

#[test]
fn thread_is_sorted_by_creation_instant_descending() {
    let conn = open_db_in_memory().unwrap();
    let owner = Uuid::new_v4();
    let contact = Uuid::new_v4();

    let (first_id, second_id) = {
        let repo = SqliteNoteRepository::try_new(&conn).unwrap();
        let service = NoteService::new(repo);
        let first = service.add_note(owner, contact, "first", None, None).unwrap();
        let second = service
            .add_note(owner, contact, "second", None, None)
            .unwrap();
        (first.id, second.id)
    };

    conn.execute(
        "UPDATE notes SET created_at = '2024-02-01T00:00:00.000Z' WHERE id = ?1;",
        params![first_id.to_string()],
    )
    .unwrap();
    conn.execute(
        "UPDATE notes SET created_at = '2024-01-01T00:00:00.000Z' WHERE id = ?1;",
        params![second_id.to_string()],
    )
    .unwrap();

    let repo = SqliteNoteRepository::try_new(&conn).unwrap();
    let service = NoteService::new(repo);
    let thread = service.thread(owner, contact).unwrap();
    assert_eq!(thread.len(), 2);
    assert_eq!(thread[0].id, first_id);
    assert_eq!(thread[1].id, second_id);
}

#[test]
fn repository_validates_before_touching_storage() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();

    let mut note = Note::new(Uuid::new_v4(), Uuid::new_v4(), "placeholder");
    note.content = "   ".to_string();

    let err = repo.create_note(&note).unwrap_err();
    assert!(matches!(
        err,
        RepoError::NoteValidation(NoteValidationError::EmptyContent)
    ));

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM notes;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 0);
}
