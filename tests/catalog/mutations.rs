use catalog_sync::{CatalogError, EntityKind, Notification, Operation, ServiceError};

use crate::support::Library;

#[test]
fn book_save_refreshes_books_only() {
    let mut library = Library::seeded();
    library.manager.open_add_book();
    {
        let fields = library.manager.book_form_mut().fields_mut();
        fields.name = "Fiasco".into();
        fields.author_id = Some(library.lem.clone());
        fields.publication_year = Some(1986);
        fields.genre_ids = vec![library.sf.clone()];
    }

    let outcome = library.manager.save_book().unwrap();

    assert_eq!(outcome.refreshed, vec![EntityKind::Book]);
    assert_eq!(library.service.calls(Operation::UpsertBook), 1);
    assert_eq!(library.service.calls(Operation::ListBooks), 1);
    assert_eq!(library.service.calls(Operation::ListAuthors), 0);
    assert_eq!(library.service.calls(Operation::ListGenres), 0);
    assert!(!library.manager.book_form().is_open());
    assert_eq!(library.manager.books().len(), 4);

    let fiasco = library.manager.store().book_row(&outcome.id).unwrap();
    assert_eq!(fiasco.author_name.as_deref(), Some("Lem"));
    assert_eq!(fiasco.genre_names, "SF");
}

#[test]
fn author_delete_refreshes_authors_and_books() {
    let mut library = Library::seeded();
    let lem = library.lem.clone();

    let outcome = library.manager.delete_author(&lem).unwrap();

    assert_eq!(outcome.refreshed, vec![EntityKind::Author, EntityKind::Book]);
    assert_eq!(library.service.calls(Operation::ListAuthors), 1);
    assert_eq!(library.service.calls(Operation::ListBooks), 1);
    assert_eq!(library.service.calls(Operation::ListGenres), 0);
    assert_eq!(library.manager.authors().len(), 1);

    // Lem's books stay, with a reference that no longer resolves.
    let solaris = library.manager.store().book_row(&library.solaris).unwrap();
    assert_eq!(solaris.author_id.as_deref(), Some(lem.as_str()));
    assert_eq!(solaris.author_name, None);
    assert_eq!(
        library.notifier.notifications(),
        vec![Notification::success("Deleted", "Author deleted")]
    );
}

#[test]
fn author_rename_reaches_book_rows() {
    let mut library = Library::seeded();
    let dick = library.dick.clone();
    library.manager.open_edit_author(&dick);
    assert_eq!(library.manager.author_form().title(), "Edit Author");
    assert_eq!(library.manager.author_form().fields().name, "Dick");

    library.manager.author_form_mut().fields_mut().name = "Philip K. Dick".into();
    library.manager.save_author().unwrap();

    let ubik = library.manager.store().book_row(&library.ubik).unwrap();
    assert_eq!(ubik.author_name.as_deref(), Some("Philip K. Dick"));
    assert!(!library.manager.author_form().is_open());
}

#[test]
fn genre_delete_refreshes_books_and_drops_links() {
    let mut library = Library::seeded();
    let satire = library.satire.clone();
    library.manager.set_genre_filter(Some(satire.as_str()));
    assert_eq!(library.visible_names(), vec!["Ubik", "The Cyberiad"]);

    let outcome = library.manager.delete_genre(&satire).unwrap();

    assert_eq!(outcome.refreshed, vec![EntityKind::Genre, EntityKind::Book]);
    assert!(library.visible_names().is_empty());
    let ubik = library.manager.store().book_row(&library.ubik).unwrap();
    assert_eq!(ubik.genre_names, "SF");
    assert_eq!(ubik.genre_ids, vec![library.sf.clone()]);
}

#[test]
fn failed_upsert_changes_nothing_and_reports_once() {
    let mut library = Library::seeded();
    library.manager.set_author_filter(Some(library.lem.as_str()));
    let original = library.manager.original_books().to_vec();
    let visible = library.manager.books().to_vec();

    library.manager.open_edit_book(&library.ubik.clone());
    library.manager.book_form_mut().fields_mut().name = "Ubik (revised)".into();
    let form_before = library.manager.book_form().clone();
    library.service.fail_next(
        Operation::UpsertBook,
        ServiceError::from_response(400, br#"{"message":"Book name must be unique"}"#),
    );

    let err = library.manager.save_book().unwrap_err();

    assert!(matches!(err, CatalogError::Mutation { kind: EntityKind::Book, .. }));
    assert_eq!(library.manager.original_books(), original.as_slice());
    assert_eq!(library.manager.books(), visible.as_slice());
    assert_eq!(library.manager.book_form(), &form_before);
    assert!(library.manager.book_form().is_open());
    assert_eq!(
        library.notifier.errors(),
        vec![Notification::error("Book name must be unique")]
    );
    assert_eq!(library.notifier.notifications().len(), 1);
    assert_eq!(library.service.calls(Operation::ListBooks), 0);
}

#[test]
fn failed_delete_is_caught_like_upsert() {
    let mut library = Library::seeded();
    let cyberiad = library.cyberiad.clone();
    library
        .service
        .fail_next(Operation::DeleteBook, ServiceError::transport("connection reset"));

    let err = library.manager.delete_book(&cyberiad).unwrap_err();

    assert!(matches!(err, CatalogError::Mutation { kind: EntityKind::Book, .. }));
    assert_eq!(library.manager.books().len(), 3);
    assert_eq!(library.service.calls(Operation::ListBooks), 0);
    assert_eq!(
        library.notifier.errors(),
        vec![Notification::error("connection reset")]
    );
}

#[test]
fn failed_author_delete_refreshes_nothing() {
    let mut library = Library::seeded();
    let lem = library.lem.clone();
    library
        .service
        .fail_next(Operation::DeleteAuthor, ServiceError::server("author is in use"));

    library.manager.delete_author(&lem).unwrap_err();

    assert_eq!(library.service.calls(Operation::ListAuthors), 0);
    assert_eq!(library.service.calls(Operation::ListBooks), 0);
    assert_eq!(library.manager.authors().len(), 2);
    assert_eq!(
        library.notifier.errors(),
        vec![Notification::error("author is in use")]
    );
}

#[test]
fn book_delete_names_the_book() {
    let mut library = Library::seeded();
    let cyberiad = library.cyberiad.clone();

    library.manager.delete_book(&cyberiad).unwrap();

    assert_eq!(library.visible_names(), vec!["Solaris", "Ubik"]);
    assert_eq!(
        library.notifier.notifications(),
        vec![Notification::success("Deleted", "Book \"The Cyberiad\" deleted")]
    );
}

#[test]
fn edit_book_flow_updates_genres_in_order() {
    let mut library = Library::seeded();
    let solaris = library.solaris.clone();
    assert!(library.manager.open_edit_book(&solaris));
    assert_eq!(library.manager.book_form().title(), "Edit Book");

    library.manager.book_form_mut().fields_mut().genre_ids =
        vec![library.satire.clone(), library.sf.clone()];
    library.manager.save_book().unwrap();

    let row = library.manager.store().book_row(&solaris).unwrap();
    assert_eq!(row.genre_names, "Satire, SF");
    assert_eq!(row.publication_year, Some(1961));
    assert_eq!(library.service.calls(Operation::UpsertBook), 1);
}

#[test]
fn unknown_book_does_not_open_the_form() {
    let mut library = Library::seeded();
    assert!(!library.manager.open_edit_book("book-404"));
    assert!(!library.manager.book_form().is_open());
}

#[test]
fn repeated_submission_issues_one_call_each() {
    let mut library = Library::seeded();
    library.manager.open_add_genre();
    library.manager.genre_form_mut().fields_mut().name = "Noir".into();

    library.manager.save_genre().unwrap();
    library.manager.save_genre().unwrap();

    // No deduplication: the second save creates another record.
    assert_eq!(library.service.calls(Operation::UpsertGenre), 2);
    let noir = library
        .manager
        .genres()
        .iter()
        .filter(|g| g.name == "Noir")
        .count();
    assert_eq!(noir, 2);
}
