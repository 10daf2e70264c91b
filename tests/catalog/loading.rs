use catalog_sync::{
    BufferNotifier, EntityKind, InMemoryLibraryService, LibraryManager, LogNotifier, Operation,
    SelectOption, ServiceError,
};

use crate::support::Library;

#[test]
fn load_all_projects_books_for_display() {
    let library = Library::seeded();
    let rows = library.manager.books();

    assert_eq!(rows.len(), 3);
    let ubik = rows.iter().find(|r| r.id == library.ubik).unwrap();
    assert_eq!(ubik.author_name.as_deref(), Some("Dick"));
    assert_eq!(ubik.publication_year, Some(1969));
    assert_eq!(ubik.genre_names, "SF, Satire");
    assert_eq!(ubik.genre_ids, vec![library.sf.clone(), library.satire.clone()]);
    assert_eq!(library.manager.original_books(), library.manager.books());
}

#[test]
fn one_failed_fetch_does_not_block_the_others() {
    let service = InMemoryLibraryService::new();
    service.seed_author("Borges").unwrap();
    service.seed_genre("Essay").unwrap();
    service.fail_next(Operation::ListGenres, ServiceError::transport("timeout"));

    let mut manager = LibraryManager::new(service.clone(), BufferNotifier::new());
    let errors = manager.load_all();

    assert_eq!(errors.len(), 1);
    assert!(matches!(
        errors[0],
        catalog_sync::CatalogError::Fetch { kind: EntityKind::Genre, .. }
    ));
    assert_eq!(manager.authors().len(), 1);
    assert!(manager.genres().is_empty());
    assert!(!manager.store().genres().is_loaded());
    assert!(manager.store().raw_books().is_loaded());
}

#[test]
fn failed_refresh_is_silent_to_the_user() {
    let library = Library::seeded();
    let mut manager = library.manager;
    library
        .service
        .fail_next(Operation::ListBooks, ServiceError::transport("offline"));

    assert!(manager.refresh(EntityKind::Book).is_err());

    assert_eq!(manager.books().len(), 3);
    assert!(library.notifier.notifications().is_empty());
}

#[test]
fn options_reflect_store_order() {
    let library = Library::seeded();

    let authors = library.manager.author_options_with_all();
    assert_eq!(
        authors,
        vec![
            SelectOption::new("All Authors", ""),
            SelectOption::new("Lem", library.lem.as_str()),
            SelectOption::new("Dick", library.dick.as_str()),
        ]
    );

    let genres = library.manager.genre_options();
    assert_eq!(genres.len(), 2);
    assert_eq!(library.manager.genre_options_with_all()[0].label, "All Genres");
}

#[test]
fn manager_runs_with_log_notifier() {
    let service = InMemoryLibraryService::new();
    service.seed_author("Calvino").unwrap();
    let mut manager = LibraryManager::new(service, LogNotifier);
    assert!(manager.load_all().is_empty());

    manager.open_add_author();
    manager.author_form_mut().fields_mut().name = "Borges".into();
    let outcome = manager.save_author().unwrap();

    assert_eq!(outcome.refreshed, vec![EntityKind::Author, EntityKind::Book]);
    assert!(!manager.author_form().is_open());
    let names: Vec<&str> = manager.authors().iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["Calvino", "Borges"]);
}
