use catalog_sync::{
    BufferNotifier, CatalogError, InMemoryLibraryService, LibraryManager, ManagerConfig,
    Notification, Operation, ServiceError,
};

use crate::support::Library;

#[test]
fn export_decodes_csv_and_notifies() {
    let library = Library::seeded();

    let file = library.manager.export_books().unwrap();

    assert_eq!(file.file_name, "Books.csv");
    assert_eq!(file.mime_type, "text/csv");
    let csv = file.as_text().unwrap();
    assert!(csv.starts_with("Name,Author,Publication Year,Genres\n"));
    assert!(csv.contains("Ubik,Dick,1969,\"SF, Satire\"\n"));
    assert!(file.data_url().starts_with("data:text/csv;base64,"));
    assert_eq!(
        library.notifier.notifications(),
        vec![Notification::success("Success", "Books exported successfully")]
    );
}

#[test]
fn export_failure_uses_fixed_message_without_retry() {
    let library = Library::seeded();
    library.service.fail_next(
        Operation::ExportBooks,
        ServiceError::server("Apex heap size too large"),
    );

    let err = library.manager.export_books().unwrap_err();

    assert!(matches!(err, CatalogError::Export(_)));
    assert_eq!(library.service.calls(Operation::ExportBooks), 1);
    assert_eq!(
        library.notifier.errors(),
        vec![Notification::error("Failed to export books")]
    );
}

#[test]
fn export_respects_configured_file_name() {
    let config = ManagerConfig::from_json(r#"{"export_file_name":"catalog.csv"}"#).unwrap();
    let manager =
        LibraryManager::with_config(InMemoryLibraryService::new(), BufferNotifier::new(), config);

    let file = manager.export_books().unwrap();

    assert_eq!(file.file_name, "catalog.csv");
    assert_eq!(file.as_text(), Some("Name,Author,Publication Year,Genres\n"));
}
