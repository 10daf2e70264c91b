//! LibraryManager - the catalog as a UI layer drives it.
//!
//! ## Example
//!
//! ```ignore
//! use catalog_sync::{BufferNotifier, InMemoryLibraryService, LibraryManager};
//!
//! let mut manager = LibraryManager::new(InMemoryLibraryService::new(), BufferNotifier::new());
//! manager.load_all();
//!
//! manager.open_add_author();
//! manager.author_form_mut().fields_mut().name = "Italo Calvino".into();
//! manager.save_author()?;
//!
//! manager.set_genre_filter(Some("genre-3"));
//! for row in manager.books() { /* render */ }
//! ```

use crate::config::ManagerConfig;
use crate::coordinator::{MutationCoordinator, MutationOutcome};
use crate::error::CatalogError;
use crate::export::ExportedFile;
use crate::filter::FilterState;
use crate::form::{AuthorFields, BookFields, EditForm, GenreFields};
use crate::notify::{Notification, Notifier};
use crate::options::{options_with_all, select_options, SelectOption};
use crate::projection::BookRow;
use crate::record::{Author, AuthorInput, EntityKind, Genre, GenreInput};
use crate::service::{ExportService, RecordMutationService, RecordQueryService};
use crate::store::EntityStore;

pub struct LibraryManager<S, N> {
    coordinator: MutationCoordinator<S, N>,
    store: EntityStore,
    author_form: EditForm<AuthorFields>,
    genre_form: EditForm<GenreFields>,
    book_form: EditForm<BookFields>,
}

impl<S, N> LibraryManager<S, N>
where
    S: RecordQueryService + RecordMutationService,
    N: Notifier,
{
    pub fn new(service: S, notifier: N) -> Self {
        Self::with_config(service, notifier, ManagerConfig::default())
    }

    pub fn with_config(service: S, notifier: N, config: ManagerConfig) -> Self {
        Self {
            coordinator: MutationCoordinator::new(service, notifier, config),
            store: EntityStore::new(),
            author_form: EditForm::new(),
            genre_form: EditForm::new(),
            book_form: EditForm::new(),
        }
    }

    /// Fetch every collection. Each fetch stands alone: a failure keeps that
    /// collection's snapshot and does not stop the others.
    pub fn load_all(&mut self) -> Vec<CatalogError> {
        EntityKind::ALL
            .iter()
            .filter_map(|kind| self.coordinator.refresh(&mut self.store, *kind).err())
            .collect()
    }

    pub fn refresh(&mut self, kind: EntityKind) -> Result<(), CatalogError> {
        self.coordinator.refresh(&mut self.store, kind)
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn coordinator(&self) -> &MutationCoordinator<S, N> {
        &self.coordinator
    }

    pub fn books(&self) -> &[BookRow] {
        self.store.books()
    }

    pub fn original_books(&self) -> &[BookRow] {
        self.store.original_books()
    }

    pub fn authors(&self) -> &[Author] {
        self.store.authors().items()
    }

    pub fn genres(&self) -> &[Genre] {
        self.store.genres().items()
    }

    pub fn filter_state(&self) -> &FilterState {
        self.store.filter_state()
    }

    pub fn set_author_filter(&mut self, author_id: Option<&str>) {
        self.store.set_author_filter(author_id);
    }

    pub fn set_genre_filter(&mut self, genre_id: Option<&str>) {
        self.store.set_genre_filter(genre_id);
    }

    pub fn author_options(&self) -> Vec<SelectOption> {
        select_options(self.authors())
    }

    pub fn genre_options(&self) -> Vec<SelectOption> {
        select_options(self.genres())
    }

    pub fn author_options_with_all(&self) -> Vec<SelectOption> {
        options_with_all("All Authors", self.authors())
    }

    pub fn genre_options_with_all(&self) -> Vec<SelectOption> {
        options_with_all("All Genres", self.genres())
    }

    // Books

    pub fn book_form(&self) -> &EditForm<BookFields> {
        &self.book_form
    }

    pub fn book_form_mut(&mut self) -> &mut EditForm<BookFields> {
        &mut self.book_form
    }

    pub fn open_add_book(&mut self) {
        self.book_form.open_add();
    }

    /// Open the book form seeded from a visible row. Returns false, leaving the
    /// form untouched, when no row has that id.
    pub fn open_edit_book(&mut self, id: &str) -> bool {
        match self.store.book_row(id) {
            Some(row) => {
                self.book_form.open_edit(BookFields::from_row(row));
                true
            }
            None => false,
        }
    }

    pub fn close_book_form(&mut self) {
        self.book_form.close();
    }

    pub fn save_book(&mut self) -> Result<MutationOutcome, CatalogError> {
        self.coordinator.save_book(&mut self.store, &mut self.book_form)
    }

    pub fn delete_book(&mut self, id: &str) -> Result<MutationOutcome, CatalogError> {
        self.coordinator.delete_book(&mut self.store, id)
    }

    // Authors

    pub fn author_form(&self) -> &EditForm<AuthorFields> {
        &self.author_form
    }

    pub fn author_form_mut(&mut self) -> &mut EditForm<AuthorFields> {
        &mut self.author_form
    }

    pub fn open_add_author(&mut self) {
        self.author_form.open_add();
    }

    pub fn open_edit_author(&mut self, id: &str) {
        let fields = AuthorInput::for_edit(id, self.store.authors().get(id));
        self.author_form.open_edit(fields);
    }

    pub fn close_author_form(&mut self) {
        self.author_form.close();
    }

    pub fn save_author(&mut self) -> Result<MutationOutcome, CatalogError> {
        self.coordinator.save_author(&mut self.store, &mut self.author_form)
    }

    pub fn delete_author(&mut self, id: &str) -> Result<MutationOutcome, CatalogError> {
        self.coordinator.delete_author(&mut self.store, id)
    }

    // Genres

    pub fn genre_form(&self) -> &EditForm<GenreFields> {
        &self.genre_form
    }

    pub fn genre_form_mut(&mut self) -> &mut EditForm<GenreFields> {
        &mut self.genre_form
    }

    pub fn open_add_genre(&mut self) {
        self.genre_form.open_add();
    }

    pub fn open_edit_genre(&mut self, id: &str) {
        let fields = GenreInput::for_edit(id, self.store.genres().get(id));
        self.genre_form.open_edit(fields);
    }

    pub fn close_genre_form(&mut self) {
        self.genre_form.close();
    }

    pub fn save_genre(&mut self) -> Result<MutationOutcome, CatalogError> {
        self.coordinator.save_genre(&mut self.store, &mut self.genre_form)
    }

    pub fn delete_genre(&mut self, id: &str) -> Result<MutationOutcome, CatalogError> {
        self.coordinator.delete_genre(&mut self.store, id)
    }
}

impl<S, N> LibraryManager<S, N>
where
    S: RecordQueryService + RecordMutationService + ExportService,
    N: Notifier,
{
    /// Export the catalog as a downloadable CSV. Any failure is reported once
    /// with the configured export-failure message; nothing is retried.
    pub fn export_books(&self) -> Result<ExportedFile, CatalogError> {
        let config = self.coordinator.config();
        let notifier = self.coordinator.notifier();

        let exported = self
            .coordinator
            .service()
            .export_books_csv()
            .map_err(CatalogError::Export)
            .and_then(|payload| {
                ExportedFile::from_base64(
                    config.export_file_name.as_str(),
                    config.export_mime_type.as_str(),
                    &payload,
                )
            });

        match &exported {
            Ok(file) => {
                log::info!("exported {} ({} bytes)", file.file_name, file.bytes.len());
                notifier.notify(Notification::success(
                    "Success",
                    config.export_success_message.as_str(),
                ));
            }
            Err(err) => {
                log::warn!("book export failed: {}", err);
                notifier.notify(Notification::error(config.export_failed_message.as_str()));
            }
        }
        exported
    }
}
