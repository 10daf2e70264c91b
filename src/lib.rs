//! Client-side synchronized list cache for a books / authors / genres catalog.
//!
//! Collections are fetched wholesale from a remote record service, books are
//! denormalized into display rows, and the visible rows are always a pure
//! function of the last fetched rows plus the active filters. Mutations go
//! through a coordinator that refreshes every collection a write invalidates.

extern crate self as catalog_sync;

mod config;
mod coordinator;
mod error;
mod export;
mod filter;
mod form;
mod invalidation;
mod manager;
mod notify;
mod options;
mod projection;
mod record;
mod service;
mod store;

pub use catalog_sync_macros::Record;
pub use config::ManagerConfig;
pub use coordinator::{MutationCoordinator, MutationOutcome};
pub use error::{CatalogError, ErrorBody, ServiceError};
pub use export::ExportedFile;
pub use filter::{FilterState, FilteredView, Predicate};
pub use form::{AuthorFields, BookFields, EditForm, FormFields, GenreFields};
pub use invalidation::invalidated_by;
pub use manager::LibraryManager;
pub use notify::{BufferNotifier, LogNotifier, Notification, Notifier, Variant};
#[cfg(feature = "emitter")]
pub use notify::EmitterNotifier;
pub use options::{options_with_all, select_options, Labeled, SelectOption};
pub use projection::{project, project_all, BookRow, ReferenceIndex, GENRE_SEPARATOR};
pub use record::{
    Author, AuthorInput, BookGenreLink, BookInput, EntityKind, Genre, GenreInput, RawBook, Record,
};
pub use service::{
    ExportService, InMemoryLibraryService, Operation, RecordMutationService, RecordQueryService,
};
pub use store::{Collection, EntityStore};
