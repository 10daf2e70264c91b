//! Remote record services the catalog depends on.
//!
//! Three seams, each a trait so a real transport (HTTP, RPC, platform SDK)
//! can stand in for the bundled `InMemoryLibraryService`:
//!
//! - `RecordQueryService` lists whole collections.
//! - `RecordMutationService` creates, updates and deletes single records.
//! - `ExportService` renders the book catalog as a base64-encoded CSV.
//!
//! Every call either succeeds completely or returns a `ServiceError`; there
//! are no retries or timeouts at this layer.
//!
//! ## Example
//!
//! ```ignore
//! use catalog_sync::{InMemoryLibraryService, RecordQueryService, RecordMutationService};
//!
//! let service = InMemoryLibraryService::new();
//! let id = service.upsert_author(&AuthorInput { id: None, name: "Lem".into() })?;
//! let authors = service.list_authors()?;
//! ```

mod in_memory;

use crate::error::ServiceError;
use crate::record::{Author, AuthorInput, BookInput, Genre, GenreInput, RawBook};

pub use in_memory::{InMemoryLibraryService, Operation};

pub trait RecordQueryService {
    fn list_authors(&self) -> Result<Vec<Author>, ServiceError>;

    fn list_genres(&self) -> Result<Vec<Genre>, ServiceError>;

    /// Books with their author and genre links nested.
    fn list_books(&self) -> Result<Vec<RawBook>, ServiceError>;
}

/// Single-record writes. Upserts create when the input has no id and
/// update otherwise; they return the id of the written record.
pub trait RecordMutationService {
    fn upsert_author(&self, record: &AuthorInput) -> Result<String, ServiceError>;

    fn upsert_genre(&self, record: &GenreInput) -> Result<String, ServiceError>;

    /// Writes the book and replaces its genre links with `genre_ids`, in order.
    fn upsert_book(
        &self,
        record: &BookInput,
        genre_ids: &[String],
    ) -> Result<String, ServiceError>;

    fn delete_author(&self, id: &str) -> Result<(), ServiceError>;

    fn delete_genre(&self, id: &str) -> Result<(), ServiceError>;

    fn delete_book(&self, id: &str) -> Result<(), ServiceError>;
}

pub trait ExportService {
    /// The whole book catalog as CSV, base64-encoded.
    fn export_books_csv(&self) -> Result<String, ServiceError>;
}
