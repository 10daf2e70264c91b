//! Entity Store - Authoritative last-fetched collections.
//!
//! The store is the only write target for fetched data. Book display rows and
//! the filtered view are derived from the raw books on every `set_books`, so
//! denormalized names never outlive the fetch they came from.
//!
//! ## Example
//!
//! ```ignore
//! use catalog_sync::EntityStore;
//!
//! let mut store = EntityStore::new();
//! store.set_authors(query.list_authors()?);
//! store.set_books(query.list_books()?);
//!
//! store.set_author_filter(Some("a-1"));
//! for row in store.books() { /* render */ }
//! ```

mod collection;

use crate::filter::{FilterState, FilteredView};
use crate::projection::{project_all, BookRow};
use crate::record::{Author, EntityKind, Genre, RawBook};

pub use collection::Collection;

#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    authors: Collection<Author>,
    genres: Collection<Genre>,
    raw_books: Collection<RawBook>,
    book_view: FilteredView<BookRow, FilterState>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_authors(&mut self, authors: Vec<Author>) {
        self.authors.replace(authors);
    }

    pub fn set_genres(&mut self, genres: Vec<Genre>) {
        self.genres.replace(genres);
    }

    /// Replace the books, re-project display rows and re-apply the filters.
    pub fn set_books(&mut self, raw_books: Vec<RawBook>) {
        let rows = project_all(&raw_books);
        self.raw_books.replace(raw_books);
        self.book_view.replace_original(rows);
    }

    pub fn authors(&self) -> &Collection<Author> {
        &self.authors
    }

    pub fn genres(&self) -> &Collection<Genre> {
        &self.genres
    }

    pub fn raw_books(&self) -> &Collection<RawBook> {
        &self.raw_books
    }

    /// Every book row from the last fetch, unfiltered.
    pub fn original_books(&self) -> &[BookRow] {
        self.book_view.original()
    }

    /// Book rows admitted by the active filters.
    pub fn books(&self) -> &[BookRow] {
        self.book_view.visible()
    }

    pub fn book_row(&self, id: &str) -> Option<&BookRow> {
        self.book_view.original().iter().find(|row| row.id == id)
    }

    pub fn filter_state(&self) -> &FilterState {
        self.book_view.filter_state()
    }

    pub fn set_author_filter(&mut self, author_id: Option<&str>) {
        self.book_view.set_author_filter(author_id);
    }

    pub fn set_genre_filter(&mut self, genre_id: Option<&str>) {
        self.book_view.set_genre_filter(genre_id);
    }

    /// Successful refreshes applied to the given collection.
    pub fn generation(&self, kind: EntityKind) -> u64 {
        match kind {
            EntityKind::Author => self.authors.generation(),
            EntityKind::Genre => self.genres.generation(),
            EntityKind::Book => self.raw_books.generation(),
        }
    }
}
