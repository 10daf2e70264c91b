//! Projection - Flat display rows for books.
//!
//! A raw book references its author by id and its genres through join links.
//! Projection resolves those references into display names once per fetch, so
//! rendering a row never needs a lookup.
//!
//! ## Example
//!
//! ```ignore
//! use catalog_sync::{project_all, ReferenceIndex};
//!
//! let rows = project_all(&raw_books);
//! // or, row by row against an index built elsewhere:
//! let index = ReferenceIndex::from_books(&raw_books);
//! let row = project(&raw_books[0], &index);
//! ```
//!
//! Unresolved references are tolerated: a missing author leaves `author_name`
//! empty, and a link to a missing genre keeps its id in `genre_ids` but adds
//! nothing to `genre_names`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::record::{Author, Genre, RawBook};

/// Separator used when joining genre names.
pub const GENRE_SEPARATOR: &str = ", ";

/// A book as shown in the catalog table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRow {
    pub id: String,
    pub name: String,
    pub author_id: Option<String>,
    pub author_name: Option<String>,
    pub publication_year: Option<i32>,
    /// Resolved genre names joined with `", "`, in link order.
    pub genre_names: String,
    /// Every linked genre id, in link order, resolved or not.
    pub genre_ids: Vec<String>,
}

impl BookRow {
    pub fn has_genre(&self, genre_id: &str) -> bool {
        self.genre_ids.iter().any(|id| id == genre_id)
    }
}

/// id -> display name lookups for the references a projection resolves.
#[derive(Debug, Clone, Default)]
pub struct ReferenceIndex {
    authors: HashMap<String, String>,
    genres: HashMap<String, String>,
}

impl ReferenceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index the author and genre references nested in one book fetch.
    pub fn from_books(books: &[RawBook]) -> Self {
        let mut index = Self::new();
        for book in books {
            if let Some(author) = &book.author {
                index.insert_author(author);
            }
            for genre in book.genre_links.iter().filter_map(|link| link.genre.as_ref()) {
                index.insert_genre(genre);
            }
        }
        index
    }

    pub fn insert_author(&mut self, author: &Author) {
        self.authors.insert(author.id.clone(), author.name.clone());
    }

    pub fn insert_genre(&mut self, genre: &Genre) {
        self.genres.insert(genre.id.clone(), genre.name.clone());
    }

    pub fn author_name(&self, id: &str) -> Option<&str> {
        self.authors.get(id).map(String::as_str)
    }

    pub fn genre_name(&self, id: &str) -> Option<&str> {
        self.genres.get(id).map(String::as_str)
    }
}

/// Project one raw book into its display row.
pub fn project(raw: &RawBook, index: &ReferenceIndex) -> BookRow {
    let author_name = raw
        .author_id
        .as_deref()
        .and_then(|id| index.author_name(id))
        .map(str::to_string);

    let genre_ids: Vec<String> = raw
        .genre_links
        .iter()
        .map(|link| link.genre_id.clone())
        .collect();

    let genre_names = genre_ids
        .iter()
        .filter_map(|id| index.genre_name(id))
        .collect::<Vec<_>>()
        .join(GENRE_SEPARATOR);

    BookRow {
        id: raw.id.clone(),
        name: raw.name.clone(),
        author_id: raw.author_id.clone(),
        author_name,
        publication_year: raw.publication_year,
        genre_names,
        genre_ids,
    }
}

/// Project a whole fetch, preserving order.
pub fn project_all(raw_books: &[RawBook]) -> Vec<BookRow> {
    let index = ReferenceIndex::from_books(raw_books);
    raw_books.iter().map(|raw| project(raw, &index)).collect()
}
