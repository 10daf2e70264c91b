//! Records exchanged with the remote record service.
//!
//! Fetched records always carry an id. Mutation inputs carry an optional id:
//! `None` asks the service to create, `Some` to update.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fmt;

/// Trait for records held in an id-indexed collection.
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// The collection name for this record type (e.g., "authors", "books").
    const COLLECTION: &'static str;

    /// Returns the unique identifier for this record.
    fn id(&self) -> &str;
}

/// The three kinds of entity managed by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Author,
    Genre,
    Book,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [EntityKind::Author, EntityKind::Genre, EntityKind::Book];

    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Author => "Author",
            EntityKind::Genre => "Genre",
            EntityKind::Book => "Book",
        }
    }

    /// Name of the collection a refresh of this kind replaces.
    pub fn collection(&self) -> &'static str {
        match self {
            EntityKind::Author => Author::COLLECTION,
            EntityKind::Genre => Genre::COLLECTION,
            EntityKind::Book => RawBook::COLLECTION,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, catalog_sync_macros::Record)]
pub struct Author {
    pub id: String,
    pub name: String,
}

impl Author {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, catalog_sync_macros::Record)]
pub struct Genre {
    pub id: String,
    pub name: String,
}

impl Genre {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Join row relating one book to one genre.
///
/// `genre` is the genre as the service resolved it when the book was fetched;
/// it is `None` when the link points at a genre that no longer resolves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookGenreLink {
    pub genre_id: String,
    #[serde(default)]
    pub genre: Option<Genre>,
}

impl BookGenreLink {
    pub fn resolved(genre: Genre) -> Self {
        Self {
            genre_id: genre.id.clone(),
            genre: Some(genre),
        }
    }

    pub fn dangling(genre_id: impl Into<String>) -> Self {
        Self {
            genre_id: genre_id.into(),
            genre: None,
        }
    }
}

/// A book as returned by the query service, with nested references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, catalog_sync_macros::Record)]
#[record(collection = "books")]
pub struct RawBook {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub publication_year: Option<i32>,
    #[serde(default)]
    pub author_id: Option<String>,
    #[serde(default)]
    pub author: Option<Author>,
    #[serde(default)]
    pub genre_links: Vec<BookGenreLink>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorInput {
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreInput {
    pub id: Option<String>,
    pub name: String,
}

/// Book fields written by an upsert. Genre membership travels separately.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookInput {
    pub id: Option<String>,
    pub name: String,
    pub author_id: Option<String>,
    pub publication_year: Option<i32>,
}
