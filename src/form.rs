//! Transient edit-form state. Nothing here is committed data: a form only
//! feeds a mutation and is closed once that mutation succeeds.

use crate::projection::BookRow;
use crate::record::{Author, AuthorInput, BookInput, EntityKind, Genre, GenreInput};

/// Field values a form edits for one entity kind.
pub trait FormFields: Default + Clone {
    const KIND: EntityKind;
}

pub type AuthorFields = AuthorInput;
pub type GenreFields = GenreInput;

impl FormFields for AuthorInput {
    const KIND: EntityKind = EntityKind::Author;
}

impl FormFields for GenreInput {
    const KIND: EntityKind = EntityKind::Genre;
}

impl AuthorInput {
    /// Seed from a stored author; a missing author leaves the name empty.
    pub fn for_edit(id: &str, author: Option<&Author>) -> Self {
        Self {
            id: Some(id.to_string()),
            name: author.map(|a| a.name.clone()).unwrap_or_default(),
        }
    }
}

impl GenreInput {
    /// Seed from a stored genre; a missing genre leaves the name empty.
    pub fn for_edit(id: &str, genre: Option<&Genre>) -> Self {
        Self {
            id: Some(id.to_string()),
            name: genre.map(|g| g.name.clone()).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFields {
    pub id: Option<String>,
    pub name: String,
    pub author_id: Option<String>,
    pub publication_year: Option<i32>,
    pub genre_ids: Vec<String>,
}

impl FormFields for BookFields {
    const KIND: EntityKind = EntityKind::Book;
}

impl BookFields {
    pub fn from_row(row: &BookRow) -> Self {
        Self {
            id: Some(row.id.clone()),
            name: row.name.clone(),
            author_id: row.author_id.clone(),
            publication_year: row.publication_year,
            genre_ids: row.genre_ids.clone(),
        }
    }

    /// Split into the book record and its genre membership.
    pub fn to_input(&self) -> (BookInput, Vec<String>) {
        let input = BookInput {
            id: self.id.clone(),
            name: self.name.clone(),
            author_id: self.author_id.clone().filter(|id| !id.is_empty()),
            publication_year: self.publication_year,
        };
        (input, self.genre_ids.clone())
    }
}

/// A modal edit form: open flag, title and the fields being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditForm<F> {
    open: bool,
    title: String,
    fields: F,
}

impl<F: FormFields> Default for EditForm<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FormFields> EditForm<F> {
    pub fn new() -> Self {
        Self {
            open: false,
            title: format!("Add {}", F::KIND),
            fields: F::default(),
        }
    }

    /// Open blank, for creating a record.
    pub fn open_add(&mut self) {
        self.title = format!("Add {}", F::KIND);
        self.fields = F::default();
        self.open = true;
    }

    /// Open pre-filled, for updating an existing record.
    pub fn open_edit(&mut self, fields: F) {
        self.title = format!("Edit {}", F::KIND);
        self.fields = fields;
        self.open = true;
    }

    /// Close without touching the field values.
    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn fields(&self) -> &F {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut F {
        &mut self.fields
    }
}
