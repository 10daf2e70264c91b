//! InMemoryLibraryService - Vec-backed record service for testing and development.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, RwLock, RwLockWriteGuard};

use super::{ExportService, RecordMutationService, RecordQueryService};
use crate::error::ServiceError;
use crate::record::{Author, AuthorInput, BookGenreLink, BookInput, Genre, GenreInput, RawBook};

const CSV_HEADER: &str = "Name,Author,Publication Year,Genres";

/// Every call the service accepts, for failure injection and call counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ListAuthors,
    ListGenres,
    ListBooks,
    UpsertAuthor,
    UpsertGenre,
    UpsertBook,
    DeleteAuthor,
    DeleteGenre,
    DeleteBook,
    ExportBooks,
}

#[derive(Debug, Clone)]
struct StoredBook {
    id: String,
    name: String,
    author_id: Option<String>,
    publication_year: Option<i32>,
    genre_ids: Vec<String>,
}

#[derive(Default)]
struct LibraryState {
    authors: Vec<Author>,
    genres: Vec<Genre>,
    books: Vec<StoredBook>,
    next_id: u64,
    failures: HashMap<Operation, VecDeque<ServiceError>>,
    calls: HashMap<Operation, usize>,
}

impl LibraryState {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", prefix, self.next_id)
    }

    /// Count the call, then fail it if a failure was queued for it.
    fn enter(&mut self, op: Operation) -> Result<(), ServiceError> {
        *self.calls.entry(op).or_insert(0) += 1;
        match self.failures.get_mut(&op).and_then(VecDeque::pop_front) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn author(&self, id: &str) -> Option<&Author> {
        self.authors.iter().find(|a| a.id == id)
    }

    fn genre(&self, id: &str) -> Option<&Genre> {
        self.genres.iter().find(|g| g.id == id)
    }

    fn raw_book(&self, book: &StoredBook) -> RawBook {
        RawBook {
            id: book.id.clone(),
            name: book.name.clone(),
            publication_year: book.publication_year,
            author_id: book.author_id.clone(),
            author: book
                .author_id
                .as_deref()
                .and_then(|id| self.author(id))
                .cloned(),
            genre_links: book
                .genre_ids
                .iter()
                .map(|genre_id| BookGenreLink {
                    genre_id: genre_id.clone(),
                    genre: self.genre(genre_id).cloned(),
                })
                .collect(),
        }
    }

    fn write_author(&mut self, record: &AuthorInput) -> Result<String, ServiceError> {
        let name = required_name(&record.name)?;
        match &record.id {
            Some(id) => {
                let author = self
                    .authors
                    .iter_mut()
                    .find(|a| &a.id == id)
                    .ok_or_else(|| not_found(id))?;
                author.name = name;
                Ok(id.clone())
            }
            None => {
                let id = self.next_id("author");
                self.authors.push(Author::new(id.clone(), name));
                Ok(id)
            }
        }
    }

    fn write_genre(&mut self, record: &GenreInput) -> Result<String, ServiceError> {
        let name = required_name(&record.name)?;
        match &record.id {
            Some(id) => {
                let genre = self
                    .genres
                    .iter_mut()
                    .find(|g| &g.id == id)
                    .ok_or_else(|| not_found(id))?;
                genre.name = name;
                Ok(id.clone())
            }
            None => {
                let id = self.next_id("genre");
                self.genres.push(Genre::new(id.clone(), name));
                Ok(id)
            }
        }
    }

    fn write_book(
        &mut self,
        record: &BookInput,
        genre_ids: &[String],
    ) -> Result<String, ServiceError> {
        let name = required_name(&record.name)?;
        let author_id = record.author_id.clone().filter(|id| !id.is_empty());
        if let Some(author_id) = &author_id {
            if self.author(author_id).is_none() {
                return Err(ServiceError::server(format!(
                    "invalid cross reference id: {}",
                    author_id
                )));
            }
        }
        if let Some(missing) = genre_ids.iter().find(|id| self.genre(id).is_none()) {
            return Err(ServiceError::server(format!(
                "invalid cross reference id: {}",
                missing
            )));
        }

        let mut links: Vec<String> = Vec::with_capacity(genre_ids.len());
        for genre_id in genre_ids {
            if !links.contains(genre_id) {
                links.push(genre_id.clone());
            }
        }

        match &record.id {
            Some(id) => {
                let book = self
                    .books
                    .iter_mut()
                    .find(|b| &b.id == id)
                    .ok_or_else(|| not_found(id))?;
                book.name = name;
                book.author_id = author_id;
                book.publication_year = record.publication_year;
                book.genre_ids = links;
                Ok(id.clone())
            }
            None => {
                let id = self.next_id("book");
                self.books.push(StoredBook {
                    id: id.clone(),
                    name,
                    author_id,
                    publication_year: record.publication_year,
                    genre_ids: links,
                });
                Ok(id)
            }
        }
    }

    fn books_csv(&self) -> String {
        let mut csv = String::from(CSV_HEADER);
        csv.push('\n');
        for book in &self.books {
            let raw = self.raw_book(book);
            let author = raw.author.as_ref().map(|a| a.name.as_str()).unwrap_or("");
            let year = raw
                .publication_year
                .map(|y| y.to_string())
                .unwrap_or_default();
            let genres = raw
                .genre_links
                .iter()
                .filter_map(|link| link.genre.as_ref().map(|g| g.name.as_str()))
                .collect::<Vec<_>>()
                .join(", ");

            let fields = [
                csv_field(&raw.name),
                csv_field(author),
                csv_field(&year),
                csv_field(&genres),
            ];
            csv.push_str(&fields.join(","));
            csv.push('\n');
        }
        csv
    }
}

fn required_name(name: &str) -> Result<String, ServiceError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::server("Required fields are missing: [Name]"));
    }
    Ok(trimmed.to_string())
}

fn not_found(id: &str) -> ServiceError {
    ServiceError::server(format!("entity is deleted or does not exist: {}", id))
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// In-memory record service.
///
/// Clone-friendly via Arc: clones share the same records, queued failures and
/// call counters, so a test can keep a handle while the catalog owns another.
#[derive(Clone, Default)]
pub struct InMemoryLibraryService {
    state: Arc<RwLock<LibraryState>>,
}

impl InMemoryLibraryService {
    /// Create a new empty service.
    pub fn new() -> Self {
        Self::default()
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, LibraryState>, ServiceError> {
        self.state
            .write()
            .map_err(|_| ServiceError::transport("in-memory service lock poisoned"))
    }

    /// Make the next call to `op` fail with `error`. Queued failures are
    /// consumed in order, one per call.
    pub fn fail_next(&self, op: Operation, error: ServiceError) {
        if let Ok(mut state) = self.state.write() {
            state.failures.entry(op).or_default().push_back(error);
        }
    }

    /// Number of calls made to `op`, failed ones included.
    pub fn calls(&self, op: Operation) -> usize {
        self.state
            .read()
            .map(|state| state.calls.get(&op).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    /// Reset every call counter to zero.
    pub fn reset_calls(&self) {
        if let Ok(mut state) = self.state.write() {
            state.calls.clear();
        }
    }

    /// Insert an author without counting a call.
    pub fn seed_author(&self, name: &str) -> Result<String, ServiceError> {
        self.write()?.write_author(&AuthorInput {
            id: None,
            name: name.to_string(),
        })
    }

    /// Insert a genre without counting a call.
    pub fn seed_genre(&self, name: &str) -> Result<String, ServiceError> {
        self.write()?.write_genre(&GenreInput {
            id: None,
            name: name.to_string(),
        })
    }

    /// Insert a book without counting a call.
    pub fn seed_book(
        &self,
        name: &str,
        author_id: Option<&str>,
        publication_year: Option<i32>,
        genre_ids: &[&str],
    ) -> Result<String, ServiceError> {
        let genre_ids: Vec<String> = genre_ids.iter().map(|id| id.to_string()).collect();
        self.write()?.write_book(
            &BookInput {
                id: None,
                name: name.to_string(),
                author_id: author_id.map(str::to_string),
                publication_year,
            },
            &genre_ids,
        )
    }
}

impl RecordQueryService for InMemoryLibraryService {
    fn list_authors(&self) -> Result<Vec<Author>, ServiceError> {
        let mut state = self.write()?;
        state.enter(Operation::ListAuthors)?;
        Ok(state.authors.clone())
    }

    fn list_genres(&self) -> Result<Vec<Genre>, ServiceError> {
        let mut state = self.write()?;
        state.enter(Operation::ListGenres)?;
        Ok(state.genres.clone())
    }

    fn list_books(&self) -> Result<Vec<RawBook>, ServiceError> {
        let mut state = self.write()?;
        state.enter(Operation::ListBooks)?;
        Ok(state.books.iter().map(|book| state.raw_book(book)).collect())
    }
}

impl RecordMutationService for InMemoryLibraryService {
    fn upsert_author(&self, record: &AuthorInput) -> Result<String, ServiceError> {
        let mut state = self.write()?;
        state.enter(Operation::UpsertAuthor)?;
        state.write_author(record)
    }

    fn upsert_genre(&self, record: &GenreInput) -> Result<String, ServiceError> {
        let mut state = self.write()?;
        state.enter(Operation::UpsertGenre)?;
        state.write_genre(record)
    }

    fn upsert_book(
        &self,
        record: &BookInput,
        genre_ids: &[String],
    ) -> Result<String, ServiceError> {
        let mut state = self.write()?;
        state.enter(Operation::UpsertBook)?;
        state.write_book(record, genre_ids)
    }

    /// Books keep their author id, which then no longer resolves.
    fn delete_author(&self, id: &str) -> Result<(), ServiceError> {
        let mut state = self.write()?;
        state.enter(Operation::DeleteAuthor)?;
        let before = state.authors.len();
        state.authors.retain(|a| a.id != id);
        if state.authors.len() == before {
            return Err(not_found(id));
        }
        Ok(())
    }

    /// Genre links to the deleted genre are removed with it.
    fn delete_genre(&self, id: &str) -> Result<(), ServiceError> {
        let mut state = self.write()?;
        state.enter(Operation::DeleteGenre)?;
        let before = state.genres.len();
        state.genres.retain(|g| g.id != id);
        if state.genres.len() == before {
            return Err(not_found(id));
        }
        for book in state.books.iter_mut() {
            book.genre_ids.retain(|genre_id| genre_id != id);
        }
        Ok(())
    }

    fn delete_book(&self, id: &str) -> Result<(), ServiceError> {
        let mut state = self.write()?;
        state.enter(Operation::DeleteBook)?;
        let before = state.books.len();
        state.books.retain(|b| b.id != id);
        if state.books.len() == before {
            return Err(not_found(id));
        }
        Ok(())
    }
}

impl ExportService for InMemoryLibraryService {
    fn export_books_csv(&self) -> Result<String, ServiceError> {
        let mut state = self.write()?;
        state.enter(Operation::ExportBooks)?;
        Ok(STANDARD.encode(state.books_csv()))
    }
}
