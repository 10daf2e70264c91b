//! Filtered views over a fetched snapshot.
//!
//! A `FilteredView` keeps the full snapshot and the rows currently visible.
//! The visible rows are only ever written by `recompute`, which re-derives
//! them from the snapshot and the active predicate.

use serde::{Deserialize, Serialize};

use crate::projection::BookRow;

/// Boolean test deciding whether a row is visible.
pub trait Predicate<T> {
    fn matches(&self, item: &T) -> bool;
}

/// Active book filters. `None` or an empty id means no constraint on that
/// dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub author_id: Option<String>,
    pub genre_id: Option<String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` and `""` both clear the author constraint.
    pub fn set_author(&mut self, author_id: Option<&str>) {
        self.author_id = normalize(author_id);
    }

    /// `None` and `""` both clear the genre constraint.
    pub fn set_genre(&mut self, genre_id: Option<&str>) {
        self.genre_id = normalize(genre_id);
    }

    pub fn is_unconstrained(&self) -> bool {
        active(&self.author_id).is_none() && active(&self.genre_id).is_none()
    }
}

/// The id a filter dimension constrains on, if any.
fn active(id: &Option<String>) -> Option<&str> {
    id.as_deref().filter(|id| !id.is_empty())
}

fn normalize(id: Option<&str>) -> Option<String> {
    id.filter(|id| !id.is_empty()).map(str::to_string)
}

impl Predicate<BookRow> for FilterState {
    fn matches(&self, book: &BookRow) -> bool {
        let author_match = match active(&self.author_id) {
            Some(author_id) => book.author_id.as_deref() == Some(author_id),
            None => true,
        };
        let genre_match = match active(&self.genre_id) {
            Some(genre_id) => book.has_genre(genre_id),
            None => true,
        };
        author_match && genre_match
    }
}

/// A snapshot plus the subset of it the predicate admits, in snapshot order.
#[derive(Debug, Clone)]
pub struct FilteredView<T, P> {
    original: Vec<T>,
    visible: Vec<T>,
    predicate: P,
}

impl<T, P> Default for FilteredView<T, P>
where
    T: Clone,
    P: Predicate<T> + Default,
{
    fn default() -> Self {
        Self::new(P::default())
    }
}

impl<T, P> FilteredView<T, P>
where
    T: Clone,
    P: Predicate<T>,
{
    pub fn new(predicate: P) -> Self {
        Self {
            original: Vec::new(),
            visible: Vec::new(),
            predicate,
        }
    }

    /// Full unfiltered snapshot.
    pub fn original(&self) -> &[T] {
        &self.original
    }

    /// Rows admitted by the current predicate.
    pub fn visible(&self) -> &[T] {
        &self.visible
    }

    pub fn predicate(&self) -> &P {
        &self.predicate
    }

    /// Replace the snapshot and re-apply the current predicate.
    pub fn replace_original(&mut self, rows: Vec<T>) {
        self.original = rows;
        self.recompute();
    }

    /// Change the predicate in place, then recompute.
    pub fn update_predicate(&mut self, update: impl FnOnce(&mut P)) {
        update(&mut self.predicate);
        self.recompute();
    }

    fn recompute(&mut self) {
        self.visible = self
            .original
            .iter()
            .filter(|item| self.predicate.matches(item))
            .cloned()
            .collect();
    }
}

impl FilteredView<BookRow, FilterState> {
    pub fn set_author_filter(&mut self, author_id: Option<&str>) {
        self.update_predicate(|state| state.set_author(author_id));
    }

    pub fn set_genre_filter(&mut self, genre_id: Option<&str>) {
        self.update_predicate(|state| state.set_genre(genre_id));
    }

    pub fn filter_state(&self) -> &FilterState {
        &self.predicate
    }
}
