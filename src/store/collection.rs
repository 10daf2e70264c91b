//! Collection - ordered, id-indexed snapshot of one fetched record type.

use std::collections::HashMap;

use crate::record::Record;

/// Last fetched records of one type, in fetch order, with an id index.
///
/// A collection is only ever replaced wholesale. `generation` counts
/// successful replacements and starts at 0 for a never-loaded collection.
#[derive(Debug, Clone)]
pub struct Collection<T> {
    items: Vec<T>,
    index: HashMap<String, usize>,
    generation: u64,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
            generation: 0,
        }
    }
}

impl<T: Record> Collection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every record. Entries from the previous fetch are discarded.
    pub fn replace(&mut self, items: Vec<T>) {
        // Later duplicates win the index slot, matching a plain map insert.
        self.index = items
            .iter()
            .enumerate()
            .map(|(pos, item)| (item.id().to_string(), pos))
            .collect();
        self.items = items;
        self.generation += 1;
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.index.get(id).and_then(|pos| self.items.get(*pos))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True once at least one fetch has been applied.
    pub fn is_loaded(&self) -> bool {
        self.generation > 0
    }
}
