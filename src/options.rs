//! Picker options built from stored collections.

use serde::{Deserialize, Serialize};

use crate::record::{Author, Genre};

/// One entry of a select / combobox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Records that can be offered in a picker.
pub trait Labeled {
    fn label(&self) -> &str;
    fn value(&self) -> &str;
}

impl Labeled for Author {
    fn label(&self) -> &str {
        &self.name
    }
    fn value(&self) -> &str {
        &self.id
    }
}

impl Labeled for Genre {
    fn label(&self) -> &str {
        &self.name
    }
    fn value(&self) -> &str {
        &self.id
    }
}

/// `{label: name, value: id}` for each item, in collection order.
pub fn select_options<T: Labeled>(items: &[T]) -> Vec<SelectOption> {
    items
        .iter()
        .map(|item| SelectOption::new(item.label(), item.value()))
        .collect()
}

/// Same as `select_options`, led by an `all_label` entry whose value is empty,
/// which a filter reads as "no constraint".
pub fn options_with_all<T: Labeled>(all_label: &str, items: &[T]) -> Vec<SelectOption> {
    let mut options = Vec::with_capacity(items.len() + 1);
    options.push(SelectOption::new(all_label, ""));
    options.extend(select_options(items));
    options
}
