//! Document Store
//!
//! The working copy of one analysis result. Every mutation is synchronous,
//! local and total: an unknown id is a no-op, never an error.

use crate::types::{Category, DetoxItem, DetoxResponse, Filter};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentStore {
    summary: String,
    items: Vec<DetoxItem>,
}

impl DocumentStore {
    /// Take a working copy of a model result
    pub fn load(response: &DetoxResponse) -> Self {
        Self {
            summary: response.summary.clone(),
            items: response.items.clone(),
        }
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn items(&self) -> &[DetoxItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&DetoxItem> {
        self.items.iter().find(|i| i.id == id)
    }

    fn get_mut(&mut self, id: i64) -> Option<&mut DetoxItem> {
        self.items.iter_mut().find(|i| i.id == id)
    }

    /// Remove an item. Returns false if the id was not present.
    pub fn delete(&mut self, id: i64) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.id != id);
        self.items.len() != before
    }

    /// Move an item to ARCHIVE whatever its category was
    pub fn archive(&mut self, id: i64) -> bool {
        match self.get_mut(id) {
            Some(item) => {
                item.category = Category::Archive;
                true
            }
            None => false,
        }
    }

    /// Flip the paid flag of an ACTION item
    ///
    /// Other categories are left untouched and false is returned.
    pub fn toggle_paid(&mut self, id: i64) -> bool {
        match self.get_mut(id) {
            Some(item) if item.category == Category::Action => {
                item.is_paid = !item.is_paid;
                true
            }
            _ => false,
        }
    }

    /// Read-side projection, in stored order
    pub fn filter(&self, filter: Filter) -> Vec<&DetoxItem> {
        self.items.iter().filter(|i| filter.matches(i)).collect()
    }

    /// Snapshot of the working copy, e.g. for saving
    pub fn to_response(&self) -> DetoxResponse {
        DetoxResponse {
            summary: self.summary.clone(),
            items: self.items.clone(),
        }
    }
}
