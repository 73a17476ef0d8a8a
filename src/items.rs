//! Item values and the process-wide shared list.
//!
//! # Design Decisions
//! - Submissions are never validated: empty strings and absent form fields
//!   are stored like any other value
//! - The shared list is an explicit state object handed to handlers, not a
//!   global; appends and reads are serialized by a lock

use std::fmt;
use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};

/// One submitted value. `None` marks a POST that carried no `item` field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Item(Option<String>);

impl Item {
    pub fn new(value: impl Into<String>) -> Self {
        Self(Some(value.into()))
    }

    /// The marker stored when the form field was absent.
    pub fn missing() -> Self {
        Self(None)
    }

    pub fn as_str(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn is_missing(&self) -> bool {
        self.0.is_none()
    }
}

impl From<Option<String>> for Item {
    fn from(value: Option<String>) -> Self {
        Self(value)
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str().unwrap_or("None"))
    }
}

/// Ordered list shared by every client for the lifetime of the process.
#[derive(Debug, Default)]
pub struct SharedItemList {
    items: RwLock<Vec<Item>>,
}

impl SharedItemList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item, returning the new length.
    pub fn push(&self, item: Item) -> usize {
        // A Vec push cannot leave the list half-written, so a poisoned lock
        // still guards consistent data.
        let mut items = self.items.write().unwrap_or_else(PoisonError::into_inner);
        items.push(item);
        items.len()
    }

    /// Copy of the current contents, in insertion order.
    pub fn snapshot(&self) -> Vec<Item> {
        self.items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.items.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
