//! Client-held session state.
//!
//! # Data Flow
//! ```text
//! Cookie header
//!     → cookie.rs (signed jar verifies the session cookie)
//!     → payload.rs (decode JSON payload)
//!     → SessionData handed to the handler
//!
//! Handler produces a new SessionData
//!     → payload.rs (encode)
//!     → cookie.rs (sign, Set-Cookie on the response)
//! ```
//!
//! # Design Decisions
//! - Session values are immutable; a mutation builds a new value that is
//!   always written back, so there is no "modified" flag to forget
//! - An unreadable cookie (tampered, wrong key, garbage) starts a fresh
//!   session instead of failing the request

pub mod cookie;
pub mod payload;

use serde::{Deserialize, Serialize};

use crate::items::Item;

pub use cookie::{Session, SessionManager, SetSession};
pub use payload::PayloadError;

/// Everything stored in one client's session cookie.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionData {
    #[serde(default)]
    items: Vec<Item>,
}

impl SessionData {
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// A copy of this session with `item` appended.
    #[must_use]
    pub fn with_item(&self, item: Item) -> Self {
        let mut items = Vec::with_capacity(self.items.len() + 1);
        items.extend_from_slice(&self.items);
        items.push(item);
        Self { items }
    }
}

impl From<Vec<Item>> for SessionData {
    fn from(items: Vec<Item>) -> Self {
        Self { items }
    }
}
