//! The vault data model.
//!
//! Field names serialize in camelCase so a snapshot has the same JSON shape
//! the web front-end reads and writes.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CATEGORIES, DEMO_USER_AVATAR, DEMO_USER_EMAIL, DEMO_USER_ID, DEMO_USER_NAME,
};
use crate::matching;

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// A bucket documents are sorted into. Never edited once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Stable identifier, never reused.
    pub id: String,
    /// Display label; also what analysis results are matched against.
    pub name: String,
    /// Single glyph shown next to the name.
    pub icon: String,
    /// Display color token.
    pub color: String,
}

impl Category {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        icon: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: icon.into(),
            color: color.into(),
        }
    }
}

/// The categories a fresh vault is seeded with. The last one is the
/// catch-all.
pub fn default_categories() -> Vec<Category> {
    DEFAULT_CATEGORIES
        .iter()
        .map(|(id, name, icon, color)| Category::new(*id, *name, *icon, *color))
        .collect()
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// A file recorded in the vault.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub title: String,
    /// Id of the owning [`Category`]. Not enforced; may dangle.
    pub category_id: String,
    /// Display date, e.g. `Oct 18, 2026`.
    pub upload_date: String,
    /// MIME type reported for the file.
    pub file_type: String,
    /// Display size, e.g. `12.3 KB`. Derived once from the raw byte count.
    pub file_size: String,
    pub summary: String,
    /// Opaque reference returned by the upload service.
    pub drive_file_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// The signed-in account. There is at most one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Avatar image URL.
    pub avatar: String,
    pub is_logged_in: bool,
}

impl User {
    /// The fixed identity produced by the simulated login.
    pub fn demo() -> Self {
        Self {
            id: DEMO_USER_ID.to_string(),
            name: DEMO_USER_NAME.to_string(),
            email: DEMO_USER_EMAIL.to_string(),
            avatar: DEMO_USER_AVATAR.to_string(),
            is_logged_in: true,
        }
    }
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// Root aggregate persisted as a single snapshot.
///
/// `documents` is kept newest first by the code that inserts into it; there
/// is no sort key, so a snapshot produced elsewhere keeps whatever order it
/// was written in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub categories: Vec<Category>,
    pub documents: Vec<Document>,
    pub user: Option<User>,
}

impl AppState {
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn document(&self, id: &str) -> Option<&Document> {
        self.documents.iter().find(|d| d.id == id)
    }

    /// The category a free-form label is filed under, or `None` only when
    /// there are no categories at all. See [`matching::resolve_category`].
    pub fn resolve_category(&self, label: &str) -> Option<&Category> {
        matching::resolve_category(&self.categories, label)
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.is_logged_in)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            documents: Vec::new(),
            user: None,
        }
    }
}
