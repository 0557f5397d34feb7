//! Read-only projections of an [`AppState`] for rendering.
//!
//! Nothing here touches the vault; a front-end calls these on
//! [`crate::Vault::snapshot`] output whenever a [`crate::VaultEvent`] arrives.

use serde::Serialize;

use docvault_shared::constants::{DRIVE_VIEW_URL, UNKNOWN_CATEGORY_ICON};
use docvault_shared::{AppState, Document};

pub const ALL_DOCUMENTS_LABEL: &str = "All Documents";
pub const ALL_DOCUMENTS_ICON: &str = "📂";
pub const VAULT_HEADING: &str = "Your Vault";

/// One document as shown in the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentCard {
    pub id: String,
    pub title: String,
    /// `None` when the document's category no longer exists.
    pub category_name: Option<String>,
    pub icon: String,
    pub upload_date: String,
    /// Short file kind, e.g. `pdf` for `application/pdf`.
    pub file_kind: String,
    pub file_size: String,
    pub summary: String,
    pub drive_link: String,
}

/// One row of the category navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarEntry {
    /// `None` for the "All Documents" row.
    pub category_id: Option<String>,
    pub name: String,
    pub icon: String,
    pub active: bool,
}

/// The main content area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultView {
    pub heading: String,
    pub document_count: usize,
    pub cards: Vec<DocumentCard>,
}

pub fn drive_link(drive_file_id: &str) -> String {
    format!("{DRIVE_VIEW_URL}/{drive_file_id}/view")
}

/// `image/png` → `png`; a type without a subtype is returned whole.
pub fn file_kind(file_type: &str) -> &str {
    match file_type.split_once('/') {
        Some((_, sub)) if !sub.is_empty() => sub,
        _ => file_type,
    }
}

/// Documents in `active_category`, or all of them, in vault order.
pub fn filter_documents<'a>(state: &'a AppState, active_category: Option<&str>) -> Vec<&'a Document> {
    state
        .documents
        .iter()
        .filter(|d| active_category.map_or(true, |id| d.category_id == id))
        .collect()
}

pub fn document_card(state: &AppState, doc: &Document) -> DocumentCard {
    let category = state.category(&doc.category_id);
    DocumentCard {
        id: doc.id.clone(),
        title: doc.title.clone(),
        category_name: category.map(|c| c.name.clone()),
        icon: category.map_or_else(|| UNKNOWN_CATEGORY_ICON.to_string(), |c| c.icon.clone()),
        upload_date: doc.upload_date.clone(),
        file_kind: file_kind(&doc.file_type).to_string(),
        file_size: doc.file_size.clone(),
        summary: doc.summary.clone(),
        drive_link: drive_link(&doc.drive_file_id),
    }
}

pub fn vault_view(state: &AppState, active_category: Option<&str>) -> VaultView {
    let heading = active_category
        .and_then(|id| state.category(id))
        .map_or_else(|| VAULT_HEADING.to_string(), |c| c.name.clone());
    let cards: Vec<DocumentCard> = filter_documents(state, active_category)
        .into_iter()
        .map(|doc| document_card(state, doc))
        .collect();

    VaultView {
        heading,
        document_count: cards.len(),
        cards,
    }
}

pub fn sidebar(state: &AppState, active_category: Option<&str>) -> Vec<SidebarEntry> {
    let all = SidebarEntry {
        category_id: None,
        name: ALL_DOCUMENTS_LABEL.to_string(),
        icon: ALL_DOCUMENTS_ICON.to_string(),
        active: active_category.is_none(),
    };
    std::iter::once(all)
        .chain(state.categories.iter().map(|c| SidebarEntry {
            category_id: Some(c.id.clone()),
            name: c.name.clone(),
            icon: c.icon.clone(),
            active: active_category == Some(c.id.as_str()),
        }))
        .collect()
}
