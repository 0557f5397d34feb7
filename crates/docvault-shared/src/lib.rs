//! # docvault-shared
//!
//! Types and constants shared by every DocVault crate: the persisted data
//! model ([`types::AppState`] and its parts), the default category set, and
//! the rule that maps a free-form category label onto a known category.

pub mod constants;
pub mod matching;
pub mod types;

pub use types::{AppState, Category, Document, User};
