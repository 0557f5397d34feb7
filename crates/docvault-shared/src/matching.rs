//! Mapping a free-form category label (as returned by content analysis) onto
//! one of the vault's categories.
//!
//! Resolution runs in three steps:
//!
//! 1. Case-insensitive substring containment in either direction against the
//!    category names, first match in list order wins.
//! 2. A fixed alias table for labels that share no substring with the
//!    default category names (`Medical` → `Health`).
//! 3. The last category, which by convention is the catch-all.
//!
//! Step 1 happily matches short names: a category called `ID` matches any
//! label containing "id".

use crate::types::Category;

/// Lower-case label fragments and the category name they map to.
const ALIASES: &[(&str, &str)] = &[
    ("medical", "Health"),
    ("medicine", "Health"),
    ("clinic", "Health"),
    ("hospital", "Health"),
    ("prescription", "Health"),
    ("passport", "Personal ID"),
    ("identity", "Personal ID"),
    ("driver", "Personal ID"),
    ("school", "Education"),
    ("university", "Education"),
    ("diploma", "Education"),
    ("transcript", "Education"),
    ("bank", "Finance"),
    ("tax", "Finance"),
    ("invoice", "Finance"),
    ("receipt", "Finance"),
    ("payslip", "Employment"),
    ("salary", "Employment"),
    ("job", "Employment"),
    ("contract", "Legal"),
    ("court", "Legal"),
    ("lease", "Legal"),
];

/// First category whose name and `label` contain one another,
/// case-insensitively.
pub fn match_by_name<'a>(categories: &'a [Category], label: &str) -> Option<&'a Category> {
    let label = label.trim().to_lowercase();
    if label.is_empty() {
        return None;
    }
    categories.iter().find(|c| {
        let name = c.name.to_lowercase();
        !name.is_empty() && (name.contains(&label) || label.contains(&name))
    })
}

/// Category reached through the alias table, if the aliased name exists.
pub fn match_by_alias<'a>(categories: &'a [Category], label: &str) -> Option<&'a Category> {
    let label = label.trim().to_lowercase();
    if label.is_empty() {
        return None;
    }
    ALIASES
        .iter()
        .filter(|(fragment, _)| label.contains(fragment))
        .find_map(|(_, target)| {
            categories
                .iter()
                .find(|c| c.name.eq_ignore_ascii_case(target))
        })
}

/// Resolve `label` to a category, falling back to the last one.
///
/// Returns `None` only when `categories` is empty.
pub fn resolve_category<'a>(categories: &'a [Category], label: &str) -> Option<&'a Category> {
    match_by_name(categories, label)
        .or_else(|| match_by_alias(categories, label))
        .or_else(|| categories.last())
}
