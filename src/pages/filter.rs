// src/pages/filter.rs
use crate::domain::Resource;

/// Case-insensitive substring match over display fields.
/// A blank query matches everything.
pub fn matches_query(fields: &[String], query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    fields
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

pub fn filter_rows<'a, T: Resource>(rows: &'a [T], query: &str) -> Vec<&'a T> {
    rows.iter()
        .filter(|row| matches_query(&row.search_text(), query))
        .collect()
}
