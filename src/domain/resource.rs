// src/domain/resource.rs
//
// Backend resource contract
//
// Every record the backoffice manages is a plain mirror of a REST resource.
// Invariants live server-side; the client only needs to know where the
// resource lives, how to identify a record and which fields are searchable.

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Opaque backend identifier
pub type EntityId = i64;

pub trait Resource: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// Human-readable entity name used in notifications
    const NAME: &'static str;

    /// Path below the API root, without slashes at either end
    const ENDPOINT: &'static str;

    /// File-bearing resources are submitted as multipart form data
    const MULTIPART: bool = false;

    fn id(&self) -> EntityId;

    /// Display fields matched by the page search box
    fn search_text(&self) -> Vec<String>;
}

/// Collect present optional display fields
pub(crate) fn fields<const N: usize>(values: [Option<&str>; N]) -> Vec<String> {
    values.into_iter().flatten().map(str::to_string).collect()
}
