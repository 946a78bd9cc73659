// src/crud/mod.rs

pub mod pagination;
pub mod store;

pub use pagination::Pagination;
pub use store::CrudStore;
