// src/api/mod.rs
//
// HTTP service layer
//
// - `client`: shared reqwest client bound to the API root
// - `service`: the get_all / get_by_id / create / update / delete surface
// - `envelope`: list params and bare-array / page-envelope responses
// - `body`: JSON and multipart request bodies
// - `attendance`: face-recognition attendance endpoint

pub mod attendance;
pub mod body;
pub mod client;
pub mod envelope;
pub mod service;

#[cfg(test)]
pub(crate) mod memory;

pub use attendance::FaceAttendanceClient;
pub use body::{FilePart, MultipartPayload, RequestBody};
pub use client::ApiClient;
pub use envelope::{ListParams, ListResponse, PageEnvelope};
pub use service::{CrudService, RestService, ServiceFactory};
