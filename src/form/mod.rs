// src/form/mod.rs

pub mod state;
pub mod value;

pub use state::FormState;
pub use value::{values_from_record, ChangeEvent, FieldValue, FileAttachment, FormValues, InputType};
