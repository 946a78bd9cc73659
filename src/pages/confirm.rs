// src/pages/confirm.rs

/// Blocking yes/no question asked before destructive actions.
#[cfg_attr(test, mockall::automock)]
pub trait ConfirmPrompt: Send + Sync {
    fn confirm(&self, message: &str) -> bool;
}

pub fn delete_question(entity: &str) -> String {
    format!("Are you sure you want to delete this {}?", entity.to_lowercase())
}
