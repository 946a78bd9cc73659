// src/domain/notices.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::resource::{fields, EntityId, Resource};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Notice {
    pub id: EntityId,
    pub title: String,
    pub body: String,
    pub audience: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    /// URL of the uploaded attachment
    pub attachment: Option<String>,
    pub is_published: bool,
}

impl Resource for Notice {
    const NAME: &'static str = "Notice";
    const ENDPOINT: &'static str = "notices";
    const MULTIPART: bool = true;

    fn id(&self) -> EntityId {
        self.id
    }

    fn search_text(&self) -> Vec<String> {
        fields([
            Some(self.title.as_str()),
            Some(self.body.as_str()),
            self.audience.as_deref(),
        ])
    }
}
