// src/domain/people.rs
use serde::{Deserialize, Serialize};

use super::resource::{fields, EntityId, Resource};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: EntityId,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub role: Option<EntityId>,
    /// Resolved by the backend
    pub role_name: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Role {
    pub id: EntityId,
    pub name: String,
    pub description: Option<String>,
    pub permissions: Vec<EntityId>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Permission {
    pub id: EntityId,
    pub code: String,
    pub name: String,
    pub module: Option<String>,
}

impl Resource for User {
    const NAME: &'static str = "User";
    const ENDPOINT: &'static str = "users";

    fn id(&self) -> EntityId {
        self.id
    }

    fn search_text(&self) -> Vec<String> {
        fields([
            Some(self.username.as_str()),
            Some(self.email.as_str()),
            Some(self.first_name.as_str()),
            Some(self.last_name.as_str()),
            self.role_name.as_deref(),
        ])
    }
}

impl Resource for Role {
    const NAME: &'static str = "Role";
    const ENDPOINT: &'static str = "roles";

    fn id(&self) -> EntityId {
        self.id
    }

    fn search_text(&self) -> Vec<String> {
        fields([Some(self.name.as_str()), self.description.as_deref()])
    }
}

impl Resource for Permission {
    const NAME: &'static str = "Permission";
    const ENDPOINT: &'static str = "permissions";

    fn id(&self) -> EntityId {
        self.id
    }

    fn search_text(&self) -> Vec<String> {
        fields([Some(self.code.as_str()), Some(self.name.as_str()), self.module.as_deref()])
    }
}
