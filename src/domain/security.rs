// src/domain/security.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::resource::{fields, EntityId, Resource};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Visitor {
    pub id: EntityId,
    pub full_name: String,
    pub document_number: Option<String>,
    pub unit: Option<EntityId>,
    pub unit_number: Option<String>,
    /// URL of the stored photo
    pub photo: Option<String>,
    pub visit_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessAuthorization {
    pub id: EntityId,
    pub visitor: Option<EntityId>,
    pub visitor_name: Option<String>,
    pub unit: Option<EntityId>,
    pub unit_number: Option<String>,
    pub valid_from: Option<DateTime<Utc>>,
    pub valid_to: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityIncident {
    pub id: EntityId,
    pub title: String,
    pub description: Option<String>,
    pub severity: Option<String>,
    pub occurred_at: Option<DateTime<Utc>>,
    pub reported_by_name: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceKind {
    CheckIn,
    CheckOut,
}

impl AttendanceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceKind::CheckIn => "check_in",
            AttendanceKind::CheckOut => "check_out",
        }
    }
}

/// Attendance entry produced by face recognition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaceAttendance {
    pub id: EntityId,
    pub person_name: Option<String>,
    /// `check_in` or `check_out`
    pub kind: String,
    pub recorded_at: Option<DateTime<Utc>>,
    pub confidence: Option<f64>,
    pub photo: Option<String>,
}

impl Resource for Visitor {
    const NAME: &'static str = "Visitor";
    const ENDPOINT: &'static str = "security/visitors";
    const MULTIPART: bool = true;

    fn id(&self) -> EntityId {
        self.id
    }

    fn search_text(&self) -> Vec<String> {
        fields([
            Some(self.full_name.as_str()),
            self.document_number.as_deref(),
            self.unit_number.as_deref(),
        ])
    }
}

impl Resource for AccessAuthorization {
    const NAME: &'static str = "Access authorization";
    const ENDPOINT: &'static str = "security/access-authorizations";

    fn id(&self) -> EntityId {
        self.id
    }

    fn search_text(&self) -> Vec<String> {
        fields([self.visitor_name.as_deref(), self.unit_number.as_deref()])
    }
}

impl Resource for SecurityIncident {
    const NAME: &'static str = "Security incident";
    const ENDPOINT: &'static str = "security/incidents";

    fn id(&self) -> EntityId {
        self.id
    }

    fn search_text(&self) -> Vec<String> {
        fields([
            Some(self.title.as_str()),
            self.severity.as_deref(),
            self.status.as_deref(),
            self.reported_by_name.as_deref(),
        ])
    }
}

impl Resource for FaceAttendance {
    const NAME: &'static str = "Attendance";
    const ENDPOINT: &'static str = "security/face-attendance";

    fn id(&self) -> EntityId {
        self.id
    }

    fn search_text(&self) -> Vec<String> {
        fields([self.person_name.as_deref(), Some(self.kind.as_str())])
    }
}
