// src/domain/amenities.rs
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::resource::{fields, EntityId, Resource};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Amenity {
    pub id: EntityId,
    pub name: String,
    pub description: Option<String>,
    pub capacity: Option<i32>,
    pub requires_approval: bool,
    pub is_active: bool,
}

/// Opening hours of an amenity for one weekday (0 = Monday)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmenitySchedule {
    pub id: EntityId,
    pub amenity: Option<EntityId>,
    pub amenity_name: Option<String>,
    pub weekday: i32,
    /// `HH:MM[:SS]` as sent by the backend
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmenityRate {
    pub id: EntityId,
    pub amenity: Option<EntityId>,
    pub amenity_name: Option<String>,
    pub name: String,
    pub amount: Option<Decimal>,
    pub per_hour: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmenityReservation {
    pub id: EntityId,
    pub amenity: Option<EntityId>,
    pub amenity_name: Option<String>,
    pub unit: Option<EntityId>,
    pub unit_number: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

impl Resource for Amenity {
    const NAME: &'static str = "Amenity";
    const ENDPOINT: &'static str = "amenities";

    fn id(&self) -> EntityId {
        self.id
    }

    fn search_text(&self) -> Vec<String> {
        fields([Some(self.name.as_str()), self.description.as_deref()])
    }
}

impl Resource for AmenitySchedule {
    const NAME: &'static str = "Amenity schedule";
    const ENDPOINT: &'static str = "amenity-schedules";

    fn id(&self) -> EntityId {
        self.id
    }

    fn search_text(&self) -> Vec<String> {
        fields([self.amenity_name.as_deref()])
    }
}

impl Resource for AmenityRate {
    const NAME: &'static str = "Amenity rate";
    const ENDPOINT: &'static str = "amenity-rates";

    fn id(&self) -> EntityId {
        self.id
    }

    fn search_text(&self) -> Vec<String> {
        fields([Some(self.name.as_str()), self.amenity_name.as_deref()])
    }
}

impl Resource for AmenityReservation {
    const NAME: &'static str = "Reservation";
    const ENDPOINT: &'static str = "amenity-reservations";

    fn id(&self) -> EntityId {
        self.id
    }

    fn search_text(&self) -> Vec<String> {
        fields([
            self.amenity_name.as_deref(),
            self.unit_number.as_deref(),
            self.status.as_deref(),
        ])
    }
}
