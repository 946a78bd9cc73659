// src/domain/maintenance.rs
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::resource::{fields, EntityId, Resource};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Asset {
    pub id: EntityId,
    pub name: String,
    pub code: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub supplier: Option<EntityId>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreventivePlan {
    pub id: EntityId,
    pub asset: Option<EntityId>,
    pub asset_name: Option<String>,
    pub name: String,
    pub frequency_days: i32,
    pub next_due: Option<NaiveDate>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkOrder {
    pub id: EntityId,
    pub title: String,
    pub description: Option<String>,
    pub asset: Option<EntityId>,
    pub asset_name: Option<String>,
    pub plan: Option<EntityId>,
    pub supplier: Option<EntityId>,
    pub supplier_name: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub scheduled_for: Option<NaiveDate>,
    pub cost: Option<Decimal>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Supplier {
    pub id: EntityId,
    pub name: String,
    pub tax_id: Option<String>,
    pub contact_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl Resource for Asset {
    const NAME: &'static str = "Asset";
    const ENDPOINT: &'static str = "maintenance/assets";

    fn id(&self) -> EntityId {
        self.id
    }

    fn search_text(&self) -> Vec<String> {
        fields([
            Some(self.name.as_str()),
            self.code.as_deref(),
            self.category.as_deref(),
            self.location.as_deref(),
        ])
    }
}

impl Resource for PreventivePlan {
    const NAME: &'static str = "Preventive plan";
    const ENDPOINT: &'static str = "maintenance/preventive-plans";

    fn id(&self) -> EntityId {
        self.id
    }

    fn search_text(&self) -> Vec<String> {
        fields([Some(self.name.as_str()), self.asset_name.as_deref()])
    }
}

impl Resource for WorkOrder {
    const NAME: &'static str = "Work order";
    const ENDPOINT: &'static str = "maintenance/work-orders";

    fn id(&self) -> EntityId {
        self.id
    }

    fn search_text(&self) -> Vec<String> {
        fields([
            Some(self.title.as_str()),
            self.asset_name.as_deref(),
            self.supplier_name.as_deref(),
            self.status.as_deref(),
            self.priority.as_deref(),
        ])
    }
}

impl Resource for Supplier {
    const NAME: &'static str = "Supplier";
    const ENDPOINT: &'static str = "maintenance/suppliers";

    fn id(&self) -> EntityId {
        self.id
    }

    fn search_text(&self) -> Vec<String> {
        fields([
            Some(self.name.as_str()),
            self.tax_id.as_deref(),
            self.contact_name.as_deref(),
            self.email.as_deref(),
        ])
    }
}
