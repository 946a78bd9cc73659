// src/domain/structure.rs
//
// Physical layout of the condominium: towers contain blocks, blocks contain units.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::resource::{fields, EntityId, Resource};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tower {
    pub id: EntityId,
    pub name: String,
    pub code: Option<String>,
    pub floors: Option<i32>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Block {
    pub id: EntityId,
    pub name: String,
    pub tower: Option<EntityId>,
    pub tower_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Unit {
    pub id: EntityId,
    pub number: String,
    pub block: Option<EntityId>,
    pub block_name: Option<String>,
    pub tower_name: Option<String>,
    pub floor: Option<i32>,
    pub area_m2: Option<Decimal>,
    /// Share of common expenses, as a fraction
    pub aliquot: Option<Decimal>,
    pub owner: Option<EntityId>,
    pub owner_name: Option<String>,
    pub status: Option<String>,
}

impl Resource for Tower {
    const NAME: &'static str = "Tower";
    const ENDPOINT: &'static str = "towers";

    fn id(&self) -> EntityId {
        self.id
    }

    fn search_text(&self) -> Vec<String> {
        fields([Some(self.name.as_str()), self.code.as_deref()])
    }
}

impl Resource for Block {
    const NAME: &'static str = "Block";
    const ENDPOINT: &'static str = "blocks";

    fn id(&self) -> EntityId {
        self.id
    }

    fn search_text(&self) -> Vec<String> {
        fields([Some(self.name.as_str()), self.tower_name.as_deref()])
    }
}

impl Resource for Unit {
    const NAME: &'static str = "Unit";
    const ENDPOINT: &'static str = "units";

    fn id(&self) -> EntityId {
        self.id
    }

    fn search_text(&self) -> Vec<String> {
        fields([
            Some(self.number.as_str()),
            self.block_name.as_deref(),
            self.tower_name.as_deref(),
            self.owner_name.as_deref(),
        ])
    }
}
