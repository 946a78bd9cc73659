// src/domain/finance.rs
//
// Billing records. Amounts arrive as decimal strings or numbers and may be
// null; balances and interest are computed by the backend.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::resource::{fields, EntityId, Resource};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeeConcept {
    pub id: EntityId,
    pub name: String,
    pub code: Option<String>,
    pub amount: Option<Decimal>,
    pub is_recurring: bool,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BillingPeriod {
    pub id: EntityId,
    pub name: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub is_closed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitCharge {
    pub id: EntityId,
    pub unit: Option<EntityId>,
    pub unit_number: Option<String>,
    pub concept: Option<EntityId>,
    pub concept_name: Option<String>,
    pub period: Option<EntityId>,
    pub period_name: Option<String>,
    pub amount: Option<Decimal>,
    pub balance: Option<Decimal>,
    pub due_date: Option<NaiveDate>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterestRate {
    pub id: EntityId,
    pub name: String,
    /// Monthly percentage
    pub rate: Option<Decimal>,
    pub valid_from: Option<NaiveDate>,
    pub valid_to: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreditNote {
    pub id: EntityId,
    pub unit: Option<EntityId>,
    pub unit_number: Option<String>,
    pub charge: Option<EntityId>,
    pub amount: Option<Decimal>,
    pub reason: String,
    pub issued_at: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fine {
    pub id: EntityId,
    pub unit: Option<EntityId>,
    pub unit_number: Option<String>,
    pub amount: Option<Decimal>,
    pub reason: String,
    pub issued_at: Option<NaiveDate>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Payment {
    pub id: EntityId,
    pub unit: Option<EntityId>,
    pub unit_number: Option<String>,
    pub amount: Option<Decimal>,
    pub method: Option<String>,
    pub reference: Option<String>,
    pub paid_at: Option<NaiveDate>,
    pub status: Option<String>,
}

impl Resource for FeeConcept {
    const NAME: &'static str = "Fee concept";
    const ENDPOINT: &'static str = "finance/fee-concepts";

    fn id(&self) -> EntityId {
        self.id
    }

    fn search_text(&self) -> Vec<String> {
        fields([Some(self.name.as_str()), self.code.as_deref()])
    }
}

impl Resource for BillingPeriod {
    const NAME: &'static str = "Billing period";
    const ENDPOINT: &'static str = "finance/billing-periods";

    fn id(&self) -> EntityId {
        self.id
    }

    fn search_text(&self) -> Vec<String> {
        vec![self.name.clone()]
    }
}

impl Resource for UnitCharge {
    const NAME: &'static str = "Unit charge";
    const ENDPOINT: &'static str = "finance/unit-charges";

    fn id(&self) -> EntityId {
        self.id
    }

    fn search_text(&self) -> Vec<String> {
        fields([
            self.unit_number.as_deref(),
            self.concept_name.as_deref(),
            self.period_name.as_deref(),
            self.status.as_deref(),
        ])
    }
}

impl Resource for InterestRate {
    const NAME: &'static str = "Interest rate";
    const ENDPOINT: &'static str = "finance/interest-rates";

    fn id(&self) -> EntityId {
        self.id
    }

    fn search_text(&self) -> Vec<String> {
        vec![self.name.clone()]
    }
}

impl Resource for CreditNote {
    const NAME: &'static str = "Credit note";
    const ENDPOINT: &'static str = "finance/credit-notes";

    fn id(&self) -> EntityId {
        self.id
    }

    fn search_text(&self) -> Vec<String> {
        fields([self.unit_number.as_deref(), Some(self.reason.as_str())])
    }
}

impl Resource for Fine {
    const NAME: &'static str = "Fine";
    const ENDPOINT: &'static str = "finance/fines";

    fn id(&self) -> EntityId {
        self.id
    }

    fn search_text(&self) -> Vec<String> {
        fields([
            self.unit_number.as_deref(),
            Some(self.reason.as_str()),
            self.status.as_deref(),
        ])
    }
}

impl Resource for Payment {
    const NAME: &'static str = "Payment";
    const ENDPOINT: &'static str = "finance/payments";

    fn id(&self) -> EntityId {
        self.id
    }

    fn search_text(&self) -> Vec<String> {
        fields([
            self.unit_number.as_deref(),
            self.method.as_deref(),
            self.reference.as_deref(),
            self.status.as_deref(),
        ])
    }
}
