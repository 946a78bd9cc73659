// src/domain/mod.rs
//
// Domain Root
//
// Records mirror backend resources one to one. Foreign keys are numeric ids;
// the `*_name` companions are display values resolved by the backend.

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod amenities;
pub mod finance;
pub mod maintenance;
pub mod notices;
pub mod people;
pub mod resource;
pub mod security;
pub mod structure;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

pub use resource::{EntityId, Resource};

// People
pub use people::{Permission, Role, User};

// Structure
pub use structure::{Block, Tower, Unit};

// Finance
pub use finance::{BillingPeriod, CreditNote, FeeConcept, Fine, InterestRate, Payment, UnitCharge};

// Amenities
pub use amenities::{Amenity, AmenityRate, AmenityReservation, AmenitySchedule};

// Maintenance
pub use maintenance::{Asset, PreventivePlan, Supplier, WorkOrder};

// Security
pub use security::{AccessAuthorization, AttendanceKind, FaceAttendance, SecurityIncident, Visitor};

// Notices
pub use notices::Notice;
