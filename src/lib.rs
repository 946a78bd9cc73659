// src/lib.rs
// Condo Backoffice - condominium management desktop client
//
// Architecture:
// - Headless core: pages, stores and forms live in Rust, the webview paints
// - Backend-owned data: every record is a REST resource, nothing is cached
//   beyond the page that shows it
// - Explicit seams: HTTP, toasts, camera and confirmations are injected
// - Application Layer: Tauri commands over the headless core

// ============================================================================
// CORE
// ============================================================================

pub mod api;
pub mod camera;
pub mod config;
pub mod crud;
pub mod domain;
pub mod error;
pub mod form;
pub mod lifecycle;
pub mod notify;
pub mod pages;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;

// ============================================================================
// PUBLIC API - Domain Records
// ============================================================================

pub use domain::{
    // Security
    AccessAuthorization,
    // Amenities
    Amenity,
    AmenityRate,
    AmenityReservation,
    AmenitySchedule,
    // Maintenance
    Asset,
    AttendanceKind,
    // Finance
    BillingPeriod,
    // Structure
    Block,
    CreditNote,
    EntityId,
    FaceAttendance,
    FeeConcept,
    Fine,
    InterestRate,
    // Notices
    Notice,
    Payment,
    // People
    Permission,
    PreventivePlan,
    Resource,
    Role,
    SecurityIncident,
    Supplier,
    Tower,
    Unit,
    UnitCharge,
    User,
    Visitor,
    WorkOrder,
};

// ============================================================================
// PUBLIC API - Errors & Configuration
// ============================================================================

pub use config::BackofficeConfig;
pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use api::{ApiClient, CrudService, FaceAttendanceClient, ListParams, RestService};
pub use crud::{CrudStore, Pagination};
pub use notify::{Notifier, ToastMessages};

// ============================================================================
// PUBLIC API - Pages
// ============================================================================

pub use pages::{Page, PageKind, PageView};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::AppState;

// Re-export application submodules
pub use application::commands;
pub use application::dto;
