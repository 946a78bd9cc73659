// src/pages/catalog.rs
//
// Tab compositions for every backoffice page.

use crate::api::ServiceFactory;
use crate::domain::{
    AccessAuthorization, Amenity, AmenityRate, AmenityReservation, AmenitySchedule, Asset,
    BillingPeriod, Block, CreditNote, FaceAttendance, FeeConcept, Fine, InterestRate, Notice,
    Payment, Permission, PreventivePlan, Role, SecurityIncident, Supplier, Tower, Unit, UnitCharge,
    User, Visitor, WorkOrder,
};

use super::coerce::{
    boolean, date, datetime, decimal, file, foreign_key, id_list, integer, optional, text, time,
};
use super::page::{PageContext, PageKind};
use super::tab::TabController;

pub fn tabs<F: ServiceFactory>(kind: PageKind, ctx: &PageContext<'_, F>) -> Vec<Box<dyn TabController>> {
    match kind {
        PageKind::Users => users(ctx),
        PageKind::Structure => structure(ctx),
        PageKind::Finance => finance(ctx),
        PageKind::Amenities => amenities(ctx),
        PageKind::Maintenance => maintenance(ctx),
        PageKind::Security => security(ctx),
        PageKind::Notices => notices(ctx),
    }
}

fn users<F: ServiceFactory>(ctx: &PageContext<'_, F>) -> Vec<Box<dyn TabController>> {
    vec![
        ctx.tab::<User>(
            "users",
            "Users",
            vec![
                text("username"),
                text("email"),
                text("first_name"),
                text("last_name"),
                optional("phone"),
                foreign_key("role"),
                boolean("is_active").checked(),
            ],
        ),
        ctx.tab::<Role>(
            "roles",
            "Roles",
            vec![text("name"), optional("description"), id_list("permissions")],
        ),
        ctx.tab::<Permission>(
            "permissions",
            "Permissions",
            vec![text("code"), text("name"), optional("module")],
        ),
    ]
}

fn structure<F: ServiceFactory>(ctx: &PageContext<'_, F>) -> Vec<Box<dyn TabController>> {
    vec![
        ctx.tab::<Tower>(
            "towers",
            "Towers",
            vec![text("name"), optional("code"), integer("floors"), optional("description")],
        ),
        ctx.tab::<Block>("blocks", "Blocks", vec![text("name"), foreign_key("tower")]),
        ctx.tab::<Unit>(
            "units",
            "Units",
            vec![
                text("number"),
                foreign_key("block"),
                integer("floor"),
                decimal("area_m2"),
                decimal("aliquot"),
                foreign_key("owner"),
                optional("status"),
            ],
        ),
    ]
}

fn finance<F: ServiceFactory>(ctx: &PageContext<'_, F>) -> Vec<Box<dyn TabController>> {
    vec![
        ctx.tab::<FeeConcept>(
            "fee_concepts",
            "Fee concepts",
            vec![
                text("name"),
                optional("code"),
                decimal("amount"),
                boolean("is_recurring"),
                optional("description"),
            ],
        ),
        ctx.tab::<BillingPeriod>(
            "billing_periods",
            "Billing periods",
            vec![
                text("name"),
                date("start_date"),
                date("end_date"),
                date("due_date"),
                boolean("is_closed"),
            ],
        ),
        ctx.tab::<UnitCharge>(
            "unit_charges",
            "Unit charges",
            vec![
                foreign_key("unit"),
                foreign_key("concept"),
                foreign_key("period"),
                decimal("amount"),
                date("due_date"),
                optional("status"),
            ],
        ),
        ctx.tab::<InterestRate>(
            "interest_rates",
            "Interest rates",
            vec![text("name"), decimal("rate"), date("valid_from"), date("valid_to")],
        ),
        ctx.tab::<CreditNote>(
            "credit_notes",
            "Credit notes",
            vec![
                foreign_key("unit"),
                foreign_key("charge"),
                decimal("amount"),
                text("reason"),
                date("issued_at"),
            ],
        ),
        ctx.tab::<Fine>(
            "fines",
            "Fines",
            vec![
                foreign_key("unit"),
                decimal("amount"),
                text("reason"),
                date("issued_at"),
                optional("status"),
            ],
        ),
        ctx.tab::<Payment>(
            "payments",
            "Payments",
            vec![
                foreign_key("unit"),
                decimal("amount"),
                optional("method"),
                optional("reference"),
                date("paid_at"),
                optional("status"),
            ],
        ),
    ]
}

fn amenities<F: ServiceFactory>(ctx: &PageContext<'_, F>) -> Vec<Box<dyn TabController>> {
    vec![
        ctx.tab::<Amenity>(
            "amenities",
            "Amenities",
            vec![
                text("name"),
                optional("description"),
                integer("capacity"),
                boolean("requires_approval"),
                boolean("is_active").checked(),
            ],
        ),
        ctx.tab::<AmenitySchedule>(
            "schedules",
            "Schedules",
            vec![
                foreign_key("amenity"),
                integer("weekday"),
                time("start_time"),
                time("end_time"),
            ],
        ),
        ctx.tab::<AmenityRate>(
            "rates",
            "Rates",
            vec![foreign_key("amenity"), text("name"), decimal("amount"), boolean("per_hour")],
        ),
        ctx.tab::<AmenityReservation>(
            "reservations",
            "Reservations",
            vec![
                foreign_key("amenity"),
                foreign_key("unit"),
                datetime("start"),
                datetime("end"),
                optional("status"),
                optional("notes"),
            ],
        ),
    ]
}

fn maintenance<F: ServiceFactory>(ctx: &PageContext<'_, F>) -> Vec<Box<dyn TabController>> {
    vec![
        ctx.tab::<Asset>(
            "assets",
            "Assets",
            vec![
                text("name"),
                optional("code"),
                optional("category"),
                optional("location"),
                foreign_key("supplier"),
                optional("status"),
            ],
        ),
        ctx.tab::<PreventivePlan>(
            "preventive_plans",
            "Preventive plans",
            vec![
                foreign_key("asset"),
                text("name"),
                integer("frequency_days"),
                date("next_due"),
                boolean("is_active").checked(),
            ],
        ),
        ctx.tab::<WorkOrder>(
            "work_orders",
            "Work orders",
            vec![
                text("title"),
                optional("description"),
                foreign_key("asset"),
                foreign_key("plan"),
                foreign_key("supplier"),
                optional("priority"),
                optional("status"),
                date("scheduled_for"),
                decimal("cost"),
            ],
        ),
        ctx.tab::<Supplier>(
            "suppliers",
            "Suppliers",
            vec![
                text("name"),
                optional("tax_id"),
                optional("contact_name"),
                optional("phone"),
                optional("email"),
            ],
        ),
    ]
}

fn security<F: ServiceFactory>(ctx: &PageContext<'_, F>) -> Vec<Box<dyn TabController>> {
    vec![
        ctx.tab::<Visitor>(
            "visitors",
            "Visitors",
            vec![
                text("full_name"),
                optional("document_number"),
                foreign_key("unit"),
                datetime("visit_date"),
                optional("notes"),
                file("photo"),
            ],
        ),
        ctx.tab::<AccessAuthorization>(
            "access_authorizations",
            "Access authorizations",
            vec![
                foreign_key("visitor"),
                foreign_key("unit"),
                datetime("valid_from"),
                datetime("valid_to"),
                boolean("is_active").checked(),
                optional("notes"),
            ],
        ),
        ctx.tab::<SecurityIncident>(
            "incidents",
            "Incidents",
            vec![
                text("title"),
                optional("description"),
                optional("severity"),
                datetime("occurred_at"),
                optional("status"),
            ],
        ),
        ctx.tab::<FaceAttendance>(
            "face_attendance",
            "Face attendance",
            vec![optional("person_name"), text("kind")],
        ),
    ]
}

fn notices<F: ServiceFactory>(ctx: &PageContext<'_, F>) -> Vec<Box<dyn TabController>> {
    vec![ctx.tab::<Notice>(
        "notices",
        "Notices",
        vec![
            text("title"),
            text("body"),
            optional("audience"),
            datetime("published_at"),
            datetime("expires_at"),
            file("attachment"),
            boolean("is_published"),
        ],
    )]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::api::memory::MemoryServices;
    use crate::lifecycle::MountScope;
    use crate::notify::NoopNotifier;

    fn keys(kind: PageKind) -> Vec<&'static str> {
        let services = MemoryServices::new();
        let ctx = PageContext {
            factory: &services,
            notifier: Arc::new(NoopNotifier),
            scope: MountScope::new(),
            page_size: 1000,
        };
        tabs(kind, &ctx).iter().map(|tab| tab.key()).collect()
    }

    #[test]
    fn test_every_page_has_tabs() {
        for kind in PageKind::ALL {
            assert!(!keys(kind).is_empty(), "{:?}", kind);
        }
    }

    #[test]
    fn test_page_compositions() {
        assert_eq!(keys(PageKind::Users), vec!["users", "roles", "permissions"]);
        assert_eq!(keys(PageKind::Finance).len(), 7);
        assert_eq!(
            keys(PageKind::Security),
            vec!["visitors", "access_authorizations", "incidents", "face_attendance"]
        );
        assert_eq!(keys(PageKind::Notices), vec!["notices"]);
    }
}
