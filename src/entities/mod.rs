//! Record kinds of the back office
//!
//! Each kind bundles the per-page pieces the generic core needs: a rule-set
//! builder keyed on the payload's discriminant fields, the reference
//! attributes to normalize, pre-validation filters, and the detail/list
//! schemas with their visibility rules.

pub mod advance_payment;
pub mod customer;
pub mod monthly_fixed_request;
pub mod payment;
pub mod request;
pub mod staff;
pub mod supplier;
pub mod vehicle;

pub use advance_payment::AdvancePayment;
pub use customer::Customer;
pub use monthly_fixed_request::MonthlyFixedRequest;
pub use payment::Payment;
pub use request::Request;
pub use staff::Staff;
pub use supplier::Supplier;
pub use vehicle::Vehicle;

use crate::core::reference::ReferenceSpec;
use crate::core::validation::{FieldRule, PayloadFilters};
use crate::template::{FieldDescriptor, PanelGroup, VisibilityRule, field_visible};
use serde_json::Value;

/// Schema bundle for one record kind
pub trait RecordKind: Send + Sync + 'static {
    /// Kind name used with the record collaborator
    const NAME: &'static str;

    /// Rules that apply to `payload`
    ///
    /// Conditional rules are decided here, from the payload's discriminant
    /// fields, before anything is evaluated.
    fn rules(payload: &Value) -> Vec<FieldRule>;

    /// Filters applied to a payload before validation
    fn filters() -> PayloadFilters {
        PayloadFilters::new()
    }

    /// Reference attributes and their display keys
    fn references() -> Vec<ReferenceSpec> {
        Vec::new()
    }

    /// Detail view panels, in display order
    fn panels() -> Vec<PanelGroup> {
        Vec::new()
    }

    /// List view columns, in display order
    fn columns() -> Vec<FieldDescriptor> {
        Vec::new()
    }

    /// Field-level visibility rules for the detail view
    fn visibility() -> Vec<VisibilityRule> {
        Vec::new()
    }
}

/// Field predicate for [`filter_panels`](crate::template::filter_panels) built
/// from a kind's visibility rules
pub fn visibility_predicate<K: RecordKind>() -> impl Fn(&FieldDescriptor, &Value) -> bool {
    let rules = K::visibility();
    move |field, record| field_visible(&rules, field, record)
}

/// Shared customer-details block of bookings: either an existing customer
/// reference or inline details for a new one
pub(crate) fn customer_details_rules(payload: &Value, rules: &mut Vec<FieldRule>) {
    use crate::core::path::get_at_path;
    use crate::core::validation::validators::*;
    use serde_json::json;

    rules.push(one_of(
        "customerDetails.customerType",
        "Select a customer type",
        vec![json!("new"), json!("existing")],
    ));

    match get_at_path(payload, "customerDetails.customerType").and_then(Value::as_str) {
        Some("existing") => {
            rules.push(non_empty("customerDetails.customer", "Select a customer"));
        }
        Some("new") => {
            rules.push(non_empty("customerDetails.name", "Customer name is required"));
            rules.push(non_empty("customerDetails.contact", "Customer contact is required"));
            rules.push(valid_contact(
                "customerDetails.contact",
                "Enter a valid 10 digit contact number",
            ));
            if get_at_path(payload, "customerDetails.email").is_some_and(is_present) {
                rules.push(valid_email("customerDetails.email", "Enter a valid email"));
            }
        }
        _ => {}
    }
}

/// Toll/parking style charges: when flagged chargeable, the amount must be
/// positive
pub(crate) fn other_charges_rules(payload: &Value, rules: &mut Vec<FieldRule>) {
    use crate::core::path::get_at_path;
    use crate::core::validation::validators::*;

    for (charge, label) in [("toll", "Toll"), ("parking", "Parking"), ("nightHalt", "Night halt")] {
        let flag = format!("otherCharges.{}.isChargeable", charge);
        if get_at_path(payload, &flag).and_then(Value::as_bool) == Some(true) {
            let amount = format!("otherCharges.{}.amount", charge);
            rules.push(non_empty(amount.clone(), format!("{} amount is required", label)));
            rules.push(number_greater_than_zero(
                amount,
                format!("{} amount must be greater than 0", label),
            ));
        }
    }
}
