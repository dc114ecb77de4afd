//! Advance payments taken from a customer at booking time

use super::RecordKind;
use super::payment::payment_mode_rules;
use crate::core::path::get_at_path;
use crate::core::reference::ReferenceSpec;
use crate::core::validation::filters::{round_decimals, trim};
use crate::core::validation::validators::*;
use crate::core::validation::{FieldRule, PayloadFilters};
use crate::template::{Condition, FieldDescriptor, PanelGroup, VisibilityRule};
use serde_json::Value;

pub struct AdvancePayment;

impl RecordKind for AdvancePayment {
    const NAME: &'static str = "advancePayment";

    fn rules(payload: &Value) -> Vec<FieldRule> {
        let mut rules = vec![
            non_empty("customer", "Select a customer"),
            non_empty("amount", "Amount is required"),
            number_greater_than_zero("amount", "Amount must be greater than 0"),
            non_empty("paymentDate", "Payment date is required"),
        ];
        payment_mode_rules(payload, &mut rules);

        if get_at_path(payload, "bookingDate").is_some_and(is_present) {
            rules.push(date_time_greater_than_field(
                "bookingDate",
                "paymentDate",
                "payment",
            ));
        }

        rules
    }

    fn filters() -> PayloadFilters {
        PayloadFilters::new()
            .add("amount", round_decimals(2))
            .add("chequeNumber", trim())
    }

    fn references() -> Vec<ReferenceSpec> {
        vec![ReferenceSpec::new("customer")]
    }

    fn panels() -> Vec<PanelGroup> {
        vec![
            PanelGroup::new(
                "Advance Details",
                vec![
                    FieldDescriptor::new("Customer", "customer.name"),
                    FieldDescriptor::new("Amount", "amount"),
                    FieldDescriptor::new("Payment Date", "paymentDate"),
                    FieldDescriptor::new("Booking Date", "bookingDate"),
                    FieldDescriptor::new("Mode", "paymentMode"),
                    FieldDescriptor::new("Cheque Number", "chequeNumber"),
                ],
            ),
            PanelGroup::new(
                "Remarks",
                vec![FieldDescriptor::new("Remarks", "remarks")],
            )
            .visible_when(Condition::present("remarks")),
        ]
    }

    fn columns() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("Customer", "customer.name"),
            FieldDescriptor::new("Amount", "amount"),
            FieldDescriptor::new("Payment Date", "paymentDate"),
        ]
    }

    fn visibility() -> Vec<VisibilityRule> {
        vec![VisibilityRule::new(
            "chequeNumber",
            Condition::equals("paymentMode", "cheque"),
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::validation::validate_payload;
    use serde_json::json;

    #[test]
    fn test_advance_needs_positive_amount() {
        let payload = json!({
            "customer": "c1",
            "amount": "0",
            "paymentDate": "2024-05-01",
            "paymentMode": "cash"
        });
        let result = validate_payload(&AdvancePayment::rules(&payload), &payload);
        assert_eq!(result.error_for("amount"), Some("Amount must be greater than 0"));
    }

    #[test]
    fn test_booking_must_follow_payment() {
        let payload = json!({
            "customer": "c1",
            "amount": 500,
            "paymentDate": "2024-05-03",
            "bookingDate": "2024-05-01",
            "paymentMode": "cash"
        });
        let result = validate_payload(&AdvancePayment::rules(&payload), &payload);
        assert_eq!(
            result.error_for("bookingDate"),
            Some("Must be after payment date and time")
        );
    }
}
