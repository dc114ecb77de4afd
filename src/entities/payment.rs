//! Payments received from customers or made to suppliers
//!
//! A payment settles one or more requests; the detail view lists them in a
//! repeating "Requests Covered" panel, one row per settled request.

use super::RecordKind;
use crate::core::path::get_at_path;
use crate::core::reference::ReferenceSpec;
use crate::core::validation::filters::{round_decimals, trim};
use crate::core::validation::validators::*;
use crate::core::validation::{FieldRule, PayloadFilters};
use crate::template::{Condition, FieldDescriptor, PanelGroup, VisibilityRule};
use serde_json::{Value, json};

pub struct Payment;

pub(crate) fn payment_modes() -> Vec<Value> {
    vec![
        json!("cash"),
        json!("upi"),
        json!("bank_transfer"),
        json!("cheque"),
    ]
}

/// Rules shared by payments and advance payments
pub(crate) fn payment_mode_rules(payload: &Value, rules: &mut Vec<FieldRule>) {
    rules.push(one_of("paymentMode", "Select a payment mode", payment_modes()));
    if get_at_path(payload, "paymentMode").and_then(Value::as_str) == Some("cheque") {
        rules.push(non_empty("chequeNumber", "Cheque number is required"));
    }
}

impl RecordKind for Payment {
    const NAME: &'static str = "payment";

    fn rules(payload: &Value) -> Vec<FieldRule> {
        let mut rules = vec![one_of(
            "paymentType",
            "Select a payment type",
            vec![json!("customer"), json!("supplier")],
        )];

        match get_at_path(payload, "paymentType").and_then(Value::as_str) {
            Some("customer") => rules.push(non_empty("customer", "Select a customer")),
            Some("supplier") => rules.push(non_empty("supplier", "Select a supplier")),
            _ => {}
        }

        rules.push(non_empty("amount", "Amount is required"));
        rules.push(number_greater_than_zero("amount", "Amount must be greater than 0"));
        rules.push(non_empty("paymentDate", "Payment date is required"));
        payment_mode_rules(payload, &mut rules);

        rules
    }

    fn filters() -> PayloadFilters {
        PayloadFilters::new()
            .add("amount", round_decimals(2))
            .add("chequeNumber", trim())
    }

    fn references() -> Vec<ReferenceSpec> {
        vec![
            ReferenceSpec::new("customer"),
            ReferenceSpec::new("supplier"),
            ReferenceSpec::with_display_key("requests", "requestId"),
        ]
    }

    fn panels() -> Vec<PanelGroup> {
        vec![
            PanelGroup::new(
                "Payment Details",
                vec![
                    FieldDescriptor::new("Payment Type", "paymentType"),
                    FieldDescriptor::new("Customer", "customer.name"),
                    FieldDescriptor::new("Supplier", "supplier.name"),
                    FieldDescriptor::new("Amount", "amount"),
                    FieldDescriptor::new("Payment Date", "paymentDate"),
                    FieldDescriptor::new("Mode", "paymentMode"),
                    FieldDescriptor::new("Cheque Number", "chequeNumber"),
                ],
            ),
            PanelGroup::new(
                "Requests Covered",
                vec![
                    FieldDescriptor::new("Request ID", "requestId"),
                    FieldDescriptor::new("Pick-up", "pickUpDateTime"),
                    FieldDescriptor::new("Amount", "amount"),
                ],
            )
            .multiple("requests"),
        ]
    }

    fn columns() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("Payment Date", "paymentDate"),
            FieldDescriptor::custom("Party", "party", |record| {
                ["customer.name", "supplier.name"]
                    .iter()
                    .find_map(|path| get_at_path(record, path).and_then(Value::as_str))
                    .unwrap_or(crate::template::PLACEHOLDER)
                    .to_string()
            }),
            FieldDescriptor::new("Amount", "amount"),
            FieldDescriptor::new("Mode", "paymentMode"),
        ]
    }

    fn visibility() -> Vec<VisibilityRule> {
        vec![
            VisibilityRule::new("customer.", Condition::equals("paymentType", "customer")),
            VisibilityRule::new("supplier.", Condition::equals("paymentType", "supplier")),
            VisibilityRule::new("chequeNumber", Condition::equals("paymentMode", "cheque")),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::validation::validate_payload;

    #[test]
    fn test_supplier_payment_needs_supplier() {
        let payload = json!({
            "paymentType": "supplier",
            "amount": 1500,
            "paymentDate": "2024-05-10",
            "paymentMode": "upi"
        });
        let result = validate_payload(&Payment::rules(&payload), &payload);
        assert_eq!(result.error_for("supplier"), Some("Select a supplier"));
        assert_eq!(result.error_for("customer"), None);
    }

    #[test]
    fn test_cheque_needs_number() {
        let payload = json!({
            "paymentType": "customer",
            "customer": "c1",
            "amount": 1500,
            "paymentDate": "2024-05-10",
            "paymentMode": "cheque"
        });
        let result = validate_payload(&Payment::rules(&payload), &payload);
        assert_eq!(result.error_for("chequeNumber"), Some("Cheque number is required"));
    }

    #[test]
    fn test_unknown_mode_rejected() {
        let payload = json!({
            "paymentType": "customer",
            "customer": "c1",
            "amount": 10,
            "paymentDate": "2024-05-10",
            "paymentMode": "barter"
        });
        let result = validate_payload(&Payment::rules(&payload), &payload);
        assert_eq!(result.error_for("paymentMode"), Some("Select a payment mode"));
    }

    #[test]
    fn test_requests_panel_is_repeating() {
        let panels = Payment::panels();
        assert_eq!(
            panels[1].kind,
            crate::template::PanelKind::Multiple {
                parent_path: "requests".to_string()
            }
        );
    }
}
