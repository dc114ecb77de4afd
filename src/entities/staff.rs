//! Staff: drivers, helpers and office employees

use super::RecordKind;
use crate::core::path::get_at_path;
use crate::core::validation::filters::{lowercase, trim, uppercase};
use crate::core::validation::validators::*;
use crate::core::validation::{FieldRule, PayloadFilters};
use crate::template::{Condition, FieldDescriptor, PanelGroup, VisibilityRule};
use serde_json::{Value, json};

pub struct Staff;

impl RecordKind for Staff {
    const NAME: &'static str = "staff";

    fn rules(payload: &Value) -> Vec<FieldRule> {
        let mut rules = vec![
            non_empty("name", "Staff name is required"),
            non_empty("contact", "Contact number is required"),
            valid_contact("contact", "Enter a valid 10 digit contact number"),
            one_of(
                "staffType",
                "Select a staff type",
                vec![json!("driver"), json!("helper"), json!("office")],
            ),
        ];

        if get_at_path(payload, "email").is_some_and(is_present) {
            rules.push(valid_email("email", "Enter a valid email"));
        }

        if get_at_path(payload, "staffType").and_then(Value::as_str) == Some("driver") {
            rules.push(non_empty(
                "licenseDetails.licenseNumber",
                "License number is required",
            ));
            rules.push(non_empty(
                "licenseDetails.validTill",
                "License validity date is required",
            ));
        }

        if get_at_path(payload, "salary").is_some_and(is_present) {
            rules.push(number_greater_than_zero("salary", "Salary must be greater than 0"));
        }

        rules
    }

    fn filters() -> PayloadFilters {
        PayloadFilters::new()
            .add("name", trim())
            .add("email", lowercase())
            .add("licenseDetails.licenseNumber", uppercase())
    }

    fn panels() -> Vec<PanelGroup> {
        vec![
            PanelGroup::new(
                "Staff Details",
                vec![
                    FieldDescriptor::new("Name", "name"),
                    FieldDescriptor::new("Type", "staffType"),
                    FieldDescriptor::new("Contact", "contact"),
                    FieldDescriptor::new("Email", "email"),
                    FieldDescriptor::new("Salary", "salary"),
                ],
            ),
            PanelGroup::new(
                "License Details",
                vec![
                    FieldDescriptor::new("License Number", "licenseDetails.licenseNumber"),
                    FieldDescriptor::new("Valid Till", "licenseDetails.validTill"),
                ],
            ),
        ]
    }

    fn columns() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("Name", "name"),
            FieldDescriptor::new("Type", "staffType"),
            FieldDescriptor::new("Contact", "contact"),
        ]
    }

    fn visibility() -> Vec<VisibilityRule> {
        vec![VisibilityRule::new(
            "licenseDetails.",
            Condition::equals("staffType", "driver"),
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::validation::validate_payload;

    #[test]
    fn test_driver_needs_license() {
        let payload = json!({ "name": "Anil", "contact": "9876543210", "staffType": "driver" });
        let result = validate_payload(&Staff::rules(&payload), &payload);
        assert!(!result.is_valid);
        assert_eq!(
            result.error_for("licenseDetails.licenseNumber"),
            Some("License number is required")
        );
    }

    #[test]
    fn test_helper_needs_no_license() {
        let payload = json!({ "name": "Raju", "contact": "9876543210", "staffType": "helper" });
        assert!(validate_payload(&Staff::rules(&payload), &payload).is_valid);
    }
}
