//! Customers

use super::RecordKind;
use crate::core::path::get_at_path;
use crate::core::reference::ReferenceSpec;
use crate::core::validation::filters::{lowercase, trim};
use crate::core::validation::validators::*;
use crate::core::validation::{FieldRule, PayloadFilters};
use crate::template::{FieldDescriptor, PanelGroup};
use serde_json::Value;

pub struct Customer;

impl RecordKind for Customer {
    const NAME: &'static str = "customer";

    fn rules(payload: &Value) -> Vec<FieldRule> {
        let mut rules = vec![
            non_empty("name", "Customer name is required"),
            non_empty("contact", "Contact number is required"),
            valid_contact("contact", "Enter a valid 10 digit contact number"),
        ];

        if get_at_path(payload, "email").is_some_and(is_present) {
            rules.push(valid_email("email", "Enter a valid email"));
        }
        if get_at_path(payload, "alternateContact").is_some_and(is_present) {
            rules.push(valid_contact(
                "alternateContact",
                "Enter a valid 10 digit contact number",
            ));
        }

        rules
    }

    fn filters() -> PayloadFilters {
        PayloadFilters::new()
            .add("name", trim())
            .add("contact", trim())
            .add("email", trim())
            .add("email", lowercase())
    }

    fn references() -> Vec<ReferenceSpec> {
        vec![ReferenceSpec::new("customerCategory")]
    }

    fn panels() -> Vec<PanelGroup> {
        vec![
            PanelGroup::new(
                "Customer Details",
                vec![
                    FieldDescriptor::new("Name", "name"),
                    FieldDescriptor::new("Category", "customerCategory.name"),
                    FieldDescriptor::new("Contact", "contact"),
                    FieldDescriptor::new("Alternate Contact", "alternateContact"),
                    FieldDescriptor::new("Email", "email"),
                ],
            ),
            PanelGroup::new(
                "Address",
                vec![
                    FieldDescriptor::new("Address", "address"),
                    FieldDescriptor::new("City", "city"),
                    FieldDescriptor::new("GST Number", "gstNumber"),
                ],
            ),
        ]
    }

    fn columns() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("Name", "name"),
            FieldDescriptor::new("Contact", "contact"),
            FieldDescriptor::new("Email", "email"),
            FieldDescriptor::new("City", "city"),
        ]
    }
}
