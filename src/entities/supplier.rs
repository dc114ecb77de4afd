//! Suppliers providing attached vehicles

use super::RecordKind;
use crate::core::path::get_at_path;
use crate::core::validation::filters::{lowercase, trim, uppercase};
use crate::core::validation::validators::*;
use crate::core::validation::{FieldRule, PayloadFilters};
use crate::template::{Condition, FieldDescriptor, PanelGroup};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

pub struct Supplier;

fn ifsc_pattern() -> Regex {
    static IFSC_REGEX: OnceLock<Regex> = OnceLock::new();
    IFSC_REGEX
        .get_or_init(|| Regex::new(r"^[A-Z]{4}0[A-Z0-9]{6}$").unwrap())
        .clone()
}

impl RecordKind for Supplier {
    const NAME: &'static str = "supplier";

    fn rules(payload: &Value) -> Vec<FieldRule> {
        let mut rules = vec![
            non_empty("name", "Supplier name is required"),
            non_empty("contact", "Contact number is required"),
            valid_contact("contact", "Enter a valid 10 digit contact number"),
        ];

        if get_at_path(payload, "email").is_some_and(is_present) {
            rules.push(valid_email("email", "Enter a valid email"));
        }

        if get_at_path(payload, "bankDetails.accountNumber").is_some_and(is_present) {
            rules.push(non_empty("bankDetails.ifsc", "IFSC code is required"));
            rules.push(matches_pattern(
                "bankDetails.ifsc",
                "Enter a valid IFSC code",
                ifsc_pattern(),
            ));
            rules.push(non_empty(
                "bankDetails.accountHolder",
                "Account holder name is required",
            ));
        }

        rules
    }

    fn filters() -> PayloadFilters {
        PayloadFilters::new()
            .add("name", trim())
            .add("email", lowercase())
            .add("bankDetails.ifsc", trim())
            .add("bankDetails.ifsc", uppercase())
    }

    fn panels() -> Vec<PanelGroup> {
        vec![
            PanelGroup::new(
                "Supplier Details",
                vec![
                    FieldDescriptor::new("Name", "name"),
                    FieldDescriptor::new("Contact", "contact"),
                    FieldDescriptor::new("Email", "email"),
                    FieldDescriptor::new("Address", "address"),
                ],
            ),
            PanelGroup::new(
                "Bank Details",
                vec![
                    FieldDescriptor::new("Account Holder", "bankDetails.accountHolder"),
                    FieldDescriptor::new("Account Number", "bankDetails.accountNumber"),
                    FieldDescriptor::new("IFSC", "bankDetails.ifsc"),
                ],
            )
            .visible_when(Condition::present("bankDetails.accountNumber")),
        ]
    }

    fn columns() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("Name", "name"),
            FieldDescriptor::new("Contact", "contact"),
            FieldDescriptor::new("Email", "email"),
        ]
    }
}
