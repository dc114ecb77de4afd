//! Monthly fixed requests
//!
//! A contract booking that assigns a vehicle and driver to a customer for a
//! month. Every duty is closed with its trip figures, so kilometres and drop
//! time are always required.

use super::request::total_km;
use super::{RecordKind, customer_details_rules, other_charges_rules};
use crate::core::reference::ReferenceSpec;
use crate::core::validation::filters::trim;
use crate::core::validation::validators::*;
use crate::core::validation::{FieldRule, PayloadFilters};
use crate::template::{Condition, FieldDescriptor, PanelGroup, VisibilityRule};
use serde_json::Value;

pub struct MonthlyFixedRequest;

impl RecordKind for MonthlyFixedRequest {
    const NAME: &'static str = "monthlyFixedRequest";

    fn rules(payload: &Value) -> Vec<FieldRule> {
        let mut rules = Vec::new();

        customer_details_rules(payload, &mut rules);

        rules.extend([
            non_empty("vehicle", "Select a vehicle"),
            non_empty("staff", "Assign a driver"),
            non_empty("package", "Select a package"),
            non_empty("month", "Select the contract month"),
            non_empty("pickUpDateTime", "Pick-up date and time is required"),
            non_empty("dropDateTime", "Drop date and time is required"),
            date_time_greater_than_field("dropDateTime", "pickUpDateTime", "pick-up"),
            non_empty("openingKm", "Opening km is required"),
            non_empty("closingKm", "Closing km is required"),
            number_greater_than_field("closingKm", "openingKm", "opening km"),
        ]);

        other_charges_rules(payload, &mut rules);

        rules
    }

    fn filters() -> PayloadFilters {
        PayloadFilters::new()
            .add("customerDetails.name", trim())
            .add("month", trim())
    }

    fn references() -> Vec<ReferenceSpec> {
        vec![
            ReferenceSpec::new("customerDetails.customer"),
            ReferenceSpec::with_display_key("vehicle", "vehicleNo"),
            ReferenceSpec::new("staff"),
            ReferenceSpec::new("package"),
        ]
    }

    fn panels() -> Vec<PanelGroup> {
        vec![
            PanelGroup::new(
                "Contract Details",
                vec![
                    FieldDescriptor::new("Month", "month"),
                    FieldDescriptor::new("Package", "package.name"),
                    FieldDescriptor::new("Vehicle", "vehicle.vehicleNo"),
                    FieldDescriptor::new("Driver", "staff.name"),
                ],
            ),
            PanelGroup::new(
                "Customer Details",
                vec![
                    FieldDescriptor::new("Customer", "customerDetails.customer.name"),
                    FieldDescriptor::new("Name", "customerDetails.name"),
                    FieldDescriptor::new("Contact", "customerDetails.contact"),
                ],
            ),
            PanelGroup::new(
                "Duty Details",
                vec![
                    FieldDescriptor::new("Pick-up Date & Time", "pickUpDateTime"),
                    FieldDescriptor::new("Drop Date & Time", "dropDateTime"),
                    FieldDescriptor::new("Opening Km", "openingKm"),
                    FieldDescriptor::new("Closing Km", "closingKm"),
                    FieldDescriptor::custom("Total Km", "totalKm", total_km),
                ],
            ),
            PanelGroup::new(
                "Other Charges",
                vec![
                    FieldDescriptor::new("Toll", "otherCharges.toll.amount"),
                    FieldDescriptor::new("Parking", "otherCharges.parking.amount"),
                    FieldDescriptor::new("Night Halt", "otherCharges.nightHalt.amount"),
                ],
            ),
        ]
    }

    fn columns() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("Month", "month"),
            FieldDescriptor::new("Customer", "customerDetails.customer.name"),
            FieldDescriptor::new("Vehicle", "vehicle.vehicleNo"),
            FieldDescriptor::new("Driver", "staff.name"),
        ]
    }

    fn visibility() -> Vec<VisibilityRule> {
        let new_customer = Condition::equals("customerDetails.customerType", "new");
        vec![
            VisibilityRule::new(
                "customerDetails.customer.",
                Condition::equals("customerDetails.customerType", "existing"),
            ),
            VisibilityRule::new("customerDetails.name", new_customer.clone()),
            VisibilityRule::new("customerDetails.contact", new_customer),
        ]
    }
}
