//! Regular booking requests
//!
//! A request names its customer either as an existing customer reference or
//! inline as a new customer (`customerDetails.customerType`), and its vehicle
//! either as an existing fleet vehicle or a one-off vehicle hired from a
//! provider (`vehicleDetails.vehicleType`). Closing a request records the
//! trip's kilometres and drop time.

use super::{RecordKind, customer_details_rules, other_charges_rules};
use crate::core::path::get_at_path;
use crate::core::reference::ReferenceSpec;
use crate::core::validation::filters::{trim, uppercase};
use crate::core::validation::validators::*;
use crate::core::validation::{FieldRule, PayloadFilters};
use crate::template::{
    Condition, FieldDescriptor, PLACEHOLDER, PanelGroup, VisibilityRule, display_value,
};
use serde_json::{Value, json};

pub struct Request;

/// Statuses in which the trip figures must be filled in
const CLOSED_STATUSES: [&str; 2] = ["closed", "billed"];

fn first_display(record: &Value, paths: &[&str]) -> String {
    paths
        .iter()
        .find_map(|path| get_at_path(record, path).and_then(display_value))
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// Kilometres driven, when both readings are known
pub(crate) fn total_km(record: &Value) -> String {
    use crate::core::field::as_number;

    let opening = get_at_path(record, "openingKm").and_then(as_number);
    let closing = get_at_path(record, "closingKm").and_then(as_number);
    match (opening, closing) {
        (Some(opening), Some(closing)) if closing >= opening => format!("{}", closing - opening),
        _ => String::new(),
    }
}

impl RecordKind for Request {
    const NAME: &'static str = "request";

    fn rules(payload: &Value) -> Vec<FieldRule> {
        let mut rules = Vec::new();

        customer_details_rules(payload, &mut rules);

        rules.push(one_of(
            "vehicleDetails.vehicleType",
            "Select a vehicle type",
            vec![json!("new"), json!("existing")],
        ));
        match get_at_path(payload, "vehicleDetails.vehicleType").and_then(Value::as_str) {
            Some("existing") => {
                rules.push(non_empty("vehicleDetails.vehicle", "Select a vehicle"));
            }
            Some("new") => {
                let new_vehicle = "vehicleDetails.newVehicleDetails";
                rules.push(non_empty(
                    format!("{}.vehicleNo", new_vehicle),
                    "Vehicle number is required",
                ));
                rules.push(valid_vehicle_registration(
                    format!("{}.vehicleNo", new_vehicle),
                    "Enter a valid vehicle number",
                ));
                rules.push(non_empty(
                    format!("{}.ownerName", new_vehicle),
                    "Owner name is required",
                ));
                rules.push(non_empty(
                    format!("{}.ownerContact", new_vehicle),
                    "Owner contact is required",
                ));
                rules.push(valid_contact(
                    format!("{}.ownerContact", new_vehicle),
                    "Enter a valid 10 digit contact number",
                ));
                rules.push(non_empty(
                    format!("{}.providerPackage", new_vehicle),
                    "Select the provider package",
                ));
            }
            _ => {}
        }

        rules.push(non_empty("package", "Select a package"));
        rules.push(non_empty("staff", "Assign a driver"));
        rules.push(non_empty("pickUpLocation", "Pick-up location is required"));
        rules.push(non_empty("dropLocation", "Drop location is required"));
        rules.push(non_empty("pickUpDateTime", "Pick-up date and time is required"));

        let status = get_at_path(payload, "requestStatus").and_then(Value::as_str);
        let closed = status.is_some_and(|status| CLOSED_STATUSES.contains(&status));
        if closed {
            rules.push(non_empty("dropDateTime", "Drop date and time is required"));
            rules.push(date_time_greater_than_field(
                "dropDateTime",
                "pickUpDateTime",
                "pick-up",
            ));
            rules.push(non_empty("openingKm", "Opening km is required"));
            rules.push(non_empty("closingKm", "Closing km is required"));
            rules.push(number_greater_than_field("closingKm", "openingKm", "opening km"));
        } else if get_at_path(payload, "dropDateTime").is_some_and(is_present) {
            rules.push(date_time_greater_than_field(
                "dropDateTime",
                "pickUpDateTime",
                "pick-up",
            ));
        }

        other_charges_rules(payload, &mut rules);

        rules
    }

    fn filters() -> PayloadFilters {
        PayloadFilters::new()
            .add("customerDetails.name", trim())
            .add("vehicleDetails.newVehicleDetails.vehicleNo", trim())
            .add("vehicleDetails.newVehicleDetails.vehicleNo", uppercase())
            .add("pickUpLocation", trim())
            .add("dropLocation", trim())
    }

    fn references() -> Vec<ReferenceSpec> {
        vec![
            ReferenceSpec::new("customerDetails.customer"),
            ReferenceSpec::with_display_key("vehicleDetails.vehicle", "vehicleNo"),
            ReferenceSpec::new("vehicleDetails.newVehicleDetails.providerPackage"),
            ReferenceSpec::new("package"),
            ReferenceSpec::new("staff"),
        ]
    }

    fn panels() -> Vec<PanelGroup> {
        vec![
            PanelGroup::new(
                "Request Details",
                vec![
                    FieldDescriptor::new("Request ID", "requestId"),
                    FieldDescriptor::new("Status", "requestStatus"),
                    FieldDescriptor::new("Pick-up Location", "pickUpLocation"),
                    FieldDescriptor::new("Drop Location", "dropLocation"),
                    FieldDescriptor::new("Pick-up Date & Time", "pickUpDateTime"),
                    FieldDescriptor::new("Drop Date & Time", "dropDateTime"),
                    FieldDescriptor::new("Package", "package.name"),
                ],
            ),
            PanelGroup::new(
                "Customer Details",
                vec![
                    FieldDescriptor::new("Customer Type", "customerDetails.customerType"),
                    FieldDescriptor::new("Customer", "customerDetails.customer.name"),
                    FieldDescriptor::new("Customer Contact", "customerDetails.customer.contact"),
                    FieldDescriptor::new("Name", "customerDetails.name"),
                    FieldDescriptor::new("Contact", "customerDetails.contact"),
                    FieldDescriptor::new("Email", "customerDetails.email"),
                ],
            ),
            PanelGroup::new(
                "Vehicle Details",
                vec![
                    FieldDescriptor::new("Vehicle Type", "vehicleDetails.vehicleType"),
                    FieldDescriptor::new("Vehicle", "vehicleDetails.vehicle.vehicleNo"),
                    FieldDescriptor::new(
                        "Vehicle No",
                        "vehicleDetails.newVehicleDetails.vehicleNo",
                    ),
                    FieldDescriptor::new("Owner", "vehicleDetails.newVehicleDetails.ownerName"),
                    FieldDescriptor::new(
                        "Owner Contact",
                        "vehicleDetails.newVehicleDetails.ownerContact",
                    ),
                ],
            ),
            PanelGroup::new(
                "Provider Package Details",
                vec![
                    FieldDescriptor::new(
                        "Package",
                        "vehicleDetails.newVehicleDetails.providerPackage.name",
                    ),
                    FieldDescriptor::new(
                        "Base Amount",
                        "vehicleDetails.newVehicleDetails.providerPackage.baseAmount",
                    ),
                    FieldDescriptor::new(
                        "Extra Km Rate",
                        "vehicleDetails.newVehicleDetails.providerPackage.extraKmRate",
                    ),
                ],
            )
            .visible_when(Condition::equals("vehicleDetails.vehicleType", "new")),
            PanelGroup::new(
                "Trip Details",
                vec![
                    FieldDescriptor::new("Driver", "staff.name"),
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
            FieldDescriptor::new("Request ID", "requestId"),
            FieldDescriptor::custom("Customer", "customerDetails", |record| {
                first_display(
                    record,
                    &["customerDetails.customer.name", "customerDetails.name"],
                )
            }),
            FieldDescriptor::custom("Vehicle", "vehicleDetails", |record| {
                first_display(
                    record,
                    &[
                        "vehicleDetails.vehicle.vehicleNo",
                        "vehicleDetails.newVehicleDetails.vehicleNo",
                    ],
                )
            }),
            FieldDescriptor::new("Pick-up", "pickUpDateTime"),
            FieldDescriptor::new("Status", "requestStatus"),
        ]
    }

    fn visibility() -> Vec<VisibilityRule> {
        let existing_customer = Condition::equals("customerDetails.customerType", "existing");
        let new_customer = Condition::equals("customerDetails.customerType", "new");

        vec![
            VisibilityRule::new("customerDetails.customer.", existing_customer),
            VisibilityRule::new("customerDetails.name", new_customer.clone()),
            VisibilityRule::new("customerDetails.contact", new_customer.clone()),
            VisibilityRule::new("customerDetails.email", new_customer),
            VisibilityRule::new(
                "vehicleDetails.vehicle.",
                Condition::equals("vehicleDetails.vehicleType", "existing"),
            ),
            VisibilityRule::new(
                "vehicleDetails.newVehicleDetails.",
                Condition::equals("vehicleDetails.vehicleType", "new"),
            ),
        ]
    }
}
