//! Vehicles, owned or attached through a supplier

use super::RecordKind;
use crate::core::path::get_at_path;
use crate::core::reference::ReferenceSpec;
use crate::core::validation::filters::{trim, uppercase};
use crate::core::validation::validators::*;
use crate::core::validation::{FieldRule, PayloadFilters};
use crate::template::{Condition, FieldDescriptor, PanelGroup};
use serde_json::{Value, json};

pub struct Vehicle;

impl RecordKind for Vehicle {
    const NAME: &'static str = "vehicle";

    fn rules(payload: &Value) -> Vec<FieldRule> {
        let mut rules = vec![
            non_empty("vehicleNo", "Vehicle number is required"),
            valid_vehicle_registration("vehicleNo", "Enter a valid vehicle number"),
            non_empty("category", "Select a vehicle category"),
            non_empty("seatingCapacity", "Seating capacity is required"),
            number_greater_than_zero("seatingCapacity", "Seating capacity must be greater than 0"),
            one_of(
                "ownershipType",
                "Select an ownership type",
                vec![json!("own"), json!("supplier")],
            ),
        ];

        if get_at_path(payload, "ownershipType").and_then(Value::as_str) == Some("supplier") {
            rules.push(non_empty("supplier", "Select a supplier"));
        }

        rules
    }

    fn filters() -> PayloadFilters {
        PayloadFilters::new()
            .add("vehicleNo", trim())
            .add("vehicleNo", uppercase())
    }

    fn references() -> Vec<ReferenceSpec> {
        vec![
            ReferenceSpec::new("category"),
            ReferenceSpec::new("supplier"),
        ]
    }

    fn panels() -> Vec<PanelGroup> {
        vec![
            PanelGroup::new(
                "Vehicle Details",
                vec![
                    FieldDescriptor::new("Vehicle No", "vehicleNo"),
                    FieldDescriptor::new("Category", "category.name"),
                    FieldDescriptor::new("Seating Capacity", "seatingCapacity"),
                    FieldDescriptor::new("Ownership", "ownershipType"),
                    FieldDescriptor::new("Fuel", "fuelType"),
                ],
            ),
            PanelGroup::new(
                "Supplier Details",
                vec![
                    FieldDescriptor::new("Supplier", "supplier.name"),
                    FieldDescriptor::new("Supplier Contact", "supplier.contact"),
                ],
            )
            .visible_when(Condition::equals("ownershipType", "supplier")),
        ]
    }

    fn columns() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("Vehicle No", "vehicleNo"),
            FieldDescriptor::new("Category", "category.name"),
            FieldDescriptor::new("Seats", "seatingCapacity"),
            FieldDescriptor::new("Supplier", "supplier.name"),
        ]
    }
}
