//! End-to-end validation behavior
//!
//! These tests verify that:
//! - Rule lists are evaluated in full and the first message per path wins
//! - Cross-field comparisons fail closed on missing counterparts
//! - Record-kind rule builders assemble rules from discriminant fields

use fleetdesk::prelude::*;
use serde_json::{Value, json};

// =============================================================================
// Rule list semantics
// =============================================================================

mod engine_tests {
    use super::*;

    #[test]
    fn test_missing_name_reported_alone() {
        let rules = vec![
            non_empty("name", "Name is required"),
            non_empty("contact", "Contact is required"),
        ];
        let result = validate_payload(&rules, &json!({ "name": "", "contact": "9999999999" }));

        assert!(!result.is_valid);
        assert_eq!(result.error_map.len(), 1);
        assert_eq!(result.error_for("name"), Some("Name is required"));
    }

    #[test]
    fn test_amount_must_be_positive() {
        let rules = vec![number_greater_than_zero("amount", "Amount must be greater than 0")];

        assert!(!validate_payload(&rules, &json!({ "amount": 0 })).is_valid);
        assert!(validate_payload(&rules, &json!({ "amount": 5 })).is_valid);
    }

    #[test]
    fn test_closing_km_against_opening_km() {
        let rules = vec![number_greater_than_field("closingKm", "openingKm", "opening km")];

        let result = validate_payload(&rules, &json!({ "closingKm": 50, "openingKm": 80 }));
        assert!(!result.is_valid);
        assert_eq!(result.error_for("closingKm"), Some("Must be greater than opening km"));

        assert!(validate_payload(&rules, &json!({ "closingKm": 120, "openingKm": 80 })).is_valid);
    }

    #[test]
    fn test_comparison_fails_closed_without_opening_km() {
        let rules = vec![number_greater_than_field("closingKm", "openingKm", "opening km")];

        assert!(!validate_payload(&rules, &json!({ "closingKm": 120 })).is_valid);
        let null_opening = json!({ "closingKm": 120, "openingKm": null });
        assert!(!validate_payload(&rules, &null_opening).is_valid);
    }

    #[test]
    fn test_drop_before_pick_up_rejected() {
        let rules = vec![date_time_greater_than_field("dropDateTime", "pickUpDateTime", "pick-up")];

        let early = json!({
            "pickUpDateTime": "2024-05-01T10:00:00Z",
            "dropDateTime": "2024-05-01T09:30:00Z"
        });
        assert!(!validate_payload(&rules, &early).is_valid);

        let late = json!({
            "pickUpDateTime": "2024-05-01T10:00:00Z",
            "dropDateTime": "2024-05-01T18:00:00Z"
        });
        assert!(validate_payload(&rules, &late).is_valid);
    }

    #[test]
    fn test_every_failure_counts_but_first_message_kept() {
        let rules = vec![
            non_empty("amount", "Amount is required"),
            number_greater_than_zero("amount", "Amount must be greater than 0"),
            non_empty("paymentDate", "Payment date is required"),
        ];
        let payload = json!({ "paymentDate": "2024-05-01" });
        let result = validate_payload(&rules, &payload);

        assert!(!result.is_valid);
        assert_eq!(result.error_for("amount"), Some("Amount is required"));
        assert_eq!(result.error_map.keys().collect::<Vec<_>>(), vec!["amount"]);
    }

    #[test]
    fn test_validity_equals_conjunction_of_checks() {
        let rules = vec![
            non_empty("a", "a"),
            number_greater_than_zero("b", "b"),
            valid_contact("c", "c"),
        ];
        let payloads = [
            json!({}),
            json!({ "a": "x", "b": 1, "c": "9876543210" }),
            json!({ "a": "x", "b": -1, "c": "9876543210" }),
            json!({ "a": " ", "b": "3", "c": "98765" }),
        ];

        for payload in payloads {
            let result = validate_payload(&rules, &payload);
            let expected = rules.iter().all(|rule| rule.evaluate(&payload));
            assert_eq!(result.is_valid, expected, "{}", payload);
            assert!(
                result
                    .error_map
                    .keys()
                    .all(|path| rules.iter().any(|rule| rule.path() == path))
            );
        }
    }
}

// =============================================================================
// Record kinds
// =============================================================================

mod record_kind_tests {
    use super::*;

    fn new_vehicle_request() -> Value {
        json!({
            "customerDetails": { "customerType": "existing", "customer": "c1" },
            "vehicleDetails": {
                "vehicleType": "new",
                "newVehicleDetails": {
                    "vehicleNo": "mh 12 ab 1234",
                    "ownerName": "Suresh",
                    "ownerContact": "9822012345",
                    "providerPackage": "pp1"
                }
            },
            "package": "p1",
            "staff": "s1",
            "pickUpLocation": "Pune",
            "dropLocation": "Nashik",
            "pickUpDateTime": "2024-05-01T06:00",
            "requestStatus": "open"
        })
    }

    #[test]
    fn test_new_vehicle_request_passes_after_filters() {
        let (filtered, result) = check_payload::<Request>(&new_vehicle_request());

        assert!(result.is_valid, "{:?}", result.error_map);
        assert_eq!(
            filtered["vehicleDetails"]["newVehicleDetails"]["vehicleNo"],
            "MH 12 AB 1234"
        );
    }

    #[test]
    fn test_existing_vehicle_rules_swap_in() {
        let mut payload = new_vehicle_request();
        payload["vehicleDetails"] = json!({ "vehicleType": "existing" });

        let (_, result) = check_payload::<Request>(&payload);
        assert_eq!(result.error_for("vehicleDetails.vehicle"), Some("Select a vehicle"));
        assert_eq!(
            result.error_for("vehicleDetails.newVehicleDetails.vehicleNo"),
            None
        );
    }

    #[test]
    fn test_missing_discriminant_reported() {
        let mut payload = new_vehicle_request();
        payload["customerDetails"] = json!({});

        let (_, result) = check_payload::<Request>(&payload);
        assert_eq!(
            result.error_for("customerDetails.customerType"),
            Some("Select a customer type")
        );
    }
}
