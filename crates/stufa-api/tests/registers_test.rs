#![allow(clippy::unwrap_used)]
// Catalog tests: pure lookups and write validation, no network involved.

use pretty_assertions::assert_eq;

use stufa_api::{Error, RegisterKey, RegisterValue};

// ── Lookups ─────────────────────────────────────────────────────────

#[test]
fn test_catalog_covers_every_key() {
    assert_eq!(RegisterKey::ALL.len(), 10);
    for key in RegisterKey::ALL {
        let spec = key.spec();
        assert_eq!(spec.key, key);
        assert_eq!(RegisterKey::from_field(spec.field), Some(key));
    }
}

#[test]
fn test_writable_registers_carry_bounds() {
    let spec = RegisterKey::TargetPower.spec();
    assert_eq!(spec.field, "targetPower");
    assert_eq!(spec.parameter_id, Some(5));
    assert_eq!((spec.min, spec.max), (Some(1), Some(5)));

    let spec = RegisterKey::TargetRoomTemperature.spec();
    assert_eq!(spec.parameter_id, Some(4));
    assert_eq!((spec.min, spec.max), (Some(65), Some(80)));

    assert!(!RegisterKey::RoomTemperature.spec().is_writable());
    assert!(!RegisterKey::Alarm.spec().is_writable());
}

#[test]
fn test_parse_cli_spelling() {
    assert_eq!(RegisterKey::parse("target-power").unwrap(), RegisterKey::TargetPower);
    assert_eq!(RegisterKey::parse("machine-state").unwrap(), RegisterKey::MachineState);

    let result = RegisterKey::parse("afterburner");
    assert!(
        matches!(result, Err(Error::UnknownRegister { .. })),
        "expected UnknownRegister, got: {result:?}"
    );
}

// ── Write validation ────────────────────────────────────────────────

#[test]
fn test_validate_write_bounds_are_inclusive() {
    let spec = RegisterKey::TargetPower.spec();
    assert_eq!(spec.validate_write(1.0).unwrap(), (5, 1));
    assert_eq!(spec.validate_write(5.0).unwrap(), (5, 5));
    assert!(spec.validate_write(0.0).is_err());
    assert!(spec.validate_write(6.0).is_err());
}

#[test]
fn test_validate_write_truncates_to_wire_integer() {
    let spec = RegisterKey::TargetRoomTemperature.spec();
    assert_eq!(spec.validate_write(70.5).unwrap(), (4, 70));
}

#[test]
fn test_validate_write_rejects_read_only() {
    for key in [RegisterKey::Alarm, RegisterKey::Power, RegisterKey::SmokeTemperature] {
        let result = key.spec().validate_write(1.0);
        assert!(
            matches!(result, Err(Error::Validation { .. })),
            "{key} should be unwritable, got: {result:?}"
        );
    }
}

// ── Labels ──────────────────────────────────────────────────────────

#[test]
fn test_label_tables_round_trip() {
    let spec = RegisterKey::MachineState.spec();
    for (raw, label) in spec.labels {
        assert_eq!(spec.label_for(*raw), Some(*label));
        assert_eq!(spec.value_for_label(label), Some(*raw));
    }
    assert_eq!(spec.label_for(42), None);
    assert_eq!(spec.value_for_label("Sideways"), None);
}

#[test]
fn test_unlabelled_registers_have_no_labels() {
    assert!(RegisterKey::TargetPower.spec().labels.is_empty());
    assert_eq!(RegisterKey::TargetPower.spec().label_for(3), None);
}

// ── Values ──────────────────────────────────────────────────────────

#[test]
fn test_register_value_display_and_integer_form() {
    assert_eq!(RegisterValue::Int(4).to_string(), "4");
    assert_eq!(RegisterValue::Float(21.5).to_string(), "21.5");
    assert_eq!(RegisterValue::Text("2023-11-02".into()).to_string(), "2023-11-02");

    assert_eq!(RegisterValue::Int(4).as_i64(), Some(4));
    assert_eq!(RegisterValue::Float(4.0).as_i64(), Some(4));
    assert_eq!(RegisterValue::Float(4.5).as_i64(), None);
    assert_eq!(RegisterValue::Text("4".into()).as_i64(), None);
}
