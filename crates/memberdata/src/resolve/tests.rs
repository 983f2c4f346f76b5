use roster_primitives::{IdentityKey, PropertyType};
use rstest::rstest;

use super::*;

fn schema_with(default: Option<&str>) -> PropertySchema {
	let mut schema = PropertySchema::new();
	if let Some(default) = default {
		schema.define("email", PropertyType::String, default).unwrap();
	}
	schema
}

fn identity_with(value: &str) -> Identity {
	Identity::new("jdoe").with_attribute("email", value)
}

fn record() -> MemberRecord {
	MemberRecord::staged(IdentityKey::from("jdoe"))
}

#[rstest]
#[case::undefined_and_set(None, "y", Some("y"))]
#[case::undefined_and_empty(None, "", None)]
#[case::empty_default_and_empty(Some(""), "", Some(""))]
#[case::empty_default_and_set(Some(""), "y", Some("y"))]
#[case::default_wins_over_empty(Some("x"), "", Some("x"))]
#[case::default_wins_over_set(Some("x"), "y", Some("x"))]
fn merge_rule_table(#[case] schema: Option<&str>, #[case] identity: &str, #[case] expected: Option<&str>) {
	let result = resolve_property(
		&record(),
		&schema_with(schema),
		&identity_with(identity),
		"email",
		None,
	);

	match expected {
		Some(value) => assert_eq!(result.unwrap(), PropertyValue::from(value)),
		None => assert!(matches!(result, Err(MemberDataError::PropertyNotFound(name)) if name == "email")),
	}
}

#[test]
fn override_short_circuits() {
	let record = record();
	record.set_override("email".into(), PropertyValue::from(""));

	let value = resolve_property(
		&record,
		&schema_with(Some("x")),
		&identity_with("y"),
		"email",
		None,
	)
	.unwrap();
	assert_eq!(value, PropertyValue::from(""));
}

#[test]
fn fallback_stands_in_for_missing_attribute() {
	let identity = Identity::new("jdoe");
	let value = resolve_property(
		&record(),
		&PropertySchema::new(),
		&identity,
		"nickname",
		Some(PropertyValue::from("jd")),
	)
	.unwrap();
	assert_eq!(value, PropertyValue::from("jd"));
}

#[test]
fn falsy_fallback_still_fails_for_undefined_property() {
	let identity = Identity::new("jdoe");
	let result = resolve_property(
		&record(),
		&PropertySchema::new(),
		&identity,
		"nickname",
		Some(PropertyValue::from("")),
	);
	assert!(matches!(result, Err(MemberDataError::PropertyNotFound(_))));
}

#[test]
fn fallback_does_not_replace_present_attribute() {
	let value = resolve_property(
		&record(),
		&PropertySchema::new(),
		&identity_with("real@x.com"),
		"email",
		Some(PropertyValue::from("fallback")),
	)
	.unwrap();
	assert_eq!(value, PropertyValue::from("real@x.com"));
}

#[test]
fn false_boolean_default_yields_to_true_identity_value() {
	let mut schema = PropertySchema::new();
	schema.define("listed", PropertyType::Boolean, false).unwrap();
	let identity = Identity::new("jdoe").with_attribute("listed", true);

	assert_eq!(
		merge_layers("listed", Some(PropertyValue::Bool(false)), identity.get_attribute("listed")).unwrap(),
		PropertyValue::Bool(true)
	);
	assert_eq!(
		resolve_property(&record(), &schema, &Identity::new("jdoe"), "listed", None).unwrap(),
		PropertyValue::Bool(false)
	);
}
