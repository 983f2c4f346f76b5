use std::io::Write;

use roster_identity::IdentityProvider;
use roster_primitives::{IdentityKey, PropertyValue};

use super::*;

const SAMPLE: &str = r#"
[store]
path = "members.bin"

[[property]]
name = "email"
type = "string"
default = ""

[[property]]
name = "age"
type = "int"
default = 18

[[property]]
name = "ratio"
type = "float"
default = 1

[[property]]
name = "joined"
type = "date"
default = 2001-02-03

[[property]]
name = "tags"
type = "lines"

[[identity]]
key = "jdoe"
roles = ["Member"]
domains = ["example.com"]
password = "secret"
attributes = { fullname = "J. Doe", aliases = ["jd", "johnny"] }

[[identity]]
key = "asmith"
"#;

#[test]
fn parse_full_config() {
	let config = RosterConfig::parse(SAMPLE).unwrap();

	assert_eq!(config.store.path, Some(PathBuf::from("members.bin")));
	assert_eq!(config.properties.len(), 5);
	assert_eq!(config.properties[1].value_type, PropertyType::Int);
	assert_eq!(config.identities.len(), 2);
	assert!(config.identities[1].roles.is_empty());
}

#[test]
fn schema_keeps_declared_order_and_coerces_defaults() {
	let schema = RosterConfig::parse(SAMPLE).unwrap().schema().unwrap();

	assert_eq!(schema.list_names(), vec!["email", "age", "ratio", "joined", "tags"]);
	assert_eq!(schema.lookup("age").unwrap().default, PropertyValue::Int(18));
	assert_eq!(schema.lookup("ratio").unwrap().default, PropertyValue::Float(1.0));
	assert_eq!(
		schema.lookup("joined").unwrap().default.to_string(),
		"2001-02-03"
	);
	assert_eq!(schema.lookup("tags").unwrap().default, PropertyValue::Lines(Vec::new()));
}

#[test]
fn empty_config_uses_standard_schema() {
	let config = RosterConfig::parse("").unwrap();
	let schema = config.schema().unwrap();

	assert_eq!(
		schema.list_names(),
		vec!["email", "portal_skin", "listed", "login_time", "last_login_time"]
	);
	assert!(config.store_path().is_none());
}

#[test]
fn bad_default_is_reported_by_name() {
	let config = RosterConfig::parse(
		r#"
[[property]]
name = "age"
type = "int"
default = "eighteen"
"#,
	)
	.unwrap();

	let err = config.schema().unwrap_err();
	assert!(matches!(err, ConfigError::InvalidDefault { ref name, .. } if name == "age"));
}

#[test]
fn duplicate_property_is_a_schema_error() {
	let config = RosterConfig::parse(
		r#"
[[property]]
name = "email"
type = "string"

[[property]]
name = "email"
type = "text"
"#,
	)
	.unwrap();

	assert!(matches!(config.schema(), Err(ConfigError::Schema(_))));
}

#[test]
fn unknown_fields_and_types_are_rejected() {
	assert!(matches!(
		RosterConfig::parse("[store]\nfile = \"x\"\n"),
		Err(ConfigError::Toml(_))
	));
	assert!(matches!(
		RosterConfig::parse("[[property]]\nname = \"x\"\ntype = \"blob\"\n"),
		Err(ConfigError::Toml(_))
	));
}

#[test]
fn provider_hashes_passwords_and_converts_attributes() {
	let provider = RosterConfig::parse(SAMPLE).unwrap().provider().unwrap();

	let jdoe = provider.lookup(&IdentityKey::new("jdoe")).unwrap();
	assert_eq!(jdoe.roles(), ["Member".to_string()]);
	assert_eq!(jdoe.credential_hash(), Some(hash_credential("secret").as_str()));
	assert_eq!(jdoe.get_attribute("fullname"), Some(PropertyValue::from("J. Doe")));
	assert_eq!(
		jdoe.get_attribute("aliases"),
		Some(PropertyValue::Lines(vec!["jd".into(), "johnny".into()]))
	);

	let asmith = provider.lookup(&IdentityKey::new("asmith")).unwrap();
	assert_eq!(asmith.credential_hash(), None);
}

#[test]
fn nested_attribute_tables_are_unsupported() {
	let config = RosterConfig::parse(
		r#"
[[identity]]
key = "jdoe"
attributes = { address = { city = "Oslo" } }
"#,
	)
	.unwrap();

	let err = config.identities().unwrap_err();
	assert!(matches!(err, ConfigError::UnsupportedValue { ref name, kind: "table" } if name == "address"));
}

#[test]
fn load_resolves_store_path_against_file_directory() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("config.toml");
	let mut file = std::fs::File::create(&path).unwrap();
	file.write_all(SAMPLE.as_bytes()).unwrap();

	let config = RosterConfig::load(&path).unwrap();

	assert_eq!(config.store_path(), Some(dir.path().join("members.bin")));
}

#[test]
fn absolute_store_path_is_kept() {
	let dir = tempfile::tempdir().unwrap();
	let store = dir.path().join("elsewhere.bin");
	let path = dir.path().join("config.toml");
	std::fs::write(&path, format!("[store]\npath = {:?}\n", store.display().to_string())).unwrap();

	let config = RosterConfig::load(&path).unwrap();

	assert_eq!(config.store_path(), Some(store));
}

#[test]
fn missing_explicit_file_is_an_io_error() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("absent.toml");

	let err = RosterConfig::load_or_default(Some(&path)).unwrap_err();
	assert!(matches!(err, ConfigError::Io { path: ref p, .. } if *p == path));
}
