use roster_primitives::PropertyValue;

use super::*;

#[test]
fn missing_file_opens_empty() {
	let dir = tempfile::tempdir().unwrap();
	let store = FileRecordStore::open(dir.path().join("members.bin")).unwrap();
	assert!(store.is_empty().unwrap());
	assert!(!store.path().exists());
}

#[test]
fn records_survive_reopen() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("nested").join("members.bin");

	{
		let store = FileRecordStore::open(&path).unwrap();
		store
			.put(MemberRecordData::new("jdoe").with_override("email", "jdoe@x.com"))
			.unwrap();
		store.put(MemberRecordData::new("asmith")).unwrap();
		assert!(store.delete(&"asmith".into()).unwrap());
	}

	let reopened = FileRecordStore::open(&path).unwrap();
	assert_eq!(reopened.keys().unwrap(), vec![IdentityKey::from("jdoe")]);
	let record = reopened.get(&"jdoe".into()).unwrap().unwrap();
	assert_eq!(record.overrides.get("email"), Some(&PropertyValue::from("jdoe@x.com")));
	assert!(!path.with_extension("tmp").exists());
}

#[test]
fn deleting_a_missing_key_does_not_write() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("members.bin");
	let store = FileRecordStore::open(&path).unwrap();

	assert!(!store.delete(&"nobody".into()).unwrap());
	assert!(!path.exists());
}

#[test]
fn corrupt_snapshot_is_a_codec_error() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("members.bin");
	std::fs::write(&path, [0xff, 0xff, 0xff]).unwrap();

	let err = FileRecordStore::open(&path).unwrap_err();
	assert!(matches!(err, StoreError::Codec(_)));
}
