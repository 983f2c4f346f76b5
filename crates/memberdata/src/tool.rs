use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use roster_identity::{IdentityKey, IdentityProvider};
use roster_primitives::PropertyValue;
use roster_schema::{CoercionError, PropertySchema, coerce_value, standard_schema};
use roster_store::{MemberRecordData, RecordStore};
use tracing::{debug, warn};

use crate::locks::KeyLocks;
use crate::resolve::resolve_property;
use crate::view::{View, is_reserved, resolve_view};
use crate::{Lifecycle, MemberDataError, MemberHandle, MemberRecord, Result, SecurityProfile, StagingCache};

/// Outcome of [`MemberDataTool::set_properties`].
///
/// Writes apply property by property: a rejected value does not stop the rest
/// of the batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteReport {
	/// Properties stored as overrides, in schema order.
	pub applied: Vec<String>,
	/// Names skipped because the schema does not define them or the identity
	/// provider owns them.
	pub ignored: Vec<String>,
	/// Values that could not be coerced to their declared type.
	pub rejected: Vec<CoercionError>,
}

impl WriteReport {
	/// Returns true if no value was rejected.
	pub fn is_complete(&self) -> bool {
		self.rejected.is_empty()
	}

	/// Converts the first rejection into an error.
	pub fn into_result(self) -> Result<Vec<String>> {
		match self.rejected.into_iter().next() {
			Some(err) => Err(err.into()),
			None => Ok(self.applied),
		}
	}
}

/// Member data tool: the façade over staging, storage, and resolution.
///
/// Thread-safe; share it via `Arc<MemberDataTool>`.
pub struct MemberDataTool {
	provider: Arc<dyn IdentityProvider>,
	store: Arc<dyn RecordStore>,
	schema: RwLock<PropertySchema>,
	staging: Arc<StagingCache>,
	locks: KeyLocks,
}

impl fmt::Debug for MemberDataTool {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MemberDataTool")
			.field("schema", &self.schema.read().list_names())
			.field("staged", &self.staging.len())
			.finish_non_exhaustive()
	}
}

impl MemberDataTool {
	/// Creates a tool with the standard member properties and a fresh
	/// staging cache.
	pub fn new(provider: Arc<dyn IdentityProvider>, store: Arc<dyn RecordStore>) -> Self {
		Self {
			provider,
			store,
			schema: RwLock::new(standard_schema()),
			staging: Arc::new(StagingCache::new()),
			locks: KeyLocks::default(),
		}
	}

	/// Replaces the property schema.
	pub fn with_schema(mut self, schema: PropertySchema) -> Self {
		self.schema = RwLock::new(schema);
		self
	}

	/// Uses an externally owned staging cache.
	pub fn with_staging(mut self, staging: Arc<StagingCache>) -> Self {
		self.staging = staging;
		self
	}

	pub fn provider(&self) -> &Arc<dyn IdentityProvider> {
		&self.provider
	}

	pub fn store(&self) -> &Arc<dyn RecordStore> {
		&self.store
	}

	pub fn staging(&self) -> &Arc<StagingCache> {
		&self.staging
	}

	/// Read access to the property schema.
	pub fn schema(&self) -> RwLockReadGuard<'_, PropertySchema> {
		self.schema.read()
	}

	/// Write access to the property schema.
	///
	/// Existing overrides for a removed property stay stored but are no longer
	/// writable.
	pub fn schema_mut(&self) -> RwLockWriteGuard<'_, PropertySchema> {
		self.schema.write()
	}

	/// Returns the member record for `key`.
	///
	/// While any caller holds a record for `key`, every lookup returns that same
	/// instance. Otherwise a stored record is hydrated from the record store, or
	/// an empty one is staged for a key seen for the first time. Never writes to
	/// the record store.
	pub fn get_or_create(&self, key: &IdentityKey) -> Result<MemberHandle> {
		let mut entries = self.staging.lock();
		if let Some(record) = entries.loaded(key) {
			return Ok(record);
		}
		if let Some(record) = entries.staged.get(key) {
			return Ok(record.clone());
		}
		if let Some(data) = self.store.get(key)? {
			let record = Arc::new(MemberRecord::hydrated(data));
			entries.register_loaded(&record);
			debug!(key = %key, "member record hydrated");
			return Ok(record);
		}

		let record = Arc::new(MemberRecord::staged(key.clone()));
		entries.staged.insert(key.clone(), record.clone());
		debug!(key = %key, "member record staged");
		Ok(record)
	}

	/// Moves a staged record into the record store.
	///
	/// Returns `false` without touching the store if the record is already
	/// persisted.
	pub fn promote(&self, record: &MemberHandle) -> Result<bool> {
		self.locks.with_lock(record.key(), || {
			if record.is_persisted() {
				return Ok(false);
			}
			let overrides = self.current_overrides(record)?;
			self.commit_locked(record, overrides)
		})
	}

	/// Writes explicit property overrides and persists the record.
	///
	/// Only schema-defined, non-reserved names are written; string values are
	/// coerced to the declared type. Unknown names are ignored. The record is
	/// promoted afterwards, or its data upserted if it was already persisted.
	/// The record's in-memory overrides change only once the store accepted
	/// the write.
	pub fn set_properties<I, K, V>(&self, record: &MemberHandle, mapping: I) -> Result<WriteReport>
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<PropertyValue>,
	{
		let mut mapping: BTreeMap<String, PropertyValue> = mapping
			.into_iter()
			.map(|(name, value)| (name.into(), value.into()))
			.collect();

		self.locks.with_lock(record.key(), || {
			let mut overrides = self.current_overrides(record)?;
			let mut report = WriteReport::default();
			{
				let schema = self.schema.read();
				for def in schema.iter() {
					let Some(value) = mapping.remove(&def.name) else {
						continue;
					};
					if is_reserved(&def.name) {
						report.ignored.push(def.name.clone());
						continue;
					}
					match coerce_value(&def.name, def.value_type, value) {
						Ok(value) => {
							overrides.insert(def.name.clone(), value);
							report.applied.push(def.name.clone());
						}
						Err(err) => {
							warn!(key = %record.key(), error = %err, "property write rejected");
							report.rejected.push(err);
						}
					}
				}
			}
			report.ignored.extend(mapping.into_keys());

			self.commit_locked(record, overrides)?;
			Ok(report)
		})
	}

	/// Overrides a write through `record` starts from. Caller holds the key lock.
	///
	/// The store is authoritative for persisted records. A staged record whose
	/// key was stored meanwhile (through another instance, after the staging
	/// cache was cleared) layers its own overrides over the stored ones.
	fn current_overrides(&self, record: &MemberRecord) -> Result<BTreeMap<String, PropertyValue>> {
		let stored = self.store.get(record.key())?.map(|data| data.overrides);
		Ok(match (record.lifecycle(), stored) {
			(Lifecycle::Persisted, Some(stored)) => stored,
			(Lifecycle::Staged, Some(mut stored)) => {
				stored.extend(record.overrides());
				stored
			}
			(_, None) => record.overrides(),
		})
	}

	/// Stores `overrides` for `record`, then mirrors them into memory and
	/// promotes the record if it was staged. Caller holds the key lock.
	///
	/// Returns `true` if this call promoted the record.
	fn commit_locked(&self, record: &MemberHandle, overrides: BTreeMap<String, PropertyValue>) -> Result<bool> {
		let mut entries = self.staging.lock();
		self.store.put(MemberRecordData {
			key: record.key().clone(),
			overrides: overrides.clone(),
		})?;

		if let Some(live) = entries.loaded(record.key())
			&& !Arc::ptr_eq(&live, record)
		{
			live.replace_overrides(overrides.clone());
		}
		record.replace_overrides(overrides);

		if !record.mark_persisted() {
			return Ok(false);
		}
		entries.staged.remove(record.key());
		entries.register_loaded(record);
		debug!(key = %record.key(), "member record promoted");
		Ok(true)
	}

	/// Resolves property `name` for `record`.
	///
	/// An explicit override is returned without consulting the schema or the
	/// identity provider.
	pub fn get_property(
		&self,
		record: &MemberRecord,
		name: &str,
		fallback: Option<PropertyValue>,
	) -> Result<PropertyValue> {
		if let Some(value) = record.override_value(name) {
			return Ok(value);
		}
		let identity = self
			.provider
			.lookup(record.key())
			.ok_or_else(|| MemberDataError::IdentityUnavailable(record.key().clone()))?;
		let schema = self.schema.read();
		resolve_property(record, &schema, &identity, name, fallback)
	}

	/// Composes a fresh view of the member identified by `key`.
	pub fn view(&self, key: &IdentityKey) -> Result<View<'_>> {
		let identity = self
			.provider
			.lookup(key)
			.ok_or_else(|| MemberDataError::IdentityUnavailable(key.clone()))?;
		let record = self.get_or_create(key)?;
		resolve_view(self, record, Some(identity))
	}

	/// Composes a view for a record already in hand.
	pub fn view_record(&self, record: MemberHandle) -> Result<View<'_>> {
		let identity = self.provider.lookup(record.key());
		resolve_view(self, record, identity)
	}

	/// Applies a partial security-profile update through the identity provider.
	pub fn set_security_profile(&self, record: &MemberRecord, profile: SecurityProfile) -> Result<()> {
		let key = record.key();
		if let Some(password) = profile.password {
			self.provider.set_credential(key, &password)?;
		}
		if let Some(roles) = profile.roles {
			self.provider.set_roles(key, roles)?;
		}
		if let Some(domains) = profile.domains {
			self.provider.set_domains(key, domains)?;
		}
		Ok(())
	}

	/// Returns the keys of every persisted record.
	pub fn member_keys(&self) -> Result<Vec<IdentityKey>> {
		Ok(self.store.keys()?)
	}

	/// Returns the number of records awaiting their first write.
	pub fn staged_count(&self) -> usize {
		self.staging.len()
	}

	pub(crate) fn locks(&self) -> &KeyLocks {
		&self.locks
	}
}
