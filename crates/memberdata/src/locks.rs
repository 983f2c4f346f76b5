use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use roster_primitives::IdentityKey;

/// Per-key write locks.
///
/// Writes and promotions of one identity are serialized; different
/// identities proceed independently. An entry lives only while some caller
/// holds or waits on it.
#[derive(Debug, Default)]
pub(crate) struct KeyLocks {
	locks: Mutex<HashMap<IdentityKey, Arc<Mutex<()>>>>,
}

impl KeyLocks {
	/// Runs `f` while holding the lock for `key`.
	pub(crate) fn with_lock<T>(&self, key: &IdentityKey, f: impl FnOnce() -> T) -> T {
		let lock = self.acquire(key);
		let out = {
			let _guard = lock.lock();
			f()
		};
		self.release(key, lock);
		out
	}

	fn acquire(&self, key: &IdentityKey) -> Arc<Mutex<()>> {
		self.locks
			.lock()
			.entry(key.clone())
			.or_insert_with(|| Arc::new(Mutex::new(())))
			.clone()
	}

	fn release(&self, key: &IdentityKey, lock: Arc<Mutex<()>>) {
		let mut locks = self.locks.lock();
		// Handles are only cloned under the map lock: two means the map's and ours.
		if Arc::strong_count(&lock) == 2
			&& locks.get(key).is_some_and(|entry| Arc::ptr_eq(entry, &lock))
		{
			locks.remove(key);
		}
		// Drop our handle before the map lock so the next release counts it out.
		drop(lock);
	}

	#[cfg(test)]
	pub(crate) fn len(&self) -> usize {
		self.locks.lock().len()
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Barrier;
	use std::thread;

	use super::*;

	#[test]
	fn entries_are_dropped_after_use() {
		let locks = KeyLocks::default();

		locks.with_lock(&IdentityKey::new("a"), || {
			locks.with_lock(&IdentityKey::new("b"), || assert_eq!(locks.len(), 2));
			assert_eq!(locks.len(), 1);
		});

		assert_eq!(locks.len(), 0);
	}

	#[test]
	fn contended_key_is_serialized_and_released() {
		let locks = KeyLocks::default();
		let counter = Mutex::new(Vec::new());
		let barrier = Barrier::new(8);

		thread::scope(|s| {
			for i in 0..8 {
				let (locks, counter, barrier) = (&locks, &counter, &barrier);
				s.spawn(move || {
					barrier.wait();
					locks.with_lock(&IdentityKey::new("jdoe"), || {
						counter.lock().push(i);
					});
				});
			}
		});

		assert_eq!(counter.lock().len(), 8);
		assert_eq!(locks.len(), 0);
	}
}
