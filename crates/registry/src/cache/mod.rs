//! Per-profile snapshot cache with single-flight construction.
//!
//! # Concurrency
//!
//! - **Reads:** Wait-free. Published snapshots live in an immutable map behind an
//!   [`ArcSwap`]; a hit is one atomic load plus a hash lookup.
//! - **Builds:** At most one per profile key. Callers that miss take the in-flight lock,
//!   re-check the published map, then share one [`OnceLock`] cell per key. The lock is
//!   released before resolving, so builds for different keys run in parallel while
//!   callers for the same key block on the same cell.
//! - **Publication:** Under the in-flight lock, by copy-and-swap of the map. Writers are
//!   serialized by that lock, so no CAS loop is needed.
//!
//! # Invalidation
//!
//! [`SnapshotCache::reset`] and [`SnapshotCache::invalidate`] drop the in-flight cells
//! they cover. A build publishes only while its cell is still the registered one, so a
//! build that straddles a reset still answers its own waiters but is not published.
//! Builds of other keys are unaffected by `invalidate`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use arc_swap::ArcSwap;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::config::RegistryConfig;
use crate::index::CapabilityIndex;
use crate::profile::{ProfileDescriptor, ProfileKey};
use crate::resolver::resolve_all;
use crate::snapshot::Snapshot;


type Published = FxHashMap<ProfileKey, Arc<Snapshot>>;
type Cell = Arc<OnceLock<Arc<Snapshot>>>;

#[derive(Default)]
struct InFlight {
	cells: FxHashMap<ProfileKey, Cell>,
}

pub struct SnapshotCache {
	index: Arc<CapabilityIndex>,
	published: ArcSwap<Published>,
	inflight: Mutex<InFlight>,
	builds: AtomicU64,
}

impl SnapshotCache {
	pub fn new(index: Arc<CapabilityIndex>, config: &RegistryConfig) -> Self {
		let published =
			Published::with_capacity_and_hasher(config.expected_profiles, Default::default());
		Self {
			index,
			published: ArcSwap::from_pointee(published),
			inflight: Mutex::new(InFlight::default()),
			builds: AtomicU64::new(0),
		}
	}

	pub fn index(&self) -> &Arc<CapabilityIndex> {
		&self.index
	}

	/// Returns the snapshot for `profile`, resolving it on first use.
	pub fn get(&self, profile: ProfileDescriptor) -> Arc<Snapshot> {
		let key = profile.canonical_key();
		if let Some(snap) = self.peek_key(key) {
			return snap;
		}

		let cell = {
			let mut inflight = self.inflight.lock();
			if let Some(snap) = self.peek_key(key) {
				return snap;
			}
			Arc::clone(inflight.cells.entry(key).or_default())
		};

		let snap = Arc::clone(cell.get_or_init(|| self.build(profile)));
		self.publish(key, &cell, &snap);
		snap
	}

	/// Returns the published snapshot for `profile` without building.
	pub fn peek(&self, profile: ProfileDescriptor) -> Option<Arc<Snapshot>> {
		self.peek_key(profile.canonical_key())
	}

	#[inline]
	fn peek_key(&self, key: ProfileKey) -> Option<Arc<Snapshot>> {
		self.published.load().get(&key).cloned()
	}

	fn build(&self, profile: ProfileDescriptor) -> Arc<Snapshot> {
		self.builds.fetch_add(1, Ordering::Relaxed);
		let snap = resolve_all(&self.index, profile);
		debug!(
			registry = self.index.label(),
			profile = %profile,
			entries = snap.len(),
			available = snap.iter().filter(|(_, e)| e.available).count(),
			"resolved capability snapshot",
		);
		Arc::new(snap)
	}

	/// Publishes `snap` and retires `cell`, unless `cell` was dropped in the meantime.
	fn publish(&self, key: ProfileKey, cell: &Cell, snap: &Arc<Snapshot>) {
		let mut inflight = self.inflight.lock();
		if !inflight.cells.get(&key).is_some_and(|c| Arc::ptr_eq(c, cell)) {
			return;
		}
		inflight.cells.remove(&key);
		let current = self.published.load_full();
		if !current.contains_key(&key) {
			let mut next = Published::clone(&current);
			next.insert(key, Arc::clone(snap));
			self.published.store(Arc::new(next));
		}
	}

	/// Drops the cached snapshot for one profile.
	pub fn invalidate(&self, profile: ProfileDescriptor) {
		let key = profile.canonical_key();
		let mut inflight = self.inflight.lock();
		inflight.cells.remove(&key);
		let current = self.published.load_full();
		if current.contains_key(&key) {
			let mut next = Published::clone(&current);
			next.remove(&key);
			self.published.store(Arc::new(next));
		}
		trace!(registry = self.index.label(), profile = %profile, "snapshot invalidated");
	}

	/// Drops every cached snapshot.
	pub fn reset(&self) {
		let mut inflight = self.inflight.lock();
		inflight.cells.clear();
		self.published.store(Arc::new(Published::default()));
		trace!(registry = self.index.label(), "snapshot cache reset");
	}

	/// Number of resolution runs performed so far.
	pub fn build_count(&self) -> u64 {
		self.builds.load(Ordering::Relaxed)
	}

	/// Number of published snapshots.
	pub fn cached_len(&self) -> usize {
		self.published.load().len()
	}
}
