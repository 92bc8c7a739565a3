use std::sync::Arc;

use log::debug;
use parking_lot::RwLock;

use crate::{error::Error, record::StateVectorRecord};

/// [StoreState] of the [EphemerisStore]
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
pub enum StoreState {
    /// Nothing loaded yet, or explicitly cleared
    #[default]
    Empty,
    /// Records were installed by [EphemerisStore::load]
    Loaded,
}

impl std::fmt::Display for StoreState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty"),
            Self::Loaded => write!(f, "loaded"),
        }
    }
}

/// [Snapshot] is an immutable view of the [EphemerisStore] content,
/// as it existed at a single instant. Cloning is cheap (shared sequence).
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    state: StoreState,
    records: Arc<[StateVectorRecord]>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            state: StoreState::Empty,
            records: Arc::from(Vec::new()),
        }
    }
}

impl Snapshot {
    fn loaded(records: Vec<StateVectorRecord>) -> Self {
        Self {
            state: StoreState::Loaded,
            records: Arc::from(records),
        }
    }

    /// [StoreState] at the time this [Snapshot] was taken
    pub fn state(&self) -> StoreState {
        self.state
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when no record may be queried: cleared,
    /// never loaded, or loaded with an empty sequence.
    pub fn is_empty(&self) -> bool {
        self.state == StoreState::Empty || self.records.is_empty()
    }

    /// Returns the ordered records, or [Error::EmptyStore]
    /// when there is nothing to query.
    pub fn records(&self) -> Result<&[StateVectorRecord], Error> {
        if self.is_empty() {
            Err(Error::EmptyStore)
        } else {
            Ok(&self.records)
        }
    }

    /// Exact epoch lookup: first record (in ascending order) whose epoch
    /// matches `epoch` exactly.
    pub fn find_by_epoch(&self, epoch: &str) -> Result<&StateVectorRecord, Error> {
        self.records()?
            .iter()
            .find(|record| record.epoch == epoch)
            .ok_or_else(|| Error::EpochNotFound(epoch.to_string()))
    }

    /// Iterates all epochs, in snapshot order
    pub fn epochs(&self) -> impl Iterator<Item = &str> + '_ {
        self.records.iter().map(|record| record.epoch.as_str())
    }
}

/// [EphemerisStore] owns the time ordered sequence of [StateVectorRecord]s.
///
/// Writers ([EphemerisStore::load], [EphemerisStore::clear]) never mutate
/// the sequence in place: they install a new [Snapshot] wholesale.
/// Readers only ever see one complete [Snapshot], possibly outdated
/// by a concurrent writer, never a mix of two.
#[derive(Debug, Default)]
pub struct EphemerisStore {
    current: RwLock<Snapshot>,
}

impl EphemerisStore {
    /// Creates a new (empty) [EphemerisStore]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new [EphemerisStore] loaded with `records`
    pub fn with_records(records: Vec<StateVectorRecord>) -> Self {
        let store = Self::new();
        store.load(records);
        store
    }

    /// Replaces the current content with `records`, atomically.
    /// Ordering is trusted (not verified) and duplicate epochs are
    /// accepted as is.
    pub fn load(&self, records: Vec<StateVectorRecord>) {
        let snapshot = Snapshot::loaded(records);
        let size = snapshot.len();

        // guard is released here, previous sequence is freed past the lock
        let previous = std::mem::replace(&mut *self.current.write(), snapshot);

        debug!(
            "ephemeris store loaded: {} state vectors (replacing {})",
            size,
            previous.len()
        );
    }

    /// Drops the current content, atomically.
    pub fn clear(&self) {
        let previous = std::mem::take(&mut *self.current.write());
        debug!("ephemeris store cleared ({} state vectors)", previous.len());
    }

    /// Returns a consistent [Snapshot] of the current content.
    pub fn snapshot(&self) -> Snapshot {
        self.current.read().clone()
    }

    /// Current [StoreState]
    pub fn state(&self) -> StoreState {
        self.current.read().state()
    }

    /// Exact epoch lookup, see [Snapshot::find_by_epoch].
    pub fn find_by_epoch(&self, epoch: &str) -> Result<StateVectorRecord, Error> {
        self.snapshot().find_by_epoch(epoch).cloned()
    }
}
