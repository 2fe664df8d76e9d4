//! Vital-sign storage.
//!
//! [`VitalsRepository`] is the read/update seam between the services and wherever readings
//! are kept. Two implementations are provided:
//!
//! - [`memory::InMemoryVitalsRepository`] for tests and short-lived processes
//! - [`file::FileVitalsRepository`] storing one JSON document per reading under
//!   `<data_dir>/vital_signs/<user_id>/`
//!
//! Both support [`VitalsRepository::observe`], which hands out a `tokio::sync::watch` receiver
//! that always holds the user's most recent reading.

pub mod file;
pub mod memory;
mod observers;

use crate::reading::VitalSignEntry;
use crate::VitalsResult;
use fitnest_types::UserId;
use tokio::sync::watch;

pub use file::FileVitalsRepository;
pub use memory::InMemoryVitalsRepository;

/// Receiver side of a per-user latest-reading stream.
pub type LatestReceiver = watch::Receiver<Option<VitalSignEntry>>;

pub trait VitalsRepository: Send + Sync {
    /// Stores one reading and notifies observers of its user.
    fn record(&self, entry: VitalSignEntry) -> VitalsResult<()>;

    /// The user's most recent reading by timestamp. Readings sharing a timestamp are ordered by
    /// when they were recorded, later first.
    fn latest(&self, user: &UserId) -> VitalsResult<Option<VitalSignEntry>>;

    /// Up to `limit` readings for the user, newest first.
    fn history(&self, user: &UserId, limit: usize) -> VitalsResult<Vec<VitalSignEntry>>;

    /// Subscribes to the user's latest reading.
    ///
    /// The receiver starts out holding the current latest reading (or `None`) and is updated
    /// every time a newer reading is recorded.
    fn observe(&self, user: &UserId) -> VitalsResult<LatestReceiver>;
}

/// Sorts `(entry, recorded_order)` pairs newest first and drops the ordering key.
pub(crate) fn newest_first<K: Ord>(mut entries: Vec<(VitalSignEntry, K)>) -> Vec<VitalSignEntry> {
    entries.sort_by(|(a, a_key), (b, b_key)| {
        b.timestamp
            .cmp(&a.timestamp)
            .then_with(|| b_key.cmp(a_key))
    });
    entries.into_iter().map(|(entry, _)| entry).collect()
}
