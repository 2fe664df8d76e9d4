//! In-memory vital-sign storage.

use super::observers::ObserverRegistry;
use super::{newest_first, LatestReceiver, VitalsRepository};
use crate::reading::VitalSignEntry;
use crate::{VitalsError, VitalsResult};
use fitnest_types::UserId;
use std::collections::HashMap;
use std::sync::Mutex;

/// Keeps readings in a map keyed by user. Nothing survives the process.
#[derive(Debug, Default)]
pub struct InMemoryVitalsRepository {
    entries: Mutex<HashMap<UserId, Vec<VitalSignEntry>>>,
    observers: ObserverRegistry,
}

impl InMemoryVitalsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn newest(list: &[VitalSignEntry]) -> Option<VitalSignEntry> {
        // Position in the list is the recording order.
        list.iter()
            .enumerate()
            .max_by_key(|(position, entry)| (entry.timestamp, *position))
            .map(|(_, entry)| entry.clone())
    }

    fn sorted(&self, user: &UserId) -> VitalsResult<Vec<VitalSignEntry>> {
        let entries = self.entries.lock().map_err(|_| VitalsError::LockPoisoned)?;
        let Some(list) = entries.get(user) else {
            return Ok(Vec::new());
        };

        let keyed: Vec<_> = list.iter().cloned().zip(0usize..).collect();
        Ok(newest_first(keyed))
    }
}

impl VitalsRepository for InMemoryVitalsRepository {
    fn record(&self, entry: VitalSignEntry) -> VitalsResult<()> {
        let user = entry.user_id.clone();
        let mut entries = self.entries.lock().map_err(|_| VitalsError::LockPoisoned)?;
        let list = entries.entry(user.clone()).or_default();
        list.push(entry);

        self.observers.publish(&user, || Ok(Self::newest(list.as_slice())))
    }

    fn latest(&self, user: &UserId) -> VitalsResult<Option<VitalSignEntry>> {
        let entries = self.entries.lock().map_err(|_| VitalsError::LockPoisoned)?;
        Ok(entries.get(user).and_then(|list| Self::newest(list)))
    }

    fn history(&self, user: &UserId, limit: usize) -> VitalsResult<Vec<VitalSignEntry>> {
        let mut entries = self.sorted(user)?;
        entries.truncate(limit);
        Ok(entries)
    }

    fn observe(&self, user: &UserId) -> VitalsResult<LatestReceiver> {
        let entries = self.entries.lock().map_err(|_| VitalsError::LockPoisoned)?;
        let current = entries.get(user).and_then(|list| Self::newest(list));
        self.observers.subscribe(user, current)
    }
}
