//! File-backed vital-sign storage.
//!
//! ## Storage Layout
//!
//! ```text
//! vital_signs/
//!   <user_id>/
//!     <recorded_nanos>-<uuid>.json   # one VitalSignEntry document per reading
//! ```
//!
//! The `recorded_nanos` prefix is the wall-clock time the document was written, zero-padded so
//! file names sort in recording order. It only breaks ties between readings sharing a
//! `timestamp`; ordering is otherwise by the document's own `timestamp`.

use super::observers::ObserverRegistry;
use super::{newest_first, LatestReceiver, VitalsRepository};
use crate::config::CoreConfig;
use crate::reading::VitalSignEntry;
use crate::{VitalsError, VitalsResult};
use chrono::Utc;
use fitnest_types::UserId;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;
use uuid::Uuid;

#[derive(Debug)]
pub struct FileVitalsRepository {
    root: PathBuf,
    /// Serializes writes with their publish, and subscriptions with their seed.
    writes: Mutex<()>,
    observers: ObserverRegistry,
}

impl FileVitalsRepository {
    /// Creates a repository rooted at the configured vital-signs directory.
    ///
    /// Directories are created lazily on the first write.
    pub fn new(cfg: &CoreConfig) -> Self {
        Self::with_root(cfg.vital_signs_dir())
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            writes: Mutex::new(()),
            observers: ObserverRegistry::default(),
        }
    }

    fn user_dir(&self, user: &UserId) -> PathBuf {
        self.root.join(user.as_str())
    }

    fn document_name() -> String {
        let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
        format!("{nanos:020}-{}.json", Uuid::new_v4().simple())
    }

    /// Loads every readable document for the user, newest first.
    ///
    /// Files that cannot be read or parsed, or that belong to another user, are skipped with a
    /// warning rather than failing the whole query.
    fn load(&self, user: &UserId) -> VitalsResult<Vec<VitalSignEntry>> {
        let dir = self.user_dir(user);
        let iter = match fs::read_dir(&dir) {
            Ok(it) => it,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(VitalsError::FileRead(e)),
        };

        let mut keyed = Vec::new();
        for ent in iter.flatten() {
            let path = ent.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }

            let contents = match fs::read_to_string(&path) {
                Ok(contents) => contents,
                Err(e) => {
                    tracing::warn!("failed to read vital signs {}: {}", path.display(), e);
                    continue;
                }
            };

            match serde_json::from_str::<VitalSignEntry>(&contents) {
                Ok(entry) if entry.user_id == *user => {
                    let name = ent.file_name().to_string_lossy().into_owned();
                    keyed.push((entry, name));
                }
                Ok(entry) => {
                    tracing::warn!(
                        "skipping vital signs {} owned by {}",
                        path.display(),
                        entry.user_id
                    );
                }
                Err(e) => {
                    tracing::warn!("failed to parse vital signs {}: {}", path.display(), e);
                }
            }
        }

        Ok(newest_first(keyed))
    }
}

impl VitalsRepository for FileVitalsRepository {
    fn record(&self, entry: VitalSignEntry) -> VitalsResult<()> {
        let _guard = self.writes.lock().map_err(|_| VitalsError::LockPoisoned)?;
        let dir = self.user_dir(&entry.user_id);
        fs::create_dir_all(&dir).map_err(VitalsError::StorageDirCreation)?;

        let json = serde_json::to_string_pretty(&entry).map_err(VitalsError::Serialization)?;
        let path = dir.join(Self::document_name());
        fs::write(&path, json).map_err(VitalsError::FileWrite)?;
        tracing::debug!("wrote vital signs {}", path.display());

        let user = &entry.user_id;
        self.observers.publish(user, || self.latest(user))
    }

    fn latest(&self, user: &UserId) -> VitalsResult<Option<VitalSignEntry>> {
        Ok(self.load(user)?.into_iter().next())
    }

    fn history(&self, user: &UserId, limit: usize) -> VitalsResult<Vec<VitalSignEntry>> {
        let mut entries = self.load(user)?;
        entries.truncate(limit);
        Ok(entries)
    }

    fn observe(&self, user: &UserId) -> VitalsResult<LatestReceiver> {
        let _guard = self.writes.lock().map_err(|_| VitalsError::LockPoisoned)?;
        let current = self.latest(user)?;
        self.observers.subscribe(user, current)
    }
}
