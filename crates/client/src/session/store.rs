//! Persistence for the single session blob.
//!
//! One opaque profile blob at a well-known path. Load either yields a
//! structurally complete [`Profile`] or nothing: a missing, unreadable, or
//! malformed blob reads as "signed out" so the caller falls through to
//! re-authentication instead of handling a storage error.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use thiserror::Error;
use tracing::{debug, warn};

use mealdrop_core::Profile;

/// Errors saving the session blob.
#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("failed to write session blob: {0}")]
    Io(#[from] io::Error),
    #[error("failed to encode session blob: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Storage for the active session's profile.
pub trait SessionStore: Send + Sync {
    /// Persist `profile` atomically as the active session.
    ///
    /// # Errors
    ///
    /// Returns `SessionStoreError` if the blob cannot be encoded or written.
    fn save(&self, profile: &Profile) -> Result<(), SessionStoreError>;

    /// The active profile, or `None` when absent or structurally invalid.
    fn load(&self) -> Option<Profile>;

    /// Remove the active session. Removing an absent session is a no-op.
    fn clear(&self);
}

/// File-backed session store.
///
/// Writes go to a sibling temp file first and are renamed into place, so a
/// crash mid-save never leaves a truncated blob at the well-known path.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The blob path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut path = self.path.clone().into_os_string();
        path.push(".tmp");
        PathBuf::from(path)
    }
}

impl SessionStore for FileSessionStore {
    fn save(&self, profile: &Profile) -> Result<(), SessionStoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let blob = serde_json::to_vec_pretty(profile)?;
        let temp = self.temp_path();
        fs::write(&temp, blob)?;
        fs::rename(&temp, &self.path)?;
        Ok(())
    }

    fn load(&self) -> Option<Profile> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "session blob unreadable");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(profile) => Some(profile),
            Err(e) => {
                // Malformed blob fails open to re-authentication.
                debug!(path = %self.path.display(), error = %e, "session blob malformed");
                None
            }
        }
    }

    fn clear(&self) {
        if let Err(e) = fs::remove_file(&self.path)
            && e.kind() != io::ErrorKind::NotFound
        {
            warn!(path = %self.path.display(), error = %e, "failed to clear session blob");
        }
    }
}

/// In-memory session store for tests and embedding.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    slot: Mutex<Option<Profile>>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn save(&self, profile: &Profile) -> Result<(), SessionStoreError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(profile.clone());
        Ok(())
    }

    fn load(&self) -> Option<Profile> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn clear(&self) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use mealdrop_core::{Role, UserId};
    use uuid::Uuid;

    fn sample_profile() -> Profile {
        Profile {
            id: UserId::new(Uuid::new_v4()),
            name: "Ada".to_string(),
            wallet_address: "0xabc".to_string(),
            delivery_address: "1 Main St".to_string(),
            role: Role::Customer,
            transport_type: None,
            active_flag: None,
            auth_token: "tok".to_string(),
            expiry: 1_700_000_000,
        }
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("current_user.json"));
        let profile = sample_profile();

        store.save(&profile).unwrap();
        assert_eq!(store.load(), Some(profile));
    }

    #[test]
    fn test_file_store_clear_then_load_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("current_user.json"));
        store.save(&sample_profile()).unwrap();

        store.clear();
        assert_eq!(store.load(), None);
        // Clearing again is a no-op.
        store.clear();
    }

    #[test]
    fn test_file_store_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("never_written.json"));
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_file_store_malformed_blob_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("current_user.json");
        fs::write(&path, "{\"id\": 42, garbage").unwrap();

        let store = FileSessionStore::new(path);
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_file_store_structurally_incomplete_blob_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("current_user.json");
        // Valid JSON, but not a complete profile.
        fs::write(&path, r#"{"name": "Ada"}"#).unwrap();

        let store = FileSessionStore::new(path);
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("nested/state/current_user.json"));
        store.save(&sample_profile()).unwrap();
        assert!(store.load().is_some());
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemorySessionStore::new();
        let profile = sample_profile();
        store.save(&profile).unwrap();
        assert_eq!(store.load(), Some(profile));
        store.clear();
        assert_eq!(store.load(), None);
    }
}
