//! Filesystem-backed JSON persistence for the per-user offline cache.
//!
//! Each user gets a directory of three independent blobs: the cached
//! transaction list, the cached recurring list, and the pending-write
//! queue. Writes go through a temp file and rename; per-user interior locks
//! keep an append and a queue rewrite from interleaving.

use std::{
    collections::HashMap,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

use finza_core::{storage::CacheStore, CoreError};
use finza_domain::{PendingWrite, RecurringRule, Transaction};

const CACHE_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";
const TRANSACTIONS_BLOB: &str = "transactions";
const RECURRINGS_BLOB: &str = "recurrings";
const PENDING_BLOB: &str = "pending";

/// Durable per-user cache rooted at one directory. A local fallback only;
/// it is overwritten from remote truth whenever a fetch succeeds.
pub struct JsonCacheStore {
    root: PathBuf,
    user_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl JsonCacheStore {
    pub fn new(root: PathBuf) -> Result<Self, CoreError> {
        fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            user_locks: Mutex::new(HashMap::new()),
        })
    }

    pub fn user_dir(&self, user_id: &str) -> PathBuf {
        self.root.join(canonical_user(user_id))
    }

    fn blob_path(&self, user_id: &str, blob: &str) -> PathBuf {
        self.user_dir(user_id)
            .join(format!("{blob}.{CACHE_EXTENSION}"))
    }

    fn user_lock(&self, user_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self
            .user_locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        locks.entry(user_id.to_string()).or_default().clone()
    }

    fn read_blob<T: DeserializeOwned>(&self, path: &Path) -> Result<Vec<T>, CoreError> {
        if !path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(path)?;
        serde_json::from_str(&data).map_err(|err| CoreError::Serde(err.to_string()))
    }

    fn write_blob<T: Serialize>(&self, path: &Path, entries: &[T]) -> Result<(), CoreError> {
        let json = serde_json::to_string_pretty(entries)
            .map_err(|err| CoreError::Serde(err.to_string()))?;
        let tmp = tmp_path(path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}

impl CacheStore for JsonCacheStore {
    fn cached_transactions(&self, user_id: &str) -> Result<Vec<Transaction>, CoreError> {
        let lock = self.user_lock(user_id);
        let _guard = lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        self.read_blob(&self.blob_path(user_id, TRANSACTIONS_BLOB))
    }

    fn set_cached_transactions(
        &self,
        user_id: &str,
        entries: &[Transaction],
    ) -> Result<(), CoreError> {
        let lock = self.user_lock(user_id);
        let _guard = lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        self.write_blob(&self.blob_path(user_id, TRANSACTIONS_BLOB), entries)
    }

    fn cached_recurrings(&self, user_id: &str) -> Result<Vec<RecurringRule>, CoreError> {
        let lock = self.user_lock(user_id);
        let _guard = lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        self.read_blob(&self.blob_path(user_id, RECURRINGS_BLOB))
    }

    fn set_cached_recurrings(
        &self,
        user_id: &str,
        entries: &[RecurringRule],
    ) -> Result<(), CoreError> {
        let lock = self.user_lock(user_id);
        let _guard = lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        self.write_blob(&self.blob_path(user_id, RECURRINGS_BLOB), entries)
    }

    fn enqueue_pending(&self, user_id: &str, write: PendingWrite) -> Result<(), CoreError> {
        let lock = self.user_lock(user_id);
        let _guard = lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let path = self.blob_path(user_id, PENDING_BLOB);
        let mut queue: Vec<PendingWrite> = self.read_blob(&path)?;
        queue.push(write);
        self.write_blob(&path, &queue)
    }

    fn pending(&self, user_id: &str) -> Result<Vec<PendingWrite>, CoreError> {
        let lock = self.user_lock(user_id);
        let _guard = lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        self.read_blob(&self.blob_path(user_id, PENDING_BLOB))
    }

    fn remove_pending(&self, user_id: &str, drained: &[Uuid]) -> Result<(), CoreError> {
        let lock = self.user_lock(user_id);
        let _guard = lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let path = self.blob_path(user_id, PENDING_BLOB);
        let mut queue: Vec<PendingWrite> = self.read_blob(&path)?;
        queue.retain(|write| !drained.contains(&write.local_id));
        if queue.is_empty() {
            if path.exists() {
                fs::remove_file(path)?;
            }
            return Ok(());
        }
        self.write_blob(&path, &queue)
    }

    fn clear_pending(&self, user_id: &str) -> Result<(), CoreError> {
        let lock = self.user_lock(user_id);
        let _guard = lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let path = self.blob_path(user_id, PENDING_BLOB);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

// Remote user ids are case-sensitive, so case is preserved; only
// separator-unsafe characters are replaced.
fn canonical_user(user_id: &str) -> String {
    let sanitized: String = user_id
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "user".into()
    } else {
        sanitized
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
