//! File-backed key-value store with atomic writes.

use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

use nutriscan_core::error::{NutriscanError, Result};

use super::key_value::{KeyValueStore, UpdateFn};

/// Stores each key in its own file under a directory.
///
/// Provides:
/// - **Atomicity**: writes go to a temp file, are fsynced, then renamed
/// - **Isolation**: `update` holds an exclusive lock for the whole
///   read-modify-write
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    /// Creates a store rooted at `dir`. The directory is created lazily.
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Path of the file holding `key`.
    pub fn slot_path(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }
        Ok(())
    }

    fn read_slot(&self, path: &Path) -> Result<Option<String>> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write_slot(&self, key: &str, path: &Path, value: &str) -> Result<()> {
        self.ensure_dir()?;

        let tmp_path = self.dir.join(format!(".{}.json.tmp", key));
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(value.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, path)?;
        Ok(())
    }

    fn acquire_lock(&self, key: &str) -> Result<SlotLock> {
        self.ensure_dir()?;
        SlotLock::acquire(&self.dir.join(format!(".{}.lock", key)))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.slot_path(key)?;
        self.read_slot(&path)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.slot_path(key)?;
        let _lock = self.acquire_lock(key)?;
        self.write_slot(key, &path, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.slot_path(key)?;
        if !self.dir.exists() {
            return Ok(());
        }
        let _lock = self.acquire_lock(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn update(&self, key: &str, f: UpdateFn<'_>) -> Result<()> {
        let path = self.slot_path(key)?;
        let _lock = self.acquire_lock(key)?;
        let current = self.read_slot(&path)?;
        let updated = f(current)?;
        self.write_slot(key, &path, &updated)
    }
}

/// Keys become file names, so only a conservative character set is allowed.
fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(NutriscanError::data_access(format!(
            "Invalid storage key '{}'",
            key
        )))
    }
}

/// An exclusive lock on a slot, released when dropped.
struct SlotLock {
    file: File,
}

impl SlotLock {
    fn acquire(lock_path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(lock_path)?;

        fs2::FileExt::lock_exclusive(&file).map_err(|e| {
            NutriscanError::data_access(format!("Failed to acquire lock: {}", e))
        })?;

        Ok(Self { file })
    }
}

impl Drop for SlotLock {
    fn drop(&mut self) {
        // The lock file itself stays in place so that waiters keep locking
        // the same inode.
        let _ = fs2::FileExt::unlock(&self.file);
    }
}
