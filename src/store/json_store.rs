use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Serialize, de::DeserializeOwned};

/// Named-slot JSON store under the user data directory. Each logical slot
/// (history log, chat transcript, session flags) is one file; saves are
/// atomic via a tmp file and rename. A slot that exists but cannot be
/// parsed loads as its default rather than failing startup.
#[derive(Clone)]
pub struct JsonStore {
    base_dir: PathBuf,
}

pub const HISTORY_SLOT: &str = "history.json";
pub const CHAT_SLOT: &str = "chat.json";
pub const SESSION_SLOT: &str = "session.json";

impl JsonStore {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("scorecast");
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn file_path(&self, slot: &str) -> PathBuf {
        self.base_dir.join(slot)
    }

    pub fn load<T: DeserializeOwned + Default>(&self, slot: &str) -> T {
        let path = self.file_path(slot);
        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
                Err(_) => T::default(),
            }
        } else {
            T::default()
        }
    }

    pub fn save<T: Serialize>(&self, slot: &str, data: &T) -> Result<()> {
        let path = self.file_path(slot);
        let tmp_path = path.with_extension("tmp");

        let json = serde_json::to_string_pretty(data)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    pub fn clear(&self, slot: &str) -> Result<()> {
        let path = self.file_path(slot);
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::schema::{HistoryData, SCHEMA_VERSION, SessionData};
    use tempfile::TempDir;

    fn make_test_store() -> (TempDir, JsonStore) {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        (dir, store)
    }

    #[test]
    fn test_missing_slot_loads_default() {
        let (_dir, store) = make_test_store();
        let data: HistoryData = store.load(HISTORY_SLOT);
        assert_eq!(data.schema_version, SCHEMA_VERSION);
        assert!(data.records.is_empty());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let (_dir, store) = make_test_store();
        let data = SessionData {
            dark_mode: true,
            current_user: Some("amari".to_string()),
            ..SessionData::default()
        };
        store.save(SESSION_SLOT, &data).unwrap();

        let loaded: SessionData = store.load(SESSION_SLOT);
        assert!(loaded.dark_mode);
        assert_eq!(loaded.current_user.as_deref(), Some("amari"));
    }

    #[test]
    fn test_corrupt_slot_degrades_to_default() {
        let (_dir, store) = make_test_store();
        fs::write(store.file_path(HISTORY_SLOT), "{not json").unwrap();

        let data: HistoryData = store.load(HISTORY_SLOT);
        assert!(data.records.is_empty());
    }

    #[test]
    fn test_save_leaves_no_tmp_file() {
        let (_dir, store) = make_test_store();
        store.save(SESSION_SLOT, &SessionData::default()).unwrap();
        assert!(!store.file_path(SESSION_SLOT).with_extension("tmp").exists());
    }

    #[test]
    fn test_clear_removes_slot() {
        let (_dir, store) = make_test_store();
        store.save(SESSION_SLOT, &SessionData::default()).unwrap();
        store.clear(SESSION_SLOT).unwrap();
        assert!(!store.file_path(SESSION_SLOT).exists());
        // Clearing an already-missing slot is fine
        store.clear(SESSION_SLOT).unwrap();
    }
}
