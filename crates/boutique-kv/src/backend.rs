//! Storage backends.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::KvError;

/// A raw byte-valued key-value store.
///
/// All methods take `&self`: a backend is a handle onto storage that
/// outlives it, the way a browser's `localStorage` does.
pub trait KeyValueStore {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KvError>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), KvError>;

    /// Remove `key`. Removing an absent key is not an error.
    fn delete(&self, key: &str) -> Result<(), KvError>;

    /// Check whether `key` holds a value.
    fn exists(&self, key: &str) -> Result<bool, KvError> {
        Ok(self.get(key)?.is_some())
    }

    /// List all keys currently stored.
    fn keys(&self) -> Result<Vec<String>, KvError>;
}

/// In-memory store.
///
/// Clones share the same entries, so a clone behaves like reopening the
/// same store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<BTreeMap<String, Vec<u8>>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Check if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KvError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), KvError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), KvError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }

    fn exists(&self, key: &str) -> Result<bool, KvError> {
        Ok(self.entries.borrow().contains_key(key))
    }

    fn keys(&self) -> Result<Vec<String>, KvError> {
        Ok(self.entries.borrow().keys().cloned().collect())
    }
}

/// File-backed store: one `<key>.json` file per key under a directory.
///
/// File names keep `[A-Za-z0-9-]` as is and escape every other byte as
/// `_xx` (lowercase hex), so `guest:cart` is stored as `guest_3acart.json`.
/// The encoding is one-to-one and `keys()` returns the original keys.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

const FILE_EXTENSION: &str = "json";

impl FileStore {
    /// Open (creating if needed) a store rooted at `dir`.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, KvError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)
            .map_err(|e| KvError::OpenError(format!("{}: {}", dir.display(), e)))?;
        Ok(Self { dir })
    }

    /// Directory holding the store's files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir
            .join(format!("{}.{}", encode_key(key), FILE_EXTENSION))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KvError> {
        match fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), KvError> {
        let path = self.path_for(key);
        let tmp = path.with_extension(format!("{}.tmp", FILE_EXTENSION));
        fs::write(&tmp, value)?;
        if let Err(e) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), KvError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn exists(&self, key: &str) -> Result<bool, KvError> {
        Ok(self.path_for(key).is_file())
    }

    fn keys(&self) -> Result<Vec<String>, KvError> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(FILE_EXTENSION) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match decode_key(stem) {
                Some(key) => keys.push(key),
                None => tracing::debug!(file = %path.display(), "skipping foreign file in store"),
            }
        }
        keys.sort();
        Ok(keys)
    }
}

fn encode_key(key: &str) -> String {
    let mut encoded = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' {
            encoded.push(char::from(byte));
        } else {
            encoded.push_str(&format!("_{:02x}", byte));
        }
    }
    encoded
}

fn decode_key(encoded: &str) -> Option<String> {
    let bytes = encoded.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'_' => {
                let hex = encoded.get(i + 1..i + 3)?;
                decoded.push(u8::from_str_radix(hex, 16).ok()?);
                i += 3;
            }
            b if b.is_ascii_alphanumeric() || b == b'-' => {
                decoded.push(b);
                i += 1;
            }
            _ => return None,
        }
    }
    let key = String::from_utf8(decoded).ok()?;
    // Reject names this store would not have written, like `_2D` or `_2d`.
    (encode_key(&key) == encoded).then_some(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_set_get() {
        let store = MemoryStore::new();
        store.set("cart", b"[]").unwrap();
        assert_eq!(store.get("cart").unwrap(), Some(b"[]".to_vec()));
        assert_eq!(store.get("missing").unwrap(), None);
    }

    #[test]
    fn test_memory_store_clones_share_entries() {
        let store = MemoryStore::new();
        let reopened = store.clone();
        store.set("cart", b"[1]").unwrap();
        assert!(reopened.exists("cart").unwrap());
        assert_eq!(reopened.len(), 1);
    }

    #[test]
    fn test_memory_store_delete_absent_key() {
        let store = MemoryStore::new();
        store.delete("nothing").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("storage")).unwrap();

        store.set("cart", br#"[{"quantity":1}]"#).unwrap();
        assert!(store.exists("cart").unwrap());
        assert_eq!(
            store.get("cart").unwrap(),
            Some(br#"[{"quantity":1}]"#.to_vec())
        );

        store.set("cart", b"[]").unwrap();
        assert_eq!(store.get("cart").unwrap(), Some(b"[]".to_vec()));
    }

    #[test]
    fn test_file_store_keys_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        store.set("guest:cart", b"[]").unwrap();
        store.set("wishlist", b"[]").unwrap();

        assert_eq!(store.keys().unwrap(), vec!["guest:cart", "wishlist"]);
        assert!(store.exists("guest:cart").unwrap());
        assert!(dir.path().join("guest_3acart.json").is_file());
    }

    #[test]
    fn test_file_store_similar_keys_do_not_collide() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        store.set("guest:cart", b"[1]").unwrap();
        store.set("guest_cart", b"[2]").unwrap();

        assert_eq!(store.get("guest:cart").unwrap(), Some(b"[1]".to_vec()));
        assert_eq!(store.get("guest_cart").unwrap(), Some(b"[2]".to_vec()));
        assert_eq!(store.keys().unwrap(), vec!["guest:cart", "guest_cart"]);
    }

    #[test]
    fn test_file_store_skips_foreign_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        store.set("cart", b"[]").unwrap();
        fs::write(dir.path().join("notes.txt"), b"hi").unwrap();
        fs::write(dir.path().join("bad_zz.json"), b"[]").unwrap();

        assert_eq!(store.keys().unwrap(), vec!["cart"]);
    }

    #[test]
    fn test_file_store_failed_rename_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        // A directory where the target file should go makes the rename fail.
        fs::create_dir(dir.path().join("cart.json")).unwrap();
        fs::write(dir.path().join("cart.json").join("inner"), b"x").unwrap();

        assert!(store.set("cart", b"[]").is_err());
        assert!(!dir.path().join("cart.json.tmp").exists());
    }

    #[test]
    fn test_file_store_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        store.set("cart", b"[]").unwrap();
        store.delete("cart").unwrap();
        store.delete("cart").unwrap();
        assert_eq!(store.get("cart").unwrap(), None);
    }

    #[test]
    fn test_key_encoding() {
        assert_eq!(encode_key("cart"), "cart");
        assert_eq!(encode_key("a/b:c.d"), "a_2fb_3ac_2ed");
        assert_eq!(encode_key("guest_cart"), "guest_5fcart");
        assert_eq!(decode_key("a_2fb_3ac_2ed").as_deref(), Some("a/b:c.d"));
        assert_eq!(decode_key(&encode_key("café:bag")).as_deref(), Some("café:bag"));
        assert_eq!(decode_key("bad_z"), None);
        assert_eq!(decode_key("a_2d"), None);
        assert_eq!(decode_key("_+f"), None);
    }
}
