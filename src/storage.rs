//! `localStorage`-backed session store.

use personallearn_core::session::{MemoryStore, SessionStore};
use personallearn_core::StoreError;

thread_local! {
    // Used when the browser refuses storage access (e.g. some private modes).
    static MEMORY: MemoryStore = MemoryStore::new();
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStore;

impl BrowserStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl SessionStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        match Self::storage() {
            Some(storage) => storage.get_item(key).ok().flatten(),
            None => MEMORY.with(|m| m.get(key)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        match Self::storage() {
            Some(storage) => storage.set_item(key, value).map_err(|e| StoreError::Write {
                key: key.to_string(),
                reason: e.as_string().unwrap_or_else(|| format!("{:?}", e)),
            }),
            None => MEMORY.with(|m| m.set(key, value)),
        }
    }

    fn remove(&self, key: &str) {
        match Self::storage() {
            Some(storage) => {
                if let Err(e) = storage.remove_item(key) {
                    tracing::warn!("Failed to remove session key '{}': {:?}", key, e);
                }
            }
            None => MEMORY.with(|m| m.remove(key)),
        }
    }
}
