//! `localStorage` binding of the application context.

use std::collections::HashMap;

use common::error::StoreError;
use common::store::{KeyValueStore, MemoryStore};
use log::warn;
use wasm_bindgen::JsValue;
use web_sys::Storage;

/// The browser's `localStorage`, or an in-memory map when the browser
/// denies access (private mode, disabled storage).
pub enum BrowserStore {
    Local {
        storage: Storage,
        /// MD5 of the last value written per key; identical rewrites are
        /// skipped.
        written: HashMap<String, md5::Digest>,
    },
    Memory(MemoryStore),
}

impl BrowserStore {
    pub fn open() -> Self {
        match web_sys::window().map(|w| w.local_storage()) {
            Some(Ok(Some(storage))) => BrowserStore::Local {
                storage,
                written: HashMap::new(),
            },
            _ => {
                warn!("localStorage unavailable, state will not survive a reload");
                BrowserStore::Memory(MemoryStore::default())
            }
        }
    }
}

fn backend_error(err: JsValue) -> StoreError {
    StoreError::Backend(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self {
            BrowserStore::Local { storage, .. } => storage.get_item(key).map_err(backend_error),
            BrowserStore::Memory(memory) => memory.get(key),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        match self {
            BrowserStore::Local { storage, written } => {
                let digest = md5::compute(value);
                if written.get(key) == Some(&digest) {
                    return Ok(());
                }
                storage.set_item(key, value).map_err(backend_error)?;
                written.insert(key.to_string(), digest);
                Ok(())
            }
            BrowserStore::Memory(memory) => memory.set(key, value),
        }
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        match self {
            BrowserStore::Local { storage, written } => {
                written.remove(key);
                storage.remove_item(key).map_err(backend_error)
            }
            BrowserStore::Memory(memory) => memory.remove(key),
        }
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        match self {
            BrowserStore::Local { storage, .. } => {
                let len = storage.length().map_err(backend_error)?;
                let mut keys = Vec::with_capacity(len as usize);
                for i in 0..len {
                    if let Some(key) = storage.key(i).map_err(backend_error)? {
                        keys.push(key);
                    }
                }
                Ok(keys)
            }
            BrowserStore::Memory(memory) => memory.keys(),
        }
    }
}
