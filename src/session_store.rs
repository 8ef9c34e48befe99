use std::collections::HashMap;
use std::fmt;


// Per-tab key/value storage holding the session credential and game identifier.
// In the browser this is `window.sessionStorage`; elsewhere it's an in-memory map.
pub trait SessionStorage {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorageError(pub String);

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "storage error: {}", self.0)
    }
}

impl std::error::Error for StorageError {}

#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self { Self::default() }
    pub fn is_empty(&self) -> bool { self.items.is_empty() }
}

impl SessionStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> { self.items.get(key).cloned() }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

impl<S: SessionStorage> SessionStorage for &mut S {
    fn get_item(&self, key: &str) -> Option<String> { (**self).get_item(key) }
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }
}
