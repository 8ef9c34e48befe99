use buzzer::session_store::{SessionStorage, StorageError};

use crate::rust_error;
use crate::web_document::web_window;
use crate::web_error_handling::JsResult;


// `window.sessionStorage`: survives reloads and navigation, dies with the tab.
pub struct WebSessionStorage(web_sys::Storage);

impl WebSessionStorage {
    pub fn open() -> JsResult<Self> {
        let storage = web_window()?
            .session_storage()?
            .ok_or_else(|| rust_error!("Session storage is not available"))?;
        Ok(WebSessionStorage(storage))
    }
}

impl SessionStorage for WebSessionStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        match self.0.get_item(key) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("Cannot read {key} from session storage: {err:?}");
                None
            }
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.0.set_item(key, value).map_err(|err| StorageError(format!("{err:?}")))
    }
}
