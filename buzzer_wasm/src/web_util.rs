use crate::web_document::web_window;
use crate::web_error_handling::JsResult;


// Full navigation without a history entry, so "back" doesn't return to a dead page.
pub fn navigate(path: &str) -> JsResult<()> {
    log::info!("Navigating to {path}");
    web_window()?.location().replace(path)
}

pub fn alert(message: &str) -> JsResult<()> { web_window()?.alert_with_message(message) }
