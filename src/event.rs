// What a front-end has to do after a view state processed something.
#[must_use]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NotableEvent {
    None,
    // Replace the current page (no history entry) with the given path.
    Navigate(String),
    // Blocking user-visible error.
    Alert(String),
    // Question number or player list changed. Re-render.
    GameUpdated,
}

pub const REQUEST_FAILED_MESSAGE: &str = "There was a problem with the request.";
