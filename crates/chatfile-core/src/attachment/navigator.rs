//! The user agent's navigation primitives, as seen by the presenter.

use url::Url;

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    #[error("popup blocked by the user agent")]
    PopupBlocked,
}

impl From<NavigationError> for Error {
    fn from(e: NavigationError) -> Self {
        match e {
            NavigationError::PopupBlocked => Error::PopupBlocked,
        }
    }
}

/// Hands constructed URLs to the user agent. The server's response is opaque here.
pub trait Navigator {
    /// Start a download without leaving the page (hidden frame or equivalent).
    fn start_download(&mut self, url: &Url);

    /// Open the URL in a new window with no opener.
    fn open_in_new_window(&mut self, url: &Url) -> Result<(), NavigationError>;
}
