//! Shared helpers for chatfile-core integration tests.

use chatfile_core::attachment::{NavigationError, Navigator};
use url::Url;

/// Navigator that records every URL it is handed.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    pub downloads: Vec<Url>,
    pub windows: Vec<Url>,
}

impl Navigator for RecordingNavigator {
    fn start_download(&mut self, url: &Url) {
        self.downloads.push(url.clone());
    }

    fn open_in_new_window(&mut self, url: &Url) -> Result<(), NavigationError> {
        self.windows.push(url.clone());
        Ok(())
    }
}
