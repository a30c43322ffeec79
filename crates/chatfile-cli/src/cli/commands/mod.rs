//! CLI command handlers. Each command is in its own file.

pub(crate) mod decode;
pub(crate) mod download;
pub(crate) mod preview;
pub(crate) mod url;

pub use decode::run_decode;
pub use download::run_download;
pub use preview::{run_preview, PreviewArgs};
pub use url::run_url;
