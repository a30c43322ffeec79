//! Attachment presenter: wires a file message to the guard, locator and codec.
//!
//! Rendering is left to the host; this module decides what to show (kind,
//! name, size, view URL, or an error banner) and what happens on user actions.

mod kind;
mod message;
mod navigator;
mod presenter;
mod size;

pub use kind::AttachmentKind;
pub use message::{FileMessage, FileMetadata, StoredFile};
pub use navigator::{NavigationError, Navigator};
pub use presenter::{Attachment, AttachmentContext, DownloadOutcome, Preview};
pub use size::format_file_size;
