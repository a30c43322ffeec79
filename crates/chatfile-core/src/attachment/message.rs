//! Attachment message payload as delivered by the chat backend.

use serde::{Deserialize, Serialize};

use crate::filename::decode_filename;
use crate::guard::ResourceKey;

use super::kind::AttachmentKind;

/// Storage record of an uploaded file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredFile {
    /// Encoded storage name.
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub mimetype: String,
    /// Encoded original name.
    #[serde(default)]
    pub originalname: String,
    #[serde(default)]
    pub size: u64,
}

/// Display metadata attached by the uploader.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    #[serde(default)]
    pub original_name: String,
    #[serde(default)]
    pub file_type: String,
    #[serde(default)]
    pub file_size: u64,
}

/// A chat message carrying a file attachment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMessage {
    /// Resource identifier on the file server.
    #[serde(default)]
    pub file_id: Option<String>,
    #[serde(default)]
    pub file: Option<StoredFile>,
    #[serde(default)]
    pub metadata: FileMetadata,
    /// Optional text sent along with the file.
    #[serde(default)]
    pub content: Option<String>,
}

impl FileMessage {
    /// Non-blank resource identifier, if any.
    pub fn resource_id(&self) -> Option<&str> {
        self.file_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    /// Throttling key: the stored filename, or the resource id when the filename is unknown.
    pub fn resource_key(&self) -> Option<ResourceKey> {
        self.file
            .as_ref()
            .map(|f| f.filename.as_str())
            .filter(|name| !name.is_empty())
            .or_else(|| self.resource_id())
            .map(ResourceKey::from)
    }

    /// MIME type from metadata, falling back to the storage record.
    pub fn mime_type(&self) -> &str {
        if !self.metadata.file_type.is_empty() {
            return &self.metadata.file_type;
        }
        self.file.as_ref().map(|f| f.mimetype.as_str()).unwrap_or("")
    }

    pub fn kind(&self) -> AttachmentKind {
        AttachmentKind::from_mime(self.mime_type())
    }

    /// Size in bytes from metadata, falling back to the storage record.
    pub fn size(&self) -> u64 {
        if self.metadata.file_size > 0 {
            return self.metadata.file_size;
        }
        self.file.as_ref().map(|f| f.size).unwrap_or(0)
    }

    /// Name shown to the user: metadata name if present, else the decoded stored name.
    pub fn display_name(&self) -> String {
        let original = self.metadata.original_name.trim();
        if !original.is_empty() {
            return original.to_string();
        }
        let encoded = self
            .file
            .as_ref()
            .map(|f| {
                if f.originalname.is_empty() {
                    f.filename.as_str()
                } else {
                    f.originalname.as_str()
                }
            })
            .unwrap_or("");
        decode_filename(encoded)
    }
}
