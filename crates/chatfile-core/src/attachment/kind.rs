//! Preview kind from the attachment's MIME type.

use mime::Mime;

/// Which preview affordance an attachment gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentKind {
    Image,
    Video,
    Audio,
    File,
}

impl AttachmentKind {
    /// Classify by top-level MIME type; unparsable or missing types are plain files.
    pub fn from_mime(mime_type: &str) -> Self {
        let Ok(parsed) = mime_type.trim().parse::<Mime>() else {
            return AttachmentKind::File;
        };
        let top = parsed.type_();
        if top == mime::IMAGE {
            AttachmentKind::Image
        } else if top == mime::VIDEO {
            AttachmentKind::Video
        } else if top == mime::AUDIO {
            AttachmentKind::Audio
        } else {
            AttachmentKind::File
        }
    }

    /// Kinds rendered with an inline media element.
    pub fn has_inline_preview(self) -> bool {
        !matches!(self, AttachmentKind::File)
    }
}
