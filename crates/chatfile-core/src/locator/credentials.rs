//! Session credentials and action intent.

use std::fmt;

/// Session credentials issued by the identity layer.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Credentials {
    pub token: String,
    pub session_id: String,
}

impl Credentials {
    pub fn new(token: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            session_id: session_id.into(),
        }
    }

    /// Both fields are present and non-empty.
    pub fn is_complete(&self) -> bool {
        !self.token.is_empty() && !self.session_id.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"<redacted>")
            .field("session_id", &self.session_id)
            .finish()
    }
}

/// What a constructed URL is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Inline viewing (preview, new tab).
    View,
    /// Triggering a file download; adds `download=true`.
    Download,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completeness() {
        assert!(Credentials::new("t", "s").is_complete());
        assert!(!Credentials::new("", "s").is_complete());
        assert!(!Credentials::new("t", "").is_complete());
        assert!(!Credentials::default().is_complete());
    }

    #[test]
    fn debug_hides_token() {
        let dbg = format!("{:?}", Credentials::new("hunter2", "sess"));
        assert!(!dbg.contains("hunter2"));
        assert!(dbg.contains("sess"));
    }
}
