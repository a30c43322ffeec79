//! Errors surfaced by locator construction and attachment actions.

/// Failures that reach the user as the attachment's error banner.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Token or session id missing or empty.
    #[error("missing credentials: token and session id are required")]
    MissingCredentials,
    /// The message carries no resource (file) identifier.
    #[error("missing resource identifier")]
    MissingResourceIdentifier,
    /// Configured base URL is not absolute or cannot carry path segments.
    #[error("invalid base URL {base:?}: {reason}")]
    InvalidBase { base: String, reason: String },
    /// The user agent refused to open a new window.
    #[error("popup window was blocked")]
    PopupBlocked,
}

impl Error {
    /// Message shown in the inline banner that replaces the preview.
    pub fn user_message(&self) -> &'static str {
        match self {
            Error::MissingCredentials => "Authentication information is missing.",
            Error::MissingResourceIdentifier => "File information is missing.",
            Error::InvalidBase { .. } => "The file server address is misconfigured.",
            Error::PopupBlocked => "The popup was blocked. Please allow popups for this site.",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_lowercase_and_user_message_is_sentence() {
        assert_eq!(
            Error::MissingCredentials.to_string(),
            "missing credentials: token and session id are required"
        );
        assert_eq!(
            Error::MissingResourceIdentifier.user_message(),
            "File information is missing."
        );
    }

    #[test]
    fn invalid_base_mentions_the_base() {
        let err = Error::InvalidBase {
            base: "not a url".to_string(),
            reason: "relative URL without a base".to_string(),
        };
        assert!(err.to_string().contains("\"not a url\""));
    }
}
