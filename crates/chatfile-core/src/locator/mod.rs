//! Authenticated, purpose-qualified resource URLs.
//!
//! A locator is `<base>/<resource id>?token=..&sessionId=..[&download=true]`.
//! The base comes from config; credentials come from the session layer and
//! are percent-encoded so the result can be dropped straight into an `href`,
//! a hidden frame, or a media element.

mod credentials;
mod encode;

pub use credentials::{Credentials, Intent};

use url::Url;

use crate::error::{Error, Result};
use encode::encode_component;

/// Builds resource URLs under a fixed base. Builds fresh on every call.
#[derive(Debug, Clone)]
pub struct LocatorBuilder {
    base: Url,
}

impl LocatorBuilder {
    /// Create a builder for the given absolute base URL (e.g. `https://cdn.example.com/chat/`).
    pub fn new(base: &str) -> Result<Self> {
        let parsed = Url::parse(base).map_err(|e| Error::InvalidBase {
            base: base.to_string(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(Error::InvalidBase {
                base: base.to_string(),
                reason: "URL cannot carry path segments".to_string(),
            });
        }
        Ok(Self { base: parsed })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Bare resource URL without credentials or intent.
    pub fn resource_url(&self, resource_id: &str) -> Result<Url> {
        let resource_id = resource_id.trim();
        if resource_id.is_empty() || resource_id == "." || resource_id == ".." {
            return Err(Error::MissingResourceIdentifier);
        }

        let mut url = self.base.clone();
        url.set_query(None);
        url.set_fragment(None);
        // Checked in new(): the base can carry path segments.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(resource_id);
        }
        Ok(url)
    }

    /// Build the authenticated URL for `resource_id` with the given intent.
    ///
    /// Fails with [`Error::MissingResourceIdentifier`] for a blank id and with
    /// [`Error::MissingCredentials`] when either credential field is empty.
    pub fn build(&self, resource_id: &str, credentials: &Credentials, intent: Intent) -> Result<Url> {
        let mut url = self.resource_url(resource_id)?;
        if !credentials.is_complete() {
            return Err(Error::MissingCredentials);
        }

        let mut query = format!(
            "token={}&sessionId={}",
            encode_component(&credentials.token),
            encode_component(&credentials.session_id)
        );
        if intent == Intent::Download {
            query.push_str("&download=true");
        }
        url.set_query(Some(&query));

        tracing::trace!(resource_id, ?intent, "built secure locator");
        Ok(url)
    }
}
