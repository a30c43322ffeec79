//! Credential flags shared by the URL-building commands.

use chatfile_core::config::ChatfileConfig;
use chatfile_core::locator::Credentials;
use clap::Args;

/// Flags win over environment variables, which win over `[credentials]` in config.
#[derive(Clone, Default, Args)]
pub struct CredentialArgs {
    /// Session token.
    #[arg(long, env = "CHATFILE_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
    /// Session identifier.
    #[arg(long, env = "CHATFILE_SESSION_ID")]
    pub session_id: Option<String>,
}

impl std::fmt::Debug for CredentialArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialArgs")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("session_id", &self.session_id)
            .finish()
    }
}

impl CredentialArgs {
    /// Merge with stored credentials. `None` when neither field is known anywhere.
    pub fn resolve(&self, cfg: &ChatfileConfig) -> Option<Credentials> {
        let stored = cfg.credentials.clone().unwrap_or_default();
        let token = self.token.clone().unwrap_or(stored.token);
        let session_id = self.session_id.clone().unwrap_or(stored.session_id);
        if token.is_empty() && session_id.is_empty() {
            return None;
        }
        Some(Credentials::new(token, session_id))
    }
}
