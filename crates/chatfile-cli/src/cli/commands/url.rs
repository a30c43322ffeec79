//! `chatfile url <file-id>` – print an authenticated view or download URL.

use anyhow::{Context, Result};
use chatfile_core::config::ChatfileConfig;
use chatfile_core::locator::{Intent, LocatorBuilder};
use chatfile_core::url::Url;

use crate::cli::CredentialArgs;

/// Build the URL `chatfile url` prints.
pub fn build_url(
    cfg: &ChatfileConfig,
    file_id: &str,
    download: bool,
    credentials: &CredentialArgs,
) -> Result<Url> {
    let locator = LocatorBuilder::new(&cfg.base_url).context("configured base_url")?;
    let credentials = credentials.resolve(cfg).unwrap_or_default();
    let intent = if download { Intent::Download } else { Intent::View };
    locator
        .build(file_id, &credentials, intent)
        .with_context(|| format!("build URL for file {file_id:?}"))
}

pub fn run_url(
    cfg: &ChatfileConfig,
    file_id: &str,
    download: bool,
    credentials: &CredentialArgs,
) -> Result<()> {
    let url = build_url(cfg, file_id, download, credentials)?;
    println!("{url}");
    Ok(())
}
