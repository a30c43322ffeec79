//! `chatfile preview <file-id>` – describe the preview an attachment would get.

use std::sync::Arc;

use anyhow::{Context, Result};
use chatfile_core::attachment::{AttachmentContext, FileMessage, FileMetadata, StoredFile};
use chatfile_core::config::ChatfileConfig;
use chatfile_core::guard::DeferredReleaseScheduler;

use crate::cli::CredentialArgs;

/// Attachment fields given on the command line.
#[derive(Debug, Clone, Default)]
pub struct PreviewArgs {
    pub file_id: String,
    pub mime: String,
    pub name: Option<String>,
    pub filename: Option<String>,
    pub size: u64,
}

/// Lines `chatfile preview` prints: the preview fields, or the error banner.
pub fn describe_preview(
    cfg: &ChatfileConfig,
    args: PreviewArgs,
    credentials: &CredentialArgs,
) -> Result<Vec<String>> {
    // Previews never touch the guard, so no timer runtime is needed.
    let ctx = AttachmentContext::from_config(cfg, Arc::new(DeferredReleaseScheduler::new()))
        .context("build attachment context")?;

    let message = FileMessage {
        file_id: Some(args.file_id),
        file: args.filename.map(|filename| StoredFile {
            filename,
            ..StoredFile::default()
        }),
        metadata: FileMetadata {
            original_name: args.name.unwrap_or_default(),
            file_type: args.mime,
            file_size: args.size,
        },
        content: None,
    };
    let mut attachment = ctx.attachment(message);

    let lines = match attachment.preview(credentials.resolve(cfg).as_ref()) {
        Some(preview) => {
            let mut lines = vec![
                format!("kind: {:?}", preview.kind),
                format!("name: {}", preview.display_name),
                format!("size: {}", preview.size_label),
            ];
            if let Some(url) = preview.url {
                lines.push(format!("url:  {url}"));
            }
            lines
        }
        None => {
            let banner = attachment.banner().unwrap_or("Preview unavailable.");
            vec![format!("error: {banner}")]
        }
    };
    Ok(lines)
}

pub fn run_preview(cfg: &ChatfileConfig, args: PreviewArgs, credentials: &CredentialArgs) -> Result<()> {
    for line in describe_preview(cfg, args, credentials)? {
        println!("{line}");
    }
    Ok(())
}
