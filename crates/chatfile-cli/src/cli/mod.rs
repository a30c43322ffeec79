//! CLI for the chatfile attachment core.

mod commands;
mod credentials;

use anyhow::Result;
use clap::{Parser, Subcommand};
use chatfile_core::config;

use commands::{run_decode, run_download, run_preview, run_url, PreviewArgs};
pub use credentials::CredentialArgs;

/// Top-level CLI for chatfile.
#[derive(Debug, Parser)]
#[command(name = "chatfile")]
#[command(about = "chatfile: chat attachment names, secure URLs and download throttling", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Decode a transport-encoded filename into its display name.
    Decode {
        /// Encoded filename (URL-safe base64, percent-encoded, or plain).
        encoded: String,
    },

    /// Print the authenticated URL for a file.
    Url {
        /// File (resource) identifier.
        file_id: String,
        /// Build a download URL instead of a view URL.
        #[arg(long)]
        download: bool,
        #[command(flatten)]
        credentials: CredentialArgs,
    },

    /// Simulate repeated download clicks on one attachment.
    Download {
        /// File (resource) identifier.
        file_id: String,
        /// Encoded storage filename used as the throttling key (defaults to the file id).
        #[arg(long)]
        filename: Option<String>,
        /// Number of clicks to simulate.
        #[arg(long, default_value = "2", value_name = "N")]
        clicks: u32,
        /// Delay between clicks in milliseconds.
        #[arg(long, default_value = "0", value_name = "MS")]
        interval_ms: u64,
        #[command(flatten)]
        credentials: CredentialArgs,
    },

    /// Describe how an attachment would be previewed.
    Preview {
        /// File (resource) identifier.
        file_id: String,
        /// MIME type of the file.
        #[arg(long)]
        mime: String,
        /// Original display name from message metadata.
        #[arg(long)]
        name: Option<String>,
        /// Encoded storage filename, decoded when no display name is given.
        #[arg(long)]
        filename: Option<String>,
        /// File size in bytes.
        #[arg(long, default_value = "0")]
        size: u64,
        #[command(flatten)]
        credentials: CredentialArgs,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Decode { encoded } => run_decode(&encoded),
            CliCommand::Url {
                file_id,
                download,
                credentials,
            } => run_url(&cfg, &file_id, download, &credentials),
            CliCommand::Download {
                file_id,
                filename,
                clicks,
                interval_ms,
                credentials,
            } => run_download(&cfg, &file_id, filename, clicks, interval_ms, &credentials).await,
            CliCommand::Preview {
                file_id,
                mime,
                name,
                filename,
                size,
                credentials,
            } => {
                let args = PreviewArgs {
                    file_id,
                    mime,
                    name,
                    filename,
                    size,
                };
                run_preview(&cfg, args, &credentials)
            }
        }
    }
}

#[cfg(test)]
mod tests;
