//! `chatfile download <file-id>` – simulate download clicks through the guard.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chatfile_core::attachment::{
    AttachmentContext, DownloadOutcome, FileMessage, NavigationError, Navigator, StoredFile,
};
use chatfile_core::config::ChatfileConfig;
use chatfile_core::guard::TokioReleaseScheduler;
use chatfile_core::url::Url;

use crate::cli::CredentialArgs;

/// Extra wait after the release window so the last scheduled release has run.
const RELEASE_MARGIN: Duration = Duration::from_millis(50);

/// Collects URLs instead of handing them to a browser.
#[derive(Default)]
struct LineNavigator {
    lines: Vec<String>,
}

impl Navigator for LineNavigator {
    fn start_download(&mut self, url: &Url) {
        self.lines.push(format!("  -> download {url}"));
    }

    fn open_in_new_window(&mut self, url: &Url) -> Result<(), NavigationError> {
        self.lines.push(format!("  -> open {url}"));
        Ok(())
    }
}

/// Result of a simulated click sequence.
#[derive(Debug, Clone, Default)]
pub struct DownloadReport {
    pub lines: Vec<String>,
    pub started: usize,
    pub in_flight_after: usize,
}

/// Click `clicks` times, then wait out the release window if anything is still in flight.
pub async fn simulate_downloads(
    cfg: &ChatfileConfig,
    file_id: &str,
    filename: Option<String>,
    clicks: u32,
    interval_ms: u64,
    credentials: &CredentialArgs,
) -> Result<DownloadReport> {
    let scheduler = Arc::new(TokioReleaseScheduler::current().context("tokio runtime")?);
    let ctx = AttachmentContext::from_config(cfg, scheduler).context("build attachment context")?;

    let message = FileMessage {
        file_id: Some(file_id.to_string()),
        file: filename.map(|filename| StoredFile {
            filename,
            ..StoredFile::default()
        }),
        ..FileMessage::default()
    };
    let mut attachment = ctx.attachment(message);
    let credentials = credentials.resolve(cfg);
    let mut navigator = LineNavigator::default();
    let mut report = DownloadReport::default();

    for click in 1..=clicks {
        let outcome = attachment.on_download(credentials.as_ref(), Instant::now(), &mut navigator);
        report.lines.append(&mut navigator.lines);
        let line = match outcome {
            DownloadOutcome::Started(_) => {
                report.started += 1;
                format!("click {click}: started")
            }
            DownloadOutcome::Ignored(reason) => format!("click {click}: ignored ({reason})"),
            DownloadOutcome::Failed(e) => format!("click {click}: failed: {}", e.user_message()),
        };
        report.lines.push(line);
        if click < clicks && interval_ms > 0 {
            tokio::time::sleep(Duration::from_millis(interval_ms)).await;
        }
    }

    if ctx.guard().in_flight_count() > 0 {
        tokio::time::sleep(ctx.release_after() + RELEASE_MARGIN).await;
    }
    report.in_flight_after = ctx.guard().in_flight_count();
    report
        .lines
        .push(format!("in flight after release window: {}", report.in_flight_after));
    Ok(report)
}

pub async fn run_download(
    cfg: &ChatfileConfig,
    file_id: &str,
    filename: Option<String>,
    clicks: u32,
    interval_ms: u64,
    credentials: &CredentialArgs,
) -> Result<()> {
    let report = simulate_downloads(cfg, file_id, filename, clicks, interval_ms, credentials).await?;
    for line in report.lines {
        println!("{line}");
    }
    Ok(())
}
