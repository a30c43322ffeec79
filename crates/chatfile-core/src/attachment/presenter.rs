//! Per-message attachment state and action handlers.

use std::sync::Arc;
use std::time::{Duration, Instant};

use url::Url;

use crate::config::ChatfileConfig;
use crate::error::{Error, Result};
use crate::guard::{Admission, Rejection, ReleaseHandle, ReleaseScheduler, SharedGuard};
use crate::locator::{Credentials, Intent, LocatorBuilder};

use super::kind::AttachmentKind;
use super::message::FileMessage;
use super::navigator::Navigator;
use super::size::format_file_size;

/// View-level collaborators shared by every attachment in one message list.
#[derive(Clone)]
pub struct AttachmentContext {
    guard: SharedGuard,
    locator: Arc<LocatorBuilder>,
    scheduler: Arc<dyn ReleaseScheduler>,
    release_after: Duration,
}

impl std::fmt::Debug for AttachmentContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttachmentContext")
            .field("guard", &self.guard)
            .field("locator", &self.locator)
            .field("release_after", &self.release_after)
            .finish_non_exhaustive()
    }
}

impl AttachmentContext {
    pub fn new(
        guard: SharedGuard,
        locator: LocatorBuilder,
        scheduler: Arc<dyn ReleaseScheduler>,
        release_after: Duration,
    ) -> Self {
        Self {
            guard,
            locator: Arc::new(locator),
            scheduler,
            release_after,
        }
    }

    /// Build a context with a fresh guard from config.
    pub fn from_config(cfg: &ChatfileConfig, scheduler: Arc<dyn ReleaseScheduler>) -> Result<Self> {
        let locator = LocatorBuilder::new(&cfg.base_url)?;
        Ok(Self::new(
            SharedGuard::new(cfg.guard.build_guard()),
            locator,
            scheduler,
            cfg.guard.release_after(),
        ))
    }

    pub fn guard(&self) -> &SharedGuard {
        &self.guard
    }

    pub fn locator(&self) -> &LocatorBuilder {
        &self.locator
    }

    pub fn release_after(&self) -> Duration {
        self.release_after
    }

    /// Presenter for one message in this view.
    pub fn attachment(&self, message: FileMessage) -> Attachment {
        Attachment {
            ctx: self.clone(),
            message,
            error: None,
            pending: Vec::new(),
        }
    }
}

/// Everything the host needs to render an attachment preview.
#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    pub kind: AttachmentKind,
    pub display_name: String,
    pub size_label: String,
    pub mime_type: String,
    /// Credentialed view URL for images, bare resource URL for video and
    /// audio, `None` for plain files.
    pub url: Option<Url>,
    pub content: Option<String>,
}

/// What a download click did.
#[derive(Debug, Clone, PartialEq)]
pub enum DownloadOutcome {
    /// Admitted and handed to the user agent.
    Started(Url),
    /// Silently ignored repeat click.
    Ignored(Rejection),
    /// Failed; the error is also shown in the banner.
    Failed(Error),
}

/// One attachment bubble: its message, its error banner and its pending releases.
#[derive(Debug)]
pub struct Attachment {
    ctx: AttachmentContext,
    message: FileMessage,
    error: Option<Error>,
    pending: Vec<ReleaseHandle>,
}

impl Attachment {
    pub fn message(&self) -> &FileMessage {
        &self.message
    }

    pub fn kind(&self) -> AttachmentKind {
        self.message.kind()
    }

    /// Error currently replacing the preview, if any.
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// Banner text for the current error.
    pub fn banner(&self) -> Option<&'static str> {
        self.error.as_ref().map(Error::user_message)
    }

    /// Preview for rendering, or `None` while the banner is shown.
    pub fn preview(&mut self, credentials: Option<&Credentials>) -> Option<Preview> {
        if self.error.is_some() {
            return None;
        }

        let kind = self.kind();
        let url = match kind {
            AttachmentKind::Image => self.view_url(credentials).map(Some),
            // Media elements stream from the bare resource URL.
            AttachmentKind::Video | AttachmentKind::Audio => self.stream_url().map(Some),
            AttachmentKind::File => Ok(None),
        };
        let url = match url {
            Ok(url) => url,
            Err(e) => {
                self.set_error(e);
                return None;
            }
        };

        Some(Preview {
            kind,
            display_name: self.message.display_name(),
            size_label: format_file_size(self.message.size()),
            mime_type: self.message.mime_type().to_string(),
            url,
            content: self.message.content.clone(),
        })
    }

    /// Handle a download click at `now`.
    pub fn on_download(
        &mut self,
        credentials: Option<&Credentials>,
        now: Instant,
        navigator: &mut dyn Navigator,
    ) -> DownloadOutcome {
        self.error = None;

        let target = self
            .message
            .resource_id()
            .map(str::to_string)
            .zip(self.message.resource_key());
        let Some((resource_id, key)) = target else {
            return self.fail(Error::MissingResourceIdentifier);
        };

        if let Admission::Rejected(reason) = self.ctx.guard.try_admit(&key, now) {
            tracing::debug!(%key, %reason, "download click ignored");
            return DownloadOutcome::Ignored(reason);
        }

        let built = credentials
            .ok_or(Error::MissingCredentials)
            .and_then(|c| self.ctx.locator.build(&resource_id, c, Intent::Download));
        let url = match built {
            Ok(url) => url,
            Err(e) => {
                // Nothing was started; only the cooldown entry remains.
                self.ctx.guard.release(&key);
                return self.fail(e);
            }
        };

        navigator.start_download(&url);
        tracing::info!(%key, %resource_id, "download started");

        self.pending.retain(|h| !h.is_finished());
        let handle =
            self.ctx
                .scheduler
                .schedule_release(self.ctx.guard.clone(), key, self.ctx.release_after);
        self.pending.push(handle);

        DownloadOutcome::Started(url)
    }

    /// Handle a "view in new tab" click. Not throttled.
    pub fn on_view_in_new_tab(
        &mut self,
        credentials: Option<&Credentials>,
        navigator: &mut dyn Navigator,
    ) -> Result<Url> {
        self.error = None;

        let result = self.view_url(credentials).and_then(|url| {
            navigator.open_in_new_window(&url)?;
            Ok(url)
        });
        if let Err(e) = &result {
            self.set_error(e.clone());
        }
        result
    }

    /// Cancel releases scheduled by this attachment that have not run yet.
    /// Their keys stay in flight until released elsewhere.
    pub fn cancel_pending_releases(&mut self) -> usize {
        let mut cancelled = 0;
        for handle in self.pending.drain(..) {
            if !handle.is_finished() {
                handle.cancel();
                cancelled += 1;
            }
        }
        cancelled
    }

    fn view_url(&self, credentials: Option<&Credentials>) -> Result<Url> {
        let resource_id = self
            .message
            .resource_id()
            .ok_or(Error::MissingResourceIdentifier)?;
        let credentials = credentials.ok_or(Error::MissingCredentials)?;
        self.ctx.locator.build(resource_id, credentials, Intent::View)
    }

    fn stream_url(&self) -> Result<Url> {
        let resource_id = self
            .message
            .resource_id()
            .ok_or(Error::MissingResourceIdentifier)?;
        self.ctx.locator.resource_url(resource_id)
    }

    fn set_error(&mut self, e: Error) {
        tracing::warn!(file_id = ?self.message.file_id, error = %e, "attachment action failed");
        self.error = Some(e);
    }

    fn fail(&mut self, e: Error) -> DownloadOutcome {
        self.set_error(e.clone());
        DownloadOutcome::Failed(e)
    }
}
