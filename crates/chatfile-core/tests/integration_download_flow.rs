//! End-to-end download flow: config → context → attachments → tokio releases.

mod common;

use std::sync::Arc;
use std::time::Duration;

use chatfile_core::attachment::{AttachmentContext, DownloadOutcome, FileMessage};
use chatfile_core::config::ChatfileConfig;
use chatfile_core::guard::{Rejection, TokioReleaseScheduler};
use chatfile_core::locator::Credentials;
use common::RecordingNavigator;

const CONFIG: &str = r#"
    base_url = "https://files.test/chat/"

    [guard]
    cooldown_ms = 3000
    release_after_ms = 1000
"#;

const MESSAGE: &str = r#"{
    "fileId": "f-42",
    "file": { "filename": "c3VtbWFyeS50eHQ", "mimetype": "text/plain" },
    "metadata": { "fileType": "text/plain", "fileSize": 5000 }
}"#;

fn now() -> std::time::Instant {
    tokio::time::Instant::now().into_std()
}

#[tokio::test(start_paused = true)]
async fn release_window_and_cooldown_are_independent() {
    let cfg: ChatfileConfig = toml::from_str(CONFIG).unwrap();
    let scheduler = Arc::new(TokioReleaseScheduler::current().unwrap());
    let ctx = AttachmentContext::from_config(&cfg, scheduler).unwrap();
    let message: FileMessage = serde_json::from_str(MESSAGE).unwrap();
    let mut att = ctx.attachment(message);
    let creds = Credentials::new("tok en", "sess");
    let mut nav = RecordingNavigator::default();

    let preview = att.preview(Some(&creds)).unwrap();
    assert_eq!(preview.display_name, "summary.txt");
    assert_eq!(preview.size_label, "4.88 KB");
    assert!(preview.url.is_none());

    let started = att.on_download(Some(&creds), now(), &mut nav);
    assert_eq!(
        started,
        DownloadOutcome::Started(
            "https://files.test/chat/f-42?token=tok%20en&sessionId=sess&download=true"
                .parse()
                .unwrap()
        )
    );
    let key = att.message().resource_key().unwrap();
    assert!(ctx.guard().is_in_flight(&key));

    // Released after 1s, but the 3s cooldown still rejects.
    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert!(!ctx.guard().is_in_flight(&key));
    assert_eq!(
        att.on_download(Some(&creds), now(), &mut nav),
        DownloadOutcome::Ignored(Rejection::CooldownActive)
    );

    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert!(matches!(
        att.on_download(Some(&creds), now(), &mut nav),
        DownloadOutcome::Started(_)
    ));
    assert_eq!(nav.downloads.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn dropping_an_attachment_does_not_strand_its_key() {
    let cfg: ChatfileConfig = toml::from_str(CONFIG).unwrap();
    let scheduler = Arc::new(TokioReleaseScheduler::current().unwrap());
    let ctx = AttachmentContext::from_config(&cfg, scheduler).unwrap();
    let message: FileMessage = serde_json::from_str(MESSAGE).unwrap();
    let creds = Credentials::new("t", "s");
    let mut nav = RecordingNavigator::default();

    let key = {
        let mut att = ctx.attachment(message.clone());
        assert!(matches!(
            att.on_download(Some(&creds), now(), &mut nav),
            DownloadOutcome::Started(_)
        ));
        att.message().resource_key().unwrap()
    };

    tokio::time::sleep(Duration::from_millis(1001)).await;
    assert!(!ctx.guard().is_in_flight(&key));

    let mut remounted = ctx.attachment(message);
    tokio::time::sleep(Duration::from_millis(2000)).await;
    assert!(matches!(
        remounted.on_download(Some(&creds), now(), &mut nav),
        DownloadOutcome::Started(_)
    ));
}
