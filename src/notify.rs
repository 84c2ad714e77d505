//! Local notifications and blocking notices.
//!
//! Delivery belongs to the platform. This module only shapes what is handed over and makes sure
//! a failed hand-over never reaches the caller: notifications are fire-and-forget.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::HomeGateErr;

/// How the platform should present a notification while the app is in the foreground.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Presentation {
    /// Show a banner or alert.
    pub show_alert: bool,
    /// Play the notification sound.
    pub play_sound: bool,
    /// Update the app icon badge.
    pub set_badge: bool,
}

impl Default for Presentation {
    fn default() -> Self {
        Presentation {
            show_alert: true,
            play_sound: true,
            set_badge: false,
        }
    }
}

/// A local notification, delivered immediately.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub presentation: Presentation,
    pub posted_at: DateTime<Utc>,
}

/// Where notifications are handed to the platform.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Hand over a notification. Success only means it was accepted, not that it was shown.
    async fn schedule(&self, notification: Notification) -> Result<(), HomeGateErr>;
}

/// A handle for posting notifications with a fixed presentation.
///
/// Create one at startup with `Notifier::init` and pass clones around.
#[derive(Clone)]
pub struct Notifier {
    sink: Arc<dyn NotificationSink>,
    presentation: Presentation,
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("presentation", &self.presentation)
            .finish()
    }
}

impl Notifier {
    /// Longest a sink may take to accept one notification before it is given up on.
    pub const HAND_OVER_TIMEOUT: Duration = Duration::from_secs(5);

    /// Configure how notifications are presented and where they go.
    pub fn init(sink: Arc<dyn NotificationSink>, presentation: Presentation) -> Self {
        log::debug!("notifications configured: {:?}", presentation);
        Notifier { sink, presentation }
    }

    /// The presentation stamped on every notification.
    pub fn presentation(&self) -> Presentation {
        self.presentation
    }

    /// Post a notification. Failures and sinks that never answer are logged and dropped.
    pub async fn post(&self, title: &str, body: &str) {
        let notification = Notification {
            title: title.to_owned(),
            body: body.to_owned(),
            presentation: self.presentation,
            posted_at: Utc::now(),
        };

        let handed_over = self.sink.schedule(notification);
        match tokio::time::timeout(Self::HAND_OVER_TIMEOUT, handed_over).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => log::warn!("notification '{}' not scheduled: {}", title, err),
            Err(_) => log::warn!(
                "notification '{}' dropped, sink gave no answer in {:?}",
                title,
                Self::HAND_OVER_TIMEOUT
            ),
        }
    }
}

/// A blocking message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The user refused access to their location.
    PermissionDenied,
    /// The listing was unlocked.
    Unlocked {
        /// Address of the listing that was unlocked.
        address: String,
    },
}

impl Notice {
    /// Title line of the notice.
    pub fn title(&self) -> &'static str {
        match self {
            Notice::PermissionDenied => "Permission to access location was denied",
            Notice::Unlocked { .. } => "Success",
        }
    }

    /// Body text, if any.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Notice::PermissionDenied => None,
            Notice::Unlocked { .. } => Some("Home unlocked successfully!"),
        }
    }
}

/// The surface that shows blocking notices.
pub trait AlertSink: Send + Sync {
    /// Show a notice. Must not block the caller.
    fn alert(&self, notice: Notice);
}

/// Keeps every notification it is handed.
#[derive(Debug, Default)]
pub struct RecordingSink {
    posted: Mutex<Vec<Notification>>,
    fail: bool,
}

impl RecordingSink {
    /// A sink that accepts everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that rejects everything, but still records what it was handed.
    pub fn failing() -> Self {
        RecordingSink {
            posted: Mutex::new(vec![]),
            fail: true,
        }
    }

    /// Everything handed over so far.
    pub fn posted(&self) -> Vec<Notification> {
        self.posted
            .lock()
            .map(|posted| posted.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn schedule(&self, notification: Notification) -> Result<(), HomeGateErr> {
        if let Ok(mut posted) = self.posted.lock() {
            posted.push(notification);
        }

        if self.fail {
            Err(HomeGateErr::NotificationFailed(
                "sink refuses notifications".to_owned(),
            ))
        } else {
            Ok(())
        }
    }
}

/// Keeps every notice it is shown.
#[derive(Debug, Default)]
pub struct RecordingAlerts {
    shown: Mutex<Vec<Notice>>,
}

impl RecordingAlerts {
    /// Create an empty one.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything shown so far.
    pub fn shown(&self) -> Vec<Notice> {
        self.shown
            .lock()
            .map(|shown| shown.clone())
            .unwrap_or_default()
    }
}

impl AlertSink for RecordingAlerts {
    fn alert(&self, notice: Notice) {
        if let Ok(mut shown) = self.shown.lock() {
            shown.push(notice);
        }
    }
}

/// Writes notifications and notices to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

#[async_trait]
impl NotificationSink for LogSink {
    async fn schedule(&self, notification: Notification) -> Result<(), HomeGateErr> {
        log::info!(
            "notification [{}] {}: {}",
            notification.posted_at.to_rfc3339(),
            notification.title,
            notification.body
        );
        Ok(())
    }
}

impl AlertSink for LogSink {
    fn alert(&self, notice: Notice) {
        match notice.message() {
            Some(msg) => log::warn!("{}: {}", notice.title(), msg),
            None => log::warn!("{}", notice.title()),
        }
    }
}

#[cfg(test)]
mod unit {
    use super::*;

    #[tokio::test]
    async fn test_post_stamps_presentation() {
        let sink = Arc::new(RecordingSink::new());
        let presentation = Presentation {
            show_alert: false,
            play_sound: false,
            set_badge: true,
        };
        let notifier = Notifier::init(sink.clone(), presentation);

        notifier.post("Title", "Body").await;

        let posted = sink.posted();
        assert_eq!(posted.len(), 1);
        assert_eq!(posted[0].title, "Title");
        assert_eq!(posted[0].body, "Body");
        assert_eq!(posted[0].presentation, presentation);
    }

    #[tokio::test]
    async fn test_post_swallows_failures() {
        let sink = Arc::new(RecordingSink::failing());
        let notifier = Notifier::init(sink.clone(), Presentation::default());

        notifier.post("Title", "Body").await;
        notifier.post("Again", "Body").await;

        assert_eq!(sink.posted().len(), 2);
    }

    struct Unresponsive;

    #[async_trait]
    impl NotificationSink for Unresponsive {
        async fn schedule(&self, _notification: Notification) -> Result<(), HomeGateErr> {
            std::future::pending().await
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_post_gives_up_on_unresponsive_sink() {
        let notifier = Notifier::init(Arc::new(Unresponsive), Presentation::default());

        let start = tokio::time::Instant::now();
        notifier.post("Title", "Body").await;

        assert!(start.elapsed() >= Notifier::HAND_OVER_TIMEOUT);
        assert!(start.elapsed() < Notifier::HAND_OVER_TIMEOUT * 2);
    }

    #[test]
    fn test_default_presentation() {
        let presentation = Presentation::default();
        assert!(presentation.show_alert);
        assert!(presentation.play_sound);
        assert!(!presentation.set_badge);
    }

    #[test]
    fn test_notice_text() {
        assert_eq!(
            Notice::PermissionDenied.title(),
            "Permission to access location was denied"
        );
        assert!(Notice::PermissionDenied.message().is_none());

        let unlocked = Notice::Unlocked {
            address: "123 Main St".to_owned(),
        };
        assert_eq!(unlocked.title(), "Success");
        assert_eq!(unlocked.message(), Some("Home unlocked successfully!"));
    }

    #[test]
    fn test_recording_alerts() {
        let alerts = RecordingAlerts::new();
        alerts.alert(Notice::PermissionDenied);
        assert_eq!(alerts.shown(), vec![Notice::PermissionDenied]);
    }
}
