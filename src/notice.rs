use serde::Serialize;
use std::time::{Duration, Instant};

/// How long a success notice stays visible.
pub const SUCCESS_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub message: String,
    pub kind: NoticeKind,
}

#[derive(Debug, Clone)]
struct Shown {
    notice: Notice,
    at: Instant,
}

/// The single notification slot. Errors stay until replaced or cleared;
/// successes expire after [`SUCCESS_TTL`], checked whenever the slot is read.
#[derive(Debug, Clone, Default)]
pub struct Notifier {
    current: Option<Shown>,
}

impl Notifier {
    pub fn show_at(&mut self, message: impl Into<String>, kind: NoticeKind, at: Instant) {
        self.current = Some(Shown {
            notice: Notice {
                message: message.into(),
                kind,
            },
            at,
        });
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.show_at(message, NoticeKind::Success, Instant::now());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.show_at(message, NoticeKind::Error, Instant::now());
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn current_at(&self, now: Instant) -> Option<&Notice> {
        let shown = self.current.as_ref()?;
        let expired = shown.notice.kind == NoticeKind::Success
            && now.saturating_duration_since(shown.at) >= SUCCESS_TTL;
        (!expired).then_some(&shown.notice)
    }

    pub fn current(&self) -> Option<&Notice> {
        self.current_at(Instant::now())
    }
}
