use std::time::{Duration, Instant};

/// Transient message shown on the status line. A new message replaces the
/// old one along with its deadline; there is no queue.
#[derive(Debug, Default, Clone)]
pub struct Status {
    current: Option<Notice>,
}

#[derive(Debug, Clone)]
struct Notice {
    text: String,
    expires_at: Instant,
}

impl Status {
    pub fn show<S: Into<String>>(&mut self, text: S, ttl: Duration, now: Instant) {
        self.current = Some(Notice {
            text: text.into(),
            expires_at: now + ttl,
        });
    }

    pub fn text(&self) -> Option<&str> {
        self.current.as_ref().map(|notice| notice.text.as_str())
    }

    /// Drops an expired message. Returns true when the visible text changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match &self.current {
            Some(notice) if now >= notice.expires_at => {
                self.current = None;
                true
            }
            _ => false,
        }
    }
}
