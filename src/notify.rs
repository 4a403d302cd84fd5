//! Transient user-visible notices ("toasts").
//!
//! Pages push notices through a cloneable [`Notifier`]; whatever renders them
//! drains the paired [`NoticeFeed`].

use std::fmt::Display;

use tokio::sync::mpsc;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeVariant {
    Success,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub variant: NoticeVariant,
}

#[derive(Clone)]
pub struct Notifier {
    sender: mpsc::UnboundedSender<Notice>,
}

pub struct NoticeFeed {
    receiver: mpsc::UnboundedReceiver<Notice>,
}

impl Notifier {
    pub fn channel() -> (Self, NoticeFeed) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, NoticeFeed { receiver })
    }

    pub fn success(&self, title: impl Into<String>, description: impl Into<String>) {
        let notice = Notice {
            title: title.into(),
            description: description.into(),
            variant: NoticeVariant::Success,
        };
        info!(title = %notice.title, "{}", notice.description);
        self.post(notice);
    }

    /// Names the failed action in the title and carries the underlying message.
    pub fn failure(&self, action: impl Into<String>, error: &dyn Display) {
        let notice = Notice {
            title: action.into(),
            description: error.to_string(),
            variant: NoticeVariant::Destructive,
        };
        warn!(title = %notice.title, error = %notice.description, "Action failed");
        self.post(notice);
    }

    fn post(&self, notice: Notice) {
        // Nobody rendering notices is not an error.
        let _ = self.sender.send(notice);
    }
}

impl NoticeFeed {
    /// Everything posted since the last drain, oldest first.
    pub fn drain(&mut self) -> Vec<Notice> {
        let mut notices = Vec::new();
        while let Ok(notice) = self.receiver.try_recv() {
            notices.push(notice);
        }
        notices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notices_arrive_in_order() {
        let (notifier, mut feed) = Notifier::channel();
        notifier.success("Client created", "Ana was added");
        notifier.failure("Failed to delete client", &"row is locked");

        let notices = feed.drain();
        assert_eq!(notices.len(), 2);
        assert_eq!(notices[0].variant, NoticeVariant::Success);
        assert_eq!(notices[1].title, "Failed to delete client");
        assert_eq!(notices[1].description, "row is locked");
        assert_eq!(notices[1].variant, NoticeVariant::Destructive);
        assert!(feed.drain().is_empty());
    }
}
