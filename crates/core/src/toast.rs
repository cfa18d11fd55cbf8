//! Single-slot toast notifications.

use serde::Serialize;

use crate::scheduler::TaskId;

/// Inline style of the notification element. The slide-out starts at 2.7s so
/// it finishes as the 3s lifetime ends.
pub const NOTIFICATION_STYLE: &str = "position: fixed; top: 100px; right: 20px; \
background: linear-gradient(135deg, #68d391 0%, #4fd1c7 100%); color: white; \
padding: 1rem 1.5rem; border-radius: 12px; box-shadow: 0 8px 25px rgba(104, 211, 145, 0.3); \
z-index: 1000; display: flex; align-items: center; gap: 10px; font-weight: 500; \
max-width: 300px; animation: slideInRight 0.3s ease, slideOutRight 0.3s ease 2.7s forwards;";

/// Keyframes and hover treatment injected once into the document head.
pub const NOTIFICATION_KEYFRAMES: &str = "
@keyframes slideInRight {
    from { transform: translateX(100%); opacity: 0; }
    to { transform: translateX(0); opacity: 1; }
}

@keyframes slideOutRight {
    from { transform: translateX(0); opacity: 1; }
    to { transform: translateX(100%); opacity: 0; }
}

.notification {
    transition: all 0.3s ease;
}

.notification:hover {
    transform: scale(1.02);
}
";

pub const NOTIFICATION_ICON_CLASS: &str = "fas fa-info-circle";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct NotificationId(pub u64);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    /// Decorative emoji rendered after the message.
    pub glyph: Option<&'static str>,
}

impl Notification {
    pub fn display_text(&self) -> String {
        match self.glyph {
            Some(g) => format!("{} {g}", self.message),
            None => self.message.clone(),
        }
    }
}

pub fn feature_coming_soon(title: &str) -> String {
    format!("{} feature coming soon!", title.trim())
}

pub fn opening_article(title: &str) -> String {
    format!("Opening \"{}\"...", title.trim())
}

pub const FEATURE_GLYPH: &str = "🧘\u{200d}♀\u{fe0f}";
pub const ARTICLE_GLYPH: &str = "📖";
pub const WELCOME_GLYPH: &str = "🕉\u{fe0f}";

/// Holds the one live notification and the timer that will remove it.
#[derive(Debug, Default)]
pub struct NotificationSlot {
    next_id: u64,
    current: Option<(Notification, TaskId)>,
}

impl NotificationSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn make(&mut self, message: String, glyph: Option<&'static str>) -> Notification {
        self.next_id += 1;
        Notification {
            id: NotificationId(self.next_id),
            message,
            glyph,
        }
    }

    /// Installs `notification`, handing back whatever it displaced.
    pub fn install(
        &mut self,
        notification: Notification,
        expiry: TaskId,
    ) -> Option<(Notification, TaskId)> {
        self.current.replace((notification, expiry))
    }

    /// Clears the slot if it still holds `id`. A stale expiry for a
    /// notification that was already pre-empted returns `None`.
    pub fn expire(&mut self, id: NotificationId) -> Option<Notification> {
        match &self.current {
            Some((n, _)) if n.id == id => self.current.take().map(|(n, _)| n),
            _ => None,
        }
    }

    pub fn clear(&mut self) -> Option<(Notification, TaskId)> {
        self.current.take()
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref().map(|(n, _)| n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_formats() {
        assert_eq!(feature_coming_soon("Meditation Tracker"), "Meditation Tracker feature coming soon!");
        assert_eq!(opening_article(" Breath "), "Opening \"Breath\"...");
    }

    #[test]
    fn display_text_appends_glyph() {
        let mut slot = NotificationSlot::new();
        let n = slot.make("Hi".to_string(), Some(ARTICLE_GLYPH));
        assert_eq!(n.display_text(), "Hi 📖");
        let plain = slot.make("Hi".to_string(), None);
        assert_eq!(plain.display_text(), "Hi");
        assert_ne!(n.id, plain.id);
    }

    #[test]
    fn install_displaces_previous() {
        let mut slot = NotificationSlot::new();
        let a = slot.make("A".to_string(), None);
        let b = slot.make("B".to_string(), None);
        assert!(slot.install(a.clone(), TaskId(1)).is_none());
        let displaced = slot.install(b.clone(), TaskId(2)).unwrap();
        assert_eq!(displaced, (a.clone(), TaskId(1)));
        assert_eq!(slot.current(), Some(&b));

        // The stale expiry for A must not remove B.
        assert!(slot.expire(a.id).is_none());
        assert_eq!(slot.expire(b.id), Some(b));
        assert!(slot.current().is_none());
    }

    #[test]
    fn style_carries_fixed_treatment() {
        assert!(NOTIFICATION_STYLE.contains("position: fixed"));
        assert!(NOTIFICATION_STYLE.contains("slideOutRight 0.3s ease 2.7s"));
        assert!(NOTIFICATION_KEYFRAMES.contains("@keyframes slideInRight"));
    }
}
