use std::time::{Duration, Instant};

pub const MESSAGE_DURATION: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub kind: MessageKind,
}

impl Message {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: MessageKind::Success,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: MessageKind::Error,
        }
    }
}

/// The single shared message slot.
///
/// Every `show` schedules a hide `MESSAGE_DURATION` later, and any pending
/// hide takes down whatever is showing when it fires. A message shown shortly
/// after another one therefore disappears when the earlier timer expires.
#[derive(Debug, Default)]
pub struct MessageArea {
    current: Option<(Message, Instant)>,
    pending_hides: Vec<Instant>,
}

impl MessageArea {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, message: Message, now: Instant) {
        self.pending_hides.retain(|hide_at| *hide_at > now);
        self.pending_hides.push(now + MESSAGE_DURATION);
        self.current = Some((message, now));
    }

    pub fn visible(&self, now: Instant) -> Option<&Message> {
        let (message, shown_at) = self.current.as_ref()?;
        let hidden_at = self
            .pending_hides
            .iter()
            .filter(|hide_at| *hide_at > shown_at)
            .min()?;
        (now < *hidden_at).then_some(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_after_five_seconds() {
        let start = Instant::now();
        let mut area = MessageArea::new();
        area.show(Message::success("Signed up b@x.com"), start);

        assert_eq!(
            area.visible(start + Duration::from_millis(4_999)),
            Some(&Message::success("Signed up b@x.com"))
        );
        assert_eq!(area.visible(start + MESSAGE_DURATION), None);
    }

    #[test]
    fn test_new_message_replaces_current() {
        let start = Instant::now();
        let mut area = MessageArea::new();
        area.show(Message::success("first"), start);
        area.show(Message::error("second"), start + Duration::from_millis(10));

        let shown = area.visible(start + Duration::from_millis(20)).unwrap();
        assert_eq!(shown.text, "second");
        assert_eq!(shown.kind, MessageKind::Error);
    }

    #[test]
    fn test_earlier_timer_hides_later_message() {
        let start = Instant::now();
        let mut area = MessageArea::new();
        area.show(Message::success("first"), start);
        area.show(Message::success("second"), start + Duration::from_secs(3));

        // The first message's timer fires at 5s and hides "second" early.
        assert!(area.visible(start + Duration::from_millis(4_999)).is_some());
        assert_eq!(area.visible(start + Duration::from_secs(5)), None);
    }

    #[test]
    fn test_expired_timers_do_not_affect_new_messages() {
        let start = Instant::now();
        let mut area = MessageArea::new();
        area.show(Message::success("first"), start);

        let later = start + Duration::from_secs(10);
        area.show(Message::error("second"), later);

        assert!(area.visible(later + Duration::from_millis(4_999)).is_some());
        assert_eq!(area.visible(later + MESSAGE_DURATION), None);
    }

    #[test]
    fn test_empty_area() {
        assert_eq!(MessageArea::new().visible(Instant::now()), None);
    }
}
