use serde::{Deserialize, Serialize};

/// Newtype wrapper for message ids, unique within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub u64);

/// Who a transcript line is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Speaker {
    Narrator,
    Player,
    System,
}

/// Opaque reference to a displayable media resource. The engine never
/// interprets the contents; the driver resolves it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment(pub String);

/// One line in the rendered transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub speaker: Speaker,
    pub text: String,
    /// Logical timestamp — a per-session sequence number. Only ordering
    /// matters, not precision.
    pub produced_at: u64,
    pub attachment: Option<Attachment>,
    /// Marks a simulated failed-delivery artifact. Failed messages are
    /// appended as new entries, never mutations of prior ones.
    pub delivery_failed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_shape() {
        let m = Message {
            id: MessageId(1),
            speaker: Speaker::Narrator,
            text: "hey, you're on!".to_string(),
            produced_at: 0,
            attachment: None,
            delivery_failed: false,
        };
        assert_eq!(m.id, MessageId(1));
        assert_eq!(m.speaker, Speaker::Narrator);
        assert!(!m.delivery_failed);
    }

    #[test]
    fn attachment_is_opaque() {
        let m = Message {
            id: MessageId(2),
            speaker: Speaker::Narrator,
            text: "look what I made".to_string(),
            produced_at: 1,
            attachment: Some(Attachment("attachment://gyoza.jpg".to_string())),
            delivery_failed: false,
        };
        assert_eq!(
            m.attachment,
            Some(Attachment("attachment://gyoza.jpg".to_string()))
        );
    }
}
