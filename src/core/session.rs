//! Mutable play-through state: one session, one player, one transcript.

use serde::{Deserialize, Serialize};

use crate::schema::message::{Attachment, Message, MessageId, Speaker};
use crate::schema::round::BranchId;

/// Where a session stands.
///
/// Monotonic: once a terminal value is set it never changes again;
/// only a full `start()` revives the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    NotStarted,
    InProgress,
    WonWarm,
    WonFriend,
    LostSocial,
    LostMental,
}

impl Status {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::WonWarm | Self::WonFriend | Self::LostSocial | Self::LostMental
        )
    }
}

/// Sentinel for "no choices currently offered".
pub(crate) const NO_ROUND: i32 = -1;

/// One play-through's mutable state.
///
/// The transcript is append-only: messages are never edited, truncated,
/// or reordered after emission.
#[derive(Debug, Clone)]
pub struct Session {
    status: Status,
    current_index: i32,
    branch: Option<BranchId>,
    message_log: Vec<Message>,
    pending_ending_text: Option<String>,
    next_message_id: u64,
    clock: u64,
}

impl Session {
    pub(crate) fn new() -> Self {
        Self {
            status: Status::NotStarted,
            current_index: NO_ROUND,
            branch: None,
            message_log: Vec::new(),
            pending_ending_text: None,
            next_message_id: 0,
            clock: 0,
        }
    }

    /// Full reset into a fresh in-progress incarnation. No partial reset
    /// exists by design.
    pub(crate) fn reset(&mut self) {
        *self = Self::new();
        self.status = Status::InProgress;
        self.current_index = 0;
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn current_index(&self) -> i32 {
        self.current_index
    }

    /// The active round index, unless the sentinel is set.
    pub fn active_index(&self) -> Option<usize> {
        usize::try_from(self.current_index).ok()
    }

    pub fn branch(&self) -> Option<BranchId> {
        self.branch
    }

    pub fn message_log(&self) -> &[Message] {
        &self.message_log
    }

    pub fn pending_ending_text(&self) -> Option<&str> {
        self.pending_ending_text.as_deref()
    }

    pub(crate) fn set_status(&mut self, status: Status) {
        self.status = status;
    }

    pub(crate) fn set_current_index(&mut self, index: i32) {
        self.current_index = index;
    }

    pub(crate) fn hide_choices(&mut self) {
        self.current_index = NO_ROUND;
    }

    pub(crate) fn resolve_branch(&mut self, branch: BranchId) {
        self.branch = Some(branch);
    }

    pub(crate) fn set_pending_ending_text(&mut self, text: String) {
        self.pending_ending_text = Some(text);
    }

    /// Append a message to the transcript and return a copy for the
    /// event batch. Ids and logical timestamps count up per session.
    pub(crate) fn push_message(
        &mut self,
        speaker: Speaker,
        text: String,
        attachment: Option<Attachment>,
        delivery_failed: bool,
    ) -> Message {
        let message = Message {
            id: MessageId(self.next_message_id),
            speaker,
            text,
            produced_at: self.clock,
            attachment,
            delivery_failed,
        };
        self.next_message_id += 1;
        self.clock += 1;
        self.message_log.push(message.clone());
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_statuses() {
        assert!(!Status::NotStarted.is_terminal());
        assert!(!Status::InProgress.is_terminal());
        assert!(Status::WonWarm.is_terminal());
        assert!(Status::WonFriend.is_terminal());
        assert!(Status::LostSocial.is_terminal());
        assert!(Status::LostMental.is_terminal());
    }

    #[test]
    fn fresh_session_is_not_started() {
        let session = Session::new();
        assert_eq!(session.status(), Status::NotStarted);
        assert_eq!(session.current_index(), NO_ROUND);
        assert_eq!(session.active_index(), None);
        assert!(session.message_log().is_empty());
    }

    #[test]
    fn reset_clears_everything() {
        let mut session = Session::new();
        session.push_message(Speaker::Narrator, "hi".to_string(), None, false);
        session.resolve_branch(BranchId::Dinner);
        session.set_pending_ending_text("gone".to_string());
        session.reset();
        assert_eq!(session.status(), Status::InProgress);
        assert_eq!(session.active_index(), Some(0));
        assert_eq!(session.branch(), None);
        assert!(session.message_log().is_empty());
        assert!(session.pending_ending_text().is_none());
    }

    #[test]
    fn message_ids_and_timestamps_count_up() {
        let mut session = Session::new();
        let a = session.push_message(Speaker::Narrator, "a".to_string(), None, false);
        let b = session.push_message(Speaker::Player, "b".to_string(), None, false);
        assert_eq!(a.id, MessageId(0));
        assert_eq!(b.id, MessageId(1));
        assert!(a.produced_at < b.produced_at);
        assert_eq!(session.message_log().len(), 2);
    }
}
