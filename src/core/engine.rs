//! The session engine: holds one play-through and interprets the
//! script's routing table into state changes plus scheduled effects.

use thiserror::Error;

use crate::core::events::{Effect, EventBatch};
use crate::core::session::{Session, Status};
use crate::core::timing;
use crate::schema::choice::{ChoiceId, ChoiceOption};
use crate::schema::message::{Attachment, Message, Speaker};
use crate::schema::round::BranchId;
use crate::schema::script::{RouteKey, Script, ScriptError, Transition};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("choice {0:?} is not in the currently offered set")]
    InvalidChoice(ChoiceId),
    #[error("session already ended with status {0:?}")]
    Terminated(Status),
    #[error("a previous event batch has not settled yet")]
    Busy,
    #[error("session has not been started")]
    NotStarted,
    #[error("script fault: {0}")]
    Script(#[from] ScriptError),
}

/// Drives one session through a validated [`Script`].
///
/// State changes are applied eagerly when `start`/`submit_choice` is
/// called; the returned [`EventBatch`] is the display schedule the
/// driver replays with the annotated delays. From batch emission until
/// the driver calls [`SessionEngine::settle`], the engine is busy:
/// [`SessionEngine::current_choice_set`] is empty and further submits
/// are rejected, which serializes overlapping input observably.
pub struct SessionEngine {
    script: Script,
    session: Session,
    incarnation: u64,
    busy: bool,
}

impl SessionEngine {
    /// Build an engine over a script, failing fast on any content bug.
    pub fn new(script: Script) -> Result<Self, ScriptError> {
        script.validate()?;
        Ok(Self {
            script,
            session: Session::new(),
            incarnation: 0,
            busy: false,
        })
    }

    /// Begin (or restart) a session. Never fails.
    ///
    /// Bumps the incarnation so timers still pending from a previous
    /// run cannot settle the new session, resets all state, and
    /// schedules the round-0 prompt behind a typing delay.
    pub fn start(&mut self) -> EventBatch {
        self.incarnation += 1;
        self.busy = true;
        self.session.reset();

        let mut batch = EventBatch::new(self.incarnation);
        batch.push(0, Effect::SetStatus(Status::InProgress));
        batch.push(0, Effect::SetChoiceSet(Vec::new()));
        if let Some(round) = self.script.rounds.first().cloned() {
            self.reveal_prompt(&mut batch, 0, round.prompt, round.attachment, round.choices);
        }
        batch
    }

    /// Submit the id of one of the currently offered choices.
    ///
    /// Appends the player's echo immediately, schedules the narrator
    /// continuation behind a typing window, then applies the routing
    /// table's transition for `(active scope, choice id)`.
    pub fn submit_choice(&mut self, choice_id: &str) -> Result<EventBatch, SessionError> {
        let status = self.session.status();
        if status.is_terminal() {
            return Err(SessionError::Terminated(status));
        }
        if status == Status::NotStarted {
            return Err(SessionError::NotStarted);
        }
        if self.busy {
            return Err(SessionError::Busy);
        }

        let scope = self
            .active_scope()
            .ok_or_else(|| SessionError::InvalidChoice(ChoiceId::from(choice_id)))?;
        let choice = self
            .script
            .choice_set(scope)?
            .iter()
            .find(|c| c.id.as_str() == choice_id)
            .cloned()
            .ok_or_else(|| SessionError::InvalidChoice(ChoiceId::from(choice_id)))?;
        let transition = self
            .script
            .route(scope, &choice.id)
            .cloned()
            .ok_or(ScriptError::MissingRoute {
                scope,
                id: choice.id.clone(),
            })?;

        self.busy = true;
        let mut batch = EventBatch::new(self.incarnation);

        let echo = self
            .session
            .push_message(Speaker::Player, choice.display_text.clone(), None, false);
        batch.push(0, Effect::AppendMessage(echo));
        batch.push(0, Effect::SetChoiceSet(Vec::new()));
        batch.push(0, Effect::SetTypingIndicator(true));
        batch.push(timing::CHOICE_PROCESSING_MS, Effect::SetTypingIndicator(false));
        let reply = self.session.push_message(
            Speaker::Narrator,
            choice.continuation_text.clone(),
            None,
            false,
        );
        batch.push(0, Effect::AppendMessage(reply));

        self.apply_transition(scope, transition, &mut batch)?;
        Ok(batch)
    }

    fn apply_transition(
        &mut self,
        scope: RouteKey,
        transition: Transition,
        batch: &mut EventBatch,
    ) -> Result<(), SessionError> {
        match transition {
            Transition::Advance => {
                let RouteKey::Main(index) = scope else {
                    return Err(ScriptError::NonTerminalBranchRoute(scope).into());
                };
                let next = index + 1;
                let round = self.script.round_at(next)?.clone();
                self.session.set_current_index(next as i32);
                self.reveal_prompt(
                    batch,
                    0,
                    round.prompt,
                    round.attachment,
                    round.choices,
                );
            }
            Transition::Fork(branch_id) => {
                self.session.resolve_branch(branch_id);
                let branch = self.script.branch_at(branch_id)?.clone();
                let confirm = self.session.push_message(
                    Speaker::System,
                    self.script.system_fork_text.clone(),
                    None,
                    false,
                );
                batch.push(timing::MEETUP_CONFIRM_MS, Effect::AppendMessage(confirm));
                let post_fork = self.script.main_sequence_length() - 1;
                self.session.set_current_index(post_fork as i32);
                self.reveal_prompt(
                    batch,
                    timing::BRANCH_PROMPT_LAG_MS,
                    branch.prompt,
                    None,
                    branch.choices,
                );
            }
            Transition::EndWin => {
                let won = match scope {
                    RouteKey::Branch(BranchId::Dinner) => Status::WonWarm,
                    RouteKey::Branch(BranchId::Hangout) => Status::WonFriend,
                    RouteKey::Main(_) => {
                        return Err(ScriptError::WinFromMain(scope).into());
                    }
                };
                self.session.hide_choices();
                self.session.set_status(won);
                batch.push(timing::VICTORY_REVEAL_MS, Effect::SetStatus(won));
            }
            Transition::EndMental => {
                self.session.hide_choices();
                self.session.set_status(Status::LostMental);
                batch.push(
                    timing::COLLAPSE_REVEAL_MS,
                    Effect::SetStatus(Status::LostMental),
                );
            }
            Transition::EndSocial {
                rejection,
                failed_text,
            } => {
                self.session.hide_choices();
                self.session.set_pending_ending_text(rejection);
                self.session.set_status(Status::LostSocial);
                batch.push(
                    timing::REJECTION_REVEAL_MS,
                    Effect::SetStatus(Status::LostSocial),
                );
                let failed = self
                    .session
                    .push_message(Speaker::Player, failed_text, None, true);
                batch.push(timing::FAILED_SEND_LAG_MS, Effect::AppendMessage(failed));
            }
        }
        Ok(())
    }

    /// Typing indicator, then the narrator prompt, then the new choice
    /// set — the shared tail of `start`, advances, and forks.
    fn reveal_prompt(
        &mut self,
        batch: &mut EventBatch,
        lead_delay_ms: u64,
        prompt: String,
        attachment: Option<Attachment>,
        choices: Vec<ChoiceOption>,
    ) {
        batch.push(lead_delay_ms, Effect::SetTypingIndicator(true));
        batch.push(timing::TYPING_REVEAL_MS, Effect::SetTypingIndicator(false));
        let message = self
            .session
            .push_message(Speaker::Narrator, prompt, attachment, false);
        batch.push(0, Effect::AppendMessage(message));
        batch.push(0, Effect::SetChoiceSet(choices));
    }

    /// Driver acknowledgment that every timer of the given batch
    /// incarnation has fired. Stale incarnations are ignored, so timers
    /// surviving a restart cannot release the new session's input.
    pub fn settle(&mut self, incarnation: u64) {
        if incarnation == self.incarnation {
            self.busy = false;
        }
    }

    /// The ordered choices currently open to the player. Empty while a
    /// batch is settling, while no round is active, or once the session
    /// has ended.
    pub fn current_choice_set(&self) -> &[ChoiceOption] {
        if self.busy {
            return &[];
        }
        match self.active_scope() {
            Some(scope) => self.script.choice_set(scope).unwrap_or(&[]),
            None => &[],
        }
    }

    /// Read-only snapshot of the transcript so far.
    pub fn message_log(&self) -> &[Message] {
        self.session.message_log()
    }

    pub fn status(&self) -> Status {
        self.session.status()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn script(&self) -> &Script {
        &self.script
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn incarnation(&self) -> u64 {
        self.incarnation
    }

    /// The ending narration for a terminal session: the dynamically
    /// selected rejection text for `LostSocial`, the script's fixed
    /// ending text otherwise.
    pub fn ending_text(&self) -> Option<&str> {
        match self.session.status() {
            Status::LostSocial => self.session.pending_ending_text(),
            Status::LostMental => Some(&self.script.endings.lost_mental),
            Status::WonWarm => Some(&self.script.endings.won_warm),
            Status::WonFriend => Some(&self.script.endings.won_friend),
            Status::NotStarted | Status::InProgress => None,
        }
    }

    fn active_scope(&self) -> Option<RouteKey> {
        if self.session.status() != Status::InProgress {
            return None;
        }
        let index = self.session.active_index()?;
        if index + 1 == self.script.main_sequence_length() {
            self.session.branch().map(RouteKey::Branch)
        } else {
            Some(RouteKey::Main(index))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenarios::saturday_promise;

    fn started_engine() -> SessionEngine {
        let mut engine = SessionEngine::new(saturday_promise()).unwrap();
        let batch = engine.start();
        engine.settle(batch.incarnation);
        engine
    }

    #[test]
    fn new_rejects_invalid_script() {
        let mut script = saturday_promise();
        script.branches.clear();
        assert!(SessionEngine::new(script).is_err());
    }

    #[test]
    fn start_offers_round_zero() {
        let engine = started_engine();
        assert_eq!(engine.status(), Status::InProgress);
        assert_eq!(engine.session().active_index(), Some(0));
        assert_eq!(engine.message_log().len(), 1);
        assert_eq!(engine.message_log()[0].speaker, Speaker::Narrator);
        assert!(!engine.current_choice_set().is_empty());
    }

    #[test]
    fn submit_before_start_rejected() {
        let mut engine = SessionEngine::new(saturday_promise()).unwrap();
        assert!(matches!(
            engine.submit_choice("1A"),
            Err(SessionError::NotStarted)
        ));
    }

    #[test]
    fn busy_until_settled() {
        let mut engine = SessionEngine::new(saturday_promise()).unwrap();
        let batch = engine.start();
        assert!(engine.is_busy());
        assert!(engine.current_choice_set().is_empty());
        assert!(matches!(
            engine.submit_choice("1A"),
            Err(SessionError::Busy)
        ));
        engine.settle(batch.incarnation);
        assert!(!engine.is_busy());
        assert!(!engine.current_choice_set().is_empty());
    }

    #[test]
    fn stale_settle_ignored_after_restart() {
        let mut engine = SessionEngine::new(saturday_promise()).unwrap();
        let old = engine.start();
        engine.start();
        engine.settle(old.incarnation);
        assert!(engine.is_busy(), "stale timer must not release input");
    }

    #[test]
    fn invalid_choice_leaves_state_unchanged() {
        let mut engine = started_engine();
        let log_before = engine.message_log().to_vec();
        let err = engine.submit_choice("9Z").unwrap_err();
        assert!(matches!(err, SessionError::InvalidChoice(_)));
        assert_eq!(engine.status(), Status::InProgress);
        assert_eq!(engine.session().active_index(), Some(0));
        assert_eq!(engine.message_log(), log_before.as_slice());
        assert!(!engine.is_busy());
    }

    #[test]
    fn player_echo_is_immediate_and_first() {
        let mut engine = started_engine();
        let batch = engine.submit_choice("1A").unwrap();
        let first = &batch.effects[0];
        assert_eq!(first.delay_ms, 0);
        match &first.effect {
            Effect::AppendMessage(m) => assert_eq!(m.speaker, Speaker::Player),
            other => panic!("expected player echo first, got {other:?}"),
        }
    }

    #[test]
    fn advance_moves_to_next_round() {
        let mut engine = started_engine();
        let batch = engine.submit_choice("1A").unwrap();
        engine.settle(batch.incarnation);
        assert_eq!(engine.session().active_index(), Some(1));
        // echo, continuation, next prompt
        assert_eq!(engine.message_log().len(), 4);
        let prompt = engine.message_log().last().unwrap();
        assert_eq!(prompt.speaker, Speaker::Narrator);
        assert!(prompt.attachment.is_some(), "round 1 prompt carries media");
    }

    #[test]
    fn ending_text_only_when_terminal() {
        let engine = started_engine();
        assert!(engine.ending_text().is_none());
    }
}
