//! The engine's timed output: ordered, delay-annotated display effects.

use serde::{Deserialize, Serialize};

use crate::core::session::Status;
use crate::schema::choice::ChoiceOption;
use crate::schema::message::Message;

/// One display effect the driver must apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Effect {
    AppendMessage(Message),
    SetTypingIndicator(bool),
    SetStatus(Status),
    SetChoiceSet(Vec<ChoiceOption>),
}

/// An effect plus the delay from the previous effect in the batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledEffect {
    pub delay_ms: u64,
    pub effect: Effect,
}

/// An ordered sequence of scheduled effects emitted by one engine call.
///
/// The driver applies each effect after its delay, in order, then calls
/// [`crate::core::SessionEngine::settle`] with the batch's incarnation.
/// Batches from a previous incarnation are stale and must be discarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventBatch {
    pub incarnation: u64,
    pub effects: Vec<ScheduledEffect>,
}

impl EventBatch {
    pub(crate) fn new(incarnation: u64) -> Self {
        Self {
            incarnation,
            effects: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, delay_ms: u64, effect: Effect) {
        self.effects.push(ScheduledEffect { delay_ms, effect });
    }

    /// Total scheduled duration of the batch.
    pub fn total_delay_ms(&self) -> u64 {
        self.effects.iter().map(|e| e.delay_ms).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_accumulates_in_order() {
        let mut batch = EventBatch::new(1);
        batch.push(0, Effect::SetTypingIndicator(true));
        batch.push(1500, Effect::SetTypingIndicator(false));
        assert_eq!(batch.effects.len(), 2);
        assert_eq!(batch.effects[1].delay_ms, 1500);
        assert_eq!(batch.total_delay_ms(), 1500);
    }
}
