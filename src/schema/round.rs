use serde::{Deserialize, Serialize};

use super::choice::ChoiceOption;
use super::message::Attachment;

/// One step of the fixed main narrative sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Round {
    /// Position in the main sequence (0-based, contiguous).
    pub index: usize,
    /// Narrator message shown when the round becomes active.
    pub prompt: String,
    /// Ordered choice set, rendered in order. Empty only for rounds that
    /// are not player-facing (transition placeholders, the post-fork
    /// round whose presentation is delegated to a branch).
    pub choices: Vec<ChoiceOption>,
    /// Optional media shown alongside the prompt.
    pub attachment: Option<Attachment>,
}

/// Identifier for one of the two post-fork branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BranchId {
    /// The romantic route — resolves a win to `WonWarm`.
    Dinner,
    /// The best-friend route — resolves a win to `WonFriend`.
    Hangout,
}

impl BranchId {
    pub const ALL: [BranchId; 2] = [BranchId::Dinner, BranchId::Hangout];
}

/// An alternate terminal round reached only from the fork round.
///
/// A session resolves to at most one branch, exactly once, and never
/// returns to the main sequence afterward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    pub id: BranchId,
    pub prompt: String,
    pub choices: Vec<ChoiceOption>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::choice::{ChoiceId, OutcomeTag};

    #[test]
    fn round_ordering_preserved() {
        let round = Round {
            index: 0,
            prompt: "heyyy".to_string(),
            choices: vec![
                ChoiceOption {
                    id: ChoiceId::from("1A"),
                    display_text: "a".to_string(),
                    continuation_text: "ra".to_string(),
                    outcome_tag: OutcomeTag::Good,
                },
                ChoiceOption {
                    id: ChoiceId::from("1B"),
                    display_text: "b".to_string(),
                    continuation_text: "rb".to_string(),
                    outcome_tag: OutcomeTag::Neutral,
                },
            ],
            attachment: None,
        };
        let ids: Vec<&str> = round.choices.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["1A", "1B"]);
    }

    #[test]
    fn exactly_two_branch_ids() {
        assert_eq!(BranchId::ALL.len(), 2);
        assert_ne!(BranchId::Dinner, BranchId::Hangout);
    }
}
