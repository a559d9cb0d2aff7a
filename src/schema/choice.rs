use serde::{Deserialize, Serialize};

/// Newtype wrapper for choice identifiers.
///
/// Choice ids are stable strings ("3B", "6AB", ...) unique within the
/// choice set that offers them; routing is keyed on them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChoiceId(pub String);

impl ChoiceId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ChoiceId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Scoring classification of a choice.
///
/// Tags are for scoring/analytics only — routing never consults them,
/// it is keyed on the specific [`ChoiceId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutcomeTag {
    Neutral,
    Best,
    Good,
    Bad,
}

impl OutcomeTag {
    /// Returns the tag string for this outcome (e.g., "outcome:best").
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Neutral => "outcome:neutral",
            Self::Best => "outcome:best",
            Self::Good => "outcome:good",
            Self::Bad => "outcome:bad",
        }
    }
}

impl Default for OutcomeTag {
    fn default() -> Self {
        Self::Neutral
    }
}

/// One selectable player response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub id: ChoiceId,
    /// Shown as the player's outgoing message when selected.
    pub display_text: String,
    /// The narrator's reply, shown unconditionally after selection —
    /// even on a path that terminates the session.
    pub continuation_text: String,
    pub outcome_tag: OutcomeTag,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choice_id_from_str() {
        let id = ChoiceId::from("3B");
        assert_eq!(id.as_str(), "3B");
        assert_eq!(id, ChoiceId("3B".to_string()));
    }

    #[test]
    fn outcome_tags() {
        assert_eq!(OutcomeTag::Neutral.tag(), "outcome:neutral");
        assert_eq!(OutcomeTag::Best.tag(), "outcome:best");
        assert_eq!(OutcomeTag::Bad.tag(), "outcome:bad");
        assert_eq!(OutcomeTag::default(), OutcomeTag::Neutral);
    }

    #[test]
    fn choice_option_shape() {
        let c = ChoiceOption {
            id: ChoiceId::from("1A"),
            display_text: "Sounds good.".to_string(),
            continuation_text: "great!!".to_string(),
            outcome_tag: OutcomeTag::Good,
        };
        assert_eq!(c.id.as_str(), "1A");
        assert_eq!(c.outcome_tag, OutcomeTag::Good);
    }
}
