//! The narrative script: rounds, branches, the routing table, and the
//! validation pass that runs before any session starts.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

use super::choice::{ChoiceId, ChoiceOption};
use super::round::{Branch, BranchId, Round};

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("round index out of range: {0}")]
    RoundOutOfRange(usize),
    #[error("branch not defined: {0:?}")]
    UnknownBranch(BranchId),
    #[error("round at position {position} has index {found}")]
    BadRoundIndex { position: usize, found: usize },
    #[error("final round must delegate its choices to a branch")]
    UndelegatedFinalRound,
    #[error("duplicate choice id {id:?} in {scope:?}")]
    DuplicateChoiceId { scope: RouteKey, id: ChoiceId },
    #[error("no route for choice {id:?} offered by {scope:?}")]
    MissingRoute { scope: RouteKey, id: ChoiceId },
    #[error("route references choice {id:?} not offered by {scope:?}")]
    DanglingRoute { scope: RouteKey, id: ChoiceId },
    #[error("branch routes must terminate the session: {0:?}")]
    NonTerminalBranchRoute(RouteKey),
    #[error("win transition keyed on the main sequence: {0:?}")]
    WinFromMain(RouteKey),
    #[error("advance past the end of the main sequence at round {0}")]
    AdvancePastEnd(usize),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// Where a routing entry is keyed: a main-sequence round or a branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RouteKey {
    Main(usize),
    Branch(BranchId),
}

/// What happens after a choice's continuation has been delivered.
///
/// One entry per reachable `(RouteKey, ChoiceId)` pair. Routing is data
/// plus one interpreter in the engine — no per-choice callbacks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Transition {
    /// Move to the next main-sequence round and emit its prompt.
    Advance,
    /// Resolve the session's branch, confirm the meetup with a system
    /// message, then land on the post-fork round under that branch.
    Fork(BranchId),
    /// Terminal win; resolves to `WonWarm` or `WonFriend` via the branch
    /// the session is on.
    EndWin,
    /// Terminal mental-collapse loss. No further message.
    EndMental,
    /// Terminal social-rejection loss, with the choice-specific rejection
    /// narrative and the short text of the trailing failed-delivery
    /// player message.
    EndSocial {
        rejection: String,
        failed_text: String,
    },
}

/// Closing narration for the endings whose text is fixed script data.
/// The social-rejection text is dynamic (per terminating choice) and
/// lives in the routing table instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EndingTexts {
    pub won_warm: String,
    pub won_friend: String,
    pub lost_mental: String,
}

/// An immutable narrative script: the main round sequence, the two
/// post-fork branches, the routing table, and ending narration.
///
/// Read-only once built; [`Script::validate`] must pass before the first
/// session starts so content bugs fail fast, never mid-play.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    pub rounds: Vec<Round>,
    pub branches: FxHashMap<BranchId, Branch>,
    pub routes: FxHashMap<(RouteKey, ChoiceId), Transition>,
    pub system_fork_text: String,
    pub endings: EndingTexts,
}

impl Script {
    /// Load a script from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<Script, ScriptError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Parse a script from a RON string.
    pub fn parse_ron(input: &str) -> Result<Script, ScriptError> {
        Ok(ron::from_str(input)?)
    }

    pub fn main_sequence_length(&self) -> usize {
        self.rounds.len()
    }

    pub fn round_at(&self, index: usize) -> Result<&Round, ScriptError> {
        self.rounds
            .get(index)
            .ok_or(ScriptError::RoundOutOfRange(index))
    }

    pub fn branch_at(&self, id: BranchId) -> Result<&Branch, ScriptError> {
        self.branches.get(&id).ok_or(ScriptError::UnknownBranch(id))
    }

    /// The choice set offered at a route key.
    pub fn choice_set(&self, key: RouteKey) -> Result<&[ChoiceOption], ScriptError> {
        match key {
            RouteKey::Main(index) => Ok(&self.round_at(index)?.choices),
            RouteKey::Branch(id) => Ok(&self.branch_at(id)?.choices),
        }
    }

    /// The routing entry for a choice, if one exists.
    pub fn route(&self, key: RouteKey, id: &ChoiceId) -> Option<&Transition> {
        self.routes.get(&(key, id.clone()))
    }

    /// Startup validation pass over the whole script.
    ///
    /// Verifies: contiguous round indices from 0, both branches defined,
    /// a delegated final round, choice-id uniqueness per choice set,
    /// full routing coverage of every offered choice, no dangling route,
    /// and structurally sound transitions (forks only from the main
    /// sequence, wins only from branches, no advance past the end).
    pub fn validate(&self) -> Result<(), ScriptError> {
        if self.rounds.is_empty() {
            return Err(ScriptError::RoundOutOfRange(0));
        }
        for (position, round) in self.rounds.iter().enumerate() {
            if round.index != position {
                return Err(ScriptError::BadRoundIndex {
                    position,
                    found: round.index,
                });
            }
        }
        let last = self.rounds.len() - 1;
        if !self.rounds[last].choices.is_empty() {
            return Err(ScriptError::UndelegatedFinalRound);
        }

        for id in BranchId::ALL {
            if !self.branches.contains_key(&id) {
                return Err(ScriptError::UnknownBranch(id));
            }
        }

        let mut scopes: Vec<RouteKey> = (0..self.rounds.len()).map(RouteKey::Main).collect();
        scopes.extend(BranchId::ALL.map(RouteKey::Branch));

        for scope in &scopes {
            let choices = self.choice_set(*scope)?;
            let mut seen: HashSet<&ChoiceId> = HashSet::new();
            for choice in choices {
                if !seen.insert(&choice.id) {
                    return Err(ScriptError::DuplicateChoiceId {
                        scope: *scope,
                        id: choice.id.clone(),
                    });
                }
                if self.route(*scope, &choice.id).is_none() {
                    return Err(ScriptError::MissingRoute {
                        scope: *scope,
                        id: choice.id.clone(),
                    });
                }
            }
        }

        for ((key, id), transition) in &self.routes {
            self.check_transition(*key, transition)?;
            let choices = self.choice_set(*key)?;
            if !choices.iter().any(|c| &c.id == id) {
                return Err(ScriptError::DanglingRoute {
                    scope: *key,
                    id: id.clone(),
                });
            }
        }

        Ok(())
    }

    fn check_transition(&self, scope: RouteKey, transition: &Transition) -> Result<(), ScriptError> {
        match (scope, transition) {
            (RouteKey::Main(index), Transition::Advance) => {
                if index + 1 >= self.rounds.len() {
                    return Err(ScriptError::AdvancePastEnd(index));
                }
            }
            (RouteKey::Branch(_), Transition::Advance | Transition::Fork(_)) => {
                return Err(ScriptError::NonTerminalBranchRoute(scope));
            }
            (RouteKey::Main(_), Transition::EndWin) => {
                return Err(ScriptError::WinFromMain(scope));
            }
            (RouteKey::Main(_), Transition::Fork(target)) => {
                self.branch_at(*target)?;
            }
            _ => {}
        }
        Ok(())
    }
}
