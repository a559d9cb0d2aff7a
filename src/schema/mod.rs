//! Data-only schema types: choices, messages, rounds, and the script table.

pub mod choice;
pub mod message;
pub mod round;
pub mod script;

pub use choice::{ChoiceId, ChoiceOption, OutcomeTag};
pub use message::{Attachment, Message, MessageId, Speaker};
pub use round::{Branch, BranchId, Round};
pub use script::{EndingTexts, RouteKey, Script, ScriptError, Transition};
