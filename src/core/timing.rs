//! Named delay constants for the event schedule, in milliseconds.
//!
//! Delays are a presentation concern: the engine annotates effects with
//! them and the driver honors them cooperatively (timers/callbacks),
//! never by blocking a shared thread.

/// Typing indicator shown before a narrator prompt is revealed.
pub const TYPING_REVEAL_MS: u64 = 1500;

/// Pause between the player's echoed choice and the narrator continuation.
pub const CHOICE_PROCESSING_MS: u64 = 1000;

/// Wait before the social-rejection ending status is revealed.
pub const REJECTION_REVEAL_MS: u64 = 2500;

/// Wait before the mental-collapse ending status is revealed.
///
/// Currently equal to [`REJECTION_REVEAL_MS`]; the two are named
/// separately because they are independently meaningful per ending.
pub const COLLAPSE_REVEAL_MS: u64 = 2500;

/// Wait before a win status is revealed.
pub const VICTORY_REVEAL_MS: u64 = 2500;

/// Lag between the rejection status reveal and the trailing
/// failed-delivery player message.
pub const FAILED_SEND_LAG_MS: u64 = 800;

/// Wait before the system message confirming the meetup at the fork.
pub const MEETUP_CONFIRM_MS: u64 = 2000;

/// Lag between the meetup confirmation and the post-fork prompt's typing
/// indicator.
pub const BRANCH_PROMPT_LAG_MS: u64 = 800;

/// Driver-local settle time for scroll-into-view after an append. Not
/// part of any batch; exported for drivers that want the same feel.
pub const SCROLL_SETTLE_MS: u64 = 50;
