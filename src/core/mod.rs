//! The session engine: play-through state, the transition interpreter,
//! and the delay-annotated event schedule it emits.

pub mod engine;
pub mod events;
pub mod session;
pub mod timing;

pub use engine::{SessionEngine, SessionError};
pub use events::{Effect, EventBatch, ScheduledEffect};
pub use session::{Session, Status};
