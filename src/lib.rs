//! Chatsim Engine — a branching-narrative engine for chat-style games.
//!
//! Drives a player through a fixed sequence of scripted rounds, each with a
//! narrator prompt and a set of mutually exclusive choices, and routes the
//! session to one of several terminal endings based on the choices made.
//! The engine renders nothing: it consumes an immutable [`schema::Script`]
//! and emits deterministic, delay-annotated event batches for a
//! presentation driver to replay.

pub mod core;
pub mod scenarios;
pub mod schema;
