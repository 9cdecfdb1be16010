//! Conversation module - turns chat messages into a completed application.

pub mod collector;
pub mod command;

pub use collector::{ConversationState, InputCollector, Outcome, Prompt};
pub use command::{Command, InputError, ParseError};
