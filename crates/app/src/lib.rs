#![warn(clippy::pedantic)]

pub mod config;
pub mod context;
pub mod message;
pub mod submit;

pub use config::{Config, ConfigError};
pub use context::AppContext;
pub use message::{Message, MessageKind, MessageQueue};
pub use submit::{SubmitOutcome, WorkoutSubmitter};
