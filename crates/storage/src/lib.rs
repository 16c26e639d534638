#![warn(clippy::pedantic)]

pub mod document;
pub mod memory;
pub mod sync;


pub use memory::{MemoryStore, Watch};
pub use sync::HistorySynchronizer;

/// A complete point-in-time result set delivered by a live subscription,
/// never a diff.
pub type Snapshot<T> = Result<Vec<T>, setlog_domain::StoreError>;

/// The per-user collections of the document store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Collection {
    Exercises,
    Workouts,
    Profile,
}
