#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod draft;
pub mod error;
pub mod exercise;
pub mod name;
pub mod profile;
pub mod service;
pub mod session;
pub mod statistics;
pub mod workout;

pub use draft::{AddOutcome, DraftExercise, DraftField, NumericInput, WorkoutDraft};
pub use error::{
    AuthError, CreateError, DeleteError, ReadError, StoreError, SubscribeError, UpdateError,
    ValidationError,
};
pub use exercise::{ExerciseDefinition, ExerciseID, ExerciseRepository, ExerciseService};
pub use name::{Name, NameError};
pub use profile::{
    ProfileRepository, ProfileService, UserProfile, Username, UsernameError,
};
pub use service::Service;
pub use session::{SessionRepository, SessionService, UserID};
pub use statistics::{WorkoutSummary, summarize};
pub use workout::{
    PerformedExercise, WorkoutID, WorkoutRecord, WorkoutRepository, WorkoutService,
    sort_by_recency,
};
