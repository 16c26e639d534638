use derive_more::Deref;
use uuid::Uuid;

use crate::{CreateError, DeleteError, Name, ReadError, ValidationError};

#[allow(async_fn_in_trait)]
pub trait ExerciseService {
    async fn get_exercises(&self) -> Result<Vec<ExerciseDefinition>, ReadError>;
    async fn create_exercise(
        &self,
        name: Name,
        description: Option<String>,
    ) -> Result<ExerciseDefinition, CreateError>;
    async fn delete_exercise(&self, id: ExerciseID) -> Result<ExerciseID, DeleteError>;

    /// Check a prospective catalog name against the current catalog.
    ///
    /// Uniqueness is a convention, not a store-enforced constraint; this is
    /// the only place it is checked.
    async fn validate_exercise_name(&self, name: &str) -> Result<Name, ValidationError> {
        match Name::new(name) {
            Ok(name) => match self.get_exercises().await {
                Ok(exercises) => {
                    if exercises.iter().all(|e| e.name != name) {
                        Ok(name)
                    } else {
                        Err(ValidationError::Conflict("name".to_string()))
                    }
                }
                Err(err) => Err(ValidationError::Other(err.into())),
            },
            Err(err) => Err(ValidationError::Other(err.into())),
        }
    }
}

#[allow(async_fn_in_trait)]
pub trait ExerciseRepository {
    async fn read_exercises(&self) -> Result<Vec<ExerciseDefinition>, ReadError>;
    async fn create_exercise(
        &self,
        name: Name,
        description: Option<String>,
    ) -> Result<ExerciseDefinition, CreateError>;
    async fn delete_exercise(&self, id: ExerciseID) -> Result<ExerciseID, DeleteError>;
}

/// A user-defined catalog entry. Immutable after creation apart from
/// explicit deletion. Workout records reference it by name only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseDefinition {
    pub id: ExerciseID,
    pub name: Name,
    pub description: Option<String>,
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExerciseID(Uuid);

impl ExerciseID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for ExerciseID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for ExerciseID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}
