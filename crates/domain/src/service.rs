use chrono::NaiveDate;
use log::{debug, error};

use crate::{
    AuthError, CreateError, DeleteError, ExerciseDefinition, ExerciseID, ExerciseRepository,
    ExerciseService, Name, PerformedExercise, ProfileRepository, ProfileService, ReadError,
    SessionRepository, SessionService, UpdateError, UserID, UserProfile, Username, WorkoutID,
    WorkoutRecord, WorkoutRepository, WorkoutService, WorkoutSummary, sort_by_recency, summarize,
};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func.await;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Store(crate::StoreError::NoConnection) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R: SessionRepository> SessionService for Service<R> {
    async fn sign_in(&self, custom_token: Option<&str>) -> Result<UserID, AuthError> {
        let result = self.repository.sign_in(custom_token).await;
        if let Err(ref err) = result {
            error!("failed to sign in: {err}");
        }
        result
    }

    async fn current_user(&self) -> Option<UserID> {
        self.repository.current_user().await
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let result = self.repository.sign_out().await;
        if let Err(ref err) = result {
            error!("failed to sign out: {err}");
        }
        result
    }
}

impl<R: ExerciseRepository> ExerciseService for Service<R> {
    async fn get_exercises(&self) -> Result<Vec<ExerciseDefinition>, ReadError> {
        log_on_error!(
            self.repository.read_exercises(),
            ReadError,
            "get",
            "exercises"
        )
    }

    async fn create_exercise(
        &self,
        name: Name,
        description: Option<String>,
    ) -> Result<ExerciseDefinition, CreateError> {
        log_on_error!(
            self.repository.create_exercise(name, description),
            CreateError,
            "create",
            "exercise"
        )
    }

    async fn delete_exercise(&self, id: ExerciseID) -> Result<ExerciseID, DeleteError> {
        log_on_error!(
            self.repository.delete_exercise(id),
            DeleteError,
            "delete",
            "exercise"
        )
    }
}

impl<R: WorkoutRepository> WorkoutService for Service<R> {
    async fn get_workouts(&self) -> Result<Vec<WorkoutRecord>, ReadError> {
        log_on_error!(self.repository.read_workouts(), ReadError, "get", "workouts")
    }

    async fn get_history(&self) -> Result<Vec<WorkoutRecord>, ReadError> {
        let mut workouts = self.get_workouts().await?;
        sort_by_recency(&mut workouts);
        Ok(workouts)
    }

    async fn get_summary(&self) -> Result<WorkoutSummary, ReadError> {
        Ok(summarize(&self.get_workouts().await?))
    }

    async fn create_workout(
        &self,
        date: NaiveDate,
        exercises: Vec<PerformedExercise>,
    ) -> Result<WorkoutRecord, CreateError> {
        log_on_error!(
            self.repository.create_workout(date, exercises),
            CreateError,
            "create",
            "workout"
        )
    }

    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError> {
        log_on_error!(
            self.repository.delete_workout(id),
            DeleteError,
            "delete",
            "workout"
        )
    }
}

impl<R: ProfileRepository> ProfileService for Service<R> {
    async fn get_profile(&self) -> Result<UserProfile, ReadError> {
        log_on_error!(self.repository.read_profile(), ReadError, "get", "profile")
    }

    async fn set_username(&self, username: Username) -> Result<UserProfile, UpdateError> {
        log_on_error!(
            self.repository.write_profile(UserProfile {
                username: Some(username),
            }),
            UpdateError,
            "update",
            "profile"
        )
    }
}
