use std::cmp::Reverse;

use chrono::{DateTime, NaiveDate, Utc};
use derive_more::Deref;
use uuid::Uuid;

use crate::{CreateError, DeleteError, ReadError, WorkoutSummary};

#[allow(async_fn_in_trait)]
pub trait WorkoutService {
    async fn get_workouts(&self) -> Result<Vec<WorkoutRecord>, ReadError>;
    async fn get_history(&self) -> Result<Vec<WorkoutRecord>, ReadError>;
    async fn get_summary(&self) -> Result<WorkoutSummary, ReadError>;
    async fn create_workout(
        &self,
        date: NaiveDate,
        exercises: Vec<PerformedExercise>,
    ) -> Result<WorkoutRecord, CreateError>;
    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError>;
}

#[allow(async_fn_in_trait)]
pub trait WorkoutRepository {
    async fn read_workouts(&self) -> Result<Vec<WorkoutRecord>, ReadError>;
    async fn create_workout(
        &self,
        date: NaiveDate,
        exercises: Vec<PerformedExercise>,
    ) -> Result<WorkoutRecord, CreateError>;
    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError>;
}

/// One logged workout. Created atomically on submission and never mutated
/// afterwards; the only other lifecycle event is explicit deletion.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutRecord {
    pub id: WorkoutID,
    /// Missing on legacy documents that were stored without a date.
    pub date: Option<NaiveDate>,
    pub exercises: Vec<PerformedExercise>,
    pub created_at: DateTime<Utc>,
}

/// An exercise within a workout record. `exercise_name` is a denormalized
/// copy of the catalog name, not a reference: renaming or deleting the
/// catalog entry leaves historical records untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformedExercise {
    pub exercise_name: String,
    pub sets: Option<f32>,
    pub reps: Option<f32>,
    pub weight: Option<f32>,
    pub notes: String,
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct WorkoutID(Uuid);

impl WorkoutID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for WorkoutID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for WorkoutID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// Sort workouts most recent first. Records without a date sort last, as if
/// they had the earliest possible date. The sort is stable, so records
/// sharing a date keep their input order.
pub fn sort_by_recency(workouts: &mut [WorkoutRecord]) {
    workouts.sort_by_key(|w| Reverse(w.date));
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn record(id: u128, date: Option<NaiveDate>) -> WorkoutRecord {
        WorkoutRecord {
            id: id.into(),
            date,
            exercises: vec![PerformedExercise {
                exercise_name: "Squat".to_string(),
                sets: Some(3.0),
                reps: Some(5.0),
                weight: Some(100.0),
                notes: String::new(),
            }],
            created_at: DateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn test_workout_id_nil() {
        assert!(WorkoutID::nil().is_nil());
        assert_eq!(WorkoutID::nil(), WorkoutID::default());
    }

    #[test]
    fn test_sort_by_recency() {
        let mut workouts = vec![
            record(1, NaiveDate::from_ymd_opt(2024, 1, 1)),
            record(2, None),
            record(3, NaiveDate::from_ymd_opt(2024, 6, 1)),
        ];
        sort_by_recency(&mut workouts);
        assert_eq!(
            workouts.iter().map(|w| w.id).collect::<Vec<_>>(),
            vec![3.into(), 1.into(), 2.into()]
        );
    }

    #[test]
    fn test_sort_by_recency_is_stable() {
        let mut workouts = vec![
            record(1, NaiveDate::from_ymd_opt(2024, 3, 1)),
            record(2, NaiveDate::from_ymd_opt(2024, 3, 1)),
            record(3, None),
            record(4, None),
        ];
        sort_by_recency(&mut workouts);
        assert_eq!(
            workouts.iter().map(|w| w.id).collect::<Vec<_>>(),
            vec![1.into(), 2.into(), 3.into(), 4.into()]
        );
    }
}
