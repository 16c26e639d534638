//! Wire shapes of the hosted document store.
//!
//! Field names follow the store's camelCase convention. Documents do not
//! carry their own identifier; the store assigns one and hands it back
//! alongside the document.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use setlog_domain as domain;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseDocument {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ExerciseDocument {
    pub fn into_definition(
        self,
        id: domain::ExerciseID,
    ) -> Result<domain::ExerciseDefinition, domain::NameError> {
        Ok(domain::ExerciseDefinition {
            id,
            name: domain::Name::new(&self.name)?,
            description: self.description,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutDocument {
    pub user_id: String,
    /// Calendar dates are persisted at fixed noon UTC so that client
    /// timezone offsets cannot shift them into a neighboring day.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    pub exercises_performed: Vec<PerformedExerciseDocument>,
    pub created_at: DateTime<Utc>,
}

impl WorkoutDocument {
    #[must_use]
    pub fn new(
        user_id: domain::UserID,
        date: NaiveDate,
        exercises: &[domain::PerformedExercise],
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id: user_id.to_string(),
            date: Some(noon_utc(date)),
            exercises_performed: exercises
                .iter()
                .map(PerformedExerciseDocument::from)
                .collect(),
            created_at,
        }
    }

    #[must_use]
    pub fn into_record(self, id: domain::WorkoutID) -> domain::WorkoutRecord {
        domain::WorkoutRecord {
            id,
            date: self.date.map(|d| d.date_naive()),
            exercises: self
                .exercises_performed
                .into_iter()
                .map(PerformedExerciseDocument::into_performed_exercise)
                .collect(),
            created_at: self.created_at,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PerformedExerciseDocument {
    pub exercise_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sets: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f32>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,
}

impl PerformedExerciseDocument {
    #[must_use]
    pub fn into_performed_exercise(self) -> domain::PerformedExercise {
        domain::PerformedExercise {
            exercise_name: self.exercise_name,
            sets: self.sets,
            reps: self.reps,
            weight: self.weight,
            notes: self.notes,
        }
    }
}

impl From<&domain::PerformedExercise> for PerformedExerciseDocument {
    fn from(value: &domain::PerformedExercise) -> Self {
        Self {
            exercise_name: value.exercise_name.clone(),
            sets: value.sets,
            reps: value.reps,
            weight: value.weight,
            notes: value.notes.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

fn noon_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap())
        .and_utc()
}
