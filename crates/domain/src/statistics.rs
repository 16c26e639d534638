use std::collections::HashMap;

use crate::WorkoutRecord;

/// Summary metrics derived from a workout history.
///
/// Recomputed wholesale on every change to the underlying record list; there
/// is no incremental update path.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutSummary {
    pub total_workouts: usize,
    pub total_exercises_logged: usize,
    /// Sum of `weight * sets` over all performed exercises that have both
    /// values. Reps are deliberately excluded from the formula.
    pub total_volume_lifted: f32,
    /// `None` when there are no records. Ties are broken by the name first
    /// encountered in input order.
    pub most_frequent_exercise: Option<String>,
    pub average_exercises_per_workout: f32,
}

impl WorkoutSummary {
    #[must_use]
    pub fn most_frequent_exercise_label(&self) -> &str {
        self.most_frequent_exercise.as_deref().unwrap_or("N/A")
    }
}

/// Reduce a workout history into its summary. Pure and deterministic for a
/// fixed input order.
#[must_use]
pub fn summarize(records: &[WorkoutRecord]) -> WorkoutSummary {
    let total_workouts = records.len();
    let total_exercises_logged = records.iter().map(|r| r.exercises.len()).sum::<usize>();

    let total_volume_lifted = records
        .iter()
        .flat_map(|r| &r.exercises)
        .filter_map(|e| Some(e.weight? * e.sets?))
        .sum::<f32>();

    let mut occurrences: HashMap<&str, (usize, u32)> = HashMap::new();
    for (position, exercise) in records.iter().flat_map(|r| &r.exercises).enumerate() {
        occurrences
            .entry(exercise.exercise_name.as_str())
            .or_insert((position, 0))
            .1 += 1;
    }
    let most_frequent_exercise = occurrences
        .into_iter()
        .max_by(|(_, (first_a, count_a)), (_, (first_b, count_b))| {
            count_a.cmp(count_b).then_with(|| first_b.cmp(first_a))
        })
        .map(|(name, _)| name.to_string());

    #[allow(clippy::cast_precision_loss)]
    let average_exercises_per_workout = if total_workouts == 0 {
        0.0
    } else {
        total_exercises_logged as f32 / total_workouts as f32
    };

    WorkoutSummary {
        total_workouts,
        total_exercises_logged,
        total_volume_lifted,
        most_frequent_exercise,
        average_exercises_per_workout,
    }
}
