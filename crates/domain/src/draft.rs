use chrono::NaiveDate;

use crate::{Name, PerformedExercise, ValidationError};

/// A numeric form field of the draft.
///
/// An emptied input box is a valid transient state and must not be coerced
/// to a number while the user is still editing. Normalization to 0 happens
/// at the submit boundary only.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub enum NumericInput {
    #[default]
    Empty,
    Value(f32),
}

impl NumericInput {
    /// Parse raw form input. The empty string stays [`NumericInput::Empty`],
    /// anything parseable is clamped to be non-negative, and unparsable
    /// input clears the field.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Self::Empty;
        }
        match trimmed.parse::<f32>() {
            Ok(value) if value.is_finite() => Self::Value(value.max(0.0)),
            _ => Self::Empty,
        }
    }

    #[must_use]
    pub fn normalized(self) -> f32 {
        match self {
            Self::Empty => 0.0,
            Self::Value(value) => value,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DraftExercise {
    pub exercise_name: String,
    pub sets: NumericInput,
    pub reps: NumericInput,
    pub weight: NumericInput,
    pub notes: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Sets,
    Reps,
    Weight,
    Notes,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// The draft already holds an entry with this name. The draft is left
    /// unchanged; the caller surfaces a warning instead of failing.
    AlreadyPresent,
}

/// The client-local workout being composed before submission.
///
/// Exclusively owned by the composing flow; there is no concurrent mutation
/// path. Submission itself lives at the application boundary, the draft only
/// validates and normalizes.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutDraft {
    pub date: NaiveDate,
    entries: Vec<DraftExercise>,
}

impl WorkoutDraft {
    #[must_use]
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            entries: vec![],
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[DraftExercise] {
        &self.entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn add_exercise(&mut self, name: &Name) -> AddOutcome {
        if self
            .entries
            .iter()
            .any(|e| &e.exercise_name == name.as_ref())
        {
            return AddOutcome::AlreadyPresent;
        }
        self.entries.push(DraftExercise {
            exercise_name: name.to_string(),
            sets: NumericInput::Value(1.0),
            reps: NumericInput::Value(1.0),
            weight: NumericInput::Empty,
            notes: String::new(),
        });
        AddOutcome::Added
    }

    /// Apply raw form input to an entry. Out-of-range indices are ignored.
    pub fn update_entry(&mut self, index: usize, field: DraftField, value: &str) {
        let Some(entry) = self.entries.get_mut(index) else {
            return;
        };
        match field {
            DraftField::Sets => entry.sets = NumericInput::parse(value),
            DraftField::Reps => entry.reps = NumericInput::parse(value),
            DraftField::Weight => entry.weight = NumericInput::parse(value),
            DraftField::Notes => entry.notes = value.to_string(),
        }
    }

    pub fn remove_entry(&mut self, index: usize) {
        if index < self.entries.len() {
            self.entries.remove(index);
        }
    }

    /// Normalize the draft into the exercises of a submittable record.
    ///
    /// The draft itself is not consumed. It is cleared by the submit flow
    /// only after the store insert succeeded, so a failed submission keeps
    /// the composed entries for a manual retry.
    pub fn finalize(&self) -> Result<(NaiveDate, Vec<PerformedExercise>), ValidationError> {
        if self.entries.is_empty() {
            return Err(ValidationError::EmptyWorkout);
        }
        let exercises = self
            .entries
            .iter()
            .map(|e| PerformedExercise {
                exercise_name: e.exercise_name.clone(),
                sets: Some(e.sets.normalized()),
                reps: Some(e.reps.normalized()),
                weight: Some(e.weight.normalized()),
                notes: e.notes.clone(),
            })
            .collect();
        Ok((self.date, exercises))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn draft_with(names: &[&str]) -> WorkoutDraft {
        let mut draft = WorkoutDraft::new(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        for name in names {
            assert_eq!(draft.add_exercise(&Name::new(name).unwrap()), AddOutcome::Added);
        }
        draft
    }

    #[rstest]
    #[case("", NumericInput::Empty)]
    #[case("   ", NumericInput::Empty)]
    #[case("3", NumericInput::Value(3.0))]
    #[case("2.5", NumericInput::Value(2.5))]
    #[case("-4", NumericInput::Value(0.0))]
    #[case("abc", NumericInput::Empty)]
    #[case("NaN", NumericInput::Empty)]
    fn test_numeric_input_parse(#[case] value: &str, #[case] expected: NumericInput) {
        assert_eq!(NumericInput::parse(value), expected);
    }

    #[rstest]
    #[case(NumericInput::Empty, 0.0)]
    #[case(NumericInput::Value(7.5), 7.5)]
    fn test_numeric_input_normalized(#[case] input: NumericInput, #[case] expected: f32) {
        assert_eq!(input.normalized(), expected);
    }

    #[test]
    fn test_add_exercise_defaults() {
        let draft = draft_with(&["Squat"]);
        assert_eq!(
            draft.entries(),
            &[DraftExercise {
                exercise_name: "Squat".to_string(),
                sets: NumericInput::Value(1.0),
                reps: NumericInput::Value(1.0),
                weight: NumericInput::Empty,
                notes: String::new(),
            }]
        );
    }

    #[test]
    fn test_add_exercise_duplicate() {
        let mut draft = draft_with(&["Squat"]);
        assert_eq!(
            draft.add_exercise(&Name::new("Squat").unwrap()),
            AddOutcome::AlreadyPresent
        );
        assert_eq!(draft.entries().len(), 1);
    }

    #[test]
    fn test_update_entry() {
        let mut draft = draft_with(&["Squat"]);
        draft.update_entry(0, DraftField::Sets, "5");
        draft.update_entry(0, DraftField::Reps, "-3");
        draft.update_entry(0, DraftField::Weight, "");
        draft.update_entry(0, DraftField::Notes, "felt heavy");
        assert_eq!(draft.entries()[0].sets, NumericInput::Value(5.0));
        assert_eq!(draft.entries()[0].reps, NumericInput::Value(0.0));
        assert_eq!(draft.entries()[0].weight, NumericInput::Empty);
        assert_eq!(draft.entries()[0].notes, "felt heavy");
        // out of range
        draft.update_entry(7, DraftField::Sets, "5");
        assert_eq!(draft.entries().len(), 1);
    }

    #[test]
    fn test_remove_entry_shifts_positions() {
        let mut draft = draft_with(&["Squat", "Bench Press", "Deadlift"]);
        draft.remove_entry(1);
        assert_eq!(
            draft
                .entries()
                .iter()
                .map(|e| e.exercise_name.as_str())
                .collect::<Vec<_>>(),
            vec!["Squat", "Deadlift"]
        );
        draft.remove_entry(5);
        assert_eq!(draft.entries().len(), 2);
    }

    #[test]
    fn test_finalize_empty_draft() {
        let draft = WorkoutDraft::new(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert!(matches!(
            draft.finalize(),
            Err(ValidationError::EmptyWorkout)
        ));
    }

    #[test]
    fn test_finalize_normalizes_empty_fields() {
        let mut draft = draft_with(&["Squat"]);
        draft.update_entry(0, DraftField::Weight, "");
        assert_eq!(draft.entries()[0].weight, NumericInput::Empty);
        let (date, exercises) = draft.finalize().unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(
            exercises,
            vec![PerformedExercise {
                exercise_name: "Squat".to_string(),
                sets: Some(1.0),
                reps: Some(1.0),
                weight: Some(0.0),
                notes: String::new(),
            }]
        );
        // the draft is kept until the submit flow clears it
        assert_eq!(draft.entries().len(), 1);
        draft.clear();
        assert!(draft.is_empty());
    }
}
