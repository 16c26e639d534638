//! Full workflow: configuration, sign-in, catalog, composition, submission,
//! and the synchronized history view.

use chrono::NaiveDate;
use futures_executor::block_on;
use pretty_assertions::assert_eq;
use setlog_app::{
    AppContext, Config, Message, SubmitOutcome, WorkoutSubmitter,
    config::{API_KEY_VAR, AUTH_TOKEN_VAR, NAMESPACE_VAR},
};
use setlog_domain::{AddOutcome, DraftField, ExerciseService as _, WorkoutDraft};
use setlog_storage::{HistorySynchronizer, MemoryStore};

fn config() -> Config {
    temp_env::with_vars(
        [
            (API_KEY_VAR, Some("key")),
            (NAMESPACE_VAR, Some("test")),
            (AUTH_TOKEN_VAR, None),
        ],
        || Config::from_env().unwrap(),
    )
}

#[test]
fn test_log_a_workout_and_watch_it_appear() {
    let store = MemoryStore::new();
    let context = block_on(AppContext::initialize(store.clone(), &config())).unwrap();
    let service = context.service();

    // build up the catalog
    for name in ["Squat", "Bench Press"] {
        let name = block_on(service.validate_exercise_name(name)).unwrap();
        block_on(service.create_exercise(name, None)).unwrap();
    }
    let exercises = block_on(service.get_exercises()).unwrap();
    assert_eq!(exercises.len(), 2);

    let mut synchronizer = HistorySynchronizer::subscribe(&store, context.user()).unwrap();
    assert!(
        block_on(synchronizer.next_snapshot())
            .unwrap()
            .unwrap()
            .is_empty()
    );

    // compose the draft
    let mut draft = WorkoutDraft::new(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
    assert_eq!(draft.add_exercise(&exercises[0].name), AddOutcome::Added);
    assert_eq!(
        draft.add_exercise(&exercises[0].name),
        AddOutcome::AlreadyPresent
    );
    assert_eq!(
        Message::duplicate_exercise(exercises[0].name.as_ref().as_str()),
        Message::warning("Squat has already been added to this workout.")
    );
    assert_eq!(draft.add_exercise(&exercises[1].name), AddOutcome::Added);
    draft.update_entry(0, DraftField::Sets, "3");
    draft.update_entry(0, DraftField::Reps, "5");
    draft.update_entry(0, DraftField::Weight, "100");
    draft.update_entry(1, DraftField::Weight, "");

    let submitter = WorkoutSubmitter::new();
    let outcome = block_on(submitter.submit(service, &mut draft));
    let record = match outcome {
        SubmitOutcome::Submitted(record) => record,
        other => panic!("submission failed: {other:?}"),
    };
    assert!(draft.is_empty());
    assert_eq!(record.exercises[1].weight, Some(0.0));

    // the subscription delivers the new history snapshot
    let snapshot = block_on(synchronizer.next_snapshot()).unwrap().unwrap();
    assert_eq!(snapshot, &[record.clone()]);

    let summary = synchronizer.summary();
    assert_eq!(summary.total_workouts, 1);
    assert_eq!(summary.total_exercises_logged, 2);
    assert_eq!(summary.most_frequent_exercise_label(), "Squat");

    synchronizer.dispose();
}
