use std::cell::Cell;

use log::warn;
use setlog_domain::{
    CreateError, Service, ValidationError, WorkoutDraft, WorkoutRecord, WorkoutRepository,
    WorkoutService as _,
};

/// Outcome of a submission attempt. `Rejected` and `Failed` leave the draft
/// untouched so the user can correct or retry it.
#[derive(Debug)]
pub enum SubmitOutcome {
    Submitted(WorkoutRecord),
    /// A previous submission of this submitter has not finished yet.
    InFlight,
    Rejected(ValidationError),
    Failed(CreateError),
}

/// Serializes workout submissions.
///
/// While a submission is awaiting the store, further attempts return
/// [`SubmitOutcome::InFlight`] instead of inserting a second record. There is
/// no idempotency key on the insert itself, so a retry after an ambiguous
/// network failure can still duplicate the workout.
#[derive(Debug, Default)]
pub struct WorkoutSubmitter {
    in_flight: Cell<bool>,
}

impl WorkoutSubmitter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.get()
    }

    /// Finalize the draft and insert it as a workout record. The draft is
    /// cleared only after the insert succeeded.
    pub async fn submit<R: WorkoutRepository>(
        &self,
        service: &Service<R>,
        draft: &mut WorkoutDraft,
    ) -> SubmitOutcome {
        if self.in_flight.replace(true) {
            warn!("workout submission ignored, another one is in flight");
            return SubmitOutcome::InFlight;
        }
        let outcome = match draft.finalize() {
            Ok((date, exercises)) => match service.create_workout(date, exercises).await {
                Ok(record) => {
                    draft.clear();
                    SubmitOutcome::Submitted(record)
                }
                Err(err) => SubmitOutcome::Failed(err),
            },
            Err(err) => SubmitOutcome::Rejected(err),
        };
        self.in_flight.set(false);
        outcome
    }
}
