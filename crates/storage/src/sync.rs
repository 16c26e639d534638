//! Local mirror of a user's workout history.
//!
//! The synchronizer owns the mirror and replaces it wholesale on every
//! snapshot, so a consumer never observes a partially applied update.

use log::{debug, warn};
use setlog_domain as domain;
use setlog_domain::sort_by_recency;

use crate::memory::{MemoryStore, Watch};

pub struct HistorySynchronizer {
    watch: Watch<domain::WorkoutRecord>,
    mirror: Vec<domain::WorkoutRecord>,
    failed: bool,
}

impl HistorySynchronizer {
    /// Establish a live subscription on the workout collection of `user`.
    ///
    /// A fresh subscription always re-fetches the complete current snapshot
    /// before the first emission; nothing is cached across
    /// subscribe/unsubscribe cycles.
    pub fn subscribe(
        store: &MemoryStore,
        user: domain::UserID,
    ) -> Result<Self, domain::SubscribeError> {
        Ok(Self::new(store.watch_workouts(user)?))
    }

    #[must_use]
    pub fn new(watch: Watch<domain::WorkoutRecord>) -> Self {
        Self {
            watch,
            mirror: vec![],
            failed: false,
        }
    }

    /// Wait for the next snapshot and apply it to the mirror, sorted most
    /// recent first.
    ///
    /// After an error emission the subscription is dead and this returns
    /// `None` from then on; the caller may re-subscribe, there is no
    /// automatic retry. `None` is also returned once the synchronizer has
    /// been disposed of.
    pub async fn next_snapshot(
        &mut self,
    ) -> Option<Result<&[domain::WorkoutRecord], domain::StoreError>> {
        if self.failed {
            return None;
        }
        match self.watch.next().await? {
            Ok(mut records) => {
                sort_by_recency(&mut records);
                debug!("applying history snapshot with {} records", records.len());
                self.mirror = records;
                Some(Ok(&self.mirror))
            }
            Err(err) => {
                warn!("history subscription failed: {err}");
                self.failed = true;
                Some(Err(err))
            }
        }
    }

    /// The current mirror, sorted most recent first. Kept as-is after a
    /// subscription error.
    #[must_use]
    pub fn current(&self) -> &[domain::WorkoutRecord] {
        &self.mirror
    }

    /// Summary statistics over the current mirror, recomputed on demand.
    #[must_use]
    pub fn summary(&self) -> domain::WorkoutSummary {
        domain::summarize(&self.mirror)
    }

    #[must_use]
    pub fn is_live(&self) -> bool {
        self.watch.is_live() && !self.failed
    }

    pub fn dispose(&mut self) {
        self.watch.dispose();
    }
}

#[cfg(test)]
mod tests {
    use futures_executor::block_on;
    use futures_util::FutureExt;
    use pretty_assertions::assert_eq;
    use setlog_domain::{SessionRepository as _, WorkoutRepository as _};

    use crate::tests::data;

    use super::*;

    fn synchronized_store() -> (MemoryStore, HistorySynchronizer) {
        let store = MemoryStore::new();
        let user = block_on(store.sign_in(None)).unwrap();
        let synchronizer = HistorySynchronizer::subscribe(&store, user).unwrap();
        (store, synchronizer)
    }

    #[test]
    fn test_initial_snapshot_is_empty() {
        let (_store, mut synchronizer) = synchronized_store();
        assert_eq!(
            block_on(synchronizer.next_snapshot()).unwrap().unwrap(),
            &[] as &[setlog_domain::WorkoutRecord]
        );
        assert_eq!(synchronizer.summary().total_workouts, 0);
    }

    #[test]
    fn test_mirror_is_sorted_most_recent_first() {
        let (store, mut synchronizer) = synchronized_store();
        block_on(synchronizer.next_snapshot()).unwrap().unwrap();

        for (year, month, day) in [(2024, 1, 1), (2024, 6, 1), (2024, 3, 1)] {
            block_on(store.create_workout(data::date(year, month, day), data::exercises()))
                .unwrap();
            block_on(synchronizer.next_snapshot()).unwrap().unwrap();
        }

        assert_eq!(
            synchronizer
                .current()
                .iter()
                .map(|w| w.date.unwrap())
                .collect::<Vec<_>>(),
            vec![
                data::date(2024, 6, 1),
                data::date(2024, 3, 1),
                data::date(2024, 1, 1),
            ]
        );
    }

    #[test]
    fn test_summary_follows_mirror() {
        let (store, mut synchronizer) = synchronized_store();
        block_on(synchronizer.next_snapshot()).unwrap().unwrap();

        block_on(store.create_workout(data::date(2024, 6, 1), data::exercises())).unwrap();
        block_on(synchronizer.next_snapshot()).unwrap().unwrap();

        let summary = synchronizer.summary();
        assert_eq!(summary.total_workouts, 1);
        assert_eq!(summary.total_exercises_logged, 2);
    }

    #[test]
    fn test_error_emission_goes_quiet() {
        let mut synchronizer = HistorySynchronizer::new(Watch::with_queued(vec![
            Err(domain::StoreError::NoConnection),
            Ok(vec![]),
        ]));
        assert!(matches!(
            block_on(synchronizer.next_snapshot()),
            Some(Err(domain::StoreError::NoConnection))
        ));
        assert!(!synchronizer.is_live());

        // the queued snapshot after the error is never surfaced
        assert!(
            synchronizer
                .next_snapshot()
                .now_or_never()
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn test_dispose_stops_emissions() {
        let (store, mut synchronizer) = synchronized_store();
        block_on(synchronizer.next_snapshot()).unwrap().unwrap();

        block_on(store.create_workout(data::date(2024, 6, 1), data::exercises())).unwrap();
        synchronizer.dispose();
        assert!(!synchronizer.is_live());
        assert!(
            synchronizer
                .next_snapshot()
                .now_or_never()
                .unwrap()
                .is_none()
        );

        // the mirror keeps its last applied state
        assert!(synchronizer.current().is_empty());

        // disposing again is a no-op
        synchronizer.dispose();
    }
}
