//! In-memory realtime document store.
//!
//! Mirrors the contract of the hosted store: per-user collections,
//! store-assigned identifiers and server timestamps, and live subscriptions
//! that deliver the full current snapshot on registration and after every
//! change. There is no true parallelism, only interleaved callbacks; the
//! mutex serializes those.

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex, MutexGuard,
        atomic::{AtomicBool, Ordering},
    },
};

use chrono::Utc;
use futures_channel::mpsc::{UnboundedReceiver, UnboundedSender, unbounded};
use futures_util::StreamExt;
use log::debug;
use setlog_domain as domain;
use uuid::Uuid;

use crate::{
    Collection, Snapshot,
    document::{ExerciseDocument, ProfileDocument, WorkoutDocument},
};

#[derive(Default, Clone)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

#[derive(Default)]
struct State {
    session: Option<domain::UserID>,
    users: HashMap<domain::UserID, UserData>,
    exercise_watchers: Vec<Watcher<domain::ExerciseDefinition>>,
    workout_watchers: Vec<Watcher<domain::WorkoutRecord>>,
}

#[derive(Default)]
struct UserData {
    exercises: Vec<(Uuid, ExerciseDocument)>,
    workouts: Vec<(Uuid, WorkoutDocument)>,
    profile: ProfileDocument,
}

struct Watcher<T> {
    user: domain::UserID,
    live: Arc<AtomicBool>,
    sender: UnboundedSender<Snapshot<T>>,
}

/// A live subscription to one user's collection.
///
/// The caller must [`dispose`](Watch::dispose) of it explicitly; dropping an
/// undisposed watch leaks the registration until the next notification
/// prunes it. Disposal is idempotent and immediate: deliveries that were
/// already queued are dropped, not surfaced.
pub struct Watch<T> {
    receiver: UnboundedReceiver<Snapshot<T>>,
    live: Arc<AtomicBool>,
}

impl<T> Watch<T> {
    pub async fn next(&mut self) -> Option<Snapshot<T>> {
        if !self.live.load(Ordering::Acquire) {
            return None;
        }
        let item = self.receiver.next().await;
        if !self.live.load(Ordering::Acquire) {
            return None;
        }
        item
    }

    pub fn dispose(&mut self) {
        self.live.store(false, Ordering::Release);
        self.receiver.close();
    }

    #[must_use]
    pub fn is_live(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }
}

#[cfg(test)]
impl<T> Watch<T> {
    /// A detached watch with pre-queued deliveries, for driving consumers
    /// without a store.
    pub(crate) fn with_queued(snapshots: Vec<Snapshot<T>>) -> Self {
        let (sender, receiver) = unbounded();
        for snapshot in snapshots {
            let _ = sender.unbounded_send(snapshot);
        }
        Self {
            receiver,
            live: Arc::new(AtomicBool::new(true)),
        }
    }
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to the workout collection of `user`. The full current
    /// snapshot is delivered immediately; every subsequent change delivers
    /// the full snapshot again.
    pub fn watch_workouts(
        &self,
        user: domain::UserID,
    ) -> Result<Watch<domain::WorkoutRecord>, domain::SubscribeError> {
        let mut state = self.lock();
        check_scope(&state, user)?;
        let records = workout_records(&state, user);
        Ok(register(&mut state.workout_watchers, user, records))
    }

    /// Subscribe to the exercise catalog of `user`.
    pub fn watch_exercises(
        &self,
        user: domain::UserID,
    ) -> Result<Watch<domain::ExerciseDefinition>, domain::SubscribeError> {
        let mut state = self.lock();
        check_scope(&state, user)?;
        let definitions = exercise_definitions(&state, user);
        Ok(register(&mut state.exercise_watchers, user, definitions))
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }
}

fn check_scope(state: &State, user: domain::UserID) -> Result<(), domain::SubscribeError> {
    match state.session {
        None => Err(domain::AuthError::NoSession.into()),
        Some(session) if session != user => Err(domain::StoreError::PermissionDenied.into()),
        Some(_) => Ok(()),
    }
}

fn session(state: &State) -> Result<domain::UserID, domain::AuthError> {
    state.session.ok_or(domain::AuthError::NoSession)
}

fn register<T: Clone>(
    watchers: &mut Vec<Watcher<T>>,
    user: domain::UserID,
    snapshot: Vec<T>,
) -> Watch<T> {
    let (sender, receiver) = unbounded();
    let live = Arc::new(AtomicBool::new(true));
    let _ = sender.unbounded_send(Ok(snapshot));
    watchers.push(Watcher {
        user,
        live: Arc::clone(&live),
        sender,
    });
    Watch { receiver, live }
}

fn notify<T: Clone>(watchers: &mut Vec<Watcher<T>>, user: domain::UserID, snapshot: &[T]) {
    watchers.retain(|watcher| {
        if watcher.user != user {
            return true;
        }
        if !watcher.live.load(Ordering::Acquire) {
            return false;
        }
        watcher.sender.unbounded_send(Ok(snapshot.to_vec())).is_ok()
    });
}

fn workout_records(state: &State, user: domain::UserID) -> Vec<domain::WorkoutRecord> {
    state
        .users
        .get(&user)
        .map(|data| {
            data.workouts
                .iter()
                .map(|(id, document)| document.clone().into_record((*id).into()))
                .collect()
        })
        .unwrap_or_default()
}

fn exercise_definitions(
    state: &State,
    user: domain::UserID,
) -> Vec<domain::ExerciseDefinition> {
    state
        .users
        .get(&user)
        .map(|data| {
            data.exercises
                .iter()
                .filter_map(|(id, document)| document.clone().into_definition((*id).into()).ok())
                .collect()
        })
        .unwrap_or_default()
}

impl domain::SessionRepository for MemoryStore {
    async fn sign_in(&self, custom_token: Option<&str>) -> Result<domain::UserID, domain::AuthError> {
        let user = match custom_token {
            Some(token) => domain::UserID::from(
                Uuid::parse_str(token)
                    .map_err(|err| domain::AuthError::Other(Box::new(err)))?,
            ),
            None => domain::UserID::from(Uuid::new_v4()),
        };
        let mut state = self.lock();
        state.session = Some(user);
        state.users.entry(user).or_default();
        debug!("signed in as {}", *user);
        Ok(user)
    }

    async fn current_user(&self) -> Option<domain::UserID> {
        self.lock().session
    }

    async fn sign_out(&self) -> Result<(), domain::AuthError> {
        self.lock().session = None;
        Ok(())
    }
}

impl domain::ExerciseRepository for MemoryStore {
    async fn read_exercises(&self) -> Result<Vec<domain::ExerciseDefinition>, domain::ReadError> {
        let state = self.lock();
        let user = session(&state)?;
        Ok(exercise_definitions(&state, user))
    }

    async fn create_exercise(
        &self,
        name: domain::Name,
        description: Option<String>,
    ) -> Result<domain::ExerciseDefinition, domain::CreateError> {
        let mut state = self.lock();
        let user = session(&state)?;
        let id = Uuid::new_v4();
        let document = ExerciseDocument {
            name: name.to_string(),
            description,
            created_at: Utc::now(),
        };
        state
            .users
            .entry(user)
            .or_default()
            .exercises
            .push((id, document.clone()));
        debug!("inserted {id} into {} of {}", Collection::Exercises, *user);
        let snapshot = exercise_definitions(&state, user);
        notify(&mut state.exercise_watchers, user, &snapshot);
        document
            .into_definition(id.into())
            .map_err(|err| domain::CreateError::Other(Box::new(err)))
    }

    async fn delete_exercise(
        &self,
        id: domain::ExerciseID,
    ) -> Result<domain::ExerciseID, domain::DeleteError> {
        let mut state = self.lock();
        let user = session(&state)?;
        if let Some(data) = state.users.get_mut(&user) {
            data.exercises.retain(|(exercise_id, _)| *exercise_id != *id);
        }
        debug!("removed {} from {} of {}", *id, Collection::Exercises, *user);
        let snapshot = exercise_definitions(&state, user);
        notify(&mut state.exercise_watchers, user, &snapshot);
        Ok(id)
    }
}

impl domain::WorkoutRepository for MemoryStore {
    async fn read_workouts(&self) -> Result<Vec<domain::WorkoutRecord>, domain::ReadError> {
        let state = self.lock();
        let user = session(&state)?;
        Ok(workout_records(&state, user))
    }

    async fn create_workout(
        &self,
        date: chrono::NaiveDate,
        exercises: Vec<domain::PerformedExercise>,
    ) -> Result<domain::WorkoutRecord, domain::CreateError> {
        let mut state = self.lock();
        let user = session(&state)?;
        let id = Uuid::new_v4();
        let document = WorkoutDocument::new(user, date, &exercises, Utc::now());
        state
            .users
            .entry(user)
            .or_default()
            .workouts
            .push((id, document.clone()));
        debug!("inserted {id} into {} of {}", Collection::Workouts, *user);
        let snapshot = workout_records(&state, user);
        notify(&mut state.workout_watchers, user, &snapshot);
        Ok(document.into_record(id.into()))
    }

    async fn delete_workout(
        &self,
        id: domain::WorkoutID,
    ) -> Result<domain::WorkoutID, domain::DeleteError> {
        let mut state = self.lock();
        let user = session(&state)?;
        if let Some(data) = state.users.get_mut(&user) {
            data.workouts.retain(|(workout_id, _)| *workout_id != *id);
        }
        debug!("removed {} from {} of {}", *id, Collection::Workouts, *user);
        let snapshot = workout_records(&state, user);
        notify(&mut state.workout_watchers, user, &snapshot);
        Ok(id)
    }
}

impl domain::ProfileRepository for MemoryStore {
    async fn read_profile(&self) -> Result<domain::UserProfile, domain::ReadError> {
        let state = self.lock();
        let user = session(&state)?;
        let document = state
            .users
            .get(&user)
            .map(|data| data.profile.clone())
            .unwrap_or_default();
        let username = document
            .username
            .map(|username| domain::Username::new(&username))
            .transpose()
            .map_err(|err| domain::ReadError::Other(Box::new(err)))?;
        Ok(domain::UserProfile { username })
    }

    async fn write_profile(
        &self,
        profile: domain::UserProfile,
    ) -> Result<domain::UserProfile, domain::UpdateError> {
        let mut state = self.lock();
        let user = session(&state)?;
        state.users.entry(user).or_default().profile = ProfileDocument {
            username: profile.username.as_ref().map(ToString::to_string),
        };
        debug!("replaced {} document of {}", Collection::Profile, *user);
        Ok(profile)
    }
}
