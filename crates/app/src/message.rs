//! User-facing notifications derived from domain errors.
//!
//! Validation problems become warnings the user can act on, everything else
//! becomes an error message. The raw error text never reaches the user.

use std::collections::VecDeque;

use setlog_domain::{
    AuthError, CreateError, DeleteError, ReadError, StoreError, SubscribeError, UpdateError,
    ValidationError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub kind: MessageKind,
    pub text: String,
}

impl Message {
    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Warning,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Error,
            text: text.into(),
        }
    }

    /// Shown when an exercise is added to a draft that already contains it.
    #[must_use]
    pub fn duplicate_exercise(name: &str) -> Self {
        Self::warning(format!("{name} has already been added to this workout."))
    }
}

impl From<&ValidationError> for Message {
    fn from(err: &ValidationError) -> Self {
        match err {
            ValidationError::EmptyWorkout => {
                Self::warning("Add at least one exercise before saving.")
            }
            ValidationError::Conflict(field) => {
                Self::warning(format!("This {field} already exists."))
            }
            ValidationError::Other(_) => Self::warning(err.to_string()),
        }
    }
}

impl From<&AuthError> for Message {
    fn from(_: &AuthError) -> Self {
        Self::error("Waiting for sign-in. Please wait a moment or refresh the page.")
    }
}

impl From<&StoreError> for Message {
    fn from(err: &StoreError) -> Self {
        match err {
            StoreError::NoConnection => {
                Self::error("No connection to the server. Please try again.")
            }
            StoreError::PermissionDenied => Self::error("You are not allowed to do that."),
            StoreError::Other(_) => Self::error("Something went wrong. Please try again."),
        }
    }
}

impl From<&CreateError> for Message {
    fn from(err: &CreateError) -> Self {
        match err {
            CreateError::Validation(err) => err.into(),
            CreateError::Store(err) => err.into(),
            CreateError::Auth(err) => err.into(),
            CreateError::Other(_) => Self::error("Something went wrong. Please try again."),
        }
    }
}

impl From<&ReadError> for Message {
    fn from(err: &ReadError) -> Self {
        match err {
            ReadError::Store(err) => err.into(),
            ReadError::Auth(err) => err.into(),
            ReadError::Other(_) => Self::error("Something went wrong. Please try again."),
        }
    }
}

impl From<&UpdateError> for Message {
    fn from(err: &UpdateError) -> Self {
        match err {
            UpdateError::Validation(err) => err.into(),
            UpdateError::Store(err) => err.into(),
            UpdateError::Auth(err) => err.into(),
            UpdateError::Other(_) => Self::error("Something went wrong. Please try again."),
        }
    }
}

impl From<&DeleteError> for Message {
    fn from(err: &DeleteError) -> Self {
        match err {
            DeleteError::Store(err) => err.into(),
            DeleteError::Auth(err) => err.into(),
            DeleteError::Other(_) => Self::error("Something went wrong. Please try again."),
        }
    }
}

impl From<&SubscribeError> for Message {
    fn from(err: &SubscribeError) -> Self {
        match err {
            SubscribeError::Store(err) => err.into(),
            SubscribeError::Auth(err) => err.into(),
            SubscribeError::Other(_) => Self::error("Something went wrong. Please try again."),
        }
    }
}

/// Bounded queue of pending notifications. When full, the oldest message is
/// dropped to make room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageQueue {
    messages: VecDeque<Message>,
    capacity: usize,
}

impl MessageQueue {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            messages: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, message: Message) {
        if self.messages.len() == self.capacity {
            self.messages.pop_front();
        }
        self.messages.push_back(message);
    }

    /// Remove a message after the user dismissed it. Out-of-range indices
    /// are ignored.
    pub fn dismiss(&mut self, index: usize) {
        if index < self.messages.len() {
            self.messages.remove(index);
        }
    }

    #[must_use]
    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for MessageQueue {
    fn default() -> Self {
        Self::new(8)
    }
}
