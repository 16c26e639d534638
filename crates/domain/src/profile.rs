use derive_more::{AsRef, Display};

use crate::{ReadError, UpdateError};

#[allow(async_fn_in_trait)]
pub trait ProfileService {
    async fn get_profile(&self) -> Result<UserProfile, ReadError>;
    async fn set_username(&self, username: Username) -> Result<UserProfile, UpdateError>;
}

#[allow(async_fn_in_trait)]
pub trait ProfileRepository {
    async fn read_profile(&self) -> Result<UserProfile, ReadError>;
    async fn write_profile(&self, profile: UserProfile) -> Result<UserProfile, UpdateError>;
}

/// Per-user profile document. The username is chosen during onboarding but
/// can be replaced by re-submission; the profile is replaced wholesale.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub username: Option<Username>,
}

#[derive(AsRef, Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Username(String);

impl Username {
    pub fn new(username: &str) -> Result<Self, UsernameError> {
        let trimmed = username.trim();

        if trimmed.is_empty() {
            return Err(UsernameError::Empty);
        }

        let len = trimmed.len();

        if len > 20 {
            return Err(UsernameError::TooLong(len));
        }

        Ok(Username(trimmed.to_string()))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum UsernameError {
    #[error("Username must not be empty")]
    Empty,
    #[error("Username must be 20 characters or fewer ({0} > 20)")]
    TooLong(usize),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("alice", Ok(Username("alice".to_string())))]
    #[case("  bob  ", Ok(Username("bob".to_string())))]
    #[case("", Err(UsernameError::Empty))]
    #[case("AAAAAAAAAAAAAAAAAAAAA", Err(UsernameError::TooLong(21)))]
    fn test_username_new(#[case] username: &str, #[case] expected: Result<Username, UsernameError>) {
        assert_eq!(Username::new(username), expected);
    }
}
