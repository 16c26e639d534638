use derive_more::Deref;
use uuid::Uuid;

use crate::AuthError;

/// Identity resolution against the external provider.
///
/// `sign_in` accepts a custom token and falls back to an anonymous identity
/// when no token is given. Store operations attempted without a resolved
/// session fail with [`AuthError::NoSession`].
#[allow(async_fn_in_trait)]
pub trait SessionService {
    async fn sign_in(&self, custom_token: Option<&str>) -> Result<UserID, AuthError>;
    async fn current_user(&self) -> Option<UserID>;
    async fn sign_out(&self) -> Result<(), AuthError>;
}

#[allow(async_fn_in_trait)]
pub trait SessionRepository {
    async fn sign_in(&self, custom_token: Option<&str>) -> Result<UserID, AuthError>;
    async fn current_user(&self) -> Option<UserID>;
    async fn sign_out(&self) -> Result<(), AuthError>;
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct UserID(Uuid);

impl UserID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for UserID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for UserID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}
