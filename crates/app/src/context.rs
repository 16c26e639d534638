use log::info;
use setlog_domain::{AuthError, Service, SessionRepository, SessionService as _, UserID};

use crate::Config;

/// The session context constructed once at startup and passed by reference
/// to every flow that needs store or identity access. There is no ambient
/// global lookup.
pub struct AppContext<R> {
    service: Service<R>,
    user: UserID,
}

impl<R: SessionRepository> AppContext<R> {
    /// Resolve the identity and wrap the repository. Signs in with the
    /// configured custom token, or anonymously without one.
    pub async fn initialize(repository: R, config: &Config) -> Result<Self, AuthError> {
        let service = Service::new(repository);
        let user = service.sign_in(config.auth_token.as_deref()).await?;
        info!("session established for {}", *user);
        Ok(Self { service, user })
    }
}

impl<R> AppContext<R> {
    pub fn service(&self) -> &Service<R> {
        &self.service
    }

    #[must_use]
    pub fn user(&self) -> UserID {
        self.user
    }
}

#[cfg(test)]
mod tests {
    use futures_executor::block_on;
    use pretty_assertions::assert_eq;
    use setlog_domain::SessionRepository as _;
    use setlog_storage::MemoryStore;

    use super::*;

    fn config(auth_token: Option<&str>) -> Config {
        Config {
            api_key: "key".to_string(),
            namespace: "test".to_string(),
            auth_token: auth_token.map(String::from),
        }
    }

    #[test]
    fn test_initialize_anonymous() {
        let store = MemoryStore::new();
        let context = block_on(AppContext::initialize(store.clone(), &config(None))).unwrap();
        assert_eq!(block_on(store.current_user()), Some(context.user()));
    }

    #[test]
    fn test_initialize_with_custom_token() {
        let store = MemoryStore::new();
        let context = block_on(AppContext::initialize(
            store,
            &config(Some("00000000-0000-0000-0000-000000000001")),
        ))
        .unwrap();
        assert_eq!(context.user(), 1.into());
    }

    #[test]
    fn test_initialize_with_invalid_token() {
        let store = MemoryStore::new();
        assert!(matches!(
            block_on(AppContext::initialize(store, &config(Some("not a token")))),
            Err(AuthError::Other(_))
        ));
    }
}
