use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use thiserror::Error;
use tower_sessions::Session;

use crate::models::oauth::UserProfile;

const PENDING_STATE_KEY: &str = "oauth_state";
const LOGGED_IN_KEY: &str = "logged_in";
const USER_KEY: &str = "user";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("session store error: {0}")]
    Backend(String),
}

/// Durable client-side state for the login flow: the single-slot pending
/// OAuth state token, the logged-in flag, and the cached user profile.
///
/// At most one unconsumed state token exists per store; setting the slot
/// overwrites whatever attempt was pending before.
#[async_trait]
pub trait AuthStore {
    async fn pending_state(&self) -> Result<Option<String>, StoreError>;
    async fn set_pending_state(&self, state: String) -> Result<(), StoreError>;
    async fn clear_pending_state(&self) -> Result<(), StoreError>;
    async fn is_signed_in(&self) -> Result<bool, StoreError>;
    async fn signed_in_user(&self) -> Result<Option<UserProfile>, StoreError>;
    async fn record_sign_in(&self, user: UserProfile) -> Result<(), StoreError>;
}

fn backend(err: impl std::fmt::Display) -> StoreError {
    StoreError::Backend(err.to_string())
}

/// `AuthStore` backed by a tower-sessions cookie session.
#[derive(Clone)]
pub struct SessionAuthStore {
    session: Session,
}

impl SessionAuthStore {
    pub fn new(session: Session) -> Self {
        Self { session }
    }
}

#[async_trait]
impl AuthStore for SessionAuthStore {
    async fn pending_state(&self) -> Result<Option<String>, StoreError> {
        self.session
            .get::<String>(PENDING_STATE_KEY)
            .await
            .map_err(backend)
    }

    async fn set_pending_state(&self, state: String) -> Result<(), StoreError> {
        self.session
            .insert(PENDING_STATE_KEY, state)
            .await
            .map_err(backend)?;
        // The redirect leaves before the response-side save would run, so
        // the session must be persisted here.
        self.session.save().await.map_err(backend)
    }

    async fn clear_pending_state(&self) -> Result<(), StoreError> {
        self.session
            .remove::<String>(PENDING_STATE_KEY)
            .await
            .map_err(backend)?;
        Ok(())
    }

    async fn is_signed_in(&self) -> Result<bool, StoreError> {
        Ok(self
            .session
            .get::<bool>(LOGGED_IN_KEY)
            .await
            .map_err(backend)?
            .unwrap_or(false))
    }

    async fn signed_in_user(&self) -> Result<Option<UserProfile>, StoreError> {
        self.session
            .get::<UserProfile>(USER_KEY)
            .await
            .map_err(backend)
    }

    async fn record_sign_in(&self, user: UserProfile) -> Result<(), StoreError> {
        self.session
            .insert(LOGGED_IN_KEY, true)
            .await
            .map_err(backend)?;
        self.session.insert(USER_KEY, user).await.map_err(backend)
    }
}

/// In-process `AuthStore` for embedding outside a web server and for tests.
#[derive(Debug, Default)]
pub struct MemoryAuthStore {
    inner: Mutex<MemoryAuthState>,
}

#[derive(Debug, Default)]
struct MemoryAuthState {
    pending_state: Option<String>,
    logged_in: bool,
    user: Option<UserProfile>,
}

impl MemoryAuthStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn locked(&self) -> Result<MutexGuard<'_, MemoryAuthState>, StoreError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Backend("auth store mutex poisoned".to_string()))
    }
}

#[async_trait]
impl AuthStore for MemoryAuthStore {
    async fn pending_state(&self) -> Result<Option<String>, StoreError> {
        Ok(self.locked()?.pending_state.clone())
    }

    async fn set_pending_state(&self, state: String) -> Result<(), StoreError> {
        self.locked()?.pending_state = Some(state);
        Ok(())
    }

    async fn clear_pending_state(&self) -> Result<(), StoreError> {
        self.locked()?.pending_state = None;
        Ok(())
    }

    async fn is_signed_in(&self) -> Result<bool, StoreError> {
        Ok(self.locked()?.logged_in)
    }

    async fn signed_in_user(&self) -> Result<Option<UserProfile>, StoreError> {
        Ok(self.locked()?.user.clone())
    }

    async fn record_sign_in(&self, user: UserProfile) -> Result<(), StoreError> {
        let mut state = self.locked()?;
        state.logged_in = true;
        state.user = Some(user);
        Ok(())
    }
}
