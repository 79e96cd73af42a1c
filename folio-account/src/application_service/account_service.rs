use crate::domain::user::{Role, User};
use folio_store::{KeyValueStore, StoreError};
use std::sync::Mutex;
use uuid::Uuid;

/// Storage key for the persisted user record.
const USER_KEY: &str = "account-user";

/// Login use case input. There is no backend; the password is accepted
/// and never verified.
#[derive(Debug)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

/// Signup use case input.
#[derive(Debug)]
pub struct SignupCommand {
    pub email: String,
    pub name: String,
    pub password: String,
}

/// Identity provider: holds the current acting user and mirrors it to
/// device storage so a restart restores the session.
pub struct AccountService<S> {
    store: S,
    current: Mutex<Option<User>>,
}

impl<S> AccountService<S>
where
    S: KeyValueStore,
{
    /// Restore the service from device storage. A previously persisted
    /// user becomes the current user again.
    pub fn load(store: S) -> Result<Self, AccountError> {
        let current = match store.get(USER_KEY).map_err(AccountError::Storage)? {
            Some(value) => Some(
                serde_json::from_value(value)
                    .map_err(|e| AccountError::Storage(StoreError::Serialization(e.to_string())))?,
            ),
            None => None,
        };

        Ok(Self {
            store,
            current: Mutex::new(current),
        })
    }

    /// Sign in with credentials, minting a fresh user record.
    pub fn login(&self, cmd: LoginCommand) -> Result<User, AccountError> {
        let _ = cmd.password;
        let user = User {
            id: Uuid::new_v4().to_string(),
            name: display_name(&cmd.email),
            email: cmd.email,
            role: Role::Admin,
        };
        self.replace_current(user)
    }

    /// Register a new user record and sign it in.
    pub fn signup(&self, cmd: SignupCommand) -> Result<User, AccountError> {
        let _ = cmd.password;
        let name = if cmd.name.trim().is_empty() {
            display_name(&cmd.email)
        } else {
            cmd.name
        };
        let user = User {
            id: Uuid::new_v4().to_string(),
            name,
            email: cmd.email,
            role: Role::Contributor,
        };
        self.replace_current(user)
    }

    /// Clear the current user and its persisted record.
    pub fn logout(&self) -> Result<(), AccountError> {
        self.store.remove(USER_KEY).map_err(AccountError::Storage)?;

        let mut guard = self
            .current
            .lock()
            .map_err(|e| AccountError::LockPoisoned(e.to_string()))?;
        *guard = None;

        tracing::info!("user signed out");
        Ok(())
    }

    pub fn current_user(&self) -> Result<Option<User>, AccountError> {
        let guard = self
            .current
            .lock()
            .map_err(|e| AccountError::LockPoisoned(e.to_string()))?;
        Ok(guard.clone())
    }

    /// Identifier of the acting user, if one is signed in.
    pub fn current_user_id(&self) -> Result<Option<String>, AccountError> {
        Ok(self.current_user()?.map(|u| u.id))
    }

    fn replace_current(&self, user: User) -> Result<User, AccountError> {
        let value = serde_json::to_value(&user)
            .map_err(|e| AccountError::Storage(StoreError::Serialization(e.to_string())))?;
        self.store
            .set(USER_KEY, &value)
            .map_err(AccountError::Storage)?;

        let mut guard = self
            .current
            .lock()
            .map_err(|e| AccountError::LockPoisoned(e.to_string()))?;
        *guard = Some(user.clone());

        tracing::info!(user_id = %user.id, email = %user.email, "user signed in");
        Ok(user)
    }
}

/// Display name derived from the local part of an email address.
fn display_name(email: &str) -> String {
    let local = email.split('@').next().unwrap_or("");
    if local.is_empty() {
        "User".to_string()
    } else {
        local.to_string()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("storage error: {0}")]
    Storage(StoreError),
    #[error("session lock poisoned: {0}")]
    LockPoisoned(String),
}
