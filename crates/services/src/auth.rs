//! Authentication provider port and the bundled local implementation.

use std::sync::Arc;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    Error as HashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};
use async_trait::async_trait;
use tokio::sync::watch;
use tracing::{info, warn};

use lms_core::Clock;
use lms_core::model::{Credentials, User, UserId};
use storage::repository::{StorageError, UserRecord, UserRepository};

use crate::error::AuthError;

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Authentication state as broadcast to subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Session {
    #[default]
    SignedOut,
    SignedIn(User),
}

impl Session {
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        match self {
            Session::SignedOut => None,
            Session::SignedIn(user) => Some(user),
        }
    }
}

/// A live subscription to session changes.
///
/// The first call to [`SessionSubscription::next`] resolves immediately with
/// the current session; later calls wait for the next change. Dropping the
/// subscription unsubscribes.
pub struct SessionSubscription {
    rx: watch::Receiver<Session>,
    delivered_initial: bool,
}

impl SessionSubscription {
    #[must_use]
    pub fn new(rx: watch::Receiver<Session>) -> Self {
        Self {
            rx,
            delivered_initial: false,
        }
    }

    /// Wait for the next notification. `None` once the provider is gone.
    pub async fn next(&mut self) -> Option<Session> {
        if !self.delivered_initial {
            self.delivered_initial = true;
            return Some(self.rx.borrow_and_update().clone());
        }
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }
}

//
// ─── PORT ──────────────────────────────────────────────────────────────────────
//

/// Contract for the external authentication collaborator.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Verify credentials and start a session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for an unknown email or wrong
    /// password, or `AuthError::Storage` if the account store fails.
    async fn sign_in(&self, credentials: &Credentials) -> Result<User, AuthError>;

    /// Register a new account and start a session for it.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::EmailTaken` if the email is already registered.
    async fn sign_up(&self, credentials: &Credentials) -> Result<User, AuthError>;

    /// End the current session.
    ///
    /// # Errors
    ///
    /// Implementations backed by a remote service may fail; the local one never does.
    async fn sign_out(&self) -> Result<(), AuthError>;

    /// Subscribe to session changes.
    fn subscribe(&self) -> SessionSubscription;

    /// The signed-in user, if any.
    fn current_user(&self) -> Option<User>;
}

//
// ─── PASSWORD HASHING ──────────────────────────────────────────────────────────
//

/// Argon2id password hashing.
#[derive(Clone)]
pub struct PasswordHashing {
    engine: Argon2<'static>,
}

impl Default for PasswordHashing {
    fn default() -> Self {
        Self {
            engine: Argon2::new(Algorithm::Argon2id, Version::V0x13, Params::default()),
        }
    }
}

impl PasswordHashing {
    /// Minimum-cost parameters for tests and throwaway dev databases.
    #[must_use]
    pub fn low_cost() -> Self {
        let params = Params::new(
            Params::MIN_M_COST,
            Params::MIN_T_COST,
            Params::MIN_P_COST,
            None,
        )
        .unwrap_or_default();
        Self {
            engine: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        }
    }

    /// Hash `password` with a fresh random salt into a PHC string.
    ///
    /// # Errors
    ///
    /// Returns the underlying `password_hash` error if hashing fails.
    pub fn hash(&self, password: &str) -> Result<String, HashError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self.engine.hash_password(password.as_bytes(), &salt)?;
        Ok(hash.to_string())
    }

    /// Check `password` against a stored PHC string.
    ///
    /// # Errors
    ///
    /// Returns an error if `stored_hash` is malformed. A wrong password is `Ok(false)`.
    pub fn verify(&self, password: &str, stored_hash: &str) -> Result<bool, HashError> {
        let parsed = PasswordHash::new(stored_hash)?;
        match self.engine.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(HashError::Password) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

//
// ─── LOCAL PROVIDER ────────────────────────────────────────────────────────────
//

/// Auth provider that keeps accounts in a `UserRepository`.
///
/// Sessions are process-local: signing up or in broadcasts the user to all
/// subscribers, signing out broadcasts `Session::SignedOut`.
pub struct LocalAuthProvider {
    clock: Clock,
    users: Arc<dyn UserRepository>,
    hashing: PasswordHashing,
    session: watch::Sender<Session>,
}

impl LocalAuthProvider {
    #[must_use]
    pub fn new(clock: Clock, users: Arc<dyn UserRepository>) -> Self {
        let (session, _rx) = watch::channel(Session::SignedOut);
        Self {
            clock,
            users,
            hashing: PasswordHashing::default(),
            session,
        }
    }

    #[must_use]
    pub fn with_hashing(mut self, hashing: PasswordHashing) -> Self {
        self.hashing = hashing;
        self
    }

    fn start_session(&self, user: &User) {
        self.session.send_replace(Session::SignedIn(user.clone()));
    }
}

#[async_trait]
impl AuthProvider for LocalAuthProvider {
    async fn sign_in(&self, credentials: &Credentials) -> Result<User, AuthError> {
        let Some(record) = self.users.find_by_email(credentials.email()).await? else {
            return Err(AuthError::InvalidCredentials);
        };

        let matches = self
            .hashing
            .verify(credentials.password(), &record.password_hash)
            .map_err(|e| {
                warn!(user_id = %record.id, "stored password hash is unreadable");
                AuthError::Hashing(e.to_string())
            })?;
        if !matches {
            return Err(AuthError::InvalidCredentials);
        }

        let user = record.to_user();
        self.start_session(&user);
        info!(user_id = %user.id(), "signed in");
        Ok(user)
    }

    async fn sign_up(&self, credentials: &Credentials) -> Result<User, AuthError> {
        let password_hash = self
            .hashing
            .hash(credentials.password())
            .map_err(|e| AuthError::Hashing(e.to_string()))?;

        let record = UserRecord {
            id: UserId::generate(),
            email: credentials.email().to_owned(),
            password_hash,
            created_at: self.clock.now(),
        };
        self.users.insert_user(&record).await.map_err(|e| match e {
            StorageError::Conflict => AuthError::EmailTaken,
            other => AuthError::Storage(other),
        })?;

        let user = record.to_user();
        self.start_session(&user);
        info!(user_id = %user.id(), "account created");
        Ok(user)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let previous = self.session.send_replace(Session::SignedOut);
        if let Some(user) = previous.user() {
            info!(user_id = %user.id(), "signed out");
        }
        Ok(())
    }

    fn subscribe(&self) -> SessionSubscription {
        SessionSubscription::new(self.session.subscribe())
    }

    fn current_user(&self) -> Option<User> {
        self.session.borrow().user().cloned()
    }
}
