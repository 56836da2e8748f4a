use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::UserId;

/// Minimum password length accepted at sign-up.
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CredentialsError {
    #[error("email is required")]
    MissingEmail,

    #[error("password is required")]
    MissingPassword,

    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },
}

/// The identity of a signed-in session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    email: String,
}

impl User {
    #[must_use]
    pub fn new(id: UserId, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &UserId {
        &self.id
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }
}

/// An email/password pair that has passed the local form checks.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    email: String,
    password: String,
}

impl Credentials {
    /// Credentials for signing in: both fields must be non-empty.
    ///
    /// # Errors
    ///
    /// Returns `CredentialsError::MissingEmail` or `MissingPassword`.
    pub fn for_sign_in(
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, CredentialsError> {
        let email = normalize_email(email.into());
        let password = password.into();
        if email.is_empty() {
            return Err(CredentialsError::MissingEmail);
        }
        if password.is_empty() {
            return Err(CredentialsError::MissingPassword);
        }
        Ok(Self { email, password })
    }

    /// Credentials for signing up: additionally enforces [`MIN_PASSWORD_LEN`].
    ///
    /// # Errors
    ///
    /// Returns `CredentialsError::PasswordTooShort` if the password has fewer
    /// than [`MIN_PASSWORD_LEN`] characters.
    pub fn for_sign_up(
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, CredentialsError> {
        let password = password.into();
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(CredentialsError::PasswordTooShort {
                min: MIN_PASSWORD_LEN,
            });
        }
        Self::for_sign_in(email, password)
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Emails are matched case-insensitively and without surrounding whitespace.
#[must_use]
pub fn normalize_email(raw: impl AsRef<str>) -> String {
    raw.as_ref().trim().to_lowercase()
}
