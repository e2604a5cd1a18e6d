//! Error kinds returned by the credential store and the user-facing operations.
//!
//! Each operation returns its own enum so callers can match exhaustively on what
//! that operation can actually produce. Mapping kinds to HTTP statuses happens once,
//! in the server crate.

use thiserror::Error;

/// Constraint name for the unique email index on `users`.
pub const EMAIL_CONSTRAINT: &str = "users_email_key";
/// Constraint name for the unique username index on `users`.
pub const USERNAME_CONSTRAINT: &str = "users_username_key";

/// A user column that must be unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    Email,
    Username,
}

impl std::fmt::Display for UniqueField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UniqueField::Email => f.write_str("email"),
            UniqueField::Username => f.write_str("username"),
        }
    }
}

/// Failure inside a [`UserStore`](crate::db::UserStore).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0} is already taken")]
    Conflict(UniqueField),

    #[error("database error: {0}")]
    Database(sqlx::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                match db_err.constraint() {
                    Some(EMAIL_CONSTRAINT) => return StoreError::Conflict(UniqueField::Email),
                    Some(USERNAME_CONSTRAINT) => {
                        return StoreError::Conflict(UniqueField::Username)
                    }
                    _ => {}
                }
            }
        }
        StoreError::Database(err)
    }
}

/// Password hashing failed. Verification never produces this.
#[derive(Debug, Error)]
#[error("failed to hash password: {0}")]
pub struct HashError(pub String);

/// Failure of [`UserService::register`](crate::service::UserService::register).
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    #[error("an account with this email already exists")]
    DuplicateEmail,

    #[error("an account with this username already exists")]
    DuplicateUsername,

    #[error(transparent)]
    StoreUnavailable(StoreError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for RegistrationError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(UniqueField::Email) => RegistrationError::DuplicateEmail,
            StoreError::Conflict(UniqueField::Username) => RegistrationError::DuplicateUsername,
            other => RegistrationError::StoreUnavailable(other),
        }
    }
}

impl From<HashError> for RegistrationError {
    fn from(err: HashError) -> Self {
        RegistrationError::Internal(err.to_string())
    }
}

/// Failure of authentication or login.
///
/// `InvalidCredentials` covers both an unknown email and a wrong password.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error(transparent)]
    StoreUnavailable(#[from] StoreError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<tower_sessions::session::Error> for CredentialError {
    fn from(err: tower_sessions::session::Error) -> Self {
        CredentialError::Internal(format!("session error: {err}"))
    }
}

/// Failure resolving the identity bound to the current session.
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("not authenticated")]
    NotAuthenticated,

    #[error(transparent)]
    StoreUnavailable(#[from] StoreError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<tower_sessions::session::Error> for IdentityError {
    fn from(err: tower_sessions::session::Error) -> Self {
        IdentityError::Internal(format!("session error: {err}"))
    }
}
