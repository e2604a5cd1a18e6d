//! # User-facing operations
//!
//! [`UserService`] orchestrates the store, the password hasher, and the session
//! issuer for every endpoint the server exposes:
//!
//! | Operation | Result |
//! |-----------|--------|
//! | [`register`](UserService::register) | new [`Identity`], or `InvalidInput` / `DuplicateEmail` / `DuplicateUsername` |
//! | [`login`](UserService::login) | [`Identity`] bound to the session, or `InvalidCredentials` |
//! | [`current_identity`](UserService::current_identity) | the [`Identity`] bound to the session |
//! | [`logout`](UserService::logout) | clears the session binding |
//! | [`user_by_id`](UserService::user_by_id) | `Some(PublicUser)` or `None` |
//! | [`users_by_ids`](UserService::users_by_ids) | every resolvable [`PublicUser`], unknown ids dropped |
//!
//! Registration checks email then username before inserting. The checks and the
//! insert are not atomic, so the store's uniqueness constraints are what finally
//! decide; a conflict reported at insert time maps to the same duplicate kinds.

use tower_sessions::Session;
use uuid::Uuid;

use crate::auth::{Authenticator, PasswordHasher, SessionIssuer};
use crate::db::UserStore;
use crate::error::{CredentialError, IdentityError, RegistrationError, StoreError};
use crate::models::{Identity, PublicUser, User};

pub struct UserService<S> {
    store: S,
    hasher: PasswordHasher,
}

impl<S: UserStore> UserService<S> {
    pub fn new(store: S, hasher: PasswordHasher) -> Self {
        Self { store, hasher }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Create an account. Does not log the new user in.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Identity, RegistrationError> {
        let username = username.trim();
        let email = normalize_email(email);

        if username.is_empty() {
            return Err(RegistrationError::InvalidInput("username is required"));
        }
        if email.is_empty() || !email.contains('@') {
            return Err(RegistrationError::InvalidInput("invalid email address"));
        }
        if password.is_empty() {
            return Err(RegistrationError::InvalidInput("password is required"));
        }

        if self.store.find_by_email(&email).await?.is_some() {
            return Err(RegistrationError::DuplicateEmail);
        }
        if self.store.find_by_username(username).await?.is_some() {
            return Err(RegistrationError::DuplicateUsername);
        }

        let password_hash = self.hasher.hash(password)?;
        let user = User::new(username.to_string(), email, password_hash);
        self.store.insert(&user).await?;

        tracing::info!(user_id = %user.id, "Registered user {}", user.username);
        Ok(user.to_identity())
    }

    /// Verify credentials and bind the identity to `session`.
    ///
    /// No session is issued when the credentials are rejected.
    pub async fn login(
        &self,
        session: &Session,
        email: &str,
        password: &str,
    ) -> Result<Identity, CredentialError> {
        let email = normalize_email(email);
        let identity = match Authenticator::new(&self.store, &self.hasher)
            .authenticate(&email, password)
            .await
        {
            Ok(identity) => identity,
            Err(CredentialError::InvalidCredentials) => {
                tracing::info!("Rejected login attempt");
                return Err(CredentialError::InvalidCredentials);
            }
            Err(other) => return Err(CredentialError::Internal(other.to_string())),
        };

        let handle = SessionIssuer::issue(session, &identity).await?;
        tracing::debug!(
            user_id = %handle.user_id,
            session_bound = handle.session_id.is_some(),
            "Session issued"
        );
        tracing::info!(user_id = %identity.id, "User logged in");
        Ok(identity)
    }

    /// The identity bound to `session`, reloaded from the store.
    pub async fn current_identity(&self, session: &Session) -> Result<Identity, IdentityError> {
        let Some(user_id) = SessionIssuer::resolve(session).await? else {
            return Err(IdentityError::NotAuthenticated);
        };
        match self.store.find_by_id(user_id).await? {
            Some(user) => Ok(user.to_identity()),
            None => {
                tracing::warn!(%user_id, "Session bound to a user that no longer exists");
                Err(IdentityError::NotAuthenticated)
            }
        }
    }

    /// Clear the identity bound to `session`.
    pub async fn logout(&self, session: &Session) -> Result<(), IdentityError> {
        SessionIssuer::revoke(session).await?;
        Ok(())
    }

    pub async fn user_by_id(&self, id: Uuid) -> Result<Option<PublicUser>, StoreError> {
        Ok(self.store.find_by_id(id).await?.map(|u| u.to_public()))
    }

    /// Best-effort batch lookup. Ids with no user are silently omitted.
    pub async fn users_by_ids(&self, ids: &[Uuid]) -> Result<Vec<PublicUser>, StoreError> {
        let users = self.store.find_all_by_id(ids).await?;
        Ok(users.iter().map(User::to_public).collect())
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
