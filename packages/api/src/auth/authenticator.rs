//! Credential verification against the user store.

use crate::db::UserStore;
use crate::error::CredentialError;
use crate::models::Identity;

use super::PasswordHasher;

/// Verifies (email, password) pairs.
///
/// An unknown email and a wrong password both fail with
/// [`CredentialError::InvalidCredentials`]; store failures surface unchanged as
/// [`CredentialError::StoreUnavailable`] and are never retried here.
pub struct Authenticator<'a, S> {
    store: &'a S,
    hasher: &'a PasswordHasher,
}

impl<'a, S: UserStore> Authenticator<'a, S> {
    pub fn new(store: &'a S, hasher: &'a PasswordHasher) -> Self {
        Self { store, hasher }
    }

    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Identity, CredentialError> {
        let Some(user) = self.store.find_by_email(email).await? else {
            self.hasher.verify_unknown(password);
            return Err(CredentialError::InvalidCredentials);
        };

        if !self.hasher.verify(password, &user.password_hash) {
            return Err(CredentialError::InvalidCredentials);
        }

        Ok(user.to_identity())
    }
}
