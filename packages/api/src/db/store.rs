use std::future::Future;

use uuid::Uuid;

use crate::error::StoreError;
use crate::models::User;

/// Async persistence for user records.
pub trait UserStore: Send + Sync + 'static {
    fn find_by_id(&self, id: Uuid) -> impl Future<Output = Result<Option<User>, StoreError>> + Send;

    fn find_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Option<User>, StoreError>> + Send;

    fn find_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<User>, StoreError>> + Send;

    /// Every user whose id is in `ids`. Unknown ids are skipped and each user
    /// appears at most once. Result order is unspecified.
    fn find_all_by_id(
        &self,
        ids: &[Uuid],
    ) -> impl Future<Output = Result<Vec<User>, StoreError>> + Send;

    /// Persist a new user. Fails with [`StoreError::Conflict`] if the email or
    /// username is taken.
    fn insert(&self, user: &User) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// Store whose every call fails, for exercising error paths.
#[cfg(test)]
pub(crate) struct DownStore;

#[cfg(test)]
impl UserStore for DownStore {
    async fn find_by_id(&self, _id: Uuid) -> Result<Option<User>, StoreError> {
        Err(StoreError::Unavailable("down".into()))
    }
    async fn find_by_email(&self, _email: &str) -> Result<Option<User>, StoreError> {
        Err(StoreError::Unavailable("down".into()))
    }
    async fn find_by_username(&self, _username: &str) -> Result<Option<User>, StoreError> {
        Err(StoreError::Unavailable("down".into()))
    }
    async fn find_all_by_id(&self, _ids: &[Uuid]) -> Result<Vec<User>, StoreError> {
        Err(StoreError::Unavailable("down".into()))
    }
    async fn insert(&self, _user: &User) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("down".into()))
    }
}
