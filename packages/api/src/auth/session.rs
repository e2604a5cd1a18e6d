//! Binding an authenticated identity to a session.
//!
//! A [`Session`] is the per-connection state the session layer loads from the
//! request cookie. Callers hand it in explicitly; nothing here reads ambient state.

use tower_sessions::session::{Error, Id};
use tower_sessions::Session;
use uuid::Uuid;

use crate::models::Identity;

/// Key for storing user ID in session.
pub const SESSION_USER_ID_KEY: &str = "user_id";

/// Proof that an identity is bound to a session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionHandle {
    pub session_id: Option<Id>,
    pub user_id: Uuid,
}

pub struct SessionIssuer;

impl SessionIssuer {
    /// Bind `identity` to `session`, replacing whatever was bound before.
    ///
    /// The session id is cycled first so a pre-login id never carries an
    /// authenticated binding, then the record is saved to the store.
    pub async fn issue(session: &Session, identity: &Identity) -> Result<SessionHandle, Error> {
        session.cycle_id().await?;
        session.insert(SESSION_USER_ID_KEY, identity.id).await?;
        session.save().await?;
        Ok(SessionHandle {
            session_id: session.id(),
            user_id: identity.id,
        })
    }

    /// The user id bound to `session`, if any.
    pub async fn resolve(session: &Session) -> Result<Option<Uuid>, Error> {
        session.get(SESSION_USER_ID_KEY).await
    }

    /// Drop the binding and delete the session record.
    pub async fn revoke(session: &Session) -> Result<(), Error> {
        session.flush().await
    }
}
