//! # User model and its projections
//!
//! Three representations of a chatstream user:
//!
//! ## [`User`]
//!
//! The complete row from the `users` table. It derives [`sqlx::FromRow`] so it can
//! be loaded directly from queries:
//!
//! - `id` — primary key, a UUID v7 so identifiers sort by creation time.
//! - `username`, `email` — both unique across all users.
//! - `password_hash` — argon2id PHC string. Never serialised.
//! - `server_ids` — servers the user belongs to, in join order. Empty on registration.
//! - `created_at` — insert timestamp.
//!
//! ## [`Identity`]
//!
//! What an authenticated caller gets back about themselves: everything except the
//! password hash and timestamps. Serialised with `serverIds` in camel case.
//!
//! ## [`PublicUser`]
//!
//! The minimal projection (`id`, `username`) handed out for lookups of other users.
//! It never carries the email address.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Full user record from the database.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub server_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Build a freshly registered user with a new time-ordered id and no servers.
    pub fn new(username: String, email: String, password_hash: String) -> Self {
        Self {
            id: Uuid::now_v7(),
            username,
            email,
            password_hash,
            server_ids: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Project to the self-view returned to the owner of the account.
    pub fn to_identity(&self) -> Identity {
        Identity {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            server_ids: self.server_ids.clone(),
        }
    }

    /// Project to the view other users are allowed to see.
    pub fn to_public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            username: self.username.clone(),
        }
    }
}

/// Authenticated user information safe to send to its owner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub server_ids: Vec<Uuid>,
}

/// User information safe to send to anyone.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PublicUser {
    pub id: Uuid,
    pub username: String,
}
