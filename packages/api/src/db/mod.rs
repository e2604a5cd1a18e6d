//! # Database module — the credential store
//!
//! Every user record is read and written through the [`UserStore`] trait so the
//! operations in [`crate::service`] work unchanged against PostgreSQL or process memory.
//!
//! ## Backends
//!
//! | Type | Backing | Uniqueness |
//! |------|---------|------------|
//! | [`PgUserStore`] | `users` table via SQLx | `users_email_key` / `users_username_key` constraints |
//! | [`MemoryUserStore`] | `HashMap` behind a `tokio` `RwLock` | checked under the write lock on insert |
//!
//! Both report a uniqueness violation on insert as [`StoreError::Conflict`](crate::error::StoreError::Conflict),
//! which is the last line of defence for two registrations racing past the
//! existence checks.
//!
//! ## Re-exports
//!
//! - [`connect`] — opens a `PgPool` from [`DatabaseSettings`](crate::config::DatabaseSettings)
//!   and runs the embedded migrations.

mod memory;
mod pool;
mod postgres;
mod store;

pub use memory::MemoryUserStore;
pub use pool::connect;
pub use postgres::PgUserStore;
pub use store::UserStore;

#[cfg(test)]
pub(crate) use store::DownStore;
