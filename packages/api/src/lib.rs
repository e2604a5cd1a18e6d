//! # API crate — identity core for chatstream
//!
//! Registration, password login, session binding, and user lookup, independent of
//! the HTTP framework that serves them.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`auth`] | Argon2id password hashing, credential verification, binding identities to sessions |
//! | [`config`] | Layered [`Settings`] from defaults, `chatstream.toml`, and `CHATSTREAM__*` env vars |
//! | [`db`] | The [`UserStore`](db::UserStore) trait with PostgreSQL and in-memory backends |
//! | [`error`] | Per-operation error kinds |
//! | [`models`] | `User` rows and their `Identity` / `PublicUser` projections |
//! | [`service`] | [`UserService`], one method per user-facing operation |

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod service;

pub use config::Settings;
pub use models::{Identity, PublicUser, User};
pub use service::UserService;
