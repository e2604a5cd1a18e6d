//! HTTP surface for the chatstream identity service.
//!
//! | Route | Handler |
//! |-------|---------|
//! | `POST /register` | [`handlers::register`] |
//! | `POST /login` | [`handlers::login`] |
//! | `POST /logout` | [`handlers::logout`] |
//! | `GET /authentication` | [`handlers::get_authentication`] |
//! | `GET /user/{id}` | [`handlers::get_user`] |
//! | `GET /users?ids=a,b` | [`handlers::get_users`] |
//! | `GET /health` | [`handlers::health`] |

mod application;
pub mod error;
pub mod handlers;

pub use application::{app, launch, AppState};
