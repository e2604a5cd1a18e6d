//! Authentication: password hashing, credential verification, and session binding.

mod authenticator;
mod password;
mod session;

pub use authenticator::Authenticator;
pub use password::PasswordHasher;
pub use session::{SessionHandle, SessionIssuer, SESSION_USER_ID_KEY};

#[cfg(test)]
pub(crate) use password::test_hasher;
