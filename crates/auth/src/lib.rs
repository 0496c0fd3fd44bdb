//! `pokeworld-auth` — accounts, credentials and sessions.
//!
//! This crate is intentionally decoupled from HTTP and storage: it owns the
//! account/session types and the validation rules, and reaches persistence
//! only through the store traits in [`store`].

pub mod account;
pub mod error;
pub mod password;
pub mod register;
pub mod session;
pub mod store;

pub use account::Account;
pub use error::AuthError;
pub use password::PasswordHash;
pub use register::register;
pub use session::{login, logout, SessionToken};
pub use store::{AccountStore, SessionStore};
