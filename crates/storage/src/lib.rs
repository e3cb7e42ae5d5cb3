#![forbid(unsafe_code)]

pub mod session_store;

pub use session_store::{InMemorySessionStore, SessionStore, StorageError};
