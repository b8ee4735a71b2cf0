pub mod account;
pub mod session;

pub use account::{AccountRepository, InMemoryAccountRepository};
pub use session::{InMemorySessionStore, SessionStore};
