//! Client-credentials auth: redacted secrets, cached credentials, and the token manager.

pub mod credential;
pub mod manager;
pub mod secret;

pub use credential::*;
pub use manager::*;
pub use secret::*;
