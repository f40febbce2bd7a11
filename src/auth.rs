//! Credential secrets and the identity values Clef hands back to the host.

pub mod identity;
pub mod secret;

pub use identity::*;
pub use secret::*;
