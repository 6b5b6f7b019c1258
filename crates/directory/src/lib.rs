//! `tradelane-directory` — the user directory collaborator.
//!
//! Supplies role and industry identity for authorization decisions. The
//! directory itself (account storage, password handling, token issuance) is
//! outside this system; this crate owns the *port* the lifecycle consumes
//! plus an in-memory implementation for dev and tests.

pub mod actor;
pub mod directory;
pub mod roles;
pub mod token;

pub use actor::Actor;
pub use directory::{DirectoryError, InMemoryUserDirectory, UserDirectory};
pub use roles::Role;
pub use token::{StaticTokenValidator, TokenValidationError, TokenValidator};
