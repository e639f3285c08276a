//! Vault/`OpenBao` API access

mod client;
mod errors;
mod logical;
mod paths;
mod token;

pub use client::{VaultClient, VaultConfig};
pub use errors::*;
pub use logical::{Logical, MockLogical};
pub use paths::{MountPath, MountPathError};
pub use token::VaultToken;

/// A JSON object as stored at a logical path.
pub type AuthData = serde_json::Map<String, serde_json::Value>;
