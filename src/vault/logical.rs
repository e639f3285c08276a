//! The logical read/write/list seam used by the copy routine.

use async_trait::async_trait;
use mockall::automock;

use crate::vault::{AuthData, VaultError};

/// Read, write and list operations against a server's logical API.
#[automock]
#[async_trait]
pub trait Logical: Send + Sync {
    /// Read the `data` object stored at `path`.
    async fn read(&self, path: &str) -> Result<AuthData, VaultError>;

    /// Write `data` to `path`, replacing what is there.
    async fn write(&self, path: &str, data: &AuthData) -> Result<(), VaultError>;

    /// List the keys under `path`. No entries is an empty list.
    async fn list(&self, path: &str) -> Result<Vec<String>, VaultError>;
}
