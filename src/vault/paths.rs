//! Auth mount paths and the logical paths derived from them.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Name of an auth method mount, e.g. `kubernetes` or `k8s/prod-cluster`.
///
/// Surrounding slashes are trimmed, so `kubernetes/` and `kubernetes` name
/// the same mount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountPath(String);

/// Errors from parsing a [`MountPath`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MountPathError {
    /// The mount path was empty after trimming slashes.
    #[error("mount path cannot be empty")]
    Empty,
}

impl MountPath {
    /// The trimmed mount name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `auth/<mount>/config`
    #[must_use]
    pub fn config_path(&self) -> String {
        format!("auth/{}/config", self.0)
    }

    /// `auth/<mount>/role`
    #[must_use]
    pub fn roles_path(&self) -> String {
        format!("auth/{}/role", self.0)
    }

    /// `auth/<mount>/role/<name>`
    #[must_use]
    pub fn role_path(&self, name: &str) -> String {
        format!("auth/{}/role/{name}", self.0)
    }
}

impl FromStr for MountPath {
    type Err = MountPathError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim().trim_matches('/');

        if trimmed.is_empty() {
            return Err(MountPathError::Empty);
        }

        Ok(Self(trimmed.to_string()))
    }
}

impl fmt::Display for MountPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
