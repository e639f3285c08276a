//! Copy errors.

use thiserror::Error;

use crate::vault::VaultError;

/// The operation that aborted a copy run.
#[derive(Debug, Error)]
pub enum CopyError {
    /// Reading `auth/<source>/config` failed.
    #[error("error reading k8s auth config from source vault")]
    ReadConfig(#[source] VaultError),

    /// Writing `auth/<destination>/config` failed.
    #[error("error writing k8s auth config to destination vault")]
    WriteConfig(#[source] VaultError),

    /// Listing `auth/<source>/role` failed.
    #[error("error listing the k8s auth roles from source vault")]
    ListRoles(#[source] VaultError),

    /// Reading a single source role failed.
    #[error("error reading k8s auth role `{role}` from source vault")]
    ReadRole {
        /// Role name.
        role: String,
        /// Underlying client error.
        #[source]
        source: VaultError,
    },

    /// Writing a single destination role failed.
    #[error("error writing k8s auth role `{role}` to destination vault")]
    WriteRole {
        /// Role name.
        role: String,
        /// Underlying client error.
        #[source]
        source: VaultError,
    },
}
