//! Source and destination server settings.

use std::{fmt, path::PathBuf};

use clap::Args;
use thiserror::Error;

use crate::vault::{VaultConfig, VaultToken};

/// Which server a setting belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The server being copied from.
    Source,

    /// The server being copied to.
    Destination,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => f.write_str("source"),
            Self::Destination => f.write_str("destination"),
        }
    }
}

/// Errors from resolving server settings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required setting was absent or blank.
    #[error("missing {side} vault {setting}; set {env} or pass --{flag}")]
    Missing {
        /// Server the setting belongs to.
        side: Side,
        /// Human-readable setting name.
        setting: &'static str,
        /// Environment variable that supplies it.
        env: &'static str,
        /// Command-line flag that supplies it.
        flag: &'static str,
    },
}

/// Source server connection settings.
#[derive(Debug, Args)]
pub struct SourceVaultArgs {
    /// Source Vault/`OpenBao` address
    #[arg(long, env = "SOURCE_VAULT_ADDR")]
    pub source_addr: Option<String>,

    /// PEM CA certificate bundle trusted for the source server
    #[arg(long, env = "SOURCE_VAULT_CACERT")]
    pub source_ca_cert: Option<PathBuf>,

    /// Source Vault/`OpenBao` token
    #[arg(long, env = "SOURCE_VAULT_TOKEN", hide_env_values = true)]
    pub source_token: Option<String>,

    /// Source Vault namespace
    #[arg(long, env = "SOURCE_VAULT_NAMESPACE")]
    pub source_namespace: Option<String>,
}

/// Destination server connection settings.
#[derive(Debug, Args)]
pub struct DestinationVaultArgs {
    /// Destination Vault/`OpenBao` address
    #[arg(long, env = "DESTINATION_VAULT_ADDR")]
    pub destination_addr: Option<String>,

    /// PEM CA certificate bundle trusted for the destination server
    #[arg(long, env = "DESTINATION_VAULT_CACERT")]
    pub destination_ca_cert: Option<PathBuf>,

    /// Destination Vault/`OpenBao` token
    #[arg(long, env = "DESTINATION_VAULT_TOKEN", hide_env_values = true)]
    pub destination_token: Option<String>,

    /// Destination Vault namespace
    #[arg(long, env = "DESTINATION_VAULT_NAMESPACE")]
    pub destination_namespace: Option<String>,
}

impl SourceVaultArgs {
    /// Resolve into a client configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the address or token is missing.
    pub fn load(self) -> Result<VaultConfig, ConfigError> {
        Ok(VaultConfig {
            addr: required(
                self.source_addr,
                Side::Source,
                "address",
                "SOURCE_VAULT_ADDR",
                "source-addr",
            )?,
            ca_cert: non_empty_path(self.source_ca_cert),
            token: VaultToken::new(required(
                self.source_token,
                Side::Source,
                "token",
                "SOURCE_VAULT_TOKEN",
                "source-token",
            )?),
            namespace: non_blank(self.source_namespace),
        })
    }
}

impl DestinationVaultArgs {
    /// Resolve into a client configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the address or token is missing.
    pub fn load(self) -> Result<VaultConfig, ConfigError> {
        Ok(VaultConfig {
            addr: required(
                self.destination_addr,
                Side::Destination,
                "address",
                "DESTINATION_VAULT_ADDR",
                "destination-addr",
            )?,
            ca_cert: non_empty_path(self.destination_ca_cert),
            token: VaultToken::new(required(
                self.destination_token,
                Side::Destination,
                "token",
                "DESTINATION_VAULT_TOKEN",
                "destination-token",
            )?),
            namespace: non_blank(self.destination_namespace),
        })
    }
}

fn required(
    value: Option<String>,
    side: Side,
    setting: &'static str,
    env: &'static str,
    flag: &'static str,
) -> Result<String, ConfigError> {
    non_blank(value).ok_or(ConfigError::Missing {
        side,
        setting,
        env,
        flag,
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn non_empty_path(path: Option<PathBuf>) -> Option<PathBuf> {
    path.filter(|path| !path.as_os_str().is_empty())
}
