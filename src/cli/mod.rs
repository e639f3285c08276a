//! Command-line entry point.

use std::error::Error as StdError;

use clap::Parser;
use thiserror::Error;
use tracing::info;

use crate::{
    config::{ConfigError, DestinationVaultArgs, LoggingConfig, Side, SourceVaultArgs},
    copy::{CopyError, CopyReport, copy_auth},
    vault::{ClientBuildError, MountPath, MountPathError, VaultClient},
};

/// Printed to stdout when the tool is not given exactly two mount paths.
pub const USAGE: &str =
    "usage: vault-k8s-auth-cp <source-k8s-auth-mount-path> <destination-k8s-auth-mount-path>\n";

/// Copy Kubernetes auth config and roles between Vault/`OpenBao` servers
#[derive(Debug, Parser)]
#[command(name = "vault-k8s-auth-cp", version, long_about = None)]
pub struct Cli {
    /// Source and destination Kubernetes auth mount paths
    #[arg(value_name = "MOUNT_PATH")]
    pub mounts: Vec<String>,

    /// Source server settings.
    #[command(flatten)]
    pub source: SourceVaultArgs,

    /// Destination server settings.
    #[command(flatten)]
    pub destination: DestinationVaultArgs,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}

/// Errors that end a run with exit status 1.
#[derive(Debug, Error)]
pub enum RunError {
    /// A mount path argument was unusable.
    #[error("invalid {side} mount path `{raw}`")]
    Mount {
        /// Which argument.
        side: Side,
        /// The argument as given.
        raw: String,
        /// Why it was rejected.
        #[source]
        source: MountPathError,
    },

    /// Connection settings were incomplete.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The source client could not be built.
    #[error("error creating source vault client")]
    SourceClient(#[source] ClientBuildError),

    /// The destination client could not be built.
    #[error("error creating destination vault client")]
    DestinationClient(#[source] ClientBuildError),

    /// A read, list or write failed.
    #[error(transparent)]
    Copy(#[from] CopyError),
}

impl Cli {
    /// Load `.env` if present, then parse arguments and environment.
    ///
    /// # Errors
    ///
    /// Returns an error if arguments cannot be parsed, or for `--help` and
    /// `--version`.
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// The `(source, destination)` mount arguments, if exactly two were given.
    #[must_use]
    pub fn mount_pair(&self) -> Option<(&str, &str)> {
        match self.mounts.as_slice() {
            [source, destination] => Some((source, destination)),
            _ => None,
        }
    }

    /// Build both clients and copy the auth mount.
    ///
    /// Returns `Ok(None)` without touching either server when the mount
    /// arguments are not exactly two.
    ///
    /// # Errors
    ///
    /// Returns the first configuration, client or copy failure.
    pub async fn run(self) -> Result<Option<CopyReport>, RunError> {
        let Some((source_mount, destination_mount)) = self.mount_pair() else {
            return Ok(None);
        };

        let source_mount = parse_mount(Side::Source, source_mount)?;
        let destination_mount = parse_mount(Side::Destination, destination_mount)?;

        let source = VaultClient::new(self.source.load()?).map_err(RunError::SourceClient)?;
        let destination = VaultClient::new(self.destination.load()?)
            .map_err(RunError::DestinationClient)?;

        info!(
            source = source.addr(),
            destination = destination.addr(),
            %source_mount,
            %destination_mount,
            "copying k8s auth mount"
        );

        let report = copy_auth(&source, &destination, &source_mount, &destination_mount).await?;

        info!(
            roles = report.roles.len(),
            "copied k8s auth config and {} roles",
            report.roles.len()
        );

        Ok(Some(report))
    }
}

fn parse_mount(side: Side, raw: &str) -> Result<MountPath, RunError> {
    raw.parse().map_err(|source| RunError::Mount {
        side,
        raw: raw.to_string(),
        source,
    })
}

/// Render an error and its causes on one line, joined by `": "`.
#[must_use]
pub fn render_error(error: &dyn StdError) -> String {
    let mut rendered = error.to_string();
    let mut source = error.source();

    while let Some(cause) = source {
        rendered.push_str(": ");
        rendered.push_str(&cause.to_string());
        source = cause.source();
    }

    rendered
}
