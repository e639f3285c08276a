//! Copying a Kubernetes auth mount between servers.
//!
//! The run is strictly sequential: config first, then each role in listing
//! order. The first failure aborts the run and nothing already written is
//! undone.

use tracing::{debug, info, warn};

use crate::vault::{Logical, MountPath};

mod errors;

pub use errors::CopyError;

/// Config key holding the reviewer JWT. It is never transferred.
pub const REVIEWER_JWT_FIELD: &str = "token_reviewer_jwt";

/// Outcome of a successful copy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyReport {
    /// Role names copied, in source listing order.
    pub roles: Vec<String>,
}

/// Copy the auth config and every role from `source_mount` on `source` to
/// `destination_mount` on `destination`.
///
/// The destination must already have the Kubernetes auth method enabled at
/// `destination_mount`.
///
/// # Errors
///
/// Returns the first failed read, list or write, identifying the operation.
pub async fn copy_auth(
    source: &dyn Logical,
    destination: &dyn Logical,
    source_mount: &MountPath,
    destination_mount: &MountPath,
) -> Result<CopyReport, CopyError> {
    let mut config = source
        .read(&source_mount.config_path())
        .await
        .map_err(CopyError::ReadConfig)?;

    info!(mount = %source_mount, "read k8s auth config from source");
    debug!(?config, "source k8s auth config");

    if config.remove(REVIEWER_JWT_FIELD).is_some() {
        debug!("dropped {REVIEWER_JWT_FIELD} from source config");
    }

    destination
        .write(&destination_mount.config_path(), &config)
        .await
        .map_err(CopyError::WriteConfig)?;

    info!(mount = %destination_mount, keys = config.len(), "wrote k8s auth config to destination");
    warn!("{REVIEWER_JWT_FIELD} is not copied; set it on the destination if the mount needs one");

    let roles = source
        .list(&source_mount.roles_path())
        .await
        .map_err(CopyError::ListRoles)?;

    info!(mount = %source_mount, count = roles.len(), "listed k8s auth roles on source");

    for role in &roles {
        let data = source
            .read(&source_mount.role_path(role))
            .await
            .map_err(|error| CopyError::ReadRole {
                role: role.clone(),
                source: error,
            })?;

        debug!(role, ?data, "source k8s auth role");

        destination
            .write(&destination_mount.role_path(role), &data)
            .await
            .map_err(|error| CopyError::WriteRole {
                role: role.clone(),
                source: error,
            })?;

        info!(role, mount = %destination_mount, "copied k8s auth role");
    }

    Ok(CopyReport { roles })
}
