//! Command-line and environment configuration

mod logging;
mod vault;

pub use logging::{LogFormat, LoggingConfig};
pub use vault::{ConfigError, DestinationVaultArgs, Side, SourceVaultArgs};
