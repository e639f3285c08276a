//! Vault client errors.

use std::{io, path::PathBuf};

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur when talking to a Vault/`OpenBao` server.
#[derive(Debug, Error)]
pub enum VaultError {
    /// An HTTP transport or serialization error occurred.
    #[error("http request failed")]
    Http(#[from] reqwest::Error),

    /// Nothing is stored at the requested path.
    #[error("no data found at `{0}`")]
    NotFound(String),

    /// The server answered with a non-2xx status.
    #[error("request to `{path}` failed with status {status}: {message}")]
    UnexpectedResponse {
        /// Logical path of the request.
        path: String,
        /// Response status.
        status: StatusCode,
        /// Server-provided error text.
        message: String,
    },

    /// The server answered 2xx with a body of the wrong shape.
    #[error("invalid response from `{path}`: {reason}")]
    InvalidResponse {
        /// Logical path of the request.
        path: String,
        /// What was wrong with the body.
        reason: String,
    },
}

/// Errors from building a [`VaultClient`](super::VaultClient).
#[derive(Debug, Error)]
pub enum ClientBuildError {
    /// The CA certificate file could not be read.
    #[error("failed to read CA certificate `{}`", path.display())]
    ReadCaCert {
        /// Configured certificate path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The CA certificate file is not valid PEM.
    #[error("invalid CA certificate `{}`", path.display())]
    InvalidCaCert {
        /// Configured certificate path.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: reqwest::Error,
    },

    /// The CA certificate file parsed but held no certificates.
    #[error("no certificates found in CA file `{}`", path.display())]
    EmptyCaCert {
        /// Configured certificate path.
        path: PathBuf,
    },

    /// The HTTP client could not be constructed.
    #[error("failed to build http client")]
    Build(#[source] reqwest::Error),
}
