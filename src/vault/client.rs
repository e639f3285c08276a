//! HTTP client for the Vault/`OpenBao` logical API.

use std::{fs, path::PathBuf};

use async_trait::async_trait;
use reqwest::{Certificate, Client, Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::vault::{AuthData, ClientBuildError, Logical, VaultError, VaultToken};

const TOKEN_HEADER: &str = "X-Vault-Token";
const NAMESPACE_HEADER: &str = "X-Vault-Namespace";

/// Configuration for connecting to a Vault/`OpenBao` instance.
#[derive(Debug, Clone)]
pub struct VaultConfig {
    /// Server address, e.g. `"https://vault.example.com:8200"`.
    pub addr: String,

    /// Optional PEM file with the CA certificate(s) to trust.
    pub ca_cert: Option<PathBuf>,

    /// Vault/`OpenBao` authentication token.
    pub token: VaultToken,

    /// Optional enterprise namespace.
    pub namespace: Option<String>,
}

/// HTTP client for the logical (`/v1/...`) API.
#[derive(Debug, Clone)]
pub struct VaultClient {
    addr: String,
    token: VaultToken,
    namespace: Option<String>,
    http: Client,
}

impl VaultClient {
    /// Create a new client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the CA certificate cannot be loaded or the
    /// underlying HTTP client cannot be built.
    pub fn new(config: VaultConfig) -> Result<Self, ClientBuildError> {
        let mut builder = Client::builder();

        if let Some(path) = config.ca_cert {
            for certificate in load_ca_bundle(path)? {
                builder = builder.add_root_certificate(certificate);
            }
        }

        let http = builder.build().map_err(ClientBuildError::Build)?;

        Ok(Self {
            addr: config.addr.trim_end_matches('/').to_string(),
            token: config.token,
            namespace: config.namespace.filter(|namespace| !namespace.is_empty()),
            http,
        })
    }

    /// Server address without a trailing slash.
    #[must_use]
    pub fn addr(&self) -> &str {
        &self.addr
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/v1/{path}", self.addr);

        let builder = self
            .http
            .request(method, url)
            .header(TOKEN_HEADER, self.token.expose());

        match &self.namespace {
            Some(namespace) => builder.header(NAMESPACE_HEADER, namespace),
            None => builder,
        }
    }
}

#[async_trait]
impl Logical for VaultClient {
    async fn read(&self, path: &str) -> Result<AuthData, VaultError> {
        let response = self.request(Method::GET, path).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(VaultError::NotFound(path.to_string()));
        }

        let parsed: SecretResponse = ensure_success(path, response).await?.json().await?;

        Ok(parsed.data.unwrap_or_default())
    }

    async fn write(&self, path: &str, data: &AuthData) -> Result<(), VaultError> {
        let response = self.request(Method::PUT, path).json(data).send().await?;
        let response = ensure_success(path, response).await?;

        debug!(path, status = %response.status(), "write accepted");

        Ok(())
    }

    async fn list(&self, path: &str) -> Result<Vec<String>, VaultError> {
        let response = self
            .request(Method::GET, path)
            .query(&[("list", "true")])
            .send()
            .await?;

        // Vault answers 404 for a list with no entries.
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }

        let parsed: ListResponse = ensure_success(path, response).await?.json().await?;

        parsed
            .data
            .map(|data| data.keys)
            .unwrap_or_default()
            .into_iter()
            .map(|key| match key {
                Value::String(name) => Ok(name),
                other => Err(VaultError::InvalidResponse {
                    path: path.to_string(),
                    reason: format!("list key is not a string: {other}"),
                }),
            })
            .collect()
    }
}

fn load_ca_bundle(path: PathBuf) -> Result<Vec<Certificate>, ClientBuildError> {
    let pem = match fs::read(&path) {
        Ok(pem) => pem,
        Err(source) => return Err(ClientBuildError::ReadCaCert { path, source }),
    };

    let certificates = match Certificate::from_pem_bundle(&pem) {
        Ok(certificates) => certificates,
        Err(source) => return Err(ClientBuildError::InvalidCaCert { path, source }),
    };

    if certificates.is_empty() {
        return Err(ClientBuildError::EmptyCaCert { path });
    }

    Ok(certificates)
}

async fn ensure_success(path: &str, response: Response) -> Result<Response, VaultError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();

    Err(VaultError::UnexpectedResponse {
        path: path.to_string(),
        status,
        message: error_message(&text),
    })
}

/// Joins Vault's `{"errors": [...]}` envelope, falling back to the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .filter(|parsed| !parsed.errors.is_empty())
        .map_or_else(|| body.trim().to_string(), |parsed| parsed.errors.join("; "))
}

#[derive(Debug, Deserialize)]
struct SecretResponse {
    #[serde(default)]
    data: Option<AuthData>,
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    #[serde(default)]
    data: Option<ListData>,
}

#[derive(Debug, Deserialize)]
struct ListData {
    #[serde(default)]
    keys: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    errors: Vec<String>,
}
