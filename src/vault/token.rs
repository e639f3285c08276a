//! Vault access token.

use std::fmt;

use zeroize::Zeroize;

/// A Vault/`OpenBao` access token.
///
/// The token never appears in `Debug` output and its bytes are wiped on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct VaultToken(String);

impl VaultToken {
    /// Wrap a raw token string.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The raw token, for the `X-Vault-Token` header.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for VaultToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("VaultToken(<redacted>)")
    }
}

impl Drop for VaultToken {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}
