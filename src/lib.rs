//! vault-k8s-auth-cp
//!
//! Copies a Kubernetes auth method's backend config and every role defined
//! under it from one Vault/`OpenBao` server to another.
//!
//! The destination must already have the Kubernetes auth method enabled at
//! the target mount. The reviewer JWT is never read from the source or
//! written to the destination.

pub mod cli;
pub mod config;
pub mod copy;
pub mod observability;
pub mod vault;

#[cfg(test)]
mod test;
