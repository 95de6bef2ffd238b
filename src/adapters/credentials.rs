//! Credential store backends. A platform keyring adapter would implement
//! the same port; the importer itself never reads a keyring.

use crate::domain::ports::CredentialStore;
use std::collections::HashMap;

/// No secret store available: passwords come from the cleartext config
/// value or not at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCredentialStore;

impl CredentialStore for NoCredentialStore {
    fn lookup_password(&self, _source_identity: &str) -> Option<String> {
        None
    }
}

/// Map-backed store, keyed by source account id.
#[derive(Debug, Clone, Default)]
pub struct MemoryCredentialStore {
    secrets: HashMap<String, String>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, source_identity: impl Into<String>, secret: impl Into<String>) {
        self.secrets.insert(source_identity.into(), secret.into());
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn lookup_password(&self, source_identity: &str) -> Option<String> {
        self.secrets.get(source_identity).cloned()
    }
}
