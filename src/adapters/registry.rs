//! Concrete registry backends: an in-memory store and a JSON file store
//! built on top of it.

use crate::domain::model::{AccountHandle, FieldValue};
use crate::domain::ports::AccountRegistry;
use crate::utils::error::{ImportError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredAccount {
    pub identity: String,
    pub protocol: String,
    #[serde(default)]
    pub fields: BTreeMap<String, FieldValue>,
}

impl StoredAccount {
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }
}

/// In-memory account registry. Handles are indices into the account list,
/// so they stay valid for the registry's lifetime (accounts are never
/// removed).
#[derive(Debug, Clone, Default)]
pub struct MemoryRegistry {
    accounts: Vec<StoredAccount>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_accounts(accounts: Vec<StoredAccount>) -> Self {
        Self { accounts }
    }

    pub fn accounts(&self) -> &[StoredAccount] {
        &self.accounts
    }

    pub fn get(&self, handle: AccountHandle) -> Option<&StoredAccount> {
        self.accounts.get(handle.id() as usize)
    }
}

impl AccountRegistry for MemoryRegistry {
    fn find_account(&self, identity: &str, protocol_id: &str) -> Option<AccountHandle> {
        self.accounts
            .iter()
            .position(|a| a.identity == identity && a.protocol == protocol_id)
            .map(|index| AccountHandle::new(index as u64))
    }

    fn create_account(&mut self, identity: &str, protocol_id: &str) -> AccountHandle {
        let handle = AccountHandle::new(self.accounts.len() as u64);
        self.accounts.push(StoredAccount {
            identity: identity.to_string(),
            protocol: protocol_id.to_string(),
            fields: BTreeMap::new(),
        });
        handle
    }

    fn set_field(&mut self, handle: AccountHandle, name: &str, value: FieldValue) {
        if let Some(account) = self.accounts.get_mut(handle.id() as usize) {
            account.fields.insert(name.to_string(), value);
        }
    }
}

/// Account registry persisted as a JSON file. A missing file opens as an
/// empty registry; `save` writes the current state back.
#[derive(Debug)]
pub struct JsonRegistry {
    path: PathBuf,
    inner: MemoryRegistry,
}

impl JsonRegistry {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let inner = match fs::read_to_string(&path) {
            Ok(text) => MemoryRegistry::from_accounts(serde_json::from_str(&text)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => MemoryRegistry::new(),
            Err(err) => return Err(ImportError::IoError(err)),
        };
        Ok(Self { path, inner })
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let text = serde_json::to_string_pretty(self.inner.accounts())?;
        fs::write(&self.path, text)?;
        Ok(())
    }

    pub fn accounts(&self) -> &[StoredAccount] {
        self.inner.accounts()
    }

    pub fn get(&self, handle: AccountHandle) -> Option<&StoredAccount> {
        self.inner.get(handle)
    }
}

impl AccountRegistry for JsonRegistry {
    fn find_account(&self, identity: &str, protocol_id: &str) -> Option<AccountHandle> {
        self.inner.find_account(identity, protocol_id)
    }

    fn create_account(&mut self, identity: &str, protocol_id: &str) -> AccountHandle {
        self.inner.create_account(identity, protocol_id)
    }

    fn set_field(&mut self, handle: AccountHandle, name: &str, value: FieldValue) {
        self.inner.set_field(handle, name, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_matches_identity_and_protocol_exactly() {
        let mut registry = MemoryRegistry::new();
        registry.create_account("alice@irc.example.com", "irc");

        assert!(registry.find_account("alice@irc.example.com", "irc").is_some());
        assert!(registry.find_account("alice@irc.example.com", "groupwise").is_none());
        assert!(registry.find_account("alice", "irc").is_none());
    }

    #[test]
    fn set_field_overwrites_by_name() {
        let mut registry = MemoryRegistry::new();
        let handle = registry.create_account("bob", "groupwise");
        registry.set_field(handle, "port", FieldValue::Int(0));
        registry.set_field(handle, "port", FieldValue::Int(1677));

        let stored = registry.get(handle).unwrap();
        assert_eq!(stored.field("port"), Some(&FieldValue::Int(1677)));
        assert_eq!(stored.fields.len(), 1);
    }

    #[test]
    fn set_field_on_unknown_handle_is_a_no_op() {
        let mut registry = MemoryRegistry::new();
        registry.set_field(AccountHandle::new(7), "port", FieldValue::Int(1));
        assert!(registry.accounts().is_empty());
    }
}
