//! Identity derivation and registry lookup.

use crate::core::schema::{IdentityRule, ProtocolSchema, UsernameRule};
use crate::domain::model::{AccountHandle, ConfigGroup};
use crate::domain::ports::AccountRegistry;
use crate::utils::error::{ImportError, Result};

/// Canonical identity plus the registry username derived from one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountIdentity {
    pub identity: String,
    pub username: String,
}

/// Build the canonical identity for a group per the protocol's rule. The
/// constituent keys are always part of the schema's required set, so a
/// miss here surfaces as the same error the required-key check raises.
pub fn derive_identity(schema: &ProtocolSchema, group: &ConfigGroup) -> Result<AccountIdentity> {
    let account = require(group, "param-account")?;

    let identity = match schema.identity {
        IdentityRule::AccountAtServer => {
            let server = require(group, "param-server")?;
            format!("{account}@{server}")
        }
        IdentityRule::Account => account.to_string(),
    };

    let username = match schema.username {
        UsernameRule::Identity => identity.clone(),
        UsernameRule::RawAccount => account.to_string(),
    };

    Ok(AccountIdentity { identity, username })
}

/// Exact-match existence check against the registry. Pure query.
pub fn find_existing<R: AccountRegistry>(
    registry: &R,
    identity: &str,
    protocol_id: &str,
) -> Option<AccountHandle> {
    registry.find_account(identity, protocol_id)
}

fn require<'a>(group: &'a ConfigGroup, key: &str) -> Result<&'a str> {
    group
        .get(key)
        .ok_or_else(|| ImportError::MissingRequiredFieldError {
            group: group.name.clone(),
            field: key.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::registry::MemoryRegistry;
    use crate::core::schema::ProtocolMapper;

    #[test]
    fn irc_identity_joins_account_and_server() {
        let schema = ProtocolMapper::new().resolve("irc").unwrap();
        let mut group = ConfigGroup::new("acct0");
        group.insert("param-account", "alice");
        group.insert("param-server", "irc.example.com");

        let id = derive_identity(schema, &group).unwrap();
        assert_eq!(id.identity, "alice@irc.example.com");
        assert_eq!(id.username, "alice@irc.example.com");
    }

    #[test]
    fn groupwise_identity_is_the_raw_account() {
        let schema = ProtocolMapper::new().resolve("groupwise").unwrap();
        let mut group = ConfigGroup::new("acct0");
        group.insert("param-account", "bob");
        group.insert("param-server", "gw.example.com");

        let id = derive_identity(schema, &group).unwrap();
        assert_eq!(id.identity, "bob");
        assert_eq!(id.username, "bob");
    }

    #[test]
    fn missing_server_fails_identity_derivation() {
        let schema = ProtocolMapper::new().resolve("irc").unwrap();
        let mut group = ConfigGroup::new("acct0");
        group.insert("param-account", "alice");

        let err = derive_identity(schema, &group).unwrap_err();
        assert!(matches!(
            err,
            ImportError::MissingRequiredFieldError { ref field, .. } if field == "param-server"
        ));
    }

    #[test]
    fn lookup_matches_on_identity_and_protocol() {
        let mut registry = MemoryRegistry::new();
        let handle = registry.create_account("alice@irc.example.com", "irc");

        assert_eq!(
            find_existing(&registry, "alice@irc.example.com", "irc"),
            Some(handle)
        );
        assert_eq!(find_existing(&registry, "alice@irc.example.com", "groupwise"), None);
        assert_eq!(find_existing(&registry, "bob", "irc"), None);
    }
}
