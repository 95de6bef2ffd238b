//! Table-driven protocol mapping. Each supported source protocol gets one
//! `ProtocolSchema` entry describing its target protocol id, required
//! keys, field coercions, and identity rule. Adding a protocol means
//! adding a table entry, not touching dispatch logic.

use crate::domain::model::{ConfigGroup, FieldValue};
use crate::domain::ports::CredentialStore;
use crate::utils::error::{ImportError, Result};

/// How a source value becomes a target field value.
#[derive(Debug, Clone, Copy)]
pub enum Coercion {
    /// Verbatim string, emitted only when the source key is present.
    Text,
    /// Integer parse; absent or non-numeric source values yield the
    /// default, so the field is always emitted.
    Int { default: i64 },
    /// Boolean by equality to the literal "true"; any other value or
    /// absence yields false, so the field is always emitted.
    Flag,
    /// Password: the credential store is consulted first, then the
    /// cleartext source value. Emitted only when one of them has it.
    Secret,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub source_key: &'static str,
    pub target_field: &'static str,
    pub coerce: Coercion,
}

/// How the canonical registry identity is built from group fields. Kept
/// as an explicit per-protocol variant: protocols do not share a single
/// `user@server` formula.
#[derive(Debug, Clone, Copy)]
pub enum IdentityRule {
    /// `<param-account>@<param-server>`
    AccountAtServer,
    /// `<param-account>` alone.
    Account,
}

/// What goes into the registry username field.
#[derive(Debug, Clone, Copy)]
pub enum UsernameRule {
    /// The derived identity string.
    Identity,
    /// The raw `param-account` value.
    RawAccount,
}

#[derive(Debug)]
pub struct ProtocolSchema {
    pub source_id: &'static str,
    pub target_id: &'static str,
    pub required: &'static [&'static str],
    pub fields: &'static [FieldRule],
    pub identity: IdentityRule,
    pub username: UsernameRule,
}

static PROTOCOLS: &[ProtocolSchema] = &[
    ProtocolSchema {
        source_id: "irc",
        target_id: "irc",
        required: &["param-account", "param-server"],
        fields: &[
            FieldRule {
                source_key: "Nickname",
                target_field: "alias",
                coerce: Coercion::Text,
            },
            FieldRule {
                source_key: "Enabled",
                target_field: "enabled",
                coerce: Coercion::Flag,
            },
            FieldRule {
                source_key: "param-charset",
                target_field: "encoding",
                coerce: Coercion::Text,
            },
            FieldRule {
                source_key: "param-port",
                target_field: "port",
                coerce: Coercion::Int { default: 0 },
            },
            FieldRule {
                source_key: "param-use-ssl",
                target_field: "ssl",
                coerce: Coercion::Flag,
            },
            FieldRule {
                source_key: "param-password",
                target_field: "password",
                coerce: Coercion::Secret,
            },
        ],
        identity: IdentityRule::AccountAtServer,
        username: UsernameRule::Identity,
    },
    ProtocolSchema {
        source_id: "groupwise",
        target_id: "groupwise",
        required: &["param-account"],
        fields: &[
            FieldRule {
                source_key: "param-password",
                target_field: "password",
                coerce: Coercion::Secret,
            },
            FieldRule {
                source_key: "param-server",
                target_field: "server",
                coerce: Coercion::Text,
            },
            FieldRule {
                source_key: "param-port",
                target_field: "port",
                coerce: Coercion::Int { default: 0 },
            },
        ],
        identity: IdentityRule::Account,
        username: UsernameRule::RawAccount,
    },
];

/// Registry of supported protocols.
#[derive(Debug, Clone, Copy)]
pub struct ProtocolMapper {
    table: &'static [ProtocolSchema],
}

impl ProtocolMapper {
    pub fn new() -> Self {
        Self { table: PROTOCOLS }
    }

    /// Look up the schema for a source protocol id. `None` means the
    /// protocol is unsupported and the group must be skipped.
    pub fn resolve(&self, protocol_id: &str) -> Option<&'static ProtocolSchema> {
        self.table.iter().find(|s| s.source_id == protocol_id)
    }

    pub fn supported_ids(&self) -> Vec<&'static str> {
        self.table.iter().map(|s| s.source_id).collect()
    }
}

impl Default for ProtocolMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl ProtocolSchema {
    /// Reject the group if any required key is absent.
    pub fn check_required(&self, group: &ConfigGroup) -> Result<()> {
        for key in self.required {
            if group.get(key).is_none() {
                return Err(ImportError::MissingRequiredFieldError {
                    group: group.name.clone(),
                    field: (*key).to_string(),
                });
            }
        }
        Ok(())
    }

    /// Apply the field rules to one group. The group name doubles as the
    /// source identity for credential lookups.
    pub fn map_fields<C: CredentialStore>(
        &self,
        group: &ConfigGroup,
        credentials: &C,
    ) -> Vec<(&'static str, FieldValue)> {
        let mut fields = Vec::new();
        for rule in self.fields {
            let value = match rule.coerce {
                Coercion::Text => group
                    .get(rule.source_key)
                    .map(|v| FieldValue::Text(v.to_string())),
                Coercion::Int { default } => Some(FieldValue::Int(
                    group
                        .get(rule.source_key)
                        .and_then(|v| v.parse().ok())
                        .unwrap_or(default),
                )),
                Coercion::Flag => Some(FieldValue::Flag(
                    group.get(rule.source_key).is_some_and(|v| v == "true"),
                )),
                Coercion::Secret => credentials
                    .lookup_password(&group.name)
                    .or_else(|| group.get(rule.source_key).map(str::to_string))
                    .map(FieldValue::Text),
            };
            if let Some(value) = value {
                fields.push((rule.target_field, value));
            }
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::credentials::{MemoryCredentialStore, NoCredentialStore};

    fn field<'a>(
        fields: &'a [(&'static str, FieldValue)],
        name: &str,
    ) -> Option<&'a FieldValue> {
        fields.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    #[test]
    fn resolves_known_protocols() {
        let mapper = ProtocolMapper::new();
        assert_eq!(mapper.resolve("irc").unwrap().target_id, "irc");
        assert_eq!(mapper.resolve("groupwise").unwrap().target_id, "groupwise");
        assert!(mapper.resolve("jabber").is_none());
        assert_eq!(mapper.supported_ids(), vec!["irc", "groupwise"]);
    }

    #[test]
    fn check_required_reports_first_missing_key() {
        let schema = ProtocolMapper::new().resolve("irc").unwrap();
        let mut group = ConfigGroup::new("acct0");
        group.insert("param-server", "irc.example.com");
        let err = schema.check_required(&group).unwrap_err();
        assert!(matches!(
            err,
            ImportError::MissingRequiredFieldError { ref field, .. } if field == "param-account"
        ));
    }

    #[test]
    fn port_parses_or_defaults_to_zero() {
        let schema = ProtocolMapper::new().resolve("irc").unwrap();

        let mut group = ConfigGroup::new("acct0");
        group.insert("param-port", "6667");
        let fields = schema.map_fields(&group, &NoCredentialStore);
        assert_eq!(field(&fields, "port"), Some(&FieldValue::Int(6667)));

        let mut group = ConfigGroup::new("acct0");
        group.insert("param-port", "not-a-number");
        let fields = schema.map_fields(&group, &NoCredentialStore);
        assert_eq!(field(&fields, "port"), Some(&FieldValue::Int(0)));

        let group = ConfigGroup::new("acct0");
        let fields = schema.map_fields(&group, &NoCredentialStore);
        assert_eq!(field(&fields, "port"), Some(&FieldValue::Int(0)));
    }

    #[test]
    fn flags_require_the_literal_true() {
        let schema = ProtocolMapper::new().resolve("irc").unwrap();

        let mut group = ConfigGroup::new("acct0");
        group.insert("Enabled", "true");
        group.insert("param-use-ssl", "TRUE");
        let fields = schema.map_fields(&group, &NoCredentialStore);
        assert_eq!(field(&fields, "enabled"), Some(&FieldValue::Flag(true)));
        assert_eq!(field(&fields, "ssl"), Some(&FieldValue::Flag(false)));

        let group = ConfigGroup::new("acct0");
        let fields = schema.map_fields(&group, &NoCredentialStore);
        assert_eq!(field(&fields, "enabled"), Some(&FieldValue::Flag(false)));
    }

    #[test]
    fn text_fields_are_omitted_when_absent() {
        let schema = ProtocolMapper::new().resolve("irc").unwrap();
        let group = ConfigGroup::new("acct0");
        let fields = schema.map_fields(&group, &NoCredentialStore);
        assert!(field(&fields, "alias").is_none());
        assert!(field(&fields, "encoding").is_none());
        assert!(field(&fields, "password").is_none());
    }

    #[test]
    fn credential_store_wins_over_cleartext_password() {
        let schema = ProtocolMapper::new().resolve("irc").unwrap();
        let mut group = ConfigGroup::new("acct0");
        group.insert("param-password", "cleartext");

        let mut store = MemoryCredentialStore::new();
        store.insert("acct0", "from-keyring");
        let fields = schema.map_fields(&group, &store);
        assert_eq!(
            field(&fields, "password"),
            Some(&FieldValue::Text("from-keyring".to_string()))
        );

        let fields = schema.map_fields(&group, &NoCredentialStore);
        assert_eq!(
            field(&fields, "password"),
            Some(&FieldValue::Text("cleartext".to_string()))
        );
    }
}
