use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One section of the source configuration file, representing one
/// source-system account. Keys are case-sensitive; a key repeated within
/// the same group is last-write-wins.
#[derive(Debug, Clone)]
pub struct ConfigGroup {
    pub name: String,
    entries: HashMap<String, String>,
}

impl ConfigGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: HashMap::new(),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The loaded configuration: groups in file order. Group order drives the
/// deterministic import order; a group header repeated later in the file
/// merges into the first occurrence.
#[derive(Debug, Clone, Default)]
pub struct ConfigGroups {
    groups: Vec<ConfigGroup>,
}

impl ConfigGroups {
    pub fn get_or_insert(&mut self, name: &str) -> usize {
        match self.groups.iter().position(|g| g.name == name) {
            Some(index) => index,
            None => {
                self.groups.push(ConfigGroup::new(name));
                self.groups.len() - 1
            }
        }
    }

    pub fn group_mut(&mut self, index: usize) -> &mut ConfigGroup {
        &mut self.groups[index]
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConfigGroup> {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// A coerced account field value on its way into the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Flag(bool),
    Int(i64),
    Text(String),
}

/// Opaque registry account id. Issued by the registry, meaningless outside
/// of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountHandle(u64);

impl AccountHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// One group's data after schema validation and coercion, ready for the
/// upsert step. Lives only for the duration of a single pipeline pass.
#[derive(Debug, Clone)]
pub struct NormalizedAccount {
    /// Target protocol id.
    pub protocol: &'static str,
    /// Canonical identity string used for the registry lookup.
    pub identity: String,
    /// Registry username field. Differs from the identity for protocols
    /// that address the registry by something other than the raw account.
    pub username: String,
    /// Target field name and coerced value, present only when the source
    /// supplied the key or the coercion rule carries a default.
    pub fields: Vec<(&'static str, FieldValue)>,
}

/// Outcome of one import run.
#[derive(Debug, Clone, Serialize)]
pub struct ImportReport {
    pub started_at: DateTime<Utc>,
    pub created: Vec<ImportedAccount>,
    pub existing: Vec<ImportedAccount>,
    pub skipped: Vec<SkippedGroup>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportedAccount {
    pub group: String,
    pub identity: String,
    pub protocol: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkippedGroup {
    pub group: String,
    pub reason: String,
}

impl ImportReport {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            created: Vec::new(),
            existing: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "{} account(s) imported, {} already present, {} group(s) skipped",
            self.created.len(),
            self.existing.len(),
            self.skipped.len()
        )
    }
}

impl Default for ImportReport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_key_is_last_write_wins() {
        let mut group = ConfigGroup::new("acct0");
        group.insert("param-account", "alice");
        group.insert("param-account", "bob");
        assert_eq!(group.get("param-account"), Some("bob"));
        assert_eq!(group.len(), 1);
    }

    #[test]
    fn repeated_group_header_merges_into_first_occurrence() {
        let mut groups = ConfigGroups::default();
        let first = groups.get_or_insert("acct0");
        groups.get_or_insert("acct1");
        let again = groups.get_or_insert("acct0");
        assert_eq!(first, again);
        assert_eq!(groups.len(), 2);
        let order: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(order, vec!["acct0", "acct1"]);
    }

    #[test]
    fn field_value_serializes_untagged() {
        let json = serde_json::to_string(&FieldValue::Int(6667)).unwrap();
        assert_eq!(json, "6667");
        let json = serde_json::to_string(&FieldValue::Flag(true)).unwrap();
        assert_eq!(json, "true");
        let back: FieldValue = serde_json::from_str("\"irc.example.com\"").unwrap();
        assert_eq!(back, FieldValue::Text("irc.example.com".to_string()));
    }
}
