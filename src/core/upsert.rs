//! Create-or-skip against the account registry.

use crate::core::resolver;
use crate::domain::model::{AccountHandle, FieldValue, NormalizedAccount};
use crate::domain::ports::AccountRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// A new account was created and populated.
    Created(AccountHandle),
    /// The registry already held this (identity, protocol) pair. The
    /// existing account is returned untouched: first-import wins.
    Existing(AccountHandle),
}

/// Create the account unless it already exists. On creation, the username
/// and each present normalized field are applied individually; fields the
/// source did not supply keep the registry's defaults.
pub fn upsert<R: AccountRegistry>(
    registry: &mut R,
    account: &NormalizedAccount,
) -> UpsertOutcome {
    if let Some(handle) = resolver::find_existing(registry, &account.identity, account.protocol) {
        return UpsertOutcome::Existing(handle);
    }

    let handle = registry.create_account(&account.identity, account.protocol);
    registry.set_field(handle, "username", FieldValue::Text(account.username.clone()));
    for (name, value) in &account.fields {
        registry.set_field(handle, name, value.clone());
    }
    UpsertOutcome::Created(handle)
}
