use crate::domain::model::{AccountHandle, FieldValue};

/// The target account store the import writes into. External to this
/// crate; the engine only ever references accounts through handles.
pub trait AccountRegistry: Send + Sync {
    /// Exact-match lookup by (identity, protocol id). Pure query.
    fn find_account(&self, identity: &str, protocol_id: &str) -> Option<AccountHandle>;

    /// Create a new account entry and return its handle.
    fn create_account(&mut self, identity: &str, protocol_id: &str) -> AccountHandle;

    /// Set one field on an existing account.
    fn set_field(&mut self, handle: AccountHandle, name: &str, value: FieldValue);
}

/// Platform secret store consulted for account passwords before falling
/// back to cleartext config values.
pub trait CredentialStore: Send + Sync {
    fn lookup_password(&self, source_identity: &str) -> Option<String>;
}
