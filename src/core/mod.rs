pub mod import;
pub mod resolver;
pub mod schema;
pub mod upsert;

pub use crate::domain::model::{ConfigGroup, ConfigGroups, FieldValue, NormalizedAccount};
pub use crate::domain::ports::{AccountRegistry, CredentialStore};
pub use crate::utils::error::Result;
pub use import::ImportEngine;
pub use schema::{Coercion, FieldRule, IdentityRule, ProtocolMapper, ProtocolSchema, UsernameRule};
pub use upsert::UpsertOutcome;
