pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::credentials::{MemoryCredentialStore, NoCredentialStore};
pub use crate::adapters::registry::{JsonRegistry, MemoryRegistry, StoredAccount};
pub use crate::core::import::ImportEngine;
pub use crate::domain::model::{
    AccountHandle, ConfigGroup, ConfigGroups, FieldValue, ImportReport, NormalizedAccount,
};
pub use crate::domain::ports::{AccountRegistry, CredentialStore};
pub use crate::utils::error::{ImportError, Result};
