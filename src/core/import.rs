//! The import orchestrator: load the config, walk groups in file order,
//! route each through schema mapping, identity resolution, and upsert.
//! One bad group never blocks the rest of the file; only a config load
//! failure aborts the run.

use crate::config::keyfile;
use crate::core::schema::ProtocolMapper;
use crate::core::{resolver, upsert};
use crate::domain::model::{
    ConfigGroup, ImportReport, ImportedAccount, NormalizedAccount, SkippedGroup,
};
use crate::domain::ports::{AccountRegistry, CredentialStore};
use crate::utils::error::{ImportError, Result};
use std::path::Path;

enum GroupOutcome {
    Created(ImportedAccount),
    Existing(ImportedAccount),
}

pub struct ImportEngine<R: AccountRegistry, C: CredentialStore> {
    registry: R,
    credentials: C,
    mapper: ProtocolMapper,
}

impl<R: AccountRegistry, C: CredentialStore> ImportEngine<R, C> {
    pub fn new(registry: R, credentials: C) -> Self {
        Self {
            registry,
            credentials,
            mapper: ProtocolMapper::new(),
        }
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn into_registry(self) -> R {
        self.registry
    }

    /// Run one import pass. Without an explicit path the platform default
    /// location is used. Safe to call any number of times: accounts
    /// already present in the registry are skipped, never overwritten.
    pub fn import(&mut self, path: Option<&Path>) -> Result<ImportReport> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => keyfile::default_path()?,
        };
        let groups = keyfile::load(&path)?;
        tracing::info!("Found {} account group(s)", groups.len());

        let mut report = ImportReport::new();
        for group in groups.iter() {
            match self.import_group(group) {
                Ok(GroupOutcome::Created(account)) => {
                    tracing::info!(
                        "Imported {} account {}",
                        account.protocol,
                        account.identity
                    );
                    report.created.push(account);
                }
                Ok(GroupOutcome::Existing(account)) => {
                    tracing::warn!(
                        "Skip existing {} account {}",
                        account.protocol,
                        account.identity
                    );
                    report.existing.push(account);
                }
                Err(err) if err.is_group_local() => {
                    tracing::warn!("{err}");
                    if let ImportError::UnsupportedProtocolError { .. } = err {
                        tracing::warn!(
                            "Supported protocols: {}",
                            self.mapper.supported_ids().join(", ")
                        );
                    }
                    report.skipped.push(SkippedGroup {
                        group: group.name.clone(),
                        reason: err.to_string(),
                    });
                }
                Err(err) => return Err(err),
            }
        }

        tracing::info!("Import finished: {}", report.summary());
        Ok(report)
    }

    fn import_group(&mut self, group: &ConfigGroup) -> Result<GroupOutcome> {
        let protocol = group
            .get("protocol")
            .ok_or_else(|| ImportError::MissingProtocolError {
                group: group.name.clone(),
            })?;
        let schema =
            self.mapper
                .resolve(protocol)
                .ok_or_else(|| ImportError::UnsupportedProtocolError {
                    group: group.name.clone(),
                    protocol: protocol.to_string(),
                })?;

        schema.check_required(group)?;
        let id = resolver::derive_identity(schema, group)?;
        let fields = schema.map_fields(group, &self.credentials);

        let account = NormalizedAccount {
            protocol: schema.target_id,
            identity: id.identity,
            username: id.username,
            fields,
        };
        let imported = ImportedAccount {
            group: group.name.clone(),
            identity: account.identity.clone(),
            protocol: account.protocol.to_string(),
        };

        match upsert::upsert(&mut self.registry, &account) {
            upsert::UpsertOutcome::Created(_) => Ok(GroupOutcome::Created(imported)),
            upsert::UpsertOutcome::Existing(_) => Ok(GroupOutcome::Existing(imported)),
        }
    }
}
