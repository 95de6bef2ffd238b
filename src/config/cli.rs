use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "empathy-import")]
#[command(about = "Import Empathy/Telepathy accounts into a local account registry")]
pub struct CliConfig {
    /// Path to the mission-control accounts.cfg; defaults to the platform
    /// location under the user data directory
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// JSON account registry to import into
    #[arg(long, default_value = "./accounts.json")]
    pub registry: PathBuf,

    /// Run the import without writing the registry back to disk
    #[arg(long)]
    pub dry_run: bool,

    /// Print the import report as JSON instead of a summary line
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("registry", &self.registry.to_string_lossy())?;
        if let Some(config) = &self.config {
            validate_path("config", &config.to_string_lossy())?;
        }
        Ok(())
    }
}
