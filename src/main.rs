use anyhow::Context;
use clap::Parser;
use empathy_import::utils::{logger, validation::Validate};
use empathy_import::{CliConfig, ImportEngine, JsonRegistry, NoCredentialStore};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting empathy-import");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let registry = JsonRegistry::open(&config.registry)
        .with_context(|| format!("opening account registry {}", config.registry.display()))?;
    let mut engine = ImportEngine::new(registry, NoCredentialStore);

    match engine.import(config.config.as_deref()) {
        Ok(report) => {
            if !config.dry_run {
                engine
                    .registry()
                    .save()
                    .with_context(|| format!("saving account registry {}", config.registry.display()))?;
            }

            if config.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("✅ {}", report.summary());
                for skipped in &report.skipped {
                    println!("   skipped {}: {}", skipped.group, skipped.reason);
                }
            }
        }
        Err(e) => {
            tracing::error!("Import failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
