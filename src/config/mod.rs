#[cfg(feature = "cli")]
pub mod cli;
pub mod keyfile;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
