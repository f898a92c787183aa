//! Init command

use std::path::{Path, PathBuf};

use clap::Args;
use tracing::info;

use relnote_core::config::{
    default_config_toml, DEFAULT_CONFIG_TEMPLATE, DEFAULT_CONFIG_TOML, DEFAULT_CONFIG_YAML,
};

use crate::cli::{output, Cli};

/// Write a default relnote configuration
#[derive(Debug, Args)]
pub struct InitCommand {
    /// Force overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,

    /// Write TOML instead of YAML
    #[arg(long)]
    pub toml: bool,

    /// Output file path
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl InitCommand {
    /// Path the configuration is written to, relative to `dir` unless overridden
    pub fn target_path(&self, dir: &Path) -> PathBuf {
        match &self.output {
            Some(path) => path.clone(),
            None if self.toml => dir.join(DEFAULT_CONFIG_TOML),
            None => dir.join(DEFAULT_CONFIG_YAML),
        }
    }

    /// Render the default configuration in the requested syntax
    pub fn render(&self) -> anyhow::Result<String> {
        if self.toml {
            Ok(default_config_toml()?)
        } else {
            Ok(DEFAULT_CONFIG_TEMPLATE.to_string())
        }
    }

    /// Write the configuration into `dir`, returning the path written
    pub fn write_into(&self, dir: &Path) -> anyhow::Result<PathBuf> {
        let path = self.target_path(dir);
        if path.exists() && !self.force {
            anyhow::bail!(
                "Configuration file already exists at {}. Use --force to overwrite.",
                path.display()
            );
        }
        std::fs::write(&path, self.render()?)?;
        Ok(path)
    }

    /// Execute the init command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(force = self.force, toml = self.toml, "executing init command");
        let cwd = std::env::current_dir()?;
        let path = self.write_into(&cwd)?;

        if !cli.quiet {
            output::success(&format!(
                "Created configuration at {}",
                output::path_style().apply_to(path.display())
            ));
            println!();
            println!("Next steps:");
            println!("  1. Edit {} to set your message groups and issue tracker", path.display());
            println!("  2. Run `relnote generate -r <release> -f <tag>` to write release notes");
        }

        Ok(())
    }
}
