//! Command handlers.

pub mod config;
pub mod extract;
pub mod images;
pub mod questions;
pub mod scan;
pub mod survey;
pub mod taxonomy;
pub mod users;

use clap::ValueEnum;
use serde::Serialize;
use std::io::Write;

use lensmark_core::catalog::User;
use lensmark_core::{Catalog, Config, OutputWriter};

/// Supported output formats.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    /// Single JSON object or array
    Json,
    /// One JSON object per line (newline-delimited)
    Jsonl,
}

impl From<OutputFormat> for lensmark_core::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => Self::Json,
            OutputFormat::Jsonl => Self::JsonLines,
        }
    }
}

/// Loaded config and catalog plus the acting user, for catalog commands.
pub struct Session {
    pub config: Config,
    pub catalog: Catalog,
    as_user: Option<String>,
}

impl Session {
    pub fn open(config: Config, as_user: Option<String>) -> anyhow::Result<Self> {
        let catalog = Catalog::open(&config.catalog_path())?;
        Ok(Self {
            config,
            catalog,
            as_user,
        })
    }

    /// The user named by `--as`.
    pub fn user(&self) -> anyhow::Result<&User> {
        let Some(name) = self.as_user.as_deref() else {
            anyhow::bail!("This command needs a user: pass --as <USERNAME> or set LENSMARK_USER");
        };
        Ok(self.catalog.user_by_name(name)?)
    }

    /// Fail unless the `--as` user is an admin.
    pub fn require_admin(&self) -> anyhow::Result<()> {
        let user = self.user()?;
        self.catalog.require_admin(&user.username)?;
        Ok(())
    }

    /// The catalog, for changes only an admin may make.
    pub fn admin_catalog(&mut self) -> anyhow::Result<&mut Catalog> {
        self.require_admin()?;
        Ok(&mut self.catalog)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        self.catalog.save()?;
        Ok(())
    }

    /// Print one record to stdout using the `[output]` settings.
    pub fn print<T: Serialize>(&self, item: &T) -> anyhow::Result<()> {
        let stdout = std::io::stdout();
        let mut writer = OutputWriter::from_config(stdout.lock(), &self.config.output);
        writer.write(item)?;
        writer.flush()?;
        Ok(())
    }

    /// Print a list of records to stdout using the `[output]` settings.
    pub fn print_all<T: Serialize>(&self, items: &[T]) -> anyhow::Result<()> {
        let stdout = std::io::stdout();
        let mut writer = OutputWriter::from_config(stdout.lock(), &self.config.output);
        writer.write_all(items)?;
        writer.flush()?;
        Ok(())
    }
}

/// Ask for confirmation on stderr unless `yes` was given.
pub fn confirm(prompt: &str, yes: bool) -> anyhow::Result<bool> {
    if yes {
        return Ok(true);
    }
    eprint!("{} [y/N] ", prompt);
    std::io::stderr().flush()?;
    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
