//! Configuration management for the GO TO language server.
//!
//! Handles:
//! - Command-line argument parsing
//! - Optional TOML configuration files
//! - Merging both into the effective [`Config`]

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::report::OutputFormat;

/// Project-local configuration file name
pub const PROJECT_CONFIG_FILE: &str = ".goto-ls.toml";

/// Command-line arguments for `goto-ls`
#[derive(Debug, Parser)]
#[command(name = "goto-ls")]
#[command(about = "Checker and language server for GO TO branch statements")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Configuration file to use instead of the default lookup
    #[arg(long, global = true, help = "Path to a TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Log level
    #[arg(
        long,
        global = true,
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the language server on stdio (default)
    Serve,
    /// Check source files and print a report
    Check {
        /// Files to check
        #[arg(required = true)]
        files: Vec<PathBuf>,

        #[arg(long, value_enum, help = "Report format")]
        format: Option<OutputFormat>,

        #[arg(long, help = "Write the report to this file instead of stdout")]
        output: Option<PathBuf>,

        #[arg(long, help = "Leave comment lines out of the report")]
        no_comments: bool,
    },
}

/// Settings read from a TOML configuration file
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct FileConfig {
    pub format: Option<OutputFormat>,
    pub include_comments: Option<bool>,
    pub log_level: Option<String>,
}

impl FileConfig {
    /// Load a configuration file, failing if it cannot be read or parsed
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Find the configuration file to use: an explicit path, the project
    /// file in `cwd`, or `config.toml` in `user_dir`, in that order
    pub fn discover(
        explicit: Option<&Path>,
        cwd: &Path,
        user_dir: Option<&Path>,
    ) -> Result<Option<(PathBuf, Self)>> {
        if let Some(path) = explicit {
            return Ok(Some((path.to_path_buf(), Self::load(path)?)));
        }

        let mut candidates = vec![cwd.join(PROJECT_CONFIG_FILE)];
        if let Some(user_dir) = user_dir {
            candidates.push(user_dir.join("config.toml"));
        }

        for path in candidates {
            if path.is_file() {
                let file_config = Self::load(&path)?;
                return Ok(Some((path, file_config)));
            }
        }

        Ok(None)
    }
}

/// Per-user configuration directory, `<config_dir>/goto-ls`
pub fn user_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("goto-ls"))
}

/// What the binary should do
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Serve,
    Check {
        files: Vec<PathBuf>,
        output: Option<PathBuf>,
    },
}

/// Combined configuration from all sources
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub mode: Mode,
    pub format: OutputFormat,
    pub include_comments: bool,
    pub log_level: String,
    /// Configuration file that was loaded, if any
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: Mode::Serve,
            format: OutputFormat::Text,
            include_comments: true,
            log_level: "info".to_string(),
            config_path: None,
        }
    }
}

impl Config {
    /// Create configuration from command-line arguments and config files
    pub fn from_args_and_env() -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to determine current directory")?;
        Self::from_args(Args::parse(), &cwd, user_config_dir().as_deref())
    }

    /// Create configuration from explicit arguments and search locations
    /// (useful for testing)
    pub fn from_args(args: Args, cwd: &Path, user_dir: Option<&Path>) -> Result<Self> {
        let discovered = FileConfig::discover(args.config.as_deref(), cwd, user_dir)?;
        let (config_path, file_config) = match discovered {
            Some((path, file_config)) => (Some(path), file_config),
            None => (None, FileConfig::default()),
        };

        let defaults = Config::default();
        let mut config = Config {
            format: file_config.format.unwrap_or(defaults.format),
            include_comments: file_config.include_comments.unwrap_or(defaults.include_comments),
            log_level: args
                .log_level
                .or(file_config.log_level)
                .unwrap_or(defaults.log_level),
            config_path,
            ..defaults
        };

        match args.command {
            None | Some(Command::Serve) => config.mode = Mode::Serve,
            Some(Command::Check {
                files,
                format,
                output,
                no_comments,
            }) => {
                if let Some(format) = format {
                    config.format = format;
                }
                if no_comments {
                    config.include_comments = false;
                }
                config.mode = Mode::Check { files, output };
            }
        }

        Ok(config)
    }
}
