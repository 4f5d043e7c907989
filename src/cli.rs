//! CLI argument parsing.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_complete::Shell;
use serde::Serialize;

use crate::config::{BreakpointOverrides, ConfigOverrides, PanelOverrides};

/// Output format selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Hidden inputs as a JSON object
    #[default]
    Json,
    /// Hidden inputs as YAML
    Yaml,
    /// Stylesheet generated from custom-CSS fields
    Css,
}

/// One `--set name=value` assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
    pub name: String,
    pub value: String,
}

fn parse_assignment(s: &str) -> Result<Assignment, String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{s}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing field name in '{s}'"));
    }
    Ok(Assignment {
        name: name.to_string(),
        value: value.to_string(),
    })
}

/// Property-panel widgets for the terminal: edit a panel interactively or
/// fill one from the command line and print its form values.
#[derive(Parser, Debug, Serialize)]
#[command(name = "fieldkit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Load the panel schema from a TOML file (built-in demo panel otherwise)
    #[arg(short, long, value_name = "FILE")]
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Set a field value before output, e.g. --set border_radius=12px
    #[arg(short, long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
    #[serde(skip)]
    pub assignments: Vec<Assignment>,

    /// Launch the interactive panel editor
    #[arg(short, long)]
    #[serde(skip)]
    pub interactive: bool,

    /// Output file (stdout if not specified)
    #[arg(short, long, value_name = "FILE")]
    #[serde(skip)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    #[serde(skip)]
    pub format: OutputFormat,

    /// Element id custom CSS is scoped to
    #[arg(long, value_name = "ID")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selector_id: Option<String>,

    /// Panel title
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Tablet media-query breakpoint in pixels (default 980)
    #[arg(long, value_name = "PX")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tablet_breakpoint: Option<u32>,

    /// Mobile media-query breakpoint in pixels (default 767)
    #[arg(long, value_name = "PX")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_breakpoint: Option<u32>,

    /// Print a color in hex, rgba and HSB forms and exit
    #[arg(long, value_name = "COLOR")]
    #[serde(skip)]
    pub convert: Option<String>,

    /// Save the effective panel schema to a TOML file
    #[arg(long, value_name = "FILE")]
    #[serde(skip)]
    pub save_config: Option<PathBuf>,

    /// Print shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    #[serde(skip)]
    pub completions: Option<Shell>,

    /// Log file path (default: fieldkit.log)
    #[arg(long, value_name = "FILE")]
    #[serde(skip)]
    pub log_file: Option<PathBuf>,

    /// Log level: trace, debug, info, warn, error (default: info)
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    #[serde(skip)]
    pub log_level: String,
}

impl Cli {
    /// Flags that override the schema file, for Figment merging.
    ///
    /// Only flags given on the command line are serialized, so unset flags
    /// leave the file's values alone.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            panel: PanelOverrides {
                title: self.title.clone(),
                selector_id: self.selector_id.clone(),
            },
            breakpoints: BreakpointOverrides {
                tablet: self.tablet_breakpoint,
                mobile: self.mobile_breakpoint,
            },
        }
    }

    /// Whether file logging should be set up for this run.
    pub fn wants_logging(&self) -> bool {
        self.interactive || self.log_file.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignment_splits_on_first_equals() {
        let a = parse_assignment("css=a=b").unwrap();
        assert_eq!(a.name, "css");
        assert_eq!(a.value, "a=b");
    }

    #[test]
    fn assignment_rejects_missing_name() {
        assert!(parse_assignment("=1").is_err());
        assert!(parse_assignment("novalue").is_err());
    }

    #[test]
    fn overrides_only_carry_given_flags() {
        let cli = Cli::parse_from(["fieldkit", "--title", "Hero", "--mobile-breakpoint", "600"]);
        let overrides = cli.to_config_overrides();
        assert_eq!(overrides.panel.title.as_deref(), Some("Hero"));
        assert!(overrides.panel.selector_id.is_none());
        assert_eq!(overrides.breakpoints.mobile, Some(600));
        assert!(overrides.breakpoints.tablet.is_none());
    }
}
