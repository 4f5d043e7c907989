//! CLI entry point for fieldkit.

use std::io;

use clap::{CommandFactory, Parser};
use color_eyre::eyre::{Result, WrapErr, eyre};

use fieldkit::cli::{Cli, OutputFormat};
use fieldkit::color::describe;
use fieldkit::config::PanelConfig;
use fieldkit::form::{FormData, stylesheet};
use fieldkit::logging::init_logging;
use fieldkit::registry::Registry;
use fieldkit::tui;

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "fieldkit", &mut io::stdout());
        return Ok(());
    }

    if let Some(ref text) = cli.convert {
        let report = describe(text).map_err(|e| eyre!("Invalid color '{}': {}", text, e))?;
        let out = match cli.format {
            OutputFormat::Json => serde_json::to_string_pretty(&report)
                .wrap_err("Failed to serialize color to JSON")?
                + "\n",
            OutputFormat::Yaml => {
                serde_yaml::to_string(&report).wrap_err("Failed to serialize color to YAML")?
            }
            OutputFormat::Css => format!("{}\n", report.css),
        };
        print!("{out}");
        return Ok(());
    }

    // Held until exit so buffered log lines are flushed
    let _log_guard = cli
        .wants_logging()
        .then(|| init_logging(cli.log_file.as_deref(), Some(&cli.log_level)));

    let config = PanelConfig::load_layered(cli.config.as_deref(), &cli.to_config_overrides())
        .map_err(|e| eyre!("{}", e))
        .wrap_err("Failed to load panel configuration")?;

    if let Some(ref path) = cli.save_config {
        config
            .save(path)
            .map_err(|e| eyre!("{}", e))
            .wrap_err_with(|| format!("Failed to save config to {}", path.display()))?;
        eprintln!("Saved config to {}", path.display());
    }

    let mut registry = Registry::from_config(&config).map_err(|e| eyre!("Invalid panel: {}", e))?;

    for assignment in &cli.assignments {
        registry
            .set_value(&assignment.name, &assignment.value)
            .map_err(|e| eyre!("--set {}={}: {}", assignment.name, assignment.value, e))?;
    }

    if cli.interactive {
        return tui::run(config, registry);
    }

    let output = match cli.format {
        OutputFormat::Json => FormData::from_registry(&registry)
            .to_json()
            .wrap_err("Failed to serialize form to JSON")?
            + "\n",
        OutputFormat::Yaml => FormData::from_registry(&registry)
            .to_yaml()
            .wrap_err("Failed to serialize form to YAML")?,
        OutputFormat::Css => stylesheet(&registry, &config.panel.selector_id, config.breakpoints),
    };

    if let Some(ref path) = cli.output {
        std::fs::write(path, &output)
            .wrap_err_with(|| format!("Failed to write to {}", path.display()))?;
        eprintln!("Wrote form to {}", path.display());
    } else {
        print!("{output}");
    }

    Ok(())
}
