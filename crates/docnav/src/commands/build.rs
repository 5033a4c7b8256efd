//! `docnav build` command implementation.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Args;
use docnav_config::{CliSettings, Config};
use docnav_site::{Site, SidebarLayout, validate};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Output file for the site configuration JSON (default: stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Sidebar layout: "nested" or "flat" (overrides config).
    #[arg(long)]
    layout: Option<SidebarLayout>,

    /// Base path the site is served under (overrides config).
    #[arg(long)]
    base: Option<String>,

    /// Write compact JSON instead of pretty-printed.
    #[arg(long)]
    compact: bool,

    /// Path to configuration file (default: auto-discover docnav.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl BuildArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            layout: self.layout,
            base: self.base,
            output: self.output,
            pretty: self.compact.then_some(false),
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        run(&config, &Output::new())
    }
}

/// Build and validate the site, then write it. Nothing is written for an invalid site.
fn run(config: &Config, output: &Output) -> Result<(), CliError> {
    let site = config.site_builder().build();
    validate(&site, &config.validation_options())?;

    let json = render_json(&site, config.output_resolved.pretty)?;
    let target = config.output_resolved.path.as_deref();
    write_json(target, &json)?;

    tracing::info!(
        layout = %config.sidebar.layout,
        bytes = json.len(),
        "Wrote site configuration"
    );
    if let Some(path) = target {
        output.success(&format!(
            "Site configuration written to {}",
            path.display()
        ));
    }
    Ok(())
}

/// Serialize a site, pretty-printed or compact.
fn render_json(site: &Site, pretty: bool) -> Result<String, CliError> {
    let json = if pretty {
        site.to_json_pretty()?
    } else {
        site.to_json()?
    };
    Ok(json)
}

/// Write JSON to a file, creating parent directories, or to stdout.
fn write_json(path: Option<&Path>, json: &str) -> Result<(), CliError> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, format!("{json}\n"))?;
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}")?;
        }
    }
    Ok(())
}
