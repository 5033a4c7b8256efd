//! `docnav tree` command implementation.

use std::path::PathBuf;

use clap::Args;
use docnav_config::Config;
use docnav_site::{LocaleConfig, NavItem};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the tree command.
#[derive(Args)]
pub(crate) struct TreeArgs {
    /// Locale to print (default: all locales).
    #[arg(short, long)]
    locale: Option<String>,

    /// Path to configuration file (default: auto-discover docnav.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl TreeArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let config = Config::load(self.config.as_deref(), None)?;
        run(&config, self.locale.as_deref(), &Output::new())
    }
}

/// Print the sidebar of one locale, or of every locale when `locale` is `None`.
fn run(config: &Config, locale: Option<&str>, output: &Output) -> Result<(), CliError> {
    let site = config.site_builder().build();

    let locales: Vec<(&String, &LocaleConfig)> = match locale {
        Some(code) => {
            let (key, locale) = site
                .locales
                .get_key_value(code)
                .ok_or_else(|| CliError::UnknownLocale(code.to_owned()))?;
            vec![(key, locale)]
        }
        None => site.locales.iter().collect(),
    };

    for (code, locale) in locales {
        output.highlight(&format!("{} ({code})", locale.label));
        for (depth, item) in outline(&locale.sidebar) {
            output.entry(depth + 1, &item.text, item.link.as_deref());
        }
    }
    Ok(())
}

/// Flatten a tree into (depth, entry) pairs in display order.
fn outline(items: &[NavItem]) -> Vec<(usize, &NavItem)> {
    fn visit<'a>(items: &'a [NavItem], depth: usize, out: &mut Vec<(usize, &'a NavItem)>) {
        for item in items {
            out.push((depth, item));
            visit(&item.items, depth + 1, out);
        }
    }

    let mut out = Vec::new();
    visit(items, 0, &mut out);
    out
}
