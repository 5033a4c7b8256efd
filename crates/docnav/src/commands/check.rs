//! `docnav check` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use docnav_config::{CliSettings, Config};
use docnav_site::{Site, ValidationError, ValidationOptions, check_pages, validate};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Validate an existing site configuration JSON instead of building one.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Markdown source directory; every internal link must have a page there.
    #[arg(short, long)]
    docs_dir: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover docnav.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl CheckArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            docs_dir: self.docs_dir,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        run(&config, self.input.as_deref(), &Output::new())
    }
}

/// Check the site read from `input`, or the built site when `input` is `None`.
fn run(config: &Config, input: Option<&Path>, output: &Output) -> Result<(), CliError> {
    let site = match input {
        Some(path) => {
            output.info(&format!("Checking {}", path.display()));
            Site::from_json(&std::fs::read_to_string(path)?)?
        }
        None => config.site_builder().build(),
    };

    let docs_dir = config.check_resolved.docs_dir.as_deref();
    if docs_dir.is_none() {
        output.warning("No docs directory configured, skipping page checks");
    }
    let errors = collect_errors(&site, &config.validation_options(), |site| {
        docs_dir.map(|dir| check_pages(site, dir)).unwrap_or_default()
    });

    if errors.is_empty() {
        output.success(&format!(
            "Site configuration is valid ({} locales)",
            site.locales.len()
        ));
        return Ok(());
    }

    for err in &errors {
        output.error(&err.to_string());
    }
    Err(CliError::CheckFailed(errors.len()))
}

/// Run validation and any extra checks, returning all errors.
fn collect_errors(
    site: &Site,
    options: &ValidationOptions,
    extra: impl FnOnce(&Site) -> Vec<ValidationError>,
) -> Vec<ValidationError> {
    let mut errors = validate(site, options)
        .err()
        .map(|errors| errors.errors().to_vec())
        .unwrap_or_default();
    errors.extend(extra(site));
    errors
}

#[cfg(test)]
mod tests {
    use docnav_site::{NavItem, build_site_config};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    fn write_site(dir: &Path, site: &Site) -> PathBuf {
        let path = dir.join("site.json");
        std::fs::write(&path, site.to_json_pretty().unwrap()).unwrap();
        path
    }

    #[test]
    fn test_run_built_site_passes() {
        run(&Config::default(), None, &Output::new()).unwrap();
    }

    #[test]
    fn test_run_reads_input_json() {
        let dir = TempDir::new().unwrap();
        let path = write_site(dir.path(), &build_site_config());

        run(&Config::default(), Some(&path), &Output::new()).unwrap();
    }

    #[test]
    fn test_run_fails_when_input_has_errors() {
        let dir = TempDir::new().unwrap();
        let mut site = build_site_config();
        let es = site.locales.get_mut("es").unwrap();
        es.sidebar[0].items[0].link = Some("/en/introduction/how-to-start".to_owned());
        es.sidebar[0].items[1].text = String::new();
        let path = write_site(dir.path(), &site);

        let err = run(&Config::default(), Some(&path), &Output::new()).unwrap_err();

        assert!(matches!(err, CliError::CheckFailed(2)));
    }

    #[test]
    fn test_run_fails_on_missing_pages() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.check_resolved.docs_dir = Some(dir.path().to_path_buf());

        let err = run(&config, None, &Output::new()).unwrap_err();

        assert!(matches!(err, CliError::CheckFailed(n) if n > 0));
    }

    #[test]
    fn test_run_missing_input_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.json");

        let err = run(&Config::default(), Some(&path), &Output::new()).unwrap_err();

        assert!(matches!(err, CliError::Io(_)));
    }

    #[test]
    fn test_run_malformed_input_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("site.json");
        std::fs::write(&path, "{\"title\": ").unwrap();

        let err = run(&Config::default(), Some(&path), &Output::new()).unwrap_err();

        assert!(matches!(err, CliError::Json(_)));
    }

    #[test]
    fn test_collect_errors_valid_site() {
        let errors = collect_errors(
            &build_site_config(),
            &ValidationOptions::default(),
            |_| Vec::new(),
        );

        assert_eq!(errors, Vec::new());
    }

    #[test]
    fn test_collect_errors_combines_validation_and_pages() {
        let dir = TempDir::new().unwrap();
        let mut site = build_site_config();
        site.locales.get_mut("en").unwrap().sidebar[0]
            .items
            .push(NavItem::group("Empty", Vec::new()));

        let errors = collect_errors(&site, &ValidationOptions::default(), |site| {
            check_pages(site, dir.path())
        });

        assert!(
            errors
                .iter()
                .any(|e| matches!(e, ValidationError::MissingLink { .. }))
        );
        assert!(
            errors
                .iter()
                .any(|e| matches!(e, ValidationError::MissingPage { .. }))
        );
    }
}
