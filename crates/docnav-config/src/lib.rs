//! Configuration management for docnav.
//!
//! Parses `docnav.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [site]
//! base = "/docs/"
//!
//! [sidebar]
//! layout = "nested"   # or "flat"
//! collapsed = false
//!
//! [output]
//! path = "dist/site.json"
//! pretty = true
//!
//! [check]
//! docs_dir = "docs"
//! locales = ["en", "es"]
//! ```

use std::path::{Path, PathBuf};

use docnav_site::{SidebarLayout, SiteBuilder, ValidationOptions};
use serde::Deserialize;
use unic_langid::LanguageIdentifier;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override sidebar layout.
    pub layout: Option<SidebarLayout>,
    /// Override site base path.
    pub base: Option<String>,
    /// Override output file.
    pub output: Option<PathBuf>,
    /// Override pretty-printing of JSON output.
    pub pretty: Option<bool>,
    /// Override docs directory used for page existence checks.
    pub docs_dir: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "docnav.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site metadata overrides.
    pub site: SiteConfig,
    /// Sidebar options.
    pub sidebar: SidebarConfig,
    /// Output configuration (paths are relative strings from TOML).
    output: OutputConfigRaw,
    /// Check configuration (paths are relative strings from TOML).
    check: CheckConfigRaw,

    /// Resolved output configuration (set after loading).
    #[serde(skip)]
    pub output_resolved: OutputConfig,
    /// Resolved check configuration (set after loading).
    #[serde(skip)]
    pub check_resolved: CheckConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site: SiteConfig::default(),
            sidebar: SidebarConfig::default(),
            output: OutputConfigRaw::default(),
            check: CheckConfigRaw::default(),
            output_resolved: OutputConfig::default(),
            check_resolved: CheckConfig::default(),
            config_path: None,
        }
    }
}

/// Site metadata overrides.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Base path the site is served under.
    pub base: Option<String>,
}

/// Sidebar options.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SidebarConfig {
    /// Grouping layout.
    pub layout: SidebarLayout,
    /// Initial collapsed state of sidebar groups. Unset leaves it to the generator.
    pub collapsed: Option<bool>,
}

/// Raw output configuration as parsed from TOML.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OutputConfigRaw {
    path: Option<String>,
    pretty: Option<bool>,
}

/// Resolved output configuration with absolute paths.
#[derive(Debug)]
pub struct OutputConfig {
    /// Output file. `None` writes to stdout.
    pub path: Option<PathBuf>,
    /// Pretty-print JSON.
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: None,
            pretty: true,
        }
    }
}

/// Raw check configuration as parsed from TOML.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CheckConfigRaw {
    docs_dir: Option<String>,
    locales: Option<Vec<String>>,
}

/// Resolved check configuration with absolute paths.
#[derive(Debug)]
pub struct CheckConfig {
    /// Markdown source directory. `None` skips page existence checks.
    pub docs_dir: Option<PathBuf>,
    /// Locale codes the site must declare.
    pub locales: Vec<String>,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            docs_dir: None,
            locales: ValidationOptions::default().expected_locales,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `docnav.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            tracing::debug!("No {CONFIG_FILENAME} found, using defaults");
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(layout) = settings.layout {
            self.sidebar.layout = layout;
        }
        if let Some(base) = &settings.base {
            self.site.base = Some(base.clone());
        }
        if let Some(output) = &settings.output {
            self.output_resolved.path = Some(output.clone());
        }
        if let Some(pretty) = settings.pretty {
            self.output_resolved.pretty = pretty;
        }
        if let Some(docs_dir) = &settings.docs_dir {
            self.check_resolved.docs_dir = Some(docs_dir.clone());
        }
    }

    /// Site builder configured from the `[site]` and `[sidebar]` sections.
    #[must_use]
    pub fn site_builder(&self) -> SiteBuilder {
        let mut builder = SiteBuilder::new().layout(self.sidebar.layout);
        if let Some(base) = &self.site.base {
            builder = builder.base(base.clone());
        }
        if let Some(collapsed) = self.sidebar.collapsed {
            builder = builder.collapsed(collapsed);
        }
        builder
    }

    /// Validation options from the `[check]` section.
    #[must_use]
    pub fn validation_options(&self) -> ValidationOptions {
        ValidationOptions {
            expected_locales: self.check_resolved.locales.clone(),
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::discover_config_from(&current)
    }

    /// Search for config file in `start` and its parents.
    fn discover_config_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file and after CLI settings
    /// are applied.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_site()?;
        self.validate_check()?;
        Ok(())
    }

    /// Validate site overrides.
    fn validate_site(&self) -> Result<(), ConfigError> {
        if let Some(base) = &self.site.base
            && !(base.starts_with('/') && base.ends_with('/'))
        {
            return Err(ConfigError::Validation(format!(
                "site.base must start and end with '/', got {base:?}"
            )));
        }
        Ok(())
    }

    /// Validate check configuration.
    fn validate_check(&self) -> Result<(), ConfigError> {
        let locales = &self.check_resolved.locales;
        if locales.is_empty() {
            return Err(ConfigError::Validation(
                "check.locales cannot be empty".to_owned(),
            ));
        }

        for (i, code) in locales.iter().enumerate() {
            if !is_language_code(code) {
                return Err(ConfigError::Validation(format!(
                    "check.locales: {code:?} is not a two-letter lowercase language code"
                )));
            }
            if locales[..i].contains(code) {
                return Err(ConfigError::Validation(format!(
                    "check.locales: {code:?} is listed more than once"
                )));
            }
        }

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.output_resolved = OutputConfig {
            path: self.output.path.as_deref().map(|p| config_dir.join(p)),
            pretty: self.output.pretty.unwrap_or(true),
        };

        self.check_resolved = CheckConfig {
            docs_dir: self.check.docs_dir.as_deref().map(|p| config_dir.join(p)),
            locales: self
                .check
                .locales
                .clone()
                .unwrap_or_else(|| CheckConfig::default().locales),
        };
    }
}

/// True if `code` is a bare two-letter language subtag in canonical form.
fn is_language_code(code: &str) -> bool {
    let Ok(id) = code.parse::<LanguageIdentifier>() else {
        return false;
    };
    id.script.is_none()
        && id.region.is_none()
        && id.variants().next().is_none()
        && id.language.as_str().len() == 2
        && id.to_string() == code
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.site.base, None);
        assert_eq!(config.sidebar.layout, SidebarLayout::Nested);
        assert_eq!(config.sidebar.collapsed, None);
        assert_eq!(config.output_resolved.path, None);
        assert!(config.output_resolved.pretty);
        assert_eq!(config.check_resolved.docs_dir, None);
        assert_eq!(config.check_resolved.locales, vec!["en", "es"]);
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.sidebar.layout, SidebarLayout::Nested);
        assert!(config.site.base.is_none());
    }

    #[test]
    fn test_parse_sidebar_config() {
        let toml = r#"
[sidebar]
layout = "flat"
collapsed = true
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.sidebar.layout, SidebarLayout::Flat);
        assert_eq!(config.sidebar.collapsed, Some(true));
    }

    #[test]
    fn test_parse_unknown_layout_fails() {
        let toml = r#"
[sidebar]
layout = "deep"
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[output]
path = "dist/site.json"
pretty = false

[check]
docs_dir = "docs"
locales = ["es"]
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.output_resolved.path,
            Some(PathBuf::from("/project/dist/site.json"))
        );
        assert!(!config.output_resolved.pretty);
        assert_eq!(
            config.check_resolved.docs_dir,
            Some(PathBuf::from("/project/docs"))
        );
        assert_eq!(config.check_resolved.locales, vec!["es"]);
    }

    #[test]
    fn test_resolve_paths_defaults() {
        let mut config: Config = toml::from_str("").unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(config.output_resolved.path, None);
        assert!(config.output_resolved.pretty);
        assert_eq!(config.check_resolved.locales, vec!["en", "es"]);
    }

    #[test]
    fn test_apply_cli_settings_layout() {
        let mut config = Config::default();
        let overrides = CliSettings {
            layout: Some(SidebarLayout::Flat),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.sidebar.layout, SidebarLayout::Flat);
        assert!(config.output_resolved.pretty); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_output_and_pretty() {
        let mut config = Config::default();
        let overrides = CliSettings {
            output: Some(PathBuf::from("/out/site.json")),
            pretty: Some(false),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(
            config.output_resolved.path,
            Some(PathBuf::from("/out/site.json"))
        );
        assert!(!config.output_resolved.pretty);
    }

    #[test]
    fn test_apply_cli_settings_base_and_docs_dir() {
        let mut config = Config::default();
        let overrides = CliSettings {
            base: Some("/docs/".to_owned()),
            docs_dir: Some(PathBuf::from("/custom/docs")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.site.base.as_deref(), Some("/docs/"));
        assert_eq!(
            config.check_resolved.docs_dir,
            Some(PathBuf::from("/custom/docs"))
        );
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default();

        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(config.sidebar.layout, SidebarLayout::Nested);
        assert_eq!(config.site.base, None);
        assert_eq!(config.output_resolved.path, None);
    }

    #[test]
    fn test_site_builder_uses_config() {
        let toml = r#"
[site]
base = "/docs/"

[sidebar]
layout = "flat"
collapsed = false
"#;
        let config: Config = toml::from_str(toml).unwrap();

        let site = config.site_builder().build();

        assert_eq!(site.base, "/docs/");
        let en = site.locale("en").unwrap();
        assert_eq!(en.sidebar[1].depth(), 2);
        assert_eq!(en.sidebar[1].collapsed, Some(false));
    }

    #[test]
    fn test_validation_options_from_check() {
        let mut config = Config::default();
        config.check_resolved.locales = vec!["en".to_owned()];

        assert_eq!(config.validation_options().expected_locales, vec!["en"]);
    }

    // Validation tests

    /// Assert that validation fails with expected substrings in the error message.
    fn assert_validation_error(config: &Config, expected_substrings: &[&str]) {
        let result = config.validate();
        assert!(result.is_err(), "Expected validation to fail");
        let err = result.unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let msg = err.to_string();
        for s in expected_substrings {
            assert!(
                msg.contains(s),
                "Expected error to contain '{s}', got: {msg}"
            );
        }
    }

    #[test]
    fn test_validate_default_config_passes() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_base_without_slashes() {
        let mut config = Config::default();
        config.site.base = Some("docs".to_owned());
        assert_validation_error(&config, &["site.base", "'/'"]);
    }

    #[test]
    fn test_validate_base_without_trailing_slash() {
        let mut config = Config::default();
        config.site.base = Some("/docs".to_owned());
        assert_validation_error(&config, &["site.base"]);
    }

    #[test]
    fn test_validate_locales_empty() {
        let mut config = Config::default();
        config.check_resolved.locales = Vec::new();
        assert_validation_error(&config, &["check.locales", "empty"]);
    }

    #[test]
    fn test_validate_locales_bad_code() {
        let mut config = Config::default();
        config.check_resolved.locales = vec!["en".to_owned(), "ES".to_owned()];
        assert_validation_error(&config, &["\"ES\"", "two-letter"]);
    }

    #[test]
    fn test_validate_locales_rejects_region_and_malformed_tags() {
        for code in ["en-US", "spa", "e!", "", "und"] {
            let mut config = Config::default();
            config.check_resolved.locales = vec![code.to_owned()];
            assert_validation_error(&config, &["check.locales", "two-letter"]);
        }
    }

    #[test]
    fn test_is_language_code() {
        assert!(is_language_code("en"));
        assert!(is_language_code("es"));
        assert!(!is_language_code("ES"));
        assert!(!is_language_code("es-ES"));
        assert!(!is_language_code("not a tag!!"));
    }

    #[test]
    fn test_validate_locales_duplicate() {
        let mut config = Config::default();
        config.check_resolved.locales = vec!["en".to_owned(), "en".to_owned()];
        assert_validation_error(&config, &["\"en\"", "more than once"]);
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("docnav.toml");

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_from_file_resolves_relative_to_config_dir() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("docnav.toml");
        std::fs::write(
            &path,
            r#"
[output]
path = "dist/site.json"

[check]
docs_dir = "docs"
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
        assert_eq!(
            config.output_resolved.path,
            Some(dir.path().join("dist/site.json"))
        );
        assert_eq!(config.check_resolved.docs_dir, Some(dir.path().join("docs")));
    }

    #[test]
    fn test_load_invalid_file_fails_validation() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("docnav.toml");
        std::fs::write(&path, "[check]\nlocales = []\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_load_rejects_invalid_cli_base() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("docnav.toml");
        std::fs::write(&path, "").unwrap();
        let settings = CliSettings {
            base: Some("docs/".to_owned()),
            ..Default::default()
        };

        let err = Config::load(Some(&path), Some(&settings)).unwrap_err();

        assert!(err.to_string().contains("site.base"));
    }

    #[test]
    fn test_discover_config_in_start_dir() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("docnav.toml");
        std::fs::write(&path, "").unwrap();

        assert_eq!(Config::discover_config_from(dir.path()), Some(path));
    }

    #[test]
    fn test_discover_config_in_parent_dir() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("docnav.toml");
        std::fs::write(&path, "[sidebar]\nlayout = \"flat\"\n").unwrap();
        let nested = dir.path().join("docs/en/guide");
        std::fs::create_dir_all(&nested).unwrap();

        let discovered = Config::discover_config_from(&nested).unwrap();
        let config = Config::load(Some(&discovered), None).unwrap();

        assert_eq!(discovered, path);
        assert_eq!(config.sidebar.layout, SidebarLayout::Flat);
    }

    #[test]
    fn test_discover_config_prefers_nearest() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("docnav.toml"), "").unwrap();
        let nested = dir.path().join("site");
        std::fs::create_dir_all(&nested).unwrap();
        let nearest = nested.join("docnav.toml");
        std::fs::write(&nearest, "").unwrap();

        assert_eq!(Config::discover_config_from(&nested), Some(nearest));
    }

    #[test]
    fn test_load_malformed_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("docnav.toml");
        std::fs::write(&path, "[sidebar\nlayout = ").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
