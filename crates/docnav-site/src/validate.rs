//! Authoring checks for site configurations.
//!
//! Validation collects every problem in one pass instead of stopping at the
//! first, so a single run reports all broken entries. Each error carries the
//! offending node's path in output form, e.g. `locales.es.sidebar[1].items[0]`.

use std::fmt;
use std::path::Path;

use unic_langid::LanguageIdentifier;

use crate::site::{LocaleConfig, NavItem, Site};

/// Single authoring error.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Leaf entry without a link.
    #[error("{path}: entry has neither a link nor children")]
    MissingLink {
        /// Node path.
        path: String,
    },
    /// Entry with empty display text.
    #[error("{path}: entry text is empty")]
    EmptyText {
        /// Node path.
        path: String,
    },
    /// Link with an unsupported shape.
    #[error("{path}: invalid link {link:?}: {reason}")]
    InvalidLink {
        /// Node path.
        path: String,
        /// Offending link.
        link: String,
        /// What is wrong with it.
        reason: &'static str,
    },
    /// Internal link that does not start with the owning locale's prefix.
    #[error("{path}: link {link:?} is outside locale {locale:?}")]
    ForeignLocaleLink {
        /// Node path.
        path: String,
        /// Offending link.
        link: String,
        /// Locale the entry belongs to.
        locale: String,
    },
    /// Locale tree shape differs from the reference locale.
    #[error("{path}: structure differs from locale {reference:?} ({detail})")]
    ParityMismatch {
        /// Node path in the diverging locale.
        path: String,
        /// Reference locale code.
        reference: String,
        /// Human-readable difference.
        detail: String,
    },
    /// Declared locale set differs from the expected one.
    #[error("locales: found {found:?}, expected {expected:?}")]
    UnexpectedLocales {
        /// Expected codes, sorted.
        expected: Vec<String>,
        /// Declared codes, sorted.
        found: Vec<String>,
    },
    /// Social link that is not an absolute http(s) URL.
    #[error("{path}: social link {link:?} must start with http:// or https://")]
    InvalidSocialLink {
        /// Node path.
        path: String,
        /// Offending URL.
        link: String,
    },
    /// Locale language tag that is malformed or names another language.
    #[error("{path}: language tag {lang:?} {reason}")]
    InvalidLang {
        /// Node path.
        path: String,
        /// Offending tag.
        lang: String,
        /// What is wrong with it.
        reason: &'static str,
    },
    /// Base path without leading and trailing slash.
    #[error("base: {base:?} must start and end with '/'")]
    InvalidBase {
        /// Offending base.
        base: String,
    },
    /// Internal link with no markdown source in the docs directory.
    #[error("{path}: no page source for {link:?}")]
    MissingPage {
        /// Node path.
        path: String,
        /// Offending link.
        link: String,
    },
}

/// Non-empty collection of validation errors.
#[derive(Debug, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    /// Individual errors in discovery order.
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} validation error(s)", self.0.len())?;
        for err in &self.0 {
            write!(f, "\n  {err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Options controlling validation.
#[derive(Clone, Debug)]
pub struct ValidationOptions {
    /// Locale codes the site must declare.
    pub expected_locales: Vec<String>,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            expected_locales: vec!["en".to_owned(), "es".to_owned()],
        }
    }
}

/// Validate a site configuration.
///
/// # Errors
///
/// Returns every authoring error found.
pub fn validate(site: &Site, options: &ValidationOptions) -> Result<(), ValidationErrors> {
    let mut errors = Vec::new();

    if !(site.base.starts_with('/') && site.base.ends_with('/')) {
        errors.push(ValidationError::InvalidBase {
            base: site.base.clone(),
        });
    }

    for (i, social) in site.theme.social_links.iter().enumerate() {
        if !is_http_url(&social.link) {
            errors.push(ValidationError::InvalidSocialLink {
                path: format!("theme.socialLinks[{i}]"),
                link: social.link.clone(),
            });
        }
    }

    check_locale_set(site, options, &mut errors);

    for (code, locale) in &site.locales {
        let prefix = format!("locales.{code}");
        check_lang(&locale.lang, code, &format!("{prefix}.lang"), &mut errors);
        check_items(&locale.nav, code, &format!("{prefix}.nav"), &mut errors);
        check_items(&locale.sidebar, code, &format!("{prefix}.sidebar"), &mut errors);
    }

    check_parity(site, &mut errors);

    if errors.is_empty() {
        tracing::debug!(locales = site.locales.len(), "Site configuration is valid");
        Ok(())
    } else {
        tracing::warn!(count = errors.len(), "Site configuration has errors");
        Err(ValidationErrors(errors))
    }
}

/// Check that every internal link has a markdown source under `docs_dir`.
///
/// A link `/en/guide` resolves to `en/guide.md` or `en/guide/index.md`;
/// a link ending in `/` resolves to `index.md` in that directory.
/// External links and links with `.`, `..` or empty segments are skipped.
#[must_use]
pub fn check_pages(site: &Site, docs_dir: &Path) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (code, locale) in &site.locales {
        for (path, item) in walk(locale, code) {
            let Some(link) = item.link.as_deref() else {
                continue;
            };
            if !link.starts_with('/') || has_dot_segments(link) {
                continue;
            }
            if !page_exists(docs_dir, link) {
                tracing::debug!(link, "No page source");
                errors.push(ValidationError::MissingPage {
                    path,
                    link: link.to_owned(),
                });
            }
        }
    }
    errors
}

fn page_exists(docs_dir: &Path, link: &str) -> bool {
    let relative = link.trim_start_matches('/');
    if relative.is_empty() || relative.ends_with('/') {
        return docs_dir.join(relative).join("index.md").is_file();
    }
    docs_dir.join(format!("{relative}.md")).is_file()
        || docs_dir.join(relative).join("index.md").is_file()
}

/// All entries of a locale with their paths, nav first, depth-first.
fn walk<'a>(locale: &'a LocaleConfig, code: &str) -> Vec<(String, &'a NavItem)> {
    fn visit<'a>(items: &'a [NavItem], prefix: &str, out: &mut Vec<(String, &'a NavItem)>) {
        for (i, item) in items.iter().enumerate() {
            let path = format!("{prefix}[{i}]");
            visit(&item.items, &format!("{path}.items"), out);
            out.push((path, item));
        }
    }

    let mut out = Vec::new();
    visit(&locale.nav, &format!("locales.{code}.nav"), &mut out);
    visit(&locale.sidebar, &format!("locales.{code}.sidebar"), &mut out);
    out
}

fn check_locale_set(site: &Site, options: &ValidationOptions, errors: &mut Vec<ValidationError>) {
    let mut expected = options.expected_locales.clone();
    expected.sort();
    expected.dedup();
    let found: Vec<String> = site.locales.keys().cloned().collect();
    if found != expected {
        errors.push(ValidationError::UnexpectedLocales { expected, found });
    }
}

fn check_lang(lang: &str, code: &str, path: &str, errors: &mut Vec<ValidationError>) {
    let reason = match lang.parse::<LanguageIdentifier>() {
        Err(_) => Some("is not a valid BCP 47 language tag"),
        Ok(id) if id.language.as_str() != code => Some("names a different language"),
        Ok(_) => None,
    };
    if let Some(reason) = reason {
        errors.push(ValidationError::InvalidLang {
            path: path.to_owned(),
            lang: lang.to_owned(),
            reason,
        });
    }
}

fn check_items(items: &[NavItem], code: &str, prefix: &str, errors: &mut Vec<ValidationError>) {
    for (i, item) in items.iter().enumerate() {
        let path = format!("{prefix}[{i}]");
        check_item(item, code, &path, errors);
        check_items(&item.items, code, &format!("{path}.items"), errors);
    }
}

fn check_item(item: &NavItem, code: &str, path: &str, errors: &mut Vec<ValidationError>) {
    if item.text.trim().is_empty() {
        errors.push(ValidationError::EmptyText {
            path: path.to_owned(),
        });
    }

    match item.link.as_deref() {
        None | Some("") if item.is_leaf() => {
            errors.push(ValidationError::MissingLink {
                path: path.to_owned(),
            });
        }
        None | Some("") => {}
        Some(link) => check_link(link, code, path, errors),
    }
}

fn check_link(link: &str, code: &str, path: &str, errors: &mut Vec<ValidationError>) {
    let invalid = |reason| ValidationError::InvalidLink {
        path: path.to_owned(),
        link: link.to_owned(),
        reason,
    };

    if link.contains(['?', '#']) {
        errors.push(invalid("query strings and fragments are not allowed"));
    } else if link.starts_with('/') {
        if has_dot_segments(link) {
            errors.push(invalid("empty, '.' and '..' path segments are not allowed"));
            return;
        }
        let locale_root = format!("/{code}");
        let in_locale = link == locale_root
            || link
                .strip_prefix(&locale_root)
                .is_some_and(|rest| rest.starts_with('/'));
        if !in_locale {
            errors.push(ValidationError::ForeignLocaleLink {
                path: path.to_owned(),
                link: link.to_owned(),
                locale: code.to_owned(),
            });
        }
    } else if !is_http_url(link) {
        errors.push(invalid("must be root-relative or start with http:// or https://"));
    }
}

/// True if a root-relative link has an empty, `.` or `..` segment.
///
/// A single trailing slash is allowed.
fn has_dot_segments(link: &str) -> bool {
    let trimmed = link.strip_prefix('/').unwrap_or(link);
    let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
    trimmed
        .split('/')
        .any(|segment| matches!(segment, "" | "." | ".."))
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Compare every locale against the first one in code order.
fn check_parity(site: &Site, errors: &mut Vec<ValidationError>) {
    let mut locales = site.locales.iter();
    let Some((reference_code, reference)) = locales.next() else {
        return;
    };

    for (code, locale) in locales {
        for (field, ours, theirs) in [
            ("nav", &locale.nav, &reference.nav),
            ("sidebar", &locale.sidebar, &reference.sidebar),
        ] {
            let prefix = format!("locales.{code}.{field}");
            if ours.len() != theirs.len() {
                errors.push(ValidationError::ParityMismatch {
                    path: prefix,
                    reference: reference_code.clone(),
                    detail: format!("{} entries vs {}", ours.len(), theirs.len()),
                });
                continue;
            }
            for (i, (a, b)) in ours.iter().zip(theirs).enumerate() {
                let (a_shape, b_shape) = (shape(a), shape(b));
                if a_shape != b_shape {
                    errors.push(ValidationError::ParityMismatch {
                        path: format!("{prefix}[{i}]"),
                        reference: reference_code.clone(),
                        detail: format!(
                            "{} nodes, depth {} vs {} nodes, depth {}",
                            a_shape.0, a_shape.1, b_shape.0, b_shape.1
                        ),
                    });
                }
            }
        }
    }
}

fn shape(item: &NavItem) -> (usize, usize) {
    (item.node_count(), item.depth())
}
