//! Site configuration builder.
//!
//! Expands the navigation template once per locale. The builder takes no
//! runtime input beyond layout options and never fails: authoring mistakes
//! such as a missing translation surface as empty text, which
//! [`validate`](crate::validate) reports.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::site::{LocaleConfig, NavItem, Site, SocialLink, Theme};
use crate::messages::Catalog;
use crate::template::{self, Entry, LocaleDef};

/// Sidebar grouping layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SidebarLayout {
    /// Pages grouped into subsections (three levels deep).
    #[default]
    Nested,
    /// Subsections dissolved into their parent section (two levels deep).
    Flat,
}

impl fmt::Display for SidebarLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nested => f.write_str("nested"),
            Self::Flat => f.write_str("flat"),
        }
    }
}

/// Error returned when parsing an unknown layout name.
#[derive(Debug, thiserror::Error)]
#[error("Unknown sidebar layout: {0} (expected \"nested\" or \"flat\")")]
pub struct ParseLayoutError(String);

impl FromStr for SidebarLayout {
    type Err = ParseLayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nested" => Ok(Self::Nested),
            "flat" => Ok(Self::Flat),
            other => Err(ParseLayoutError(other.to_owned())),
        }
    }
}

/// Build the site configuration with default options.
#[must_use]
pub fn build_site_config() -> Site {
    SiteBuilder::new().build()
}

/// Builder for [`Site`] with layout options.
#[derive(Clone, Debug, Default)]
pub struct SiteBuilder {
    layout: SidebarLayout,
    base: Option<String>,
    collapsed: Option<bool>,
}

impl SiteBuilder {
    /// Create a builder with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sidebar layout.
    #[must_use]
    pub fn layout(mut self, layout: SidebarLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Override the base path the site is served under.
    #[must_use]
    pub fn base(mut self, base: impl Into<String>) -> Self {
        self.base = Some(base.into());
        self
    }

    /// Set the initial collapsed state of every sidebar group.
    #[must_use]
    pub fn collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = Some(collapsed);
        self
    }

    /// Build the site configuration.
    #[must_use]
    pub fn build(&self) -> Site {
        let locales: BTreeMap<String, LocaleConfig> = template::LOCALES
            .iter()
            .map(|def| {
                let catalog = Catalog::load(def.code, def.lang);
                (def.code.to_owned(), self.build_locale(def, &catalog))
            })
            .collect();
        let description = locales
            .get(template::DEFAULT_LOCALE)
            .and_then(|locale| locale.description.clone())
            .unwrap_or_default();

        tracing::debug!(
            layout = %self.layout,
            locales = locales.len(),
            "Built site configuration"
        );

        Site {
            title: template::SITE_TITLE.to_owned(),
            description,
            base: self
                .base
                .clone()
                .unwrap_or_else(|| template::DEFAULT_BASE.to_owned()),
            favicon: template::FAVICON.to_owned(),
            locales,
            theme: Theme {
                social_links: template::SOCIAL_LINKS
                    .iter()
                    .map(|&(icon, link)| SocialLink {
                        icon: icon.to_owned(),
                        link: link.to_owned(),
                    })
                    .collect(),
                logo: template::LOGO.to_owned(),
            },
        }
    }

    fn build_locale(&self, def: &LocaleDef, catalog: &Catalog) -> LocaleConfig {
        let nav = template::NAV
            .iter()
            .map(|entry| expand(entry, catalog, None))
            .collect();

        let sidebar: Vec<NavItem> = template::SIDEBAR
            .iter()
            .map(|entry| self.build_section(entry, catalog))
            .collect();

        tracing::debug!(
            locale = def.code,
            sections = sidebar.len(),
            nodes = sidebar.iter().map(NavItem::node_count).sum::<usize>(),
            "Built locale navigation"
        );

        LocaleConfig {
            label: text(catalog, template::LABEL_KEY),
            lang: def.lang.to_owned(),
            description: Some(text(catalog, template::DESCRIPTION_KEY)),
            nav,
            sidebar,
        }
    }

    fn build_section(&self, entry: &Entry, catalog: &Catalog) -> NavItem {
        let mut section = expand(entry, catalog, self.collapsed);
        if self.layout == SidebarLayout::Flat {
            section.items = section.items.into_iter().flat_map(flatten).collect();
        }
        section
    }
}

/// Expand one template entry for a locale.
fn expand(entry: &Entry, catalog: &Catalog, collapsed: Option<bool>) -> NavItem {
    match entry {
        Entry::Page { key, path } => {
            NavItem::link(text(catalog, key), format!("/{}/{path}", catalog.code()))
        }
        Entry::External { key, url } => NavItem::link(text(catalog, key), *url),
        Entry::Group { key, entries } => NavItem {
            collapsed,
            ..NavItem::group(
                text(catalog, key),
                entries
                    .iter()
                    .map(|child| expand(child, catalog, collapsed))
                    .collect(),
            )
        },
    }
}

/// Replace a group with its leaves.
fn flatten(item: NavItem) -> Vec<NavItem> {
    if item.is_leaf() {
        vec![item]
    } else {
        item.items.into_iter().flat_map(flatten).collect()
    }
}

fn text(catalog: &Catalog, key: &str) -> String {
    catalog.text(key).unwrap_or_else(|| {
        tracing::warn!(locale = catalog.code(), key, "Missing translation");
        String::new()
    })
}
