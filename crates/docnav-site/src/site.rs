//! Site configuration data model.
//!
//! The types here mirror the shape a static documentation generator expects:
//!
//! ```text
//! { title, description, base, favicon,
//!   locales: { [code]: { label, lang, description?, nav, sidebar } },
//!   theme: { socialLinks, logo } }
//! ```
//!
//! Locales are kept in a [`BTreeMap`] so serialization order is stable
//! across builds.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Navigation entry in a sidebar or top bar.
///
/// A leaf carries a `link`; a group carries child `items`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    /// Display text in the locale's language.
    pub text: String,
    /// Root-relative path or absolute external URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Child entries.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<NavItem>,
    /// Whether the group starts collapsed. Only meaningful for groups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collapsed: Option<bool>,
}

impl NavItem {
    /// Create a leaf entry pointing at `link`.
    #[must_use]
    pub fn link(text: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            link: Some(link.into()),
            items: Vec::new(),
            collapsed: None,
        }
    }

    /// Create a group entry with the given children.
    #[must_use]
    pub fn group(text: impl Into<String>, items: Vec<NavItem>) -> Self {
        Self {
            text: text.into(),
            link: None,
            items,
            collapsed: None,
        }
    }

    /// True if the entry has no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.items.is_empty()
    }

    /// Depth of the subtree rooted at this entry (a leaf has depth 1).
    #[must_use]
    pub fn depth(&self) -> usize {
        1 + self.items.iter().map(NavItem::depth).max().unwrap_or(0)
    }

    /// Number of entries in the subtree, including this one.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.items.iter().map(NavItem::node_count).sum::<usize>()
    }

    /// Iterate over the leaf entries of the subtree in display order.
    pub fn leaves(&self) -> Box<dyn Iterator<Item = &NavItem> + '_> {
        if self.is_leaf() {
            Box::new(std::iter::once(self))
        } else {
            Box::new(self.items.iter().flat_map(NavItem::leaves))
        }
    }
}

/// Per-locale configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleConfig {
    /// Name shown in the language switcher (e.g. "English").
    pub label: String,
    /// BCP 47 language tag (e.g. "en-US").
    pub lang: String,
    /// Locale-specific site description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Top bar entries.
    #[serde(default)]
    pub nav: Vec<NavItem>,
    /// Sidebar sections.
    #[serde(default)]
    pub sidebar: Vec<NavItem>,
}

/// Link to a project profile on an external platform.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    /// Platform tag (e.g. "github").
    pub icon: String,
    /// Absolute URL.
    pub link: String,
}

/// Theme-level settings shared by every locale.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    /// Social links shown in the header.
    #[serde(rename = "socialLinks", default)]
    pub social_links: Vec<SocialLink>,
    /// Logo path relative to the site root.
    pub logo: String,
}

/// Complete documentation site configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    /// Site title.
    pub title: String,
    /// Default site description.
    pub description: String,
    /// Base path the site is served under (e.g. "/" or "/docs/").
    pub base: String,
    /// Favicon path relative to the site root.
    pub favicon: String,
    /// Locale configurations keyed by ISO-639-1 code.
    pub locales: BTreeMap<String, LocaleConfig>,
    /// Theme settings.
    pub theme: Theme,
}

impl Site {
    /// Get locale configuration by code.
    #[must_use]
    pub fn locale(&self, code: &str) -> Option<&LocaleConfig> {
        self.locales.get(code)
    }

    /// Declared locale codes in sorted order.
    pub fn locale_codes(&self) -> impl Iterator<Item = &str> {
        self.locales.keys().map(String::as_str)
    }

    /// Serialize to compact JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Serialize to indented JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Parse a site configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a valid site document.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
