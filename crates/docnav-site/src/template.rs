//! Locale-independent navigation template.
//!
//! The sidebar and top bar are declared once as [`Entry`] trees keyed by
//! message ids. Each locale contributes only a Fluent message file
//! (`locales/{code}.ftl`), so every locale expands to the same shape.

/// Template entry.
#[derive(Debug)]
pub(crate) enum Entry {
    /// Internal page. `path` is relative to the locale root (empty for home).
    Page {
        key: &'static str,
        path: &'static str,
    },
    /// Absolute external URL, shared by every locale.
    External {
        key: &'static str,
        url: &'static str,
    },
    /// Group of entries.
    Group {
        key: &'static str,
        entries: &'static [Entry],
    },
}

/// Supported locale: path prefix code and BCP 47 language tag.
#[derive(Debug)]
pub(crate) struct LocaleDef {
    pub(crate) code: &'static str,
    pub(crate) lang: &'static str,
}

pub(crate) const SITE_TITLE: &str = "Ferrum";
/// Locale whose description doubles as the site-wide description.
pub(crate) const DEFAULT_LOCALE: &str = "en";
pub(crate) const DEFAULT_BASE: &str = "/";
pub(crate) const FAVICON: &str = "/favicon.ico";
pub(crate) const LOGO: &str = "/logo.svg";
pub(crate) const REPOSITORY_URL: &str = "https://github.com/ferrum-framework/ferrum";

/// Social links as (platform tag, URL).
pub(crate) const SOCIAL_LINKS: &[(&str, &str)] = &[("github", REPOSITORY_URL)];

/// Message ids every locale needs besides the navigation entries.
pub(crate) const LABEL_KEY: &str = "locale-label";
pub(crate) const DESCRIPTION_KEY: &str = "site-description";
pub(crate) const METADATA_KEYS: &[&str] = &[LABEL_KEY, DESCRIPTION_KEY];

pub(crate) const NAV: &[Entry] = &[
    Entry::Page {
        key: "home",
        path: "",
    },
    Entry::Page {
        key: "guide",
        path: "introduction/how-to-start",
    },
    Entry::External {
        key: "source-code",
        url: REPOSITORY_URL,
    },
];

pub(crate) const SIDEBAR: &[Entry] = &[
    Entry::Group {
        key: "introduction",
        entries: &[
            Entry::Page {
                key: "how-to-start",
                path: "introduction/how-to-start",
            },
            Entry::Page {
                key: "installation",
                path: "introduction/installation",
            },
            Entry::Page {
                key: "project-structure",
                path: "introduction/project-structure",
            },
        ],
    },
    Entry::Group {
        key: "key-concepts",
        entries: &[
            Entry::Group {
                key: "configuring-the-application",
                entries: &[
                    Entry::Page {
                        key: "configuration",
                        path: "key-concepts/configuration",
                    },
                    Entry::Page {
                        key: "environment-variables",
                        path: "key-concepts/environment-variables",
                    },
                    Entry::Page {
                        key: "modules",
                        path: "key-concepts/modules",
                    },
                ],
            },
            Entry::Group {
                key: "controllers-and-routes",
                entries: &[
                    Entry::Page {
                        key: "controllers",
                        path: "key-concepts/controllers",
                    },
                    Entry::Page {
                        key: "routes",
                        path: "key-concepts/routes",
                    },
                    Entry::Page {
                        key: "middleware",
                        path: "key-concepts/middleware",
                    },
                ],
            },
            Entry::Page {
                key: "dependency-injection",
                path: "key-concepts/dependency-injection",
            },
            Entry::Page {
                key: "error-handling",
                path: "key-concepts/error-handling",
            },
            Entry::Page {
                key: "testing",
                path: "key-concepts/testing",
            },
        ],
    },
    Entry::Group {
        key: "resources",
        entries: &[
            Entry::Page {
                key: "faq",
                path: "resources/faq",
            },
            Entry::External {
                key: "source-code",
                url: REPOSITORY_URL,
            },
        ],
    },
];

pub(crate) const LOCALES: &[LocaleDef] = &[
    LocaleDef {
        code: "en",
        lang: "en-US",
    },
    LocaleDef {
        code: "es",
        lang: "es-ES",
    },
];
