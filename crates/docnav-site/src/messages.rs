//! Fluent message catalogs for navigation labels.
//!
//! Each locale ships a `locales/{code}.ftl` resource embedded at build time.
//! Message ids match the keys of the navigation template.

use fluent_bundle::{FluentBundle, FluentResource};
use rust_embed::RustEmbed;
use unic_langid::LanguageIdentifier;

#[derive(RustEmbed)]
#[folder = "locales/"]
struct Asset;

/// Translated messages for one locale.
pub(crate) struct Catalog {
    code: String,
    bundle: FluentBundle<FluentResource>,
}

impl Catalog {
    /// Load the embedded `.ftl` resource for a locale.
    ///
    /// A missing or partly malformed resource yields a catalog without the
    /// affected messages; lookups for them return `None`.
    pub(crate) fn load(code: &str, lang: &str) -> Self {
        let filename = format!("{code}.ftl");
        let source = match Asset::get(&filename) {
            Some(file) => String::from_utf8_lossy(file.data.as_ref()).into_owned(),
            None => {
                tracing::warn!(file = %filename, "Missing message file");
                String::new()
            }
        };
        Self::from_source(code, lang, source)
    }

    /// Build a catalog from FTL source text.
    pub(crate) fn from_source(code: &str, lang: &str, source: String) -> Self {
        let langid: LanguageIdentifier = lang.parse().unwrap_or_else(|err| {
            tracing::warn!(locale = code, lang, %err, "Invalid language tag for messages");
            LanguageIdentifier::default()
        });

        let resource = FluentResource::try_new(source).unwrap_or_else(|(resource, errors)| {
            tracing::warn!(
                locale = code,
                errors = errors.len(),
                "Message file has syntax errors"
            );
            resource
        });

        let mut bundle = FluentBundle::new(vec![langid]);
        bundle.set_use_isolating(false);
        if let Err(errors) = bundle.add_resource(resource) {
            tracing::warn!(
                locale = code,
                errors = errors.len(),
                "Duplicate messages in message file"
            );
        }

        Self {
            code: code.to_owned(),
            bundle,
        }
    }

    /// Locale code the catalog was loaded for.
    pub(crate) fn code(&self) -> &str {
        &self.code
    }

    /// Format the message with the given id.
    pub(crate) fn text(&self, key: &str) -> Option<String> {
        let pattern = self.bundle.get_message(key)?.value()?;
        let mut errors = Vec::new();
        let value = self.bundle.format_pattern(pattern, None, &mut errors);
        errors.is_empty().then(|| value.into_owned())
    }
}
