//! Localized navigation tree and site configuration for docnav.
//!
//! This crate provides:
//! - [`Site`]: Site metadata plus per-locale navigation trees
//! - [`build_site_config`] and [`SiteBuilder`]: Expand the navigation
//!   template into a [`Site`] for every supported locale
//! - [`validate`]: Authoring checks (links, labels, cross-locale parity)
//!
//! # Quick Start
//!
//! ```
//! use docnav_site::{ValidationOptions, build_site_config, validate};
//!
//! let site = build_site_config();
//! validate(&site, &ValidationOptions::default()).unwrap();
//!
//! let en = site.locale("en").unwrap();
//! assert_eq!(
//!     en.sidebar[0].items[0].link.as_deref(),
//!     Some("/en/introduction/how-to-start")
//! );
//! ```

mod builder;
mod messages;
mod site;
mod template;
mod validate;

pub use builder::{ParseLayoutError, SidebarLayout, SiteBuilder, build_site_config};
pub use site::{LocaleConfig, NavItem, Site, SocialLink, Theme};
pub use validate::{ValidationError, ValidationErrors, ValidationOptions, check_pages, validate};
