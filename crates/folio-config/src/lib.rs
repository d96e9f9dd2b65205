//! Site configuration for Folio.
//!
//! Parses `folio.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! The resulting [`SiteConfig`] is read once at startup and is immutable
//! afterwards; components receive it at construction time (usually as an
//! `Arc<SiteConfig>`).
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `title`
//! - `url`
//! - `base_url`
//! - `docs.edit_url`, `blog.edit_url`, `pages.edit_url`

mod expand;
mod locale;
mod theme;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use locale::{Direction, Locale};
pub use theme::{
    FooterColumn, FooterConfig, FooterStyle, ItemPosition, LinkItem, NavbarConfig, NavbarItem,
    NavbarItemKind, Stylesheet, ThemeConfig, ThemeToken,
};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the site directory content paths are resolved against.
    pub site_dir: Option<PathBuf>,
    /// Include documents marked `draft: true`.
    pub include_drafts: Option<bool>,
    /// Override the broken-link policy.
    pub on_broken_links: Option<BrokenLinkPolicy>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "folio.toml";

/// Lowest heading level a table of contents may include.
pub const MIN_TOC_LEVEL: u8 = 2;
/// Highest heading level a table of contents may include.
pub const MAX_TOC_LEVEL: u8 = 6;

/// What to do when an internal link cannot be resolved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrokenLinkPolicy {
    /// Drop the finding silently.
    Ignore,
    /// Record a warning and keep going.
    #[serde(alias = "log")]
    Warn,
    /// Abort the build.
    #[default]
    #[serde(alias = "throw")]
    Fail,
}

impl FromStr for BrokenLinkPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ignore" => Ok(Self::Ignore),
            "warn" | "log" => Ok(Self::Warn),
            "fail" | "throw" => Ok(Self::Fail),
            other => Err(ConfigError::Validation(format!(
                "unknown broken-link policy '{other}' (expected ignore, warn or fail)"
            ))),
        }
    }
}

/// Kind of content a source tree holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Docs,
    Blog,
    Pages,
}

impl ContentKind {
    /// Name used in config sections and error messages.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Docs => "docs",
            Self::Blog => "blog",
            Self::Pages => "pages",
        }
    }

    fn default_path(self) -> &'static str {
        match self {
            Self::Docs => "docs",
            Self::Blog => "blog",
            Self::Pages => "src/pages",
        }
    }

    fn default_route_base(self) -> &'static str {
        match self {
            Self::Docs => "docs",
            Self::Blog => "blog",
            Self::Pages => "",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Blog feed formats to produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedType {
    Rss,
    Atom,
    Json,
    All,
}

/// Table of contents heading bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TocConfig {
    pub min_heading_level: u8,
    pub max_heading_level: u8,
}

impl Default for TocConfig {
    fn default() -> Self {
        Self {
            min_heading_level: 2,
            max_heading_level: 3,
        }
    }
}

impl TocConfig {
    /// Check the bounds are inside `2..=6` and ordered.
    pub fn validate(&self, field: &str) -> Result<(), ConfigError> {
        let (min, max) = (self.min_heading_level, self.max_heading_level);
        for (name, level) in [("min_heading_level", min), ("max_heading_level", max)] {
            if !(MIN_TOC_LEVEL..=MAX_TOC_LEVEL).contains(&level) {
                return Err(ConfigError::Validation(format!(
                    "{field}.{name} must be between {MIN_TOC_LEVEL} and {MAX_TOC_LEVEL}, got {level}"
                )));
            }
        }
        if min > max {
            return Err(ConfigError::Validation(format!(
                "{field}.min_heading_level ({min}) cannot exceed {field}.max_heading_level ({max})"
            )));
        }
        Ok(())
    }

    /// Whether a heading at `level` belongs in the table of contents.
    #[must_use]
    pub fn contains(&self, level: u8) -> bool {
        (self.min_heading_level..=self.max_heading_level).contains(&level)
    }
}

/// Raw content section as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ContentConfigRaw {
    path: Option<String>,
    route_base: Option<String>,
    edit_url: Option<String>,
    transforms: Option<Vec<String>>,
    sidebar_collapsed: Option<bool>,
    show_reading_time: Option<bool>,
    feed: Option<FeedType>,
}

/// Resolved content source configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentConfig {
    /// Which kind of content this source holds.
    pub kind: ContentKind,
    /// Content directory, relative to the site directory.
    pub path: PathBuf,
    /// Route segment documents are published under (empty for site root).
    pub route_base: String,
    /// Base URL for "edit this page" links.
    pub edit_url: Option<String>,
    /// Transform names, in the order they run.
    pub transforms: Vec<String>,
    /// Default collapse state for sidebar categories.
    pub sidebar_collapsed: bool,
    /// Compute reading time for blog posts.
    pub show_reading_time: bool,
    /// Feed formats for blog posts.
    pub feed: Option<FeedType>,
}

impl ContentConfig {
    fn resolve(kind: ContentKind, raw: &ContentConfigRaw) -> Self {
        Self {
            kind,
            path: PathBuf::from(raw.path.as_deref().unwrap_or(kind.default_path())),
            route_base: raw
                .route_base
                .as_deref()
                .unwrap_or(kind.default_route_base())
                .trim_matches('/')
                .to_owned(),
            edit_url: raw.edit_url.clone(),
            transforms: raw
                .transforms
                .clone()
                .unwrap_or_else(|| vec!["highlight".to_owned()]),
            sidebar_collapsed: raw.sidebar_collapsed.unwrap_or(true),
            show_reading_time: raw.show_reading_time.unwrap_or(false),
            feed: raw.feed,
        }
    }
}

/// Site configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site title.
    pub title: String,
    /// Short tagline.
    pub tagline: Option<String>,
    /// Production URL (scheme + host).
    pub url: Option<String>,
    /// Path the site is served under. Required; starts and ends with `/`.
    pub base_url: String,
    /// Favicon path.
    pub favicon: Option<String>,
    /// Whether permalinks end with `/`.
    pub trailing_slash: bool,
    /// Policy for unresolved route links.
    pub on_broken_links: BrokenLinkPolicy,
    /// Policy for unresolved links to markdown files.
    pub on_broken_markdown_links: BrokenLinkPolicy,
    /// Declared locales, in order.
    pub locales: Vec<Locale>,
    /// Table of contents bounds.
    pub toc: TocConfig,
    /// Theme tokens and stylesheets.
    pub theme: ThemeConfig,
    /// Navbar structure.
    pub navbar: NavbarConfig,
    /// Footer structure.
    pub footer: FooterConfig,

    docs: ContentConfigRaw,
    blog: Option<ContentConfigRaw>,
    pages: Option<ContentConfigRaw>,

    /// Resolved content sources (set after loading).
    #[serde(skip)]
    pub content: Vec<ContentConfig>,
    /// Directory content paths are relative to (set after loading).
    #[serde(skip)]
    pub site_dir: PathBuf,
    /// Whether drafts are loaded (CLI only).
    #[serde(skip)]
    pub include_drafts: bool,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            tagline: None,
            url: None,
            base_url: String::new(),
            favicon: None,
            trailing_slash: false,
            on_broken_links: BrokenLinkPolicy::Fail,
            on_broken_markdown_links: BrokenLinkPolicy::Warn,
            locales: Vec::new(),
            toc: TocConfig::default(),
            theme: ThemeConfig::default(),
            navbar: NavbarConfig::default(),
            footer: FooterConfig::default(),
            docs: ContentConfigRaw::default(),
            blog: None,
            pages: None,
            content: Vec::new(),
            site_dir: PathBuf::from("."),
            include_drafts: false,
            config_path: None,
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
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`docs.edit_url`").
        field: String,
        /// Error message (e.g., "${`EDIT_URL`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl SiteConfig {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `folio.toml` in current directory and parents.
    ///
    /// # Errors
    ///
    /// Returns error if no config file can be found, parsing fails, or the
    /// configuration is invalid. Unlike the content loader there is no usable
    /// default: `base_url` and `locales` are required.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let path = match config_path {
            Some(path) if !path.exists() => {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Some(path) => path.to_path_buf(),
            None => Self::discover_config()
                .ok_or_else(|| ConfigError::NotFound(PathBuf::from(CONFIG_FILENAME)))?,
        };

        let content = std::fs::read_to_string(&path)?;
        let config_dir = path.parent().unwrap_or(Path::new("."));
        let mut config = Self::parse(&content, config_dir)?;
        config.config_path = Some(path);

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Parse, expand, resolve and validate configuration from a TOML string.
    ///
    /// Relative content paths resolve against `config_dir`.
    pub fn parse(content: &str, config_dir: &Path) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;
        config.resolve(config_dir);
        config.validate()?;

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(site_dir) = &settings.site_dir {
            self.site_dir.clone_from(site_dir);
        }
        if let Some(include_drafts) = settings.include_drafts {
            self.include_drafts = include_drafts;
        }
        if let Some(policy) = settings.on_broken_links {
            self.on_broken_links = policy;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
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

    /// Resolve content sections against the config directory.
    fn resolve(&mut self, config_dir: &Path) {
        self.site_dir = config_dir.to_path_buf();

        let mut content = vec![ContentConfig::resolve(ContentKind::Docs, &self.docs)];
        if let Some(blog) = &self.blog {
            content.push(ContentConfig::resolve(ContentKind::Blog, blog));
        }
        if let Some(pages) = &self.pages {
            content.push(ContentConfig::resolve(ContentKind::Pages, pages));
        }
        self.content = content;
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_urls()?;
        self.validate_locales()?;
        self.toc.validate("toc")?;
        self.validate_content()?;
        self.validate_links()?;
        Ok(())
    }

    fn validate_urls(&self) -> Result<(), ConfigError> {
        if self.base_url.is_empty() {
            return Err(ConfigError::Validation("base_url is required".to_owned()));
        }
        if !self.base_url.starts_with('/') || !self.base_url.ends_with('/') {
            return Err(ConfigError::Validation(format!(
                "base_url must start and end with '/', got '{}'",
                self.base_url
            )));
        }
        if let Some(url) = &self.url {
            require_http_url(url, "url")?;
        }
        Ok(())
    }

    fn validate_locales(&self) -> Result<(), ConfigError> {
        if self.locales.is_empty() {
            return Err(ConfigError::Validation(
                "at least one locale is required in [[locales]]".to_owned(),
            ));
        }

        let mut seen = std::collections::HashSet::new();
        for locale in &self.locales {
            require_non_empty(&locale.tag, "locales.tag")?;
            if !seen.insert(locale.tag.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "locale '{}' is declared more than once",
                    locale.tag
                )));
            }
        }

        let defaults: Vec<&str> = self
            .locales
            .iter()
            .filter(|l| l.default)
            .map(|l| l.tag.as_str())
            .collect();
        match defaults.as_slice() {
            [_] => Ok(()),
            [] => Err(ConfigError::Validation(
                "exactly one locale must be marked default, found none".to_owned(),
            )),
            many => Err(ConfigError::Validation(format!(
                "exactly one locale must be marked default, found {}: {}",
                many.len(),
                many.join(", ")
            ))),
        }
    }

    fn validate_content(&self) -> Result<(), ConfigError> {
        for content in &self.content {
            if let Some(edit_url) = &content.edit_url {
                require_http_url(edit_url, &format!("{}.edit_url", content.kind))?;
            }
            for name in &content.transforms {
                require_non_empty(name, &format!("{}.transforms", content.kind))?;
            }
        }
        Ok(())
    }

    fn validate_links(&self) -> Result<(), ConfigError> {
        for (i, item) in self.navbar.items.iter().enumerate() {
            if item.kind == NavbarItemKind::Link {
                validate_link_item(&item.link, &format!("navbar.items[{i}]"))?;
            }
        }
        for column in &self.footer.columns {
            for (i, item) in column.items.iter().enumerate() {
                validate_link_item(item, &format!("footer.columns['{}'].items[{i}]", column.title))?;
            }
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.title = expand::expand_env(&self.title, "title")?;
        self.base_url = expand::expand_env(&self.base_url, "base_url")?;
        expand::expand_opt(&mut self.url, "url")?;

        expand::expand_opt(&mut self.docs.edit_url, "docs.edit_url")?;
        if let Some(ref mut blog) = self.blog {
            expand::expand_opt(&mut blog.edit_url, "blog.edit_url")?;
        }
        if let Some(ref mut pages) = self.pages {
            expand::expand_opt(&mut pages.edit_url, "pages.edit_url")?;
        }

        Ok(())
    }

    /// The default locale.
    ///
    /// # Panics
    ///
    /// Panics if called on a configuration that has not been validated.
    #[must_use]
    pub fn default_locale(&self) -> &Locale {
        self.locales
            .iter()
            .find(|l| l.default)
            .expect("validated config has a default locale")
    }

    /// Look up a declared locale by tag.
    #[must_use]
    pub fn locale(&self, tag: &str) -> Option<&Locale> {
        self.locales.iter().find(|l| l.tag == tag)
    }

    /// Resolved configuration for a content kind, if enabled.
    #[must_use]
    pub fn content(&self, kind: ContentKind) -> Option<&ContentConfig> {
        self.content.iter().find(|c| c.kind == kind)
    }

    /// Source directory of `content` for `locale`.
    ///
    /// The default locale reads `<site_dir>/<path>`; other locales read
    /// `<site_dir>/i18n/<tag>/<path>`.
    #[must_use]
    pub fn content_root(&self, content: &ContentConfig, locale: &Locale) -> PathBuf {
        if locale.default {
            self.site_dir.join(&content.path)
        } else {
            self.site_dir
                .join("i18n")
                .join(&locale.tag)
                .join(&content.path)
        }
    }

    /// URL prefix every route of `locale` starts with (e.g. `/` or `/de/`).
    #[must_use]
    pub fn locale_prefix(&self, locale: &Locale) -> String {
        if locale.default {
            self.base_url.clone()
        } else {
            format!("{}{}/", self.base_url, locale.tag)
        }
    }
}

fn validate_link_item(item: &LinkItem, field: &str) -> Result<(), ConfigError> {
    match (&item.label, &item.to, &item.href) {
        (None, _, _) => Err(ConfigError::Validation(format!(
            "{field} requires a label"
        ))),
        (Some(_), Some(_), Some(_)) | (Some(_), None, None) => Err(ConfigError::Validation(
            format!("{field} requires exactly one of 'to' or 'href'"),
        )),
        (Some(_), None, Some(href)) => require_http_url(href, &format!("{field}.href")),
        (Some(_), Some(to), None) => {
            if to.starts_with('/') {
                Ok(())
            } else {
                Err(ConfigError::Validation(format!(
                    "{field}.to must be a site-absolute path starting with '/'"
                )))
            }
        }
    }
}
