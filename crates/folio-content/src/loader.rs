//! Per-locale content discovery and loading.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use folio_config::{ContentConfig, ContentKind, Locale, SiteConfig};

use crate::category::{CategoryMeta, parse_category};
use crate::document::Document;
use crate::error::{NotFoundError, ParseError};
use crate::scanner::{DocumentRef, ScanResult, Scanner};

/// Discovers content sources for a locale.
///
/// Holds the shared site configuration; scanning never mutates it.
#[derive(Clone)]
pub struct ContentLoader {
    config: Arc<SiteConfig>,
}

impl ContentLoader {
    #[must_use]
    pub fn new(config: Arc<SiteConfig>) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Walk the content root of `kind` for `locale`.
    ///
    /// A non-default locale without its own translated root falls back to
    /// the default locale's root; documents keep the requested locale.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError`] if the kind is not configured or its root
    /// directory does not exist.
    pub fn scan(&self, kind: ContentKind, locale: &Locale) -> Result<Scan, NotFoundError> {
        let not_found = |path: PathBuf| NotFoundError {
            kind,
            locale: locale.tag.clone(),
            path,
        };

        let Some(content) = self.config.content(kind) else {
            return Err(not_found(self.config.site_dir.join(kind.as_str())));
        };

        let mut root = self.config.content_root(content, locale);
        if !root.is_dir() && !locale.default {
            let fallback = self
                .config
                .content_root(content, self.config.default_locale());
            tracing::info!(
                kind = %kind,
                locale = %locale.tag,
                missing = %root.display(),
                fallback = %fallback.display(),
                "No translated content root, using default locale content"
            );
            root = fallback;
        }
        if !root.is_dir() {
            return Err(not_found(root));
        }

        let result = Scanner::new(root.clone()).scan();
        tracing::debug!(
            kind = %kind,
            locale = %locale.tag,
            documents = result.documents.len(),
            categories = result.categories.len(),
            "Scanned content root"
        );

        Ok(Scan {
            config: Arc::clone(&self.config),
            content: content.clone(),
            locale: locale.clone(),
            root,
            result,
        })
    }
}

/// Files discovered under one content root, loaded on demand.
///
/// Nothing is read until [`Scan::load`] or [`Scan::documents`] is used, so
/// callers can load documents lazily or in parallel over [`Scan::refs`].
pub struct Scan {
    config: Arc<SiteConfig>,
    content: ContentConfig,
    locale: Locale,
    root: PathBuf,
    result: ScanResult,
}

impl Scan {
    /// Discovered markdown files, sorted by relative path.
    #[must_use]
    pub fn refs(&self) -> &[DocumentRef] {
        &self.result.documents
    }

    /// Content root that was walked.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn kind(&self) -> ContentKind {
        self.content.kind
    }

    #[must_use]
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Read and parse one discovered file.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if the file cannot be read or its front-matter
    /// is malformed.
    pub fn load(&self, doc_ref: &DocumentRef) -> Result<Document, ParseError> {
        let raw = fs::read_to_string(&doc_ref.abs_path).map_err(|e| {
            ParseError::new(&doc_ref.abs_path, &self.locale.tag, format!("Failed to read file: {e}"))
        })?;
        Document::from_source(
            &self.config,
            &self.content,
            &self.locale,
            &self.root,
            doc_ref,
            raw,
        )
        .map_err(|message| ParseError::new(&doc_ref.abs_path, &self.locale.tag, message))
    }

    /// Lazily load every discovered document in path order.
    pub fn documents(&self) -> impl Iterator<Item = Result<Document, ParseError>> + '_ {
        self.refs().iter().map(|doc_ref| self.load(doc_ref))
    }

    /// Lazily load every `_category_.yml` sidecar.
    pub fn categories(&self) -> impl Iterator<Item = Result<CategoryMeta, ParseError>> + '_ {
        self.result.categories.iter().map(|category| {
            fs::read_to_string(&category.abs_path)
                .map_err(|e| format!("Failed to read file: {e}"))
                .and_then(|content| parse_category(&content, &category.dir))
                .map_err(|message| ParseError::new(&category.abs_path, &self.locale.tag, message))
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const CONFIG: &str = r#"
base_url = "/"

[[locales]]
tag = "en"
default = true

[[locales]]
tag = "de"

[blog]
"#;

    fn setup() -> (tempfile::TempDir, ContentLoader) {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = SiteConfig::parse(CONFIG, temp_dir.path()).unwrap();
        (temp_dir, ContentLoader::new(Arc::new(config)))
    }

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_scan_missing_root_is_not_found() {
        let (temp_dir, loader) = setup();
        let locale = loader.config().default_locale().clone();

        let err = loader.scan(ContentKind::Docs, &locale).err().unwrap();

        assert_eq!(err.kind, ContentKind::Docs);
        assert_eq!(err.locale, "en");
        assert_eq!(err.path, temp_dir.path().join("docs"));
    }

    #[test]
    fn test_scan_unconfigured_kind_is_not_found() {
        let (_temp_dir, loader) = setup();
        let locale = loader.config().default_locale().clone();
        assert!(loader.scan(ContentKind::Pages, &locale).is_err());
    }

    #[test]
    fn test_documents_are_loaded_lazily_in_order() {
        let (temp_dir, loader) = setup();
        write(temp_dir.path(), "docs/b.md", "# Bee");
        write(temp_dir.path(), "docs/a.md", "# Ay");
        let locale = loader.config().default_locale().clone();

        let scan = loader.scan(ContentKind::Docs, &locale).unwrap();
        let titles: Vec<_> = scan.documents().map(|d| d.unwrap().title).collect();

        assert_eq!(titles, vec!["Ay", "Bee"]);
    }

    #[test]
    fn test_malformed_front_matter_is_per_document() {
        let (temp_dir, loader) = setup();
        write(temp_dir.path(), "docs/bad.md", "---\ntitle: [oops\n---\n");
        write(temp_dir.path(), "docs/good.md", "# Good");
        let locale = loader.config().default_locale().clone();

        let scan = loader.scan(ContentKind::Docs, &locale).unwrap();
        let results: Vec<_> = scan.documents().collect();

        assert_eq!(results.len(), 2);
        let err = results[0].as_ref().unwrap_err();
        assert!(err.path.ends_with("bad.md"));
        assert_eq!(err.locale, "en");
        assert_eq!(results[1].as_ref().unwrap().title, "Good");
    }

    #[test]
    fn test_translated_root_preferred() {
        let (temp_dir, loader) = setup();
        write(temp_dir.path(), "docs/intro.md", "# Intro");
        write(temp_dir.path(), "i18n/de/docs/intro.md", "# Einleitung");
        let de = loader.config().locale("de").unwrap().clone();

        let scan = loader.scan(ContentKind::Docs, &de).unwrap();
        let doc = scan.documents().next().unwrap().unwrap();

        assert_eq!(scan.root(), temp_dir.path().join("i18n/de/docs"));
        assert_eq!(doc.title, "Einleitung");
        assert_eq!(doc.permalink, "/de/docs/intro");
        assert_eq!(doc.id.locale, "de");
    }

    #[test]
    fn test_missing_translation_falls_back_to_default_root() {
        let (temp_dir, loader) = setup();
        write(temp_dir.path(), "docs/intro.md", "# Intro");
        let de = loader.config().locale("de").unwrap().clone();

        let scan = loader.scan(ContentKind::Docs, &de).unwrap();
        let doc = scan.documents().next().unwrap().unwrap();

        assert_eq!(scan.root(), temp_dir.path().join("docs"));
        assert_eq!(doc.permalink, "/de/docs/intro");
    }

    #[test]
    fn test_categories_loaded() {
        let (temp_dir, loader) = setup();
        write(temp_dir.path(), "docs/guide/_category_.yml", "label: Guides\nposition: 3");
        write(temp_dir.path(), "docs/api/_category_.yml", "label: [bad");
        let locale = loader.config().default_locale().clone();

        let scan = loader.scan(ContentKind::Docs, &locale).unwrap();
        let categories: Vec<_> = scan.categories().collect();

        assert_eq!(categories.len(), 2);
        assert!(categories[0].is_err());
        let guide = categories[1].as_ref().unwrap();
        assert_eq!(guide.dir, "guide");
        assert_eq!(guide.label.as_deref(), Some("Guides"));
    }
}
