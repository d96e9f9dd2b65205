//! Build orchestration.
//!
//! A build runs in phases:
//! 1. Per locale, in parallel: scan every configured content kind, load
//!    documents in parallel and run the kind's transform pipeline.
//! 2. Barrier: every locale has finished loading.
//! 3. Per locale, in declaration order: build navigation and check links.
//! 4. Assemble the site tree.
//!
//! A missing content root, an invalid configuration or a broken link under
//! the `fail` policy aborts the build. Malformed documents and drafts are
//! skipped and listed in the [`BuildReport`].

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use folio_config::{BrokenLinkPolicy, ConfigError, ContentKind, Locale, SiteConfig};
use folio_content::{CategoryMeta, ContentLoader, Document};
use folio_nav::NavigationBuilder;
use folio_transform::Pipeline;
use rayon::prelude::*;

use crate::error::{BuildError, LinkError, LinkKind};
use crate::links::LinkChecker;
use crate::report::{BuildReport, SkipReason, SkippedFile};
use crate::site::{SiteTree, assemble};

/// Convert Duration to milliseconds as f64.
fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

/// Result of a successful build.
#[derive(Debug)]
pub struct SiteBuild {
    pub site: SiteTree,
    pub report: BuildReport,
}

/// Loaded content of one locale.
struct LocaleContent<'a> {
    locale: &'a Locale,
    documents: Vec<Document>,
    categories: Vec<CategoryMeta>,
    report: BuildReport,
}

/// Builds a [`SiteTree`] from the configured content.
///
/// # Thread Safety
///
/// Builds are serialized by an internal `Mutex<()>`: two builds never
/// interleave their assembly passes. Work inside one build runs on the
/// rayon thread pool.
pub struct SiteBuilder {
    config: Arc<SiteConfig>,
    loader: ContentLoader,
    /// Transform pipeline per content kind, resolved once.
    pipelines: BTreeMap<ContentKind, Pipeline>,
    /// Mutex for serializing builds.
    build_lock: Mutex<()>,
}

impl SiteBuilder {
    /// Create a builder, resolving each content kind's transform names.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for an unknown or repeated transform name.
    pub fn new(config: Arc<SiteConfig>) -> Result<Self, ConfigError> {
        let pipelines: BTreeMap<ContentKind, Pipeline> = config
            .content
            .iter()
            .map(|content| -> Result<_, ConfigError> {
                let pipeline = Pipeline::from_names(&content.transforms).map_err(|e| match e {
                    ConfigError::Validation(message) => {
                        ConfigError::Validation(format!("{}.transforms: {message}", content.kind))
                    }
                    other => other,
                })?;
                tracing::debug!(kind = %content.kind, pipeline = ?pipeline, "Resolved transforms");
                Ok((content.kind, pipeline))
            })
            .collect::<Result<_, _>>()?;

        Ok(Self {
            loader: ContentLoader::new(Arc::clone(&config)),
            config,
            pipelines,
            build_lock: Mutex::new(()),
        })
    }

    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Run a full build.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] with the first fatal cause.
    pub fn build(&self) -> Result<SiteBuild, BuildError> {
        let _guard = self.build_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let start = Instant::now();

        let loaded = self
            .config
            .locales
            .par_iter()
            .map(|locale| self.load_locale(locale))
            .collect::<Result<Vec<_>, _>>()?;
        let load_ms = elapsed_ms(start);

        let mut report = BuildReport::default();
        let mut navigations = Vec::with_capacity(loaded.len());
        let mut documents = Vec::new();

        for content in loaded {
            let sidebar_collapsed = self
                .config
                .content(ContentKind::Docs)
                .is_some_and(|docs| docs.sidebar_collapsed);
            let navigation = NavigationBuilder::new(&content.locale.tag)
                .with_sidebar_collapsed(sidebar_collapsed)
                .with_categories(&content.categories)
                .build(&content.documents);

            let broken = LinkChecker::new(&self.config, content.locale, &content.documents)
                .check(&content.documents);
            self.apply_link_policy(broken, &mut report)?;

            report.merge(content.report);
            navigations.push(navigation);
            documents.extend(content.documents);
        }
        report.sort();

        let site = assemble(&self.config, navigations, documents)?;

        tracing::info!(
            locales = site.locales.len(),
            documents = report.documents,
            skipped = report.skipped.len(),
            warnings = report.warnings.len(),
            load_ms,
            elapsed_ms = elapsed_ms(start),
            "Site built"
        );

        Ok(SiteBuild { site, report })
    }

    fn load_locale<'a>(&self, locale: &'a Locale) -> Result<LocaleContent<'a>, BuildError> {
        let mut content = LocaleContent {
            locale,
            documents: Vec::new(),
            categories: Vec::new(),
            report: BuildReport::default(),
        };

        for source in &self.config.content {
            let scan = self.loader.scan(source.kind, locale)?;
            let results: Vec<_> = scan.refs().par_iter().map(|doc_ref| scan.load(doc_ref)).collect();

            let mut documents = Vec::with_capacity(results.len());
            for result in results {
                match result {
                    Ok(document) if document.is_draft() && !self.config.include_drafts => {
                        tracing::debug!(document = %document.id, "Skipping draft");
                        content.report.skipped.push(SkippedFile {
                            locale: locale.tag.clone(),
                            path: scan.root().join(&document.id.path),
                            reason: SkipReason::Draft,
                        });
                    }
                    Ok(document) => documents.push(document),
                    Err(err) => {
                        tracing::warn!(path = %err.path.display(), error = %err.message, "Skipping document");
                        content.report.skipped.push(err.into());
                    }
                }
            }

            if source.kind == ContentKind::Docs {
                for category in scan.categories() {
                    match category {
                        Ok(meta) => content.categories.push(meta),
                        Err(err) => {
                            tracing::warn!(path = %err.path.display(), error = %err.message, "Skipping category sidecar");
                            content.report.skipped.push(err.into());
                        }
                    }
                }
            }

            if let Some(pipeline) = self.pipelines.get(&source.kind) {
                let changes = pipeline.apply_all(&mut documents);
                tracing::debug!(kind = %source.kind, locale = %locale.tag, changes, "Transformed documents");
            }
            content.documents.extend(documents);
        }

        content.report.documents = content.documents.len();
        Ok(content)
    }

    /// Drop, record or raise broken links per the configured policies.
    fn apply_link_policy(&self, broken: Vec<LinkError>, report: &mut BuildReport) -> Result<(), LinkError> {
        for error in broken {
            let policy = match error.kind {
                LinkKind::Markdown => self.config.on_broken_markdown_links,
                LinkKind::Route => self.config.on_broken_links,
            };
            match policy {
                BrokenLinkPolicy::Ignore => {
                    tracing::debug!(link = %error.target, location = %error.location, "Ignoring broken link");
                }
                BrokenLinkPolicy::Warn => {
                    tracing::warn!(
                        locale = %error.locale,
                        location = %error.location,
                        link = %error.target,
                        "Broken link"
                    );
                    report.warnings.push(error);
                }
                BrokenLinkPolicy::Fail => return Err(error),
            }
        }
        Ok(())
    }
}
