//! CLI command implementations.

mod build;
mod check;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use folio_config::{BrokenLinkPolicy, CliSettings, SiteConfig};
use folio_site::{BuildReport, SiteBuild, SiteBuilder};

use crate::error::CliError;
use crate::output::Output;

pub(crate) use build::BuildArgs;
pub(crate) use check::CheckArgs;

/// Options shared by every command that builds the site.
#[derive(Args, Debug)]
pub(crate) struct SiteArgs {
    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long, env = "FOLIO_CONFIG")]
    pub(crate) config: Option<PathBuf>,

    /// Site directory content paths are resolved against (overrides config).
    #[arg(long)]
    pub(crate) site_dir: Option<PathBuf>,

    /// Include documents marked as drafts.
    #[arg(long)]
    pub(crate) drafts: bool,

    /// Broken link policy: ignore, warn or fail (overrides config).
    #[arg(long)]
    pub(crate) on_broken_links: Option<BrokenLinkPolicy>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl SiteArgs {
    /// Load configuration and run a full build.
    fn build_site(&self, output: &Output) -> Result<(Arc<SiteConfig>, SiteBuild), CliError> {
        let cli_settings = CliSettings {
            site_dir: self.site_dir.clone(),
            include_drafts: self.drafts.then_some(true),
            on_broken_links: self.on_broken_links,
        };
        let config = Arc::new(SiteConfig::load(self.config.as_deref(), Some(&cli_settings))?);

        if let Some(path) = &config.config_path {
            output.info(&format!("Config: {}", path.display()));
        }
        output.info(&format!("Site: {}", config.site_dir.display()));

        let build = SiteBuilder::new(Arc::clone(&config))?.build()?;
        Ok((config, build))
    }
}

/// Print skipped files, warnings and a summary line.
pub(crate) fn print_report(output: &Output, report: &BuildReport) {
    if !report.skipped.is_empty() {
        output.heading("Skipped:");
        for skipped in &report.skipped {
            output.warning(&format!("  {skipped}"));
        }
    }
    if !report.warnings.is_empty() {
        output.heading("Warnings:");
        for warning in &report.warnings {
            output.warning(&format!("  {warning}"));
        }
    }
    output.info(&summary(report));
}

fn summary(report: &BuildReport) -> String {
    format!(
        "{} documents, {} skipped, {} warnings",
        report.documents,
        report.skipped.len(),
        report.warnings.len()
    )
}
