//! `folio build` command implementation.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use super::{SiteArgs, print_report};
use crate::error::CliError;
use crate::output::Output;

/// File the site tree is written to inside the output directory.
const SITE_FILENAME: &str = "site.json";

/// Arguments for the build command.
#[derive(Args, Debug)]
pub(crate) struct BuildArgs {
    #[command(flatten)]
    pub(crate) site: SiteArgs,

    /// Output directory (default: build/ under the site directory).
    #[arg(short, long)]
    pub(crate) output: Option<PathBuf>,
}

impl BuildArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let (config, build) = self.site.build_site(&output)?;

        let output_dir = self.output.unwrap_or_else(|| config.site_dir.join("build"));
        fs::create_dir_all(&output_dir)?;
        let path = output_dir.join(SITE_FILENAME);
        let json = serde_json::to_vec_pretty(&build.site)?;
        fs::write(&path, &json)?;
        tracing::debug!(path = %path.display(), bytes = json.len(), "Wrote site tree");

        print_report(&output, &build.report);
        output.success(&format!("Site written to {}", path.display()));
        Ok(())
    }
}
