//! `folio check` command implementation.

use clap::Args;

use super::{SiteArgs, print_report};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args, Debug)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    pub(crate) site: SiteArgs,
}

impl CheckArgs {
    /// Run the full pipeline without writing output.
    pub(crate) fn execute(&self) -> Result<(), CliError> {
        let output = Output::new();
        let (_, build) = self.site.build_site(&output)?;

        print_report(&output, &build.report);
        if build.report.is_clean() {
            output.success("No problems found");
        }
        Ok(())
    }
}
