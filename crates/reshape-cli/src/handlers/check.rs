//! Check command handler

use super::utils;
use crate::cli::CheckArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::{OutputWriter, SpecSummary};

/// Handle the check command
pub fn handle_check(args: CheckArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let loaded = utils::load_spec(args.spec.as_deref(), args.transform.as_deref(), config)?;
    let stats = loaded.spec.stats();
    tracing::info!(spec = %loaded.label, kind = loaded.spec.kind(), ?stats, "Spec loaded");

    let summary = SpecSummary {
        spec: loaded.label,
        kind: loaded.spec.kind().to_string(),
        stats,
        document: args.detailed.then(|| loaded.spec.to_document()),
    };
    output.spec_summary(&summary)
}
