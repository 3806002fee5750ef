//! Audit command handler.

use anyhow::{Context, Result};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::display_audit_report;

/// Run the site audit and print the findings.
///
/// With `strict` a report containing errors fails the command, so the audit
/// can gate a deploy.
pub async fn execute(ctx: &CliContext, json: bool, strict: bool) -> Result<()> {
    let report = ctx.app().audit().run().await?;

    if json {
        let rendered =
            serde_json::to_string_pretty(&report).context("Failed to serialize audit report")?;
        println!("{rendered}");
    } else {
        display_audit_report(&report);
    }

    if strict && report.has_errors() {
        return Err(CliError::Data(format!(
            "audit found {} error(s)",
            report.count(stell_core::Severity::Error)
        ))
        .into());
    }
    Ok(())
}
