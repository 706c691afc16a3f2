//! JSON report output

use crate::output::stats::BatchSummary;
use crate::output::traits::{OutputHandler, OutputResult};
use crate::report::ScrapingReport;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Document written by [`JsonOutputHandler`]
#[derive(Serialize)]
struct ReportDocument<'a> {
    summary: &'a BatchSummary,
    reports: &'a [ScrapingReport],
}

/// Writes `{ "summary": ..., "reports": [...] }` as pretty JSON to a file
#[derive(Debug, Clone)]
pub struct JsonOutputHandler {
    path: PathBuf,
}

impl JsonOutputHandler {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl OutputHandler for JsonOutputHandler {
    fn write_reports(&self, reports: &[ScrapingReport], summary: &BatchSummary) -> OutputResult<()> {
        let mut writer = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer_pretty(&mut writer, &ReportDocument { summary, reports })?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        tracing::info!("Wrote {} reports to {}", reports.len(), self.path.display());
        Ok(())
    }
}
