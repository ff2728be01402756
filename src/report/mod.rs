mod json;
mod terminal;

pub use json::JsonReporter;
pub use terminal::TerminalReporter;

use miette::Result;
use std::path::PathBuf;

use crate::model::Symbol;

/// Output format for reports
#[derive(Debug, Clone, Default)]
pub enum ReportFormat {
    #[default]
    Terminal,
    Json,
}

/// Reporter for outputting unused-symbol findings
pub struct Reporter {
    format: ReportFormat,
    output_path: Option<PathBuf>,
}

impl Reporter {
    pub fn new(format: ReportFormat, output_path: Option<PathBuf>) -> Self {
        Self {
            format,
            output_path,
        }
    }

    /// Report the unused symbols
    pub fn report(&self, unused: &[Symbol]) -> Result<()> {
        match &self.format {
            ReportFormat::Terminal => {
                let reporter = TerminalReporter::new();
                reporter.report(unused)
            }
            ReportFormat::Json => {
                let reporter = JsonReporter::new(self.output_path.clone());
                reporter.report(unused)
            }
        }
    }
}
