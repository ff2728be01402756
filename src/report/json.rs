use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::PathBuf;

use crate::model::Symbol;

/// JSON reporter for programmatic output
pub struct JsonReporter {
    output_path: Option<PathBuf>,
}

impl JsonReporter {
    pub fn new(output_path: Option<PathBuf>) -> Self {
        Self { output_path }
    }

    pub fn report(&self, unused: &[Symbol]) -> Result<()> {
        let report = JsonReport::from_symbols(unused);
        let json = serde_json::to_string_pretty(&report).into_diagnostic()?;

        if let Some(path) = &self.output_path {
            std::fs::write(path, &json).into_diagnostic()?;
            println!("Report written to: {}", path.display());
        } else {
            println!("{}", json);
        }

        Ok(())
    }
}

#[derive(Serialize)]
struct JsonReport {
    version: &'static str,
    total: usize,
    unused: Vec<JsonSymbol>,
}

#[derive(Serialize)]
struct JsonSymbol {
    name: String,
    kind: &'static str,
    package: Option<String>,
    file: String,
    line: usize,
    column: usize,
}

impl JsonReport {
    fn from_symbols(unused: &[Symbol]) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            total: unused.len(),
            unused: unused
                .iter()
                .map(|sym| JsonSymbol {
                    name: sym.name.clone(),
                    kind: sym.kind.display_name(),
                    package: sym.package.as_ref().map(|p| p.to_string()),
                    file: sym.location.file.display().to_string(),
                    line: sym.location.line,
                    column: sym.location.column,
                })
                .collect(),
        }
    }
}
