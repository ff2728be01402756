use colored::Colorize;
use miette::Result;
use std::collections::HashMap;
use std::path::PathBuf;

use crate::model::{Symbol, SymbolKind};

/// Terminal reporter with colored output
pub struct TerminalReporter;

impl TerminalReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn report(&self, unused: &[Symbol]) -> Result<()> {
        if unused.is_empty() {
            println!("{}", "No unused symbols found!".green().bold());
            return Ok(());
        }

        // Group by file
        let mut by_file: HashMap<PathBuf, Vec<&Symbol>> = HashMap::new();
        for sym in unused {
            by_file
                .entry(sym.location.file.clone())
                .or_default()
                .push(sym);
        }

        println!();
        println!(
            "{}",
            format!("Found {} unused symbols:", unused.len())
                .yellow()
                .bold()
        );
        println!();

        let mut files: Vec<_> = by_file.keys().collect();
        files.sort();

        for file in files {
            println!("{}", file.display().to_string().cyan().bold());

            for sym in &by_file[file] {
                println!(
                    "  {}:{} {} {}",
                    sym.location.line,
                    sym.location.column,
                    sym.kind.display_name().magenta(),
                    sym.name.bold()
                );
            }

            println!();
        }

        self.print_summary(unused);

        Ok(())
    }

    fn print_summary(&self, unused: &[Symbol]) {
        let mut by_kind: HashMap<SymbolKind, usize> = HashMap::new();
        for sym in unused {
            *by_kind.entry(sym.kind).or_insert(0) += 1;
        }

        let mut kinds: Vec<_> = by_kind.into_iter().collect();
        kinds.sort_by_key(|(kind, _)| kind.display_name());

        let summary = kinds
            .iter()
            .map(|(kind, count)| format!("{} {}", count, kind.display_name()))
            .collect::<Vec<_>>()
            .join(", ");

        println!("{}", format!("Summary: {}", summary).dimmed());
    }
}

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new()
    }
}
