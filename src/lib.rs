//! unusedsym - Unused-symbol detection for type-checked Go packages
//!
//! This library reports package-scope constants, variables, functions,
//! methods, type names, and struct fields that are defined but never
//! referenced anywhere in the analyzed program, tests included.
//!
//! # Architecture
//!
//! The analysis pipeline consists of:
//! 1. **Resolution** - Map package identifiers to canonical import paths
//! 2. **Loading** - Read the front-end's exported, type-resolved program model
//! 3. **Construction** - Build the definition table and interface contracts
//! 4. **Filtering** - Apply the amnesty rules and collect what remains
//! 5. **Reporting** - Output results in various formats
//!
//! Parsing and type checking are never done here: a compiler front-end
//! exports its resolved facts, and the analyzer consumes them through the
//! [`provider::ModelProvider`] seam.

pub mod analysis;
pub mod config;
pub mod model;
pub mod provider;
pub mod report;

pub use analysis::{Checker, Mode};
pub use config::Config;
pub use model::{Location, ModelBuilder, ProgramModel, Symbol, SymbolKind};
pub use provider::{CheckError, FileModelProvider, LoadOptions, ModelProvider, StaticModelProvider};
pub use report::{ReportFormat, Reporter};
