//! The unused-symbol decision engine.
//!
//! One `check` call runs two sequential phases over a freshly loaded
//! program model. Construction builds the definition table (symbol →
//! used flag) and the interface contract set; filtering applies the
//! amnesty rules and emits whatever is left. The table lives in an
//! analysis context owned by the single run; its used flags only ever
//! flip false→true.

use std::collections::HashMap;
use tracing::debug;

use crate::model::{
    syntax::{self, CompositeLit, LitTypeRef, SyntaxNode},
    ProgramModel, Symbol, SymbolId, SymbolKind, Type, TypeId,
};
use crate::provider::{CheckError, LoadOptions, ModelProvider};

use super::{ContractSet, Mode};

/// Names that mark a symbol as a test entry point when it is declared in a
/// test file
const TEST_ENTRY_PREFIXES: [&str; 4] = ["Test", "Benchmark", "Example", "Fuzz"];

/// Analyzer for finding defined-but-never-referenced symbols
#[derive(Debug, Clone)]
pub struct Checker {
    mode: Mode,
    verbose: bool,
}

/// Working state of one analysis run, passed by reference through both
/// phases and dropped with the run
#[derive(Default)]
struct AnalysisContext {
    defs: HashMap<SymbolId, bool>,
    contracts: ContractSet,
}

impl Checker {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            verbose: false,
        }
    }

    /// Surface front-end diagnostics instead of swallowing them
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Resolve, load, and analyze the given packages (test variants
    /// included), returning every symbol judged unused.
    ///
    /// Fails with [`CheckError::Resolution`] when a package cannot be
    /// located and [`CheckError::Load`] when loading the resolved set
    /// fails; there is no partial result.
    pub fn check<P: ModelProvider>(
        &self,
        provider: &mut P,
        identifiers: &[String],
    ) -> Result<Vec<Symbol>, CheckError> {
        let ids = provider.resolve_packages(identifiers)?;
        let opts = LoadOptions {
            include_test_variants: true,
            suppress_diagnostics: !self.verbose,
        };
        let model = provider.load(&ids, opts)?;

        let mut ctx = AnalysisContext::default();
        self.collect(&model, &mut ctx);
        Ok(self.filter(&model, &ctx))
    }

    /// Construction phase: populate the definition table, then mutate it
    /// with usages and positional-literal field liveness.
    fn collect(&self, model: &ProgramModel, ctx: &mut AnalysisContext) {
        // Definitions for every package go in before any usage is
        // processed, so a cross-package reference can never be lost to
        // package order and used flags stay monotonic.
        for pkg in model.packages() {
            for def in &pkg.defs {
                let Some(id) = def else { continue };
                let sym = model.symbol(*id);

                if matches!(
                    sym.kind,
                    SymbolKind::Variable | SymbolKind::Field | SymbolKind::TypeName
                ) {
                    if let Type::Interface { methods } = model.underlying(sym.ty) {
                        ctx.contracts.record(methods);
                    }
                }

                // Local variables and parameters are out of scope.
                if sym.kind == SymbolKind::Variable && !sym.pkg_scope {
                    continue;
                }
                // An imported package name, not a symbol from it.
                if sym.kind == SymbolKind::Package {
                    continue;
                }

                ctx.defs.entry(*id).or_insert(false);
            }
        }

        debug!(
            "collected {} definitions, {} interface contracts",
            ctx.defs.len(),
            ctx.contracts.len()
        );

        let defs = &mut ctx.defs;
        for pkg in model.packages() {
            for id in &pkg.uses {
                // Usages of symbols outside the table (locals, imports
                // from unanalyzed packages) are no-ops.
                if let Some(used) = defs.get_mut(id) {
                    *used = true;
                }
            }

            for file in &pkg.files {
                syntax::walk(&file.nodes, &mut |node| {
                    if let SyntaxNode::CompositeLit(lit) = node {
                        mark_positional_literal(model, lit, defs);
                    }
                });
            }
        }
    }

    /// Filtering phase: apply the amnesty rules and collect the rest
    fn filter(&self, model: &ProgramModel, ctx: &AnalysisContext) -> Vec<Symbol> {
        let mut unused = Vec::new();

        for (&id, &used) in &ctx.defs {
            let sym = model.symbol(id);

            // Predeclared/universe symbols belong to no package.
            if sym.package.is_none() {
                continue;
            }
            if !self.mode.selects(sym.kind) {
                continue;
            }
            if used {
                continue;
            }
            // Explicitly marked as intentionally ignored by the author.
            if sym.is_discard() {
                continue;
            }
            if is_exported_api(sym) {
                continue;
            }
            if is_program_entry(model, sym) {
                continue;
            }
            // Invoked implicitly by the runtime, never referenced by name.
            if sym.kind == SymbolKind::Function && sym.name == "init" {
                continue;
            }
            if sym.kind == SymbolKind::Method {
                if let Some(receiver) = sym.receiver {
                    if ctx.contracts.grants_amnesty(model, receiver, &sym.name) {
                        continue;
                    }
                }
            }

            debug!("unused: {}", sym.display());
            unused.push(sym.clone());
        }

        // Sort by file and location for consistent output
        unused.sort_by(|a, b| {
            let file_cmp = a.location.file.cmp(&b.location.file);
            if file_cmp != std::cmp::Ordering::Equal {
                return file_cmp;
            }
            let line_cmp = a.location.line.cmp(&b.location.line);
            if line_cmp != std::cmp::Ordering::Equal {
                return line_cmp;
            }
            a.name.cmp(&b.name)
        });

        unused
    }
}

impl Default for Checker {
    fn default() -> Self {
        Self::new(Mode::all())
    }
}

/// Mark every field of a positionally constructed struct literal as used.
///
/// A positional literal depends on the full, ordered field list even
/// though no per-field usage entry exists; keyed literals already produce
/// explicit usage entries and are exempt.
fn mark_positional_literal(
    model: &ProgramModel,
    lit: &CompositeLit,
    defs: &mut HashMap<SymbolId, bool>,
) {
    let ty = match &lit.type_ref {
        LitTypeRef::StructShape(ty) => *ty,
        LitTypeRef::Ident(sym) => {
            let sym = model.symbol(*sym);
            match model.ty(sym.ty) {
                Type::Named { .. } => sym.ty,
                _ => return,
            }
        }
        LitTypeRef::Other => return,
    };

    let Type::Struct { fields } = model.underlying(ty) else {
        return;
    };

    if !lit.elements.iter().any(|e| !e.keyed) {
        return;
    }

    for field in fields {
        if let Some(used) = defs.get_mut(field) {
            *used = true;
        }
    }
}

/// Exported API surface is assumed reachable from outside the analyzed
/// packages — unless it is declared only in a test file under a name no
/// test runner recognizes.
fn is_exported_api(sym: &Symbol) -> bool {
    if !sym.is_exported() {
        return false;
    }
    if !(sym.pkg_scope || matches!(sym.kind, SymbolKind::Method | SymbolKind::Field)) {
        return false;
    }
    !sym.location.is_test_file() || has_test_entry_prefix(&sym.name)
}

fn has_test_entry_prefix(name: &str) -> bool {
    TEST_ENTRY_PREFIXES
        .iter()
        .any(|prefix| name.starts_with(prefix))
}

/// The program entry point: a package-scope, receiverless `main` in a
/// package itself named `main`
fn is_program_entry(model: &ProgramModel, sym: &Symbol) -> bool {
    if sym.kind != SymbolKind::Function || sym.name != "main" || !sym.pkg_scope {
        return false;
    }
    sym.package
        .as_ref()
        .and_then(|id| model.package(id))
        .map(|pkg| pkg.name == "main")
        .unwrap_or(false)
}
