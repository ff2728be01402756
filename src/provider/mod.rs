//! The program-model-provider boundary.
//!
//! Parsing, name binding, and type inference live behind this seam. A
//! provider resolves caller-supplied package identifiers to canonical ids
//! and produces a fully resolved, immutable [`ProgramModel`]; the analyzer
//! never looks at source text.

mod file;

pub use file::FileModelProvider;

use thiserror::Error;
use tracing::warn;

use crate::model::{PackageId, ProgramModel};

/// Typed errors for a whole analysis run
///
/// Both kinds are fatal: there is no partial result, and callers retry by
/// calling `check` again.
#[derive(Debug, Error)]
pub enum CheckError {
    /// A requested package cannot be located
    #[error("can't load package {package:?}: {reason}")]
    Resolution { package: String, reason: String },

    /// Loading the resolved package set failed outright
    #[error("failed to load program model: {message}")]
    Load { message: String },
}

impl CheckError {
    pub fn resolution(package: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Resolution {
            package: package.into(),
            reason: reason.into(),
        }
    }

    pub fn load(message: impl Into<String>) -> Self {
        Self::Load {
            message: message.into(),
        }
    }
}

/// Options for [`ModelProvider::load`]
#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
    /// Also load the test-augmented variants of the requested packages
    pub include_test_variants: bool,

    /// Swallow recorded front-end diagnostics instead of surfacing them.
    /// A verbosity toggle: the returned model is the same either way.
    pub suppress_diagnostics: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            include_test_variants: true,
            suppress_diagnostics: true,
        }
    }
}

/// A compiler front-end collaborator, seen through its exported facts
pub trait ModelProvider {
    /// Map caller-given package identifiers to canonical, unambiguous ids
    fn resolve_packages(&mut self, identifiers: &[String]) -> Result<Vec<PackageId>, CheckError>;

    /// Produce the resolved program model for the requested packages
    fn load(&mut self, ids: &[PackageId], opts: LoadOptions) -> Result<ProgramModel, CheckError>;
}

/// Provider over a prebuilt in-memory model
///
/// Used by embedders that construct models with
/// [`ModelBuilder`](crate::model::ModelBuilder), and by the test suite.
#[derive(Debug, Clone)]
pub struct StaticModelProvider {
    model: ProgramModel,
}

impl StaticModelProvider {
    pub fn new(model: ProgramModel) -> Self {
        Self { model }
    }
}

impl ModelProvider for StaticModelProvider {
    fn resolve_packages(&mut self, identifiers: &[String]) -> Result<Vec<PackageId>, CheckError> {
        identifiers
            .iter()
            .map(|ident| {
                let id = PackageId::new(ident.clone());
                if self.model.package(&id).is_some() {
                    Ok(id)
                } else {
                    Err(CheckError::resolution(ident, "not present in model"))
                }
            })
            .collect()
    }

    fn load(&mut self, ids: &[PackageId], opts: LoadOptions) -> Result<ProgramModel, CheckError> {
        let mut model = self.model.clone();
        model.retain_packages(ids, opts.include_test_variants);
        surface_diagnostics(&model, opts);
        Ok(model)
    }
}

/// Log recorded front-end diagnostics unless suppressed
pub(crate) fn surface_diagnostics(model: &ProgramModel, opts: LoadOptions) {
    if opts.suppress_diagnostics {
        return;
    }
    for pkg in model.packages() {
        for diag in &pkg.diagnostics {
            warn!("{}: {}", pkg.id, diag);
        }
    }
}
