//! Provider over on-disk fact exports.
//!
//! A front-end exporter dumps one whole-program model per run as a
//! `*.facts.json` file. This provider scans a fact root directory for
//! exports, indexes the package ids they provide, and serves resolution
//! and loading against that index.

use ignore::WalkBuilder;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

use crate::model::{is_fact_file, PackageId, ProgramModel};

use super::{surface_diagnostics, CheckError, LoadOptions, ModelProvider};

/// Resolves and loads packages from a directory of fact exports
#[derive(Debug)]
pub struct FileModelProvider {
    /// Resolution root; canonical ids are matched against exports found here
    root: PathBuf,

    /// Parsed exports, built on first use
    index: Option<Vec<Export>>,
}

#[derive(Debug)]
struct Export {
    path: PathBuf,
    model: ProgramModel,
}

impl FileModelProvider {
    /// Create a provider rooted at `root` (typically the working directory)
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            index: None,
        }
    }

    fn index(&mut self) -> Result<&[Export], CheckError> {
        if self.index.is_none() {
            self.index = Some(scan_exports(&self.root)?);
        }
        match &self.index {
            Some(exports) => Ok(exports),
            None => Err(CheckError::load("fact index unavailable")),
        }
    }
}

impl ModelProvider for FileModelProvider {
    fn resolve_packages(&mut self, identifiers: &[String]) -> Result<Vec<PackageId>, CheckError> {
        let exports = self.index()?;
        let known: Vec<PackageId> = exports
            .iter()
            .flat_map(|e| e.model.package_ids())
            .collect();

        identifiers
            .iter()
            .map(|ident| resolve_one(ident, &known))
            .collect()
    }

    fn load(&mut self, ids: &[PackageId], opts: LoadOptions) -> Result<ProgramModel, CheckError> {
        let exports = self.index()?;

        // Exports are whole-program dumps, so one of them must cover the
        // full request; arenas from different exports are not miscible.
        let export = exports
            .iter()
            .find(|e| {
                let provided = e.model.package_ids();
                ids.iter().all(|id| provided.contains(id))
            })
            .ok_or_else(|| {
                CheckError::load(format!(
                    "no single fact export provides all of: {}",
                    ids.iter()
                        .map(|id| id.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                ))
            })?;

        debug!(
            "loading {} packages from {}",
            ids.len(),
            export.path.display()
        );

        let mut model = export.model.clone();
        model.retain_packages(ids, opts.include_test_variants);
        surface_diagnostics(&model, opts);
        Ok(model)
    }
}

/// Walk the fact root and parse every export found
fn scan_exports(root: &Path) -> Result<Vec<Export>, CheckError> {
    let mut paths = Vec::new();
    for entry in WalkBuilder::new(root).build() {
        let entry = entry.map_err(|e| CheckError::load(format!("walking {}: {}", root.display(), e)))?;
        let path = entry.path();
        if path.is_file() && is_fact_file(path) {
            trace!("found fact export: {}", path.display());
            paths.push(path.to_path_buf());
        }
    }

    debug!("parsing {} fact exports under {}", paths.len(), root.display());

    paths
        .par_iter()
        .map(|path| {
            let contents = std::fs::read_to_string(path)
                .map_err(|e| CheckError::load(format!("reading {}: {}", path.display(), e)))?;
            let model: ProgramModel = serde_json::from_str(&contents)
                .map_err(|e| CheckError::load(format!("parsing {}: {}", path.display(), e)))?;
            Ok(Export {
                path: path.clone(),
                model,
            })
        })
        .collect()
}

/// Map one identifier to a canonical package id
///
/// Accepts a canonical import path directly, or a `./`-style relative
/// identifier matched against the tail of known import paths.
fn resolve_one(ident: &str, known: &[PackageId]) -> Result<PackageId, CheckError> {
    let trimmed = ident.trim_start_matches("./").trim_end_matches('/');

    if let Some(id) = known.iter().find(|id| id.as_str() == trimmed) {
        return Ok(id.clone());
    }

    if ident.starts_with("./") {
        let suffix = format!("/{}", trimmed);
        let mut matches = known.iter().filter(|id| id.as_str().ends_with(&suffix));
        match (matches.next(), matches.next()) {
            (Some(id), None) => return Ok(id.clone()),
            (Some(_), Some(_)) => {
                return Err(CheckError::resolution(ident, "ambiguous relative path"))
            }
            (None, _) => {}
        }
    }

    Err(CheckError::resolution(
        ident,
        "no fact export provides this package",
    ))
}
