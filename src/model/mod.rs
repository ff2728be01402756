//! Program model types produced by a front-end fact exporter.
//!
//! The analyzer never parses or type-checks source itself. A compiler
//! front-end runs over the target packages and exports its resolved facts:
//! symbol definitions, identifier usages, the type table, and the slice of
//! each syntax tree needed for composite-literal scanning. This module is
//! the in-memory form of that export.

mod builder;
pub mod syntax;

pub use builder::ModelBuilder;
pub use syntax::{CompositeLit, LitElement, LitTypeRef, SourceFile, SyntaxNode};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Index of a symbol in a model's symbol table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolId(pub u32);

/// Index of a type in a model's type table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeId(pub u32);

/// Canonical import path of a package
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageId(pub String);

impl PackageId {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PackageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Location in source code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// File path
    pub file: PathBuf,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

impl Location {
    pub fn new(file: PathBuf, line: usize, column: usize) -> Self {
        Self { file, line, column }
    }

    /// Whether the declaring file is a test file
    pub fn is_test_file(&self) -> bool {
        self.file
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.ends_with("_test.go"))
            .unwrap_or(false)
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file.display(), self.line, self.column)
    }
}

/// Kind of symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymbolKind {
    Constant,
    /// Package-scope or local variable (locals are dropped at collection)
    Variable,
    /// Struct field
    Field,
    /// Free function (no receiver)
    Function,
    /// Function with a receiver
    Method,
    /// Declared type name
    TypeName,
    /// An imported package name binding, not a symbol from that package
    Package,
}

impl SymbolKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            SymbolKind::Constant => "const",
            SymbolKind::Variable => "var",
            SymbolKind::Field => "field",
            SymbolKind::Function => "func",
            SymbolKind::Method => "method",
            SymbolKind::TypeName => "type",
            SymbolKind::Package => "package",
        }
    }
}

impl std::fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A named, type-resolved program entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    /// Declared name (e.g. "Write")
    pub name: String,

    /// Kind of symbol
    pub kind: SymbolKind,

    /// Owning package; `None` for predeclared/universe symbols
    pub package: Option<PackageId>,

    /// Declaring position
    pub location: Location,

    /// Declared type
    pub ty: TypeId,

    /// Receiver type, present iff this is a method
    pub receiver: Option<TypeId>,

    /// Whether the symbol is declared at package scope
    pub pkg_scope: bool,
}

impl Symbol {
    /// Export visibility is a naming convention: an uppercase first letter
    /// makes the symbol reachable from outside its package.
    pub fn is_exported(&self) -> bool {
        self.name
            .chars()
            .next()
            .map(|c| c.is_uppercase())
            .unwrap_or(false)
    }

    /// The conventional discard identifier, marked as intentionally unused
    pub fn is_discard(&self) -> bool {
        self.name == "_"
    }

    pub fn is_method(&self) -> bool {
        self.kind == SymbolKind::Method
    }

    /// Get a display string for this symbol
    pub fn display(&self) -> String {
        format!("{} {} ({})", self.kind.display_name(), self.name, self.location)
    }
}

/// A method name with its canonical signature
///
/// Signature strings are produced by the front-end after type checking, so
/// two methods match a contract slot iff their strings compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodSig {
    pub name: String,
    pub signature: String,
}

impl MethodSig {
    pub fn new(name: impl Into<String>, signature: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            signature: signature.into(),
        }
    }
}

/// A resolved type, reduced to the shapes the analysis inspects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Type {
    /// A declared type with its underlying shape and full method set
    Named {
        name: String,
        underlying: TypeId,
        methods: Vec<MethodSig>,
    },
    /// A struct shape; field symbols in declaration order
    Struct { fields: Vec<SymbolId> },
    /// An interface shape
    Interface { methods: Vec<MethodSig> },
    /// Anything else (basic, slice, func, ...) - never inspected
    Opaque,
}

/// One analyzed package, possibly a test variant of another
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Package {
    /// Canonical import path
    pub id: PackageId,

    /// Package name (the clause name, e.g. "main")
    pub name: String,

    /// Set when this entry is the test-augmented variant of another package
    #[serde(default)]
    pub test_variant_of: Option<PackageId>,

    /// Resolved definitions; `None` is a syntax position with no
    /// resolvable symbol
    #[serde(default)]
    pub defs: Vec<Option<SymbolId>>,

    /// Resolved identifier usages
    #[serde(default)]
    pub uses: Vec<SymbolId>,

    /// Syntax trees, one per source file
    #[serde(default)]
    pub files: Vec<SourceFile>,

    /// Non-fatal diagnostics recorded by the front-end while type checking
    #[serde(default)]
    pub diagnostics: Vec<String>,
}

/// The fully resolved program model for one analysis run
///
/// Symbol and type ids index into this model's tables; ids from one model
/// are meaningless in another.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgramModel {
    pub symbols: Vec<Symbol>,
    pub types: Vec<Type>,
    pub packages: Vec<Package>,
}

impl ProgramModel {
    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.0 as usize]
    }

    pub fn ty(&self, id: TypeId) -> &Type {
        &self.types[id.0 as usize]
    }

    /// Resolve a type to its underlying shape, following named-type links
    pub fn underlying(&self, id: TypeId) -> &Type {
        let mut current = self.ty(id);
        // Underlying chains are short; the bound guards malformed exports.
        for _ in 0..32 {
            match current {
                Type::Named { underlying, .. } => current = self.ty(*underlying),
                _ => break,
            }
        }
        current
    }

    /// The method set of a receiver or interface type
    pub fn method_set(&self, id: TypeId) -> &[MethodSig] {
        match self.ty(id) {
            Type::Named { methods, .. } => methods,
            Type::Interface { methods } => methods,
            _ => &[],
        }
    }

    pub fn package(&self, id: &PackageId) -> Option<&Package> {
        self.packages.iter().find(|p| &p.id == id)
    }

    pub fn packages(&self) -> impl Iterator<Item = &Package> {
        self.packages.iter()
    }

    /// Canonical package ids present in this model, test variants excluded
    pub fn package_ids(&self) -> Vec<PackageId> {
        self.packages
            .iter()
            .filter(|p| p.test_variant_of.is_none())
            .map(|p| p.id.clone())
            .collect()
    }

    /// Drop packages outside the requested set (test variants follow their
    /// base package)
    pub fn retain_packages(&mut self, ids: &[PackageId], include_test_variants: bool) {
        self.packages.retain(|p| {
            if let Some(base) = &p.test_variant_of {
                include_test_variants && ids.contains(base)
            } else {
                ids.contains(&p.id)
            }
        });
    }
}

/// Whether a path names a fact export file
pub fn is_fact_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.ends_with(".facts.json"))
        .unwrap_or(false)
}
