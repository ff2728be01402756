//! Programmatic construction of program models.
//!
//! Fact exporters embedding the library, and the test suite, assemble
//! models through this builder instead of hand-writing the arena tables.

use std::path::PathBuf;

use super::syntax::{SourceFile, SyntaxNode};
use super::{
    Location, MethodSig, Package, PackageId, ProgramModel, Symbol, SymbolId, SymbolKind, Type,
    TypeId,
};

/// Builder for a [`ProgramModel`]
///
/// Every symbol-creating method also records a definition entry in the
/// owning package, matching what a front-end emits for a declaration.
#[derive(Debug, Default)]
pub struct ModelBuilder {
    model: ProgramModel,
}

impl ModelBuilder {
    pub fn new() -> Self {
        let mut model = ProgramModel::default();
        // TypeId(0) is the shared opaque type for symbols whose type the
        // analysis never inspects.
        model.types.push(Type::Opaque);
        Self { model }
    }

    /// Register a package
    pub fn package(&mut self, id: &str, name: &str) -> PackageId {
        let pkg_id = PackageId::new(id);
        self.model.packages.push(Package {
            id: pkg_id.clone(),
            name: name.to_string(),
            test_variant_of: None,
            defs: Vec::new(),
            uses: Vec::new(),
            files: Vec::new(),
            diagnostics: Vec::new(),
        });
        pkg_id
    }

    /// Register the test-augmented variant of `base`
    pub fn test_package(&mut self, id: &str, name: &str, base: &PackageId) -> PackageId {
        let pkg_id = self.package(id, name);
        self.pkg_mut(&pkg_id).test_variant_of = Some(base.clone());
        pkg_id
    }

    /// Record a non-fatal front-end diagnostic against a package
    pub fn diagnostic(&mut self, pkg: &PackageId, message: impl Into<String>) {
        self.pkg_mut(pkg).diagnostics.push(message.into());
    }

    pub fn opaque_type(&mut self) -> TypeId {
        self.push_type(Type::Opaque)
    }

    pub fn struct_type(&mut self, fields: Vec<SymbolId>) -> TypeId {
        self.push_type(Type::Struct { fields })
    }

    pub fn interface_type(&mut self, methods: Vec<MethodSig>) -> TypeId {
        self.push_type(Type::Interface { methods })
    }

    pub fn named_type(
        &mut self,
        name: &str,
        underlying: TypeId,
        methods: Vec<MethodSig>,
    ) -> TypeId {
        self.push_type(Type::Named {
            name: name.to_string(),
            underlying,
            methods,
        })
    }

    pub fn constant(&mut self, pkg: &PackageId, name: &str, file: &str, line: usize) -> SymbolId {
        self.def(pkg, name, SymbolKind::Constant, file, line, TypeId(0), None, true)
    }

    /// A package-scope variable of uninspected type
    pub fn variable(&mut self, pkg: &PackageId, name: &str, file: &str, line: usize) -> SymbolId {
        self.def(pkg, name, SymbolKind::Variable, file, line, TypeId(0), None, true)
    }

    /// A package-scope variable with an explicit type (interface-typed
    /// variables feed contract collection)
    pub fn typed_variable(
        &mut self,
        pkg: &PackageId,
        name: &str,
        file: &str,
        line: usize,
        ty: TypeId,
    ) -> SymbolId {
        self.def(pkg, name, SymbolKind::Variable, file, line, ty, None, true)
    }

    /// A function-body-scoped variable; collection drops these
    pub fn local_variable(
        &mut self,
        pkg: &PackageId,
        name: &str,
        file: &str,
        line: usize,
    ) -> SymbolId {
        self.def(pkg, name, SymbolKind::Variable, file, line, TypeId(0), None, false)
    }

    pub fn field(&mut self, pkg: &PackageId, name: &str, file: &str, line: usize) -> SymbolId {
        self.def(pkg, name, SymbolKind::Field, file, line, TypeId(0), None, false)
    }

    pub fn function(&mut self, pkg: &PackageId, name: &str, file: &str, line: usize) -> SymbolId {
        self.def(pkg, name, SymbolKind::Function, file, line, TypeId(0), None, true)
    }

    pub fn method(
        &mut self,
        pkg: &PackageId,
        name: &str,
        file: &str,
        line: usize,
        receiver: TypeId,
    ) -> SymbolId {
        self.def(
            pkg,
            name,
            SymbolKind::Method,
            file,
            line,
            TypeId(0),
            Some(receiver),
            false,
        )
    }

    pub fn type_name(
        &mut self,
        pkg: &PackageId,
        name: &str,
        file: &str,
        line: usize,
        ty: TypeId,
    ) -> SymbolId {
        self.def(pkg, name, SymbolKind::TypeName, file, line, ty, None, true)
    }

    /// An imported package name binding (`import "fmt"` defines `fmt`)
    pub fn imported_package_name(
        &mut self,
        pkg: &PackageId,
        name: &str,
        file: &str,
        line: usize,
    ) -> SymbolId {
        self.def(pkg, name, SymbolKind::Package, file, line, TypeId(0), None, true)
    }

    /// A definition entry with no resolvable symbol
    pub fn nil_def(&mut self, pkg: &PackageId) {
        self.pkg_mut(pkg).defs.push(None);
    }

    /// Record a usage of `sym` inside `pkg`
    pub fn use_symbol(&mut self, pkg: &PackageId, sym: SymbolId) {
        self.pkg_mut(pkg).uses.push(sym);
    }

    /// Attach a source file's syntax nodes to a package
    pub fn source_file(&mut self, pkg: &PackageId, path: &str, nodes: Vec<SyntaxNode>) {
        self.pkg_mut(pkg).files.push(SourceFile {
            path: PathBuf::from(path),
            nodes,
        });
    }

    pub fn build(self) -> ProgramModel {
        self.model
    }

    #[allow(clippy::too_many_arguments)]
    fn def(
        &mut self,
        pkg: &PackageId,
        name: &str,
        kind: SymbolKind,
        file: &str,
        line: usize,
        ty: TypeId,
        receiver: Option<TypeId>,
        pkg_scope: bool,
    ) -> SymbolId {
        let id = SymbolId(self.model.symbols.len() as u32);
        self.model.symbols.push(Symbol {
            name: name.to_string(),
            kind,
            package: Some(pkg.clone()),
            location: Location::new(PathBuf::from(file), line, 1),
            ty,
            receiver,
            pkg_scope,
        });
        self.pkg_mut(pkg).defs.push(Some(id));
        id
    }

    fn push_type(&mut self, ty: Type) -> TypeId {
        let id = TypeId(self.model.types.len() as u32);
        self.model.types.push(ty);
        id
    }

    fn pkg_mut(&mut self, id: &PackageId) -> &mut Package {
        self.model
            .packages
            .iter_mut()
            .find(|p| &p.id == id)
            .expect("package registered before use")
    }
}
