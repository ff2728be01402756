//! The syntax-tree slice of a fact export.
//!
//! Usages of struct fields through positional composite literals leave no
//! per-field entry in the usage table, so the analyzer has to see the
//! literals themselves. Exporters keep only what that scan needs: the
//! composite-literal nodes with their resolved type references, and enough
//! structure to reach literals nested inside other expressions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::{SymbolId, TypeId};

/// One source file's exported syntax tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceFile {
    /// File path as reported by the front-end
    pub path: PathBuf,

    /// Top-level nodes in source order
    #[serde(default)]
    pub nodes: Vec<SyntaxNode>,
}

/// A syntax node; non-literal constructs keep only their children
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SyntaxNode {
    CompositeLit(CompositeLit),
    Other { children: Vec<SyntaxNode> },
}

impl SyntaxNode {
    pub fn other(children: Vec<SyntaxNode>) -> Self {
        SyntaxNode::Other { children }
    }
}

/// A composite construction expression
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompositeLit {
    /// The literal's written type reference
    pub type_ref: LitTypeRef,

    /// Element initializers in source order
    pub elements: Vec<LitElement>,
}

/// How a composite literal names its type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LitTypeRef {
    /// The type is written inline as a struct shape; carries the resolved
    /// type of the literal
    StructShape(TypeId),
    /// The type is written as an identifier; carries the resolved symbol
    Ident(SymbolId),
    /// Any other type expression (array, map, selector, ...)
    Other,
}

/// One element of a composite literal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LitElement {
    /// Whether the element is field-name-keyed (`Field: value`)
    pub keyed: bool,

    /// The element's value expression
    pub value: SyntaxNode,
}

impl LitElement {
    pub fn keyed(value: SyntaxNode) -> Self {
        Self { keyed: true, value }
    }

    pub fn positional(value: SyntaxNode) -> Self {
        Self { keyed: false, value }
    }
}

/// Visit every node reachable from `roots`, literals' element values
/// included. Iterative worklist; traversal order is not significant.
pub fn walk<'a, F>(roots: &'a [SyntaxNode], visit: &mut F)
where
    F: FnMut(&'a SyntaxNode),
{
    let mut worklist: Vec<&SyntaxNode> = roots.iter().collect();

    while let Some(node) = worklist.pop() {
        visit(node);
        match node {
            SyntaxNode::CompositeLit(lit) => {
                worklist.extend(lit.elements.iter().map(|e| &e.value));
            }
            SyntaxNode::Other { children } => {
                worklist.extend(children.iter());
            }
        }
    }
}
