//! Node structs stored in the [`CodeGraph`](super::CodeGraph) arena.
//!
//! Every node embeds a [`NodeHeader`] and refers to other nodes only by
//! identity key. Edge fields are crate-private: they are mutated through the
//! graph so that reciprocal edges stay consistent.

use serde::{Deserialize, Serialize};

use super::{CallableId, ConstantId, PackageId, ParameterId, PropertyId, TypeId};
use crate::types::{Modifiers, SourceLocation};

// ============================================================================
// Node References
// ============================================================================

/// A handle to any node in the graph.
///
/// This is the closed set of node kinds the traversal protocol dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum NodeRef {
    Package(PackageId),
    Type(TypeId),
    Callable(CallableId),
    Parameter(ParameterId),
    Property(PropertyId),
    Constant(ConstantId),
}

impl std::fmt::Display for NodeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeRef::Package(id) => write!(f, "{}", id),
            NodeRef::Type(id) => write!(f, "{}", id),
            NodeRef::Callable(id) => write!(f, "{}", id),
            NodeRef::Parameter(id) => write!(f, "{}", id),
            NodeRef::Property(id) => write!(f, "{}", id),
            NodeRef::Constant(id) => write!(f, "{}", id),
        }
    }
}

// ============================================================================
// Enums
// ============================================================================

/// Kind of type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Class,
    Interface,
    Trait,
}

impl TypeKind {
    /// Lowercase name used in log output.
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKind::Class => "class",
            TypeKind::Interface => "interface",
            TypeKind::Trait => "trait",
        }
    }
}

/// Kind of callable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallableKind {
    /// Free function owned by a package.
    Function,
    /// Method owned by a type.
    Method,
}

// ============================================================================
// Capabilities
// ============================================================================

/// Name and location shared by every node kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeHeader {
    /// Display name (original case of the first declaration).
    pub name: String,
    /// Declaration site, if the parser reported one.
    pub location: Option<SourceLocation>,
}

impl NodeHeader {
    /// Create a header without a location.
    pub fn new(name: impl Into<String>) -> Self {
        NodeHeader {
            name: name.into(),
            location: None,
        }
    }
}

/// Common read access for all node kinds.
pub trait Node {
    /// Handle of this node.
    fn node_ref(&self) -> NodeRef;

    /// Shared header.
    fn header(&self) -> &NodeHeader;

    /// Display name.
    fn name(&self) -> &str {
        &self.header().name
    }

    /// Declaration site.
    fn location(&self) -> Option<&SourceLocation> {
        self.header().location.as_ref()
    }
}

/// Nodes that refer to other types.
///
/// The returned list is what the coupling analysis counts as outgoing
/// dependencies of the node itself (children are reported separately).
pub trait TypeReferences {
    /// Types this node references, in declaration order, without duplicates.
    fn referenced_types(&self) -> Vec<TypeId>;
}

fn push_unique(list: &mut Vec<TypeId>, id: TypeId) {
    if !list.contains(&id) {
        list.push(id);
    }
}

// ============================================================================
// Package
// ============================================================================

/// Named grouping of types and functions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    /// Identity key.
    pub package_id: PackageId,
    pub(crate) header: NodeHeader,
    pub(crate) types: Vec<TypeId>,
    pub(crate) functions: Vec<CallableId>,
}

impl Package {
    pub(crate) fn new(package_id: PackageId, name: impl Into<String>) -> Self {
        Package {
            package_id,
            header: NodeHeader::new(name),
            types: Vec::new(),
            functions: Vec::new(),
        }
    }

    /// Types owned by this package, in declaration order.
    pub fn types(&self) -> &[TypeId] {
        &self.types
    }

    /// Free functions owned by this package, in declaration order.
    pub fn functions(&self) -> &[CallableId] {
        &self.functions
    }

    /// True when the package owns neither types nor functions.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.functions.is_empty()
    }
}

impl Node for Package {
    fn node_ref(&self) -> NodeRef {
        NodeRef::Package(self.package_id)
    }

    fn header(&self) -> &NodeHeader {
        &self.header
    }
}

// ============================================================================
// Type
// ============================================================================

/// Class, interface or trait.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Type {
    /// Identity key.
    pub type_id: TypeId,
    /// Class, interface or trait.
    pub kind: TypeKind,
    pub(crate) header: NodeHeader,
    pub(crate) package: PackageId,
    pub(crate) modifiers: Modifiers,
    pub(crate) parent_class: Option<TypeId>,
    pub(crate) interfaces: Vec<TypeId>,
    pub(crate) constants: Vec<ConstantId>,
    pub(crate) properties: Vec<PropertyId>,
    pub(crate) methods: Vec<CallableId>,
    /// Outgoing edges: types this type depends on.
    pub(crate) dependencies: Vec<TypeId>,
    /// Incoming edges: types depending on this type.
    pub(crate) children: Vec<TypeId>,
}

impl Type {
    pub(crate) fn new(
        type_id: TypeId,
        kind: TypeKind,
        name: impl Into<String>,
        package: PackageId,
    ) -> Self {
        Type {
            type_id,
            kind,
            header: NodeHeader::new(name),
            package,
            modifiers: Modifiers::new(),
            parent_class: None,
            interfaces: Vec::new(),
            constants: Vec::new(),
            properties: Vec::new(),
            methods: Vec::new(),
            dependencies: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Owning package.
    pub fn package(&self) -> PackageId {
        self.package
    }

    pub fn modifiers(&self) -> &Modifiers {
        &self.modifiers
    }

    /// Interfaces and traits are always abstract; classes only when declared so.
    pub fn is_abstract(&self) -> bool {
        match self.kind {
            TypeKind::Interface | TypeKind::Trait => true,
            TypeKind::Class => self.modifiers.is_abstract(),
        }
    }

    pub fn is_final(&self) -> bool {
        self.modifiers.is_final()
    }

    pub fn parent_class(&self) -> Option<TypeId> {
        self.parent_class
    }

    pub fn interfaces(&self) -> &[TypeId] {
        &self.interfaces
    }

    pub fn constants(&self) -> &[ConstantId] {
        &self.constants
    }

    pub fn properties(&self) -> &[PropertyId] {
        &self.properties
    }

    pub fn methods(&self) -> &[CallableId] {
        &self.methods
    }

    /// Outgoing dependency edges.
    pub fn dependencies(&self) -> &[TypeId] {
        &self.dependencies
    }

    /// Incoming dependency edges (reciprocal of `dependencies`).
    pub fn children(&self) -> &[TypeId] {
        &self.children
    }
}

impl Node for Type {
    fn node_ref(&self) -> NodeRef {
        NodeRef::Type(self.type_id)
    }

    fn header(&self) -> &NodeHeader {
        &self.header
    }
}

impl TypeReferences for Type {
    fn referenced_types(&self) -> Vec<TypeId> {
        let mut refs = Vec::with_capacity(self.dependencies.len() + 1);
        if let Some(parent) = self.parent_class {
            push_unique(&mut refs, parent);
        }
        for &iface in &self.interfaces {
            push_unique(&mut refs, iface);
        }
        for &dep in &self.dependencies {
            push_unique(&mut refs, dep);
        }
        refs
    }
}

// ============================================================================
// Callable
// ============================================================================

/// Function or method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Callable {
    /// Identity key.
    pub callable_id: CallableId,
    pub kind: CallableKind,
    pub(crate) header: NodeHeader,
    /// Owning type (methods only).
    pub(crate) owner: Option<TypeId>,
    /// Owning package (functions only).
    pub(crate) package: Option<PackageId>,
    pub(crate) modifiers: Modifiers,
    pub(crate) parameters: Vec<ParameterId>,
    pub(crate) dependencies: Vec<TypeId>,
    pub(crate) exception_types: Vec<TypeId>,
    pub(crate) return_type: Option<TypeId>,
}

impl Callable {
    pub(crate) fn new(callable_id: CallableId, kind: CallableKind, name: impl Into<String>) -> Self {
        Callable {
            callable_id,
            kind,
            header: NodeHeader::new(name),
            owner: None,
            package: None,
            modifiers: Modifiers::new(),
            parameters: Vec::new(),
            dependencies: Vec::new(),
            exception_types: Vec::new(),
            return_type: None,
        }
    }

    pub fn owner(&self) -> Option<TypeId> {
        self.owner
    }

    pub fn package(&self) -> Option<PackageId> {
        self.package
    }

    pub fn modifiers(&self) -> &Modifiers {
        &self.modifiers
    }

    pub fn parameters(&self) -> &[ParameterId] {
        &self.parameters
    }

    pub fn dependencies(&self) -> &[TypeId] {
        &self.dependencies
    }

    pub fn exception_types(&self) -> &[TypeId] {
        &self.exception_types
    }

    pub fn return_type(&self) -> Option<TypeId> {
        self.return_type
    }

    pub fn is_method(&self) -> bool {
        self.kind == CallableKind::Method
    }
}

impl Node for Callable {
    fn node_ref(&self) -> NodeRef {
        NodeRef::Callable(self.callable_id)
    }

    fn header(&self) -> &NodeHeader {
        &self.header
    }
}

impl TypeReferences for Callable {
    fn referenced_types(&self) -> Vec<TypeId> {
        let mut refs = Vec::new();
        for &dep in &self.dependencies {
            push_unique(&mut refs, dep);
        }
        for &exc in &self.exception_types {
            push_unique(&mut refs, exc);
        }
        if let Some(ret) = self.return_type {
            push_unique(&mut refs, ret);
        }
        refs
    }
}

// ============================================================================
// Members
// ============================================================================

/// Formal parameter of a callable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub parameter_id: ParameterId,
    pub(crate) header: NodeHeader,
    pub(crate) callable: CallableId,
    /// Zero-based position in the parameter list.
    pub position: usize,
    pub(crate) type_ref: Option<TypeId>,
}

impl Parameter {
    pub fn callable(&self) -> CallableId {
        self.callable
    }

    /// Declared type, if any.
    pub fn type_ref(&self) -> Option<TypeId> {
        self.type_ref
    }
}

impl Node for Parameter {
    fn node_ref(&self) -> NodeRef {
        NodeRef::Parameter(self.parameter_id)
    }

    fn header(&self) -> &NodeHeader {
        &self.header
    }
}

impl TypeReferences for Parameter {
    fn referenced_types(&self) -> Vec<TypeId> {
        self.type_ref.into_iter().collect()
    }
}

/// Property (field) of a type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub property_id: PropertyId,
    pub(crate) header: NodeHeader,
    pub(crate) owner: TypeId,
    pub(crate) modifiers: Modifiers,
    pub(crate) type_ref: Option<TypeId>,
}

impl Property {
    pub fn owner(&self) -> TypeId {
        self.owner
    }

    pub fn modifiers(&self) -> &Modifiers {
        &self.modifiers
    }

    /// Declared type, if any.
    pub fn type_ref(&self) -> Option<TypeId> {
        self.type_ref
    }
}

impl Node for Property {
    fn node_ref(&self) -> NodeRef {
        NodeRef::Property(self.property_id)
    }

    fn header(&self) -> &NodeHeader {
        &self.header
    }
}

impl TypeReferences for Property {
    fn referenced_types(&self) -> Vec<TypeId> {
        self.type_ref.into_iter().collect()
    }
}

/// Declared constant of a type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constant {
    pub constant_id: ConstantId,
    pub(crate) header: NodeHeader,
    pub(crate) owner: TypeId,
    /// Type whose constant the value refers to (`Other::FOO`).
    pub(crate) referenced_type: Option<TypeId>,
}

impl Constant {
    pub fn owner(&self) -> TypeId {
        self.owner
    }

    pub fn referenced_type(&self) -> Option<TypeId> {
        self.referenced_type
    }
}

impl Node for Constant {
    fn node_ref(&self) -> NodeRef {
        NodeRef::Constant(self.constant_id)
    }

    fn header(&self) -> &NodeHeader {
        &self.header
    }
}

impl TypeReferences for Constant {
    fn referenced_types(&self) -> Vec<TypeId> {
        self.referenced_type.into_iter().collect()
    }
}
