//! Node graph: the arena that owns every node of an analysis run.
//!
//! This module provides the data model the registry hands out:
//! - [`Package`]: named grouping of types and functions
//! - [`Type`]: class, interface or trait with reciprocal dependency edges
//! - [`Callable`]: function or method
//! - [`Parameter`], [`Property`], [`Constant`]: members
//!
//! The [`CodeGraph`] provides:
//! - `BTreeMap` primary storage keyed by typed identity keys, so iteration is
//!   deterministic (creation order)
//! - Edges stored as id lists on the nodes; `dependencies` and `children`
//!   are maintained together by every mutation path
//! - Id generators that never reuse a key, even after a node is removed
//!
//! # Edge Invariant
//!
//! For every edge `A -> B` in `A.dependencies`, `B.children` contains `A`, and
//! vice versa. No ordered pair appears twice, and self edges are dropped.

mod nodes;

pub use nodes::{
    Callable, CallableKind, Constant, Node, NodeHeader, NodeRef, Package, Parameter, Property,
    Type, TypeKind, TypeReferences,
};

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GaugeError, Result};
use crate::types::{Modifiers, SourceLocation};

// ============================================================================
// ID Types
// ============================================================================

macro_rules! node_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
        pub struct $name(pub u32);

        impl $name {
            /// Create an id from its raw value.
            pub fn new(id: u32) -> Self {
                $name(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "_{}"), self.0)
            }
        }
    };
}

node_id!(
    /// Identity key of a package.
    PackageId,
    "pkg"
);
node_id!(
    /// Identity key of a class, interface or trait.
    TypeId,
    "type"
);
node_id!(
    /// Identity key of a function or method.
    CallableId,
    "callable"
);
node_id!(
    /// Identity key of a parameter.
    ParameterId,
    "param"
);
node_id!(
    /// Identity key of a property.
    PropertyId,
    "prop"
);
node_id!(
    /// Identity key of a constant.
    ConstantId,
    "const"
);

// ============================================================================
// CodeGraph
// ============================================================================

/// In-memory arena for all nodes of one analysis run.
#[derive(Debug, Default)]
pub struct CodeGraph {
    // Primary storage (BTreeMap for deterministic iteration)
    packages: BTreeMap<PackageId, Package>,
    types: BTreeMap<TypeId, Type>,
    callables: BTreeMap<CallableId, Callable>,
    parameters: BTreeMap<ParameterId, Parameter>,
    properties: BTreeMap<PropertyId, Property>,
    constants: BTreeMap<ConstantId, Constant>,

    // Secondary indexes
    /// Package name (case-sensitive) → PackageId.
    package_by_name: HashMap<String, PackageId>,

    // ID generators
    next_package_id: u32,
    next_type_id: u32,
    next_callable_id: u32,
    next_parameter_id: u32,
    next_property_id: u32,
    next_constant_id: u32,
}

impl CodeGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        CodeGraph::default()
    }

    // ========================================================================
    // ID Generation
    // ========================================================================

    fn next_package_id(&mut self) -> PackageId {
        let id = PackageId::new(self.next_package_id);
        self.next_package_id += 1;
        id
    }

    fn next_type_id(&mut self) -> TypeId {
        let id = TypeId::new(self.next_type_id);
        self.next_type_id += 1;
        id
    }

    fn next_callable_id(&mut self) -> CallableId {
        let id = CallableId::new(self.next_callable_id);
        self.next_callable_id += 1;
        id
    }

    fn next_parameter_id(&mut self) -> ParameterId {
        let id = ParameterId::new(self.next_parameter_id);
        self.next_parameter_id += 1;
        id
    }

    fn next_property_id(&mut self) -> PropertyId {
        let id = PropertyId::new(self.next_property_id);
        self.next_property_id += 1;
        id
    }

    fn next_constant_id(&mut self) -> ConstantId {
        let id = ConstantId::new(self.next_constant_id);
        self.next_constant_id += 1;
        id
    }

    // ========================================================================
    // Node Creation
    // ========================================================================

    /// Return the package named `name`, creating it if needed.
    pub fn ensure_package(&mut self, name: &str) -> PackageId {
        if let Some(&id) = self.package_by_name.get(name) {
            return id;
        }
        let id = self.next_package_id();
        self.package_by_name.insert(name.to_string(), id);
        self.packages.insert(id, Package::new(id, name));
        id
    }

    /// Create a type in the package named `package`, creating the package if needed.
    pub fn insert_type(&mut self, kind: TypeKind, name: impl Into<String>, package: &str) -> TypeId {
        let package_id = self.ensure_package(package);
        let type_id = self.next_type_id();
        self.packages
            .entry(package_id)
            .or_insert_with(|| Package::new(package_id, package))
            .types
            .push(type_id);
        self.types
            .insert(type_id, Type::new(type_id, kind, name, package_id));
        type_id
    }

    /// Create a free function in the package named `package`.
    pub fn insert_function(&mut self, name: impl Into<String>, package: &str) -> CallableId {
        let package_id = self.ensure_package(package);
        let callable_id = self.next_callable_id();
        self.packages
            .entry(package_id)
            .or_insert_with(|| Package::new(package_id, package))
            .functions
            .push(callable_id);
        let mut function = Callable::new(callable_id, CallableKind::Function, name);
        function.package = Some(package_id);
        self.callables.insert(callable_id, function);
        callable_id
    }

    /// Create a method not yet attached to a type (see [`CodeGraph::add_method`]).
    pub fn insert_method(&mut self, name: impl Into<String>) -> CallableId {
        let callable_id = self.next_callable_id();
        self.callables.insert(
            callable_id,
            Callable::new(callable_id, CallableKind::Method, name),
        );
        callable_id
    }

    // ========================================================================
    // Structural Mutation
    // ========================================================================

    /// Attach `method` to `owner`, detaching it from any previous owner.
    pub fn add_method(&mut self, owner: TypeId, method: CallableId) -> Result<()> {
        self.type_mut(owner)?;
        let previous = self.callable_mut(method)?.owner.replace(owner);
        if let Some(prev) = previous.filter(|&prev| prev != owner) {
            if let Some(prev_type) = self.types.get_mut(&prev) {
                prev_type.methods.retain(|&m| m != method);
            }
        }
        let owner_type = self.type_mut(owner)?;
        if !owner_type.methods.contains(&method) {
            owner_type.methods.push(method);
        }
        Ok(())
    }

    /// Append a parameter to `callable`.
    pub fn add_parameter(
        &mut self,
        callable: CallableId,
        name: impl Into<String>,
        type_ref: Option<TypeId>,
    ) -> Result<ParameterId> {
        if let Some(target) = type_ref {
            self.type_node_checked(target)?;
        }
        let parameter_id = self.next_parameter_id();
        let owner = self.callable_mut(callable)?;
        let position = owner.parameters.len();
        owner.parameters.push(parameter_id);
        self.parameters.insert(
            parameter_id,
            Parameter {
                parameter_id,
                header: NodeHeader::new(name),
                callable,
                position,
                type_ref,
            },
        );
        Ok(parameter_id)
    }

    /// Append a property to `owner`.
    pub fn add_property(
        &mut self,
        owner: TypeId,
        name: impl Into<String>,
        type_ref: Option<TypeId>,
    ) -> Result<PropertyId> {
        if let Some(target) = type_ref {
            self.type_node_checked(target)?;
        }
        let property_id = self.next_property_id();
        self.type_mut(owner)?.properties.push(property_id);
        self.properties.insert(
            property_id,
            Property {
                property_id,
                header: NodeHeader::new(name),
                owner,
                modifiers: Modifiers::new(),
                type_ref,
            },
        );
        Ok(property_id)
    }

    /// Append a constant to `owner`.
    pub fn add_constant(&mut self, owner: TypeId, name: impl Into<String>) -> Result<ConstantId> {
        let constant_id = self.next_constant_id();
        self.type_mut(owner)?.constants.push(constant_id);
        self.constants.insert(
            constant_id,
            Constant {
                constant_id,
                header: NodeHeader::new(name),
                owner,
                referenced_type: None,
            },
        );
        Ok(constant_id)
    }

    /// Record that `constant`'s value refers to a constant of `target`.
    pub fn set_constant_reference(&mut self, constant: ConstantId, target: TypeId) -> Result<()> {
        self.type_node_checked(target)?;
        let node = self
            .constants
            .get_mut(&constant)
            .ok_or_else(|| GaugeError::unknown_node(constant))?;
        node.referenced_type = Some(target);
        Ok(())
    }

    /// Set the modifiers of a type.
    pub fn set_type_modifiers(&mut self, type_id: TypeId, modifiers: Modifiers) -> Result<()> {
        self.type_mut(type_id)?.modifiers = modifiers;
        Ok(())
    }

    /// Set the modifiers of a callable.
    pub fn set_callable_modifiers(
        &mut self,
        callable: CallableId,
        modifiers: Modifiers,
    ) -> Result<()> {
        self.callable_mut(callable)?.modifiers = modifiers;
        Ok(())
    }

    /// Set the modifiers of a property.
    pub fn set_property_modifiers(
        &mut self,
        property: PropertyId,
        modifiers: Modifiers,
    ) -> Result<()> {
        let node = self
            .properties
            .get_mut(&property)
            .ok_or_else(|| GaugeError::unknown_node(property))?;
        node.modifiers = modifiers;
        Ok(())
    }

    /// Record the declaration site of any node.
    pub fn set_location(&mut self, node: NodeRef, location: SourceLocation) -> Result<()> {
        let header = match node {
            NodeRef::Package(id) => self.packages.get_mut(&id).map(|n| &mut n.header),
            NodeRef::Type(id) => self.types.get_mut(&id).map(|n| &mut n.header),
            NodeRef::Callable(id) => self.callables.get_mut(&id).map(|n| &mut n.header),
            NodeRef::Parameter(id) => self.parameters.get_mut(&id).map(|n| &mut n.header),
            NodeRef::Property(id) => self.properties.get_mut(&id).map(|n| &mut n.header),
            NodeRef::Constant(id) => self.constants.get_mut(&id).map(|n| &mut n.header),
        };
        let header = header.ok_or_else(|| GaugeError::unknown_node(node))?;
        header.location = Some(location);
        Ok(())
    }

    /// Move a type into the package named `package`, creating it if needed.
    ///
    /// Returns the new owning package, or `None` when `type_id` is not in the
    /// graph.
    pub fn move_type(&mut self, type_id: TypeId, package: &str) -> Option<PackageId> {
        let old = self.types.get(&type_id)?.package;
        let package_id = self.ensure_package(package);
        if old == package_id {
            return Some(package_id);
        }
        if let Some(old_pkg) = self.packages.get_mut(&old) {
            old_pkg.types.retain(|&t| t != type_id);
        }
        if let Some(new_pkg) = self.packages.get_mut(&package_id) {
            new_pkg.types.push(type_id);
        }
        if let Some(node) = self.types.get_mut(&type_id) {
            node.package = package_id;
        }
        Some(package_id)
    }

    // ========================================================================
    // Dependency Edges
    // ========================================================================

    /// Add the edge `from -> to`, keeping `to.children` reciprocal.
    ///
    /// Returns `false` when the edge already existed or `from == to`.
    pub fn add_dependency(&mut self, from: TypeId, to: TypeId) -> Result<bool> {
        self.type_node_checked(to)?;
        self.type_node_checked(from)?;
        if from == to {
            return Ok(false);
        }
        let source = self.type_mut(from)?;
        if source.dependencies.contains(&to) {
            return Ok(false);
        }
        source.dependencies.push(to);
        let target = self.type_mut(to)?;
        if !target.children.contains(&from) {
            target.children.push(from);
        }
        Ok(true)
    }

    /// Remove the edge `from -> to` from both ends.
    ///
    /// Returns `false` when there was no such edge.
    pub fn remove_dependency(&mut self, from: TypeId, to: TypeId) -> Result<bool> {
        self.type_node_checked(to)?;
        let source = self.type_mut(from)?;
        let before = source.dependencies.len();
        source.dependencies.retain(|&t| t != to);
        let removed = source.dependencies.len() != before;
        self.type_mut(to)?.children.retain(|&c| c != from);
        Ok(removed)
    }

    /// Set the parent class of `type_id` and add the matching edge.
    pub fn set_parent_class(&mut self, type_id: TypeId, parent: TypeId) -> Result<()> {
        self.type_node_checked(parent)?;
        let previous = self.type_mut(type_id)?.parent_class.replace(parent);
        if let Some(prev) = previous.filter(|&prev| prev != parent) {
            let still_interface = self.type_node_checked(type_id)?.interfaces.contains(&prev);
            if !still_interface && self.types.contains_key(&prev) {
                self.remove_dependency(type_id, prev)?;
            }
        }
        self.add_dependency(type_id, parent)?;
        Ok(())
    }

    /// Add an implemented (or extended) interface and the matching edge.
    pub fn add_interface(&mut self, type_id: TypeId, interface: TypeId) -> Result<()> {
        self.type_node_checked(interface)?;
        let node = self.type_mut(type_id)?;
        if !node.interfaces.contains(&interface) {
            node.interfaces.push(interface);
        }
        self.add_dependency(type_id, interface)?;
        Ok(())
    }

    /// Add a type referenced from a callable body or signature.
    pub fn add_callable_dependency(&mut self, callable: CallableId, target: TypeId) -> Result<bool> {
        self.type_node_checked(target)?;
        let node = self.callable_mut(callable)?;
        if node.dependencies.contains(&target) {
            return Ok(false);
        }
        node.dependencies.push(target);
        Ok(true)
    }

    /// Add a declared exception type of a callable.
    pub fn add_exception_type(&mut self, callable: CallableId, target: TypeId) -> Result<bool> {
        self.type_node_checked(target)?;
        let node = self.callable_mut(callable)?;
        if node.exception_types.contains(&target) {
            return Ok(false);
        }
        node.exception_types.push(target);
        Ok(true)
    }

    /// Set (or clear) the declared return type of a callable.
    pub fn set_return_type(&mut self, callable: CallableId, target: Option<TypeId>) -> Result<()> {
        if let Some(t) = target {
            self.type_node_checked(t)?;
        }
        self.callable_mut(callable)?.return_type = target;
        Ok(())
    }

    // ========================================================================
    // Reconciliation Support
    // ========================================================================

    /// Point every reference to `old` at `new`.
    ///
    /// Covers callable dependencies, exception and return types, parameter,
    /// property and constant type slots, parent-class and interface slots, and
    /// the dependency/children edges of `old`. Methods, properties and
    /// constants of `old` move to `new`. Returns the number of slots
    /// rewritten. `old` is left in place without edges or members.
    pub fn replace_type_references(&mut self, old: TypeId, new: TypeId) -> Result<usize> {
        self.type_node_checked(new)?;
        let (old_deps, old_children) = {
            let node = self.type_node_checked(old)?;
            (node.dependencies.clone(), node.children.clone())
        };
        let mut rewritten = 0;

        for callable in self.callables.values_mut() {
            rewritten += replace_in_list(&mut callable.dependencies, old, new);
            rewritten += replace_in_list(&mut callable.exception_types, old, new);
            rewritten += replace_slot(&mut callable.return_type, old, new);
        }
        for parameter in self.parameters.values_mut() {
            rewritten += replace_slot(&mut parameter.type_ref, old, new);
        }
        for property in self.properties.values_mut() {
            rewritten += replace_slot(&mut property.type_ref, old, new);
        }
        for constant in self.constants.values_mut() {
            rewritten += replace_slot(&mut constant.referenced_type, old, new);
        }
        for node in self.types.values_mut() {
            rewritten += replace_slot(&mut node.parent_class, old, new);
            rewritten += replace_in_list(&mut node.interfaces, old, new);
        }

        for target in old_deps {
            self.remove_dependency(old, target)?;
            if target != new {
                self.add_dependency(new, target)?;
            }
            rewritten += 1;
        }
        for child in old_children {
            self.remove_dependency(child, old)?;
            if child != new {
                self.add_dependency(child, new)?;
            }
            rewritten += 1;
        }

        let (methods, properties, constants) = {
            let node = self.type_mut(old)?;
            (
                std::mem::take(&mut node.methods),
                std::mem::take(&mut node.properties),
                std::mem::take(&mut node.constants),
            )
        };
        for method in &methods {
            if let Some(callable) = self.callables.get_mut(method) {
                callable.owner = Some(new);
            }
        }
        for property in &properties {
            if let Some(node) = self.properties.get_mut(property) {
                node.owner = new;
            }
        }
        for constant in &constants {
            if let Some(node) = self.constants.get_mut(constant) {
                node.owner = new;
            }
        }
        rewritten += methods.len() + properties.len() + constants.len();
        let target = self.type_mut(new)?;
        for method in methods {
            if !target.methods.contains(&method) {
                target.methods.push(method);
            }
        }
        target.properties.extend(properties);
        target.constants.extend(constants);
        Ok(rewritten)
    }

    /// Remove a type from the graph, detaching it from its package and edges.
    ///
    /// Members (methods, properties, constants) are not removed; callers that
    /// discard a node are expected to discard an empty placeholder.
    pub fn remove_type(&mut self, type_id: TypeId) -> Result<Type> {
        let (deps, children, package) = {
            let node = self.type_node_checked(type_id)?;
            (node.dependencies.clone(), node.children.clone(), node.package)
        };
        for target in deps {
            self.remove_dependency(type_id, target)?;
        }
        for child in children {
            self.remove_dependency(child, type_id)?;
        }
        if let Some(pkg) = self.packages.get_mut(&package) {
            pkg.types.retain(|&t| t != type_id);
        }
        self.types
            .remove(&type_id)
            .ok_or_else(|| GaugeError::unknown_node(type_id))
    }

    // ========================================================================
    // Lookup by ID
    // ========================================================================

    /// Get a package by ID.
    pub fn package(&self, id: PackageId) -> Option<&Package> {
        self.packages.get(&id)
    }

    /// Get a package by its exact name.
    pub fn package_by_name(&self, name: &str) -> Option<&Package> {
        self.package_by_name
            .get(name)
            .and_then(|id| self.packages.get(id))
    }

    /// Get a type by ID.
    pub fn type_node(&self, id: TypeId) -> Option<&Type> {
        self.types.get(&id)
    }

    /// Get a callable by ID.
    pub fn callable(&self, id: CallableId) -> Option<&Callable> {
        self.callables.get(&id)
    }

    /// Get a parameter by ID.
    pub fn parameter(&self, id: ParameterId) -> Option<&Parameter> {
        self.parameters.get(&id)
    }

    /// Get a property by ID.
    pub fn property(&self, id: PropertyId) -> Option<&Property> {
        self.properties.get(&id)
    }

    /// Get a constant by ID.
    pub fn constant(&self, id: ConstantId) -> Option<&Constant> {
        self.constants.get(&id)
    }

    /// True when the handle refers to a live node.
    pub fn contains(&self, node: NodeRef) -> bool {
        match node {
            NodeRef::Package(id) => self.packages.contains_key(&id),
            NodeRef::Type(id) => self.types.contains_key(&id),
            NodeRef::Callable(id) => self.callables.contains_key(&id),
            NodeRef::Parameter(id) => self.parameters.contains_key(&id),
            NodeRef::Property(id) => self.properties.contains_key(&id),
            NodeRef::Constant(id) => self.constants.contains_key(&id),
        }
    }

    /// Package owning `type_id`.
    pub fn package_of(&self, type_id: TypeId) -> Option<PackageId> {
        self.types.get(&type_id).map(|t| t.package)
    }

    // ========================================================================
    // Iteration
    // ========================================================================

    /// All packages in creation order.
    pub fn packages(&self) -> impl Iterator<Item = &Package> {
        self.packages.values()
    }

    /// All types in creation order.
    pub fn types(&self) -> impl Iterator<Item = &Type> {
        self.types.values()
    }

    /// All functions and methods in creation order.
    pub fn callables(&self) -> impl Iterator<Item = &Callable> {
        self.callables.values()
    }

    /// Number of live types.
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    // ========================================================================
    // Internal Helpers
    // ========================================================================

    fn type_node_checked(&self, id: TypeId) -> Result<&Type> {
        self.types.get(&id).ok_or_else(|| GaugeError::unknown_node(id))
    }

    fn type_mut(&mut self, id: TypeId) -> Result<&mut Type> {
        self.types
            .get_mut(&id)
            .ok_or_else(|| GaugeError::unknown_node(id))
    }

    fn callable_mut(&mut self, id: CallableId) -> Result<&mut Callable> {
        self.callables
            .get_mut(&id)
            .ok_or_else(|| GaugeError::unknown_node(id))
    }
}

/// Replace `old` by `new` in a duplicate-free list, keeping it duplicate-free.
fn replace_in_list(list: &mut Vec<TypeId>, old: TypeId, new: TypeId) -> usize {
    let Some(pos) = list.iter().position(|&t| t == old) else {
        return 0;
    };
    if list.contains(&new) {
        list.remove(pos);
    } else {
        list[pos] = new;
    }
    1
}

fn replace_slot(slot: &mut Option<TypeId>, old: TypeId, new: TypeId) -> usize {
    if *slot == Some(old) {
        *slot = Some(new);
        1
    } else {
        0
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Modifier;

    /// Every dependency edge has its reciprocal child edge and vice versa.
    fn assert_reciprocal(graph: &CodeGraph) {
        for node in graph.types() {
            for &dep in node.dependencies() {
                let target = graph.type_node(dep).expect("dangling dependency");
                assert!(
                    target.children().contains(&node.type_id),
                    "{} -> {} missing child edge",
                    node.type_id,
                    dep
                );
            }
            for &child in node.children() {
                let source = graph.type_node(child).expect("dangling child");
                assert!(
                    source.dependencies().contains(&node.type_id),
                    "{} <- {} missing dependency edge",
                    node.type_id,
                    child
                );
            }
        }
    }

    mod ids {
        use super::*;

        #[test]
        fn ids_display_with_prefix() {
            assert_eq!(PackageId::new(3).to_string(), "pkg_3");
            assert_eq!(TypeId::new(0).to_string(), "type_0");
            assert_eq!(CallableId::new(12).to_string(), "callable_12");
            assert_eq!(NodeRef::Property(PropertyId::new(1)).to_string(), "prop_1");
        }

        #[test]
        fn ids_are_never_reused_after_removal() {
            let mut graph = CodeGraph::new();
            let first = graph.insert_type(TypeKind::Class, "A", "app");
            graph.remove_type(first).unwrap();
            let second = graph.insert_type(TypeKind::Class, "A", "app");
            assert_ne!(first, second);
        }
    }

    mod packages {
        use super::*;

        #[test]
        fn ensure_package_is_idempotent_and_case_sensitive() {
            let mut graph = CodeGraph::new();
            let a = graph.ensure_package("App");
            let b = graph.ensure_package("App");
            let c = graph.ensure_package("app");
            assert_eq!(a, b);
            assert_ne!(a, c);
            assert_eq!(graph.package_by_name("App").unwrap().package_id, a);
        }

        #[test]
        fn move_type_updates_both_packages() {
            let mut graph = CodeGraph::new();
            let foo = graph.insert_type(TypeKind::Class, "Foo", "+global");
            let global = graph.package_of(foo).unwrap();

            let app = graph.move_type(foo, "app").unwrap();

            assert_ne!(global, app);
            assert!(graph.package(global).unwrap().types().is_empty());
            assert_eq!(graph.package(app).unwrap().types(), &[foo]);
            assert_eq!(graph.package_of(foo), Some(app));
        }
    }

    mod edges {
        use super::*;

        #[test]
        fn add_dependency_is_reciprocal_and_deduplicated() {
            let mut graph = CodeGraph::new();
            let a = graph.insert_type(TypeKind::Class, "A", "app");
            let b = graph.insert_type(TypeKind::Class, "B", "app");

            assert!(graph.add_dependency(a, b).unwrap());
            assert!(!graph.add_dependency(a, b).unwrap());

            assert_eq!(graph.type_node(a).unwrap().dependencies(), &[b]);
            assert_eq!(graph.type_node(b).unwrap().children(), &[a]);
            assert_reciprocal(&graph);
        }

        #[test]
        fn self_edges_are_ignored() {
            let mut graph = CodeGraph::new();
            let a = graph.insert_type(TypeKind::Class, "A", "app");
            assert!(!graph.add_dependency(a, a).unwrap());
            assert!(graph.type_node(a).unwrap().dependencies().is_empty());
        }

        #[test]
        fn remove_dependency_is_symmetric() {
            let mut graph = CodeGraph::new();
            let a = graph.insert_type(TypeKind::Class, "A", "app");
            let b = graph.insert_type(TypeKind::Class, "B", "app");
            graph.add_dependency(a, b).unwrap();

            assert!(graph.remove_dependency(a, b).unwrap());
            assert!(!graph.remove_dependency(a, b).unwrap());
            assert!(graph.type_node(b).unwrap().children().is_empty());
        }

        #[test]
        fn parent_and_interfaces_add_edges() {
            let mut graph = CodeGraph::new();
            let base = graph.insert_type(TypeKind::Class, "Base", "app");
            let other = graph.insert_type(TypeKind::Class, "Other", "app");
            let iface = graph.insert_type(TypeKind::Interface, "I", "app");
            let child = graph.insert_type(TypeKind::Class, "Child", "app");

            graph.set_parent_class(child, base).unwrap();
            graph.add_interface(child, iface).unwrap();
            assert_eq!(graph.type_node(child).unwrap().dependencies(), &[base, iface]);

            // Re-parenting drops the old parent edge.
            graph.set_parent_class(child, other).unwrap();
            assert_eq!(graph.type_node(child).unwrap().dependencies(), &[iface, other]);
            assert!(graph.type_node(base).unwrap().children().is_empty());
            assert_reciprocal(&graph);
        }

        #[test]
        fn unknown_ids_are_rejected() {
            let mut graph = CodeGraph::new();
            let a = graph.insert_type(TypeKind::Class, "A", "app");
            let err = graph.add_dependency(a, TypeId::new(99)).unwrap_err();
            assert_eq!(err, GaugeError::unknown_node("type_99"));
        }
    }

    mod members {
        use super::*;

        #[test]
        fn methods_parameters_properties_constants() {
            let mut graph = CodeGraph::new();
            let owner = graph.insert_type(TypeKind::Class, "Service", "app");
            let dto = graph.insert_type(TypeKind::Class, "Dto", "app");

            let method = graph.insert_method("run");
            graph.add_method(owner, method).unwrap();
            let p0 = graph.add_parameter(method, "input", Some(dto)).unwrap();
            let p1 = graph.add_parameter(method, "flag", None).unwrap();
            let prop = graph.add_property(owner, "cache", Some(dto)).unwrap();
            let constant = graph.add_constant(owner, "VERSION").unwrap();
            graph.set_constant_reference(constant, dto).unwrap();

            let service = graph.type_node(owner).unwrap();
            assert_eq!(service.methods(), &[method]);
            assert_eq!(service.properties(), &[prop]);
            assert_eq!(service.constants(), &[constant]);
            assert_eq!(graph.callable(method).unwrap().parameters(), &[p0, p1]);
            assert_eq!(graph.parameter(p1).unwrap().position, 1);
            assert_eq!(graph.callable(method).unwrap().owner(), Some(owner));
            assert_eq!(graph.constant(constant).unwrap().referenced_type(), Some(dto));
        }

        #[test]
        fn add_method_moves_between_owners() {
            let mut graph = CodeGraph::new();
            let a = graph.insert_type(TypeKind::Class, "A", "app");
            let b = graph.insert_type(TypeKind::Class, "B", "app");
            let m = graph.insert_method("m");
            graph.add_method(a, m).unwrap();
            graph.add_method(b, m).unwrap();
            assert!(graph.type_node(a).unwrap().methods().is_empty());
            assert_eq!(graph.type_node(b).unwrap().methods(), &[m]);
        }

        #[test]
        fn abstractness_by_kind_and_modifier() {
            let mut graph = CodeGraph::new();
            let plain = graph.insert_type(TypeKind::Class, "Plain", "app");
            let abs = graph.insert_type(TypeKind::Class, "Abs", "app");
            let iface = graph.insert_type(TypeKind::Interface, "I", "app");
            let tr = graph.insert_type(TypeKind::Trait, "T", "app");
            graph
                .set_type_modifiers(abs, Modifiers::new().with(Modifier::Abstract))
                .unwrap();

            assert!(!graph.type_node(plain).unwrap().is_abstract());
            assert!(graph.type_node(abs).unwrap().is_abstract());
            assert!(graph.type_node(iface).unwrap().is_abstract());
            assert!(graph.type_node(tr).unwrap().is_abstract());
        }

        #[test]
        fn set_location_on_any_node() {
            let mut graph = CodeGraph::new();
            let f = graph.insert_function("helper", "app");
            let loc = SourceLocation::new("lib.php", 4, 1);
            graph.set_location(NodeRef::Callable(f), loc.clone()).unwrap();
            assert_eq!(graph.callable(f).unwrap().location(), Some(&loc));
            assert!(graph
                .set_location(NodeRef::Constant(ConstantId::new(5)), loc)
                .is_err());
            assert_eq!(graph.move_type(TypeId::new(42), "app"), None);
        }
    }

    mod rewrite {
        use super::*;

        #[test]
        fn replace_type_references_rewrites_every_slot() {
            let mut graph = CodeGraph::new();
            let placeholder = graph.insert_type(TypeKind::Class, "Bar", "+global");
            let iface = graph.insert_type(TypeKind::Interface, "Bar", "+global");
            let user = graph.insert_type(TypeKind::Class, "User", "+global");

            let f = graph.insert_function("f", "+global");
            graph.add_callable_dependency(f, placeholder).unwrap();
            graph.add_exception_type(f, placeholder).unwrap();
            graph.set_return_type(f, Some(placeholder)).unwrap();
            let param = graph.add_parameter(f, "bar", Some(placeholder)).unwrap();
            let prop = graph.add_property(user, "bar", Some(placeholder)).unwrap();
            graph.add_interface(user, placeholder).unwrap();

            let count = graph.replace_type_references(placeholder, iface).unwrap();
            assert!(count >= 6);

            let func = graph.callable(f).unwrap();
            assert_eq!(func.dependencies(), &[iface]);
            assert_eq!(func.exception_types(), &[iface]);
            assert_eq!(func.return_type(), Some(iface));
            assert_eq!(graph.parameter(param).unwrap().type_ref(), Some(iface));
            assert_eq!(graph.property(prop).unwrap().type_ref(), Some(iface));
            assert_eq!(graph.type_node(user).unwrap().interfaces(), &[iface]);
            assert_eq!(graph.type_node(user).unwrap().dependencies(), &[iface]);
            assert!(graph.type_node(placeholder).unwrap().children().is_empty());
            assert_reciprocal(&graph);
        }

        #[test]
        fn replace_keeps_lists_duplicate_free() {
            let mut graph = CodeGraph::new();
            let old = graph.insert_type(TypeKind::Class, "X", "+global");
            let new = graph.insert_type(TypeKind::Interface, "X", "+global");
            let f = graph.insert_function("f", "+global");
            graph.add_callable_dependency(f, old).unwrap();
            graph.add_callable_dependency(f, new).unwrap();

            graph.replace_type_references(old, new).unwrap();
            assert_eq!(graph.callable(f).unwrap().dependencies(), &[new]);
        }

        #[test]
        fn replace_moves_members_to_new_owner() {
            let mut graph = CodeGraph::new();
            let old = graph.insert_type(TypeKind::Class, "Bar", "+global");
            let new = graph.insert_type(TypeKind::Interface, "Bar", "+global");
            let method = graph.insert_method("handle");
            graph.add_method(old, method).unwrap();
            let prop = graph.add_property(old, "state", None).unwrap();
            let constant = graph.add_constant(old, "LIMIT").unwrap();

            graph.replace_type_references(old, new).unwrap();

            let target = graph.type_node(new).unwrap();
            assert_eq!(target.methods(), &[method]);
            assert_eq!(target.properties(), &[prop]);
            assert_eq!(target.constants(), &[constant]);
            assert_eq!(graph.callable(method).unwrap().owner(), Some(new));
            assert_eq!(graph.property(prop).unwrap().owner(), new);
            assert_eq!(graph.constant(constant).unwrap().owner(), new);
            let source = graph.type_node(old).unwrap();
            assert!(source.methods().is_empty());
            assert!(source.properties().is_empty());
            assert!(source.constants().is_empty());
        }

        #[test]
        fn remove_type_detaches_package_and_edges() {
            let mut graph = CodeGraph::new();
            let a = graph.insert_type(TypeKind::Class, "A", "app");
            let b = graph.insert_type(TypeKind::Class, "B", "app");
            graph.add_dependency(a, b).unwrap();
            graph.add_dependency(b, a).unwrap();

            let removed = graph.remove_type(a).unwrap();
            assert_eq!(removed.name(), "A");
            assert!(graph.type_node(a).is_none());
            assert_eq!(graph.package_by_name("app").unwrap().types(), &[b]);
            assert!(graph.type_node(b).unwrap().dependencies().is_empty());
            assert!(graph.type_node(b).unwrap().children().is_empty());
            assert!(!graph.contains(NodeRef::Type(a)));
        }
    }
}
