//! Symbol registry: resolves qualified names to live graph nodes.
//!
//! The registry hands out node handles before the real declaration has been
//! seen and reconciles later, conflicting information without invalidating
//! handles already issued.
//!
//! # Name Splitting
//!
//! A qualified name is split on the configured separator that ends last;
//! when several end at the same place the longest one wins. The part after
//! it is the local name; the part before it names the package. Unqualified
//! names resolve to a built-in package when they appear in a built-in type
//! table, otherwise to the default package. Index keys are the lowercased
//! local name plus the case-sensitive package name.
//!
//! # Generations
//!
//! Each type kind has an *active* and a *frozen* index. The first `get_*`
//! call moves every active index into its frozen slot (once per registry).
//! `build_*` only consults and fills the active index; `get_*` checks frozen
//! first, then active. Declarations seen after the freeze therefore never
//! take over the identity of a node handed out before it.
//!
//! # Reconciliation
//!
//! `get_class_or_interface` on an unknown name creates a Class placeholder.
//! If an interface of that name is declared later while the placeholder is
//! still in the default package, every reference to the placeholder is
//! rewritten to the interface and the placeholder is discarded. A placeholder
//! that was already promoted into a named package is left as is.

use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};

use tracing::{debug, info, trace};

use crate::config::RegistryConfig;
use crate::error::{GaugeError, Result};
use crate::graph::{CallableId, CodeGraph, Package, PackageId, TypeId, TypeKind};

// ============================================================================
// Generation Index
// ============================================================================

#[derive(Debug, Clone)]
struct IndexEntry {
    package: String,
    type_id: TypeId,
}

/// Lowercased local name → entries in insertion order.
#[derive(Debug, Default)]
struct Generation {
    by_name: HashMap<String, Vec<IndexEntry>>,
}

impl Generation {
    fn exact(&self, key: &str, package: &str) -> Option<TypeId> {
        self.by_name
            .get(key)?
            .iter()
            .find(|entry| entry.package == package)
            .map(|entry| entry.type_id)
    }

    fn first(&self, key: &str) -> Option<TypeId> {
        self.by_name.get(key)?.first().map(|entry| entry.type_id)
    }

    /// The entry for `key` when its only package is `package`.
    fn only_in(&self, key: &str, package: &str) -> Option<TypeId> {
        match self.by_name.get(key)?.as_slice() {
            [entry] if entry.package == package => Some(entry.type_id),
            _ => None,
        }
    }

    /// Lookup rule used by `get_*`: exact match, else any package when the
    /// request targets the default package.
    fn find(&self, key: &str, package: &str, default_package: &str) -> Option<TypeId> {
        self.exact(key, package).or_else(|| {
            if package == default_package {
                self.first(key)
            } else {
                None
            }
        })
    }

    fn insert(&mut self, key: &str, package: &str, type_id: TypeId) {
        self.by_name
            .entry(key.to_string())
            .or_default()
            .push(IndexEntry {
                package: package.to_string(),
                type_id,
            });
    }

    fn relocate(&mut self, key: &str, type_id: TypeId, package: &str) {
        if let Some(entries) = self.by_name.get_mut(key) {
            for entry in entries.iter_mut().filter(|e| e.type_id == type_id) {
                entry.package = package.to_string();
            }
        }
    }

    fn remove(&mut self, key: &str, type_id: TypeId) {
        if let Some(entries) = self.by_name.get_mut(key) {
            entries.retain(|entry| entry.type_id != type_id);
            if entries.is_empty() {
                self.by_name.remove(key);
            }
        }
    }
}

#[derive(Debug, Default)]
struct KindIndex {
    active: Generation,
    frozen: Generation,
}

#[derive(Debug, Default)]
struct TypeIndexes {
    classes: KindIndex,
    interfaces: KindIndex,
    traits: KindIndex,
}

impl TypeIndexes {
    fn get(&self, kind: TypeKind) -> &KindIndex {
        match kind {
            TypeKind::Class => &self.classes,
            TypeKind::Interface => &self.interfaces,
            TypeKind::Trait => &self.traits,
        }
    }

    fn get_mut(&mut self, kind: TypeKind) -> &mut KindIndex {
        match kind {
            TypeKind::Class => &mut self.classes,
            TypeKind::Interface => &mut self.interfaces,
            TypeKind::Trait => &mut self.traits,
        }
    }

    fn iter_mut(&mut self) -> impl Iterator<Item = &mut KindIndex> {
        [&mut self.classes, &mut self.interfaces, &mut self.traits].into_iter()
    }
}

/// How the resolution algorithm satisfied a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resolution {
    /// Exact match, or any-package match for a default-package request.
    Reused,
    /// Moved out of the default package into the requested one.
    Promoted,
    /// New node.
    Created,
}

/// A qualified name split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
struct QualifiedName {
    /// Local name in its original case.
    local: String,
    /// Lowercased local name.
    key: String,
    /// Case-sensitive package name.
    package: String,
}

// ============================================================================
// Registry
// ============================================================================

/// Symbol registry owning the node graph of one analysis run.
#[derive(Debug)]
pub struct Registry {
    graph: CodeGraph,
    config: RegistryConfig,
    /// Lowercased builtin type name → builtin package name.
    builtins: HashMap<String, String>,
    default_package: PackageId,
    indexes: TypeIndexes,
    /// Types created by a `get_*` miss and not declared since.
    placeholders: HashSet<TypeId>,
    frozen: bool,
    finalized: bool,
}

impl Default for Registry {
    fn default() -> Self {
        Registry::from_valid_config(RegistryConfig::default())
    }
}

impl Registry {
    /// Create a registry with the default configuration.
    pub fn new() -> Self {
        Registry::default()
    }

    /// Create a registry with a caller-supplied configuration.
    pub fn with_config(config: RegistryConfig) -> Result<Self> {
        config.validate()?;
        Ok(Registry::from_valid_config(config))
    }

    fn from_valid_config(config: RegistryConfig) -> Self {
        let mut graph = CodeGraph::new();
        let default_package = graph.ensure_package(&config.default_package);
        Registry {
            graph,
            builtins: config.builtin_index(),
            config,
            default_package,
            indexes: TypeIndexes::default(),
            placeholders: HashSet::new(),
            frozen: false,
            finalized: false,
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Id of the fallback package.
    pub fn default_package(&self) -> PackageId {
        self.default_package
    }

    // ========================================================================
    // Build Operations
    // ========================================================================

    /// Return the package named `name`, creating it if needed.
    pub fn build_package(&mut self, name: &str) -> Result<PackageId> {
        self.ensure_writable("build_package", name)?;
        Ok(self.graph.ensure_package(name))
    }

    /// Declare a class.
    pub fn build_class(&mut self, qualified: &str) -> Result<TypeId> {
        self.build_type(TypeKind::Class, qualified, "build_class")
    }

    /// Declare an interface, reconciling a default-package class placeholder
    /// of the same name.
    pub fn build_interface(&mut self, qualified: &str) -> Result<TypeId> {
        self.build_type(TypeKind::Interface, qualified, "build_interface")
    }

    /// Declare a trait.
    pub fn build_trait(&mut self, qualified: &str) -> Result<TypeId> {
        self.build_type(TypeKind::Trait, qualified, "build_trait")
    }

    /// Declare a free function. Always creates a new node, owned by the
    /// package named in `qualified` (the default package when unqualified).
    pub fn build_function(&mut self, qualified: &str) -> Result<CallableId> {
        self.ensure_writable("build_function", qualified)?;
        let name = self.split_name(qualified, false);
        let callable_id = self.graph.insert_function(&name.local, &name.package);
        debug!(
            function = %name.local,
            package = %name.package,
            id = %callable_id,
            "function created"
        );
        Ok(callable_id)
    }

    /// Create a new method. Attach it with [`CodeGraph::add_method`].
    pub fn build_method(&mut self, name: &str) -> Result<CallableId> {
        self.ensure_writable("build_method", name)?;
        let callable_id = self.graph.insert_method(name);
        trace!(method = %name, id = %callable_id, "method created");
        Ok(callable_id)
    }

    fn build_type(
        &mut self,
        kind: TypeKind,
        qualified: &str,
        operation: &'static str,
    ) -> Result<TypeId> {
        self.ensure_writable(operation, qualified)?;
        let name = self.split_name(qualified, true);
        let (type_id, _) = self.resolve(kind, &name);
        self.placeholders.remove(&type_id);
        if kind == TypeKind::Interface {
            self.reconcile_class_placeholder(&name, type_id)?;
        }
        Ok(type_id)
    }

    fn ensure_writable(&self, operation: &'static str, name: &str) -> Result<()> {
        if self.finalized {
            return Err(GaugeError::frozen(operation, name));
        }
        Ok(())
    }

    // ========================================================================
    // Lookup Operations
    // ========================================================================

    /// Look up a class, creating a placeholder on a miss.
    pub fn get_class(&mut self, qualified: &str) -> TypeId {
        self.get_type(&[TypeKind::Class], TypeKind::Class, qualified)
    }

    /// Look up an interface, creating a placeholder on a miss.
    pub fn get_interface(&mut self, qualified: &str) -> TypeId {
        self.get_type(&[TypeKind::Interface], TypeKind::Interface, qualified)
    }

    /// Look up a trait, creating a placeholder on a miss.
    pub fn get_trait(&mut self, qualified: &str) -> TypeId {
        self.get_type(&[TypeKind::Trait], TypeKind::Trait, qualified)
    }

    /// Look up a class, then an interface; a miss creates a Class placeholder.
    pub fn get_class_or_interface(&mut self, qualified: &str) -> TypeId {
        self.get_type(
            &[TypeKind::Class, TypeKind::Interface],
            TypeKind::Class,
            qualified,
        )
    }

    fn get_type(&mut self, search: &[TypeKind], fallback: TypeKind, qualified: &str) -> TypeId {
        self.freeze();
        let name = self.split_name(qualified, true);
        if let Some(type_id) = search.iter().find_map(|&kind| self.lookup(kind, &name)) {
            return type_id;
        }

        // Internal build path: allowed after finalize.
        let (type_id, resolution) = self.resolve(fallback, &name);
        if resolution == Resolution::Created {
            self.placeholders.insert(type_id);
        }
        type_id
    }

    fn lookup(&self, kind: TypeKind, name: &QualifiedName) -> Option<TypeId> {
        let index = self.indexes.get(kind);
        let default = &self.config.default_package;
        index
            .frozen
            .find(&name.key, &name.package, default)
            .or_else(|| index.active.find(&name.key, &name.package, default))
    }

    fn freeze(&mut self) {
        if self.frozen {
            return;
        }
        self.frozen = true;
        for index in self.indexes.iter_mut() {
            index.frozen = std::mem::take(&mut index.active);
        }
        debug!("registry frozen: active generation moved to frozen");
    }

    // ========================================================================
    // Resolution
    // ========================================================================

    fn resolve(&mut self, kind: TypeKind, name: &QualifiedName) -> (TypeId, Resolution) {
        let default = &self.config.default_package;
        let is_default = name.package == *default;
        let active = &mut self.indexes.get_mut(kind).active;

        if let Some(type_id) = active.exact(&name.key, &name.package) {
            return (type_id, Resolution::Reused);
        }

        if !is_default {
            if let Some(type_id) = active.only_in(&name.key, default) {
                if self.graph.move_type(type_id, &name.package).is_some() {
                    active.relocate(&name.key, type_id, &name.package);
                    debug!(
                        kind = kind.as_str(),
                        name = %name.local,
                        package = %name.package,
                        id = %type_id,
                        "promoted out of default package"
                    );
                    return (type_id, Resolution::Promoted);
                }
            }
        }

        if is_default {
            if let Some(type_id) = active.first(&name.key) {
                return (type_id, Resolution::Reused);
            }
        }

        let type_id = self.graph.insert_type(kind, name.local.as_str(), &name.package);
        active.insert(&name.key, &name.package, type_id);
        debug!(
            kind = kind.as_str(),
            name = %name.local,
            package = %name.package,
            id = %type_id,
            "type created"
        );
        (type_id, Resolution::Created)
    }

    fn reconcile_class_placeholder(
        &mut self,
        name: &QualifiedName,
        interface: TypeId,
    ) -> Result<()> {
        let default = &self.config.default_package;
        let classes = &self.indexes.classes;
        let placeholder = [&classes.frozen, &classes.active]
            .into_iter()
            .filter_map(|generation| generation.exact(&name.key, default))
            .find(|type_id| self.placeholders.contains(type_id));
        let Some(class) = placeholder else {
            return Ok(());
        };

        let rewritten = self.graph.replace_type_references(class, interface)?;
        self.graph.remove_type(class)?;
        let classes = &mut self.indexes.classes;
        classes.active.remove(&name.key, class);
        classes.frozen.remove(&name.key, class);
        self.placeholders.remove(&class);
        info!(
            name = %name.local,
            placeholder = %class,
            interface = %interface,
            rewritten,
            "class placeholder reconciled into interface"
        );
        Ok(())
    }

    // ========================================================================
    // Name Splitting
    // ========================================================================

    fn split_name(&self, qualified: &str, use_builtins: bool) -> QualifiedName {
        let cut = self
            .config
            .separators
            .iter()
            .filter_map(|sep| qualified.rfind(sep.as_str()).map(|pos| (pos, pos + sep.len())))
            .max_by_key(|&(pos, end)| (end, Reverse(pos)));

        let (package, local) = match cut {
            Some((pos, end)) => (self.trim_leading_separators(&qualified[..pos]), &qualified[end..]),
            None => ("", qualified),
        };
        let key = local.to_lowercase();

        let package = if !package.is_empty() {
            package.to_string()
        } else if cut.is_none() && use_builtins {
            self.builtins
                .get(&key)
                .cloned()
                .unwrap_or_else(|| self.config.default_package.clone())
        } else {
            self.config.default_package.clone()
        };

        QualifiedName {
            local: local.to_string(),
            key,
            package,
        }
    }

    fn trim_leading_separators<'a>(&self, mut package: &'a str) -> &'a str {
        while let Some(rest) = self
            .config
            .separators
            .iter()
            .find_map(move |sep| package.strip_prefix(sep.as_str()))
        {
            package = rest;
        }
        package
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Reject further external `build_*` calls. `get_*` keeps working.
    pub fn finalize(&mut self) {
        if !self.finalized {
            self.finalized = true;
            info!(
                packages = self.packages().count(),
                types = self.graph.type_count(),
                "registry finalized"
            );
        }
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// True once the first `get_*` lookup has frozen the active generation.
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Packages in creation order, omitting the default package when it owns
    /// no types and no functions.
    pub fn packages(&self) -> impl Iterator<Item = &Package> {
        let default = self.default_package;
        self.graph
            .packages()
            .filter(move |package| !(package.package_id == default && package.is_empty()))
    }

    pub fn package_by_name(&self, name: &str) -> Option<&Package> {
        self.graph.package_by_name(name)
    }

    /// Read access to the node graph.
    pub fn graph(&self) -> &CodeGraph {
        &self.graph
    }

    /// Mutable access for the parser to fill in bodies and edges.
    pub fn graph_mut(&mut self) -> &mut CodeGraph {
        &mut self.graph
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BuiltinPackage;
    use crate::graph::Node;

    fn package_name(registry: &Registry, type_id: TypeId) -> String {
        let package = registry.graph().package_of(type_id).unwrap();
        registry.graph().package(package).unwrap().name().to_string()
    }

    mod name_splitting {
        use super::*;

        #[test]
        fn splits_on_last_separator_of_any_kind() {
            let registry = Registry::new();
            let name = registry.split_name("Vendor\\Lib.Sub\\Foo", true);
            assert_eq!(name.local, "Foo");
            assert_eq!(name.key, "foo");
            assert_eq!(name.package, "Vendor\\Lib.Sub");
        }

        #[test]
        fn leading_separator_is_not_part_of_package() {
            let registry = Registry::new();
            assert_eq!(registry.split_name("\\ns\\Foo", true).package, "ns");
            assert_eq!(registry.split_name("\\Foo", true).package, "+global");
        }

        #[test]
        fn unqualified_builtin_resolves_to_builtin_package() {
            let registry = Registry::new();
            assert_eq!(registry.split_name("exception", true).package, "+standard");
            assert_eq!(registry.split_name("ArrayObject", true).package, "+spl");
            assert_eq!(registry.split_name("Unknown", true).package, "+global");
            // Functions never resolve into builtin type tables.
            assert_eq!(registry.split_name("Exception", false).package, "+global");
        }

        #[test]
        fn custom_separators() {
            let config = RegistryConfig {
                separators: vec!["::".to_string()],
                builtin_packages: vec![BuiltinPackage::new("+core", ["Object"])],
                ..RegistryConfig::default()
            };
            let registry = Registry::with_config(config).unwrap();
            let name = registry.split_name("a::b::Widget", true);
            assert_eq!(name.package, "a::b");
            assert_eq!(name.local, "Widget");
            assert_eq!(registry.split_name("object", true).package, "+core");
        }

        #[test]
        fn overlapping_separators_prefer_the_longest() {
            let config = RegistryConfig {
                separators: vec![":".to_string(), "::".to_string()],
                ..RegistryConfig::default()
            };
            let mut registry = Registry::with_config(config).unwrap();
            let name = registry.split_name("a::b", true);
            assert_eq!(name.package, "a");
            assert_eq!(name.local, "b");
            assert_eq!(registry.split_name("x:y::Z", true).package, "x:y");

            let widget = registry.build_class("a::Widget").unwrap();
            assert_eq!(package_name(&registry, widget), "a");
        }
    }

    mod resolution {
        use super::*;

        #[test]
        fn build_class_twice_reuses() {
            let mut registry = Registry::new();
            let a = registry.build_class("ns.Foo").unwrap();
            let b = registry.build_class("ns.Foo").unwrap();
            assert_eq!(a, b);
            assert_eq!(registry.graph().type_count(), 1);
        }

        #[test]
        fn local_name_is_case_insensitive_package_is_not() {
            let mut registry = Registry::new();
            let a = registry.build_class("ns.Foo").unwrap();
            assert_eq!(registry.build_class("ns.FOO").unwrap(), a);
            assert_ne!(registry.build_class("NS.Foo").unwrap(), a);
        }

        #[test]
        fn display_name_keeps_first_spelling() {
            let mut registry = Registry::new();
            let a = registry.build_class("ns.FooBar").unwrap();
            registry.build_class("ns.foobar").unwrap();
            assert_eq!(registry.graph().type_node(a).unwrap().name(), "FooBar");
        }

        #[test]
        fn default_package_node_is_promoted() {
            let mut registry = Registry::new();
            let a = registry.build_class("Foo").unwrap();
            let b = registry.build_class("ns.Foo").unwrap();
            assert_eq!(a, b);
            assert_eq!(package_name(&registry, a), "ns");
            assert!(registry
                .package_by_name("+global")
                .unwrap()
                .types()
                .is_empty());
        }

        #[test]
        fn default_request_reuses_first_named_node() {
            let mut registry = Registry::new();
            let first = registry.build_class("a.Foo").unwrap();
            registry.build_class("b.Foo").unwrap();
            assert_eq!(registry.build_class("Foo").unwrap(), first);
        }

        #[test]
        fn second_named_package_creates_new_node() {
            let mut registry = Registry::new();
            let a = registry.build_class("a.Foo").unwrap();
            let b = registry.build_class("b.Foo").unwrap();
            assert_ne!(a, b);
        }

        #[test]
        fn kinds_are_indexed_separately() {
            let mut registry = Registry::new();
            let class = registry.build_class("ns.Thing").unwrap();
            let tr = registry.build_trait("ns.Thing").unwrap();
            assert_ne!(class, tr);
            assert_eq!(registry.graph().type_node(tr).unwrap().kind, TypeKind::Trait);
        }

        #[test]
        fn functions_are_always_new() {
            let mut registry = Registry::new();
            let a = registry.build_function("ns.helper").unwrap();
            let b = registry.build_function("ns.helper").unwrap();
            assert_ne!(a, b);
            assert_eq!(registry.package_by_name("ns").unwrap().functions(), &[a, b]);
        }
    }

    mod generations {
        use super::*;

        #[test]
        fn first_get_freezes_once() {
            let mut registry = Registry::new();
            let foo = registry.build_class("Foo").unwrap();
            assert!(!registry.is_frozen());

            assert_eq!(registry.get_class("Foo"), foo);
            assert!(registry.is_frozen());
            assert!(registry.indexes.classes.active.by_name.is_empty());
            assert_eq!(registry.indexes.classes.frozen.first("foo"), Some(foo));

            // A later get does not move the new active generation.
            let bar = registry.build_class("Bar").unwrap();
            registry.get_class("Foo");
            assert_eq!(registry.indexes.classes.active.first("bar"), Some(bar));
        }

        #[test]
        fn build_after_freeze_does_not_reuse_frozen_node() {
            let mut registry = Registry::new();
            let early = registry.build_class("Foo").unwrap();
            registry.get_class("Other");
            let late = registry.build_class("FOO").unwrap();
            assert_ne!(early, late);
            // Lookups prefer the frozen generation.
            assert_eq!(registry.get_class("foo"), early);
        }

        #[test]
        fn get_falls_back_to_active_generation() {
            let mut registry = Registry::new();
            registry.get_class("Anything");
            let late = registry.build_class("ns.Late").unwrap();
            assert_eq!(registry.get_class("ns.Late"), late);
            assert_eq!(registry.get_class("Late"), late);
        }

        #[test]
        fn get_in_named_package_does_not_match_other_packages() {
            let mut registry = Registry::new();
            let a = registry.build_class("a.Foo").unwrap();
            let b = registry.get_class("b.Foo");
            assert_ne!(a, b);
            assert_eq!(package_name(&registry, b), "b");
        }

        #[test]
        fn get_class_or_interface_searches_both_kinds() {
            let mut registry = Registry::new();
            let iface = registry.build_interface("ns.Service").unwrap();
            assert_eq!(registry.get_class_or_interface("ns.Service"), iface);

            let missing = registry.get_class_or_interface("ns.Missing");
            let node = registry.graph().type_node(missing).unwrap();
            assert_eq!(node.kind, TypeKind::Class);
            assert!(registry.placeholders.contains(&missing));
        }
    }

    mod reconciliation {
        use super::*;

        #[test]
        fn placeholder_class_becomes_interface() {
            let mut registry = Registry::new();
            let func = registry.build_function("run").unwrap();
            let placeholder = registry.get_class_or_interface("Bar");
            registry
                .graph_mut()
                .add_callable_dependency(func, placeholder)
                .unwrap();

            let iface = registry.build_interface("Bar").unwrap();

            assert_ne!(iface, placeholder);
            assert_eq!(registry.graph().callable(func).unwrap().dependencies(), &[iface]);
            assert!(registry.graph().type_node(placeholder).is_none());
            assert_eq!(registry.get_class_or_interface("Bar"), iface);
            assert!(registry.placeholders.is_empty());
        }

        #[test]
        fn declared_class_is_not_reconciled() {
            let mut registry = Registry::new();
            let class = registry.build_class("Bar").unwrap();
            registry.build_interface("Bar").unwrap();
            assert!(registry.graph().type_node(class).is_some());
        }

        #[test]
        fn promoted_placeholder_coexists() {
            let mut registry = Registry::new();
            let placeholder = registry.get_class("Bar");
            let promoted = registry.build_class("app.Bar").unwrap();
            assert_eq!(placeholder, promoted);

            let iface = registry.build_interface("lib.Bar").unwrap();
            assert_ne!(iface, placeholder);
            assert!(registry.graph().type_node(placeholder).is_some());
            assert_eq!(package_name(&registry, placeholder), "app");
        }
    }

    mod lifecycle {
        use super::*;

        #[test]
        fn build_after_finalize_fails() {
            let mut registry = Registry::new();
            registry.finalize();
            assert!(registry.is_finalized());

            let err = registry.build_class("ns.Foo").unwrap_err();
            assert_eq!(err, GaugeError::frozen("build_class", "ns.Foo"));
            assert!(registry.build_package("ns").is_err());
            assert!(registry.build_function("f").is_err());
            assert!(registry.build_method("m").is_err());
        }

        #[test]
        fn get_after_finalize_creates_placeholder() {
            let mut registry = Registry::new();
            registry.finalize();
            let t = registry.get_interface("ns.Late");
            assert_eq!(registry.graph().type_node(t).unwrap().kind, TypeKind::Interface);
        }

        #[test]
        fn empty_default_package_is_hidden() {
            let mut registry = Registry::new();
            registry.build_class("ns.Foo").unwrap();
            let names: Vec<_> = registry.packages().map(|p| p.name().to_string()).collect();
            assert_eq!(names, vec!["ns"]);

            registry.build_function("helper").unwrap();
            let names: Vec<_> = registry.packages().map(|p| p.name().to_string()).collect();
            assert_eq!(names, vec!["+global", "ns"]);
        }

        #[test]
        fn invalid_config_is_rejected() {
            let config = RegistryConfig {
                separators: vec![String::new()],
                ..RegistryConfig::default()
            };
            assert!(Registry::with_config(config).is_err());
        }
    }
}
