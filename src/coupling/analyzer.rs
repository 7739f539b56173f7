//! Coupling analyzer: Martin package metrics and package cycles.
//!
//! The analyzer is a [`Visitor`]. [`CouplingAnalyzer::analyze`] walks the
//! registry once and finishes the metrics; a caller that already runs a
//! [`ListenerSet`](depgauge_core::visitor::ListenerSet) can register the
//! analyzer there instead and call [`CouplingAnalyzer::finish`] afterwards.
//!
//! Every declared type reference is attributed to a source package: the
//! owning package of the type for type-level edges and members, and the
//! function's package for free functions. Cross-package pairs are recorded
//! once; same-package references are ignored.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use tracing::{debug, info};

use depgauge_core::graph::{
    Callable, CodeGraph, Constant, Node, Package, PackageId, Parameter, Property, Type, TypeId,
    TypeReferences,
};
use depgauge_core::registry::Registry;
use depgauge_core::visitor::{traverse, VisitResult, Visitor};

use super::cycles::{find_cycle, PackageEdges};
use super::types::{CouplingReport, NodeKey, PackageStats};
use super::zones::classify_zone;

/// Raw counts gathered for a package during the walk.
#[derive(Debug, Default)]
struct PackageTally {
    name: String,
    total_types: usize,
    abstract_types: usize,
}

/// Computes per-package coupling metrics from one traversal.
#[derive(Debug, Default)]
pub struct CouplingAnalyzer {
    analyzed: bool,
    tallies: BTreeMap<PackageId, PackageTally>,
    package_efferents: PackageEdges,
    package_afferents: PackageEdges,
    type_efferents: BTreeMap<TypeId, BTreeSet<TypeId>>,
    type_afferents: BTreeMap<TypeId, BTreeSet<TypeId>>,
    stats: BTreeMap<PackageId, PackageStats>,
    cycles: BTreeMap<PackageId, Option<Vec<PackageId>>>,
}

impl CouplingAnalyzer {
    pub fn new() -> Self {
        CouplingAnalyzer::default()
    }

    /// Walk the registry and compute all metrics.
    ///
    /// Only the first call does any work; later calls keep the cached
    /// results.
    pub fn analyze(&mut self, registry: &Registry) -> &Self {
        if self.analyzed {
            debug!("coupling analysis already done, keeping cached results");
            return self;
        }
        traverse(registry, self);
        self.finish();
        self
    }

    /// Derive metrics and cycles from the collected edges.
    ///
    /// Call after a traversal that included this analyzer. Idempotent.
    pub fn finish(&mut self) {
        if self.analyzed {
            return;
        }

        for (&package, tally) in &self.tallies {
            let ca = self.package_afferents.get(&package).map_or(0, BTreeSet::len);
            let ce = self.package_efferents.get(&package).map_or(0, BTreeSet::len);
            let abstractness = if tally.total_types == 0 {
                0.0
            } else {
                tally.abstract_types as f64 / tally.total_types as f64
            };
            let instability = if ca + ce == 0 {
                0.0
            } else {
                ce as f64 / (ca + ce) as f64
            };
            let distance = (abstractness + instability - 1.0).abs();

            self.stats.insert(
                package,
                PackageStats {
                    package: tally.name.clone(),
                    total_types: tally.total_types,
                    concrete_types: tally.total_types - tally.abstract_types,
                    abstract_types: tally.abstract_types,
                    ca,
                    ce,
                    abstractness,
                    instability,
                    distance,
                    zone: classify_zone(instability, abstractness),
                },
            );
        }

        for &package in self.tallies.keys() {
            let cycle = find_cycle(&self.package_efferents, package);
            self.cycles.insert(package, cycle);
        }

        self.analyzed = true;
        info!(
            packages = self.stats.len(),
            cyclic = self.cycles.values().filter(|c| c.is_some()).count(),
            "coupling analysis complete"
        );
    }

    pub fn is_analyzed(&self) -> bool {
        self.analyzed
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Metrics for a package; `None` before analysis or for unknown packages.
    pub fn stats(&self, package: PackageId) -> Option<&PackageStats> {
        self.stats.get(&package)
    }

    /// Nodes depending on `node`: packages for a package, types for a type.
    pub fn afferents(&self, node: impl Into<NodeKey>) -> Vec<NodeKey> {
        if !self.analyzed {
            return Vec::new();
        }
        match node.into() {
            NodeKey::Package(id) => keys(self.package_afferents.get(&id)),
            NodeKey::Type(id) => keys(self.type_afferents.get(&id)),
        }
    }

    /// Nodes `node` depends on: packages for a package, types for a type.
    pub fn efferents(&self, node: impl Into<NodeKey>) -> Vec<NodeKey> {
        if !self.analyzed {
            return Vec::new();
        }
        match node.into() {
            NodeKey::Package(id) => keys(self.package_efferents.get(&id)),
            NodeKey::Type(id) => keys(self.type_efferents.get(&id)),
        }
    }

    /// Cycle reachable from `package`, with the repeated package at both ends.
    ///
    /// A package that only leads into a cycle gets that cycle back, without
    /// the packages on the way in.
    pub fn cycle(&self, package: PackageId) -> Option<&[PackageId]> {
        self.cycles.get(&package)?.as_deref()
    }

    /// Serializable summary: stats sorted by package name plus every
    /// distinct cycle.
    pub fn summary(&self) -> CouplingReport {
        let mut packages: Vec<PackageStats> = self.stats.values().cloned().collect();
        packages.sort_by(|a, b| a.package.cmp(&b.package));

        let mut seen: HashSet<BTreeSet<PackageId>> = HashSet::new();
        let mut cycles: Vec<Vec<String>> = Vec::new();
        for cycle in self.cycles.values().flatten() {
            let members: BTreeSet<PackageId> = cycle.iter().copied().collect();
            if seen.insert(members) {
                cycles.push(cycle.iter().map(|id| self.package_name(*id)).collect());
            }
        }

        CouplingReport { packages, cycles }
    }

    fn package_name(&self, package: PackageId) -> String {
        self.tallies
            .get(&package)
            .map_or_else(|| package.to_string(), |tally| tally.name.clone())
    }

    // ========================================================================
    // Collection
    // ========================================================================

    fn tally(&mut self, graph: &CodeGraph, package: PackageId) -> &mut PackageTally {
        self.tallies.entry(package).or_insert_with(|| PackageTally {
            name: graph
                .package(package)
                .map(|p| p.name().to_string())
                .unwrap_or_default(),
            ..PackageTally::default()
        })
    }

    /// Record every reference of `node` as an edge from `source`.
    fn record_all(
        &mut self,
        graph: &CodeGraph,
        source: Option<(Option<TypeId>, PackageId)>,
        node: &impl TypeReferences,
    ) {
        let Some((source_type, source_package)) = source else {
            return;
        };
        for target in node.referenced_types() {
            self.record(graph, source_type, source_package, target);
        }
    }

    fn record(
        &mut self,
        graph: &CodeGraph,
        source_type: Option<TypeId>,
        source_package: PackageId,
        target: TypeId,
    ) {
        let Some(target_package) = graph.package_of(target) else {
            return;
        };
        if target_package == source_package {
            return;
        }
        self.tally(graph, source_package);
        self.tally(graph, target_package);
        self.package_efferents
            .entry(source_package)
            .or_default()
            .insert(target_package);
        self.package_afferents
            .entry(target_package)
            .or_default()
            .insert(source_package);
        if let Some(source_type) = source_type {
            self.type_efferents
                .entry(source_type)
                .or_default()
                .insert(target);
            self.type_afferents
                .entry(target)
                .or_default()
                .insert(source_type);
        }
    }

    fn visit_type(&mut self, graph: &CodeGraph, node: &Type) -> VisitResult {
        let tally = self.tally(graph, node.package());
        tally.total_types += 1;
        if node.is_abstract() {
            tally.abstract_types += 1;
        }
        self.record_all(graph, Some((Some(node.type_id), node.package())), node);
        VisitResult::Continue
    }
}

fn keys<K: Copy + Into<NodeKey>>(set: Option<&BTreeSet<K>>) -> Vec<NodeKey> {
    set.into_iter().flatten().map(|&k| k.into()).collect()
}

/// Source of edges declared by a callable: its owning type for methods, its
/// package for functions.
fn callable_source(graph: &CodeGraph, callable: &Callable) -> Option<(Option<TypeId>, PackageId)> {
    match callable.owner() {
        Some(owner) => Some((Some(owner), graph.package_of(owner)?)),
        None => Some((None, callable.package()?)),
    }
}

fn member_source(graph: &CodeGraph, owner: TypeId) -> Option<(Option<TypeId>, PackageId)> {
    Some((Some(owner), graph.package_of(owner)?))
}

impl<'g> Visitor<'g> for CouplingAnalyzer {
    fn visit_package(&mut self, graph: &'g CodeGraph, node: &'g Package) -> VisitResult {
        if self.analyzed {
            return VisitResult::Stop;
        }
        self.tally(graph, node.package_id);
        VisitResult::Continue
    }

    fn visit_class(&mut self, graph: &'g CodeGraph, node: &'g Type) -> VisitResult {
        self.visit_type(graph, node)
    }

    fn visit_interface(&mut self, graph: &'g CodeGraph, node: &'g Type) -> VisitResult {
        self.visit_type(graph, node)
    }

    fn visit_trait_type(&mut self, graph: &'g CodeGraph, node: &'g Type) -> VisitResult {
        self.visit_type(graph, node)
    }

    fn visit_function(&mut self, graph: &'g CodeGraph, node: &'g Callable) -> VisitResult {
        self.record_all(graph, callable_source(graph, node), node);
        VisitResult::Continue
    }

    fn visit_method(&mut self, graph: &'g CodeGraph, node: &'g Callable) -> VisitResult {
        self.record_all(graph, callable_source(graph, node), node);
        VisitResult::Continue
    }

    fn visit_parameter(&mut self, graph: &'g CodeGraph, node: &'g Parameter) -> VisitResult {
        let source = graph
            .callable(node.callable())
            .and_then(|callable| callable_source(graph, callable));
        self.record_all(graph, source, node);
        VisitResult::Continue
    }

    fn visit_property(&mut self, graph: &'g CodeGraph, node: &'g Property) -> VisitResult {
        self.record_all(graph, member_source(graph, node.owner()), node);
        VisitResult::Continue
    }

    fn visit_constant(&mut self, graph: &'g CodeGraph, node: &'g Constant) -> VisitResult {
        self.record_all(graph, member_source(graph, node.owner()), node);
        VisitResult::Continue
    }
}
