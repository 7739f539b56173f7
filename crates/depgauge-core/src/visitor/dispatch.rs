//! Walk functions for graph traversal.
//!
//! - **Pre-order**: `visit_*` is called before descending into children
//! - **Post-order**: `leave_*` is called after all children have been visited
//! - **Declaration order** within each bucket
//!
//! Package children are walked as classes, then interfaces, then traits,
//! then functions. Type children are constants, properties, then methods.
//! Callable children are parameters.
//!
//! # Control Flow
//!
//! - `VisitResult::Continue` - traverse into children
//! - `VisitResult::SkipChildren` - skip children but still call `leave_*`
//! - `VisitResult::Stop` - halt traversal immediately (no `leave_*` called)

use super::traits::{VisitResult, Visitor};
use crate::graph::{Callable, CallableKind, CodeGraph, Package, Type, TypeKind};
use crate::registry::Registry;

/// Walk every package the registry reports, in creation order.
///
/// Returns `Stop` if the visitor stopped the walk, `Continue` otherwise.
pub fn traverse<'g, V: Visitor<'g> + ?Sized>(registry: &'g Registry, visitor: &mut V) -> VisitResult {
    let graph = registry.graph();
    for package in registry.packages() {
        if walk_package(visitor, graph, package) == VisitResult::Stop {
            return VisitResult::Stop;
        }
    }
    VisitResult::Continue
}

/// Walk a [`Package`] node.
pub fn walk_package<'g, V: Visitor<'g> + ?Sized>(
    visitor: &mut V,
    graph: &'g CodeGraph,
    node: &'g Package,
) -> VisitResult {
    let result = visitor.visit_package(graph, node);
    match result {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            for kind in [TypeKind::Class, TypeKind::Interface, TypeKind::Trait] {
                let types = node
                    .types()
                    .iter()
                    .filter_map(|&id| graph.type_node(id))
                    .filter(|t| t.kind == kind);
                for type_node in types {
                    if walk_type(visitor, graph, type_node) == VisitResult::Stop {
                        return VisitResult::Stop;
                    }
                }
            }
            for function in node.functions().iter().filter_map(|&id| graph.callable(id)) {
                if walk_callable(visitor, graph, function) == VisitResult::Stop {
                    return VisitResult::Stop;
                }
            }
        }
    }
    visitor.leave_package(graph, node);
    VisitResult::Continue
}

/// Walk a [`Type`] node, dispatching on its kind.
pub fn walk_type<'g, V: Visitor<'g> + ?Sized>(
    visitor: &mut V,
    graph: &'g CodeGraph,
    node: &'g Type,
) -> VisitResult {
    let result = match node.kind {
        TypeKind::Class => visitor.visit_class(graph, node),
        TypeKind::Interface => visitor.visit_interface(graph, node),
        TypeKind::Trait => visitor.visit_trait_type(graph, node),
    };
    match result {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            for constant in node.constants().iter().filter_map(|&id| graph.constant(id)) {
                if visitor.visit_constant(graph, constant) == VisitResult::Stop {
                    return VisitResult::Stop;
                }
                visitor.leave_constant(graph, constant);
            }
            for property in node.properties().iter().filter_map(|&id| graph.property(id)) {
                if visitor.visit_property(graph, property) == VisitResult::Stop {
                    return VisitResult::Stop;
                }
                visitor.leave_property(graph, property);
            }
            for method in node.methods().iter().filter_map(|&id| graph.callable(id)) {
                if walk_callable(visitor, graph, method) == VisitResult::Stop {
                    return VisitResult::Stop;
                }
            }
        }
    }
    match node.kind {
        TypeKind::Class => visitor.leave_class(graph, node),
        TypeKind::Interface => visitor.leave_interface(graph, node),
        TypeKind::Trait => visitor.leave_trait_type(graph, node),
    }
    VisitResult::Continue
}

/// Walk a [`Callable`] node (function or method).
pub fn walk_callable<'g, V: Visitor<'g> + ?Sized>(
    visitor: &mut V,
    graph: &'g CodeGraph,
    node: &'g Callable,
) -> VisitResult {
    let result = match node.kind {
        CallableKind::Function => visitor.visit_function(graph, node),
        CallableKind::Method => visitor.visit_method(graph, node),
    };
    match result {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            for parameter in node.parameters().iter().filter_map(|&id| graph.parameter(id)) {
                if visitor.visit_parameter(graph, parameter) == VisitResult::Stop {
                    return VisitResult::Stop;
                }
                visitor.leave_parameter(graph, parameter);
            }
        }
    }
    match node.kind {
        CallableKind::Function => visitor.leave_function(graph, node),
        CallableKind::Method => visitor.leave_method(graph, node),
    }
    VisitResult::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Node, NodeRef};

    /// Records every event through the generic hooks only.
    #[derive(Default)]
    struct EventLog {
        events: Vec<String>,
    }

    impl<'g> Visitor<'g> for EventLog {
        fn visit_node(&mut self, graph: &'g CodeGraph, node: NodeRef) -> VisitResult {
            self.events.push(format!("+{}", describe(graph, node)));
            VisitResult::Continue
        }

        fn leave_node(&mut self, graph: &'g CodeGraph, node: NodeRef) {
            self.events.push(format!("-{}", describe(graph, node)));
        }
    }

    fn describe(graph: &CodeGraph, node: NodeRef) -> String {
        match node {
            NodeRef::Package(id) => graph.package(id).unwrap().name().to_string(),
            NodeRef::Type(id) => graph.type_node(id).unwrap().name().to_string(),
            NodeRef::Callable(id) => graph.callable(id).unwrap().name().to_string(),
            NodeRef::Parameter(id) => graph.parameter(id).unwrap().name().to_string(),
            NodeRef::Property(id) => graph.property(id).unwrap().name().to_string(),
            NodeRef::Constant(id) => graph.constant(id).unwrap().name().to_string(),
        }
    }

    /// `app` has a trait, an interface and a class declared in that order,
    /// plus a function; the class has one member of each kind.
    fn sample_registry() -> Registry {
        let mut registry = Registry::new();
        registry.build_trait("app.T").unwrap();
        registry.build_interface("app.I").unwrap();
        let class = registry.build_class("app.C").unwrap();
        let func = registry.build_function("app.f").unwrap();
        let method = registry.build_method("m").unwrap();

        let graph = registry.graph_mut();
        graph.add_method(class, method).unwrap();
        graph.add_parameter(method, "x", None).unwrap();
        graph.add_property(class, "p", None).unwrap();
        graph.add_constant(class, "K").unwrap();
        graph.add_parameter(func, "y", None).unwrap();
        registry
    }

    #[test]
    fn walk_order_and_generic_hooks() {
        let registry = sample_registry();
        let mut log = EventLog::default();
        assert_eq!(traverse(&registry, &mut log), VisitResult::Continue);

        let expected = [
            "+app", "+C", "+K", "-K", "+p", "-p", "+m", "+x", "-x", "-m", "-C", "+I", "-I",
            "+T", "-T", "+f", "+y", "-y", "-f", "-app",
        ];
        assert_eq!(log.events, expected);
    }

    #[test]
    fn skip_children_still_leaves() {
        struct SkipClasses(EventLog);

        impl<'g> Visitor<'g> for SkipClasses {
            fn visit_node(&mut self, graph: &'g CodeGraph, node: NodeRef) -> VisitResult {
                self.0.visit_node(graph, node)
            }

            fn leave_node(&mut self, graph: &'g CodeGraph, node: NodeRef) {
                self.0.leave_node(graph, node)
            }

            fn visit_class(&mut self, graph: &'g CodeGraph, node: &'g Type) -> VisitResult {
                self.0.visit_node(graph, node.node_ref());
                VisitResult::SkipChildren
            }
        }

        let registry = sample_registry();
        let mut visitor = SkipClasses(EventLog::default());
        traverse(&registry, &mut visitor);
        let events = &visitor.0.events;
        assert_eq!(&events[..4], &["+app", "+C", "-C", "+I"]);
    }

    #[test]
    fn stop_halts_without_leave() {
        struct StopAtMethod(Vec<String>);

        impl<'g> Visitor<'g> for StopAtMethod {
            fn visit_node(&mut self, graph: &'g CodeGraph, node: NodeRef) -> VisitResult {
                self.0.push(describe(graph, node));
                VisitResult::Continue
            }

            fn visit_method(&mut self, _graph: &'g CodeGraph, _node: &'g Callable) -> VisitResult {
                VisitResult::Stop
            }

            fn leave_node(&mut self, _graph: &'g CodeGraph, _node: NodeRef) {
                panic!("leave must not run after stop");
            }

            fn leave_constant(&mut self, _graph: &'g CodeGraph, _node: &'g crate::graph::Constant) {}

            fn leave_property(&mut self, _graph: &'g CodeGraph, _node: &'g crate::graph::Property) {}
        }

        let registry = sample_registry();
        let mut visitor = StopAtMethod(Vec::new());
        assert_eq!(traverse(&registry, &mut visitor), VisitResult::Stop);
        assert_eq!(visitor.0, vec!["app", "C", "K", "p"]);
    }

    #[test]
    fn empty_default_package_is_not_walked() {
        let mut registry = Registry::new();
        registry.build_class("ns.Foo").unwrap();
        let mut log = EventLog::default();
        traverse(&registry, &mut log);
        assert_eq!(log.events, vec!["+ns", "+Foo", "-Foo", "-ns"]);
    }
}
