//! Visitor trait definition for graph traversal.

use crate::graph::{Callable, CodeGraph, Constant, Node, NodeRef, Package, Parameter, Property, Type};

/// Result of visiting a node - controls traversal behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VisitResult {
    /// Continue traversal into children.
    ///
    /// After visiting children, `leave_*` will be called for this node.
    #[default]
    Continue,

    /// Skip children, continue with siblings.
    ///
    /// `leave_*` is still called for this node.
    SkipChildren,

    /// Stop traversal entirely. No further `visit_*` or `leave_*` calls.
    Stop,
}

impl VisitResult {
    /// Combine two answers, keeping the one that lets the walk do more.
    ///
    /// `Continue` beats `SkipChildren`, which beats `Stop`.
    pub fn most_permissive(self, other: VisitResult) -> VisitResult {
        match (self, other) {
            (VisitResult::Continue, _) | (_, VisitResult::Continue) => VisitResult::Continue,
            (VisitResult::SkipChildren, _) | (_, VisitResult::SkipChildren) => {
                VisitResult::SkipChildren
            }
            (VisitResult::Stop, VisitResult::Stop) => VisitResult::Stop,
        }
    }
}

/// Invoke `$callback!` with the full list of node-kind hooks.
///
/// Each entry is `hook_name: NodeType`; the visitor, the `&mut V` forwarding
/// impl and the listener fan-out are all generated from this one list.
macro_rules! with_node_kinds {
    ($callback:ident) => {
        $callback! {
            package: Package,
            class: Type,
            interface: Type,
            trait_type: Type,
            function: Callable,
            method: Callable,
            parameter: Parameter,
            property: Property,
            constant: Constant,
        }
    };
}
pub(crate) use with_node_kinds;

/// Generate `visit_*`/`leave_*` pairs that default to the generic hooks.
macro_rules! visitor_methods {
    (
        $(
            $base_name:ident : $node_type:ty
        ),* $(,)?
    ) => {
        paste::paste! {
            $(
                #[doc = concat!("Visit a [`", stringify!($node_type), "`] node (`", stringify!($base_name), "`).")]
                #[doc = ""]
                #[doc = "Called before descending into children. Defaults to [`Visitor::visit_node`]."]
                fn [<visit_ $base_name>](&mut self, graph: &'g CodeGraph, node: &'g $node_type) -> VisitResult {
                    self.visit_node(graph, node.node_ref())
                }

                #[doc = concat!("Leave a [`", stringify!($node_type), "`] node (`", stringify!($base_name), "`).")]
                #[doc = ""]
                #[doc = "Called after all children, even if `SkipChildren` was returned. Defaults to [`Visitor::leave_node`]."]
                fn [<leave_ $base_name>](&mut self, graph: &'g CodeGraph, node: &'g $node_type) {
                    self.leave_node(graph, node.node_ref())
                }
            )*
        }
    };
}

/// Read-only visitor over the node graph.
///
/// Each node kind has a `visit_*`/`leave_*` pair. Observers that only care
/// about "some node started/ended" implement [`visit_node`](Visitor::visit_node)
/// and [`leave_node`](Visitor::leave_node); every specific hook forwards there
/// unless overridden.
///
/// # Example
///
/// ```ignore
/// use depgauge_core::visitor::{Visitor, VisitResult};
///
/// struct ClassCounter {
///     count: usize,
/// }
///
/// impl<'g> Visitor<'g> for ClassCounter {
///     fn visit_class(&mut self, _graph: &'g CodeGraph, _node: &'g Type) -> VisitResult {
///         self.count += 1;
///         VisitResult::SkipChildren
///     }
/// }
/// ```
pub trait Visitor<'g> {
    /// Generic start hook for any node kind.
    #[allow(unused_variables)]
    fn visit_node(&mut self, graph: &'g CodeGraph, node: NodeRef) -> VisitResult {
        VisitResult::Continue
    }

    /// Generic end hook for any node kind.
    #[allow(unused_variables)]
    fn leave_node(&mut self, graph: &'g CodeGraph, node: NodeRef) {}

    with_node_kinds!(visitor_methods);
}

macro_rules! forward_methods {
    (
        $(
            $base_name:ident : $node_type:ty
        ),* $(,)?
    ) => {
        paste::paste! {
            $(
                fn [<visit_ $base_name>](&mut self, graph: &'g CodeGraph, node: &'g $node_type) -> VisitResult {
                    (**self).[<visit_ $base_name>](graph, node)
                }

                fn [<leave_ $base_name>](&mut self, graph: &'g CodeGraph, node: &'g $node_type) {
                    (**self).[<leave_ $base_name>](graph, node)
                }
            )*
        }
    };
}

/// Lets a caller lend a visitor to a [`ListenerSet`](super::ListenerSet) and
/// read its state back after the walk.
impl<'g, V: Visitor<'g> + ?Sized> Visitor<'g> for &mut V {
    fn visit_node(&mut self, graph: &'g CodeGraph, node: NodeRef) -> VisitResult {
        (**self).visit_node(graph, node)
    }

    fn leave_node(&mut self, graph: &'g CodeGraph, node: NodeRef) {
        (**self).leave_node(graph, node)
    }

    with_node_kinds!(forward_methods);
}
