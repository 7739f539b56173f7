//! Listener fan-out: one walk, many observers.

use super::traits::{with_node_kinds, VisitResult, Visitor};
use crate::graph::{Callable, CodeGraph, Constant, NodeRef, Package, Parameter, Property, Type};

/// Ordered list of visitors notified for every start and end event.
///
/// Listeners are called in registration order. The walk direction is the
/// most permissive answer among them: if any listener wants to continue
/// into children, the walk does.
///
/// Lend a visitor with `&mut` to read its state back after the walk:
///
/// ```ignore
/// let mut collector = MyCollector::default();
/// let mut listeners = ListenerSet::new();
/// listeners.push(&mut collector);
/// traverse(&registry, &mut listeners);
/// drop(listeners);
/// collector.finish();
/// ```
#[derive(Default)]
pub struct ListenerSet<'l, 'g> {
    listeners: Vec<Box<dyn Visitor<'g> + 'l>>,
}

impl<'l, 'g> ListenerSet<'l, 'g> {
    pub fn new() -> Self {
        ListenerSet {
            listeners: Vec::new(),
        }
    }

    /// Register a listener after all existing ones.
    pub fn push(&mut self, listener: impl Visitor<'g> + 'l) {
        self.listeners.push(Box::new(listener));
    }

    /// Builder form of [`push`](ListenerSet::push).
    pub fn with(mut self, listener: impl Visitor<'g> + 'l) -> Self {
        self.push(listener);
        self
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl std::fmt::Debug for ListenerSet<'_, '_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerSet")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Merge the answers of all listeners; no listeners means `Continue`.
///
/// `reduce` drains the iterator, so every listener is called.
fn merge(results: impl Iterator<Item = VisitResult>) -> VisitResult {
    results
        .reduce(VisitResult::most_permissive)
        .unwrap_or(VisitResult::Continue)
}

macro_rules! fanout_methods {
    (
        $(
            $base_name:ident : $node_type:ty
        ),* $(,)?
    ) => {
        paste::paste! {
            $(
                fn [<visit_ $base_name>](&mut self, graph: &'g CodeGraph, node: &'g $node_type) -> VisitResult {
                    merge(
                        self.listeners
                            .iter_mut()
                            .map(|listener| listener.[<visit_ $base_name>](graph, node)),
                    )
                }

                fn [<leave_ $base_name>](&mut self, graph: &'g CodeGraph, node: &'g $node_type) {
                    for listener in &mut self.listeners {
                        listener.[<leave_ $base_name>](graph, node);
                    }
                }
            )*
        }
    };
}

impl<'g> Visitor<'g> for ListenerSet<'_, 'g> {
    fn visit_node(&mut self, graph: &'g CodeGraph, node: NodeRef) -> VisitResult {
        merge(
            self.listeners
                .iter_mut()
                .map(|listener| listener.visit_node(graph, node)),
        )
    }

    fn leave_node(&mut self, graph: &'g CodeGraph, node: NodeRef) {
        for listener in &mut self.listeners {
            listener.leave_node(graph, node);
        }
    }

    with_node_kinds!(fanout_methods);
}
