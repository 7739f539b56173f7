//! Visitor infrastructure for graph traversal.
//!
//! Node kinds form a closed set ([`NodeRef`](crate::graph::NodeRef)); the
//! [`Visitor`] trait has one `visit_*`/`leave_*` pair per kind plus generic
//! `visit_node`/`leave_node` hooks that every specific hook defaults to.
//!
//! # Traversal Order
//!
//! - **Depth-first, pre-order** for `visit_*` methods
//! - **Post-order** for `leave_*` methods
//! - Package: classes, interfaces, traits, then functions
//! - Type: constants, properties, then methods
//! - Callable: parameters
//!
//! # Listeners
//!
//! [`ListenerSet`] fans every event out to several visitors in registration
//! order, so one walk feeds several observers:
//!
//! ```ignore
//! use depgauge_core::visitor::{traverse, ListenerSet};
//!
//! let mut listeners = ListenerSet::new().with(&mut metrics).with(&mut report);
//! traverse(&registry, &mut listeners);
//! ```

mod dispatch;
mod listeners;
mod traits;

pub use dispatch::{traverse, walk_callable, walk_package, walk_type};
pub use listeners::ListenerSet;
pub use traits::{VisitResult, Visitor};
