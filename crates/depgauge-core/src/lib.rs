//! Core infrastructure for depgauge.
//!
//! This crate provides the language-agnostic analysis model:
//! - Node graph (packages, types, callables) with reciprocal dependency edges
//! - Symbol registry resolving qualified names to live nodes, out of order
//! - Traversal protocol with visitor hooks and listener fan-out
//! - Error types and error codes
//! - Registry configuration

pub mod config;
pub mod error;
pub mod graph;
pub mod registry;
pub mod types;
pub mod visitor;
