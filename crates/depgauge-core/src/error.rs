//! Error types and error code constants for depgauge.
//!
//! This module provides a single error type (`GaugeError`) shared by the
//! registry, the graph and configuration handling.
//!
//! ## Error Code Mapping
//!
//! - `2`: Invalid configuration (bad input from caller)
//! - `3`: State errors (mutation of a finalized registry)
//! - `4`: Unknown node (a handle that does not, or no longer, exists)
//!
//! ## Design
//!
//! - **State errors are fatal**: a registry that rejected a write cannot
//!   produce trustworthy metrics, so callers abort the batch.
//! - **Lookup misses are not errors**: unresolved names resolve to
//!   placeholders and queries return `None`/empty.

use std::fmt;

use thiserror::Error;

// ============================================================================
// Error Codes
// ============================================================================

/// Stable integer codes for [`GaugeError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ErrorCode {
    /// Invalid configuration from caller.
    InvalidConfig = 2,
    /// Registry state error (write after finalize).
    StateError = 3,
    /// Handle does not refer to a live node.
    UnknownNode = 4,
}

impl ErrorCode {
    /// Get the numeric code value.
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ============================================================================
// Unified Error Type
// ============================================================================

/// Error type for registry, graph and configuration operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GaugeError {
    /// A `build_*` call arrived after the registry was finalized.
    #[error("registry is frozen for writes: {operation}('{name}')")]
    RegistryFrozenForWrites {
        operation: &'static str,
        name: String,
    },

    /// A graph mutation referenced a node that is not in the graph.
    #[error("unknown node: {node}")]
    UnknownNode { node: String },

    /// Configuration failed validation.
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },
}

/// Result alias used throughout depgauge.
pub type Result<T> = std::result::Result<T, GaugeError>;

impl From<&GaugeError> for ErrorCode {
    fn from(err: &GaugeError) -> Self {
        match err {
            GaugeError::RegistryFrozenForWrites { .. } => ErrorCode::StateError,
            GaugeError::UnknownNode { .. } => ErrorCode::UnknownNode,
            GaugeError::InvalidConfig { .. } => ErrorCode::InvalidConfig,
        }
    }
}

impl From<GaugeError> for ErrorCode {
    fn from(err: GaugeError) -> Self {
        ErrorCode::from(&err)
    }
}

impl From<serde_json::Error> for GaugeError {
    fn from(err: serde_json::Error) -> Self {
        GaugeError::InvalidConfig {
            message: err.to_string(),
        }
    }
}

// ============================================================================
// Convenience Constructors
// ============================================================================

impl GaugeError {
    /// Create a frozen-for-writes error.
    pub fn frozen(operation: &'static str, name: impl Into<String>) -> Self {
        GaugeError::RegistryFrozenForWrites {
            operation,
            name: name.into(),
        }
    }

    /// Create an unknown node error from any displayable handle.
    pub fn unknown_node(node: impl fmt::Display) -> Self {
        GaugeError::UnknownNode {
            node: node.to_string(),
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        GaugeError::InvalidConfig {
            message: message.into(),
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> ErrorCode {
        ErrorCode::from(self)
    }

    /// State errors abort the whole run.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            GaugeError::RegistryFrozenForWrites { .. } | GaugeError::UnknownNode { .. }
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
