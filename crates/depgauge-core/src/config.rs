//! Registry configuration.
//!
//! Every field has a default so a caller can deserialize a partial JSON
//! document (or none at all) and get a working registry. Precedence, lowest
//! to highest: defaults, JSON document, environment overrides.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{GaugeError, Result};

/// Environment variable overriding [`RegistryConfig::default_package`].
pub const ENV_DEFAULT_PACKAGE: &str = "DEPGAUGE_DEFAULT_PACKAGE";

/// Name of the fallback package used when no package is given.
pub const DEFAULT_PACKAGE: &str = "+global";

/// Table of built-in type names owned by one synthetic package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuiltinPackage {
    /// Synthetic package name (e.g. `+standard`).
    pub package: String,
    /// Type names resolved into `package` when written unqualified.
    pub types: Vec<String>,
}

impl BuiltinPackage {
    pub fn new<I, S>(package: impl Into<String>, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        BuiltinPackage {
            package: package.into(),
            types: types.into_iter().map(Into::into).collect(),
        }
    }
}

/// Configuration of a [`Registry`](crate::registry::Registry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Fallback package for unqualified, non-builtin names.
    pub default_package: String,
    /// Namespace separators; a qualified name is split on the last one found.
    pub separators: Vec<String>,
    /// Built-in type tables.
    pub builtin_packages: Vec<BuiltinPackage>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        RegistryConfig {
            default_package: DEFAULT_PACKAGE.to_string(),
            separators: vec!["\\".to_string(), ".".to_string()],
            builtin_packages: default_builtins(),
        }
    }
}

fn default_builtins() -> Vec<BuiltinPackage> {
    vec![
        BuiltinPackage::new(
            "+standard",
            [
                "stdClass",
                "Closure",
                "Generator",
                "Traversable",
                "Iterator",
                "IteratorAggregate",
                "ArrayAccess",
                "Countable",
                "Serializable",
                "Stringable",
                "Throwable",
                "Exception",
                "ErrorException",
                "Error",
                "TypeError",
                "DateTime",
                "DateTimeImmutable",
                "DateTimeInterface",
                "DateInterval",
                "Reflection",
                "ReflectionClass",
                "ReflectionMethod",
                "ReflectionProperty",
            ],
        ),
        BuiltinPackage::new(
            "+spl",
            [
                "ArrayObject",
                "ArrayIterator",
                "SplObjectStorage",
                "SplStack",
                "SplQueue",
                "SplFixedArray",
                "SplHeap",
                "SplPriorityQueue",
                "SplSubject",
                "SplObserver",
                "LogicException",
                "RuntimeException",
                "InvalidArgumentException",
                "DomainException",
                "LengthException",
                "OutOfRangeException",
                "OutOfBoundsException",
                "OverflowException",
                "UnderflowException",
                "RangeException",
                "UnexpectedValueException",
                "BadFunctionCallException",
                "BadMethodCallException",
            ],
        ),
    ]
}

impl RegistryConfig {
    /// Parse a (possibly partial) JSON document; missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: RegistryConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the registry cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.default_package.trim().is_empty() {
            return Err(GaugeError::invalid_config(
                "default_package must not be empty",
            ));
        }
        if self.separators.iter().any(|s| s.is_empty()) {
            return Err(GaugeError::invalid_config("separators must not be empty"));
        }
        for builtin in &self.builtin_packages {
            if builtin.package.is_empty() {
                return Err(GaugeError::invalid_config(
                    "builtin package name must not be empty",
                ));
            }
        }
        Ok(())
    }

    /// Apply overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_DEFAULT_PACKAGE).filter(|v| !v.is_empty()) {
            debug!(default_package = %value, "default package overridden from environment");
            self.default_package = value;
        }
    }

    /// Case-insensitive lookup table: lowercased type name → builtin package.
    ///
    /// When a name appears in several tables the first one wins.
    pub fn builtin_index(&self) -> HashMap<String, String> {
        let mut index = HashMap::new();
        for builtin in &self.builtin_packages {
            for name in &builtin.types {
                index
                    .entry(name.to_lowercase())
                    .or_insert_with(|| builtin.package.clone());
            }
        }
        index
    }
}
