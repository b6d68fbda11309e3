use serde::{Deserialize, Serialize};

/// Explicit `reference package prefix -> target namespace prefix` rewrite
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceMapping {
    pub reference_prefix: String,
    pub target_prefix: String,

    /// Free text, not used by matching
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub justification: Option<String>,
}

impl NamespaceMapping {
    pub fn new(reference_prefix: impl Into<String>, target_prefix: impl Into<String>) -> Self {
        Self {
            reference_prefix: reference_prefix.into(),
            target_prefix: target_prefix.into(),
            justification: None,
        }
    }
}

/// Explicit pairing of a reference full name with a target full name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeOverride {
    /// Reference full name, e.g. `a.b.Outer$Inner`
    pub reference: String,
    /// Target full name, e.g. `A.B.Outer+Inner`
    pub target: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub justification: Option<String>,
}

impl TypeOverride {
    pub fn new(reference: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            target: target.into(),
            justification: None,
        }
    }
}

/// Platform type that corresponds to reference types without any naming relation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WellKnownType {
    /// Target full name without generic arity, e.g. `System.Object`
    pub target: String,
    /// Reference names accepted as equivalent
    pub references: Vec<String>,
}

impl WellKnownType {
    fn new(target: &str, references: &[&str]) -> Self {
        Self {
            target: target.to_string(),
            references: references.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Immutable configuration for one comparison run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonConfig {
    #[serde(default)]
    pub namespace_mappings: Vec<NamespaceMapping>,

    #[serde(default)]
    pub overrides: Vec<TypeOverride>,

    #[serde(default = "default_well_known_types")]
    pub well_known_types: Vec<WellKnownType>,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            namespace_mappings: Vec::new(),
            overrides: Vec::new(),
            well_known_types: default_well_known_types(),
        }
    }
}

impl ComparisonConfig {
    #[must_use]
    pub fn with_namespace_mapping(mut self, mapping: NamespaceMapping) -> Self {
        self.namespace_mappings.push(mapping);
        self
    }

    #[must_use]
    pub fn with_override(mut self, type_override: TypeOverride) -> Self {
        self.overrides.push(type_override);
        self
    }
}

/// Built-in platform equivalences
#[must_use]
pub fn default_well_known_types() -> Vec<WellKnownType> {
    vec![
        WellKnownType::new("System.Object", &["java.lang.Object"]),
        WellKnownType::new("System.ValueType", &["java.lang.Object"]),
        WellKnownType::new("System.Enum", &["java.lang.Enum"]),
        WellKnownType::new(
            "System.Exception",
            &["java.lang.Exception", "java.lang.RuntimeException"],
        ),
        WellKnownType::new("System.IO.IOException", &["java.io.IOException"]),
        WellKnownType::new(
            "System.IO.FileNotFoundException",
            &["java.io.FileNotFoundException"],
        ),
        WellKnownType::new("System.String", &["java.lang.String"]),
        WellKnownType::new("System.Boolean", &["boolean", "java.lang.Boolean"]),
        WellKnownType::new("System.Char", &["char", "java.lang.Character"]),
        WellKnownType::new("System.SByte", &["byte", "java.lang.Byte"]),
        WellKnownType::new("System.Byte", &["byte", "java.lang.Byte"]),
        WellKnownType::new("System.Int16", &["short", "java.lang.Short"]),
        WellKnownType::new("System.Int32", &["int", "java.lang.Integer"]),
        WellKnownType::new("System.Int64", &["long", "java.lang.Long"]),
        WellKnownType::new("System.Single", &["float", "java.lang.Float"]),
        WellKnownType::new("System.Double", &["double", "java.lang.Double"]),
        WellKnownType::new("System.Void", &["void"]),
        WellKnownType::new("System.IComparable", &["java.lang.Comparable"]),
        WellKnownType::new("System.ICloneable", &["java.lang.Cloneable"]),
        WellKnownType::new(
            "System.IDisposable",
            &["java.io.Closeable", "java.lang.AutoCloseable"],
        ),
        WellKnownType::new(
            "System.Collections.Generic.IEnumerable",
            &["java.lang.Iterable"],
        ),
    ]
}
