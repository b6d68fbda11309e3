use serde::{Deserialize, Serialize};

use crate::core::types::{MemberKind, Side, TypeKind};
use crate::matching::naming;

/// Reference package and name a target type declares itself equivalent to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclaredEquivalent {
    /// Reference package, e.g. `org.example.search`
    pub package: String,
    /// Reference type name with `.` between nesting levels, e.g. `Outer.Inner`
    pub name: String,
}

/// Acknowledged divergences on a target type, each with a justification
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnownDifferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifiers: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contracts: Option<String>,
}

impl KnownDifferences {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modifiers.is_none() && self.base_type.is_none() && self.contracts.is_none()
    }
}

/// Kind-specific attributes of a member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "member_kind", rename_all = "snake_case")]
pub enum MemberDetail {
    Field {
        declared_type: String,
    },
    Property {
        declared_type: String,
        #[serde(default)]
        has_getter: bool,
        #[serde(default)]
        has_setter: bool,
    },
    Method {
        #[serde(default)]
        parameters: Vec<String>,
        return_type: String,
    },
    Constructor {
        #[serde(default)]
        parameters: Vec<String>,
    },
}

/// A single declared member of a type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDescriptor {
    pub name: String,

    /// Modifier tokens in the owning side's vocabulary
    #[serde(default)]
    pub modifiers: Vec<String>,

    #[serde(default)]
    pub is_static: bool,

    #[serde(flatten)]
    pub detail: MemberDetail,

    /// Justification for an acknowledged modifier divergence (target side)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub known_modifier_difference: Option<String>,
}

impl MemberDescriptor {
    fn new(name: impl Into<String>, detail: MemberDetail) -> Self {
        Self {
            name: name.into(),
            modifiers: Vec::new(),
            is_static: false,
            detail,
            known_modifier_difference: None,
        }
    }

    pub fn field(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self::new(
            name,
            MemberDetail::Field {
                declared_type: declared_type.into(),
            },
        )
    }

    pub fn property(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self::new(
            name,
            MemberDetail::Property {
                declared_type: declared_type.into(),
                has_getter: true,
                has_setter: false,
            },
        )
    }

    pub fn method(
        name: impl Into<String>,
        parameters: &[&str],
        return_type: impl Into<String>,
    ) -> Self {
        Self::new(
            name,
            MemberDetail::Method {
                parameters: parameters.iter().map(ToString::to_string).collect(),
                return_type: return_type.into(),
            },
        )
    }

    pub fn constructor(name: impl Into<String>, parameters: &[&str]) -> Self {
        Self::new(
            name,
            MemberDetail::Constructor {
                parameters: parameters.iter().map(ToString::to_string).collect(),
            },
        )
    }

    #[must_use]
    pub fn with_modifiers(mut self, modifiers: &[&str]) -> Self {
        self.modifiers = modifiers.iter().map(ToString::to_string).collect();
        self
    }

    #[must_use]
    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    #[must_use]
    pub fn with_known_modifier_difference(mut self, justification: impl Into<String>) -> Self {
        self.known_modifier_difference = Some(justification.into());
        self
    }

    #[must_use]
    pub fn kind(&self) -> MemberKind {
        match self.detail {
            MemberDetail::Field { .. } => MemberKind::Field,
            MemberDetail::Property { .. } => MemberKind::Property,
            MemberDetail::Method { .. } => MemberKind::Method,
            MemberDetail::Constructor { .. } => MemberKind::Constructor,
        }
    }

    /// Declared type of a field or property, return type of a method
    #[must_use]
    pub fn declared_type(&self) -> Option<&str> {
        match &self.detail {
            MemberDetail::Field { declared_type } | MemberDetail::Property { declared_type, .. } => {
                Some(declared_type)
            }
            MemberDetail::Method { return_type, .. } => Some(return_type),
            MemberDetail::Constructor { .. } => None,
        }
    }

    /// Parameter types of a method or constructor, empty otherwise
    #[must_use]
    pub fn parameters(&self) -> &[String] {
        match &self.detail {
            MemberDetail::Method { parameters, .. } | MemberDetail::Constructor { parameters } => {
                parameters
            }
            _ => &[],
        }
    }

    /// Human readable signature, e.g. `add(int, java.lang.String)`
    #[must_use]
    pub fn signature(&self) -> String {
        match &self.detail {
            MemberDetail::Method { parameters, .. } | MemberDetail::Constructor { parameters } => {
                format!("{}({})", self.name, parameters.join(", "))
            }
            _ => self.name.clone(),
        }
    }
}

/// One declared type on either side of the comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    pub kind: TypeKind,

    /// Reference package or target namespace, dot separated
    #[serde(alias = "namespace")]
    pub package: String,

    pub simple_name: String,

    /// Fully qualified name using the side's nesting separator
    pub full_name: String,

    #[serde(default)]
    pub modifiers: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_type: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub implemented_contracts: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<MemberDescriptor>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<MemberDescriptor>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<MemberDescriptor>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constructors: Vec<MemberDescriptor>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declared_equivalent: Option<DeclaredEquivalent>,

    #[serde(default, skip_serializing_if = "KnownDifferences::is_empty")]
    pub known_differences: KnownDifferences,

    /// The type intentionally has no reference counterpart
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub no_reference_equivalent: bool,
}

impl TypeDescriptor {
    /// Build a descriptor from a full name, deriving package and simple name.
    ///
    /// The package is everything before the last `.` that precedes the first
    /// nesting separator; the simple name is the innermost nesting segment.
    pub fn new(side: Side, kind: TypeKind, full_name: impl Into<String>) -> Self {
        let full_name = full_name.into();
        let package = package_of(&full_name, side).to_string();
        let separator = side.nesting_separator();
        let simple_name = full_name
            .rsplit(|c: char| c == '.' || c == separator)
            .next()
            .unwrap_or(&full_name)
            .to_string();

        Self {
            kind,
            package,
            simple_name,
            full_name,
            modifiers: vec!["public".to_string()],
            base_type: None,
            implemented_contracts: Vec::new(),
            fields: Vec::new(),
            properties: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
            declared_equivalent: None,
            known_differences: KnownDifferences::default(),
            no_reference_equivalent: false,
        }
    }

    #[must_use]
    pub fn with_modifiers(mut self, modifiers: &[&str]) -> Self {
        self.modifiers = modifiers.iter().map(ToString::to_string).collect();
        self
    }

    #[must_use]
    pub fn with_base_type(mut self, base_type: impl Into<String>) -> Self {
        self.base_type = Some(base_type.into());
        self
    }

    #[must_use]
    pub fn with_contracts(mut self, contracts: &[&str]) -> Self {
        self.implemented_contracts = contracts.iter().map(ToString::to_string).collect();
        self
    }

    /// Append a member to the sequence matching its kind
    #[must_use]
    pub fn with_member(mut self, member: MemberDescriptor) -> Self {
        match member.kind() {
            MemberKind::Field => self.fields.push(member),
            MemberKind::Property => self.properties.push(member),
            MemberKind::Method => self.methods.push(member),
            MemberKind::Constructor => self.constructors.push(member),
        }
        self
    }

    #[must_use]
    pub fn with_declared_equivalent(
        mut self,
        package: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        self.declared_equivalent = Some(DeclaredEquivalent {
            package: package.into(),
            name: name.into(),
        });
        self
    }

    #[must_use]
    pub fn with_known_differences(mut self, known: KnownDifferences) -> Self {
        self.known_differences = known;
        self
    }

    #[must_use]
    pub fn without_reference_equivalent(mut self) -> Self {
        self.no_reference_equivalent = true;
        self
    }

    #[must_use]
    pub fn is_public(&self) -> bool {
        self.modifiers.iter().any(|m| m == "public")
    }

    /// Name relative to the package, still using the side's nesting separator
    #[must_use]
    pub fn nested_path(&self) -> &str {
        if self.package.is_empty() {
            return &self.full_name;
        }
        self.full_name
            .strip_prefix(self.package.as_str())
            .and_then(|rest| rest.strip_prefix('.'))
            .unwrap_or(&self.simple_name)
    }

    /// Full name formatted for reports: nesting as `.`, generic arity as type parameters
    #[must_use]
    pub fn display_name(&self, side: Side) -> String {
        naming::display_name(&self.full_name, side)
    }

    #[must_use]
    pub fn members_of(&self, kind: MemberKind) -> &[MemberDescriptor] {
        match kind {
            MemberKind::Field => &self.fields,
            MemberKind::Property => &self.properties,
            MemberKind::Method => &self.methods,
            MemberKind::Constructor => &self.constructors,
        }
    }

    /// All members in kind order
    pub fn members(&self) -> impl Iterator<Item = &MemberDescriptor> {
        MemberKind::ALL
            .into_iter()
            .flat_map(move |kind| self.members_of(kind).iter())
    }
}

/// Package portion of a full name on the given side
#[must_use]
pub fn package_of(full_name: &str, side: Side) -> &str {
    let outer = full_name
        .split(side.nesting_separator())
        .next()
        .unwrap_or(full_name);
    outer.rfind('.').map_or("", |idx| &full_name[..idx])
}

/// Extracted API surface of one library on one side
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiMetadata {
    /// Library (artifact or assembly) name
    pub library: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default)]
    pub types: Vec<TypeDescriptor>,
}

impl ApiMetadata {
    pub fn new(library: impl Into<String>, types: Vec<TypeDescriptor>) -> Self {
        Self {
            library: library.into(),
            version: None,
            types,
        }
    }
}
