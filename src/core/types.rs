use serde::{Deserialize, Serialize};

/// Which side of the comparison a declaration comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// The original library whose API surface is the compatibility target
    Reference,
    /// The ported implementation being checked for parity
    Target,
}

impl Side {
    /// Separator between an enclosing type and a nested type in a full name
    #[must_use]
    pub fn nesting_separator(self) -> char {
        match self {
            Self::Reference => '$',
            Self::Target => '+',
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Reference => write!(f, "reference"),
            Self::Target => write!(f, "target"),
        }
    }
}

/// Kind of a declared type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
    Struct,
}

impl std::fmt::Display for TypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Class => write!(f, "class"),
            Self::Interface => write!(f, "interface"),
            Self::Enum => write!(f, "enum"),
            Self::Struct => write!(f, "struct"),
        }
    }
}

/// `(reference kind, target kind)` pairs that may correspond.
///
/// The reference ecosystem has no value types, so a target struct pairs with a
/// reference class.
const KIND_COMPATIBILITY: &[(TypeKind, TypeKind)] = &[
    (TypeKind::Interface, TypeKind::Interface),
    (TypeKind::Class, TypeKind::Class),
    (TypeKind::Enum, TypeKind::Enum),
    (TypeKind::Class, TypeKind::Struct),
];

/// Whether a reference type of kind `reference` may pair with a target type of kind `target`
#[must_use]
pub fn kinds_compatible(reference: TypeKind, target: TypeKind) -> bool {
    KIND_COMPATIBILITY.contains(&(reference, target))
}

/// Kind of a type member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    Field,
    Property,
    Method,
    Constructor,
}

impl MemberKind {
    pub const ALL: [Self; 4] = [Self::Field, Self::Property, Self::Method, Self::Constructor];
}

impl std::fmt::Display for MemberKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Field => write!(f, "field"),
            Self::Property => write!(f, "property"),
            Self::Method => write!(f, "method"),
            Self::Constructor => write!(f, "constructor"),
        }
    }
}

/// Name transformation that produced a heuristic match.
///
/// A reference class ending in the implementation suffix is only ever
/// matched through the suffix-stripping rules; every other type only through
/// the plain ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeuristicRule {
    /// Same nesting path after namespace and interface-marker conventions
    ExactName,
    /// Reference class name carries the implementation suffix
    ImplementationSuffix,
    /// One side nests the type and the other does not
    FlattenedNesting,
    /// Flattened nesting combined with the implementation suffix
    FlattenedImplementationSuffix,
}

impl std::fmt::Display for HeuristicRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ExactName => write!(f, "exact name"),
            Self::ImplementationSuffix => write!(f, "implementation suffix"),
            Self::FlattenedNesting => write!(f, "flattened nesting"),
            Self::FlattenedImplementationSuffix => {
                write!(f, "flattened nesting, implementation suffix")
            }
        }
    }
}

impl HeuristicRule {
    /// Every rule; the first that accepts a pair names its match reason
    pub const ALL: [Self; 4] = [
        Self::ExactName,
        Self::ImplementationSuffix,
        Self::FlattenedNesting,
        Self::FlattenedImplementationSuffix,
    ];

    #[must_use]
    pub fn strips_suffix(self) -> bool {
        matches!(
            self,
            Self::ImplementationSuffix | Self::FlattenedImplementationSuffix
        )
    }

    #[must_use]
    pub fn flattens(self) -> bool {
        matches!(
            self,
            Self::FlattenedNesting | Self::FlattenedImplementationSuffix
        )
    }
}

/// How a type pair was established
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum MatchReason {
    /// Explicit `reference -> target` override from configuration
    Override,
    /// Target type declares the reference package and name it corresponds to
    DeclaredEquivalent,
    /// Name and namespace transformation
    Heuristic { rule: HeuristicRule },
}

impl std::fmt::Display for MatchReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Override => write!(f, "override"),
            Self::DeclaredEquivalent => write!(f, "declared equivalent"),
            Self::Heuristic { rule } => write!(f, "heuristic ({rule})"),
        }
    }
}
