//! Pure string transforms that collapse ecosystem-specific naming conventions.
//!
//! Every function here is total: input that does not follow the expected
//! convention is returned unchanged, so a malformed name can only cause a
//! non-match, never a panic.

use crate::core::types::{Side, TypeKind};

/// Target-side prefix on interface names (`IThing`)
pub const INTERFACE_MARKER: char = 'I';

/// Reference-side suffix on classes implementing an interface of the unsuffixed name
pub const IMPLEMENTATION_SUFFIX: &str = "Impl";

/// Target-side generic arity marker (``List`1``)
pub const GENERIC_ARITY_MARKER: char = '`';

/// Field prefix marking a static member
pub const STATIC_FIELD_PREFIX: &str = "s_";

/// Field prefix marking an instance member
pub const INSTANCE_FIELD_PREFIX: &str = "m_";

/// Drop the interface marker from `IThing`-style interface names.
///
/// Only applies to interfaces whose name is the marker followed by an
/// uppercase letter, so `Index` and `Iterator` are left alone.
#[must_use]
pub fn strip_interface_marker(name: &str, kind: TypeKind) -> &str {
    if kind != TypeKind::Interface {
        return name;
    }
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(INTERFACE_MARKER), Some(next)) if next.is_uppercase() => {
            &name[INTERFACE_MARKER.len_utf8()..]
        }
        _ => name,
    }
}

/// Drop the implementation suffix from class names (`WidgetImpl` -> `Widget`)
#[must_use]
pub fn strip_implementation_suffix(name: &str, kind: TypeKind) -> &str {
    if kind != TypeKind::Class || name.len() <= IMPLEMENTATION_SUFFIX.len() {
        return name;
    }
    name.strip_suffix(IMPLEMENTATION_SUFFIX).unwrap_or(name)
}

/// Truncate at the generic arity marker (``List`1`` -> `List`)
#[must_use]
pub fn erase_generic_arity(name: &str) -> &str {
    name.find(GENERIC_ARITY_MARKER).map_or(name, |idx| &name[..idx])
}

/// Nesting path of a type relative to its package, in canonical form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameForms {
    segments: Vec<String>,
}

impl NameForms {
    /// Nesting levels joined with `.`, e.g. `Outer.Inner`
    #[must_use]
    pub fn dotted(&self) -> String {
        self.segments.join(".")
    }

    #[must_use]
    pub fn is_nested(&self) -> bool {
        self.segments.len() > 1
    }

    /// Innermost simple name
    #[must_use]
    pub fn innermost(&self) -> &str {
        self.segments.last().map_or("", String::as_str)
    }

    /// Single-name variants of a nested path: `Outer_Inner` and `Inner`.
    ///
    /// Empty for a type that is not nested.
    #[must_use]
    pub fn flattened(&self) -> Vec<String> {
        if !self.is_nested() {
            return Vec::new();
        }
        vec![self.segments.join("_"), self.innermost().to_string()]
    }

    /// Same path with the innermost name replaced
    #[must_use]
    pub fn with_innermost(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        if let Some(last) = segments.last_mut() {
            *last = name.into();
        }
        Self { segments }
    }
}

/// Canonicalize a package-relative nesting path.
///
/// The side's nesting separator becomes a level boundary and generic arity is
/// erased on every level. Both the dotted form and the flattened variants are
/// available from the result; matching tries both.
#[must_use]
pub fn flatten_nesting(path: &str, side: Side) -> NameForms {
    let segments: Vec<String> = path
        .split(side.nesting_separator())
        .map(erase_generic_arity)
        .filter(|segment| !segment.is_empty())
        .map(ToString::to_string)
        .collect();

    if segments.is_empty() {
        return NameForms {
            segments: vec![path.to_string()],
        };
    }
    NameForms { segments }
}

/// Default target namespace for a reference package: each segment capitalized.
///
/// `org.example.search` -> `Org.Example.Search`
#[must_use]
pub fn infer_target_namespace(package: &str) -> String {
    package
        .split('.')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(".")
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Member name with field-naming affixes removed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberName<'a> {
    pub canonical: &'a str,
    /// The name carried the static-field prefix
    pub static_affix: bool,
}

/// Strip `s_`, `m_`, or a leading `_` from a member name.
///
/// A name that would become empty is left as is.
#[must_use]
pub fn canonical_member_name(name: &str) -> MemberName<'_> {
    let stripped = |prefix: &str| name.strip_prefix(prefix).filter(|rest| !rest.is_empty());

    if let Some(rest) = stripped(STATIC_FIELD_PREFIX) {
        return MemberName {
            canonical: rest,
            static_affix: true,
        };
    }
    let canonical = stripped(INSTANCE_FIELD_PREFIX)
        .or_else(|| stripped("_"))
        .unwrap_or(name);
    MemberName {
        canonical,
        static_affix: false,
    }
}

/// Format a full name for display: nesting as `.`, arity as type parameters.
///
/// ``A.Cache`2+Entry`` -> `A.Cache<T1, T2>.Entry`
#[must_use]
pub fn display_name(full_name: &str, side: Side) -> String {
    full_name
        .split(side.nesting_separator())
        .map(display_segment)
        .collect::<Vec<_>>()
        .join(".")
}

fn display_segment(segment: &str) -> String {
    let Some(idx) = segment.find(GENERIC_ARITY_MARKER) else {
        return segment.to_string();
    };
    let Ok(arity) = segment[idx + 1..].parse::<usize>() else {
        return segment.to_string();
    };
    let parameters = match arity {
        0 => return segment[..idx].to_string(),
        1 => "T".to_string(),
        n => (1..=n).map(|i| format!("T{i}")).collect::<Vec<_>>().join(", "),
    };
    format!("{}<{parameters}>", &segment[..idx])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_interface_marker() {
        assert_eq!(strip_interface_marker("IThing", TypeKind::Interface), "Thing");
        assert_eq!(
            strip_interface_marker("ICharTermAttribute", TypeKind::Interface),
            "CharTermAttribute"
        );
        // Marker must be followed by an uppercase letter
        assert_eq!(strip_interface_marker("Index", TypeKind::Interface), "Index");
        assert_eq!(strip_interface_marker("I", TypeKind::Interface), "I");
        assert_eq!(strip_interface_marker("", TypeKind::Interface), "");
        // Only interfaces carry the marker
        assert_eq!(strip_interface_marker("IThing", TypeKind::Class), "IThing");
    }

    #[test]
    fn test_strip_implementation_suffix() {
        assert_eq!(
            strip_implementation_suffix("WidgetImpl", TypeKind::Class),
            "Widget"
        );
        assert_eq!(strip_implementation_suffix("Widget", TypeKind::Class), "Widget");
        assert_eq!(strip_implementation_suffix("Impl", TypeKind::Class), "Impl");
        assert_eq!(
            strip_implementation_suffix("WidgetImpl", TypeKind::Interface),
            "WidgetImpl"
        );
    }

    #[test]
    fn test_erase_generic_arity() {
        assert_eq!(erase_generic_arity("List`1"), "List");
        assert_eq!(erase_generic_arity("Dictionary`2"), "Dictionary");
        assert_eq!(erase_generic_arity("Widget"), "Widget");
        assert_eq!(erase_generic_arity("`1"), "");
    }

    #[test]
    fn test_flatten_nesting_reference() {
        let forms = flatten_nesting("Outer$Inner", Side::Reference);
        assert_eq!(forms.dotted(), "Outer.Inner");
        assert!(forms.is_nested());
        assert_eq!(forms.innermost(), "Inner");
        assert_eq!(forms.flattened(), vec!["Outer_Inner", "Inner"]);
    }

    #[test]
    fn test_flatten_nesting_target_erases_arity_per_level() {
        let forms = flatten_nesting("Cache`2+Entry", Side::Target);
        assert_eq!(forms.dotted(), "Cache.Entry");
    }

    #[test]
    fn test_flatten_nesting_top_level_has_no_variants() {
        let forms = flatten_nesting("Widget", Side::Target);
        assert_eq!(forms.dotted(), "Widget");
        assert!(!forms.is_nested());
        assert!(forms.flattened().is_empty());
    }

    #[test]
    fn test_flatten_nesting_malformed_passes_through() {
        assert_eq!(flatten_nesting("", Side::Reference).dotted(), "");
        assert_eq!(flatten_nesting("$", Side::Reference).dotted(), "$");
        // Separator of the other side is not interpreted
        assert_eq!(flatten_nesting("Outer+Inner", Side::Reference).dotted(), "Outer+Inner");
    }

    #[test]
    fn test_with_innermost() {
        let forms = flatten_nesting("Outer$Thing", Side::Reference).with_innermost("IThing");
        assert_eq!(forms.dotted(), "Outer.IThing");
    }

    #[test]
    fn test_infer_target_namespace() {
        assert_eq!(
            infer_target_namespace("org.example.search"),
            "Org.Example.Search"
        );
        assert_eq!(infer_target_namespace("a"), "A");
        assert_eq!(infer_target_namespace(""), "");
        assert_eq!(infer_target_namespace(".sub.pkg"), ".Sub.Pkg");
    }

    #[test]
    fn test_canonical_member_name() {
        assert_eq!(
            canonical_member_name("_count"),
            MemberName {
                canonical: "count",
                static_affix: false
            }
        );
        assert_eq!(canonical_member_name("m_foo").canonical, "foo");
        let name = canonical_member_name("s_foo");
        assert_eq!(name.canonical, "foo");
        assert!(name.static_affix);
        assert_eq!(canonical_member_name("foo").canonical, "foo");
        assert_eq!(canonical_member_name("_").canonical, "_");
        assert_eq!(canonical_member_name("s_").canonical, "s_");
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("A.B.Outer+Inner", Side::Target), "A.B.Outer.Inner");
        assert_eq!(display_name("a.b.Outer$Inner", Side::Reference), "a.b.Outer.Inner");
        assert_eq!(display_name("A.List`1", Side::Target), "A.List<T>");
        assert_eq!(
            display_name("A.Cache`2+Entry", Side::Target),
            "A.Cache<T1, T2>.Entry"
        );
        assert_eq!(display_name("A.Odd`x", Side::Target), "A.Odd`x");
    }
}
