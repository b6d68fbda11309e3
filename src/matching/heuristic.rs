//! Pairwise correspondence between a reference type and a target type.
//!
//! [`MatchContext`] answers "could these two declarations be the same type?"
//! without running a global match. The type matching engine uses it to find
//! candidates; member comparison, base types and contracts use
//! [`MatchContext::names_correspond`] on bare type names.

use std::collections::HashMap;

use crate::core::config::{ComparisonConfig, NamespaceMapping};
use crate::core::descriptor::TypeDescriptor;
use crate::core::types::{kinds_compatible, HeuristicRule, Side, TypeKind};
use crate::matching::naming::{
    flatten_nesting, infer_target_namespace, strip_implementation_suffix, NameForms,
    INTERFACE_MARKER,
};

/// Read-only lookup tables for one comparison run
#[derive(Debug)]
pub struct MatchContext<'a> {
    config: &'a ComparisonConfig,
    reference_index: HashMap<&'a str, &'a TypeDescriptor>,
    target_index: HashMap<&'a str, &'a TypeDescriptor>,
    well_known: HashMap<&'a str, &'a [String]>,
    overrides: HashMap<&'a str, &'a str>,
}

impl<'a> MatchContext<'a> {
    pub fn new(
        reference: impl IntoIterator<Item = &'a TypeDescriptor>,
        target: impl IntoIterator<Item = &'a TypeDescriptor>,
        config: &'a ComparisonConfig,
    ) -> Self {
        let reference_index = reference
            .into_iter()
            .map(|t| (t.full_name.as_str(), t))
            .collect();
        let target_index = target
            .into_iter()
            .map(|t| (t.full_name.as_str(), t))
            .collect();
        let well_known = config
            .well_known_types
            .iter()
            .map(|w| (w.target.as_str(), w.references.as_slice()))
            .collect();
        // First override per reference wins, as in the matcher
        let mut overrides = HashMap::new();
        for o in &config.overrides {
            overrides
                .entry(o.reference.as_str())
                .or_insert(o.target.as_str());
        }

        Self {
            config,
            reference_index,
            target_index,
            well_known,
            overrides,
        }
    }

    #[must_use]
    pub fn config(&self) -> &'a ComparisonConfig {
        self.config
    }

    /// Target namespace a reference package is expected to live in
    #[must_use]
    pub fn expected_namespace(&self, package: &str) -> String {
        expected_namespace(package, &self.config.namespace_mappings)
    }

    /// Full target name expected for `reference` under `rule`, for diagnostics
    #[must_use]
    pub fn expected_target_name(
        &self,
        reference: &TypeDescriptor,
        rule: HeuristicRule,
    ) -> Option<String> {
        let forms = expected_forms(reference, rule)?;
        let namespace = self.expected_namespace(&reference.package);
        Some(if namespace.is_empty() {
            forms.dotted()
        } else {
            format!("{namespace}.{}", forms.dotted())
        })
    }

    /// Heuristic test of one reference/target pair under a single rule
    #[must_use]
    pub fn heuristic_match(
        &self,
        reference: &TypeDescriptor,
        target: &TypeDescriptor,
        rule: HeuristicRule,
    ) -> bool {
        if !kinds_compatible(reference.kind, target.kind) {
            return false;
        }
        if !self
            .expected_namespace(&reference.package)
            .eq_ignore_ascii_case(&target.package)
        {
            return false;
        }
        let Some(expected) = expected_forms(reference, rule) else {
            return false;
        };
        let actual = flatten_nesting(target.nested_path(), Side::Target);
        forms_match(&expected, &actual, rule)
    }

    /// The target declares exactly the reference's package and dotted name
    #[must_use]
    pub fn declared_equivalent_match(
        &self,
        reference: &TypeDescriptor,
        target: &TypeDescriptor,
    ) -> bool {
        target.declared_equivalent.as_ref().is_some_and(|declared| {
            declared.package == reference.package
                && declared.name == flatten_nesting(reference.nested_path(), Side::Reference).dotted()
        })
    }

    /// Whether two descriptors correspond by override, declared equivalence, or any heuristic rule.
    ///
    /// An override for `reference` is authoritative: no other target corresponds to it.
    #[must_use]
    pub fn pair_corresponds(&self, reference: &TypeDescriptor, target: &TypeDescriptor) -> bool {
        if let Some(overridden) = self.overrides.get(reference.full_name.as_str()) {
            return *overridden == target.full_name;
        }
        if target.declared_equivalent.is_some() {
            return self.declared_equivalent_match(reference, target);
        }
        HeuristicRule::ALL
            .into_iter()
            .any(|rule| self.heuristic_match(reference, target, rule))
    }

    /// Whether a reference type name and a target type name denote the same type.
    ///
    /// Used for base types, contracts, declared member types and parameters.
    /// Array ranks must agree and generic arguments are ignored. Well-known
    /// platform types are decided by the configured table alone; names of
    /// types present in the run are compared as descriptors, anything else by
    /// the name heuristic.
    #[must_use]
    pub fn names_correspond(&self, reference: &str, target: &str) -> bool {
        let (reference, reference_rank) = split_array_rank(reference);
        let (target, target_rank) = split_array_rank(target);
        if reference_rank != target_rank {
            return false;
        }

        let canonical_target = flatten_nesting(target, Side::Target).dotted();
        if let Some(references) = self.well_known.get(canonical_target.as_str()) {
            return references.iter().any(|r| r == reference);
        }
        if reference == target {
            return true;
        }

        match (
            self.reference_index.get(reference),
            self.target_index.get(target),
        ) {
            (Some(r), Some(t)) => self.pair_corresponds(r, t),
            _ => self.names_correspond_by_heuristic(reference, target),
        }
    }

    // Kinds are unknown for types outside the run; try the class and interface conventions.
    fn names_correspond_by_heuristic(&self, reference: &str, target: &str) -> bool {
        [TypeKind::Class, TypeKind::Interface].into_iter().any(|kind| {
            let r = TypeDescriptor::new(Side::Reference, kind, reference);
            let t = TypeDescriptor::new(Side::Target, kind, target);
            HeuristicRule::ALL
                .into_iter()
                .any(|rule| self.heuristic_match(&r, &t, rule))
        })
    }
}

/// Resolve the expected target namespace for a reference package.
///
/// The longest mapping whose prefix matches on a segment boundary wins (the
/// first listed on a tie); the unmatched remainder and packages with no
/// mapping fall back to per-segment capitalization.
#[must_use]
pub fn expected_namespace(package: &str, mappings: &[NamespaceMapping]) -> String {
    let best = mappings
        .iter()
        .filter(|m| prefix_matches(package, &m.reference_prefix))
        .fold(None::<&NamespaceMapping>, |best, m| match best {
            Some(b) if b.reference_prefix.len() >= m.reference_prefix.len() => Some(b),
            _ => Some(m),
        });

    match best {
        Some(mapping) => format!(
            "{}{}",
            mapping.target_prefix,
            infer_target_namespace(&package[mapping.reference_prefix.len()..])
        ),
        None => infer_target_namespace(package),
    }
}

fn prefix_matches(package: &str, prefix: &str) -> bool {
    !prefix.is_empty()
        && package
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('.'))
}

/// Target-side nesting path expected for a reference type under `rule`.
///
/// A class always loses its implementation suffix, so the plain rules do not
/// apply to a suffixed class and the suffix rules apply to nothing else.
/// Returns `None` when the rule does not apply to the type.
#[must_use]
pub fn expected_forms(reference: &TypeDescriptor, rule: HeuristicRule) -> Option<NameForms> {
    let forms = flatten_nesting(reference.nested_path(), Side::Reference);
    let innermost = forms.innermost();
    let stripped = strip_implementation_suffix(innermost, reference.kind);
    let has_suffix = stripped.len() != innermost.len();
    if rule.strips_suffix() != has_suffix {
        return None;
    }

    let expected = match reference.kind {
        TypeKind::Interface => format!("{INTERFACE_MARKER}{innermost}"),
        _ => stripped.to_string(),
    };

    Some(forms.with_innermost(expected))
}

fn forms_match(expected: &NameForms, actual: &NameForms, rule: HeuristicRule) -> bool {
    let expected_dotted = expected.dotted();
    let actual_dotted = actual.dotted();

    if !rule.flattens() {
        return expected_dotted == actual_dotted;
    }
    expected.is_nested() != actual.is_nested()
        && (expected.flattened().contains(&actual_dotted)
            || actual.flattened().contains(&expected_dotted))
}

/// Split a type name into its element name and array rank, dropping generic arguments
fn split_array_rank(name: &str) -> (&str, usize) {
    let mut element = strip_type_arguments(name).trim();
    let mut rank = 0;
    while let Some(inner) = element.strip_suffix("[]") {
        element = inner;
        rank += 1;
    }
    (element, rank)
}

fn strip_type_arguments(name: &str) -> &str {
    [name.find('<'), name.find("[[")]
        .into_iter()
        .flatten()
        .min()
        .map_or(name, |idx| &name[..idx])
}
