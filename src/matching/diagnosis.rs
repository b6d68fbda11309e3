use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::descriptor::TypeDescriptor;
use crate::core::types::Side;
use crate::matching::heuristic::MatchContext;
use crate::matching::members::{compare_members, MemberDiff};
use crate::matching::modifiers::{sort_modifiers, type_modifiers_equivalent, ModifierError};

/// Implicit root of every reference class hierarchy
pub const REFERENCE_ROOT_TYPE: &str = "java.lang.Object";

/// Fatal problem comparing one library; other libraries in a batch continue
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComparisonError {
    #[error("invariant violation: {side} type '{full_name}' is missing the public modifier")]
    InvariantViolation { full_name: String, side: Side },
}

/// Modifier sets that are not equivalent, in display order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifierMismatch {
    pub reference: Vec<String>,
    pub target: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseTypeMismatch {
    pub reference: Option<String>,
    pub target: Option<String>,
}

/// Contracts implemented on only one side
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractMismatch {
    pub reference_only: Vec<String>,
    pub target_only: Vec<String>,
}

/// All structural differences of a matched type pair
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuralDiff {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifiers: Option<ModifierMismatch>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_type: Option<BaseTypeMismatch>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contracts: Option<ContractMismatch>,

    pub members: MemberDiff,
}

impl StructuralDiff {
    /// Analyze a matched pair.
    ///
    /// Differences the target acknowledges in `known_differences` are not
    /// reported.
    ///
    /// # Errors
    ///
    /// Returns `ComparisonError::InvariantViolation` if either type lacks the
    /// `public` modifier.
    pub fn analyze(
        reference: &TypeDescriptor,
        target: &TypeDescriptor,
        context: &MatchContext<'_>,
    ) -> Result<Self, ComparisonError> {
        let known = &target.known_differences;

        let modifiers = match type_modifiers_equivalent(&reference.modifiers, &target.modifiers) {
            Ok(true) => None,
            Ok(false) if known.modifiers.is_some() => None,
            Ok(false) => Some(ModifierMismatch {
                reference: sort_modifiers(Side::Reference, &reference.modifiers),
                target: sort_modifiers(Side::Target, &target.modifiers),
            }),
            Err(ModifierError::NotPublic(side)) => {
                let full_name = match side {
                    Side::Reference => &reference.full_name,
                    Side::Target => &target.full_name,
                };
                return Err(ComparisonError::InvariantViolation {
                    full_name: full_name.clone(),
                    side,
                });
            }
        };

        let base_type = if known.base_type.is_some()
            || base_types_correspond(reference.base_type.as_deref(), target.base_type.as_deref(), context)
        {
            None
        } else {
            Some(BaseTypeMismatch {
                reference: reference.base_type.clone(),
                target: target.base_type.clone(),
            })
        };

        let contracts = if known.contracts.is_some() {
            None
        } else {
            compare_contracts(
                &reference.implemented_contracts,
                &target.implemented_contracts,
                context,
            )
        };

        Ok(Self {
            modifiers,
            base_type,
            contracts,
            members: compare_members(reference, target, context),
        })
    }

    /// No structural difference of any kind
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.modifiers.is_none()
            && self.base_type.is_none()
            && self.contracts.is_none()
            && self.members.is_empty()
    }
}

fn base_types_correspond(
    reference: Option<&str>,
    target: Option<&str>,
    context: &MatchContext<'_>,
) -> bool {
    match (reference, target) {
        (None, None) => true,
        // Target metadata omits the implicit root
        (Some(REFERENCE_ROOT_TYPE), None) => true,
        (Some(r), Some(t)) => context.names_correspond(r, t),
        _ => false,
    }
}

fn compare_contracts(
    reference: &[String],
    target: &[String],
    context: &MatchContext<'_>,
) -> Option<ContractMismatch> {
    let mut taken = vec![false; target.len()];
    let mut reference_only = Vec::new();

    for r in reference {
        let found =
            (0..target.len()).find(|&i| !taken[i] && context.names_correspond(r, &target[i]));
        match found {
            Some(i) => taken[i] = true,
            None => reference_only.push(r.clone()),
        }
    }

    let mut target_only: Vec<String> = target
        .iter()
        .zip(&taken)
        .filter(|(_, taken)| !**taken)
        .map(|(t, _)| t.clone())
        .collect();

    if reference_only.is_empty() && target_only.is_empty() {
        return None;
    }
    reference_only.sort();
    target_only.sort();
    Some(ContractMismatch {
        reference_only,
        target_only,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ComparisonConfig;
    use crate::core::descriptor::{KnownDifferences, MemberDescriptor};
    use crate::core::types::TypeKind;

    const NO_TYPES: &[TypeDescriptor] = &[];

    fn analyze(reference: &TypeDescriptor, target: &TypeDescriptor) -> Result<StructuralDiff, ComparisonError> {
        let config = ComparisonConfig::default();
        let context = MatchContext::new(NO_TYPES, NO_TYPES, &config);
        StructuralDiff::analyze(reference, target, &context)
    }

    fn reference(full_name: &str) -> TypeDescriptor {
        TypeDescriptor::new(Side::Reference, TypeKind::Class, full_name)
    }

    fn target(full_name: &str) -> TypeDescriptor {
        TypeDescriptor::new(Side::Target, TypeKind::Class, full_name)
    }

    #[test]
    fn test_identical_pair_is_clean() {
        let diff = analyze(
            &reference("a.Widget").with_base_type("java.lang.Object"),
            &target("A.Widget").with_base_type("System.Object"),
        )
        .unwrap();
        assert!(diff.is_clean());
    }

    #[test]
    fn test_modifier_mismatch() {
        let diff = analyze(
            &reference("a.Widget").with_modifiers(&["final", "public"]),
            &target("A.Widget").with_modifiers(&["public"]),
        )
        .unwrap();
        assert_eq!(
            diff.modifiers,
            Some(ModifierMismatch {
                reference: vec!["public".to_string(), "final".to_string()],
                target: vec!["public".to_string()],
            })
        );
    }

    #[test]
    fn test_missing_public_is_invariant_violation() {
        let err = analyze(
            &reference("a.Widget"),
            &target("A.Widget").with_modifiers(&["internal"]),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ComparisonError::InvariantViolation {
                full_name: "A.Widget".to_string(),
                side: Side::Target,
            }
        );
    }

    #[test]
    fn test_base_type_rules() {
        let config = ComparisonConfig::default();
        let context = MatchContext::new(NO_TYPES, NO_TYPES, &config);

        assert!(base_types_correspond(None, None, &context));
        assert!(base_types_correspond(Some("java.lang.Object"), None, &context));
        assert!(!base_types_correspond(None, Some("System.Object"), &context));
        assert!(!base_types_correspond(Some("a.Base"), None, &context));
        assert!(base_types_correspond(Some("a.BaseImpl"), Some("A.Base"), &context));
        assert!(!base_types_correspond(Some("a.Base"), Some("A.Other"), &context));
    }

    #[test]
    fn test_known_differences_suppress_diffs() {
        let reference_type = reference("a.Widget")
            .with_modifiers(&["public", "final"])
            .with_base_type("a.Base")
            .with_contracts(&["java.io.Serializable"]);
        let target_type = target("A.Widget").with_base_type("A.Other");

        let diff = analyze(&reference_type, &target_type).unwrap();
        assert!(diff.modifiers.is_some());
        assert!(diff.base_type.is_some());
        assert_eq!(
            diff.contracts,
            Some(ContractMismatch {
                reference_only: vec!["java.io.Serializable".to_string()],
                target_only: Vec::new(),
            })
        );

        let acknowledged = target_type.with_known_differences(KnownDifferences {
            modifiers: Some("sealing is enforced elsewhere".to_string()),
            base_type: Some("flattened hierarchy".to_string()),
            contracts: Some("no serialization".to_string()),
        });
        assert!(analyze(&reference_type, &acknowledged).unwrap().is_clean());
    }

    #[test]
    fn test_contracts_use_well_known_types() {
        let diff = analyze(
            &reference("a.Reader").with_contracts(&["java.io.Closeable", "a.Source"]),
            &target("A.Reader").with_contracts(&["A.ISource", "System.IDisposable"]),
        )
        .unwrap();
        assert!(diff.contracts.is_none());
    }

    #[test]
    fn test_member_differences_are_included() {
        let diff = analyze(
            &reference("a.Widget").with_member(MemberDescriptor::field("size", "int")),
            &target("A.Widget"),
        )
        .unwrap();
        assert!(!diff.is_clean());
        assert_eq!(diff.members.reference_only[0].name, "size");
    }
}
