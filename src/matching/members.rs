use serde::{Deserialize, Serialize};

use crate::core::descriptor::{MemberDescriptor, TypeDescriptor};
use crate::core::types::{MemberKind, Side};
use crate::matching::heuristic::MatchContext;
use crate::matching::modifiers::{member_modifiers_equivalent, sort_modifiers};
use crate::matching::naming::canonical_member_name;

const STATIC: &str = "static";

/// A member as shown in a report, in its own side's vocabulary
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MemberReference {
    pub member_kind: MemberKind,
    pub name: String,
    /// `name(param, ...)` for methods and constructors, the bare name otherwise
    pub signature: String,
    /// Sorted by the side's display precedence
    pub modifiers: Vec<String>,
    pub is_static: bool,
}

impl MemberReference {
    #[must_use]
    pub fn new(member: &MemberDescriptor, side: Side) -> Self {
        Self {
            member_kind: member.kind(),
            name: member.name.clone(),
            signature: member.signature(),
            modifiers: sort_modifiers(side, &member.modifiers),
            is_static: member_is_static(member, side),
        }
    }
}

/// A matched field or property whose declared types do not correspond
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DeclaredTypeMismatch {
    pub member_kind: MemberKind,
    pub reference_name: String,
    pub target_name: String,
    pub reference_type: String,
    pub target_type: String,
}

/// Member-level differences between a matched type pair
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDiff {
    /// Reference members with no equivalent on the target side
    pub reference_only: Vec<MemberReference>,
    /// Target members with no equivalent on the reference side
    pub target_only: Vec<MemberReference>,
    pub declared_type_mismatches: Vec<DeclaredTypeMismatch>,
}

impl MemberDiff {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reference_only.is_empty()
            && self.target_only.is_empty()
            && self.declared_type_mismatches.is_empty()
    }
}

/// Compare the members of a matched pair kind by kind.
///
/// Matching is greedy in reference declaration order; each target member is
/// consumed at most once.
#[must_use]
pub fn compare_members(
    reference: &TypeDescriptor,
    target: &TypeDescriptor,
    context: &MatchContext<'_>,
) -> MemberDiff {
    let mut diff = MemberDiff::default();

    for kind in MemberKind::ALL {
        let target_members = target.members_of(kind);
        let mut taken = vec![false; target_members.len()];

        for r in reference.members_of(kind) {
            let found = target_members
                .iter()
                .enumerate()
                .find(|(i, t)| !taken[*i] && members_match(r, t, context));

            match found {
                Some((i, t)) => {
                    taken[i] = true;
                    if let Some(mismatch) = declared_type_mismatch(r, t, context) {
                        diff.declared_type_mismatches.push(mismatch);
                    }
                }
                None => diff
                    .reference_only
                    .push(MemberReference::new(r, Side::Reference)),
            }
        }

        diff.target_only.extend(
            target_members
                .iter()
                .zip(&taken)
                .filter(|(_, taken)| !**taken)
                .map(|(t, _)| MemberReference::new(t, Side::Target)),
        );
    }

    diff.reference_only.sort();
    diff.target_only.sort();
    diff.declared_type_mismatches.sort();

    tracing::debug!(
        reference = %reference.full_name,
        reference_only = diff.reference_only.len(),
        target_only = diff.target_only.len(),
        "compared members"
    );
    diff
}

/// Whether two members of the same kind are the same declaration
#[must_use]
pub fn members_match(
    reference: &MemberDescriptor,
    target: &MemberDescriptor,
    context: &MatchContext<'_>,
) -> bool {
    if reference.kind() != target.kind() {
        return false;
    }
    // Constructor names are the type name on either side; naming affixes
    // only exist on the reference side
    if reference.kind() != MemberKind::Constructor
        && canonical_member_name(&reference.name).canonical != target.name
    {
        return false;
    }
    if member_is_static(reference, Side::Reference) != member_is_static(target, Side::Target) {
        return false;
    }
    if target.known_modifier_difference.is_none()
        && !member_modifiers_equivalent(&reference.modifiers, &target.modifiers)
    {
        return false;
    }

    let reference_parameters = reference.parameters();
    let target_parameters = target.parameters();
    reference_parameters.len() == target_parameters.len()
        && reference_parameters
            .iter()
            .zip(target_parameters)
            .all(|(r, t)| context.names_correspond(r, t))
}

fn declared_type_mismatch(
    reference: &MemberDescriptor,
    target: &MemberDescriptor,
    context: &MatchContext<'_>,
) -> Option<DeclaredTypeMismatch> {
    if !matches!(reference.kind(), MemberKind::Field | MemberKind::Property) {
        return None;
    }
    let reference_type = reference.declared_type()?;
    let target_type = target.declared_type()?;
    if context.names_correspond(reference_type, target_type) {
        return None;
    }

    Some(DeclaredTypeMismatch {
        member_kind: reference.kind(),
        reference_name: reference.name.clone(),
        target_name: target.name.clone(),
        reference_type: reference_type.to_string(),
        target_type: target_type.to_string(),
    })
}

/// Explicit flag, `static` token, or a reference static-field affix
fn member_is_static(member: &MemberDescriptor, side: Side) -> bool {
    member.is_static
        || member.modifiers.iter().any(|m| m == STATIC)
        || (side == Side::Reference && canonical_member_name(&member.name).static_affix)
}
