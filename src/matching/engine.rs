use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::config::ComparisonConfig;
use crate::core::descriptor::TypeDescriptor;
use crate::core::types::{HeuristicRule, MatchReason, TypeKind};
use crate::matching::heuristic::MatchContext;

/// A reference type paired with its target counterpart
#[derive(Debug, Clone, Copy)]
pub struct TypeMatch<'a> {
    pub reference: &'a TypeDescriptor,
    pub target: &'a TypeDescriptor,
    /// Precedence step that produced the pair
    pub reason: MatchReason,
}

/// A type left without a counterpart
#[derive(Debug, Clone)]
pub struct UnresolvedType<'a> {
    pub descriptor: &'a TypeDescriptor,

    /// Full names on the other side involved in an ambiguous match, sorted.
    ///
    /// For a reference type these are the candidates it could not choose
    /// between; for a target type, the reference types that found it
    /// ambiguous.
    pub ambiguous_candidates: Vec<String>,
}

impl UnresolvedType<'_> {
    #[must_use]
    pub fn is_ambiguous(&self) -> bool {
        !self.ambiguous_candidates.is_empty()
    }
}

/// Non-fatal problem with a configuration entry; the entry is ignored for matching
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "warning", rename_all = "snake_case")]
pub enum ConfigWarning {
    #[error("override names reference type '{reference}', which is not in the comparison set")]
    OverrideReferenceNotFound { reference: String },

    #[error("override for '{reference}' names target type '{target}', which is not in the comparison set")]
    OverrideTargetNotFound { reference: String, target: String },

    #[error("override for '{reference}' names target type '{target}', already matched to '{matched_by}'")]
    OverrideTargetAlreadyMatched {
        reference: String,
        target: String,
        matched_by: String,
    },

    #[error("reference type '{reference}' has more than one override; only the first is used")]
    DuplicateOverride { reference: String },
}

/// Outcome of matching two comparison sets.
///
/// Every input type appears exactly once across `matched`,
/// `unmatched_reference` and `unmatched_target`.
#[derive(Debug, Clone, Default)]
pub struct TypeMatching<'a> {
    pub matched: Vec<TypeMatch<'a>>,
    pub unmatched_reference: Vec<UnresolvedType<'a>>,
    pub unmatched_target: Vec<UnresolvedType<'a>>,
    pub warnings: Vec<ConfigWarning>,
}

/// Step-by-step account of how one reference type was resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchExplanation {
    pub reference: String,
    pub kind: TypeKind,
    pub expected_namespace: String,
    /// Target named by a configured override, if any
    pub override_target: Option<String>,
    /// Targets declaring this type as their equivalent
    pub declared_equivalents: Vec<String>,
    /// Every heuristic rule with its candidates from the full target set
    pub rules: Vec<RuleExplanation>,
    pub outcome: MatchOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleExplanation {
    pub rule: HeuristicRule,
    /// `None` when the rule does not apply to this type
    pub expected_name: Option<String>,
    pub candidates: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum MatchOutcome {
    Matched { target: String, reason: MatchReason },
    Ambiguous { candidates: Vec<String> },
    Unmatched,
}

/// Match two comparison sets with the given configuration
#[must_use]
pub fn match_types<'a>(
    reference: impl IntoIterator<Item = &'a TypeDescriptor>,
    target: impl IntoIterator<Item = &'a TypeDescriptor>,
    config: &'a ComparisonConfig,
) -> TypeMatching<'a> {
    TypeMatcher::new(reference, target, config).match_all()
}

/// Pairs reference types with target types.
///
/// Precedence steps run globally in order: every override first, then
/// declared equivalence, then the naming heuristic. A step only sees types no
/// earlier step resolved, so a weaker step can never consume a type a
/// stronger one would have claimed. All heuristic rules are one step: a
/// reference type accepted by more than one target under any combination of
/// rules is ambiguous.
pub struct TypeMatcher<'a> {
    context: MatchContext<'a>,
    config: &'a ComparisonConfig,
    /// Sorted by full name
    reference: Vec<&'a TypeDescriptor>,
    /// Sorted by full name
    target: Vec<&'a TypeDescriptor>,
}

/// Mutable bookkeeping for one run; indices point into the matcher's sorted sets
struct MatchState<'a> {
    reference_resolved: Vec<bool>,
    target_taken: Vec<Option<usize>>,
    matched: Vec<TypeMatch<'a>>,
    ambiguous: BTreeMap<usize, Vec<usize>>,
    warnings: Vec<ConfigWarning>,
}

impl<'a> TypeMatcher<'a> {
    pub fn new(
        reference: impl IntoIterator<Item = &'a TypeDescriptor>,
        target: impl IntoIterator<Item = &'a TypeDescriptor>,
        config: &'a ComparisonConfig,
    ) -> Self {
        let mut reference: Vec<&TypeDescriptor> = reference.into_iter().collect();
        let mut target: Vec<&TypeDescriptor> = target.into_iter().collect();
        reference.sort_by(|a, b| a.full_name.cmp(&b.full_name));
        target.sort_by(|a, b| a.full_name.cmp(&b.full_name));

        let context = MatchContext::new(
            reference.iter().copied(),
            target.iter().copied(),
            config,
        );

        Self {
            context,
            config,
            reference,
            target,
        }
    }

    /// Correspondence lookups for this run, shared with member comparison
    #[must_use]
    pub fn context(&self) -> &MatchContext<'a> {
        &self.context
    }

    /// Run all precedence steps and partition both sets
    #[must_use]
    pub fn match_all(&self) -> TypeMatching<'a> {
        let mut state = MatchState {
            reference_resolved: vec![false; self.reference.len()],
            target_taken: vec![None; self.target.len()],
            matched: Vec::new(),
            ambiguous: BTreeMap::new(),
            warnings: Vec::new(),
        };

        self.apply_overrides(&mut state);
        self.apply_declared_equivalents(&mut state);
        self.apply_heuristics(&mut state);

        self.finish(state)
    }

    /// Explain how `full_name` is resolved, or `None` if it is not in the reference set
    #[must_use]
    pub fn explain(&self, full_name: &str) -> Option<MatchExplanation> {
        let reference = *self.reference.get(self.reference_index(full_name)?)?;

        let override_target = self
            .config
            .overrides
            .iter()
            .find(|o| o.reference == full_name)
            .map(|o| o.target.clone());

        let declared_equivalents = self
            .target
            .iter()
            .filter(|t| self.context.declared_equivalent_match(reference, t))
            .map(|t| t.full_name.clone())
            .collect();

        let rules = HeuristicRule::ALL
            .into_iter()
            .map(|rule| RuleExplanation {
                rule,
                expected_name: self.context.expected_target_name(reference, rule),
                candidates: self
                    .target
                    .iter()
                    .filter(|t| {
                        t.declared_equivalent.is_none()
                            && self.context.heuristic_match(reference, t, rule)
                    })
                    .map(|t| t.full_name.clone())
                    .collect(),
            })
            .collect();

        let matching = self.match_all();
        let outcome = if let Some(m) = matching
            .matched
            .iter()
            .find(|m| m.reference.full_name == full_name)
        {
            MatchOutcome::Matched {
                target: m.target.full_name.clone(),
                reason: m.reason,
            }
        } else {
            match matching
                .unmatched_reference
                .iter()
                .find(|u| u.descriptor.full_name == full_name && u.is_ambiguous())
            {
                Some(u) => MatchOutcome::Ambiguous {
                    candidates: u.ambiguous_candidates.clone(),
                },
                None => MatchOutcome::Unmatched,
            }
        };

        Some(MatchExplanation {
            reference: reference.full_name.clone(),
            kind: reference.kind,
            expected_namespace: self.context.expected_namespace(&reference.package),
            override_target,
            declared_equivalents,
            rules,
            outcome,
        })
    }

    fn reference_index(&self, full_name: &str) -> Option<usize> {
        self.reference
            .binary_search_by(|t| t.full_name.as_str().cmp(full_name))
            .ok()
    }

    fn target_index(&self, full_name: &str) -> Option<usize> {
        self.target
            .binary_search_by(|t| t.full_name.as_str().cmp(full_name))
            .ok()
    }

    fn apply_overrides(&self, state: &mut MatchState<'a>) {
        let mut seen = BTreeSet::new();
        for type_override in &self.config.overrides {
            if !seen.insert(type_override.reference.as_str()) {
                state.warn(ConfigWarning::DuplicateOverride {
                    reference: type_override.reference.clone(),
                });
                continue;
            }
            let Some(r) = self.reference_index(&type_override.reference) else {
                state.warn(ConfigWarning::OverrideReferenceNotFound {
                    reference: type_override.reference.clone(),
                });
                continue;
            };
            let Some(t) = self.target_index(&type_override.target) else {
                state.warn(ConfigWarning::OverrideTargetNotFound {
                    reference: type_override.reference.clone(),
                    target: type_override.target.clone(),
                });
                continue;
            };
            if let Some(owner) = state.target_taken[t] {
                state.warn(ConfigWarning::OverrideTargetAlreadyMatched {
                    reference: type_override.reference.clone(),
                    target: type_override.target.clone(),
                    matched_by: self.reference[owner].full_name.clone(),
                });
                continue;
            }
            self.pair(state, r, t, MatchReason::Override);
        }
    }

    fn apply_declared_equivalents(&self, state: &mut MatchState<'a>) {
        self.resolve_unresolved(state, "declared equivalent", |reference, target| {
            self.context
                .declared_equivalent_match(reference, target)
                .then_some(MatchReason::DeclaredEquivalent)
        });
    }

    fn apply_heuristics(&self, state: &mut MatchState<'a>) {
        self.resolve_unresolved(state, "heuristic", |reference, target| {
            if target.declared_equivalent.is_some() {
                return None;
            }
            HeuristicRule::ALL
                .into_iter()
                .find(|&rule| self.context.heuristic_match(reference, target, rule))
                .map(|rule| MatchReason::Heuristic { rule })
        });
    }

    /// One precedence step over every unresolved reference type, in full-name order.
    ///
    /// `accepts` returns the match reason when a target is a candidate.
    fn resolve_unresolved(
        &self,
        state: &mut MatchState<'a>,
        step: &str,
        accepts: impl Fn(&TypeDescriptor, &TypeDescriptor) -> Option<MatchReason>,
    ) {
        for r in 0..self.reference.len() {
            if state.reference_resolved[r] {
                continue;
            }
            let reference = self.reference[r];
            let candidates: Vec<(usize, MatchReason)> = (0..self.target.len())
                .filter(|&t| state.target_taken[t].is_none())
                .filter_map(|t| accepts(reference, self.target[t]).map(|reason| (t, reason)))
                .collect();

            match candidates.len() {
                0 => {}
                1 => {
                    let (t, reason) = candidates[0];
                    self.pair(state, r, t, reason);
                }
                _ => {
                    tracing::debug!(
                        reference = %reference.full_name,
                        step,
                        candidates = candidates.len(),
                        "ambiguous match"
                    );
                    state.reference_resolved[r] = true;
                    state
                        .ambiguous
                        .insert(r, candidates.into_iter().map(|(t, _)| t).collect());
                }
            }
        }
    }

    fn pair(&self, state: &mut MatchState<'a>, r: usize, t: usize, reason: MatchReason) {
        let reference = self.reference[r];
        let target = self.target[t];
        tracing::debug!(
            reference = %reference.full_name,
            target = %target.full_name,
            step = %reason,
            "matched"
        );

        state.reference_resolved[r] = true;
        state.target_taken[t] = Some(r);
        state.matched.push(TypeMatch {
            reference,
            target,
            reason,
        });
    }

    fn finish(&self, state: MatchState<'a>) -> TypeMatching<'a> {
        let mut ambiguous_by_target: BTreeMap<usize, Vec<String>> = BTreeMap::new();
        for (&r, candidates) in &state.ambiguous {
            for &t in candidates {
                ambiguous_by_target
                    .entry(t)
                    .or_default()
                    .push(self.reference[r].full_name.clone());
            }
        }

        let unmatched_reference = (0..self.reference.len())
            .filter(|r| !state.reference_resolved[*r] || state.ambiguous.contains_key(r))
            .map(|r| UnresolvedType {
                descriptor: self.reference[r],
                ambiguous_candidates: state
                    .ambiguous
                    .get(&r)
                    .map(|candidates| {
                        candidates
                            .iter()
                            .map(|&t| self.target[t].full_name.clone())
                            .collect()
                    })
                    .unwrap_or_default(),
            })
            .collect();

        let unmatched_target = (0..self.target.len())
            .filter(|&t| state.target_taken[t].is_none())
            .map(|t| UnresolvedType {
                descriptor: self.target[t],
                ambiguous_candidates: ambiguous_by_target.remove(&t).unwrap_or_default(),
            })
            .collect();

        TypeMatching {
            matched: state.matched,
            unmatched_reference,
            unmatched_target,
            warnings: state.warnings,
        }
    }
}

impl MatchState<'_> {
    fn warn(&mut self, warning: ConfigWarning) {
        tracing::warn!("{warning}");
        self.warnings.push(warning);
    }
}
