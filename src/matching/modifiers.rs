//! Equivalence rules between the reference and target modifier vocabularies.
//!
//! Modifier sets from the two sides are never compared directly. Both pass
//! through [`modifiers_equivalent`], which removes tokens whose meaning
//! differs per side and rewrites the rest into a shared vocabulary.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::core::types::Side;

const PUBLIC: &str = "public";
const STATIC: &str = "static";
const SEALED: &str = "sealed";

/// Reference-side finality token, written `sealed` on the target side
const REFERENCE_FINAL: &str = "final";

/// Target-side finality token for fields
const TARGET_READONLY: &str = "readonly";

/// Target-side token for assembly visibility, the counterpart of package-private
const TARGET_INTERNAL: &str = "internal";

const REFERENCE_VISIBILITY: &[&str] = &["public", "protected", "private"];

/// Member tokens describing implementation details with no counterpart on the other side
const REFERENCE_IGNORED_MEMBER_TOKENS: &[&str] = &["synchronized", "transient", "native", "strictfp"];
const TARGET_IGNORED_MEMBER_TOKENS: &[&str] =
    &["virtual", "override", "new", "extern", "unsafe", "async"];

/// Display precedence of reference modifiers
const REFERENCE_ORDER: &[&str] = &[
    "public",
    "protected",
    "private",
    "abstract",
    "static",
    "final",
    "synchronized",
    "volatile",
    "transient",
    "native",
    "strictfp",
];

/// Display precedence of target modifiers
const TARGET_ORDER: &[&str] = &[
    "public",
    "protected",
    "private",
    "internal",
    "protected internal",
    "private protected",
    "abstract",
    "sealed",
    "static",
    "readonly",
    "volatile",
    "extern",
    "unsafe",
    "new",
    "virtual",
    "override",
    "async",
    "const",
];

/// What the modifiers being compared belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifierUsage {
    Type,
    Member,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModifierError {
    #[error("{0} type is missing the public modifier")]
    NotPublic(Side),
}

/// Decide whether reference and target modifiers mean the same thing.
///
/// # Errors
///
/// Returns `ModifierError::NotPublic` when `usage` is [`ModifierUsage::Type`]
/// and either side lacks the `public` token. Only public types are ever
/// passed in, so this signals a broken extraction contract upstream.
pub fn modifiers_equivalent<S: AsRef<str>>(
    usage: ModifierUsage,
    reference: &[S],
    target: &[S],
) -> Result<bool, ModifierError> {
    match usage {
        ModifierUsage::Type => type_modifiers_equivalent(reference, target),
        ModifierUsage::Member => Ok(member_modifiers_equivalent(reference, target)),
    }
}

/// Type-level comparison, see [`modifiers_equivalent`]
///
/// # Errors
///
/// Returns `ModifierError::NotPublic` if either side lacks `public`.
pub fn type_modifiers_equivalent<S: AsRef<str>>(
    reference: &[S],
    target: &[S],
) -> Result<bool, ModifierError> {
    let reference = token_set(reference);
    let target = token_set(target);

    if !reference.contains(PUBLIC) {
        return Err(ModifierError::NotPublic(Side::Reference));
    }
    if !target.contains(PUBLIC) {
        return Err(ModifierError::NotPublic(Side::Target));
    }

    Ok(normalize_type(reference, Side::Reference) == normalize_type(target, Side::Target))
}

/// Member-level comparison; never requires `public`
pub fn member_modifiers_equivalent<S: AsRef<str>>(reference: &[S], target: &[S]) -> bool {
    normalize_member(token_set(reference), Side::Reference)
        == normalize_member(token_set(target), Side::Target)
}

fn token_set<S: AsRef<str>>(tokens: &[S]) -> BTreeSet<&str> {
    tokens.iter().map(|t| t.as_ref()).collect()
}

// `static` marks a nested class on the reference side and a no-instance
// utility on the target side; neither is a type-level mismatch.
fn normalize_type(mut tokens: BTreeSet<&str>, side: Side) -> BTreeSet<&str> {
    tokens.remove(STATIC);
    if side == Side::Reference && tokens.remove(REFERENCE_FINAL) {
        tokens.insert(SEALED);
    }
    tokens
}

fn normalize_member(mut tokens: BTreeSet<&str>, side: Side) -> BTreeSet<&str> {
    tokens.remove(STATIC);
    match side {
        Side::Reference => {
            for token in REFERENCE_IGNORED_MEMBER_TOKENS {
                tokens.remove(token);
            }
            if tokens.remove(REFERENCE_FINAL) {
                tokens.insert(SEALED);
            }
            if !REFERENCE_VISIBILITY.iter().any(|v| tokens.contains(v)) {
                tokens.insert(TARGET_INTERNAL);
            }
        }
        Side::Target => {
            for token in TARGET_IGNORED_MEMBER_TOKENS {
                tokens.remove(token);
            }
            if tokens.remove(TARGET_READONLY) {
                tokens.insert(SEALED);
            }
        }
    }
    tokens
}

/// Order modifiers by the side's canonical precedence for stable display.
///
/// Unknown tokens sort last, alphabetically among themselves.
#[must_use]
pub fn sort_modifiers<S: AsRef<str>>(side: Side, modifiers: &[S]) -> Vec<String> {
    let order = match side {
        Side::Reference => REFERENCE_ORDER,
        Side::Target => TARGET_ORDER,
    };
    let rank = |token: &str| order.iter().position(|o| *o == token).unwrap_or(order.len());

    let mut sorted: Vec<String> = modifiers.iter().map(|m| m.as_ref().to_string()).collect();
    sorted.sort_by(|a, b| rank(a).cmp(&rank(b)).then_with(|| a.cmp(b)));
    sorted.dedup();
    sorted
}
