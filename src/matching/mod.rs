//! Type matching and structural comparison.
//!
//! - [`naming`]: Pure transforms between the two naming conventions
//! - [`modifiers`]: Modifier vocabulary equivalence
//! - [`heuristic`]: Pairwise correspondence of types and bare type names
//! - [`engine`]: [`TypeMatcher`], the global one-to-one type matching
//! - [`members`]: Member existence and declared-type comparison
//! - [`diagnosis`]: [`StructuralDiff`] of a matched pair
//!
//! ## Matching Precedence
//!
//! Each step runs over every unresolved reference type before the next one
//! starts:
//!
//! 1. **Override**: explicit pairing from configuration
//! 2. **Declared equivalence**: the target names its reference counterpart
//! 3. **Heuristic**: namespace mapping plus the naming conventions. Classes
//!    always lose the `Impl` suffix, interfaces gain the `I` marker, and a
//!    nested path may be flattened on either side.
//!
//! More than one heuristic candidate, under any combination of rules, leaves
//! the reference type unmatched and records the candidates instead of guessing.
//!
//! ## Example
//!
//! ```rust
//! use api_parity::core::{ComparisonConfig, Side, TypeDescriptor, TypeKind};
//! use api_parity::matching::match_types;
//!
//! let reference = vec![TypeDescriptor::new(Side::Reference, TypeKind::Interface, "a.b.Thing")];
//! let target = vec![TypeDescriptor::new(Side::Target, TypeKind::Interface, "A.B.IThing")];
//! let config = ComparisonConfig::default();
//!
//! let matching = match_types(&reference, &target, &config);
//! assert_eq!(matching.matched.len(), 1);
//! ```

pub mod diagnosis;
pub mod engine;
pub mod heuristic;
pub mod members;
pub mod modifiers;
pub mod naming;

pub use diagnosis::{ComparisonError, StructuralDiff};
pub use engine::{match_types, ConfigWarning, MatchExplanation, TypeMatcher, TypeMatching};
pub use heuristic::MatchContext;
pub use members::{MemberDiff, MemberReference};
pub use modifiers::{modifiers_equivalent, ModifierError, ModifierUsage};
