//! Loaders for metadata and configuration documents.
//!
//! Both formats are JSON. Documents are validated after parsing, so a loaded
//! [`ApiMetadata`](crate::core::ApiMetadata) always has consistent names and
//! a loaded [`ParityConfig`] never carries two overrides for one type.
//!
//! ## Metadata
//!
//! ```json
//! {
//!   "library": "widgets",
//!   "version": "4.8.1",
//!   "types": [
//!     {
//!       "kind": "class",
//!       "package": "a.b",
//!       "simple_name": "WidgetImpl",
//!       "full_name": "a.b.WidgetImpl",
//!       "modifiers": ["public"],
//!       "fields": [{"name": "_count", "member_kind": "field", "declared_type": "int"}]
//!     }
//!   ]
//! }
//! ```
//!
//! Target documents may spell `package` as `namespace`.
//!
//! ## Configuration
//!
//! | Key | Description | Required |
//! |-----|-------------|----------|
//! | `namespace_mappings` | `reference_prefix` to `target_prefix` rewrites | No |
//! | `overrides` | Explicit `reference` to `target` pairings | No |
//! | `well_known_types` | Replaces the built-in platform type table | No |
//! | `libraries` | `name`, `reference`, `target` for batch runs | No |

pub mod config;
pub mod metadata;

pub use config::{load_config, parse_config, ConfigError, LibraryConfig, ParityConfig};
pub use metadata::{load_metadata, parse_metadata, MetadataError};
