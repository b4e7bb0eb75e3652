//! MicroBioBase Common Library
//!
//! Platform-neutral core of the reference browser: canonical types, the
//! alias-driven normalizer, filtering, favorites, theme and detail projection.

pub mod types;
pub mod alias;
pub mod error;
pub mod normalizer;
pub mod filter;
pub mod favorites;
pub mod storage;
pub mod theme;
pub mod detail;
pub mod state;
pub mod export;

pub use types::{AntibioticRef, Breakpoint, CanonicalItem, ItemKind, UNKNOWN_BREAKPOINT};
pub use alias::{AliasConfig, AliasFile, CanonicalField, FieldAliases};
pub use error::{Error, Result};
pub use normalizer::{derive_id, duplicate_ids, normalize, normalize_with};
pub use filter::{classification_counts, filter, Category, FilterResult};
pub use favorites::{FavoriteStore, FAVORITES_KEY};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore};
pub use theme::{Theme, THEME_KEY};
pub use detail::{project, DetailView};
pub use state::{AppState, ViewState};
