//! Favorites export core shared by every front end.

#[cfg(feature = "excel")]
pub mod excel_core;

use crate::error::Result;
use crate::types::CanonicalItem;

/// Favorites as a pretty-printed JSON array of canonical items
pub fn favorites_json(items: &[&CanonicalItem]) -> Result<String> {
    Ok(serde_json::to_string_pretty(items)?)
}
