//! Stable per-line identities.
//!
//! Overrides stay positional; ids let callers notice when the line at a
//! position is no longer the same line.

use crate::types::Category;

/// Short hex id for one stripped line.
///
/// Uses blake3 and keeps the first 16 hex chars.
pub fn line_id(line: &str) -> String {
  let hash = blake3::hash(line.as_bytes());
  hash.to_hex()[..16].to_string()
}

/// Ids of a category's lines, in order.
pub fn category_line_ids(category: &Category) -> Vec<String> {
  category.lines.iter().map(|l| line_id(l)).collect()
}
