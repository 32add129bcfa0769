//! Sparse per-line overrides keyed by `(guide_code, index)`.
//!
//! Absence of an entry means the category's base points, counted. The layer
//! never touches category data; it only answers lookups.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverrideEntry {
  pub points: f64,
  pub should_count: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OverrideLayer {
  entries: BTreeMap<String, BTreeMap<usize, OverrideEntry>>,
}

impl OverrideLayer {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn get(&self, guide_code: &str, index: usize) -> Option<&OverrideEntry> {
    self.entries.get(guide_code)?.get(&index)
  }

  /// `(points, should_count)` for a line, falling back to `base_points`, counted.
  pub fn effective(&self, guide_code: &str, index: usize, base_points: f64) -> (f64, bool) {
    match self.get(guide_code, index) {
      Some(e) => (e.points, e.should_count),
      None => (base_points, true),
    }
  }

  pub fn set_points(&mut self, guide_code: &str, index: usize, points: f64) {
    let should_count = self
      .get(guide_code, index)
      .map(|e| e.should_count)
      .unwrap_or(true);
    self.insert(guide_code, index, OverrideEntry { points, should_count });
  }

  /// Set the inclusion flag; an existing points choice survives, else `base_points`.
  pub fn set_should_count(&mut self, guide_code: &str, index: usize, should_count: bool, base_points: f64) {
    let points = self
      .get(guide_code, index)
      .map(|e| e.points)
      .unwrap_or(base_points);
    self.insert(guide_code, index, OverrideEntry { points, should_count });
  }

  /// Replace the category's entries with one per index, all set to `should_count`.
  pub fn bulk_set_should_count<I>(&mut self, guide_code: &str, indices: I, should_count: bool, base_points: f64)
  where
    I: IntoIterator<Item = usize>,
  {
    let previous = self.entries.remove(guide_code).unwrap_or_default();
    let replaced = indices
      .into_iter()
      .map(|idx| {
        let points = previous.get(&idx).map(|e| e.points).unwrap_or(base_points);
        (idx, OverrideEntry { points, should_count })
      })
      .collect();
    self.entries.insert(guide_code.to_string(), replaced);
  }

  pub fn has_entries(&self, guide_code: &str) -> bool {
    self.entries.get(guide_code).is_some_and(|m| !m.is_empty())
  }

  /// Indices with an entry for this guide code, ascending.
  pub fn indices<'a>(&'a self, guide_code: &str) -> impl Iterator<Item = usize> + 'a {
    self
      .entries
      .get(guide_code)
      .into_iter()
      .flat_map(|m| m.keys().copied())
  }

  pub fn guide_codes(&self) -> impl Iterator<Item = &str> {
    self.entries.keys().map(String::as_str)
  }

  pub fn clear_category(&mut self, guide_code: &str) {
    self.entries.remove(guide_code);
  }

  fn insert(&mut self, guide_code: &str, index: usize, entry: OverrideEntry) {
    self
      .entries
      .entry(guide_code.to_string())
      .or_default()
      .insert(index, entry);
  }
}
