//! Core types for the scoring engine (pipeline records + JSON output contracts).

use serde::{Deserialize, Serialize};

use crate::rules::ComplexityLevel;

// ---------------------------------------------------------------------------
// Action (git name-status token)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
  #[serde(rename = "A")]
  Add,
  #[serde(rename = "M")]
  Modify,
  #[serde(rename = "D")]
  Delete,
}

impl Action {
  /// Parse a single action token, ignoring case.
  pub fn from_token(token: &str) -> Option<Self> {
    match token.to_ascii_uppercase().as_str() {
      "A" => Some(Self::Add),
      "M" => Some(Self::Modify),
      "D" => Some(Self::Delete),
      _ => None,
    }
  }
}

// ---------------------------------------------------------------------------
// Pipeline records
// ---------------------------------------------------------------------------

/// One header line broken into its parts.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRecord {
  pub action: Action,
  /// Last path segment, between the final `/` and the `#` marker.
  pub file_name: String,
  /// Simple (`ts`) or compound (`spec.ts`) extension; empty when the name has no dot.
  pub extension: String,
  pub raw_line: String,
  /// Trimmed text after the first `;`, if any.
  pub message: Option<String>,
}

/// A parsed record that matched a rule.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredLine {
  pub record: ParsedRecord,
  pub points: f64,
  pub guide_code: String,
  pub description: String,
  /// The raw line without its leading action token.
  pub line: String,
}

/// All scored lines sharing one guide code, in first-seen order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
  pub guide_code: String,
  pub description: String,
  pub points: f64,
  pub lines: Vec<String>,
}

/// One line of a subgrouped category, remembering its position in the category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubgroupLine {
  pub line: String,
  pub index: usize,
}

/// Lines of a category that currently share the same effective points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Subgroup {
  pub effective_points: f64,
  pub lines: Vec<SubgroupLine>,
}

impl Subgroup {
  /// Points shown for the tier: every line at the tier value.
  pub fn total(&self) -> f64 {
    self.effective_points * self.lines.len() as f64
  }
}

// ---------------------------------------------------------------------------
// Sprint rituals
// ---------------------------------------------------------------------------

/// The two agile-ritual toggles; each enabled one adds a flat bonus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SprintToggles {
  pub sprint1: bool,
  pub sprint2: bool,
}

impl SprintToggles {
  pub fn enabled_count(&self) -> usize {
    usize::from(self.sprint1) + usize::from(self.sprint2)
  }
}

// ---------------------------------------------------------------------------
// Output types (JSON contract)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Totals {
  /// Every classified line, included or not.
  pub files: usize,
  /// Included effective points across categories.
  pub category_points: f64,
  pub sprint_bonus: f64,
  pub points: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineView {
  pub index: usize,
  /// Content hash of the line, stable across recomputes.
  pub id: String,
  pub line: String,
  pub effective_points: f64,
  pub should_count: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryView {
  pub guide_code: String,
  pub description: String,
  pub points: f64,
  pub file_count: usize,
  pub total: f64,
  pub all_selected: bool,
  /// False for the complexity-tier categories, whose per-file value varies.
  pub shows_points_per_file: bool,
  /// Point choices offered per line; empty for flat-rate categories.
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub complexity_levels: Vec<ComplexityLevel>,
  pub lines: Vec<LineView>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub subgroups: Option<Vec<Subgroup>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
  pub categories: Vec<CategoryView>,
  pub totals: Totals,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub stale_overrides: Vec<String>,
}
