//! Group scored lines into categories and derive totals through the override layer.
//!
//! Nothing here is cached on a `Category`; every total is recomputed from the
//! category plus the current overrides.

use std::collections::HashMap;

use crate::config::Config;
use crate::overrides::OverrideLayer;
use crate::rules;
use crate::types::{Category, ScoredLine, SprintToggles, Subgroup, SubgroupLine, Totals};

/// One category per guide code, in order of first appearance.
pub fn group_by_category(scored: &[ScoredLine]) -> Vec<Category> {
  let mut categories: Vec<Category> = Vec::new();
  let mut by_code: HashMap<&str, usize> = HashMap::new();

  for s in scored {
    match by_code.get(s.guide_code.as_str()) {
      Some(&slot) => categories[slot].lines.push(s.line.clone()),
      None => {
        by_code.insert(s.guide_code.as_str(), categories.len());
        categories.push(Category {
          guide_code: s.guide_code.clone(),
          description: s.description.clone(),
          points: s.points,
          lines: vec![s.line.clone()],
        });
      }
    }
  }
  categories
}

/// Sum of effective points over the lines that count.
pub fn category_total(category: &Category, overrides: &OverrideLayer) -> f64 {
  (0..category.lines.len())
    .map(|idx| overrides.effective(&category.guide_code, idx, category.points))
    .filter(|(_, counted)| *counted)
    .map(|(points, _)| points)
    .sum()
}

/// Whether a line is included, defaulting to true.
pub fn is_selected(category: &Category, index: usize, overrides: &OverrideLayer) -> bool {
  overrides.effective(&category.guide_code, index, category.points).1
}

/// Included lines of a category, in order.
pub fn selected_lines<'c>(category: &'c Category, overrides: &OverrideLayer) -> Vec<&'c str> {
  category
    .lines
    .iter()
    .enumerate()
    .filter(|(idx, _)| is_selected(category, *idx, overrides))
    .map(|(_, line)| line.as_str())
    .collect()
}

/// True when every line of the category is included (the header checkbox state).
pub fn all_selected(category: &Category, overrides: &OverrideLayer) -> bool {
  (0..category.lines.len()).all(|idx| is_selected(category, idx, overrides))
}

/// Partition a tiered category by effective points, ascending.
///
/// Categories without complexity tiers yield `None`.
pub fn subgroups(category: &Category, overrides: &OverrideLayer) -> Option<Vec<Subgroup>> {
  if !rules::has_complexity_tiers(&category.guide_code) {
    return None;
  }

  let mut groups: Vec<Subgroup> = Vec::new();
  for (index, line) in category.lines.iter().enumerate() {
    let (points, _) = overrides.effective(&category.guide_code, index, category.points);
    let entry = SubgroupLine {
      line: line.clone(),
      index,
    };
    match groups.iter_mut().find(|g| g.effective_points == points) {
      Some(g) => g.lines.push(entry),
      None => groups.push(Subgroup {
        effective_points: points,
        lines: vec![entry],
      }),
    }
  }
  groups.sort_by(|a, b| a.effective_points.total_cmp(&b.effective_points));
  Some(groups)
}

/// Included lines of one subgroup.
pub fn selected_in_subgroup<'s>(
  category: &Category,
  subgroup: &'s Subgroup,
  overrides: &OverrideLayer,
) -> Vec<&'s str> {
  subgroup
    .lines
    .iter()
    .filter(|l| is_selected(category, l.index, overrides))
    .map(|l| l.line.as_str())
    .collect()
}

/// Global totals: every classified line counts as a file; points honor overrides.
pub fn totals(
  categories: &[Category],
  overrides: &OverrideLayer,
  sprints: SprintToggles,
  config: &Config,
) -> Totals {
  let files = categories.iter().map(|c| c.lines.len()).sum();
  let category_points: f64 = categories.iter().map(|c| category_total(c, overrides)).sum();
  let sprint_bonus = sprints.enabled_count() as f64 * config.sprint_bonus_points;

  Totals {
    files,
    category_points,
    sprint_bonus,
    points: category_points + sprint_bonus,
  }
}

/// True when at least one line in any category is included.
pub fn has_selection(categories: &[Category], overrides: &OverrideLayer) -> bool {
  categories
    .iter()
    .any(|c| (0..c.lines.len()).any(|idx| is_selected(c, idx, overrides)))
}
