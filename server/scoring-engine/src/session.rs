//! Session controller: owns all user-facing state and recomputes categories
//! in full whenever the selected files change.

use std::collections::HashMap;

use git_command::GitCommandConfig;
use tracing::{debug, info, warn};

use crate::aggregate;
use crate::config::Config;
use crate::error::EngineError;
use crate::export::{self, Document};
use crate::files::{FileSet, SelectedFile};
use crate::fingerprint;
use crate::overrides::OverrideLayer;
use crate::rules::{self, ComplexityLevel};
use crate::types::*;

pub struct Session {
  config: Config,
  files: FileSet,
  categories: Vec<Category>,
  overrides: OverrideLayer,
  sprints: SprintToggles,
  git_config: Option<GitCommandConfig>,
  /// Line ids per guide code, from the last recompute.
  layouts: HashMap<String, Vec<String>>,
  stale: Vec<String>,
}

impl Session {
  pub fn new(config: Config) -> Self {
    Self {
      config,
      files: FileSet::new(),
      categories: Vec::new(),
      overrides: OverrideLayer::new(),
      sprints: SprintToggles::default(),
      git_config: None,
      layouts: HashMap::new(),
      stale: Vec::new(),
    }
  }

  pub fn with_defaults() -> Self {
    Self::new(Config::default())
  }

  // -------------------------------------------------------------------------
  // File set commands
  // -------------------------------------------------------------------------

  /// Add an already-read batch and recompute. Returns how many files were new.
  pub fn add_files(&mut self, batch: Vec<SelectedFile>) -> usize {
    let added = self.files.add(batch);
    info!(added, total = self.files.len(), "files selected");
    self.recompute();
    added
  }

  pub fn remove_file(&mut self, name: &str) -> bool {
    let removed = self.files.remove(name);
    if removed {
      self.recompute();
    }
    removed
  }

  pub fn clear_files(&mut self) {
    self.files.clear();
    self.recompute();
  }

  pub fn file_names(&self) -> Vec<&str> {
    self.files.names()
  }

  fn recompute(&mut self) {
    self.categories = crate::categorize(&self.files.contents());

    let layouts: HashMap<String, Vec<String>> = self
      .categories
      .iter()
      .map(|c| (c.guide_code.clone(), fingerprint::category_line_ids(c)))
      .collect();

    // An override is misaligned when the line at its index is no longer the same line.
    let mut stale: Vec<String> = self
      .overrides
      .guide_codes()
      .filter(|code| {
        let before = self.layouts.get(*code);
        let after = layouts.get(*code);
        self
          .overrides
          .indices(code)
          .any(|idx| before.and_then(|ids| ids.get(idx)) != after.and_then(|ids| ids.get(idx)))
      })
      .map(str::to_string)
      .collect();
    // Codes already flagged stay flagged until their overrides are reset.
    for code in std::mem::take(&mut self.stale) {
      if self.overrides.has_entries(&code) && !stale.contains(&code) {
        stale.push(code);
      }
    }
    stale.sort();
    for code in &stale {
      warn!(guide_code = %code, "line order changed; positional overrides may be misaligned");
    }

    self.stale = stale;
    self.layouts = layouts;
    debug!(categories = self.categories.len(), "recomputed categories");
  }

  // -------------------------------------------------------------------------
  // Override commands
  // -------------------------------------------------------------------------

  pub fn set_points(&mut self, guide_code: &str, index: usize, points: f64) -> Result<(), EngineError> {
    self.check_line(guide_code, index)?;
    if !points.is_finite() || points < 0.0 {
      return Err(EngineError::validation("points", "must be a non-negative number"));
    }
    self.overrides.set_points(guide_code, index, points);
    Ok(())
  }

  pub fn set_should_count(&mut self, guide_code: &str, index: usize, should_count: bool) -> Result<(), EngineError> {
    let base = self.check_line(guide_code, index)?.points;
    self.overrides.set_should_count(guide_code, index, should_count, base);
    Ok(())
  }

  /// Select or deselect every line of a category.
  pub fn set_all_should_count(&mut self, guide_code: &str, should_count: bool) -> Result<(), EngineError> {
    let category = self.category(guide_code)?;
    let (len, base) = (category.lines.len(), category.points);
    self.overrides.bulk_set_should_count(guide_code, 0..len, should_count, base);
    Ok(())
  }

  /// Drop every override of a category, clearing any stale flag.
  pub fn reset_overrides(&mut self, guide_code: &str) {
    self.overrides.clear_category(guide_code);
    self.stale.retain(|c| c != guide_code);
  }

  pub fn overrides(&self) -> &OverrideLayer {
    &self.overrides
  }

  /// Replace the override layer wholesale (e.g. loaded from disk).
  ///
  /// Overrides are taken as aligned with the current categories.
  pub fn load_overrides(&mut self, overrides: OverrideLayer) {
    self.overrides = overrides;
    self.stale.clear();
  }

  pub fn load_overrides_json(&mut self, raw: &str) -> Result<(), EngineError> {
    let layer: OverrideLayer = serde_json::from_str(raw)?;
    self.load_overrides(layer);
    Ok(())
  }

  // -------------------------------------------------------------------------
  // Sprint toggles and git-command config
  // -------------------------------------------------------------------------

  pub fn set_sprint(&mut self, sprint: u8, enabled: bool) -> Result<(), EngineError> {
    match sprint {
      1 => self.sprints.sprint1 = enabled,
      2 => self.sprints.sprint2 = enabled,
      _ => return Err(EngineError::validation("sprint", "expected 1 or 2")),
    }
    Ok(())
  }

  pub fn sprints(&self) -> SprintToggles {
    self.sprints
  }

  pub fn confirm_git_config(&mut self, config: GitCommandConfig) -> Result<(), EngineError> {
    config
      .validate()
      .map_err(|e| EngineError::validation(e.field(), &e.to_string()))?;
    self.git_config = Some(config);
    Ok(())
  }

  pub fn git_config(&self) -> Option<&GitCommandConfig> {
    self.git_config.as_ref()
  }

  /// Rewrite every line of a category to `<text before ';'>; <message>`.
  ///
  /// Needs a confirmed non-empty message and at least one selected line.
  /// The rewrite lasts until the next recompute.
  pub fn apply_message_to_group(&mut self, guide_code: &str) -> Result<(), EngineError> {
    let message = self
      .git_config
      .as_ref()
      .and_then(GitCommandConfig::message)
      .ok_or(EngineError::NoMessage)?
      .to_string();

    if self.selected_lines(guide_code)?.is_empty() {
      return Err(EngineError::NothingSelected);
    }

    let category = self
      .categories
      .iter_mut()
      .find(|c| c.guide_code == guide_code)
      .ok_or_else(|| EngineError::UnknownCategory(guide_code.to_string()))?;
    for line in &mut category.lines {
      *line = with_message(line, &message);
    }
    info!(guide_code, lines = category.lines.len(), "applied message to group");
    Ok(())
  }

  // -------------------------------------------------------------------------
  // Queries
  // -------------------------------------------------------------------------

  pub fn categories(&self) -> &[Category] {
    &self.categories
  }

  pub fn category(&self, guide_code: &str) -> Result<&Category, EngineError> {
    self
      .categories
      .iter()
      .find(|c| c.guide_code == guide_code)
      .ok_or_else(|| EngineError::UnknownCategory(guide_code.to_string()))
  }

  pub fn category_total(&self, guide_code: &str) -> Result<f64, EngineError> {
    Ok(aggregate::category_total(self.category(guide_code)?, &self.overrides))
  }

  /// Point choices for a category's lines; empty for flat-rate categories.
  pub fn complexity_levels(&self, guide_code: &str) -> Result<&'static [ComplexityLevel], EngineError> {
    self.category(guide_code)?;
    Ok(rules::complexity_levels(guide_code))
  }

  pub fn subgroups(&self, guide_code: &str) -> Result<Option<Vec<Subgroup>>, EngineError> {
    Ok(aggregate::subgroups(self.category(guide_code)?, &self.overrides))
  }

  pub fn totals(&self) -> Totals {
    aggregate::totals(&self.categories, &self.overrides, self.sprints, &self.config)
  }

  pub fn all_selected(&self, guide_code: &str) -> Result<bool, EngineError> {
    Ok(aggregate::all_selected(self.category(guide_code)?, &self.overrides))
  }

  pub fn has_selection(&self) -> bool {
    aggregate::has_selection(&self.categories, &self.overrides)
  }

  pub fn selected_lines(&self, guide_code: &str) -> Result<Vec<&str>, EngineError> {
    Ok(aggregate::selected_lines(self.category(guide_code)?, &self.overrides))
  }

  /// Selected lines of the subgroup at `points`; empty if no such tier.
  pub fn selected_lines_in_subgroup(&self, guide_code: &str, points: f64) -> Result<Vec<String>, EngineError> {
    let category = self.category(guide_code)?;
    let groups = aggregate::subgroups(category, &self.overrides).unwrap_or_default();
    Ok(
      groups
        .iter()
        .find(|g| g.effective_points == points)
        .map(|g| {
          aggregate::selected_in_subgroup(category, g, &self.overrides)
            .into_iter()
            .map(str::to_string)
            .collect()
        })
        .unwrap_or_default(),
    )
  }

  /// Clipboard text for a category's selected lines.
  pub fn copy_group(&self, guide_code: &str) -> Result<String, EngineError> {
    let lines = self.selected_lines(guide_code)?;
    if lines.is_empty() {
      warn!(guide_code, "nothing selected to copy");
      return Err(EngineError::NothingSelected);
    }
    Ok(export::copy_text(&lines))
  }

  /// Clipboard text for the selected lines of one complexity tier.
  pub fn copy_subgroup(&self, guide_code: &str, points: f64) -> Result<String, EngineError> {
    let lines = self.selected_lines_in_subgroup(guide_code, points)?;
    if lines.is_empty() {
      warn!(guide_code, points, "nothing selected to copy in tier");
      return Err(EngineError::NothingSelected);
    }
    Ok(export::copy_text(&lines))
  }

  pub fn stale_overrides(&self) -> &[String] {
    &self.stale
  }

  pub fn report(&self) -> Report {
    crate::report::build(&self.categories, &self.overrides, self.totals(), self.stale.clone())
  }

  pub fn export_document(&self) -> Result<Document, EngineError> {
    export::build_document(&self.categories, &self.overrides, &self.config)
  }

  fn check_line(&self, guide_code: &str, index: usize) -> Result<&Category, EngineError> {
    let category = self.category(guide_code)?;
    if index >= category.lines.len() {
      return Err(EngineError::validation(
        "index",
        &format!("{} has {} line(s)", guide_code, category.lines.len()),
      ));
    }
    Ok(category)
  }
}

/// `<text before first ';'>; <message>`.
pub fn with_message(line: &str, message: &str) -> String {
  let head = line.split(';').next().unwrap_or(line);
  format!("{}; {}", head, message)
}
