//! Engine configuration with sane defaults.

/// Scoring and export settings.
#[derive(Debug, Clone)]
pub struct Config {
  /// Flat points added per enabled sprint ritual toggle.
  pub sprint_bonus_points: f64,
  /// Column width for wrapped document lines.
  pub wrap_width: usize,
  /// Vertical position past which the next printed line starts a new page.
  pub page_break_threshold: u32,
  /// Vertical advance per printed line.
  pub line_height: u32,
  /// Vertical position of the first line on a page.
  pub page_top: u32,
  /// Extra vertical space after each category block.
  pub group_gap: u32,
  /// File name the exported document is saved under.
  pub export_file_name: String,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      sprint_bonus_points: 45.0,
      wrap_width: 95,
      page_break_threshold: 280,
      line_height: 6,
      page_top: 10,
      group_gap: 8,
      export_file_name: "linhas-pontuadas.txt".to_string(),
    }
  }
}
