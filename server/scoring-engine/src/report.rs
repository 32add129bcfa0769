//! Report assembly (JSON contract) and its plain-text rendering.

use std::fmt::Write as _;

use crate::aggregate;
use crate::fingerprint;
use crate::overrides::OverrideLayer;
use crate::rules;
use crate::types::*;

/// Snapshot of every category with effective values applied.
pub fn build(
  categories: &[Category],
  overrides: &OverrideLayer,
  totals: Totals,
  stale_overrides: Vec<String>,
) -> Report {
  let categories = categories
    .iter()
    .map(|c| {
      let lines = c
        .lines
        .iter()
        .enumerate()
        .map(|(index, line)| {
          let (effective_points, should_count) = overrides.effective(&c.guide_code, index, c.points);
          LineView {
            index,
            id: fingerprint::line_id(line),
            line: line.clone(),
            effective_points,
            should_count,
          }
        })
        .collect();

      let complexity_levels = rules::complexity_levels(&c.guide_code).to_vec();
      CategoryView {
        guide_code: c.guide_code.clone(),
        description: c.description.clone(),
        points: c.points,
        file_count: c.lines.len(),
        total: aggregate::category_total(c, overrides),
        all_selected: aggregate::all_selected(c, overrides),
        shows_points_per_file: complexity_levels.is_empty(),
        complexity_levels,
        lines,
        subgroups: aggregate::subgroups(c, overrides),
      }
    })
    .collect();

  Report {
    categories,
    totals,
    stale_overrides,
  }
}

/// `12` for whole numbers, `2.5` otherwise.
pub fn fmt_points(points: f64) -> String {
  if points.fract() == 0.0 {
    format!("{}", points as i64)
  } else {
    format!("{}", points)
  }
}

/// Human-readable rendering of a report.
pub fn render_text(report: &Report) -> String {
  let mut out = String::new();

  for c in &report.categories {
    let per_file = if c.shows_points_per_file {
      format!(", {} points per file", fmt_points(c.points))
    } else {
      String::new()
    };
    let _ = writeln!(
      out,
      "[{}] {} - {} ({} file(s){}, {} point(s) total)",
      if c.all_selected { "x" } else { " " },
      c.guide_code,
      c.description,
      c.file_count,
      per_file,
      fmt_points(c.total)
    );

    match &c.subgroups {
      Some(groups) => {
        for g in groups {
          let _ = writeln!(
            out,
            "  {} file(s), {} point(s) each, {} point(s) total",
            g.lines.len(),
            fmt_points(g.effective_points),
            fmt_points(g.total())
          );
          for l in &g.lines {
            let view = &c.lines[l.index];
            let _ = writeln!(out, "    [{}] {}. {}", mark(view), l.index, l.line);
          }
        }
      }
      None => {
        for view in &c.lines {
          let _ = writeln!(out, "  [{}] {}. {}", mark(view), view.index, view.line);
        }
      }
    }
    out.push('\n');
  }

  let t = &report.totals;
  let _ = writeln!(out, "Total files: {}", t.files);
  if t.sprint_bonus > 0.0 {
    let _ = writeln!(out, "Sprint rituals: {}", fmt_points(t.sprint_bonus));
  }
  let _ = writeln!(out, "Total points: {}", fmt_points(t.points));
  for code in &report.stale_overrides {
    let _ = writeln!(out, "warning: overrides for {} may no longer match their lines", code);
  }
  out
}

fn mark(view: &LineView) -> &'static str {
  if view.should_count {
    "x"
  } else {
    " "
  }
}
