//! Commit Scoring Engine: deterministic, rule-based.
//!
//! Turns git name-status exports (`<action> <repo>/<path>#<commit>;<detail>`
//! lines) into scored categories of a fixed scoring guide, with per-line
//! user overrides layered on top and totals derived on demand.
//!
//! No git access, no DB; pure computation + in-memory session state.

pub mod aggregate;
pub mod classify;
pub mod config;
pub mod dedup;
pub mod error;
pub mod export;
pub mod files;
pub mod fingerprint;
pub mod overrides;
pub mod parse;
pub mod report;
pub mod rules;
pub mod session;
pub mod types;

use tracing::debug;

pub use config::Config;
pub use error::EngineError;
pub use files::SelectedFile;
pub use overrides::{OverrideEntry, OverrideLayer};
pub use session::Session;
pub use types::{Category, Report, Totals};

/// Run the whole pipeline over the text of every upload (no I/O).
///
/// Dedup, header filter, deletion filter, classification, grouping.
pub fn categorize<S: AsRef<str>>(contents: &[S]) -> Vec<Category> {
  let unique = dedup::dedupe(contents);
  let headers: Vec<&str> = unique
    .iter()
    .map(String::as_str)
    .filter(|l| parse::is_header_line(l))
    .collect();
  let kept: Vec<&str> = headers.iter().copied().filter(|l| !parse::is_deleted(l)).collect();
  let scored: Vec<types::ScoredLine> = kept.iter().filter_map(|l| classify::score_line(l)).collect();

  debug!(
    unique = unique.len(),
    headers = headers.len(),
    not_deleted = kept.len(),
    scored = scored.len(),
    "pipeline stages"
  );

  aggregate::group_by_category(&scored)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn categorize_returns_valid_shape() {
    let text = "abc1234 2024-01-01 Initial commit\n\
                A repo/src/foo.ts#abc1234;msg\n\
                M repo/src/foo.test.ts#abc1234;msg\n\
                D repo/src/old.ts#abc1234;msg\n";
    let cats = categorize(&[text]);
    let codes: Vec<&str> = cats.iter().map(|c| c.guide_code.as_str()).collect();
    assert_eq!(codes, vec!["5.10.5", "5.10.21"]);
    assert!(cats
      .iter()
      .all(|c| c.lines.iter().all(|l| !l.contains("old.ts"))));
  }

  #[test]
  fn empty_input_has_no_categories() {
    assert!(categorize::<&str>(&[]).is_empty());
    assert!(categorize(&["\n\n"]).is_empty());
  }
}
