//! Integration tests for the scoring engine.

use pretty_assertions::assert_eq;
use scoring_engine::{categorize, files, OverrideLayer, SelectedFile, Session};

const EXPORT: &str = "repo : abc1234 : feature/HU-7 : Initial commit : 2024-01-01\n\
                      A repo/src/foo.ts#abc1234;HU-7\n\
                      A repo/src/foo.test.ts#abc1234;HU-7\n\
                      D repo/src/old.ts#abc1234;HU-7\n";

fn session_with(files: &[(&str, &str)]) -> Session {
  let mut session = Session::with_defaults();
  session.add_files(
    files
      .iter()
      .map(|(name, text)| SelectedFile::from_text(*name, *text))
      .collect(),
  );
  session
}

#[test]
fn end_to_end_export_scores_two_files() {
  let session = session_with(&[("commits_feature_HU-7.txt", EXPORT)]);

  let codes: Vec<(&str, usize, f64)> = session
    .categories()
    .iter()
    .map(|c| (c.guide_code.as_str(), c.lines.len(), c.points))
    .collect();
  assert_eq!(codes, vec![("5.10.5", 1, 10.0), ("5.10.18", 1, 8.0)]);

  let totals = session.totals();
  assert_eq!(totals.files, 2);
  assert_eq!(totals.points, 18.0);
  assert_eq!(totals.sprint_bonus, 0.0);
}

#[test]
fn deleted_files_never_reach_a_category() {
  let session = session_with(&[("a.txt", EXPORT)]);
  assert!(session
    .categories()
    .iter()
    .flat_map(|c| c.lines.iter())
    .all(|l| !l.contains("old.ts")));
}

#[test]
fn same_path_across_uploads_is_scored_once() {
  let first = "M repo/src/app.ts#c1;HU-1\n";
  let second = "M repo/src/app.ts#c2;HU-1\nA repo/src/app.ts#c3;HU-1\n";
  let session = session_with(&[("one.txt", first), ("two.txt", second)]);

  assert_eq!(session.categories().len(), 1);
  let category = &session.categories()[0];
  assert_eq!(category.guide_code, "5.10.5");
  assert_eq!(category.lines, vec!["repo/src/app.ts#c3;HU-1"]);
}

#[test]
fn identical_upload_is_ignored() {
  let mut session = session_with(&[("a.txt", EXPORT)]);
  assert_eq!(session.add_files(vec![SelectedFile::from_text("a.txt", EXPORT)]), 0);
  assert_eq!(session.add_files(vec![SelectedFile::from_text("notes.md", EXPORT)]), 0);
  assert_eq!(session.file_names(), vec!["a.txt"]);
}

#[test]
fn sprint_bonus_adds_fixed_points() {
  let mut session = session_with(&[("a.txt", EXPORT)]);
  session.set_sprint(1, true).unwrap();
  assert_eq!(session.totals().points, 63.0);
  session.set_sprint(2, true).unwrap();
  assert_eq!(session.totals().points, 108.0);
  session.set_sprint(1, false).unwrap();
  session.set_sprint(2, false).unwrap();
  assert_eq!(session.totals().points, 18.0);
}

#[test]
fn total_without_overrides_is_lines_times_points() {
  let text = "A repo/a.java#c;x\nA repo/b.java#c;x\nA repo/c.java#c;x\n";
  let session = session_with(&[("a.txt", text)]);
  let category = session.category("5.10.9").unwrap();
  assert_eq!(
    session.category_total("5.10.9").unwrap(),
    category.lines.len() as f64 * category.points
  );
}

#[test]
fn unmatched_extension_contributes_nothing() {
  let session = session_with(&[("a.txt", "A repo/data.unknownext#c;x\nA repo/a.ts#c;x\n")]);
  let totals = session.totals();
  assert_eq!(totals.files, 1);
  assert_eq!(totals.points, 10.0);
}

#[test]
fn complexity_overrides_split_css_into_tiers() {
  let text = "A repo/a.css#c;x\nA repo/b.css#c;x\nA repo/c.scss#c;x\n";
  let mut session = session_with(&[("a.txt", text)]);
  session.set_points("5.10.3", 0, 24.0).unwrap();
  session.set_should_count("5.10.3", 2, false).unwrap();

  let tiers: Vec<(f64, usize)> = session
    .subgroups("5.10.3")
    .unwrap()
    .unwrap()
    .iter()
    .map(|g| (g.effective_points, g.lines.len()))
    .collect();
  assert_eq!(tiers, vec![(8.0, 2), (24.0, 1)]);
  assert_eq!(session.category_total("5.10.3").unwrap(), 32.0);
}

#[test]
fn report_json_is_deterministic() {
  let a = session_with(&[("a.txt", EXPORT)]).report();
  let b = session_with(&[("a.txt", EXPORT)]).report();
  assert_eq!(
    serde_json::to_string(&a).unwrap(),
    serde_json::to_string(&b).unwrap()
  );
}

#[test]
fn overrides_file_round_trips_through_json() {
  let mut session = session_with(&[("a.txt", EXPORT)]);
  session.set_points("5.10.5", 0, 12.0).unwrap();
  let saved = serde_json::to_string(session.overrides()).unwrap();

  let mut fresh = session_with(&[("a.txt", EXPORT)]);
  let layer: OverrideLayer = serde_json::from_str(&saved).unwrap();
  fresh.load_overrides(layer);
  assert_eq!(fresh.totals().points, 20.0);
}

#[test]
fn export_lists_selected_lines_by_category() {
  let session = session_with(&[("a.txt", EXPORT)]);
  let text = session.export_document().unwrap().render();
  assert!(text.starts_with("5.10.5 - "));
  let mut lines = text.lines();
  let title = lines.next().unwrap();
  assert_eq!(lines.next().unwrap(), "-".repeat(title.chars().count()));
  assert!(text.contains("1. repo/src/foo.ts#abc1234;HU-7"));
  assert!(text.contains("1. repo/src/foo.test.ts#abc1234;HU-7"));
}

#[test]
fn categorize_is_pure_over_contents() {
  assert_eq!(categorize(&[EXPORT]), categorize(&[EXPORT.to_string()]));
}

#[tokio::test]
async fn batch_read_feeds_a_session() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("commits_main.txt");
  std::fs::write(&path, EXPORT).unwrap();

  let batch = files::read_batch(&[path]).await.unwrap();
  let mut session = Session::with_defaults();
  assert_eq!(session.add_files(batch), 1);
  assert_eq!(session.totals().points, 18.0);
}

#[tokio::test]
async fn missing_file_fails_the_whole_batch() {
  let dir = tempfile::tempdir().unwrap();
  let good = dir.path().join("a.txt");
  std::fs::write(&good, EXPORT).unwrap();
  let missing = dir.path().join("missing.txt");

  assert!(files::read_batch(&[good, missing]).await.is_err());
}
