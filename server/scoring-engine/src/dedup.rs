//! Collapse repeated records for the same file and message across uploads.

use std::collections::HashMap;

use crate::parse;
use crate::types::Action;

/// Messages seen for one path, in first-seen order.
struct PathEntry {
  path: String,
  messages: Vec<(String, Action, String)>,
}

/// Split every upload into trimmed non-empty lines and deduplicate them.
///
/// Per `(path, message)` the first line wins, except that an `A` line
/// replaces a kept `M` line. Output is grouped by path in first-seen order,
/// then by message in first-seen order. Lines without a path are dropped.
pub fn dedupe<S: AsRef<str>>(contents: &[S]) -> Vec<String> {
  let lines = contents
    .iter()
    .flat_map(|c| c.as_ref().split('\n'))
    .map(str::trim)
    .filter(|l| !l.is_empty());
  dedupe_lines(lines)
}

/// Deduplicate already-split lines.
pub fn dedupe_lines<'a, I>(lines: I) -> Vec<String>
where
  I: IntoIterator<Item = &'a str>,
{
  let mut entries: Vec<PathEntry> = Vec::new();
  let mut by_path: HashMap<String, usize> = HashMap::new();

  for line in lines {
    let Some((action, path, message)) = parse::dedup_key(line) else {
      continue;
    };

    let slot = *by_path.entry(path.clone()).or_insert_with(|| {
      entries.push(PathEntry {
        path,
        messages: Vec::new(),
      });
      entries.len() - 1
    });
    let entry = &mut entries[slot];

    match entry.messages.iter_mut().find(|(m, _, _)| *m == message) {
      None => entry.messages.push((message, action, line.to_string())),
      Some(kept) => {
        // Creation supersedes a same-message modification; every other pair keeps the first.
        if kept.1 == Action::Modify && action == Action::Add {
          kept.1 = action;
          kept.2 = line.to_string();
        }
      }
    }
  }

  tracing::debug!(paths = entries.len(), "deduplicated lines by path");

  entries
    .into_iter()
    .flat_map(|e| e.messages.into_iter().map(|(_, _, line)| line))
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn identical_lines_across_files_collapse() {
    let a = "M repo/src/a.ts#c1;HU-1\n";
    let b = "M repo/src/a.ts#c2;HU-1\n";
    let out = dedupe(&[a, b]);
    assert_eq!(out, vec!["M repo/src/a.ts#c1;HU-1"]);
  }

  #[test]
  fn add_replaces_modify_in_either_order() {
    let out = dedupe(&["M repo/a.ts#c1;HU-1\nA repo/a.ts#c2;HU-1"]);
    assert_eq!(out, vec!["A repo/a.ts#c2;HU-1"]);

    let out = dedupe(&["A repo/a.ts#c2;HU-1\nM repo/a.ts#c1;HU-1"]);
    assert_eq!(out, vec!["A repo/a.ts#c2;HU-1"]);
  }

  #[test]
  fn different_messages_are_kept_apart() {
    let out = dedupe(&["M repo/a.ts#c1;HU-1\nM repo/a.ts#c2;HU-2"]);
    assert_eq!(out.len(), 2);
  }

  #[test]
  fn output_grouped_by_first_seen_path() {
    let text = "M repo/a.ts#c1;HU-1\nM repo/b.ts#c1;HU-1\nM repo/a.ts#c2;HU-2";
    let out = dedupe(&[text]);
    assert_eq!(
      out,
      vec![
        "M repo/a.ts#c1;HU-1",
        "M repo/a.ts#c2;HU-2",
        "M repo/b.ts#c1;HU-1",
      ]
    );
  }

  #[test]
  fn lines_without_path_or_with_delete_are_dropped() {
    let text = "abc1234 2024-01-01 Initial commit\n\nD repo/old.ts#c1;HU-1\nA repo/new.ts#c1;HU-1";
    let out = dedupe(&[text]);
    assert_eq!(out, vec!["A repo/new.ts#c1;HU-1"]);
  }

  #[test]
  fn lines_are_trimmed() {
    let out = dedupe(&["   A repo/a.ts#c1;HU-1   \r\n"]);
    assert_eq!(out, vec!["A repo/a.ts#c1;HU-1"]);
  }

  #[test]
  fn dedupe_is_idempotent() {
    let text = "M repo/a.ts#c1;HU-1\nA repo/a.ts#c2;HU-1\nM repo/b.ts#c1;\nM repo/b.ts#c3";
    let once = dedupe(&[text]);
    let twice = dedupe_lines(once.iter().map(String::as_str));
    assert_eq!(once, twice);
  }
}
