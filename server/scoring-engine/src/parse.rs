//! Line parsing: header detection, action/file/extension/message extraction.
//!
//! Expected header format (produced by the git-command pipeline):
//! `<action> <repo>/<path>#<commit>;<detail>` with `<action>` one of A, M, D.

use once_cell::sync::Lazy;

use regex::Regex;

use crate::types::{Action, ParsedRecord};

static HEADER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(D|A|M)\b").expect("valid regex"));
static DELETED_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^D\b").expect("valid regex"));
static ACTION_RE: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"^(?i)(a|m|d)\b").expect("valid regex"));
static FILE_NAME_RE: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"/([^\s#/]+)#").expect("valid regex"));
static DEDUP_PATH_RE: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"^([AM])\s+([^#]+?)\s*#").expect("valid regex"));
static ACTION_PREFIX_RE: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"^(A|M)\s+").expect("valid regex"));

/// Uppercase A/M/D followed by a word boundary.
pub fn is_header_line(line: &str) -> bool {
  HEADER_RE.is_match(line.trim())
}

pub fn is_deleted(line: &str) -> bool {
  DELETED_RE.is_match(line.trim())
}

/// Test and spec files score through their compound extension.
pub fn is_test_file(file_name: &str) -> bool {
  file_name.contains(".test") || file_name.contains(".spec")
}

/// `foo.ts` -> `ts`, `foo.component.spec.ts` -> `spec.ts`, `Jenkinsfile` -> ``.
pub fn extension_of(file_name: &str) -> String {
  let parts: Vec<&str> = file_name.split('.').collect();
  if is_test_file(file_name) {
    return parts[parts.len() - 2..].join(".");
  }
  if parts.len() > 1 {
    parts[parts.len() - 1].to_string()
  } else {
    String::new()
  }
}

/// Trimmed text after the first `;`.
pub fn message_of(line: &str) -> Option<String> {
  line
    .split_once(';')
    .map(|(_, rest)| rest.trim().to_string())
}

/// Last path segment before the `#` marker, or `None` if the line has no `/...#`.
pub fn file_name_of(line: &str) -> Option<String> {
  let header = &line[..line.find('#')? + 1];
  FILE_NAME_RE.captures(header).map(|caps| caps[1].to_string())
}

/// Parse one raw line. Returns `None` for lines that are not scoreable headers.
pub fn parse_line(line: &str) -> Option<ParsedRecord> {
  let trimmed = line.trim();
  let action_token = ACTION_RE.captures(trimmed)?;
  let action = Action::from_token(&action_token[1])?;
  let file_name = file_name_of(trimmed)?;
  let extension = extension_of(&file_name);

  Some(ParsedRecord {
    action,
    file_name,
    extension,
    raw_line: trimmed.to_string(),
    message: message_of(trimmed),
  })
}

/// Dedup key `(path before #, message)`, returned alongside the line's action.
///
/// Only uppercase `A`/`M` lines produce a key; everything else is dropped
/// before deduplication.
pub fn dedup_key(line: &str) -> Option<(Action, String, String)> {
  let caps = DEDUP_PATH_RE.captures(line)?;
  let action = Action::from_token(&caps[1])?;
  let path = caps[2].trim().to_string();
  let message = message_of(line).unwrap_or_default();
  Some((action, path, message))
}

/// Drop the leading `A ` / `M ` token.
pub fn strip_action(line: &str) -> String {
  ACTION_PREFIX_RE.replace(line, "").into_owned()
}
