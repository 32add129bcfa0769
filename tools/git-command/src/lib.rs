//! git-command: the shell pipeline that produces scoring-engine input files.
//!
//! Run inside a repository, the command lists the author's commits in a date
//! range with `--name-status` and rewrites every changed file as
//! `<status> <repo>/<file>#<commit>;<hu>` into `commits_<branch>.txt`.
//! `<hu>` is the last path segment of the branch name.

use chrono::{Datelike, Local, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Filled in when the dialog opens; callers are expected to replace it.
pub const AUTHOR_PLACEHOLDER: &str = "Seu nome aqui";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GitCommandConfig {
    pub since: String,
    pub until: String,
    pub author: String,
    /// Replaces the text after `;` when applied to a group. Empty means unset.
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("{0} must not be empty")]
    Missing(&'static str),
}

impl CommandError {
    pub fn field(&self) -> &'static str {
        match self {
            CommandError::Missing(field) => field,
        }
    }
}

impl GitCommandConfig {
    /// Current month, the given author, no message.
    pub fn for_current_month(author: impl Into<String>) -> Self {
        let (since, until) = default_date_range(Local::now().date_naive());
        Self {
            since,
            until,
            author: author.into(),
            message: String::new(),
        }
    }

    /// The values a freshly opened dialog shows.
    pub fn initial() -> Self {
        Self::for_current_month(AUTHOR_PLACEHOLDER)
    }

    pub fn validate(&self) -> Result<(), CommandError> {
        for (field, value) in [
            ("since", &self.since),
            ("until", &self.until),
            ("author", &self.author),
        ] {
            if value.trim().is_empty() {
                return Err(CommandError::Missing(field));
            }
        }
        Ok(())
    }

    /// Trimmed message, if one was given.
    pub fn message(&self) -> Option<&str> {
        Some(self.message.trim()).filter(|m| !m.is_empty())
    }
}

/// First and last day of `today`'s month, as `YYYY-MM-DD`.
pub fn default_date_range(today: NaiveDate) -> (String, String) {
    let first = today.with_day(1).unwrap_or(today);
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(today);
    (
        first.format("%Y-%m-%d").to_string(),
        last.format("%Y-%m-%d").to_string(),
    )
}

const PREAMBLE: &str = r#"REPO_NAME=$(basename $(git rev-parse --show-toplevel)) && \
BRANCH_NAME=$(git rev-parse --abbrev-ref HEAD) && \
BRANCH_SHORT=$(echo "$BRANCH_NAME" | sed 's|/|_|g' | cut -c1-50) && \
HU_DETAILS=$(echo "$BRANCH_NAME" | sed -E 's|.*/||') && \
OUTPUT_FILE="commits_${BRANCH_SHORT}.txt" && \
git log \
"#;

const AWK: &str = r##"  --abbrev-commit --abbrev=10 \
  --pretty=format:"%h %ad %s" --date=short --name-status | \
awk -v repo="$REPO_NAME" -v branch="$BRANCH_NAME" -v hu="$HU_DETAILS" '
{
  if (NF >= 3 && $2 !~ /^[A-Z]$/) {
    if (commit_number != "") { print "" }
    commit_number = $1
    commit_date = $2
    commit_message = substr($0, index($0, $3))
    print repo " : " commit_number " : " branch " : " commit_message " : " commit_date
  } else if ($0 != "") {
    status = $1
    file = $2
    print status " " repo "/" file "#" commit_number ";" hu
  }
}
' > "$OUTPUT_FILE""##;

/// Render the full shell command for `config`.
pub fn build_command(config: &GitCommandConfig) -> String {
    let mut out = String::from(PREAMBLE);
    for (flag, value) in [
        ("author", &config.author),
        ("since", &config.since),
        ("until", &config.until),
    ] {
        out.push_str(&format!("  --{}=\"{}\" \\\n", flag, quote(value)));
    }
    out.push_str(AWK);
    out
}

/// Escape for use inside a double-quoted shell word.
fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '"' | '\\' | '$' | '`') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GitCommandConfig {
        GitCommandConfig {
            since: "2024-02-01".into(),
            until: "2024-02-29".into(),
            author: "Ana Dev".into(),
            message: String::new(),
        }
    }

    #[test]
    fn date_range_covers_the_month() {
        let day = NaiveDate::from_ymd_opt(2024, 2, 14).unwrap();
        assert_eq!(
            default_date_range(day),
            ("2024-02-01".to_string(), "2024-02-29".to_string())
        );
        let december = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        assert_eq!(default_date_range(december).1, "2023-12-31");
    }

    #[test]
    fn validation_names_the_empty_field() {
        assert!(config().validate().is_ok());

        let mut cfg = config();
        cfg.author = "   ".into();
        let err = cfg.validate().unwrap_err();
        assert_eq!(err.field(), "author");
        assert_eq!(err.to_string(), "author must not be empty");

        let mut cfg = config();
        cfg.since.clear();
        assert_eq!(cfg.validate().unwrap_err().field(), "since");
    }

    #[test]
    fn message_is_optional() {
        let mut cfg = config();
        assert_eq!(cfg.message(), None);
        cfg.message = "  OF 42 ".into();
        assert_eq!(cfg.message(), Some("OF 42"));

        let parsed: GitCommandConfig =
            serde_json::from_str(r#"{"since":"a","until":"b","author":"c"}"#).unwrap();
        assert!(parsed.message.is_empty());
    }

    #[test]
    fn command_embeds_filters() {
        let cmd = build_command(&config());
        assert!(cmd.contains("  --author=\"Ana Dev\" \\\n"));
        assert!(cmd.contains("  --since=\"2024-02-01\" \\\n"));
        assert!(cmd.contains("  --until=\"2024-02-29\" \\\n"));
        assert!(cmd.contains("print status \" \" repo \"/\" file \"#\" commit_number \";\" hu"));
        assert!(cmd.ends_with("> \"$OUTPUT_FILE\""));
    }

    #[test]
    fn awk_tail_is_rendered_verbatim() {
        let cmd = build_command(&config());
        let (_, tail) = cmd.split_once("  --until=\"2024-02-29\" \\\n").unwrap();
        let expected = r##"  --abbrev-commit --abbrev=10 \
  --pretty=format:"%h %ad %s" --date=short --name-status | \
awk -v repo="$REPO_NAME" -v branch="$BRANCH_NAME" -v hu="$HU_DETAILS" '
{
  if (NF >= 3 && $2 !~ /^[A-Z]$/) {
    if (commit_number != "") { print "" }
    commit_number = $1
    commit_date = $2
    commit_message = substr($0, index($0, $3))
    print repo " : " commit_number " : " branch " : " commit_message " : " commit_date
  } else if ($0 != "") {
    status = $1
    file = $2
    print status " " repo "/" file "#" commit_number ";" hu
  }
}
' > "$OUTPUT_FILE""##;
        assert_eq!(tail, expected);
        assert!(cmd.starts_with("REPO_NAME=$(basename $(git rev-parse --show-toplevel)) && \\\n"));
        assert!(cmd.contains("OUTPUT_FILE=\"commits_${BRANCH_SHORT}.txt\" && \\\ngit log \\\n  --author="));
    }

    #[test]
    fn author_is_shell_escaped() {
        let mut cfg = config();
        cfg.author = "a\"$(rm)".into();
        assert!(build_command(&cfg).contains("--author=\"a\\\"\\$(rm)\""));
    }

    #[test]
    fn initial_config_uses_placeholder() {
        let cfg = GitCommandConfig::initial();
        assert_eq!(cfg.author, AUTHOR_PLACEHOLDER);
        assert!(cfg.validate().is_ok());
    }
}
