//! Classify parsed lines against the rule table.
//!
//! Precedence is an ordered list of matchers; the first one that yields a rule wins.

use crate::parse;
use crate::rules::{self, Rule, RuleKey};
use crate::types::{ParsedRecord, ScoredLine};

/// One step of the lookup order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
  /// Test/spec files resolve through their compound extension only.
  TestExtension,
  ByName,
  ByExtension,
}

pub const MATCHERS: [Matcher; 3] = [Matcher::TestExtension, Matcher::ByName, Matcher::ByExtension];

impl Matcher {
  /// The table key this matcher consults for a record, if it applies at all.
  pub fn key<'r>(&self, record: &'r ParsedRecord) -> Option<RuleKey<'r>> {
    let is_test = parse::is_test_file(&record.file_name);
    match self {
      Self::TestExtension if is_test => Some(RuleKey::ByExtension(&record.extension)),
      Self::ByName if !is_test => Some(RuleKey::ByName(&record.file_name)),
      Self::ByExtension if !is_test => Some(RuleKey::ByExtension(&record.extension)),
      _ => None,
    }
  }

  pub fn matches(&self, record: &ParsedRecord) -> Option<&'static Rule> {
    rules::lookup(self.key(record)?, record.action)
  }
}

/// Find the rule for a record, walking the matchers in priority order.
pub fn resolve(record: &ParsedRecord) -> Option<(Matcher, &'static Rule)> {
  MATCHERS
    .iter()
    .find_map(|m| m.matches(record).map(|rule| (*m, rule)))
}

/// Score one raw line. Unparseable or unmatched lines yield `None`.
pub fn score_line(line: &str) -> Option<ScoredLine> {
  let record = parse::parse_line(line)?;
  let (_, rule) = resolve(&record)?;
  let stripped = parse::strip_action(&record.raw_line);

  Some(ScoredLine {
    points: rule.points,
    guide_code: rule.guide_code.to_string(),
    description: rule.description.to_string(),
    line: stripped,
    record,
  })
}
