//! Clipboard text and paginated document export of the selected lines.

use serde::Serialize;

use crate::aggregate;
use crate::config::Config;
use crate::error::EngineError;
use crate::overrides::OverrideLayer;
use crate::types::Category;

/// Newline-joined lines, as written to the clipboard.
pub fn copy_text<S: AsRef<str>>(lines: &[S]) -> String {
  lines
    .iter()
    .map(AsRef::as_ref)
    .collect::<Vec<_>>()
    .join("\n")
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocLine {
  pub text: String,
  pub bold: bool,
  pub y: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Page {
  pub lines: Vec<DocLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
  pub file_name: String,
  pub pages: Vec<Page>,
}

impl Document {
  /// Plain-text rendering; pages are separated by form feeds and bold
  /// lines are underlined with `-`.
  pub fn render(&self) -> String {
    self
      .pages
      .iter()
      .map(|p| {
        let mut out: Vec<String> = Vec::with_capacity(p.lines.len());
        for line in &p.lines {
          out.push(line.text.clone());
          if line.bold {
            out.push("-".repeat(line.text.chars().count()));
          }
        }
        out.join("\n")
      })
      .collect::<Vec<_>>()
      .join("\n\x0c\n")
  }
}

/// Greedy word wrap to `width` columns; words longer than a line are split.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
  let width = width.max(1);
  let mut out = Vec::new();
  let mut current = String::new();

  for word in text.split_whitespace() {
    let mut word: Vec<char> = word.chars().collect();
    loop {
      let used = current.chars().count();
      let sep = usize::from(used > 0);
      if used + sep + word.len() <= width {
        if sep == 1 {
          current.push(' ');
        }
        current.extend(word.iter());
        break;
      }
      if used > 0 {
        out.push(std::mem::take(&mut current));
        continue;
      }
      // Word alone is too wide: hard-split it.
      let rest = word.split_off(width);
      out.push(word.iter().collect());
      word = rest;
    }
  }
  if !current.is_empty() || out.is_empty() {
    out.push(current);
  }
  out
}

/// Tracks the vertical cursor and starts new pages past the threshold.
struct Layout<'a> {
  config: &'a Config,
  pages: Vec<Page>,
  y: u32,
}

impl<'a> Layout<'a> {
  fn new(config: &'a Config) -> Self {
    Self {
      config,
      pages: vec![Page::default()],
      y: config.page_top,
    }
  }

  fn print(&mut self, text: String, bold: bool) {
    if self.y > self.config.page_break_threshold {
      self.pages.push(Page::default());
      self.y = self.config.page_top;
    }
    if let Some(page) = self.pages.last_mut() {
      page.lines.push(DocLine { text, bold, y: self.y });
    }
    self.y += self.config.line_height;
  }
}

/// Lay out every category that has at least one included line.
pub fn build_document(
  categories: &[Category],
  overrides: &OverrideLayer,
  config: &Config,
) -> Result<Document, EngineError> {
  if !aggregate::has_selection(categories, overrides) {
    return Err(EngineError::NothingSelected);
  }

  let mut layout = Layout::new(config);
  for category in categories {
    let selected = aggregate::selected_lines(category, overrides);
    if selected.is_empty() {
      continue;
    }

    let title = format!("{} - {}", category.guide_code, category.description);
    for part in wrap(&title, config.wrap_width) {
      layout.print(part, true);
    }
    for (n, line) in selected.iter().enumerate() {
      for part in wrap(&format!("{}. {}", n + 1, line), config.wrap_width) {
        layout.print(part, false);
      }
    }
    layout.y += config.group_gap;
  }

  Ok(Document {
    file_name: config.export_file_name.clone(),
    pages: layout.pages,
  })
}
