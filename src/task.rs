//! A to-do item bound to a line in a note
//!
//! Tasks are rebuilt from the cursor line each time the timer starts; the
//! embedded stable id is the join key between the note's front matter and
//! the daily counter log.

use crate::document::{Document, Position, Span};
use crate::error::{Error, Result};
use crate::task_line;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    document: String,
    line: usize,
    name: String,
    checked: bool,
    id: Option<String>,
}

impl Task {
    /// Build a task from a line of text, or `None` if it is not a task line
    pub fn from_line(document: impl Into<String>, line: usize, text: &str) -> Option<Self> {
        let parsed = task_line::classify(text)?;
        Some(Self {
            document: document.into(),
            line,
            name: parsed.name,
            checked: parsed.checked,
            id: task_line::extract_id(text),
        })
    }

    /// Identity of the owning document
    pub fn document(&self) -> &str {
        &self.document
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn checked(&self) -> bool {
        self.checked
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// `file:line` location for jump-to-task output (1-based line)
    pub fn location(&self) -> String {
        format!("{}:{}", self.document, self.line + 1)
    }

    /// Resolve the task's stable id, minting and persisting one if absent
    ///
    /// A minted id is written back into the document immediately, so a
    /// second start on the same line finds and reuses it. Assigned once;
    /// never changes afterwards.
    pub fn ensure_id(&mut self, doc: &mut dyn Document) -> Result<&str> {
        if self.id.is_none() {
            self.id = Some(task_line::mint_id());
            self.persist(doc)?;
        }
        Ok(self.id.as_deref().expect("id was just assigned"))
    }

    /// Rewrite the task's line in the document from the `-` marker to end
    /// of line, keeping any leading indentation
    fn persist(&self, doc: &mut dyn Document) -> Result<()> {
        let id = self.id.as_deref().expect("persist requires an id");
        let text = doc
            .line_text(self.line)
            .ok_or_else(|| Error::InvalidEdit(format!("line {} out of bounds", self.line)))?;
        let marker = text
            .find('-')
            .ok_or_else(|| Error::InvalidEdit(format!("no `-` marker on line {}", self.line)))?;
        let span = Span::new(
            Position {
                line: self.line,
                column: marker,
            },
            Position {
                line: self.line,
                column: text.len(),
            },
        );
        doc.replace(span, &task_line::render(self.checked, &self.name, id))
    }
}
