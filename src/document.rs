//! Document and editor collaborator interfaces
//!
//! The timer core never touches an editor directly; it sees documents
//! through the narrow [`Document`] trait (line access, cursor, one
//! range-replacement edit primitive, save) and obtains the active one
//! through [`Editor`]. `NoteDocument` is the file/buffer implementation
//! used by the CLI and the test suites.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::lock;

/// A position inside a document; `column` is a byte offset within the line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

/// A half-open text range between two positions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Span covering whole lines `first..=last`, delimiters included
    pub fn lines(first: usize, last: usize, last_len: usize) -> Self {
        Self {
            start: Position {
                line: first,
                column: 0,
            },
            end: Position {
                line: last,
                column: last_len,
            },
        }
    }
}

/// Line-oriented view of an open document
pub trait Document {
    /// Stable identity of the owning document (survives edits)
    fn identity(&self) -> &str;

    /// Whether this is a supported (Markdown) document kind
    fn is_markdown(&self) -> bool;

    fn line_count(&self) -> usize;

    fn line_text(&self, line: usize) -> Option<&str>;

    /// Current cursor line
    fn cursor_line(&self) -> usize;

    /// Replace a text range with new text, as one visible edit
    fn replace(&mut self, span: Span, replacement: &str) -> Result<()>;

    /// Persist the document to its backing storage
    fn save(&mut self) -> Result<()>;
}

/// Supplies the currently active document, if any
pub trait Editor {
    fn active_document(&mut self) -> Option<&mut dyn Document>;
}

/// A note held as lines in memory, optionally backed by a file
#[derive(Debug, Clone)]
pub struct NoteDocument {
    identity: String,
    path: Option<PathBuf>,
    lines: Vec<String>,
    cursor: usize,
    trailing_newline: bool,
    dirty: bool,
}

impl NoteDocument {
    /// Read a note from disk
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let text = std::fs::read_to_string(&path)?;
        let identity = path.display().to_string();
        let mut doc = Self::from_text(identity, &text);
        doc.path = Some(path);
        Ok(doc)
    }

    /// Build an in-memory note; identity doubles as the "file name" used
    /// for kind detection and for the daily log key
    pub fn from_text(identity: impl Into<String>, text: &str) -> Self {
        let identity = identity.into();
        let trailing_newline = text.ends_with('\n');
        let body = text.strip_suffix('\n').unwrap_or(text);
        let lines = if body.is_empty() && text.len() <= 1 {
            vec![String::new()]
        } else {
            body.split('\n').map(String::from).collect()
        };
        Self {
            identity,
            path: None,
            lines,
            cursor: 0,
            trailing_newline,
            dirty: false,
        }
    }

    pub fn set_cursor(&mut self, line: usize) {
        self.cursor = line;
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Full document text
    pub fn text(&self) -> String {
        let mut text = self.lines.join("\n");
        if self.trailing_newline {
            text.push('\n');
        }
        text
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn check_position(&self, pos: Position) -> Result<()> {
        let line = self
            .lines
            .get(pos.line)
            .ok_or_else(|| Error::InvalidEdit(format!("line {} out of bounds", pos.line)))?;
        if pos.column > line.len() || !line.is_char_boundary(pos.column) {
            return Err(Error::InvalidEdit(format!(
                "column {} invalid on line {}",
                pos.column, pos.line
            )));
        }
        Ok(())
    }
}

impl Document for NoteDocument {
    fn identity(&self) -> &str {
        &self.identity
    }

    fn is_markdown(&self) -> bool {
        let name = self
            .path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| self.identity.clone());
        let lower = name.to_ascii_lowercase();
        lower.ends_with(".md") || lower.ends_with(".markdown")
    }

    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line_text(&self, line: usize) -> Option<&str> {
        self.lines.get(line).map(String::as_str)
    }

    fn cursor_line(&self) -> usize {
        self.cursor
    }

    fn replace(&mut self, span: Span, replacement: &str) -> Result<()> {
        if span.start.line > span.end.line
            || (span.start.line == span.end.line && span.start.column > span.end.column)
        {
            return Err(Error::InvalidEdit("start is after end".to_string()));
        }
        self.check_position(span.start)?;
        self.check_position(span.end)?;

        let prefix = &self.lines[span.start.line][..span.start.column];
        let suffix = &self.lines[span.end.line][span.end.column..];
        let merged = format!("{prefix}{replacement}{suffix}");

        let new_lines: Vec<String> = merged.split('\n').map(String::from).collect();
        self.lines.splice(span.start.line..=span.end.line, new_lines);
        self.dirty = true;
        Ok(())
    }

    fn save(&mut self) -> Result<()> {
        if let Some(path) = &self.path {
            lock::write_atomic_str(path, &self.text())?;
        }
        self.dirty = false;
        Ok(())
    }
}

/// An editor holding at most one open note
///
/// Stands in for the host editor surface: the CLI opens one file in it,
/// tests swap documents in and out to simulate focus changes.
#[derive(Debug, Default)]
pub struct FileEditor {
    document: Option<NoteDocument>,
}

impl FileEditor {
    pub fn new(document: NoteDocument) -> Self {
        Self {
            document: Some(document),
        }
    }

    /// An editor with nothing open
    pub fn empty() -> Self {
        Self::default()
    }

    /// Close the open note, returning it
    pub fn close(&mut self) -> Option<NoteDocument> {
        self.document.take()
    }

    pub fn document(&self) -> Option<&NoteDocument> {
        self.document.as_ref()
    }

    pub fn document_mut(&mut self) -> Option<&mut NoteDocument> {
        self.document.as_mut()
    }
}

impl Editor for FileEditor {
    fn active_document(&mut self) -> Option<&mut dyn Document> {
        self.document
            .as_mut()
            .map(|doc| doc as &mut dyn Document)
    }
}
