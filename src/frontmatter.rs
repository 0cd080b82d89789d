//! Front-matter location, parsing, and in-place mutation
//!
//! Notes open with a delimited metadata header in one of two dialects,
//! told apart solely by the delimiter pair on the first line:
//!
//! ```text
//! ---              +++
//! title: x         title = "x"
//! ---              +++
//! ```
//!
//! Mutations run as a parse-mutate-serialize pipeline on the dialect's own
//! tree (`serde_yaml::Mapping` / `toml::Table`), never as string patching,
//! so untouched fields and the detected dialect always survive the
//! round-trip. The whole block, delimiters included, is replaced as one
//! edit.

use serde_yaml::{Mapping, Value as YamlValue};
use toml::{Table, Value as TomlValue};

use crate::document::{Document, Span};
use crate::error::{Error, Result};

/// Delimiter line for the YAML dialect
pub const YAML_DELIMITER: &str = "---";

/// Delimiter line for the TOML dialect
pub const TOML_DELIMITER: &str = "+++";

/// Front-matter markup dialect, detected from the delimiter pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Yaml,
    Toml,
}

impl Dialect {
    pub fn delimiter(&self) -> &'static str {
        match self {
            Dialect::Yaml => YAML_DELIMITER,
            Dialect::Toml => TOML_DELIMITER,
        }
    }

    /// Detect the dialect from a document's first line
    ///
    /// The line must be exactly the delimiter; anything else means "no
    /// header", which also covers a mixed-delimiter document.
    pub fn detect(first_line: &str) -> Option<Self> {
        match first_line {
            YAML_DELIMITER => Some(Dialect::Yaml),
            TOML_DELIMITER => Some(Dialect::Toml),
            _ => None,
        }
    }
}

/// Extent of a located front-matter block
///
/// Delimiter lines sit at line 0 and `end_line`; the payload is the lines
/// between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub dialect: Dialect,
    pub end_line: usize,
}

/// Scan a document for a front-matter block
///
/// Returns `None` when the first line is not a recognized delimiter or no
/// matching closing delimiter line exists. Both are the normal "no header"
/// result, distinct from a malformed header (which only [`read`] reports).
pub fn locate(doc: &dyn Document) -> Option<Block> {
    let dialect = Dialect::detect(doc.line_text(0)?)?;
    for line in 1..doc.line_count() {
        if doc.line_text(line) == Some(dialect.delimiter()) {
            return Some(Block { dialect, end_line: line });
        }
    }
    None
}

/// The parsed header: a generic key-value tree in its dialect's own shape
#[derive(Debug, Clone, PartialEq)]
pub enum FrontMatter {
    Yaml(Mapping),
    Toml(Table),
}

impl FrontMatter {
    pub fn dialect(&self) -> Dialect {
        match self {
            FrontMatter::Yaml(_) => Dialect::Yaml,
            FrontMatter::Toml(_) => Dialect::Toml,
        }
    }

    /// Ensure `params.tasks.<id>` exists and add one to its `tomato`
    /// counter; returns the new count
    pub fn increment_task_tomato(&mut self, task_id: &str) -> Result<i64> {
        match self {
            FrontMatter::Yaml(map) => {
                let params = ensure_yaml_mapping(map, "params")?;
                let tasks = ensure_yaml_mapping(params, "tasks")?;
                let entry = ensure_yaml_mapping(tasks, task_id)?;
                let key = YamlValue::from("tomato");
                let current = match entry.get(&key) {
                    None => 0,
                    Some(YamlValue::Number(n)) => n.as_i64().ok_or_else(|| {
                        Error::MalformedFrontMatter("`tomato` is not an integer".to_string())
                    })?,
                    Some(_) => {
                        return Err(Error::MalformedFrontMatter(
                            "`tomato` is not an integer".to_string(),
                        ))
                    }
                };
                let next = current + 1;
                entry.insert(key, YamlValue::from(next));
                Ok(next)
            }
            FrontMatter::Toml(table) => {
                let params = ensure_toml_table(table, "params")?;
                let tasks = ensure_toml_table(params, "tasks")?;
                let entry = ensure_toml_table(tasks, task_id)?;
                let current = match entry.get("tomato") {
                    None => 0,
                    Some(TomlValue::Integer(n)) => *n,
                    Some(_) => {
                        return Err(Error::MalformedFrontMatter(
                            "`tomato` is not an integer".to_string(),
                        ))
                    }
                };
                let next = current + 1;
                entry.insert("tomato".to_string(), TomlValue::Integer(next));
                Ok(next)
            }
        }
    }

    /// Read `params.tasks.<id>.tomato`, if present
    pub fn tomato_count(&self, task_id: &str) -> Option<i64> {
        match self {
            FrontMatter::Yaml(map) => {
                let params = yaml_mapping(map, "params")?;
                let tasks = yaml_mapping(params, "tasks")?;
                let entry = yaml_mapping(tasks, task_id)?;
                match entry.get(&YamlValue::from("tomato"))? {
                    YamlValue::Number(n) => n.as_i64(),
                    _ => None,
                }
            }
            FrontMatter::Toml(table) => {
                let entry = table
                    .get("params")?
                    .as_table()?
                    .get("tasks")?
                    .as_table()?
                    .get(task_id)?
                    .as_table()?;
                entry.get("tomato")?.as_integer()
            }
        }
    }

    /// Serialize back to a full block, delimiter lines included, with no
    /// trailing newline (the replaced extent ends before one)
    fn to_block_text(&self) -> Result<String> {
        match self {
            FrontMatter::Yaml(map) => {
                let body = serde_yaml::to_string(map)?;
                Ok(format!("{YAML_DELIMITER}\n{body}{YAML_DELIMITER}"))
            }
            FrontMatter::Toml(table) => {
                let body = toml::to_string(table)?;
                Ok(format!("{TOML_DELIMITER}\n{body}{TOML_DELIMITER}"))
            }
        }
    }
}

fn yaml_mapping<'a>(map: &'a Mapping, key: &str) -> Option<&'a Mapping> {
    match map.get(&YamlValue::from(key))? {
        YamlValue::Mapping(m) => Some(m),
        _ => None,
    }
}

fn ensure_yaml_mapping<'a>(map: &'a mut Mapping, key: &str) -> Result<&'a mut Mapping> {
    let k = YamlValue::from(key);
    if !map.contains_key(&k) {
        map.insert(k.clone(), YamlValue::Mapping(Mapping::new()));
    }
    match map.get_mut(&k) {
        Some(YamlValue::Mapping(m)) => Ok(m),
        _ => Err(Error::MalformedFrontMatter(format!(
            "`{key}` is not a mapping"
        ))),
    }
}

fn ensure_toml_table<'a>(table: &'a mut Table, key: &str) -> Result<&'a mut Table> {
    let value = table
        .entry(key.to_string())
        .or_insert_with(|| TomlValue::Table(Table::new()));
    match value {
        TomlValue::Table(t) => Ok(t),
        _ => Err(Error::MalformedFrontMatter(format!(
            "`{key}` is not a table"
        ))),
    }
}

/// Parse the located header into its field tree
///
/// `Error::MissingFrontMatter` when there is no block at all;
/// `Error::MalformedFrontMatter` when the payload does not parse — the
/// caller must not attempt a write in that case.
pub fn read(doc: &dyn Document) -> Result<FrontMatter> {
    let block = locate(doc).ok_or(Error::MissingFrontMatter)?;
    read_block(doc, block)
}

fn read_block(doc: &dyn Document, block: Block) -> Result<FrontMatter> {
    let inner: Vec<&str> = (1..block.end_line)
        .filter_map(|line| doc.line_text(line))
        .collect();
    let inner = inner.join("\n");

    match block.dialect {
        Dialect::Yaml => {
            let value: YamlValue = serde_yaml::from_str(&inner)
                .map_err(|e| Error::MalformedFrontMatter(e.to_string()))?;
            match value {
                // An empty payload parses as null; treat it as an empty tree
                YamlValue::Null => Ok(FrontMatter::Yaml(Mapping::new())),
                YamlValue::Mapping(map) => Ok(FrontMatter::Yaml(map)),
                _ => Err(Error::MalformedFrontMatter(
                    "front matter root must be a mapping".to_string(),
                )),
            }
        }
        Dialect::Toml => {
            let table: Table = toml::from_str(&inner)
                .map_err(|e| Error::MalformedFrontMatter(e.to_string()))?;
            Ok(FrontMatter::Toml(table))
        }
    }
}

/// Read-modify-write the header as one whole-block edit
///
/// The mutator sees the parsed tree; serialization goes back through the
/// same dialect, and the original extent — both delimiter lines included —
/// is replaced in a single edit. With `force_save` the document is
/// persisted synchronously afterwards.
pub fn update<F>(doc: &mut dyn Document, mutate: F, force_save: bool) -> Result<()>
where
    F: FnOnce(&mut FrontMatter) -> Result<()>,
{
    let block = locate(doc).ok_or(Error::MissingFrontMatter)?;
    let mut fields = read_block(doc, block)?;
    mutate(&mut fields)?;

    let replacement = fields.to_block_text()?;
    let last_len = doc
        .line_text(block.end_line)
        .map(str::len)
        .unwrap_or_default();
    doc.replace(Span::lines(0, block.end_line, last_len), &replacement)?;

    if force_save {
        doc.save()?;
    }
    Ok(())
}
