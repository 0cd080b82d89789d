//! Task-line classification and stable-id handling
//!
//! A task line is a Markdown checkbox list item:
//!
//! ```text
//! - [ ] write-report
//! - [x] ship-release <!-- id:k3f9a2b7 -->
//! ```
//!
//! The trailing HTML comment carries the task's stable identifier. Generic
//! Markdown renderers ignore it, and it survives edits elsewhere on the
//! line, which is what lets counters re-attach to the same logical task
//! across sessions.

use rand::Rng;

/// Length of a freshly minted task identifier
pub const TASK_ID_LEN: usize = 8;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Classification result for a task line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskLine {
    /// Whether the checkbox holds `x` or `X`
    pub checked: bool,
    /// First whitespace-delimited token after the checkbox
    pub name: String,
}

/// Classify a line of text as a task line
///
/// Matches `-`, one whitespace, `[ ]`/`[x]`/`[X]`, one whitespace, then a
/// display name. Leading indentation is allowed. Anything else is "not a
/// task" (`None`); this never fails.
pub fn classify(line: &str) -> Option<TaskLine> {
    let rest = line.trim_start();
    let rest = rest.strip_prefix('-')?;
    let rest = strip_one_whitespace(rest)?;
    let rest = rest.strip_prefix('[')?;

    let mut chars = rest.chars();
    let checked = match chars.next()? {
        ' ' => false,
        'x' | 'X' => true,
        _ => return None,
    };
    let rest = chars.as_str().strip_prefix(']')?;
    let rest = strip_one_whitespace(rest)?;

    let name: String = rest
        .trim_start()
        .chars()
        .take_while(|c| !c.is_whitespace())
        .collect();
    if name.is_empty() {
        return None;
    }

    Some(TaskLine { checked, name })
}

fn strip_one_whitespace(s: &str) -> Option<&str> {
    let mut chars = s.chars();
    chars.next().filter(|c| c.is_whitespace())?;
    Some(chars.as_str())
}

/// Extract an embedded stable identifier from a line
///
/// Looks for `<!-- id:XXXX -->` anywhere on the line; the identifier must
/// be alphanumeric. Spaces inside the comment are tolerated.
pub fn extract_id(line: &str) -> Option<String> {
    let mut search = line;
    while let Some(start) = search.find("<!--") {
        let rest = &search[start + 4..];
        let Some(end) = rest.find("-->") else {
            return None;
        };
        let body = rest[..end].trim();
        if let Some(id) = body.strip_prefix("id:") {
            let id = id.trim();
            if !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric()) {
                return Some(id.to_string());
            }
        }
        search = &rest[end + 3..];
    }
    None
}

/// Mint a fresh random identifier
///
/// Short base-36 token; collisions are not checked, which is acceptable at
/// per-document scope.
pub fn mint_id() -> String {
    let mut rng = rand::thread_rng();
    (0..TASK_ID_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect()
}

/// Render a task line with its identifier annotation
pub fn render(checked: bool, name: &str, id: &str) -> String {
    format!(
        "- [{}] {} <!-- id:{} -->",
        if checked { 'x' } else { ' ' },
        name,
        id
    )
}
