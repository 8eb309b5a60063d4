//! SKILL.md front-matter parsing.
//!
//! Each catalog bundle carries a small `---`-delimited key/value block at
//! the top of its SKILL.md. The parser is deliberately forgiving: any
//! failure (missing file, unreadable bytes, missing opening delimiter)
//! falls back to the directory name and an empty description instead of
//! aborting discovery.

use std::collections::HashMap;
use std::path::Path;

use tracing::debug;

/// Name and description for one skill, either parsed from front-matter
/// or the fallback values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillMeta {
    pub name: String,
    pub description: String,
}

/// Parse `name` and `description` from a SKILL.md file. Falls back to
/// (parent directory name, "") on any failure.
pub fn parse_skill_file(path: &Path) -> SkillMeta {
    let dir_name = path
        .parent()
        .and_then(|p| p.file_name())
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();

    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            debug!("No readable SKILL.md at {}: {}", path.display(), err);
            return SkillMeta {
                name: dir_name,
                description: String::new(),
            };
        }
    };

    let Some(fields) = parse_fields(&text) else {
        debug!("Missing front-matter delimiter in {}", path.display());
        return SkillMeta {
            name: dir_name,
            description: String::new(),
        };
    };

    SkillMeta {
        name: fields.get("name").cloned().unwrap_or(dir_name),
        description: fields.get("description").cloned().unwrap_or_default(),
    }
}

/// Walk the delimited block line by line and collect key/value pairs.
/// Returns `None` when the content does not open with a `---` line. A
/// missing closing `---` terminates the block at end of input; fields
/// collected up to that point still apply.
fn parse_fields(text: &str) -> Option<HashMap<String, String>> {
    let lines: Vec<&str> = text.lines().collect();
    if lines.first().map(|l| l.trim()) != Some("---") {
        return None;
    }

    let mut fields = HashMap::new();
    let mut i = 1;
    while i < lines.len() {
        let line = lines[i];
        if line.trim() == "---" {
            break;
        }

        let Some((key, raw)) = line.split_once(':') else {
            i += 1;
            continue;
        };
        let key = key.trim().to_string();
        let raw = raw.trim();

        if raw.len() > 1 && raw.starts_with('"') && raw.ends_with('"') {
            fields.insert(key, raw[1..raw.len() - 1].to_string());
        } else if matches!(raw, ">" | ">-" | "|" | "|-") {
            let (value, next) = read_block_scalar(raw, &lines, i + 1);
            fields.insert(key, value);
            i = next;
            continue;
        } else {
            fields.insert(key, raw.to_string());
        }

        i += 1;
    }

    Some(fields)
}

/// Collect the indented lines of a block scalar starting at `start`.
/// The block ends at a `---` line or the first non-indented line.
/// Returns the joined value and the index of the first line after the
/// block.
fn read_block_scalar(indicator: &str, lines: &[&str], start: usize) -> (String, usize) {
    let mut block: Vec<&str> = Vec::new();
    let mut i = start;
    while i < lines.len() {
        let line = lines[i];
        if line.trim() == "---" {
            break;
        }
        if !line.is_empty() && !line.starts_with(|c: char| c.is_whitespace()) {
            break;
        }
        block.push(line.trim());
        i += 1;
    }

    // `|` nominally preserves newlines, but every consumer renders a
    // description as a single paragraph, so both styles fold to a
    // space-joined line.
    // TODO: decide whether `|` should keep line breaks once anything
    // displays multi-line descriptions.
    let mut value = block
        .iter()
        .filter(|l| !l.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ");

    if indicator.ends_with('-') {
        let trimmed = value.trim_end().len();
        value.truncate(trimmed);
    }

    (value, i)
}
