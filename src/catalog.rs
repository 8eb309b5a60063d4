//! Catalog discovery.
//!
//! A catalog is a directory of skill bundles. Every immediate
//! subdirectory is one skill; its SKILL.md supplies the display name and
//! description. Discovery is lenient so a single unreadable entry never
//! hides the rest of the catalog.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::frontmatter;

/// Marker file that identifies a skill bundle, both in the catalog and
/// at an install destination.
pub const SKILL_FILE: &str = "SKILL.md";

/// One skill bundle found in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skill {
    /// Directory name, the stable identifier used on the command line.
    pub dir_name: String,
    /// Display name from front-matter, or the directory name.
    pub name: String,
    pub description: String,
    /// Absolute path of the bundle directory in the catalog.
    pub source_path: PathBuf,
}

/// List the skills in `catalog_dir`, sorted by directory name. A missing
/// catalog yields an empty list. Dot-prefixed entries and plain files
/// are skipped.
pub fn discover_skills(catalog_dir: &Path) -> Vec<Skill> {
    if !catalog_dir.is_dir() {
        debug!("Catalog directory {} does not exist", catalog_dir.display());
        return Vec::new();
    }

    let entries = match std::fs::read_dir(catalog_dir) {
        Ok(entries) => entries,
        Err(err) => {
            debug!("Cannot read catalog {}: {}", catalog_dir.display(), err);
            return Vec::new();
        }
    };

    let mut skills = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let Some(dir_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if dir_name.starts_with('.') {
            continue;
        }

        let meta = frontmatter::parse_skill_file(&path.join(SKILL_FILE));
        skills.push(Skill {
            dir_name: dir_name.to_string(),
            name: meta.name,
            description: meta.description,
            source_path: path,
        });
    }

    skills.sort_by(|a, b| a.dir_name.cmp(&b.dir_name));
    skills
}

/// Split requested names into (matched skills, unknown names), both in
/// request order. Matching is on the directory name.
pub fn resolve_skills_by_names(skills: &[Skill], names: &[String]) -> (Vec<Skill>, Vec<String>) {
    let mut found = Vec::new();
    let mut missing = Vec::new();
    for name in names {
        match skills.iter().find(|s| &s.dir_name == name) {
            Some(skill) => found.push(skill.clone()),
            None => missing.push(name.clone()),
        }
    }
    (found, missing)
}
