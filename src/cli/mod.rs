//! Command implementations and shared option handling.

pub mod info;
pub mod install;
pub mod interactive;
pub mod list;
pub mod status;
pub mod uninstall;

use std::io::{self, Write};
use std::path::Path;

use anyhow::{bail, Result};

use crate::catalog::{self, Skill};
use crate::config::DefaultsConfig;
use crate::target::{Scope, Tool};

/// Turn --target values into tools. No values or the single value
/// `auto` autodetects; `all` selects every tool; anything else is a
/// slug list, deduplicated with the first occurrence winning.
pub fn resolve_targets(raw: &[String], home: &Path) -> Result<Vec<Tool>> {
    let raw: Vec<String> = raw.iter().map(|v| v.to_lowercase()).collect();

    if raw.is_empty() || matches!(raw.as_slice(), [only] if only == "auto") {
        let detected = Tool::detect_installed(home);
        if detected.is_empty() {
            bail!("No supported CLIs detected. Use --target to specify.");
        }
        return Ok(detected);
    }

    if raw.iter().any(|v| v == "all") {
        return Ok(Tool::ALL.to_vec());
    }

    let mut tools: Vec<Tool> = Vec::new();
    for slug in &raw {
        let tool: Tool = slug.parse()?;
        if !tools.contains(&tool) {
            tools.push(tool);
        }
    }
    Ok(tools)
}

/// Turn a --scope value into the scope list; `both` expands to user
/// then project.
pub fn resolve_scopes(raw: &str) -> Result<Vec<Scope>> {
    let raw = raw.to_lowercase();
    if raw == "both" {
        return Ok(Scope::ALL.to_vec());
    }
    Ok(vec![raw.parse()?])
}

/// Command-line targets win over configured defaults.
pub fn effective_targets(cli: &[String], defaults: &DefaultsConfig) -> Vec<String> {
    if cli.is_empty() {
        defaults.targets.clone()
    } else {
        cli.to_vec()
    }
}

pub fn effective_scope(cli: Option<&str>, default: &str) -> String {
    match cli {
        Some(scope) => scope.to_string(),
        None => default.to_string(),
    }
}

/// Resolve the skills a command operates on: the whole catalog with
/// --all, otherwise the named ones. Any unknown name is an error.
pub fn select_skills(catalog_dir: &Path, names: &[String], all: bool) -> Result<Vec<Skill>> {
    let skills = catalog::discover_skills(catalog_dir);
    if all {
        return Ok(skills);
    }
    let (found, missing) = catalog::resolve_skills_by_names(&skills, names);
    if !missing.is_empty() {
        bail!("Unknown skill(s): {}", missing.join(", "));
    }
    Ok(found)
}

/// Ask a yes/no question, reading one line from stdin. Anything other
/// than y/yes is a no.
pub fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N]: ", prompt);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    let answer = line.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

/// Print rows as columns padded to the widest cell, two spaces apart.
pub fn print_table(header: &[String], rows: &[Vec<String>]) {
    let mut widths: Vec<usize> = header.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.len());
        }
    }

    let mut lines: Vec<&[String]> = Vec::with_capacity(rows.len() + 1);
    lines.push(header);
    lines.extend(rows.iter().map(|r| r.as_slice()));

    for cells in lines {
        let mut line = String::new();
        for (i, cell) in cells.iter().enumerate() {
            line.push_str(cell);
            if i + 1 < cells.len() {
                line.push_str(&" ".repeat(widths[i] - cell.len() + 2));
            }
        }
        println!("{}", line);
    }
}

/// Column headers for [`print_table`].
pub fn header(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_targets_auto_detects() {
        let home = TempDir::new().unwrap();
        fs::create_dir_all(home.path().join(".codex")).unwrap();
        fs::create_dir_all(home.path().join(".claude")).unwrap();

        let tools = resolve_targets(&["auto".to_string()], home.path()).unwrap();
        assert_eq!(tools, vec![Tool::ClaudeCode, Tool::Codex]);
    }

    #[test]
    fn test_resolve_targets_empty_means_auto() {
        let home = TempDir::new().unwrap();
        fs::create_dir_all(home.path().join(".codex")).unwrap();
        assert_eq!(resolve_targets(&[], home.path()).unwrap(), vec![Tool::Codex]);
    }

    #[test]
    fn test_resolve_targets_none_detected_errors() {
        let home = TempDir::new().unwrap();
        let err = resolve_targets(&[], home.path()).unwrap_err();
        assert!(err.to_string().contains("No supported CLIs detected"));
    }

    #[test]
    fn test_resolve_targets_all() {
        let home = TempDir::new().unwrap();
        let tools =
            resolve_targets(&["codex".to_string(), "all".to_string()], home.path()).unwrap();
        assert_eq!(tools.len(), Tool::ALL.len());
    }

    #[test]
    fn test_resolve_targets_dedup_keeps_first() {
        let home = TempDir::new().unwrap();
        let raw = vec![
            "codex".to_string(),
            "claude-code".to_string(),
            "CODEX".to_string(),
        ];
        let tools = resolve_targets(&raw, home.path()).unwrap();
        assert_eq!(tools, vec![Tool::Codex, Tool::ClaudeCode]);
    }

    #[test]
    fn test_resolve_targets_unknown_slug() {
        let home = TempDir::new().unwrap();
        let err = resolve_targets(&["cursor".to_string()], home.path()).unwrap_err();
        assert_eq!(err.to_string(), "Unknown target: cursor");
    }

    #[test]
    fn test_resolve_scopes_both() {
        assert_eq!(
            resolve_scopes("both").unwrap(),
            vec![Scope::User, Scope::Project]
        );
        assert_eq!(resolve_scopes("Project").unwrap(), vec![Scope::Project]);
        assert!(resolve_scopes("global").is_err());
    }

    #[test]
    fn test_effective_targets_prefers_cli() {
        let defaults = DefaultsConfig::default();
        assert_eq!(effective_targets(&[], &defaults), vec!["auto".to_string()]);
        let cli = vec!["codex".to_string()];
        assert_eq!(effective_targets(&cli, &defaults), cli);
    }

    #[test]
    fn test_effective_scope_prefers_cli() {
        assert_eq!(effective_scope(Some("project"), "user"), "project");
        assert_eq!(effective_scope(None, "user"), "user");
    }

    #[test]
    fn test_select_skills_all() {
        let catalog = TempDir::new().unwrap();
        for dir in ["alpha", "bravo"] {
            fs::create_dir_all(catalog.path().join(dir)).unwrap();
        }
        let skills = select_skills(catalog.path(), &[], true).unwrap();
        assert_eq!(skills.len(), 2);
    }

    #[test]
    fn test_select_skills_unknown_name() {
        let catalog = TempDir::new().unwrap();
        fs::create_dir_all(catalog.path().join("alpha")).unwrap();
        let names = vec!["alpha".to_string(), "ghost".to_string(), "wraith".to_string()];
        let err = select_skills(catalog.path(), &names, false).unwrap_err();
        assert_eq!(err.to_string(), "Unknown skill(s): ghost, wraith");
    }
}
