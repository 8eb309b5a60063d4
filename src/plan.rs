//! Install planning.
//!
//! Planning is pure: given the catalog skills, the active (tool, scope)
//! pairs and a requested action per skill, it resolves destinations,
//! probes what is already installed and emits only the entries that
//! change something. Filesystem writes happen later in the executor.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::catalog::{Skill, SKILL_FILE};
use crate::target::{Scope, Tool};

/// Base directories destinations are resolved against. Resolved once at
/// startup so planning itself never touches the environment.
#[derive(Debug, Clone)]
pub struct Roots {
    pub home: PathBuf,
    pub project: PathBuf,
}

impl Roots {
    pub fn from_env() -> Result<Self> {
        let Some(home) = dirs::home_dir() else {
            bail!("Cannot determine home directory");
        };
        let project = std::env::current_dir().context("Cannot determine working directory")?;
        Ok(Roots { home, project })
    }
}

/// What to do with one skill at one destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Install,
    Update,
    Uninstall,
    Keep,
    Skip,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Install => "install",
            Action::Update => "update",
            Action::Uninstall => "uninstall",
            Action::Keep => "keep",
            Action::Skip => "skip",
        }
    }
}

/// One unit of work: a skill, a destination and the action to take
/// there. Entries are independent; applying one never depends on
/// another.
#[derive(Debug, Clone)]
pub struct PlanEntry {
    pub skill: Skill,
    pub tool: Tool,
    pub scope: Scope,
    pub action: Action,
    pub dest: PathBuf,
    pub installed: bool,
}

/// Expand a tool's path template for `scope` against the matching root.
pub fn resolve_destination(skill: &Skill, tool: Tool, scope: Scope, roots: &Roots) -> PathBuf {
    let spec = tool.spec();
    let (template, base) = match scope {
        Scope::User => (spec.user_template.unwrap_or_default(), roots.home.as_path()),
        Scope::Project => (spec.project_template, roots.project.as_path()),
    };
    base.join(template.replace("{skill}", &skill.dir_name))
}

/// A destination counts as installed when the marker file sits directly
/// under it. A bare directory left behind by hand does not.
pub fn check_installed(dest: &Path) -> bool {
    dest.join(SKILL_FILE).is_file()
}

/// Cross targets with scopes, dropping the user side for tools that
/// only support project installs or publish no user template.
pub fn get_active_pairs(targets: &[Tool], scopes: &[Scope]) -> Vec<(Tool, Scope)> {
    let mut pairs = Vec::new();
    for &tool in targets {
        let spec = tool.spec();
        for &scope in scopes {
            if scope == Scope::User && spec.project_only {
                continue;
            }
            if scope == Scope::User && spec.user_template.is_none() {
                continue;
            }
            pairs.push((tool, scope));
        }
    }
    pairs
}

/// Build the work list for `skills` across `pairs`. Skills absent from
/// `actions` are skipped. Keep and skip produce no entries, and an
/// uninstall of something not installed is dropped, so an empty result
/// means there is nothing to do rather than an error.
pub fn build_plans(
    skills: &[Skill],
    pairs: &[(Tool, Scope)],
    actions: &HashMap<String, Action>,
    roots: &Roots,
) -> Vec<PlanEntry> {
    let mut plans = Vec::new();
    for skill in skills {
        let action = actions
            .get(&skill.dir_name)
            .copied()
            .unwrap_or(Action::Skip);
        for &(tool, scope) in pairs {
            let dest = resolve_destination(skill, tool, scope, roots);
            let installed = check_installed(&dest);
            match action {
                Action::Keep | Action::Skip => continue,
                Action::Uninstall if !installed => continue,
                _ => {}
            }
            plans.push(PlanEntry {
                skill: skill.clone(),
                tool,
                scope,
                action,
                dest,
                installed,
            });
        }
    }
    plans
}
