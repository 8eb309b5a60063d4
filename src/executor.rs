//! Plan execution.
//!
//! Each plan entry is applied on its own. Install replaces whatever is
//! at the destination with a fresh copy of the bundle, uninstall removes
//! the destination tree, and both are safe to repeat. Failures are typed
//! per entry so callers can keep going and count them.

use std::io;
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::plan::{Action, PlanEntry};

/// Failure applying one plan entry. The skill's directory name is
/// carried so a batch run can report which entry broke.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("{skill}: {source}")]
    Install { skill: String, source: io::Error },
    #[error("{skill}: {source}")]
    Uninstall { skill: String, source: io::Error },
}

/// Bytecode caches inside a bundle are not part of the skill.
fn is_cache_artifact(name: &str) -> bool {
    name == "__pycache__" || name.ends_with(".pyc")
}

fn copy_tree(src: &Path, dest: &Path) -> io::Result<()> {
    std::fs::create_dir_all(dest)?;
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let name = entry.file_name();
        if is_cache_artifact(&name.to_string_lossy()) {
            continue;
        }
        let src_path = entry.path();
        let dest_path = dest.join(&name);
        if src_path.is_dir() {
            copy_tree(&src_path, &dest_path)?;
        } else {
            std::fs::copy(&src_path, &dest_path)?;
        }
    }
    Ok(())
}

fn install_io(plan: &PlanEntry) -> io::Result<()> {
    if let Some(parent) = plan.dest.parent() {
        std::fs::create_dir_all(parent)?;
    }
    // Replace rather than merge, so files dropped from the bundle do
    // not linger at the destination.
    if plan.dest.exists() {
        std::fs::remove_dir_all(&plan.dest)?;
    }
    copy_tree(&plan.skill.source_path, &plan.dest)
}

/// Copy the bundle to the entry's destination, replacing any previous
/// install.
pub fn install_skill(plan: &PlanEntry) -> Result<(), ExecError> {
    install_io(plan).map_err(|source| ExecError::Install {
        skill: plan.skill.dir_name.clone(),
        source,
    })
}

/// Remove the destination tree. A destination that is already gone is a
/// successful no-op.
pub fn uninstall_skill(plan: &PlanEntry) -> Result<(), ExecError> {
    if plan.dest.exists() {
        std::fs::remove_dir_all(&plan.dest).map_err(|source| ExecError::Uninstall {
            skill: plan.skill.dir_name.clone(),
            source,
        })?;
    }
    Ok(())
}

/// Apply one entry according to its action.
pub fn apply_plan(plan: &PlanEntry) -> Result<(), ExecError> {
    debug!(
        "Applying {} for {} at {}",
        plan.action.as_str(),
        plan.skill.dir_name,
        plan.dest.display()
    );
    match plan.action {
        Action::Install | Action::Update => install_skill(plan),
        Action::Uninstall => uninstall_skill(plan),
        // The plan builder never emits these.
        Action::Keep | Action::Skip => Ok(()),
    }
}
