use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Result};

use crate::cli;
use crate::config::DefaultsConfig;
use crate::executor;
use crate::plan::{self, Action, Roots};

/// Install or update skills from the catalog.
#[allow(clippy::too_many_arguments)]
pub fn run(
    catalog_dir: &Path,
    roots: &Roots,
    defaults: &DefaultsConfig,
    names: &[String],
    all: bool,
    targets: &[String],
    scope: Option<&str>,
    quiet: bool,
) -> Result<()> {
    if all && !names.is_empty() {
        bail!("Cannot combine --all with specific skill names.");
    }
    if !all && names.is_empty() {
        bail!("Specify skill name(s) or use --all.");
    }

    let target_values = cli::effective_targets(targets, defaults);
    let tools = cli::resolve_targets(&target_values, &roots.home)?;
    let scope_value = cli::effective_scope(scope, &defaults.scope);
    let scopes = cli::resolve_scopes(&scope_value)?;

    let skills = cli::select_skills(catalog_dir, names, all)?;
    let actions: HashMap<String, Action> = skills
        .iter()
        .map(|s| (s.dir_name.clone(), Action::Install))
        .collect();
    let pairs = plan::get_active_pairs(&tools, &scopes);
    let plans = plan::build_plans(&skills, &pairs, &actions, roots);

    let mut succeeded = 0;
    let mut failed = 0;
    for entry in &plans {
        match executor::install_skill(entry) {
            Ok(()) => {
                succeeded += 1;
                if !quiet {
                    println!(
                        "OK {} -> {} ({})",
                        entry.skill.dir_name,
                        entry.tool.slug(),
                        entry.scope.as_str()
                    );
                }
            }
            Err(err) => {
                failed += 1;
                eprintln!("FAIL {}", err);
            }
        }
    }

    if !quiet {
        println!("\n{} installed, {} failed.", succeeded, failed);
    }
    if failed > 0 {
        bail!("{} install(s) failed", failed);
    }
    Ok(())
}
