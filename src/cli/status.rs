use std::path::Path;

use anyhow::Result;

use crate::catalog;
use crate::cli;
use crate::config::DefaultsConfig;
use crate::plan::{self, Roots};

/// Show where each catalog skill is installed, as a skills x pairs
/// matrix. Unlike install, the scope defaults to both.
pub fn run(
    catalog_dir: &Path,
    roots: &Roots,
    defaults: &DefaultsConfig,
    targets: &[String],
    scope: Option<&str>,
    quiet: bool,
) -> Result<()> {
    let target_values = cli::effective_targets(targets, defaults);
    let tools = cli::resolve_targets(&target_values, &roots.home)?;
    let scope_value = cli::effective_scope(scope, "both");
    let scopes = cli::resolve_scopes(&scope_value)?;
    let pairs = plan::get_active_pairs(&tools, &scopes);

    let skills = catalog::discover_skills(catalog_dir);
    if skills.is_empty() {
        eprintln!("No skills found in catalog.");
        return Ok(());
    }

    if quiet {
        for skill in &skills {
            for &(tool, sc) in &pairs {
                let dest = plan::resolve_destination(skill, tool, sc, roots);
                let marker = if plan::check_installed(&dest) {
                    "installed"
                } else {
                    "missing"
                };
                println!("{}\t{}\t{}\t{}", skill.dir_name, tool.slug(), sc.as_str(), marker);
            }
        }
        return Ok(());
    }

    let mut header = vec!["SKILL".to_string()];
    for &(tool, sc) in &pairs {
        header.push(format!("{} ({})", tool.slug(), sc.short()));
    }
    let rows: Vec<Vec<String>> = skills
        .iter()
        .map(|skill| {
            let mut row = vec![skill.dir_name.clone()];
            for &(tool, sc) in &pairs {
                let dest = plan::resolve_destination(skill, tool, sc, roots);
                row.push(if plan::check_installed(&dest) {
                    "installed".to_string()
                } else {
                    "--".to_string()
                });
            }
            row
        })
        .collect();
    cli::print_table(&header, &rows);
    Ok(())
}
