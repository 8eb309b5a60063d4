use std::path::Path;

use anyhow::Result;

use crate::catalog;
use crate::cli;

/// List the skills available in the catalog.
pub fn run(catalog_dir: &Path, quiet: bool) -> Result<()> {
    let skills = catalog::discover_skills(catalog_dir);
    if skills.is_empty() {
        eprintln!("No skills found in catalog.");
        return Ok(());
    }

    if quiet {
        for skill in &skills {
            println!("{}", skill.dir_name);
        }
        return Ok(());
    }

    let rows: Vec<Vec<String>> = skills
        .iter()
        .map(|s| vec![s.dir_name.clone(), s.description.clone()])
        .collect();
    cli::print_table(&cli::header(&["NAME", "DESCRIPTION"]), &rows);
    Ok(())
}
