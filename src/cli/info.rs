use std::path::Path;

use anyhow::Result;

use crate::catalog;
use crate::cli;
use crate::plan::Roots;
use crate::target::Tool;

/// Show version, catalog location, and detected CLIs.
pub fn run(catalog_dir: &Path, roots: &Roots) -> Result<()> {
    let skills = catalog::discover_skills(catalog_dir);
    let detected = Tool::detect_installed(&roots.home);
    let detected_value = if detected.is_empty() {
        "(none)".to_string()
    } else {
        detected
            .iter()
            .map(|t| t.slug())
            .collect::<Vec<_>>()
            .join(", ")
    };

    let rows = vec![
        vec!["name".to_string(), env!("CARGO_PKG_NAME").to_string()],
        vec!["version".to_string(), env!("CARGO_PKG_VERSION").to_string()],
        vec!["catalog_dir".to_string(), catalog_dir.display().to_string()],
        vec!["skills_in_catalog".to_string(), skills.len().to_string()],
        vec!["detected_clis".to_string(), detected_value],
    ];
    cli::print_table(&cli::header(&["KEY", "VALUE"]), &rows);
    Ok(())
}
