//! Interactive installer flow: pick targets, pick a scope, choose a
//! disposition per skill, confirm the grouped plan, then execute on the
//! background runner while streaming progress lines. Ctrl-C during
//! execution cancels at the next entry boundary.

use std::collections::{HashMap, HashSet};
use std::io::{self, Write};
use std::path::Path;

use anyhow::{bail, Result};

use crate::catalog::{self, Skill};
use crate::cli;
use crate::plan::{self, Action, PlanEntry, Roots};
use crate::runner::{self, CancelFlag};
use crate::target::{Scope, Tool};

pub async fn run(catalog_dir: &Path, roots: &Roots) -> Result<()> {
    let skills = catalog::discover_skills(catalog_dir);
    if skills.is_empty() {
        eprintln!("No skills found in catalog.");
        return Ok(());
    }

    let detected = Tool::detect_installed(&roots.home);
    let tools = prompt_targets(&detected)?;
    let scopes = prompt_scopes(&tools)?;
    let pairs = plan::get_active_pairs(&tools, &scopes);

    let actions = prompt_actions(&skills, &pairs, roots)?;
    let plans = plan::build_plans(&skills, &pairs, &actions, roots);

    if plans.is_empty() {
        println!("Nothing to do - select skills to install, update, or uninstall.");
        return Ok(());
    }

    let installs = plans
        .iter()
        .filter(|p| matches!(p.action, Action::Install | Action::Update))
        .count();
    let uninstalls = plans.iter().filter(|p| p.action == Action::Uninstall).count();
    let planned: HashSet<&str> = plans.iter().map(|p| p.skill.dir_name.as_str()).collect();
    let unchanged = skills
        .iter()
        .filter(|s| !planned.contains(s.dir_name.as_str()))
        .count();

    println!();
    print_overview(&plans, roots, unchanged);
    println!(
        "Summary: {} install(s), {} uninstall(s), {} unchanged",
        installs, uninstalls, unchanged
    );
    if !cli::confirm("Proceed?")? {
        println!("Aborted.");
        return Ok(());
    }

    execute(plans).await
}

fn prompt_line(prompt: &str) -> Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        bail!("Input closed");
    }
    Ok(line.trim().to_string())
}

fn prompt_targets(detected: &[Tool]) -> Result<Vec<Tool>> {
    println!("Target CLIs (* = detected):");
    for (i, tool) in Tool::ALL.iter().enumerate() {
        let spec = tool.spec();
        let mut line = format!("  {}. {}", i + 1, spec.name);
        if detected.contains(tool) {
            line.push_str(" *");
        }
        if spec.project_only {
            line.push_str("  [project-level only]");
        }
        println!("{}", line);
    }

    loop {
        let input = prompt_line("Targets [numbers, Enter = detected]: ")?;
        if input.is_empty() {
            if detected.is_empty() {
                println!("Select at least one target CLI.");
                continue;
            }
            return Ok(detected.to_vec());
        }
        match parse_selection(&input, Tool::ALL.len()) {
            Some(indices) if !indices.is_empty() => {
                return Ok(indices.into_iter().map(|i| Tool::ALL[i]).collect());
            }
            _ => println!("Select at least one target CLI."),
        }
    }
}

/// Parse "1,3" or "1 3" into zero-based indices, deduplicated, keeping
/// input order. None when anything is not a number in 1..=max.
fn parse_selection(input: &str, max: usize) -> Option<Vec<usize>> {
    let mut indices = Vec::new();
    for part in input.split(|c: char| c == ',' || c.is_whitespace()) {
        if part.is_empty() {
            continue;
        }
        let n: usize = part.parse().ok()?;
        if n < 1 || n > max {
            return None;
        }
        if !indices.contains(&(n - 1)) {
            indices.push(n - 1);
        }
    }
    Some(indices)
}

fn prompt_scopes(tools: &[Tool]) -> Result<Vec<Scope>> {
    let project_only: Vec<&str> = tools
        .iter()
        .filter(|t| t.spec().project_only)
        .map(|t| t.name())
        .collect();
    if !project_only.is_empty() {
        println!(
            "Note: {} does not support user-level skills and will be skipped for that scope.",
            project_only.join(", ")
        );
    }
    let all_project_only = tools.iter().all(|t| t.spec().project_only);

    loop {
        let input = prompt_line("Scope (user/project/both) [Enter = user]: ")?;
        let value = if input.is_empty() {
            "user".to_string()
        } else {
            input.to_lowercase()
        };
        let scopes = match cli::resolve_scopes(&value) {
            Ok(scopes) => scopes,
            Err(_) => {
                println!("Select a scope: user, project, or both.");
                continue;
            }
        };
        if all_project_only && scopes == [Scope::User] {
            println!(
                "All selected CLIs are project-level only. Select project scope or add other CLI targets."
            );
            continue;
        }
        return Ok(scopes);
    }
}

/// Show per-skill status, then ask for a disposition per skill.
/// Installed skills default to update, the rest to skip.
fn prompt_actions(
    skills: &[Skill],
    pairs: &[(Tool, Scope)],
    roots: &Roots,
) -> Result<HashMap<String, Action>> {
    let installed: Vec<bool> = skills
        .iter()
        .map(|skill| {
            pairs.iter().any(|&(tool, scope)| {
                plan::check_installed(&plan::resolve_destination(skill, tool, scope, roots))
            })
        })
        .collect();

    println!();
    let rows: Vec<Vec<String>> = skills
        .iter()
        .zip(&installed)
        .map(|(skill, &inst)| {
            vec![
                skill.dir_name.clone(),
                if inst { "installed" } else { "--" }.to_string(),
                skill.description.clone(),
            ]
        })
        .collect();
    cli::print_table(&cli::header(&["SKILL", "STATUS", "DESCRIPTION"]), &rows);

    println!();
    println!("Choose per skill: i = install/update, k = keep, u = uninstall, s = skip.");
    let mut actions = HashMap::new();
    for (skill, &inst) in skills.iter().zip(&installed) {
        let default = if inst { "i" } else { "s" };
        loop {
            let input = prompt_line(&format!(
                "  {} (i/k/u/s, Enter = {}): ",
                skill.dir_name, default
            ))?;
            let choice = if input.is_empty() {
                default.to_string()
            } else {
                input.to_lowercase()
            };
            let action = match choice.as_str() {
                "i" => {
                    if inst {
                        Action::Update
                    } else {
                        Action::Install
                    }
                }
                "k" => Action::Keep,
                "u" => Action::Uninstall,
                "s" => Action::Skip,
                _ => {
                    println!("Choose one of i, k, u, s.");
                    continue;
                }
            };
            actions.insert(skill.dir_name.clone(), action);
            break;
        }
    }
    Ok(actions)
}

fn print_overview(plans: &[PlanEntry], roots: &Roots, unchanged: usize) {
    let installs: Vec<&PlanEntry> = plans
        .iter()
        .filter(|p| matches!(p.action, Action::Install | Action::Update))
        .collect();
    let uninstalls: Vec<&PlanEntry> = plans
        .iter()
        .filter(|p| p.action == Action::Uninstall)
        .collect();

    if !installs.is_empty() {
        println!("Will install/update:");
        print_grouped(&installs, roots);
    }
    if !uninstalls.is_empty() {
        println!("Will uninstall:");
        print_grouped(&uninstalls, roots);
    }
    if unchanged > 0 {
        println!("Unchanged: {} skill(s) kept/skipped", unchanged);
    }
}

/// Group entries by (tool, scope), labeled with the destination base.
fn print_grouped(plans: &[&PlanEntry], roots: &Roots) {
    let mut groups: Vec<(String, Vec<&PlanEntry>)> = Vec::new();
    for &entry in plans {
        let key = group_label(entry, roots);
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, list)) => list.push(entry),
            None => groups.push((key, vec![entry])),
        }
    }
    for (key, list) in &groups {
        println!("  {}", key);
        for entry in list {
            match entry.action {
                Action::Install => println!("    + {}/ (new)", entry.skill.dir_name),
                Action::Update => println!("    + {}/ (update)", entry.skill.dir_name),
                Action::Uninstall => println!("    - {}/", entry.skill.dir_name),
                Action::Keep | Action::Skip => {}
            }
        }
    }
}

fn group_label(entry: &PlanEntry, roots: &Roots) -> String {
    let spec = entry.tool.spec();
    let (base, template) = match entry.scope {
        Scope::User => ("~/".to_string(), spec.user_template.unwrap_or_default()),
        Scope::Project => (format!("{}/", roots.project.display()), spec.project_template),
    };
    let path_base = template
        .rsplit_once("/{skill}")
        .map(|(head, _)| head)
        .unwrap_or(template);
    format!(
        "{} · {} ({}{}/)",
        spec.name,
        scope_label(entry.scope),
        base,
        path_base
    )
}

fn scope_label(scope: Scope) -> &'static str {
    match scope {
        Scope::User => "User",
        Scope::Project => "Project",
    }
}

fn past_tense(action: Action) -> &'static str {
    match action {
        Action::Install => "installed",
        Action::Update => "updated",
        Action::Uninstall => "uninstalled",
        Action::Keep | Action::Skip => "skipped",
    }
}

async fn execute(plans: Vec<PlanEntry>) -> Result<()> {
    let cancel = CancelFlag::new();
    let mut events = runner::run_plans(plans, cancel.clone());
    let mut succeeded = 0;
    let mut failed = 0;

    loop {
        tokio::select! {
            maybe = events.recv() => {
                let Some(outcome) = maybe else { break };
                let desc = format!(
                    "{} → {} · {}",
                    outcome.skill,
                    outcome.tool.name(),
                    scope_label(outcome.scope)
                );
                match outcome.result {
                    Ok(()) => {
                        succeeded += 1;
                        println!("[OK] {} ({})", desc, past_tense(outcome.action));
                    }
                    Err(err) => {
                        failed += 1;
                        println!("[!!] {} - {}", desc, err);
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                cancel.cancel();
                println!("Cancelling after the current entry...");
            }
        }
    }

    println!("\n{} succeeded, {} failed", succeeded, failed);
    Ok(())
}
