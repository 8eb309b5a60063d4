//! Integration tests for background plan execution
//! Checks outcome streaming, failure isolation and cooperative cancel

use std::fs;
use std::path::Path;

use anyhow::Result;
use tempfile::TempDir;

use bx_skills::catalog::{Skill, SKILL_FILE};
use bx_skills::plan::{Action, PlanEntry};
use bx_skills::runner::{run_plans, CancelFlag};
use bx_skills::target::{Scope, Tool};

fn install_plan(root: &Path, dir_name: &str) -> Result<PlanEntry> {
    let bundle = root.join("catalog").join(dir_name);
    fs::create_dir_all(&bundle)?;
    fs::write(bundle.join(SKILL_FILE), "---\nname: x\n---\n")?;
    Ok(PlanEntry {
        skill: Skill {
            dir_name: dir_name.to_string(),
            name: dir_name.to_string(),
            description: String::new(),
            source_path: bundle,
        },
        tool: Tool::Codex,
        scope: Scope::User,
        action: Action::Install,
        dest: root.join("home/.codex/skills").join(dir_name),
        installed: false,
    })
}

#[tokio::test]
async fn test_outcomes_stream_in_plan_order() -> Result<()> {
    let tmp = TempDir::new()?;
    let plans = vec![
        install_plan(tmp.path(), "alpha")?,
        install_plan(tmp.path(), "bravo")?,
        install_plan(tmp.path(), "carol")?,
    ];
    let mut rx = run_plans(plans, CancelFlag::new());

    let mut seen = Vec::new();
    while let Some(outcome) = rx.recv().await {
        assert!(outcome.result.is_ok(), "Entry {} failed", outcome.skill);
        seen.push((outcome.index, outcome.skill));
    }
    assert_eq!(
        seen,
        vec![
            (0, "alpha".to_string()),
            (1, "bravo".to_string()),
            (2, "carol".to_string()),
        ]
    );
    for dir in ["alpha", "bravo", "carol"] {
        let dest = tmp.path().join("home/.codex/skills").join(dir);
        assert!(dest.join(SKILL_FILE).is_file(), "{} not installed", dir);
    }
    Ok(())
}

#[tokio::test]
async fn test_one_failure_does_not_stop_the_batch() -> Result<()> {
    let tmp = TempDir::new()?;
    let mut broken = install_plan(tmp.path(), "alpha")?;
    fs::write(tmp.path().join("blocker"), "file")?;
    broken.dest = tmp.path().join("blocker/alpha");
    let plans = vec![broken, install_plan(tmp.path(), "bravo")?];

    let mut rx = run_plans(plans, CancelFlag::new());
    let first = rx.recv().await.expect("first outcome");
    assert!(first.result.is_err());
    let second = rx.recv().await.expect("second outcome");
    assert!(second.result.is_ok());
    assert!(rx.recv().await.is_none());
    Ok(())
}

#[tokio::test]
async fn test_cancel_stops_at_entry_boundary() -> Result<()> {
    let tmp = TempDir::new()?;
    let plans = vec![
        install_plan(tmp.path(), "alpha")?,
        install_plan(tmp.path(), "bravo")?,
    ];
    let cancel = CancelFlag::new();
    let mut rx = run_plans(plans, cancel.clone());

    // Let the first entry through, then cancel before draining more.
    let first = rx.recv().await.expect("first outcome");
    assert_eq!(first.skill, "alpha");
    cancel.cancel();

    // The worker may already have applied bravo before it saw the flag,
    // but it never runs anything past the first unconsumed boundary.
    let mut rest = 0;
    while rx.recv().await.is_some() {
        rest += 1;
    }
    assert!(rest <= 1, "Cancel should stop the stream early");
    Ok(())
}

#[tokio::test]
async fn test_preset_cancel_runs_nothing() -> Result<()> {
    let tmp = TempDir::new()?;
    let plans = vec![install_plan(tmp.path(), "alpha")?];
    let cancel = CancelFlag::new();
    cancel.cancel();

    let mut rx = run_plans(plans, cancel);
    assert!(rx.recv().await.is_none());
    assert!(!tmp.path().join("home/.codex/skills/alpha").exists());
    Ok(())
}

#[tokio::test]
async fn test_empty_plan_list_closes_channel() {
    let mut rx = run_plans(Vec::new(), CancelFlag::new());
    assert!(rx.recv().await.is_none());
}
