//! Background plan execution.
//!
//! The plan list is applied sequentially on one blocking task, and each
//! completed entry is reported through a channel so the front-end can
//! render progress while filesystem work continues. Cancellation is
//! cooperative: the flag is checked between entries, never mid-copy.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;

use crate::executor::{self, ExecError};
use crate::plan::{Action, PlanEntry};
use crate::target::{Scope, Tool};

/// Shared cancellation flag. Setting it stops the worker at the next
/// entry boundary; the entry in flight always finishes.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Result of applying one plan entry, sent as soon as the entry
/// finishes.
#[derive(Debug)]
pub struct EntryOutcome {
    pub index: usize,
    pub skill: String,
    pub tool: Tool,
    pub scope: Scope,
    pub action: Action,
    pub result: Result<(), ExecError>,
}

/// Apply `plans` in order on a blocking worker, yielding one
/// [`EntryOutcome`] per entry. The channel closes after the last entry,
/// or earlier when `cancel` is set or the receiver is dropped.
pub fn run_plans(plans: Vec<PlanEntry>, cancel: CancelFlag) -> mpsc::Receiver<EntryOutcome> {
    let (tx, rx) = mpsc::channel(16);
    tokio::task::spawn_blocking(move || {
        for (index, plan) in plans.iter().enumerate() {
            if cancel.is_cancelled() {
                debug!("Cancelled before entry {} of {}", index, plans.len());
                break;
            }
            let result = executor::apply_plan(plan);
            let outcome = EntryOutcome {
                index,
                skill: plan.skill.dir_name.clone(),
                tool: plan.tool,
                scope: plan.scope,
                action: plan.action,
                result,
            };
            if tx.blocking_send(outcome).is_err() {
                debug!("Outcome receiver dropped, stopping after entry {}", index);
                break;
            }
        }
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Skill, SKILL_FILE};
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn seed_bundle(root: &Path, dir_name: &str) -> PathBuf {
        let bundle = root.join(dir_name);
        fs::create_dir_all(&bundle).unwrap();
        fs::write(bundle.join(SKILL_FILE), "---\nname: x\n---\n").unwrap();
        bundle
    }

    fn install_plan(root: &Path, dir_name: &str) -> PlanEntry {
        let bundle = seed_bundle(root, dir_name);
        PlanEntry {
            skill: Skill {
                dir_name: dir_name.to_string(),
                name: dir_name.to_string(),
                description: String::new(),
                source_path: bundle,
            },
            tool: Tool::Codex,
            scope: Scope::User,
            action: Action::Install,
            dest: root.join("out").join(dir_name),
            installed: false,
        }
    }

    #[tokio::test]
    async fn test_one_outcome_per_entry_in_order() {
        let tmp = TempDir::new().unwrap();
        let plans = vec![
            install_plan(tmp.path(), "alpha"),
            install_plan(tmp.path(), "bravo"),
        ];
        let mut rx = run_plans(plans, CancelFlag::new());

        let first = rx.recv().await.unwrap();
        assert_eq!(first.index, 0);
        assert_eq!(first.skill, "alpha");
        assert!(first.result.is_ok());

        let second = rx.recv().await.unwrap();
        assert_eq!(second.index, 1);
        assert_eq!(second.skill, "bravo");

        assert!(rx.recv().await.is_none());
        assert!(tmp.path().join("out").join("alpha").join(SKILL_FILE).is_file());
    }

    #[tokio::test]
    async fn test_failed_entry_does_not_stop_the_run() {
        let tmp = TempDir::new().unwrap();
        let mut broken = install_plan(tmp.path(), "alpha");
        fs::write(tmp.path().join("blocker"), "file").unwrap();
        broken.dest = tmp.path().join("blocker").join("alpha");
        let plans = vec![broken, install_plan(tmp.path(), "bravo")];
        let mut rx = run_plans(plans, CancelFlag::new());

        let first = rx.recv().await.unwrap();
        assert!(first.result.is_err());
        let second = rx.recv().await.unwrap();
        assert!(second.result.is_ok());
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_cancel_before_start_yields_nothing() {
        let tmp = TempDir::new().unwrap();
        let plans = vec![install_plan(tmp.path(), "alpha")];
        let cancel = CancelFlag::new();
        cancel.cancel();
        let mut rx = run_plans(plans, cancel);

        assert!(rx.recv().await.is_none());
        assert!(!tmp.path().join("out").join("alpha").exists());
    }

    #[tokio::test]
    async fn test_empty_plan_closes_immediately() {
        let mut rx = run_plans(Vec::new(), CancelFlag::new());
        assert!(rx.recv().await.is_none());
    }
}
