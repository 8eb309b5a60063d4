//! bx-skills - Install AI coding assistant skills from a local catalog
//!
//! Copies skill bundles (directories with a SKILL.md marker) into the
//! config folders of supported CLIs at user or project scope. Planning
//! is separated from execution: destinations are resolved and diffed
//! against what is installed, then each resulting entry is applied
//! independently and idempotently.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod executor;
pub mod frontmatter;
pub mod plan;
pub mod runner;
pub mod target;
