use anyhow::{bail, Result};
use std::path::Path;
use std::str::FromStr;

/// Static description of one supported tool: where its skills live for
/// each scope and how to recognize that the tool is present on this
/// machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSpec {
    pub name: &'static str,
    pub slug: &'static str,
    /// Destination template for user scope. `None` when the tool has no
    /// user-level skills directory.
    pub user_template: Option<&'static str>,
    pub project_template: &'static str,
    /// The tool only reads skills from the project tree.
    pub project_only: bool,
    /// Directory under the home directory whose presence means the tool
    /// is installed.
    pub detect_dir: &'static str,
}

static CLAUDE_CODE: ToolSpec = ToolSpec {
    name: "Claude Code",
    slug: "claude-code",
    user_template: Some(".claude/skills/{skill}"),
    project_template: ".claude/skills/{skill}",
    project_only: false,
    detect_dir: ".claude",
};

static CODEX: ToolSpec = ToolSpec {
    name: "Codex",
    slug: "codex",
    user_template: Some(".codex/skills/{skill}"),
    project_template: ".codex/skills/{skill}",
    project_only: false,
    detect_dir: ".codex",
};

static KILO_CODE: ToolSpec = ToolSpec {
    name: "Kilo Code",
    slug: "kilo-code",
    user_template: Some(".kilocode/rules/{skill}"),
    project_template: ".kilocode/rules/{skill}",
    project_only: false,
    detect_dir: ".kilocode",
};

static WINDSURF: ToolSpec = ToolSpec {
    name: "Windsurf",
    slug: "windsurf",
    user_template: None,
    project_template: ".windsurf/rules/{skill}",
    project_only: true,
    detect_dir: ".codeium/windsurf",
};

/// A supported AI assistant CLI/editor. The set is closed; adding a tool
/// means adding a variant and its spec row here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    ClaudeCode,
    Codex,
    KiloCode,
    Windsurf,
}

impl Tool {
    /// Every supported tool. Slug lookups, detection, and `--target all`
    /// iterate this list, so the order here is the order everywhere.
    pub const ALL: [Tool; 4] = [Tool::ClaudeCode, Tool::Codex, Tool::KiloCode, Tool::Windsurf];

    pub fn spec(self) -> &'static ToolSpec {
        match self {
            Tool::ClaudeCode => &CLAUDE_CODE,
            Tool::Codex => &CODEX,
            Tool::KiloCode => &KILO_CODE,
            Tool::Windsurf => &WINDSURF,
        }
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }

    pub fn slug(self) -> &'static str {
        self.spec().slug
    }

    pub fn from_slug(slug: &str) -> Option<Tool> {
        Tool::ALL.into_iter().find(|t| t.spec().slug == slug)
    }

    /// Tools whose marker directory exists under the given home
    /// directory, in `ALL` order.
    pub fn detect_installed(home: &Path) -> Vec<Tool> {
        Tool::ALL
            .into_iter()
            .filter(|t| home.join(t.spec().detect_dir).is_dir())
            .collect()
    }
}

impl FromStr for Tool {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match Tool::from_slug(&s.to_lowercase()) {
            Some(tool) => Ok(tool),
            None => bail!("Unknown target: {}", s),
        }
    }
}

/// Where a skill is placed: under the home directory or under the
/// current project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    User,
    Project,
}

impl Scope {
    pub const ALL: [Scope; 2] = [Scope::User, Scope::Project];

    pub fn as_str(self) -> &'static str {
        match self {
            Scope::User => "user",
            Scope::Project => "project",
        }
    }

    /// One-letter form used in status column headers.
    pub fn short(self) -> &'static str {
        match self {
            Scope::User => "U",
            Scope::Project => "P",
        }
    }
}

impl FromStr for Scope {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Scope::User),
            "project" => Ok(Scope::Project),
            _ => bail!("Unknown scope: {}", s),
        }
    }
}
