use anyhow::{Context, Result, bail};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::curriculum::{Curriculum, Difficulty};
use crate::input::layout::KeyboardLayout;
use crate::tutor::{Flow, ResetScope, SessionPolicy};

pub const DEFAULT_CONFIG_FILE: &str = "vitutor.toml";

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    pub reset_scope: Option<ResetScope>,
    pub success_dwell_ms: Option<u64>,
    pub error_dwell_ms: Option<u64>,
}

impl PolicyConfig {
    fn apply(&self, mut policy: SessionPolicy) -> SessionPolicy {
        if let Some(scope) = self.reset_scope {
            policy.reset_scope = scope;
        }
        if let Some(ms) = self.success_dwell_ms {
            policy.success_dwell = Duration::from_millis(ms);
        }
        if let Some(ms) = self.error_dwell_ms {
            policy.error_dwell = Duration::from_millis(ms);
        }
        policy
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub flow: Option<Flow>,
    pub layout: Option<String>,
    pub layout_file: Option<PathBuf>,
    pub curriculum_file: Option<PathBuf>,
    pub policy: PolicyConfig,
}

impl FileConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let string = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = toml::from_str(&string)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    /// An explicit path must exist; otherwise `vitutor.toml` in the working
    /// directory is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::load_from_file(DEFAULT_CONFIG_FILE)
            }
            None => Ok(Self::default()),
        }
    }
}

/// Command line values that win over the config file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub flow: Option<Flow>,
    pub layout: Option<String>,
    pub curriculum_file: Option<PathBuf>,
    pub category: Option<String>,
    pub difficulty: Option<Difficulty>,
}

#[derive(Debug)]
pub struct Config {
    pub flow: Flow,
    pub layout: KeyboardLayout,
    pub curriculum: Curriculum,
    pub policy: SessionPolicy,
}

impl Config {
    pub fn resolve(file_config: FileConfig, overrides: &Overrides) -> Result<Self> {
        let flow = overrides.flow.or(file_config.flow).unwrap_or_default();

        let layout = match (&overrides.layout, &file_config.layout_file, &file_config.layout) {
            (Some(name), _, _) => load_layout(name)?,
            (None, Some(path), _) => KeyboardLayout::load_from_file(path)?,
            (None, None, Some(name)) => load_layout(name)?,
            (None, None, None) => KeyboardLayout::default(),
        };

        let curriculum_file = overrides
            .curriculum_file
            .as_ref()
            .or(file_config.curriculum_file.as_ref());
        let mut curriculum = match curriculum_file {
            Some(path) => Curriculum::load_from_file(path)?,
            None => Curriculum::builtin(flow)?,
        };
        if overrides.category.is_some() || overrides.difficulty.is_some() {
            curriculum = curriculum.filtered(overrides.category.as_deref(), overrides.difficulty)?;
        }

        let policy = file_config.policy.apply(SessionPolicy::for_flow(flow));

        info!(
            "Flow {:?}, layout '{}', {} items, reset {:?}",
            flow,
            layout.name,
            curriculum.len(),
            policy.reset_scope
        );

        Ok(Self {
            flow,
            layout,
            curriculum,
            policy,
        })
    }
}

impl TryFrom<FileConfig> for Config {
    type Error = anyhow::Error;

    fn try_from(file_config: FileConfig) -> Result<Self, Self::Error> {
        Self::resolve(file_config, &Overrides::default())
    }
}

/// A built-in layout name, or a path to a layout file.
fn load_layout(name: &str) -> Result<KeyboardLayout> {
    if let Some(layout) = KeyboardLayout::builtin(name) {
        return Ok(layout);
    }
    let path = Path::new(name);
    if path.exists() {
        return KeyboardLayout::load_from_file(path);
    }
    bail!("Unknown keyboard layout '{}'", name)
}
