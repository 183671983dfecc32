use anyhow::{Result, bail};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::input::keys::sequence::KeySequence;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        };
        f.write_str(name)
    }
}

/// Editor mode shown in a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorMode {
    #[default]
    Normal,
    Insert,
    Visual,
    Command,
}

impl EditorMode {
    pub fn label(&self) -> &'static str {
        match self {
            EditorMode::Normal => "NORMAL",
            EditorMode::Insert => "INSERT",
            EditorMode::Visual => "VISUAL",
            EditorMode::Command => "COMMAND",
        }
    }
}

/// Pre-authored before/after editor state of a level. Pure display data:
/// nothing here is computed from the keys the user presses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    pub before_text: String,
    pub after_text: String,
    pub cursor_before: usize,
    pub cursor_after: usize,
    pub highlight_before: Option<(usize, usize)>,
    pub highlight_after: Option<(usize, usize)>,
    #[serde(default)]
    pub mode_before: EditorMode,
    pub mode_after: Option<EditorMode>,
    pub command_line: Option<String>,
}

impl Scene {
    pub fn text(&self, after: bool) -> &str {
        if after { &self.after_text } else { &self.before_text }
    }

    pub fn cursor(&self, after: bool) -> usize {
        if after { self.cursor_after } else { self.cursor_before }
    }

    pub fn highlight(&self, after: bool) -> Option<(usize, usize)> {
        if after { self.highlight_after } else { self.highlight_before }
    }

    pub fn mode(&self, after: bool) -> EditorMode {
        if after {
            self.mode_after.unwrap_or(self.mode_before)
        } else {
            self.mode_before
        }
    }

    pub fn validate(&self) -> Result<()> {
        for after in [false, true] {
            let side = if after { "after" } else { "before" };
            // The cursor may sit one past the last character.
            let length = self.text(after).chars().count();
            if self.cursor(after) > length {
                bail!(
                    "cursor_{} ({}) is beyond the text ({} chars)",
                    side,
                    self.cursor(after),
                    length
                );
            }
            if let Some((start, end)) = self.highlight(after) {
                if start > end || end > length {
                    bail!("highlight_{} [{}, {}) is out of range", side, start, end);
                }
            }
        }
        Ok(())
    }
}

/// One exercise or level of the curriculum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySequenceItem {
    pub id: String,
    pub keys: KeySequence,
    pub description: String,
    pub hint: Option<String>,
    pub category: String,
    pub difficulty: Difficulty,
    pub scene: Option<Scene>,
}

impl KeySequenceItem {
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            bail!("Item has an empty id");
        }
        if self.keys.is_empty() {
            bail!("Item '{}' has no expected keys", self.id);
        }
        if self.description.trim().is_empty() {
            bail!("Item '{}' has no description", self.id);
        }
        if let Some(scene) = &self.scene {
            scene
                .validate()
                .map_err(|e| anyhow::anyhow!("Item '{}': {}", self.id, e))?;
        }
        Ok(())
    }
}
