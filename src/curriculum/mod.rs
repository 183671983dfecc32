//! Curriculum provider: the ordered, read-only list of items a session walks
//! through, loaded from TOML and validated up front so a malformed entry
//! stops startup instead of surfacing mid-exercise.

mod item;

pub use item::{Difficulty, EditorMode, KeySequenceItem, Scene};

use anyhow::{Context, Result, anyhow, bail};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::tutor::Flow;

const BUILTIN_SHORTCUTS: &str = include_str!("../../data/shortcuts.toml");
const BUILTIN_LEVELS: &str = include_str!("../../data/levels.toml");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: Option<String>,
}

#[derive(Deserialize)]
struct CurriculumFile {
    #[serde(default)]
    categories: Vec<Category>,
    #[serde(default)]
    items: Vec<KeySequenceItem>,
}

#[derive(Debug, Clone)]
pub struct Curriculum {
    categories: Vec<Category>,
    items: Vec<KeySequenceItem>,
}

impl Curriculum {
    pub fn new(categories: Vec<Category>, items: Vec<KeySequenceItem>) -> Result<Self> {
        let curriculum = Self { categories, items };
        curriculum.validate()?;
        Ok(curriculum)
    }

    pub fn from_toml(source: &str) -> Result<Self> {
        let file: CurriculumFile = toml::from_str(source).context("Failed to parse curriculum")?;
        Self::new(file.categories, file.items)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let string = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read curriculum file {}", path.display()))?;
        let curriculum = Self::from_toml(&string)
            .with_context(|| format!("Invalid curriculum file {}", path.display()))?;
        info!(
            "Loaded {} items from {}",
            curriculum.len(),
            path.display()
        );
        Ok(curriculum)
    }

    pub fn builtin(flow: Flow) -> Result<Self> {
        let source = match flow {
            Flow::Exercise => BUILTIN_SHORTCUTS,
            Flow::Level => BUILTIN_LEVELS,
        };
        Self::from_toml(source).context("Built-in curriculum is invalid")
    }

    fn validate(&self) -> Result<()> {
        if self.items.is_empty() {
            bail!("Curriculum has no items");
        }

        let declared: HashSet<&str> = self.categories.iter().map(|c| c.id.as_str()).collect();
        let mut seen = HashSet::new();
        for item in &self.items {
            item.validate()?;
            if !seen.insert(item.id.as_str()) {
                bail!("Duplicate item id '{}'", item.id);
            }
            if !declared.is_empty() && !declared.contains(item.category.as_str()) {
                bail!(
                    "Item '{}' uses undeclared category '{}'",
                    item.id,
                    item.category
                );
            }
        }
        Ok(())
    }

    pub fn items(&self) -> &[KeySequenceItem] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&KeySequenceItem> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Items of one category, with their position in the curriculum.
    pub fn by_category<'a>(
        &'a self,
        id: &'a str,
    ) -> impl Iterator<Item = (usize, &'a KeySequenceItem)> {
        self.items
            .iter()
            .enumerate()
            .filter(move |(_, item)| item.category == id)
    }

    pub fn by_difficulty(&self, difficulty: Difficulty) -> impl Iterator<Item = &KeySequenceItem> {
        self.items
            .iter()
            .filter(move |item| item.difficulty == difficulty)
    }

    /// Sub-curriculum in curriculum order. Fails when nothing is left,
    /// since an empty curriculum cannot start a session.
    pub fn filtered(&self, category: Option<&str>, difficulty: Option<Difficulty>) -> Result<Self> {
        if let Some(id) = category {
            if !self.categories.is_empty() && self.category(id).is_none() {
                bail!("Unknown category '{}'", id);
            }
        }
        let items: Vec<_> = self
            .items
            .iter()
            .filter(|item| category.is_none_or(|id| item.category == id))
            .filter(|item| difficulty.is_none_or(|d| item.difficulty == d))
            .cloned()
            .collect();
        if items.is_empty() {
            return Err(anyhow!(
                "No items match category {:?} and difficulty {:?}",
                category,
                difficulty
            ));
        }
        Self::new(self.categories.clone(), items)
    }
}
