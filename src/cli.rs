use clap::Parser;
use std::path::PathBuf;

use crate::config::Overrides;
use crate::curriculum::Difficulty;
use crate::tutor::Flow;

/// Learn Vim key sequences by typing them
#[derive(Parser, Debug)]
#[command(name = "vitutor", version, about = "Learn Vim key sequences by typing them")]
pub struct CliArgs {
    /// Configuration file (defaults to ./vitutor.toml when present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Shortcut drill or scene levels
    #[arg(short, long, value_enum)]
    pub flow: Option<Flow>,

    /// Only practice items of this category
    #[arg(long)]
    pub category: Option<String>,

    /// Only practice items of this difficulty
    #[arg(long, value_enum)]
    pub difficulty: Option<Difficulty>,

    /// Built-in layout name or path to a layout TOML file
    #[arg(short, long)]
    pub layout: Option<String>,

    /// Curriculum TOML file to use instead of the built-in one
    #[arg(long, value_name = "FILE")]
    pub curriculum: Option<PathBuf>,

    /// Where the log goes; the terminal belongs to the tutor
    #[arg(long, value_name = "FILE", default_value = "/tmp/vitutor.log")]
    pub log_file: PathBuf,

    /// Log matcher decisions too
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the selected items and exit
    #[arg(long)]
    pub list: bool,
}

impl CliArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            flow: self.flow,
            layout: self.layout.clone(),
            curriculum_file: self.curriculum.clone(),
            category: self.category.clone(),
            difficulty: self.difficulty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_overrides() {
        let args = CliArgs::parse_from([
            "vitutor",
            "--flow",
            "level",
            "--difficulty",
            "beginner",
            "--layout",
            "us",
        ]);
        let overrides = args.overrides();
        assert_eq!(overrides.flow, Some(Flow::Level));
        assert_eq!(overrides.difficulty, Some(Difficulty::Beginner));
        assert_eq!(overrides.layout.as_deref(), Some("us"));
        assert_eq!(args.log_file, PathBuf::from("/tmp/vitutor.log"));
        assert!(!args.list);
    }

    #[test]
    fn test_rejects_unknown_flow() {
        assert!(CliArgs::try_parse_from(["vitutor", "--flow", "race"]).is_err());
    }
}
