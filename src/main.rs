mod app;
mod cli;
mod config;
mod curriculum;
mod input;
mod tutor;
mod ui;

use anyhow::Result;
use app::TutorBuilder;
use clap::Parser;
use cli::CliArgs;
use config::{Config, FileConfig};
use curriculum::{Curriculum, Difficulty, KeySequenceItem};
use input::keys::KeyEncoder;
use log::info;
use std::io::stdout;
use std::panic;
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    // Enable better panic messages
    better_panic::install();

    let args = CliArgs::parse();
    setup_log(&args.log_file, args.verbose)?;

    let file_config = FileConfig::load(args.config.as_deref())?;
    let config = Config::resolve(file_config, &args.overrides())?;

    if args.list {
        return list(&config);
    }

    // The tutor owns the terminal from here on; give it back on panic.
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        _ = app::restore_terminal(&mut stdout());
        default_hook(info);
    }));

    let mut tutor = TutorBuilder::new().with_config(config).build()?;
    let result = tutor.run().await;

    // Always clean up terminal state, even if the run loop fails
    if let Err(e) = tutor.cleanup() {
        eprintln!("Error cleaning up terminal: {}", e);
    }

    result
}

fn setup_log(path: &Path, verbose: bool) -> Result<()> {
    use env_logger::{Builder, Target};
    use log::LevelFilter;
    use std::fs::File;

    let file = File::create(path)?;
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    Builder::new()
        .target(Target::Pipe(Box::new(file)))
        .filter(None, level)
        .init();

    info!("Logging to {}", path.display());
    Ok(())
}

/// Prints the selected items grouped by category. The numbers are the ones
/// the go-to prompt accepts.
fn list(config: &Config) -> Result<()> {
    let curriculum = &config.curriculum;
    if curriculum.categories().is_empty() {
        for (i, item) in curriculum.items().iter().enumerate() {
            print_item(i, item)?;
        }
    }
    for category in curriculum.categories() {
        let mut items = curriculum.by_category(&category.id).peekable();
        if items.peek().is_none() {
            continue;
        }
        match &category.icon {
            Some(icon) => println!("{} {} ({})", icon, category.name, category.description),
            None => println!("{} ({})", category.name, category.description),
        }
        for (i, item) in items {
            print_item(i, item)?;
        }
        println!();
    }
    println!("{}", difficulty_summary(curriculum));
    Ok(())
}

fn print_item(index: usize, item: &KeySequenceItem) -> Result<()> {
    println!(
        "{:>3}  {:<24} {:<16} {}",
        index + 1,
        item.id,
        item.keys.encode()?,
        item.description
    );
    Ok(())
}

fn difficulty_summary(curriculum: &Curriculum) -> String {
    let counts: Vec<String> = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ]
    .into_iter()
    .map(|difficulty| format!("{} {}", curriculum.by_difficulty(difficulty).count(), difficulty))
    .collect();
    format!("{} items: {}", curriculum.len(), counts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tutor::Flow;

    #[test]
    fn test_difficulty_summary() {
        let curriculum = Curriculum::builtin(Flow::Level).unwrap();
        let summary = difficulty_summary(&curriculum);
        assert!(summary.starts_with(&format!("{} items: ", curriculum.len())));
        assert!(summary.contains("beginner"));
        assert!(summary.contains("advanced"));
    }
}
