//! Markpane - a split-pane terminal markdown previewer with live editing.
//!
//! # Usage
//!
//! ```bash
//! markpane
//! markpane NOTES.md
//! markpane --theme dark --wrap 80
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use markpane::app::App;
use markpane::config::{
    ThemeMode, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags,
};

/// A split-pane terminal markdown previewer with live editing
#[derive(Parser, Debug)]
#[command(name = "markpane", version, about, long_about = None)]
struct Cli {
    /// Markdown file to load into the editor (opens the welcome document when omitted)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Color theme for both panes
    #[arg(long, value_enum)]
    theme: Option<ThemeMode>,

    /// Cap the preview wrap width in columns
    #[arg(long, value_name = "COLS")]
    wrap: Option<u16>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
        println!("Cleared saved defaults at {}", global_path.display());
        return Ok(());
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
        println!("Saved defaults to {}", global_path.display());
        return Ok(());
    }

    let file_flags = {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    let mut app = App::new()
        .with_dark_mode(matches!(effective.theme, Some(ThemeMode::Dark)))
        .with_wrap_width(effective.wrap)
        .with_config_paths(
            Some(global_path),
            if local_path.exists() {
                Some(local_path)
            } else {
                None
            },
        );

    if let Some(file) = cli.file {
        let source = std::fs::read_to_string(&file)
            .with_context(|| format!("Failed to read {}", file.display()))?;
        app = app.with_source(source);
    }

    app.run().context("Application error")
}
