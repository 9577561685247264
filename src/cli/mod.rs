//! Command-line parsing for the site renderer.
//!
//! Argument parsing and command dispatch stay separate from the rendering code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::ConfigOverrides;
use crate::data::Dataset;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "site", version, about = "Render the programs, events and news pages from their CSV data")]
pub struct Cli {
    /// URL of the page the data files are relative to (overrides SITE_BASE_URL).
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Directory news images are served from (overrides SITE_IMAGES_DIR).
    #[arg(long, global = true, value_name = "DIR")]
    pub images_dir: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            base_url: self.base_url.clone(),
            images_dir: self.images_dir.clone(),
        }
    }
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load the data a page needs and write the page with its cards filled in.
    Render(RenderArgs),
    /// Print the calendar widget configuration built from the events data.
    Calendar(OutputArgs),
    /// Print the modal a click on the N-th calendar event opens.
    EventModal(ModalArgs),
    /// Print the modal the N-th news card's "Read More" button opens.
    NewsModal(ModalArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct RenderArgs {
    /// HTML page to fill. Containers are detected by element id.
    #[arg(long, value_name = "HTML", conflicts_with = "page", required_unless_present = "page")]
    pub template: Option<PathBuf>,

    /// Use a minimal built-in page for one dataset instead of a template.
    #[arg(long, value_enum)]
    pub page: Option<Dataset>,

    /// Write the page here instead of stdout.
    #[arg(long, short)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Parser, Clone)]
pub struct OutputArgs {
    /// Write here instead of stdout.
    #[arg(long, short)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Parser, Clone)]
pub struct ModalArgs {
    /// Zero-based row index in the data file.
    #[arg(long, short, default_value_t = 0)]
    pub index: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_needs_a_template_or_page() {
        assert!(Cli::try_parse_from(["site", "render"]).is_err());
        assert!(Cli::try_parse_from(["site", "render", "--page", "news", "--template", "x.html"]).is_err());

        let cli = Cli::try_parse_from(["site", "render", "--page", "events", "--base-url", "http://h/p/"]).unwrap();
        match cli.command {
            Command::Render(args) => assert_eq!(args.page, Some(Dataset::Events)),
            other => panic!("unexpected command {other:?}"),
        }
        assert_eq!(cli.base_url.as_deref(), Some("http://h/p/"));
    }

    #[test]
    fn modal_index_defaults_to_first_row() {
        let cli = Cli::try_parse_from(["site", "news-modal"]).unwrap();
        match cli.command {
            Command::NewsModal(args) => assert_eq!(args.index, 0),
            other => panic!("unexpected command {other:?}"),
        }
    }
}
