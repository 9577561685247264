//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and sets up logging
//! - resolves the site configuration
//! - runs the page build pipeline
//! - writes pages, widget configs and modal previews

use std::path::Path;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::calendar::{CalendarConfig, CalendarEvent, event_click};
use crate::cli::{Command, ModalArgs, OutputArgs, RenderArgs};
use crate::config::SiteConfig;
use crate::data::DataClient;
use crate::error::{AppError, EXIT_LOAD};
use crate::modal::{ElementAttrs, NewsModal};
use crate::page::{ModalContent, Page};
use crate::render::render_news_card;

pub mod pipeline;

/// Entry point for the `site` binary.
pub fn run() -> Result<(), AppError> {
    // `site --page news` behaves like `site render --page news`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);
    init_logging();

    let config = SiteConfig::from_env(&cli.overrides())?;
    let client = DataClient::new(&config)?;

    match cli.command {
        Command::Render(args) => handle_render(&args, &client, &config),
        Command::Calendar(args) => handle_calendar(&args, &client, &config),
        Command::EventModal(args) => handle_event_modal(&args, &client, &config),
        Command::NewsModal(args) => handle_news_modal(&args, &client, &config),
    }
}

/// Log to stderr so stdout stays clean for page/JSON output.
/// `SITE_LOG` takes precedence over `RUST_LOG`; the default level is `info`.
fn init_logging() {
    let filter = EnvFilter::try_from_env("SITE_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn handle_render(args: &RenderArgs, client: &DataClient, config: &SiteConfig) -> Result<(), AppError> {
    let mut page = match (&args.template, args.page) {
        (Some(path), _) => {
            let html = std::fs::read_to_string(path)
                .map_err(|e| AppError::usage(format!("Failed to read template '{}': {e}", path.display())))?;
            Page::from_html(html)
        }
        (None, Some(dataset)) => Page::shell(dataset),
        (None, None) => return Err(AppError::usage("Pass either --template or --page.")),
    };

    let report = pipeline::populate(&mut page, client, config)?;
    write_output(args.out.as_deref(), &page.to_html())?;
    eprint!("{}", crate::report::format_page_report(&report));

    let failed = report.failures().count();
    if failed > 0 {
        return Err(AppError::new(
            EXIT_LOAD,
            format!("{failed} data file(s) failed to load; the page shows the error banner."),
        ));
    }
    Ok(())
}

fn handle_calendar(args: &OutputArgs, client: &DataClient, config: &SiteConfig) -> Result<(), AppError> {
    let events = pipeline::load_events(client, config)?;
    let calendar = CalendarConfig::from_events(&events);
    let json = serde_json::to_string_pretty(&calendar)
        .map_err(|e| AppError::usage(format!("Failed to serialize calendar config: {e}")))?;
    write_output(args.out.as_deref(), &format!("{json}\n"))
}

fn handle_event_modal(args: &ModalArgs, client: &DataClient, config: &SiteConfig) -> Result<(), AppError> {
    let events = pipeline::load_events(client, config)?;
    let event = events
        .get(args.index)
        .ok_or_else(|| out_of_range("event", args.index, events.len()))?;
    let modal = event_click(&CalendarEvent::from_event(event));
    print_modal(&modal);
    Ok(())
}

fn handle_news_modal(args: &ModalArgs, client: &DataClient, config: &SiteConfig) -> Result<(), AppError> {
    let items = pipeline::load_news(client, config)?;
    let item = items
        .get(args.index)
        .ok_or_else(|| out_of_range("news item", args.index, items.len()))?;

    // Go through the rendered button so the modal sees exactly what a click would.
    let card = render_news_card(item, args.index, config);
    let trigger = ElementAttrs::find_modal_trigger(&card)
        .ok_or_else(|| AppError::usage("Rendered news card has no modal trigger."))?;
    print_modal(&NewsModal::on_show(&trigger));
    Ok(())
}

fn out_of_range(what: &str, index: usize, len: usize) -> AppError {
    AppError::usage(format!("No {what} at index {index} (the data file has {len} rows)."))
}

fn print_modal(modal: &ModalContent) {
    println!("{}\n", modal.title);
    println!("{}", modal.body_html);
}

fn write_output(path: Option<&Path>, text: &str) -> Result<(), AppError> {
    match path {
        Some(path) => std::fs::write(path, text)
            .map_err(|e| AppError::usage(format!("Failed to write '{}': {e}", path.display()))),
        None => {
            print!("{text}");
            Ok(())
        }
    }
}

/// Rewrite argv so bare flags default to `site render`.
///
/// Rules:
/// - `site --page news ...`      -> `site render --page news ...`
/// - `site --help/--version/-h`  -> unchanged (show top-level help/version)
/// - `site <subcommand> ...`     -> unchanged
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "render" | "calendar" | "event-modal" | "news-modal");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "render flags".
    if arg1.starts_with('-') {
        argv.insert(1, "render".to_string());
    }
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_flags_become_render() {
        assert_eq!(
            rewrite_args(argv(&["site", "--page", "news"])),
            argv(&["site", "render", "--page", "news"])
        );
    }

    #[test]
    fn subcommands_and_help_are_untouched() {
        for args in [
            vec!["site"],
            vec!["site", "--help"],
            vec!["site", "calendar", "--out", "c.json"],
            vec!["site", "news-modal", "-i", "2"],
        ] {
            assert_eq!(rewrite_args(argv(&args)), argv(&args));
        }
    }
}
