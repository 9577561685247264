//! Data files behind the site pages.
//!
//! Each page shows at most one dataset; the dataset a page wants is detected
//! from which container element the page carries.

pub mod loader;

pub use loader::{DataClient, parse_csv};

use clap::ValueEnum;

use crate::config::SiteConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum)]
pub enum Dataset {
    Programs,
    Events,
    News,
}

impl Dataset {
    pub const ALL: [Dataset; 3] = [Dataset::Programs, Dataset::Events, Dataset::News];

    /// Element id of the container the dataset renders into.
    pub fn container_id(self) -> &'static str {
        match self {
            Dataset::Programs => "programsContainer",
            Dataset::Events => "eventsContainer",
            Dataset::News => "newsContainer",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Dataset::Programs => "programs",
            Dataset::Events => "events",
            Dataset::News => "news",
        }
    }

    /// Data file path, relative to the page URL.
    pub fn path(self, config: &SiteConfig) -> &str {
        match self {
            Dataset::Programs => &config.programs_csv,
            Dataset::Events => &config.events_csv,
            Dataset::News => &config.news_csv,
        }
    }
}
