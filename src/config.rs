//! Site configuration: where the data files live and how assets are referenced.
//!
//! Values come from the environment (a `.env` file is honoured) and can be
//! overridden from the command line.

use reqwest::Url;

use crate::error::AppError;

pub const DEFAULT_PROGRAMS_CSV: &str = "../data/programs.csv";
pub const DEFAULT_EVENTS_CSV: &str = "../data/events.csv";
pub const DEFAULT_NEWS_CSV: &str = "../data/news.csv";
pub const DEFAULT_IMAGES_DIR: &str = "assets/images";

#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// URL of the page the data paths are relative to.
    pub base_url: Url,
    pub images_dir: String,
    pub programs_csv: String,
    pub events_csv: String,
    pub news_csv: String,
}

/// Command-line overrides; `None` keeps the environment value.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub images_dir: Option<String>,
}

impl SiteConfig {
    /// Build a config with default data paths for the page at `base_url`.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            images_dir: DEFAULT_IMAGES_DIR.to_string(),
            programs_csv: DEFAULT_PROGRAMS_CSV.to_string(),
            events_csv: DEFAULT_EVENTS_CSV.to_string(),
            news_csv: DEFAULT_NEWS_CSV.to_string(),
        }
    }

    pub fn from_env(overrides: &ConfigOverrides) -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let raw_base = match &overrides.base_url {
            Some(url) => url.clone(),
            None => std::env::var("SITE_BASE_URL").map_err(|_| {
                AppError::usage("Missing SITE_BASE_URL in environment (.env) and no --base-url given.")
            })?,
        };
        let base_url = parse_base_url(&raw_base)?;

        let mut config = Self::new(base_url);
        if let Some(dir) = overrides.images_dir.clone().or_else(|| env_nonempty("SITE_IMAGES_DIR")) {
            config.images_dir = dir;
        }
        if let Some(path) = env_nonempty("SITE_PROGRAMS_CSV") {
            config.programs_csv = path;
        }
        if let Some(path) = env_nonempty("SITE_EVENTS_CSV") {
            config.events_csv = path;
        }
        if let Some(path) = env_nonempty("SITE_NEWS_CSV") {
            config.news_csv = path;
        }
        Ok(config)
    }

    /// Public path of an image file referenced from a data row.
    pub fn image_path(&self, file_name: &str) -> String {
        let dir = self.images_dir.trim_end_matches('/');
        if dir.is_empty() {
            file_name.to_string()
        } else {
            format!("{dir}/{file_name}")
        }
    }
}

/// Parse the page URL. A URL without a trailing slash names a page, so
/// relative data paths resolve against its directory, exactly as a browser would.
pub fn parse_base_url(raw: &str) -> Result<Url, AppError> {
    Url::parse(raw.trim()).map_err(|e| AppError::usage(format!("Invalid base URL '{raw}': {e}")))
}

fn env_nonempty(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
