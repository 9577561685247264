//! CSV loader: one HTTP GET per data file, parsed into header-keyed rows.
//!
//! There is exactly one attempt per resource. No retries, no timeout, and no
//! caching; whatever the server says on that one request is final.

use reqwest::StatusCode;
use reqwest::Url;
use reqwest::blocking::Client;
use tracing::{debug, error};

use crate::config::SiteConfig;
use crate::domain::CsvRow;
use crate::error::{AppError, LoadError};

pub struct DataClient {
    client: Client,
    base_url: Url,
}

impl DataClient {
    pub fn new(config: &SiteConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(None::<std::time::Duration>)
            .build()
            .map_err(|e| AppError::usage(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// Resolve a data path the way the page would: relative to its own URL.
    pub fn resolve(&self, path: &str) -> Result<Url, LoadError> {
        self.base_url
            .join(path)
            .map_err(|e| LoadError::Transport(format!("cannot resolve '{path}': {e}")))
    }

    /// GET `path` and return the raw body. Only status `200` counts as success.
    pub fn fetch_bytes(&self, path: &str) -> Result<Vec<u8>, LoadError> {
        let url = self.resolve(path)?;
        debug!(%url, "requesting data file");

        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| LoadError::Transport(e.to_string()))?;

        let status = resp.status();
        if status != StatusCode::OK {
            return Err(LoadError::Status(
                status.as_u16(),
                status.canonical_reason().unwrap_or_default().to_string(),
            ));
        }

        let body = resp.bytes().map_err(|e| LoadError::Transport(e.to_string()))?;
        Ok(body.to_vec())
    }

    pub fn fetch_rows(&self, path: &str) -> Result<Vec<CsvRow>, LoadError> {
        let body = self.fetch_bytes(path)?;
        parse_csv(&body)
    }

    /// Fetch and parse `path`, then hand the rows to `on_rows`.
    ///
    /// On any failure the error is logged and `on_error` runs instead;
    /// exactly one of the two callbacks is invoked and its result returned.
    pub fn load_csv<T, F, E>(&self, path: &str, on_rows: F, on_error: E) -> T
    where
        F: FnOnce(Vec<CsvRow>) -> T,
        E: FnOnce(&LoadError) -> T,
    {
        match self.fetch_rows(path) {
            Ok(rows) => on_rows(rows),
            Err(err) => {
                error!(path, %err, "error loading CSV file");
                on_error(&err)
            }
        }
    }
}

/// Parse a CSV body with a header row. Blank lines are skipped and short rows
/// read their missing trailing columns as empty.
pub fn parse_csv(body: &[u8]) -> Result<Vec<CsvRow>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(body);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| LoadError::Parse(format!("header row: {e}")))?
        .iter()
        .map(normalize_header_name)
        .collect();

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result.map_err(|e| LoadError::Parse(format!("record {}: {e}", idx + 1)))?;

        if record.len() <= 1 && record.get(0).is_none_or(|v| v.trim().is_empty()) {
            continue;
        }

        let row: CsvRow = headers
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), record.get(i).unwrap_or("").to_string()))
            .collect();
        rows.push(row);
    }

    Ok(rows)
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports often prefix the first header with a UTF-8 BOM.
    name.trim().trim_start_matches('\u{feff}').to_string()
}
