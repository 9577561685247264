//! Shared "page build" logic used by every command.
//!
//! probe containers -> fetch data files (one GET each, in parallel) ->
//! render cards in a fixed order -> error banner on any failure ->
//! calendar widget config / news modal wiring -> page chrome bindings.

use rayon::prelude::*;
use tracing::info;

use crate::calendar::CalendarConfig;
use crate::chrome::{Chrome, ChromeBindings};
use crate::config::SiteConfig;
use crate::data::{DataClient, Dataset};
use crate::domain::{CsvRow, Event, NewsItem, Program};
use crate::error::{AppError, LoadError};
use crate::page::{CALENDAR_ID, Page};
use crate::render::{NEWS_MODAL_ID, render_events, render_news, render_programs};

/// What happened to one dataset during a page build.
#[derive(Debug, Clone)]
pub struct DatasetOutcome {
    pub dataset: Dataset,
    /// Number of cards rendered, or why the data never arrived.
    pub result: Result<usize, LoadError>,
}

#[derive(Debug, Clone, Default)]
pub struct PageReport {
    pub outcomes: Vec<DatasetOutcome>,
    /// Events handed to the calendar widget, when the page has one.
    pub calendar_events: Option<usize>,
    /// Whether "Read More" buttons have a news modal to open.
    pub news_modal_bound: bool,
    /// Chrome behaviours the page markup binds.
    pub chrome: ChromeBindings,
}

impl PageReport {
    pub fn failures(&self) -> impl Iterator<Item = &DatasetOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }
}

/// Fetch every data file the page has a container for.
pub fn fetch_datasets(
    client: &DataClient,
    config: &SiteConfig,
    datasets: &[Dataset],
) -> Vec<(Dataset, Result<Vec<CsvRow>, LoadError>)> {
    datasets
        .par_iter()
        .map(|&dataset| {
            let rows = client.load_csv(dataset.path(config), Ok, |err| Err(err.clone()));
            (dataset, rows)
        })
        .collect()
}

/// Load and render everything `page` asks for.
pub fn populate(page: &mut Page, client: &DataClient, config: &SiteConfig) -> Result<PageReport, AppError> {
    let datasets = page.datasets();
    let fetched = fetch_datasets(client, config, &datasets);
    let mut report = apply(page, config, fetched)?;
    report.chrome = Chrome::from_page(page).bindings();
    Ok(report)
}

/// Render fetched rows into `page`.
///
/// Successful datasets render first; if any dataset failed, every container
/// on the page then shows the shared error banner.
pub fn apply(
    page: &mut Page,
    config: &SiteConfig,
    mut fetched: Vec<(Dataset, Result<Vec<CsvRow>, LoadError>)>,
) -> Result<PageReport, AppError> {
    fetched.sort_by_key(|(dataset, _)| *dataset);

    let mut report = PageReport::default();
    for (dataset, rows) in fetched {
        let result = match rows {
            Ok(rows) => {
                let count = render_dataset(page, config, dataset, &rows, &mut report)?;
                info!(dataset = dataset.name(), cards = count, "rendered");
                Ok(count)
            }
            Err(err) => Err(err),
        };
        report.outcomes.push(DatasetOutcome { dataset, result });
    }

    if report.has_failures() {
        page.show_data_error();
    }
    Ok(report)
}

fn render_dataset(
    page: &mut Page,
    config: &SiteConfig,
    dataset: Dataset,
    rows: &[CsvRow],
    report: &mut PageReport,
) -> Result<usize, AppError> {
    let fragments = match dataset {
        Dataset::Programs => {
            let programs: Vec<Program> = rows.iter().map(Program::from_row).collect();
            render_programs(&programs)
        }
        Dataset::Events => {
            let events: Vec<Event> = rows.iter().map(Event::from_row).collect();
            if page.has_element(CALENDAR_ID) {
                page.attach_calendar(&CalendarConfig::from_events(&events))?;
                report.calendar_events = Some(events.len());
            }
            render_events(&events)
        }
        Dataset::News => {
            let items: Vec<NewsItem> = rows.iter().map(NewsItem::from_row).collect();
            report.news_modal_bound = page.has_element(NEWS_MODAL_ID);
            render_news(&items, config)
        }
    };

    let count = fragments.len();
    page.replace_children(dataset, fragments);
    Ok(count)
}

/// Fetch one dataset on its own (modal and calendar commands).
pub fn fetch_rows(client: &DataClient, config: &SiteConfig, dataset: Dataset) -> Result<Vec<CsvRow>, AppError> {
    let rows: Result<Vec<CsvRow>, LoadError> = client.load_csv(dataset.path(config), Ok, |err| Err(err.clone()));
    rows.map_err(AppError::from)
}

pub fn load_events(client: &DataClient, config: &SiteConfig) -> Result<Vec<Event>, AppError> {
    let rows = fetch_rows(client, config, Dataset::Events)?;
    Ok(rows.iter().map(Event::from_row).collect())
}

pub fn load_news(client: &DataClient, config: &SiteConfig) -> Result<Vec<NewsItem>, AppError> {
    let rows = fetch_rows(client, config, Dataset::News)?;
    Ok(rows.iter().map(NewsItem::from_row).collect())
}
