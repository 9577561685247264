//! The page view-model: the only place rendered markup meets the document.
//!
//! A `Page` is built from an HTML template parsed with `scraper`. Named
//! elements are found by id (the same probe the site scripts use to decide
//! what to load), changes are recorded against them, and [`Page::to_html`]
//! writes the document back out with every change applied.

pub mod dom;

use std::collections::BTreeMap;

use scraper::{ElementRef, Html};

use crate::calendar::CalendarConfig;
use crate::data::Dataset;
use crate::error::AppError;
use crate::render::{ERROR_BANNER, escape_html};

use self::dom::Edit;

pub const CALENDAR_ID: &str = "calendar";
pub const CALENDAR_CONFIG_ID: &str = "calendarConfig";
pub const NEWS_MODAL_TITLE_ID: &str = "newsModalTitle";
pub const NEWS_MODAL_BODY_ID: &str = "newsModalBody";
pub const EVENT_MODAL_ID: &str = "eventModal";
pub const EVENT_MODAL_TITLE_ID: &str = "eventModalTitle";
pub const EVENT_MODAL_BODY_ID: &str = "eventModalBody";

/// Title and body a modal shows when opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalContent {
    /// Plain text; escaped when written into the page.
    pub title: String,
    /// Markup for the modal body.
    pub body_html: String,
}

#[derive(Debug, Clone)]
struct Container {
    element: usize,
    children: Option<Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct Page {
    document: Html,
    /// Present data containers and, once rendered, their children.
    containers: BTreeMap<Dataset, Container>,
    /// Changes to other elements, keyed by document position.
    edits: BTreeMap<usize, Edit>,
    calendar_json: Option<String>,
}

impl Page {
    pub fn from_html(template: impl AsRef<str>) -> Self {
        let document = Html::parse_document(template.as_ref());
        let containers = Dataset::ALL
            .into_iter()
            .filter_map(|dataset| {
                let element = dom::position_of_id(&document, dataset.container_id())?;
                Some((dataset, Container { element, children: None }))
            })
            .collect();
        Self {
            document,
            containers,
            edits: BTreeMap::new(),
            calendar_json: None,
        }
    }

    /// A minimal page carrying the container (and modals) for one dataset.
    pub fn shell(dataset: Dataset) -> Self {
        Self::from_html(shell_template(dataset))
    }

    /// The parsed template. Recorded changes are not reflected here.
    pub fn document(&self) -> &Html {
        &self.document
    }

    pub fn has_element(&self, id: &str) -> bool {
        dom::position_of_id(&self.document, id).is_some()
    }

    /// Template elements matching `css`, with their document positions.
    pub fn select(&self, css: &str) -> Vec<(usize, ElementRef<'_>)> {
        dom::select(&self.document, css)
    }

    /// Datasets whose container exists on this page, in load order.
    pub fn datasets(&self) -> Vec<Dataset> {
        self.containers.keys().copied().collect()
    }

    pub fn has_container(&self, dataset: Dataset) -> bool {
        self.containers.contains_key(&dataset)
    }

    /// Rendered children of a container; `None` if absent or never rendered.
    pub fn children(&self, dataset: Dataset) -> Option<&[String]> {
        self.containers.get(&dataset)?.children.as_deref()
    }

    /// Clear the container, then append `fragments` in order.
    /// Returns `false` when the page has no such container.
    pub fn replace_children(&mut self, dataset: Dataset, fragments: Vec<String>) -> bool {
        match self.containers.get_mut(&dataset) {
            Some(container) => {
                container.children = Some(fragments);
                true
            }
            None => false,
        }
    }

    /// Overwrite every present data container with the shared error banner.
    pub fn show_data_error(&mut self) {
        for container in self.containers.values_mut() {
            container.children = Some(vec![ERROR_BANNER.to_string()]);
        }
    }

    pub fn set_text(&mut self, id: &str, text: &str) -> bool {
        self.set_inner_html(id, escape_html(text))
    }

    pub fn set_inner_html(&mut self, id: &str, html: impl Into<String>) -> bool {
        match dom::position_of_id(&self.document, id) {
            Some(element) => {
                self.set_inner_html_at(element, html);
                true
            }
            None => false,
        }
    }

    pub fn set_inner_html_at(&mut self, element: usize, html: impl Into<String>) {
        self.edits.entry(element).or_default().inner = Some(html.into());
    }

    pub fn set_attribute_at(&mut self, element: usize, name: &str, value: impl Into<String>) {
        self.edits
            .entry(element)
            .or_default()
            .attrs
            .insert(name.to_string(), value.into());
    }

    pub fn inner_html(&self, id: &str) -> Option<&str> {
        let element = dom::position_of_id(&self.document, id)?;
        self.edits.get(&element)?.inner.as_deref()
    }

    /// Fill a modal's title and body regions.
    pub fn fill_modal(&mut self, title_id: &str, body_id: &str, content: &ModalContent) -> bool {
        let title = self.set_text(title_id, &content.title);
        let body = self.set_inner_html(body_id, content.body_html.clone());
        title && body
    }

    /// Embed the calendar widget configuration for the page's calendar element.
    pub fn attach_calendar(&mut self, config: &CalendarConfig) -> Result<(), AppError> {
        let json = serde_json::to_string(config)
            .map_err(|e| AppError::usage(format!("Failed to serialize calendar config: {e}")))?;
        self.calendar_json = Some(json);
        Ok(())
    }

    pub fn calendar_json(&self) -> Option<&str> {
        self.calendar_json.as_deref()
    }

    /// The document with every recorded change applied.
    pub fn to_html(&self) -> String {
        let mut edits = self.edits.clone();
        for container in self.containers.values() {
            if let Some(children) = &container.children {
                edits.entry(container.element).or_default().inner = Some(format!("\n{}\n", children.join("\n")));
            }
        }

        let script = self.calendar_json.as_deref().map(|json| {
            format!(
                "<script type=\"application/json\" id=\"{CALENDAR_CONFIG_ID}\">{}</script>\n",
                json_for_script_tag(json)
            )
        });
        dom::render(&self.document, &edits, script.as_deref())
    }
}

/// Keep embedded JSON from closing or commenting out its script element.
fn json_for_script_tag(value: &str) -> String {
    value.replace('<', "\\u003c")
}

fn shell_template(dataset: Dataset) -> String {
    let extra = match dataset {
        Dataset::Programs => String::new(),
        Dataset::Events => format!(
            r#"<div id="{CALENDAR_ID}"></div>
<div class="modal fade" id="{EVENT_MODAL_ID}" tabindex="-1">
  <div class="modal-dialog"><div class="modal-content">
    <div class="modal-header"><h5 class="modal-title" id="{EVENT_MODAL_TITLE_ID}"></h5></div>
    <div class="modal-body" id="{EVENT_MODAL_BODY_ID}"></div>
  </div></div>
</div>
"#
        ),
        Dataset::News => format!(
            r#"<div class="modal fade" id="newsModal" tabindex="-1">
  <div class="modal-dialog modal-lg"><div class="modal-content">
    <div class="modal-header"><h5 class="modal-title" id="{NEWS_MODAL_TITLE_ID}"></h5></div>
    <div class="modal-body" id="{NEWS_MODAL_BODY_ID}"></div>
  </div></div>
</div>
"#
        ),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8"/>
  <title>{name}</title>
</head>
<body>
<div class="container py-5">
  <div class="row g-4" id="{container}"></div>
</div>
{extra}</body>
</html>
"#,
        name = dataset.name(),
        container = dataset.container_id(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_containers_in_template() {
        let page = Page::from_html(r#"<div id="newsContainer"></div><div id="eventsContainer"></div>"#);
        assert_eq!(page.datasets(), vec![Dataset::Events, Dataset::News]);
        assert!(!page.has_container(Dataset::Programs));
    }

    #[test]
    fn container_lookup_accepts_any_attribute_syntax() {
        assert_eq!(Page::from_html("<div class=row id=newsContainer></div>").datasets(), vec![Dataset::News]);
        assert_eq!(Page::from_html(r#"<div id = "newsContainer"></div>"#).datasets(), vec![Dataset::News]);
    }

    #[test]
    fn commented_containers_are_not_loaded_or_written() {
        let mut page = Page::from_html(
            r#"<!-- <div id="programsContainer"></div> --><div id="newsContainer"></div>"#,
        );
        assert_eq!(page.datasets(), vec![Dataset::News]);

        page.show_data_error();
        let html = page.to_html();
        assert_eq!(html.matches("alert alert-danger").count(), 1);
        assert!(html.contains(r#"<!-- <div id="programsContainer"></div> -->"#));
    }

    #[test]
    fn replace_children_only_touches_present_containers() {
        let mut page = Page::shell(Dataset::Programs);
        assert!(page.replace_children(Dataset::Programs, vec!["<p>a</p>".into(), "<p>b</p>".into()]));
        assert!(!page.replace_children(Dataset::News, vec!["<p>n</p>".into()]));
        assert_eq!(page.children(Dataset::Programs).unwrap().len(), 2);

        let html = page.to_html();
        assert!(html.contains("<p>a</p>\n<p>b</p>"));
        assert!(!html.contains("<p>n</p>"));
    }

    #[test]
    fn error_banner_overwrites_every_container() {
        let mut page = Page::from_html(
            r#"<div id="programsContainer"><p>old</p></div><div id="newsContainer"></div>"#,
        );
        page.replace_children(Dataset::News, vec!["<p>fresh</p>".into()]);
        page.show_data_error();

        for dataset in [Dataset::Programs, Dataset::News] {
            assert_eq!(page.children(dataset).unwrap(), [ERROR_BANNER.to_string()]);
        }
        let html = page.to_html();
        assert_eq!(html.matches("alert alert-danger").count(), 2);
        assert!(!html.contains("<p>old</p>"));
    }

    #[test]
    fn modal_regions_escape_titles() {
        let mut page = Page::shell(Dataset::News);
        let content = ModalContent {
            title: "A & B".into(),
            body_html: "<p>body</p>".into(),
        };
        assert!(page.fill_modal(NEWS_MODAL_TITLE_ID, NEWS_MODAL_BODY_ID, &content));
        assert_eq!(page.inner_html(NEWS_MODAL_TITLE_ID), Some("A &amp; B"));
        assert!(!page.set_text(EVENT_MODAL_TITLE_ID, "missing"));
        assert!(page.to_html().contains(r#"id="newsModalBody"><p>body</p></div>"#));
    }

    #[test]
    fn calendar_config_lands_before_body_close() {
        let mut page = Page::shell(Dataset::Events);
        page.attach_calendar(&CalendarConfig::month_view(Vec::new())).unwrap();
        let html = page.to_html();
        let script = html.find(r#"id="calendarConfig""#).unwrap();
        assert!(script < html.find("</body>").unwrap());
        assert!(html.contains("dayGridMonth"));
    }

    #[test]
    fn calendar_json_cannot_break_out_of_its_script() {
        let mut page = Page::shell(Dataset::Events);
        let event = crate::calendar::CalendarEvent {
            title: "</script><!-- gala".into(),
            start: "2024-03-15T09:00".into(),
            end: "2024-03-15T10:00".into(),
            description: String::new(),
            location: String::new(),
        };
        page.attach_calendar(&CalendarConfig::month_view(vec![event])).unwrap();
        let html = page.to_html();

        let open = html.find(r#"id="calendarConfig">"#).unwrap();
        let close = open + html[open..].find("</script>").unwrap();
        let json = &html[open + r#"id="calendarConfig">"#.len()..close];
        assert!(!json.contains('<'));
        assert!(json.contains(r"\u003c/script>\u003c!-- gala"));
        let value: serde_json::Value = serde_json::from_str(json).unwrap();
        assert_eq!(value["events"][0]["title"], "</script><!-- gala");
    }
}
