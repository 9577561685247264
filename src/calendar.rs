//! Calendar widget adapter.
//!
//! Event records are re-shaped into the widget's event schema without
//! touching the records themselves. The widget is configured once per page;
//! clicking an event fills the event modal.

use serde::Serialize;

use crate::domain::Event;
use crate::page::ModalContent;
use crate::render::{escape_html, format_us_date, format_us_time, parse_joined_stamp};

pub const DEFAULT_LOCATION: &str = "TBA";
pub const DEFAULT_DESCRIPTION: &str = "No description available.";

/// One entry in the widget's `events` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarEvent {
    pub title: String,
    /// `{date}T{start_time}`
    pub start: String,
    /// `{date}T{end_time}`
    pub end: String,
    pub description: String,
    pub location: String,
}

impl CalendarEvent {
    pub fn from_event(event: &Event) -> Self {
        Self {
            title: event.title.clone(),
            start: event.start_stamp(),
            end: event.end_stamp(),
            description: event.description.clone(),
            location: event.location.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderToolbar {
    pub left: String,
    pub center: String,
    pub right: String,
}

/// Constructor options handed to the widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarConfig {
    pub initial_view: String,
    pub header_toolbar: HeaderToolbar,
    pub events: Vec<CalendarEvent>,
}

impl CalendarConfig {
    /// Month grid with month/week/day switches in the toolbar.
    pub fn month_view(events: Vec<CalendarEvent>) -> Self {
        Self {
            initial_view: "dayGridMonth".to_string(),
            header_toolbar: HeaderToolbar {
                left: "prev,next today".to_string(),
                center: "title".to_string(),
                right: "dayGridMonth,timeGridWeek,timeGridDay".to_string(),
            },
            events,
        }
    }

    pub fn from_events(events: &[Event]) -> Self {
        Self::month_view(events.iter().map(CalendarEvent::from_event).collect())
    }
}

/// Modal content for a clicked calendar event.
pub fn event_click(event: &CalendarEvent) -> ModalContent {
    let start = parse_joined_stamp(&event.start);
    let end = parse_joined_stamp(&event.end);

    let date = start.as_ref().map(format_us_date).unwrap_or_default();
    let time = match (&start, &end) {
        (Some(s), Some(e)) => format!("{} - {}", format_us_time(s), format_us_time(e)),
        (Some(s), None) => format_us_time(s),
        _ => String::new(),
    };

    let location = non_empty_or(&event.location, DEFAULT_LOCATION);
    let description = non_empty_or(&event.description, DEFAULT_DESCRIPTION);

    let body_html = format!(
        r#"<p><strong>Date:</strong> {date}</p>
<p><strong>Time:</strong> {time}</p>
<p><strong>Location:</strong> {location}</p>
<p><strong>Description:</strong> {description}</p>"#,
        date = escape_html(&date),
        time = escape_html(&time),
        location = escape_html(location),
        description = escape_html(description),
    );

    ModalContent {
        title: event.title.clone(),
        body_html,
    }
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() { fallback } else { value }
}
