//! Records that flow from the CSV data files into the renderers.
//!
//! None of these carry identity: a record is fetched, parsed, rendered once,
//! and dropped.

use serde::Serialize;

/// One parsed CSV row, keyed by header name in header order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CsvRow {
    fields: Vec<(String, String)>,
}

impl CsvRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, header: impl Into<String>, value: impl Into<String>) {
        self.fields.push((header.into(), value.into()));
    }

    /// Value under `header`, or an empty string when the column is absent.
    pub fn get(&self, header: &str) -> &str {
        self.fields
            .iter()
            .find(|(h, _)| h == header)
            .map(|(_, v)| v.as_str())
            .unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CsvRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = CsvRow::new();
        for (k, v) in iter {
            row.push(k, v);
        }
        row
    }
}

/// Program level as written in `programs.csv`.
///
/// Unknown values are kept verbatim and displayed as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ProgramLevel {
    Undergraduate,
    Graduate,
    Phd,
    Certificate,
    Other(String),
}

impl ProgramLevel {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "undergraduate" => ProgramLevel::Undergraduate,
            "graduate" => ProgramLevel::Graduate,
            "phd" => ProgramLevel::Phd,
            "certificate" => ProgramLevel::Certificate,
            other => ProgramLevel::Other(other.to_string()),
        }
    }

    /// Raw CSV value (used for the `data-program-type` filter attribute).
    pub fn as_str(&self) -> &str {
        match self {
            ProgramLevel::Undergraduate => "undergraduate",
            ProgramLevel::Graduate => "graduate",
            ProgramLevel::Phd => "phd",
            ProgramLevel::Certificate => "certificate",
            ProgramLevel::Other(raw) => raw,
        }
    }

    /// Card header title.
    pub fn title(&self) -> &str {
        match self {
            ProgramLevel::Undergraduate => "Bachelor of Science",
            ProgramLevel::Graduate => "Master of Science",
            ProgramLevel::Phd => "PhD",
            ProgramLevel::Certificate => "Certificate",
            ProgramLevel::Other(raw) => raw,
        }
    }
}

/// News category as written in `news.csv`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum NewsKind {
    Announcement,
    Research,
    Award,
    Student,
    Other(String),
}

impl NewsKind {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "announcement" => NewsKind::Announcement,
            "research" => NewsKind::Research,
            "award" => NewsKind::Award,
            "student" => NewsKind::Student,
            other => NewsKind::Other(other.to_string()),
        }
    }

    /// Recognise a value coming back from a rendered trigger, which carries
    /// the display label rather than the CSV value. Case-insensitive.
    pub fn from_label(label: &str) -> Self {
        let lowered = label.trim().to_lowercase();
        match lowered.as_str() {
            "student news" => NewsKind::Student,
            _ => match NewsKind::parse(&lowered) {
                NewsKind::Other(_) => NewsKind::Other(label.to_string()),
                known => known,
            },
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            NewsKind::Announcement => "announcement",
            NewsKind::Research => "research",
            NewsKind::Award => "award",
            NewsKind::Student => "student",
            NewsKind::Other(raw) => raw,
        }
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            NewsKind::Announcement => "bg-warning text-dark",
            NewsKind::Research => "bg-primary",
            NewsKind::Award => "bg-success",
            NewsKind::Student => "bg-info",
            NewsKind::Other(_) => "bg-secondary",
        }
    }

    pub fn label(&self) -> &str {
        match self {
            NewsKind::Announcement => "Announcement",
            NewsKind::Research => "Research",
            NewsKind::Award => "Award",
            NewsKind::Student => "Student News",
            NewsKind::Other(raw) => raw,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Program {
    pub name: String,
    pub level: ProgramLevel,
    pub description: String,
    pub duration: String,
    pub credits: String,
    pub admission: String,
}

impl Program {
    pub fn from_row(row: &CsvRow) -> Self {
        Self {
            name: row.get("name").to_string(),
            level: ProgramLevel::parse(row.get("level")),
            description: row.get("description").to_string(),
            duration: row.get("duration").to_string(),
            credits: row.get("credits").to_string(),
            admission: row.get("admission").to_string(),
        }
    }
}

/// A scheduled event. Dates and times stay textual (`YYYY-MM-DD`, `HH:MM`);
/// they are interpreted only where they are displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    pub title: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub location: String,
    pub description: String,
}

impl Event {
    pub fn from_row(row: &CsvRow) -> Self {
        Self {
            title: row.get("title").to_string(),
            date: row.get("date").to_string(),
            start_time: row.get("start_time").to_string(),
            end_time: row.get("end_time").to_string(),
            location: row.get("location").to_string(),
            description: row.get("description").to_string(),
        }
    }

    /// `{date}T{start_time}`, the local timestamp the event starts at.
    pub fn start_stamp(&self) -> String {
        format!("{}T{}", self.date, self.start_time)
    }

    pub fn end_stamp(&self) -> String {
        format!("{}T{}", self.date, self.end_time)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewsItem {
    pub title: String,
    pub date: String,
    pub kind: NewsKind,
    /// File name under the site image directory.
    pub image: String,
    pub content: String,
}

impl NewsItem {
    pub fn from_row(row: &CsvRow) -> Self {
        Self {
            title: row.get("title").to_string(),
            date: row.get("date").to_string(),
            kind: NewsKind::parse(row.get("type")),
            image: row.get("image").to_string(),
            content: row.get("content").to_string(),
        }
    }
}
