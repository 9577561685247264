//! Card markup for the programs, events, and news pages.

use crate::config::SiteConfig;
use crate::domain::{Event, NewsItem, Program};

use super::escape_html as esc;
use super::format::{date_badge, format_long_date, format_time, stagger_class, truncate_text};

/// Programs and events stagger their first three cards, news its first four.
pub const PROGRAM_STAGGER: usize = 3;
pub const EVENT_STAGGER: usize = 3;
pub const NEWS_STAGGER: usize = 4;

/// Characters of news content shown on a card before the "Read More" modal.
pub const NEWS_EXCERPT_CHARS: usize = 120;

/// Id of the modal the news "Read More" buttons open.
pub const NEWS_MODAL_ID: &str = "newsModal";

/// Shown in place of every data container when a data file fails to load.
pub const ERROR_BANNER: &str = r#"<div class="col-12">
    <div class="alert alert-danger">
        <i class="fas fa-exclamation-triangle me-2"></i>
        We're having trouble loading the data. Please try refreshing the page or check back later.
    </div>
</div>"#;

fn card_classes(base: &str, index: usize, stagger: usize) -> String {
    match stagger_class(index, stagger) {
        Some(delay) => format!("{base} animate__animated animate__fadeInUp {delay}"),
        None => format!("{base} animate__animated animate__fadeInUp"),
    }
}

pub fn render_program_card(program: &Program, index: usize) -> String {
    format!(
        r##"<div class="{classes}" data-program-type="{level}">
    <div class="card h-100 shadow-sm program-card">
        <div class="card-header bg-primary text-white">
            <h4 class="my-0">{title}</h4>
        </div>
        <div class="card-body">
            <h5 class="card-title">{name}</h5>
            <p class="card-text">{description}</p>
            <ul class="list-unstyled">
                <li><i class="fas fa-clock me-2 text-primary"></i> {duration}</li>
                <li><i class="fas fa-graduation-cap me-2 text-primary"></i> {credits}</li>
                <li><i class="fas fa-calendar me-2 text-primary"></i> {admission} admission</li>
            </ul>
        </div>
        <div class="card-footer bg-transparent">
            <a href="#" class="btn btn-primary">Learn More</a>
        </div>
    </div>
</div>"##,
        classes = card_classes("col-lg-4 mb-4", index, PROGRAM_STAGGER),
        level = esc(program.level.as_str()),
        title = esc(program.level.title()),
        name = esc(&program.name),
        description = esc(&program.description),
        duration = esc(&program.duration),
        credits = esc(&program.credits),
        admission = esc(&program.admission),
    )
}

pub fn render_programs(programs: &[Program]) -> Vec<String> {
    programs
        .iter()
        .enumerate()
        .map(|(i, p)| render_program_card(p, i))
        .collect()
}

pub fn render_event_card(event: &Event, index: usize) -> String {
    let (day, month) = match date_badge(&event.date, &event.start_time) {
        Some(badge) => (badge.day.to_string(), badge.month),
        None => (String::new(), ""),
    };

    format!(
        r##"<div class="{classes}">
    <div class="card event-card h-100 shadow">
        <div class="card-header bg-primary text-white">
            <div class="event-date">
                <span class="event-day">{day}</span>
                <span class="event-month">{month}</span>
            </div>
            <h5 class="card-title mb-0">{title}</h5>
        </div>
        <div class="card-body">
            <p class="card-text"><i class="fas fa-clock me-2"></i> {start} - {end}</p>
            <p class="card-text"><i class="fas fa-map-marker-alt me-2"></i> {location}</p>
            <p class="card-text">{description}</p>
        </div>
        <div class="card-footer bg-transparent">
            <a href="#" class="btn btn-primary">Register</a>
            <a href="#" class="btn btn-outline-primary ms-2">Details</a>
        </div>
    </div>
</div>"##,
        classes = card_classes("col-lg-4 col-md-6", index, EVENT_STAGGER),
        title = esc(&event.title),
        start = esc(&format_time(&event.start_time)),
        end = esc(&format_time(&event.end_time)),
        location = esc(&event.location),
        description = esc(&event.description),
    )
}

pub fn render_events(events: &[Event]) -> Vec<String> {
    events
        .iter()
        .enumerate()
        .map(|(i, e)| render_event_card(e, i))
        .collect()
}

pub fn render_news_card(news: &NewsItem, index: usize, config: &SiteConfig) -> String {
    let long_date = format_long_date(&news.date);
    let image = config.image_path(&news.image);
    let label = news.kind.label();

    format!(
        r##"<div class="{classes}" data-news-type="{kind}">
    <div class="card news-card h-100 shadow">
        <div class="row g-0">
            <div class="col-md-4">
                <img src="{image}" class="img-fluid rounded-start h-100" alt="{title}">
            </div>
            <div class="col-md-8">
                <div class="card-body">
                    <div class="d-flex justify-content-between align-items-center mb-2">
                        <span class="badge {badge}">{label}</span>
                        <small class="text-muted">{date}</small>
                    </div>
                    <h5 class="card-title">{title}</h5>
                    <p class="card-text">{excerpt}</p>
                    <a href="#" class="btn btn-outline-primary btn-sm" data-bs-toggle="modal" data-bs-target="#{modal}" data-title="{title}" data-date="{date}" data-type="{label}" data-image="{image}" data-content="{content}">Read More</a>
                </div>
            </div>
        </div>
    </div>
</div>"##,
        classes = card_classes("col-lg-6", index, NEWS_STAGGER),
        kind = esc(news.kind.as_str()),
        image = esc(&image),
        title = esc(&news.title),
        badge = news.kind.badge_class(),
        label = esc(label),
        date = esc(&long_date),
        excerpt = esc(&truncate_text(&news.content, NEWS_EXCERPT_CHARS)),
        modal = NEWS_MODAL_ID,
        content = esc(&news.content),
    )
}

pub fn render_news(items: &[NewsItem], config: &SiteConfig) -> Vec<String> {
    items
        .iter()
        .enumerate()
        .map(|(i, n)| render_news_card(n, i, config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_base_url;
    use crate::domain::{CsvRow, NewsKind, ProgramLevel};

    fn config() -> SiteConfig {
        SiteConfig::new(parse_base_url("http://localhost/pages/news.html").unwrap())
    }

    fn open_house() -> Event {
        let row: CsvRow = [
            ("title", "Open House"),
            ("date", "2024-03-15"),
            ("start_time", "09:00"),
            ("end_time", "10:30"),
            ("location", "Hall A"),
            ("description", "Intro session"),
        ]
        .into_iter()
        .collect();
        Event::from_row(&row)
    }

    #[test]
    fn event_card_badge_and_time_range() {
        let html = render_event_card(&open_house(), 0);
        assert!(html.contains(r#"<span class="event-day">15</span>"#));
        assert!(html.contains(r#"<span class="event-month">MAR</span>"#));
        assert!(html.contains("9:00 AM - 10:30 AM"));
        assert!(html.contains("Hall A"));
        assert!(html.contains("animate__delay-0s"));
    }

    #[test]
    fn render_preserves_order_and_count() {
        let mut second = open_house();
        second.title = "Career Fair".into();
        let cards = render_events(&[open_house(), second, open_house(), open_house()]);
        assert_eq!(cards.len(), 4);
        assert!(cards[1].contains("Career Fair"));
        assert!(cards[2].contains("animate__delay-2s"));
        assert!(!cards[3].contains("animate__delay"));
    }

    #[test]
    fn program_card_uses_level_title_and_escapes() {
        let program = Program {
            name: "Data <Science>".into(),
            level: ProgramLevel::Graduate,
            description: "Stats & ML".into(),
            duration: "2 years".into(),
            credits: "36 credits".into(),
            admission: "Fall".into(),
        };
        let html = render_program_card(&program, 5);
        assert!(html.contains("Master of Science"));
        assert!(html.contains(r#"data-program-type="graduate""#));
        assert!(html.contains("Data &lt;Science&gt;"));
        assert!(html.contains("Stats &amp; ML"));
        assert!(html.contains("Fall admission"));
        assert!(!html.contains("animate__delay"));
    }

    #[test]
    fn news_card_excerpt_and_trigger_attributes() {
        let item = NewsItem {
            title: "Robotics \"Cup\"".into(),
            date: "2024-05-02".into(),
            kind: NewsKind::Student,
            image: "robots.jpg".into(),
            content: "x".repeat(130),
        };
        let html = render_news_card(&item, 3, &config());
        assert!(html.contains(&format!("{}...", "x".repeat(120))));
        assert!(html.contains(&format!(r#"data-content="{}""#, "x".repeat(130))));
        assert!(html.contains(r#"data-type="Student News""#));
        assert!(html.contains(r#"data-date="May 2, 2024""#));
        assert!(html.contains(r#"src="assets/images/robots.jpg""#));
        assert!(html.contains("Robotics &quot;Cup&quot;"));
        assert!(html.contains(r#"<span class="badge bg-info">"#));
        assert!(html.contains("animate__delay-0s"));
    }

    #[test]
    fn error_banner_is_a_danger_alert() {
        assert!(ERROR_BANNER.contains("alert alert-danger"));
    }
}
