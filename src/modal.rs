//! Modal controllers: content is rebuilt from the triggering element each
//! time a modal opens. Nothing is remembered between openings.

use std::collections::BTreeMap;

use scraper::{ElementRef, Html, Selector};
use tracing::warn;

use crate::domain::NewsKind;
use crate::page::ModalContent;
use crate::render::escape_html;

/// Attributes of one element, e.g. the trigger that opened a modal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementAttrs {
    attrs: BTreeMap<String, String>,
}

impl ElementAttrs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(name.to_string(), value.to_string());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Attributes of a parsed element, entities already decoded.
    pub fn from_element(el: &ElementRef<'_>) -> Self {
        let attrs = el
            .value()
            .attrs()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        Self { attrs }
    }

    /// Find the first modal trigger (`data-bs-toggle="modal"`) in a fragment.
    pub fn find_modal_trigger(html: &str) -> Option<Self> {
        let fragment = Html::parse_fragment(html);
        let selector = Selector::parse(r#"[data-bs-toggle="modal"]"#).ok()?;
        fragment.select(&selector).next().map(|el| Self::from_element(&el))
    }
}

/// Rebuilds the news modal from a "Read More" trigger.
pub struct NewsModal;

impl NewsModal {
    pub fn on_show(trigger: &ElementAttrs) -> ModalContent {
        let title = trigger.get("data-title").unwrap_or_default();
        let date = trigger.get("data-date").unwrap_or_default();
        let kind = trigger.get("data-type").unwrap_or_default();
        let image = trigger.get("data-image").unwrap_or_default();
        let content = trigger.get("data-content").unwrap_or_default();

        let badge = NewsKind::from_label(&kind.to_lowercase()).badge_class();

        let body_html = format!(
            r#"<div class="row">
    <div class="col-md-4 mb-3 mb-md-0">
        <img src="{image}" class="img-fluid rounded" alt="{title}">
        <div class="mt-2">
            <span class="badge {badge}">{kind}</span>
            <small class="text-muted ms-2">{date}</small>
        </div>
    </div>
    <div class="col-md-8">
        <p>{content}</p>
    </div>
</div>"#,
            image = escape_html(image),
            title = escape_html(title),
            kind = escape_html(kind),
            date = escape_html(date),
            content = escape_html(content),
        );

        ModalContent {
            title: title.to_string(),
            body_html,
        }
    }
}

/// Embedded video player whose frame source follows the modal's visibility.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoModal {
    iframe_src: String,
}

impl VideoModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn src(&self) -> &str {
        &self.iframe_src
    }

    /// Copy the trigger's `data-bs-video` URL into the frame.
    pub fn on_show(&mut self, trigger: &ElementAttrs) {
        match trigger.get("data-bs-video") {
            Some(url) => self.iframe_src = url.to_string(),
            None => warn!("video modal opened by a trigger without data-bs-video"),
        }
    }

    /// Clearing the source stops playback.
    pub fn on_hide(&mut self) {
        self.iframe_src.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SiteConfig, parse_base_url};
    use crate::domain::NewsItem;
    use crate::render::render_news_card;

    #[test]
    fn trigger_attributes_are_decoded() {
        let trigger = ElementAttrs::find_modal_trigger(
            r##"<div><a href="#" data-bs-toggle="modal" data-title="Caf&eacute; &#x27;Night&#x27; &amp; more">x</a></div>"##,
        )
        .unwrap();
        assert_eq!(trigger.get("data-title"), Some("Café 'Night' & more"));
        assert_eq!(trigger.get("href"), Some("#"));
        assert_eq!(ElementAttrs::find_modal_trigger("<a href=\"#\">plain</a>"), None);
    }

    #[test]
    fn news_modal_rebuilds_from_rendered_trigger() {
        let config = SiteConfig::new(parse_base_url("http://localhost/pages/news.html").unwrap());
        let item = NewsItem {
            title: "Dean's <Award>".into(),
            date: "2024-01-09".into(),
            kind: NewsKind::Award,
            image: "award.png".into(),
            content: "Full story.".into(),
        };
        let card = render_news_card(&item, 0, &config);
        let trigger = ElementAttrs::find_modal_trigger(&card).unwrap();
        assert_eq!(trigger.get("data-title"), Some("Dean's <Award>"));

        let modal = NewsModal::on_show(&trigger);
        assert_eq!(modal.title, "Dean's <Award>");
        assert!(modal.body_html.contains(r#"<span class="badge bg-success">Award</span>"#));
        assert!(modal.body_html.contains("January 9, 2024"));
        assert!(modal.body_html.contains(r#"src="assets/images/award.png""#));
        assert!(modal.body_html.contains("<p>Full story.</p>"));
        assert!(modal.body_html.contains("Dean&#39;s &lt;Award&gt;"));
    }

    #[test]
    fn news_modal_badge_follows_lowercased_type() {
        let student = NewsModal::on_show(&ElementAttrs::new().with("data-type", "Student News"));
        assert!(student.body_html.contains("badge bg-info"));

        let other = NewsModal::on_show(&ElementAttrs::new().with("data-type", "Alumni"));
        assert!(other.body_html.contains(r#"<span class="badge bg-secondary">Alumni</span>"#));
    }

    #[test]
    fn video_modal_sets_and_clears_source() {
        let mut modal = VideoModal::new();
        modal.on_show(&ElementAttrs::new().with("data-bs-video", "https://video.test/embed/1"));
        assert_eq!(modal.src(), "https://video.test/embed/1");
        modal.on_hide();
        assert_eq!(modal.src(), "");

        modal.on_show(&ElementAttrs::new());
        assert_eq!(modal.src(), "");
    }
}
