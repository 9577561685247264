//! Page chrome: small behaviours bound once per page that only depend on
//! static markup and scroll/viewport state.
//!
//! Handlers are plain state transitions. [`Chrome`] bundles them behind a
//! single event entry point and reports what the document should do as
//! [`Effect`]s instead of doing it.

pub mod counter;
pub mod forms;
pub mod scroll;
pub mod widgets;

use std::collections::BTreeMap;
use std::time::Duration;

use scraper::ElementRef;

pub use counter::{Counter, CounterSection, CounterTween};
pub use forms::{Field, FieldKind, Form};
pub use scroll::{BackToTop, Navbar, Revealable};
pub use widgets::{WidgetBinding, WidgetKind, WidgetRegistry};

use crate::modal::{ElementAttrs, VideoModal};
use crate::page::Page;

pub const VIDEO_MODAL_ID: &str = "videoModal";

/// An element's `class` attribute, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList(Vec<String>);

impl ClassList {
    pub fn parse(attr: &str) -> Self {
        let mut list = Self::default();
        for class in attr.split_whitespace() {
            list.add(class);
        }
        list
    }

    fn of(el: &ElementRef<'_>) -> Self {
        Self::parse(el.value().attr("class").unwrap_or_default())
    }

    pub fn add(&mut self, class: &str) {
        if !self.contains(class) {
            self.0.push(class.to_string());
        }
    }

    pub fn remove(&mut self, class: &str) {
        self.0.retain(|c| c != class);
    }

    pub fn contains(&self, class: &str) -> bool {
        self.0.iter().any(|c| c == class)
    }

    pub fn to_attr(&self) -> String {
        self.0.join(" ")
    }
}

/// What a handler asks the document to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    PreventDefault,
    StopPropagation,
    ScrollTo { top: f64, smooth: bool },
    /// Deliver a [`ChromeEvent::Timer`] at this time since page load.
    ScheduleTimer { at: Duration },
}

#[derive(Debug, Clone)]
pub enum ChromeEvent {
    Load { viewport_height: f64 },
    Scroll { offset: f64, at: Duration },
    Timer { at: Duration },
    BackToTopClick,
    AnchorClick { href: String },
    CounterSectionVisible { ratio: f64 },
    Submit { form: usize },
    VideoShow { trigger: ElementAttrs },
    VideoHide,
}

/// What [`Chrome::from_page`] found to bind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChromeBindings {
    pub back_to_top: bool,
    pub navbar: bool,
    pub reveal: usize,
    pub counters: usize,
    pub tooltips: usize,
    pub popovers: usize,
    pub forms: usize,
    pub anchors: usize,
    pub video: bool,
}

/// Chrome state for one page.
#[derive(Debug, Clone, Default)]
pub struct Chrome {
    pub back_to_top: BackToTop,
    pub navbar: Navbar,
    pub reveal: Vec<Revealable>,
    pub counters: Option<CounterSection>,
    pub widgets: WidgetRegistry,
    /// Elements scanned for tooltip/popover triggers on load.
    pub widget_elements: Vec<ElementAttrs>,
    pub forms: Vec<Form>,
    pub video: Option<VideoModal>,
    /// Document position of the video modal's frame.
    pub video_frame: Option<usize>,
    /// In-page link targets by id, with their document offset once laid out.
    pub anchors: BTreeMap<String, Option<f64>>,
    scroll_offset: f64,
    viewport_height: f64,
}

impl Chrome {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind every behaviour the page's markup asks for. Offsets are unknown
    /// until laid out: reveal targets start below the fold and anchors have
    /// no position until [`Chrome::place_anchor`].
    pub fn from_page(page: &Page) -> Self {
        let mut chrome = Self::new();

        if let Some((idx, el)) = page.select(".back-to-top").into_iter().next() {
            chrome.back_to_top = BackToTop::bound(idx, ClassList::of(&el));
        }
        if let Some((idx, el)) = page.select(".navbar").into_iter().next() {
            chrome.navbar = Navbar {
                element: Some(idx),
                classes: ClassList::of(&el),
            };
        }

        chrome.reveal = page
            .select(".animate-on-scroll")
            .into_iter()
            .map(|(idx, el)| Revealable {
                element: Some(idx),
                top: f64::INFINITY,
                classes: ClassList::of(&el),
            })
            .collect();

        if !page.select(".counter-section").is_empty() {
            let counters = page
                .select(".counter h2")
                .into_iter()
                .filter_map(|(idx, el)| {
                    let text: String = el.text().collect();
                    let mut counter = Counter::from_markup(&text, el.value().attr("data-count").unwrap_or_default())?;
                    counter.element = Some(idx);
                    Some(counter)
                })
                .collect();
            chrome.counters = Some(CounterSection::new(counters));
        }

        chrome.widget_elements = page
            .select("[data-bs-toggle]")
            .iter()
            .map(|(_, el)| ElementAttrs::from_element(el))
            .collect();

        chrome.forms = page
            .select(".needs-validation")
            .into_iter()
            .map(|(idx, el)| Form {
                element: Some(idx),
                classes: ClassList::of(&el),
                fields: el
                    .descendants()
                    .filter_map(ElementRef::wrap)
                    .filter(|c| matches!(c.value().name(), "input" | "textarea" | "select"))
                    .filter_map(|c| Field::from_element(&c))
                    .collect(),
            })
            .collect();

        for (_, el) in page.select(r##"a[href^="#"]"##) {
            let Some(id) = el.value().attr("href").and_then(|h| h.strip_prefix('#')) else {
                continue;
            };
            if !id.is_empty() && page.has_element(id) {
                chrome.anchors.insert(id.to_string(), None);
            }
        }

        if page.has_element(VIDEO_MODAL_ID) {
            chrome.video = Some(VideoModal::new());
            chrome.video_frame = page
                .select(&format!("#{VIDEO_MODAL_ID} iframe"))
                .first()
                .map(|(idx, _)| *idx);
        }

        chrome
    }

    pub fn bindings(&self) -> ChromeBindings {
        let toggles = |kind: &str| {
            self.widget_elements
                .iter()
                .filter(|el| el.get("data-bs-toggle") == Some(kind))
                .count()
        };
        ChromeBindings {
            back_to_top: self.back_to_top.element.is_some(),
            navbar: self.navbar.element.is_some(),
            reveal: self.reveal.len(),
            counters: self.counters.as_ref().map_or(0, |s| s.counters.len()),
            tooltips: toggles("tooltip"),
            popovers: toggles("popover"),
            forms: self.forms.len(),
            anchors: self.anchors.len(),
            video: self.video.is_some(),
        }
    }

    /// Record a laid-out anchor target's document offset.
    pub fn place_anchor(&mut self, id: &str, top: f64) {
        self.anchors.insert(id.to_string(), Some(top));
    }

    /// Copy the current chrome state onto the elements it was bound from.
    pub fn write_to(&self, page: &mut Page) {
        let mut classes: Vec<(usize, &ClassList)> = Vec::new();
        classes.extend(self.back_to_top.element.map(|idx| (idx, &self.back_to_top.classes)));
        classes.extend(self.navbar.element.map(|idx| (idx, &self.navbar.classes)));
        classes.extend(self.reveal.iter().filter_map(|r| Some((r.element?, &r.classes))));
        classes.extend(self.forms.iter().filter_map(|f| Some((f.element?, &f.classes))));
        for (idx, list) in classes {
            page.set_attribute_at(idx, "class", list.to_attr());
        }

        if let Some(section) = &self.counters {
            for counter in &section.counters {
                if let Some(idx) = counter.element {
                    page.set_inner_html_at(idx, counter.displayed.to_string());
                }
            }
        }

        if let (Some(video), Some(frame)) = (&self.video, self.video_frame) {
            page.set_attribute_at(frame, "src", video.src());
        }
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    pub fn handle(&mut self, event: ChromeEvent) -> Vec<Effect> {
        match event {
            ChromeEvent::Load { viewport_height } => {
                self.viewport_height = viewport_height;
                scroll::reveal_on_scroll(&mut self.reveal, viewport_height);
                self.widgets.init(&self.widget_elements);
                Vec::new()
            }
            ChromeEvent::Scroll { offset, at } => {
                // Reveal targets are viewport-relative; keep them in step.
                let delta = offset - self.scroll_offset;
                for el in &mut self.reveal {
                    el.top -= delta;
                }
                self.scroll_offset = offset;

                self.navbar.on_scroll(offset);
                scroll::reveal_on_scroll(&mut self.reveal, self.viewport_height);
                match self.back_to_top.on_scroll(offset, at) {
                    Some(due) => vec![Effect::ScheduleTimer { at: due }],
                    None => Vec::new(),
                }
            }
            ChromeEvent::Timer { at } => {
                self.back_to_top.on_timer(at, self.scroll_offset);
                Vec::new()
            }
            ChromeEvent::BackToTopClick => self.back_to_top.on_click(),
            ChromeEvent::AnchorClick { href } => {
                scroll::anchor_click(&href, |id| self.anchors.get(id).copied().flatten())
            }
            ChromeEvent::CounterSectionVisible { ratio } => {
                if let Some(section) = &mut self.counters {
                    section.on_intersect(ratio);
                }
                Vec::new()
            }
            ChromeEvent::Submit { form } => match self.forms.get_mut(form) {
                Some(form) => forms::on_submit(form),
                None => Vec::new(),
            },
            ChromeEvent::VideoShow { trigger } => {
                if let Some(video) = &mut self.video {
                    video.on_show(&trigger);
                }
                Vec::new()
            }
            ChromeEvent::VideoHide => {
                if let Some(video) = &mut self.video {
                    video.on_hide();
                }
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn scroll_updates_navbar_button_and_reveal() {
        let mut chrome = Chrome::new();
        chrome.reveal = vec![Revealable { top: 900.0, ..Default::default() }];
        chrome.handle(ChromeEvent::Load { viewport_height: 650.0 });
        assert!(!chrome.reveal[0].classes.contains("animated"));

        let effects = chrome.handle(ChromeEvent::Scroll { offset: 450.0, at: ms(0) });
        assert!(effects.is_empty());
        assert!(chrome.navbar.classes.contains("scrolled"));
        assert!(chrome.back_to_top.is_shown());
        assert!(chrome.reveal[0].classes.contains("animated"));

        let effects = chrome.handle(ChromeEvent::Scroll { offset: 10.0, at: ms(100) });
        assert_eq!(effects, vec![Effect::ScheduleTimer { at: ms(600) }]);
        chrome.handle(ChromeEvent::Timer { at: ms(600) });
        assert!(!chrome.back_to_top.is_shown());
    }

    #[test]
    fn clicks_produce_scroll_effects() {
        let mut chrome = Chrome::new();
        chrome.place_anchor("programs", 1200.0);

        assert_eq!(
            chrome.handle(ChromeEvent::AnchorClick { href: "#programs".into() }),
            vec![Effect::PreventDefault, Effect::ScrollTo { top: 1130.0, smooth: true }]
        );
        assert_eq!(
            chrome.handle(ChromeEvent::BackToTopClick),
            vec![Effect::PreventDefault, Effect::ScrollTo { top: 0.0, smooth: true }]
        );
    }

    #[test]
    fn load_initialises_widgets_and_video_follows_modal() {
        let mut chrome = Chrome::new();
        chrome.widget_elements = vec![ElementAttrs::new().with("data-bs-toggle", "tooltip")];
        chrome.video = Some(VideoModal::new());

        chrome.handle(ChromeEvent::Load { viewport_height: 800.0 });
        assert_eq!(chrome.widgets.count(WidgetKind::Tooltip), 1);

        chrome.handle(ChromeEvent::VideoShow {
            trigger: ElementAttrs::new().with("data-bs-video", "https://video.test/tour"),
        });
        assert_eq!(chrome.video.as_ref().unwrap().src(), "https://video.test/tour");
        chrome.handle(ChromeEvent::VideoHide);
        assert_eq!(chrome.video.as_ref().unwrap().src(), "");
    }

    #[test]
    fn counters_and_forms_route_through_handle() {
        let mut chrome = Chrome::new();
        chrome.counters = Some(CounterSection::new(vec![Counter { element: None, displayed: 0, target: 40 }]));
        chrome.forms = vec![Form::needing_validation(vec![Field {
            required: true,
            ..Default::default()
        }])];

        chrome.handle(ChromeEvent::CounterSectionVisible { ratio: 0.75 });
        assert_eq!(chrome.counters.as_ref().unwrap().counters[0].displayed, 40);

        let effects = chrome.handle(ChromeEvent::Submit { form: 0 });
        assert_eq!(effects, vec![Effect::PreventDefault, Effect::StopPropagation]);
        assert!(chrome.handle(ChromeEvent::Submit { form: 3 }).is_empty());
    }

    const HOME_PAGE: &str = r##"<!DOCTYPE html>
<html><body>
<nav class="navbar navbar-expand-lg"><a class="nav-link" href="#programs">Programs</a><a href="#">Top</a><a href="#gone">Gone</a></nav>
<section id="programs" class="animate-on-scroll py-5">
  <span data-bs-toggle="tooltip" title="Accredited">i</span>
  <span data-bs-toggle="popover" data-bs-content="More">?</span>
</section>
<section class="counter-section">
  <div class="counter"><h2 data-count="1200">0</h2><p>Students</p></div>
  <div class="counter"><h2 data-count="lots">0</h2></div>
</section>
<form class="needs-validation" novalidate>
  <input type="email" name="email" required>
  <textarea name="message" minlength="10"></textarea>
  <button type="submit">Send</button>
</form>
<div class="modal fade" id="videoModal"><div class="modal-body"><iframe src="" allowfullscreen></iframe></div></div>
<a href="#" class="back-to-top"><i class="fas fa-arrow-up"></i></a>
</body></html>"##;

    #[test]
    fn binds_behaviours_from_page_markup() {
        let page = Page::from_html(HOME_PAGE);
        let chrome = Chrome::from_page(&page);

        assert_eq!(
            chrome.bindings(),
            ChromeBindings {
                back_to_top: true,
                navbar: true,
                reveal: 1,
                counters: 1,
                tooltips: 1,
                popovers: 1,
                forms: 1,
                anchors: 1,
                video: true,
            }
        );
        let form = &chrome.forms[0];
        assert_eq!(form.fields.len(), 2);
        assert_eq!(form.fields[0].kind, FieldKind::Email);
        assert_eq!(form.fields[1].min_length, Some(10));
        assert_eq!(chrome.counters.as_ref().unwrap().counters[0].target, 1200);
    }

    #[test]
    fn state_changes_are_written_back_to_the_page() {
        let mut page = Page::from_html(HOME_PAGE);
        let mut chrome = Chrome::from_page(&page);

        chrome.handle(ChromeEvent::Load { viewport_height: 800.0 });
        chrome.handle(ChromeEvent::Scroll { offset: 400.0, at: ms(0) });
        chrome.handle(ChromeEvent::CounterSectionVisible { ratio: 0.6 });
        chrome.handle(ChromeEvent::Submit { form: 0 });
        chrome.handle(ChromeEvent::VideoShow {
            trigger: ElementAttrs::new().with("data-bs-video", "https://video.test/tour"),
        });
        chrome.write_to(&mut page);

        let html = page.to_html();
        assert!(html.contains(r#"<nav class="navbar navbar-expand-lg scrolled">"#));
        assert!(html.contains(r#"<h2 data-count="1200">1200</h2>"#));
        assert!(html.contains(r#"<form class="needs-validation was-validated" novalidate="">"#));
        assert!(html.contains(r#"<iframe src="https://video.test/tour" allowfullscreen=""></iframe>"#));
        assert!(html.contains(r##"<a href="#" class="back-to-top show animate__fadeIn">"##));
    }

    #[test]
    fn anchors_without_layout_only_prevent_navigation() {
        let page = Page::from_html(HOME_PAGE);
        let mut chrome = Chrome::from_page(&page);
        assert_eq!(
            chrome.handle(ChromeEvent::AnchorClick { href: "#programs".into() }),
            vec![Effect::PreventDefault]
        );
        chrome.place_anchor("programs", 640.0);
        assert_eq!(
            chrome.handle(ChromeEvent::AnchorClick { href: "#programs".into() }),
            vec![Effect::PreventDefault, Effect::ScrollTo { top: 570.0, smooth: true }]
        );
    }
}
