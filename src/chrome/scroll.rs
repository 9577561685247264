//! Scroll-driven chrome: back-to-top button, navbar style, reveal-on-scroll,
//! and in-page anchor navigation.

use std::collections::VecDeque;
use std::time::Duration;

use super::{ClassList, Effect};

/// Offset past which the back-to-top button is shown.
pub const BACK_TO_TOP_THRESHOLD: f64 = 300.0;
/// Delay between the fade-out and actually hiding the button.
pub const HIDE_GRACE: Duration = Duration::from_millis(500);
/// Offset past which the navbar switches to its scrolled style.
pub const NAVBAR_THRESHOLD: f64 = 50.0;
/// Elements reveal once their top is above `viewport / REVEAL_RATIO`.
pub const REVEAL_RATIO: f64 = 1.3;
/// Height of the fixed header kept clear when jumping to an anchor.
pub const HEADER_OFFSET: f64 = 70.0;

#[derive(Debug, Clone, Default)]
pub struct BackToTop {
    /// Document position of the `.back-to-top` element, when bound to a page.
    pub element: Option<usize>,
    pub classes: ClassList,
    /// Hide checks scheduled by fade-outs, earliest first.
    pending_hides: VecDeque<Duration>,
}

impl BackToTop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bound(element: usize, classes: ClassList) -> Self {
        Self {
            element: Some(element),
            classes,
            pending_hides: VecDeque::new(),
        }
    }

    /// Returns the time of a newly scheduled hide check, if any.
    pub fn on_scroll(&mut self, offset: f64, now: Duration) -> Option<Duration> {
        if offset > BACK_TO_TOP_THRESHOLD {
            self.classes.add("show");
            self.classes.add("animate__fadeIn");
            self.classes.remove("animate__fadeOut");
            None
        } else {
            self.classes.add("animate__fadeOut");
            self.classes.remove("animate__fadeIn");
            let due = now + HIDE_GRACE;
            self.pending_hides.push_back(due);
            Some(due)
        }
    }

    /// Run every hide check due at `now` against the current offset.
    pub fn on_timer(&mut self, now: Duration, offset: f64) {
        while self.pending_hides.front().is_some_and(|due| *due <= now) {
            self.pending_hides.pop_front();
            if offset <= BACK_TO_TOP_THRESHOLD {
                self.classes.remove("show");
            }
        }
    }

    pub fn next_hide_check(&self) -> Option<Duration> {
        self.pending_hides.front().copied()
    }

    pub fn is_shown(&self) -> bool {
        self.classes.contains("show")
    }

    pub fn on_click(&self) -> Vec<Effect> {
        vec![Effect::PreventDefault, Effect::ScrollTo { top: 0.0, smooth: true }]
    }
}

#[derive(Debug, Clone, Default)]
pub struct Navbar {
    pub element: Option<usize>,
    pub classes: ClassList,
}

impl Navbar {
    pub fn on_scroll(&mut self, offset: f64) {
        if offset > NAVBAR_THRESHOLD {
            self.classes.add("scrolled");
        } else {
            self.classes.remove("scrolled");
        }
    }
}

/// An `.animate-on-scroll` element and its position relative to the viewport.
#[derive(Debug, Clone, Default)]
pub struct Revealable {
    pub element: Option<usize>,
    /// Distance from the viewport top to the element top. Infinite until the
    /// element has been laid out.
    pub top: f64,
    pub classes: ClassList,
}

/// Mark elements high enough in the viewport as `animated`. The class is
/// never taken away. Returns how many elements were newly revealed.
pub fn reveal_on_scroll(elements: &mut [Revealable], viewport_height: f64) -> usize {
    let line = viewport_height / REVEAL_RATIO;
    let mut revealed = 0;
    for el in elements.iter_mut() {
        if el.top < line && !el.classes.contains("animated") {
            el.classes.add("animated");
            revealed += 1;
        }
    }
    revealed
}

/// Click on a same-page link. `offset_top` looks up an element's document
/// offset by id.
///
/// Links not starting with `#` are left alone. A bare `#` only suppresses
/// navigation, as does a link to an id the page does not have.
pub fn anchor_click<F>(href: &str, offset_top: F) -> Vec<Effect>
where
    F: Fn(&str) -> Option<f64>,
{
    let Some(id) = href.strip_prefix('#') else {
        return Vec::new();
    };
    if id.is_empty() {
        return vec![Effect::PreventDefault];
    }
    match offset_top(id) {
        Some(top) => vec![
            Effect::PreventDefault,
            Effect::ScrollTo {
                top: (top - HEADER_OFFSET).max(0.0),
                smooth: true,
            },
        ],
        None => {
            tracing::warn!(href, "anchor target not found");
            vec![Effect::PreventDefault]
        }
    }
}
