//! Tooltip and popover bindings.

use tracing::debug;

use crate::modal::ElementAttrs;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKind {
    Tooltip,
    Popover,
}

impl WidgetKind {
    fn from_toggle(value: &str) -> Option<Self> {
        match value {
            "tooltip" => Some(WidgetKind::Tooltip),
            "popover" => Some(WidgetKind::Popover),
            _ => None,
        }
    }
}

/// A widget attached to the element at `element` in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetBinding {
    pub element: usize,
    pub kind: WidgetKind,
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct WidgetRegistry {
    bindings: Vec<WidgetBinding>,
    initialized: bool,
}

impl WidgetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a widget to every element whose `data-bs-toggle` is `tooltip` or
    /// `popover`. Runs once; later calls keep the first set of bindings.
    pub fn init(&mut self, elements: &[ElementAttrs]) -> &[WidgetBinding] {
        if self.initialized {
            debug!("tooltips and popovers already initialised");
            return &self.bindings;
        }
        self.initialized = true;

        self.bindings = elements
            .iter()
            .enumerate()
            .filter_map(|(idx, el)| {
                let kind = WidgetKind::from_toggle(el.get("data-bs-toggle")?)?;
                Some(WidgetBinding {
                    element: idx,
                    kind,
                    title: el
                        .get("data-bs-title")
                        .or_else(|| el.get("title"))
                        .map(str::to_string),
                    content: el.get("data-bs-content").map(str::to_string),
                })
            })
            .collect();
        &self.bindings
    }

    pub fn bindings(&self) -> &[WidgetBinding] {
        &self.bindings
    }

    pub fn count(&self, kind: WidgetKind) -> usize {
        self.bindings.iter().filter(|b| b.kind == kind).count()
    }
}
