//! Element lookup and rewriting over a parsed document.
//!
//! Elements are addressed by their position in document order. Positions are
//! stable across clones of the same tree, so edits recorded against the
//! template can be applied to a fresh copy when the page is written out.

use std::collections::BTreeMap;

use scraper::node::Comment;
use scraper::{ElementRef, Html, Node, Selector};
use tracing::warn;

use crate::render::escape_html;

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track", "wbr",
];

/// Pending changes to one element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Edit {
    /// Markup that replaces every child.
    pub inner: Option<String>,
    /// Attribute values to set, written verbatim after escaping.
    pub attrs: BTreeMap<String, String>,
}

/// Every element in document order.
pub fn elements(doc: &Html) -> impl Iterator<Item = ElementRef<'_>> {
    doc.tree.root().descendants().filter_map(ElementRef::wrap)
}

/// Position of the first element with this id, as `getElementById` finds it.
pub fn position_of_id(doc: &Html, id: &str) -> Option<usize> {
    elements(doc).position(|el| el.value().id() == Some(id))
}

/// Elements matching a CSS selector, with their positions.
pub fn select<'a>(doc: &'a Html, css: &str) -> Vec<(usize, ElementRef<'a>)> {
    let selector = match Selector::parse(css) {
        Ok(selector) => selector,
        Err(err) => {
            warn!(css, ?err, "invalid selector");
            return Vec::new();
        }
    };
    elements(doc).enumerate().filter(|(_, el)| selector.matches(el)).collect()
}

/// Serialize `doc` with `edits` applied; `body_tail` is appended to `<body>`.
pub fn render(doc: &Html, edits: &BTreeMap<usize, Edit>, body_tail: Option<&str>) -> String {
    let mut out = doc.clone();
    let ids: Vec<_> = elements(doc).map(|el| el.id()).collect();
    let mut slots: Vec<String> = Vec::new();

    for (&idx, edit) in edits {
        let (Some(inner), Some(&id)) = (&edit.inner, ids.get(idx)) else {
            continue;
        };
        let children: Vec<_> = out
            .tree
            .get(id)
            .map(|node| node.children().map(|child| child.id()).collect())
            .unwrap_or_default();
        for child in children {
            if let Some(mut node) = out.tree.get_mut(child) {
                node.detach();
            }
        }
        if let Some(mut node) = out.tree.get_mut(id) {
            node.append(slot_comment(slots.len()));
            slots.push(inner.clone());
        }
    }

    // Rewritten start tags, deepest element first so ancestors pick up the
    // slots of their descendants.
    for (&idx, edit) in edits.iter().rev() {
        if edit.attrs.is_empty() {
            continue;
        }
        let Some(&id) = ids.get(idx) else {
            continue;
        };
        let Some(markup) = out.tree.get(id).and_then(ElementRef::wrap).map(|el| rewrite_element(el, &edit.attrs))
        else {
            continue;
        };
        if let Some(mut node) = out.tree.get_mut(id) {
            node.insert_before(slot_comment(slots.len()));
            node.detach();
            slots.push(markup);
        }
    }

    if let Some(tail) = body_tail {
        let body = elements(&out).find(|el| el.value().name() == "body").map(|el| el.id());
        if let Some(mut node) = body.and_then(|id| out.tree.get_mut(id)) {
            node.append(slot_comment(slots.len()));
            slots.push(tail.to_string());
        }
    }

    let mut html = out.html();
    // Later slots may contain earlier ones.
    for (n, markup) in slots.iter().enumerate().rev() {
        html = html.replacen(&format!("<!--{}-->", slot_label(n)), markup, 1);
    }
    html
}

fn slot_label(n: usize) -> String {
    format!("campus-site-slot-{n}")
}

fn slot_comment(n: usize) -> Node {
    Node::Comment(Comment {
        comment: slot_label(n).into(),
    })
}

fn rewrite_element(el: ElementRef<'_>, overrides: &BTreeMap<String, String>) -> String {
    let name = el.value().name();
    let mut tag = format!("<{name}");
    for (attr, value) in el.value().attrs() {
        let value = overrides.get(attr).map(String::as_str).unwrap_or(value);
        tag.push_str(&format!(r#" {attr}="{}""#, escape_html(value)));
    }
    for (attr, value) in overrides {
        if el.value().attr(attr).is_none() {
            tag.push_str(&format!(r#" {attr}="{}""#, escape_html(value)));
        }
    }
    tag.push('>');

    if VOID_ELEMENTS.contains(&name) {
        return tag;
    }
    format!("{tag}{}</{name}>", el.inner_html())
}
