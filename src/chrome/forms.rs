//! Submission gating for forms tagged `needs-validation`.

use scraper::ElementRef;

use super::{ClassList, Effect};

pub const NEEDS_VALIDATION: &str = "needs-validation";
pub const WAS_VALIDATED: &str = "was-validated";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldKind {
    #[default]
    Text,
    Email,
}

/// A form control and the native constraints declared on it.
#[derive(Debug, Clone, Default)]
pub struct Field {
    pub name: String,
    pub value: String,
    pub kind: FieldKind,
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
}

impl Field {
    /// Read a form control from markup. Returns `None` for controls that take
    /// no part in validation (hidden fields and buttons).
    pub fn from_element(el: &ElementRef<'_>) -> Option<Self> {
        let attrs = el.value();
        let kind = attrs.attr("type").unwrap_or("text").to_ascii_lowercase();
        if matches!(kind.as_str(), "hidden" | "submit" | "button" | "reset" | "image") {
            return None;
        }
        let value = match attrs.name() {
            "textarea" => el.text().collect(),
            _ => attrs.attr("value").unwrap_or_default().to_string(),
        };
        Some(Self {
            name: attrs.attr("name").unwrap_or_default().to_string(),
            value,
            kind: if kind == "email" { FieldKind::Email } else { FieldKind::Text },
            required: attrs.attr("required").is_some(),
            min_length: attrs.attr("minlength").and_then(|v| v.trim().parse().ok()),
            max_length: attrs.attr("maxlength").and_then(|v| v.trim().parse().ok()),
        })
    }

    pub fn is_valid(&self) -> bool {
        let value = self.value.as_str();
        if value.is_empty() {
            return !self.required;
        }
        let len = value.chars().count();
        if self.min_length.is_some_and(|min| len < min) {
            return false;
        }
        if self.max_length.is_some_and(|max| len > max) {
            return false;
        }
        match self.kind {
            FieldKind::Text => true,
            FieldKind::Email => looks_like_email(value),
        }
    }
}

fn looks_like_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !value.chars().any(char::is_whitespace)
}

#[derive(Debug, Clone, Default)]
pub struct Form {
    pub element: Option<usize>,
    pub classes: ClassList,
    pub fields: Vec<Field>,
}

impl Form {
    pub fn needing_validation(fields: Vec<Field>) -> Self {
        let mut classes = ClassList::default();
        classes.add(NEEDS_VALIDATION);
        Self {
            element: None,
            classes,
            fields,
        }
    }

    pub fn check_validity(&self) -> bool {
        self.fields.iter().all(Field::is_valid)
    }
}

/// Submit handler. Invalid forms are blocked; tagged forms are always marked
/// `was-validated` so the validation styles show. Untagged forms pass through.
pub fn on_submit(form: &mut Form) -> Vec<Effect> {
    if !form.classes.contains(NEEDS_VALIDATION) {
        return Vec::new();
    }

    let mut effects = Vec::new();
    if !form.check_validity() {
        effects.push(Effect::PreventDefault);
        effects.push(Effect::StopPropagation);
    }
    form.classes.add(WAS_VALIDATED);
    effects
}
