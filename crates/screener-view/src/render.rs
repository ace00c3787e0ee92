//! Results container and the renderer that fills it
//!
//! The container is the only region filter output is written to. Every
//! write replaces its children wholesale; nothing is appended to a
//! previous render.

use serde::{Deserialize, Serialize};

use crate::messages::Messages;

const ENTRY_CLASS: &str =
    "bg-white p-4 mb-3 rounded-lg shadow-sm border border-gray-200 text-lg font-medium";
const PLACEHOLDER_CLASS: &str = "text-center text-gray-500 italic";
const LOADING_CLASS: &str = "text-center text-blue-600 font-medium animate-pulse";
const ERROR_CLASS: &str = "text-center text-red-500";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// One matching stock
    Entry,
    /// Filter matched nothing
    Placeholder,
    /// Request in flight
    Loading,
    /// Request failed
    Error,
}

impl ElementKind {
    pub fn class(&self) -> &'static str {
        match self {
            ElementKind::Entry => ENTRY_CLASS,
            ElementKind::Placeholder => PLACEHOLDER_CLASS,
            ElementKind::Loading => LOADING_CLASS,
            ElementKind::Error => ERROR_CLASS,
        }
    }
}

/// A single child of the results container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub kind: ElementKind,
    /// Plain text, inserted verbatim
    pub text: String,
    pub class: String,
}

impl Element {
    pub fn new(kind: ElementKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            class: kind.class().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultsContainer {
    children: Vec<Element>,
}

impl ResultsContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.children.clear();
    }

    pub fn show_loading(&mut self, messages: &Messages) {
        self.replace(vec![Element::new(ElementKind::Loading, &messages.loading)]);
    }

    pub fn show_error(&mut self, messages: &Messages) {
        self.replace(vec![Element::new(ElementKind::Error, &messages.error)]);
    }

    pub fn replace(&mut self, children: Vec<Element>) {
        self.children = children;
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Texts of the stock entries, in display order
    pub fn entries(&self) -> Vec<&str> {
        self.children
            .iter()
            .filter(|e| e.kind == ElementKind::Entry)
            .map(|e| e.text.as_str())
            .collect()
    }

    pub fn is_loading(&self) -> bool {
        self.has_only(ElementKind::Loading)
    }

    pub fn is_error(&self) -> bool {
        self.has_only(ElementKind::Error)
    }

    pub fn is_empty_result(&self) -> bool {
        self.has_only(ElementKind::Placeholder)
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    fn has_only(&self, kind: ElementKind) -> bool {
        matches!(self.children.as_slice(), [only] if only.kind == kind)
    }
}

/// Project a result set into the container.
///
/// One entry per result in input order, or a single placeholder when the
/// set is empty.
pub fn render<S: AsRef<str>>(container: &mut ResultsContainer, results: &[S], messages: &Messages) {
    container.clear();

    if results.is_empty() {
        container.replace(vec![Element::new(
            ElementKind::Placeholder,
            &messages.no_results,
        )]);
        return;
    }

    let entries = results
        .iter()
        .map(|stock| Element::new(ElementKind::Entry, stock.as_ref()))
        .collect();
    container.replace(entries);
}
