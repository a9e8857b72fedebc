use std::fmt::Write as _;

use crate::foundation::error::{RailyardError, RailyardResult};
use crate::surface::svg::{SvgDocument, num};

/// Handle to a child appended to a [`Container`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChildId(u64);

/// Child content a host container can hold.
#[derive(Clone, Debug, PartialEq)]
pub enum Element {
    /// Opaque pre-existing markup.
    Markup(String),
    /// Slot for the diagram; empty until a render succeeds.
    Diagram(Option<SvgDocument>),
    /// Progress bar filled to `percent`.
    Progress {
        /// Fill in `[0, 100]`.
        percent: f64,
    },
}

/// Host element the diagram is mounted into.
///
/// Only class-list membership and child attachment are needed.
pub trait Container {
    /// Add `class` if absent.
    fn add_class(&mut self, class: &str);

    /// Remove `class` if present.
    fn remove_class(&mut self, class: &str);

    /// Whether `class` is present.
    fn has_class(&self, class: &str) -> bool;

    /// Append a child after the existing ones.
    fn append_child(&mut self, child: Element) -> ChildId;

    /// Detach a child.
    fn remove_child(&mut self, id: ChildId) -> RailyardResult<Element>;

    /// Detach every child, in order.
    fn take_children(&mut self) -> Vec<Element>;

    /// Mutable access to an attached child.
    fn child_mut(&mut self, id: ChildId) -> RailyardResult<&mut Element>;

    /// Add or remove `class`.
    fn toggle_class(&mut self, class: &str, on: bool) {
        if on {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }
}

/// In-memory container that serializes to an HTML fragment.
#[derive(Clone, Debug, Default)]
pub struct HtmlContainer {
    classes: Vec<String>,
    children: Vec<(ChildId, Element)>,
    next_id: u64,
    removals: usize,
}

impl HtmlContainer {
    /// Empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Container already holding `markup`.
    pub fn with_markup(markup: impl Into<String>) -> Self {
        let mut c = Self::new();
        c.append_child(Element::Markup(markup.into()));
        c
    }

    /// Classes in insertion order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Attached children in order.
    pub fn children(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().map(|(_, el)| el)
    }

    /// Number of successful [`Container::remove_child`] calls so far.
    pub fn removals(&self) -> usize {
        self.removals
    }

    /// The progress bar, if one is attached.
    pub fn progress(&self) -> Option<f64> {
        self.children().find_map(|el| match el {
            Element::Progress { percent } => Some(*percent),
            _ => None,
        })
    }

    /// The rendered diagram, if one is attached.
    pub fn diagram(&self) -> Option<&SvgDocument> {
        self.children().find_map(|el| match el {
            Element::Diagram(doc) => doc.as_ref(),
            _ => None,
        })
    }

    /// HTML fragment for the container and its children.
    pub fn to_html(&self) -> String {
        let mut out = String::from("<div");
        if !self.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", self.classes.join(" "));
        }
        out.push('>');
        for el in self.children() {
            match el {
                Element::Markup(m) => out.push_str(m),
                Element::Diagram(doc) => {
                    out.push_str("<div class=\"svg\">");
                    if let Some(doc) = doc {
                        out.push_str(doc.markup());
                    }
                    out.push_str("</div>");
                }
                Element::Progress { percent } => {
                    let _ = write!(
                        out,
                        "<div class=\"progress\"><div style=\"width: {}%;\"></div></div>",
                        num(*percent)
                    );
                }
            }
        }
        out.push_str("</div>");
        out
    }

    fn position(&self, id: ChildId) -> RailyardResult<usize> {
        self.children
            .iter()
            .position(|(c, _)| *c == id)
            .ok_or_else(|| RailyardError::validation(format!("child {} is not attached", id.0)))
    }
}

impl Container for HtmlContainer {
    fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_owned());
        }
    }

    fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    fn append_child(&mut self, child: Element) -> ChildId {
        let id = ChildId(self.next_id);
        self.next_id += 1;
        self.children.push((id, child));
        id
    }

    fn remove_child(&mut self, id: ChildId) -> RailyardResult<Element> {
        let idx = self.position(id)?;
        self.removals += 1;
        Ok(self.children.remove(idx).1)
    }

    fn take_children(&mut self) -> Vec<Element> {
        self.children.drain(..).map(|(_, el)| el).collect()
    }

    fn child_mut(&mut self, id: ChildId) -> RailyardResult<&mut Element> {
        let idx = self.position(id)?;
        Ok(&mut self.children[idx].1)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/container.rs"]
mod tests;
