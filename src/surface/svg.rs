use std::fmt::Write as _;

use kurbo::Shape as _;

use crate::foundation::core::{Affine, BezPath, Point, Rect, union_rects};
use crate::foundation::error::{RailyardError, RailyardResult};
use crate::surface::metrics::TextMetrics;
use crate::surface::{ElementId, Surface, Text};

/// Stylesheet embedded in every document.
pub const DIAGRAM_STYLE: &str = "\
svg { background-color: #fff; }
text, tspan { font: 12px Arial; }
path { fill-opacity: 0; stroke-width: 2px; stroke: #000; }
circle { fill: #6b6659; stroke-width: 2px; stroke: #000; }
.anchor text, .any-character text { fill: #fff; }
.anchor rect, .any-character rect { fill: #6b6659; }
.escape text, .charset-escape text, .back-reference text, .literal text, .charset-range text { fill: #000; }
.escape rect, .charset-escape rect, .back-reference rect { fill: #bada55; }
.literal rect, .charset-range rect { fill: #dae9e5; }
.charset .charset-box { fill: #cbcbba; }
.subexp .subexp-label, .charset .charset-label, .match-fragment .repeat-label { font-size: 10px; }
.subexp .subexp-box { stroke: #908c82; stroke-dasharray: 6,2; stroke-width: 2px; fill-opacity: 0; }
.quote { fill: #908c82; }
";

#[derive(Clone, Debug)]
enum Shape {
    Svg,
    Group,
    Rect { rect: Rect, radius: f64 },
    Circle { center: Point, radius: f64 },
    Path(BezPath),
    Text { origin: Point, text: Text },
}

#[derive(Clone, Debug)]
struct Element {
    shape: Shape,
    children: Vec<ElementId>,
    classes: Vec<String>,
    attrs: Vec<(String, String)>,
    transform: Affine,
}

impl Element {
    fn new(shape: Shape) -> Self {
        Self {
            shape,
            children: Vec::new(),
            classes: Vec::new(),
            attrs: Vec::new(),
            transform: Affine::IDENTITY,
        }
    }
}

/// In-memory SVG element tree implementing [`Surface`].
#[derive(Clone, Debug)]
pub struct SvgSurface {
    elements: Vec<Element>,
    metrics: TextMetrics,
}

impl Default for SvgSurface {
    fn default() -> Self {
        Self::new(TextMetrics::default())
    }
}

impl SvgSurface {
    /// Create a surface holding only the root `<svg>` element.
    pub fn new(metrics: TextMetrics) -> Self {
        Self {
            elements: vec![Element::new(Shape::Svg)],
            metrics,
        }
    }

    /// Number of elements, root included.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether only the root element exists.
    pub fn is_empty(&self) -> bool {
        self.elements.len() == 1
    }

    /// Classes of an element.
    pub fn classes(&self, id: ElementId) -> RailyardResult<&[String]> {
        Ok(&self.get(id)?.classes)
    }

    /// Value of an attribute, if set.
    pub fn attr(&self, id: ElementId, name: &str) -> RailyardResult<Option<&str>> {
        Ok(self
            .get(id)?
            .attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str()))
    }

    /// Direct children of an element in creation order.
    pub fn children(&self, id: ElementId) -> RailyardResult<&[ElementId]> {
        Ok(&self.get(id)?.children)
    }

    /// Serialize the element tree into a standalone document.
    pub fn into_document(self) -> SvgDocument {
        let root = self.root();
        let dim = |name: &str| {
            self.attr(root, name)
                .ok()
                .flatten()
                .and_then(|v| v.parse::<f64>().ok())
                .unwrap_or(0.0)
        };
        let (width, height) = (dim("width"), dim("height"));
        let mut markup = String::new();
        self.write_element(&mut markup, root);
        SvgDocument {
            markup,
            width,
            height,
        }
    }

    fn get(&self, id: ElementId) -> RailyardResult<&Element> {
        self.elements
            .get(id.0)
            .ok_or_else(|| RailyardError::render(format!("unknown element #{}", id.0)))
    }

    fn get_mut(&mut self, id: ElementId) -> RailyardResult<&mut Element> {
        self.elements
            .get_mut(id.0)
            .ok_or_else(|| RailyardError::render(format!("unknown element #{}", id.0)))
    }

    fn push(&mut self, parent: ElementId, shape: Shape) -> RailyardResult<ElementId> {
        match self.get(parent)?.shape {
            Shape::Svg | Shape::Group => {}
            _ => {
                return Err(RailyardError::render(format!(
                    "element #{} cannot hold children",
                    parent.0
                )));
            }
        }
        let id = ElementId(self.elements.len());
        self.elements.push(Element::new(shape));
        self.get_mut(parent)?.children.push(id);
        Ok(id)
    }

    fn local_bbox(&self, id: ElementId) -> RailyardResult<Option<Rect>> {
        let el = self.get(id)?;
        let local = match &el.shape {
            Shape::Svg | Shape::Group => {
                let mut boxes = Vec::with_capacity(el.children.len());
                for &child in &el.children {
                    if let Some(b) = self.placed_bbox(child)? {
                        boxes.push(b);
                    }
                }
                union_rects(boxes)
            }
            Shape::Rect { rect, .. } => Some(*rect),
            Shape::Circle { center, radius } => {
                Some(Rect::from_center_size(*center, (radius * 2.0, radius * 2.0)))
            }
            Shape::Path(path) => Some(path.bounding_box()),
            Shape::Text { origin, text } => Some(self.metrics.bounds(*origin, text)),
        };
        Ok(local)
    }

    fn placed_bbox(&self, id: ElementId) -> RailyardResult<Option<Rect>> {
        let transform = self.get(id)?.transform;
        Ok(self
            .local_bbox(id)?
            .map(|r| transform.transform_rect_bbox(r)))
    }

    fn write_element(&self, out: &mut String, id: ElementId) {
        let Ok(el) = self.get(id) else {
            return;
        };
        let mut attrs = String::new();
        if !el.classes.is_empty() {
            let _ = write!(attrs, " class=\"{}\"", escape_attr(&el.classes.join(" ")));
        }
        if el.transform != Affine::IDENTITY {
            let [a, b, c, d, e, f] = el.transform.as_coeffs();
            let _ = write!(
                attrs,
                " transform=\"matrix({},{},{},{},{},{})\"",
                num(a),
                num(b),
                num(c),
                num(d),
                num(e),
                num(f)
            );
        }
        for (k, v) in &el.attrs {
            let _ = write!(attrs, " {k}=\"{}\"", escape_attr(v));
        }

        match &el.shape {
            Shape::Svg => {
                let _ = write!(
                    out,
                    "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\"{attrs}>\
                     <defs><style type=\"text/css\">{DIAGRAM_STYLE}</style></defs>"
                );
                for &child in &el.children {
                    self.write_element(out, child);
                }
                out.push_str("</svg>");
            }
            Shape::Group => {
                let _ = write!(out, "<g{attrs}>");
                for &child in &el.children {
                    self.write_element(out, child);
                }
                out.push_str("</g>");
            }
            Shape::Rect { rect, radius } => {
                let _ = write!(
                    out,
                    "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"{}\" ry=\"{}\"{attrs}/>",
                    num(rect.x0),
                    num(rect.y0),
                    num(rect.width()),
                    num(rect.height()),
                    num(*radius),
                    num(*radius)
                );
            }
            Shape::Circle { center, radius } => {
                let _ = write!(
                    out,
                    "<circle cx=\"{}\" cy=\"{}\" r=\"{}\"{attrs}/>",
                    num(center.x),
                    num(center.y),
                    num(*radius)
                );
            }
            Shape::Path(path) => {
                let _ = write!(out, "<path d=\"{}\"{attrs}/>", path.to_svg());
            }
            Shape::Text { origin, text } => {
                let _ = write!(
                    out,
                    "<text x=\"{}\" y=\"{}\" font-size=\"{}\"{attrs}>",
                    num(origin.x),
                    num(self.metrics.baseline(origin.y, text.size)),
                    num(text.size)
                );
                for span in &text.spans {
                    match span.class {
                        Some(class) => {
                            let _ = write!(
                                out,
                                "<tspan class=\"{class}\">{}</tspan>",
                                escape_text(&span.text)
                            );
                        }
                        None => out.push_str(&escape_text(&span.text)),
                    }
                }
                out.push_str("</text>");
            }
        }
    }
}

impl Surface for SvgSurface {
    fn root(&self) -> ElementId {
        ElementId(0)
    }

    fn group(&mut self, parent: ElementId) -> RailyardResult<ElementId> {
        self.push(parent, Shape::Group)
    }

    fn rect(&mut self, parent: ElementId, rect: Rect, radius: f64) -> RailyardResult<ElementId> {
        self.push(parent, Shape::Rect { rect, radius })
    }

    fn circle(
        &mut self,
        parent: ElementId,
        center: Point,
        radius: f64,
    ) -> RailyardResult<ElementId> {
        self.push(parent, Shape::Circle { center, radius })
    }

    fn path(&mut self, parent: ElementId, path: BezPath) -> RailyardResult<ElementId> {
        self.push(parent, Shape::Path(path))
    }

    fn text(&mut self, parent: ElementId, origin: Point, text: Text) -> RailyardResult<ElementId> {
        self.push(parent, Shape::Text { origin, text })
    }

    fn add_class(&mut self, id: ElementId, class: &str) -> RailyardResult<()> {
        let el = self.get_mut(id)?;
        if !el.classes.iter().any(|c| c == class) {
            el.classes.push(class.to_owned());
        }
        Ok(())
    }

    fn set_attr(&mut self, id: ElementId, name: &str, value: String) -> RailyardResult<()> {
        let el = self.get_mut(id)?;
        match el.attrs.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value,
            None => el.attrs.push((name.to_owned(), value)),
        }
        Ok(())
    }

    fn transform(&self, id: ElementId) -> RailyardResult<Affine> {
        Ok(self.get(id)?.transform)
    }

    fn set_transform(&mut self, id: ElementId, transform: Affine) -> RailyardResult<()> {
        self.get_mut(id)?.transform = transform;
        Ok(())
    }

    fn bbox(&self, id: ElementId) -> RailyardResult<Rect> {
        let transform = self.get(id)?.transform;
        Ok(self
            .placed_bbox(id)?
            .unwrap_or_else(|| transform.transform_rect_bbox(Rect::ZERO)))
    }
}

/// A finished diagram.
#[derive(Clone, Debug, PartialEq)]
pub struct SvgDocument {
    markup: String,
    width: f64,
    height: f64,
}

impl SvgDocument {
    /// SVG markup.
    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// Canvas width.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Canvas height.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Parse the markup with `usvg`, e.g. to rasterize it.
    pub fn to_usvg_tree(&self) -> RailyardResult<usvg::Tree> {
        usvg::Tree::from_str(&self.markup, &usvg::Options::default())
            .map_err(|e| anyhow::anyhow!("emitted svg failed to parse: {e}").into())
    }
}

pub(crate) fn num(v: f64) -> String {
    let rounded = (v * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        "0".to_owned()
    } else {
        format!("{rounded}")
    }
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}

#[cfg(test)]
#[path = "../../tests/unit/surface/svg.rs"]
mod tests;
