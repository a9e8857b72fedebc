//! [`RenderNode`] implementations for the syntax tree.

use futures::FutureExt as _;
use futures::future::LocalBoxFuture;

use crate::foundation::core::{Anchor, BezPath, Point, Vec2};
use crate::foundation::error::RailyardResult;
use crate::render::context::RenderContext;
use crate::render::layout::{
    BRANCH_SPACE, REPEAT_SPACE, SEQUENCE_GAP, STACK_GAP, bend, hline, labeled_box, render_label,
    space_horizontally, space_vertically,
};
use crate::render::node::{RenderNode, RenderedElement};
use crate::surface::{ElementId, Text, TextSpan};
use crate::syntax::ast::{
    Charset, CharsetItem, Content, Match, MatchFragment, Regexp, Root, SetCharKind, Subexp,
    SubexpKind,
};

const MARKER_RADIUS: f64 = 5.0;
const LEAD: f64 = 10.0;
const BOX_PADDING: f64 = 10.0;
const SET_PADDING: f64 = 5.0;

impl RenderNode for Root {
    fn kind(&self) -> &'static str {
        "root"
    }

    fn weight(&self) -> u64 {
        1
    }

    fn children(&self) -> Vec<&dyn RenderNode> {
        vec![&self.regexp]
    }

    fn draw<'a>(
        &'a self,
        ctx: &'a mut RenderContext<'_>,
        group: ElementId,
    ) -> LocalBoxFuture<'a, RailyardResult<Anchor>> {
        async move {
            let mut top = 0.0;
            if !self.flags.is_empty() {
                let labels: Vec<_> = self.flags.iter().map(|f| f.label()).collect();
                let s = ctx.surface();
                let flags = s.text(
                    group,
                    Point::ORIGIN,
                    Text::caption(format!("Flags: {}", labels.join(", "))),
                )?;
                s.add_class(flags, "flags")?;
                top = s.bbox(flags)?.height() + STACK_GAP;
            }

            let content = ctx.render_child(&self.regexp, group).await?;
            let s = ctx.surface();
            let cb = content.bbox(s)?;
            s.translate(content.id, Vec2::new(LEAD - cb.x0, top - cb.y0))?;
            let cb = content.bbox(s)?;
            let a = content.placed_anchor(s)?;
            let end = cb.x1 + LEAD;

            let mut p = BezPath::new();
            hline(&mut p, Point::new(0.0, a.y), a.x1);
            hline(&mut p, a.end(), end);
            s.path(group, p)?;
            s.circle(group, Point::new(0.0, a.y), MARKER_RADIUS)?;
            s.circle(group, Point::new(end, a.y), MARKER_RADIUS)?;
            Ok(Anchor {
                x1: 0.0,
                x2: end,
                y: a.y,
            })
        }
        .boxed_local()
    }
}

impl RenderNode for Regexp {
    fn kind(&self) -> &'static str {
        "regexp"
    }

    fn weight(&self) -> u64 {
        u64::from(self.alternatives.len() > 1)
    }

    fn children(&self) -> Vec<&dyn RenderNode> {
        self.alternatives.iter().map(|m| m as &dyn RenderNode).collect()
    }

    fn draw<'a>(
        &'a self,
        ctx: &'a mut RenderContext<'_>,
        group: ElementId,
    ) -> LocalBoxFuture<'a, RailyardResult<Anchor>> {
        async move {
            if let [only] = self.alternatives.as_slice() {
                let item = ctx.render_child(only, group).await?;
                return item.placed_anchor(ctx.surface());
            }

            let mut items = Vec::with_capacity(self.alternatives.len());
            for alt in &self.alternatives {
                items.push(ctx.render_child(alt, group).await?);
            }

            // Branches sit side by side below an entry rail and above an exit rail.
            let s = ctx.surface();
            space_horizontally(s, &items, BRANCH_SPACE)?;
            let mut anchors = Vec::with_capacity(items.len());
            let mut right = 0.0f64;
            let mut bottom = 0.0f64;
            for item in &items {
                s.translate(item.id, Vec2::new(BRANCH_SPACE, BRANCH_SPACE))?;
                let b = item.bbox(s)?;
                right = right.max(b.x1);
                bottom = bottom.max(b.y1);
                anchors.push(item.placed_anchor(s)?);
            }
            let half = BRANCH_SPACE / 2.0;
            let (first, last) = (anchors[0], anchors[anchors.len() - 1]);
            let y = first.y;
            let entry_rail = half;
            let exit_rail = bottom + half;
            let exit = right + BRANCH_SPACE;

            let mut p = BezPath::new();
            bend(&mut p, Point::new(0.0, y), Point::new(half, entry_rail));
            hline(&mut p, Point::new(half, entry_rail), last.x1 - half);
            for a in &anchors {
                bend(&mut p, Point::new(a.x1 - half, entry_rail), a.start());
                bend(&mut p, a.end(), Point::new(a.x2 + half, exit_rail));
            }
            hline(&mut p, Point::new(first.x2 + half, exit_rail), exit - half);
            bend(&mut p, Point::new(exit - half, exit_rail), Point::new(exit, y));
            s.path(group, p)?;
            Ok(Anchor {
                x1: 0.0,
                x2: exit,
                y,
            })
        }
        .boxed_local()
    }
}

impl RenderNode for Match {
    fn kind(&self) -> &'static str {
        "match"
    }

    fn weight(&self) -> u64 {
        u64::from(self.fragments.len() > 1)
    }

    fn children(&self) -> Vec<&dyn RenderNode> {
        self.fragments.iter().map(|f| f as &dyn RenderNode).collect()
    }

    fn draw<'a>(
        &'a self,
        ctx: &'a mut RenderContext<'_>,
        group: ElementId,
    ) -> LocalBoxFuture<'a, RailyardResult<Anchor>> {
        async move {
            let mut items = Vec::with_capacity(self.fragments.len());
            for fragment in &self.fragments {
                items.push(ctx.render_child(fragment, group).await?);
            }
            match items.as_slice() {
                [] => Ok(Anchor {
                    x1: 0.0,
                    x2: 0.0,
                    y: 0.0,
                }),
                [only] => only.placed_anchor(ctx.surface()),
                _ => {
                    let s = ctx.surface();
                    let anchors = space_horizontally(s, &items, SEQUENCE_GAP)?;
                    let mut p = BezPath::new();
                    for pair in anchors.windows(2) {
                        hline(&mut p, pair[0].end(), pair[1].x1);
                    }
                    s.path(group, p)?;
                    let (first, last) = (anchors[0], anchors[anchors.len() - 1]);
                    Ok(Anchor {
                        x1: first.x1,
                        x2: last.x2,
                        y: first.y,
                    })
                }
            }
        }
        .boxed_local()
    }
}

impl RenderNode for MatchFragment {
    fn kind(&self) -> &'static str {
        "match-fragment"
    }

    fn weight(&self) -> u64 {
        u64::from(self.repeat.is_some())
    }

    fn children(&self) -> Vec<&dyn RenderNode> {
        vec![&self.content]
    }

    fn draw<'a>(
        &'a self,
        ctx: &'a mut RenderContext<'_>,
        group: ElementId,
    ) -> LocalBoxFuture<'a, RailyardResult<Anchor>> {
        async move {
            let content = ctx.render_child(&self.content, group).await?;
            let s = ctx.surface();
            let Some(repeat) = self.repeat else {
                return content.placed_anchor(s);
            };

            let cb = content.bbox(s)?;
            s.translate(content.id, Vec2::new(REPEAT_SPACE - cb.x0, 0.0))?;
            let cb = content.bbox(s)?;
            let a = content.placed_anchor(s)?;
            let exit = cb.x1 + REPEAT_SPACE;

            let mut p = BezPath::new();
            hline(&mut p, Point::new(0.0, a.y), a.x1);
            hline(&mut p, a.end(), exit);
            if repeat.has_skip() {
                let top = cb.y0 - REPEAT_SPACE;
                bend(&mut p, Point::new(0.0, a.y), Point::new(cb.x0, top));
                p.line_to((cb.x1, top));
                bend(&mut p, Point::new(cb.x1, top), Point::new(exit, a.y));
            }
            if repeat.has_loop() {
                let bottom = cb.y1 + REPEAT_SPACE;
                let half = REPEAT_SPACE / 2.0;
                p.move_to(a.end());
                p.curve_to(
                    Point::new(a.x2 + half, a.y),
                    Point::new(a.x2 + half, bottom),
                    Point::new(a.x2, bottom),
                );
                p.line_to((a.x1, bottom));
                p.curve_to(
                    Point::new(a.x1 - half, bottom),
                    Point::new(a.x1 - half, a.y),
                    a.start(),
                );
            }
            s.path(group, p)?;

            if let Some(label) = repeat.label().filter(|_| repeat.has_loop()) {
                let caption = s.text(group, Point::ORIGIN, Text::caption(label))?;
                s.add_class(caption, "repeat-label")?;
                let lb = s.bbox(caption)?;
                s.translate(
                    caption,
                    Vec2::new(cb.x1 - lb.width(), cb.y1 + REPEAT_SPACE + 2.0),
                )?;
            }
            Ok(Anchor {
                x1: 0.0,
                x2: exit,
                y: a.y,
            })
        }
        .boxed_local()
    }
}

impl RenderNode for Content {
    fn kind(&self) -> &'static str {
        match self {
            Self::Anchor(_) => "anchor",
            Self::AnyCharacter => "any-character",
            Self::Literal(_) => "literal",
            Self::Escape(_) => "escape",
            Self::BackReference(_) => "back-reference",
            Self::Charset(c) => c.kind(),
            Self::Subexp(s) => s.kind(),
        }
    }

    fn weight(&self) -> u64 {
        match self {
            Self::Charset(c) => c.weight(),
            Self::Subexp(s) => s.weight(),
            _ => 1,
        }
    }

    fn children(&self) -> Vec<&dyn RenderNode> {
        match self {
            Self::Charset(c) => c.children(),
            Self::Subexp(s) => s.children(),
            _ => Vec::new(),
        }
    }

    fn draw<'a>(
        &'a self,
        ctx: &'a mut RenderContext<'_>,
        group: ElementId,
    ) -> LocalBoxFuture<'a, RailyardResult<Anchor>> {
        let text = match self {
            Self::Charset(c) => return c.draw(ctx, group),
            Self::Subexp(s) => return s.draw(ctx, group),
            Self::Anchor(kind) => Text::body(kind.label()),
            Self::AnyCharacter => Text::body("any character"),
            Self::Escape(e) => Text::body(e.label()),
            Self::BackReference(n) => Text::body(format!("Back reference #{n}")),
            Self::Literal(lit) => {
                for esc in &lit.redundant_escapes {
                    ctx.warn(format!(
                        "Redundant escape of \"{}\" at position {}",
                        esc.ch, esc.position
                    ));
                }
                Text {
                    spans: vec![
                        TextSpan::styled("\u{201c}", "quote"),
                        TextSpan::plain(lit.text.clone()),
                        TextSpan::styled("\u{201d}", "quote"),
                    ],
                    size: Text::BODY_SIZE,
                }
            }
        };
        async move { render_label(ctx.surface(), group, text) }.boxed_local()
    }
}

impl RenderNode for Charset {
    fn kind(&self) -> &'static str {
        "charset"
    }

    fn weight(&self) -> u64 {
        1
    }

    fn children(&self) -> Vec<&dyn RenderNode> {
        self.distinct_items()
            .into_iter()
            .map(|i| i as &dyn RenderNode)
            .collect()
    }

    fn draw<'a>(
        &'a self,
        ctx: &'a mut RenderContext<'_>,
        group: ElementId,
    ) -> LocalBoxFuture<'a, RailyardResult<Anchor>> {
        async move {
            if self.items.is_empty() {
                let effect = if self.inverted {
                    "matches any character"
                } else {
                    "never matches"
                };
                ctx.warn(format!(
                    "Empty character set at position {} {effect}",
                    self.span.start
                ));
            }
            for c in self.items.iter().flat_map(|item| match item {
                CharsetItem::Literal(c) => vec![c],
                CharsetItem::Range { first, last } => vec![first, last],
                CharsetItem::Escape(_) => Vec::new(),
            }) {
                if let SetCharKind::Char {
                    ch,
                    redundant: true,
                } = c.kind
                {
                    ctx.warn(format!(
                        "Redundant escape of \"{ch}\" at position {}",
                        c.position
                    ));
                }
            }

            let s = ctx.surface();
            let bg = s.group(group)?;
            let list = s.group(group)?;
            s.add_class(list, "charset-items")?;

            let mut items = Vec::new();
            for item in self.distinct_items() {
                items.push(ctx.render_child(item, list).await?);
            }

            let s = ctx.surface();
            space_vertically(s, &items, STACK_GAP)?;
            let lb = s.bbox(list)?;
            let list = RenderedElement {
                id: list,
                anchor: Anchor::centered(lb),
            };
            let caption = if self.inverted { "None of:" } else { "One of:" };
            labeled_box(s, bg, &list, caption.to_owned(), "charset", SET_PADDING)
        }
        .boxed_local()
    }
}

impl RenderNode for CharsetItem {
    fn kind(&self) -> &'static str {
        match self {
            Self::Literal(_) => "literal",
            Self::Range { .. } => "charset-range",
            Self::Escape(_) => "charset-escape",
        }
    }

    fn weight(&self) -> u64 {
        1
    }

    fn children(&self) -> Vec<&dyn RenderNode> {
        Vec::new()
    }

    fn draw<'a>(
        &'a self,
        ctx: &'a mut RenderContext<'_>,
        group: ElementId,
    ) -> LocalBoxFuture<'a, RailyardResult<Anchor>> {
        async move { render_label(ctx.surface(), group, Text::body(self.label())) }.boxed_local()
    }
}

impl RenderNode for Subexp {
    fn kind(&self) -> &'static str {
        "subexp"
    }

    fn weight(&self) -> u64 {
        u64::from(self.kind != SubexpKind::NonCapture)
    }

    fn children(&self) -> Vec<&dyn RenderNode> {
        vec![&self.regexp]
    }

    fn draw<'a>(
        &'a self,
        ctx: &'a mut RenderContext<'_>,
        group: ElementId,
    ) -> LocalBoxFuture<'a, RailyardResult<Anchor>> {
        async move {
            let label = match &self.kind {
                SubexpKind::Capture => Some(format!("group #{}", ctx.next_group())),
                SubexpKind::Named(name) => Some(format!(
                    "group #{} \u{201c}{name}\u{201d}",
                    ctx.next_group()
                )),
                kind => kind.fixed_label().map(str::to_owned),
            };
            if self.is_empty() {
                ctx.warn(format!("Empty group at position {}", self.span.start));
            }

            let Some(label) = label else {
                let content = ctx.render_child(&self.regexp, group).await?;
                return content.placed_anchor(ctx.surface());
            };
            let bg = ctx.surface().group(group)?;
            let content = ctx.render_child(&self.regexp, group).await?;
            labeled_box(ctx.surface(), bg, &content, label, "subexp", BOX_PADDING)
        }
        .boxed_local()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/nodes.rs"]
mod tests;
