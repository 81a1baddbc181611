//! Scroll spans
//!
//! A span maps the provider's pixel position into a binding's normalized
//! progress. Anchors are declarative (element edge vs viewport edge plus
//! offsets) and resolve against current geometry, so a refresh after
//! image load or resize only needs to re-run resolution.

use crate::dom::{Document, NodeId};

/// Start condition: "when this edge of the element meets this point of the
/// viewport", expressed as fractions plus optional px / viewport-relative
/// offsets
#[derive(Debug, Clone, Copy)]
pub struct Anchor {
    pub node: NodeId,
    /// 0.0 = element top, 1.0 = element bottom
    pub node_edge: f64,
    /// 0.0 = viewport top, 1.0 = viewport bottom
    pub viewport_edge: f64,
    /// Extra offset in px
    pub offset_px: f64,
    /// Extra offset in viewport heights
    pub offset_vh: f64,
}

impl Anchor {
    pub fn new(node: NodeId, node_edge: f64, viewport_edge: f64) -> Self {
        Self {
            node,
            node_edge,
            viewport_edge,
            offset_px: 0.0,
            offset_vh: 0.0,
        }
    }

    /// Element top meets viewport top
    pub fn top_top(node: NodeId) -> Self {
        Self::new(node, 0.0, 0.0)
    }

    /// Element top meets a fraction of the viewport height
    pub fn top_frac(node: NodeId, viewport_edge: f64) -> Self {
        Self::new(node, 0.0, viewport_edge)
    }

    /// Element bottom meets viewport top
    pub fn bottom_top(node: NodeId) -> Self {
        Self::new(node, 1.0, 0.0)
    }

    pub fn offset_px(mut self, px: f64) -> Self {
        self.offset_px = px;
        self
    }

    pub fn offset_vh(mut self, vh: f64) -> Self {
        self.offset_vh = vh;
        self
    }

    /// Scroll position (px) at which this anchor condition is met
    pub fn resolve(&self, doc: &Document) -> f64 {
        let rect = doc.rect(self.node);
        let viewport = doc.viewport();
        rect.y + rect.height * self.node_edge - viewport.height * self.viewport_edge
            + self.offset_px
            + self.offset_vh * viewport.height
    }
}

/// Length of a span past its start anchor. Geometry-dependent variants
/// re-resolve on every refresh, matching content that lays out after
/// bindings were first computed.
#[derive(Debug, Clone, Copy)]
pub enum Distance {
    Px(f64),
    /// Multiples of the viewport height
    ViewportHeights(f64),
    /// Horizontal content overflow of a node (its scroll width minus the
    /// viewport width), optionally extended by one viewport height
    HorizontalOverflow {
        node: NodeId,
        extend_by_viewport_height: bool,
    },
}

impl Distance {
    pub fn resolve(&self, doc: &Document) -> f64 {
        let viewport = doc.viewport();
        match *self {
            Self::Px(px) => px,
            Self::ViewportHeights(n) => n * viewport.height,
            Self::HorizontalOverflow {
                node,
                extend_by_viewport_height,
            } => {
                let overflow = (doc.scroll_width(node) - viewport.width).max(0.0);
                if extend_by_viewport_height {
                    overflow + viewport.height
                } else {
                    overflow
                }
            }
        }
    }
}

/// End condition: an anchor of its own, or a distance past the start
#[derive(Debug, Clone, Copy)]
pub enum SpanEnd {
    At(Anchor),
    After(Distance),
}

/// The scroll interval a binding is evaluated over
#[derive(Debug, Clone, Copy)]
pub struct ScrollSpan {
    pub start: Anchor,
    pub end: SpanEnd,
}

impl ScrollSpan {
    pub fn new(start: Anchor, end: SpanEnd) -> Self {
        Self { start, end }
    }

    /// Span with an effectively open end; used by class-style toggles
    /// that only care about crossing the start condition
    pub fn from_point(start: Anchor) -> Self {
        Self {
            start,
            end: SpanEnd::After(Distance::Px(99_999.0)),
        }
    }

    /// Resolve to (start_px, end_px) against current geometry
    pub fn resolve(&self, doc: &Document) -> (f64, f64) {
        let start = self.start.resolve(doc);
        let end = match self.end {
            SpanEnd::At(anchor) => anchor.resolve(doc),
            SpanEnd::After(distance) => start + distance.resolve(doc),
        };
        (start, end)
    }
}

/// Unclamped progress of `position` through [start, end]
#[inline]
pub fn raw_progress(start: f64, end: f64, position: f64) -> f64 {
    let length = end - start;
    if length.abs() < f64::EPSILON {
        if position < start {
            return -1.0;
        }
        return 1.0;
    }
    (position - start) / length
}
