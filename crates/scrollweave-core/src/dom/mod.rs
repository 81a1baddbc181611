//! Headless document model
//!
//! A small node arena standing in for the page the choreography runs
//! against: classes, attributes, layout geometry, and presentation style.
//! Selector-addressable so the effect modules keep the same
//! selector-to-behavior protocol the markup defines, and fully inspectable
//! so every visual state is assertable in tests.

mod selector;

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Error, Result};

use selector::Selector;

/// Index into the document's node arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Layout geometry in page coordinates (y grows with scroll depth)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }
}

/// Mutable presentation state of a node
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub opacity: f64,
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale: f64,
    /// Visually fixed to the viewport while a pin span is traversed
    pub pinned: bool,
    /// Placeholder spacer height compensating flow while pinned
    pub spacer: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
            scale: 1.0,
            pinned: false,
            spacer: 0.0,
        }
    }
}

/// Viewport dimensions in px
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug)]
pub(crate) struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    pub(crate) classes: BTreeSet<String>,
    pub(crate) attrs: BTreeMap<String, String>,
    rect: Rect,
    style: Style,
    detached: bool,
    playing: bool,
}

impl Node {
    fn new(parent: Option<NodeId>) -> Self {
        Self {
            parent,
            children: Vec::new(),
            classes: BTreeSet::new(),
            attrs: BTreeMap::new(),
            rect: Rect::default(),
            style: Style::default(),
            detached: false,
            playing: false,
        }
    }
}

/// The document the choreography engine reads and mutates
#[derive(Debug)]
pub struct Document {
    nodes: Vec<Node>,
    viewport: Viewport,
}

impl Document {
    pub fn new(viewport_width: f64, viewport_height: f64) -> Self {
        Self {
            nodes: Vec::new(),
            viewport: Viewport {
                width: viewport_width,
                height: viewport_height,
            },
        }
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport = Viewport { width, height };
    }

    /// Start building a new node; attaches under `parent` when given
    pub fn node(&mut self, parent: Option<NodeId>) -> NodeBuilder<'_> {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(parent));
        if let Some(parent) = parent {
            self.nodes[parent.0].children.push(id);
        }
        NodeBuilder { doc: self, id }
    }

    /// Whether the id names a node attached to this document
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.get(id.0).is_some_and(|n| !n.detached)
    }

    /// Remove a node (and its subtree root link) from the document flow.
    /// The arena slot survives so stale ids stay distinguishable.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|c| *c != id);
        }
        self.nodes[id.0].detached = true;
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Whether `id` is `ancestor` itself or sits below it
    pub fn is_within(&self, id: NodeId, ancestor: NodeId) -> bool {
        let mut cursor = Some(id);
        while let Some(node) = cursor {
            if node == ancestor {
                return true;
            }
            cursor = self.nodes[node.0].parent;
        }
        false
    }

    pub fn query(&self, selector: &str) -> Option<NodeId> {
        let sel = Selector::parse(selector)?;
        self.iter_attached().find(|id| sel.matches(&self.nodes[id.0]))
    }

    pub fn query_all(&self, selector: &str) -> Vec<NodeId> {
        let Some(sel) = Selector::parse(selector) else {
            return Vec::new();
        };
        self.iter_attached()
            .filter(|id| sel.matches(&self.nodes[id.0]))
            .collect()
    }

    pub fn query_within(&self, root: NodeId, selector: &str) -> Option<NodeId> {
        self.query_all_within(root, selector).into_iter().next()
    }

    /// Descendants of `root` (excluding `root`) matching the selector,
    /// in document order
    pub fn query_all_within(&self, root: NodeId, selector: &str) -> Vec<NodeId> {
        let Some(sel) = Selector::parse(selector) else {
            return Vec::new();
        };
        let mut found = Vec::new();
        let mut stack: Vec<NodeId> = self.nodes[root.0].children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            if sel.matches(&self.nodes[id.0]) {
                found.push(id);
            }
            stack.extend(self.nodes[id.0].children.iter().rev().copied());
        }
        found
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.nodes[id.0].classes.contains(class)
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) {
        let _ = self.nodes[id.0].classes.insert(class.to_owned());
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        let _ = self.nodes[id.0].classes.remove(class);
    }

    /// Force a class on or off, like `classList.toggle(class, on)`
    pub fn set_class_enabled(&mut self, id: NodeId, class: &str, on: bool) {
        if on {
            self.add_class(id, class);
        } else {
            self.remove_class(id, class);
        }
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.nodes[id.0].attrs.get(name).map(String::as_str)
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        let _ = self.nodes[id.0]
            .attrs
            .insert(name.to_owned(), value.to_owned());
    }

    pub fn rect(&self, id: NodeId) -> Rect {
        self.nodes[id.0].rect
    }

    pub fn set_rect(&mut self, id: NodeId, rect: Rect) {
        self.nodes[id.0].rect = rect;
    }

    pub fn style(&self, id: NodeId) -> &Style {
        &self.nodes[id.0].style
    }

    pub fn style_mut(&mut self, id: NodeId) -> &mut Style {
        &mut self.nodes[id.0].style
    }

    /// Total scrollable height of the page: the deepest attached node's
    /// bottom edge plus any live pin spacers holding flow open
    pub fn scroll_height(&self) -> f64 {
        self.iter_attached()
            .map(|id| {
                let node = &self.nodes[id.0];
                node.rect.bottom() + node.style.spacer
            })
            .fold(self.viewport.height, f64::max)
    }

    /// Content width as laid out, like `scrollWidth`: extends past the
    /// node's own box when children overflow horizontally
    pub fn scroll_width(&self, id: NodeId) -> f64 {
        let node = &self.nodes[id.0];
        let content_right = node
            .children
            .iter()
            .map(|c| self.nodes[c.0].rect.right())
            .fold(node.rect.right(), f64::max);
        content_right - node.rect.x
    }

    /// Attempt media playback on a node. Rejection is simulated by the
    /// `data-autoplay-blocked` attribute so both arms are exercisable.
    pub fn play_media(&mut self, id: NodeId) -> Result<()> {
        if self.nodes[id.0].attrs.contains_key("data-autoplay-blocked") {
            return Err(Error::PlaybackRejected);
        }
        self.nodes[id.0].playing = true;
        Ok(())
    }

    pub fn pause_media(&mut self, id: NodeId) {
        self.nodes[id.0].playing = false;
    }

    pub fn is_playing(&self, id: NodeId) -> bool {
        self.nodes[id.0].playing
    }

    fn iter_attached(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| !n.detached)
            .map(|(i, _)| NodeId(i))
    }
}

/// Fluent construction of a node, used heavily by tests and embedders
pub struct NodeBuilder<'a> {
    doc: &'a mut Document,
    id: NodeId,
}

impl NodeBuilder<'_> {
    pub fn class(self, class: &str) -> Self {
        self.doc.add_class(self.id, class);
        self
    }

    pub fn attr(self, name: &str, value: &str) -> Self {
        self.doc.set_attr(self.id, name, value);
        self
    }

    pub fn rect(self, x: f64, y: f64, width: f64, height: f64) -> Self {
        self.doc.set_rect(self.id, Rect::new(x, y, width, height));
        self
    }

    pub fn opacity(self, opacity: f64) -> Self {
        self.doc.style_mut(self.id).opacity = opacity;
        self
    }

    pub fn id(self) -> NodeId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_doc() -> (Document, NodeId, NodeId, NodeId) {
        let mut doc = Document::new(1440.0, 900.0);
        let section = doc
            .node(None)
            .class("mission-section")
            .rect(0.0, 900.0, 1440.0, 1200.0)
            .id();
        let card = doc
            .node(Some(section))
            .class("mission__card")
            .rect(100.0, 1000.0, 400.0, 300.0)
            .id();
        let item = doc
            .node(Some(card))
            .attr("data-reveal-item", "")
            .rect(120.0, 1050.0, 360.0, 40.0)
            .id();
        (doc, section, card, item)
    }

    #[test]
    fn test_query_by_class_and_attr() {
        let (doc, _, card, item) = sample_doc();
        assert_eq!(doc.query(".mission__card"), Some(card));
        assert_eq!(doc.query_all("[data-reveal-item]"), vec![item]);
        assert_eq!(doc.query(".absent"), None);
    }

    #[test]
    fn test_scoped_query_excludes_root_and_siblings() {
        let (mut doc, section, card, item) = sample_doc();
        let other = doc.node(None).attr("data-reveal-item", "").id();
        assert_eq!(doc.query_all_within(card, "[data-reveal-item]"), vec![item]);
        assert_eq!(
            doc.query_all_within(section, "[data-reveal-item]"),
            vec![item]
        );
        assert!(doc.query_all("[data-reveal-item]").contains(&other));
    }

    #[test]
    fn test_detach_removes_from_queries() {
        let (mut doc, _, card, _) = sample_doc();
        assert!(doc.contains(card));
        doc.detach(card);
        assert!(!doc.contains(card));
        assert_eq!(doc.query(".mission__card"), None);
    }

    #[test]
    fn test_is_within() {
        let (mut doc, section, _card, item) = sample_doc();
        assert!(doc.is_within(item, section));
        assert!(doc.is_within(item, item));
        let stranger = doc.node(None).id();
        assert!(!doc.is_within(stranger, section));
    }

    #[test]
    fn test_scroll_width_overflow() {
        let mut doc = Document::new(1000.0, 800.0);
        let strip = doc
            .node(None)
            .class("gallery__strip")
            .rect(0.0, 0.0, 1000.0, 600.0)
            .id();
        let _a = doc.node(Some(strip)).rect(0.0, 0.0, 800.0, 600.0).id();
        let _b = doc.node(Some(strip)).rect(800.0, 0.0, 800.0, 600.0).id();
        let _c = doc.node(Some(strip)).rect(1600.0, 0.0, 800.0, 600.0).id();
        assert_eq!(doc.scroll_width(strip), 2400.0);
    }

    #[test]
    fn test_scroll_height_includes_pin_spacer() {
        let (mut doc, section, _, _) = sample_doc();
        assert_eq!(doc.scroll_height(), 2100.0);
        doc.style_mut(section).spacer = 1800.0;
        assert_eq!(doc.scroll_height(), 3900.0);
        doc.style_mut(section).spacer = 0.0;
        doc.detach(section);
        // Children of a detached root still report their own geometry
        assert_eq!(doc.scroll_height(), 1300.0);
    }

    #[test]
    fn test_media_playback_rejection() {
        let mut doc = Document::new(1440.0, 900.0);
        let ok = doc.node(None).attr("data-video", "").id();
        let blocked = doc
            .node(None)
            .attr("data-video", "")
            .attr("data-autoplay-blocked", "")
            .id();
        assert!(doc.play_media(ok).is_ok());
        assert!(doc.is_playing(ok));
        assert!(matches!(
            doc.play_media(blocked),
            Err(Error::PlaybackRejected)
        ));
        assert!(!doc.is_playing(blocked));
    }
}
