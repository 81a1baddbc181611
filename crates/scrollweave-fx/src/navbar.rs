//! Navbar state: a replayable scroll toggle for the `scrolled` class and
//! explicit click handling for the mobile menu. Menu state is pure class
//! toggling on the document model, with no trigger bindings involved.

use tracing::debug;

use scrollweave_core::dom::{Document, NodeId};
use scrollweave_core::error::Result;
use scrollweave_core::trigger::{Anchor, ScrollSpan, TriggerBinding, TriggerMode, TriggerRegistry};

use crate::selectors::{MENU_ACTIVE, NAVBAR, NAVBAR_LINK, NAVBAR_LINKS, NAVBAR_TOGGLE, SCROLLED};

/// Scroll depth (px) past which the navbar carries the `scrolled` class
const SCROLLED_THRESHOLD: f64 = 50.0;

pub fn install(doc: &mut Document, registry: &mut TriggerRegistry) -> Result<()> {
    let Some(navbar) = doc.query(NAVBAR) else {
        debug!("navbar missing, skipping module");
        return Ok(());
    };
    let _ = registry.register(
        doc,
        TriggerBinding::new(
            navbar,
            ScrollSpan::from_point(Anchor::top_top(navbar).offset_px(SCROLLED_THRESHOLD)),
            TriggerMode::Toggle { replay: true },
        )
        .on_enter(move |doc, _, _| doc.add_class(navbar, SCROLLED))
        .on_leave_back(move |doc, _, _| doc.remove_class(navbar, SCROLLED)),
    )?;
    Ok(())
}

/// Mobile menu interaction: the toggle flips the menu, a link click or a
/// click anywhere outside closes it
pub struct MobileMenu {
    toggle: NodeId,
    links: NodeId,
}

impl MobileMenu {
    pub fn install(doc: &Document) -> Option<Self> {
        let (Some(toggle), Some(links)) = (doc.query(NAVBAR_TOGGLE), doc.query(NAVBAR_LINKS))
        else {
            debug!("mobile nav elements missing, skipping module");
            return None;
        };
        Some(Self { toggle, links })
    }

    pub fn is_open(&self, doc: &Document) -> bool {
        doc.has_class(self.links, MENU_ACTIVE)
    }

    /// Dispatch a click. `None` means the click landed outside any node
    /// the engine knows about.
    pub fn handle_click(&self, doc: &mut Document, target: Option<NodeId>) {
        match target {
            Some(t) if doc.is_within(t, self.toggle) => {
                let open = !self.is_open(doc);
                self.set_open(doc, open);
            }
            Some(t) if doc.is_within(t, self.links) => {
                // Only an actual link closes the menu from inside
                if doc.has_class(t, NAVBAR_LINK.trim_start_matches('.')) {
                    self.set_open(doc, false);
                }
            }
            _ => self.set_open(doc, false),
        }
    }

    fn set_open(&self, doc: &mut Document, open: bool) {
        doc.set_class_enabled(self.links, MENU_ACTIVE, open);
        doc.set_class_enabled(self.toggle, MENU_ACTIVE, open);
    }
}
