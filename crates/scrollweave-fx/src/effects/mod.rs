//! Effect modules
//!
//! One module per page section, each following the same contract: query
//! the document once, no-op silently when required elements are absent,
//! register trigger bindings, and leave all timed work to the tween bank.
//! Installation order is fixed by the orchestrator; it only affects
//! registration-order tie-breaks, never correctness.

pub mod chef;
pub mod cta;
pub mod faq;
pub mod gallery;
pub mod hero;
pub mod mission;
pub mod story;
pub mod testimonials;

use scrollweave_core::config::ChoreoConfig;
use scrollweave_core::dom::{Document, NodeId};
use scrollweave_core::trigger::TriggerRegistry;
use scrollweave_core::viewport::LayoutMode;

use crate::selectors::REVEALED;

/// Shared installation context handed to every effect module
pub struct EffectContext<'a> {
    pub doc: &'a mut Document,
    pub registry: &'a mut TriggerRegistry,
    pub mode: LayoutMode,
    pub config: &'a ChoreoConfig,
}

/// Paint the pre-entrance state of a revealable element: invisible and
/// shifted down, matching what the stylesheet establishes before the
/// entrance tween runs. An element a previous cycle already revealed is
/// settled at its final values instead, so reinstallation after a resize
/// never hides content that is on screen. Returns whether the element
/// still needs an entrance binding.
pub(crate) fn stage_hidden(doc: &mut Document, id: NodeId, rise_px: f64) -> bool {
    if doc.has_class(id, REVEALED) {
        let style = doc.style_mut(id);
        style.opacity = 1.0;
        style.translate_y = 0.0;
        false
    } else {
        let style = doc.style_mut(id);
        style.opacity = 0.0;
        style.translate_y = rise_px;
        true
    }
}
