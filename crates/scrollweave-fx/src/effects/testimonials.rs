//! Testimonials: the pin-wrap is held for one viewport height per card
//! while cards crossfade through staged sub-ranges of the pinned span.
//! A progress dot per card highlights the card currently on screen.

use tracing::debug;

use scrollweave_core::config::EasingType;
use scrollweave_core::error::Result;
use scrollweave_core::scroll::easing::EasingTypeExt;
use scrollweave_core::trigger::{Anchor, Distance, ScrollSpan, SpanEnd, TriggerBinding, TriggerMode};

use crate::selectors::{
    DOT_ACTIVE, TESTIMONIALS_DOT, TESTIMONIALS_PIN_WRAP, TESTIMONIALS_SECTION, TESTIMONIAL_CARD,
};

use super::EffectContext;

const ENTER_SCALE: f64 = 0.85;
const EXIT_SCALE: f64 = 0.8;
const ENTER_RISE: f64 = 40.0;
const EXIT_LIFT: f64 = -60.0;

/// Presentation of one card at a staged timeline position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardState {
    pub opacity: f64,
    pub scale: f64,
    pub translate_y: f64,
}

const FULL: CardState = CardState {
    opacity: 1.0,
    scale: 1.0,
    translate_y: 0.0,
};

/// Card `index`'s state at timeline position `t` in [0, count].
/// Card n is fully visible over [n, n+1], enters over [n-1, n] (card 0
/// is visible from the start with no transition-in), and exits over
/// [n+1, n+2] (the last card never exits).
pub fn card_state(index: usize, count: usize, t: f64) -> CardState {
    let i = index as f64;
    let t = t.clamp(0.0, count as f64);
    if t < i {
        let k = EasingType::QuadInOut.apply((t - (i - 1.0)).clamp(0.0, 1.0));
        CardState {
            opacity: k,
            scale: ENTER_SCALE + (1.0 - ENTER_SCALE) * k,
            translate_y: ENTER_RISE * (1.0 - k),
        }
    } else if index + 1 == count || t <= i + 1.0 {
        FULL
    } else {
        let k = EasingType::QuadInOut.apply((t - (i + 1.0)).clamp(0.0, 1.0));
        CardState {
            opacity: 1.0 - k,
            scale: 1.0 - (1.0 - EXIT_SCALE) * k,
            translate_y: EXIT_LIFT * k,
        }
    }
}

/// Index of the highlighted progress dot for pin progress `p` in [0, 1]
pub fn active_dot(p: f64, count: usize) -> usize {
    ((p * count as f64).floor() as usize).min(count.saturating_sub(1))
}

pub fn install(ctx: &mut EffectContext<'_>) -> Result<()> {
    let (Some(section), Some(pin_wrap)) = (
        ctx.doc.query(TESTIMONIALS_SECTION),
        ctx.doc.query(TESTIMONIALS_PIN_WRAP),
    ) else {
        debug!("testimonials elements missing, skipping module");
        return Ok(());
    };
    let cards = ctx.doc.query_all(TESTIMONIAL_CARD);
    if cards.len() < 2 {
        debug!(count = cards.len(), "fewer than two testimonial cards, skipping module");
        return Ok(());
    }
    let dots = ctx.doc.query_all(TESTIMONIALS_DOT);
    let count = cards.len();

    let span = ScrollSpan::new(
        Anchor::top_top(section),
        SpanEnd::After(Distance::ViewportHeights(count as f64)),
    );
    let _ = ctx.registry.register(
        ctx.doc,
        TriggerBinding::new(pin_wrap, span, TriggerMode::Pin).on_update(move |doc, _, p, _| {
            let t = p * count as f64;
            for (i, &card) in cards.iter().enumerate() {
                let state = card_state(i, count, t);
                let style = doc.style_mut(card);
                style.opacity = state.opacity;
                style.scale = state.scale;
                style.translate_y = state.translate_y;
            }
            let active = active_dot(p, count);
            for (i, &dot) in dots.iter().enumerate() {
                doc.set_class_enabled(dot, DOT_ACTIVE, i == active);
            }
        }),
    )?;

    Ok(())
}
