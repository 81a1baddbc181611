//! CTA: a brief non-scrubbed pin to hold the closing section, with its
//! children revealing on a short stagger.

use std::time::Duration;

use tracing::debug;

use scrollweave_core::config::EasingType;
use scrollweave_core::error::Result;
use scrollweave_core::trigger::{Anchor, Distance, ScrollSpan, SpanEnd, TriggerBinding, TriggerMode};
use scrollweave_core::tween::{StyleDelta, Tween};

use crate::selectors::{CTA_REVEAL, CTA_SECTION, REVEALED};

use super::{stage_hidden, EffectContext};

const REVEAL_RISE: f64 = 24.0;
const REVEAL_STAGGER: f64 = 0.15;
/// Pin distance in viewport heights
const PIN_SPAN_VH: f64 = 0.5;

pub fn install(ctx: &mut EffectContext<'_>) -> Result<()> {
    let Some(section) = ctx.doc.query(CTA_SECTION) else {
        debug!("cta section missing, skipping module");
        return Ok(());
    };
    let reveals = ctx.doc.query_all(CTA_REVEAL);
    if reveals.is_empty() {
        debug!("no cta reveal elements, skipping module");
        return Ok(());
    }

    let pin_span = ScrollSpan::new(
        Anchor::top_top(section),
        SpanEnd::After(Distance::ViewportHeights(PIN_SPAN_VH)),
    );
    let _ = ctx.registry.register(
        ctx.doc,
        TriggerBinding::new(section, pin_span, TriggerMode::Pin),
    )?;

    let pending: Vec<_> = reveals
        .into_iter()
        .filter(|&reveal| stage_hidden(ctx.doc, reveal, REVEAL_RISE))
        .collect();
    if pending.is_empty() {
        return Ok(());
    }
    let _ = ctx.registry.register(
        ctx.doc,
        TriggerBinding::new(
            section,
            ScrollSpan::from_point(Anchor::top_frac(section, 0.6)),
            TriggerMode::Toggle { replay: false },
        )
        .on_enter(move |doc, tweens, now| {
            for (j, &reveal) in pending.iter().enumerate() {
                doc.add_class(reveal, REVEALED);
                tweens.spawn(
                    Tween::new(
                        reveal,
                        StyleDelta::default()
                            .opacity(0.0, 1.0)
                            .translate_y(REVEAL_RISE, 0.0),
                        Duration::from_millis(800),
                    )
                    .delay(Duration::from_secs_f64(REVEAL_STAGGER * j as f64))
                    .easing(EasingType::QuadOut),
                    now,
                );
            }
        }),
    )?;

    Ok(())
}
