//! Chef: the image tile is pinned for 0.6 viewport heights per text block
//! while blocks reveal one after another, each anchored a further 0.6vh
//! past the pin start.

use std::time::Duration;

use tracing::debug;

use scrollweave_core::config::EasingType;
use scrollweave_core::error::Result;
use scrollweave_core::trigger::{Anchor, Distance, ScrollSpan, SpanEnd, TriggerBinding, TriggerMode};
use scrollweave_core::tween::{StyleDelta, Tween};

use crate::selectors::{CHEF_PIN_WRAP, CHEF_SECTION, CHEF_TEXT, REVEALED};

use super::{stage_hidden, EffectContext};

const BLOCK_RISE: f64 = 24.0;
/// Scroll distance (in viewport heights) granted to each text block
const BLOCK_SPAN_VH: f64 = 0.6;

pub fn install(ctx: &mut EffectContext<'_>) -> Result<()> {
    let (Some(section), Some(pin_wrap)) = (
        ctx.doc.query(CHEF_SECTION),
        ctx.doc.query(CHEF_PIN_WRAP),
    ) else {
        debug!("chef elements missing, skipping module");
        return Ok(());
    };
    let blocks = ctx.doc.query_all(CHEF_TEXT);
    if blocks.is_empty() {
        debug!("no chef text blocks, skipping module");
        return Ok(());
    }

    let span = ScrollSpan::new(
        Anchor::top_top(section),
        SpanEnd::After(Distance::ViewportHeights(BLOCK_SPAN_VH * blocks.len() as f64)),
    );
    let _ = ctx.registry.register(
        ctx.doc,
        TriggerBinding::new(pin_wrap, span, TriggerMode::Pin),
    )?;

    for (i, &block) in blocks.iter().enumerate() {
        if !stage_hidden(ctx.doc, block, BLOCK_RISE) {
            continue;
        }
        let start = Anchor::top_top(section).offset_vh(BLOCK_SPAN_VH * i as f64);
        let _ = ctx.registry.register(
            ctx.doc,
            TriggerBinding::new(
                block,
                ScrollSpan::from_point(start),
                TriggerMode::Toggle { replay: false },
            )
            .on_enter(move |doc, tweens, now| {
                doc.add_class(block, REVEALED);
                tweens.spawn(
                    Tween::new(
                        block,
                        StyleDelta::default()
                            .opacity(0.0, 1.0)
                            .translate_y(BLOCK_RISE, 0.0),
                        Duration::from_millis(800),
                    )
                    .delay(Duration::from_millis(100))
                    .easing(EasingType::QuadOut),
                    now,
                );
            }),
        )?;
    }

    Ok(())
}
