//! Gallery: on the wide layout the strip is pinned and translated
//! horizontally in lockstep with scroll, with items scaling up as they
//! cross into view. On the compact layout every item simply fades in on
//! its own vertical trigger.

use std::time::Duration;

use tracing::debug;

use scrollweave_core::config::EasingType;
use scrollweave_core::error::Result;
use scrollweave_core::trigger::{Anchor, Distance, ScrollSpan, SpanEnd, TriggerBinding, TriggerMode};
use scrollweave_core::tween::{StyleDelta, Tween};

use crate::selectors::{GALLERY_ITEM, GALLERY_PIN_WRAP, GALLERY_SECTION, GALLERY_STRIP, REVEALED};

use super::{stage_hidden, EffectContext};

const ITEM_SCALE_FROM: f64 = 0.9;
const ITEM_OPACITY_FROM: f64 = 0.6;
const COMPACT_RISE: f64 = 30.0;
/// Fraction of the viewport width an item's left edge must cross to reveal
const REVEAL_EDGE: f64 = 0.8;

/// Horizontal strip offset at progress `p`, clamped to the overflow extent
pub fn strip_offset(p: f64, strip_width: f64, viewport_width: f64) -> f64 {
    let extent = (strip_width - viewport_width).max(0.0);
    (-p * extent).clamp(-extent, 0.0)
}

pub fn install(ctx: &mut EffectContext<'_>) -> Result<()> {
    let (Some(section), Some(strip)) = (
        ctx.doc.query(GALLERY_SECTION),
        ctx.doc.query(GALLERY_STRIP),
    ) else {
        debug!("gallery elements missing, skipping module");
        return Ok(());
    };
    let items = ctx.doc.query_all(GALLERY_ITEM);
    if items.is_empty() {
        debug!("no gallery items, skipping module");
        return Ok(());
    }

    if ctx.mode.is_compact() {
        for &item in &items {
            if !stage_hidden(ctx.doc, item, COMPACT_RISE) {
                continue;
            }
            let _ = ctx.registry.register(
                ctx.doc,
                TriggerBinding::new(
                    item,
                    ScrollSpan::from_point(Anchor::top_frac(item, 0.9)),
                    TriggerMode::Toggle { replay: false },
                )
                .on_enter(move |doc, tweens, now| {
                    doc.add_class(item, REVEALED);
                    tweens.spawn(
                        Tween::new(
                            item,
                            StyleDelta::default()
                                .opacity(0.0, 1.0)
                                .translate_y(COMPACT_RISE, 0.0),
                            Duration::from_millis(600),
                        )
                        .easing(EasingType::QuadOut),
                        now,
                    );
                }),
            )?;
        }
        return Ok(());
    }

    let Some(pin_wrap) = ctx.doc.query(GALLERY_PIN_WRAP) else {
        debug!("gallery pin wrap missing, skipping module");
        return Ok(());
    };

    let mut revealed = Vec::with_capacity(items.len());
    for &item in &items {
        let done = ctx.doc.has_class(item, REVEALED);
        if !done {
            let style = ctx.doc.style_mut(item);
            style.scale = ITEM_SCALE_FROM;
            style.opacity = ITEM_OPACITY_FROM;
        }
        revealed.push(done);
    }

    // Span length tracks the strip's live overflow so a refresh after
    // image load lengthens the pinned region to match
    let span = ScrollSpan::new(
        Anchor::top_top(section),
        SpanEnd::After(Distance::HorizontalOverflow {
            node: strip,
            extend_by_viewport_height: true,
        }),
    );
    let _ = ctx.registry.register(
        ctx.doc,
        TriggerBinding::new(pin_wrap, span, TriggerMode::Pin).on_update(
            move |doc, tweens, p, now| {
                let viewport_width = doc.viewport().width;
                let offset = strip_offset(p, doc.scroll_width(strip), viewport_width);
                doc.style_mut(strip).translate_x = offset;
                for (j, &item) in items.iter().enumerate() {
                    if revealed[j] {
                        continue;
                    }
                    let left = doc.rect(item).x + offset;
                    if left < viewport_width * REVEAL_EDGE {
                        revealed[j] = true;
                        doc.add_class(item, REVEALED);
                        tweens.spawn(
                            Tween::new(
                                item,
                                StyleDelta::default()
                                    .scale(ITEM_SCALE_FROM, 1.0)
                                    .opacity(ITEM_OPACITY_FROM, 1.0),
                                Duration::from_millis(500),
                            )
                            .easing(EasingType::QuadOut),
                            now,
                        );
                    }
                }
            },
        ),
    )?;

    Ok(())
}
