//! Mission: staggered one-shot card entrances, with nested list items
//! staggering further inside each card.

use std::time::Duration;

use tracing::debug;

use scrollweave_core::config::EasingType;
use scrollweave_core::error::Result;
use scrollweave_core::trigger::{Anchor, ScrollSpan, TriggerBinding, TriggerMode};
use scrollweave_core::tween::{StyleDelta, Tween};

use crate::selectors::{MISSION_CARD, REVEALED, REVEAL_ITEM};

use super::{stage_hidden, EffectContext};

const CARD_RISE: f64 = 24.0;
const ITEM_RISE: f64 = 16.0;
const CARD_STAGGER: f64 = 0.3;
const ITEM_STAGGER: f64 = 0.15;
const ITEM_HEAD_START: f64 = 0.4;

pub fn install(ctx: &mut EffectContext<'_>) -> Result<()> {
    let cards = ctx.doc.query_all(MISSION_CARD);
    if cards.is_empty() {
        debug!("no mission cards, skipping module");
        return Ok(());
    }

    for (i, &card) in cards.iter().enumerate() {
        let card_delay = CARD_STAGGER * i as f64;

        if stage_hidden(ctx.doc, card, CARD_RISE) {
            let _ = ctx.registry.register(
                ctx.doc,
                TriggerBinding::new(
                    card,
                    ScrollSpan::from_point(Anchor::top_frac(card, 0.85)),
                    TriggerMode::Toggle { replay: false },
                )
                .on_enter(move |doc, tweens, now| {
                    doc.add_class(card, REVEALED);
                    tweens.spawn(
                        Tween::new(
                            card,
                            StyleDelta::default()
                                .opacity(0.0, 1.0)
                                .translate_y(CARD_RISE, 0.0),
                            Duration::from_millis(800),
                        )
                        .delay(Duration::from_secs_f64(card_delay))
                        .easing(EasingType::QuadOut),
                        now,
                    );
                }),
            )?;
        }

        let items: Vec<_> = ctx
            .doc
            .query_all_within(card, REVEAL_ITEM)
            .into_iter()
            .filter(|&item| stage_hidden(ctx.doc, item, ITEM_RISE))
            .collect();
        if items.is_empty() {
            continue;
        }
        let _ = ctx.registry.register(
            ctx.doc,
            TriggerBinding::new(
                card,
                ScrollSpan::from_point(Anchor::top_frac(card, 0.80)),
                TriggerMode::Toggle { replay: false },
            )
            .on_enter(move |doc, tweens, now| {
                for (j, &item) in items.iter().enumerate() {
                    doc.add_class(item, REVEALED);
                    tweens.spawn(
                        Tween::new(
                            item,
                            StyleDelta::default()
                                .opacity(0.0, 1.0)
                                .translate_y(ITEM_RISE, 0.0),
                            Duration::from_millis(600),
                        )
                        .delay(Duration::from_secs_f64(
                            card_delay + ITEM_HEAD_START + ITEM_STAGGER * j as f64,
                        ))
                        .easing(EasingType::QuadOut),
                        now,
                    );
                }
            }),
        )?;
    }

    Ok(())
}
