//! FAQ: one-shot staggered fade-ins, nothing else.

use std::time::Duration;

use tracing::debug;

use scrollweave_core::config::EasingType;
use scrollweave_core::error::Result;
use scrollweave_core::trigger::{Anchor, ScrollSpan, TriggerBinding, TriggerMode};
use scrollweave_core::tween::{StyleDelta, Tween};

use crate::selectors::{FAQ_ITEM, REVEALED};

use super::{stage_hidden, EffectContext};

const ITEM_RISE: f64 = 20.0;
const ITEM_STAGGER: f64 = 0.1;

pub fn install(ctx: &mut EffectContext<'_>) -> Result<()> {
    let items = ctx.doc.query_all(FAQ_ITEM);
    if items.is_empty() {
        debug!("no faq items, skipping module");
        return Ok(());
    }

    for (i, &item) in items.iter().enumerate() {
        if !stage_hidden(ctx.doc, item, ITEM_RISE) {
            continue;
        }
        let delay = ITEM_STAGGER * i as f64;
        let _ = ctx.registry.register(
            ctx.doc,
            TriggerBinding::new(
                item,
                ScrollSpan::from_point(Anchor::top_frac(item, 0.88)),
                TriggerMode::Toggle { replay: false },
            )
            .on_enter(move |doc, tweens, now| {
                doc.add_class(item, REVEALED);
                tweens.spawn(
                    Tween::new(
                        item,
                        StyleDelta::default()
                            .opacity(0.0, 1.0)
                            .translate_y(ITEM_RISE, 0.0),
                        Duration::from_millis(600),
                    )
                    .delay(Duration::from_secs_f64(delay))
                    .easing(EasingType::QuadOut),
                    now,
                );
            }),
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    use scrollweave_core::config::ChoreoConfig;
    use scrollweave_core::dom::{Document, NodeId};
    use scrollweave_core::trigger::TriggerRegistry;
    use scrollweave_core::tween::TweenBank;
    use scrollweave_core::viewport::LayoutMode;

    fn faq_doc(count: usize) -> (Document, Vec<NodeId>) {
        let mut doc = Document::new(1440.0, 900.0);
        let items = (0..count)
            .map(|i| {
                doc.node(None)
                    .attr("data-faq", "")
                    .rect(200.0, 10_000.0 + 120.0 * i as f64, 1000.0, 100.0)
                    .id()
            })
            .collect();
        (doc, items)
    }

    #[test]
    fn test_absent_items_registers_nothing() {
        let (mut doc, _) = faq_doc(0);
        let mut registry = TriggerRegistry::new();
        let config = ChoreoConfig::default();
        let mut ctx = EffectContext {
            doc: &mut doc,
            registry: &mut registry,
            mode: LayoutMode::Wide,
            config: &config,
        };
        install(&mut ctx).unwrap();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_staggered_one_shot_reveal() {
        let (mut doc, items) = faq_doc(4);
        let mut registry = TriggerRegistry::new();
        let mut tweens = TweenBank::new();
        let config = ChoreoConfig::default();
        let mut ctx = EffectContext {
            doc: &mut doc,
            registry: &mut registry,
            mode: LayoutMode::Wide,
            config: &config,
        };
        install(&mut ctx).unwrap();
        assert_eq!(registry.len(), 4);

        let t0 = Instant::now();
        registry.evaluate(&mut doc, &mut tweens, 10_000.0, t0);
        assert_eq!(tweens.len(), 4);

        // Item 0 (no delay) lands before item 3 (0.3s delay)
        tweens.advance(&mut doc, t0 + Duration::from_millis(650));
        assert_eq!(doc.style(items[0]).opacity, 1.0);
        assert!(doc.style(items[3]).opacity < 1.0);

        tweens.advance(&mut doc, t0 + Duration::from_millis(1000));
        for &item in &items {
            assert_eq!(doc.style(item).opacity, 1.0);
        }
        assert!(tweens.is_empty());
    }
}
