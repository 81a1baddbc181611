//! Story: per-block fade-ins, plus an image crossfade driven by discrete
//! trigger markers. Unlike the one-shot reveals, the crossfade re-fires in
//! both scroll directions so the active image always matches the text
//! beside it. Disabled on the compact layout, where the images stay
//! static. An optional quote block gets a more dramatic entrance.

use std::time::Duration;

use tracing::debug;

use scrollweave_core::config::EasingType;
use scrollweave_core::dom::{Document, NodeId};
use scrollweave_core::error::Result;
use scrollweave_core::trigger::{Anchor, ScrollSpan, SpanEnd, TriggerBinding, TriggerMode};
use scrollweave_core::tween::{StyleDelta, Tween};

use crate::selectors::{
    REVEALED, STORY_IMG, STORY_IMG_ACTIVE, STORY_QUOTE, STORY_TEXT_BLOCK, STORY_TRIGGER,
    STORY_TRIGGER_ATTR,
};

use super::{stage_hidden, EffectContext};

const BLOCK_RISE: f64 = 24.0;
const QUOTE_SHIFT: f64 = -40.0;
const QUOTE_SCALE_FROM: f64 = 0.95;

/// Flag image `index` active and every other image inactive. Idempotent.
pub fn activate_image(doc: &mut Document, images: &[NodeId], index: usize) {
    for (i, &img) in images.iter().enumerate() {
        doc.set_class_enabled(img, STORY_IMG_ACTIVE, i == index);
    }
}

pub fn install(ctx: &mut EffectContext<'_>) -> Result<()> {
    let blocks = ctx.doc.query_all(STORY_TEXT_BLOCK);
    if blocks.is_empty() {
        debug!("no story text blocks, skipping module");
        return Ok(());
    }

    for &block in &blocks {
        if !stage_hidden(ctx.doc, block, BLOCK_RISE) {
            continue;
        }
        let _ = ctx.registry.register(
            ctx.doc,
            TriggerBinding::new(
                block,
                ScrollSpan::from_point(Anchor::top_frac(block, 0.8)),
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
                    .easing(EasingType::QuadOut),
                    now,
                );
            }),
        )?;
    }

    let images = ctx.doc.query_all(STORY_IMG);
    if images.len() > 1 && ctx.mode.is_wide() {
        for marker in ctx.doc.query_all(STORY_TRIGGER) {
            let index = ctx
                .doc
                .attr(marker, STORY_TRIGGER_ATTR)
                .and_then(|v| v.parse::<usize>().ok());
            let Some(index) = index else {
                debug!("story trigger with unparsable index, skipping marker");
                continue;
            };
            if index >= images.len() {
                debug!(index, "story trigger names a missing image, skipping marker");
                continue;
            }
            // Active while the marker occupies the middle band of the
            // viewport: top at 60% down to bottom at 40%
            let span = ScrollSpan::new(
                Anchor::top_frac(marker, 0.6),
                SpanEnd::At(Anchor::new(marker, 1.0, 0.4)),
            );
            let enter_images = images.clone();
            let back_images = images.clone();
            let _ = ctx.registry.register(
                ctx.doc,
                TriggerBinding::new(marker, span, TriggerMode::Toggle { replay: true })
                    .on_enter(move |doc, _, _| activate_image(doc, &enter_images, index))
                    .on_enter_back(move |doc, _, _| activate_image(doc, &back_images, index)),
            )?;
        }
    }

    if let Some(quote) = ctx.doc.query(STORY_QUOTE) {
        if ctx.doc.has_class(quote, REVEALED) {
            let style = ctx.doc.style_mut(quote);
            style.opacity = 1.0;
            style.translate_x = 0.0;
            style.scale = 1.0;
        } else {
            let style = ctx.doc.style_mut(quote);
            style.opacity = 0.0;
            style.translate_x = QUOTE_SHIFT;
            style.scale = QUOTE_SCALE_FROM;
            let _ = ctx.registry.register(
                ctx.doc,
                TriggerBinding::new(
                    quote,
                    ScrollSpan::from_point(Anchor::top_frac(quote, 0.8)),
                    TriggerMode::Toggle { replay: false },
                )
                .on_enter(move |doc, tweens, now| {
                    doc.add_class(quote, REVEALED);
                    tweens.spawn(
                        Tween::new(
                            quote,
                            StyleDelta::default()
                                .opacity(0.0, 1.0)
                                .translate_x(QUOTE_SHIFT, 0.0)
                                .scale(QUOTE_SCALE_FROM, 1.0),
                            Duration::from_millis(1000),
                        )
                        .easing(EasingType::CubicOut),
                        now,
                    );
                }),
            )?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    use scrollweave_core::config::ChoreoConfig;
    use scrollweave_core::trigger::TriggerRegistry;
    use scrollweave_core::tween::TweenBank;
    use scrollweave_core::viewport::LayoutMode;

    struct Fixture {
        doc: Document,
        images: Vec<NodeId>,
        markers: Vec<NodeId>,
    }

    fn story_doc(image_count: usize) -> Fixture {
        let mut doc = Document::new(1440.0, 900.0);
        let section = doc.node(None).rect(0.0, 8000.0, 1440.0, 3000.0).id();
        let images = (0..image_count)
            .map(|_| {
                doc.node(Some(section))
                    .class("story__img")
                    .rect(800.0, 8000.0, 560.0, 700.0)
                    .id()
            })
            .collect();
        let mut markers = Vec::new();
        for i in 0..image_count {
            let marker = doc
                .node(Some(section))
                .class("story__text-block")
                .attr("data-story-trigger", &i.to_string())
                .rect(100.0, 8200.0 + 900.0 * i as f64, 600.0, 300.0)
                .id();
            markers.push(marker);
        }
        Fixture {
            doc,
            images,
            markers,
        }
    }

    fn install_into(fixture: &mut Fixture, registry: &mut TriggerRegistry, mode: LayoutMode) {
        let config = ChoreoConfig::default();
        let mut ctx = EffectContext {
            doc: &mut fixture.doc,
            registry,
            mode,
            config: &config,
        };
        install(&mut ctx).unwrap();
    }

    fn active_images(doc: &Document, images: &[NodeId]) -> Vec<usize> {
        images
            .iter()
            .enumerate()
            .filter(|(_, &img)| doc.has_class(img, STORY_IMG_ACTIVE))
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn test_activation_is_exclusive_and_idempotent() {
        let mut fixture = story_doc(3);
        activate_image(&mut fixture.doc, &fixture.images.clone(), 1);
        assert_eq!(active_images(&fixture.doc, &fixture.images), vec![1]);
        activate_image(&mut fixture.doc, &fixture.images.clone(), 1);
        assert_eq!(active_images(&fixture.doc, &fixture.images), vec![1]);
        activate_image(&mut fixture.doc, &fixture.images.clone(), 2);
        assert_eq!(active_images(&fixture.doc, &fixture.images), vec![2]);
    }

    #[test]
    fn test_crossfade_fires_in_both_directions() {
        let mut fixture = story_doc(2);
        let mut registry = TriggerRegistry::new();
        let mut tweens = TweenBank::new();
        install_into(&mut fixture, &mut registry, LayoutMode::Wide);

        let now = Instant::now();
        let doc = &mut fixture.doc;
        // Marker 0 band: [8200 - 540, 8500 - 360] = [7660, 8140]
        registry.evaluate(doc, &mut tweens, 7700.0, now);
        assert_eq!(active_images(doc, &fixture.images), vec![0]);
        // Marker 1 band: [9100 - 540, 9400 - 360] = [8560, 9040]
        registry.evaluate(doc, &mut tweens, 8600.0, now);
        assert_eq!(active_images(doc, &fixture.images), vec![1]);
        // Scrolling back up: marker 1 re-enters from below, then marker 0
        registry.evaluate(doc, &mut tweens, 9100.0, now);
        registry.evaluate(doc, &mut tweens, 8600.0, now);
        assert_eq!(active_images(doc, &fixture.images), vec![1]);
        registry.evaluate(doc, &mut tweens, 7700.0, now);
        assert_eq!(active_images(doc, &fixture.images), vec![0]);
    }

    #[test]
    fn test_compact_layout_keeps_images_static() {
        let mut fixture = story_doc(2);
        fixture.doc.set_viewport(390.0, 844.0);
        let mut registry = TriggerRegistry::new();
        let mut tweens = TweenBank::new();
        install_into(&mut fixture, &mut registry, LayoutMode::Compact);

        // Only the two text-block reveals, no crossfade bindings
        assert_eq!(registry.len(), 2);
        let now = Instant::now();
        registry.evaluate(&mut fixture.doc, &mut tweens, 20_000.0, now);
        assert!(active_images(&fixture.doc, &fixture.images).is_empty());
    }

    #[test]
    fn test_marker_with_missing_image_is_skipped() {
        let mut fixture = story_doc(2);
        fixture
            .doc
            .set_attr(fixture.markers[1], "data-story-trigger", "7");
        let mut registry = TriggerRegistry::new();
        install_into(&mut fixture, &mut registry, LayoutMode::Wide);
        // Two block reveals + one valid crossfade marker
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_quote_entrance() {
        let mut fixture = story_doc(0);
        let quote = fixture
            .doc
            .node(None)
            .attr("data-story-quote", "")
            .rect(100.0, 12_000.0, 800.0, 200.0)
            .id();
        // A lone quote still needs at least one text block for the module
        let block = fixture
            .doc
            .node(None)
            .class("story__text-block")
            .rect(100.0, 11_000.0, 600.0, 300.0)
            .id();
        let _ = block;
        let mut registry = TriggerRegistry::new();
        let mut tweens = TweenBank::new();
        install_into(&mut fixture, &mut registry, LayoutMode::Wide);
        assert_eq!(registry.len(), 2);

        let t0 = Instant::now();
        registry.evaluate(&mut fixture.doc, &mut tweens, 11_500.0, t0);
        tweens.advance(&mut fixture.doc, t0 + Duration::from_secs(2));
        let style = fixture.doc.style(quote);
        assert_eq!(style.opacity, 1.0);
        assert_eq!(style.translate_x, 0.0);
        assert_eq!(style.scale, 1.0);
    }
}
