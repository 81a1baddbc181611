//! Hero: parallax on the slideshow, content fade-out, scroll-indicator
//! decay over the first fifth of the hero, all scrubbed against the hero's
//! own height. Parallax distance shrinks on the compact layout.

use tracing::debug;

use scrollweave_core::error::Result;
use scrollweave_core::trigger::{Anchor, ScrollSpan, SpanEnd, TriggerBinding, TriggerMode};

use crate::selectors::{HERO, HERO_CONTENT, HERO_SCROLL_INDICATOR, HERO_SLIDESHOW, VIDEO};

use super::EffectContext;

const PARALLAX_WIDE: f64 = 200.0;
const PARALLAX_COMPACT: f64 = 80.0;
const CONTENT_RISE: f64 = -120.0;
const SLIDESHOW_SCALE: f64 = 0.08;

pub fn install(ctx: &mut EffectContext<'_>) -> Result<()> {
    let (Some(hero), Some(slideshow), Some(content)) = (
        ctx.doc.query(HERO),
        ctx.doc.query(HERO_SLIDESHOW),
        ctx.doc.query(HERO_CONTENT),
    ) else {
        debug!("hero elements missing, skipping module");
        return Ok(());
    };

    let parallax = if ctx.mode.is_compact() {
        PARALLAX_COMPACT
    } else {
        PARALLAX_WIDE
    };

    let span = ScrollSpan::new(Anchor::top_top(hero), SpanEnd::At(Anchor::bottom_top(hero)));
    let _ = ctx.registry.register(
        ctx.doc,
        TriggerBinding::new(hero, span, TriggerMode::Scrub).on_update(move |doc, _, p, _| {
            let slide_style = doc.style_mut(slideshow);
            slide_style.translate_y = parallax * p;
            slide_style.scale = 1.0 + SLIDESHOW_SCALE * p;
            let content_style = doc.style_mut(content);
            content_style.translate_y = CONTENT_RISE * p;
            content_style.opacity = 1.0 - p;
        }),
    )?;

    if let Some(indicator) = ctx.doc.query(HERO_SCROLL_INDICATOR) {
        // First 20% of the hero's height
        let span = ScrollSpan::new(
            Anchor::top_top(hero),
            SpanEnd::At(Anchor::new(hero, 0.2, 0.0)),
        );
        let _ = ctx.registry.register(
            ctx.doc,
            TriggerBinding::new(hero, span, TriggerMode::Scrub).on_update(move |doc, _, p, _| {
                doc.style_mut(indicator).opacity = (1.0 - p * 3.0).max(0.0);
            }),
        )?;
    }

    if ctx.config.features.pause_video_offscreen {
        let videos = ctx.doc.query_all_within(hero, VIDEO);
        if !videos.is_empty() {
            let span = ScrollSpan::from_point(Anchor::bottom_top(hero));
            let pause_set = videos.clone();
            let resume_set = videos;
            let _ = ctx.registry.register(
                ctx.doc,
                TriggerBinding::new(hero, span, TriggerMode::Toggle { replay: true })
                    .on_enter(move |doc, _, _| {
                        for &video in &pause_set {
                            doc.pause_media(video);
                        }
                    })
                    .on_leave_back(move |doc, _, _| {
                        for &video in &resume_set {
                            if doc.play_media(video).is_err() {
                                debug!("video resume rejected, leaving paused");
                            }
                        }
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
    use scrollweave_core::dom::{Document, NodeId};
    use scrollweave_core::trigger::TriggerRegistry;
    use scrollweave_core::tween::TweenBank;
    use scrollweave_core::viewport::LayoutMode;

    fn hero_doc() -> (Document, NodeId, NodeId, NodeId) {
        let mut doc = Document::new(1440.0, 900.0);
        let hero = doc.node(None).class("hero").rect(0.0, 0.0, 1440.0, 900.0).id();
        let slideshow = doc
            .node(Some(hero))
            .class("hero__slideshow")
            .rect(0.0, 0.0, 1440.0, 900.0)
            .id();
        let content = doc
            .node(Some(hero))
            .class("hero__content")
            .rect(0.0, 300.0, 1440.0, 300.0)
            .id();
        (doc, hero, slideshow, content)
    }

    fn run(ctx_doc: &mut Document, registry: &mut TriggerRegistry, pos: f64) {
        let mut tweens = TweenBank::new();
        registry.evaluate(ctx_doc, &mut tweens, pos, Instant::now());
    }

    #[test]
    fn test_missing_elements_is_silent_noop() {
        let mut doc = Document::new(1440.0, 900.0);
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
    fn test_parallax_scrub_at_midpoint() {
        let (mut doc, _, slideshow, content) = hero_doc();
        let mut registry = TriggerRegistry::new();
        let config = ChoreoConfig::default();
        let mut ctx = EffectContext {
            doc: &mut doc,
            registry: &mut registry,
            mode: LayoutMode::Wide,
            config: &config,
        };
        install(&mut ctx).unwrap();

        run(&mut doc, &mut registry, 450.0);
        assert!((doc.style(slideshow).translate_y - 100.0).abs() < 0.001);
        assert!((doc.style(slideshow).scale - 1.04).abs() < 0.001);
        assert!((doc.style(content).translate_y + 60.0).abs() < 0.001);
        assert!((doc.style(content).opacity - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_compact_layout_reduces_parallax() {
        let (mut doc, _, slideshow, _) = hero_doc();
        doc.set_viewport(390.0, 844.0);
        let mut registry = TriggerRegistry::new();
        let config = ChoreoConfig::default();
        let mut ctx = EffectContext {
            doc: &mut doc,
            registry: &mut registry,
            mode: LayoutMode::Compact,
            config: &config,
        };
        install(&mut ctx).unwrap();

        run(&mut doc, &mut registry, 900.0); // full progress
        assert!((doc.style(slideshow).translate_y - 80.0).abs() < 0.001);
    }

    #[test]
    fn test_indicator_fades_to_zero_within_first_fifth() {
        let (mut doc, hero, _, _) = hero_doc();
        let indicator = doc
            .node(Some(hero))
            .class("hero__scroll-indicator")
            .rect(700.0, 820.0, 40.0, 40.0)
            .id();
        let mut registry = TriggerRegistry::new();
        let config = ChoreoConfig::default();
        let mut ctx = EffectContext {
            doc: &mut doc,
            registry: &mut registry,
            mode: LayoutMode::Wide,
            config: &config,
        };
        install(&mut ctx).unwrap();

        // Indicator span covers the first 180px (20% of 900)
        run(&mut doc, &mut registry, 30.0); // progress 1/6
        assert!((doc.style(indicator).opacity - 0.5).abs() < 0.001);
        run(&mut doc, &mut registry, 90.0); // progress 0.5, decay floor
        assert_eq!(doc.style(indicator).opacity, 0.0);
    }

    #[test]
    fn test_video_pause_flag() {
        let (mut doc, hero, _, _) = hero_doc();
        let video = doc.node(Some(hero)).attr("data-video", "").id();
        doc.play_media(video).unwrap();
        let mut registry = TriggerRegistry::new();
        let config = ChoreoConfig {
            features: scrollweave_core::FeatureFlags {
                pause_video_offscreen: true,
            },
            ..Default::default()
        };
        let mut ctx = EffectContext {
            doc: &mut doc,
            registry: &mut registry,
            mode: LayoutMode::Wide,
            config: &config,
        };
        install(&mut ctx).unwrap();

        run(&mut doc, &mut registry, 0.0);
        assert!(doc.is_playing(video));
        run(&mut doc, &mut registry, 1000.0); // hero fully scrolled past
        assert!(!doc.is_playing(video));
        run(&mut doc, &mut registry, 0.0); // back above the fold
        assert!(doc.is_playing(video));
    }
}
