//! Orchestrator
//!
//! Owns the document, the scroll provider, the trigger registry, the tween
//! bank and the slideshows, and sequences them through the page lifecycle:
//! one-time initialization, the per-frame pipeline, debounced
//! teardown/reinit on resize, and unload. Everything time-based runs off
//! the caller-supplied frame timestamp.

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use scrollweave_core::config::ChoreoConfig;
use scrollweave_core::dom::{Document, NodeId};
use scrollweave_core::error::Result;
use scrollweave_core::scroll::provider::{ScrollProvider, ScrollToOptions};
use scrollweave_core::trigger::TriggerRegistry;
use scrollweave_core::tween::TweenBank;
use scrollweave_core::viewport::LayoutMode;

use crate::effects::{self, EffectContext};
use crate::navbar::{self, MobileMenu};
use crate::selectors::{CHEF_SLIDE, CHEF_SLIDE_ACTIVE, HERO_SLIDE, HERO_SLIDE_ACTIVE};
use crate::slideshow::{autoplay_videos, Slideshow};

/// Lifecycle phase of the orchestration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Initialized,
    /// A resize landed; bindings are stale until the debounce window
    /// closes and the reinit runs
    Resizing,
    Unloaded,
}

pub struct Orchestrator {
    config: ChoreoConfig,
    doc: Document,
    registry: TriggerRegistry,
    tweens: TweenBank,
    provider: ScrollProvider,
    hero_slideshow: Option<Slideshow>,
    chef_slideshow: Option<Slideshow>,
    mobile_menu: Option<MobileMenu>,
    /// Timestamp of the most recent resize event, if one is pending
    pending_resize: Option<Instant>,
    phase: Phase,
    reinit_cycles: u64,
}

impl Orchestrator {
    pub fn new(config: ChoreoConfig, doc: Document) -> Self {
        let provider = ScrollProvider::new(config.scroll.clone());
        Self {
            config,
            doc,
            registry: TriggerRegistry::new(),
            tweens: TweenBank::new(),
            provider,
            hero_slideshow: None,
            chef_slideshow: None,
            mobile_menu: None,
            pending_resize: None,
            phase: Phase::Uninitialized,
            reinit_cycles: 0,
        }
    }

    /// One-time page setup: mobile menu, slideshows with video autoplay,
    /// and the full effect installation pass. Calling it again after the
    /// first success is a warning-level no-op.
    pub fn init(&mut self, now: Instant) -> Result<()> {
        if self.phase != Phase::Uninitialized {
            warn!(phase = ?self.phase, "init called twice, ignoring");
            return Ok(());
        }

        self.mobile_menu = MobileMenu::install(&self.doc);
        self.hero_slideshow = Slideshow::install(
            &mut self.doc,
            HERO_SLIDE,
            HERO_SLIDE_ACTIVE,
            Duration::from_millis(self.config.lifecycle.hero_interval_ms),
            now,
        );
        if let Some(show) = &self.hero_slideshow {
            let slides = show.slides().to_vec();
            autoplay_videos(&mut self.doc, &slides);
        }
        self.chef_slideshow = Slideshow::install(
            &mut self.doc,
            CHEF_SLIDE,
            CHEF_SLIDE_ACTIVE,
            Duration::from_millis(self.config.lifecycle.chef_interval_ms),
            now,
        );

        self.install_effects()?;
        self.phase = Phase::Initialized;
        info!(bindings = self.registry.len(), "choreography initialized");
        Ok(())
    }

    /// Raw scroll input, forwarded to the provider
    pub fn handle_scroll(&mut self, position: f64) {
        self.provider.input(position);
    }

    /// Record a viewport change. The actual teardown/reinit waits for the
    /// trailing debounce window; a burst of resize events costs one cycle.
    pub fn handle_resize(&mut self, width: f64, height: f64, now: Instant) {
        if matches!(self.phase, Phase::Uninitialized | Phase::Unloaded) {
            debug!(phase = ?self.phase, "resize ignored outside active lifecycle");
            return;
        }
        self.doc.set_viewport(width, height);
        self.pending_resize = Some(now);
        self.phase = Phase::Resizing;
    }

    /// One frame of the pipeline: execute a due resize reinit, advance the
    /// scroll position, evaluate triggers, advance tweens, tick slideshows
    pub fn frame(&mut self, now: Instant) -> Result<()> {
        if self.phase == Phase::Unloaded {
            return Ok(());
        }

        if let Some(requested) = self.pending_resize {
            let debounce = Duration::from_millis(self.config.lifecycle.resize_debounce_ms);
            if now
                .checked_duration_since(requested)
                .is_some_and(|elapsed| elapsed >= debounce)
            {
                self.pending_resize = None;
                self.reinitialize()?;
            }
        }

        let position = self.provider.drive_frame(now);
        self.registry.evaluate(&mut self.doc, &mut self.tweens, position, now);
        self.tweens.advance(&mut self.doc, now);

        if let Some(show) = self.hero_slideshow.as_mut() {
            show.tick(&mut self.doc, now);
        }
        if let Some(show) = self.chef_slideshow.as_mut() {
            show.tick(&mut self.doc, now);
        }
        Ok(())
    }

    /// Late-loading media changed the layout; re-resolve every span
    /// against the new geometry
    pub fn notify_images_loaded(&mut self) {
        self.registry.refresh(&self.doc);
    }

    /// Animated scroll to the element matching `selector`. An unknown
    /// selector is a silent no-op, matching dead anchor links. The target
    /// is clamped to the scrollable extent, spacers included, so anchors
    /// near the page bottom glide as far as the page allows.
    pub fn scroll_to_anchor(&mut self, selector: &str, now: Instant) {
        let Some(node) = self.doc.query(selector) else {
            debug!(selector, "anchor target not found, ignoring");
            return;
        };
        let max_scroll = (self.doc.scroll_height() - self.doc.viewport().height).max(0.0);
        let target = self.doc.rect(node).y.min(max_scroll);
        let options = ScrollToOptions {
            offset: 0.0,
            duration: Duration::from_millis(self.config.scroll.scroll_to_duration_ms),
        };
        self.provider.scroll_to(target, options, now);
    }

    /// Click dispatch for the mobile menu
    pub fn handle_click(&mut self, target: Option<NodeId>) {
        if let Some(menu) = &self.mobile_menu {
            menu.handle_click(&mut self.doc, target);
        }
    }

    /// Final teardown. The orchestrator stays inert afterwards; frames
    /// become no-ops.
    pub fn unload(&mut self) {
        self.registry.unregister_all(&mut self.doc);
        self.tweens.clear();
        self.pending_resize = None;
        self.phase = Phase::Unloaded;
        info!("choreography unloaded");
    }

    /// Full teardown and rebuild of the trigger graph. Slideshows and the
    /// scroll position survive the cycle.
    fn reinitialize(&mut self) -> Result<()> {
        self.registry.unregister_all(&mut self.doc);
        self.tweens.clear();
        self.install_effects()?;
        self.phase = Phase::Initialized;
        self.reinit_cycles += 1;
        debug!(
            cycle = self.reinit_cycles,
            bindings = self.registry.len(),
            "reinitialized after resize"
        );
        Ok(())
    }

    fn install_effects(&mut self) -> Result<()> {
        let mode = LayoutMode::classify(
            self.doc.viewport().width,
            self.config.viewport.compact_max_width,
        );
        navbar::install(&mut self.doc, &mut self.registry)?;
        let mut ctx = EffectContext {
            doc: &mut self.doc,
            registry: &mut self.registry,
            mode,
            config: &self.config,
        };
        effects::hero::install(&mut ctx)?;
        effects::mission::install(&mut ctx)?;
        effects::testimonials::install(&mut ctx)?;
        effects::gallery::install(&mut ctx)?;
        effects::chef::install(&mut ctx)?;
        effects::story::install(&mut ctx)?;
        effects::faq::install(&mut ctx)?;
        effects::cta::install(&mut ctx)?;
        Ok(())
    }

    #[inline]
    pub fn doc(&self) -> &Document {
        &self.doc
    }

    #[inline]
    pub fn doc_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn binding_count(&self) -> usize {
        self.registry.len()
    }

    #[inline]
    pub fn position(&self) -> f64 {
        self.provider.position()
    }

    #[inline]
    pub fn reinit_cycles(&self) -> u64 {
        self.reinit_cycles
    }
}
