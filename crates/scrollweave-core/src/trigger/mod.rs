//! Trigger registry
//!
//! The mutable collection of live (element, span, mode, callback)
//! bindings. Each frame the registry maps the provider's position into
//! every binding's progress and applies the mode-specific firing rules.
//! Bindings are evaluated in registration order; overlapping effects on
//! the same element resolve as last write wins.

pub mod span;

use std::time::Instant;

use tracing::{debug, error};

use crate::dom::{Document, NodeId};
use crate::error::{Error, Result};
use crate::tween::TweenBank;

pub use span::{Anchor, Distance, ScrollSpan, SpanEnd};

use span::raw_progress;

/// Callback fired on a threshold crossing
pub type EnterFn = Box<dyn FnMut(&mut Document, &mut TweenBank, Instant)>;
/// Callback fired with clamped progress while a span is traversed
pub type UpdateFn = Box<dyn FnMut(&mut Document, &mut TweenBank, f64, Instant)>;

/// Firing discipline of a binding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerMode {
    /// Fires `on_enter` when progress first crosses 0 going forward.
    /// One-shot unless `replay`; `on_enter_back` and `on_leave_back`
    /// always re-fire on their crossings when present.
    Toggle { replay: bool },
    /// Delivers clamped progress on every tick inside [0, 1], and the
    /// boundary value exactly once when the span is exited
    Scrub,
    /// Scrub delivery plus engaging the target's visual pin (with flow
    /// spacer) while progress is in [0, 1)
    Pin,
}

/// One registered choreography entry
pub struct TriggerBinding {
    pub target: NodeId,
    pub span: ScrollSpan,
    pub mode: TriggerMode,
    on_update: Option<UpdateFn>,
    on_enter: Option<EnterFn>,
    on_enter_back: Option<EnterFn>,
    on_leave_back: Option<EnterFn>,
}

impl TriggerBinding {
    pub fn new(target: NodeId, span: ScrollSpan, mode: TriggerMode) -> Self {
        Self {
            target,
            span,
            mode,
            on_update: None,
            on_enter: None,
            on_enter_back: None,
            on_leave_back: None,
        }
    }

    pub fn on_update(
        mut self,
        f: impl FnMut(&mut Document, &mut TweenBank, f64, Instant) + 'static,
    ) -> Self {
        self.on_update = Some(Box::new(f));
        self
    }

    pub fn on_enter(
        mut self,
        f: impl FnMut(&mut Document, &mut TweenBank, Instant) + 'static,
    ) -> Self {
        self.on_enter = Some(Box::new(f));
        self
    }

    pub fn on_enter_back(
        mut self,
        f: impl FnMut(&mut Document, &mut TweenBank, Instant) + 'static,
    ) -> Self {
        self.on_enter_back = Some(Box::new(f));
        self
    }

    pub fn on_leave_back(
        mut self,
        f: impl FnMut(&mut Document, &mut TweenBank, Instant) + 'static,
    ) -> Self {
        self.on_leave_back = Some(Box::new(f));
        self
    }
}

/// Opaque handle returned by `register`, used to unregister
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TriggerHandle(u64);

#[derive(Debug, Default)]
struct BindingState {
    fired: bool,
    pin_engaged: bool,
    last_raw: Option<f64>,
    last_delivered: Option<f64>,
}

struct LiveBinding {
    handle: TriggerHandle,
    binding: TriggerBinding,
    start_px: f64,
    end_px: f64,
    state: BindingState,
}

/// Registry of all live bindings for one orchestration cycle
#[derive(Default)]
pub struct TriggerRegistry {
    bindings: Vec<LiveBinding>,
    next_handle: u64,
}

impl TriggerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a binding. Fails when the target is not attached to the
    /// document, which can only come from a wiring mistake.
    pub fn register(&mut self, doc: &Document, binding: TriggerBinding) -> Result<TriggerHandle> {
        if !doc.contains(binding.target) {
            error!(target = ?binding.target, "trigger target is not attached to the document");
            return Err(Error::InvalidTarget(format!(
                "{:?} is not attached to the document",
                binding.target
            )));
        }
        let handle = TriggerHandle(self.next_handle);
        self.next_handle += 1;
        let (start_px, end_px) = binding.span.resolve(doc);
        self.bindings.push(LiveBinding {
            handle,
            binding,
            start_px,
            end_px,
            state: BindingState::default(),
        });
        Ok(handle)
    }

    /// Remove one binding, releasing any pin it holds. No-op when the
    /// handle was already unregistered.
    pub fn unregister(&mut self, doc: &mut Document, handle: TriggerHandle) {
        if let Some(idx) = self.bindings.iter().position(|b| b.handle == handle) {
            let live = self.bindings.remove(idx);
            release_pin(doc, &live);
        }
    }

    /// Teardown path: remove every binding and release every pin
    pub fn unregister_all(&mut self, doc: &mut Document) {
        for live in &self.bindings {
            release_pin(doc, live);
        }
        debug!(count = self.bindings.len(), "unregistered all trigger bindings");
        self.bindings.clear();
    }

    /// Re-resolve every binding's span against current geometry
    pub fn refresh(&mut self, doc: &Document) {
        for live in &mut self.bindings {
            let (start_px, end_px) = live.binding.span.resolve(doc);
            live.start_px = start_px;
            live.end_px = end_px;
        }
        debug!(count = self.bindings.len(), "refreshed trigger anchors");
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Evaluate every live binding against the current scroll position,
    /// in registration order
    pub fn evaluate(
        &mut self,
        doc: &mut Document,
        tweens: &mut TweenBank,
        position: f64,
        now: Instant,
    ) {
        for live in &mut self.bindings {
            let raw = raw_progress(live.start_px, live.end_px, position);
            let clamped = raw.clamp(0.0, 1.0);
            let prev = live.state.last_raw;

            match live.binding.mode {
                TriggerMode::Toggle { replay } => {
                    let entered = raw >= 0.0 && prev.map_or(true, |p| p < 0.0);
                    let entered_back = raw <= 1.0 && prev.is_some_and(|p| p > 1.0);
                    let left_back = raw < 0.0 && prev.is_some_and(|p| p >= 0.0);

                    if entered && (replay || !live.state.fired) {
                        live.state.fired = true;
                        if let Some(f) = live.binding.on_enter.as_mut() {
                            f(doc, tweens, now);
                        }
                    }
                    if entered_back {
                        if let Some(f) = live.binding.on_enter_back.as_mut() {
                            f(doc, tweens, now);
                        }
                    }
                    if left_back {
                        if let Some(f) = live.binding.on_leave_back.as_mut() {
                            f(doc, tweens, now);
                        }
                    }
                }
                TriggerMode::Scrub | TriggerMode::Pin => {
                    if live.binding.mode == TriggerMode::Pin {
                        let engaged = raw >= 0.0 && raw < 1.0;
                        if engaged != live.state.pin_engaged {
                            live.state.pin_engaged = engaged;
                            let span = live.end_px - live.start_px;
                            let style = doc.style_mut(live.binding.target);
                            style.pinned = engaged;
                            style.spacer = if engaged { span } else { 0.0 };
                        }
                    }
                    let inside = (0.0..=1.0).contains(&raw);
                    if inside || live.state.last_delivered != Some(clamped) {
                        live.state.last_delivered = Some(clamped);
                        if let Some(f) = live.binding.on_update.as_mut() {
                            f(doc, tweens, clamped, now);
                        }
                    }
                }
            }

            live.state.last_raw = Some(raw);
        }
    }
}

fn release_pin(doc: &mut Document, live: &LiveBinding) {
    if live.state.pin_engaged && doc.contains(live.binding.target) {
        let style = doc.style_mut(live.binding.target);
        style.pinned = false;
        style.spacer = 0.0;
    }
}
