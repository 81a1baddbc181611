//! Timed style tweens
//!
//! Trigger callbacks that need motion over time (as opposed to motion tied
//! to scroll position) spawn tweens here. The bank advances every live
//! tween each frame against the caller's timestamp, writes the interpolated
//! style onto the document, and retires tweens at their exact end values.

use std::time::{Duration, Instant};

use crate::config::EasingType;
use crate::dom::{Document, NodeId};
use crate::scroll::easing::EasingTypeExt;
use crate::scroll::timing::{is_complete, lerp, progress};

/// From/to pairs for the style channels a tween may drive.
/// Channels left `None` are untouched, so two tweens on the same node can
/// coexist as long as they drive different channels.
#[derive(Debug, Clone, Copy, Default)]
pub struct StyleDelta {
    pub opacity: Option<(f64, f64)>,
    pub translate_x: Option<(f64, f64)>,
    pub translate_y: Option<(f64, f64)>,
    pub scale: Option<(f64, f64)>,
}

impl StyleDelta {
    pub fn opacity(mut self, from: f64, to: f64) -> Self {
        self.opacity = Some((from, to));
        self
    }

    pub fn translate_x(mut self, from: f64, to: f64) -> Self {
        self.translate_x = Some((from, to));
        self
    }

    pub fn translate_y(mut self, from: f64, to: f64) -> Self {
        self.translate_y = Some((from, to));
        self
    }

    pub fn scale(mut self, from: f64, to: f64) -> Self {
        self.scale = Some((from, to));
        self
    }
}

/// A single timed animation toward explicit end values
#[derive(Debug, Clone)]
pub struct Tween {
    pub target: NodeId,
    pub delta: StyleDelta,
    pub delay: Duration,
    pub duration: Duration,
    pub easing: EasingType,
}

impl Tween {
    pub fn new(target: NodeId, delta: StyleDelta, duration: Duration) -> Self {
        Self {
            target,
            delta,
            delay: Duration::ZERO,
            duration,
            easing: EasingType::QuadOut,
        }
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn easing(mut self, easing: EasingType) -> Self {
        self.easing = easing;
        self
    }
}

struct ActiveTween {
    tween: Tween,
    spawned: Instant,
}

impl ActiveTween {
    fn effective_start(&self) -> Instant {
        self.spawned + self.tween.delay
    }

    /// Write the interpolated style for `now`; start values are applied
    /// immediately, including through the delay window
    fn apply(&self, doc: &mut Document, now: Instant) {
        let t = self
            .tween
            .easing
            .apply(progress(self.effective_start(), self.tween.duration, now));
        let style = doc.style_mut(self.tween.target);
        if let Some((from, to)) = self.tween.delta.opacity {
            style.opacity = lerp(from, to, t);
        }
        if let Some((from, to)) = self.tween.delta.translate_x {
            style.translate_x = lerp(from, to, t);
        }
        if let Some((from, to)) = self.tween.delta.translate_y {
            style.translate_y = lerp(from, to, t);
        }
        if let Some((from, to)) = self.tween.delta.scale {
            style.scale = lerp(from, to, t);
        }
    }

    fn finished(&self, now: Instant) -> bool {
        is_complete(self.effective_start(), self.tween.duration, now)
    }
}

/// All live tweens for the current orchestration cycle
#[derive(Default)]
pub struct TweenBank {
    active: Vec<ActiveTween>,
}

impl TweenBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a tween; its delay counts from `now`
    pub fn spawn(&mut self, tween: Tween, now: Instant) {
        self.active.push(ActiveTween {
            tween,
            spawned: now,
        });
    }

    /// Advance every live tween, retiring finished ones at their end values
    pub fn advance(&mut self, doc: &mut Document, now: Instant) {
        for active in &self.active {
            active.apply(doc, now);
        }
        self.active.retain(|a| !a.finished(now));
    }

    /// Drop all pending work; used on teardown so stale entrances from a
    /// previous cycle cannot land after reinit
    pub fn clear(&mut self) {
        self.active.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}
