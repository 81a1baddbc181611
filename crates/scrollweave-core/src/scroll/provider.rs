//! Scroll position provider
//!
//! Owns the single source of truth for "where the page is". Raw scroll
//! input arrives via `input()`; each frame either glides toward a
//! programmatic target, exponentially smooths toward the raw position, or
//! tracks it exactly when smoothing is disabled. Consumers may pull the
//! position on demand or register a push callback fired on every change.

use std::time::{Duration, Instant};

use crate::config::ScrollConfig;

use super::easing::EasingTypeExt;
use super::timing::{is_complete, lerp, progress};

/// Options for a programmatic scroll, mirroring anchor-link behavior
#[derive(Debug, Clone, Copy)]
pub struct ScrollToOptions {
    /// Offset in px added to the target position
    pub offset: f64,
    pub duration: Duration,
}

struct Glide {
    start: Instant,
    from: f64,
    to: f64,
    duration: Duration,
}

pub struct ScrollProvider {
    config: ScrollConfig,
    /// Latest raw scroll input
    raw: f64,
    /// Position delivered to consumers this frame
    current: f64,
    glide: Option<Glide>,
    last_frame: Option<Instant>,
    listeners: Vec<Box<dyn FnMut(f64)>>,
}

impl ScrollProvider {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            config,
            raw: 0.0,
            current: 0.0,
            glide: None,
            last_frame: None,
            listeners: Vec::new(),
        }
    }

    /// Register a push-mode callback invoked whenever the position changes
    pub fn on_scroll(&mut self, callback: impl FnMut(f64) + 'static) {
        self.listeners.push(Box::new(callback));
    }

    /// Feed a raw scroll position (native scroll event)
    pub fn input(&mut self, raw: f64) {
        self.raw = raw;
        // Manual scrolling interrupts any programmatic glide
        if self.glide.is_some() && (raw - self.current).abs() > f64::EPSILON {
            self.glide = None;
        }
    }

    /// Begin an animated scroll to an absolute position
    pub fn scroll_to(&mut self, target: f64, options: ScrollToOptions, now: Instant) {
        let to = target + options.offset;
        if options.duration.is_zero() {
            self.raw = to;
            self.glide = None;
            return;
        }
        self.glide = Some(Glide {
            start: now,
            from: self.current,
            to,
            duration: options.duration,
        });
    }

    /// Advance one frame and return the current position
    pub fn drive_frame(&mut self, now: Instant) -> f64 {
        let dt = self
            .last_frame
            .and_then(|last| now.checked_duration_since(last))
            .unwrap_or(Duration::ZERO);
        self.last_frame = Some(now);

        let next = if let Some(glide) = self.glide.take() {
            if is_complete(glide.start, glide.duration, now) {
                self.raw = glide.to;
                glide.to
            } else {
                let t = self
                    .config
                    .easing
                    .apply(progress(glide.start, glide.duration, now));
                let pos = lerp(glide.from, glide.to, t);
                self.glide = Some(glide);
                pos
            }
        } else if self.config.smooth_enabled {
            let k = 1.0 - (-self.config.smoothing_rate * dt.as_secs_f64()).exp();
            let smoothed = lerp(self.current, self.raw, k);
            // Snap once the residual is invisible
            if (self.raw - smoothed).abs() < 0.1 {
                self.raw
            } else {
                smoothed
            }
        } else {
            self.raw
        };

        if (next - self.current).abs() > f64::EPSILON {
            self.current = next;
            for listener in &mut self.listeners {
                listener(next);
            }
        }
        self.current
    }

    /// Pull-mode access to the current position
    #[inline]
    pub fn position(&self) -> f64 {
        self.current
    }

    #[inline]
    pub fn is_gliding(&self) -> bool {
        self.glide.is_some()
    }
}
