//! Scroll position provider and its supporting atoms
//!
//! - `easing` - pure easing curves
//! - `timing` - timestamp-driven progress and interpolation helpers
//! - `provider` - raw / smoothed position source with push and pull delivery

pub mod easing;
pub mod provider;
pub mod timing;

pub use easing::{EasingType, EasingTypeExt};
pub use provider::{ScrollProvider, ScrollToOptions};
