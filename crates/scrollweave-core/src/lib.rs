//! Core engine for scrollweave: a headless scroll-choreography library.
//!
//! Provides the substrate the effect modules run on: a selector-addressable
//! document model, viewport classification, a raw/smoothed scroll position
//! provider, a timed tween bank, and the trigger registry that maps scroll
//! position into per-binding firing rules.

pub mod config;
pub mod dom;
pub mod error;
pub mod scroll;
pub mod trigger;
pub mod tween;
pub mod viewport;

pub use config::{ChoreoConfig, EasingType, FeatureFlags, LifecycleConfig, ScrollConfig};
pub use error::{Error, Result};
pub use viewport::LayoutMode;
