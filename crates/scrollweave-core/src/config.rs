use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChoreoConfig {
    #[serde(default)]
    pub viewport: ViewportConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub lifecycle: LifecycleConfig,
    #[serde(default)]
    pub features: FeatureFlags,
}

impl Default for ChoreoConfig {
    fn default() -> Self {
        Self {
            viewport: ViewportConfig::default(),
            scroll: ScrollConfig::default(),
            lifecycle: LifecycleConfig::default(),
            features: FeatureFlags::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewportConfig {
    /// Widest viewport (px) still treated as the compact layout
    #[serde(default = "default_compact_max_width")]
    pub compact_max_width: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            compact_max_width: default_compact_max_width(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Enable inertial smoothing of raw scroll input
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    /// Exponential smoothing rate (per second); higher settles faster
    #[serde(default = "default_smoothing_rate")]
    pub smoothing_rate: f64,
    /// Programmatic scroll-to-anchor duration in milliseconds
    #[serde(default = "default_scroll_to_duration")]
    pub scroll_to_duration_ms: u64,
    /// Easing curve for programmatic scrolls
    #[serde(default = "default_scroll_easing")]
    pub easing: EasingType,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            smooth_enabled: default_true(),
            smoothing_rate: default_smoothing_rate(),
            scroll_to_duration_ms: default_scroll_to_duration(),
            easing: default_scroll_easing(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LifecycleConfig {
    /// Trailing debounce window for resize teardown/reinit (ms)
    #[serde(default = "default_resize_debounce")]
    pub resize_debounce_ms: u64,
    /// Hero slideshow rotation interval (ms)
    #[serde(default = "default_hero_interval")]
    pub hero_interval_ms: u64,
    /// Chef tile slideshow rotation interval (ms)
    #[serde(default = "default_chef_interval")]
    pub chef_interval_ms: u64,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            resize_debounce_ms: default_resize_debounce(),
            hero_interval_ms: default_hero_interval(),
            chef_interval_ms: default_chef_interval(),
        }
    }
}

/// Behaviors that differed between rewrites of the page script.
/// Kept configurable instead of hard-coding either variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureFlags {
    /// Pause hero slide videos once the hero is scrolled out of view
    #[serde(default)]
    pub pause_video_offscreen: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            pause_video_offscreen: false,
        }
    }
}

/// Easing curve selection for tweens and programmatic scrolls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    /// No interpolation, jump at completion
    None,
    /// Constant rate
    Linear,
    /// Quadratic ease-out
    QuadOut,
    /// Quadratic ease-in-out
    QuadInOut,
    /// Cubic ease-out
    CubicOut,
    /// Exponential ease-out
    ExpoOut,
}

fn default_compact_max_width() -> f64 {
    768.0
}

fn default_true() -> bool {
    true
}

fn default_smoothing_rate() -> f64 {
    6.0
}

fn default_scroll_to_duration() -> u64 {
    1200
}

fn default_scroll_easing() -> EasingType {
    EasingType::ExpoOut
}

fn default_resize_debounce() -> u64 {
    300
}

fn default_hero_interval() -> u64 {
    6500
}

fn default_chef_interval() -> u64 {
    4200
}
