//! Viewport classification
//!
//! Maps the current viewport width to a layout mode. Effect modules consult
//! the mode at (re)initialization to pick animation parameters; the mode is
//! never cached across orchestration cycles.

/// Layout branch selected by viewport width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// Narrow viewport (phones, small tablets)
    Compact,
    /// Everything wider than the compact breakpoint
    Wide,
}

impl LayoutMode {
    /// Classify a viewport width against the compact breakpoint
    #[inline]
    pub fn classify(viewport_width: f64, compact_max_width: f64) -> Self {
        if viewport_width <= compact_max_width {
            Self::Compact
        } else {
            Self::Wide
        }
    }

    #[inline]
    pub fn is_compact(self) -> bool {
        matches!(self, Self::Compact)
    }

    #[inline]
    pub fn is_wide(self) -> bool {
        matches!(self, Self::Wide)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_boundary() {
        assert_eq!(LayoutMode::classify(768.0, 768.0), LayoutMode::Compact);
        assert_eq!(LayoutMode::classify(769.0, 768.0), LayoutMode::Wide);
        assert_eq!(LayoutMode::classify(320.0, 768.0), LayoutMode::Compact);
        assert_eq!(LayoutMode::classify(1920.0, 768.0), LayoutMode::Wide);
    }
}
