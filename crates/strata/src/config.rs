//! Configuration types for Strata layouts.
//!
//! This module provides configuration structures that control how a network
//! is placed. All types implement [`serde::Deserialize`] for flexible loading
//! from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration.
//! - [`LayoutConfig`] - Spacing, visual depth bounds, and transition timing.
//!
//! # Example
//!
//! ```
//! # use strata::config::AppConfig;
//! let config: AppConfig = toml::from_str(
//!     r#"
//!     [layout]
//!     rank_interval = 80.0
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.layout().rank_interval(), 80.0);
//! assert_eq!(config.layout().sibling_interval(), 10.0);
//! ```

use std::time::Duration;

use serde::Deserialize;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout configuration.
    pub fn new(layout: LayoutConfig) -> Self {
        Self { layout }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }
}

/// Layout tuning shared by every stage of the engine.
///
/// Missing fields fall back to the values of [`LayoutConfig::default`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Distance between neighbouring ranks along the main axis.
    rank_interval: f32,

    /// Gap left between neighbouring layers inside one rank.
    sibling_interval: f32,

    /// Thickness given to the layer with the largest raw depth.
    max_visual_depth: f32,

    /// Thinnest thickness any layer is rendered with.
    min_visual_depth: f32,

    /// Footprint width used for layers that declare none.
    default_footprint: f32,

    /// Duration of a re-layout transition, in milliseconds.
    transition_ms: u64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            rank_interval: 50.0,
            sibling_interval: 10.0,
            max_visual_depth: 20.0,
            min_visual_depth: 1.0,
            default_footprint: 10.0,
            transition_ms: 500,
        }
    }
}

impl LayoutConfig {
    /// Returns the spacing between ranks along the main axis.
    pub fn rank_interval(&self) -> f32 {
        self.rank_interval
    }

    /// Returns the gap between siblings inside a rank.
    pub fn sibling_interval(&self) -> f32 {
        self.sibling_interval
    }

    /// Returns the thickness assigned to the deepest layer.
    pub fn max_visual_depth(&self) -> f32 {
        self.max_visual_depth
    }

    /// Returns the minimum visible thickness.
    pub fn min_visual_depth(&self) -> f32 {
        self.min_visual_depth
    }

    /// Returns the footprint width for layers without one.
    pub fn default_footprint(&self) -> f32 {
        self.default_footprint
    }

    /// Returns how long a re-layout transition should take.
    pub fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    /// Sets the rank interval (builder style).
    pub fn with_rank_interval(mut self, interval: f32) -> Self {
        self.rank_interval = interval;
        self
    }

    /// Sets the sibling interval (builder style).
    pub fn with_sibling_interval(mut self, interval: f32) -> Self {
        self.sibling_interval = interval;
        self
    }

    /// Sets the visual depth bounds (builder style).
    pub fn with_visual_depth(mut self, min: f32, max: f32) -> Self {
        self.min_visual_depth = min;
        self.max_visual_depth = max;
        self
    }

    /// Sets the transition duration (builder style).
    pub fn with_transition(mut self, duration: Duration) -> Self {
        self.transition_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        self
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        let layout = config.layout();

        assert_approx_eq!(f32, layout.rank_interval(), 50.0);
        assert_approx_eq!(f32, layout.sibling_interval(), 10.0);
        assert_approx_eq!(f32, layout.max_visual_depth(), 20.0);
        assert_approx_eq!(f32, layout.min_visual_depth(), 1.0);
        assert_eq!(layout.transition_duration(), Duration::from_millis(500));
    }

    #[test]
    fn test_partial_layout_section() {
        let config: AppConfig = toml::from_str(
            r#"
            [layout]
            sibling_interval = 2.0
            transition_ms = 120
            "#,
        )
        .unwrap();

        assert_approx_eq!(f32, config.layout().sibling_interval(), 2.0);
        assert_approx_eq!(f32, config.layout().rank_interval(), 50.0);
        assert_eq!(
            config.layout().transition_duration(),
            Duration::from_millis(120)
        );
    }

    #[test]
    fn test_unknown_layout_key_is_rejected() {
        let result: Result<AppConfig, _> = toml::from_str(
            r#"
            [layout]
            rank_gap = 2.0
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_setters() {
        let layout = LayoutConfig::default()
            .with_rank_interval(7.0)
            .with_sibling_interval(3.0)
            .with_visual_depth(2.0, 40.0)
            .with_transition(Duration::from_millis(75));

        assert_approx_eq!(f32, layout.rank_interval(), 7.0);
        assert_approx_eq!(f32, layout.sibling_interval(), 3.0);
        assert_approx_eq!(f32, layout.min_visual_depth(), 2.0);
        assert_approx_eq!(f32, layout.max_visual_depth(), 40.0);
        assert_eq!(layout.transition_duration(), Duration::from_millis(75));
    }
}
