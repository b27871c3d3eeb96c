// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Editor tuning parameters.

use alloc::string::String;
use core::time::Duration;

use crate::error::ConfigError;
use crate::geometry::PixelSnap;
use crate::layout::Insets;

/// Tuning parameters for a [`RichTextEditor`](crate::RichTextEditor).
///
/// Every field has a default, so a configuration source only needs to list the
/// values it changes:
///
/// ```
/// use rich_flow::EditorConfig;
///
/// let config = EditorConfig::from_json(r#"{ "wrap_text": false, "line_spacing": 2.0 }"#).unwrap();
/// assert!(!config.wrap_text);
/// assert_eq!(config.sliding_window_extent, 100);
/// ```
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Paragraphs realized beyond each edge of the viewport.
    ///
    /// Must cover more than a viewport's worth of paragraphs for page-wise
    /// navigation to resolve its target.
    pub sliding_window_extent: usize,
    /// Interval between autoscroll ticks, in milliseconds.
    pub auto_scroll_period_ms: u64,
    /// Pointer distance outside the viewport beyond which autoscroll is fast.
    pub auto_scroll_fast_threshold: f64,
    /// Pixels scrolled per tick in slow autoscroll.
    pub auto_scroll_step_slow: f64,
    /// Pixels scrolled per tick in fast autoscroll.
    pub auto_scroll_step_fast: f64,
    /// Pixels scrolled per mouse wheel notch.
    pub scroll_wheel_step: f64,
    /// Horizontal room kept between the caret and the viewport edge when scrolling it into view.
    pub horizontal_guard: f64,
    /// Extra space added below every paragraph.
    pub line_spacing: f64,
    /// Space between the viewport edges and the text.
    pub content_padding: Insets,
    /// Wrap paragraphs at the viewport width; otherwise scroll horizontally.
    pub wrap_text: bool,
    /// Pixel snapping applied to caret and selection outlines.
    pub caret_snap: PixelSnap,
    /// Text inserted by the tab command.
    pub tab_text: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            sliding_window_extent: 100,
            auto_scroll_period_ms: 100,
            auto_scroll_fast_threshold: 100.0,
            auto_scroll_step_slow: 20.0,
            auto_scroll_step_fast: 200.0,
            scroll_wheel_step: 40.0,
            horizontal_guard: 10.0,
            line_spacing: 0.0,
            content_padding: Insets::ZERO,
            wrap_text: true,
            caret_snap: PixelSnap::HalfPixel,
            tab_text: "\t".into(),
        }
    }
}

impl EditorConfig {
    /// Parses a configuration from JSON, filling absent fields with defaults.
    pub fn from_json(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(source)?)
    }

    /// The autoscroll tick interval.
    pub fn auto_scroll_period(&self) -> Duration {
        Duration::from_millis(self.auto_scroll_period_ms)
    }
}
