//! Gesture thresholds and event policy.

use crate::geometry::Millis;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error parsing [`GestureOptions`] from JSON.
#[derive(Debug, Error)]
#[error("invalid gesture options: {0}")]
pub struct OptionsError(#[from] serde_json::Error);

/// Configuration for gesture recognition.
///
/// Every field is optional when deserialized; missing fields take the
/// defaults below. Field names are camelCase on the wire so a plain JS
/// options object can be passed through as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GestureOptions {
    /// Minimum displacement (px) for a swipe.
    pub swipe_distance: f64,
    /// Maximum duration (ms) of a swipe.
    pub swipe_time_limit: Millis,
    /// Side (px) of the no-slide box used for tap and long-press.
    pub dont_slide_distance: f64,
    /// Maximum gap (ms) between two taps merged into a double tap.
    pub double_tap_time_limit: Millis,
    /// Angle (degrees) separating horizontal from vertical swipes.
    pub horizontal_swipe_degree: f64,
    /// Hold duration (ms) for a long press.
    pub long_press_time_limit: Millis,
    /// Default policy for suppressing the native default action.
    pub prevent_default: bool,
    /// Default policy for stopping native propagation.
    pub stop_propagation: bool,
    /// Capture the pointer on down (pointer events only).
    pub pointer_capture: bool,
    /// CSS `touch-action` applied to the target (pointer events only).
    pub touch_action: Option<String>,
    /// Log every native and recognized event.
    pub trace: bool,
    /// Prefix for trace lines.
    pub trace_prefix: String,
}

impl Default for GestureOptions {
    fn default() -> Self {
        Self {
            swipe_distance: 30.0,
            swipe_time_limit: 300.0,
            dont_slide_distance: 20.0,
            double_tap_time_limit: 300.0,
            horizontal_swipe_degree: 50.0,
            long_press_time_limit: 1000.0,
            prevent_default: true,
            stop_propagation: false,
            pointer_capture: false,
            touch_action: None,
            trace: false,
            trace_prefix: String::new(),
        }
    }
}

impl GestureOptions {
    /// Parse options from a JSON object, filling in defaults.
    pub fn from_json(json: &str) -> Result<Self, OptionsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Trace prefix as it appears in log lines: `"name: "` or empty.
    #[must_use]
    pub fn normalized_trace_prefix(&self) -> String {
        if self.trace_prefix.is_empty() {
            String::new()
        } else {
            format!("{}: ", self.trace_prefix)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_default() {
        let options = GestureOptions::default();
        assert_eq!(options.swipe_distance, 30.0);
        assert_eq!(options.swipe_time_limit, 300.0);
        assert_eq!(options.dont_slide_distance, 20.0);
        assert_eq!(options.double_tap_time_limit, 300.0);
        assert_eq!(options.horizontal_swipe_degree, 50.0);
        assert_eq!(options.long_press_time_limit, 1000.0);
        assert!(options.prevent_default);
        assert!(!options.stop_propagation);
        assert!(!options.pointer_capture);
        assert!(options.touch_action.is_none());
        assert!(!options.trace);
        assert!(options.trace_prefix.is_empty());
    }

    #[test]
    fn test_options_from_json_merges_defaults() {
        let options =
            GestureOptions::from_json(r#"{"swipeDistance": 50, "touchAction": "none"}"#).unwrap();
        assert_eq!(options.swipe_distance, 50.0);
        assert_eq!(options.touch_action.as_deref(), Some("none"));
        assert_eq!(options.long_press_time_limit, 1000.0);
        assert!(options.prevent_default);
    }

    #[test]
    fn test_options_from_json_empty_object() {
        assert_eq!(
            GestureOptions::from_json("{}").unwrap(),
            GestureOptions::default()
        );
    }

    #[test]
    fn test_options_from_json_rejects_wrong_type() {
        assert!(GestureOptions::from_json(r#"{"trace": "yes"}"#).is_err());
    }

    #[test]
    fn test_trace_prefix_normalized() {
        let mut options = GestureOptions::default();
        assert_eq!(options.normalized_trace_prefix(), "");
        options.trace_prefix = "menu".to_owned();
        assert_eq!(options.normalized_trace_prefix(), "menu: ");
    }
}
