//! Stage configuration.

use crate::style::{SerializableColor, Style};
use serde::{Deserialize, Serialize};

/// Stage configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    pub width: f64,
    pub height: f64,
    /// Frame rate for newly created layers (0 = draw on every change).
    pub layer_fps: u32,
    /// Half size of the square scale handles.
    pub scale_handle_radius: f64,
    /// Half size of the square rotate handles.
    pub rotate_handle_radius: f64,
    /// Half size of the center marker.
    pub center_marker_radius: f64,
    pub scale_handle_color: SerializableColor,
    pub rotate_handle_color: SerializableColor,
    /// Style given to shapes drawn with the shape tools.
    pub new_shape_style: Style,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            layer_fps: 0,
            scale_handle_radius: 3.0,
            rotate_handle_radius: 6.0,
            center_marker_radius: 2.0,
            scale_handle_color: SerializableColor::black(),
            rotate_handle_color: SerializableColor::gray(),
            new_shape_style: Style::default(),
        }
    }
}
