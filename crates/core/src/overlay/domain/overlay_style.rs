use serde::{Deserialize, Serialize};

use crate::shared::constants::DEFAULT_OVERLAY_COLOR;

/// A normalized point within a parent rectangle: `(0, 0)` is bottom-left,
/// `(1, 1)` is top-right.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const TOP_LEFT: Vec2 = Vec2 { x: 0.0, y: 1.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// RGBA color, 8 bits per channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color(pub [u8; 4]);

impl Color {
    pub const RED: Color = Color(DEFAULT_OVERLAY_COLOR);

    pub fn rgb(&self) -> [u8; 3] {
        [self.0[0], self.0[1], self.0[2]]
    }

    pub fn alpha(&self) -> u8 {
        self.0[3]
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::RED
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillMode {
    /// Solid rectangle covering the whole detection.
    #[default]
    Fill,
    /// Border only, `thickness` pixels wide.
    Outline { thickness: u32 },
}

/// Visual configuration shared by every overlay rectangle.
///
/// Anchors and pivot follow a parent-relative layout where positive Y
/// points up; overlays are pinned to the surface's top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayStyle {
    pub anchor_min: Vec2,
    pub anchor_max: Vec2,
    pub pivot: Vec2,
    pub color: Color,
    pub fill: FillMode,
}

impl OverlayStyle {
    pub fn with_color(self, color: Color) -> Self {
        Self { color, ..self }
    }

    pub fn with_fill(self, fill: FillMode) -> Self {
        Self { fill, ..self }
    }
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            anchor_min: Vec2::TOP_LEFT,
            anchor_max: Vec2::TOP_LEFT,
            pivot: Vec2::TOP_LEFT,
            color: Color::RED,
            fill: FillMode::Fill,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_style_is_top_left_red_fill() {
        let style = OverlayStyle::default();
        assert_eq!(style.anchor_min, Vec2::new(0.0, 1.0));
        assert_eq!(style.anchor_max, Vec2::new(0.0, 1.0));
        assert_eq!(style.pivot, Vec2::new(0.0, 1.0));
        assert_eq!(style.color, Color([255, 0, 0, 255]));
        assert_eq!(style.fill, FillMode::Fill);
    }

    #[test]
    fn test_builders_replace_single_field() {
        let style = OverlayStyle::default()
            .with_color(Color([0, 255, 0, 128]))
            .with_fill(FillMode::Outline { thickness: 3 });
        assert_eq!(style.color.rgb(), [0, 255, 0]);
        assert_eq!(style.color.alpha(), 128);
        assert_eq!(style.fill, FillMode::Outline { thickness: 3 });
        assert_eq!(style.pivot, Vec2::TOP_LEFT);
    }
}
