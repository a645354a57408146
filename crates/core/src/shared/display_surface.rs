use serde::{Deserialize, Serialize};

/// The on-screen region that receives the overlay, in display units.
///
/// Read-only from the renderer's point of view; non-positive dimensions
/// are accepted and simply produce degenerate geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplaySurface {
    pub width: f32,
    pub height: f32,
}

/// How a surface is measured from the preview widget's rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceMeasurement {
    /// Width and height are read from their own axes.
    #[default]
    Independent,
    /// Height is copied from the width, treating the preview as square.
    /// Only for parity with square-preview layouts.
    WidthOnly,
}

impl DisplaySurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Measures a surface from a preview rectangle of `rect_width` x `rect_height`.
    pub fn measure(rect_width: f32, rect_height: f32, mode: SurfaceMeasurement) -> Self {
        match mode {
            SurfaceMeasurement::Independent => Self::new(rect_width, rect_height),
            SurfaceMeasurement::WidthOnly => Self::new(rect_width, rect_width),
        }
    }

    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_independent_measurement_keeps_both_axes() {
        let s = DisplaySurface::measure(640.0, 480.0, SurfaceMeasurement::Independent);
        assert_eq!(s, DisplaySurface::new(640.0, 480.0));
    }

    #[test]
    fn test_width_only_measurement_copies_width() {
        let s = DisplaySurface::measure(640.0, 480.0, SurfaceMeasurement::WidthOnly);
        assert_eq!(s, DisplaySurface::new(640.0, 640.0));
    }

    #[test]
    fn test_default_measurement_is_independent() {
        assert_eq!(SurfaceMeasurement::default(), SurfaceMeasurement::Independent);
    }

    #[rstest]
    #[case::positive(200.0, 100.0, false)]
    #[case::zero_width(0.0, 100.0, true)]
    #[case::negative_height(200.0, -1.0, true)]
    #[case::nan(f32::NAN, 100.0, true)]
    fn test_is_degenerate(#[case] w: f32, #[case] h: f32, #[case] expected: bool) {
        assert_eq!(DisplaySurface::new(w, h).is_degenerate(), expected);
    }

    #[test]
    fn test_measurement_serializes_snake_case() {
        let json = serde_json::to_string(&SurfaceMeasurement::WidthOnly).unwrap();
        assert_eq!(json, "\"width_only\"");
    }
}
