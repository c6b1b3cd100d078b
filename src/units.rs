//! Conversion between document millimetres and screen pixels.
//!
//! Stored geometry is always in millimetres. Pixels only exist on screen and
//! depend on the zoom percentage, so every conversion takes the zoom as an
//! argument instead of reading it from shared state.

use serde::{Deserialize, Serialize};

/// Pixels per millimetre at 96 DPI and 100% zoom.
pub const MM_TO_PX: f64 = 3.779_527_559_1;

/// Smallest zoom percentage the editor accepts.
pub const MIN_ZOOM: u16 = 25;

/// Largest zoom percentage the editor accepts.
pub const MAX_ZOOM: u16 = 200;

/// Granularity of zoom changes.
pub const ZOOM_STEP: u16 = 25;

/// Convert millimetres to pixels at the given zoom percentage.
pub fn to_pixels(mm: f64, zoom_percent: f64) -> f64 {
    mm * MM_TO_PX * (zoom_percent / 100.0)
}

/// Convert pixels back to millimetres at the given zoom percentage.
pub fn to_millimeters(px: f64, zoom_percent: f64) -> f64 {
    px / (MM_TO_PX * (zoom_percent / 100.0))
}

/// Quantize `value` to the nearest multiple of `spacing`.
///
/// A non-positive spacing disables snapping and returns `value` unchanged.
pub fn snap_to_grid(value: f64, spacing: f64) -> f64 {
    if spacing <= 0.0 {
        return value;
    }
    (value / spacing).round() * spacing
}

/// Zoom percentage, always within `[MIN_ZOOM, MAX_ZOOM]` on a `ZOOM_STEP` grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "u16", into = "u16")]
pub struct Zoom(u16);

impl Zoom {
    /// Create a zoom level, clamping and rounding to the nearest step.
    pub fn new(percent: u16) -> Self {
        let clamped = percent.clamp(MIN_ZOOM, MAX_ZOOM);
        let steps = (clamped + ZOOM_STEP / 2) / ZOOM_STEP;
        Self((steps * ZOOM_STEP).clamp(MIN_ZOOM, MAX_ZOOM))
    }

    /// The zoom as an integer percentage.
    pub fn percent(self) -> u16 {
        self.0
    }

    /// The zoom as a float percentage, ready for the unit converter.
    pub fn as_f64(self) -> f64 {
        f64::from(self.0)
    }

    /// One step closer.
    pub fn zoom_in(self) -> Self {
        Self::new(self.0.saturating_add(ZOOM_STEP))
    }

    /// One step further away.
    pub fn zoom_out(self) -> Self {
        Self::new(self.0.saturating_sub(ZOOM_STEP))
    }

    /// Back to 100%.
    pub fn reset(self) -> Self {
        Self::default()
    }

    /// Whether another `zoom_in` would change anything.
    pub fn can_zoom_in(self) -> bool {
        self.0 < MAX_ZOOM
    }

    /// Whether another `zoom_out` would change anything.
    pub fn can_zoom_out(self) -> bool {
        self.0 > MIN_ZOOM
    }

    /// Millimetres to pixels at this zoom.
    pub fn to_pixels(self, mm: f64) -> f64 {
        to_pixels(mm, self.as_f64())
    }

    /// Pixels to millimetres at this zoom.
    pub fn to_millimeters(self, px: f64) -> f64 {
        to_millimeters(px, self.as_f64())
    }
}

impl Default for Zoom {
    fn default() -> Self {
        Self(100)
    }
}

impl From<u16> for Zoom {
    fn from(percent: u16) -> Self {
        Self::new(percent)
    }
}

impl From<Zoom> for u16 {
    fn from(zoom: Zoom) -> Self {
        zoom.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_pixels_at_full_zoom() {
        let px = to_pixels(10.0, 100.0);
        assert!((px - 37.795_275_591).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_scales_linearly() {
        let half = to_pixels(10.0, 50.0);
        let double = to_pixels(10.0, 200.0);
        assert!((double - 4.0 * half).abs() < 1e-9);
    }

    #[test]
    fn test_round_trip() {
        for zoom in [25.0, 75.0, 100.0, 150.0, 200.0] {
            let mm = to_millimeters(to_pixels(123.45, zoom), zoom);
            assert!((mm - 123.45).abs() < 1e-9);
        }
    }

    #[test]
    fn test_snap_to_grid() {
        assert_eq!(snap_to_grid(14.0, 5.0), 15.0);
        assert_eq!(snap_to_grid(12.4, 5.0), 10.0);
        assert_eq!(snap_to_grid(7.3, 0.0), 7.3);
    }

    #[test]
    fn test_zoom_clamps_and_steps() {
        assert_eq!(Zoom::new(10).percent(), 25);
        assert_eq!(Zoom::new(500).percent(), 200);
        assert_eq!(Zoom::new(110).percent(), 100);
        assert_eq!(Zoom::new(113).percent(), 125);
    }

    #[test]
    fn test_zoom_in_out_saturates() {
        let max = Zoom::new(200);
        assert_eq!(max.zoom_in(), max);
        assert!(!max.can_zoom_in());

        let min = Zoom::new(25);
        assert_eq!(min.zoom_out(), min);
        assert!(!min.can_zoom_out());

        assert_eq!(Zoom::default().zoom_in().percent(), 125);
    }

    #[test]
    fn test_zoom_serde_clamps() {
        let zoom: Zoom = serde_json::from_str("330").unwrap();
        assert_eq!(zoom.percent(), 200);
        assert_eq!(serde_json::to_string(&Zoom::new(75)).unwrap(), "75");
    }
}
