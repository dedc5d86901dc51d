//! Pixel containment sampling for area grading.
//!
//! Freehand fills are scribbles, not clean polygons, so area criteria are
//! judged by counting fill-colored pixels inside and outside the target
//! polygon at full raster resolution.

use glam::DVec2;

use crate::log::debug;
use crate::types::Rgb;

/// Read access to a rendered RGBA raster. The drawing tool supplies the
/// real canvas behind this; tests use [`Bitmap`].
pub trait PixelGrid {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// Pixel at (x, y) as `[r, g, b, a]`. Coordinates are in bounds.
    fn rgba(&self, x: u32, y: u32) -> [u8; 4];
}

/// An in-memory RGBA raster, transparent black until painted.
#[derive(Clone, Debug)]
pub struct Bitmap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Bitmap {
    pub fn new(width: u32, height: u32) -> Bitmap {
        Bitmap {
            width,
            height,
            data: vec![0; (width as usize) * (height as usize) * 4],
        }
    }

    /// Paint an axis-aligned rectangle with a fully opaque color. The
    /// rectangle is clamped to the bitmap.
    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: Rgb) {
        let x_end = (x + w).min(self.width);
        let y_end = (y + h).min(self.height);
        for py in y..y_end {
            for px in x..x_end {
                let idx = ((py * self.width + px) as usize) * 4;
                self.data[idx] = color.r;
                self.data[idx + 1] = color.g;
                self.data[idx + 2] = color.b;
                self.data[idx + 3] = 255;
            }
        }
    }
}

impl PixelGrid for Bitmap {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn rgba(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y * self.width + x) as usize) * 4;
        [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ]
    }
}

/// Even-odd ray casting against an implicitly closed polygon.
pub fn point_in_polygon(x: f64, y: f64, points: &[DVec2]) -> bool {
    let mut inside = false;
    let mut j = points.len().wrapping_sub(1);
    for i in 0..points.len() {
        let (xi, yi) = (points[i].x, points[i].y);
        let (xj, yj) = (points[j].x, points[j].y);
        if ((yi > y) != (yj > y)) && (x < (xj - xi) * (y - yi) / (yj - yi) + xi) {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Pixel tallies from one fill measurement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CoverageReport {
    /// Fill-colored pixels inside the polygon.
    pub inside_matching: u32,
    /// Fill-colored pixels leaked outside the polygon.
    pub outside_matching: u32,
    /// Total pixels inside the polygon, colored or not.
    pub polygon_pixels: u32,
}

impl CoverageReport {
    /// Percentage of the polygon covered by fill-colored pixels. Zero for
    /// a degenerate polygon enclosing no pixels.
    pub fn coverage_percent(self) -> f64 {
        if self.polygon_pixels == 0 {
            return 0.0;
        }
        self.inside_matching as f64 * 100.0 / self.polygon_pixels as f64
    }
}

/// Scan the whole raster, tallying pixels that exactly match `target`
/// (with any nonzero alpha) against polygon membership.
pub fn measure_fill(grid: &dyn PixelGrid, polygon: &[DVec2], target: Rgb) -> CoverageReport {
    let mut report = CoverageReport::default();

    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let inside = point_in_polygon(x as f64, y as f64, polygon);
            if inside {
                report.polygon_pixels += 1;
            }

            let [r, g, b, a] = grid.rgba(x, y);
            if r == target.r && g == target.g && b == target.b && a > 0 {
                if inside {
                    report.inside_matching += 1;
                } else {
                    report.outside_matching += 1;
                }
            }
        }
    }

    debug!(
        inside = report.inside_matching,
        outside = report.outside_matching,
        polygon = report.polygon_pixels,
        "measured fill"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec2;

    fn square(min: f64, max: f64) -> Vec<DVec2> {
        vec![
            dvec2(min, min),
            dvec2(max, min),
            dvec2(max, max),
            dvec2(min, max),
        ]
    }

    #[test]
    fn point_in_polygon_square() {
        let poly = square(0.5, 4.5);
        assert!(point_in_polygon(2.0, 2.0, &poly));
        assert!(!point_in_polygon(0.0, 0.0, &poly));
        assert!(!point_in_polygon(5.0, 2.0, &poly));
    }

    #[test]
    fn point_in_polygon_concave() {
        // An L shape: (0,0)-(4,0)-(4,2)-(2,2)-(2,4)-(0,4).
        let poly = vec![
            dvec2(0.0, 0.0),
            dvec2(4.0, 0.0),
            dvec2(4.0, 2.0),
            dvec2(2.0, 2.0),
            dvec2(2.0, 4.0),
            dvec2(0.0, 4.0),
        ];
        assert!(point_in_polygon(1.0, 3.0, &poly));
        assert!(point_in_polygon(3.0, 1.0, &poly));
        assert!(!point_in_polygon(3.0, 3.0, &poly));
    }

    #[test]
    fn empty_polygon_contains_nothing() {
        assert!(!point_in_polygon(1.0, 1.0, &[]));
    }

    #[test]
    fn measure_counts_interior_pixels() {
        // The square (0.5, 0.5)-(4.5, 4.5) encloses pixel centers 1..=4 on
        // each axis: 16 pixels.
        let grid = Bitmap::new(8, 8);
        let report = measure_fill(&grid, &square(0.5, 4.5), Rgb::BLACK);
        assert_eq!(report.polygon_pixels, 16);
        assert_eq!(report.inside_matching, 0);
        assert_eq!(report.coverage_percent(), 0.0);
    }

    #[test]
    fn measure_separates_inside_and_leaked_fill() {
        let mut grid = Bitmap::new(8, 8);
        let color = Rgb::new(255, 128, 0);
        // 2x2 inside the polygon, 1x2 outside it.
        grid.fill_rect(1, 1, 2, 2, color);
        grid.fill_rect(6, 1, 1, 2, color);

        let report = measure_fill(&grid, &square(0.5, 4.5), color);
        assert_eq!(report.inside_matching, 4);
        assert_eq!(report.outside_matching, 2);
        assert_eq!(report.coverage_percent(), 25.0);
    }

    #[test]
    fn measure_requires_exact_color_match() {
        let mut grid = Bitmap::new(8, 8);
        grid.fill_rect(1, 1, 2, 2, Rgb::new(255, 128, 0));
        let report = measure_fill(&grid, &square(0.5, 4.5), Rgb::new(255, 128, 1));
        assert_eq!(report.inside_matching, 0);
    }

    #[test]
    fn degenerate_polygon_has_zero_coverage() {
        let mut grid = Bitmap::new(4, 4);
        grid.fill_rect(0, 0, 4, 4, Rgb::BLACK);
        let report = measure_fill(&grid, &[], Rgb::BLACK);
        assert_eq!(report.polygon_pixels, 0);
        assert_eq!(report.coverage_percent(), 0.0);
        assert_eq!(report.outside_matching, 16);
    }
}
