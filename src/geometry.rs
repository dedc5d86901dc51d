//! Relationship derivation: the drawing tool stores only flat segments,
//! so intersections, slopes, and slope similarity are reconstructed here
//! on every grading pass.

use glam::{DVec2, dvec2};

use crate::element::{Element, Segment};
use crate::log::debug;
use crate::types::{Slope, tolerances};

/// A merged crossing point: where two or more gradable lines intersect,
/// identified by the set of participating line names.
#[derive(Clone, Debug, PartialEq)]
pub struct Vertex {
    pub point: DVec2,
    pub lines: Vec<String>,
}

/// Derive every pairwise intersection between gradable (non-arrow) lines,
/// merging near-duplicates into multi-line vertices.
///
/// Merging is greedy in all-pairs scan order: a new intersection joins
/// the first existing vertex within [`tolerances::VERTEX_MERGE`] on each
/// axis. A chain of near-misses can therefore fragment into two vertices;
/// rubrics were authored against that behavior, so it is preserved rather
/// than replaced with a transitive closure.
pub fn find_all_intersections(elements: &[Element]) -> Vec<Vertex> {
    let curves: Vec<_> = elements.iter().filter_map(|e| e.as_curve()).collect();
    let mut vertices: Vec<Vertex> = Vec::new();

    for i in 0..curves.len() {
        for j in (i + 1)..curves.len() {
            let a = curves[i].line;
            let b = curves[j].line;
            let Some(point) = segment_intersection(a.seg, b.seg) else {
                continue;
            };

            let existing = vertices.iter_mut().find(|v| {
                (v.point.x - point.x).abs() < tolerances::VERTEX_MERGE
                    && (v.point.y - point.y).abs() < tolerances::VERTEX_MERGE
            });
            match existing {
                Some(vertex) => {
                    for name in [&a.name, &b.name] {
                        if !vertex.lines.iter().any(|n| n == name) {
                            vertex.lines.push(name.clone());
                        }
                    }
                }
                None => vertices.push(Vertex {
                    point,
                    lines: vec![a.name.clone(), b.name.clone()],
                }),
            }
        }
    }

    debug!(count = vertices.len(), "derived intersection vertices");
    vertices
}

/// Intersection of two segments via the determinant formula, or `None`
/// for parallel/coincident pairs and crossings outside both segments'
/// slack boxes.
pub fn segment_intersection(a: Segment, b: Segment) -> Option<DVec2> {
    let (x1, y1, x2, y2) = (a.start.x, a.start.y, a.end.x, a.end.y);
    let (x3, y3, x4, y4) = (b.start.x, b.start.y, b.end.x, b.end.y);

    let denominator = (x1 - x2) * (y3 - y4) - (y1 - y2) * (x3 - x4);
    if denominator == 0.0 {
        return None;
    }

    let px = ((x1 * y2 - y1 * x2) * (x3 - x4) - (x1 - x2) * (x3 * y4 - y3 * x4)) / denominator;
    let py = ((x1 * y2 - y1 * x2) * (y3 - y4) - (y1 - y2) * (x3 * y4 - y3 * x4)) / denominator;
    let point = dvec2(px, py);

    if !within_extent(point, a) || !within_extent(point, b) {
        return None;
    }
    Some(point)
}

/// Whether `point` lies inside the segment's bounding box widened by
/// [`tolerances::SEGMENT_SLACK`] on every side.
pub fn within_extent(point: DVec2, seg: Segment) -> bool {
    let min = seg.start.min(seg.end) - DVec2::splat(tolerances::SEGMENT_SLACK);
    let max = seg.start.max(seg.end) + DVec2::splat(tolerances::SEGMENT_SLACK);
    point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
}

/// Slope of a segment in mathematical convention.
///
/// Canvas Y grows downward, so the rise is negated to make positive
/// slopes read as "up and to the right" like on paper. Criteria data
/// depends on this inversion.
pub fn slope(seg: Segment) -> Slope {
    if seg.start.x == seg.end.x {
        return Slope::VERTICAL;
    }
    let d = seg.delta();
    Slope::finite(-d.y / d.x)
}

/// Whether two segments count as having the same slope for shift grading.
///
/// Equal when both are vertical, both are steeper than
/// [`tolerances::BOTH_STEEP`], or either the rightward direction angles
/// differ by at most [`tolerances::ANGLE_DELTA`] or the raw slopes differ
/// by less than [`tolerances::SLOPE_DELTA`]. The dual threshold tolerates
/// near-vertical instability in the slope difference and near-zero
/// instability in the angle difference.
pub fn slopes_similar(a: Segment, b: Segment) -> bool {
    let slope_a = slope(a);
    let slope_b = slope(b);

    if slope_a.is_vertical() && slope_b.is_vertical() {
        return true;
    }
    if slope_a.abs() > tolerances::BOTH_STEEP && slope_b.abs() > tolerances::BOTH_STEEP {
        return true;
    }

    let angle_a = rightward_angle(a);
    let angle_b = rightward_angle(b);
    let similar = (angle_a - angle_b).abs() <= tolerances::ANGLE_DELTA
        || (slope_a.raw() - slope_b.raw()).abs() < tolerances::SLOPE_DELTA;

    debug!(
        slope_a = slope_a.raw(),
        slope_b = slope_b.raw(),
        angle_a,
        angle_b,
        similar,
        "compared slopes"
    );
    similar
}

/// Directional angle of a segment after canonicalizing it to point
/// rightward (non-increasing x first).
fn rightward_angle(seg: Segment) -> f64 {
    let (left, right) = if seg.start.x < seg.end.x {
        (seg.start, seg.end)
    } else {
        (seg.end, seg.start)
    };
    (right.y - left.y).atan2(right.x - left.x)
}
