//! Area criteria: a named fill must cover the polygon bounded by the
//! rubric's vertices and stay inside it.
//!
//! The target polygon is built from derived intersections, so it tracks
//! wherever the student actually drew the boundary lines. Coverage and
//! leakage are judged by pixel sampling against the fill color: the
//! rubric's pinned color when it has one, otherwise whatever color the
//! student filled with.

use glam::DVec2;

use crate::element::Element;
use crate::eval::{Resolved, find_area, find_curve, format_list_with_and, vertex_satisfies};
use crate::geometry::{Vertex, find_all_intersections};
use crate::rubric::{AreaSpec, LineRef};
use crate::sampler::{PixelGrid, measure_fill};
use crate::types::{Rgb, Score, tolerances};

pub(crate) fn check(elements: &[Element], specs: &[AreaSpec], pixels: &dyn PixelGrid) -> Vec<Score> {
    let vertices = find_all_intersections(elements);
    let mut scores = Vec::new();

    for spec in specs {
        let boundary: Vec<Vec<String>> = spec
            .vertices
            .iter()
            .map(|refs| refs.iter().map(|r| boundary_name(r, elements)).collect())
            .collect();
        scores.extend(check_area(
            elements,
            &vertices,
            &boundary,
            &spec.name,
            spec.fill_color(),
            pixels,
        ));
    }

    scores
}

/// Resolve one boundary reference to the drawn line's name: axis
/// placeholders through their tags, everything else through name lookup,
/// falling back to the raw reference.
fn boundary_name(line_ref: &LineRef, elements: &[Element]) -> String {
    let resolved = line_ref.resolve(elements);
    match find_curve(elements, &resolved) {
        Resolved::Found(curve) => curve.line.name.clone(),
        Resolved::NotFound | Resolved::Ambiguous(_) => resolved,
    }
}

fn check_area(
    elements: &[Element],
    vertices: &[Vertex],
    boundary: &[Vec<String>],
    name: &str,
    pinned_fill: Option<Rgb>,
    pixels: &dyn PixelGrid,
) -> Vec<Score> {
    let area = match find_area(elements, name) {
        Resolved::NotFound => {
            return vec![Score::fail(
                format!("{name} area present"),
                format!("{name} area not found!"),
            )];
        }
        Resolved::Ambiguous(_) => {
            return vec![Score::fail(
                format!("Only 1 {name} area present"),
                format!("Multiple {name} areas found!"),
            )];
        }
        Resolved::Found(area) => area,
    };

    let mut adjacent: Vec<String> = Vec::new();
    for vertex_names in boundary {
        for n in vertex_names {
            if !adjacent.contains(n) {
                adjacent.push(n.clone());
            }
        }
    }
    let list = format_list_with_and(&adjacent);

    let mut polygon: Vec<DVec2> = Vec::new();
    for required in boundary {
        match vertices.iter().find(|v| vertex_satisfies(v, required)) {
            Some(vertex) => polygon.push(vertex.point),
            None => {
                return vec![Score::fail(
                    format!("{name} area is correctly bounded"),
                    format!("The {name} area should be bounded by {list}!"),
                )];
            }
        }
    }
    if polygon.len() < 3 {
        return vec![Score::fail(
            format!("{name} area is correctly bounded"),
            format!("The {name} area should be bounded by {list}!"),
        )];
    }

    let report = measure_fill(pixels, &polygon, pinned_fill.unwrap_or(area.color));
    let filled = report.coverage_percent() > tolerances::COVERAGE_MIN_PERCENT;
    let contained = report.outside_matching < tolerances::LEAKAGE_MAX_PIXELS;

    let mut scores = vec![Score {
        name: format!("{name} area is correctly filled"),
        passed: filled,
        feedback: if filled {
            String::new()
        } else {
            format!("The {name} area should cover the whole area inside {list}!")
        },
    }];
    // Containment is only meaningful once the fill itself is there.
    if filled {
        scores.push(Score {
            name: format!("{name} area is correctly contained"),
            passed: contained,
            feedback: if contained {
                String::new()
            } else {
                format!("The {name} area should be contained by {list}!")
            },
        });
    }

    scores
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Segment;
    use crate::sampler::Bitmap;
    use crate::types::Rgb;
    use glam::dvec2;

    const FILL: Rgb = Rgb {
        r: 255,
        g: 128,
        b: 0,
    };

    fn solid(name: &str, x1: f64, y1: f64, x2: f64, y2: f64) -> Element {
        Element::solid_line(name, Segment::from_coords(x1, y1, x2, y2), Rgb::BLACK, 2.0)
    }

    /// Four lines framing the square with corners at (20, 20) and
    /// (120, 120). The derived polygon encloses pixels 20..=119 on each
    /// axis: exactly 10000.
    fn frame() -> Vec<Element> {
        vec![
            solid("left", 20.0, 0.0, 20.0, 140.0),
            solid("right", 120.0, 0.0, 120.0, 140.0),
            solid("top", 0.0, 20.0, 140.0, 20.0),
            solid("bottom", 0.0, 120.0, 140.0, 120.0),
        ]
    }

    fn framed_area(name: &str) -> Element {
        let mut area = Element::area(name, dvec2(30.0, 30.0), FILL);
        if let Element::Area(a) = &mut area {
            a.points = vec![
                dvec2(30.0, 30.0),
                dvec2(110.0, 30.0),
                dvec2(110.0, 110.0),
                dvec2(30.0, 110.0),
            ];
        }
        area
    }

    fn square_spec(name: &str) -> AreaSpec {
        let vertex = |a: &str, b: &str| vec![LineRef::new(a), LineRef::new(b)];
        AreaSpec {
            name: name.to_string(),
            vertices: vec![
                vertex("left", "top"),
                vertex("right", "top"),
                vertex("right", "bottom"),
                vertex("left", "bottom"),
            ],
            fill: None,
        }
    }

    #[test]
    fn missing_area_fails_presence() {
        let grid = Bitmap::new(1, 1);
        let scores = check(&frame(), &[square_spec("Surplus")], &grid);
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].name, "Surplus area present");
        assert_eq!(scores[0].feedback, "Surplus area not found!");
    }

    #[test]
    fn well_filled_area_passes_both_checks() {
        let mut elements = frame();
        elements.push(framed_area("Surplus"));
        // 41 rows of 100 columns inside the polygon: 41% coverage.
        let mut grid = Bitmap::new(160, 160);
        grid.fill_rect(20, 20, 100, 41, FILL);

        let scores = check(&elements, &[square_spec("Surplus")], &grid);
        assert_eq!(scores.len(), 2);
        assert!(scores[0].passed);
        assert_eq!(scores[0].name, "Surplus area is correctly filled");
        assert!(scores[1].passed);
        assert_eq!(scores[1].name, "Surplus area is correctly contained");
    }

    #[test]
    fn coverage_at_exactly_forty_percent_fails_strictly() {
        let mut elements = frame();
        elements.push(framed_area("Surplus"));
        // 40 rows of 100 columns: exactly 40%, which is not more than 40.
        let mut grid = Bitmap::new(160, 160);
        grid.fill_rect(20, 20, 100, 40, FILL);

        let scores = check(&elements, &[square_spec("Surplus")], &grid);
        assert_eq!(scores.len(), 1);
        assert!(!scores[0].passed);
        assert_eq!(
            scores[0].feedback,
            "The Surplus area should cover the whole area inside left, top, right, and bottom!"
        );
    }

    #[test]
    fn heavy_leakage_fails_containment() {
        let mut elements = frame();
        elements.push(framed_area("Surplus"));
        let mut grid = Bitmap::new(300, 160);
        grid.fill_rect(20, 20, 100, 100, FILL);
        // 8000 leaked pixels: 80 columns by 100 rows outside the frame.
        grid.fill_rect(200, 20, 80, 100, FILL);

        let scores = check(&elements, &[square_spec("Surplus")], &grid);
        assert_eq!(scores.len(), 2);
        assert!(scores[0].passed);
        assert!(!scores[1].passed);
        assert_eq!(
            scores[1].feedback,
            "The Surplus area should be contained by left, top, right, and bottom!"
        );
    }

    #[test]
    fn leakage_just_under_the_limit_passes() {
        let mut elements = frame();
        elements.push(framed_area("Surplus"));
        let mut grid = Bitmap::new(300, 160);
        grid.fill_rect(20, 20, 100, 100, FILL);
        // 7999 leaked pixels.
        grid.fill_rect(200, 20, 80, 100, FILL);
        grid.fill_rect(200, 20, 1, 1, Rgb::BLACK);

        let scores = check(&elements, &[square_spec("Surplus")], &grid);
        assert!(scores[1].passed);
    }

    #[test]
    fn pinned_fill_color_is_sampled_instead_of_the_drawn_one() {
        let mut elements = frame();
        // The drawn area claims orange, but the raster was filled green.
        elements.push(framed_area("Surplus"));
        let green = Rgb::new(128, 192, 128);
        let mut grid = Bitmap::new(160, 160);
        grid.fill_rect(20, 20, 100, 100, green);

        let pinned = AreaSpec {
            fill: Some("#80c080".to_string()),
            ..square_spec("Surplus")
        };
        let scores = check(&elements, &[pinned], &grid);
        assert_eq!(scores.len(), 2);
        assert!(scores.iter().all(|s| s.passed));

        // Without the pin, sampling follows the drawn orange and finds
        // nothing.
        let scores = check(&elements, &[square_spec("Surplus")], &grid);
        assert_eq!(scores.len(), 1);
        assert!(!scores[0].passed);
    }

    #[test]
    fn unresolved_vertex_fails_bounded() {
        let mut elements = frame();
        elements.push(framed_area("Surplus"));
        let grid = Bitmap::new(1, 1);

        let spec = AreaSpec {
            name: "Surplus".to_string(),
            vertices: vec![
                vec![LineRef::new("left"), LineRef::new("top")],
                vec![LineRef::new("left"), LineRef::new("Ghost")],
                vec![LineRef::new("right"), LineRef::new("bottom")],
            ],
            fill: None,
        };
        let scores = check(&elements, &[spec], &grid);
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].name, "Surplus area is correctly bounded");
        assert_eq!(
            scores[0].feedback,
            "The Surplus area should be bounded by left, top, Ghost, right, and bottom!"
        );
    }
}
