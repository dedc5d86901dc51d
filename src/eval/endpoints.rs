//! Endpoint criteria: where a line's ends must land. Each endpoint is
//! either a single line (touch anywhere along it) or a vertex named by a
//! set of lines (land on their derived intersection).
//!
//! Like shifts, unresolvable references skip the entry rather than fail
//! it: the missing pieces already produced line-presence feedback.

use crate::element::{Element, Line};
use crate::eval::{Resolved, find_curve, format_list_with_and, vertex_satisfies};
use crate::geometry::{Vertex, find_all_intersections, within_extent};
use crate::names::matches_name;
use crate::rubric::{EndpointSpec, LineRef};
use crate::types::{Score, tolerances};

pub(crate) fn check(elements: &[Element], specs: &[EndpointSpec]) -> Vec<Score> {
    let vertices = find_all_intersections(elements);
    let mut scores = Vec::new();

    for spec in specs {
        let line_name = spec.line.resolve(elements);
        let Resolved::Found(curve) = find_curve(elements, &line_name) else {
            continue;
        };
        let line = curve.line;

        let mut checks = Vec::new();
        let mut skip = false;
        for refs in [&spec.endpoint1, &spec.endpoint2].into_iter().flatten() {
            match check_endpoint(elements, &vertices, line, refs) {
                Some(outcome) => checks.push(outcome),
                None => {
                    skip = true;
                    break;
                }
            }
        }
        if skip {
            continue;
        }

        match checks.as_slice() {
            [] => {}
            [(passed, names)] => {
                let feedback = if *passed {
                    String::new()
                } else {
                    format!(
                        "{} should end at {}!",
                        line.name,
                        format_list_with_and(names)
                    )
                };
                scores.push(Score {
                    name: format!("{} had the correct endpoint", line.name),
                    passed: *passed,
                    feedback,
                });
            }
            [(passed1, names1), (passed2, names2)] => {
                let passed = *passed1 && *passed2;
                let feedback = if passed {
                    String::new()
                } else {
                    format!(
                        "{} should go from {} to {}!",
                        line.name,
                        format_list_with_and(names1),
                        format_list_with_and(names2)
                    )
                };
                scores.push(Score {
                    name: format!("{} has correct endpoints", line.name),
                    passed,
                    feedback,
                });
            }
            _ => unreachable!("at most two endpoints per entry"),
        }
    }

    scores
}

/// One endpoint check: whether either end of `line` lands on the
/// referenced target, plus the drawn names to cite in feedback. `None`
/// when a reference cannot be resolved.
fn check_endpoint(
    elements: &[Element],
    vertices: &[Vertex],
    line: &Line,
    refs: &[LineRef],
) -> Option<(bool, Vec<String>)> {
    if let [only] = refs {
        let target_name = only.resolve(elements);
        let Resolved::Found(target) = find_curve(elements, &target_name) else {
            return None;
        };
        let passed = within_extent(line.seg.start, target.line.seg)
            || within_extent(line.seg.end, target.line.seg);
        return Some((passed, vec![target.line.name.clone()]));
    }

    let mut required: Vec<String> = refs.iter().map(|r| r.resolve(elements)).collect();
    required.push(line.name.clone());
    let vertex = vertices.iter().find(|v| vertex_satisfies(v, &required))?;

    let names: Vec<String> = vertex
        .lines
        .iter()
        .filter(|l| !matches_name(l, &line.name))
        .cloned()
        .collect();
    let passed = vertex.point.distance(line.seg.start) < tolerances::ENDPOINT_RADIUS
        || vertex.point.distance(line.seg.end) < tolerances::ENDPOINT_RADIUS;
    Some((passed, names))
}
