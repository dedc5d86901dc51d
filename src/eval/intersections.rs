//! Intersection criteria: each entry names a set of lines that must all
//! pass through one derived vertex.

use crate::element::Element;
use crate::eval::{format_list_with_and, vertex_satisfies};
use crate::geometry::find_all_intersections;
use crate::rubric::IntersectionSpec;
use crate::types::Score;

pub(crate) fn check(elements: &[Element], specs: &[IntersectionSpec]) -> Vec<Score> {
    let vertices = find_all_intersections(elements);

    specs
        .iter()
        .map(|spec| {
            let required: Vec<String> = spec.lines.iter().map(|r| r.resolve(elements)).collect();
            let list = format_list_with_and(&required);
            let passed = vertices.iter().any(|v| vertex_satisfies(v, &required));
            if passed {
                Score::pass(format!("{list} intersect"))
            } else {
                Score::fail(format!("{list} intersect"), format!("{list} don't intersect!"))
            }
        })
        .collect()
}
