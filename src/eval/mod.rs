//! The grading orchestrator and its per-category evaluators.
//!
//! Categories run in a fixed order. Every category except `lines` is
//! gated: it is skipped entirely unless every score accumulated so far
//! passed, so a student with a missing curve is not buried under
//! downstream geometry feedback. `lines` always runs so the "what is
//! missing" feedback is always present.

mod areas;
mod axes;
mod endpoints;
mod intersections;
mod lines;
mod shifts;

use crate::element::{Area, Curve, Element};
use crate::geometry::Vertex;
use crate::log::debug;
use crate::names::matches_name;
use crate::rubric::Rubric;
use crate::sampler::PixelGrid;
use crate::types::Score;

/// Outcome of looking up a drawn element by rubric name. Duplicate names
/// are an error the student must fix, so they are distinguished from
/// absence rather than picking one arbitrarily.
#[derive(Clone, Copy, Debug)]
pub enum Resolved<T> {
    NotFound,
    Ambiguous(usize),
    Found(T),
}

/// Grade a drawn element set against a rubric.
///
/// `pixels` is the rendered raster the area evaluator samples; pass an
/// empty [`crate::sampler::Bitmap`] when the rubric has no areas.
pub fn grade(elements: &[Element], rubric: &Rubric, pixels: &dyn PixelGrid) -> Vec<Score> {
    let mut scores = Vec::new();

    if let Some(spec) = &rubric.axes {
        if all_passed(&scores) {
            scores.extend(axes::check(elements, spec));
        }
    }
    if let Some(specs) = &rubric.lines {
        scores.extend(lines::check(elements, specs));
    }
    if let Some(specs) = &rubric.intersections {
        if all_passed(&scores) {
            scores.extend(intersections::check(elements, specs));
        }
    }
    if let Some(specs) = &rubric.endpoints {
        if all_passed(&scores) {
            scores.extend(endpoints::check(elements, specs));
        }
    }
    if let Some(specs) = &rubric.shifts {
        if all_passed(&scores) {
            scores.extend(shifts::check(elements, specs));
        }
    }
    if let Some(specs) = &rubric.areas {
        if all_passed(&scores) {
            scores.extend(areas::check(elements, specs, pixels));
        }
    }

    debug!(total = scores.len(), "graded");
    scores
}

fn all_passed(scores: &[Score]) -> bool {
    scores.iter().all(|s| s.passed)
}

/// Render a score list for display: one line per pass, two per fail.
pub fn render_results(scores: &[Score]) -> String {
    let lines: Vec<String> = scores
        .iter()
        .map(|s| {
            if s.passed {
                format!("✅ {}", s.name)
            } else {
                format!("❌ {}\n   {}", s.name, s.feedback)
            }
        })
        .collect();
    lines.join("\n")
}

/// The unique drawn curve matching `name`, via normalized comparison.
fn find_curve<'a>(elements: &'a [Element], name: &str) -> Resolved<Curve<'a>> {
    let mut matches = elements
        .iter()
        .filter_map(Element::as_curve)
        .filter(|c| matches_name(&c.line.name, name));

    match (matches.next(), matches.next()) {
        (None, _) => Resolved::NotFound,
        (Some(only), None) => Resolved::Found(only),
        (Some(_), Some(_)) => Resolved::Ambiguous(2 + matches.count()),
    }
}

/// The unique drawn area matching `name`, via normalized comparison.
fn find_area<'a>(elements: &'a [Element], name: &str) -> Resolved<&'a Area> {
    let mut matches = elements
        .iter()
        .filter_map(Element::as_area)
        .filter(|a| matches_name(&a.name, name));

    match (matches.next(), matches.next()) {
        (None, _) => Resolved::NotFound,
        (Some(only), None) => Resolved::Found(only),
        (Some(_), Some(_)) => Resolved::Ambiguous(2 + matches.count()),
    }
}

/// Does a derived vertex satisfy a required line set? Every required name
/// must match one of the vertex's participants; extra participants are
/// fine (a third line through the same point does not spoil it).
fn vertex_satisfies(vertex: &Vertex, required: &[String]) -> bool {
    required
        .iter()
        .all(|r| vertex.lines.iter().any(|l| matches_name(l, r)))
}

/// Join names for feedback text: "A", "A and B", "A, B, and C".
fn format_list_with_and(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{first} and {second}"),
        [init @ .., last] => format!("{}, and {last}", init.join(", ")),
    }
}
