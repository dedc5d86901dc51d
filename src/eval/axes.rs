//! Axis naming criteria.

use crate::element::{Element, SpecialTag, find_special_tag};
use crate::names::matches_name;
use crate::rubric::AxesSpec;
use crate::types::Score;

pub(crate) fn check(elements: &[Element], spec: &AxesSpec) -> Vec<Score> {
    vec![
        check_axis(elements, SpecialTag::XAxis, &spec.x_axis, "x-axis"),
        check_axis(elements, SpecialTag::YAxis, &spec.y_axis, "y-axis"),
    ]
}

fn check_axis(elements: &[Element], tag: SpecialTag, expected: &str, display: &str) -> Score {
    let name = format!("{display} name");
    match find_special_tag(elements, tag) {
        Some(axis) if matches_name(&axis.name, expected) => Score::pass(name),
        Some(_) => Score::fail(name, format!("Incorrect name for the {display}!")),
        None => Score::fail(name, format!("The {display} is missing!")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Sketch;
    use crate::rubric::AxesSpec;

    fn spec(x: &str, y: &str) -> AxesSpec {
        AxesSpec {
            x_axis: x.to_string(),
            y_axis: y.to_string(),
        }
    }

    #[test]
    fn freshly_initialized_axes_fail_renamed_criteria() {
        let sketch = Sketch::new(800.0, 600.0);
        let scores = check(sketch.elements(), &spec("Quantity", "Price"));
        assert_eq!(scores.len(), 2);
        assert!(!scores[0].passed);
        assert_eq!(scores[0].feedback, "Incorrect name for the x-axis!");
        assert!(!scores[1].passed);
    }

    #[test]
    fn matching_names_pass_with_normalization() {
        let mut sketch = Sketch::new(800.0, 600.0);
        // Axes are elements 0 and 1 of a fresh sketch.
        sketch.rename(0, " Quantity ");
        sketch.rename(1, "Pricé");
        let scores = check(sketch.elements(), &spec("quantity", "price"));
        assert!(scores.iter().all(|s| s.passed));
        assert!(scores.iter().all(|s| s.feedback.is_empty()));
    }

    #[test]
    fn missing_axis_fails_instead_of_panicking() {
        let scores = check(&[], &spec("q", "p"));
        assert!(!scores[0].passed);
        assert_eq!(scores[0].feedback, "The x-axis is missing!");
        assert_eq!(scores[1].feedback, "The y-axis is missing!");
    }
}
