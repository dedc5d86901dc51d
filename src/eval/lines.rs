//! Line presence, style, and slope criteria, plus extraneous-line
//! detection. This category is never gated; its feedback tells the
//! student what to draw next.

use crate::element::{Element, Line, LineStyle};
use crate::eval::{Resolved, find_curve, format_list_with_and};
use crate::geometry::slope;
use crate::names::matches_name;
use crate::rubric::{LineSpec, LineType, SlopeSign, SlopeSpec, Steepness};
use crate::types::{Score, tolerances};

pub(crate) fn check(elements: &[Element], specs: &[LineSpec]) -> Vec<Score> {
    let mut scores = Vec::new();

    for spec in specs {
        let noun = spec.line_type.noun();
        match find_curve(elements, &spec.name) {
            Resolved::NotFound => {
                scores.push(Score::fail(
                    format!("{} {noun} present", spec.name),
                    format!("{} {noun} not found!", spec.name),
                ));
            }
            Resolved::Ambiguous(_) => {
                scores.push(Score::fail(
                    format!("Only 1 {} {noun} present", spec.name),
                    format!("Multiple {} {noun}s found!", spec.name),
                ));
            }
            Resolved::Found(curve) => {
                match (curve.style, spec.line_type) {
                    (LineStyle::Dotted, LineType::Normal) => {
                        scores.push(Score::fail(
                            format!("{} is a solid line", spec.name),
                            format!("{} should not be a dotted line!", spec.name),
                        ));
                        continue;
                    }
                    (LineStyle::Solid, LineType::Dotted) => {
                        scores.push(Score::fail(
                            format!("{} is a dotted line", spec.name),
                            format!("{} should not be a solid line!", spec.name),
                        ));
                        continue;
                    }
                    (LineStyle::Solid, LineType::Normal)
                    | (LineStyle::Dotted, LineType::Dotted) => {}
                }

                scores.push(Score::pass(format!("{} curve present", spec.name)));
                if let Some(slope_spec) = &spec.slope {
                    scores.extend(check_slope(curve.line, slope_spec));
                }
            }
        }
    }

    let extraneous: Vec<String> = elements
        .iter()
        .filter_map(Element::as_curve)
        .filter(|c| c.line.special_tag.is_none())
        .filter(|c| !specs.iter().any(|s| matches_name(&c.line.name, &s.name)))
        .map(|c| c.line.name.clone())
        .collect();
    if !extraneous.is_empty() {
        scores.push(Score::fail(
            "No extraneous elements",
            format!(
                "This graph should not have {}!",
                format_list_with_and(&extraneous)
            ),
        ));
    }

    scores
}

/// Steepness and sign sub-checks. When no steepness is required, a
/// vertical or horizontal line short-circuits with a single failure
/// (its sign is meaningless).
fn check_slope(line: &Line, spec: &SlopeSpec) -> Vec<Score> {
    let user_slope = slope(line.seg);
    let mut scores = Vec::new();

    match spec.steepness {
        Some(steepness) => {
            let passed = match steepness {
                Steepness::Steep => user_slope.abs() >= tolerances::STEEP_MIN,
                Steepness::Shallow => user_slope.abs() <= tolerances::SHALLOW_MAX,
                Steepness::Vertical => {
                    user_slope.is_vertical() || user_slope.abs() >= tolerances::VERTICAL_MIN
                }
                Steepness::Horizontal => user_slope.abs() <= tolerances::HORIZONTAL_MAX,
            };
            let feedback = if passed {
                String::new()
            } else {
                match steepness {
                    Steepness::Vertical | Steepness::Horizontal => {
                        format!("{} should be {steepness}!", line.name)
                    }
                    Steepness::Steep | Steepness::Shallow => {
                        format!("The steepness of {}'s slope is incorrect!", line.name)
                    }
                }
            };
            scores.push(Score {
                name: format!("{} slope steepness", line.name),
                passed,
                feedback,
            });
        }
        None => {
            if user_slope.is_vertical() {
                return vec![Score::fail(
                    format!("{}'s slope", line.name),
                    format!("{} should not be vertical!", line.name),
                )];
            }
            if user_slope.raw() == 0.0 {
                return vec![Score::fail(
                    format!("{}'s slope", line.name),
                    format!("{} should not be horizontal!", line.name),
                )];
            }
        }
    }

    if let Some(sign) = spec.sign {
        let passed = match sign {
            SlopeSign::Positive => user_slope.raw() > 0.0,
            SlopeSign::Negative => user_slope.raw() < 0.0,
        };
        let feedback = if passed {
            String::new()
        } else {
            format!("The sign of {}'s slope is incorrect!", line.name)
        };
        scores.push(Score {
            name: format!("{} slope sign", line.name),
            passed,
            feedback,
        });
    }

    scores
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Segment;
    use crate::types::Rgb;

    fn solid(name: &str, x1: f64, y1: f64, x2: f64, y2: f64) -> Element {
        Element::solid_line(name, Segment::from_coords(x1, y1, x2, y2), Rgb::BLACK, 2.0)
    }

    fn spec(name: &str) -> LineSpec {
        LineSpec {
            name: name.to_string(),
            line_type: LineType::Normal,
            slope: None,
        }
    }

    fn sloped_spec(name: &str, steepness: Option<Steepness>, sign: Option<SlopeSign>) -> LineSpec {
        LineSpec {
            slope: Some(SlopeSpec { steepness, sign }),
            ..spec(name)
        }
    }

    #[test]
    fn missing_curve_fails_with_noun() {
        let scores = check(&[], &[spec("Demand")]);
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].name, "Demand curve present");
        assert_eq!(scores[0].feedback, "Demand curve not found!");

        let dotted = LineSpec {
            line_type: LineType::Dotted,
            ..spec("P1")
        };
        let scores = check(&[], &[dotted]);
        assert_eq!(scores[0].name, "P1 line present");
        assert_eq!(scores[0].feedback, "P1 line not found!");
    }

    #[test]
    fn duplicate_curves_fail() {
        let elements = vec![
            solid("Demand", 0.0, 0.0, 100.0, 100.0),
            solid("demand", 0.0, 10.0, 100.0, 110.0),
        ];
        let scores = check(&elements, &[spec("Demand")]);
        assert_eq!(scores[0].name, "Only 1 Demand curve present");
        assert_eq!(scores[0].feedback, "Multiple Demand curves found!");
    }

    #[test]
    fn style_mismatch_is_the_only_result_for_that_line() {
        let elements = vec![solid("P1", 0.0, 50.0, 100.0, 50.0)];
        let dotted = LineSpec {
            line_type: LineType::Dotted,
            slope: Some(SlopeSpec {
                steepness: Some(Steepness::Horizontal),
                sign: None,
            }),
            ..spec("P1")
        };
        let scores = check(&elements, &[dotted]);
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].name, "P1 is a dotted line");
        assert_eq!(scores[0].feedback, "P1 should not be a solid line!");
    }

    #[test]
    fn present_curve_passes_then_grades_slope() {
        // Rising on paper (downward in screen y), moderately steep.
        let elements = vec![solid("Supply", 0.0, 300.0, 100.0, 0.0)];
        let scores = check(
            &elements,
            &[sloped_spec(
                "Supply",
                Some(Steepness::Steep),
                Some(SlopeSign::Positive),
            )],
        );
        assert_eq!(scores.len(), 3);
        assert!(scores.iter().all(|s| s.passed));
        assert_eq!(scores[0].name, "Supply curve present");
        assert_eq!(scores[1].name, "Supply slope steepness");
        assert_eq!(scores[2].name, "Supply slope sign");
    }

    #[test]
    fn wrong_sign_fails_sign_only() {
        let elements = vec![solid("Demand", 0.0, 300.0, 100.0, 0.0)];
        let scores = check(
            &elements,
            &[sloped_spec("Demand", None, Some(SlopeSign::Negative))],
        );
        assert_eq!(scores.len(), 2);
        assert!(scores[0].passed);
        assert!(!scores[1].passed);
        assert_eq!(scores[1].feedback, "The sign of Demand's slope is incorrect!");
    }

    #[test]
    fn unexpected_vertical_short_circuits() {
        let elements = vec![solid("Demand", 50.0, 0.0, 50.0, 100.0)];
        let scores = check(
            &elements,
            &[sloped_spec("Demand", None, Some(SlopeSign::Negative))],
        );
        assert_eq!(scores.len(), 2);
        assert_eq!(scores[1].name, "Demand's slope");
        assert_eq!(scores[1].feedback, "Demand should not be vertical!");
    }

    #[test]
    fn vertical_steepness_wording() {
        let elements = vec![solid("Q1", 0.0, 0.0, 100.0, 100.0)];
        let scores = check(
            &elements,
            &[sloped_spec("Q1", Some(Steepness::Vertical), None)],
        );
        assert!(!scores[1].passed);
        assert_eq!(scores[1].feedback, "Q1 should be vertical!");
    }

    #[test]
    fn extraneous_lines_are_aggregated() {
        let elements = vec![
            solid("Demand", 0.0, 0.0, 100.0, 100.0),
            solid("scribble", 0.0, 50.0, 100.0, 60.0),
            solid("doodle", 0.0, 70.0, 100.0, 80.0),
        ];
        let scores = check(&elements, &[spec("Demand")]);
        let last = scores.last().unwrap();
        assert_eq!(last.name, "No extraneous elements");
        assert_eq!(
            last.feedback,
            "This graph should not have scribble and doodle!"
        );
    }

    #[test]
    fn axes_are_never_extraneous() {
        let mut sketch = crate::element::Sketch::new(800.0, 600.0);
        sketch.push(solid("Demand", 0.0, 0.0, 100.0, 100.0));
        let scores = check(sketch.elements(), &[spec("Demand")]);
        assert!(scores.iter().all(|s| s.passed));
    }
}
