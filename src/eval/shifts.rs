//! Shift criteria: a second line must sit displaced from a first in a
//! given direction, with matching slope.
//!
//! Entries whose lines are missing or ambiguous produce nothing here;
//! the line evaluator already reported those.

use crate::element::{Element, Line};
use crate::eval::{Resolved, find_curve};
use crate::geometry::slopes_similar;
use crate::rubric::{Direction, ShiftSpec};
use crate::types::Score;

pub(crate) fn check(elements: &[Element], specs: &[ShiftSpec]) -> Vec<Score> {
    let mut scores = Vec::new();

    for spec in specs {
        let name1 = spec.line1.resolve(elements);
        let name2 = spec.line2.resolve(elements);
        let (Resolved::Found(curve1), Resolved::Found(curve2)) =
            (find_curve(elements, &name1), find_curve(elements, &name2))
        else {
            continue;
        };
        scores.push(check_shift(curve1.line, curve2.line, spec.direction));
    }

    scores
}

fn check_shift(line1: &Line, line2: &Line, direction: Direction) -> Score {
    if !slopes_similar(line1.seg, line2.seg) {
        return Score::fail(
            format!("{} and {} have the same slope", line1.name, line2.name),
            format!(
                "{}'s and {}'s slopes are different!",
                line1.name, line2.name
            ),
        );
    }

    // Displacement in screen coordinates: up means smaller y.
    let d = line2.seg.midpoint() - line1.seg.midpoint();
    let passed = match direction {
        Direction::Up => d.y < 0.0,
        Direction::Down => d.y > 0.0,
        Direction::Right => d.x > 0.0,
        Direction::Left => d.x < 0.0,
    };

    let name = format!("{} is shifted {direction} from {}", line2.name, line1.name);
    if passed {
        Score::pass(name)
    } else {
        Score::fail(
            name,
            format!(
                "{} isn't shifted {direction} from {}!",
                line2.name, line1.name
            ),
        )
    }
}
