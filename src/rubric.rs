//! The criteria document model.
//!
//! Instructors author grading criteria as JSON: a catalog of assignments,
//! each carrying one rubric keyed by category. Unknown keys are ignored so
//! a newer document still loads on an older engine.

use serde::Deserialize;
use std::fmt;

use crate::element::{Element, SpecialTag, find_special_tag};
use crate::errors::RubricError;
use crate::types::Rgb;

/// One assignment's grading criteria. Every category is optional; absent
/// categories are simply never graded.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Rubric {
    #[serde(default)]
    pub axes: Option<AxesSpec>,
    #[serde(default)]
    pub lines: Option<Vec<LineSpec>>,
    #[serde(default)]
    pub intersections: Option<Vec<IntersectionSpec>>,
    #[serde(default)]
    pub endpoints: Option<Vec<EndpointSpec>>,
    #[serde(default)]
    pub shifts: Option<Vec<ShiftSpec>>,
    #[serde(default)]
    pub areas: Option<Vec<AreaSpec>>,
}

impl Rubric {
    /// Parse a single rubric from JSON text. `name` labels the source in
    /// diagnostics.
    pub fn from_json(name: &str, source: &str) -> Result<Rubric, RubricError> {
        let rubric: Rubric =
            serde_json::from_str(source).map_err(|e| RubricError::malformed(name, source, &e))?;
        rubric.validate()?;
        Ok(rubric)
    }

    /// Reject values serde accepts but grading cannot use. Colors are
    /// checked here so a typo fails at load instead of silently never
    /// matching a pixel.
    fn validate(&self) -> Result<(), RubricError> {
        for area in self.areas.iter().flatten() {
            if let Some(fill) = &area.fill {
                if Rgb::from_hex(fill).is_none() {
                    return Err(RubricError::InvalidColor {
                        value: fill.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Expected axis names.
#[derive(Clone, Debug, Deserialize)]
pub struct AxesSpec {
    #[serde(rename = "xAxis")]
    pub x_axis: String,
    #[serde(rename = "yAxis")]
    pub y_axis: String,
}

/// One expected line, optionally with slope criteria.
#[derive(Clone, Debug, Deserialize)]
pub struct LineSpec {
    pub name: String,
    #[serde(rename = "type", default)]
    pub line_type: LineType,
    #[serde(default)]
    pub slope: Option<SlopeSpec>,
}

/// Expected draw style of a line criterion. `Normal` lines are the curves
/// of the graph; `Dotted` lines are construction guides.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LineType {
    #[default]
    Normal,
    Dotted,
}

impl LineType {
    /// The word feedback messages use for this kind of line.
    pub fn noun(self) -> &'static str {
        match self {
            LineType::Normal => "curve",
            LineType::Dotted => "line",
        }
    }
}

/// Slope criteria attached to a line. Either field may be absent.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
pub struct SlopeSpec {
    #[serde(default)]
    pub steepness: Option<Steepness>,
    #[serde(default)]
    pub sign: Option<SlopeSign>,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Steepness {
    Steep,
    Shallow,
    Vertical,
    Horizontal,
}

impl fmt::Display for Steepness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Steepness::Steep => "steep",
            Steepness::Shallow => "shallow",
            Steepness::Vertical => "vertical",
            Steepness::Horizontal => "horizontal",
        })
    }
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SlopeSign {
    Positive,
    Negative,
}

/// A reference to a line by rubric name. The placeholders `"xAxis"` and
/// `"yAxis"` resolve to whatever the student has renamed the tagged axis
/// lines to; anything else is taken literally.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct LineRef(pub String);

impl LineRef {
    pub fn new(name: impl Into<String>) -> LineRef {
        LineRef(name.into())
    }

    /// Resolve axis placeholders against the drawn elements. Falls back to
    /// the raw reference when the tagged axis is missing.
    pub fn resolve(&self, elements: &[Element]) -> String {
        let tag = match self.0.as_str() {
            "xAxis" => Some(SpecialTag::XAxis),
            "yAxis" => Some(SpecialTag::YAxis),
            _ => None,
        };
        tag.and_then(|t| find_special_tag(elements, t))
            .map(|line| line.name.clone())
            .unwrap_or_else(|| self.0.clone())
    }
}

/// A set of lines that must all pass through one derived vertex.
#[derive(Clone, Debug, Deserialize)]
pub struct IntersectionSpec {
    pub lines: Vec<LineRef>,
}

/// Where a line's endpoints must land: each endpoint is either a single
/// line (the endpoint must touch it) or a set of lines naming a vertex
/// (the endpoint must sit on their intersection).
#[derive(Clone, Debug, Deserialize)]
pub struct EndpointSpec {
    pub line: LineRef,
    #[serde(default)]
    pub endpoint1: Option<Vec<LineRef>>,
    #[serde(default)]
    pub endpoint2: Option<Vec<LineRef>>,
}

/// A required displacement of `line2` relative to `line1`.
#[derive(Clone, Debug, Deserialize)]
pub struct ShiftSpec {
    pub line1: LineRef,
    pub line2: LineRef,
    pub direction: Direction,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        })
    }
}

/// One expected filled region, bounded by the vertices named by its
/// line sets. `fill` optionally pins the required fill color as a hex
/// string; without it the drawn area's own color is sampled.
#[derive(Clone, Debug, Deserialize)]
pub struct AreaSpec {
    pub name: String,
    pub vertices: Vec<Vec<LineRef>>,
    #[serde(default)]
    pub fill: Option<String>,
}

impl AreaSpec {
    /// The pinned fill color, if any. `from_json` validated the hex, so
    /// this is `None` exactly when `fill` is absent.
    pub fn fill_color(&self) -> Option<Rgb> {
        self.fill.as_deref().and_then(Rgb::from_hex)
    }
}

/// One catalog entry: a named assignment within a course unit.
#[derive(Clone, Debug, Deserialize)]
pub struct Assignment {
    pub name: String,
    pub unit: String,
    pub criteria: Rubric,
}

/// The full criteria document: an ordered list of assignments grouped by
/// unit in authoring order.
#[derive(Clone, Debug, Deserialize)]
pub struct Catalog {
    pub graphs: Vec<Assignment>,
}

impl Catalog {
    pub fn from_json(name: &str, source: &str) -> Result<Catalog, RubricError> {
        let catalog: Catalog =
            serde_json::from_str(source).map_err(|e| RubricError::malformed(name, source, &e))?;
        for graph in &catalog.graphs {
            graph.criteria.validate()?;
        }
        Ok(catalog)
    }

    /// Look up an assignment by its exact name.
    pub fn find(&self, name: &str) -> Result<&Assignment, RubricError> {
        self.graphs
            .iter()
            .find(|g| g.name == name)
            .ok_or_else(|| RubricError::UnknownGraph {
                name: name.to_string(),
            })
    }
}
