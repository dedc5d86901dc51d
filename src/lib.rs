//! sketchgrade: rubric-based grading for freehand-drawn 2D graphs.
//!
//! A drawing tool produces a flat set of primitives (axes, lines, points,
//! filled areas, labels); an instructor authors a JSON criteria document;
//! this crate grades the one against the other and emits an ordered list
//! of pass/fail [`Score`]s with feedback text.
//!
//! ```
//! use sketchgrade::{Bitmap, Rubric, Sketch, grade, render_results};
//!
//! let sketch = Sketch::new(800.0, 600.0);
//! let rubric = Rubric::from_json(
//!     "demo",
//!     r#"{ "lines": [{ "name": "Demand" }] }"#,
//! )?;
//! let pixels = Bitmap::new(1, 1);
//!
//! let scores = grade(sketch.elements(), &rubric, &pixels);
//! assert_eq!(render_results(&scores), "❌ Demand curve present\n   Demand curve not found!");
//! # Ok::<(), sketchgrade::RubricError>(())
//! ```
//!
//! Grading is pure: it reads an element slice and a raster, mutates
//! nothing, and touches no global state. The drawing tool side lives in
//! [`element`] as the [`Sketch`] lifecycle.

pub mod element;
pub mod errors;
pub mod eval;
pub mod geometry;
mod log;
pub mod names;
pub mod rubric;
pub mod sampler;
pub mod types;

pub use element::{Area, Curve, Element, Label, Line, LineStyle, PointMark, Segment, Sketch, SpecialTag};
pub use errors::RubricError;
pub use eval::{Resolved, grade, render_results};
pub use rubric::{Assignment, Catalog, Rubric};
pub use sampler::{Bitmap, CoverageReport, PixelGrid};
pub use types::{Rgb, Score, Slope};
