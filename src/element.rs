//! The geometric primitive model shared by the drawing tool and the
//! grading pipeline.
//!
//! Every drawn object is an [`Element`]: a tagged variant over points,
//! the three line kinds, filled areas, and free-standing labels. The
//! drawing tool owns the live mutable set (a [`Sketch`]); grading only
//! ever receives `&[Element]` and never mutates it.

use glam::{DVec2, dvec2};

use crate::types::Rgb;

/// Distance from the axis lines to the canvas border.
const AXIS_PADDING: f64 = 100.0;

/// Fixed role marker for the two axis lines, assigned once when a sketch
/// is initialized and immutable thereafter. Axis grading follows this
/// tag, not the (renamable) line name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpecialTag {
    XAxis,
    YAxis,
}

/// A line segment in canvas coordinates (Y grows downward).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub start: DVec2,
    pub end: DVec2,
}

impl Segment {
    pub fn new(start: DVec2, end: DVec2) -> Segment {
        Segment { start, end }
    }

    pub fn from_coords(x1: f64, y1: f64, x2: f64, y2: f64) -> Segment {
        Segment::new(dvec2(x1, y1), dvec2(x2, y2))
    }

    pub fn midpoint(self) -> DVec2 {
        (self.start + self.end) * 0.5
    }

    pub fn delta(self) -> DVec2 {
        self.end - self.start
    }
}

/// Proportional character advance widths (hundredths of a nominal glyph
/// cell) for the printable ASCII range, used to estimate label extents
/// without a text-measuring backend.
#[rustfmt::skip]
const ADVANCE_WIDTHS: [u8; 95] = [
    45,  55,  62, 115,  90, 132, 125,  40,
    55,  55,  71, 115,  45,  48,  45,  50,
    91,  91,  91,  91,  91,  91,  91,  91,
    91,  91,  50,  50, 120, 120, 120,  78,
   142, 102, 105, 110, 115, 105,  98, 105,
   125,  58,  58, 107,  95, 145, 125, 115,
    95, 115, 107,  95,  97, 118, 102, 150,
   100,  93, 100,  58,  50,  58, 119,  72,
    72,  86,  92,  80,  92,  85,  52,  92,
    92,  47,  47,  88,  48, 135,  92,  86,
    92,  92,  69,  75,  58,  92,  80, 121,
    81,  80,  76,  91,  49,  91, 118,
];

/// Ratio of the nominal glyph cell width to the font size.
const CHAR_ASPECT: f64 = 0.5;

/// Estimated rendered width of `text` at `font_size` pixels.
pub fn text_width(text: &str, font_size: f64) -> f64 {
    let mut hundredths: u32 = 0;
    for c in text.chars() {
        if (' '..='~').contains(&c) {
            hundredths += ADVANCE_WIDTHS[(c as usize) - 0x20] as u32;
        } else {
            hundredths += 100;
        }
    }
    hundredths as f64 * 0.01 * font_size * CHAR_ASPECT
}

/// A piece of text on the canvas. Line and area labels are owned by
/// their line or area; free labels are elements of their own.
#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    pub text: String,
    pub position: DVec2,
    pub font_size: f64,
    pub color: Rgb,
    pub deletable: bool,
    pub draggable: bool,
}

impl Label {
    pub fn new(text: impl Into<String>, position: DVec2, font_size: f64) -> Label {
        Label {
            text: text.into(),
            position,
            font_size,
            color: Rgb::BLACK,
            deletable: true,
            draggable: true,
        }
    }

    pub fn width(&self) -> f64 {
        text_width(&self.text, self.font_size)
    }

    /// Push the label away from its anchor along `unit`, scaled by half
    /// its own extent. Derived once at creation; dragging only
    /// translates afterwards.
    fn offset_along(&mut self, unit: DVec2) {
        self.position.x += unit.x * 1.5 * self.width() / 2.0;
        self.position.y += unit.y * 1.5 * self.font_size / 2.0;
    }
}

/// A stand-alone dot.
#[derive(Clone, Debug, PartialEq)]
pub struct PointMark {
    pub name: String,
    pub position: DVec2,
    pub color: Rgb,
    pub hit_radius: f64,
    pub deletable: bool,
    pub draggable: bool,
}

/// Shared body of the three line kinds. Which kind it is lives in the
/// [`Element`] variant, not here.
#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    pub name: String,
    pub seg: Segment,
    pub color: Rgb,
    pub stroke_weight: f64,
    pub label: Option<Label>,
    pub special_tag: Option<SpecialTag>,
    pub deletable: bool,
    pub draggable: bool,
}

impl Line {
    fn bare(name: impl Into<String>, seg: Segment, color: Rgb, stroke_weight: f64) -> Line {
        Line {
            name: name.into(),
            seg,
            color,
            stroke_weight,
            label: None,
            special_tag: None,
            deletable: true,
            draggable: true,
        }
    }
}

/// A freehand-traced filled region: an open vertex ring (the first point
/// is implicitly repeated for containment tests) plus a fill color.
#[derive(Clone, Debug, PartialEq)]
pub struct Area {
    pub name: String,
    pub points: Vec<DVec2>,
    pub color: Rgb,
    pub label: Option<Label>,
    pub deletable: bool,
    pub draggable: bool,
}

/// A drawable element. Grading matches exhaustively on the variant; there
/// is no runtime type inspection anywhere else.
#[derive(Clone, Debug, PartialEq)]
pub enum Element {
    Point(PointMark),
    Line(Line),
    DottedLine(Line),
    Arrow(Line),
    Area(Area),
    Label(Label),
}

/// Whether a graded curve was drawn solid or dotted. Arrows are never
/// graded as curves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    Dotted,
}

/// A borrowed view of a gradable line and its draw style.
#[derive(Clone, Copy, Debug)]
pub struct Curve<'a> {
    pub line: &'a Line,
    pub style: LineStyle,
}

impl Element {
    /// A solid line with its label placed by slope-dependent geometry.
    pub fn solid_line(
        name: impl Into<String>,
        seg: Segment,
        color: Rgb,
        stroke_weight: f64,
    ) -> Element {
        let mut line = Line::bare(name, seg, color, stroke_weight);
        line.label = Some(solid_label(&line.name, seg));
        Element::Line(line)
    }

    /// A dotted line; its label anchors at the far end and hangs past it.
    pub fn dotted_line(
        name: impl Into<String>,
        seg: Segment,
        color: Rgb,
        stroke_weight: f64,
    ) -> Element {
        let mut line = Line::bare(name, seg, color, stroke_weight);
        line.label = Some(dotted_label(&line.name, seg));
        Element::DottedLine(line)
    }

    /// An arrow. Arrows never own a label and never participate in
    /// line/intersection grading.
    pub fn arrow(
        name: impl Into<String>,
        seg: Segment,
        color: Rgb,
        stroke_weight: f64,
    ) -> Element {
        Element::Arrow(Line::bare(name, seg, color, stroke_weight))
    }

    pub fn point(name: impl Into<String>, position: DVec2, color: Rgb) -> Element {
        Element::Point(PointMark {
            name: name.into(),
            position,
            color,
            hit_radius: 5.0,
            deletable: true,
            draggable: false,
        })
    }

    /// A filled region starting at its first traced point. The label sits
    /// on that starting point.
    pub fn area(name: impl Into<String>, start: DVec2, color: Rgb) -> Element {
        let name = name.into();
        let mut label = Label::new(name.clone(), start, 24.0);
        label.deletable = false;
        Element::Area(Area {
            name,
            points: vec![start],
            color,
            label: Some(label),
            deletable: true,
            draggable: true,
        })
    }

    pub fn name(&self) -> &str {
        match self {
            Element::Point(p) => &p.name,
            Element::Line(l) | Element::DottedLine(l) | Element::Arrow(l) => &l.name,
            Element::Area(a) => &a.name,
            Element::Label(l) => &l.text,
        }
    }

    pub fn special_tag(&self) -> Option<SpecialTag> {
        match self {
            Element::Line(l) | Element::DottedLine(l) | Element::Arrow(l) => l.special_tag,
            Element::Point(_) | Element::Area(_) | Element::Label(_) => None,
        }
    }

    pub fn deletable(&self) -> bool {
        match self {
            Element::Point(p) => p.deletable,
            Element::Line(l) | Element::DottedLine(l) | Element::Arrow(l) => l.deletable,
            Element::Area(a) => a.deletable,
            Element::Label(l) => l.deletable,
        }
    }

    pub fn draggable(&self) -> bool {
        match self {
            Element::Point(p) => p.draggable,
            Element::Line(l) | Element::DottedLine(l) | Element::Arrow(l) => l.draggable,
            Element::Area(a) => a.draggable,
            Element::Label(l) => l.draggable,
        }
    }

    /// View this element as a gradable curve: a solid or dotted line, but
    /// never an arrow.
    pub fn as_curve(&self) -> Option<Curve<'_>> {
        match self {
            Element::Line(l) => Some(Curve {
                line: l,
                style: LineStyle::Solid,
            }),
            Element::DottedLine(l) => Some(Curve {
                line: l,
                style: LineStyle::Dotted,
            }),
            Element::Arrow(_) | Element::Point(_) | Element::Area(_) | Element::Label(_) => None,
        }
    }

    pub fn as_area(&self) -> Option<&Area> {
        match self {
            Element::Area(a) => Some(a),
            _ => None,
        }
    }
}

/// The line carrying a given special tag, if present.
pub fn find_special_tag(elements: &[Element], tag: SpecialTag) -> Option<&Line> {
    elements.iter().find_map(|e| match e {
        Element::Line(l) | Element::DottedLine(l) | Element::Arrow(l)
            if l.special_tag == Some(tag) =>
        {
            Some(l)
        }
        _ => None,
    })
}

/// Label for a solid line: anchored at the rightmost endpoint (topmost
/// for verticals), pushed outward along the segment direction.
fn solid_label(name: &str, seg: Segment) -> Label {
    let (anchor, unit) = if seg.start.x == seg.end.x {
        (
            dvec2(seg.start.x, seg.start.y.min(seg.end.y)),
            dvec2(0.0, -1.0),
        )
    } else {
        let (left, right) = if seg.start.x > seg.end.x {
            (seg.end, seg.start)
        } else {
            (seg.start, seg.end)
        };
        (right, (right - left).normalize())
    };

    let mut label = Label::new(name, anchor, 24.0);
    label.deletable = false;
    label.offset_along(unit);
    label
}

/// Label for a dotted line: anchored at the bottom endpoint for steep
/// lines (below it for verticals), at the second endpoint for shallow
/// ones, always hanging past the anchor.
fn dotted_label(name: &str, seg: Segment) -> Label {
    let d = seg.delta();
    let (anchor, outward) = if d.x == 0.0 {
        (dvec2(seg.start.x, seg.start.y.max(seg.end.y)), dvec2(0.0, 1.0))
    } else if (d.y / d.x).abs() > 1.0 {
        if seg.start.y > seg.end.y {
            (seg.start, -d.normalize())
        } else {
            (seg.end, d.normalize())
        }
    } else {
        (seg.end, d.normalize())
    };

    let mut label = Label::new(name, anchor, 16.0);
    label.deletable = false;
    label.offset_along(outward);
    label
}

/// The live primitive set owned by the drawing tool.
///
/// Holds the drawn elements plus an undo stack of deletions. Created
/// with the two tagged axis lines and the origin label already in place;
/// [`Sketch::clear`] re-initializes them.
#[derive(Clone, Debug)]
pub struct Sketch {
    width: f64,
    height: f64,
    elements: Vec<Element>,
    deleted: Vec<Element>,
}

impl Sketch {
    pub fn new(width: f64, height: f64) -> Sketch {
        let mut sketch = Sketch {
            width,
            height,
            elements: Vec::new(),
            deleted: Vec::new(),
        };
        sketch.init_axes();
        sketch
    }

    /// Read-only snapshot handed to the grader.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Delete the element at `index` if it is deletable, moving it onto
    /// the undo stack. Returns whether anything was deleted.
    pub fn delete(&mut self, index: usize) -> bool {
        match self.elements.get(index) {
            Some(e) if e.deletable() => {
                let removed = self.elements.remove(index);
                self.deleted.push(removed);
                true
            }
            _ => false,
        }
    }

    /// Restore the most recently deleted element, if any.
    pub fn undo_delete(&mut self) -> bool {
        match self.deleted.pop() {
            Some(e) => {
                self.elements.push(e);
                true
            }
            None => false,
        }
    }

    /// Rename the element at `index`, keeping its owned label text in
    /// sync. Free labels change their text. Returns whether anything was
    /// renamed.
    pub fn rename(&mut self, index: usize, name: impl Into<String>) -> bool {
        let name = name.into();
        match self.elements.get_mut(index) {
            Some(Element::Line(l)) | Some(Element::DottedLine(l)) | Some(Element::Arrow(l)) => {
                l.name = name.clone();
                if let Some(label) = &mut l.label {
                    label.text = name;
                }
                true
            }
            Some(Element::Point(p)) => {
                p.name = name;
                true
            }
            Some(Element::Area(a)) => {
                a.name = name.clone();
                if let Some(label) = &mut a.label {
                    label.text = name;
                }
                true
            }
            Some(Element::Label(l)) => {
                l.text = name;
                true
            }
            None => false,
        }
    }

    /// Wipe the sketch and re-initialize the axes and origin label.
    pub fn clear(&mut self) {
        self.elements.clear();
        self.deleted.clear();
        self.init_axes();
    }

    fn init_axes(&mut self) {
        let x_seg = Segment::from_coords(
            AXIS_PADDING,
            self.height - AXIS_PADDING,
            self.width - AXIS_PADDING * 2.0,
            self.height - AXIS_PADDING,
        );
        let y_seg = Segment::from_coords(
            AXIS_PADDING,
            AXIS_PADDING,
            AXIS_PADDING,
            self.height - AXIS_PADDING,
        );

        for (name, seg, tag) in [
            ("xAxis", x_seg, SpecialTag::XAxis),
            ("yAxis", y_seg, SpecialTag::YAxis),
        ] {
            let Element::Line(mut line) = Element::solid_line(name, seg, Rgb::BLACK, 3.0) else {
                unreachable!("solid_line always yields Element::Line");
            };
            line.special_tag = Some(tag);
            line.deletable = false;
            line.draggable = false;
            self.elements.push(Element::Line(line));
        }

        let mut origin = Label::new(
            "0",
            dvec2(AXIS_PADDING - 10.0, self.height - AXIS_PADDING + 10.0),
            24.0,
        );
        origin.deletable = false;
        origin.draggable = false;
        self.elements.push(Element::Label(origin));
    }
}
