#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! Coordinates are `f64` plane units with the origin at the top-left. All
//! types are `Copy`, so "cloning before mutation" is implicit.
//!
//! Per-axis and per-edge lookups go through [`Axis`] and [`Edge`] so every
//! caller gets an exhaustive `match` instead of a string-keyed table.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A point in the plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Point")]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point shifted by `(dx, dy)`.
    #[inline]
    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Tagged JSON record, e.g. `{"type":"Point","x":1.0,"y":2.0}`.
    ///
    /// Inspection aid only; there is no versioning.
    pub fn serialize(&self) -> String {
        to_tagged_json(self)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "*Point:{},{}", self.x, self.y)
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Size")]
pub struct Size {
    pub w: f64,
    pub h: f64,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(w: f64, h: f64) -> Self {
        Self { w, h }
    }

    /// Whether both dimensions are at least `min`.
    #[inline]
    pub fn fits(&self, min: f64) -> bool {
        self.w >= min && self.h >= min
    }

    pub fn serialize(&self) -> String {
        to_tagged_json(self)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "*Size:{},{}", self.w, self.h)
    }
}

/// Axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Rectangle")]
pub struct Rectangle {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rectangle {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// The empty rectangle `0,0,0,0`.
    #[inline]
    pub const fn empty() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Rectangle at the origin with the given size.
    #[inline]
    pub const fn from_size(w: f64, h: f64) -> Self {
        Self::new(0.0, 0.0, w, h)
    }

    #[inline]
    pub fn left(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn top(&self) -> f64 {
        self.y
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    /// Value of the requested edge.
    #[inline]
    pub fn edge(&self, edge: Edge) -> f64 {
        match edge {
            Edge::Top => self.top(),
            Edge::Left => self.left(),
            Edge::Right => self.right(),
            Edge::Bottom => self.bottom(),
        }
    }

    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.w, self.h)
    }

    #[inline]
    pub fn set_size(&mut self, size: Size) {
        self.w = size.w;
        self.h = size.h;
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.w * self.h
    }

    /// Half-extent offset from this rectangle's own origin.
    ///
    /// Uses floor division of the extent, not of the absolute coordinate
    /// sum: a rectangle at `(100, 100, 50, 50)` has center `(25, 25)`.
    /// Callers that need an absolute point add `x`/`y` themselves.
    #[inline]
    pub fn center(&self) -> Point {
        Point::new(
            ((self.right() - self.left()) / 2.0).floor(),
            ((self.bottom() - self.top()) / 2.0).floor(),
        )
    }

    /// Strict interior test. Points on the boundary are not contained.
    #[inline]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x > self.x && pt.x < self.right() && pt.y > self.y && pt.y < self.bottom()
    }

    /// Whether `other` lies entirely inside this rectangle (boundary inclusive).
    #[inline]
    pub fn contains_rect(&self, other: &Rectangle) -> bool {
        other.left() >= self.left()
            && other.top() >= self.top()
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Whether the interiors of the two rectangles intersect.
    ///
    /// Rectangles that only share a border do not overlap.
    #[inline]
    pub fn overlaps_interior(&self, other: &Rectangle) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    pub fn serialize(&self) -> String {
        to_tagged_json(self)
    }
}

impl fmt::Display for Rectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "*Rectangle:{},{}^{},{}", self.x, self.y, self.w, self.h)
    }
}

/// Orientation of a border.
///
/// `Horizontal` is a border that runs left-to-right: probing happens above
/// and below it and its position is a `y` coordinate. `Vertical` is the
/// mirror image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// Coordinate that positions a border on this axis.
    #[inline]
    pub fn line_of(self, pt: Point) -> f64 {
        match self {
            Self::Horizontal => pt.y,
            Self::Vertical => pt.x,
        }
    }

    /// Coordinate that runs along a border on this axis.
    #[inline]
    pub fn span_of(self, pt: Point) -> f64 {
        match self {
            Self::Horizontal => pt.x,
            Self::Vertical => pt.y,
        }
    }

    /// `pt` with its line coordinate replaced.
    #[inline]
    #[must_use]
    pub fn with_line(self, pt: Point, value: f64) -> Point {
        match self {
            Self::Horizontal => Point::new(pt.x, value),
            Self::Vertical => Point::new(value, pt.y),
        }
    }

    /// `pt` with its span coordinate replaced.
    #[inline]
    #[must_use]
    pub fn with_span(self, pt: Point, value: f64) -> Point {
        match self {
            Self::Horizontal => Point::new(value, pt.y),
            Self::Vertical => Point::new(pt.x, value),
        }
    }

    /// Point whose line coordinate is `line` and span coordinate is `span`.
    #[inline]
    pub fn point(self, line: f64, span: f64) -> Point {
        match self {
            Self::Horizontal => Point::new(span, line),
            Self::Vertical => Point::new(line, span),
        }
    }

    /// Edges a border on this axis can coincide with: `[near, far]`.
    #[inline]
    pub const fn line_edges(self) -> [Edge; 2] {
        match self {
            Self::Horizontal => [Edge::Top, Edge::Bottom],
            Self::Vertical => [Edge::Left, Edge::Right],
        }
    }

    /// Edges bounding the extent along a border on this axis: `[start, end]`.
    #[inline]
    pub const fn span_edges(self) -> [Edge; 2] {
        match self {
            Self::Horizontal => [Edge::Left, Edge::Right],
            Self::Vertical => [Edge::Top, Edge::Bottom],
        }
    }

    /// Rectangle extent perpendicular to the border (height for horizontal).
    #[inline]
    pub fn extent(self, rect: &Rectangle) -> f64 {
        match self {
            Self::Horizontal => rect.h,
            Self::Vertical => rect.w,
        }
    }

    #[inline]
    pub const fn other(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

/// One side of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Edge {
    Top,
    Left,
    Right,
    Bottom,
}

impl Edge {
    pub const ALL: [Self; 4] = [Self::Top, Self::Left, Self::Right, Self::Bottom];

    /// Read this edge from a rectangle.
    #[inline]
    pub fn value(self, rect: &Rectangle) -> f64 {
        rect.edge(self)
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Bottom => Self::Top,
        }
    }

    /// Axis of a border lying on this edge.
    #[inline]
    pub const fn axis(self) -> Axis {
        match self {
            Self::Top | Self::Bottom => Axis::Horizontal,
            Self::Left | Self::Right => Axis::Vertical,
        }
    }

    /// Whether this is the edge with the smaller coordinate on its axis.
    #[inline]
    pub const fn is_leading(self) -> bool {
        matches!(self, Self::Top | Self::Left)
    }
}

fn to_tagged_json<T: Serialize>(value: &T) -> String {
    // Plain f64 fields cannot fail to serialize except for non-finite values,
    // which serde_json renders as `null`.
    serde_json::to_string(value).unwrap_or_else(|_| String::from("null"))
}
