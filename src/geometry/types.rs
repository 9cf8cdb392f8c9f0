//! Core geometric types shared by the conversion stages

use std::fmt;

/// Tolerance for treating two coordinates as the same point
pub const EPSILON: f64 = 1e-6;

/// A 2D point
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise offset, used to resolve relative path coordinates
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Whether both coordinates lie within [`EPSILON`] of `other`
    pub fn coincides(&self, other: &Point) -> bool {
        (self.x - other.x).abs() <= EPSILON && (self.y - other.y).abs() <= EPSILON
    }
}

/// A 2D affine transform in SVG matrix order.
///
/// ```text
/// [x']   [a c e] [x]
/// [y'] = [b d f] [y]
/// [1 ]   [0 0 1] [1]
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Affine {
    pub const IDENTITY: Affine = Affine {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// Scale and rotation about the origin followed by a translation.
    /// `angle_degrees` is counter-clockwise in a y-up frame.
    pub fn from_scale_rotation_translation(
        scale_x: f64,
        scale_y: f64,
        angle_degrees: f64,
        tx: f64,
        ty: f64,
    ) -> Self {
        let (sin, cos) = angle_degrees.to_radians().sin_cos();
        Self {
            a: scale_x * cos,
            b: scale_x * sin,
            c: -scale_y * sin,
            d: scale_y * cos,
            e: tx,
            f: ty,
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Map a point through the matrix
    pub fn apply(&self, p: Point) -> Point {
        Point {
            x: self.a * p.x + self.c * p.y + self.e,
            y: self.b * p.x + self.d * p.y + self.f,
        }
    }

    pub fn to_array(&self) -> [f64; 6] {
        [self.a, self.b, self.c, self.d, self.e, self.f]
    }
}

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Six space-separated numbers, the LightBurn `XForm` text form
impl fmt::Display for Affine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.to_array().iter().map(|n| format_number(*n)).collect();
        f.write_str(&parts.join(" "))
    }
}

/// A path vertex with optional bezier control points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
    /// Outgoing control point, for the curve leaving toward the next vertex
    pub c0: Option<Point>,
    /// Incoming control point, for the curve arriving from the previous vertex
    pub c1: Option<Point>,
}

impl Vertex {
    /// A plain polyline joint
    pub fn plain(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            c0: None,
            c1: None,
        }
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// How a vertex sequence closes on itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Closure {
    /// The path does not return to its start
    Open,
    /// The last vertex duplicates the first, so the final sequential edge
    /// closes the path
    Coincident,
    /// Closed by a `Z` command while the endpoints differ; needs a
    /// wraparound edge from the last vertex back to the first
    Explicit,
}

/// Ordered vertices of one path together with its closure
#[derive(Debug, Clone, PartialEq)]
pub struct VertexPath {
    pub vertices: Vec<Vertex>,
    pub closure: Closure,
}

impl VertexPath {
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Edge type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionKind {
    Line,
    Bezier,
}

impl ConnectionKind {
    /// Single-letter tag used in the `T` attribute
    pub fn tag(&self) -> &'static str {
        match self {
            ConnectionKind::Line => "L",
            ConnectionKind::Bezier => "B",
        }
    }
}

/// An edge between two vertices, referenced by index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    pub kind: ConnectionKind,
    pub p0: usize,
    pub p1: usize,
}

impl Connection {
    pub fn new(kind: ConnectionKind, p0: usize, p1: usize) -> Self {
        Self { kind, p0, p1 }
    }
}

/// Shortest decimal form of a coordinate; negative zero prints as `0`
pub fn format_number(n: f64) -> String {
    if n == 0.0 {
        "0".to_string()
    } else {
        n.to_string()
    }
}
