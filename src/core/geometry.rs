use serde::{Deserialize, Serialize};

/// Positions are compared on a coarse grid so recognition jitter between
/// lines does not read as an indent change.
pub const COLUMN_SCALE: f64 = 10.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

/// Four corners of a recognized fragment in page-normalized coordinates
/// (origin top-left, y growing downward).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Quad {
    pub top_left: Point,
    pub top_right: Point,
    pub bottom_left: Point,
    pub bottom_right: Point,
}

impl Quad {
    pub fn new(top_left: Point, top_right: Point, bottom_left: Point, bottom_right: Point) -> Self {
        Self {
            top_left,
            top_right,
            bottom_left,
            bottom_right,
        }
    }

    /// Grid column where the fragment's baseline starts.
    pub fn start_column(&self) -> i64 {
        scale_to_column(self.bottom_left.x)
    }

    /// Grid column where the fragment's baseline ends.
    pub fn end_column(&self) -> i64 {
        scale_to_column(self.bottom_right.x)
    }

    /// Only the baseline x coordinates feed the layout heuristic.
    pub fn has_readable_baseline(&self) -> bool {
        self.bottom_left.x.is_finite() && self.bottom_right.x.is_finite()
    }
}

fn scale_to_column(x: f64) -> i64 {
    (x * COLUMN_SCALE).round() as i64
}

/// Axis-aligned box, `x0,y0` top-left and `x1,y1` bottom-right.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BBox {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl BBox {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Rescales a pixel-space box into page-normalized coordinates.
    pub fn normalized(&self, width: u32, height: u32) -> Self {
        let w = f64::from(width.max(1));
        let h = f64::from(height.max(1));
        Self {
            x0: self.x0 / w,
            y0: self.y0 / h,
            x1: self.x1 / w,
            y1: self.y1 / h,
        }
    }

    pub fn to_quad(&self) -> Quad {
        Quad {
            top_left: Point::new(self.x0, self.y0),
            top_right: Point::new(self.x1, self.y0),
            bottom_left: Point::new(self.x0, self.y1),
            bottom_right: Point::new(self.x1, self.y1),
        }
    }
}
