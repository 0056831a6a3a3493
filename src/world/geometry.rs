//! Plane geometry shared by the worlds.
//!
//! Coordinates follow screen conventions: `x` grows to the right and `y`
//! grows downward. Angles are in degrees.

use serde::{Deserialize, Serialize};

/// 2-D affine transform `[a c e; b d f; 0 0 1]`.
///
/// Operations compose on the right, so `translate` and `rotate` act in the
/// local frame of the transformed object.
///
/// # Example
///
/// ```rust
/// use automata::world::geometry::Affine;
///
/// let mut robot = Affine::identity();
/// robot.translate(50.0, 20.0);
/// robot.rotate(90.0);
/// robot.translate(10.0, 0.0);
///
/// // Moving "forward" after a quarter turn moves along +y
/// assert_eq!(robot.position(), (50.0, 30.0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Affine {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Affine {
    fn default() -> Self {
        Self::identity()
    }
}

impl Affine {
    pub const fn identity() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }

    /// `self = self * other`
    pub fn multiply(&mut self, other: &Affine) {
        *self = Affine {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        };
    }

    pub fn translate(&mut self, x: f64, y: f64) -> &mut Self {
        self.multiply(&Affine {
            e: x,
            f: y,
            ..Affine::identity()
        });
        self
    }

    /// Rotate about the local origin.
    pub fn rotate(&mut self, degrees: f64) -> &mut Self {
        self.rotate_about(degrees, 0.0, 0.0)
    }

    /// Rotate about a point given in local coordinates.
    ///
    /// Sine and cosine are rounded to nine decimals so that quarter turns
    /// land exactly on the axes.
    pub fn rotate_about(&mut self, degrees: f64, cx: f64, cy: f64) -> &mut Self {
        let radians = degrees.to_radians();
        let cos = round9(radians.cos());
        let sin = round9(radians.sin());
        self.multiply(&Affine {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            e: cx,
            f: cy,
        });
        self.translate(-cx, -cy)
    }

    /// Map a local point to world coordinates.
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }

    /// World position of the local origin.
    pub fn position(&self) -> (f64, f64) {
        (self.e, self.f)
    }

    /// Direction of the local `x` axis, in degrees.
    pub fn heading(&self) -> f64 {
        self.b.atan2(self.a).to_degrees()
    }
}

fn round9(value: f64) -> f64 {
    (value * 1e9).round() / 1e9
}

/// Axis-aligned rectangle given by two corners, `x1 <= x2` and `y1 <= y2`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Rect {
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }
}

/// Whether the boundary of a circle crosses a vertical segment.
///
/// The segment is `x = wx`, `w1 <= y <= w2`. For a horizontal segment,
/// swap the coordinates of both the centre and the segment.
pub fn circle_crosses_segment(cx: f64, cy: f64, r: f64, wx: f64, w1: f64, w2: f64) -> bool {
    let d = wx - cx;
    let r2 = r * r;
    let d2 = d * d;
    if r2 < d2 {
        return false;
    }
    let s = (r2 - d2).sqrt();
    let (y1, y2) = (cy + s, cy - s);
    (w1..=w2).contains(&y1) || (w1..=w2).contains(&y2)
}

/// Whether the boundary of a circle crosses any edge of a rectangle.
pub fn circle_crosses_rect(cx: f64, cy: f64, r: f64, rect: &Rect) -> bool {
    circle_crosses_segment(cx, cy, r, rect.x1, rect.y1, rect.y2)
        || circle_crosses_segment(cx, cy, r, rect.x2, rect.y1, rect.y2)
        || circle_crosses_segment(cy, cx, r, rect.y1, rect.x1, rect.x2)
        || circle_crosses_segment(cy, cx, r, rect.y2, rect.x1, rect.x2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn translate_moves_along_heading() {
        let mut m = Affine::identity();
        m.rotate(180.0).translate(3.0, 0.0);
        let (x, y) = m.position();
        assert!(close(x, -3.0));
        assert!(close(y, 0.0));
    }

    #[test]
    fn quarter_turns_are_exact() {
        let mut m = Affine::identity();
        m.rotate(90.0);
        assert_eq!((m.a, m.b, m.c, m.d), (0.0, 1.0, -1.0, 0.0));
        assert!(close(m.heading(), 90.0));
    }

    #[test]
    fn rotate_about_keeps_pivot_fixed() {
        let mut m = Affine::identity();
        m.translate(10.0, 10.0);
        let pivot = m.apply(-2.0, 5.0);

        m.rotate_about(37.0, -2.0, 5.0);

        let (px, py) = m.apply(-2.0, 5.0);
        assert!(close(px, pivot.0));
        assert!(close(py, pivot.1));
        assert!(close(m.heading(), 37.0));
    }

    #[test]
    fn circle_crossing_vertical_segment() {
        // Circle at origin radius 5, line x = 3 intersects at y = +-4
        assert!(circle_crosses_segment(0.0, 0.0, 5.0, 3.0, 0.0, 10.0));
        assert!(!circle_crosses_segment(0.0, 0.0, 5.0, 3.0, 5.0, 10.0));
        assert!(!circle_crosses_segment(0.0, 0.0, 5.0, 6.0, -10.0, 10.0));
    }

    #[test]
    fn circle_crossing_rect_edges() {
        let rect = Rect::new(10.0, 0.0, 20.0, 100.0);
        assert!(circle_crosses_rect(5.0, 50.0, 6.0, &rect));
        assert!(!circle_crosses_rect(5.0, 50.0, 4.0, &rect));
        // Bottom edge
        assert!(circle_crosses_rect(15.0, 103.0, 4.0, &rect));
    }
}
