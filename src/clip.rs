//!Cohen–Sutherland line clipping against the canvas rectangle
use crate::types::Vec2;
const INSIDE: u8 = 0;
const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const TOP: u8 = 4;
const BOTTOM: u8 = 8;
///screen space rectangle, y grows downwards so min.y is the top edge
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}
impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }
    ///the whole canvas
    pub fn from_size(size: Vec2) -> Self {
        Self::new(Vec2::splat(0.0), size)
    }
    pub fn contains(&self, p: Vec2) -> bool {
        self.outcode(p) == INSIDE
    }
    fn outcode(&self, p: Vec2) -> u8 {
        let mut code = INSIDE;
        if p.x < self.min.x {
            code |= LEFT
        } else if p.x > self.max.x {
            code |= RIGHT
        }
        if p.y < self.min.y {
            code |= TOP
        } else if p.y > self.max.y {
            code |= BOTTOM
        }
        code
    }
}
///first coordinate of the point on a b whose second coordinate is edge,
///falls back to halved differences when the endpoints are too far apart to subtract
fn intercept(a: (f64, f64), b: (f64, f64), edge: f64) -> f64 {
    let (d0, d1) = (b.0 - a.0, b.1 - a.1);
    if d0.is_finite() && d1.is_finite() {
        a.0 + d0 * ((edge - a.1) / d1)
    } else {
        let t = (edge * 0.5 - a.1 * 0.5) / (b.1 * 0.5 - a.1 * 0.5);
        a.0 * (1.0 - t) + b.0 * t
    }
}
///clips the segment a b to rect, None if nothing of it is visible
///
///endpoints inside rect are returned unchanged, moved endpoints land exactly on the violated edge,
///non finite endpoints are rejected
pub fn clip(mut a: Vec2, mut b: Vec2, rect: &Rect) -> Option<(Vec2, Vec2)> {
    if !a.is_finite() || !b.is_finite() {
        return None;
    }
    let mut code_a = rect.outcode(a);
    let mut code_b = rect.outcode(b);
    loop {
        if code_a | code_b == INSIDE {
            return Some((a, b));
        }
        if code_a & code_b != INSIDE {
            return None;
        }
        let out = if code_a != INSIDE { code_a } else { code_b };
        let moved = if out & TOP != 0 {
            Vec2::new(intercept((a.x, a.y), (b.x, b.y), rect.min.y), rect.min.y)
        } else if out & BOTTOM != 0 {
            Vec2::new(intercept((a.x, a.y), (b.x, b.y), rect.max.y), rect.max.y)
        } else if out & RIGHT != 0 {
            Vec2::new(rect.max.x, intercept((a.y, a.x), (b.y, b.x), rect.max.x))
        } else {
            Vec2::new(rect.min.x, intercept((a.y, a.x), (b.y, b.x), rect.min.x))
        };
        if !moved.is_finite() {
            return None;
        }
        if out == code_a {
            a = moved;
            code_a = rect.outcode(a);
        } else {
            b = moved;
            code_b = rect.outcode(b);
        }
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn outcodes() {
        let r = Rect::from_size(Vec2::new(10.0, 10.0));
        assert_eq!(r.outcode(Vec2::new(5.0, 5.0)), INSIDE);
        assert_eq!(r.outcode(Vec2::new(-1.0, -1.0)), LEFT | TOP);
        assert_eq!(r.outcode(Vec2::new(11.0, 11.0)), RIGHT | BOTTOM);
    }
    #[test]
    fn intercept_survives_overflowing_differences() {
        assert_eq!(intercept((0.0, 0.0), (10.0, 20.0), 10.0), 5.0);
        assert_eq!(intercept((-1e308, -1e308), (1e308, 1e308), 0.0), 0.0);
    }
}
