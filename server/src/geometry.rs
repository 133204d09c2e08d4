use crate::vec2::Vec2;

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub position: Vec2,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            position: Vec2::new(x, y),
            width,
            height,
        }
    }

    pub fn left(&self) -> f64 {
        self.position.x
    }

    pub fn right(&self) -> f64 {
        self.position.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.position.y
    }

    pub fn bottom(&self) -> f64 {
        self.position.y + self.height
    }
}

/// Strict overlap on both axes. Shared edges do not count.
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.left() < b.right() && a.right() > b.left() && a.top() < b.bottom() && a.bottom() > b.top()
}

/// True if `a` overlaps any rect in `set`. Stops at the first hit.
pub fn overlaps_any<'a, I>(a: &Rect, set: I) -> bool
where
    I: IntoIterator<Item = &'a Rect>,
{
    set.into_iter().any(|b| overlaps(a, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_rects_collide() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(overlaps(&a, &b));
        assert!(overlaps(&b, &a));
    }

    #[test]
    fn touching_edges_do_not_collide() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        let corner = Rect::new(10.0, 10.0, 5.0, 5.0);
        assert!(!overlaps(&a, &right));
        assert!(!overlaps(&a, &below));
        assert!(!overlaps(&a, &corner));
    }

    #[test]
    fn overlap_requires_both_axes() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let same_column = Rect::new(2.0, 20.0, 4.0, 4.0);
        let same_row = Rect::new(20.0, 2.0, 4.0, 4.0);
        assert!(!overlaps(&a, &same_column));
        assert!(!overlaps(&a, &same_row));
    }

    #[test]
    fn contained_rect_collides() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(40.0, 40.0, 1.0, 1.0);
        assert!(overlaps(&outer, &inner));
    }

    #[test]
    fn overlaps_any_checks_whole_set() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let set = [
            Rect::new(50.0, 50.0, 5.0, 5.0),
            Rect::new(9.0, 9.0, 5.0, 5.0),
        ];
        assert!(overlaps_any(&a, &set));
        assert!(!overlaps_any(&a, &set[..1]));
        let empty: [Rect; 0] = [];
        assert!(!overlaps_any(&a, &empty));
    }
}
