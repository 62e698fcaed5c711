use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in world pixels. `x`/`y` is the top-left corner and
/// `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a rect of the given size centered on `(cx, cy)`.
    pub fn from_center(cx: i32, cy: i32, width: i32, height: i32) -> Self {
        Self::new(cx - width / 2, cy - height / 2, width, height)
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn top_left(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn center(&self) -> (i32, i32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Move the rect so its left edge sits at `left`. Size is unchanged.
    pub fn set_left(&mut self, left: i32) {
        self.x = left;
    }

    /// Move the rect so its right edge sits at `right`. Size is unchanged.
    pub fn set_right(&mut self, right: i32) {
        self.x = right - self.width;
    }

    pub fn set_top(&mut self, top: i32) {
        self.y = top;
    }

    pub fn set_bottom(&mut self, bottom: i32) {
        self.y = bottom - self.height;
    }

    pub fn set_top_left(&mut self, (x, y): (i32, i32)) {
        self.x = x;
        self.y = y;
    }

    /// Grow (or shrink, for negative deltas) around the current center.
    /// Sizes are floored at zero.
    pub fn inflate(&self, dw: i32, dh: i32) -> Self {
        Self {
            x: self.x - dw / 2,
            y: self.y - dh / 2,
            width: (self.width + dw).max(0),
            height: (self.height + dh).max(0),
        }
    }

    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        translate(self, dx, dy)
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        intersects(self, other)
    }
}

/// Strict AABB overlap: rectangles that only share an edge do not intersect,
/// and a zero-sized rectangle never intersects anything.
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    if a.width <= 0 || a.height <= 0 || b.width <= 0 || b.height <= 0 {
        return false;
    }
    a.left() < b.right() && a.right() > b.left() && a.top() < b.bottom() && a.bottom() > b.top()
}

pub fn translate(rect: &Rect, dx: i32, dy: i32) -> Rect {
    Rect {
        x: rect.x + dx,
        y: rect.y + dy,
        ..*rect
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_and_center() {
        let r = Rect::new(10, 20, 40, 60);
        assert_eq!(r.left(), 10);
        assert_eq!(r.right(), 50);
        assert_eq!(r.top(), 20);
        assert_eq!(r.bottom(), 80);
        assert_eq!(r.center(), (30, 50));
    }

    #[test]
    fn overlapping_rects_intersect() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 10, 10);
        assert!(intersects(&a, &b));
        assert!(intersects(&b, &a));
    }

    #[test]
    fn touching_edges_do_not_intersect() {
        let a = Rect::new(0, 0, 10, 10);
        let right_neighbor = Rect::new(10, 0, 10, 10);
        let below_neighbor = Rect::new(0, 10, 10, 10);
        assert!(!a.intersects(&right_neighbor), "shared vertical edge");
        assert!(!a.intersects(&below_neighbor), "shared horizontal edge");
    }

    #[test]
    fn contained_rect_intersects() {
        let outer = Rect::new(0, 0, 100, 100);
        let inner = Rect::new(40, 40, 5, 5);
        assert!(outer.intersects(&inner));
    }

    #[test]
    fn zero_sized_rect_never_intersects() {
        let a = Rect::new(0, 0, 10, 10);
        let empty = Rect::new(5, 5, 0, 0);
        assert!(!a.intersects(&empty));
    }

    #[test]
    fn edge_setters_preserve_size() {
        let mut r = Rect::new(0, 0, 40, 60);
        r.set_right(100);
        assert_eq!((r.left(), r.right()), (60, 100));
        r.set_bottom(500);
        assert_eq!((r.top(), r.bottom()), (440, 500));
        assert_eq!((r.width, r.height), (40, 60));
    }

    #[test]
    fn inflate_keeps_center() {
        let r = Rect::new(100, 100, 40, 60);
        let big = r.inflate(50, 24);
        assert_eq!(big, Rect::new(75, 88, 90, 84));
        assert_eq!(big.center(), r.center());
    }

    #[test]
    fn translate_moves_without_resizing() {
        let r = Rect::new(1, 2, 3, 4);
        assert_eq!(translate(&r, 10, -2), Rect::new(11, 0, 3, 4));
    }

    #[test]
    fn from_center_places_rect() {
        let orb = Rect::from_center(200, 300, 28, 28);
        assert_eq!(orb, Rect::new(186, 286, 28, 28));
        assert_eq!(orb.center(), (200, 300));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn any_rect() -> impl Strategy<Value = Rect> {
            (-500i32..500, -500i32..500, 0i32..200, 0i32..200)
                .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
        }

        proptest! {
            #[test]
            fn intersects_is_symmetric(a in any_rect(), b in any_rect()) {
                prop_assert_eq!(intersects(&a, &b), intersects(&b, &a));
            }

            #[test]
            fn translate_preserves_intersection(
                a in any_rect(),
                b in any_rect(),
                dx in -300i32..300,
                dy in -300i32..300,
            ) {
                prop_assert_eq!(
                    intersects(&a, &b),
                    intersects(&translate(&a, dx, dy), &translate(&b, dx, dy))
                );
            }
        }
    }
}
