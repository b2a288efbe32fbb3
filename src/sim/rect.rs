//! Axis-aligned rectangle geometry for sprites and hit boxes
//!
//! Integer pixel coordinates, y grows downward. `x`/`y` is the top-left corner.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in field coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of the given size centred on `center`
    pub fn from_center(center: IVec2, w: i32, h: i32) -> Self {
        Self::new(center.x - w / 2, center.y - h / 2, w, h)
    }

    /// Rectangle of the given size whose bottom edge midpoint is `midbottom`
    pub fn from_midbottom(midbottom: IVec2, w: i32, h: i32) -> Self {
        Self::new(midbottom.x - w / 2, midbottom.y - h, w, h)
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.x
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.y
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    #[inline]
    pub fn pos(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }

    pub fn center(&self) -> IVec2 {
        IVec2::new(self.x + self.w / 2, self.y + self.h / 2)
    }

    pub fn midbottom(&self) -> IVec2 {
        IVec2::new(self.x + self.w / 2, self.bottom())
    }

    pub fn set_right(&mut self, right: i32) {
        self.x = right - self.w;
    }

    /// Move in place by `delta`
    pub fn move_by(&mut self, delta: IVec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// Copy of this rect moved by `delta`
    pub fn moved(&self, delta: IVec2) -> Self {
        let mut r = *self;
        r.move_by(delta);
        r
    }

    /// True if `other` lies entirely inside this rect
    pub fn contains(&self, other: &Rect) -> bool {
        other.left() >= self.left()
            && other.top() >= self.top()
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Move `self` the minimum distance needed to fit inside `area`.
    ///
    /// A rect larger than `area` on an axis is centred on that axis.
    pub fn clamp_to(&self, area: &Rect) -> Self {
        let x = if self.w >= area.w {
            area.x + area.w / 2 - self.w / 2
        } else {
            self.x.clamp(area.left(), area.right() - self.w)
        };
        let y = if self.h >= area.h {
            area.y + area.h / 2 - self.h / 2
        } else {
            self.y.clamp(area.top(), area.bottom() - self.h)
        };
        Self::new(x, y, self.w, self.h)
    }

    /// Inclusive overlap test: rects that share an edge count as overlapping.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() <= other.right()
            && other.left() <= self.right()
            && self.top() <= other.bottom()
            && other.top() <= self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchors() {
        let r = Rect::from_midbottom(IVec2::new(100, 200), 20, 10);
        assert_eq!(r, Rect::new(90, 190, 20, 10));
        assert_eq!(r.midbottom(), IVec2::new(100, 200));

        let c = Rect::from_center(IVec2::new(50, 50), 400, 400);
        assert_eq!(c.center(), IVec2::new(50, 50));
        assert_eq!(c.left(), -150);
    }

    #[test]
    fn test_clamp_pulls_back_inside() {
        let field = Rect::new(0, 0, 640, 480);
        let r = Rect::new(630, -5, 20, 20).clamp_to(&field);
        assert_eq!(r, Rect::new(620, 0, 20, 20));
        assert!(field.contains(&r));
    }

    #[test]
    fn test_clamp_oversized_centres() {
        let field = Rect::new(0, 0, 100, 100);
        let r = Rect::new(-300, 10, 400, 20).clamp_to(&field);
        assert_eq!(r.center().x, 50);
        assert_eq!(r.y, 10);
    }

    #[test]
    fn test_overlap_is_inclusive() {
        let a = Rect::new(0, 0, 10, 10);
        let touching = Rect::new(10, 0, 10, 10);
        let apart = Rect::new(11, 0, 10, 10);
        assert!(a.overlaps(&touching));
        assert!(touching.overlaps(&a));
        assert!(!a.overlaps(&apart));
    }

    #[test]
    fn test_contains() {
        let field = Rect::new(0, 0, 100, 100);
        assert!(field.contains(&Rect::new(0, 0, 100, 100)));
        assert!(!field.contains(&Rect::new(91, 0, 10, 10).moved(IVec2::new(1, 0))));
    }
}
