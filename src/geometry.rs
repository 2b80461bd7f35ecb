/// Axis-aligned bounding box in canvas units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Bounding square of a circle centred at (cx, cy)
    pub fn around_circle(cx: f32, cy: f32, radius: f32) -> Self {
        Self::new(cx - radius, cy - radius, radius * 2.0, radius * 2.0)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Strict overlap test: boxes that only share an edge do not collide.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlapping_boxes_collide() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.overlaps(&b));
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let right = Aabb::new(10.0, 0.0, 10.0, 10.0);
        let below = Aabb::new(0.0, 10.0, 10.0, 10.0);
        let corner = Aabb::new(10.0, 10.0, 10.0, 10.0);
        assert!(!a.overlaps(&right));
        assert!(!a.overlaps(&below));
        assert!(!a.overlaps(&corner));
    }

    #[test]
    fn test_contained_box_collides() {
        let outer = Aabb::new(0.0, 0.0, 40.0, 40.0);
        let inner = Aabb::new(10.0, 10.0, 2.0, 2.0);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_around_circle() {
        let b = Aabb::around_circle(10.0, 20.0, 4.0);
        assert_eq!(b, Aabb::new(6.0, 16.0, 8.0, 8.0));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn any_box() -> impl Strategy<Value = Aabb> {
            (-500.0f32..500.0, -500.0f32..500.0, 0.5f32..100.0, 0.5f32..100.0)
                .prop_map(|(x, y, w, h)| Aabb::new(x, y, w, h))
        }

        proptest! {
            #[test]
            fn test_overlap_is_symmetric(a in any_box(), b in any_box()) {
                prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
            }

            #[test]
            fn test_adjacent_boxes_never_collide(a in any_box(), h in 0.5f32..100.0) {
                let neighbour = Aabb::new(a.right(), a.y, 10.0, h);
                prop_assert!(!a.overlaps(&neighbour));
            }
        }
    }
}
