//! Simulation-time view of an area: a rectangle floating on real-valued
//! coordinates.
//!
//! A [`FloatingArea`] is created per simulation from an [`Area`] and keeps a
//! commit-target index back into the caller's area slice instead of a
//! reference (writes flow one way, simulation → area; see
//! [`MapAreasSystem`](crate::system::MapAreasSystem) for the commit side).
//! Synthetic rectangles with no owning area, such as the environment
//! boundary itself, are created with [`FloatingArea::unlinked`].
//!
//! The size never changes after construction; only the position moves.

use std::fmt;

use warren_core::{Area, Vector, VectorD, EPSILON};

/// A rectangle with a real-valued position under active adjustment.
#[derive(Clone, Debug)]
pub struct FloatingArea {
    link: Option<usize>,
    position: VectorD,
    size: VectorD,
    fixed: bool,
    nickname: String,
}

impl FloatingArea {
    /// Creates a floating view of `area`, remembering `index` as the commit
    /// target.
    ///
    /// Areas without a position start centered in the environment; fixed or
    /// seeded positions are taken as-is.
    pub fn from_area(index: usize, area: &Area, env_size: Vector) -> FloatingArea {
        let size = VectorD::from(area.size());
        let position = if area.has_position() {
            VectorD::from(area.position())
        } else {
            (VectorD::from(env_size) - size) * 0.5
        };
        FloatingArea {
            link: Some(index),
            position,
            size,
            fixed: area.is_position_fixed(),
            nickname: String::new(),
        }
    }

    /// Creates a synthetic rectangle with no owning area.
    pub fn unlinked(position: VectorD, size: VectorD) -> FloatingArea {
        FloatingArea {
            link: None,
            position,
            size,
            fixed: false,
            nickname: String::new(),
        }
    }

    /// The commit-target index into the owning area slice, if any.
    pub fn link(&self) -> Option<usize> {
        self.link
    }

    /// The current real-valued position.
    pub fn position(&self) -> VectorD {
        self.position
    }

    /// The rectangle size; never changes after construction.
    pub fn size(&self) -> VectorD {
        self.size
    }

    /// Whether the engine must not move this rectangle.
    pub fn is_position_fixed(&self) -> bool {
        self.fixed
    }

    /// The diagnostic nickname assigned by the owning system.
    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    pub(crate) fn set_nickname(&mut self, nickname: String) {
        self.nickname = nickname;
    }

    /// The center of the rectangle.
    pub fn center(&self) -> VectorD {
        self.position + self.size * 0.5
    }

    /// The low X edge.
    pub fn low_x(&self) -> f64 {
        self.position.x
    }

    /// The high X edge.
    pub fn high_x(&self) -> f64 {
        self.position.x + self.size.x
    }

    /// The low Y edge.
    pub fn low_y(&self) -> f64 {
        self.position.y
    }

    /// The high Y edge.
    pub fn high_y(&self) -> f64 {
        self.position.y + self.size.y
    }

    /// Applies an incremental move.
    pub fn adjust_by(&mut self, delta: VectorD) {
        self.position += delta;
    }

    /// Forces the floating position onto the integer grid and returns the
    /// snapped position.
    ///
    /// Called once per epoch boundary to keep real-valued drift from
    /// accumulating across epochs.
    pub fn snap_to_grid(&mut self) -> Vector {
        let rounded = self.position.round();
        self.position = VectorD::from(rounded);
        rounded
    }

    /// Whether this rectangle and `other` share any interior.
    ///
    /// # Panics
    ///
    /// Panics when `other` is the same object as `self`.
    pub fn overlaps(&self, other: &FloatingArea) -> bool {
        self.overlap(other).magnitude_sq() > EPSILON
    }

    /// The size of the rectangle shared with `other`, or zero when the
    /// rectangles are separated or merely touching.
    ///
    /// # Panics
    ///
    /// Panics when `other` is the same object as `self`.
    pub fn overlap(&self, other: &FloatingArea) -> VectorD {
        assert!(
            !std::ptr::eq(self, other),
            "cannot compare an area with itself"
        );
        let low_x = self.low_x().max(other.low_x());
        let high_x = self.high_x().min(other.high_x());
        let low_y = self.low_y().max(other.low_y());
        let high_y = self.high_y().min(other.high_y());
        if low_x >= high_x || low_y >= high_y {
            VectorD::ZERO
        } else {
            VectorD::new(high_x - low_x, high_y - low_y)
        }
    }

    /// The intersection rectangle with `other` as an unlinked floating
    /// area; a zero-sized rectangle when there is no intersection.
    ///
    /// # Panics
    ///
    /// Panics when `other` is the same object as `self`.
    pub fn intersection(&self, other: &FloatingArea) -> FloatingArea {
        assert!(
            !std::ptr::eq(self, other),
            "cannot intersect an area with itself"
        );
        let low_x = self.low_x().max(other.low_x());
        let high_x = self.high_x().min(other.high_x());
        let low_y = self.low_y().max(other.low_y());
        let high_y = self.high_y().min(other.high_y());
        if low_x >= high_x || low_y >= high_y {
            FloatingArea::unlinked(VectorD::ZERO, VectorD::ZERO)
        } else {
            FloatingArea::unlinked(
                VectorD::new(low_x, low_y),
                VectorD::new(high_x - low_x, high_y - low_y),
            )
        }
    }

    /// Whether this rectangle lies fully inside `other`.
    pub fn fits_into(&self, other: &FloatingArea) -> bool {
        self.low_x() >= other.low_x()
            && self.high_x() <= other.high_x()
            && self.low_y() >= other.low_y()
            && self.high_y() <= other.high_y()
    }

    /// Whether this rectangle contains or touches the given point.
    pub fn contains(&self, point: VectorD) -> bool {
        point.x >= self.low_x()
            && point.x <= self.high_x()
            && point.y >= self.low_y()
            && point.y <= self.high_y()
    }

    /// The minimum-translation distance to `other` and whether the
    /// rectangles overlap.
    ///
    /// Each component is the signed distance between the closest pair of
    /// edges on that axis; the rectangles overlap only when both axes
    /// overlap.
    pub fn distance_to(&self, other: &FloatingArea) -> (VectorD, bool) {
        let (overlap_x, dx) = distance_1d(self.low_x(), self.high_x(), other.low_x(), other.high_x());
        let (overlap_y, dy) = distance_1d(self.low_y(), self.high_y(), other.low_y(), other.high_y());
        (VectorD::new(dx, dy), overlap_x && overlap_y)
    }
}

/// Signed edge-to-edge distance between two segments on one axis, plus an
/// overlap flag.
fn distance_1d(a_low: f64, a_high: f64, b_low: f64, b_high: f64) -> (bool, f64) {
    let m1 = (a_low - b_high).max(a_high - b_low);
    let m2 = (a_low - b_high).min(a_high - b_low);
    let overlap = m1 > 0.0 && m2 < 0.0;
    let d = if m1.abs() < m2.abs() {
        m1
    } else if m1 + m2 == 0.0 {
        0.0
    } else {
        m2
    };
    (overlap, d)
}

impl fmt::Display for FloatingArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{};S{}", self.position, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use warren_core::AreaType;

    fn floating(x: f64, y: f64, w: f64, h: f64) -> FloatingArea {
        FloatingArea::unlinked(VectorD::new(x, y), VectorD::new(w, h))
    }

    #[test]
    fn unpositioned_area_starts_centered() {
        let area = Area::unpositioned(Vector::new(4, 4), AreaType::Hall);
        let fa = FloatingArea::from_area(0, &area, Vector::new(10, 10));
        assert_eq!(fa.position(), VectorD::new(3.0, 3.0));
        assert_eq!(fa.link(), Some(0));
    }

    #[test]
    fn seeded_area_keeps_its_position() {
        let area = Area::movable(Vector::new(1, 2), Vector::new(4, 4), AreaType::Hall);
        let fa = FloatingArea::from_area(3, &area, Vector::new(10, 10));
        assert_eq!(fa.position(), VectorD::new(1.0, 2.0));
        assert!(!fa.is_position_fixed());
    }

    #[test]
    fn adjust_moves_but_size_is_constant() {
        let mut fa = floating(1.0, 1.0, 2.0, 3.0);
        fa.adjust_by(VectorD::new(0.5, -0.25));
        assert_eq!(fa.position(), VectorD::new(1.5, 0.75));
        assert_eq!(fa.size(), VectorD::new(2.0, 3.0));
    }

    #[test]
    fn snap_to_grid_rounds_the_position() {
        let mut fa = floating(1.6, -0.4, 2.0, 2.0);
        assert_eq!(fa.snap_to_grid(), Vector::new(2, 0));
        assert_eq!(fa.position(), VectorD::new(2.0, 0.0));
    }

    #[test]
    #[should_panic(expected = "itself")]
    fn overlap_with_self_panics() {
        let fa = floating(0.0, 0.0, 2.0, 2.0);
        // Two raw pointers to the same object.
        let alias: &FloatingArea = &fa;
        let _ = fa.overlaps(alias);
    }

    #[test]
    fn overlap_is_symmetric() {
        let a = floating(0.0, 0.0, 4.0, 4.0);
        let b = floating(2.0, 2.0, 4.0, 4.0);
        assert_eq!(a.overlap(&b), b.overlap(&a));
        assert!(a.overlaps(&b));
    }

    #[test]
    fn touching_rectangles_do_not_overlap() {
        let a = floating(0.0, 0.0, 2.0, 2.0);
        let b = floating(2.0, 0.0, 2.0, 2.0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn intersection_of_disjoint_rectangles_is_empty() {
        let a = floating(0.0, 0.0, 2.0, 2.0);
        let b = floating(5.0, 5.0, 2.0, 2.0);
        assert!(a.intersection(&b).size().is_zero());
    }

    #[test]
    fn intersection_reports_the_shared_rectangle() {
        let a = floating(0.0, 0.0, 4.0, 4.0);
        let b = floating(3.0, 1.0, 4.0, 4.0);
        let shared = a.intersection(&b);
        assert_eq!(shared.position(), VectorD::new(3.0, 1.0));
        assert_eq!(shared.size(), VectorD::new(1.0, 3.0));
    }

    #[test]
    fn distance_to_separated_rectangles() {
        let a = floating(0.0, 0.0, 1.0, 1.0);
        let b = floating(3.0, 0.0, 1.0, 1.0);
        let (d, overlap) = a.distance_to(&b);
        assert!(!overlap);
        assert_eq!(d.x, -2.0);
        assert_eq!(d.y, 0.0);
    }

    #[test]
    fn distance_to_overlapping_rectangles() {
        let a = floating(0.0, 0.0, 4.0, 4.0);
        let b = floating(2.0, 2.0, 4.0, 4.0);
        let (d, overlap) = a.distance_to(&b);
        assert!(overlap);
        assert_eq!(d.x, 2.0);
        assert_eq!(d.y, 2.0);
    }

    #[test]
    fn distance_to_coincident_rectangles_is_zero() {
        let a = floating(3.0, 3.0, 4.0, 4.0);
        let b = floating(3.0, 3.0, 4.0, 4.0);
        let (d, overlap) = a.distance_to(&b);
        assert!(overlap);
        assert!(d.is_zero());
    }

    #[test]
    fn fits_into_environment_boundary() {
        let env = floating(0.0, 0.0, 10.0, 10.0);
        assert!(floating(0.0, 0.0, 10.0, 10.0).fits_into(&env));
        assert!(floating(1.0, 1.0, 3.0, 3.0).fits_into(&env));
        assert!(!floating(-0.5, 1.0, 3.0, 3.0).fits_into(&env));
        assert!(!floating(8.0, 8.0, 3.0, 3.0).fits_into(&env));
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric_for_any_pair(
            ax in -20.0..20.0f64, ay in -20.0..20.0f64,
            bx in -20.0..20.0f64, by in -20.0..20.0f64,
            aw in 0.5..8.0f64, ah in 0.5..8.0f64,
            bw in 0.5..8.0f64, bh in 0.5..8.0f64,
        ) {
            let a = floating(ax, ay, aw, ah);
            let b = floating(bx, by, bw, bh);
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
            prop_assert_eq!(a.overlap(&b), b.overlap(&a));
        }

        #[test]
        fn distance_to_is_antisymmetric(
            ax in -20.0..20.0f64, ay in -20.0..20.0f64,
            bx in -20.0..20.0f64, by in -20.0..20.0f64,
            aw in 0.5..8.0f64, ah in 0.5..8.0f64,
            bw in 0.5..8.0f64, bh in 0.5..8.0f64,
        ) {
            let a = floating(ax, ay, aw, ah);
            let b = floating(bx, by, bw, bh);
            let (d_ab, o_ab) = a.distance_to(&b);
            let (d_ba, o_ba) = b.distance_to(&a);
            prop_assert_eq!(o_ab, o_ba);
            prop_assert!((d_ab.x + d_ba.x).abs() < 1e-9);
            prop_assert!((d_ab.y + d_ba.y).abs() < 1e-9);
        }
    }
}
