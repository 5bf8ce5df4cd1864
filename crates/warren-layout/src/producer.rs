//! Force producers: geometry plus the force formula, yielding 2D force
//! vectors between two areas or between an area and the environment
//! boundary.
//!
//! Two strategies implement the same contract and are selected at system
//! construction through [`ForceStrategy`]:
//!
//! - [`DirectedDistanceProducer`] (canonical): forces act along the
//!   center-to-center direction with the minimum-translation distance as
//!   magnitude, and coincident centers are resolved with a random opposing
//!   pair of forces.
//! - [`SideToSideProducer`] (legacy alternative): forces are decomposed per
//!   axis from edge-to-edge distances, with scalar opposing-force
//!   accounting. Not numerically equivalent to the canonical strategy.
//!
//! A producer lives for exactly one generation: the opposing-force cache it
//! carries is written when the first area of a coincident pair is evaluated
//! and consumed when the second one is, and must not survive the
//! generation.

use std::collections::HashMap;

use warren_core::{RandomSource, Vector, VectorD, EPSILON};

use crate::floating::FloatingArea;
use crate::formula::{collide_force, normal_force, overlap_force, sign};

/// Selects the pairwise/environment force computation strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ForceStrategy {
    /// Center-to-center direction with minimum-translation distance.
    #[default]
    DirectedDistance,
    /// Legacy per-axis decomposition of edge-to-edge distances.
    SideToSide,
}

impl ForceStrategy {
    /// Creates a fresh producer (with an empty opposing-force cache) for
    /// one generation.
    pub(crate) fn producer(&self, fragment: f64) -> ForceProducer {
        match self {
            ForceStrategy::DirectedDistance => {
                ForceProducer::Directed(DirectedDistanceProducer::new())
            }
            ForceStrategy::SideToSide => {
                ForceProducer::SideToSide(SideToSideProducer::new(fragment))
            }
        }
    }
}

/// A per-generation producer instance; dispatches to the selected strategy.
#[derive(Debug)]
pub(crate) enum ForceProducer {
    Directed(DirectedDistanceProducer),
    SideToSide(SideToSideProducer),
}

impl ForceProducer {
    /// The force `areas[i]` receives from `areas[j]`.
    pub(crate) fn area_force(
        &mut self,
        areas: &[FloatingArea],
        i: usize,
        j: usize,
        random: &mut RandomSource,
    ) -> VectorD {
        match self {
            ForceProducer::Directed(p) => p.area_force(areas, i, j, random),
            ForceProducer::SideToSide(p) => p.area_force(areas, i, j),
        }
    }

    /// The boundary force `area` receives from the environment.
    pub(crate) fn environment_force(&self, area: &FloatingArea, env_size: Vector) -> VectorD {
        match self {
            ForceProducer::Directed(p) => p.environment_force(area, env_size),
            ForceProducer::SideToSide(p) => p.environment_force(area, env_size),
        }
    }
}

// ── Directed distance (canonical) ────────────────────────────────

/// The canonical force producer.
///
/// A center-to-center vector alone misreads the distance between
/// rectangles (a small box next to the middle of a long box is close even
/// though the centers are far apart), so the force magnitude comes from the
/// minimum-translation distance while only the direction comes from the
/// centers. When the centers exactly coincide no direction exists; the
/// first evaluation of such a pair draws a random unit direction and caches
/// the exact opposite force for the partner, guaranteeing the pair
/// separates coherently within the same generation.
#[derive(Debug, Default)]
pub struct DirectedDistanceProducer {
    opposing: HashMap<(usize, usize), VectorD>,
}

impl DirectedDistanceProducer {
    /// Creates a producer with an empty opposing-force cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The force `areas[i]` receives from `areas[j]`.
    pub fn area_force(
        &mut self,
        areas: &[FloatingArea],
        i: usize,
        j: usize,
        random: &mut RandomSource,
    ) -> VectorD {
        let area = &areas[i];
        let other = &areas[j];
        let direction = area.center() - other.center();
        let (distance, overlap) = area.distance_to(other);
        let force = if overlap {
            if distance.magnitude_sq() < EPSILON {
                // Centers coincide: either consume the partner's cached
                // opposite force or draw a fresh random direction.
                if let Some(opposite) = self.opposing.remove(&(i, j)) {
                    opposite
                } else {
                    let depth = area.intersection(other).size();
                    let direction = VectorD::random_unit(random);
                    let force = direction * overlap_force(depth.magnitude());
                    self.opposing.insert((j, i), force.reverse());
                    force
                }
            } else {
                direction.with_magnitude(overlap_force(distance.magnitude()))
            }
        } else {
            direction.with_magnitude(normal_force(distance.magnitude()))
        };
        log::trace!(
            "area_force({} {}) ({} {}): direction={direction}, distance={distance}, \
             overlap={overlap}, force={force}",
            area.nickname(),
            area,
            other.nickname(),
            other,
        );
        force
    }

    /// The boundary force `area` receives from the environment.
    ///
    /// Per axis and per edge: when the area protrudes past a boundary in
    /// the direction of that boundary's outward sign, an overlap force
    /// pushes it back inward; otherwise a normal force applies a mild pull
    /// that tapers off within 3 units of the edge. The four per-edge
    /// scalars compose into one force vector, which keeps unconstrained
    /// areas inside the environment without a separate containment check.
    pub fn environment_force(&self, area: &FloatingArea, env_size: Vector) -> VectorD {
        fn edge_force(distance: f64, outward_sign: f64) -> f64 {
            if sign(distance) == outward_sign {
                overlap_force(-distance)
            } else {
                normal_force(distance)
            }
        }

        let x_high = edge_force(area.high_x() - f64::from(env_size.x), 1.0);
        let x_low = edge_force(area.low_x(), -1.0);
        let y_high = edge_force(area.high_y() - f64::from(env_size.y), 1.0);
        let y_low = edge_force(area.low_y(), -1.0);
        let force = VectorD::new(x_high + x_low, y_high + y_low);
        log::trace!(
            "environment_force({} {}, {env_size}): x_high={x_high}, x_low={x_low}, \
             y_high={y_high}, y_low={y_low}, force={force}",
            area.nickname(),
            area,
        );
        force
    }
}

// ── Side to side (legacy) ────────────────────────────────────────

/// Per-axis edge-to-edge distance, the sign that increases it, and whether
/// the segments overlap on that axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisDistance {
    /// Absolute distance between the closest edges.
    pub distance: f64,
    /// Sign to apply to a force that moves the segments apart.
    pub sign: f64,
    /// Whether the segments overlap on this axis.
    pub overlap: bool,
}

/// The legacy axis-decomposed force producer.
///
/// Distances are measured side-to-side per axis, and each axis receives its
/// own force regime (overlap, collide, or normal). Coincident centers on an
/// axis are resolved through scalar opposing forces cached for the partner
/// area. Kept as a selectable alternative; it does not produce the same
/// trajectories as [`DirectedDistanceProducer`].
#[derive(Debug)]
pub struct SideToSideProducer {
    overlap_factor: f64,
    opposing: HashMap<(usize, usize), VectorD>,
}

impl SideToSideProducer {
    /// Creates a producer with an empty opposing-force cache.
    ///
    /// `overlap_factor` scales the collide force applied when rectangle
    /// centers coincide on an axis.
    pub fn new(overlap_factor: f64) -> Self {
        Self {
            overlap_factor,
            opposing: HashMap::new(),
        }
    }

    /// The force `areas[i]` receives from `areas[j]`.
    pub fn area_force(&mut self, areas: &[FloatingArea], i: usize, j: usize) -> VectorD {
        let area = &areas[i];
        let other = &areas[j];
        let dx = Self::axis_distance(
            area.position().x,
            area.size().x,
            other.position().x,
            other.size().x,
        );
        let dy = Self::axis_distance(
            area.position().y,
            area.size().y,
            other.position().y,
            other.size().y,
        );
        let mut fx = self.axis_force(dx, dy);
        let mut fy = self.axis_force(dy, dx);

        // Diagonal neighbours overlap on neither axis, so both per-axis
        // forces are zero; fall back to the plain distance regimes.
        if !dx.overlap && !dy.overlap {
            let distance = VectorD::new(dx.distance * dx.sign, dy.distance * dy.sign);
            if distance.magnitude_sq() < EPSILON {
                fx = collide_force(dx.sign, self.overlap_factor);
                fy = collide_force(dy.sign, self.overlap_factor);
            } else {
                fx = normal_force(dx.distance * dx.sign);
                fy = normal_force(dy.distance * dy.sign);
            }
        }

        let opposing = self.opposing.remove(&(i, j)).unwrap_or(VectorD::ZERO);
        let (fx, opposing_x) = Self::opposing_force(
            area.position().x,
            area.size().x,
            opposing.x,
            other.position().x,
            other.size().x,
            fx,
        );
        let (fy, opposing_y) = Self::opposing_force(
            area.position().y,
            area.size().y,
            opposing.y,
            other.position().y,
            other.size().y,
            fy,
        );
        let partner = VectorD::new(
            if opposing_x.abs() > EPSILON {
                opposing_x
            } else {
                0.0
            },
            if opposing_y.abs() > EPSILON {
                opposing_y
            } else {
                0.0
            },
        );
        if !partner.is_zero() {
            self.opposing.insert((j, i), partner);
        }
        VectorD::new(fx, fy)
    }

    /// The boundary force `area` receives from the environment.
    pub fn environment_force(&self, area: &FloatingArea, env_size: Vector) -> VectorD {
        let force_x = self.env_axis_force(area.high_x() - f64::from(env_size.x), area.low_x());
        let force_y = self.env_axis_force(area.high_y() - f64::from(env_size.y), area.low_y());
        VectorD::new(force_x, force_y)
    }

    /// Finds the shortest distance between two segment sides on one axis.
    ///
    /// Returns the absolute distance, the sign to apply to a force that
    /// increases it, and whether the segments overlap. When the centers
    /// match the sign is `1`; the opposing-force accounting up the stack
    /// makes the partner move the other way.
    pub fn axis_distance(
        one_position: f64,
        one_size: f64,
        other_position: f64,
        other_size: f64,
    ) -> AxisDistance {
        let mut overlap = false;
        let mut distance =
            (one_position - (other_position + other_size)).max(other_position - (one_position + one_size));
        if distance < 0.0 {
            overlap = true;
            distance = -distance;
        }
        let sign = if one_position + one_size / 2.0 < other_position + other_size / 2.0 {
            -1.0
        } else {
            1.0
        };
        AxisDistance {
            distance,
            sign,
            overlap,
        }
    }

    /// Chooses the force regime for one axis given both axes' distances.
    fn axis_force(&self, this: AxisDistance, other_axis: AxisDistance) -> f64 {
        if !other_axis.overlap {
            return 0.0;
        }
        if this.overlap && this.distance <= other_axis.distance {
            overlap_force(this.distance * this.sign)
        } else if this.distance < EPSILON {
            collide_force(this.sign, self.overlap_factor)
        } else {
            normal_force(this.distance * this.sign)
        }
    }

    /// Resolves the scalar force for one axis of one area of a pair whose
    /// centers match on that axis.
    ///
    /// When the centers match no direction exists, and independent random
    /// choices could move both areas the same way; the first area keeps its
    /// computed force and hands the same value to the partner, which
    /// negates it. Returns `(this_force, partner_opposing_force)`; the
    /// partner value is zero when the centers differ.
    pub fn opposing_force(
        this_position: f64,
        this_size: f64,
        this_opposing: f64,
        other_position: f64,
        other_size: f64,
        new_force: f64,
    ) -> (f64, f64) {
        let center_delta =
            this_position + this_size / 2.0 - other_position - other_size / 2.0;
        if center_delta.abs() < EPSILON {
            if this_opposing.abs() > EPSILON {
                (-this_opposing, -this_opposing)
            } else {
                (new_force, new_force)
            }
        } else {
            (new_force, 0.0)
        }
    }

    /// Boundary force for one axis from the signed distances between the
    /// area's edges and the environment's edges.
    fn env_axis_force(&self, distance_high: f64, distance_low: f64) -> f64 {
        let distance = if distance_high.abs() < distance_low.abs() {
            distance_high
        } else {
            distance_low
        };
        if (distance_low + distance_high).abs() < 0.1 {
            // Centered on this axis.
            return 0.0;
        }
        if distance_high >= -EPSILON && distance_low <= EPSILON {
            // The area is larger than the environment; nothing to do.
            0.0
        } else if distance_high >= EPSILON || distance_low <= -EPSILON {
            // Crossing an edge; push back inside.
            overlap_force(-distance)
        } else if distance.abs() <= EPSILON {
            // Touching an edge from the inside.
            if distance_high.abs() < distance_low.abs() {
                collide_force(-1.0, self.overlap_factor)
            } else {
                collide_force(1.0, self.overlap_factor)
            }
        } else {
            normal_force(distance)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floating(x: f64, y: f64, w: f64, h: f64) -> FloatingArea {
        FloatingArea::unlinked(VectorD::new(x, y), VectorD::new(w, h))
    }

    mod directed {
        use super::*;
        use proptest::prelude::*;

        #[test]
        fn coincident_centers_produce_exactly_opposite_forces() {
            let areas = vec![floating(3.0, 3.0, 4.0, 4.0), floating(3.0, 3.0, 4.0, 4.0)];
            let mut random = RandomSource::new(11);
            let mut producer = DirectedDistanceProducer::new();
            let f0 = producer.area_force(&areas, 0, 1, &mut random);
            let f1 = producer.area_force(&areas, 1, 0, &mut random);
            assert!((f0.x + f1.x).abs() < 1e-9);
            assert!((f0.y + f1.y).abs() < 1e-9);
            assert!(!f0.is_zero(), "coincident areas must be pushed apart");
            assert!(
                producer.opposing.is_empty(),
                "the cached opposing force must be consumed"
            );
        }

        #[test]
        fn overlapping_areas_are_pushed_apart() {
            let areas = vec![floating(0.0, 0.0, 4.0, 4.0), floating(2.0, 0.0, 4.0, 4.0)];
            let mut random = RandomSource::new(0);
            let mut producer = DirectedDistanceProducer::new();
            let force = producer.area_force(&areas, 0, 1, &mut random);
            // The left area must be pushed further left.
            assert!(force.x < 0.0);
            assert!(force.y.abs() < 1e-9);
        }

        #[test]
        fn distant_areas_feel_no_force() {
            let areas = vec![floating(0.0, 0.0, 2.0, 2.0), floating(10.0, 0.0, 2.0, 2.0)];
            let mut random = RandomSource::new(0);
            let mut producer = DirectedDistanceProducer::new();
            let force = producer.area_force(&areas, 0, 1, &mut random);
            assert!(force.is_zero());
        }

        #[test]
        fn nearby_areas_spread_until_the_gap_reaches_three() {
            let areas = vec![floating(0.0, 0.0, 2.0, 2.0), floating(3.0, 0.0, 2.0, 2.0)];
            let mut random = RandomSource::new(0);
            let mut producer = DirectedDistanceProducer::new();
            let force = producer.area_force(&areas, 0, 1, &mut random);
            // Gap of 1 is inside the normal-force range, so the left area
            // keeps drifting left until the gap reaches 3.
            assert!(force.x < 0.0);
            assert!(force.y.abs() < 1e-9);
        }

        #[test]
        fn area_protruding_high_is_pushed_back() {
            // Area [8, 12) in a 10-wide environment: protrudes by 2.
            let area = floating(8.0, 3.0, 4.0, 4.0);
            let producer = DirectedDistanceProducer::new();
            let force = producer.environment_force(&area, Vector::new(10, 10));
            assert!(force.x < 0.0, "must push back inside, got {force}");
        }

        #[test]
        fn area_protruding_low_is_pushed_back() {
            let area = floating(-2.0, 3.0, 4.0, 4.0);
            let producer = DirectedDistanceProducer::new();
            let force = producer.environment_force(&area, Vector::new(10, 10));
            assert!(force.x > 0.0, "must push back inside, got {force}");
        }

        #[test]
        fn centered_area_feels_no_environment_force() {
            let area = floating(3.0, 3.0, 4.0, 4.0);
            let producer = DirectedDistanceProducer::new();
            let force = producer.environment_force(&area, Vector::new(10, 10));
            assert!(force.is_zero(), "got {force}");
        }

        proptest! {
            #[test]
            fn opposing_cache_negates_exactly_for_any_seed(seed in 0u64..1000) {
                let areas =
                    vec![floating(3.0, 3.0, 4.0, 4.0), floating(3.0, 3.0, 4.0, 4.0)];
                let mut random = RandomSource::new(seed);
                let mut producer = DirectedDistanceProducer::new();
                let f0 = producer.area_force(&areas, 0, 1, &mut random);
                let f1 = producer.area_force(&areas, 1, 0, &mut random);
                prop_assert!((f0.x + f1.x).abs() < 1e-12);
                prop_assert!((f0.y + f1.y).abs() < 1e-12);
                prop_assert!(!f0.is_zero());
            }
        }
    }

    mod side_to_side {
        use super::*;

        #[test]
        fn axis_distance_separated() {
            let d = SideToSideProducer::axis_distance(0.0, 1.0, 2.0, 3.0);
            assert!(!d.overlap);
            assert_eq!(d.distance, 1.0);
            assert_eq!(d.sign, -1.0);
        }

        #[test]
        fn axis_distance_overlapping() {
            let d = SideToSideProducer::axis_distance(0.0, 2.0, 1.0, 3.0);
            assert!(d.overlap);
            assert_eq!(d.distance, 1.0);
            assert_eq!(d.sign, -1.0);
        }

        #[test]
        fn axis_distance_touching() {
            let d = SideToSideProducer::axis_distance(0.0, 2.0, 2.0, 4.0);
            assert!(!d.overlap);
            assert_eq!(d.distance, 0.0);
            assert_eq!(d.sign, -1.0);
        }

        #[test]
        fn axis_distance_centers_match() {
            let d = SideToSideProducer::axis_distance(0.0, 2.0, -1.0, 4.0);
            assert!(d.overlap);
            assert_eq!(d.distance, 3.0);
            assert_eq!(d.sign, 1.0);
        }

        #[test]
        fn axis_distance_negative_side() {
            let d = SideToSideProducer::axis_distance(0.0, 1.0, -3.0, 2.0);
            assert!(!d.overlap);
            assert_eq!(d.distance, 1.0);
            assert_eq!(d.sign, 1.0);
        }

        #[test]
        fn opposing_force_centers_match_first_evaluation() {
            let (this, partner) =
                SideToSideProducer::opposing_force(1.0, 1.0, 0.0, 0.0, 3.0, 1.5);
            assert_eq!(this, 1.5);
            assert_eq!(partner, 1.5);
        }

        #[test]
        fn opposing_force_centers_match_second_evaluation() {
            let (this, partner) =
                SideToSideProducer::opposing_force(1.0, 1.0, 2.5, 0.0, 3.0, 1.5);
            assert_eq!(this, -2.5);
            assert_eq!(partner, -2.5);
        }

        #[test]
        fn opposing_force_distinct_centers_pass_through() {
            let (this, partner) =
                SideToSideProducer::opposing_force(5.0, 1.0, 0.0, 0.0, 1.0, 1.5);
            assert_eq!(this, 1.5);
            assert_eq!(partner, 0.0);
        }

        #[test]
        fn oversize_area_gets_no_environment_force() {
            // A 6-wide area in a 5-wide environment protrudes on both
            // sides; the producer must not try to squeeze it in.
            let producer = SideToSideProducer::new(0.1);
            let area = floating(-0.5, -0.5, 6.0, 6.0);
            let force = producer.environment_force(&area, Vector::new(5, 5));
            assert!(force.is_zero(), "got {force}");
        }

        #[test]
        fn coincident_areas_are_pushed_apart() {
            let areas = vec![floating(3.0, 3.0, 4.0, 4.0), floating(3.0, 3.0, 4.0, 4.0)];
            let mut producer = SideToSideProducer::new(0.1);
            let f0 = producer.area_force(&areas, 0, 1);
            let f1 = producer.area_force(&areas, 1, 0);
            assert!((f0.x + f1.x).abs() < 1e-9);
            assert!((f0.y + f1.y).abs() < 1e-9);
            assert!(!f0.is_zero());
        }
    }
}
