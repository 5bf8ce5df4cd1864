//! 2D vector primitives: integer [`Vector`] and real-valued [`VectorD`].
//!
//! Both types are plain component-wise tuples. No normalization or other
//! hidden transformation happens inside operators; callers that need a
//! direction of a given length use [`VectorD::with_magnitude`] explicitly.

use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

use crate::rng::RandomSource;

/// The minimum meaningful floating point magnitude in this library.
///
/// The layout engine never needs very large or very precise values, so any
/// component or magnitude smaller than this is treated as exactly zero.
pub const EPSILON: f64 = 1e-10;

/// A position or size on the integer map grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Vector {
    /// Horizontal component.
    pub x: i32,
    /// Vertical component.
    pub y: i32,
}

impl Vector {
    /// The zero vector.
    pub const ZERO: Vector = Vector { x: 0, y: 0 };

    /// Creates a vector from its components.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The number of cells a rectangle of this size covers.
    pub fn area(&self) -> i64 {
        i64::from(self.x) * i64::from(self.y)
    }

    /// Squared Euclidean magnitude.
    pub fn magnitude_sq(&self) -> i64 {
        i64::from(self.x) * i64::from(self.x) + i64::from(self.y) * i64::from(self.y)
    }

    /// Swaps the components, turning a `W x H` size into `H x W`.
    pub fn transposed(&self) -> Vector {
        Vector::new(self.y, self.x)
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        Vector::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        Vector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Vector::new(-self.x, -self.y)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.x, self.y)
    }
}

/// A real-valued position or size used during simulation.
///
/// Areas float on real-valued coordinates while forces are applied and are
/// snapped back onto the integer grid ([`VectorD::round`]) at epoch
/// boundaries.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VectorD {
    /// Horizontal component.
    pub x: f64,
    /// Vertical component.
    pub y: f64,
}

impl VectorD {
    /// The zero vector.
    pub const ZERO: VectorD = VectorD { x: 0.0, y: 0.0 };

    /// Creates a vector from its components.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean magnitude.
    pub fn magnitude_sq(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Euclidean magnitude.
    pub fn magnitude(&self) -> f64 {
        self.magnitude_sq().sqrt()
    }

    /// Whether both components are within [`EPSILON`] of zero.
    pub fn is_zero(&self) -> bool {
        self.x.abs() <= EPSILON && self.y.abs() <= EPSILON
    }

    /// Rounds the components to the nearest integers.
    pub fn round(&self) -> Vector {
        Vector::new(self.x.round() as i32, self.y.round() as i32)
    }

    /// A vector with the same direction and the given magnitude.
    ///
    /// The zero vector has no direction and stays zero regardless of the
    /// requested magnitude.
    pub fn with_magnitude(&self, magnitude: f64) -> VectorD {
        let current = self.magnitude();
        if current < EPSILON {
            VectorD::ZERO
        } else {
            VectorD::new(self.x * magnitude / current, self.y * magnitude / current)
        }
    }

    /// The exact opposite vector.
    pub fn reverse(&self) -> VectorD {
        -*self
    }

    /// A uniformly random unit-length direction.
    ///
    /// Used to break the tie when two area centers exactly coincide and no
    /// geometric direction exists between them.
    pub fn random_unit(random: &mut RandomSource) -> VectorD {
        let angle = random.angle();
        VectorD::new(angle.cos(), angle.sin())
    }
}

impl From<Vector> for VectorD {
    fn from(v: Vector) -> VectorD {
        VectorD::new(f64::from(v.x), f64::from(v.y))
    }
}

impl Add for VectorD {
    type Output = VectorD;

    fn add(self, rhs: VectorD) -> VectorD {
        VectorD::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for VectorD {
    fn add_assign(&mut self, rhs: VectorD) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for VectorD {
    type Output = VectorD;

    fn sub(self, rhs: VectorD) -> VectorD {
        VectorD::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for VectorD {
    type Output = VectorD;

    fn neg(self) -> VectorD {
        VectorD::new(-self.x, -self.y)
    }
}

impl Mul<f64> for VectorD {
    type Output = VectorD;

    fn mul(self, rhs: f64) -> VectorD {
        VectorD::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for VectorD {
    type Output = VectorD;

    /// # Panics
    ///
    /// Panics when dividing by a value smaller than [`EPSILON`].
    fn div(self, rhs: f64) -> VectorD {
        assert!(rhs.abs() >= EPSILON, "cannot divide a vector by zero");
        VectorD::new(self.x / rhs, self.y / rhs)
    }
}

impl fmt::Display for VectorD {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}x{:.2}", self.x, self.y)
    }
}
