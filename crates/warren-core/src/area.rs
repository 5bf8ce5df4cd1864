//! The [`Area`] data model: a rectangular region of the map.
//!
//! Areas are created by generators before placement, moved by the layout
//! engine (position only), and treated as immutable once the owning layout
//! is finalized. An area is in one of three position states:
//!
//! - **fixed**: created with a position the engine must never change;
//! - **movable**: created with a seed position the engine may move;
//! - **unpositioned**: created without a position; the engine must assign
//!   one before the position is read.

use std::fmt;

use crate::vector::Vector;

/// The role an area plays on the map.
///
/// When areas of different types overlap in a finished layout, the type
/// with the higher priority (declaration order below) wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AreaType {
    /// No specific role; treated like [`AreaType::Maze`].
    None,
    /// The environment the other areas are placed into.
    Environment,
    /// A regular area carved by maze generation; tags may style it but do
    /// not constrain the generation algorithms.
    Maze,
    /// A hall with walls around it and one or two entrances.
    Hall,
    /// Like [`AreaType::Hall`] but without entrance placement rules, so any
    /// number of entrances can appear.
    Cave,
    /// An area the player cannot enter, e.g. a lake or a rock.
    Fill,
}

impl fmt::Display for AreaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AreaType::None => "None",
            AreaType::Environment => "Environment",
            AreaType::Maze => "Maze",
            AreaType::Hall => "Hall",
            AreaType::Cave => "Cave",
            AreaType::Fill => "Fill",
        };
        f.write_str(name)
    }
}

/// A rectangular region of the map with a type, a size, and free-form tags.
#[derive(Clone, Debug)]
pub struct Area {
    area_type: AreaType,
    size: Vector,
    tags: Vec<String>,
    position: Option<Vector>,
    position_fixed: bool,
}

impl Area {
    /// Creates an area pinned at `position`; the layout engine never moves
    /// it.
    pub fn fixed(position: Vector, size: Vector, area_type: AreaType) -> Self {
        Self {
            area_type,
            size,
            tags: Vec::new(),
            position: Some(position),
            position_fixed: true,
        }
    }

    /// Creates an area with a seed position the layout engine may move.
    pub fn movable(position: Vector, size: Vector, area_type: AreaType) -> Self {
        Self {
            area_type,
            size,
            tags: Vec::new(),
            position: Some(position),
            position_fixed: false,
        }
    }

    /// Creates an area without a position; the layout engine assigns one.
    pub fn unpositioned(size: Vector, area_type: AreaType) -> Self {
        Self {
            area_type,
            size,
            tags: Vec::new(),
            position: None,
            position_fixed: false,
        }
    }

    /// Attaches free-form tags, consuming and returning the area.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// The role of this area.
    pub fn area_type(&self) -> AreaType {
        self.area_type
    }

    /// The size of this area.
    pub fn size(&self) -> Vector {
        self.size
    }

    /// The free-form tags attached to this area.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Whether the layout engine is forbidden from moving this area.
    pub fn is_position_fixed(&self) -> bool {
        self.position_fixed
    }

    /// Whether this area has been assigned a position.
    pub fn has_position(&self) -> bool {
        self.position.is_some()
    }

    /// The position of this area.
    ///
    /// There is a clear separation between positioned and unpositioned
    /// areas: reading the position of an unpositioned area is a programming
    /// error, so this panics instead of returning an `Option`.
    ///
    /// # Panics
    ///
    /// Panics if no position has been assigned yet.
    pub fn position(&self) -> Vector {
        self.position
            .expect("the area position has not been initialized")
    }

    /// Assigns or updates the position.
    pub fn set_position(&mut self, position: Vector) {
        self.position = Some(position);
    }

    /// The low X edge (inclusive).
    pub fn low_x(&self) -> i32 {
        self.position().x
    }

    /// The high X edge (exclusive).
    pub fn high_x(&self) -> i32 {
        self.position().x + self.size.x
    }

    /// The low Y edge (inclusive).
    pub fn low_y(&self) -> i32 {
        self.position().y
    }

    /// The high Y edge (exclusive).
    pub fn high_y(&self) -> i32 {
        self.position().y + self.size.y
    }

    /// Whether this area and `other` share any cells.
    ///
    /// # Panics
    ///
    /// Panics when `other` is the same object as `self`; self-overlap is
    /// meaningless and always indicates a caller bug. Also panics if either
    /// area is unpositioned.
    pub fn overlaps(&self, other: &Area) -> bool {
        self.overlap_size(other) != Vector::ZERO
    }

    /// The size of the rectangle shared by this area and `other`, or
    /// [`Vector::ZERO`] when they do not overlap.
    ///
    /// # Panics
    ///
    /// Panics when `other` is the same object as `self`, or if either area
    /// is unpositioned.
    pub fn overlap_size(&self, other: &Area) -> Vector {
        assert!(
            !std::ptr::eq(self, other),
            "cannot compare an area with itself"
        );
        let low_x = self.low_x().max(other.low_x());
        let high_x = self.high_x().min(other.high_x());
        let low_y = self.low_y().max(other.low_y());
        let high_y = self.high_y().min(other.high_y());
        if low_x >= high_x || low_y >= high_y {
            Vector::ZERO
        } else {
            Vector::new(high_x - low_x, high_y - low_y)
        }
    }

    /// Whether this area lies fully inside the rectangle at `position` of
    /// the given `size`.
    ///
    /// # Panics
    ///
    /// Panics if this area is unpositioned.
    pub fn fits_into(&self, position: Vector, size: Vector) -> bool {
        self.low_x() >= position.x
            && self.high_x() <= position.x + size.x
            && self.low_y() >= position.y
            && self.high_y() <= position.y + size.y
    }

    /// Whether this area contains or touches the given point.
    ///
    /// # Panics
    ///
    /// Panics if this area is unpositioned.
    pub fn contains(&self, point: Vector) -> bool {
        self.low_x() <= point.x
            && self.high_x() >= point.x
            && self.low_y() <= point.y
            && self.high_y() >= point.y
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            Some(p) => write!(f, "P{};S{};{}", p, self.size, self.area_type),
            None => write!(f, "P<unset>;S{};{}", self.size, self.area_type),
        }
    }
}
