//! Warren: force-directed placement of rectangular areas for 2D maze and
//! dungeon layouts.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the Warren sub-crates. For most users, adding `warren` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use warren::prelude::*;
//!
//! // Two 4x4 areas dropped on the same spot in a 10x10 environment.
//! let mut areas = vec![
//!     Area::movable(Vector::new(3, 3), Vector::new(4, 4), AreaType::Hall),
//!     Area::movable(Vector::new(3, 3), Vector::new(4, 4), AreaType::Cave),
//! ];
//! let mut distributor = AreaDistributor::builder()
//!     .random(RandomSource::new(7))
//!     .build();
//! let report = distributor
//!     .distribute(Vector::new(10, 10), &mut areas)
//!     .unwrap();
//!
//! // The forces separate the pair and keep both areas inside.
//! assert!(report.layout_valid);
//! assert!(!areas[0].overlaps(&areas[1]));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the
//! prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `warren-core` | Areas, vectors, random source, statistics |
//! | [`layout`] | `warren-layout` | The placement engine and area generators |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core data model (`warren-core`).
///
/// Contains [`types::Area`], the integer and real-valued vectors, the
/// replayable [`types::RandomSource`], and sample statistics.
pub use warren_core as types;

/// The placement engine (`warren-layout`).
///
/// [`layout::AreaDistributor`] places areas; [`layout::RandomAreaGenerator`]
/// generates random sets of them. The lower layers are public for callers
/// that want to observe or drive the simulation directly.
pub use warren_layout as layout;

/// Common imports for typical Warren usage.
///
/// ```rust
/// use warren::prelude::*;
/// ```
pub mod prelude {
    // Data model
    pub use warren_core::{Area, AreaType, RandomSource, SampleStats, Vector, VectorD};

    // Placement
    pub use warren_layout::{
        AreaDistributor, EvolvingSimulator, FloatingArea, ForceStrategy, MapAreasSystem,
        PlacementReport,
    };

    // Generation
    pub use warren_layout::{RandomAreaGenerator, RandomAreaGeneratorSettings};

    // Errors
    pub use warren_layout::{GeneratorError, LayoutConfigError};
}
