//! Force-directed placement of rectangular areas inside a bounded
//! environment.
//!
//! The engine treats each area as a rectangle floating on real-valued
//! coordinates. Overlapping rectangles repel, nearby rectangles interact
//! across the gap, and the environment boundary pushes protruding
//! rectangles back inside. Forces are applied in small fragments over
//! generations, generations are grouped into epochs, and the run stops when
//! the per-epoch movement statistics say the layout has settled.
//!
//! [`AreaDistributor`] is the entry point for placing a prepared set of
//! areas; [`RandomAreaGenerator`] generates such sets from weighted
//! distributions. The lower layers ([`MapAreasSystem`], [`FloatingArea`],
//! the force producers) are public for callers that need to watch or drive
//! the simulation themselves.
//!
//! Placement is best-effort: an overcrowded environment converges to the
//! least-bad layout and reports it as invalid rather than failing.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod distributor;
pub mod error;
pub mod floating;
pub mod formula;
pub mod generator;
pub mod producer;
pub mod simulator;
pub mod system;

pub use distributor::{AreaDistributor, AreaDistributorBuilder, PlacementReport};
pub use error::{GeneratorError, LayoutConfigError};
pub use floating::FloatingArea;
pub use generator::{RandomAreaGenerator, RandomAreaGeneratorSettings};
pub use producer::ForceStrategy;
pub use simulator::{EpochStatus, EvolvingSimulator, SimulatedSystem};
pub use system::{EpochResult, GenerationImpact, MapAreasSystem};
