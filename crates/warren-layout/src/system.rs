//! The map-areas system: all floating areas of one placement run, evolving
//! under pairwise and boundary forces.

use warren_core::{Area, RandomSource, SampleStats, Vector, VectorD};

use crate::floating::FloatingArea;
use crate::producer::ForceStrategy;
use crate::simulator::{EpochStatus, SimulatedSystem};

/// Diagnostic nicknames assigned to floating areas in order.
const NICKNAMES: [&str; 19] = [
    "BEAR", "LION", "WOLF", "FOXY", "DEER", "MOOS", "ELKK", "HARE", "RABB", "OTTR", "PUMA",
    "HYNA", "PNDA", "CHTA", "RINO", "BSON", "ZEBR", "ORCA", "PENG",
];

/// The nickname for the `index`-th area; cycles with a numeric suffix when
/// the table runs out.
pub(crate) fn nickname(index: usize) -> String {
    if index < NICKNAMES.len() {
        NICKNAMES[index].to_string()
    } else {
        format!(
            "{}{}",
            NICKNAMES[index % NICKNAMES.len()],
            index / NICKNAMES.len()
        )
    }
}

/// What one generation of force application produced.
#[derive(Clone, Debug)]
pub struct GenerationImpact {
    /// Whether the layout was valid right after this generation.
    pub layout_is_valid: bool,
    /// The combined force applied to each area (zero for fixed areas).
    pub forces: Vec<VectorD>,
    /// Each area's position after the forces were applied.
    pub positions: Vec<VectorD>,
}

/// The outcome of one epoch: snapped positions and the shift statistics
/// driving the convergence decision.
#[derive(Clone, Debug)]
pub struct EpochResult {
    /// Zero-based index of this epoch.
    pub epoch: usize,
    /// Grid-snapped position of every area at the end of the epoch.
    pub positions: Vec<Vector>,
    /// Component-wise sum of all per-area shifts since the previous epoch.
    pub total_shift: Vector,
    /// Statistics over the squared shift magnitudes.
    pub stats: SampleStats,
    /// Whether the layout was valid at the end of the epoch. Advisory
    /// only; an invalid mid-simulation layout is expected.
    pub layout_is_valid: bool,
    /// Whether further evolution is not expected to be significant.
    pub complete_evolution: bool,
}

impl EpochStatus for EpochResult {
    fn complete_evolution(&self) -> bool {
        self.complete_evolution
    }
}

/// Observer invoked after every generation.
pub type GenerationObserver<'a> = Box<dyn FnMut(&GenerationImpact, &[FloatingArea]) + 'a>;
/// Observer invoked after every epoch.
pub type EpochObserver<'a> = Box<dyn FnMut(&EpochResult, &[FloatingArea]) + 'a>;

/// A [`SimulatedSystem`] that places rectangular areas inside a bounded
/// environment.
///
/// Borrows the caller's areas for the duration of the run and mutates
/// their committed integer positions as the floating views move: after
/// every adjustment the rounded position is written back to the linked
/// [`Area`], so inspecting the areas mid-simulation is meaningful. Writes
/// flow one way only, simulation → area.
pub struct MapAreasSystem<'a> {
    random: RandomSource,
    env_size: Vector,
    areas: &'a mut [Area],
    floating: Vec<FloatingArea>,
    strategy: ForceStrategy,
    on_generation: Option<GenerationObserver<'a>>,
    on_epoch: Option<EpochObserver<'a>>,
}

impl<'a> MapAreasSystem<'a> {
    /// Creates a system over `areas` inside an environment of `env_size`.
    ///
    /// Unpositioned areas start centered in the environment; fixed areas
    /// participate in force computation but never move.
    pub fn new(
        random: RandomSource,
        env_size: Vector,
        areas: &'a mut [Area],
        strategy: ForceStrategy,
    ) -> Self {
        let floating = areas
            .iter()
            .enumerate()
            .map(|(i, area)| {
                let mut fa = FloatingArea::from_area(i, area, env_size);
                fa.set_nickname(nickname(i));
                fa
            })
            .collect();
        Self {
            random,
            env_size,
            areas,
            floating,
            strategy,
            on_generation: None,
            on_epoch: None,
        }
    }

    /// Installs a passive observer invoked after every generation.
    pub fn on_generation(mut self, observer: impl FnMut(&GenerationImpact, &[FloatingArea]) + 'a) -> Self {
        self.on_generation = Some(Box::new(observer));
        self
    }

    /// Installs a passive observer invoked after every epoch.
    pub fn on_epoch(mut self, observer: impl FnMut(&EpochResult, &[FloatingArea]) + 'a) -> Self {
        self.on_epoch = Some(Box::new(observer));
        self
    }

    /// The environment size this system places areas into.
    pub fn env_size(&self) -> Vector {
        self.env_size
    }

    /// Whether no two areas overlap and every area fits inside the
    /// environment.
    ///
    /// Advisory at every granularity: the engine never aborts on an
    /// invalid layout because mid-simulation states are expected to be
    /// transiently invalid.
    pub fn is_layout_valid(&self) -> bool {
        let env = FloatingArea::unlinked(VectorD::ZERO, VectorD::from(self.env_size));
        let no_overlap = self.floating.iter().enumerate().all(|(i, area)| {
            self.floating
                .iter()
                .enumerate()
                .all(|(j, other)| i == j || !area.overlaps(other))
        });
        let in_bounds = self.floating.iter().all(|area| area.fits_into(&env));
        no_overlap && in_bounds
    }

    /// Writes the rounded floating position back to the linked area.
    fn commit(&mut self, index: usize) {
        if let Some(target) = self.floating[index].link() {
            self.areas[target].set_position(self.floating[index].position().round());
        }
    }
}

impl SimulatedSystem for MapAreasSystem<'_> {
    type Impact = GenerationImpact;
    type Epoch = EpochResult;

    /// One generation: sums every non-fixed area's pairwise forces and its
    /// environment force, then displaces each area by `force * fragment`.
    ///
    /// All forces are computed from the positions at the start of the
    /// generation; no area's displacement affects another area's force
    /// within the same generation. The force producer (and with it the
    /// opposing-force cache) lives only for this generation.
    fn evolve(&mut self, fragment: f64) -> GenerationImpact {
        let count = self.floating.len();
        let mut producer = self.strategy.producer(fragment);
        let mut forces = Vec::with_capacity(count);
        for i in 0..count {
            if self.floating[i].is_position_fixed() {
                forces.push(VectorD::ZERO);
                continue;
            }
            let mut area_force = VectorD::ZERO;
            for j in 0..count {
                if j != i {
                    area_force += producer.area_force(&self.floating, i, j, &mut self.random);
                }
            }
            let env_force = producer.environment_force(&self.floating[i], self.env_size);
            log::trace!(
                "{}: {}, area={area_force}, env={env_force}",
                self.floating[i].nickname(),
                self.floating[i],
            );
            forces.push(area_force + env_force);
        }
        for i in 0..count {
            if self.floating[i].is_position_fixed() {
                continue;
            }
            let delta = forces[i] * fragment;
            self.floating[i].adjust_by(delta);
            self.commit(i);
        }
        let impact = GenerationImpact {
            layout_is_valid: self.is_layout_valid(),
            forces,
            positions: self.floating.iter().map(|fa| fa.position()).collect(),
        };
        if let Some(observer) = self.on_generation.as_mut() {
            observer(&impact, &self.floating);
        }
        impact
    }

    /// Ends an epoch: snaps every area to the integer grid, measures each
    /// area's shift against its position at the end of the previous epoch
    /// (the raw position for the first epoch), and declares the evolution
    /// complete when the mode of the squared shifts is zero and their
    /// variance is at most 0.1.
    fn complete_epoch(
        &mut self,
        previous: &[EpochResult],
        _impacts: &[GenerationImpact],
    ) -> EpochResult {
        let count = self.floating.len();
        let mut positions = Vec::with_capacity(count);
        for i in 0..count {
            let snapped = self.floating[i].snap_to_grid();
            positions.push(snapped);
            self.commit(i);
        }
        let shifts: Vec<Vector> = positions
            .iter()
            .enumerate()
            .map(|(i, position)| match previous.last() {
                Some(prev) => prev.positions[i] - *position,
                None => *position,
            })
            .collect();
        let total_shift = shifts
            .iter()
            .fold(Vector::ZERO, |acc, shift| acc + *shift);
        let stats = SampleStats::from_values(
            &shifts
                .iter()
                .map(|shift| shift.magnitude_sq() as f64)
                .collect::<Vec<_>>(),
        );
        // Evolution completes when most areas stopped moving and the
        // remaining movement is not dispersed.
        let complete_evolution = stats.mode == 0.0 && stats.variance <= 0.1;
        let result = EpochResult {
            epoch: previous.len(),
            positions,
            total_shift,
            stats,
            layout_is_valid: self.is_layout_valid(),
            complete_evolution,
        };
        log::debug!(
            "epoch {}: valid={}, total_shift={}, mode={}, variance={:.3}, complete={}",
            result.epoch,
            result.layout_is_valid,
            result.total_shift,
            result.stats.mode,
            result.stats.variance,
            result.complete_evolution,
        );
        if let Some(observer) = self.on_epoch.as_mut() {
            observer(&result, &self.floating);
        }
        result
    }
}
