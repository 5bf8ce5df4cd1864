//! The placement entry point: distributes a set of areas inside an
//! environment.

use warren_core::{Area, RandomSource, Vector};

use crate::error::LayoutConfigError;
use crate::floating::FloatingArea;
use crate::producer::ForceStrategy;
use crate::simulator::EvolvingSimulator;
use crate::system::MapAreasSystem;

/// A rendering hook invoked with the environment size and the current
/// floating areas.
pub type RenderHook<'r> = Box<dyn FnMut(Vector, &[FloatingArea]) + 'r>;

/// The outcome of a placement run.
#[derive(Clone, Copy, Debug)]
pub struct PlacementReport {
    /// How many epochs ran before the simulation stopped.
    pub epochs_used: usize,
    /// Whether the final layout has no overlaps and stays in bounds.
    ///
    /// Placement is best-effort; an invalid final layout is reported, not
    /// an error, and the caller decides whether to retry.
    pub layout_valid: bool,
}

/// Places areas inside an environment by force-directed simulation.
///
/// Construct one through [`AreaDistributor::builder`]; the defaults run at
/// most 100 epochs of 10 generations each with an entropy-seeded random
/// source.
pub struct AreaDistributor<'r> {
    random: RandomSource,
    strategy: ForceStrategy,
    max_epochs: usize,
    generations_per_epoch: usize,
    verbose: bool,
    render: Option<RenderHook<'r>>,
}

/// Configures and creates an [`AreaDistributor`].
pub struct AreaDistributorBuilder<'r> {
    random: Option<RandomSource>,
    strategy: ForceStrategy,
    max_epochs: usize,
    generations_per_epoch: usize,
    verbose: bool,
    render: Option<RenderHook<'r>>,
}

impl<'r> AreaDistributorBuilder<'r> {
    /// Uses the given random source instead of an entropy-seeded one.
    pub fn random(mut self, random: RandomSource) -> Self {
        self.random = Some(random);
        self
    }

    /// Selects the force model.
    pub fn strategy(mut self, strategy: ForceStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Caps the number of epochs a run may take.
    pub fn max_epochs(mut self, max_epochs: usize) -> Self {
        self.max_epochs = max_epochs;
        self
    }

    /// Sets how many generations each epoch runs.
    pub fn generations_per_epoch(mut self, generations: usize) -> Self {
        self.generations_per_epoch = generations;
        self
    }

    /// Renders after every generation instead of only after every epoch.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Installs a rendering hook for watching the simulation.
    pub fn render(mut self, hook: impl FnMut(Vector, &[FloatingArea]) + 'r) -> Self {
        self.render = Some(Box::new(hook));
        self
    }

    /// Creates the distributor.
    ///
    /// Limits are validated when [`AreaDistributor::distribute`] runs.
    pub fn build(self) -> AreaDistributor<'r> {
        AreaDistributor {
            random: self.random.unwrap_or_else(RandomSource::from_entropy),
            strategy: self.strategy,
            max_epochs: self.max_epochs,
            generations_per_epoch: self.generations_per_epoch,
            verbose: self.verbose,
            render: self.render,
        }
    }
}

impl<'r> AreaDistributor<'r> {
    /// Starts configuring a distributor.
    pub fn builder() -> AreaDistributorBuilder<'r> {
        AreaDistributorBuilder {
            random: None,
            strategy: ForceStrategy::default(),
            max_epochs: 100,
            generations_per_epoch: 10,
            verbose: false,
            render: None,
        }
    }

    /// Distributes `areas` inside an environment of `env_size`.
    ///
    /// Mutates the areas' positions in place; unpositioned areas receive a
    /// position, fixed areas never move. The same distributor can place
    /// several layouts; each run forks the random source so the runs stay
    /// replayable from the distributor's seed.
    pub fn distribute(
        &mut self,
        env_size: Vector,
        areas: &mut [Area],
    ) -> Result<PlacementReport, LayoutConfigError> {
        let simulator = EvolvingSimulator::new(self.max_epochs, self.generations_per_epoch)?;
        let random = self.random.fork();
        log::debug!(
            "distributing {} areas in {} (seed {})",
            areas.len(),
            env_size,
            random.seed(),
        );

        let mut system = MapAreasSystem::new(random, env_size, areas, self.strategy);
        if let Some(render) = self.render.as_mut() {
            if self.verbose {
                system = system.on_generation(move |_, floating| render(env_size, floating));
            } else {
                system = system.on_epoch(move |_, floating| render(env_size, floating));
            }
        }

        // The simulator reports the completing epoch's index, or the limit
        // when the budget ran out; either way `index + 1` capped at the
        // limit is how many epochs actually ran.
        let epoch = simulator.evolve(&mut system);
        let epochs_used = (epoch + 1).min(self.max_epochs);
        let layout_valid = system.is_layout_valid();
        log::info!(
            "placement finished after {epochs_used} epoch(s), layout valid: {layout_valid}",
        );
        Ok(PlacementReport {
            epochs_used,
            layout_valid,
        })
    }
}
