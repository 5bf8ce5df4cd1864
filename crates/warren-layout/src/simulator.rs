//! A generic epoch/generation simulation driver.
//!
//! The driver knows nothing about what is being simulated; it only imposes
//! the evolution schedule. Time is divided into epochs, each epoch into a
//! fixed number of generations, and every generation applies a fragment
//! (`1 / generations_per_epoch`) of the system's current impulse. After each
//! epoch the system reports whether further evolution would still be
//! significant, and the driver stops on the first complete epoch or at the
//! epoch limit, whichever comes first.

use crate::error::LayoutConfigError;

/// An epoch outcome that can tell the driver whether to keep evolving.
pub trait EpochStatus {
    /// Whether further evolution is not expected to be significant.
    fn complete_evolution(&self) -> bool;
}

/// A system that evolves in discrete generations grouped into epochs.
pub trait SimulatedSystem {
    /// What one generation produces.
    type Impact;
    /// What one epoch produces.
    type Epoch: EpochStatus;

    /// Advances the system by one generation, applying `fragment` of the
    /// current impulse.
    fn evolve(&mut self, fragment: f64) -> Self::Impact;

    /// Closes the current epoch given all `previous` epoch outcomes and the
    /// `impacts` of this epoch's generations.
    fn complete_epoch(&mut self, previous: &[Self::Epoch], impacts: &[Self::Impact])
        -> Self::Epoch;
}

/// Drives a [`SimulatedSystem`] until its evolution completes or the epoch
/// limit is reached.
#[derive(Clone, Copy, Debug)]
pub struct EvolvingSimulator {
    max_epochs: usize,
    generations_per_epoch: usize,
}

impl EvolvingSimulator {
    /// Creates a simulator running at most `max_epochs` epochs of
    /// `generations_per_epoch` generations each.
    pub fn new(
        max_epochs: usize,
        generations_per_epoch: usize,
    ) -> Result<EvolvingSimulator, LayoutConfigError> {
        if max_epochs < 1 {
            return Err(LayoutConfigError::MaxEpochsOutOfRange { max_epochs });
        }
        if generations_per_epoch < 1 {
            return Err(LayoutConfigError::GenerationsOutOfRange {
                generations: generations_per_epoch,
            });
        }
        Ok(EvolvingSimulator {
            max_epochs,
            generations_per_epoch,
        })
    }

    /// Evolves `system` and returns the zero-based index of the epoch that
    /// completed the evolution, or the epoch limit when the budget ran out.
    ///
    /// Non-convergence is not an error; callers compare the result against
    /// the limit or re-inspect the system.
    pub fn evolve<S: SimulatedSystem>(&self, system: &mut S) -> usize {
        let fragment = 1.0 / self.generations_per_epoch as f64;
        let mut epochs: Vec<S::Epoch> = Vec::with_capacity(self.max_epochs);
        for epoch in 0..self.max_epochs {
            let impacts: Vec<S::Impact> = (0..self.generations_per_epoch)
                .map(|_| system.evolve(fragment))
                .collect();
            let result = system.complete_epoch(&epochs, &impacts);
            let complete = result.complete_evolution();
            epochs.push(result);
            if complete {
                return epoch;
            }
        }
        self.max_epochs
    }
}
